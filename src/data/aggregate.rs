use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};

use super::filter::SalesView;
use super::model::Gender;

// ---------------------------------------------------------------------------
// Display units for the two indicator cards
// ---------------------------------------------------------------------------

/// Suffixes used when the indicator figures are turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnits {
    pub currency_symbol: String,
    pub purchase_unit: String,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            purchase_unit: "achats".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

pub fn total_amount_value(view: &SalesView<'_>) -> f64 {
    view.iter().fold(0.0, |acc, r| acc + r.total())
}

/// `1,234.50€`: thousands separators, two decimals, currency suffix.
pub fn total_amount(view: &SalesView<'_>, units: &DisplayUnits) -> String {
    format_amount(total_amount_value(view), &units.currency_symbol)
}

pub fn format_amount(value: f64, currency_symbol: &str) -> String {
    format!("{}{currency_symbol}", format_num::format_num!(",.2", value))
}

/// Number of distinct invoices; a multi-line invoice counts once.
pub fn distinct_invoices(view: &SalesView<'_>) -> usize {
    view.iter()
        .map(|r| r.invoice_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn purchase_count(view: &SalesView<'_>, units: &DisplayUnits) -> String {
    format!("{} {}", distinct_invoices(view), units.purchase_unit)
}

// ---------------------------------------------------------------------------
// Share of sales per product line
// ---------------------------------------------------------------------------

/// Summed totals per product line, ordered by product line. Lines with no
/// matching record are absent.
pub fn category_breakdown(view: &SalesView<'_>) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for rec in view.iter() {
        *sums.entry(rec.product_line.clone()).or_insert(0.0) += rec.total();
    }
    sums
}

// ---------------------------------------------------------------------------
// Weekly trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    /// Two-digit week label, `"00"` to `"53"`.
    pub label: String,
    pub week: u32,
    pub total: f64,
}

/// Week of the year with weeks starting on Sunday: days before the first
/// Sunday of the year are week 0. Not the ISO week.
///
/// Dates from different years that share a week number land in the same
/// bucket; the dashboard assumes a single-year dataset.
pub fn sunday_week_of_year(date: NaiveDate) -> u32 {
    let day_of_year = date.ordinal0();
    let days_from_sunday = date.weekday().num_days_from_sunday();
    (day_of_year + 7 - days_from_sunday) / 7
}

/// Summed totals per Sunday-based week, ascending by week label.
pub fn weekly_trend(view: &SalesView<'_>) -> Vec<WeekBucket> {
    let mut sums: BTreeMap<u32, f64> = BTreeMap::new();
    for rec in view.iter() {
        *sums.entry(sunday_week_of_year(rec.date)).or_insert(0.0) += rec.total();
    }
    sums.into_iter()
        .map(|(week, total)| WeekBucket {
            label: format!("{week:02}"),
            week,
            total,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Distribution of line totals by gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub female: usize,
    pub male: usize,
}

impl HistogramBin {
    pub fn count(&self, gender: Gender) -> usize {
        match gender {
            Gender::Female => self.female,
            Gender::Male => self.male,
        }
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins over `[min, max]` of the line totals, counted per gender.
/// An empty view has no bins; a view whose totals are all equal has one bin.
pub fn amount_histogram(view: &SalesView<'_>, bins: usize) -> Vec<HistogramBin> {
    let totals: Vec<(f64, Gender)> = view.iter().map(|r| (r.total(), r.gender)).collect();
    if totals.is_empty() {
        return Vec::new();
    }

    let min = totals.iter().map(|(t, _)| *t).fold(f64::INFINITY, f64::min);
    let max = totals.iter().map(|(t, _)| *t).fold(f64::NEG_INFINITY, f64::max);
    let (n_bins, width) = if max > min {
        let n = bins.max(1);
        (n, (max - min) / n as f64)
    } else {
        (1, 1.0)
    };

    let mut out: Vec<HistogramBin> = (0..n_bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            female: 0,
            male: 0,
        })
        .collect();

    for (total, gender) in totals {
        // The maximum lands on the closing edge; keep it in the last bin.
        let idx = (((total - min) / width) as usize).min(n_bins - 1);
        match gender {
            Gender::Female => out[idx].female += 1,
            Gender::Male => out[idx].male += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterCriteria;
    use crate::data::model::{SaleRecord, SalesDataset};

    fn rec(invoice: &str, ymd: (i32, u32, u32), city: &str, gender: Gender, line: &str, price: f64, qty: i64) -> SaleRecord {
        SaleRecord {
            invoice_id: invoice.to_string(),
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            city: city.to_string(),
            gender,
            product_line: line.to_string(),
            unit_price: price,
            quantity: qty,
        }
    }

    fn sample() -> SalesDataset {
        SalesDataset::from_records(vec![
            rec("A", (2019, 1, 1), "Yangon", Gender::Female, "Health and beauty", 250.25, 4),
            rec("A", (2019, 1, 1), "Yangon", Gender::Female, "Sports and travel", 12.5, 2),
            rec("B", (2019, 1, 6), "Mandalay", Gender::Male, "Health and beauty", 1000.0, 3),
            rec("C", (2019, 3, 10), "Yangon", Gender::Male, "Food and beverages", 9.75, 8),
        ])
    }

    #[test]
    fn total_amount_is_grouped_with_two_decimals() {
        let ds = sample();
        let units = DisplayUnits::default();
        let view = ds.view();
        // 1001.0 + 25.0 + 3000.0 + 78.0
        assert_eq!(total_amount_value(&view), 4104.0);
        assert_eq!(total_amount(&view, &units), "4,104.00€");
    }

    #[test]
    fn total_amount_equals_sum_of_line_products() {
        let ds = sample();
        let expected: f64 = ds.records.iter().map(|r| r.unit_price * r.quantity as f64).sum();
        assert!((total_amount_value(&ds.view()) - expected).abs() < 1e-9);
    }

    #[test]
    fn purchase_count_counts_distinct_invoices() {
        let ds = sample();
        let view = ds.view();
        assert_eq!(distinct_invoices(&view), 3);
        assert!(distinct_invoices(&view) < view.len());
        assert_eq!(purchase_count(&view, &DisplayUnits::default()), "3 achats");
    }

    #[test]
    fn empty_view_yields_zero_aggregates() {
        let ds = sample();
        let view = ds.filter(&FilterCriteria::new(Some("Paris"), None));
        let units = DisplayUnits::default();
        assert_eq!(total_amount(&view, &units), "0.00€");
        assert_eq!(purchase_count(&view, &units), "0 achats");
        assert!(category_breakdown(&view).is_empty());
        assert!(weekly_trend(&view).is_empty());
        assert!(amount_histogram(&view, 20).is_empty());
    }

    #[test]
    fn category_sums_add_up_to_total_for_every_filter() {
        let ds = sample();
        for city in [None, Some("Yangon"), Some("Mandalay")] {
            for gender in [None, Some("Female"), Some("Male")] {
                let view = ds.filter(&FilterCriteria::new(city, gender));
                let sum: f64 = category_breakdown(&view).values().sum();
                assert!((sum - total_amount_value(&view)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn category_breakdown_omits_unmatched_lines() {
        let ds = sample();
        let view = ds.filter(&FilterCriteria::new(None, Some("Male")));
        let cats = category_breakdown(&view);
        assert_eq!(cats.len(), 2);
        assert_eq!(cats["Health and beauty"], 3000.0);
        assert_eq!(cats["Food and beverages"], 78.0);
        assert!(!cats.contains_key("Sports and travel"));
    }

    #[test]
    fn week_numbers_start_on_sunday() {
        // 2019-01-01 is a Tuesday, the first Sunday is 2019-01-06.
        let d = |m, day| NaiveDate::from_ymd_opt(2019, m, day).unwrap();
        assert_eq!(sunday_week_of_year(d(1, 1)), 0);
        assert_eq!(sunday_week_of_year(d(1, 5)), 0);
        assert_eq!(sunday_week_of_year(d(1, 6)), 1);
        assert_eq!(sunday_week_of_year(d(3, 10)), 10);
        // Agrees with strftime's %U.
        for day in [d(2, 28), d(7, 4), d(12, 31)] {
            assert_eq!(format!("{:02}", sunday_week_of_year(day)), day.format("%U").to_string());
        }
    }

    #[test]
    fn weekly_trend_is_sorted_and_summed_per_bucket() {
        let ds = sample();
        let trend = weekly_trend(&ds.view());
        let labels: Vec<&str> = trend.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["00", "01", "10"]);
        assert_eq!(trend[0].total, 1026.0);
        assert_eq!(trend[1].total, 3000.0);
        assert_eq!(trend[2].total, 78.0);
        assert!(trend.windows(2).all(|w| w[0].label <= w[1].label));
    }

    #[test]
    fn histogram_counts_every_record_once() {
        let ds = sample();
        let bins = amount_histogram(&ds.view(), 4);
        assert_eq!(bins.len(), 4);
        let female: usize = bins.iter().map(|b| b.count(Gender::Female)).sum();
        let male: usize = bins.iter().map(|b| b.count(Gender::Male)).sum();
        assert_eq!((female, male), (2, 2));
        // The largest total (3000) falls in the last bin.
        assert_eq!(bins[3].male, 1);
        assert_eq!(bins[0].start, 25.0);
        assert_eq!(bins[3].end, 3000.0);
    }

    #[test]
    fn histogram_of_identical_totals_has_one_bin() {
        let ds = SalesDataset::from_records(vec![
            rec("A", (2019, 1, 1), "Yangon", Gender::Female, "x", 5.0, 2),
            rec("B", (2019, 1, 2), "Yangon", Gender::Male, "x", 10.0, 1),
        ]);
        let bins = amount_histogram(&ds.view(), 20);
        assert_eq!(bins.len(), 1);
        assert_eq!((bins[0].female, bins[0].male), (1, 1));
    }

    #[test]
    fn two_record_example() {
        let ds = SalesDataset::from_records(vec![
            rec("1", (2019, 2, 1), "Yangon", Gender::Female, "Electronic accessories", 100.0, 1),
            rec("2", (2019, 2, 1), "Yangon", Gender::Male, "Home and lifestyle", 50.0, 1),
        ]);
        let units = DisplayUnits::default();
        let view = ds.filter(&FilterCriteria::new(None, Some("Female")));
        assert_eq!(total_amount(&view, &units), "100.00€");
        assert_eq!(purchase_count(&view, &units), "1 achats");
        let cats = category_breakdown(&view);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats["Electronic accessories"], 100.0);
    }
}
