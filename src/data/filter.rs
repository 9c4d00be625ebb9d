use super::model::{SaleRecord, SalesDataset};

// ---------------------------------------------------------------------------
// Filter predicate: the two dropdown selections
// ---------------------------------------------------------------------------

/// Current dropdown selections. `None` means "no constraint" on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub city: Option<String>,
    pub gender: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from dropdown values; a cleared (empty) dropdown is absent.
    pub fn new(city: Option<&str>, gender: Option<&str>) -> Self {
        fn selected(value: Option<&str>) -> Option<String> {
            value.filter(|v| !v.is_empty()).map(str::to_string)
        }
        Self {
            city: selected(city),
            gender: selected(gender),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.gender.is_none()
    }

    /// Exact, case-sensitive equality on each present value (AND).
    pub fn matches(&self, record: &SaleRecord) -> bool {
        if let Some(city) = &self.city {
            if record.city != *city {
                return false;
            }
        }
        if let Some(gender) = &self.gender {
            if record.gender.as_str() != gender {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// SalesView – a borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Records that passed the current filter, in dataset order.
///
/// Values that appear nowhere in the data simply produce an empty view.
#[derive(Debug, Clone, Default)]
pub struct SalesView<'a> {
    pub records: Vec<&'a SaleRecord>,
}

impl<'a> SalesView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SaleRecord> + '_ {
        self.records.iter().copied()
    }

    /// Narrow this view further.
    pub fn filter(&self, criteria: &FilterCriteria) -> SalesView<'a> {
        SalesView {
            records: self.iter().filter(|r| criteria.matches(r)).collect(),
        }
    }
}

impl SalesDataset {
    /// The whole dataset as a view.
    pub fn view(&self) -> SalesView<'_> {
        SalesView {
            records: self.records.iter().collect(),
        }
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> SalesView<'_> {
        if criteria.is_empty() {
            return self.view();
        }
        SalesView {
            records: self.records.iter().filter(|r| criteria.matches(r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Gender;

    fn dataset() -> SalesDataset {
        let rec = |invoice: &str, city: &str, gender: Gender| SaleRecord {
            invoice_id: invoice.to_string(),
            date: NaiveDate::from_ymd_opt(2019, 2, 14).unwrap(),
            city: city.to_string(),
            gender,
            product_line: "Fashion accessories".to_string(),
            unit_price: 10.0,
            quantity: 1,
        };
        SalesDataset::from_records(vec![
            rec("1", "Yangon", Gender::Female),
            rec("2", "Yangon", Gender::Male),
            rec("3", "Mandalay", Gender::Female),
            rec("4", "Naypyitaw", Gender::Male),
        ])
    }

    fn ids(view: &SalesView<'_>) -> Vec<String> {
        view.iter().map(|r| r.invoice_id.clone()).collect()
    }

    #[test]
    fn no_criteria_is_identity() {
        let ds = dataset();
        let view = ds.filter(&FilterCriteria::default());
        assert_eq!(view.len(), ds.len());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = dataset();
        assert_eq!(ids(&ds.filter(&FilterCriteria::new(Some("Yangon"), None))), ["1", "2"]);
        assert_eq!(ids(&ds.filter(&FilterCriteria::new(None, Some("Female")))), ["1", "3"]);
        assert_eq!(
            ids(&ds.filter(&FilterCriteria::new(Some("Yangon"), Some("Female")))),
            ["1"]
        );
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let ds = dataset();
        assert!(ds.filter(&FilterCriteria::new(Some("yangon"), None)).is_empty());
        assert!(ds.filter(&FilterCriteria::new(None, Some("female"))).is_empty());
    }

    #[test]
    fn unknown_value_gives_empty_view() {
        let ds = dataset();
        assert!(ds.filter(&FilterCriteria::new(Some("Paris"), None)).is_empty());
    }

    #[test]
    fn empty_dropdown_value_means_no_filter() {
        let criteria = FilterCriteria::new(Some(""), Some(""));
        assert!(criteria.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        for city in [None, Some("Yangon"), Some("Mandalay"), Some("Nowhere")] {
            for gender in [None, Some("Female"), Some("Male")] {
                let criteria = FilterCriteria::new(city, gender);
                let once = ds.filter(&criteria);
                let twice = once.filter(&criteria);
                assert_eq!(ids(&once), ids(&twice));
            }
        }
    }
}
