use crate::color::ColorMap;
use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::data::filter::FilterCriteria;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset and display settings, fixed after startup.
    pub dashboard: Dashboard,

    /// Current dropdown selections.
    pub filters: FilterCriteria,

    /// Widget contents for `filters` (cached until the next change).
    pub snapshot: DashboardSnapshot,

    /// Product line → slice colour.
    pub color_map: ColorMap,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        let filters = FilterCriteria::default();
        let snapshot = dashboard.render(&filters);
        let color_map = ColorMap::new(
            dashboard
                .dataset()
                .records
                .iter()
                .map(|r| r.product_line.as_str()),
        );
        Self {
            dashboard,
            filters,
            snapshot,
            color_map,
        }
    }

    /// Recompute the widgets after a filter change.
    pub fn refilter(&mut self) {
        self.snapshot = self.dashboard.render(&self.filters);
    }

    pub fn set_city(&mut self, city: Option<String>) {
        if self.filters.city != city {
            self.filters.city = city;
            self.refilter();
        }
    }

    pub fn set_gender(&mut self, gender: Option<String>) {
        if self.filters.gender != gender {
            self.filters.gender = gender;
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::aggregate::DisplayUnits;
    use crate::data::model::{Gender, SaleRecord, SalesDataset};

    fn state() -> AppState {
        let rec = |invoice: &str, city: &str, gender: Gender| SaleRecord {
            invoice_id: invoice.to_string(),
            date: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            city: city.to_string(),
            gender,
            product_line: "Food and beverages".to_string(),
            unit_price: 20.0,
            quantity: 2,
        };
        let ds = SalesDataset::from_records(vec![
            rec("1", "Yangon", Gender::Female),
            rec("2", "Mandalay", Gender::Male),
        ]);
        AppState::new(Dashboard::new(ds, DisplayUnits::default(), 5))
    }

    #[test]
    fn starts_unfiltered() {
        let st = state();
        assert!(st.filters.is_empty());
        assert_eq!(st.snapshot.total_amount, "80.00€");
    }

    #[test]
    fn changing_a_dropdown_rerenders() {
        let mut st = state();
        st.set_city(Some("Yangon".into()));
        assert_eq!(st.snapshot.total_amount, "40.00€");
        st.set_gender(Some("Male".into()));
        assert_eq!(st.snapshot.purchase_count, "0 achats");
        st.set_city(None);
        st.set_gender(None);
        assert_eq!(st.snapshot.purchase_count, "2 achats");
    }
}
