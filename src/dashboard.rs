use std::collections::BTreeMap;

use crate::data::aggregate::{
    amount_histogram, category_breakdown, purchase_count, total_amount, weekly_trend,
    DisplayUnits, HistogramBin, WeekBucket,
};
use crate::data::filter::FilterCriteria;
use crate::data::model::SalesDataset;

/// Everything the widgets show for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub total_amount: String,
    pub purchase_count: String,
    pub histogram: Vec<HistogramBin>,
    pub categories: BTreeMap<String, f64>,
    pub weekly: Vec<WeekBucket>,
    /// Number of sale lines that passed the filter.
    pub matched_records: usize,
}

/// The read-only dataset plus display settings, rendered on demand.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: SalesDataset,
    units: DisplayUnits,
    histogram_bins: usize,
}

impl Dashboard {
    pub fn new(dataset: SalesDataset, units: DisplayUnits, histogram_bins: usize) -> Self {
        Self {
            dataset,
            units,
            histogram_bins,
        }
    }

    pub fn dataset(&self) -> &SalesDataset {
        &self.dataset
    }

    pub fn units(&self) -> &DisplayUnits {
        &self.units
    }

    /// Filter, then run every aggregator on the same view.
    pub fn render(&self, criteria: &FilterCriteria) -> DashboardSnapshot {
        let view = self.dataset.filter(criteria);
        log::debug!(
            "Rendering city={:?} gender={:?}: {} of {} lines",
            criteria.city,
            criteria.gender,
            view.len(),
            self.dataset.len()
        );

        DashboardSnapshot {
            total_amount: total_amount(&view, &self.units),
            purchase_count: purchase_count(&view, &self.units),
            histogram: amount_histogram(&view, self.histogram_bins),
            categories: category_breakdown(&view),
            weekly: weekly_trend(&view),
            matched_records: view.len(),
        }
    }
}
