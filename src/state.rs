use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::aggregate_outcomes;
use crate::data::chart::{CorrelationChart, OutcomeChart};
use crate::data::filter::{FilterState, PayloadRange, SiteSelection, filter_payload_correlation};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Filter events
// ---------------------------------------------------------------------------

/// A user interaction with one of the filter controls.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// Raw dropdown value (`ALL` or a site name).
    SiteSelected(String),
    /// Raw slider bounds.
    PayloadRangeChanged(f64, f64),
    /// Back to all sites and the full payload range.
    Reset,
}

/// Which views were recomputed by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recomputed {
    pub outcomes: bool,
    pub correlation: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Chart data is derived from scratch on every filter change and cached here
/// for the renderer; nothing else in the state depends on the filter.
pub struct AppState {
    dataset: LaunchDataset,
    config: DashboardConfig,

    /// Sites offered by the dropdown; also the set a selection is checked against.
    pub sites: Vec<String>,

    /// Current filter selection.
    filter: FilterState,

    outcome_chart: OutcomeChart,
    correlation_chart: CorrelationChart,

    /// Colours for pie slices in the all-sites view.
    pub site_colors: ColorMap,

    /// Colours for scatter points.
    pub booster_colors: ColorMap,

    /// Text typed into the site search box.
    pub site_search: String,

    /// Whether the records table is shown under the charts.
    pub show_records: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Take ownership of the loaded dataset and compute both views for the
    /// default filter.
    pub fn new(dataset: LaunchDataset, config: DashboardConfig) -> Self {
        let sites = config.selectable_sites(&dataset);
        let filter = FilterState {
            site: SiteSelection::All,
            payload_range: PayloadRange::new(config.payload_limits.0, config.payload_limits.1),
        };
        let outcome_chart = aggregate_outcomes(&dataset, &filter.site);
        let correlation_chart =
            filter_payload_correlation(&dataset, &filter.site, &filter.payload_range);

        let mut color_sites = sites.clone();
        for site in dataset.sites() {
            if !color_sites.contains(site) {
                color_sites.push(site.clone());
            }
        }

        Self {
            site_colors: ColorMap::new(&color_sites),
            booster_colors: ColorMap::new(dataset.booster_categories()),
            dataset,
            config,
            sites,
            filter,
            outcome_chart,
            correlation_chart,
            site_search: String::new(),
            show_records: false,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn outcome_chart(&self) -> &OutcomeChart {
        &self.outcome_chart
    }

    pub fn correlation_chart(&self) -> &CorrelationChart {
        &self.correlation_chart
    }

    /// Apply one filter event and recompute the affected views.
    ///
    /// * site change → both views
    /// * payload range change → relationship view only
    /// * reset → both views
    pub fn apply(&mut self, event: FilterEvent) -> Recomputed {
        match event {
            FilterEvent::SiteSelected(raw) => {
                self.filter.site = SiteSelection::resolve(&raw, &self.sites);
                self.recompute_outcomes();
                self.recompute_correlation();
                Recomputed {
                    outcomes: true,
                    correlation: true,
                }
            }
            FilterEvent::PayloadRangeChanged(min, max) => {
                self.filter.payload_range =
                    PayloadRange::from_bounds(min, max, self.config.payload_limits);
                self.recompute_correlation();
                Recomputed {
                    outcomes: false,
                    correlation: true,
                }
            }
            FilterEvent::Reset => {
                let (lo, hi) = self.config.payload_limits;
                self.filter = FilterState {
                    site: SiteSelection::All,
                    payload_range: PayloadRange::new(lo, hi),
                };
                self.recompute_outcomes();
                self.recompute_correlation();
                Recomputed {
                    outcomes: true,
                    correlation: true,
                }
            }
        }
    }

    fn recompute_outcomes(&mut self) {
        self.outcome_chart = aggregate_outcomes(&self.dataset, &self.filter.site);
        log::debug!(
            "Outcome view for {}: {} slices",
            self.filter.site,
            self.outcome_chart.slices.len()
        );
    }

    fn recompute_correlation(&mut self) {
        self.correlation_chart =
            filter_payload_correlation(&self.dataset, &self.filter.site, &self.filter.payload_range);
        log::debug!(
            "Correlation view for {} in {}: {} points",
            self.filter.site,
            self.filter.payload_range,
            self.correlation_chart.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::chart::ProportionCategory;
    use crate::data::model::scenario_dataset;

    fn state() -> AppState {
        AppState::new(scenario_dataset(), DashboardConfig::default())
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let state = state();
        assert_eq!(state.filter(), &FilterState::default());
        assert_eq!(state.outcome_chart().title, "Total Success Launches By Site");
        assert_eq!(state.correlation_chart().len(), 3);
    }

    #[test]
    fn site_change_recomputes_both_views() {
        let mut state = state();
        let recomputed = state.apply(FilterEvent::SiteSelected("KSC LC-39A".into()));
        assert_eq!(
            recomputed,
            Recomputed {
                outcomes: true,
                correlation: true
            }
        );
        assert_eq!(
            state.outcome_chart().title,
            "Total Success Launches for Site KSC LC-39A"
        );
        assert_eq!(state.outcome_chart().total(), 2);
        assert_eq!(state.correlation_chart().len(), 2);
    }

    #[test]
    fn payload_change_leaves_the_proportion_view_alone() {
        let mut state = state();
        let before = state.outcome_chart().clone();
        let recomputed = state.apply(FilterEvent::PayloadRangeChanged(4000.0, 10_000.0));
        assert!(!recomputed.outcomes);
        assert!(recomputed.correlation);
        assert_eq!(state.outcome_chart(), &before);
        assert_eq!(state.correlation_chart().len(), 2);
    }

    #[test]
    fn filters_combine_across_events() {
        let mut state = state();
        state.apply(FilterEvent::PayloadRangeChanged(4000.0, 10_000.0));
        state.apply(FilterEvent::SiteSelected("KSC LC-39A".into()));
        let points = &state.correlation_chart().points;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].payload_mass_kg, 5000.0);
    }

    #[test]
    fn unknown_site_behaves_like_all_sites() {
        let mut state = state();
        state.apply(FilterEvent::SiteSelected("Boca Chica".into()));
        assert_eq!(state.filter().site, SiteSelection::All);
        assert_eq!(
            state
                .outcome_chart()
                .count_of(&ProportionCategory::Site("VAFB SLC-4E".into())),
            Some(1)
        );
    }

    #[test]
    fn inverted_range_yields_an_empty_scatter() {
        let mut state = state();
        state.apply(FilterEvent::PayloadRangeChanged(9000.0, 1000.0));
        assert!(state.correlation_chart().is_empty());
    }

    #[test]
    fn listed_site_missing_from_data_gives_empty_views() {
        let mut state = state();
        state.apply(FilterEvent::SiteSelected("CCAFS SLC-40".into()));
        assert!(state.outcome_chart().is_empty());
        assert!(state.correlation_chart().is_empty());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = state();
        state.apply(FilterEvent::SiteSelected("VAFB SLC-4E".into()));
        state.apply(FilterEvent::PayloadRangeChanged(0.0, 1000.0));
        state.apply(FilterEvent::Reset);
        assert_eq!(state.filter(), &FilterState::default());
        assert_eq!(state.correlation_chart().len(), 3);
    }
}
