use std::fmt;

use serde::Serialize;

use super::filter::SiteSelection;
use super::model::OutcomeClass;

// ---------------------------------------------------------------------------
// Proportion view
// ---------------------------------------------------------------------------

/// What a pie slice stands for: a whole site when all sites are shown, an
/// outcome class when one site is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProportionCategory {
    Site(String),
    Outcome(OutcomeClass),
}

impl fmt::Display for ProportionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProportionCategory::Site(site) => write!(f, "{site}"),
            ProportionCategory::Outcome(class) => write!(f, "{class}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProportionSlice {
    pub category: ProportionCategory,
    pub count: u64,
}

/// Input of the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeChart {
    pub title: String,
    pub slices: Vec<ProportionSlice>,
}

impl OutcomeChart {
    pub fn title_for(site: &SiteSelection) -> String {
        match site {
            SiteSelection::All => "Total Success Launches By Site".to_string(),
            SiteSelection::Site(name) => format!("Total Success Launches for Site {name}"),
        }
    }

    /// Sum of all slice counts.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Count for one category, if present.
    #[cfg(test)]
    pub fn count_of(&self, category: &ProportionCategory) -> Option<u64> {
        self.slices
            .iter()
            .find(|s| &s.category == category)
            .map(|s| s.count)
    }

    /// Share of each slice in `[0, 1]`. All zeros when the total is zero.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                if total == 0 {
                    0.0
                } else {
                    s.count as f64 / total as f64
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Relationship view
// ---------------------------------------------------------------------------

/// One scatter point. Serialized with the source column names for CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPoint {
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class", serialize_with = "serialize_outcome")]
    pub outcome: OutcomeClass,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

fn serialize_outcome<S: serde::Serializer>(
    class: &OutcomeClass,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(class.value())
}

/// Input of the scatter chart, points in source row order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationChart {
    pub title: String,
    pub points: Vec<CorrelationPoint>,
}

impl CorrelationChart {
    pub fn title_for(site: &SiteSelection) -> String {
        match site {
            SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
            SiteSelection::Site(name) => {
                format!("Correlation between Payload and Success for Site {name}")
            }
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
