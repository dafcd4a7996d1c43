use std::fmt;

use thiserror::Error;

use super::chart::{CorrelationChart, CorrelationPoint};
use super::model::LaunchDataset;

/// Dropdown value that stands for every site.
pub const ALL_SITES: &str = "ALL";

/// Lower and upper limit of the payload slider, in kg.
pub const PAYLOAD_LIMITS: (f64, f64) = (0.0, 10_000.0);

// ---------------------------------------------------------------------------
// Invalid filter input
// ---------------------------------------------------------------------------

/// Filter input the UI should never produce. Never fatal: callers fall back
/// to a usable filter via [`SiteSelection::resolve`] / [`PayloadRange::from_bounds`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("unknown launch site '{0}'")]
    UnknownSite(String),
    #[error("inverted payload range [{min}, {max}]")]
    InvertedRange { min: f64, max: f64 },
    #[error("non-finite payload bound {0}")]
    NonFiniteBound(f64),
}

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a raw dropdown value against the selectable sites.
    pub fn parse(raw: &str, known_sites: &[String]) -> Result<Self, FilterError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL_SITES) {
            return Ok(SiteSelection::All);
        }
        if known_sites.iter().any(|s| s == raw) {
            Ok(SiteSelection::Site(raw.to_string()))
        } else {
            Err(FilterError::UnknownSite(raw.to_string()))
        }
    }

    /// Like [`parse`](Self::parse), but an unknown site degrades to `All`.
    pub fn resolve(raw: &str, known_sites: &[String]) -> Self {
        Self::parse(raw, known_sites).unwrap_or_else(|e| {
            log::warn!("{e}; showing all sites");
            SiteSelection::All
        })
    }

    /// Whether a record launched from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Closed payload interval `[min, max]`. An inverted interval is representable
/// and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::full()
    }
}

impl PayloadRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The whole slider span.
    pub fn full() -> Self {
        Self::new(PAYLOAD_LIMITS.0, PAYLOAD_LIMITS.1)
    }

    /// Check a raw slider pair without repairing it.
    pub fn validate(min: f64, max: f64) -> Result<Self, FilterError> {
        for bound in [min, max] {
            if !bound.is_finite() {
                return Err(FilterError::NonFiniteBound(bound));
            }
        }
        if min > max {
            return Err(FilterError::InvertedRange { min, max });
        }
        Ok(Self::new(min, max))
    }

    /// Build a range from raw slider bounds. Bounds are clamped into `limits`,
    /// a non-finite bound becomes the corresponding limit, and an inverted
    /// range is kept so that it matches nothing.
    pub fn from_bounds(min: f64, max: f64, limits: (f64, f64)) -> Self {
        let (lo, hi) = limits;
        let fix = |bound: f64, fallback: f64| {
            if bound.is_finite() {
                bound.clamp(lo, hi)
            } else {
                log::warn!("{}; using {fallback}", FilterError::NonFiniteBound(bound));
                fallback
            }
        };
        let (min, max) = (fix(min, lo), fix(max, hi));
        Self::validate(min, max).unwrap_or_else(|e| {
            log::warn!("{e}; no launches will match");
            Self::new(min, max)
        })
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.min <= payload_mass_kg && payload_mass_kg <= self.max
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kg", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// The user's current selection; the only input that drives recomputation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

// ---------------------------------------------------------------------------
// Relationship view data
// ---------------------------------------------------------------------------

/// Records inside `range` (and launched from the selected site), as
/// `(payload, class, booster)` points in source row order.
pub fn filter_payload_correlation(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> CorrelationChart {
    let points = dataset
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| site.matches(&rec.launch_site))
        .map(|rec| CorrelationPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
        })
        .collect();

    CorrelationChart {
        title: CorrelationChart::title_for(site),
        points,
    }
}
