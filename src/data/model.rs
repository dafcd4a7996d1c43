use std::fmt;

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

/// Landing outcome of a launch attempt, stored as `0` / `1` in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeClass {
    Failure = 0,
    Success = 1,
}

impl OutcomeClass {
    /// Numeric value as it appears in the `class` column.
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == OutcomeClass::Success
    }

    /// Parse `0` / `1` (integer or float form).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let numeric = match raw.parse::<i64>() {
            Ok(i) => i as f64,
            Err(_) => raw.parse::<f64>().ok()?,
        };
        if numeric == 0.0 {
            Some(OutcomeClass::Failure)
        } else if numeric == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier, e.g. `KSC LC-39A`.
    pub launch_site: String,
    pub outcome: OutcomeClass,
    /// Non-negative payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Booster variant label, e.g. `FT` or `B5`.
    pub booster_version_category: String,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        outcome: OutcomeClass,
        payload_mass_kg: f64,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            outcome,
            payload_mass_kg,
            booster_version_category: booster_version_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table. Built once, never mutated afterwards: there is no
/// `&mut self` method and the fields are private.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-seen order.
    sites: Vec<String>,
    /// Distinct booster categories in first-seen order.
    booster_categories: Vec<String>,
}

impl LaunchDataset {
    /// Build the dataset and its site / booster indices.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    /// All records in source row order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.records().iter()
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Smallest and largest payload mass, `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().fold(None, |acc, rec| {
            let m = rec.payload_mass_kg;
            Some(match acc {
                None => (m, m),
                Some((lo, hi)) => (f64::min(lo, m), f64::max(hi, m)),
            })
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a LaunchDataset {
    type Item = &'a LaunchRecord;
    type IntoIter = std::slice::Iter<'a, LaunchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The three-launch dataset used throughout the unit tests.
#[cfg(test)]
pub(crate) fn scenario_dataset() -> LaunchDataset {
    LaunchDataset::from_records(vec![
        LaunchRecord::new("KSC LC-39A", OutcomeClass::Success, 5000.0, "v1.1"),
        LaunchRecord::new("KSC LC-39A", OutcomeClass::Failure, 3000.0, "v1.0"),
        LaunchRecord::new("VAFB SLC-4E", OutcomeClass::Success, 9000.0, "v1.1"),
    ])
}
