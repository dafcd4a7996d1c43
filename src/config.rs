use clap::Parser;

use crate::data::filter::PAYLOAD_LIMITS;
use crate::data::loader::DataSource;
use crate::data::model::LaunchDataset;

/// Public copy of the SpaceX launch records (IBM Skills Network course data).
pub const DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

/// Sites offered in the dropdown unless overridden.
pub const DEFAULT_SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "VAFB SLC-4E", "KSC LC-39A"];

pub const PAYLOAD_STEP: f64 = 1000.0;
pub const PAYLOAD_MARKS: [f64; 5] = [0.0, 2500.0, 5000.0, 7500.0, 10_000.0];

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "spacex-launch-dash")]
#[command(about = "Interactive dashboard for SpaceX launch records")]
pub struct Cli {
    /// Launch records: a .csv, .json or .parquet path, or an http(s) URL
    #[arg(long, short, env = "SPACEX_DASH_DATA", default_value = DEFAULT_DATA_URL)]
    pub data: String,

    /// Comma-separated list of sites offered in the dropdown
    #[arg(long, env = "SPACEX_DASH_SITES", value_delimiter = ',')]
    pub sites: Option<Vec<String>>,

    /// Offer the sites found in the data instead of the fixed list
    #[arg(long, conflicts_with = "sites")]
    pub derive_sites: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the dropdown's site list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteList {
    Fixed(Vec<String>),
    FromData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub site_list: SiteList,
    pub payload_limits: (f64, f64),
    pub payload_step: f64,
    pub payload_marks: Vec<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::parse(DEFAULT_DATA_URL),
            site_list: SiteList::Fixed(DEFAULT_SITES.iter().map(|s| s.to_string()).collect()),
            payload_limits: PAYLOAD_LIMITS,
            payload_step: PAYLOAD_STEP,
            payload_marks: PAYLOAD_MARKS.to_vec(),
        }
    }
}

impl From<&Cli> for DashboardConfig {
    fn from(cli: &Cli) -> Self {
        let site_list = if cli.derive_sites {
            SiteList::FromData
        } else {
            match &cli.sites {
                Some(sites) => SiteList::Fixed(
                    sites
                        .iter()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                ),
                None => DashboardConfig::default().site_list,
            }
        };
        Self {
            source: DataSource::parse(&cli.data),
            site_list,
            ..Default::default()
        }
    }
}

impl DashboardConfig {
    /// The selectable sites for this dataset.
    ///
    /// With a fixed list, sites present in the data but missing from the
    /// list are logged: they count towards "All Sites" but cannot be
    /// selected on their own.
    pub fn selectable_sites(&self, dataset: &LaunchDataset) -> Vec<String> {
        match &self.site_list {
            SiteList::FromData => dataset.sites().to_vec(),
            SiteList::Fixed(sites) => {
                for site in dataset.sites() {
                    if !sites.contains(site) {
                        log::warn!(
                            "Site '{site}' is in the data but not selectable; it only shows under All Sites"
                        );
                    }
                }
                sites.clone()
            }
        }
    }
}
