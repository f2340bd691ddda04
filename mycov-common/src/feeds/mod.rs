//! Source feeds published by the Ministry of Health
//!
//! Each [`Feed`] is one CSV table. [`FeedSource`] abstracts retrieval so the
//! merge engine can be driven from HTTP in production and from fixtures in
//! tests.

use async_trait::async_trait;
use std::fmt;

use crate::Result;

pub mod http;
pub mod readers;
pub mod table;

pub use http::HttpFeedSource;
pub use table::{parse_count, ParseMode, ParsedCount};

/// Default upstream repository holding every feed
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/MoH-Malaysia/covid19-public/main";

/// One upstream CSV table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feed {
    CountryCases,
    CountryDeaths,
    CountryTests,
    Population,
    RegionCases,
    RegionDeaths,
    RegionHospital,
    RegionIcu,
    RegionQuarantine,
    RegionTests,
}

impl Feed {
    /// Every feed, in fetch order
    pub const ALL: [Feed; 10] = [
        Feed::CountryCases,
        Feed::CountryDeaths,
        Feed::CountryTests,
        Feed::Population,
        Feed::RegionCases,
        Feed::RegionDeaths,
        Feed::RegionHospital,
        Feed::RegionIcu,
        Feed::RegionQuarantine,
        Feed::RegionTests,
    ];

    /// Path relative to the repository base URL
    pub fn path(self) -> &'static str {
        match self {
            Feed::CountryCases => "epidemic/cases_malaysia.csv",
            Feed::CountryDeaths => "epidemic/deaths_malaysia.csv",
            Feed::CountryTests => "epidemic/tests_malaysia.csv",
            Feed::Population => "static/population.csv",
            Feed::RegionCases => "epidemic/cases_state.csv",
            Feed::RegionDeaths => "epidemic/deaths_state.csv",
            Feed::RegionHospital => "epidemic/hospital.csv",
            Feed::RegionIcu => "epidemic/icu.csv",
            Feed::RegionQuarantine => "epidemic/pkrc.csv",
            Feed::RegionTests => "epidemic/tests_state.csv",
        }
    }

    /// File stem, used in logs and error messages
    pub fn name(self) -> &'static str {
        let path = self.path();
        let file = path.rsplit('/').next().unwrap_or(path);
        file.strip_suffix(".csv").unwrap_or(file)
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Retrieves the raw text of a feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the full CSV body of `feed`
    ///
    /// Any failure is fatal for the calling run; no retry is attempted.
    async fn fetch(&self, feed: Feed) -> Result<String>;
}
