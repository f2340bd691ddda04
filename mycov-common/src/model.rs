//! Daily and per-region record model
//!
//! A [`DailyRecord`] is the merged view of every feed for one calendar date.
//! Region sub-records live in a `BTreeMap`, so iteration is always sorted by
//! region name. Every count defaults to zero; documents missing a key decode
//! to zero as well.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Death counts (national or per region)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Death {
    /// Deaths reported on the day
    pub new_deaths: i64,
    /// Deaths that occurred on the day (by date of death)
    pub actual_deaths: i64,
    /// Brought-in-dead reported on the day
    pub bid_deaths: i64,
    /// Brought-in-dead that occurred on the day
    pub actual_bid_deaths: i64,
}

/// Test counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Test {
    pub rtk_ag: i64,
    pub pcr: i64,
}

/// Static population snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Population {
    pub total: i64,
    #[serde(rename = "over18")]
    pub over_18: i64,
    #[serde(rename = "over60")]
    pub over_60: i64,
    #[serde(rename = "over12")]
    pub over_12: i64,
}

/// Hospital bed capacity and utilisation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hospital {
    pub beds: i64,
    pub covid_beds: i64,
    pub non_critical_beds: i64,
    pub admitted_pui: i64,
    pub admitted_covid: i64,
    pub admitted_total: i64,
    pub discharged_pui: i64,
    pub discharged_covid: i64,
    pub discharged_total: i64,
    pub hospitalized_covid: i64,
    pub hospitalized_pui: i64,
    pub hospitalized_non_covid: i64,
}

/// ICU bed and ventilator capacity and utilisation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Icu {
    pub icu_beds: i64,
    pub icu_beds_rep: i64,
    pub icu_beds_total: i64,
    pub icu_beds_covid: i64,
    pub ventilators: i64,
    pub portable_ventilators: i64,
    pub icu_covid: i64,
    pub icu_pui: i64,
    pub icu_non_covid: i64,
    pub ventilators_covid: i64,
    pub ventilators_pui: i64,
    pub ventilators_non_covid: i64,
    pub ventilators_used: i64,
    pub portable_ventilators_used: i64,
}

/// Quarantine and treatment centre (PKRC) capacity and utilisation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuarantineCentre {
    pub beds: i64,
    pub admitted_pui: i64,
    pub admitted_covid: i64,
    pub admitted_total: i64,
    pub discharged_pui: i64,
    pub discharged_covid: i64,
    pub discharged_total: i64,
    pub covid: i64,
    pub pui: i64,
    pub non_covid: i64,
}

/// Case counts by cluster category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Clusters {
    pub import: i64,
    pub religious: i64,
    pub community: i64,
    pub high_risk: i64,
    pub education: i64,
    pub detention_centre: i64,
    pub workplace: i64,
}

/// Case counts shared by national and region rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cases {
    pub new_cases: i64,
    pub import_cases: i64,
    pub recovered_cases: i64,
}

/// Everything known about one region on one date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegionRecord {
    #[serde(flatten)]
    pub cases: Cases,
    pub death: Death,
    pub hospital: Hospital,
    pub icu: Icu,
    pub quarantine: QuarantineCentre,
    pub tests: Test,
    pub population: Population,
}

/// Merged national record for one calendar date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyRecord {
    /// `YYYY-MM-DD`; unique key and sort key
    pub date: String,
    #[serde(flatten)]
    pub cases: Cases,
    pub clusters: Clusters,
    pub death: Death,
    pub tests: Test,
    pub population: Population,
    /// Region name → region record, sorted by name
    pub regions: BTreeMap<String, RegionRecord>,
}

impl DailyRecord {
    /// Empty record for `date` with every count at zero
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// Look up a region by its exact name
    pub fn region(&self, name: &str) -> Option<&RegionRecord> {
        self.regions.get(name)
    }
}
