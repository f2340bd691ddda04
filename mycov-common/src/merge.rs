//! Merge engine
//!
//! Joins every feed into one [`DailyRecord`] per date. The country case feed
//! defines which dates exist; for each date the region case feed defines
//! which regions exist. Every other feed is a sparse lookup: a missing
//! `(date)` or `(date, region)` key leaves that sub-record at zero. Feeds are
//! published independently and lag one another, so a hole is expected rather
//! than an error.

use std::collections::BTreeMap;

use crate::feeds::readers::{self, ByDate, ByDateRegion, ByName, CountryCases};
use crate::feeds::{Feed, FeedSource, ParseMode};
use crate::model::{
    Cases, DailyRecord, Death, Hospital, Icu, Population, QuarantineCentre, RegionRecord, Test,
};
use crate::Result;

/// Every feed, parsed and keyed, ready to merge
#[derive(Debug, Clone, Default)]
pub struct FeedSet {
    pub country_cases: ByDate<CountryCases>,
    pub country_deaths: ByDate<Death>,
    pub country_tests: ByDate<Test>,
    pub population: ByName<Population>,
    pub region_cases: ByDateRegion<Cases>,
    pub region_deaths: ByDateRegion<Death>,
    pub hospital: ByDateRegion<Hospital>,
    pub icu: ByDateRegion<Icu>,
    pub quarantine: ByDateRegion<QuarantineCentre>,
    pub region_tests: ByDateRegion<Test>,
}

impl FeedSet {
    /// Fetch and parse every feed, one after another
    ///
    /// The first failing feed aborts the whole load; nothing is merged from a
    /// partial set.
    pub async fn fetch(source: &dyn FeedSource, mode: ParseMode) -> Result<Self> {
        Ok(Self {
            country_cases: readers::read_country_cases(&source.fetch(Feed::CountryCases).await?, mode)?,
            country_deaths: readers::read_country_deaths(&source.fetch(Feed::CountryDeaths).await?, mode)?,
            country_tests: readers::read_country_tests(&source.fetch(Feed::CountryTests).await?, mode)?,
            population: readers::read_population(&source.fetch(Feed::Population).await?, mode)?,
            region_cases: readers::read_region_cases(&source.fetch(Feed::RegionCases).await?, mode)?,
            region_deaths: readers::read_region_deaths(&source.fetch(Feed::RegionDeaths).await?, mode)?,
            hospital: readers::read_hospital(&source.fetch(Feed::RegionHospital).await?, mode)?,
            icu: readers::read_icu(&source.fetch(Feed::RegionIcu).await?, mode)?,
            quarantine: readers::read_quarantine(&source.fetch(Feed::RegionQuarantine).await?, mode)?,
            region_tests: readers::read_region_tests(&source.fetch(Feed::RegionTests).await?, mode)?,
        })
    }
}

fn lookup<T: Copy + Default>(feed: &ByDateRegion<T>, date: &str, region: &str) -> T {
    feed.get(date)
        .and_then(|regions| regions.get(region))
        .copied()
        .unwrap_or_default()
}

/// Join every feed into `date → DailyRecord`
///
/// `country` is the population-feed key for the national snapshot.
pub fn merge(feeds: &FeedSet, country: &str) -> BTreeMap<String, DailyRecord> {
    let national_population = feeds.population.get(country).copied().unwrap_or_default();

    feeds
        .country_cases
        .iter()
        .map(|(date, national)| {
            let regions = feeds
                .region_cases
                .get(date)
                .map(|cases| {
                    cases
                        .iter()
                        .map(|(name, cases)| {
                            let region = RegionRecord {
                                cases: *cases,
                                death: lookup(&feeds.region_deaths, date, name),
                                hospital: lookup(&feeds.hospital, date, name),
                                icu: lookup(&feeds.icu, date, name),
                                quarantine: lookup(&feeds.quarantine, date, name),
                                tests: lookup(&feeds.region_tests, date, name),
                                population: feeds.population.get(name).copied().unwrap_or_default(),
                            };
                            (name.clone(), region)
                        })
                        .collect()
                })
                .unwrap_or_default();

            let record = DailyRecord {
                date: date.clone(),
                cases: national.cases,
                clusters: national.clusters,
                death: feeds.country_deaths.get(date).copied().unwrap_or_default(),
                tests: feeds.country_tests.get(date).copied().unwrap_or_default(),
                population: national_population,
                regions,
            };
            (date.clone(), record)
        })
        .collect()
}
