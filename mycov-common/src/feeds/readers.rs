//! Typed readers, one per feed
//!
//! Country feeds produce `date → record`, region feeds `date → region → record`
//! and the static population feed `name → record`. A repeated key keeps the
//! last row. Rows without their key cells are skipped.

use std::collections::BTreeMap;

use super::table::{FeedTable, ParseMode};
use super::Feed;
use crate::model::{Cases, Clusters, Death, Hospital, Icu, Population, QuarantineCentre, Test};
use crate::Result;

/// `date → record`
pub type ByDate<T> = BTreeMap<String, T>;
/// `date → region → record`
pub type ByDateRegion<T> = BTreeMap<String, BTreeMap<String, T>>;
/// `name → record`
pub type ByName<T> = BTreeMap<String, T>;

const DATE: &str = "date";
const REGION: &str = "state";

const DEATH_COLUMNS: [&str; 4] = ["deaths_new", "deaths_new_dod", "deaths_bid", "deaths_bid_dod"];
const TEST_COLUMNS: [&str; 2] = ["rtk-ag", "pcr"];

/// National case row: headline counts plus cluster breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountryCases {
    pub cases: Cases,
    pub clusters: Clusters,
}

fn read_by_date<T, const N: usize>(
    feed: Feed,
    text: &str,
    mode: ParseMode,
    names: [&'static str; N],
    build: impl Fn([i64; N]) -> T,
) -> Result<ByDate<T>> {
    let table = FeedTable::parse(feed, text)?;
    let date = table.column(DATE)?;
    let columns = table.columns(names)?;

    let mut out = ByDate::new();
    for row in table.rows(mode) {
        let Some(day) = row.key(date) else {
            continue;
        };
        out.insert(day.to_string(), build(row.counts(&columns)?));
    }
    tracing::debug!(feed = %feed, rows = table.len(), keys = out.len(), "Read country feed");
    Ok(out)
}

fn read_by_date_region<T, const N: usize>(
    feed: Feed,
    text: &str,
    mode: ParseMode,
    names: [&'static str; N],
    build: impl Fn([i64; N]) -> T,
) -> Result<ByDateRegion<T>> {
    let table = FeedTable::parse(feed, text)?;
    let date = table.column(DATE)?;
    let region = table.column(REGION)?;
    let columns = table.columns(names)?;

    let mut out = ByDateRegion::new();
    for row in table.rows(mode) {
        let (Some(day), Some(name)) = (row.key(date), row.key(region)) else {
            continue;
        };
        out.entry(day.to_string())
            .or_default()
            .insert(name.to_string(), build(row.counts(&columns)?));
    }
    tracing::debug!(feed = %feed, rows = table.len(), dates = out.len(), "Read region feed");
    Ok(out)
}

fn death_counts([new_deaths, actual_deaths, bid_deaths, actual_bid_deaths]: [i64; 4]) -> Death {
    Death {
        new_deaths,
        actual_deaths,
        bid_deaths,
        actual_bid_deaths,
    }
}

fn test_counts([rtk_ag, pcr]: [i64; 2]) -> Test {
    Test { rtk_ag, pcr }
}

/// `cases_malaysia.csv`
pub fn read_country_cases(text: &str, mode: ParseMode) -> Result<ByDate<CountryCases>> {
    read_by_date(
        Feed::CountryCases,
        text,
        mode,
        [
            "cases_new",
            "cases_import",
            "cases_recovered",
            "cluster_import",
            "cluster_religious",
            "cluster_community",
            "cluster_highRisk",
            "cluster_education",
            "cluster_detentionCentre",
            "cluster_workplace",
        ],
        |[new_cases, import_cases, recovered_cases, import, religious, community, high_risk, education, detention_centre, workplace]| {
            CountryCases {
                cases: Cases {
                    new_cases,
                    import_cases,
                    recovered_cases,
                },
                clusters: Clusters {
                    import,
                    religious,
                    community,
                    high_risk,
                    education,
                    detention_centre,
                    workplace,
                },
            }
        },
    )
}

/// `deaths_malaysia.csv`
pub fn read_country_deaths(text: &str, mode: ParseMode) -> Result<ByDate<Death>> {
    read_by_date(Feed::CountryDeaths, text, mode, DEATH_COLUMNS, death_counts)
}

/// `tests_malaysia.csv`
pub fn read_country_tests(text: &str, mode: ParseMode) -> Result<ByDate<Test>> {
    read_by_date(Feed::CountryTests, text, mode, TEST_COLUMNS, test_counts)
}

/// `population.csv`, keyed by region (or country) name only
pub fn read_population(text: &str, mode: ParseMode) -> Result<ByName<Population>> {
    let table = FeedTable::parse(Feed::Population, text)?;
    let name = table.column(REGION)?;
    let columns = table.columns(["pop", "pop_18", "pop_60", "pop_12"])?;

    let mut out = ByName::new();
    for row in table.rows(mode) {
        let Some(key) = row.key(name) else {
            continue;
        };
        let [total, over_18, over_60, over_12] = row.counts(&columns)?;
        out.insert(
            key.to_string(),
            Population {
                total,
                over_18,
                over_60,
                over_12,
            },
        );
    }
    Ok(out)
}

/// `cases_state.csv`
pub fn read_region_cases(text: &str, mode: ParseMode) -> Result<ByDateRegion<Cases>> {
    read_by_date_region(
        Feed::RegionCases,
        text,
        mode,
        ["cases_new", "cases_import", "cases_recovered"],
        |[new_cases, import_cases, recovered_cases]| Cases {
            new_cases,
            import_cases,
            recovered_cases,
        },
    )
}

/// `deaths_state.csv`
pub fn read_region_deaths(text: &str, mode: ParseMode) -> Result<ByDateRegion<Death>> {
    read_by_date_region(Feed::RegionDeaths, text, mode, DEATH_COLUMNS, death_counts)
}

/// `hospital.csv`
pub fn read_hospital(text: &str, mode: ParseMode) -> Result<ByDateRegion<Hospital>> {
    read_by_date_region(
        Feed::RegionHospital,
        text,
        mode,
        [
            "beds",
            "beds_covid",
            "beds_noncrit",
            "admitted_pui",
            "admitted_covid",
            "admitted_total",
            "discharged_pui",
            "discharged_covid",
            "discharged_total",
            "hosp_covid",
            "hosp_pui",
            "hosp_noncovid",
        ],
        |[beds, covid_beds, non_critical_beds, admitted_pui, admitted_covid, admitted_total, discharged_pui, discharged_covid, discharged_total, hospitalized_covid, hospitalized_pui, hospitalized_non_covid]| {
            Hospital {
                beds,
                covid_beds,
                non_critical_beds,
                admitted_pui,
                admitted_covid,
                admitted_total,
                discharged_pui,
                discharged_covid,
                discharged_total,
                hospitalized_covid,
                hospitalized_pui,
                hospitalized_non_covid,
            }
        },
    )
}

/// `icu.csv`
pub fn read_icu(text: &str, mode: ParseMode) -> Result<ByDateRegion<Icu>> {
    read_by_date_region(
        Feed::RegionIcu,
        text,
        mode,
        [
            "beds_icu",
            "beds_icu_rep",
            "beds_icu_total",
            "beds_icu_covid",
            "vent",
            "vent_port",
            "icu_covid",
            "icu_pui",
            "icu_noncovid",
            "vent_covid",
            "vent_pui",
            "vent_noncovid",
            "vent_used",
            "vent_port_used",
        ],
        |[icu_beds, icu_beds_rep, icu_beds_total, icu_beds_covid, ventilators, portable_ventilators, icu_covid, icu_pui, icu_non_covid, ventilators_covid, ventilators_pui, ventilators_non_covid, ventilators_used, portable_ventilators_used]| {
            Icu {
                icu_beds,
                icu_beds_rep,
                icu_beds_total,
                icu_beds_covid,
                ventilators,
                portable_ventilators,
                icu_covid,
                icu_pui,
                icu_non_covid,
                ventilators_covid,
                ventilators_pui,
                ventilators_non_covid,
                ventilators_used,
                portable_ventilators_used,
            }
        },
    )
}

/// `pkrc.csv`
pub fn read_quarantine(text: &str, mode: ParseMode) -> Result<ByDateRegion<QuarantineCentre>> {
    read_by_date_region(
        Feed::RegionQuarantine,
        text,
        mode,
        [
            "beds",
            "admitted_pui",
            "admitted_covid",
            "admitted_total",
            "discharged_pui",
            "discharged_covid",
            "discharged_total",
            "pkrc_covid",
            "pkrc_pui",
            "pkrc_noncovid",
        ],
        |[beds, admitted_pui, admitted_covid, admitted_total, discharged_pui, discharged_covid, discharged_total, covid, pui, non_covid]| {
            QuarantineCentre {
                beds,
                admitted_pui,
                admitted_covid,
                admitted_total,
                discharged_pui,
                discharged_covid,
                discharged_total,
                covid,
                pui,
                non_covid,
            }
        },
    )
}

/// `tests_state.csv`
pub fn read_region_tests(text: &str, mode: ParseMode) -> Result<ByDateRegion<Test>> {
    read_by_date_region(Feed::RegionTests, text, mode, TEST_COLUMNS, test_counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_country_cases_reads_clusters() {
        let text = "date,cases_new,cases_import,cases_recovered,cases_active,cluster_import,cluster_religious,cluster_community,cluster_highRisk,cluster_education,cluster_detentionCentre,cluster_workplace\n\
                    2021-06-01,7105,4,6891,80000,1,2,3,4,5,6,7\n";
        let out = read_country_cases(text, ParseMode::Tolerant).unwrap();
        let row = out["2021-06-01"];
        assert_eq!(row.cases.new_cases, 7105);
        assert_eq!(row.cases.import_cases, 4);
        assert_eq!(row.cases.recovered_cases, 6891);
        assert_eq!(row.clusters.import, 1);
        assert_eq!(row.clusters.workplace, 7);
    }

    #[test]
    fn test_unparseable_cell_becomes_zero() {
        let text = "date,rtk-ag,pcr\n2021-06-01,,oops\n";
        let out = read_country_tests(text, ParseMode::Tolerant).unwrap();
        assert_eq!(out["2021-06-01"], Test::default());
    }

    #[test]
    fn test_region_feed_groups_by_date_and_last_row_wins() {
        let text = "date,state,cases_new,cases_import,cases_recovered\n\
                    2021-06-01,Selangor,1,0,0\n\
                    2021-06-01,Johor,2,0,0\n\
                    2021-06-01,Selangor,9,0,0\n\
                    2021-06-02,Johor,3,0,0\n";
        let out = read_region_cases(text, ParseMode::Tolerant).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["2021-06-01"].len(), 2);
        assert_eq!(out["2021-06-01"]["Selangor"].new_cases, 9);
        assert_eq!(out["2021-06-02"]["Johor"].new_cases, 3);
    }

    #[test]
    fn test_row_without_region_is_skipped() {
        let text = "date,state,rtk-ag,pcr\n2021-06-01,,1,2\n2021-06-01,Perlis,3,4\n";
        let out = read_region_tests(text, ParseMode::Tolerant).unwrap();
        assert_eq!(out["2021-06-01"].len(), 1);
        assert_eq!(out["2021-06-01"]["Perlis"], Test { rtk_ag: 3, pcr: 4 });
    }

    #[test]
    fn test_population_keyed_by_name() {
        let text = "state,idxs,pop,pop_18,pop_60,pop_12\nMalaysia,0,32657400,23409600,3502000,26692700\nPerlis,9,255400,182000,36900,204700\n";
        let out = read_population(text, ParseMode::Tolerant).unwrap();
        assert_eq!(out["Malaysia"].total, 32_657_400);
        assert_eq!(out["Perlis"].over_60, 36_900);
        assert_eq!(out["Perlis"].over_12, 204_700);
    }

    #[test]
    fn test_renamed_column_fails_loudly() {
        let text = "date,state,beds,beds_covid\n2021-06-01,Perlis,1,2\n";
        let err = read_hospital(text, ParseMode::Tolerant).unwrap_err();
        assert!(matches!(err, Error::Schema { feed: Feed::RegionHospital, .. }));
    }

    #[test]
    fn test_deaths_map_dod_columns_to_actual() {
        let text = "date,deaths_new,deaths_bid,deaths_new_dod,deaths_bid_dod\n2021-06-01,10,2,8,1\n";
        let out = read_country_deaths(text, ParseMode::Tolerant).unwrap();
        assert_eq!(
            out["2021-06-01"],
            Death {
                new_deaths: 10,
                actual_deaths: 8,
                bid_deaths: 2,
                actual_bid_deaths: 1,
            }
        );
    }
}
