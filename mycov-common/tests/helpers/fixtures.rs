//! Small but complete feed fixtures
//!
//! Three dates: 2021-06-01, 2021-06-02 and 2021-06-04 (06-03 is a gap).
//! Selangor and Johor report cases every day; hospital data only covers
//! Johor, and no feed other than cases covers 2021-06-04.

use std::collections::HashMap;

use mycov_common::feeds::Feed;

pub const COUNTRY_CASES: &str = "\
date,cases_new,cases_import,cases_recovered,cases_active,cluster_import,cluster_religious,cluster_community,cluster_highRisk,cluster_education,cluster_detentionCentre,cluster_workplace
2021-06-01,7105,4,6891,70000,0,1,20,3,0,2,40
2021-06-02,7703,2,6997,71000,0,0,18,2,1,0,35
2021-06-04,7748,5,7116,72000,,,,,,,
";

pub const COUNTRY_DEATHS: &str = "\
date,deaths_new,deaths_bid,deaths_new_dod,deaths_bid_dod
2021-06-01,75,6,70,5
2021-06-02,87,9,81,8
";

pub const COUNTRY_TESTS: &str = "\
date,rtk-ag,pcr
2021-06-01,60000,40000
2021-06-02,61000,oops
";

pub const POPULATION: &str = "\
state,idxs,pop,pop_18,pop_60,pop_12
Malaysia,0,32657400,23409600,3502000,26130500
Johor,1,3781000,2711900,428700,3020500
Selangor,10,6538000,4747900,575600,5268300
";

pub const REGION_CASES: &str = "\
date,state,cases_import,cases_new,cases_recovered
2021-06-01,Johor,0,600,550
2021-06-01,Selangor,1,2321,2200
2021-06-02,Johor,0,650,580
2021-06-02,Selangor,0,2500,2400
2021-06-04,Selangor,2,2600,2450
";

pub const REGION_DEATHS: &str = "\
date,state,deaths_new,deaths_bid,deaths_new_dod,deaths_bid_dod
2021-06-01,Selangor,30,2,28,1
2021-06-02,Selangor,35,3,33,2
";

pub const HOSPITAL: &str = "\
date,state,beds,beds_covid,beds_noncrit,admitted_pui,admitted_covid,admitted_total,discharged_pui,discharged_covid,discharged_total,hosp_covid,hosp_pui,hosp_noncovid
2021-06-01,Johor,3500,1000,3000,40,120,160,30,100,130,900,50,1500
2021-06-02,Johor,3500,1000,3000,42,125,167,31,110,141,915,48,1490
";

pub const ICU: &str = "\
date,state,beds_icu,beds_icu_rep,beds_icu_total,beds_icu_covid,vent,vent_port,icu_covid,icu_pui,icu_noncovid,vent_covid,vent_pui,vent_noncovid,vent_used,vent_port_used
2021-06-01,Selangor,120,130,250,100,200,20,90,5,60,50,2,30,82,4
";

pub const QUARANTINE: &str = "\
date,state,beds,admitted_pui,admitted_covid,admitted_total,discharged_pui,discharged_covid,discharged_total,pkrc_covid,pkrc_pui,pkrc_noncovid
2021-06-01,Selangor,4000,1,300,301,0,280,280,2500,3,0
";

pub const REGION_TESTS: &str = "\
date,state,rtk-ag,pcr
2021-06-01,Selangor,20000,15000
2021-06-01,Johor,5000,4000
";

/// Every feed, keyed for a [`super::MemoryFeedSource`]
pub fn standard_feeds() -> HashMap<Feed, String> {
    [
        (Feed::CountryCases, COUNTRY_CASES),
        (Feed::CountryDeaths, COUNTRY_DEATHS),
        (Feed::CountryTests, COUNTRY_TESTS),
        (Feed::Population, POPULATION),
        (Feed::RegionCases, REGION_CASES),
        (Feed::RegionDeaths, REGION_DEATHS),
        (Feed::RegionHospital, HOSPITAL),
        (Feed::RegionIcu, ICU),
        (Feed::RegionQuarantine, QUARANTINE),
        (Feed::RegionTests, REGION_TESTS),
    ]
    .into_iter()
    .map(|(feed, text)| (feed, text.to_string()))
    .collect()
}
