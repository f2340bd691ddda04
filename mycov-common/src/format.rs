//! Notification formatting
//!
//! Renders a [`DailyRecord`] into short chat messages. Region display tags
//! (Slack emoji by default) come from one immutable [`RegionTags`] map,
//! built once at startup and shared by every consumer.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::model::DailyRecord;

/// Reply used whenever a query cannot be answered
pub const NOT_UNDERSTOOD: &str =
    "Sorry, I don't understand. Try a date (YYYY-MM-DD), a state name or \"Malaysia\".";

/// Immutable region name → display tag map
#[derive(Debug, Clone, Default)]
pub struct RegionTags(Arc<BTreeMap<String, String>>);

impl RegionTags {
    pub fn new(tags: BTreeMap<String, String>) -> Self {
        Self(Arc::new(tags))
    }

    /// Tag for `name`, empty when unknown
    pub fn tag(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Standard Slack emoji tags for Malaysia and its states
pub fn default_region_tags() -> BTreeMap<String, String> {
    [
        ("Malaysia", ":malaysia:"),
        ("Johor", ":johor:"),
        ("Kedah", ":kedah:"),
        ("Kelantan", ":kelantan:"),
        ("Melaka", ":melaka:"),
        ("Negeri Sembilan", ":n9:"),
        ("Pahang", ":pahang:"),
        ("Perak", ":perak:"),
        ("Perlis", ":perlis:"),
        ("Pulau Pinang", ":ppinang:"),
        ("Sabah", ":sabah:"),
        ("Sarawak", ":sarawak:"),
        ("Selangor", ":selangor:"),
        ("Terengganu", ":terengganu:"),
        ("W.P. Kuala Lumpur", ":kl:"),
        ("W.P. Labuan", ":labuan:"),
        ("W.P. Putrajaya", ":putrajaya:"),
    ]
    .into_iter()
    .map(|(name, tag)| (name.to_string(), tag.to_string()))
    .collect()
}

/// Renders record summaries
#[derive(Debug, Clone)]
pub struct Formatter {
    tags: RegionTags,
    country: String,
}

impl Formatter {
    /// `country` selects the tag used on national summaries
    pub fn new(tags: RegionTags, country: impl Into<String>) -> Self {
        Self {
            tags,
            country: country.into(),
        }
    }

    fn heading(&self, name: &str, tail: &str) -> String {
        match self.tags.tag(name) {
            "" => tail.to_string(),
            tag => format!("{} {}", tag, tail),
        }
    }

    /// National figures for the record's date
    pub fn national_summary(&self, record: &DailyRecord) -> String {
        let mut text = self.heading(&self.country, &format!("Data as of {}", record.date));
        let _ = write!(
            text,
            "\nNew Cases: {}\nImport Cases: {}\nRecovered Cases: {}\nNew Deaths: {}\nNew Brought in Dead (BID): {}\nActual COVID Deaths: {}",
            record.cases.new_cases,
            record.cases.import_cases,
            record.cases.recovered_cases,
            record.death.new_deaths,
            record.death.bid_deaths,
            record.death.actual_deaths,
        );
        text
    }

    /// Figures for one region, `None` when the record has no such region
    pub fn region_summary(&self, record: &DailyRecord, region: &str) -> Option<String> {
        let data = record.region(region)?;
        let mut text = self.heading(region, &format!("{} as of {}", region, record.date));
        let _ = write!(
            text,
            "\nNew Cases: {}\nImport Cases: {}\nRecovered Cases: {}\nNew Deaths: {}\nActual Deaths: {}",
            data.cases.new_cases,
            data.cases.import_cases,
            data.cases.recovered_cases,
            data.death.new_deaths,
            data.death.actual_deaths,
        );
        Some(text)
    }

    /// National summary, region summary, or [`NOT_UNDERSTOOD`]
    pub fn summarize(&self, record: &DailyRecord, region: Option<&str>) -> String {
        match region {
            None => self.national_summary(record),
            Some(name) => self
                .region_summary(record, name)
                .unwrap_or_else(|| NOT_UNDERSTOOD.to_string()),
        }
    }

    /// Messages posted after a sync: national first, then each region by name
    pub fn sync_messages(&self, record: &DailyRecord) -> Vec<String> {
        std::iter::once(self.national_summary(record))
            .chain(
                record
                    .regions
                    .keys()
                    .filter_map(|name| self.region_summary(record, name)),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegionRecord;

    fn formatter() -> Formatter {
        Formatter::new(RegionTags::new(default_region_tags()), "Malaysia")
    }

    fn record() -> DailyRecord {
        let mut rec = DailyRecord::new("2021-06-01");
        rec.cases.new_cases = 7105;
        rec.cases.import_cases = 4;
        rec.cases.recovered_cases = 6891;
        rec.death.new_deaths = 75;
        rec.death.bid_deaths = 6;
        rec.death.actual_deaths = 70;
        for (name, new_cases) in [("Selangor", 2321), ("Johor", 600), ("Atlantis", 1)] {
            let mut region = RegionRecord::default();
            region.cases.new_cases = new_cases;
            region.death.new_deaths = 3;
            rec.regions.insert(name.to_string(), region);
        }
        rec
    }

    #[test]
    fn test_national_summary() {
        let text = formatter().national_summary(&record());
        assert_eq!(
            text,
            ":malaysia: Data as of 2021-06-01\nNew Cases: 7105\nImport Cases: 4\nRecovered Cases: 6891\nNew Deaths: 75\nNew Brought in Dead (BID): 6\nActual COVID Deaths: 70"
        );
    }

    #[test]
    fn test_region_summary() {
        let text = formatter().region_summary(&record(), "Selangor").unwrap();
        assert!(text.starts_with(":selangor: Selangor as of 2021-06-01\n"));
        assert!(text.contains("New Cases: 2321"));
        assert!(text.contains("New Deaths: 3"));
        assert!(text.ends_with("Actual Deaths: 0"));
    }

    #[test]
    fn test_untagged_region_has_no_leading_tag() {
        let text = formatter().region_summary(&record(), "Atlantis").unwrap();
        assert!(text.starts_with("Atlantis as of 2021-06-01"));
    }

    #[test]
    fn test_unmatched_region_falls_back() {
        let f = formatter();
        assert_eq!(f.summarize(&record(), Some("Narnia")), NOT_UNDERSTOOD);
        // Region names are exact; case differences do not match
        assert_eq!(f.summarize(&record(), Some("selangor")), NOT_UNDERSTOOD);
    }

    #[test]
    fn test_summarize_without_region_is_national() {
        let f = formatter();
        let rec = record();
        assert_eq!(f.summarize(&rec, None), f.national_summary(&rec));
    }

    #[test]
    fn test_sync_messages_sorted_by_region_name() {
        let messages = formatter().sync_messages(&record());
        assert_eq!(messages.len(), 4);
        assert!(messages[0].contains("Data as of"));
        assert!(messages[1].starts_with("Atlantis"));
        assert!(messages[2].starts_with(":johor: Johor"));
        assert!(messages[3].starts_with(":selangor: Selangor"));
    }
}
