//! Header-addressed CSV tables
//!
//! Columns are resolved by header name once per load. A missing column fails
//! the whole load with [`Error::Schema`]; a reordered header is harmless.
//!
//! Integer cells go through [`parse_count`], which reports whether the cell
//! was valid. In [`ParseMode::Tolerant`] (the default) invalid cells become
//! zero without any trace; [`ParseMode::Strict`] surfaces them instead.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;

use super::Feed;
use crate::{Error, Result};

/// How invalid integer cells are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Invalid or missing cells count as zero
    #[default]
    Tolerant,
    /// The first invalid cell aborts the load
    Strict,
}

/// Result of a permissive integer parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCount {
    pub value: i64,
    pub valid: bool,
}

/// Parse a count cell, yielding zero (and `valid == false`) on failure
pub fn parse_count(cell: &str) -> ParsedCount {
    match cell.trim().parse::<i64>() {
        Ok(value) => ParsedCount { value, valid: true },
        Err(_) => ParsedCount {
            value: 0,
            valid: false,
        },
    }
}

/// Resolved column position
#[derive(Debug, Clone, Copy, Default)]
pub struct Column {
    index: usize,
    name: &'static str,
}

/// Fully buffered feed table
pub struct FeedTable {
    feed: Feed,
    header: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl FeedTable {
    /// Parse `text`; the first line is always the header
    pub fn parse(feed: Feed, text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let header = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();

        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { feed, header, rows })
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locate a required column by header name
    pub fn column(&self, name: &'static str) -> Result<Column> {
        self.header
            .get(name)
            .map(|&index| Column { index, name })
            .ok_or_else(|| Error::Schema {
                feed: self.feed,
                column: name.to_string(),
            })
    }

    /// Locate several required columns at once
    pub fn columns<const N: usize>(&self, names: [&'static str; N]) -> Result<[Column; N]> {
        let mut columns = [Column::default(); N];
        for (slot, name) in columns.iter_mut().zip(names) {
            *slot = self.column(name)?;
        }
        Ok(columns)
    }

    /// Iterate data rows in file order
    pub fn rows(&self, mode: ParseMode) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |record| Row {
            feed: self.feed,
            mode,
            record,
        })
    }
}

/// One data row of a [`FeedTable`]
pub struct Row<'a> {
    feed: Feed,
    mode: ParseMode,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// Non-empty text cell, used for keys (date, region name)
    pub fn key(&self, column: Column) -> Option<&'a str> {
        self.record
            .get(column.index)
            .filter(|cell| !cell.is_empty())
    }

    /// Integer cell; see [`ParseMode`] for invalid cells
    pub fn count(&self, column: Column) -> Result<i64> {
        let cell = self.record.get(column.index).unwrap_or("");
        let parsed = parse_count(cell);
        if !parsed.valid && self.mode == ParseMode::Strict {
            return Err(Error::InvalidCell {
                feed: self.feed,
                line: self.line(),
                column: column.name.to_string(),
                value: cell.to_string(),
            });
        }
        Ok(parsed.value)
    }

    /// Several integer cells at once, in column order
    pub fn counts<const N: usize>(&self, columns: &[Column; N]) -> Result<[i64; N]> {
        let mut values = [0i64; N];
        for (slot, column) in values.iter_mut().zip(columns) {
            *slot = self.count(*column)?;
        }
        Ok(values)
    }

    /// 1-based line number in the source text
    pub fn line(&self) -> u64 {
        self.record.position().map(|p| p.line()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_valid_and_invalid() {
        assert_eq!(parse_count("42"), ParsedCount { value: 42, valid: true });
        assert_eq!(parse_count(" -3 "), ParsedCount { value: -3, valid: true });
        assert_eq!(parse_count(""), ParsedCount { value: 0, valid: false });
        assert_eq!(parse_count("NA"), ParsedCount { value: 0, valid: false });
        assert_eq!(parse_count("1.5"), ParsedCount { value: 0, valid: false });
    }

    #[test]
    fn test_columns_resolved_by_name_not_position() {
        let table = FeedTable::parse(Feed::CountryTests, "pcr,date,rtk-ag\n7,2021-06-01,9\n").unwrap();
        let [date, rtk, pcr] = table.columns(["date", "rtk-ag", "pcr"]).unwrap();
        let row = table.rows(ParseMode::Tolerant).next().unwrap();
        assert_eq!(row.key(date), Some("2021-06-01"));
        assert_eq!(row.count(rtk).unwrap(), 9);
        assert_eq!(row.count(pcr).unwrap(), 7);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let table = FeedTable::parse(Feed::CountryTests, "date,rtk-ag\n2021-06-01,1\n").unwrap();
        match table.column("pcr") {
            Err(Error::Schema { feed, column }) => {
                assert_eq!(feed, Feed::CountryTests);
                assert_eq!(column, "pcr");
            }
            other => panic!("expected schema error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_short_row_reads_zero_in_tolerant_mode() {
        let table = FeedTable::parse(Feed::CountryTests, "date,rtk-ag,pcr\n2021-06-01,5\n").unwrap();
        let [rtk, pcr] = table.columns(["rtk-ag", "pcr"]).unwrap();
        let row = table.rows(ParseMode::Tolerant).next().unwrap();
        assert_eq!(row.counts(&[rtk, pcr]).unwrap(), [5, 0]);
    }

    #[test]
    fn test_strict_mode_reports_cell() {
        let table = FeedTable::parse(Feed::CountryTests, "date,rtk-ag,pcr\n2021-06-01,x,1\n").unwrap();
        let rtk = table.column("rtk-ag").unwrap();
        let row = table.rows(ParseMode::Strict).next().unwrap();
        match row.count(rtk) {
            Err(Error::InvalidCell { line, column, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "rtk-ag");
                assert_eq!(value, "x");
            }
            other => panic!("expected invalid cell, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let table = FeedTable::parse(Feed::CountryCases, "date,cases_new\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
