use std::collections::HashMap;

use csv::StringRecord;
use tracing::debug;

use crate::config::RowPolicy;

pub const REQUIRED_COLUMNS: [&str; 4] = ["Timestamp", "Name", "Amount", "Category"];

/// One data line mapped positionally onto the header names.
pub type RawRecord = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<RawRecord>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Splits CSV text into header-keyed records.
///
/// Quoting is off: every comma is a separator and every line break ends a
/// row, so quoted commas and quoted line breaks are not supported. Cells are
/// trimmed and stripped of `"` characters.
pub fn parse_csv(text: &str, policy: RowPolicy) -> ParseReport {
    let mut rows = content_records(text);

    let headers = match rows.next() {
        Some(Ok(record)) => cells(&record),
        Some(Err(error)) => {
            debug!(%error, "CSV header row is unreadable");
            return ParseReport::default();
        }
        None => return ParseReport::default(),
    };

    let mut report = ParseReport::default();
    for (index, row) in rows.enumerate() {
        report.rows_read += 1;
        let cells = match row {
            Ok(record) => cells(&record),
            Err(error) => {
                debug!(row = index + 1, %error, "dropping unreadable row");
                report.rows_dropped += 1;
                continue;
            }
        };

        if policy == RowPolicy::ColumnCount && cells.len() != headers.len() {
            debug!(
                row = index + 1,
                expected = headers.len(),
                actual = cells.len(),
                "dropping row with mismatched column count"
            );
            report.rows_dropped += 1;
            continue;
        }

        let record = headers
            .iter()
            .zip(cells)
            .map(|(name, value)| (name.clone(), value))
            .collect::<RawRecord>();

        if policy == RowPolicy::RequiredFields && !has_required_fields(&record) {
            debug!(row = index + 1, "dropping row with missing required fields");
            report.rows_dropped += 1;
            continue;
        }

        report.records.push(record);
    }

    report
}

/// Counts lines that carry content, header included.
pub fn content_line_count(text: &str) -> usize {
    content_records(text).count()
}

fn content_records(text: &str) -> impl Iterator<Item = csv::Result<StringRecord>> + '_ {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes())
        .into_records()
        .filter(|row| match row {
            Ok(record) => !is_blank(record),
            Err(_) => true,
        })
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|cell| cell.trim().is_empty())
}

fn cells(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .map(|cell| cell.trim().replace('"', ""))
        .collect()
}

fn has_required_fields(record: &RawRecord) -> bool {
    REQUIRED_COLUMNS.iter().all(|column| {
        record
            .get(*column)
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::{content_line_count, parse_csv};
    use crate::config::RowPolicy;

    const SAMPLE: &str = "Timestamp,Name,Amount,Category\n\
2024-03-10,Coffee,120,Cafe\n\
2024-03-10,Salary,50000,Salary\n";

    #[test]
    fn maps_rows_onto_header_names() {
        let report = parse_csv(SAMPLE, RowPolicy::ColumnCount);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_dropped, 0);
        assert_eq!(
            report.records[0].get("Name").map(String::as_str),
            Some("Coffee")
        );
        assert_eq!(
            report.records[1].get("Amount").map(String::as_str),
            Some("50000")
        );
    }

    #[test]
    fn empty_or_header_only_input_yields_no_records() {
        assert!(parse_csv("", RowPolicy::RequiredFields).records.is_empty());
        assert!(
            parse_csv("Timestamp,Name,Amount,Category\n", RowPolicy::ColumnCount)
                .records
                .is_empty()
        );
        assert!(parse_csv("\n\n  \n", RowPolicy::ColumnCount).records.is_empty());
    }

    #[test]
    fn strips_quotes_whitespace_and_carriage_returns() {
        let text = "\"Timestamp\", \"Name\" ,Amount,Category\r\n\"2024-03-10\", \"Tea\" , 40 ,\"Cafe\"\r\n";
        let report = parse_csv(text, RowPolicy::ColumnCount);
        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.get("Name").map(String::as_str), Some("Tea"));
        assert_eq!(record.get("Amount").map(String::as_str), Some("40"));
        assert_eq!(record.get("Category").map(String::as_str), Some("Cafe"));
    }

    #[test]
    fn column_count_policy_drops_ragged_rows() {
        let text = "Timestamp,Name,Amount,Category\n\
2024-03-10,Coffee,120\n\
2024-03-10,Lunch,300,Food,extra\n\
2024-03-11,Bus,20,\n";
        let report = parse_csv(text, RowPolicy::ColumnCount);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_dropped, 2);
        assert_eq!(report.records.len(), 1);
        assert_eq!(
            report.records[0].get("Category").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn required_fields_policy_checks_the_four_columns() {
        let text = "Timestamp,Name,Amount,Category,Note\n\
2024-03-10,Coffee,120,Cafe\n\
2024-03-10,Lunch,300,,late\n\
,Dinner,500,Food,x\n\
2024-03-11,Bus,20,Transport,commute\n";
        let report = parse_csv(text, RowPolicy::RequiredFields);
        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_dropped, 2);
        let names = report
            .records
            .iter()
            .filter_map(|record| record.get("Name").cloned())
            .collect::<Vec<String>>();
        assert_eq!(names, vec!["Coffee".to_string(), "Bus".to_string()]);
    }

    #[test]
    fn quoted_commas_are_split_like_any_other_comma() {
        let text = "Timestamp,Name,Amount,Category\n2024-03-10,\"Rice, Dal\",120,Food\n";
        let report = parse_csv(text, RowPolicy::ColumnCount);
        assert!(report.records.is_empty());
        assert_eq!(report.rows_dropped, 1);
    }

    #[test]
    fn content_line_count_skips_blank_lines() {
        assert_eq!(content_line_count("a,b\n\n1,2\n  \n"), 2);
        assert_eq!(content_line_count(""), 0);
    }

    #[test]
    fn a_stray_quote_does_not_swallow_the_next_line() {
        let text = "Timestamp,Name,Amount,Category\n\
2024-03-10,\"Tea,40,Cafe\n\
2024-03-11,Bus,20,Transport\n";
        let report = parse_csv(text, RowPolicy::ColumnCount);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(
            report.records[0].get("Name").map(String::as_str),
            Some("Tea")
        );
        assert_eq!(
            report.records[1].get("Category").map(String::as_str),
            Some("Transport")
        );
    }
}
