use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::ledger::date::parse_timestamp;
use crate::ledger::types::{Transaction, UNNAMED_TRANSACTION};
use crate::source::parse::RawRecord;

const AMOUNT_PREFIXES: [char; 5] = ['+', '$', '₹', '€', '£'];

#[derive(Debug, Clone, Default)]
pub struct NormalizedRows {
    pub transactions: Vec<Transaction>,
    pub invalid_amount: usize,
}

/// Turns header-keyed records into transactions. Rows whose amount is not a
/// positive decimal are left out and counted.
pub fn normalize_records(records: &[RawRecord]) -> NormalizedRows {
    let mut output = NormalizedRows::default();

    for (index, record) in records.iter().enumerate() {
        let raw_amount = field(record, "Amount").unwrap_or_default();
        let Some(amount) = parse_positive_amount(raw_amount) else {
            debug!(row = index + 1, amount = raw_amount, "excluding row with invalid amount");
            output.invalid_amount += 1;
            continue;
        };

        let timestamp = field(record, "Timestamp").unwrap_or_default().to_string();
        output.transactions.push(Transaction {
            occurred_at: parse_timestamp(&timestamp),
            timestamp,
            name: field(record, "Name")
                .unwrap_or(UNNAMED_TRANSACTION)
                .to_string(),
            amount,
            category: field(record, "Category").map(str::to_string),
        });
    }

    output
}

pub fn parse_positive_amount(value: &str) -> Option<Decimal> {
    let cleaned = value
        .trim()
        .trim_start_matches(|character: char| {
            AMOUNT_PREFIXES.contains(&character) || character.is_whitespace()
        });
    if cleaned.is_empty() {
        return None;
    }

    let amount = Decimal::from_str(cleaned).ok()?;
    if amount <= Decimal::ZERO {
        return None;
    }
    Some(amount)
}

fn field<'a>(record: &'a RawRecord, name: &str) -> Option<&'a str> {
    record
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
