use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CurrencyFormat, DigitGrouping};
use crate::ledger::types::TransactionKind;

/// Symbol prefix, grouped whole part, exactly two decimals. Negative values
/// put the minus sign ahead of the symbol: `-$1,204.50`.
pub fn format_currency(amount: Decimal, format: &CurrencyFormat) -> String {
    let (negative, digits) = two_decimal_digits(amount, format.grouping);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{digits}", format.symbol)
}

/// List-row amount: `+` for income, `-` for spend.
pub fn format_signed(amount: Decimal, kind: TransactionKind, format: &CurrencyFormat) -> String {
    let (_, digits) = two_decimal_digits(amount, format.grouping);
    let sign = match kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    format!("{sign}{}{digits}", format.symbol)
}

pub fn group_digits(whole: &str, grouping: DigitGrouping) -> String {
    let chars = whole.chars().collect::<Vec<char>>();
    if chars.len() <= 3 {
        return whole.to_string();
    }

    let (head, tail) = chars.split_at(chars.len() - 3);
    let head_groups = match grouping {
        DigitGrouping::Western => chunk_from_right(head, 3),
        DigitGrouping::Indian => chunk_from_right(head, 2),
    };

    let mut output = head_groups.join(",");
    output.push(',');
    output.extend(tail.iter());
    output
}

fn two_decimal_digits(amount: Decimal, grouping: DigitGrouping) -> (bool, String) {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let negative = rounded < Decimal::ZERO;
    let plain = rounded.abs().to_string();
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    (negative, format!("{}.{fraction}", group_digits(whole, grouping)))
}

fn chunk_from_right(digits: &[char], size: usize) -> Vec<String> {
    let mut groups = digits
        .rchunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>();
    groups.reverse();
    groups
}
