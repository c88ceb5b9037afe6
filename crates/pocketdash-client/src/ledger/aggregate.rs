use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::ledger::date::same_month;
use crate::ledger::types::{
    Aggregate, CategoryAggregate, MonthlySummary, RowExclusions, Transaction, TransactionKind,
};

pub fn classify(transaction: &Transaction, config: &DashboardConfig) -> TransactionKind {
    match transaction.category.as_deref() {
        Some(category) if config.is_income_category(category) => TransactionKind::Income,
        _ => TransactionKind::Expense,
    }
}

/// Totals the transactions dated in `now`'s calendar month.
///
/// Undated rows are left out of every total; so are rows from other months
/// and rows whose amount would push a running total past `Decimal::MAX`.
pub fn aggregate(
    transactions: &[Transaction],
    config: &DashboardConfig,
    now: NaiveDateTime,
) -> Aggregate {
    let mut exclusions = RowExclusions::default();
    let mut summary = MonthlySummary {
        total_income: Decimal::ZERO,
        total_expense: Decimal::ZERO,
        remaining: Decimal::ZERO,
    };
    let mut buckets: Vec<CategoryAggregate> = Vec::new();

    for transaction in transactions {
        let Some(occurred_at) = transaction.occurred_at else {
            exclusions.invalid_date += 1;
            continue;
        };
        if !same_month(occurred_at.at, now) {
            exclusions.out_of_period += 1;
            continue;
        }

        let amount = transaction.amount;
        match classify(transaction, config) {
            TransactionKind::Income => {
                let next = summary
                    .total_income
                    .checked_add(amount)
                    .zip(summary.remaining.checked_add(amount));
                let Some((income, remaining)) = next else {
                    skip_overflow(transaction, &mut exclusions);
                    continue;
                };
                summary.total_income = income;
                summary.remaining = remaining;
            }
            TransactionKind::Expense => {
                let name = transaction.bucket_name();
                let position = buckets.iter().position(|bucket| bucket.category == name);
                let bucket_total = position
                    .map(|index| buckets[index].total)
                    .unwrap_or(Decimal::ZERO);
                let next = bucket_total
                    .checked_add(amount)
                    .zip(summary.total_expense.checked_add(amount))
                    .zip(summary.remaining.checked_sub(amount));
                let Some(((bucket_total, expense), remaining)) = next else {
                    skip_overflow(transaction, &mut exclusions);
                    continue;
                };

                summary.total_expense = expense;
                summary.remaining = remaining;
                match position {
                    Some(index) => buckets[index].total = bucket_total,
                    None => buckets.push(CategoryAggregate {
                        category: name.to_string(),
                        total: bucket_total,
                    }),
                }
            }
        }
    }

    // Vec::sort_by is stable, so equal totals keep first-seen order.
    buckets.sort_by(|left, right| right.total.cmp(&left.total));

    Aggregate {
        summary,
        buckets,
        exclusions,
    }
}

fn skip_overflow(transaction: &Transaction, exclusions: &mut RowExclusions) {
    debug!(
        name = %transaction.name,
        amount = %transaction.amount,
        "dropping row whose amount overflows the month totals"
    );
    exclusions.amount_overflow += 1;
}
