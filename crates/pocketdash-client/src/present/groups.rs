use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{DashboardConfig, GroupOrder};
use crate::contracts::types::{TransactionGroup, TransactionRow};
use crate::ledger::aggregate::classify;
use crate::ledger::colors::ColorResolver;
use crate::ledger::date::{OTHER_LABEL, TODAY_LABEL, YESTERDAY_LABEL, format_time, group_label};
use crate::ledger::types::Transaction;
use crate::present::currency::format_signed;

struct PendingGroup {
    label: String,
    date: Option<NaiveDate>,
    rows: Vec<TransactionRow>,
}

/// Buckets every transaction under a relative date label.
///
/// Today and Yesterday lead, undated rows trail under "Other", and the
/// calendar-date groups in between follow `order`. Rows keep input order
/// inside their group.
pub fn group_transactions(
    transactions: &[Transaction],
    config: &DashboardConfig,
    colors: &ColorResolver,
    now: NaiveDateTime,
) -> Vec<TransactionGroup> {
    let today = now.date();
    let mut pending: Vec<PendingGroup> = Vec::new();

    for transaction in transactions {
        let date = transaction.occurred_at.map(|parsed| parsed.at.date());
        let label = match date {
            Some(value) => group_label(value, today, config.date_labels),
            None => OTHER_LABEL.to_string(),
        };

        let row = transaction_row(transaction, config, colors);
        match pending.iter_mut().find(|group| group.label == label) {
            Some(group) => group.rows.push(row),
            None => pending.push(PendingGroup {
                label,
                date,
                rows: vec![row],
            }),
        }
    }

    order_groups(&mut pending, config.group_order);

    pending
        .into_iter()
        .map(|group| TransactionGroup {
            label: group.label,
            transactions: group.rows,
        })
        .collect()
}

fn order_groups(groups: &mut [PendingGroup], order: GroupOrder) {
    groups.sort_by(|left, right| {
        let by_rank = rank(left).cmp(&rank(right));
        match order {
            GroupOrder::FirstSeen => by_rank,
            GroupOrder::NewestFirst => by_rank.then_with(|| right.date.cmp(&left.date)),
        }
    });
}

fn rank(group: &PendingGroup) -> u8 {
    match group.label.as_str() {
        TODAY_LABEL => 0,
        YESTERDAY_LABEL => 1,
        OTHER_LABEL => 3,
        _ => 2,
    }
}

fn transaction_row(
    transaction: &Transaction,
    config: &DashboardConfig,
    colors: &ColorResolver,
) -> TransactionRow {
    let kind = classify(transaction, config);
    TransactionRow {
        name: transaction.name.clone(),
        category: transaction.bucket_name().to_string(),
        time: transaction
            .occurred_at
            .as_ref()
            .map(format_time)
            .unwrap_or_default(),
        amount: format_signed(transaction.amount, kind, &config.currency),
        kind,
        color: colors.color_of(transaction.category.as_deref()).to_string(),
    }
}
