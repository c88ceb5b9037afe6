use std::io;

use serde_json::Value;

use super::format::{Align, Column, bar, key_value_rows, render_rows};

const BAR_WIDTH: usize = 20;

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let period = data
        .get("period_label")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("dashboard output requires period_label"))?;

    let mut lines = vec![format!("Spending for {period}")];
    if let Some(source) = data.get("source").and_then(Value::as_str) {
        lines.push(format!("  Source: {source}"));
    }
    lines.push(String::new());

    lines.extend(summary_lines(data.get("summary").unwrap_or(&Value::Null)));
    lines.push(String::new());

    lines.push("By category".to_string());
    lines.extend(legend_lines(data.get("legend").unwrap_or(&Value::Null)));
    lines.push(String::new());

    lines.push("Monthly limit".to_string());
    lines.push(ring_line(data.get("ring").unwrap_or(&Value::Null)));
    lines.push(String::new());

    lines.push("Transactions".to_string());
    lines.extend(group_lines(data.get("groups").unwrap_or(&Value::Null)));

    if let Some(note) = exclusion_note(data.get("exclusions").unwrap_or(&Value::Null)) {
        lines.push(String::new());
        lines.push(note);
    }

    Ok(lines.join("\n"))
}

/// One-line digest used by `watch` between refreshes.
pub fn render_summary_line(data: &Value) -> String {
    let summary = data.get("summary").unwrap_or(&Value::Null);
    format!(
        "{}  income {}  spent {}  remaining {}",
        text(data, "period_label"),
        text(summary, "income"),
        text(summary, "expense"),
        remaining_text(summary),
    )
}

fn summary_lines(summary: &Value) -> Vec<String> {
    key_value_rows(
        &[
            ("Income", text(summary, "income")),
            ("Spent", text(summary, "expense")),
            ("Remaining", remaining_text(summary)),
        ],
        2,
    )
}

fn remaining_text(summary: &Value) -> String {
    let remaining = text(summary, "remaining");
    if summary.get("remaining_tone").and_then(Value::as_str) == Some("alert") {
        format!("{remaining}  (over budget)")
    } else {
        remaining
    }
}

fn legend_lines(legend: &Value) -> Vec<String> {
    let entries = legend.as_array().cloned().unwrap_or_default();
    if entries.is_empty() {
        return vec!["  No spending recorded this month.".to_string()];
    }

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Share",
            align: Align::Right,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Bar",
            align: Align::Left,
        },
    ];
    let rows = entries
        .iter()
        .map(|entry| {
            let percentage = entry.get("percentage").and_then(Value::as_u64).unwrap_or(0);
            vec![
                text(entry, "category"),
                format!("{percentage}%"),
                text(entry, "amount"),
                bar(percentage as f64, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    render_rows(&columns, &rows)
}

fn ring_line(ring: &Value) -> String {
    let percentage = ring.get("percentage").and_then(Value::as_f64).unwrap_or(0.0);
    format!(
        "  [{}]  {:.0}% of {}",
        bar(percentage, BAR_WIDTH),
        percentage,
        text(ring, "limit_label")
    )
}

fn group_lines(groups: &Value) -> Vec<String> {
    let groups = groups.as_array().cloned().unwrap_or_default();
    if groups.is_empty() {
        return vec!["  No transactions.".to_string()];
    }

    let columns = [
        Column {
            name: "Time",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];

    let mut lines = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(format!("  {}", text(group, "label")));

        let rows = group
            .get("transactions")
            .and_then(Value::as_array)
            .map(|transactions| {
                transactions
                    .iter()
                    .map(|row| {
                        vec![
                            text(row, "time"),
                            text(row, "name"),
                            text(row, "category"),
                            text(row, "amount"),
                        ]
                    })
                    .collect::<Vec<Vec<String>>>()
            })
            .unwrap_or_default();
        lines.extend(
            render_rows(&columns, &rows)
                .into_iter()
                .map(|line| format!("  {line}")),
        );
    }
    lines
}

fn exclusion_note(exclusions: &Value) -> Option<String> {
    let labels = [
        ("dropped_rows", "malformed"),
        ("invalid_amount", "bad amount"),
        ("invalid_date", "undated"),
        ("out_of_period", "outside this month"),
        ("amount_overflow", "too large to total"),
    ];
    let parts = labels
        .iter()
        .filter_map(|(key, label)| {
            let count = exclusions.get(*key).and_then(Value::as_u64).unwrap_or(0);
            (count > 0).then(|| format!("{count} {label}"))
        })
        .collect::<Vec<String>>();

    if parts.is_empty() {
        return None;
    }
    Some(format!("Rows left out of totals: {}", parts.join(", ")))
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
