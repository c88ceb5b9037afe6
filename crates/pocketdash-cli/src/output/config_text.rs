use std::io;

use serde_json::Value;

use super::format::{Align, Column, key_value_rows, render_table};

pub fn render_config(data: &Value) -> io::Result<String> {
    let config = data
        .get("config")
        .ok_or_else(|| io::Error::other("config output requires config"))?;

    let origin = data.get("origin").and_then(Value::as_str).unwrap_or("built_in");
    let loaded_from = match data.get("path").and_then(Value::as_str) {
        Some(path) => format!("{path} ({origin})"),
        None => "built-in defaults".to_string(),
    };

    let currency = config.get("currency").unwrap_or(&Value::Null);
    let chart = config.get("chart").unwrap_or(&Value::Null);
    let income = config
        .get("income_categories")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
                .join(", ")
        })
        .unwrap_or_default();

    let mut lines = vec!["Effective configuration".to_string(), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Loaded from", loaded_from),
            ("Source URL", scalar(config.get("source_url"), "(none)")),
            ("Currency", scalar(currency.get("symbol"), "")),
            ("Digit grouping", scalar(currency.get("grouping"), "")),
            ("Monthly limit", scalar(config.get("monthly_limit"), "")),
            ("Income categories", income),
            ("Row policy", scalar(config.get("row_policy"), "")),
            ("Group order", scalar(config.get("group_order"), "")),
            ("Date labels", scalar(config.get("date_labels"), "")),
            ("Legend size", scalar(config.get("legend_size"), "")),
            ("Donut radius", scalar(chart.get("donut_radius"), "")),
            ("Ring radius", scalar(chart.get("ring_radius"), "")),
            ("Default color", scalar(config.get("default_color"), "")),
        ],
        2,
    ));

    let colors = config
        .get("category_colors")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !colors.is_empty() {
        lines.push(String::new());
        lines.push("Category colors".to_string());
        let rows = colors
            .iter()
            .map(|entry| {
                vec![
                    scalar(entry.get("category"), ""),
                    scalar(entry.get("color"), ""),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(render_table(
            &[
                Column {
                    name: "Category",
                    align: Align::Left,
                },
                Column {
                    name: "Color",
                    align: Align::Left,
                },
            ],
            &rows,
        ));
    }

    let groups = config
        .get("keyword_groups")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !groups.is_empty() {
        lines.push(String::new());
        lines.push("Keyword groups".to_string());
        for group in &groups {
            let keywords = group
                .get("keywords")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<&str>>()
                        .join(", ")
                })
                .unwrap_or_default();
            lines.push(format!("  {}  {keywords}", scalar(group.get("color"), "")));
        }
    }

    Ok(lines.join("\n"))
}

fn scalar(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => fallback.to_string(),
    }
}
