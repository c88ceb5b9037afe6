use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const BAR_FILL: char = '#';
const BAR_EMPTY: char = '-';

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| {
            let gap = " ".repeat(label_width - display_width(label));
            format!("{padding}{label}{gap}  {value}")
        })
        .collect()
}

/// Rows only, no header line; columns sized to their widest cell.
pub fn render_rows(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = natural_column_widths(columns.len(), rows);
    rows.iter()
        .map(|row| format_row(columns, row, &widths))
        .collect()
}

/// Header line followed by the rows.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut all_rows = Vec::with_capacity(rows.len() + 1);
    all_rows.push(header);
    all_rows.extend(rows.iter().cloned());
    render_rows(columns, &all_rows)
}

/// Fixed-width text bar, `percent` clamped to 0..=100.
pub fn bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = cmp::min(filled, width);
    let mut output = String::with_capacity(width);
    output.extend(std::iter::repeat_n(BAR_FILL, filled));
    output.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    output
}

fn natural_column_widths(column_count: usize, rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = vec![0; column_count];
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, display_width(value));
            }
        }
    }
    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = widths.get(index).copied().unwrap_or(0);
        let value = cells.get(index).map(String::as_str).unwrap_or("");
        let gap = " ".repeat(width.saturating_sub(display_width(value)));

        let piece = match column.align {
            Align::Left => format!("{value}{gap}"),
            Align::Right => format!("{gap}{value}"),
        };
        pieces.push(piece);
    }

    let line = format!(
        "{}{}",
        " ".repeat(INDENT),
        pieces.join(&" ".repeat(COLUMN_GAP))
    );
    line.trim_end().to_string()
}

// Currency symbols such as `₹` are multi-byte; pad by characters.
fn display_width(value: &str) -> usize {
    value.chars().count()
}
