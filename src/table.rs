//! Plain-text table rendering for command output.
//!
//! Columns whose non-empty cells are all numeric are right-aligned so that
//! salary figures line up; everything else is left-aligned.

use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }
    let alignments = (0..column_count)
        .map(|idx| column_alignment(rows, idx))
        .collect::<Vec<_>>();

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths, &alignments));
    let separator = widths
        .iter()
        .map(|w| "-".repeat((*w).max(1)))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths, &alignments));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths, &alignments));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// Prints a titled section followed by its table.
pub fn print_section(title: &str, headers: &[String], rows: &[Vec<String>]) {
    println!("{title}");
    print_table(headers, rows);
    println!();
}

fn column_alignment(rows: &[Vec<String>], idx: usize) -> Alignment {
    let mut any = false;
    for cell in rows.iter().filter_map(|row| row.get(idx)) {
        let trimmed = cell.trim().trim_end_matches('%');
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.parse::<f64>().is_err() {
            return Alignment::Left;
        }
        any = true;
    }
    if any { Alignment::Right } else { Alignment::Left }
}

fn format_row(values: &[String], widths: &[usize], alignments: &[Alignment]) -> String {
    let cells = values
        .iter()
        .zip(widths.iter().zip(alignments))
        .map(|(value, (width, alignment))| {
            let sanitized = sanitize_cell(value);
            let padding = " ".repeat(width.saturating_sub(display_width(&sanitized)));
            match alignment {
                Alignment::Left => format!("{sanitized}{padding}"),
                Alignment::Right => format!("{padding}{sanitized}"),
            }
        })
        .collect::<Vec<_>>();
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

/// Keeps at most `max` characters, marking the cut with `...`.
pub fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept = value.chars().take(max.saturating_sub(3)).collect::<String>();
    format!("{}...", kept.trim_end())
}

/// Writes a value so that parsing it back yields the same `f64`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        String::new()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Rounds to whole currency units, as salaries are reported.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() {
        format!("{:.0}", value.round())
    } else {
        String::new()
    }
}

pub fn format_optional_amount(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_default()
}

pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        String::new()
    }
}
