//! Inline SVG bar charts for report tables.
//!
//! Horizontal bars, one per row, scaled to the largest value. Labels can be
//! long (C++ symbols, benchmark names) so they get their own column and are
//! truncated to fit.

use super::html::escape_html;
use super::model::ChartTable;
use log::debug;

/// Chart layout configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: usize,
    pub row_height: usize,
    pub label_width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            row_height: 22,
            label_width: 320,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

const TITLE_HEIGHT: usize = 30;
const AXIS_HEIGHT: usize = 24;
const VALUE_MARGIN: usize = 110;
const CHAR_WIDTH: f64 = 7.0;

/// Alternating bar fills, one per row
const PALETTE: &[&str] = &[
    "rgb(70, 130, 180)",  // Steel Blue
    "rgb(100, 149, 237)", // Cornflower Blue
];

/// Render a table as an SVG bar chart
///
/// Callers handle empty tables; an empty table renders an empty frame.
pub fn render_bar_chart(table: &ChartTable, config: &ChartConfig) -> String {
    let rows = table.rows.len();
    let height = TITLE_HEIGHT + rows * config.row_height + AXIS_HEIGHT;
    let bar_area = config
        .width
        .saturating_sub(config.label_width + VALUE_MARGIN)
        .max(1) as f64;

    let max_value = table
        .rows
        .iter()
        .map(|r| r.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="bar-chart" width="{}" height="{}" viewBox="0 0 {} {}" role="img" aria-label="{}">"#,
        config.width,
        height,
        config.width,
        height,
        escape_html(&table.title)
    ));

    svg.push_str(
        r#"<style>.bar-chart text { font: 12px sans-serif; } .bar-chart rect.bar:hover { opacity: 0.8; }</style>"#,
    );

    svg.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        escape_html(&table.title)
    ));

    for (i, row) in table.rows.iter().enumerate() {
        let y = TITLE_HEIGHT + i * config.row_height;
        let bar_width = if max_value > 0.0 && row.value.is_finite() {
            (row.value.max(0.0) / max_value) * bar_area
        } else {
            0.0
        };
        let color = PALETTE[i % PALETTE.len()];

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="end">{}</text>"#,
            config.label_width.saturating_sub(8),
            y + config.row_height - 7,
            escape_html(&truncate_label(&row.label, config.label_width))
        ));

        svg.push_str(&format!(
            r#"<rect class="bar" x="{}" y="{}" width="{:.2}" height="{}" fill="{}"><title>{}: {}</title></rect>"#,
            config.label_width,
            y + 2,
            bar_width,
            config.row_height - 4,
            color,
            escape_html(&row.label),
            format_value(row.value)
        ));

        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{}" dx="4">{}</text>"#,
            config.label_width as f64 + bar_width,
            y + config.row_height - 7,
            format_value(row.value)
        ));
    }

    // Axis caption
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle" fill="rgb(127, 140, 141)">{} by {}</text>"#,
        config.label_width as f64 + bar_area / 2.0,
        height - 6,
        escape_html(&table.y_label),
        escape_html(&table.x_label)
    ));

    svg.push_str("</svg>");

    debug!("Rendered chart '{}' ({} bytes)", table.title, svg.len());
    svg
}

/// Shorten a label to the pixel budget, on char boundaries
fn truncate_label(label: &str, label_width: usize) -> String {
    let max_chars = (label_width as f64 / CHAR_WIDTH) as usize;
    if label.chars().count() <= max_chars || max_chars <= 3 {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

/// Integers with thousands separators, fractions with two decimals
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    if value.fract() != 0.0 {
        return format!("{:.2}", value);
    }

    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
