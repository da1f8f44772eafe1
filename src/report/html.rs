//! HTML rendering of an assembled report.
//!
//! Fills the template slots with escaped header values, the flamegraph link
//! list and one section per table. Empty tables become an explicit
//! "no data" block instead of disappearing.

use super::chart::{format_value, render_bar_chart, ChartConfig};
use super::model::{ChartTable, FlamegraphLink, RenderableDocument};
use super::template::ReportTemplate;
use log::debug;

/// Render the full HTML document
///
/// **Public** - main entry point for rendering
pub fn render_document(
    template: &ReportTemplate,
    document: &RenderableDocument,
    chart_config: &ChartConfig,
) -> String {
    let links = render_flamegraph_links(&document.flamegraph_links);
    let sections: String = document
        .tables
        .iter()
        .map(|table| render_section(table, chart_config))
        .collect::<Vec<_>>()
        .join("\n");

    let project_name = escape_html(&document.project_name);
    let version = escape_html(&document.version);
    let timestamp = escape_html(&document.timestamp);

    let html = template.render(&[
        ("project_name", project_name.as_str()),
        ("version", version.as_str()),
        ("timestamp", timestamp.as_str()),
        ("flamegraph_links", links.as_str()),
        ("sections", sections.as_str()),
    ]);

    debug!("Rendered report HTML ({} bytes)", html.len());
    html
}

fn render_flamegraph_links(links: &[FlamegraphLink]) -> String {
    if links.is_empty() {
        return r#"<p class="no-data">No flamegraphs available</p>"#.to_string();
    }

    let mut html = String::from(r#"<ul class="flamegraphs">"#);
    for link in links {
        let label = if link.label.is_empty() {
            link.href.as_str()
        } else {
            link.label.as_str()
        };
        html.push_str(&format!(
            r#"<li><a href="{}" target="_blank">Open {} flamegraph (SVG)</a></li>"#,
            escape_html(&link.href),
            escape_html(label)
        ));
    }
    html.push_str("</ul>");
    html
}

fn render_section(table: &ChartTable, chart_config: &ChartConfig) -> String {
    let mut html = format!(
        r#"<section id="{}"><h2>{}</h2>"#,
        escape_html(&table.key),
        escape_html(&table.title)
    );

    if table.is_empty() {
        html.push_str(&format!(
            r#"<p class="no-data">No data available for {}</p>"#,
            escape_html(&table.title)
        ));
    } else {
        html.push_str(r#"<div class="chart-container">"#);
        html.push_str(&render_bar_chart(table, chart_config));
        html.push_str("</div>");
        html.push_str(&render_data_table(table));
    }

    html.push_str("</section>");
    html
}

/// Exact values under a collapsible block
fn render_data_table(table: &ChartTable) -> String {
    let mut html = format!(
        r#"<details><summary>Data</summary><table class="data"><thead><tr><th>{}</th><th>{}</th></tr></thead><tbody>"#,
        escape_html(&table.x_label),
        escape_html(&table.y_label)
    );
    for row in &table.rows {
        html.push_str(&format!(
            r#"<tr><td>{}</td><td class="num">{}</td></tr>"#,
            escape_html(&row.label),
            format_value(row.value)
        ));
    }
    html.push_str("</tbody></table></details>");
    html
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::ChartRow;

    fn document(tables: Vec<ChartTable>) -> RenderableDocument {
        RenderableDocument {
            project_name: "Chrono<Cache>".to_string(),
            version: "v1.0".to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            flamegraph_links: vec![FlamegraphLink {
                label: "cpu".to_string(),
                href: "../../gen/flamegraph-cpu.svg".to_string(),
            }],
            tables,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_empty_table_renders_no_data() {
        let doc = document(vec![ChartTable::new("benchmarks", "Google Benchmark Results", "Benchmark", "CPU Time (ns)", vec![])]);
        let html = render_document(&ReportTemplate::builtin(), &doc, &ChartConfig::new());

        assert!(html.contains(r#"<section id="benchmarks">"#));
        assert!(html.contains("No data available for Google Benchmark Results"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_header_and_links() {
        let doc = document(vec![ChartTable::new(
            "top_functions",
            "Top Hot Functions",
            "Function",
            "Samples",
            vec![ChartRow {
                label: "main".to_string(),
                value: 8.0,
            }],
        )]);
        let html = render_document(&ReportTemplate::builtin(), &doc, &ChartConfig::new());

        assert!(html.contains("Chrono&lt;Cache&gt;"));
        assert!(!html.contains("Chrono<Cache>"));
        assert!(html.contains(r#"href="../../gen/flamegraph-cpu.svg""#));
        assert!(html.contains("Open cpu flamegraph (SVG)"));
        assert!(html.contains(r#"<td class="num">8</td>"#));
        assert!(!html.contains("{{"));
    }
}
