//! Output formatting for the viewer.

use std::fmt::Write;

use crate::state::{ViewModel, LOADING_NOTICE};
use crate::view::{CellView, RowView, TableView};

/// Trait for turning a view model into output.
pub trait ReportFormatter {
    /// Format the view to a string.
    fn format(&self, view: &ViewModel) -> String;
}

impl ViewModel {
    /// Format using a specific formatter.
    #[must_use]
    pub fn format(&self, formatter: &dyn ReportFormatter) -> String {
        formatter.format(self)
    }
}

// -- text ------------------------------------------------------------------

/// Fixed-width terminal table, optionally ANSI-coloured.
pub struct TextFormatter {
    pub color: bool,
}

fn ansi_code(style: &str) -> Option<&'static str> {
    match style {
        "cell-green" => Some("32"),
        "cell-light-green" => Some("92"),
        "cell-yellow" => Some("33"),
        "cell-orange" => Some("38;5;208"),
        "cell-red" => Some("31"),
        _ => None,
    }
}

impl TextFormatter {
    fn paint(&self, text: &str, style: Option<&str>) -> String {
        match style.and_then(ansi_code) {
            Some(code) if self.color => format!("\x1b[{code}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }

    fn write_row(&self, out: &mut String, row: &RowView, widths: &[usize], dim: bool) {
        let name = pad_right(&row.label, widths[0]);
        let mut line = if dim && self.color {
            format!("\x1b[2m{name}\x1b[0m")
        } else {
            name
        };
        for (cell, &width) in row.cells.iter().zip(&widths[1..]) {
            line.push_str("  ");
            line.push_str(&self.paint(&pad_left(&cell.text, width), cell.style));
        }
        writeln!(out, "{}", line.trim_end()).unwrap();
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width.saturating_sub(len)))
}

fn column_widths(table: &TableView) -> Vec<usize> {
    let mut widths: Vec<usize> = TableView::headers()
        .iter()
        .map(|h| h.chars().count())
        .collect();
    for row in table.rows.iter().chain(table.summary.iter()) {
        widths[0] = widths[0].max(row.label.chars().count());
        for (i, cell) in row.cells.iter().enumerate() {
            widths[i + 1] = widths[i + 1].max(cell.text.chars().count());
        }
    }
    widths
}

impl ReportFormatter for TextFormatter {
    fn format(&self, view: &ViewModel) -> String {
        let mut out = String::new();
        let (picker, selected, direction, table) = match view {
            ViewModel::Loading => return format!("{LOADING_NOTICE}\n"),
            ViewModel::Error(notice) => return format!("{notice}\n"),
            ViewModel::Loaded {
                picker,
                selected,
                direction,
                table,
            } => (picker, *selected, direction, table),
        };

        let label = picker
            .get(selected)
            .map(|p| p.label.as_str())
            .unwrap_or_default();
        writeln!(out, "Report:  {label} [{}/{}]", selected + 1, picker.len()).unwrap();
        if let Some(ref period) = table.period {
            writeln!(out, "Report Period: {period}").unwrap();
        }
        if let Some(ref date) = table.last_updated {
            writeln!(out, "Last updated: {date}").unwrap();
        }
        writeln!(out, "Sort:    {}", direction.as_str()).unwrap();
        out.push('\n');

        let widths = column_widths(table);
        let headers = TableView::headers();
        let mut header = pad_right(headers[0], widths[0]);
        for (h, &width) in headers[1..].iter().zip(&widths[1..]) {
            header.push_str("  ");
            header.push_str(&pad_left(h, width));
        }
        writeln!(out, "{}", header.trim_end()).unwrap();
        let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        writeln!(out, "{}", "-".repeat(total_width)).unwrap();

        for row in &table.rows {
            self.write_row(&mut out, row, &widths, row.unknown);
        }
        writeln!(out, "{}", "-".repeat(total_width)).unwrap();
        for row in &table.summary {
            self.write_row(&mut out, row, &widths, false);
        }

        if table.rows.iter().any(|r| r.unknown) {
            out.push('\n');
            out.push_str("* Unknown snapper\n");
        }
        out
    }
}

// -- markdown --------------------------------------------------------------

/// Markdown formatter. Styled cells are emphasised by severity.
pub struct MarkdownFormatter;

fn md_escape(text: &str) -> String {
    text.replace('|', "\\|")
}

fn md_cell(cell: &CellView) -> String {
    let text = md_escape(&cell.text);
    match cell.style {
        Some("cell-red") | Some("cell-orange") => format!("**{text}** ⚠"),
        Some("cell-green") => format!("**{text}**"),
        _ => text,
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, view: &ViewModel) -> String {
        let mut md = String::new();
        let (picker, selected, table) = match view {
            ViewModel::Loading => return format!("_{LOADING_NOTICE}_\n"),
            ViewModel::Error(notice) => return format!("> **Error:** {notice}\n"),
            ViewModel::Loaded {
                picker,
                selected,
                table,
                ..
            } => (picker, *selected, table),
        };

        let title = picker
            .get(selected)
            .map(|p| p.label.as_str())
            .unwrap_or_default();
        writeln!(md, "### Snapper Metrics: {}\n", md_escape(title)).unwrap();
        if let Some(ref period) = table.period {
            writeln!(md, "📅 **Report Period:** {}\n", md_escape(period)).unwrap();
        }

        let headers = TableView::headers();
        writeln!(md, "| {} |", headers.join(" | ")).unwrap();
        let align: Vec<&str> = std::iter::once(":-----")
            .chain(std::iter::repeat("-----:").take(headers.len() - 1))
            .collect();
        writeln!(md, "|{}|", align.join("|")).unwrap();

        for row in &table.rows {
            let name = if row.unknown {
                format!("_{}_", md_escape(&row.label))
            } else {
                md_escape(&row.label)
            };
            let cells: Vec<String> = row.cells.iter().map(md_cell).collect();
            writeln!(md, "| {name} | {} |", cells.join(" | ")).unwrap();
        }
        for row in &table.summary {
            let cells: Vec<String> = row.cells.iter().map(|c| md_escape(&c.text)).collect();
            writeln!(md, "| **{}** | {} |", md_escape(&row.label), cells.join(" | ")).unwrap();
        }

        md.push('\n');
        if let Some(ref date) = table.last_updated {
            writeln!(md, "<sub>Last updated: {}</sub>", md_escape(date)).unwrap();
        }
        md
    }
}

// -- html ------------------------------------------------------------------

/// Self-contained HTML page with the same style classes as the web viewer.
pub struct HtmlFormatter;

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
table { border-collapse: collapse; width: 100%; }
th, td { padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; text-align: right; }
th:first-child, td:first-child { text-align: left; }
tfoot td { font-weight: bold; background: #f4f4f4; }
.date-range-header { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
.picker { margin-bottom: 1rem; }
.picker .active { font-weight: bold; }
.unknown-snapper { color: #888; font-style: italic; }
.unknown-badge { color: #c00; }
.cell-green { background: #2e7d32; color: #fff; }
.cell-light-green { background: #a5d6a7; }
.cell-yellow { background: #fff59d; }
.cell-orange { background: #ffcc80; }
.cell-red { background: #ef9a9a; }
.error { color: #b00020; }
"#;

fn html_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Snapper Metrics</title>
    <style>{CSS}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

fn html_row(out: &mut String, row: &RowView, name_html: &str, styled: bool) {
    let class = if row.unknown {
        " class=\"unknown-snapper\""
    } else {
        ""
    };
    write!(out, "<tr{class}><td>{name_html}</td>").unwrap();
    for cell in &row.cells {
        match cell.style {
            Some(style) if styled => {
                write!(out, "<td class=\"{style}\">{}</td>", html_escape(&cell.text)).unwrap()
            }
            _ => write!(out, "<td>{}</td>", html_escape(&cell.text)).unwrap(),
        }
    }
    out.push_str("</tr>\n");
}

impl ReportFormatter for HtmlFormatter {
    fn format(&self, view: &ViewModel) -> String {
        let (picker, selected, direction, table) = match view {
            ViewModel::Loading => {
                return html_page(&format!("<p class=\"loading\">{LOADING_NOTICE}</p>"))
            }
            ViewModel::Error(notice) => {
                return html_page(&format!("<p class=\"error\">{}</p>", html_escape(notice)))
            }
            ViewModel::Loaded {
                picker,
                selected,
                direction,
                table,
            } => (picker, *selected, direction, table),
        };

        let mut body = String::new();
        body.push_str("<h1>Snapper Metrics</h1>\n<ul class=\"picker\">\n");
        for entry in picker {
            let class = if entry.index == selected {
                " class=\"active\""
            } else {
                ""
            };
            writeln!(body, "<li{class}>{}</li>", html_escape(&entry.label)).unwrap();
        }
        body.push_str("</ul>\n");

        if let Some(ref date) = table.last_updated {
            writeln!(
                body,
                "<p id=\"lastUpdated\">Last updated: {}</p>",
                html_escape(date)
            )
            .unwrap();
        }
        if let Some(ref period) = table.period {
            writeln!(
                body,
                "<div id=\"dateRangeHeader\" class=\"date-range-header\"><span class=\"date-icon\">📅</span> <span class=\"date-label\">Report Period:</span> <span class=\"date-value\">{}</span></div>",
                html_escape(period)
            )
            .unwrap();
        }
        writeln!(body, "<p class=\"sort\">Sorted {}</p>", direction.as_str()).unwrap();

        body.push_str("<table>\n<thead><tr>");
        for header in TableView::headers() {
            write!(body, "<th>{}</th>", html_escape(header)).unwrap();
        }
        body.push_str("</tr></thead>\n<tbody>\n");
        for row in &table.rows {
            let name = if row.unknown {
                // The label already ends with the marker; badge it instead.
                let bare = row
                    .label
                    .strip_suffix(crate::view::UNKNOWN_MARKER)
                    .unwrap_or(&row.label);
                format!("{} <span class=\"unknown-badge\">*</span>", html_escape(bare))
            } else {
                html_escape(&row.label)
            };
            html_row(&mut body, row, &name, true);
        }
        body.push_str("</tbody>\n<tfoot>\n");
        for row in &table.summary {
            let name = format!("<strong>{}</strong>", html_escape(&row.label));
            html_row(&mut body, row, &name, false);
        }
        body.push_str("</tfoot>\n</table>\n");

        html_page(&body)
    }
}
