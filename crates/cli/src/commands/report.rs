use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use authority_register::config::DATE_FORMAT;
use authority_register::IdentifierRecord;
use authority_register_persistence::{ClassSection, RegisterSnapshot, RegisterStore};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use crate::dispatch::ReportFormat;

const HTML_HEAD: &str = "<html><head>\
<title>Authority Register</title>\
<style>\
body {padding-right: 0px; padding-left: 0px; font-size: 80%;\
background: #fff; margin: 6px 12px; color: #000; padding-top: 0px;\
font-family: verdana, arial, sans-serif; text-align: left}\
h1 {font-weight: 600; margin: 10px 0px 5px; color: #000080;\
margin-top: 0px; font-size: 1.6em}\
h2 {font-weight: 600; margin: 10px 0px 5px; color: #000080;\
margin-top: 10px; font-size: 1.3em}\
th {text-align: left}\
</style></head>\
<body><h1>Authority Register</h1>";

const COLUMNS: [&str; 3] = ["Number", "Version", "Date registered"];

/// Shown for a stored cell that is NULL or unreadable.
const EMPTY_CELL: &str = "Empty";

/// Reads the whole register and renders it in `format`. HTML goes to
/// `report_path`; the other formats are written to `out`.
pub fn run<W: Write>(
    store: &RegisterStore,
    format: ReportFormat,
    report_path: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let snapshot = store.snapshot().context("Failed to read register")?;

    match format {
        ReportFormat::Html => {
            std::fs::write(report_path, render_html(&snapshot))
                .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
            tracing::info!("Report with {} records written to {:?}", snapshot.total(), report_path);
        }
        ReportFormat::Table => {
            out.write_all(render_table(&snapshot).as_bytes())?;
        }
        ReportFormat::Json => {
            let json = render_json(&snapshot, store.today())?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

pub fn render_html(snapshot: &RegisterSnapshot) -> String {
    let mut html = String::from(HTML_HEAD);
    for section in &snapshot.sections {
        let _ = write!(
            html,
            "<h2>{}</h2><table width='400'><tr><th>{}</th><th>{}</th><th>{}</th></tr>",
            section.title, COLUMNS[0], COLUMNS[1], COLUMNS[2]
        );
        for record in &section.records {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                record.id,
                version_cell(record),
                date_cell(record)
            );
        }
        html.push_str("</table>");
    }
    html.push_str("</body></html>");
    html
}

pub fn render_table(snapshot: &RegisterSnapshot) -> String {
    let mut text = String::from("\nAuthority Register\n");
    for section in &snapshot.sections {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(COLUMNS.to_vec());

        for record in &section.records {
            table.add_row(vec![
                record.id.to_string(),
                version_cell(record),
                date_cell(record),
            ]);
        }

        let _ = writeln!(text, "\n{} ({})", section.title, summary(section));
        let _ = writeln!(text, "{table}");
    }
    text
}

fn version_cell(record: &IdentifierRecord) -> String {
    record
        .version
        .map_or_else(|| EMPTY_CELL.to_string(), |v| v.to_string())
}

fn date_cell(record: &IdentifierRecord) -> String {
    record
        .registered
        .map_or_else(|| EMPTY_CELL.to_string(), |d| d.format(DATE_FORMAT).to_string())
}

fn summary(section: &ClassSection) -> String {
    match section.records.first() {
        Some(latest) => format!("{} registered, latest {}{}", section.records.len(), section.class, latest.id),
        None => "none registered".to_string(),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: NaiveDate,
    total: usize,
    sections: &'a [ClassSection],
}

pub fn render_json(snapshot: &RegisterSnapshot, generated: NaiveDate) -> anyhow::Result<String> {
    let report = JsonReport {
        generated,
        total: snapshot.total(),
        sections: &snapshot.sections,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
