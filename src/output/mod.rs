//! Output formatting module for Canopy
//!
//! Provides table formatting and display utilities for CLI output.

use canopy_query::{ProjectRecord, QueryPage};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 40;

/// Maximum width for the region column before truncation
const MAX_REGION_WIDTH: usize = 18;

/// Maximum width for the institution column before truncation
const MAX_INSTITUTION_WIDTH: usize = 22;

/// Placeholder shown for absent values
const ABSENT: &str = "-";

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

/// Format a money amount with thousands separators, or the absent marker.
pub fn format_amount(amount: Option<f64>) -> String {
    let Some(amount) = amount else {
        return ABSENT.to_string();
    };

    let negative = amount < 0.0;
    let whole = amount.abs().round() as u128;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// One row of the listing table, pre-resolved to display strings
struct Row {
    id: String,
    status: String,
    region: String,
    institution: String,
    budget: String,
    title: String,
}

impl Row {
    fn from_record(record: &ProjectRecord) -> Self {
        Self {
            id: record.id().unwrap_or_else(|| ABSENT.to_string()),
            status: record
                .status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| ABSENT.to_string()),
            region: truncate(record.region().unwrap_or(ABSENT), MAX_REGION_WIDTH),
            institution: truncate(
                record.institution().unwrap_or(ABSENT),
                MAX_INSTITUTION_WIDTH,
            ),
            budget: format_amount(record.budget()),
            title: truncate(record.title().unwrap_or(ABSENT), MAX_TITLE_WIDTH),
        }
    }
}

/// Format a query result page: table, paging footer, or the empty state.
pub fn format_listing(page: &QueryPage) -> String {
    if page.items.is_empty() {
        return "No projects matched the current filters.".to_string();
    }

    let mut output = format_project_table(&page.items);
    output.push_str(&format!(
        "\npage {} / {} ({} matched)",
        page.page, page.total_pages, page.total_matches
    ));
    output
}

/// Format projects into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID   Status       Region      Institution  Budget       Title
/// ---  -----------  ----------  -----------  -----------  -----
/// 101  in_progress  Afghanistan Green Clima  $9,500,000   Afghanistan Climate...
/// ```
pub fn format_project_table(items: &[ProjectRecord]) -> String {
    let headers = ["ID", "Status", "Region", "Institution", "Budget", "Title"];
    let rows: Vec<Row> = items.iter().map(Row::from_record).collect();

    let id_width = column_width(headers[0], rows.iter().map(|r| r.id.len()));
    let status_width = column_width(headers[1], rows.iter().map(|r| r.status.len()));
    let region_width = column_width(headers[2], rows.iter().map(|r| r.region.chars().count()));
    let institution_width = column_width(
        headers[3],
        rows.iter().map(|r| r.institution.chars().count()),
    );
    let budget_width = column_width(headers[4], rows.iter().map(|r| r.budget.len()));
    let title_width = column_width(headers[5], rows.iter().map(|r| r.title.chars().count()));

    let mut output = String::new();

    output.push_str(&format!(
        "{:<id_w$}  {:<status_w$}  {:<region_w$}  {:<inst_w$}  {:>budget_w$}  {:<title_w$}\n",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        headers[5],
        id_w = id_width,
        status_w = status_width,
        region_w = region_width,
        inst_w = institution_width,
        budget_w = budget_width,
        title_w = title_width,
    ));

    output.push_str(&format!(
        "{:->id_w$}  {:->status_w$}  {:->region_w$}  {:->inst_w$}  {:->budget_w$}  {:->title_w$}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        id_w = id_width,
        status_w = status_width,
        region_w = region_width,
        inst_w = institution_width,
        budget_w = budget_width,
        title_w = title_width,
    ));

    for row in &rows {
        output.push_str(&format!(
            "{:<id_w$}  {:<status_w$}  {:<region_w$}  {:<inst_w$}  {:>budget_w$}  {:<title_w$}\n",
            row.id,
            row.status,
            row.region,
            row.institution,
            row.budget,
            row.title,
            id_w = id_width,
            status_w = status_width,
            region_w = region_width,
            inst_w = institution_width,
            budget_w = budget_width,
            title_w = title_width,
        ));
    }

    output
}

fn column_width(header: &str, widths: impl Iterator<Item = usize>) -> usize {
    widths.max().unwrap_or(0).max(header.len())
}

/// Format one project's full details as `label: value` lines.
pub fn format_project_details(record: &ProjectRecord) -> String {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| ABSENT.to_string())
    };
    let text = |s: Option<&str>| s.unwrap_or(ABSENT).to_string();

    let lines = [
        ("ID", record.id().unwrap_or_else(|| ABSENT.to_string())),
        ("Title", text(record.title())),
        (
            "Status",
            record
                .status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| ABSENT.to_string()),
        ),
        ("Region", text(record.region())),
        ("Institution", text(record.institution())),
        ("Theme", text(record.theme())),
        ("Site", text(record.site())),
        ("Loan type", text(record.loan_type())),
        ("Budget", format_amount(record.budget())),
        ("Co-financing", format_amount(record.co_financing())),
        ("Start date", date(record.start_date())),
        ("End date", date(record.end_date())),
        (
            "Duration (days)",
            record
                .duration_days()
                .map(|d| format!("{}", d as i64))
                .unwrap_or_else(|| ABSENT.to_string()),
        ),
        ("Owner", text(record.owner_email())),
        ("Description", text(record.description())),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{:<16} {}", format!("{}:", label), value))
        .collect::<Vec<_>>()
        .join("\n")
}
