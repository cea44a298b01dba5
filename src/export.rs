//! CSV export of already-loaded records.
//!
//! Every exporter builds rows from typed data and goes through
//! [`write_rows`], so quoting is handled by the `csv` writer instead of
//! joining raw strings.

use wasm_bindgen::JsCast;

use crate::error::{dom_err, AppError, Result};
use crate::format::format_amount;
use crate::models::{AnalyticsData, Expense};

pub const DASHBOARD_FILENAME: &str = "dashboard-export.csv";
pub const EXPENSES_FILENAME: &str = "expenses.csv";

pub fn analytics_filename(year: i32, month: u32) -> String {
    format!("analytics-{}-{}.csv", year, month)
}

/// Serializes rows with `,` between fields and `\n` between rows, no trailing newline.
pub fn write_rows<I, R, F>(rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Csv(csv::Error::from(e.into_error())))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

pub fn analytics_csv(data: &AnalyticsData) -> Result<String> {
    let header = write_rows([
        vec!["Analytics Export".to_string()],
        vec!["Year:".to_string(), data.year.to_string()],
        vec!["Month:".to_string(), data.month.to_string()],
    ])?;

    let mut monthly = vec![
        vec!["Monthly Spending".to_string()],
        vec!["Month".to_string(), "Amount".to_string()],
    ];
    monthly.extend(
        data.monthly
            .iter()
            .map(|p| vec![p.month.clone(), format_amount(p.amount)]),
    );

    let mut categories = vec![
        vec!["Category Breakdown".to_string()],
        vec!["Category".to_string(), "Amount".to_string()],
    ];
    categories.extend(
        data.breakdown
            .iter()
            .map(|p| vec![p.category.clone(), format_amount(p.amount)]),
    );

    // sections are separated by one blank line
    Ok([header, write_rows(monthly)?, write_rows(categories)?].join("\n\n"))
}

pub fn expenses_csv(expenses: &[Expense]) -> Result<String> {
    let mut rows = vec![vec![
        "Date".to_string(),
        "Description".to_string(),
        "Category".to_string(),
        "Amount".to_string(),
    ]];
    rows.extend(expenses.iter().map(|e| {
        vec![
            e.date.clone(),
            e.description.clone(),
            e.category.clone(),
            format_amount(e.amount),
        ]
    }));
    write_rows(rows)
}

pub fn metrics_csv(metrics: &[(String, String)]) -> Result<String> {
    let mut rows = vec![vec!["Metric".to_string(), "Value".to_string()]];
    rows.extend(metrics.iter().map(|(k, v)| vec![k.clone(), v.clone()]));
    write_rows(rows)
}

/// Hands `content` to the browser as a file download named `filename`.
pub fn download_csv(filename: &str, content: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| AppError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::Dom("no document".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| dom_err("creating blob", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| dom_err("creating object url", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| dom_err("creating anchor", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| AppError::Dom("anchor is not an HtmlAnchorElement".into()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(|e| dom_err("revoking object url", e))?;
    log::info!("exported {} ({} bytes)", filename, content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryBreakdownPoint, MonthlySpendingPoint};

    #[test]
    fn plain_table_matches_simple_join() {
        let csv = write_rows([
            ["Date", "Category", "Amount"],
            ["2024-01-01", "Food", "12.50"],
        ])
        .unwrap();
        assert_eq!(csv, "Date,Category,Amount\n2024-01-01,Food,12.50");
    }

    #[test]
    fn embedded_commas_and_quotes_are_quoted() {
        let csv = write_rows([["Food, Dining", "say \"hi\""]]).unwrap();
        assert_eq!(csv, "\"Food, Dining\",\"say \"\"hi\"\"\"");
    }

    #[test]
    fn expenses_export_uses_structured_rows() {
        let expenses = vec![Expense {
            id: 1,
            amount: 12.5,
            description: "Lunch, with team".to_string(),
            date: "2024-01-01".to_string(),
            category: "Food & Dining".to_string(),
            color: Some("#e74c3c".to_string()),
        }];
        assert_eq!(
            expenses_csv(&expenses).unwrap(),
            "Date,Description,Category,Amount\n2024-01-01,\"Lunch, with team\",Food & Dining,12.50"
        );
    }

    #[test]
    fn analytics_export_layout() {
        let data = AnalyticsData {
            year: 2024,
            month: 3,
            monthly: vec![
                MonthlySpendingPoint {
                    month: "Jan".to_string(),
                    amount: 10.0,
                },
                MonthlySpendingPoint {
                    month: "Feb".to_string(),
                    amount: 2.5,
                },
            ],
            breakdown: vec![CategoryBreakdownPoint {
                category: "Shopping".to_string(),
                amount: 7.0,
                color: "#9b59b6".to_string(),
            }],
        };
        let expected = "Analytics Export\nYear:,2024\nMonth:,3\n\n\
                        Monthly Spending\nMonth,Amount\nJan,10.00\nFeb,2.50\n\n\
                        Category Breakdown\nCategory,Amount\nShopping,7.00";
        assert_eq!(analytics_csv(&data).unwrap(), expected);
        assert_eq!(analytics_filename(2024, 3), "analytics-2024-3.csv");
    }

    #[test]
    fn metrics_export_has_header() {
        let metrics = vec![("Monthly Spending".to_string(), "$12.00".to_string())];
        assert_eq!(
            metrics_csv(&metrics).unwrap(),
            "Metric,Value\nMonthly Spending,$12.00"
        );
    }
}
