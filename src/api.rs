use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use web_sys::{RequestCredentials, UrlSearchParams};

use crate::config::API_BASE_URL;
use crate::error::{dom_err, AppError, Result};
use crate::models::{AnalyticsData, Budget, Category, CategoryBreakdownPoint, Expense, MonthlySpendingPoint};
use crate::validation::{CategoryDraft, ExpenseDraft};

pub fn monthly_spending_url(year: i32) -> String {
    format!("{}/api/analytics/monthly-spending?year={}", API_BASE_URL, year)
}

pub fn category_breakdown_url(year: i32, month: u32) -> String {
    format!(
        "{}/api/analytics/category-breakdown?year={}&month={}",
        API_BASE_URL, year, month
    )
}

pub fn expenses_url() -> String {
    format!("{}/api/expenses", API_BASE_URL)
}

pub fn categories_url() -> String {
    format!("{}/api/categories", API_BASE_URL)
}

pub fn budgets_url(year: i32) -> String {
    format!("{}/api/budgets?year={}", API_BASE_URL, year)
}

pub fn add_expense_url() -> String {
    format!("{}/expenses/add", API_BASE_URL)
}

pub fn delete_expense_url(id: i64) -> String {
    format!("{}/expenses/{}/delete", API_BASE_URL, id)
}

pub fn add_category_url() -> String {
    format!("{}/categories/add", API_BASE_URL)
}

fn get(url: &str) -> RequestBuilder {
    Request::get(url).credentials(RequestCredentials::Include)
}

fn post(url: &str) -> RequestBuilder {
    Request::post(url).credentials(RequestCredentials::Include)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    log::debug!("GET {}", url);
    let resp = get(url).send().await?;
    if !resp.ok() {
        return Err(AppError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    Ok(resp.json::<T>().await?)
}

async fn post_form(url: &str, fields: &[(&str, &str)]) -> Result<()> {
    let params = UrlSearchParams::new().map_err(|e| dom_err("building form body", e))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    log::debug!("POST {}", url);
    let resp = post(url).body(params)?.send().await?;
    if !resp.ok() {
        return Err(AppError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    Ok(())
}

pub async fn fetch_monthly_spending(year: i32) -> Result<Vec<MonthlySpendingPoint>> {
    get_json(&monthly_spending_url(year)).await
}

pub async fn fetch_category_breakdown(year: i32, month: u32) -> Result<Vec<CategoryBreakdownPoint>> {
    get_json(&category_breakdown_url(year, month)).await
}

/// Loads both analytics series for one selection; the first failure aborts.
pub async fn fetch_analytics(year: i32, month: u32) -> Result<AnalyticsData> {
    let monthly = fetch_monthly_spending(year).await?;
    let breakdown = fetch_category_breakdown(year, month).await?;
    Ok(AnalyticsData {
        year,
        month,
        monthly,
        breakdown,
    })
}

pub async fn fetch_expenses() -> Result<Vec<Expense>> {
    get_json(&expenses_url()).await
}

pub async fn fetch_categories() -> Result<Vec<Category>> {
    get_json(&categories_url()).await
}

pub async fn fetch_budgets(year: i32) -> Result<Vec<Budget>> {
    get_json(&budgets_url(year)).await
}

pub async fn add_expense(draft: &ExpenseDraft) -> Result<()> {
    post_form(&add_expense_url(), &draft.form_fields()).await
}

pub async fn add_category(draft: &CategoryDraft) -> Result<()> {
    post_form(
        &add_category_url(),
        &[("name", draft.name.trim()), ("color", draft.color.as_str())],
    )
    .await
}

pub async fn delete_expense(id: i64) -> Result<()> {
    post_form(&delete_expense_url(id), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytics_urls_carry_selection() {
        assert_eq!(
            monthly_spending_url(2024),
            format!("{}/api/analytics/monthly-spending?year=2024", API_BASE_URL)
        );
        assert_eq!(
            category_breakdown_url(2023, 11),
            format!("{}/api/analytics/category-breakdown?year=2023&month=11", API_BASE_URL)
        );
    }

    #[test]
    fn budgets_url_carries_year() {
        assert_eq!(budgets_url(2025), format!("{}/api/budgets?year=2025", API_BASE_URL));
    }

    #[test]
    fn form_routes() {
        assert_eq!(add_expense_url(), format!("{}/expenses/add", API_BASE_URL));
        assert_eq!(delete_expense_url(42), format!("{}/expenses/42/delete", API_BASE_URL));
        assert_eq!(add_category_url(), format!("{}/categories/add", API_BASE_URL));
    }
}
