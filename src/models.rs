use serde::{Deserialize, Serialize};

pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short English name for a 1-based month, `None` outside 1..=12.
pub fn month_abbr(month: u32) -> Option<&'static str> {
    MONTH_ABBR.get((month as usize).checked_sub(1)?).copied()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpendingPoint {
    pub month: String,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdownPoint {
    pub category: String,
    pub amount: f64,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}

/// A spending limit for one category; `month` is set only for monthly budgets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub period: BudgetPeriod,
    #[serde(default)]
    pub month: Option<u32>,
    pub year: i32,
    pub category: String,
}

/// Everything one analytics refresh loads for a year/month selection.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsData {
    pub year: i32,
    pub month: u32,
    pub monthly: Vec<MonthlySpendingPoint>,
    pub breakdown: Vec<CategoryBreakdownPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_abbr_is_one_based() {
        assert_eq!(month_abbr(1), Some("Jan"));
        assert_eq!(month_abbr(12), Some("Dec"));
        assert_eq!(month_abbr(0), None);
        assert_eq!(month_abbr(13), None);
    }

    #[test]
    fn expense_color_is_optional() {
        let raw = r#"{"id":3,"amount":12.5,"description":"Lunch","date":"2024-01-01","category":"Food"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.color, None);
        assert_eq!(expense.category, "Food");
    }

    #[test]
    fn budget_decodes_both_periods() {
        let raw = r#"[
            {"id":1,"name":"Food","amount":300.0,"period":"monthly","month":3,"year":2024,"category":"Food & Dining"},
            {"id":2,"name":"Travel","amount":1200.0,"period":"yearly","year":2024,"category":"Transportation"}
        ]"#;
        let budgets: Vec<Budget> = serde_json::from_str(raw).unwrap();
        assert_eq!(budgets[0].period, BudgetPeriod::Monthly);
        assert_eq!(budgets[0].month, Some(3));
        assert_eq!(budgets[1].period, BudgetPeriod::Yearly);
        assert_eq!(budgets[1].month, None);
    }

    #[test]
    fn breakdown_point_decodes_backend_shape() {
        let raw = r##"[{"category":"Food & Dining","color":"#e74c3c","amount":42.0}]"##;
        let points: Vec<CategoryBreakdownPoint> = serde_json::from_str(raw).unwrap();
        assert_eq!(points[0].color, "#e74c3c");
        assert_eq!(points[0].amount, 42.0);
    }
}
