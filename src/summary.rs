//! Summary statistics derived client-side from the analytics series.

use crate::models::{month_abbr, CategoryBreakdownPoint, MonthlySpendingPoint};

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStats {
    pub yearly_total: f64,
    pub monthly_average: f64,
    pub selected_month_total: f64,
    pub top_category: Option<String>,
}

pub fn yearly_total(monthly: &[MonthlySpendingPoint]) -> f64 {
    monthly.iter().map(|p| p.amount).sum()
}

/// Amount recorded for `month` (1-based), matched by short month name.
pub fn month_total(monthly: &[MonthlySpendingPoint], month: u32) -> f64 {
    let Some(name) = month_abbr(month) else {
        return 0.0;
    };
    monthly
        .iter()
        .find(|p| p.month == name)
        .map(|p| p.amount)
        .unwrap_or(0.0)
}

/// Category with the largest positive amount. Ties keep the earliest entry.
pub fn top_category(breakdown: &[CategoryBreakdownPoint]) -> Option<&CategoryBreakdownPoint> {
    let mut best: Option<&CategoryBreakdownPoint> = None;
    for point in breakdown {
        let current_max = best.map(|b| b.amount).unwrap_or(0.0);
        if point.amount > current_max {
            best = Some(point);
        }
    }
    best
}

pub fn summarize(
    monthly: &[MonthlySpendingPoint],
    breakdown: &[CategoryBreakdownPoint],
    month: u32,
) -> SummaryStats {
    let total = yearly_total(monthly);
    SummaryStats {
        yearly_total: total,
        monthly_average: total / 12.0,
        selected_month_total: month_total(monthly, month),
        top_category: top_category(breakdown).map(|p| p.category.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MONTH_ABBR;

    fn year_of(amounts: &[f64]) -> Vec<MonthlySpendingPoint> {
        MONTH_ABBR
            .iter()
            .zip(amounts)
            .map(|(m, a)| MonthlySpendingPoint {
                month: m.to_string(),
                amount: *a,
            })
            .collect()
    }

    fn cat(name: &str, amount: f64) -> CategoryBreakdownPoint {
        CategoryBreakdownPoint {
            category: name.to_string(),
            amount,
            color: "#95a5a6".to_string(),
        }
    }

    #[test]
    fn yearly_total_sums_every_month() {
        let monthly = year_of(&[10.0, 20.5, 0.0, 4.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.25]);
        let stats = summarize(&monthly, &[], 2);
        assert_eq!(stats.yearly_total, 40.0);
        assert!((stats.monthly_average - 40.0 / 12.0).abs() < 1e-9);
        assert_eq!(stats.selected_month_total, 20.5);
    }

    #[test]
    fn missing_month_counts_as_zero() {
        let monthly = year_of(&[10.0, 20.0]);
        assert_eq!(month_total(&monthly, 7), 0.0);
        assert_eq!(month_total(&monthly, 0), 0.0);
    }

    #[test]
    fn top_category_ties_keep_first() {
        let breakdown = vec![cat("Food", 30.0), cat("Rent", 50.0), cat("Travel", 50.0)];
        assert_eq!(top_category(&breakdown).unwrap().category, "Rent");
    }

    #[test]
    fn no_top_category_without_positive_spend() {
        assert_eq!(top_category(&[]), None);
        assert_eq!(top_category(&[cat("Food", 0.0)]), None);
        assert_eq!(summarize(&[], &[], 1).top_category, None);
    }
}
