//! Monthly budget figures for the dashboard.

use crate::models::{Budget, BudgetPeriod, CategoryBreakdownPoint};

/// Progress of one monthly budget against what its category spent.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetProgress {
    pub name: String,
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percent: f64,
}

impl BudgetProgress {
    /// Bar width in percent, capped at a full bar.
    pub fn bar_width(&self) -> f64 {
        self.percent.clamp(0.0, 100.0)
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    pub fn tone(&self) -> &'static str {
        if self.percent >= 100.0 {
            "bg-red-500"
        } else if self.percent >= 80.0 {
            "bg-amber-500"
        } else {
            "bg-green-500"
        }
    }
}

fn is_monthly_for(budget: &Budget, year: i32, month: u32) -> bool {
    budget.period == BudgetPeriod::Monthly && budget.year == year && budget.month == Some(month)
}

/// Sum of the monthly budgets set for `year`/`month`. Yearly budgets are not counted.
pub fn monthly_budget_total(budgets: &[Budget], year: i32, month: u32) -> f64 {
    budgets
        .iter()
        .filter(|b| is_monthly_for(b, year, month))
        .map(|b| b.amount)
        .sum()
}

/// Spending as a percentage of the budget, 0 when no budget is set.
pub fn budget_used_percent(spent: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        spent / budget * 100.0
    } else {
        0.0
    }
}

pub fn budget_progress(
    budgets: &[Budget],
    breakdown: &[CategoryBreakdownPoint],
    year: i32,
    month: u32,
) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .filter(|b| is_monthly_for(b, year, month))
        .map(|b| {
            let spent: f64 = breakdown
                .iter()
                .filter(|p| p.category == b.category)
                .map(|p| p.amount)
                .sum();
            BudgetProgress {
                name: b.name.clone(),
                category: b.category.clone(),
                spent,
                limit: b.amount,
                percent: budget_used_percent(spent, b.amount),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(category: &str, amount: f64, month: u32) -> Budget {
        Budget {
            id: 1,
            name: format!("{} budget", category),
            amount,
            period: BudgetPeriod::Monthly,
            month: Some(month),
            year: 2024,
            category: category.to_string(),
        }
    }

    fn spent(category: &str, amount: f64) -> CategoryBreakdownPoint {
        CategoryBreakdownPoint {
            category: category.to_string(),
            amount,
            color: "#3498db".to_string(),
        }
    }

    #[test]
    fn total_counts_only_this_months_monthly_budgets() {
        let mut yearly = monthly("Travel", 1200.0, 3);
        yearly.period = BudgetPeriod::Yearly;
        yearly.month = None;
        let budgets = vec![
            monthly("Food & Dining", 300.0, 3),
            monthly("Shopping", 200.0, 3),
            monthly("Food & Dining", 999.0, 4),
            yearly,
        ];
        assert_eq!(monthly_budget_total(&budgets, 2024, 3), 500.0);
        assert_eq!(monthly_budget_total(&budgets, 2023, 3), 0.0);
    }

    #[test]
    fn used_percent_without_budget_is_zero() {
        assert_eq!(budget_used_percent(50.0, 200.0), 25.0);
        assert_eq!(budget_used_percent(50.0, 0.0), 0.0);
    }

    #[test]
    fn progress_matches_category_spending() {
        let budgets = vec![monthly("Food & Dining", 200.0, 3), monthly("Shopping", 100.0, 3)];
        let breakdown = vec![spent("Food & Dining", 170.0), spent("Shopping", 150.0)];
        let progress = budget_progress(&budgets, &breakdown, 2024, 3);

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].percent, 85.0);
        assert_eq!(progress[0].tone(), "bg-amber-500");
        assert_eq!(progress[0].remaining(), 30.0);

        assert_eq!(progress[1].percent, 150.0);
        assert_eq!(progress[1].bar_width(), 100.0);
        assert_eq!(progress[1].tone(), "bg-red-500");
    }

    #[test]
    fn untouched_budget_shows_empty_bar() {
        let progress = budget_progress(&[monthly("Healthcare", 80.0, 3)], &[], 2024, 3);
        assert_eq!(progress[0].spent, 0.0);
        assert_eq!(progress[0].bar_width(), 0.0);
        assert_eq!(progress[0].tone(), "bg-green-500");
    }
}
