use crate::format::{format_amount, format_currency};
use crate::models::Expense;

/// Case-insensitive substring match against every column shown in the expense table.
/// Amounts match both as displayed (`$1,234.50`) and as plain decimals (`1234.50`).
pub fn matches(expense: &Expense, term: &str, symbol: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        expense.date.as_str(),
        expense.description.as_str(),
        expense.category.as_str(),
        format_amount(expense.amount).as_str(),
        format_currency(expense.amount, symbol).as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

pub fn filter_expenses<'a>(expenses: &'a [Expense], term: &str, symbol: &str) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| matches(e, term, symbol)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(description: &str, category: &str, amount: f64) -> Expense {
        Expense {
            id: 1,
            amount,
            description: description.to_string(),
            date: "2024-02-10".to_string(),
            category: category.to_string(),
            color: None,
        }
    }

    #[test]
    fn matches_any_column_ignoring_case() {
        let e = expense("Weekly Groceries", "Food & Dining", 54.2);
        assert!(matches(&e, "groceries", "$"));
        assert!(matches(&e, "DINING", "$"));
        assert!(matches(&e, "54.20", "$"));
        assert!(matches(&e, "2024-02", "$"));
        assert!(!matches(&e, "rent", "$"));
    }

    #[test]
    fn matches_amount_as_displayed() {
        let e = expense("Laptop", "Shopping", 1234.5);
        assert!(matches(&e, "1,234", "$"));
        assert!(matches(&e, "$1,234.50", "$"));
        assert!(matches(&e, "1234.50", "$"));
        assert!(matches(&e, "€1,234", "€"));
        assert!(!matches(&e, "€1,234", "$"));
    }

    #[test]
    fn blank_term_keeps_everything() {
        let list = vec![expense("Bus", "Transportation", 2.5), expense("Movie", "Entertainment", 12.0)];
        assert_eq!(filter_expenses(&list, "  ", "$").len(), 2);
        let hits = filter_expenses(&list, "movie", "$");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Movie");
    }
}
