use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Amount,
    Description,
    Category,
    Date,
    CategoryName,
}

impl Field {
    /// Element id and form field name the field is rendered under.
    pub fn id(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Description => "description",
            Field::Category => "category_id",
            Field::Date => "date",
            Field::CategoryName => "category_name",
        }
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseDraft {
    pub amount: String,
    pub description: String,
    pub category_id: String,
    pub date: String,
}

impl ExpenseDraft {
    pub fn with_date(date: String) -> Self {
        ExpenseDraft {
            date,
            ..Default::default()
        }
    }

    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            (Field::Amount.id(), self.amount.trim()),
            (Field::Description.id(), self.description.trim()),
            (Field::Date.id(), self.date.trim()),
            (Field::Category.id(), self.category_id.trim()),
        ]
    }
}

pub const DEFAULT_CATEGORY_COLOR: &str = "#007bff";

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        CategoryDraft {
            name: String::new(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }
}

fn positive_amount(raw: &str) -> bool {
    match raw.trim().parse::<f64>() {
        Ok(v) => v.is_finite() && v > 0.0,
        Err(_) => false,
    }
}

/// Checks every field independently; an empty map means the form may submit.
pub fn validate_expense(draft: &ExpenseDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !positive_amount(&draft.amount) {
        errors.insert(Field::Amount, "Please enter a valid amount greater than 0");
    }
    if draft.description.trim().is_empty() {
        errors.insert(Field::Description, "Please enter a description");
    }
    if draft.category_id.is_empty() {
        errors.insert(Field::Category, "Please select a category");
    }
    if draft.date.is_empty() {
        errors.insert(Field::Date, "Please select a date");
    }
    errors
}

pub fn validate_category(draft: &CategoryDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.name.trim().is_empty() {
        errors.insert(Field::CategoryName, "Please enter a category name");
    }
    errors
}

/// Errors to show after a submit attempt, and whether the form may be sent.
///
/// The map replaces the previously shown errors, so fields fixed since the
/// last attempt lose their markers.
pub fn expense_submission(draft: &ExpenseDraft) -> (FieldErrors, bool) {
    let errors = validate_expense(draft);
    let ready = errors.is_empty();
    (errors, ready)
}

pub fn category_submission(draft: &CategoryDraft) -> (FieldErrors, bool) {
    let errors = validate_category(draft);
    let ready = errors.is_empty();
    (errors, ready)
}

/// Keeps digits and a single decimal point, with at most two decimals.
pub fn sanitize_amount_input(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = cleaned.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    match parts.next() {
        None => whole.to_string(),
        Some(rest) => {
            let decimals: String = rest.chars().filter(|c| *c != '.').take(2).collect();
            format!("{}.{}", whole, decimals)
        }
    }
}
