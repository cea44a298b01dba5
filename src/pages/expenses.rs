use yew::prelude::*;

use crate::api;
use crate::components::feedback::{AlertAction, AlertSlot, ErrorBanner};
use crate::components::icons::{icon_download, icon_plus, icon_trash};
use crate::components::layout::page_shell;
use crate::components::modal::{field_error, input_class, Modal};
use crate::config::AppSettings;
use crate::dates::today_iso;
use crate::error::{AppError, Result};
use crate::export::{download_csv, expenses_csv, EXPENSES_FILENAME};
use crate::format::format_currency;
use crate::models::{Category, Expense};
use crate::refresh::{RefreshSequencer, Settled};
use crate::search::filter_expenses;
use crate::validation::{
    category_submission, expense_submission, sanitize_amount_input, CategoryDraft, ExpenseDraft,
    Field, FieldErrors,
};

const ADD_NEW_CATEGORY: &str = "add_new";

struct QuickExpense {
    label: &'static str,
    amount: &'static str,
    description: &'static str,
    category: &'static str,
}

static QUICK_EXPENSES: [QuickExpense; 4] = [
    QuickExpense {
        label: "Coffee",
        amount: "5.00",
        description: "Coffee",
        category: "Food & Dining",
    },
    QuickExpense {
        label: "Lunch",
        amount: "15.00",
        description: "Lunch",
        category: "Food & Dining",
    },
    QuickExpense {
        label: "Gas",
        amount: "40.00",
        description: "Gas",
        category: "Transportation",
    },
    QuickExpense {
        label: "Groceries",
        amount: "60.00",
        description: "Groceries",
        category: "Food & Dining",
    },
];

/// Prefilled draft for a shortcut; the category stays unselected if the user has no category by that name.
fn quick_draft(preset: &QuickExpense, categories: &[Category], today: String) -> ExpenseDraft {
    let category_id = categories
        .iter()
        .find(|c| c.name == preset.category)
        .map(|c| c.id.to_string())
        .unwrap_or_default();
    ExpenseDraft {
        amount: preset.amount.to_string(),
        description: preset.description.to_string(),
        category_id,
        date: today,
    }
}

fn export(expenses: &[Expense]) -> Result<()> {
    if expenses.is_empty() {
        return Err(AppError::NothingToExport);
    }
    let csv = expenses_csv(expenses)?;
    download_csv(EXPENSES_FILENAME, &csv)
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ExpenseList {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
}

async fn load_expense_list() -> Result<ExpenseList> {
    let expenses = api::fetch_expenses().await?;
    let categories = api::fetch_categories().await?;
    Ok(ExpenseList {
        expenses,
        categories,
    })
}

#[function_component(ExpensesPage)]
pub fn expenses_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol);

    let list = use_state(ExpenseList::default);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let search = use_state(String::new);
    let alerts = use_reducer(AlertSlot::default);
    let sequencer = use_mut_ref(RefreshSequencer::default);

    let expense_open = use_state(|| false);
    let draft = use_state(|| ExpenseDraft::with_date(today_iso()));
    let expense_errors = use_state(FieldErrors::new);
    let category_open = use_state(|| false);
    let category_draft = use_state(CategoryDraft::default);
    let category_errors = use_state(FieldErrors::new);

    {
        let list = list.clone();
        let loading = loading.clone();
        let alerts = alerts.dispatcher();
        use_effect_with_deps(
            move |_| {
                let ticket = sequencer.borrow_mut().begin();
                loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = load_expense_list().await;
                    let outcome = sequencer.borrow().settle(ticket, result);
                    match outcome {
                        Settled::Stale => return,
                        Settled::Loaded(loaded) => {
                            log::debug!(
                                "loaded {} expenses, {} categories",
                                loaded.expenses.len(),
                                loaded.categories.len()
                            );
                            list.set(loaded);
                        }
                        Settled::Failed(e) => {
                            log::error!("Error loading expenses: {}", e);
                            alerts.dispatch(AlertAction::Raise(
                                "Failed to load expenses. Please try again.".to_string(),
                            ));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    let on_dismiss = {
        let alerts = alerts.dispatcher();
        Callback::from(move |id: u64| alerts.dispatch(AlertAction::Dismiss(id)))
    };

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_export = {
        let expenses = list.expenses.clone();
        let alerts = alerts.dispatcher();
        Callback::from(move |_| match export(&expenses) {
            Ok(()) => {}
            Err(AppError::NothingToExport) => log::warn!("no expenses to export"),
            Err(e) => {
                log::error!("Error exporting expenses: {}", e);
                alerts.dispatch(AlertAction::Raise("Failed to export expenses.".to_string()));
            }
        })
    };

    let open_expense = {
        let expense_open = expense_open.clone();
        Callback::from(move |_| expense_open.set(true))
    };

    let close_expense = {
        let expense_open = expense_open.clone();
        let draft = draft.clone();
        let expense_errors = expense_errors.clone();
        Callback::from(move |_: ()| {
            expense_open.set(false);
            draft.set(ExpenseDraft::with_date(today_iso()));
            expense_errors.set(FieldErrors::new());
        })
    };

    let close_category = {
        let category_open = category_open.clone();
        let category_draft = category_draft.clone();
        let category_errors = category_errors.clone();
        Callback::from(move |_: ()| {
            category_open.set(false);
            category_draft.set(CategoryDraft::default());
            category_errors.set(FieldErrors::new());
        })
    };

    let on_amount = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let cleaned = sanitize_amount_input(&input.value());
            input.set_value(&cleaned);
            let mut next = (*draft).clone();
            next.amount = cleaned;
            draft.set(next);
        })
    };
    let on_description = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.description = input.value();
            draft.set(next);
        })
    };
    let on_date = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.date = input.value();
            draft.set(next);
        })
    };
    let on_category = {
        let draft = draft.clone();
        let category_open = category_open.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            if input.value() == ADD_NEW_CATEGORY {
                input.set_value("");
                next.category_id.clear();
                category_open.set(true);
            } else {
                next.category_id = input.value();
            }
            draft.set(next);
        })
    };

    let on_submit_expense = {
        let draft = draft.clone();
        let expense_errors = expense_errors.clone();
        let close_expense = close_expense.clone();
        let reload = reload.clone();
        let alerts = alerts.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (errors, ready) = expense_submission(&draft);
            expense_errors.set(errors);
            if !ready {
                return;
            }
            let submitted = (*draft).clone();
            let close_expense = close_expense.clone();
            let reload = reload.clone();
            let alerts = alerts.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::add_expense(&submitted).await {
                    Ok(()) => {
                        log::info!("expense added: {}", submitted.description.trim());
                        close_expense.emit(());
                        reload.set(*reload + 1);
                    }
                    Err(e) => {
                        log::error!("Error adding expense: {}", e);
                        alerts.dispatch(AlertAction::Raise("Failed to add expense.".to_string()));
                    }
                }
            });
        })
    };

    let on_category_name = {
        let category_draft = category_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*category_draft).clone();
            next.name = input.value();
            category_draft.set(next);
        })
    };
    let on_category_color = {
        let category_draft = category_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*category_draft).clone();
            next.color = input.value();
            category_draft.set(next);
        })
    };

    let on_submit_category = {
        let category_draft = category_draft.clone();
        let category_errors = category_errors.clone();
        let close_category = close_category.clone();
        let reload = reload.clone();
        let alerts = alerts.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (errors, ready) = category_submission(&category_draft);
            category_errors.set(errors);
            if !ready {
                return;
            }
            let submitted = (*category_draft).clone();
            let close_category = close_category.clone();
            let reload = reload.clone();
            let alerts = alerts.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::add_category(&submitted).await {
                    Ok(()) => {
                        log::info!("category added: {}", submitted.name.trim());
                        close_category.emit(());
                        reload.set(*reload + 1);
                    }
                    Err(e) => {
                        log::error!("Error adding category: {}", e);
                        alerts.dispatch(AlertAction::Raise("Failed to add category.".to_string()));
                    }
                }
            });
        })
    };

    let on_delete = {
        let reload = reload.clone();
        let alerts = alerts.dispatcher();
        Callback::from(move |id: i64| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this expense?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let reload = reload.clone();
            let alerts = alerts.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_expense(id).await {
                    Ok(()) => {
                        log::info!("expense {} deleted", id);
                        reload.set(*reload + 1);
                    }
                    Err(e) => {
                        log::error!("Error deleting expense {}: {}", id, e);
                        alerts.dispatch(AlertAction::Raise("Failed to delete expense.".to_string()));
                    }
                }
            });
        })
    };

    let quick_buttons = QUICK_EXPENSES.iter().map(|preset| {
        let draft = draft.clone();
        let expense_open = expense_open.clone();
        let categories = list.categories.clone();
        let onclick = Callback::from(move |_| {
            draft.set(quick_draft(preset, &categories, today_iso()));
            expense_open.set(true);
        });
        html! {
            <button type="button" {onclick} class="px-3 py-1.5 rounded-xl border border-border bg-card text-sm text-foreground hover:bg-muted/50 transition-all">
                { preset.label }
            </button>
        }
    });

    let visible = filter_expenses(&list.expenses, &search, &currency_symbol);
    let errors = &*expense_errors;
    let cat_errors = &*category_errors;

    html! {
        { page_shell(
            "Expenses",
            html! {
                <div class="flex items-center gap-2">
                    <button onclick={on_export} class="flex items-center gap-2 border border-primary text-primary px-3 py-1.5 rounded-xl font-bold text-sm hover:bg-primary/10 transition-all">
                        { icon_download() }
                        {"Export"}
                    </button>
                    <button onclick={open_expense} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_plus() }
                        {"Add Expense"}
                    </button>
                </div>
            },
            html! {
                <>
                    <ErrorBanner alert={alerts.current.clone()} {on_dismiss} />

                    <div class="flex flex-wrap items-center gap-2">
                        <span class="text-xs font-bold uppercase tracking-widest text-muted-foreground">{"Quick add"}</span>
                        { for quick_buttons }
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        {
                            if list.expenses.is_empty() {
                                html! {}
                            } else {
                                html! {
                                    <div class="p-4 border-b border-border">
                                        <input type="text" placeholder="Search expenses..." value={(*search).clone()} oninput={on_search} class="w-full px-3 py-2 bg-white border border-border rounded-lg text-sm" />
                                    </div>
                                }
                            }
                        }
                        <div class="overflow-x-auto">
                            <table class="table w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    {
                                        if *loading && list.expenses.is_empty() {
                                            html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                                        } else if list.expenses.is_empty() {
                                            html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"No expenses yet."}</td></tr> }
                                        } else {
                                            html! {
                                                { for visible.iter().map(|e| expense_row(e, &currency_symbol, on_delete.clone())) }
                                            }
                                        }
                                    }
                                </tbody>
                            </table>
                        </div>
                    </div>

                    <Modal id="addExpenseModal" title="Add Expense" open={*expense_open} on_close={close_expense.clone()}>
                        <form class="space-y-3" onsubmit={on_submit_expense} novalidate={true}>
                            <div>
                                <label for="amount" class="text-xs font-bold text-muted-foreground">{"Amount"}</label>
                                <input id="amount" name="amount" type="text" inputmode="decimal" value={draft.amount.clone()} oninput={on_amount} class={input_class(errors, Field::Amount)} />
                                { field_error(errors, Field::Amount) }
                            </div>
                            <div>
                                <label for="description" class="text-xs font-bold text-muted-foreground">{"Description"}</label>
                                <input id="description" name="description" type="text" value={draft.description.clone()} oninput={on_description} class={input_class(errors, Field::Description)} />
                                { field_error(errors, Field::Description) }
                            </div>
                            <div>
                                <label for="category_id" class="text-xs font-bold text-muted-foreground">{"Category"}</label>
                                <select id="category_id" name="category_id" onchange={on_category} class={input_class(errors, Field::Category)}>
                                    <option value="" selected={draft.category_id.is_empty()}>{"Select a category"}</option>
                                    { for list.categories.iter().map(|c| {
                                        let id = c.id.to_string();
                                        let selected = draft.category_id == id;
                                        html! { <option value={id} {selected}>{ &c.name }</option> }
                                    }) }
                                    <option value={ADD_NEW_CATEGORY}>{"+ Add New Category"}</option>
                                </select>
                                { field_error(errors, Field::Category) }
                            </div>
                            <div>
                                <label for="date" class="text-xs font-bold text-muted-foreground">{"Date"}</label>
                                <input id="date" name="date" type="date" value={draft.date.clone()} onchange={on_date} class={input_class(errors, Field::Date)} />
                                { field_error(errors, Field::Date) }
                            </div>
                            <div class="flex justify-end gap-2 pt-2">
                                <button type="button" onclick={close_expense.reform(|_: MouseEvent| ())} class="px-4 py-2 rounded-xl text-sm text-muted-foreground hover:bg-muted/50">{"Cancel"}</button>
                                <button type="submit" class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90">{"Save"}</button>
                            </div>
                        </form>
                    </Modal>

                    <Modal id="addCategoryModal" title="Add Category" open={*category_open} on_close={close_category.clone()}>
                        <form class="space-y-3" onsubmit={on_submit_category} novalidate={true}>
                            <div>
                                <label for="category_name" class="text-xs font-bold text-muted-foreground">{"Name"}</label>
                                <input id="category_name" name="name" type="text" value={category_draft.name.clone()} oninput={on_category_name} class={input_class(cat_errors, Field::CategoryName)} />
                                { field_error(cat_errors, Field::CategoryName) }
                            </div>
                            <div>
                                <label for="category_color" class="text-xs font-bold text-muted-foreground">{"Color"}</label>
                                <input id="category_color" name="color" type="color" value={category_draft.color.clone()} oninput={on_category_color} class="h-10 w-16 rounded-lg border border-border" />
                            </div>
                            <div class="flex justify-end gap-2 pt-2">
                                <button type="button" onclick={close_category.reform(|_: MouseEvent| ())} class="px-4 py-2 rounded-xl text-sm text-muted-foreground hover:bg-muted/50">{"Cancel"}</button>
                                <button type="submit" class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90">{"Save"}</button>
                            </div>
                        </form>
                    </Modal>
                </>
            }
        ) }
    }
}

fn expense_row(expense: &Expense, symbol: &str, on_delete: Callback<i64>) -> Html {
    let id = expense.id;
    let badge_style = expense
        .color
        .as_ref()
        .map(|c| format!("background-color: {}", c))
        .unwrap_or_default();
    html! {
        <tr key={id} class="text-sm hover:bg-muted/30 transition-colors">
            <td class="px-8 py-4 text-muted-foreground">{ &expense.date }</td>
            <td class="px-8 py-4 text-foreground">{ &expense.description }</td>
            <td class="px-8 py-4">
                <span class="badge inline-block px-2 py-0.5 rounded-full text-xs text-white bg-slate-500" style={badge_style}>{ &expense.category }</span>
            </td>
            <td class="px-8 py-4 text-right font-semibold text-foreground">{ format_currency(expense.amount, symbol) }</td>
            <td class="px-8 py-4 text-right">
                <button type="button" aria-label="Delete" class="p-1 text-red-500 hover:opacity-70" onclick={Callback::from(move |_| on_delete.emit(id))}>
                    { icon_trash() }
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            color: "#e74c3c".to_string(),
        }
    }

    #[test]
    fn quick_draft_resolves_category_by_name() {
        let categories = vec![category(1, "Transportation"), category(2, "Food & Dining")];
        let draft = quick_draft(&QUICK_EXPENSES[0], &categories, "2024-03-15".to_string());
        assert_eq!(draft.amount, "5.00");
        assert_eq!(draft.description, "Coffee");
        assert_eq!(draft.category_id, "2");
        assert_eq!(draft.date, "2024-03-15");
        assert!(expense_submission(&draft).1);
    }

    #[test]
    fn quick_draft_leaves_unknown_category_unselected() {
        let draft = quick_draft(&QUICK_EXPENSES[2], &[category(1, "Other")], "2024-03-15".to_string());
        assert_eq!(draft.category_id, "");
        let (errors, ready) = expense_submission(&draft);
        assert!(!ready);
        assert_eq!(errors.get(&Field::Category), Some(&"Please select a category"));
    }

    #[test]
    fn empty_list_has_nothing_to_export() {
        assert!(matches!(export(&[]), Err(AppError::NothingToExport)));
    }
}
