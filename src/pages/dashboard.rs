use std::time::Duration;

use yew::platform::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::animation::{format_stat, StatKind};
use crate::api;
use crate::budget::{budget_progress, budget_used_percent, monthly_budget_total, BudgetProgress};
use crate::charts::{category_doughnut_config, slice_label, RenderTarget};
use crate::components::feedback::{AlertAction, AlertSlot, ErrorBanner};
use crate::components::icons::{
    icon_award, icon_calendar, icon_dollar, icon_download, icon_pie_chart, icon_refresh, icon_trending_up,
};
use crate::components::layout::page_shell;
use crate::components::stat_card::{StatCard, StatValue};
use crate::config::{AppSettings, BUDGET_BAR_DELAY_MS};
use crate::dates::current_year_month;
use crate::error::{AppError, Result};
use crate::export::{download_csv, metrics_csv, DASHBOARD_FILENAME};
use crate::format::format_currency;
use crate::models::{AnalyticsData, Budget, Expense};
use crate::refresh::{RefreshSequencer, Settled};
use crate::summary::summarize;

const RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    current: AnalyticsData,
    budgets: Vec<Budget>,
    recent: Vec<Expense>,
}

async fn load_dashboard() -> Result<DashboardData> {
    let (year, month) = current_year_month();
    let current = api::fetch_analytics(year, month).await?;
    let budgets = api::fetch_budgets(year).await?;
    let mut recent = api::fetch_expenses().await?;
    recent.truncate(RECENT_LIMIT);
    Ok(DashboardData {
        current,
        budgets,
        recent,
    })
}

/// Card and export figures for the current month.
#[derive(Clone, Debug, PartialEq)]
struct DashboardFigures {
    month_spent: f64,
    yearly_spent: f64,
    monthly_budget: f64,
    budget_used: f64,
    top_category: Option<String>,
    progress: Vec<BudgetProgress>,
}

fn dashboard_figures(current: &AnalyticsData, budgets: &[Budget]) -> DashboardFigures {
    let stats = summarize(&current.monthly, &current.breakdown, current.month);
    let monthly_budget = monthly_budget_total(budgets, current.year, current.month);
    DashboardFigures {
        month_spent: stats.selected_month_total,
        yearly_spent: stats.yearly_total,
        monthly_budget,
        budget_used: budget_used_percent(stats.selected_month_total, monthly_budget),
        top_category: stats.top_category,
        progress: budget_progress(budgets, &current.breakdown, current.year, current.month),
    }
}

fn dashboard_metrics(figures: &DashboardFigures, symbol: &str) -> Vec<(String, String)> {
    let mut metrics = vec![
        (
            "Monthly Spending".to_string(),
            format_stat(figures.month_spent, StatKind::Currency, symbol),
        ),
        (
            "Monthly Budget".to_string(),
            format_stat(figures.monthly_budget, StatKind::Currency, symbol),
        ),
        (
            "Budget Used".to_string(),
            format_stat(figures.budget_used, StatKind::Percent, symbol),
        ),
        (
            "Yearly Spending".to_string(),
            format_stat(figures.yearly_spent, StatKind::Currency, symbol),
        ),
        (
            "Top Category".to_string(),
            figures.top_category.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
    ];
    metrics.extend(figures.progress.iter().map(|p| {
        (
            format!("Budget: {}", p.name),
            format!(
                "{} of {} ({})",
                format_currency(p.spent, symbol),
                format_currency(p.limit, symbol),
                format_stat(p.percent, StatKind::Percent, symbol)
            ),
        )
    }));
    metrics
}

fn export(figures: Option<&DashboardFigures>, symbol: &str) -> Result<()> {
    let figures = figures.ok_or(AppError::NothingToExport)?;
    let csv = metrics_csv(&dashboard_metrics(figures, symbol))?;
    download_csv(DASHBOARD_FILENAME, &csv)
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol);

    let data = use_state(|| None::<DashboardData>);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let alerts = use_reducer(AlertSlot::default);
    let sequencer = use_mut_ref(RefreshSequencer::default);
    let category_target = use_mut_ref(|| RenderTarget::new("categoryChart"));
    let bars_grown = use_state(|| false);

    {
        let data = data.clone();
        let loading = loading.clone();
        let alerts = alerts.dispatcher();
        use_effect_with_deps(
            move |_| {
                let ticket = sequencer.borrow_mut().begin();
                loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = load_dashboard().await;
                    let outcome = sequencer.borrow().settle(ticket, result);
                    match outcome {
                        Settled::Stale => return,
                        Settled::Loaded(loaded) => data.set(Some(loaded)),
                        Settled::Failed(e) => {
                            log::error!("Error loading dashboard: {}", e);
                            alerts.dispatch(AlertAction::Raise(
                                "Failed to load dashboard data. Please try again.".to_string(),
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

    {
        let category_target = category_target.clone();
        use_effect_with_deps(
            move |data: &Option<DashboardData>| {
                if let Some(data) = data {
                    let breakdown = &data.current.breakdown;
                    let mut target = category_target.borrow_mut();
                    if breakdown.is_empty() {
                        target.clear();
                    } else if let Err(e) = target.render(&category_doughnut_config(breakdown, 12)) {
                        log::warn!("category chart not drawn: {}", e);
                    }
                }
                || ()
            },
            (*data).clone(),
        );
    }

    {
        use_effect_with_deps(
            move |_| move || category_target.borrow_mut().clear(),
            (),
        );
    }

    // progress bars grow from zero each time new figures arrive
    {
        let bars_grown = bars_grown.clone();
        use_effect_with_deps(
            move |_| {
                bars_grown.set(false);
                spawn_local(async move {
                    sleep(Duration::from_millis(BUDGET_BAR_DELAY_MS)).await;
                    bars_grown.set(true);
                });
                || ()
            },
            (*data).clone(),
        );
    }

    let figures = data
        .as_ref()
        .map(|d| dashboard_figures(&d.current, &d.budgets));

    let on_refresh = {
        let reload = reload.clone();
        Callback::from(move |_| reload.set(*reload + 1))
    };

    let on_export = {
        let figures = figures.clone();
        let currency_symbol = currency_symbol.clone();
        let alerts = alerts.dispatcher();
        Callback::from(move |_| match export(figures.as_ref(), &currency_symbol) {
            Ok(()) => {}
            Err(AppError::NothingToExport) => log::warn!("dashboard has nothing to export yet"),
            Err(e) => {
                log::error!("Error exporting dashboard: {}", e);
                alerts.dispatch(AlertAction::Raise("Failed to export dashboard data.".to_string()));
            }
        })
    };

    let on_dismiss = {
        let alerts = alerts.dispatcher();
        Callback::from(move |id: u64| alerts.dispatch(AlertAction::Dismiss(id)))
    };

    let (month_spent, monthly_budget, budget_used, yearly_spent, top) = match &figures {
        Some(f) => (
            f.month_spent,
            f.monthly_budget,
            f.budget_used,
            f.yearly_spent,
            f.top_category.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
        None => (0.0, 0.0, 0.0, 0.0, "N/A".to_string()),
    };

    html! {
        { page_shell(
            "Dashboard",
            html! {
                <div class="flex items-center gap-2">
                    <button onclick={on_refresh} disabled={*loading} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_refresh() }
                        { if *loading { "Loading..." } else { "Refresh" } }
                    </button>
                    <button onclick={on_export} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_download() }
                        {"Export"}
                    </button>
                </div>
            },
            html! {
                <>
                    <ErrorBanner alert={alerts.current.clone()} {on_dismiss} />

                    <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-5 gap-6">
                        <StatCard title="Monthly Spending" icon={icon_calendar()} value={StatValue::Number(month_spent, StatKind::Currency)} currency_symbol={currency_symbol.clone()} accent="text-[#1D617A]" />
                        <StatCard title="Monthly Budget" icon={icon_dollar()} value={StatValue::Number(monthly_budget, StatKind::Currency)} currency_symbol={currency_symbol.clone()} accent="text-[#1D617A]" />
                        <StatCard title="Budget Used" icon={icon_pie_chart()} value={StatValue::Number(budget_used, StatKind::Percent)} currency_symbol={currency_symbol.clone()} accent={if budget_used > 100.0 { "text-red-600" } else { "text-[#1D617A]" }} />
                        <StatCard title="Yearly Spending" icon={icon_trending_up()} value={StatValue::Number(yearly_spent, StatKind::Currency)} currency_symbol={currency_symbol.clone()} accent="text-[#1D617A]" />
                        <StatCard title="Top Category" icon={icon_award()} value={StatValue::Text(top)} currency_symbol={currency_symbol.clone()} accent="text-[#1D617A]" />
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-3">
                            <h3 class="font-bold text-foreground text-lg">{"Budget Status"}</h3>
                            <span class="text-xs text-muted-foreground">{"This month"}</span>
                        </div>
                        { budget_panel(figures.as_ref(), *bars_grown, &currency_symbol) }
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-3">{"Spending by Category"}</h3>
                            { category_panel(data.as_ref(), &currency_symbol) }
                        </div>
                        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                            <div class="p-6 border-b border-border">
                                <h3 class="font-bold text-foreground text-lg">{"Recent Expenses"}</h3>
                            </div>
                            { recent_table(data.as_ref(), *loading, &currency_symbol) }
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

fn budget_panel(figures: Option<&DashboardFigures>, grown: bool, symbol: &str) -> Html {
    let Some(figures) = figures else {
        return html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> };
    };
    if figures.progress.is_empty() {
        return html! { <p class="text-sm text-muted-foreground">{"No budgets set for this month."}</p> };
    }
    html! {
        <div class="space-y-3">
            { for figures.progress.iter().map(|p| {
                let width = if grown { p.bar_width() } else { 0.0 };
                let over = p.remaining() < 0.0;
                html! {
                    <div class="flex flex-col gap-1 text-sm">
                        <div class="flex items-center justify-between">
                            <span class="text-foreground">{ &p.name }<span class="text-muted-foreground">{ format!(" · {}", p.category) }</span></span>
                            <span class={if over { "text-red-600" } else { "text-muted-foreground" }}>
                                { format_stat(p.percent, StatKind::Percent, symbol) }
                            </span>
                        </div>
                        <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                            <div class={classes!("progress-bar", "h-full", p.tone())} style={format!("width: {:.1}%; transition: width 0.6s ease;", width)}></div>
                        </div>
                        <div class="flex items-center justify-between text-xs text-muted-foreground">
                            <span>{ format!("Spent: {}", format_currency(p.spent, symbol)) }</span>
                            <span>{ format!("Limit: {}", format_currency(p.limit, symbol)) }</span>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

fn category_panel(data: Option<&DashboardData>, symbol: &str) -> Html {
    let Some(data) = data else {
        return html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> };
    };
    let breakdown = &data.current.breakdown;
    if breakdown.is_empty() {
        return html! { <p class="text-sm text-muted-foreground">{"No expenses this month yet."}</p> };
    }
    let total: f64 = breakdown.iter().map(|p| p.amount).sum();
    html! {
        <>
            <div class="relative h-64">
                <canvas id="categoryChart"></canvas>
            </div>
            <ul class="mt-4 space-y-1">
                { for breakdown.iter().map(|p| html! {
                    <li class="flex items-center gap-2 text-sm text-muted-foreground">
                        <span class="inline-block w-2 h-2 rounded-full" style={format!("background-color: {}", p.color)}></span>
                        { slice_label(&p.category, p.amount, total, symbol) }
                    </li>
                }) }
            </ul>
        </>
    }
}

fn recent_table(data: Option<&DashboardData>, loading: bool, symbol: &str) -> Html {
    let rows = match data {
        None if loading => {
            html! { <tr><td colspan="3" class="px-8 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
        }
        Some(d) if !d.recent.is_empty() => html! {
            { for d.recent.iter().map(|e| html! {
                <tr key={e.id} class="text-sm hover:bg-muted/30 transition-colors">
                    <td class="px-8 py-4 text-muted-foreground">{ &e.date }</td>
                    <td class="px-8 py-4 text-foreground">{ &e.description }</td>
                    <td class="px-8 py-4 text-right font-semibold text-foreground">{ format_currency(e.amount, symbol) }</td>
                </tr>
            }) }
        },
        _ => {
            html! { <tr><td colspan="3" class="px-8 py-6 text-center text-muted-foreground">{"No expenses yet."}</td></tr> }
        }
    };
    html! {
        <div class="overflow-x-auto">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    { rows }
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, CategoryBreakdownPoint, MonthlySpendingPoint};

    fn march() -> AnalyticsData {
        AnalyticsData {
            year: 2024,
            month: 3,
            monthly: vec![
                MonthlySpendingPoint {
                    month: "Jan".to_string(),
                    amount: 300.0,
                },
                MonthlySpendingPoint {
                    month: "Mar".to_string(),
                    amount: 100.0,
                },
            ],
            breakdown: vec![
                CategoryBreakdownPoint {
                    category: "Bills & Utilities".to_string(),
                    amount: 60.0,
                    color: "#1abc9c".to_string(),
                },
                CategoryBreakdownPoint {
                    category: "Food & Dining".to_string(),
                    amount: 40.0,
                    color: "#e74c3c".to_string(),
                },
            ],
        }
    }

    fn budget(name: &str, category: &str, amount: f64) -> Budget {
        Budget {
            id: 1,
            name: name.to_string(),
            amount,
            period: BudgetPeriod::Monthly,
            month: Some(3),
            year: 2024,
            category: category.to_string(),
        }
    }

    #[test]
    fn figures_use_this_months_budgets() {
        let budgets = vec![
            budget("Bills", "Bills & Utilities", 120.0),
            budget("Food", "Food & Dining", 80.0),
        ];
        let figures = dashboard_figures(&march(), &budgets);
        assert_eq!(figures.month_spent, 100.0);
        assert_eq!(figures.yearly_spent, 400.0);
        assert_eq!(figures.monthly_budget, 200.0);
        assert_eq!(figures.budget_used, 50.0);
        assert_eq!(figures.top_category.as_deref(), Some("Bills & Utilities"));
        assert_eq!(figures.progress.len(), 2);
        assert_eq!(figures.progress[0].percent, 50.0);
    }

    #[test]
    fn metrics_cover_every_card_and_budget() {
        let figures = dashboard_figures(&march(), &[budget("Food", "Food & Dining", 80.0)]);
        let metrics = dashboard_metrics(&figures, "$");
        assert_eq!(
            metrics,
            vec![
                ("Monthly Spending".to_string(), "$100.00".to_string()),
                ("Monthly Budget".to_string(), "$80.00".to_string()),
                ("Budget Used".to_string(), "125.0%".to_string()),
                ("Yearly Spending".to_string(), "$400.00".to_string()),
                ("Top Category".to_string(), "Bills & Utilities".to_string()),
                ("Budget: Food".to_string(), "$40.00 of $80.00 (50.0%)".to_string()),
            ]
        );
    }

    #[test]
    fn no_budget_means_zero_used() {
        let figures = dashboard_figures(&march(), &[]);
        assert_eq!(figures.monthly_budget, 0.0);
        assert_eq!(figures.budget_used, 0.0);
        assert!(figures.progress.is_empty());
    }

    #[test]
    fn export_needs_loaded_figures() {
        assert!(matches!(export(None, "$"), Err(AppError::NothingToExport)));
    }
}
