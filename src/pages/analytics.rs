//! Analytics page: year/month filters, the two charts and the summary cards.
//!
//! Each filter change starts a refresh under a new ticket. Only the refresh
//! holding the latest ticket may touch the page state, so a slow response
//! for an older selection can never overwrite a newer one.

use yew::prelude::*;

use crate::api;
use crate::charts::{category_doughnut_config, monthly_line_config, RenderTarget};
use crate::components::feedback::{AlertAction, AlertSlot, ErrorBanner, LoadingOverlay};
use crate::components::icons::{icon_award, icon_calendar, icon_dollar, icon_download, icon_pie_chart, icon_trending_up};
use crate::components::layout::page_shell;
use crate::config::AppSettings;
use crate::dates::{current_year_month, selectable_years};
use crate::error::{AppError, Result};
use crate::export::{analytics_csv, analytics_filename, download_csv};
use crate::format::format_currency;
use crate::models::{AnalyticsData, MONTH_NAMES};
use crate::refresh::{RefreshSequencer, Settled};
use crate::summary::summarize;

const LOAD_FAILED: &str = "Failed to load analytics data. Please try again.";
const EXPORT_FAILED: &str = "Failed to export analytics data.";

fn export(data: Option<&AnalyticsData>) -> Result<()> {
    let data = data.ok_or(AppError::NothingToExport)?;
    let csv = analytics_csv(data)?;
    download_csv(&analytics_filename(data.year, data.month), &csv)
}

#[function_component(AnalyticsPage)]
pub fn analytics_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol);

    let selection = use_state(current_year_month);
    let data = use_state(|| None::<AnalyticsData>);
    let loading = use_state(|| false);
    let alerts = use_reducer(AlertSlot::default);
    let sequencer = use_mut_ref(RefreshSequencer::default);
    let monthly_target = use_mut_ref(|| RenderTarget::new("monthlyChart"));
    let category_target = use_mut_ref(|| RenderTarget::new("categoryChart"));

    {
        let data = data.clone();
        let loading = loading.clone();
        let alerts = alerts.dispatcher();
        let sequencer = sequencer.clone();
        use_effect_with_deps(
            move |&(year, month): &(i32, u32)| {
                let ticket = sequencer.borrow_mut().begin();
                loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api::fetch_analytics(year, month).await;
                    let outcome = sequencer.borrow().settle(ticket, result);
                    match outcome {
                        Settled::Stale => {
                            log::debug!("dropping stale analytics for {}-{}", year, month);
                        }
                        Settled::Loaded(loaded) => {
                            loading.set(false);
                            log::info!(
                                "analytics loaded for {}-{}: {} months, {} categories",
                                year,
                                month,
                                loaded.monthly.len(),
                                loaded.breakdown.len()
                            );
                            data.set(Some(loaded));
                        }
                        Settled::Failed(e) => {
                            loading.set(false);
                            log::error!("Error updating charts: {}", e);
                            alerts.dispatch(AlertAction::Raise(LOAD_FAILED.to_string()));
                        }
                    }
                });
                || ()
            },
            *selection,
        );
    }

    // draw after the canvases for the new data are in the DOM
    {
        let monthly_target = monthly_target.clone();
        let category_target = category_target.clone();
        use_effect_with_deps(
            move |data: &Option<AnalyticsData>| {
                if let Some(data) = data {
                    if let Err(e) = monthly_target
                        .borrow_mut()
                        .render(&monthly_line_config(&data.monthly))
                    {
                        log::warn!("monthly chart not drawn: {}", e);
                    }
                    let mut category = category_target.borrow_mut();
                    if data.breakdown.is_empty() {
                        category.clear();
                    } else if let Err(e) = category.render(&category_doughnut_config(&data.breakdown, 11)) {
                        log::warn!("category chart not drawn: {}", e);
                    }
                }
                || ()
            },
            (*data).clone(),
        );
    }

    // charts go away with the page
    {
        use_effect_with_deps(
            move |_| {
                move || {
                    monthly_target.borrow_mut().clear();
                    category_target.borrow_mut().clear();
                }
            },
            (),
        );
    }

    let (year, month) = *selection;

    let on_year = {
        let selection = selection.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = input.value().parse::<i32>() {
                selection.set((year, selection.1));
            }
        })
    };
    let on_month = {
        let selection = selection.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = input.value().parse::<u32>() {
                selection.set((selection.0, month));
            }
        })
    };

    let on_export = {
        let data = data.clone();
        let alerts = alerts.dispatcher();
        Callback::from(move |_| {
            if let Err(e) = export((*data).as_ref()) {
                log::error!("Error exporting analytics: {}", e);
                alerts.dispatch(AlertAction::Raise(EXPORT_FAILED.to_string()));
            }
        })
    };

    let on_dismiss = {
        let alerts = alerts.dispatcher();
        Callback::from(move |id: u64| alerts.dispatch(AlertAction::Dismiss(id)))
    };

    let (current_year, _) = current_year_month();
    let mut years = selectable_years(current_year, 5);
    if !years.contains(&year) {
        years.push(year);
    }

    let summary = data
        .as_ref()
        .map(|d| summarize(&d.monthly, &d.breakdown, d.month));
    let breakdown_empty = data.as_ref().map(|d| d.breakdown.is_empty()).unwrap_or(false);

    html! {
        <>
            <LoadingOverlay visible={*loading} label="Loading analytics..." />
            { page_shell(
                "Analytics",
                html! {
                    <button onclick={on_export} class="flex items-center gap-2 border border-primary text-primary px-3 py-1.5 rounded-xl font-bold text-sm hover:bg-primary/10 transition-all">
                        { icon_download() }
                        {"Export"}
                    </button>
                },
                html! {
                    <>
                        <ErrorBanner alert={alerts.current.clone()} {on_dismiss} />

                        <div class="flex flex-wrap gap-3">
                            <select id="yearSelect" onchange={on_year} class="px-3 py-2 bg-white border border-border rounded-lg text-sm">
                                { for years.iter().map(|y| html! {
                                    <option value={y.to_string()} selected={*y == year}>{ y.to_string() }</option>
                                }) }
                            </select>
                            <select id="monthSelect" onchange={on_month} class="px-3 py-2 bg-white border border-border rounded-lg text-sm">
                                { for MONTH_NAMES.iter().enumerate().map(|(idx, name)| {
                                    let m = idx as u32 + 1;
                                    html! { <option value={m.to_string()} selected={m == month}>{ *name }</option> }
                                }) }
                            </select>
                        </div>

                        <div id="summaryCards" class="grid grid-cols-1 md:grid-cols-4 gap-6">
                            {
                                if let Some(stats) = &summary {
                                    html! {
                                        <>
                                            { summary_card(icon_calendar(), "text-primary", format_currency(stats.yearly_total, &currency_symbol), "Total Yearly Spending") }
                                            { summary_card(icon_trending_up(), "text-green-600", format_currency(stats.monthly_average, &currency_symbol), "Average Monthly") }
                                            { summary_card(icon_dollar(), "text-sky-600", format_currency(stats.selected_month_total, &currency_symbol), "Selected Month") }
                                            { summary_card(icon_award(), "text-amber-500", stats.top_category.clone().unwrap_or_else(|| "N/A".to_string()), "Top Category") }
                                        </>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>

                        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                            <div class="lg:col-span-2 bg-card rounded-[10px] p-6 border border-border">
                                <h3 class="font-bold text-foreground text-lg mb-3">{"Monthly Spending Trend"}</h3>
                                <div class="relative h-72">
                                    <canvas id="monthlyChart"></canvas>
                                </div>
                            </div>
                            <div class="bg-card rounded-[10px] p-6 border border-border">
                                <h3 class="font-bold text-foreground text-lg mb-3">{"Category Breakdown"}</h3>
                                <div class="relative h-72">
                                    {
                                        if breakdown_empty {
                                            html! {
                                                <div class="h-full flex flex-col items-center justify-center text-muted-foreground">
                                                    { icon_pie_chart() }
                                                    <p class="mt-3 text-sm">{"No expenses for selected period"}</p>
                                                </div>
                                            }
                                        } else {
                                            html! { <canvas id="categoryChart"></canvas> }
                                        }
                                    }
                                </div>
                            </div>
                        </div>
                    </>
                }
            ) }
        </>
    }
}

fn summary_card(icon: Html, accent: &'static str, value: String, label: &'static str) -> Html {
    html! {
        <div class="stat-card bg-card rounded-[10px] p-6 border border-border text-center">
            <div class={classes!("flex", "justify-center", "mb-2", accent)}>{ icon }</div>
            <h5 class={classes!("text-xl", "font-bold", accent)}>{ value }</h5>
            <small class="text-muted-foreground">{ label }</small>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryBreakdownPoint, MonthlySpendingPoint};
    use crate::refresh::RefreshTicket;

    fn loaded(year: i32, amount: f64) -> AnalyticsData {
        AnalyticsData {
            year,
            month: 1,
            monthly: vec![MonthlySpendingPoint {
                month: "Jan".to_string(),
                amount,
            }],
            breakdown: vec![CategoryBreakdownPoint {
                category: "Other".to_string(),
                amount,
                color: "#95a5a6".to_string(),
            }],
        }
    }

    fn shown_after(
        seq: &RefreshSequencer,
        finished: Vec<(RefreshTicket, Result<AnalyticsData>)>,
    ) -> Option<AnalyticsData> {
        let mut shown = None;
        for (ticket, result) in finished {
            if let Settled::Loaded(data) = seq.settle(ticket, result) {
                shown = Some(data);
            }
        }
        shown
    }

    #[test]
    fn newer_year_stays_when_older_response_lands_last() {
        let mut seq = RefreshSequencer::default();
        let year_a = seq.begin();
        let year_b = seq.begin();
        let shown = shown_after(&seq, vec![(year_b, Ok(loaded(2024, 20.0))), (year_a, Ok(loaded(2023, 10.0)))]);
        assert_eq!(shown.map(|d| d.year), Some(2024));
    }

    #[test]
    fn newer_year_stays_when_older_response_lands_first() {
        let mut seq = RefreshSequencer::default();
        let year_a = seq.begin();
        let year_b = seq.begin();
        let shown = shown_after(&seq, vec![(year_a, Ok(loaded(2023, 10.0))), (year_b, Ok(loaded(2024, 20.0)))]);
        assert_eq!(shown.map(|d| d.year), Some(2024));
    }

    #[test]
    fn stale_failure_raises_no_banner() {
        let mut seq = RefreshSequencer::default();
        let year_a = seq.begin();
        let _year_b = seq.begin();
        assert!(matches!(
            seq.settle::<AnalyticsData>(year_a, Err(AppError::Status { url: "x".into(), status: 500 })),
            Settled::Stale
        ));
    }

    #[test]
    fn export_needs_loaded_data() {
        assert!(matches!(export(None), Err(AppError::NothingToExport)));
    }
}
