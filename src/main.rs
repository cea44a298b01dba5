use yew::prelude::*;

mod animation;
mod api;
mod budget;
mod charts;
mod components;
mod config;
mod dates;
mod error;
mod export;
mod format;
mod models;
mod pages;
mod refresh;
mod search;
mod summary;
mod validation;

use components::layout::{Layout, Page};
use config::{load_settings, AppSettings};
use pages::analytics::AnalyticsPage;
use pages::dashboard::DashboardPage;
use pages::expenses::ExpensesPage;

#[function_component(App)]
fn app() -> Html {
    let active_page = use_state(|| Page::Dashboard);
    let settings = use_state(load_settings);
    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| {
            log::debug!("navigating to {:?}", page);
            active_page.set(page)
        })
    };

    let content = match *active_page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Expenses => html! { <ExpensesPage /> },
        Page::Analytics => html! { <AnalyticsPage /> },
    };

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <Layout active_page={*active_page} on_select={on_select}>
                { content }
            </Layout>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("expense tracker starting, api base {:?}", config::API_BASE_URL);
    yew::Renderer::<App>::new().render();
}
