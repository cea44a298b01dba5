use yew::prelude::*;

use crate::components::icons::{icon_bar_chart, icon_credit_card, icon_layout_grid};
use crate::config::{save_settings, AppSettings, CURRENCIES};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Dashboard,
    Expenses,
    Analytics,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Expenses, Page::Analytics];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Expenses => "Expenses",
            Page::Analytics => "Analytics",
        }
    }

    fn icon(self) -> Html {
        match self {
            Page::Dashboard => icon_layout_grid(),
            Page::Expenses => icon_credit_card(),
            Page::Analytics => icon_bar_chart(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active_page: Page,
    pub on_select: Callback<Page>,
}

/// Sidebar, currency header and the scrolling page area.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen flex bg-background">
            <aside class="hidden md:block shrink-0">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </aside>
            <div class="flex-1 min-w-0 flex flex-col h-screen">
                <Header page={props.active_page} />
                <main class="container flex-1 overflow-y-auto">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    page: Page,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let current = settings
        .as_ref()
        .map(|s| s.currency_code.clone())
        .unwrap_or_else(|| AppSettings::default().currency_code);

    let on_currency_change = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            let Some(settings) = settings.as_ref() else {
                return;
            };
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let next = AppSettings::for_currency(&input.value());
            save_settings(&next);
            log::info!("display currency set to {}", next.currency_code);
            settings.set(next);
        })
    };

    html! {
        <header class="h-16 px-6 flex items-center gap-4 bg-[#D8E1E8] border-b border-border">
            <span class="md:hidden text-[#173E63] font-bold">{ props.page.label() }</span>
            <label class="ml-auto flex items-center gap-2 text-xs font-bold uppercase tracking-widest text-[#173E63]">
                {"Currency"}
                <select onchange={on_currency_change} class="px-3 py-1.5 bg-white border border-border rounded-lg text-sm normal-case tracking-normal">
                    { for CURRENCIES.iter().map(|(code, label)| html! {
                        <option value={*code} selected={*code == current.as_str()}>{ *label }</option>
                    }) }
                </select>
            </label>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_button = |page: Page| {
        let active = page == props.active_page;
        let on_select = props.on_select.clone();
        let class = classes!(
            "w-full", "flex", "items-center", "gap-3", "px-4", "py-3", "rounded-xl", "text-[13px]",
            "font-medium", "transition-all",
            if active {
                classes!("bg-[#B2CBDE]", "text-[#173E63]")
            } else {
                classes!("text-slate-300", "hover:bg-white/5", "hover:text-white")
            }
        );
        html! {
            <li>
                <button type="button" {class} aria-current={active.then_some("page")} onclick={Callback::from(move |_| on_select.emit(page))}>
                    { page.icon() }
                    <span class="truncate">{ page.label() }</span>
                </button>
            </li>
        }
    };

    html! {
        <nav class="w-[220px] h-screen p-4 flex flex-col gap-8 bg-[#D8E1E8]">
            <span class="px-2 text-[#173E63] text-2xl font-black tracking-tight">{"Expense Tracker"}</span>
            <ul class="flex-1 py-6 px-3 space-y-2 bg-[#173E63] rounded-[24px] shadow-lg">
                { for Page::ALL.into_iter().map(nav_button) }
            </ul>
        </nav>
    }
}

/// Common page frame: a title row with page actions above the page body.
pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <section class="max-w-7xl mx-auto p-6 space-y-6">
            <header class="flex flex-wrap items-center justify-between gap-3 pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </header>
            { children }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_lists_every_page_once() {
        let labels: Vec<_> = Page::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Dashboard", "Expenses", "Analytics"]);
    }
}
