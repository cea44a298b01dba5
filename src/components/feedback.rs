use std::rc::Rc;
use std::time::Duration;

use yew::platform::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::components::icons::icon_x;
use crate::config::BANNER_DISMISS_MS;

/// A banner message tagged with the id it was raised under.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
}

/// Keeps a single alert slot; ids let a stale auto-dismiss timer miss a newer alert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlertSlot {
    next_id: u64,
    pub current: Option<Alert>,
}

pub enum AlertAction {
    Raise(String),
    Dismiss(u64),
}

impl AlertSlot {
    pub fn apply(&self, action: AlertAction) -> AlertSlot {
        match action {
            AlertAction::Raise(message) => {
                let id = self.next_id + 1;
                AlertSlot {
                    next_id: id,
                    current: Some(Alert { id, message }),
                }
            }
            AlertAction::Dismiss(id) => {
                let mut next = self.clone();
                if next.current.as_ref().map(|a| a.id) == Some(id) {
                    next.current = None;
                }
                next
            }
        }
    }
}

impl Reducible for AlertSlot {
    type Action = AlertAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub alert: Option<Alert>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |alert: &Option<Alert>| {
                if let Some(alert) = alert {
                    let id = alert.id;
                    spawn_local(async move {
                        sleep(Duration::from_millis(BANNER_DISMISS_MS)).await;
                        on_dismiss.emit(id);
                    });
                }
                || ()
            },
            props.alert.clone(),
        );
    }

    let Some(alert) = &props.alert else {
        return html! {};
    };
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        let id = alert.id;
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div role="alert" class="alert alert-danger flex items-center justify-between bg-red-50 border border-red-200 text-red-700 text-sm rounded-[10px] px-4 py-3">
            <span>{ alert.message.clone() }</span>
            <button type="button" class="btn-close p-1 hover:opacity-70" aria-label="Close" onclick={on_close}>
                { icon_x() }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingOverlayProps {
    pub visible: bool,
    #[prop_or("Loading...")]
    pub label: &'static str,
}

#[function_component(LoadingOverlay)]
pub fn loading_overlay(props: &LoadingOverlayProps) -> Html {
    if !props.visible {
        return html! {};
    }
    html! {
        <div id="loadingOverlay" class="fixed inset-0 flex items-center justify-center" style="background-color: rgba(0, 0, 0, 0.5); z-index: 9999;">
            <div class="text-center">
                <div class="w-10 h-10 mx-auto border-4 border-white/30 border-t-white rounded-full animate-spin" role="status"></div>
                <p class="text-white mt-2">{ props.label }</p>
            </div>
        </div>
    }
}
