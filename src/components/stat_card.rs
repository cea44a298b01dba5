use std::time::Duration;

use yew::platform::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::animation::{format_stat, CountUp, StatKind};
use crate::config::{COUNT_UP_STEPS, COUNT_UP_TICK_MS};
use crate::refresh::RefreshSequencer;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub icon: Html,
    pub value: StatValue,
    pub currency_symbol: String,
    #[prop_or_default]
    pub accent: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatValue {
    Number(f64, StatKind),
    Text(String),
}

/// Dashboard card: numbers count up from zero and the card lifts on hover.
#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let lifted = use_state(|| false);
    let shown = use_state(|| 0.0_f64);
    let runs = use_mut_ref(RefreshSequencer::default);

    {
        let shown = shown.clone();
        use_effect_with_deps(
            move |value: &StatValue| {
                let ticket = runs.borrow_mut().begin();
                if let StatValue::Number(target, _) = value {
                    let mut anim = CountUp::new(*target, COUNT_UP_STEPS);
                    let runs = runs.clone();
                    spawn_local(async move {
                        loop {
                            sleep(Duration::from_millis(COUNT_UP_TICK_MS)).await;
                            // a newer value restarted the count
                            if !runs.borrow().is_current(ticket) {
                                break;
                            }
                            let (current, done) = anim.step();
                            shown.set(current);
                            if done {
                                break;
                            }
                        }
                    });
                }
                move || {
                    runs.borrow_mut().begin();
                }
            },
            props.value.clone(),
        );
    }

    let onmouseenter = {
        let lifted = lifted.clone();
        Callback::from(move |_: MouseEvent| lifted.set(true))
    };
    let onmouseleave = {
        let lifted = lifted.clone();
        Callback::from(move |_: MouseEvent| lifted.set(false))
    };
    let style = if *lifted {
        "transform: translateY(-5px); transition: transform 0.2s;"
    } else {
        "transform: translateY(0); transition: transform 0.2s;"
    };

    let text = match &props.value {
        StatValue::Number(_, kind) => format_stat(*shown, *kind, &props.currency_symbol),
        StatValue::Text(text) => text.clone(),
    };

    html! {
        <div class="stat-card bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start" {style} {onmouseenter} {onmouseleave}>
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class={classes!("stat-value", "text-2xl", "font-bold", "tracking-tight", props.accent)}>{ text }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                { props.icon.clone() }
            </div>
        </div>
    }
}
