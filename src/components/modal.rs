use yew::prelude::*;

use crate::components::icons::icon_x;
use crate::validation::{Field, FieldErrors};

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub id: &'static str,
    pub title: &'static str,
    pub open: bool,
    pub on_close: Callback<()>,
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    html! {
        <div id={props.id} class="modal fixed inset-0 z-50 flex items-center justify-center" style="background-color: rgba(0, 0, 0, 0.4);">
            <div class="w-full max-w-md bg-white rounded-2xl shadow-lg p-6">
                <div class="flex items-center justify-between mb-4">
                    <h4 class="text-[#173E63] font-bold text-lg">{ props.title }</h4>
                    <button type="button" class="p-1 hover:opacity-70" aria-label="Close" onclick={on_close}>{ icon_x() }</button>
                </div>
                { for props.children.iter() }
            </div>
        </div>
    }
}

pub fn input_class(errors: &FieldErrors, field: Field) -> Classes {
    let mut class = classes!("w-full", "bg-[#f1f4f9]", "rounded-[10px]", "px-3", "py-2", "text-sm", "text-[#173E63]", "border");
    if errors.contains_key(&field) {
        class.push("is-invalid border-red-500");
    } else {
        class.push("border-transparent");
    }
    class
}

pub fn field_error(errors: &FieldErrors, field: Field) -> Html {
    match errors.get(&field) {
        Some(msg) => html! { <div class="invalid-feedback text-xs text-red-500 mt-1">{ *msg }</div> },
        None => html! {},
    }
}
