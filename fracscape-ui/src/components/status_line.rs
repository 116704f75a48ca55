use crate::rendering::RenderStatus;
use leptos::*;

/// Progress text for the last render.
#[component]
pub fn StatusLine(#[prop(into)] status: Signal<RenderStatus>) -> impl IntoView {
    let class = move || {
        if status.with(RenderStatus::is_error) {
            "text-red-400 text-sm"
        } else {
            "text-neutral-300 text-sm"
        }
    };

    view! { <p class=class>{move || status.get().to_string()}</p> }
}
