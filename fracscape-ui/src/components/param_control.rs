//! A single labelled parameter control.

use crate::config::{ControlConfig, ControlKind};
use fracscape_core::{ParamField, RawValue};
use leptos::*;

/// Input for one parameter. Reports every edit as the raw value the control holds.
#[component]
pub fn ParamControl(
    /// Control definition
    control: &'static ControlConfig,
    /// Called with the edited field and its raw value
    on_input: Callback<(ParamField, RawValue)>,
) -> impl IntoView {
    let field = control.field;
    let (shown, set_shown) = create_signal(control.default_value.to_string());

    let report_text = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        set_shown.set(raw.clone());
        on_input.call((field, RawValue::Text(raw)));
    };

    let input = match control.kind {
        ControlKind::Slider => view! {
            <input
                type="range"
                class="flex-1 accent-white"
                prop:min=control.min
                prop:max=control.max
                prop:step=control.step
                value=control.default_value
                on:input=report_text
            />
        }
        .into_view(),
        ControlKind::Text => view! {
            <input
                type="text"
                class="flex-1 bg-neutral-800 text-white text-xs px-1"
                value=control.default_value
                on:input=report_text
            />
        }
        .into_view(),
        ControlKind::Checkbox => {
            let checked = control.default_value == "true";
            view! {
                <input
                    type="checkbox"
                    class="accent-white"
                    prop:checked=checked
                    on:change=move |ev| {
                        on_input.call((field, RawValue::Flag(event_target_checked(&ev))));
                    }
                />
            }
            .into_view()
        }
    };

    let show_value = control.kind == ControlKind::Slider;

    view! {
        <label class="flex items-center gap-2">
            <div class="text-white text-xs w-20">{control.label}</div>
            {input}
            {show_value.then(|| view! {
                <div class="text-white text-xs w-12 text-right">{move || shown.get()}</div>
            })}
        </label>
    }
}
