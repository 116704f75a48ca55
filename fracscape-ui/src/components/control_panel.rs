use crate::components::ParamControl;
use crate::config::VisualizerConfig;
use fracscape_core::{ParamField, RawValue};
use leptos::*;

#[component]
pub fn ControlPanel(
    config: &'static VisualizerConfig,
    on_input: Callback<(ParamField, RawValue)>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-2 w-full max-w-md">
            {config
                .controls
                .iter()
                .map(|control| view! { <ParamControl control=control on_input=on_input/> })
                .collect_view()}
        </div>
    }
}
