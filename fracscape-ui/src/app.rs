use crate::components::{ControlPanel, StatusLine};
use crate::config::{default_config, VisualizerConfig};
use crate::rendering::{
    next_animation_frame, notify_input, notify_resize, notify_setup, performance_now,
    CanvasSurface, FrameDriver, RenderStatus, SharedDriver,
};
use fracscape_compute::NoiseBridge;
use fracscape_core::{ParamField, RawValue, VizError};
use leptos::*;
use leptos_use::{use_device_pixel_ratio, use_event_listener, use_resize_observer, use_window};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

type Driver = SharedDriver<NoiseBridge, CanvasSurface>;

fn create_driver(
    config: &'static VisualizerConfig,
    canvas: HtmlCanvasElement,
    set_status: WriteSignal<RenderStatus>,
) -> Result<Driver, VizError> {
    let surface = CanvasSurface::new(canvas)?;
    let store = config.parameter_store()?;
    let bridge = NoiseBridge::new(config.generator_config());

    Ok(Rc::new(RefCell::new(FrameDriver::new(
        store,
        bridge,
        surface,
        config.geometry_policy(),
        move |status: RenderStatus| set_status.set(status),
        performance_now,
    ))))
}

#[component]
pub fn App() -> impl IntoView {
    let config = default_config();

    let container_ref = create_node_ref::<html::Div>();
    let canvas_ref = create_node_ref::<html::Canvas>();
    let (status, set_status) = create_signal(RenderStatus::Loaded);
    let driver = store_value(None::<Driver>);
    let pixel_ratio = use_device_pixel_ratio();

    let container_width = move || {
        container_ref
            .get_untracked()
            .map_or(0.0, |el| f64::from(el.offset_width()))
    };

    // ========== Setup: build the driver once the canvas exists ==========
    create_effect(move |_| {
        let Some(canvas_el) = canvas_ref.get() else {
            return;
        };
        if driver.with_value(Option::is_some) {
            return;
        }

        let canvas = canvas_el.unchecked_ref::<HtmlCanvasElement>().clone();
        match create_driver(config, canvas, set_status) {
            Ok(shared) => {
                driver.set_value(Some(Rc::clone(&shared)));
                // Layout is only measurable once the canvas is in the document.
                spawn_local(async move {
                    next_animation_frame().await;
                    notify_setup(&shared, container_width(), pixel_ratio.get_untracked());
                });
            }
            Err(err) => {
                log::error!("{err}");
                set_status.set(RenderStatus::failed(&err));
            }
        }
    });

    // ========== Layout changes ==========
    let on_layout_change = move || {
        driver.with_value(|shared| {
            if let Some(shared) = shared {
                notify_resize(shared, container_width(), pixel_ratio.get_untracked());
            }
        });
    };

    let _ = use_event_listener(use_window(), ev::resize, move |_| on_layout_change());

    // The container also grows with the canvas; only width changes matter.
    let observed_width = store_value(0.0_f64);
    use_resize_observer(container_ref, move |_, _| {
        let width = container_width();
        if width != observed_width.get_value() {
            observed_width.set_value(width);
            on_layout_change();
        }
    });

    create_effect(move |previous: Option<f64>| {
        let ratio = pixel_ratio.get();
        if previous.is_some_and(|previous| previous != ratio) {
            on_layout_change();
        }
        ratio
    });

    // ========== Control input ==========
    let on_input = Callback::new(move |(field, raw): (ParamField, RawValue)| {
        driver.with_value(|shared| {
            if let Some(shared) = shared {
                notify_input(shared, field, raw);
            }
        });
    });

    view! {
        <div class="min-h-screen flex flex-col items-center gap-4 p-4 bg-neutral-900 text-white">
            <h1 class="text-lg">{config.display_name}</h1>
            <ControlPanel config=config on_input=on_input/>
            <StatusLine status=status/>
            <div node_ref=container_ref class="w-full flex justify-center">
                <canvas
                    node_ref=canvas_ref
                    class="block"
                    width=config.canvas_width.to_string()
                    height=config.canvas_height.to_string()
                />
            </div>
        </div>
    }
}
