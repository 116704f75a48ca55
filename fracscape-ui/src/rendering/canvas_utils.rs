use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Resolves on the next animation frame.
///
/// Resolves immediately when there is no window to ask.
pub async fn next_animation_frame() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let (sender, receiver) = futures::channel::oneshot::channel::<()>();

    let closure = Closure::once(move || {
        let _ = sender.send(());
    });

    if let Err(err) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {err:?}");
        return;
    }

    closure.forget();
    let _ = receiver.await;
}

/// Current time in milliseconds, or 0 outside a browser.
pub fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |performance| performance.now())
}

/// Get 2D rendering context from canvas.
pub fn get_2d_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}

/// Draw a `width` x `height` block of RGBA pixels with its top-left corner at (x, y).
pub fn draw_pixels_to_canvas(
    ctx: &CanvasRenderingContext2d,
    pixels: &[u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
) -> Result<(), JsValue> {
    let image_data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels), width, height)?;
    ctx.put_image_data(&image_data, x, y)
}
