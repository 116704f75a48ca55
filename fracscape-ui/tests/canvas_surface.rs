#![cfg(target_arch = "wasm32")]

use fracscape_core::{compute_geometry, DrawingSurface, GeometryPolicy, PixelBuffer};
use fracscape_ui::rendering::{CanvasSurface, GeometryTarget};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

#[wasm_bindgen_test]
fn captures_intrinsic_aspect_ratio() {
    let surface = CanvasSurface::new(canvas(800, 500)).unwrap();
    assert_eq!(surface.intrinsic_aspect_ratio(), 1.6);
}

#[wasm_bindgen_test]
fn apply_geometry_sets_backing_store_and_css_size() {
    let mut surface = CanvasSurface::new(canvas(300, 150)).unwrap();
    let geometry = compute_geometry(400.0, 1.0, 2.0, &GeometryPolicy::default());

    surface.apply_geometry(&geometry).unwrap();

    assert_eq!(surface.size(), (800, 800));
    let style = surface.canvas().style();
    assert_eq!(style.get_property_value("width").unwrap(), "400px");
    assert_eq!(style.get_property_value("height").unwrap(), "400px");
}

#[wasm_bindgen_test]
fn present_rejects_wrong_size() {
    let mut surface = CanvasSurface::new(canvas(4, 4)).unwrap();
    let frame = PixelBuffer::new(2, 2).unwrap();
    assert!(surface.present(&frame).is_err());
}

#[wasm_bindgen_test]
fn present_then_clear() {
    let mut surface = CanvasSurface::new(canvas(2, 2)).unwrap();
    let mut frame = PixelBuffer::new(2, 2).unwrap();
    frame.set_pixel(1, 1, [255, 0, 0, 255]);

    surface.present(&frame).unwrap();
    surface.clear().unwrap();
}
