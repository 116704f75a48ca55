use super::canvas_utils::{draw_pixels_to_canvas, get_2d_context};
use super::GeometryTarget;
use fracscape_core::{DrawingSurface, PixelBuffer, SurfaceGeometry, VizError};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A `<canvas>` element drawn through its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    intrinsic_aspect_ratio: f64,
}

impl CanvasSurface {
    /// Wrap `canvas`, capturing the aspect ratio of its initial attributes.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, VizError> {
        let context = get_2d_context(&canvas).map_err(|e| js_failure("canvas context", e))?;
        let intrinsic_aspect_ratio = if canvas.height() > 0 {
            f64::from(canvas.width()) / f64::from(canvas.height())
        } else {
            f64::NAN
        };

        Ok(Self {
            canvas,
            context,
            intrinsic_aspect_ratio,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawingSurface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) -> Result<(), VizError> {
        let (width, height) = self.size();
        self.context
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
        Ok(())
    }

    fn present(&mut self, pixels: &PixelBuffer) -> Result<(), VizError> {
        if (pixels.width(), pixels.height()) != self.size() {
            return Err(VizError::RenderFailure(format!(
                "frame is {}x{} but canvas is {}x{}",
                pixels.width(),
                pixels.height(),
                self.canvas.width(),
                self.canvas.height()
            )));
        }
        if pixels.width() == 0 || pixels.height() == 0 {
            return Ok(());
        }

        draw_pixels_to_canvas(
            &self.context,
            pixels.data(),
            pixels.width(),
            pixels.height(),
            0.0,
            0.0,
        )
        .map_err(|e| js_failure("putImageData", e))
    }
}

impl GeometryTarget for CanvasSurface {
    fn intrinsic_aspect_ratio(&self) -> f64 {
        self.intrinsic_aspect_ratio
    }

    fn apply_geometry(&mut self, geometry: &SurfaceGeometry) -> Result<(), VizError> {
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", geometry.css_width))
            .and_then(|()| style.set_property("height", &format!("{}px", geometry.css_height)))
            .map_err(|e| js_failure("canvas style", e))?;

        self.canvas.set_width(geometry.device_width);
        self.canvas.set_height(geometry.device_height);
        Ok(())
    }
}

fn js_failure(what: &str, err: JsValue) -> VizError {
    VizError::RenderFailure(format!("{what}: {err:?}"))
}
