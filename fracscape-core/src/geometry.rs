//! Layout size versus backing-store size of the drawing surface.

/// CSS size and backing-store size of a drawing surface.
///
/// `device_width / device_height == css_width / css_height` holds exactly up to
/// floating point rounding, and both device dimensions are whole pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    pub css_width: f64,
    pub css_height: f64,
    pub device_width: u32,
    pub device_height: u32,
    pub device_pixel_ratio: f64,
}

impl SurfaceGeometry {
    fn empty(device_pixel_ratio: f64) -> Self {
        Self {
            css_width: 0.0,
            css_height: 0.0,
            device_width: 0,
            device_height: 0,
            device_pixel_ratio,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.device_width == 0 || self.device_height == 0
    }

    pub fn css_aspect_ratio(&self) -> Option<f64> {
        (self.css_height > 0.0).then(|| self.css_width / self.css_height)
    }

    pub fn device_aspect_ratio(&self) -> Option<f64> {
        (self.device_height > 0).then(|| self.device_width as f64 / self.device_height as f64)
    }
}

/// Layout choices that are configuration rather than measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryPolicy {
    /// Fraction of the container width the surface occupies.
    pub presentation_factor: f64,
    /// Used when the surface has no usable intrinsic aspect ratio.
    pub default_aspect_ratio: f64,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self {
            presentation_factor: 1.0,
            default_aspect_ratio: 1.0,
        }
    }
}

/// Compute the surface geometry for a container of `container_width` CSS pixels.
///
/// The device height is derived from the rounded device width and the CSS
/// height from the device dimensions, so both sizes share one aspect ratio.
pub fn compute_geometry(
    container_width: f64,
    intrinsic_aspect_ratio: f64,
    device_pixel_ratio: f64,
    policy: &GeometryPolicy,
) -> SurfaceGeometry {
    let dpr = if device_pixel_ratio.is_finite() {
        device_pixel_ratio.max(1.0)
    } else {
        1.0
    };
    let aspect = [intrinsic_aspect_ratio, policy.default_aspect_ratio]
        .into_iter()
        .find(|ratio| is_positive(*ratio))
        .unwrap_or(1.0);
    let factor = if is_positive(policy.presentation_factor) {
        policy.presentation_factor
    } else {
        1.0
    };

    if !is_positive(container_width) {
        return SurfaceGeometry::empty(dpr);
    }

    let css_width = container_width * factor;
    let device_width = (dpr * css_width).round() as u32;
    if device_width == 0 {
        return SurfaceGeometry::empty(dpr);
    }
    let device_height = (device_width as f64 / aspect).round().max(1.0) as u32;
    let css_height = css_width * device_height as f64 / device_width as f64;

    SurfaceGeometry {
        css_width,
        css_height,
        device_width,
        device_height,
        device_pixel_ratio: dpr,
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
