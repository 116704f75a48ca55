//! Draws a projected point set into an RGBA pixel buffer.

use crate::{upper_envelope, PointSet, Projection};
use fracscape_core::{PixelBuffer, ViewParameters, VizError};

/// Presentation constants for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterStyle {
    /// Unbounded views span this fraction of the surface's shorter side.
    pub scale: f64,
    /// Bounded views keep this fraction of each side free on every edge.
    pub margin: f64,
    /// Surface pixels along the shorter side per unit of dot radius.
    pub pixels_per_dot_radius: u32,
    /// Translucent color of the upper envelope drawn over bounded views.
    pub envelope_color: [u8; 4],
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            scale: 0.7,
            margin: 0.05,
            pixels_per_dot_radius: 400,
            envelope_color: [255, 0, 0, 26],
        }
    }
}

/// Gray level for a height, darker towards the bottom of the range.
pub fn graymap(height: f64, max_height: f64) -> [u8; 4] {
    let gray = if max_height > 0.0 {
        (512.0 * (height / max_height).powi(3)).clamp(0.0, 255.0) as u8
    } else {
        0
    };
    [gray, gray, gray, 255]
}

/// Maps view space onto surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScreenFrame {
    pixels_per_unit: f64,
    center: [f64; 2],
    origin: [f64; 2],
}

impl ScreenFrame {
    fn centered(width: u32, height: u32, scale: f64) -> Self {
        Self {
            pixels_per_unit: scale * f64::from(width.min(height)),
            center: [0.0, 0.0],
            origin: [f64::from(width) / 2.0, f64::from(height) / 2.0],
        }
    }

    /// Fit the extent of `projected` inside the surface less its margins.
    fn fitted(projected: &[[f64; 3]], width: u32, height: u32, margin: f64) -> Self {
        let (mut min, mut max) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for [h, v, _] in projected.iter().filter(|p| p.iter().all(|c| c.is_finite())) {
            min = [min[0].min(*h), min[1].min(*v)];
            max = [max[0].max(*h), max[1].max(*v)];
        }

        let usable = 1.0 - 2.0 * margin.clamp(0.0, 0.45);
        if min[0] > max[0] {
            return Self::centered(width, height, usable);
        }
        let span_x = (max[0] - min[0]).max(f64::EPSILON);
        let span_y = (max[1] - min[1]).max(f64::EPSILON);
        let pixels_per_unit = (f64::from(width) * usable / span_x)
            .min(f64::from(height) * usable / span_y);

        Self {
            pixels_per_unit,
            center: [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0],
            origin: [f64::from(width) / 2.0, f64::from(height) / 2.0],
        }
    }

    /// Pixel under a view-space position, `None` if it has no finite screen
    /// position.
    fn to_screen(&self, [h, v, _]: [f64; 3]) -> Option<(i64, i64)> {
        let sx = self.origin[0] + (h - self.center[0]) * self.pixels_per_unit;
        let sy = self.origin[1] - (v - self.center[1]) * self.pixels_per_unit;
        (sx.is_finite() && sy.is_finite()).then(|| (sx.floor() as i64, sy.floor() as i64))
    }
}

/// Pixels covered by a square dot of `radius` around `(cx, cy)`, clipped to
/// the surface.
fn dot_pixels(
    (cx, cy): (i64, i64),
    radius: i64,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let ys = (cy - radius).max(0)..=(cy + radius).min(i64::from(height) - 1);
    ys.flat_map(move |y| {
        let xs = (cx - radius).max(0)..=(cx + radius).min(i64::from(width) - 1);
        xs.map(move |x| (x as u32, y as u32))
    })
}

/// Per-pixel depth, farthest possible to start with.
fn depth_buffer(pixels: usize) -> Result<Vec<f64>, VizError> {
    let mut depth = Vec::new();
    depth.try_reserve_exact(pixels).map_err(|e| {
        VizError::RenderFailure(format!("cannot allocate depth for {pixels} pixels: {e}"))
    })?;
    depth.resize(pixels, f64::NEG_INFINITY);
    Ok(depth)
}

/// Render the first `view.iteration_count` points of `points` into a new
/// `width` x `height` buffer.
///
/// The buffer starts transparent; nearer points overwrite farther ones.
/// Bounded views also get the translucent upper envelope of the drawn prefix,
/// and are fitted so both the points and the envelope stay inside the margin.
pub fn rasterize(
    points: &PointSet,
    view: &ViewParameters,
    width: u32,
    height: u32,
    style: &RasterStyle,
) -> Result<PixelBuffer, VizError> {
    let mut buffer = PixelBuffer::new(width, height)?;
    let projection = Projection::new(view.pitch, view.yaw, points.max_height())?;

    let drawn = points.prefix(view.iteration_count);
    if drawn.is_empty() || width == 0 || height == 0 {
        return Ok(buffer);
    }

    let projected: Vec<[f64; 3]> = drawn.iter().map(|p| projection.to_view(p)).collect();
    let envelope: Vec<[f64; 3]> = if view.bounded {
        upper_envelope(points, view.iteration_count)
            .iter()
            .map(|p| projection.to_view(p))
            .collect()
    } else {
        Vec::new()
    };

    let frame = if view.bounded {
        let extent: Vec<[f64; 3]> = projected.iter().chain(&envelope).copied().collect();
        ScreenFrame::fitted(&extent, width, height, style.margin)
    } else {
        ScreenFrame::centered(width, height, style.scale)
    };

    let radius = i64::from(width.min(height) / style.pixels_per_dot_radius.max(1));
    let mut depth = depth_buffer(width as usize * height as usize)?;

    for (point, view_pos) in drawn.iter().zip(&projected) {
        let Some(center) = frame.to_screen(*view_pos) else {
            continue;
        };
        let color = graymap(point.height, points.max_height());
        for (x, y) in dot_pixels(center, radius, width, height) {
            let slot = y as usize * width as usize + x as usize;
            if view_pos[2] > depth[slot] {
                depth[slot] = view_pos[2];
                buffer.set_pixel(x, y, color);
            }
        }
    }

    for view_pos in &envelope {
        let Some(center) = frame.to_screen(*view_pos) else {
            continue;
        };
        for (x, y) in dot_pixels(center, radius, width, height) {
            buffer.blend_pixel(x, y, style.envelope_color);
        }
    }

    Ok(buffer)
}
