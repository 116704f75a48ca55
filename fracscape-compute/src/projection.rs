//! Orthographic projection of surface points into view space.

use crate::SurfacePoint;
use fracscape_core::VizError;

/// Side length of the `u32` grid.
const GRID_EXTENT: f64 = 4_294_967_296.0;

/// Rotation by yaw about the vertical axis, then pitch about the screen's
/// horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    cos_yaw: f64,
    sin_yaw: f64,
    cos_pitch: f64,
    sin_pitch: f64,
    max_height: f64,
}

impl Projection {
    pub fn new(pitch: f64, yaw: f64, max_height: f64) -> Result<Self, VizError> {
        if !pitch.is_finite() || !yaw.is_finite() {
            return Err(VizError::RenderFailure(format!(
                "view angles must be finite, got pitch {pitch} and yaw {yaw}"
            )));
        }
        Ok(Self {
            cos_yaw: yaw.cos(),
            sin_yaw: yaw.sin(),
            cos_pitch: pitch.cos(),
            sin_pitch: pitch.sin(),
            max_height,
        })
    }

    /// Map a point to `[horizontal, vertical, depth]`.
    ///
    /// The grid and the height range both normalize to `[-0.5, 0.5]` before
    /// rotation. Vertical grows upwards and larger depth is nearer the viewer.
    pub fn to_view(&self, point: &SurfacePoint) -> [f64; 3] {
        let u = point.x as f64 / GRID_EXTENT - 0.5;
        let w = point.z as f64 / GRID_EXTENT - 0.5;
        let v = if self.max_height > 0.0 {
            point.height / self.max_height - 0.5
        } else {
            0.0
        };

        let horizontal = u * self.cos_yaw - w * self.sin_yaw;
        let toward = u * self.sin_yaw + w * self.cos_yaw;

        let vertical = v * self.cos_pitch - toward * self.sin_pitch;
        let depth = v * self.sin_pitch + toward * self.cos_pitch;

        [horizontal, vertical, depth]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUARTER: u32 = 1 << 30;
    const HALF: u32 = 1 << 31;

    fn point(x: u32, z: u32, height: f64) -> SurfacePoint {
        SurfacePoint {
            x,
            z,
            height,
            level: 0,
        }
    }

    fn assert_close(actual: [f64; 3], expected: [f64; 3]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn grid_center_at_mid_height_maps_to_origin() {
        let projection = Projection::new(0.7, 1.3, 10.0).unwrap();
        assert_close(projection.to_view(&point(HALF, HALF, 5.0)), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn front_view_shows_height_as_vertical() {
        let projection = Projection::new(0.0, 0.0, 10.0).unwrap();
        assert_close(
            projection.to_view(&point(QUARTER, HALF, 10.0)),
            [-0.25, 0.5, 0.0],
        );
    }

    #[test]
    fn top_down_view_shows_depth_as_height() {
        let projection = Projection::new(std::f64::consts::FRAC_PI_2, 0.0, 10.0).unwrap();
        let [_, vertical, depth] = projection.to_view(&point(HALF, HALF + QUARTER, 10.0));
        assert!((vertical + 0.25).abs() < 1e-9);
        assert!((depth - 0.5).abs() < 1e-9);
    }

    #[test]
    fn yaw_quarter_turn_swaps_axes() {
        let projection = Projection::new(0.0, std::f64::consts::FRAC_PI_2, 10.0).unwrap();
        let [horizontal, _, depth] = projection.to_view(&point(HALF + QUARTER, HALF, 5.0));
        assert!(horizontal.abs() < 1e-9);
        assert!((depth - 0.25).abs() < 1e-9);
    }

    #[test]
    fn flat_surface_projects_to_zero_height() {
        let projection = Projection::new(0.0, 0.0, 0.0).unwrap();
        let [_, vertical, _] = projection.to_view(&point(0, HALF, 0.0));
        assert_eq!(vertical, 0.0);
    }

    #[test]
    fn non_finite_angles_fail() {
        assert!(Projection::new(f64::NAN, 0.0, 1.0).is_err());
        assert!(Projection::new(0.0, f64::INFINITY, 1.0).is_err());
    }
}
