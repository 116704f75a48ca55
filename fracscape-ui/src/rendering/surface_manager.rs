use fracscape_core::{compute_geometry, GeometryPolicy, SurfaceGeometry, VizError};

/// Something whose CSS size and backing store can be set together.
pub trait GeometryTarget {
    /// Width over height of the surface before any resize.
    fn intrinsic_aspect_ratio(&self) -> f64;

    fn apply_geometry(&mut self, geometry: &SurfaceGeometry) -> Result<(), VizError>;
}

/// Keeps a drawing surface's backing store in step with its layout size.
///
/// Only layout events go through here. Changing the backing-store size
/// discards the drawing, so view-only changes must never call [`apply`].
///
/// [`apply`]: SurfaceManager::apply
#[derive(Debug)]
pub struct SurfaceManager {
    policy: GeometryPolicy,
    current: Option<SurfaceGeometry>,
}

impl SurfaceManager {
    pub fn new(policy: GeometryPolicy) -> Self {
        Self {
            policy,
            current: None,
        }
    }

    pub fn policy(&self) -> &GeometryPolicy {
        &self.policy
    }

    /// Geometry last applied to the target.
    pub fn current(&self) -> Option<&SurfaceGeometry> {
        self.current.as_ref()
    }

    pub fn compute_geometry(
        &self,
        container_width: f64,
        intrinsic_aspect_ratio: f64,
        device_pixel_ratio: f64,
    ) -> SurfaceGeometry {
        compute_geometry(
            container_width,
            intrinsic_aspect_ratio,
            device_pixel_ratio,
            &self.policy,
        )
    }

    /// Size `target` to `geometry`. Returns false without touching the
    /// target when it already has that geometry.
    pub fn apply<T: GeometryTarget + ?Sized>(
        &mut self,
        target: &mut T,
        geometry: SurfaceGeometry,
    ) -> Result<bool, VizError> {
        if self.current == Some(geometry) {
            return Ok(false);
        }
        target.apply_geometry(&geometry)?;
        log::debug!(
            "Surface {}x{} css, {}x{} device at {}x",
            geometry.css_width,
            geometry.css_height,
            geometry.device_width,
            geometry.device_height,
            geometry.device_pixel_ratio
        );
        self.current = Some(geometry);
        Ok(true)
    }

    /// Recompute the geometry for the current layout and apply it.
    pub fn resize<T: GeometryTarget + ?Sized>(
        &mut self,
        target: &mut T,
        container_width: f64,
        device_pixel_ratio: f64,
    ) -> Result<bool, VizError> {
        let geometry = self.compute_geometry(
            container_width,
            target.intrinsic_aspect_ratio(),
            device_pixel_ratio,
        );
        self.apply(target, geometry)
    }
}
