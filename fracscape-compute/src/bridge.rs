//! Boundary between the render pipeline and the point-set generator.

use crate::{rasterize, FractalNoise, PointSet, RasterStyle, MAX_POINTS};
use fracscape_core::{DrawingSurface, GenerationParameters, ViewParameters, VizError};
use std::rc::Rc;

/// Produces point sets and draws them onto a surface.
///
/// `generate` is deterministic in its parameters. `render` replaces the
/// whole contents of the surface; on failure the surface must not show a
/// partial frame.
pub trait GeneratorBridge {
    type Handle: Clone;

    fn generate(&mut self, params: &GenerationParameters) -> Result<Self::Handle, VizError>;

    fn render(
        &mut self,
        handle: &Self::Handle,
        surface: &mut dyn DrawingSurface,
        view: &ViewParameters,
    ) -> Result<(), VizError>;
}

/// Generation tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Subdivision stops once at least this many points exist.
    pub target_points: usize,
    pub style: RasterStyle,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_points: 16_384,
            style: RasterStyle::default(),
        }
    }
}

/// [`GeneratorBridge`] backed by [`FractalNoise`].
#[derive(Clone, Debug, Default)]
pub struct NoiseBridge {
    config: GeneratorConfig,
}

impl NoiseBridge {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl GeneratorBridge for NoiseBridge {
    type Handle = Rc<PointSet>;

    fn generate(&mut self, params: &GenerationParameters) -> Result<Rc<PointSet>, VizError> {
        let target = self.config.target_points;
        if target == 0 || target > MAX_POINTS {
            return Err(VizError::GenerationFailure(format!(
                "point budget {target} outside 1..={MAX_POINTS}"
            )));
        }

        let mut noise = FractalNoise::new(params)?;
        noise.refine_to(target)?;
        let set = noise.into_point_set();

        log::debug!(
            "Generated {} points over {} levels (seed {})",
            set.len(),
            set.levels(),
            params.seed
        );
        Ok(Rc::new(set))
    }

    fn render(
        &mut self,
        handle: &Rc<PointSet>,
        surface: &mut dyn DrawingSurface,
        view: &ViewParameters,
    ) -> Result<(), VizError> {
        let (width, height) = surface.size();
        let buffer = rasterize(handle, view, width, height, &self.config.style)?;
        surface.present(&buffer)
    }
}
