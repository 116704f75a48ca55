//! Recording fakes for the render pipeline.

use super::{GeometryTarget, RenderStatus};
use fracscape_compute::GeneratorBridge;
use fracscape_core::{
    DrawingSurface, GenerationParameters, MemorySurface, PixelBuffer, SurfaceGeometry,
    ViewParameters, VizError,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub struct FakeSet {
    pub params: GenerationParameters,
}

#[derive(Default)]
pub struct FakeBridge {
    pub generated: Vec<GenerationParameters>,
    pub rendered: Vec<(Rc<FakeSet>, ViewParameters)>,
    pub fail_generate: bool,
    pub fail_render: bool,
}

impl GeneratorBridge for FakeBridge {
    type Handle = Rc<FakeSet>;

    fn generate(&mut self, params: &GenerationParameters) -> Result<Rc<FakeSet>, VizError> {
        self.generated.push(*params);
        if self.fail_generate {
            return Err(VizError::GenerationFailure("out of memory".to_string()));
        }
        Ok(Rc::new(FakeSet { params: *params }))
    }

    fn render(
        &mut self,
        handle: &Rc<FakeSet>,
        surface: &mut dyn DrawingSurface,
        view: &ViewParameters,
    ) -> Result<(), VizError> {
        self.rendered.push((Rc::clone(handle), *view));

        let (width, height) = surface.size();
        let mut frame = PixelBuffer::new(width, height)?;
        frame.set_pixel(0, 0, [255, 255, 255, 255]);
        surface.present(&frame)?;

        if self.fail_render {
            return Err(VizError::RenderFailure("context lost".to_string()));
        }
        Ok(())
    }
}

/// In-memory surface that also records every applied geometry.
pub struct TestSurface {
    pub memory: MemorySurface,
    pub applied: Vec<SurfaceGeometry>,
    pub aspect: f64,
}

impl TestSurface {
    pub fn new(aspect: f64) -> Self {
        Self {
            memory: MemorySurface::new(0, 0),
            applied: Vec::new(),
            aspect,
        }
    }

    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            memory: MemorySurface::new(width, height),
            applied: Vec::new(),
            aspect: f64::from(width) / f64::from(height.max(1)),
        }
    }
}

impl DrawingSurface for TestSurface {
    fn size(&self) -> (u32, u32) {
        self.memory.size()
    }

    fn clear(&mut self) -> Result<(), VizError> {
        self.memory.clear()
    }

    fn present(&mut self, pixels: &PixelBuffer) -> Result<(), VizError> {
        self.memory.present(pixels)
    }
}

impl GeometryTarget for TestSurface {
    fn intrinsic_aspect_ratio(&self) -> f64 {
        self.aspect
    }

    fn apply_geometry(&mut self, geometry: &SurfaceGeometry) -> Result<(), VizError> {
        self.applied.push(*geometry);
        self.memory
            .resize(geometry.device_width, geometry.device_height);
        Ok(())
    }
}

/// Status sink that shares its history with the test.
pub fn status_log() -> (Rc<RefCell<Vec<RenderStatus>>>, impl FnMut(RenderStatus)) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let log = Rc::clone(&log);
        move |status: RenderStatus| log.borrow_mut().push(status)
    };
    (log, sink)
}

/// Clock that advances by `step_ms` every time it is read.
pub fn ticking_clock(step_ms: f64) -> impl Fn() -> f64 {
    let now = Cell::new(0.0);
    move || {
        let t = now.get();
        now.set(t + step_ms);
        t
    }
}
