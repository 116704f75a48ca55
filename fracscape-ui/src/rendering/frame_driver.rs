//! Owns the whole pipeline for one canvas and feeds it from UI events.

use super::canvas_utils::next_animation_frame;
use super::{
    ChartInstance, Clock, FlushReport, GeometryTarget, RenderScheduler, RenderStatus, StatusSink,
    SurfaceManager,
};
use fracscape_compute::GeneratorBridge;
use fracscape_core::{
    ChangeKind, DrawingSurface, GeometryPolicy, ParamField, ParameterStore, RawValue,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Parameter store, scheduler, chart instance, generator and surface of a
/// single visualizer.
pub struct FrameDriver<B: GeneratorBridge, S> {
    store: ParameterStore,
    scheduler: RenderScheduler,
    chart: ChartInstance<B::Handle>,
    bridge: B,
    surface: S,
    surfaces: SurfaceManager,
    status: Box<dyn StatusSink>,
    clock: Box<dyn Clock>,
}

impl<B, S> FrameDriver<B, S>
where
    B: GeneratorBridge,
    S: DrawingSurface + GeometryTarget,
{
    pub fn new(
        store: ParameterStore,
        bridge: B,
        surface: S,
        policy: GeometryPolicy,
        status: impl StatusSink + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            store,
            scheduler: RenderScheduler::new(),
            chart: ChartInstance::new(),
            bridge,
            surface,
            surfaces: SurfaceManager::new(policy),
            status: Box::new(status),
            clock: Box::new(clock),
        }
    }

    /// Size the surface for the initial layout and queue the first generation.
    ///
    /// Returns true when an animation frame must be requested.
    pub fn setup(&mut self, container_width: f64, device_pixel_ratio: f64) -> bool {
        self.status.set_status(RenderStatus::Loaded);
        if let Err(err) = self
            .surfaces
            .resize(&mut self.surface, container_width, device_pixel_ratio)
        {
            log::error!("{err}");
            self.status.set_status(RenderStatus::failed(&err));
        }
        self.scheduler.request(ChangeKind::Generation)
    }

    /// Feed one raw control value into the store.
    ///
    /// Rejected values are reported and never scheduled. Returns true when an
    /// animation frame must be requested.
    pub fn apply_input(&mut self, field: ParamField, raw: &RawValue) -> bool {
        match self.store.apply(field, raw) {
            Ok(kind) => self.scheduler.request(kind),
            Err(err) => {
                log::warn!("{err}");
                self.status.set_status(RenderStatus::ignored(&err));
                false
            }
        }
    }

    /// React to a layout change: resize the surface, then queue one redraw.
    pub fn resize(&mut self, container_width: f64, device_pixel_ratio: f64) -> bool {
        match self
            .surfaces
            .resize(&mut self.surface, container_width, device_pixel_ratio)
        {
            Ok(_) => self.scheduler.request_resize(),
            Err(err) => {
                log::error!("{err}");
                self.status.set_status(RenderStatus::failed(&err));
                false
            }
        }
    }

    pub fn flush(&mut self) -> FlushReport {
        self.scheduler.flush(
            &self.store,
            &mut self.chart,
            &mut self.bridge,
            &mut self.surface,
            self.status.as_mut(),
            self.clock.as_ref(),
        )
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn chart(&self) -> &ChartInstance<B::Handle> {
        &self.chart
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surfaces(&self) -> &SurfaceManager {
        &self.surfaces
    }
}

pub type SharedDriver<B, S> = Rc<RefCell<FrameDriver<B, S>>>;

/// Flush `driver` on the next animation frame, and keep flushing while
/// work keeps arriving during flushes.
pub fn request_frame<B, S>(driver: SharedDriver<B, S>)
where
    B: GeneratorBridge + 'static,
    S: DrawingSurface + GeometryTarget + 'static,
{
    leptos::spawn_local(async move {
        next_animation_frame().await;
        let report = match driver.try_borrow_mut() {
            Ok(mut driver) => driver.flush(),
            Err(_) => {
                log::warn!("Driver busy, retrying flush next frame");
                FlushReport {
                    more_pending: true,
                    ..FlushReport::default()
                }
            }
        };
        if report.more_pending {
            request_frame(driver);
        }
    });
}

/// Run [`FrameDriver::setup`], requesting the first frame.
pub fn notify_setup<B, S>(driver: &SharedDriver<B, S>, container_width: f64, device_pixel_ratio: f64)
where
    B: GeneratorBridge + 'static,
    S: DrawingSurface + GeometryTarget + 'static,
{
    let needs_frame = match driver.try_borrow_mut() {
        Ok(mut driver) => driver.setup(container_width, device_pixel_ratio),
        Err(_) => {
            log::error!("Driver busy during setup");
            false
        }
    };
    if needs_frame {
        request_frame(Rc::clone(driver));
    }
}

/// Forward a control event to the driver, requesting a frame if needed.
pub fn notify_input<B, S>(driver: &SharedDriver<B, S>, field: ParamField, raw: RawValue)
where
    B: GeneratorBridge + 'static,
    S: DrawingSurface + GeometryTarget + 'static,
{
    let needs_frame = match driver.try_borrow_mut() {
        Ok(mut driver) => driver.apply_input(field, &raw),
        Err(_) => {
            log::warn!("Dropped {field} input while the driver was busy");
            false
        }
    };
    if needs_frame {
        request_frame(Rc::clone(driver));
    }
}

/// Forward a layout change to the driver, requesting a frame if needed.
pub fn notify_resize<B, S>(driver: &SharedDriver<B, S>, container_width: f64, device_pixel_ratio: f64)
where
    B: GeneratorBridge + 'static,
    S: DrawingSurface + GeometryTarget + 'static,
{
    let needs_frame = match driver.try_borrow_mut() {
        Ok(mut driver) => driver.resize(container_width, device_pixel_ratio),
        Err(_) => {
            log::warn!("Dropped resize while the driver was busy");
            false
        }
    };
    if needs_frame {
        request_frame(Rc::clone(driver));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::test_support::{status_log, ticking_clock, FakeBridge, TestSurface};
    use fracscape_compute::{GeneratorConfig, NoiseBridge};
    use fracscape_core::{GenerationParameters, VizError};
    use std::cell::RefCell;

    type Statuses = Rc<RefCell<Vec<RenderStatus>>>;

    fn setup_store() -> ParameterStore {
        ParameterStore::from_raw(
            100.0,
            &[
                (ParamField::Seed, "1".into()),
                (ParamField::Noise, "10000".into()),
                (ParamField::Decay, "100".into()),
                (ParamField::Pitch, "0".into()),
                (ParamField::Yaw, "0".into()),
                (ParamField::Iterations, "16384".into()),
                (ParamField::Bounded, false.into()),
            ],
        )
        .unwrap()
    }

    fn driver_with(
        policy: GeometryPolicy,
        aspect: f64,
    ) -> (FrameDriver<FakeBridge, TestSurface>, Statuses) {
        let (statuses, sink) = status_log();
        let driver = FrameDriver::new(
            setup_store(),
            FakeBridge::default(),
            TestSurface::new(aspect),
            policy,
            sink,
            ticking_clock(1.0),
        );
        (driver, statuses)
    }

    fn started() -> (FrameDriver<FakeBridge, TestSurface>, Statuses) {
        let (mut driver, statuses) = driver_with(GeometryPolicy::default(), 1.0);
        assert!(driver.setup(800.0, 2.0));
        driver.flush();
        (driver, statuses)
    }

    #[test]
    fn setup_generates_once_with_normalized_decay() {
        let (driver, statuses) = started();

        assert_eq!(
            driver.bridge().generated,
            vec![GenerationParameters {
                seed: 1,
                noise: 10000.0,
                decay: 1.0,
            }]
        );
        assert_eq!(driver.bridge().rendered.len(), 1);
        assert_eq!(
            statuses.borrow()[..2],
            [RenderStatus::Loaded, RenderStatus::Rendering]
        );
    }

    #[test]
    fn pitch_drag_renders_once_with_last_value() {
        let (mut driver, _) = started();

        let frames_requested = (0..10)
            .map(|i| (i * 50 / 9).to_string())
            .filter(|raw| driver.apply_input(ParamField::Pitch, &raw.as_str().into()))
            .count();
        let report = driver.flush();

        assert_eq!(frames_requested, 1);
        assert!(!report.generated);
        assert_eq!(driver.bridge().generated.len(), 1);
        assert_eq!(driver.bridge().rendered.len(), 2);
        assert!((driver.bridge().rendered[1].1.pitch - 0.5).abs() < 1e-12);
    }

    #[test]
    fn view_changes_keep_the_same_handle() {
        let (mut driver, _) = started();

        for (field, raw) in [
            (ParamField::Yaw, "20"),
            (ParamField::Iterations, "100"),
            (ParamField::Bounded, "true"),
            (ParamField::Pitch, "-40"),
        ] {
            driver.apply_input(field, &raw.into());
            driver.flush();
        }

        let rendered = &driver.bridge().rendered;
        assert_eq!(rendered.len(), 5);
        assert!(rendered.iter().all(|(h, _)| Rc::ptr_eq(h, &rendered[0].0)));
        assert_eq!(driver.bridge().generated.len(), 1);
    }

    #[test]
    fn seed_change_replaces_handle() {
        let (mut driver, _) = started();
        let original = Rc::clone(driver.chart().handle().unwrap());

        assert!(driver.apply_input(ParamField::Seed, &"2".into()));
        let report = driver.flush();

        assert!(report.generated && report.rendered);
        assert_eq!(driver.bridge().generated.len(), 2);
        assert_eq!(driver.bridge().generated[1].seed, 2);
        assert_eq!(driver.bridge().rendered.len(), 2);
        assert!(!Rc::ptr_eq(driver.chart().handle().unwrap(), &original));
        assert_eq!(Rc::strong_count(&original), 2);
    }

    #[test]
    fn resize_at_high_dpi_redraws_once() {
        let (mut driver, _) = started();

        assert!(driver.resize(400.0, 2.0));
        let report = driver.flush();

        let geometry = *driver.surfaces().current().unwrap();
        assert_eq!(geometry.css_width, 400.0);
        assert_eq!(geometry.device_width, 800);
        assert_eq!(geometry.device_height, 800);
        assert!(report.rendered && !report.generated);
        assert_eq!(driver.bridge().rendered.len(), 2);
        assert!(driver.scheduler().is_idle());
    }

    #[test]
    fn resize_with_presentation_factor() {
        let policy = GeometryPolicy {
            presentation_factor: 0.8,
            default_aspect_ratio: 1.0,
        };
        let (mut driver, _) = driver_with(policy, 1.0);
        driver.setup(800.0, 2.0);
        driver.flush();

        driver.resize(400.0, 2.0);
        driver.flush();

        let geometry = driver.surface().applied.last().copied().unwrap();
        assert_eq!(geometry.css_width, 320.0);
        assert_eq!(geometry.device_width, 640);
        assert_eq!(driver.surface().size(), (640, 640));
        assert_eq!(driver.bridge().rendered.len(), 2);
    }

    #[test]
    fn unchanged_layout_still_redraws() {
        let (mut driver, _) = started();
        let applied = driver.surface().applied.len();

        assert!(driver.resize(800.0, 2.0));
        driver.flush();

        assert_eq!(driver.surface().applied.len(), applied);
        assert_eq!(driver.bridge().rendered.len(), 2);
    }

    #[test]
    fn view_changes_never_resize() {
        let (mut driver, _) = started();

        driver.apply_input(ParamField::Yaw, &"10".into());
        driver.flush();

        assert_eq!(driver.surface().applied.len(), 1);
    }

    #[test]
    fn invalid_input_is_ignored_without_render() {
        let (mut driver, statuses) = started();

        assert!(!driver.apply_input(ParamField::Seed, &"abc".into()));

        assert!(driver.scheduler().is_idle());
        assert_eq!(driver.store().generation().seed, 1);
        assert_eq!(
            statuses.borrow().last(),
            Some(&RenderStatus::ignored(&VizError::invalid_input(
                ParamField::Seed,
                "abc"
            )))
        );
        assert_eq!(driver.flush(), FlushReport::default());
    }

    #[test]
    fn generation_failure_keeps_drawing_previous_chart() {
        let (mut driver, statuses) = started();

        driver.bridge_mut().fail_generate = true;
        driver.apply_input(ParamField::Noise, &"5".into());
        let report = driver.flush();

        assert!(report.rendered);
        assert_eq!(driver.chart().params().unwrap().noise, 10000.0);
        assert!(!driver.surface().memory.is_clear());
        assert!(statuses.borrow().last().unwrap().is_error());
    }

    #[test]
    fn noise_bridge_end_to_end() {
        let (statuses, sink) = status_log();
        let bridge = NoiseBridge::new(GeneratorConfig {
            target_points: 1024,
            ..GeneratorConfig::default()
        });
        let mut driver = FrameDriver::new(
            setup_store(),
            bridge,
            TestSurface::new(1.6),
            GeometryPolicy::default(),
            sink,
            ticking_clock(4.0),
        );

        driver.setup(320.0, 1.0);
        driver.flush();
        assert_eq!(driver.surface().size(), (320, 200));
        assert!(!driver.surface().memory.is_clear());
        assert_eq!(
            statuses.borrow().last(),
            Some(&RenderStatus::Rendered { elapsed_ms: 4 })
        );

        driver.apply_input(ParamField::Iterations, &"0".into());
        driver.flush();
        assert!(driver.surface().memory.is_clear());
        assert_eq!(driver.chart().handle().map(|set| set.len()), Some(1024));
    }
}
