//! Coalesces parameter-change notifications into at most one flush per frame.
//!
//! Notifications only move the pending state forward: a generation change
//! subsumes a view change, and nothing is drawn until [`RenderScheduler::flush`]
//! runs on the next animation frame with whatever parameters are current then.

use super::{ChartInstance, RenderStatus};
use fracscape_compute::GeneratorBridge;
use fracscape_core::{ChangeKind, DrawingSurface, ParameterStore, VizError};

/// Receives status updates.
pub trait StatusSink {
    fn set_status(&mut self, status: RenderStatus);
}

impl<F: FnMut(RenderStatus)> StatusSink for F {
    fn set_status(&mut self, status: RenderStatus) {
        self(status)
    }
}

/// Wall-clock time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

impl<F: Fn() -> f64> Clock for F {
    fn now_ms(&self) -> f64 {
        self()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulerState {
    #[default]
    Idle,
    PendingView,
    PendingGeneration,
}

impl SchedulerState {
    fn escalate(self, kind: ChangeKind) -> Self {
        match (self, kind) {
            (_, ChangeKind::Generation) | (SchedulerState::PendingGeneration, _) => {
                SchedulerState::PendingGeneration
            }
            (_, ChangeKind::View) => SchedulerState::PendingView,
        }
    }

    fn kind(self) -> Option<ChangeKind> {
        match self {
            SchedulerState::Idle => None,
            SchedulerState::PendingView => Some(ChangeKind::View),
            SchedulerState::PendingGeneration => Some(ChangeKind::Generation),
        }
    }
}

/// What a single flush did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlushReport {
    /// The queued work, `None` if the scheduler was idle.
    pub kind: Option<ChangeKind>,
    pub generated: bool,
    pub rendered: bool,
    pub error: Option<VizError>,
    /// Work was queued while flushing; another frame is needed.
    pub more_pending: bool,
}

#[derive(Debug, Default)]
pub struct RenderScheduler {
    state: SchedulerState,
    flushing: bool,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SchedulerState::Idle
    }

    pub fn is_flushing(&self) -> bool {
        self.flushing
    }

    /// Queue work of `kind`.
    ///
    /// Returns true when the caller must request an animation frame: the
    /// scheduler was idle and no flush is running. Work queued during a
    /// flush is picked up through [`FlushReport::more_pending`].
    pub fn request(&mut self, kind: ChangeKind) -> bool {
        let was_idle = self.is_idle();
        self.state = self.state.escalate(kind);
        was_idle && !self.flushing
    }

    /// Queue the redraw that follows a surface resize.
    ///
    /// The point set does not depend on the surface size, so this is view
    /// work; a flush without a live point set generates one anyway.
    pub fn request_resize(&mut self) -> bool {
        self.request(ChangeKind::View)
    }

    /// Take the pending work and mark a flush as running.
    pub fn begin_flush(&mut self) -> SchedulerState {
        self.flushing = true;
        std::mem::take(&mut self.state)
    }

    /// Mark the running flush as done. Returns true if work arrived meanwhile.
    pub fn finish_flush(&mut self) -> bool {
        self.flushing = false;
        !self.is_idle()
    }

    /// Run the pending work against the current parameters.
    ///
    /// Generates a new point set when generation work is pending (or none
    /// exists yet) and the live one was made from different parameters, then
    /// renders. No failure escapes: errors become the final status.
    pub fn flush<B: GeneratorBridge>(
        &mut self,
        store: &ParameterStore,
        chart: &mut ChartInstance<B::Handle>,
        bridge: &mut B,
        surface: &mut dyn DrawingSurface,
        status: &mut dyn StatusSink,
        clock: &dyn Clock,
    ) -> FlushReport {
        let pending = self.begin_flush();
        let Some(kind) = pending.kind() else {
            self.finish_flush();
            return FlushReport::default();
        };

        let start = clock.now_ms();
        status.set_status(RenderStatus::Rendering);
        log::debug!("Flushing {kind:?} work");

        let mut report = FlushReport {
            kind: Some(kind),
            ..FlushReport::default()
        };

        let generation = store.generation();
        let wants_generation = kind == ChangeKind::Generation || chart.is_empty();
        if wants_generation && !chart.is_current(&generation) {
            match bridge.generate(&generation) {
                Ok(handle) => {
                    chart.replace(generation, handle);
                    report.generated = true;
                }
                Err(err) => {
                    log::error!("{err}");
                    report.error = Some(err);
                }
            }
        }

        if let Some(handle) = chart.handle() {
            match bridge.render(handle, surface, &store.view()) {
                Ok(()) => report.rendered = true,
                Err(err) => {
                    log::error!("{err}");
                    if let Err(clear_err) = surface.clear() {
                        log::error!("Could not clear surface: {clear_err}");
                    }
                    report.error.get_or_insert(err);
                }
            }
        }

        let end = clock.now_ms();
        match &report.error {
            Some(err) => status.set_status(RenderStatus::failed(err)),
            None => {
                let finished = RenderStatus::finished(start, end);
                log::debug!("{finished}");
                status.set_status(finished);
            }
        }

        report.more_pending = self.finish_flush();
        report
    }
}
