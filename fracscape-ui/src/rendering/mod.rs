pub mod canvas_surface;
pub mod canvas_utils;
mod chart;
pub mod frame_driver;
mod render_status;
pub mod scheduler;
mod surface_manager;

#[cfg(test)]
mod test_support;

pub use canvas_surface::CanvasSurface;
pub use canvas_utils::{next_animation_frame, performance_now};
pub use chart::ChartInstance;
pub use frame_driver::{
    notify_input, notify_resize, notify_setup, request_frame, FrameDriver, SharedDriver,
};
pub use render_status::RenderStatus;
pub use scheduler::{Clock, FlushReport, RenderScheduler, SchedulerState, StatusSink};
pub use surface_manager::{GeometryTarget, SurfaceManager};
