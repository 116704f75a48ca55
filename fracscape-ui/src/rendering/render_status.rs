use fracscape_core::VizError;
use std::fmt;

/// Human-readable progress of the render pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RenderStatus {
    #[default]
    Loaded,
    Rendering,
    Rendered { elapsed_ms: u64 },
    Failed(String),
    /// A control value was rejected and nothing was redrawn.
    Ignored(String),
}

impl RenderStatus {
    /// Completed flush spanning `start_ms..end_ms`, rounded up to whole milliseconds.
    pub fn finished(start_ms: f64, end_ms: f64) -> Self {
        let elapsed = end_ms - start_ms;
        let elapsed_ms = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed.ceil() as u64
        } else {
            0
        };
        RenderStatus::Rendered { elapsed_ms }
    }

    pub fn failed(err: &VizError) -> Self {
        RenderStatus::Failed(err.to_string())
    }

    pub fn ignored(err: &VizError) -> Self {
        RenderStatus::Ignored(err.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RenderStatus::Failed(_) | RenderStatus::Ignored(_))
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStatus::Loaded => f.write_str("WebAssembly loaded!"),
            RenderStatus::Rendering => f.write_str("Rendering 3d plot..."),
            RenderStatus::Rendered { elapsed_ms } => {
                write!(f, "Rendered 3d plot in {elapsed_ms}ms")
            }
            RenderStatus::Failed(reason) | RenderStatus::Ignored(reason) => f.write_str(reason),
        }
    }
}
