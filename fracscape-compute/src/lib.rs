pub mod bridge;
pub mod envelope;
pub mod fractal_noise;
pub mod point_set;
pub mod projection;
pub mod rasterizer;

pub use bridge::{GeneratorBridge, GeneratorConfig, NoiseBridge};
pub use envelope::{complete_level, upper_envelope};
pub use fractal_noise::{FractalNoise, MAX_POINTS};
pub use point_set::{PointSet, SurfacePoint};
pub use projection::Projection;
pub use rasterizer::{graymap, rasterize, RasterStyle};

// Re-export core types for convenience
pub use fracscape_core::*;
