pub mod error;
pub mod geometry;
pub mod params;
pub mod pixel_buffer;
pub mod surface;

pub use error::VizError;
pub use geometry::{compute_geometry, GeometryPolicy, SurfaceGeometry};
pub use params::{
    ChangeKind, GenerationParameters, ParamField, ParameterStore, RawValue, ViewParameters,
    ANGLE_UNITS_PER_RADIAN,
};
pub use pixel_buffer::PixelBuffer;
pub use surface::{DrawingSurface, MemorySurface};
