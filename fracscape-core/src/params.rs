//! Generation and view parameters, and the store that coerces raw control
//! input into them.
//!
//! Every field belongs to exactly one [`ChangeKind`]: seed, noise and decay
//! decide which point set exists, everything else only decides how it is drawn.

use crate::VizError;
use std::fmt;

/// Slider units per radian for pitch and yaw controls.
pub const ANGLE_UNITS_PER_RADIAN: f64 = 100.0;

/// Identifies a single user-adjustable control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    Seed,
    Noise,
    Decay,
    Pitch,
    Yaw,
    Iterations,
    Bounded,
}

impl ParamField {
    pub const ALL: [ParamField; 7] = [
        ParamField::Seed,
        ParamField::Noise,
        ParamField::Decay,
        ParamField::Pitch,
        ParamField::Yaw,
        ParamField::Iterations,
        ParamField::Bounded,
    ];

    /// What kind of work a change to this field requires.
    pub fn kind(self) -> ChangeKind {
        match self {
            ParamField::Seed | ParamField::Noise | ParamField::Decay => ChangeKind::Generation,
            ParamField::Pitch | ParamField::Yaw | ParamField::Iterations | ParamField::Bounded => {
                ChangeKind::View
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamField::Seed => "seed",
            ParamField::Noise => "noise",
            ParamField::Decay => "decay",
            ParamField::Pitch => "pitch",
            ParamField::Yaw => "yaw",
            ParamField::Iterations => "iterations",
            ParamField::Bounded => "bounded",
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a parameter change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The point set must be regenerated before drawing.
    Generation,
    /// The existing point set only needs to be re-projected.
    View,
}

/// A control value exactly as the control delivered it.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Flag(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

/// Inputs that determine the identity of the generated point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParameters {
    pub seed: u64,
    pub noise: f64,
    /// Normalized into [0, 1].
    pub decay: f64,
}

/// Inputs that only affect how an existing point set is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParameters {
    /// Radians.
    pub pitch: f64,
    /// Radians.
    pub yaw: f64,
    /// Upper limit on drawn points, taken in generation order.
    pub iteration_count: u32,
    pub bounded: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            noise: 0.0,
            decay: 0.0,
        }
    }
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            iteration_count: 0,
            bounded: false,
        }
    }
}

/// Current parameter values, updated one raw control value at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterStore {
    generation: GenerationParameters,
    view: ViewParameters,
    decay_max: f64,
}

impl ParameterStore {
    /// Create a store with zeroed parameters. `decay_max` is the declared
    /// maximum of the decay control; raw decay values are divided by it.
    pub fn new(decay_max: f64) -> Self {
        let decay_max = if decay_max.is_finite() && decay_max > 0.0 {
            decay_max
        } else {
            1.0
        };
        Self {
            generation: GenerationParameters::default(),
            view: ViewParameters::default(),
            decay_max,
        }
    }

    /// Create a store and apply every `(field, value)` pair in order.
    pub fn from_raw(decay_max: f64, values: &[(ParamField, RawValue)]) -> Result<Self, VizError> {
        let mut store = Self::new(decay_max);
        for (field, raw) in values {
            store.apply(*field, raw)?;
        }
        Ok(store)
    }

    /// Coerce `raw` into `field` and store it.
    ///
    /// On failure the previous value of the field is kept and
    /// [`VizError::InvalidInput`] is returned; the caller must not redraw.
    pub fn apply(&mut self, field: ParamField, raw: &RawValue) -> Result<ChangeKind, VizError> {
        match field {
            ParamField::Seed => {
                self.generation.seed = text(field, raw)?
                    .parse::<u64>()
                    .map_err(|_| VizError::invalid_input(field, raw))?;
            }
            ParamField::Noise => self.generation.noise = parse_finite(field, raw)?,
            ParamField::Decay => {
                self.generation.decay = (parse_finite(field, raw)? / self.decay_max).clamp(0.0, 1.0);
            }
            ParamField::Pitch => self.view.pitch = parse_finite(field, raw)? / ANGLE_UNITS_PER_RADIAN,
            ParamField::Yaw => self.view.yaw = parse_finite(field, raw)? / ANGLE_UNITS_PER_RADIAN,
            ParamField::Iterations => {
                self.view.iteration_count = text(field, raw)?
                    .parse::<u32>()
                    .map_err(|_| VizError::invalid_input(field, raw))?;
            }
            ParamField::Bounded => {
                self.view.bounded = match raw {
                    RawValue::Flag(flag) => *flag,
                    RawValue::Text(text) => text
                        .trim()
                        .parse::<bool>()
                        .map_err(|_| VizError::invalid_input(field, raw))?,
                };
            }
        }
        Ok(field.kind())
    }

    pub fn generation(&self) -> GenerationParameters {
        self.generation
    }

    pub fn view(&self) -> ViewParameters {
        self.view
    }

    pub fn decay_max(&self) -> f64 {
        self.decay_max
    }
}

fn text(field: ParamField, raw: &RawValue) -> Result<&str, VizError> {
    match raw {
        RawValue::Text(text) => Ok(text.trim()),
        RawValue::Flag(_) => Err(VizError::invalid_input(field, raw)),
    }
}

fn parse_finite(field: ParamField, raw: &RawValue) -> Result<f64, VizError> {
    text(field, raw)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| VizError::invalid_input(field, raw))
}
