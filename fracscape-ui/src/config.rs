//! Visualizer configuration registry.
//!
//! Defines the controls with their ranges and starting values, plus the
//! layout and generation settings of each visualizer.

use fracscape_compute::{GeneratorConfig, RasterStyle};
use fracscape_core::{GeometryPolicy, ParamField, ParameterStore, RawValue, VizError};

/// How a control is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// Free-form text, parsed on every edit.
    Text,
    /// Range slider over `min..=max`.
    Slider,
    Checkbox,
}

/// One user-adjustable control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlConfig {
    pub field: ParamField,
    pub label: &'static str,
    pub kind: ControlKind,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Raw value the control starts with, exactly as the control reports it.
    pub default_value: &'static str,
}

impl ControlConfig {
    /// The starting value in the form the control delivers it.
    pub fn default_raw(&self) -> RawValue {
        match self.kind {
            ControlKind::Checkbox => RawValue::Flag(self.default_value == "true"),
            ControlKind::Text | ControlKind::Slider => RawValue::from(self.default_value),
        }
    }
}

/// Configuration for a visualizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualizerConfig {
    /// Unique identifier
    pub id: &'static str,
    /// Human-readable name for UI display
    pub display_name: &'static str,
    pub controls: &'static [ControlConfig],
    /// Fraction of the container width taken by the canvas.
    pub presentation_factor: f64,
    /// Canvas attributes before the first resize. Their ratio is the
    /// intrinsic aspect ratio kept across resizes.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fallback when the canvas has no usable intrinsic aspect ratio.
    pub default_aspect_ratio: f64,
    /// Points generated per point set.
    pub point_budget: usize,
}

impl VisualizerConfig {
    pub fn control(&self, field: ParamField) -> Option<&ControlConfig> {
        self.controls.iter().find(|c| c.field == field)
    }

    /// Declared maximum of the decay control.
    pub fn decay_max(&self) -> f64 {
        self.control(ParamField::Decay).map_or(1.0, |c| c.max)
    }

    pub fn initial_values(&self) -> Vec<(ParamField, RawValue)> {
        self.controls
            .iter()
            .map(|c| (c.field, c.default_raw()))
            .collect()
    }

    /// A store holding every control's starting value.
    pub fn parameter_store(&self) -> Result<ParameterStore, VizError> {
        ParameterStore::from_raw(self.decay_max(), &self.initial_values())
    }

    pub fn geometry_policy(&self) -> GeometryPolicy {
        GeometryPolicy {
            presentation_factor: self.presentation_factor,
            default_aspect_ratio: self.default_aspect_ratio,
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            target_points: self.point_budget,
            style: RasterStyle::default(),
        }
    }
}

const ANGLE_RANGE: f64 = 314.0;

/// Points generated per set; the iterations slider spans exactly this many.
const POINT_BUDGET: usize = 16_384;

const FRACTAL_NOISE_CONTROLS: &[ControlConfig] = &[
    ControlConfig {
        field: ParamField::Seed,
        label: "Seed",
        kind: ControlKind::Text,
        min: 0.0,
        max: 0.0,
        step: 1.0,
        default_value: "1",
    },
    ControlConfig {
        field: ParamField::Noise,
        label: "Noise",
        kind: ControlKind::Text,
        min: 0.0,
        max: 0.0,
        step: 1.0,
        default_value: "10000",
    },
    ControlConfig {
        field: ParamField::Decay,
        label: "Decay",
        kind: ControlKind::Slider,
        min: 0.0,
        max: 100.0,
        step: 1.0,
        default_value: "100",
    },
    ControlConfig {
        field: ParamField::Pitch,
        label: "Pitch",
        kind: ControlKind::Slider,
        min: -ANGLE_RANGE,
        max: ANGLE_RANGE,
        step: 1.0,
        default_value: "50",
    },
    ControlConfig {
        field: ParamField::Yaw,
        label: "Yaw",
        kind: ControlKind::Slider,
        min: -ANGLE_RANGE,
        max: ANGLE_RANGE,
        step: 1.0,
        default_value: "50",
    },
    ControlConfig {
        field: ParamField::Iterations,
        label: "Iterations",
        kind: ControlKind::Slider,
        min: 0.0,
        max: POINT_BUDGET as f64,
        step: 1.0,
        default_value: "16384",
    },
    ControlConfig {
        field: ParamField::Bounded,
        label: "Bounded",
        kind: ControlKind::Checkbox,
        min: 0.0,
        max: 1.0,
        step: 1.0,
        default_value: "false",
    },
];

/// Registry of available visualizers.
pub static VISUALIZER_CONFIGS: &[VisualizerConfig] = &[VisualizerConfig {
    id: "fractal-noise",
    display_name: "Fractal Noise Surface",
    controls: FRACTAL_NOISE_CONTROLS,
    presentation_factor: 1.0,
    canvas_width: 800,
    canvas_height: 500,
    default_aspect_ratio: 1.6,
    point_budget: POINT_BUDGET,
}];

/// Look up a visualizer configuration by ID.
pub fn get_config(id: &str) -> Option<&'static VisualizerConfig> {
    VISUALIZER_CONFIGS.iter().find(|c| c.id == id)
}

/// Get the default visualizer configuration.
pub fn default_config() -> &'static VisualizerConfig {
    &VISUALIZER_CONFIGS[0]
}
