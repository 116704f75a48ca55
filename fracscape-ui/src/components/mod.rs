pub mod control_panel;
pub mod param_control;
pub mod status_line;

pub use control_panel::ControlPanel;
pub use param_control::ParamControl;
pub use status_line::StatusLine;
