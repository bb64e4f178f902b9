use serde::{Deserialize, Serialize};

/// Tuning of the remapping engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Minimum difference for a real axis to count as changed
    pub axis_change_threshold: i32,
    /// Magnitude at which an axis of a two-axis POV enters a direction
    pub pov_axis_threshold: i32,
    /// Value reported by key- and POV-driven axes at full deflection
    pub axis_extent: i32,
    /// Treat negative left/right values as right in two-axis POVs
    pub invert_pov_left_right: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            axis_change_threshold: 10,
            pov_axis_threshold: 100,
            axis_extent: 255,
            invert_pov_left_right: false,
        }
    }
}
