//! Virtual controllers: logical keys, axes and POVs mapped onto raw input
//!
//! 1. [`binding`] - virtual parts and the sources backing them
//! 2. [`controller`] - configuration, enable/disable and queries
//! 3. [`engine`] - the per-tick processing of a raw event batch
//!
//! Every controller sees the whole batch of a tick; processing never
//! consumes events, so several controllers can react to the same input.

pub mod binding;
pub mod controller;
pub mod engine;
pub mod listener;
pub mod settings;

pub use binding::{
    AxisPair, AxisSource, BindingTable, Bound, PovSource, VirtualAxis, VirtualKey, VirtualPov,
};
pub use controller::VirtualController;
pub use listener::VirtualEventListener;
pub use settings::ControllerSettings;
