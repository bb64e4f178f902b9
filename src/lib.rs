//! Virtual input remapping for keyboards, mice and gamepads
//!
//! Physical devices normalize everything they see into [`RawEvent`]s. Once per
//! frame the [`InputsUnit`] drains those events and feeds them to every
//! [`VirtualController`], which maps them onto logical keys, axes and POVs
//! identified by application-chosen [`VirtualId`]s.
//!
//! # Architecture
//!
//! ```text
//! Keyboard ─┐
//! Mouse    ─┼──► [RawEvent channel] ──► InputsUnit::process ──► VirtualController(s)
//! Gamepad  ─┘      (one batch/tick)                                 │
//!                                                                   ├──► VirtualEvent listener
//!                                                                   └──► poll queries
//! ```
//!
//! Everything runs on the caller's thread; a tick is a bounded, synchronous
//! pass over the devices and the batch they produced.

pub mod codes;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod pov;
pub mod registry;
pub mod remap;
pub mod unit;

pub use config::{InputsConfig, UnitSettings};
pub use device::{
    Device, DeviceId, DeviceKind, DeviceRef, DeviceRegistry, GamepadHub, GilrsGamepad,
    KeyboardDevice, KeyboardFeed, ListenerId, MouseDevice, MouseFeed, RawEventListener,
};
pub use error::{ConfigError, DeviceError, InputsError, RegistryError};
pub use event::{Axis, Key, PartKind, Pov, RawEvent, RawPart, Timestamp, VirtualEvent, VirtualId, VirtualValue};
pub use pov::{Direction, PovPosition, PovShortcuts};
pub use registry::{ShortcutRegistry, VirtualIdRegistry};
pub use remap::{
    AxisPair, AxisSource, Bound, ControllerSettings, PovSource, VirtualAxis, VirtualController,
    VirtualEventListener, VirtualKey, VirtualPov,
};
pub use unit::{InputsUnit, UnitStats};
