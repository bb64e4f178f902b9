//! Physical input devices
//!
//! Every device normalizes its backend input into [`RawEvent`]s and hands them
//! to its listeners, in registration order, from [`Device::read_inputs`].
//!
//! - [`keyboard`] - queue-fed keyboard with an optional character mode
//! - [`mouse`] - queue-fed mouse reporting relative axes and buttons
//! - [`gamepad`] - gamepads backed by gilrs
//! - [`registry`] - ownership of the devices and handle resolution

pub mod gamepad;
pub mod keyboard;
pub mod listener;
pub mod mouse;
pub mod registry;

pub use gamepad::{GamepadHub, GilrsGamepad};
pub use keyboard::{KeyboardDevice, KeyboardFeed};
pub use listener::{ListenerId, ListenerList, RawEventListener};
pub use mouse::{MouseDevice, MouseFeed};
pub use registry::DeviceRegistry;

use crate::event::{RawEvent, RawPart, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Identifier assigned by the [`DeviceRegistry`]; 0 means not registered yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct DeviceId(pub u32);

// Device kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    Gamepad,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Keyboard => f.write_str("Keyboard"),
            DeviceKind::Mouse => f.write_str("Mouse"),
            DeviceKind::Gamepad => f.write_str("Gamepad"),
        }
    }
}

/// Non-owning handle to a device stored in a [`DeviceRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceRef {
    pub id: DeviceId,
    pub kind: DeviceKind,
}

impl DeviceRef {
    pub fn new(id: DeviceId, kind: DeviceKind) -> Self {
        Self { id, kind }
    }

    pub fn is_mouse(&self) -> bool {
        self.kind == DeviceKind::Mouse
    }
}

/// State shared by every device implementation
pub struct DeviceCore {
    handle: DeviceRef,
    index: u32,
    name: String,
    active: bool,
    listeners: ListenerList,
}

impl DeviceCore {
    pub fn new(kind: DeviceKind, index: u32, name: impl Into<String>) -> Self {
        Self {
            handle: DeviceRef::new(DeviceId::default(), kind),
            index,
            name: name.into(),
            active: false,
            listeners: ListenerList::default(),
        }
    }

    pub(crate) fn assign_id(&mut self, id: DeviceId) {
        self.handle.id = id;
    }

    /// Builds an event for this device and sends it to every listener
    pub fn dispatch(&mut self, part: RawPart, timestamp: Timestamp) {
        let event = RawEvent {
            source: self.handle,
            part,
            timestamp,
        };
        debug!("{} event: {:?}", self.handle.kind, event.part);
        self.listeners.dispatch(&event);
    }
}

impl fmt::Debug for DeviceCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCore")
            .field("handle", &self.handle)
            .field("index", &self.index)
            .field("name", &self.name)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A physical input device
///
/// Implementors only provide access to their [`DeviceCore`] and the polling
/// logic; everything else has a default implementation.
pub trait Device {
    fn core(&self) -> &DeviceCore;

    fn core_mut(&mut self) -> &mut DeviceCore;

    /// Drains the input already queued by the backend and dispatches it to the
    /// listeners. Never blocks. Returns false if the backend could not be read.
    fn read_inputs(&mut self) -> bool;

    /// Starts or stops the acquisition of input; false if the backend refused
    fn activate(&mut self, active: bool) -> bool {
        self.core_mut().active = active;
        true
    }

    fn is_active(&self) -> bool {
        self.core().active
    }

    fn kind(&self) -> DeviceKind {
        self.core().handle.kind
    }

    /// Position of the device among the devices of the same kind
    fn index(&self) -> u32 {
        self.core().index
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn handle(&self) -> DeviceRef {
        self.core().handle
    }

    fn register_listener(&mut self, listener: Box<dyn RawEventListener>) -> ListenerId {
        self.core_mut().listeners.push(listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.core_mut().listeners.remove(id)
    }
}

impl fmt::Display for dyn Device + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            DeviceKind::Gamepad => write!(f, "Gamepad #{}", self.index()),
            kind => write!(f, "{kind}"),
        }
    }
}
