//! Raw and virtual event types
//!
//! Every device normalizes its input into a [`RawEvent`]; every virtual
//! controller reports its changes as a [`VirtualEvent`].

use crate::device::DeviceRef;
use crate::pov::PovPosition;
use serde::{Deserialize, Serialize};

/// Identifier of a key on a device (keyboard scan code, mouse or gamepad button)
pub type Key = u8;
/// Identifier of an axis on a device, one bit per axis (see [`crate::codes`])
pub type Axis = u8;
/// Index of a point-of-view hat on a device
pub type Pov = u8;
/// Application-assigned identifier of a logical input
pub type VirtualId = u32;
/// Event timestamp in milliseconds
pub type Timestamp = u64;

/// The kind of part an event, or a virtual binding, is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Key,
    Axis,
    Pov,
}

/// Part and value carried by a raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPart {
    Key { key: Key, pressed: bool },
    Axis { axis: Axis, value: i32 },
    Pov { pov: Pov, position: PovPosition },
}

impl RawPart {
    pub fn kind(&self) -> PartKind {
        match self {
            RawPart::Key { .. } => PartKind::Key,
            RawPart::Axis { .. } => PartKind::Axis,
            RawPart::Pov { .. } => PartKind::Pov,
        }
    }
}

/// A single hardware-originated input notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub source: DeviceRef,
    pub part: RawPart,
    pub timestamp: Timestamp,
}

impl RawEvent {
    pub fn key(source: DeviceRef, key: Key, pressed: bool, timestamp: Timestamp) -> Self {
        Self {
            source,
            part: RawPart::Key { key, pressed },
            timestamp,
        }
    }

    pub fn axis(source: DeviceRef, axis: Axis, value: i32, timestamp: Timestamp) -> Self {
        Self {
            source,
            part: RawPart::Axis { axis, value },
            timestamp,
        }
    }

    pub fn pov(source: DeviceRef, pov: Pov, position: PovPosition, timestamp: Timestamp) -> Self {
        Self {
            source,
            part: RawPart::Pov { pov, position },
            timestamp,
        }
    }

    pub fn part_kind(&self) -> PartKind {
        self.part.kind()
    }
}

/// New value of a virtual part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualValue {
    Key(bool),
    Axis(i32),
    Pov(PovPosition),
}

/// Change of a virtual key, axis or POV reported during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualEvent {
    pub id: VirtualId,
    pub value: VirtualValue,
    pub timestamp: Timestamp,
}

impl VirtualEvent {
    pub fn part_kind(&self) -> PartKind {
        match self.value {
            VirtualValue::Key(_) => PartKind::Key,
            VirtualValue::Axis(_) => PartKind::Axis,
            VirtualValue::Pov(_) => PartKind::Pov,
        }
    }
}

/// Current wall-clock time in milliseconds, used to stamp device events
pub fn timestamp_now() -> Timestamp {
    chrono::Local::now().timestamp_millis().max(0) as Timestamp
}
