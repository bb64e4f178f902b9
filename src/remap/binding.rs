//! Virtual parts and the raw sources backing them

use crate::device::DeviceRef;
use crate::event::{Axis, Key, PartKind, Pov, Timestamp, VirtualId};
use crate::pov::{PovPosition, PovShortcuts};

/// A raw source on a specific device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound<S> {
    pub device: DeviceRef,
    pub source: S,
}

impl<S> Bound<S> {
    pub fn new(device: DeviceRef, source: S) -> Self {
        Self { device, source }
    }
}

/// What drives a virtual axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    /// A real axis, copied as is
    Axis(Axis),
    /// One half of a POV: up/down when `up_down` is set, left/right otherwise
    PovHalf { pov: Pov, up_down: bool },
    /// Two keys pushing the axis to its minimum and maximum
    Keys { min: Key, max: Key },
}

impl AxisSource {
    pub fn part_kind(&self) -> PartKind {
        match self {
            AxisSource::Axis(_) => PartKind::Axis,
            AxisSource::PovHalf { .. } => PartKind::Pov,
            AxisSource::Keys { .. } => PartKind::Key,
        }
    }
}

/// Two real axes combined into a POV, plus their live values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPair {
    pub up_down: Axis,
    pub left_right: Axis,
    pub live_up_down: i32,
    pub live_left_right: i32,
    /// Position computed from the live values, committed at the end of the tick
    pub pending: PovPosition,
}

impl AxisPair {
    pub fn new(up_down: Axis, left_right: Axis) -> Self {
        Self {
            up_down,
            left_right,
            live_up_down: 0,
            live_left_right: 0,
            pending: PovPosition::Center,
        }
    }

    /// Stores a new value for one of the two axes and recomputes `pending`.
    /// Returns false if the axis is not part of the pair.
    pub fn feed(&mut self, axis: Axis, value: i32, threshold: i32, invert_left_right: bool) -> bool {
        if axis == self.up_down {
            self.live_up_down = value;
        } else if axis == self.left_right {
            self.live_left_right = value;
        } else {
            return false;
        }

        self.pending = PovPosition::from_axes(
            self.live_up_down,
            self.live_left_right,
            threshold,
            invert_left_right,
        );
        true
    }
}

/// What drives a virtual POV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PovSource {
    /// A real POV, copied as is
    Pov(Pov),
    /// Four directional keys
    Keys {
        up: Key,
        down: Key,
        left: Key,
        right: Key,
    },
    /// Two axes thresholded into quadrants
    Axes(AxisPair),
}

impl PovSource {
    pub fn part_kind(&self) -> PartKind {
        match self {
            PovSource::Pov(_) => PartKind::Pov,
            PovSource::Keys { .. } => PartKind::Key,
            PovSource::Axes(_) => PartKind::Axis,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualKey {
    /// `None` for a placeholder waiting to be bound
    pub source: Option<Bound<Key>>,
    pub pressed: bool,
    /// Set when the key changed during the current tick
    pub toggled: bool,
    pub has_shortcut: bool,
    pub press_timestamp: Timestamp,
    pub release_timestamp: Timestamp,
}

impl VirtualKey {
    pub fn placeholder(has_shortcut: bool) -> Self {
        Self {
            has_shortcut,
            ..Self::default()
        }
    }

    pub fn bound(device: DeviceRef, key: Key, has_shortcut: bool) -> Self {
        Self {
            source: Some(Bound::new(device, key)),
            has_shortcut,
            ..Self::default()
        }
    }

    pub fn was_pressed(&self) -> bool {
        self.pressed && self.toggled
    }

    pub fn was_released(&self) -> bool {
        !self.pressed && self.toggled
    }

    /// Length of the last completed press, 0 while the key is held
    pub fn pressed_duration(&self) -> u64 {
        if self.pressed {
            return 0;
        }
        self.release_timestamp.saturating_sub(self.press_timestamp)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualAxis {
    pub source: Option<Bound<AxisSource>>,
    pub value: i32,
    pub changed: bool,
    pub timestamp: Timestamp,
}

impl VirtualAxis {
    pub fn bound(device: DeviceRef, source: AxisSource) -> Self {
        Self {
            source: Some(Bound::new(device, source)),
            ..Self::default()
        }
    }

    pub fn part_kind(&self) -> Option<PartKind> {
        self.source.map(|bound| bound.source.part_kind())
    }

    pub(crate) fn is_mouse_driven(&self) -> bool {
        self.source.is_some_and(|bound| bound.device.is_mouse())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualPov {
    pub source: Option<Bound<PovSource>>,
    pub shortcuts: Option<PovShortcuts>,
    pub position: PovPosition,
    pub previous_position: PovPosition,
    pub last_change_timestamp: Timestamp,
    pub previous_change_timestamp: Timestamp,
    pub changed: bool,
}

impl VirtualPov {
    pub fn placeholder(shortcuts: Option<PovShortcuts>) -> Self {
        Self {
            shortcuts,
            ..Self::default()
        }
    }

    pub fn bound(device: DeviceRef, source: PovSource, shortcuts: Option<PovShortcuts>) -> Self {
        Self {
            source: Some(Bound::new(device, source)),
            shortcuts,
            ..Self::default()
        }
    }

    pub fn part_kind(&self) -> Option<PartKind> {
        self.source.map(|bound| bound.source.part_kind())
    }

    /// Time spent in the previous position, 0 if that was the center
    pub fn pressed_duration(&self) -> u64 {
        if self.previous_position.is_center() {
            return 0;
        }
        self.last_change_timestamp
            .saturating_sub(self.previous_change_timestamp)
    }

    pub fn position_from_shortcut(&self, shortcut: &str) -> PovPosition {
        self.shortcuts
            .as_ref()
            .map(|shortcuts| shortcuts.position_of(shortcut))
            .unwrap_or_default()
    }

    pub(crate) fn record_change(&mut self, timestamp: Timestamp) {
        self.previous_change_timestamp = self.last_change_timestamp;
        self.last_change_timestamp = timestamp;
    }
}

/// Bindings of one kind keyed by virtual ID, in insertion order
#[derive(Debug, Clone)]
pub struct BindingTable<T> {
    entries: Vec<(VirtualId, T)>,
}

impl<T> Default for BindingTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> BindingTable<T> {
    pub fn get(&self, id: VirtualId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(vid, _)| *vid == id)
            .map(|(_, binding)| binding)
    }

    pub fn get_mut(&mut self, id: VirtualId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(vid, _)| *vid == id)
            .map(|(_, binding)| binding)
    }

    pub fn contains(&self, id: VirtualId) -> bool {
        self.get(id).is_some()
    }

    /// Adds a binding, replacing an existing one in place
    pub fn insert(&mut self, id: VirtualId, binding: T) {
        match self.get_mut(id) {
            Some(existing) => *existing = binding,
            None => self.entries.push((id, binding)),
        }
    }

    /// Entry at `index`; panics when out of range
    pub fn at(&self, index: usize) -> (VirtualId, &T) {
        assert!(
            index < self.entries.len(),
            "binding index {} out of range ({} entries)",
            index,
            self.entries.len()
        );
        let (id, binding) = &self.entries[index];
        (*id, binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VirtualId, &T)> {
        self.entries.iter().map(|(id, binding)| (*id, binding))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (VirtualId, &mut T)> {
        self.entries.iter_mut().map(|(id, binding)| (*id, binding))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
