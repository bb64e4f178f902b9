//! Gamepads backed by gilrs
//!
//! A [`GamepadHub`] owns the gilrs context. gilrs delivers the events of every
//! pad through a single queue, so the hub routes them into one queue per pad;
//! each [`GilrsGamepad`] drains its own queue when polled.
//!
//! Translation to raw events:
//! - buttons become key events (see the `PAD_*` codes)
//! - sticks and analog triggers become axis events on `AXIS_X << n`, scaled
//!   to -255..255 after the deadzone, with up reported as negative
//! - the d-pad is folded into POV 0

use super::{Device, DeviceCore, DeviceKind};
use crate::codes::{self, nth_axis};
use crate::error::DeviceError;
use crate::event::{Key, RawPart, Timestamp};
use crate::pov::PovPosition;
use chrono::{DateTime, Local};
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use statum::{machine, state};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::time::SystemTime;
use tracing::{debug, error, info, warn};

/// Full scale of a translated axis value
const AXIS_EXTENT: f32 = 255.0;

/// gilrs context plus the per-pad event queues, shared by the hub and its pads
#[derive(Debug)]
struct HubShared {
    gilrs: Gilrs,
    queues: PadQueues<GamepadId>,
}

impl HubShared {
    // Moves every pending gilrs event into the queue of its pad
    fn pump(&mut self) {
        while let Some(Event { id, event, time, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => info!("Gamepad {} connected", id),
                EventType::Disconnected => warn!("Gamepad {} disconnected", id),
                _ => {}
            }
            self.queues.route(id, event, to_timestamp(time));
        }
    }
}

#[derive(Debug)]
struct PadQueue {
    active: bool,
    connected: bool,
    events: VecDeque<(EventType, Timestamp)>,
}

/// Per-pad event queues.
///
/// Only active pads queue input; an inactive pad just tracks whether it is
/// connected, so pads nobody polls never accumulate events.
#[derive(Debug)]
struct PadQueues<K> {
    pads: HashMap<K, PadQueue>,
}

impl<K> Default for PadQueues<K> {
    fn default() -> Self {
        Self {
            pads: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + fmt::Display> PadQueues<K> {
    fn register(&mut self, id: K) {
        self.pads.entry(id).or_insert_with(|| PadQueue {
            active: false,
            connected: true,
            events: VecDeque::new(),
        });
    }

    fn set_active(&mut self, id: K, active: bool) {
        if let Some(pad) = self.pads.get_mut(&id) {
            pad.active = active;
            if !active {
                pad.events.clear();
            }
        }
    }

    fn is_connected(&self, id: K) -> bool {
        self.pads.get(&id).is_some_and(|pad| pad.connected)
    }

    fn route(&mut self, id: K, event: EventType, timestamp: Timestamp) {
        let Some(pad) = self.pads.get_mut(&id) else {
            debug!("Skipping event from unregistered gamepad {}: {:?}", id, event);
            return;
        };

        let disconnected = match event {
            EventType::Connected => {
                pad.connected = true;
                false
            }
            EventType::Disconnected => {
                pad.connected = false;
                true
            }
            _ => false,
        };

        if pad.active {
            pad.events.push_back((event, timestamp));
        }
        // The pad still sees its own disconnect before going inactive
        if disconnected {
            pad.active = false;
        }
    }

    fn take(&mut self, id: K) -> VecDeque<(EventType, Timestamp)> {
        self.pads
            .get_mut(&id)
            .map(|pad| std::mem::take(&mut pad.events))
            .unwrap_or_default()
    }
}

fn to_timestamp(time: SystemTime) -> Timestamp {
    DateTime::<Local>::from(time).timestamp_millis().max(0) as Timestamp
}

// Hub lifecycle
#[state]
#[derive(Debug, Clone)]
pub enum HubState {
    Initializing,
    Collecting,
}

#[machine]
#[derive(Debug)]
pub struct GamepadHub<S: HubState> {
    shared: Rc<RefCell<HubShared>>,

    // Deadzone applied to sticks and triggers, in gilrs units (0..1)
    deadzone: f32,
}

impl<S: HubState> GamepadHub<S> {
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }
}

impl GamepadHub<Initializing> {
    pub fn create(deadzone: f32) -> Result<Self, DeviceError> {
        info!("Initializing gilrs gamepad backend");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(DeviceError::InitializationError(e.to_string()));
            }
        };

        let shared = HubShared {
            gilrs,
            queues: PadQueues::default(),
        };
        Ok(Self::new(Rc::new(RefCell::new(shared)), deadzone))
    }

    /// Enumerates the connected pads and starts collecting their events
    pub fn initialize(self) -> GamepadHub<Collecting> {
        {
            let shared = self.shared.borrow();
            let count = shared.gilrs.gamepads().count();
            if count == 0 {
                warn!("No gamepad connected");
            } else {
                info!("Found {} gamepads:", count);
                for (idx, (id, gamepad)) in shared.gilrs.gamepads().enumerate() {
                    info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
                }
            }
        }

        info!("Gamepad hub initialized with deadzone {}", self.deadzone);
        self.transition()
    }
}

impl GamepadHub<Collecting> {
    /// Creates one device per connected pad, indexed in enumeration order
    pub fn gamepads(&self) -> Vec<GilrsGamepad> {
        let mut shared = self.shared.borrow_mut();
        let pads: Vec<(GamepadId, String)> = shared
            .gilrs
            .gamepads()
            .map(|(id, gamepad)| (id, gamepad.name().to_string()))
            .collect();

        pads.into_iter()
            .enumerate()
            .map(|(index, (id, name))| {
                shared.queues.register(id);
                GilrsGamepad {
                    core: DeviceCore::new(DeviceKind::Gamepad, index as u32, name),
                    id,
                    shared: Rc::clone(&self.shared),
                    translator: PadTranslator::new(self.deadzone),
                }
            })
            .collect()
    }

    pub fn gamepad_count(&self) -> usize {
        self.shared.borrow().gilrs.gamepads().count()
    }

    /// Routes pending backend events without polling any pad
    pub fn pump(&self) {
        self.shared.borrow_mut().pump();
    }
}

/// A single gilrs gamepad
#[derive(Debug)]
pub struct GilrsGamepad {
    core: DeviceCore,
    id: GamepadId,
    shared: Rc<RefCell<HubShared>>,
    translator: PadTranslator,
}

impl GilrsGamepad {
    pub fn gamepad_id(&self) -> GamepadId {
        self.id
    }

    pub fn is_connected(&self) -> bool {
        self.shared.borrow().queues.is_connected(self.id)
    }
}

impl Device for GilrsGamepad {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        &mut self.core
    }

    fn activate(&mut self, active: bool) -> bool {
        let mut shared = self.shared.borrow_mut();
        shared.pump();
        if active && !shared.queues.is_connected(self.id) {
            warn!("Cannot activate {}: gamepad disconnected", self.core.name);
            return false;
        }
        shared.queues.set_active(self.id, active);
        self.core.active = active;
        true
    }

    fn read_inputs(&mut self) -> bool {
        let events = {
            let mut shared = self.shared.borrow_mut();
            shared.pump();
            shared.queues.take(self.id)
        };

        for (event, timestamp) in events {
            let part = match event {
                EventType::ButtonPressed(button, _) => self.translator.button(button, true),
                EventType::ButtonReleased(button, _) => self.translator.button(button, false),
                EventType::AxisChanged(axis, value, _) => self.translator.axis(axis, value),
                EventType::Disconnected => {
                    self.core.active = false;
                    None
                }
                _ => None,
            };

            if let Some(part) = part {
                if self.core.active {
                    self.core.dispatch(part, timestamp);
                }
            }
        }

        self.is_connected()
    }
}

/// Stateful translation of gilrs inputs to raw parts
#[derive(Debug, Clone, Default)]
struct PadTranslator {
    deadzone: f32,
    // Held d-pad directions: up, down, left, right
    dpad: [bool; 4],
    dpad_position: PovPosition,
}

impl PadTranslator {
    fn new(deadzone: f32) -> Self {
        Self {
            deadzone,
            ..Self::default()
        }
    }

    fn button(&mut self, button: Button, pressed: bool) -> Option<RawPart> {
        let slot = match button {
            Button::DPadUp => Some(0),
            Button::DPadDown => Some(1),
            Button::DPadLeft => Some(2),
            Button::DPadRight => Some(3),
            _ => None,
        };

        match slot {
            Some(slot) => {
                self.dpad[slot] = pressed;
                self.dpad_part()
            }
            None => map_button(button).map(|key| RawPart::Key { key, pressed }),
        }
    }

    fn axis(&mut self, axis: Axis, value: f32) -> Option<RawPart> {
        match axis {
            Axis::DPadX => {
                self.dpad[2] = value < -0.5;
                self.dpad[3] = value > 0.5;
                return self.dpad_part();
            }
            Axis::DPadY => {
                self.dpad[0] = value > 0.5;
                self.dpad[1] = value < -0.5;
                return self.dpad_part();
            }
            _ => {}
        }

        let (n, inverted) = match axis {
            Axis::LeftStickX => (0, false),
            Axis::LeftStickY => (1, true),
            Axis::LeftZ => (2, false),
            Axis::RightStickX => (3, false),
            Axis::RightStickY => (4, true),
            Axis::RightZ => (5, false),
            _ => {
                debug!("Ignoring unsupported axis: {:?}", axis);
                return None;
            }
        };

        let scaled = (apply_deadzone(value, self.deadzone) * AXIS_EXTENT).round() as i32;
        let value = if inverted { -scaled } else { scaled };
        nth_axis(n).map(|axis| RawPart::Axis { axis, value })
    }

    // Emits the d-pad position only when it actually moved
    fn dpad_part(&mut self) -> Option<RawPart> {
        let [up, down, left, right] = self.dpad;
        let position = PovPosition::from_held(up, down, left, right);
        if position == self.dpad_position {
            return None;
        }
        self.dpad_position = position;
        Some(RawPart::Pov { pov: 0, position })
    }
}

fn map_button(button: Button) -> Option<Key> {
    match button {
        Button::South => Some(codes::PAD_SOUTH),
        Button::East => Some(codes::PAD_EAST),
        Button::West => Some(codes::PAD_WEST),
        Button::North => Some(codes::PAD_NORTH),
        Button::LeftTrigger => Some(codes::PAD_LEFT_BUMPER),
        Button::RightTrigger => Some(codes::PAD_RIGHT_BUMPER),
        Button::LeftTrigger2 => Some(codes::PAD_LEFT_TRIGGER),
        Button::RightTrigger2 => Some(codes::PAD_RIGHT_TRIGGER),
        Button::Select => Some(codes::PAD_SELECT),
        Button::Start => Some(codes::PAD_START),
        Button::Mode => Some(codes::PAD_MODE),
        Button::LeftThumb => Some(codes::PAD_LEFT_THUMB),
        Button::RightThumb => Some(codes::PAD_RIGHT_THUMB),
        _ => None,
    }
}

// Values inside the deadzone read 0, the rest is rescaled to the full range
fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        let sign = if value < 0.0 { -1.0 } else { 1.0 };
        sign * (value.abs() - deadzone) / (1.0 - deadzone)
    }
}
