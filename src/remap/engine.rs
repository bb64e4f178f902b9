//! Per-tick processing of raw events
//!
//! A tick resets the per-tick flags, dispatches every raw event of the batch
//! in order and finally commits the positions of POVs built from two axes.
//! Each event is offered to every kind of binding it can drive: a key event
//! may move a virtual key, any number of key-driven POVs and any number of
//! key-driven axes at once.

use super::binding::{AxisSource, Bound, PovSource};
use super::controller::VirtualController;
use super::listener::emit;
use crate::device::DeviceRef;
use crate::event::{Axis, Key, Pov, RawEvent, RawPart, Timestamp, VirtualEvent, VirtualValue};
use crate::pov::{Direction, PovPosition};
use tracing::debug;

impl VirtualController {
    /// Applies a batch of raw events. Does nothing while disabled.
    pub fn process(&mut self, events: &[RawEvent]) {
        if !self.enabled {
            return;
        }

        self.reset_tick();

        if !events.is_empty() {
            debug!("'{}' processing {} raw events", self.name, events.len());
        }

        for event in events {
            match event.part {
                RawPart::Key { key, pressed } => {
                    self.on_key(event.source, key, pressed, event.timestamp)
                }
                RawPart::Axis { axis, value } => {
                    self.on_axis(event.source, axis, value, event.timestamp)
                }
                RawPart::Pov { pov, position } => {
                    self.on_pov(event.source, pov, position, event.timestamp)
                }
            }
        }

        self.commit_axis_povs();
    }

    // Clears per-tick flags; mouse axes are relative and fall back to 0
    fn reset_tick(&mut self) {
        for (_, key) in self.keys.iter_mut() {
            key.toggled = false;
        }
        for (_, axis) in self.axes.iter_mut() {
            axis.changed = false;
            if axis.is_mouse_driven() {
                axis.value = 0;
            }
        }
        for (_, pov) in self.povs.iter_mut() {
            pov.changed = false;
        }
    }

    fn on_key(&mut self, device: DeviceRef, key: Key, pressed: bool, timestamp: Timestamp) {
        let extent = self.settings.axis_extent;
        let Self {
            keys,
            axes,
            povs,
            listener,
            ..
        } = self;

        // First matching virtual key only
        if let Some((id, vkey)) = keys
            .iter_mut()
            .find(|(_, k)| k.source == Some(Bound::new(device, key)))
        {
            vkey.toggled = true;
            vkey.pressed = pressed;
            if pressed {
                vkey.press_timestamp = timestamp;
            } else {
                vkey.release_timestamp = timestamp;
            }
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Key(pressed),
                    timestamp,
                },
            );
        }

        for (id, vpov) in povs.iter_mut() {
            let Some(Bound {
                device: bound_device,
                source: PovSource::Keys { up, down, left, right },
            }) = vpov.source
            else {
                continue;
            };
            if bound_device != device {
                continue;
            }

            let direction = if key == up {
                Direction::Up
            } else if key == down {
                Direction::Down
            } else if key == left {
                Direction::Left
            } else if key == right {
                Direction::Right
            } else {
                continue;
            };

            vpov.previous_position = vpov.position;
            vpov.position = vpov.position.transition(direction, pressed);
            vpov.record_change(timestamp);
            vpov.changed = true;
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Pov(vpov.position),
                    timestamp,
                },
            );
        }

        for (id, vaxis) in axes.iter_mut() {
            let Some(Bound {
                device: bound_device,
                source: AxisSource::Keys { min, max },
            }) = vaxis.source
            else {
                continue;
            };
            if bound_device != device || (key != min && key != max) {
                continue;
            }

            let value = match (pressed, key == min) {
                (false, _) => 0,
                (true, true) => -extent,
                (true, false) => extent,
            };
            vaxis.changed = vaxis.value != value;
            vaxis.value = value;
            vaxis.timestamp = timestamp;
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Axis(value),
                    timestamp,
                },
            );
        }
    }

    fn on_axis(&mut self, device: DeviceRef, axis: Axis, value: i32, timestamp: Timestamp) {
        let threshold = self.settings.axis_change_threshold;
        let pov_threshold = self.settings.pov_axis_threshold;
        let invert = self.settings.invert_pov_left_right;
        let Self {
            axes,
            povs,
            listener,
            ..
        } = self;

        if let Some((id, vaxis)) = axes
            .iter_mut()
            .find(|(_, a)| a.source == Some(Bound::new(device, AxisSource::Axis(axis))))
        {
            vaxis.changed =
                (i64::from(vaxis.value) - i64::from(value)).abs() >= i64::from(threshold);
            vaxis.value = value;
            vaxis.timestamp = timestamp;
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Axis(value),
                    timestamp,
                },
            );
        }

        // Two-axis POVs only stage their position here, see `commit_axis_povs`
        for (_, vpov) in povs.iter_mut() {
            let fed = match &mut vpov.source {
                Some(Bound {
                    device: bound_device,
                    source: PovSource::Axes(pair),
                }) if *bound_device == device => pair.feed(axis, value, pov_threshold, invert),
                _ => false,
            };
            if fed {
                vpov.record_change(timestamp);
            }
        }
    }

    fn on_pov(&mut self, device: DeviceRef, pov: Pov, position: PovPosition, timestamp: Timestamp) {
        let extent = self.settings.axis_extent;
        let Self {
            axes,
            povs,
            listener,
            ..
        } = self;

        if let Some((id, vpov)) = povs
            .iter_mut()
            .find(|(_, p)| p.source == Some(Bound::new(device, PovSource::Pov(pov))))
        {
            vpov.previous_position = vpov.position;
            vpov.position = position;
            vpov.record_change(timestamp);
            vpov.changed = true;
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Pov(position),
                    timestamp,
                },
            );
        }

        for (id, vaxis) in axes.iter_mut() {
            let Some(Bound {
                device: bound_device,
                source: AxisSource::PovHalf { pov: bound_pov, up_down },
            }) = vaxis.source
            else {
                continue;
            };
            if bound_device != device || bound_pov != pov {
                continue;
            }

            let (negative, positive) = if up_down {
                (Direction::Up, Direction::Down)
            } else {
                (Direction::Left, Direction::Right)
            };
            let value = if position.contains(negative) {
                -extent
            } else if position.contains(positive) {
                extent
            } else {
                0
            };

            vaxis.changed = vaxis.value != value;
            vaxis.value = value;
            vaxis.timestamp = timestamp;
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Axis(value),
                    timestamp,
                },
            );
        }
    }

    // Commits the staged position of every two-axis POV that moved. The event
    // carries the timestamp of the last axis event seen for that POV.
    fn commit_axis_povs(&mut self) {
        let Self { povs, listener, .. } = self;

        for (id, vpov) in povs.iter_mut() {
            let Some(Bound {
                source: PovSource::Axes(pair),
                ..
            }) = vpov.source
            else {
                continue;
            };
            if pair.pending == vpov.position {
                continue;
            }

            vpov.previous_position = vpov.position;
            vpov.position = pair.pending;
            vpov.changed = true;
            emit(
                listener,
                VirtualEvent {
                    id,
                    value: VirtualValue::Pov(pair.pending),
                    timestamp: vpov.last_change_timestamp,
                },
            );
        }
    }
}
