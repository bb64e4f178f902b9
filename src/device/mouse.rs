use super::{Device, DeviceCore, DeviceKind};
use crate::codes::{AXIS_X, AXIS_Y, AXIS_Z};
use crate::event::{timestamp_now, Key, RawPart, Timestamp};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum MouseInput {
    Motion { dx: i32, dy: i32, dz: i32 },
    Button { key: Key, pressed: bool },
}

/// Cloneable handle the host's window loop uses to feed a [`MouseDevice`]
#[derive(Debug, Clone)]
pub struct MouseFeed {
    sender: mpsc::UnboundedSender<(MouseInput, Timestamp)>,
}

impl MouseFeed {
    pub fn move_by(&self, dx: i32, dy: i32, dz: i32) {
        self.move_at(dx, dy, dz, timestamp_now());
    }

    pub fn move_at(&self, dx: i32, dy: i32, dz: i32, timestamp: Timestamp) {
        self.send(MouseInput::Motion { dx, dy, dz }, timestamp);
    }

    pub fn press(&self, key: Key) {
        self.button_at(key, true, timestamp_now());
    }

    pub fn release(&self, key: Key) {
        self.button_at(key, false, timestamp_now());
    }

    pub fn button_at(&self, key: Key, pressed: bool, timestamp: Timestamp) {
        self.send(MouseInput::Button { key, pressed }, timestamp);
    }

    fn send(&self, input: MouseInput, timestamp: Timestamp) {
        if self.sender.send((input, timestamp)).is_err() {
            debug!("Mouse dropped, ignoring {:?}", input);
        }
    }
}

/// Mouse fed by the host's window loop
///
/// Motion is relative: X and Y are the pointer deltas and Z is the wheel.
/// Axes that did not move produce no event.
#[derive(Debug)]
pub struct MouseDevice {
    core: DeviceCore,
    feed: MouseFeed,
    queue: mpsc::UnboundedReceiver<(MouseInput, Timestamp)>,
}

impl MouseDevice {
    pub fn new() -> Self {
        let (sender, queue) = mpsc::unbounded_channel();
        Self {
            core: DeviceCore::new(DeviceKind::Mouse, 0, "Mouse"),
            feed: MouseFeed { sender },
            queue,
        }
    }

    pub fn feed(&self) -> MouseFeed {
        self.feed.clone()
    }
}

impl Default for MouseDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for MouseDevice {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        &mut self.core
    }

    fn read_inputs(&mut self) -> bool {
        let mut discarded = 0;
        while let Ok((input, timestamp)) = self.queue.try_recv() {
            if !self.core.active {
                discarded += 1;
                continue;
            }
            match input {
                MouseInput::Motion { dx, dy, dz } => {
                    for (axis, value) in [(AXIS_X, dx), (AXIS_Y, dy), (AXIS_Z, dz)] {
                        if value != 0 {
                            self.core.dispatch(RawPart::Axis { axis, value }, timestamp);
                        }
                    }
                }
                MouseInput::Button { key, pressed } => {
                    self.core.dispatch(RawPart::Key { key, pressed }, timestamp);
                }
            }
        }
        if discarded > 0 {
            debug!("Mouse inactive, discarded {} queued inputs", discarded);
        }
        true
    }
}
