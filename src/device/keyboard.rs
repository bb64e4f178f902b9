use super::{Device, DeviceCore, DeviceKind};
use crate::event::{timestamp_now, Key, RawPart, Timestamp};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
enum KeyboardInput {
    Key {
        key: Key,
        pressed: bool,
        timestamp: Timestamp,
    },
    CharacterMode(bool),
}

/// Cloneable handle the host's window loop uses to feed a [`KeyboardDevice`]
#[derive(Debug, Clone)]
pub struct KeyboardFeed {
    sender: mpsc::UnboundedSender<KeyboardInput>,
}

impl KeyboardFeed {
    pub fn press(&self, key: Key) {
        self.push_key_at(key, true, timestamp_now());
    }

    pub fn release(&self, key: Key) {
        self.push_key_at(key, false, timestamp_now());
    }

    /// Queues a key transition with an explicit timestamp
    pub fn push_key_at(&self, key: Key, pressed: bool, timestamp: Timestamp) {
        self.send(KeyboardInput::Key {
            key,
            pressed,
            timestamp,
        });
    }

    /// Switches text entry on or off, in order with the queued keys
    pub fn set_character_mode(&self, enabled: bool) {
        self.send(KeyboardInput::CharacterMode(enabled));
    }

    fn send(&self, input: KeyboardInput) {
        if self.sender.send(input).is_err() {
            debug!("Keyboard dropped, ignoring {:?}", input);
        }
    }
}

/// Keyboard fed by the host's window loop
///
/// Input is queued through a [`KeyboardFeed`] and turned into raw events on
/// the next [`Device::read_inputs`]. In character mode the keyboard is used
/// for text entry and reports no key events.
#[derive(Debug)]
pub struct KeyboardDevice {
    core: DeviceCore,
    feed: KeyboardFeed,
    queue: mpsc::UnboundedReceiver<KeyboardInput>,
    character_mode: bool,
}

impl KeyboardDevice {
    pub fn new() -> Self {
        let (sender, queue) = mpsc::unbounded_channel();
        Self {
            core: DeviceCore::new(DeviceKind::Keyboard, 0, "Keyboard"),
            feed: KeyboardFeed { sender },
            queue,
            character_mode: false,
        }
    }

    pub fn feed(&self) -> KeyboardFeed {
        self.feed.clone()
    }

    pub fn character_mode(&self) -> bool {
        self.character_mode
    }
}

impl Default for KeyboardDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for KeyboardDevice {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        &mut self.core
    }

    fn read_inputs(&mut self) -> bool {
        let mut discarded = 0;
        while let Ok(input) = self.queue.try_recv() {
            match input {
                KeyboardInput::CharacterMode(enabled) => {
                    if self.character_mode != enabled {
                        info!("Keyboard character mode: {}", enabled);
                    }
                    self.character_mode = enabled;
                }
                KeyboardInput::Key { .. } if !self.core.active => discarded += 1,
                KeyboardInput::Key { .. } if self.character_mode => {}
                KeyboardInput::Key {
                    key,
                    pressed,
                    timestamp,
                } => self.core.dispatch(RawPart::Key { key, pressed }, timestamp),
            }
        }
        if discarded > 0 {
            debug!("Keyboard inactive, discarded {} queued keys", discarded);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{KEY_A, KEY_SPACE};
    use crate::event::RawEvent;

    fn drain(rx: &mut mpsc::UnboundedReceiver<RawEvent>) -> Vec<RawEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn queued_keys_become_raw_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut keyboard = KeyboardDevice::new();
        let feed = keyboard.feed();
        keyboard.register_listener(Box::new(tx));
        assert!(keyboard.activate(true));

        feed.push_key_at(KEY_A, true, 10);
        feed.push_key_at(KEY_A, false, 20);
        assert!(keyboard.read_inputs());

        let handle = keyboard.handle();
        assert_eq!(
            drain(&mut rx),
            vec![RawEvent::key(handle, KEY_A, true, 10), RawEvent::key(handle, KEY_A, false, 20)]
        );
    }

    #[test]
    fn character_mode_suppresses_key_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut keyboard = KeyboardDevice::new();
        let feed = keyboard.feed();
        keyboard.register_listener(Box::new(tx));
        keyboard.activate(true);

        feed.push_key_at(KEY_A, true, 1);
        feed.set_character_mode(true);
        feed.press(KEY_SPACE);
        keyboard.read_inputs();

        assert!(keyboard.character_mode());
        assert_eq!(drain(&mut rx), vec![RawEvent::key(keyboard.handle(), KEY_A, true, 1)]);
    }

    #[test]
    fn inactive_keyboard_discards_queue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut keyboard = KeyboardDevice::new();
        keyboard.register_listener(Box::new(tx));

        keyboard.feed().press(KEY_SPACE);
        keyboard.read_inputs();
        keyboard.activate(true);
        keyboard.read_inputs();
        assert!(drain(&mut rx).is_empty());
    }
}
