use super::{Device, DeviceId, DeviceKind, DeviceRef};
use tracing::{info, warn};

/// Owns every device and resolves [`DeviceRef`] handles
///
/// Handles of removed devices stay valid values but resolve to `None`.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Vec<Box<dyn Device>>,
    next_id: u32,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a device and assigns it a fresh id
    pub fn add(&mut self, mut device: Box<dyn Device>) -> DeviceRef {
        self.next_id += 1;
        device.core_mut().assign_id(DeviceId(self.next_id));
        let handle = device.handle();
        info!("Added device {} ({}), id {}", device, device.name(), handle.id.0);
        self.devices.push(device);
        handle
    }

    pub fn remove(&mut self, handle: DeviceRef) -> Option<Box<dyn Device>> {
        let pos = self.position(handle)?;
        let device = self.devices.remove(pos);
        info!("Removed device {}", device);
        Some(device)
    }

    pub fn get(&self, handle: DeviceRef) -> Option<&dyn Device> {
        self.position(handle).map(|pos| self.devices[pos].as_ref())
    }

    pub fn get_mut(&mut self, handle: DeviceRef) -> Option<&mut (dyn Device + 'static)> {
        let pos = self.position(handle)?;
        Some(self.devices[pos].as_mut())
    }

    /// Device of the given kind and per-kind index
    pub fn find(&self, kind: DeviceKind, index: u32) -> Option<&dyn Device> {
        self.devices
            .iter()
            .find(|d| d.kind() == kind && d.index() == index)
            .map(|d| d.as_ref())
    }

    pub fn at(&self, index: usize) -> Option<&dyn Device> {
        self.devices.get(index).map(|d| d.as_ref())
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn gamepad_count(&self) -> usize {
        self.devices
            .iter()
            .filter(|d| d.kind() == DeviceKind::Gamepad)
            .count()
    }

    /// Activates the device behind a handle; false for stale handles
    pub fn activate(&mut self, handle: DeviceRef) -> bool {
        match self.get_mut(handle) {
            Some(device) => {
                let ok = device.activate(true);
                if !ok {
                    warn!("Failed to activate {}", device);
                }
                ok
            }
            None => {
                warn!("Cannot activate stale device handle {:?}", handle);
                false
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Device> {
        self.devices.iter().map(|d| d.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Device>> {
        self.devices.iter_mut()
    }

    fn position(&self, handle: DeviceRef) -> Option<usize> {
        self.devices.iter().position(|d| d.handle() == handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{KeyboardDevice, MouseDevice};

    #[test]
    fn handles_resolve_until_removed() {
        let mut registry = DeviceRegistry::new();
        let keyboard = registry.add(Box::new(KeyboardDevice::new()));
        let mouse = registry.add(Box::new(MouseDevice::new()));

        assert_ne!(keyboard.id, mouse.id);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find(DeviceKind::Mouse, 0).map(|d| d.handle()), Some(mouse));

        assert!(registry.activate(keyboard));
        assert!(registry.get(keyboard).is_some_and(|d| d.is_active()));

        assert!(registry.remove(keyboard).is_some());
        assert!(registry.get(keyboard).is_none());
        assert!(!registry.activate(keyboard));
        assert_eq!(registry.at(0).map(|d| d.handle()), Some(mouse));
    }

    #[test]
    fn display_names_follow_kind() {
        let mut registry = DeviceRegistry::new();
        let keyboard = registry.add(Box::new(KeyboardDevice::new()));
        let label = registry.get(keyboard).map(|d| d.to_string());
        assert_eq!(label.as_deref(), Some("Keyboard"));
        assert_eq!(registry.gamepad_count(), 0);
    }
}
