use super::binding::{AxisSource, BindingTable, PovSource, VirtualAxis, VirtualKey, VirtualPov};
use super::listener::VirtualEventListener;
use super::settings::ControllerSettings;
use crate::device::{DeviceRef, DeviceRegistry};
use crate::error::RegistryError;
use crate::event::{Key, VirtualId};
use crate::pov::{PovPosition, PovShortcuts};
use crate::registry::ShortcutRegistry;
use std::fmt;
use tracing::{debug, info, warn};

/// A set of virtual keys, axes and POVs fed from raw events
///
/// IDs are unique per part kind: the same ID may name a key and an axis.
/// Controllers start enabled.
pub struct VirtualController {
    pub(super) name: String,
    pub(super) keys: BindingTable<VirtualKey>,
    pub(super) axes: BindingTable<VirtualAxis>,
    pub(super) povs: BindingTable<VirtualPov>,
    pub(super) enabled: bool,
    pub(super) listener: Option<Box<dyn VirtualEventListener>>,
    pub(super) settings: ControllerSettings,
}

impl VirtualController {
    pub fn new(name: impl Into<String>, settings: ControllerSettings) -> Self {
        Self {
            name: name.into(),
            keys: BindingTable::default(),
            axes: BindingTable::default(),
            povs: BindingTable::default(),
            enabled: true,
            listener: None,
            settings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Installs (or clears) the listener notified during [`process`](Self::process)
    pub fn set_listener(&mut self, listener: Option<Box<dyn VirtualEventListener>>) {
        self.listener = listener;
    }

    // ---- Enable / disable ----

    /// Enables or disables the controller.
    ///
    /// Enabling activates the device behind every bound part and returns
    /// false if any activation failed. Disabling drops all state to rest.
    pub fn enable(&mut self, enable: bool, devices: &mut DeviceRegistry) -> bool {
        self.enabled = enable;

        if !enable {
            info!("Disabling virtual controller '{}'", self.name);
            for (_, key) in self.keys.iter_mut() {
                key.pressed = false;
                key.toggled = false;
            }
            for (_, axis) in self.axes.iter_mut() {
                axis.value = 0;
                axis.changed = false;
            }
            for (_, pov) in self.povs.iter_mut() {
                pov.position = PovPosition::Center;
                pov.previous_position = PovPosition::Center;
            }
            return true;
        }

        info!("Enabling virtual controller '{}'", self.name);
        let handles: Vec<DeviceRef> = self
            .keys
            .iter()
            .filter_map(|(_, key)| key.source.map(|b| b.device))
            .chain(self.axes.iter().filter_map(|(_, axis)| axis.source.map(|b| b.device)))
            .chain(self.povs.iter().filter_map(|(_, pov)| pov.source.map(|b| b.device)))
            .collect();

        let mut ok = true;
        for handle in handles {
            ok &= devices.activate(handle);
        }
        if !ok {
            warn!("Virtual controller '{}' enabled with inactive devices", self.name);
        }
        ok
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ---- Placeholder registration ----

    /// Declares a key that is not bound to any device yet; no-op if the ID exists
    pub fn register_virtual_key(
        &mut self,
        id: VirtualId,
        shortcut: Option<&str>,
        shortcuts: &mut ShortcutRegistry,
    ) -> Result<(), RegistryError> {
        if self.keys.contains(id) {
            return Ok(());
        }
        let has_shortcut = register_key_shortcut(id, shortcut, shortcuts)?;
        self.keys.insert(id, VirtualKey::placeholder(has_shortcut));
        debug!("Registered virtual key {} on '{}'", id, self.name);
        Ok(())
    }

    /// Declares an axis that is not bound to any device yet; no-op if the ID exists
    pub fn register_virtual_axis(&mut self, id: VirtualId) {
        if self.axes.contains(id) {
            return;
        }
        self.axes.insert(id, VirtualAxis::default());
        debug!("Registered virtual axis {} on '{}'", id, self.name);
    }

    /// Declares a POV that is not bound to any device yet; no-op if the ID exists
    pub fn register_virtual_pov(
        &mut self,
        id: VirtualId,
        pov_shortcuts: Option<PovShortcuts>,
        shortcuts: &mut ShortcutRegistry,
    ) -> Result<(), RegistryError> {
        if self.povs.contains(id) {
            return Ok(());
        }
        if let Some(pov_shortcuts) = &pov_shortcuts {
            register_pov_shortcuts(id, pov_shortcuts, shortcuts)?;
        }
        self.povs.insert(id, VirtualPov::placeholder(pov_shortcuts));
        debug!("Registered virtual POV {} on '{}'", id, self.name);
        Ok(())
    }

    // ---- Bound registration ----

    /// Binds a virtual key to a device key, replacing any previous binding
    pub fn add_virtual_key(
        &mut self,
        id: VirtualId,
        device: DeviceRef,
        key: Key,
        shortcut: Option<&str>,
        shortcuts: &mut ShortcutRegistry,
    ) -> Result<(), RegistryError> {
        let has_shortcut = register_key_shortcut(id, shortcut, shortcuts)?;
        self.keys.insert(id, VirtualKey::bound(device, key, has_shortcut));
        debug!("Bound virtual key {} to {:?} key {}", id, device.kind, key);
        Ok(())
    }

    /// Binds a virtual axis, replacing any previous binding
    pub fn add_virtual_axis(&mut self, id: VirtualId, device: DeviceRef, source: AxisSource) {
        self.axes.insert(id, VirtualAxis::bound(device, source));
        debug!("Bound virtual axis {} to {:?} {:?}", id, device.kind, source);
    }

    /// Binds a virtual POV, replacing any previous binding
    pub fn add_virtual_pov(
        &mut self,
        id: VirtualId,
        device: DeviceRef,
        source: PovSource,
        pov_shortcuts: Option<PovShortcuts>,
        shortcuts: &mut ShortcutRegistry,
    ) -> Result<(), RegistryError> {
        if let Some(pov_shortcuts) = &pov_shortcuts {
            register_pov_shortcuts(id, pov_shortcuts, shortcuts)?;
        }
        self.povs
            .insert(id, VirtualPov::bound(device, source, pov_shortcuts));
        debug!("Bound virtual POV {} to {:?} {:?}", id, device.kind, source);
        Ok(())
    }

    // ---- Key queries ----

    pub fn is_key_pressed(&self, id: VirtualId) -> bool {
        self.keys.get(id).is_some_and(|key| key.pressed)
    }

    pub fn was_key_toggled(&self, id: VirtualId) -> bool {
        self.keys.get(id).is_some_and(|key| key.toggled)
    }

    pub fn was_key_pressed(&self, id: VirtualId) -> bool {
        self.keys.get(id).is_some_and(VirtualKey::was_pressed)
    }

    pub fn was_key_released(&self, id: VirtualId) -> bool {
        self.keys.get(id).is_some_and(VirtualKey::was_released)
    }

    pub fn key_pressed_duration(&self, id: VirtualId) -> u64 {
        self.keys.get(id).map_or(0, VirtualKey::pressed_duration)
    }

    // ---- Axis queries ----

    pub fn axis_value(&self, id: VirtualId) -> i32 {
        self.axes.get(id).map_or(0, |axis| axis.value)
    }

    pub fn was_axis_changed(&self, id: VirtualId) -> bool {
        self.axes.get(id).is_some_and(|axis| axis.changed)
    }

    // ---- POV queries ----

    pub fn pov_position(&self, id: VirtualId) -> PovPosition {
        self.povs.get(id).map(|pov| pov.position).unwrap_or_default()
    }

    pub fn pov_previous_position(&self, id: VirtualId) -> PovPosition {
        self.povs
            .get(id)
            .map(|pov| pov.previous_position)
            .unwrap_or_default()
    }

    pub fn was_pov_changed(&self, id: VirtualId) -> bool {
        self.povs.get(id).is_some_and(|pov| pov.changed)
    }

    pub fn pov_position_from_shortcut(&self, id: VirtualId, shortcut: &str) -> PovPosition {
        self.povs
            .get(id)
            .map(|pov| pov.position_from_shortcut(shortcut))
            .unwrap_or_default()
    }

    pub fn pov_pressed_duration(&self, id: VirtualId) -> u64 {
        self.povs.get(id).map_or(0, VirtualPov::pressed_duration)
    }

    // ---- Introspection ----

    pub fn is_key(&self, id: VirtualId) -> bool {
        self.keys.contains(id)
    }

    pub fn is_axis(&self, id: VirtualId) -> bool {
        self.axes.contains(id)
    }

    pub fn is_pov(&self, id: VirtualId) -> bool {
        self.povs.contains(id)
    }

    pub fn virtual_key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn virtual_axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn virtual_pov_count(&self) -> usize {
        self.povs.len()
    }

    /// Key at `index` in insertion order; panics when out of range
    pub fn virtual_key_at(&self, index: usize) -> (VirtualId, &VirtualKey) {
        self.keys.at(index)
    }

    /// Axis at `index` in insertion order; panics when out of range
    pub fn virtual_axis_at(&self, index: usize) -> (VirtualId, &VirtualAxis) {
        self.axes.at(index)
    }

    /// POV at `index` in insertion order; panics when out of range
    pub fn virtual_pov_at(&self, index: usize) -> (VirtualId, &VirtualPov) {
        self.povs.at(index)
    }

    pub fn virtual_key(&self, id: VirtualId) -> Option<&VirtualKey> {
        self.keys.get(id)
    }

    pub fn virtual_axis(&self, id: VirtualId) -> Option<&VirtualAxis> {
        self.axes.get(id)
    }

    pub fn virtual_pov(&self, id: VirtualId) -> Option<&VirtualPov> {
        self.povs.get(id)
    }
}

impl fmt::Debug for VirtualController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualController")
            .field("name", &self.name)
            .field("keys", &self.keys)
            .field("axes", &self.axes)
            .field("povs", &self.povs)
            .field("enabled", &self.enabled)
            .field("listener", &self.listener.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

// Returns whether the key ended up with a shortcut
fn register_key_shortcut(
    id: VirtualId,
    shortcut: Option<&str>,
    shortcuts: &mut ShortcutRegistry,
) -> Result<bool, RegistryError> {
    match shortcut.filter(|s| !s.is_empty()) {
        Some(shortcut) => {
            shortcuts.register(shortcut, id)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

// All eight shortcuts or none
fn register_pov_shortcuts(
    id: VirtualId,
    pov_shortcuts: &PovShortcuts,
    shortcuts: &mut ShortcutRegistry,
) -> Result<(), RegistryError> {
    let all = pov_shortcuts.all();
    if let Some((_, taken)) = all.iter().find(|(_, s)| !shortcuts.can_register(s, id)) {
        // Reports the conflict
        return shortcuts.register(taken, id);
    }
    for (_, shortcut) in &all {
        shortcuts.register(shortcut, id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceId, DeviceKind};

    fn keyboard() -> DeviceRef {
        DeviceRef::new(DeviceId(1), DeviceKind::Keyboard)
    }

    #[test]
    fn placeholders_do_not_override_existing_parts() {
        let mut shortcuts = ShortcutRegistry::new();
        let mut controller = VirtualController::new("test", ControllerSettings::default());
        controller
            .add_virtual_key(1, keyboard(), 30, None, &mut shortcuts)
            .unwrap();
        controller
            .register_virtual_key(1, Some("JUMP"), &mut shortcuts)
            .unwrap();

        assert!(controller.virtual_key(1).is_some_and(|k| k.source.is_some()));
        assert_eq!(shortcuts.virtual_id("JUMP"), None);
        assert!(controller.is_key(1));
        assert!(!controller.is_axis(1));
    }

    #[test]
    fn pov_shortcuts_register_atomically() {
        let mut shortcuts = ShortcutRegistry::new();
        shortcuts.register("NE", 99).unwrap();

        let mut controller = VirtualController::new("test", ControllerSettings::default());
        let result = controller.register_virtual_pov(
            4,
            Some(PovShortcuts::new("N", "S", "W", "E")),
            &mut shortcuts,
        );

        assert!(result.is_err());
        assert!(!controller.is_pov(4));
        assert_eq!(shortcuts.virtual_id("N"), None);
        assert_eq!(shortcuts.len(), 1);
    }

    #[test]
    fn pov_shortcuts_decode() {
        let mut shortcuts = ShortcutRegistry::new();
        let mut controller = VirtualController::new("test", ControllerSettings::default());
        controller
            .register_virtual_pov(4, Some(PovShortcuts::new("U", "D", "L", "R")), &mut shortcuts)
            .unwrap();

        assert_eq!(shortcuts.len(), 8);
        assert_eq!(shortcuts.virtual_id("DL"), Some(4));
        assert_eq!(controller.pov_position_from_shortcut(4, "UR"), PovPosition::UpRight);
        assert_eq!(controller.pov_position_from_shortcut(5, "UR"), PovPosition::Center);
    }

    #[test]
    fn unknown_ids_read_as_rest() {
        let controller = VirtualController::new("test", ControllerSettings::default());
        assert!(!controller.is_key_pressed(42));
        assert_eq!(controller.axis_value(42), 0);
        assert_eq!(controller.pov_position(42), PovPosition::Center);
        assert_eq!(controller.key_pressed_duration(42), 0);
        assert!(controller.is_enabled());
    }

    #[test]
    fn enable_reports_stale_devices() {
        let mut shortcuts = ShortcutRegistry::new();
        let mut devices = DeviceRegistry::new();
        let mut controller = VirtualController::new("test", ControllerSettings::default());
        controller
            .add_virtual_key(1, keyboard(), 30, None, &mut shortcuts)
            .unwrap();

        assert!(!controller.enable(true, &mut devices));
        assert!(controller.is_enabled());
    }
}
