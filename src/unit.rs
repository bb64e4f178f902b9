//! The inputs unit: devices, virtual controllers and registries in one place
//!
//! A host creates one [`InputsUnit`], adds its devices, defines virtual
//! controllers and calls [`InputsUnit::process`] once per frame.

use crate::device::{Device, DeviceKind, DeviceRef, DeviceRegistry, ListenerId, RawEventListener};
use crate::error::{DeviceError, RegistryError};
use crate::event::{RawEvent, VirtualId};
use crate::registry::{ShortcutRegistry, VirtualIdRegistry};
use crate::remap::{ControllerSettings, VirtualController};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Counters accumulated since the unit was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStats {
    pub ticks: u64,
    pub raw_events: u64,
}

pub struct InputsUnit {
    devices: DeviceRegistry,

    // The unit's own listener on every device feeds this channel
    event_sender: mpsc::UnboundedSender<RawEvent>,
    event_receiver: mpsc::UnboundedReceiver<RawEvent>,
    listener_ids: HashMap<DeviceRef, ListenerId>,
    batch: Vec<RawEvent>,

    controllers: BTreeMap<String, VirtualController>,
    virtual_ids: VirtualIdRegistry,
    shortcuts: ShortcutRegistry,
    settings: ControllerSettings,
    stats: UnitStats,
}

impl InputsUnit {
    pub fn new(settings: ControllerSettings) -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();
        info!("Inputs unit created with settings: {:?}", settings);
        Self {
            devices: DeviceRegistry::new(),
            event_sender,
            event_receiver,
            listener_ids: HashMap::new(),
            batch: Vec::new(),
            controllers: BTreeMap::new(),
            virtual_ids: VirtualIdRegistry::new(),
            shortcuts: ShortcutRegistry::new(),
            settings,
            stats: UnitStats::default(),
        }
    }

    /// Polls the active devices and feeds the resulting batch to every
    /// virtual controller, in name order
    pub fn process(&mut self) {
        for device in self.devices.iter_mut() {
            if device.is_active() && !device.read_inputs() {
                warn!("Failed to read inputs from {}", device);
            }
        }

        self.collect_batch();

        for controller in self.controllers.values_mut() {
            controller.process(&self.batch);
        }

        self.stats.ticks += 1;
        self.stats.raw_events += self.batch.len() as u64;
        self.batch.clear();
    }

    /// Polls every device and hands the events to `listener` instead of the
    /// virtual controllers. Used by "press a key to bind" screens.
    ///
    /// Returns the number of forwarded events.
    pub fn scan(&mut self, listener: &mut dyn RawEventListener) -> usize {
        for device in self.devices.iter_mut() {
            if !device.read_inputs() {
                warn!("Failed to read inputs from {}", device);
            }
        }

        self.collect_batch();
        let count = self.batch.len();
        for event in self.batch.drain(..) {
            listener.on_event(&event);
        }
        debug!("Scan forwarded {} events", count);
        count
    }

    // Drains the channel into the batch
    fn collect_batch(&mut self) {
        loop {
            match self.event_receiver.try_recv() {
                Ok(event) => self.batch.push(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // The unit holds a sender itself, so this cannot happen
                    error!("Raw event channel disconnected");
                    break;
                }
            }
        }
        if !self.batch.is_empty() {
            debug!("Collected batch of {} raw events", self.batch.len());
        }
    }

    pub fn stats(&self) -> UnitStats {
        self.stats
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    // ---- Devices ----

    /// Takes ownership of a device and starts listening to it
    pub fn add_device(&mut self, mut device: Box<dyn Device>) -> DeviceRef {
        let listener_id = device.register_listener(Box::new(self.event_sender.clone()));
        let handle = self.devices.add(device);
        self.listener_ids.insert(handle, listener_id);
        handle
    }

    /// Removes a device and detaches the unit from it.
    ///
    /// Bindings referring to it stay in place and simply stop receiving events.
    pub fn remove_device(&mut self, handle: DeviceRef) -> Result<Box<dyn Device>, DeviceError> {
        let Some(mut device) = self.devices.remove(handle) else {
            warn!("Cannot remove stale device handle {:?}", handle);
            return Err(DeviceError::UnknownDevice(format!("{:?}", handle)));
        };
        if let Some(listener_id) = self.listener_ids.remove(&handle) {
            device.remove_listener(listener_id);
        }
        Ok(device)
    }

    pub fn activate_device(&mut self, handle: DeviceRef, active: bool) -> bool {
        match self.devices.get_mut(handle) {
            Some(device) => device.activate(active),
            None => {
                warn!("Cannot change activation of stale device handle {:?}", handle);
                false
            }
        }
    }

    pub fn device(&self, kind: DeviceKind, index: u32) -> Option<&dyn Device> {
        self.devices.find(kind, index)
    }

    pub fn device_at(&self, index: usize) -> Option<&dyn Device> {
        self.devices.at(index)
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn gamepad_count(&self) -> usize {
        self.devices.gamepad_count()
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.devices
    }

    // ---- Virtual controllers ----

    pub fn create_virtual_controller(
        &mut self,
        name: &str,
    ) -> Result<&mut VirtualController, RegistryError> {
        if self.controllers.contains_key(name) {
            error!("Virtual controller '{}' already exists", name);
            return Err(RegistryError::ControllerExists(name.to_string()));
        }

        info!("Creating virtual controller '{}'", name);
        let controller = VirtualController::new(name, self.settings.clone());
        Ok(self.controllers.entry(name.to_string()).or_insert(controller))
    }

    pub fn virtual_controller(&self, name: &str) -> Option<&VirtualController> {
        self.controllers.get(name)
    }

    pub fn virtual_controller_mut(&mut self, name: &str) -> Option<&mut VirtualController> {
        self.controllers.get_mut(name)
    }

    /// The controller together with the shortcut registry its registration
    /// methods need
    pub fn virtual_controller_with_shortcuts(
        &mut self,
        name: &str,
    ) -> Option<(&mut VirtualController, &mut ShortcutRegistry)> {
        let controller = self.controllers.get_mut(name)?;
        Some((controller, &mut self.shortcuts))
    }

    /// Name of the controller at `index`, in name order
    pub fn virtual_controller_name(&self, index: usize) -> Option<&str> {
        self.controllers.keys().nth(index).map(String::as_str)
    }

    pub fn virtual_controller_count(&self) -> usize {
        self.controllers.len()
    }

    pub fn destroy_virtual_controller(&mut self, name: &str) -> bool {
        let removed = self.controllers.remove(name).is_some();
        if removed {
            info!("Destroyed virtual controller '{}'", name);
        }
        removed
    }

    /// Enables or disables a controller, activating its devices as needed.
    /// False if the controller is unknown or a device failed to activate.
    pub fn enable_virtual_controller(&mut self, name: &str, enable: bool) -> bool {
        match self.controllers.get_mut(name) {
            Some(controller) => controller.enable(enable, &mut self.devices),
            None => {
                warn!("Unknown virtual controller '{}'", name);
                false
            }
        }
    }

    // ---- Registries ----

    pub fn register_virtual_id(
        &mut self,
        name: &str,
        id: Option<VirtualId>,
    ) -> Result<VirtualId, RegistryError> {
        self.virtual_ids.register(name, id)
    }

    pub fn virtual_id(&self, name: &str) -> Option<VirtualId> {
        self.virtual_ids.id(name)
    }

    pub fn virtual_name(&self, id: VirtualId) -> Option<&str> {
        self.virtual_ids.name(id)
    }

    pub fn register_shortcut(&mut self, shortcut: &str, id: VirtualId) -> Result<(), RegistryError> {
        self.shortcuts.register(shortcut, id)
    }

    pub fn virtual_id_from_shortcut(&self, shortcut: &str) -> Option<VirtualId> {
        self.shortcuts.virtual_id(shortcut)
    }

    pub fn shortcut_from_virtual_id(&self, id: VirtualId) -> Option<&str> {
        self.shortcuts.shortcut_of(id)
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutRegistry {
        &mut self.shortcuts
    }
}

impl Default for InputsUnit {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}
