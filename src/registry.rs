//! Name and shortcut registries for virtual IDs
//!
//! Both are plain lookup tables used by configuration tooling; the engine
//! itself only ever sees numeric [`VirtualId`]s.

use crate::error::RegistryError;
use crate::event::VirtualId;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Bidirectional name <-> virtual ID table
#[derive(Debug, Clone, Default)]
pub struct VirtualIdRegistry {
    ids: BTreeMap<String, VirtualId>,
}

impl VirtualIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a name and returns its ID.
    ///
    /// Without an explicit ID (or with 0) the next free ID is assigned, one
    /// more than the current maximum, starting at 1. Re-registering a known
    /// name without an ID returns the existing ID.
    pub fn register(
        &mut self,
        name: &str,
        id: Option<VirtualId>,
    ) -> Result<VirtualId, RegistryError> {
        let requested = id.filter(|id| *id != 0);

        if let Some(&existing) = self.ids.get(name) {
            if requested.is_some() {
                error!("Can't create a virtual ID, the name '{}' already exists", name);
                return Err(RegistryError::NameTaken(name.to_string()));
            }
            return Ok(existing);
        }

        let id = match requested {
            Some(id) => {
                if let Some(owner) = self.name(id) {
                    error!(
                        "Can't create a virtual ID, the supplied ID {} already exists",
                        id
                    );
                    return Err(RegistryError::IdTaken {
                        id,
                        owner: owner.to_string(),
                    });
                }
                id
            }
            None => self.ids.values().max().map_or(1, |max| max + 1),
        };

        self.ids.insert(name.to_string(), id);
        info!("Virtual ID '{}' registered with the value {}", name, id);
        Ok(id)
    }

    pub fn id(&self, name: &str) -> Option<VirtualId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: VirtualId) -> Option<&str> {
        self.ids
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Shortcut string <-> virtual ID table
///
/// One ID may own several shortcuts (a POV owns eight), but a shortcut
/// belongs to exactly one ID.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    shortcuts: BTreeMap<String, VirtualId>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `shortcut` is free or already owned by `id`
    pub fn can_register(&self, shortcut: &str, id: VirtualId) -> bool {
        self.shortcuts.get(shortcut).map_or(true, |owner| *owner == id)
    }

    /// Maps `shortcut` to `id`; registering the same pair twice is a no-op
    pub fn register(&mut self, shortcut: &str, id: VirtualId) -> Result<(), RegistryError> {
        match self.shortcuts.get(shortcut) {
            Some(&owner) if owner == id => {
                debug!("Shortcut '{}' already registered for virtual ID {}", shortcut, id);
                Ok(())
            }
            Some(&owner) => {
                error!(
                    "Can't register the shortcut '{}' for virtual ID {}, already used by {}",
                    shortcut, id, owner
                );
                Err(RegistryError::ShortcutTaken {
                    shortcut: shortcut.to_string(),
                    owner,
                })
            }
            None => {
                self.shortcuts.insert(shortcut.to_string(), id);
                debug!("Shortcut '{}' registered for virtual ID {}", shortcut, id);
                Ok(())
            }
        }
    }

    pub fn virtual_id(&self, shortcut: &str) -> Option<VirtualId> {
        self.shortcuts.get(shortcut).copied()
    }

    /// First shortcut of `id`, in lexical order
    pub fn shortcut_of(&self, id: VirtualId) -> Option<&str> {
        self.shortcuts
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(shortcut, _)| shortcut.as_str())
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}
