// Copyright 2025 the Boreal Engine contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-system entity membership maintenance.

use crate::{ComponentManager, EntitySet, GroupSystem, QuerySystem};
use boreal_core::ecs::{EcsError, Entity, Signature};
use std::any::{type_name, TypeId};
use std::collections::HashMap;

/// Bookkeeping for one registered group system.
///
/// The system box is `None` while the instance has been taken out to be
/// driven; the mask and membership set stay behind so signature events keep
/// working mid-update.
struct GroupEntry {
    system: Option<Box<dyn GroupSystem>>,
    signature: Signature,
    entities: EntitySet,
}

/// Bookkeeping for one registered query system.
struct QueryEntry {
    system: Option<Box<dyn QuerySystem>>,
    matches: fn(&ComponentManager, &Signature) -> bool,
    entities: EntitySet,
}

/// Registers systems and maintains each system's entity set as entity
/// signatures change.
///
/// The manager owns the system instances. Update order is not its concern:
/// external code drives each system explicitly through the coordinator's
/// `run_group_system` / `run_query_system`, in whatever per-frame order the
/// application chooses.
pub struct SystemManager {
    group_systems: HashMap<TypeId, GroupEntry>,
    query_systems: HashMap<TypeId, QueryEntry>,
}

impl SystemManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            group_systems: HashMap::new(),
            query_systems: HashMap::new(),
        }
    }

    /// Registers a group system with an empty (match-everything) mask.
    ///
    /// The real mask is installed through
    /// [`set_group_signature`](SystemManager::set_group_signature); do that
    /// before driving updates. Fails with
    /// [`EcsError::SystemAlreadyRegistered`] on a duplicate.
    pub fn register_group_system<S: GroupSystem>(&mut self, system: S) -> Result<(), EcsError> {
        let type_id = TypeId::of::<S>();
        if self.group_systems.contains_key(&type_id) {
            return Err(EcsError::SystemAlreadyRegistered {
                type_name: type_name::<S>(),
            });
        }
        self.group_systems.insert(
            type_id,
            GroupEntry {
                system: Some(Box::new(system)),
                signature: Signature::empty(),
                entities: EntitySet::new(),
            },
        );
        log::debug!("registered group system '{}'", type_name::<S>());
        Ok(())
    }

    /// Registers a query system, capturing its membership predicate.
    ///
    /// Fails with [`EcsError::SystemAlreadyRegistered`] on a duplicate.
    pub fn register_query_system<S: QuerySystem>(&mut self, system: S) -> Result<(), EcsError> {
        let type_id = TypeId::of::<S>();
        if self.query_systems.contains_key(&type_id) {
            return Err(EcsError::SystemAlreadyRegistered {
                type_name: type_name::<S>(),
            });
        }
        self.query_systems.insert(
            type_id,
            QueryEntry {
                system: Some(Box::new(system)),
                matches: S::matches,
                entities: EntitySet::new(),
            },
        );
        log::debug!("registered query system '{}'", type_name::<S>());
        Ok(())
    }

    /// Replaces the signature mask of a registered group system.
    ///
    /// Fails with [`EcsError::SystemNotRegistered`]. The caller (the
    /// coordinator) is responsible for re-deriving membership for entities
    /// that already existed.
    pub fn set_group_signature<S: GroupSystem>(
        &mut self,
        signature: Signature,
    ) -> Result<(), EcsError> {
        let entry = self
            .group_systems
            .get_mut(&TypeId::of::<S>())
            .ok_or(EcsError::SystemNotRegistered {
                type_name: type_name::<S>(),
            })?;
        entry.signature = signature;
        Ok(())
    }

    /// Re-derives every system's membership of `entity` from its new
    /// signature.
    ///
    /// Group systems use the mask test `signature ⊇ mask`; query systems use
    /// their captured predicate. O(number of systems).
    pub fn entity_signature_changed(
        &mut self,
        entity: Entity,
        signature: Signature,
        components: &ComponentManager,
    ) {
        for entry in self.group_systems.values_mut() {
            if signature.contains_all(&entry.signature) {
                entry.entities.insert(entity);
            } else {
                entry.entities.remove(&entity);
            }
        }
        for entry in self.query_systems.values_mut() {
            if (entry.matches)(components, &signature) {
                entry.entities.insert(entity);
            } else {
                entry.entities.remove(&entity);
            }
        }
    }

    /// Erases the entity from every system's membership set. Never fails.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in self.group_systems.values_mut() {
            entry.entities.remove(&entity);
        }
        for entry in self.query_systems.values_mut() {
            entry.entities.remove(&entity);
        }
    }

    /// Returns the current membership of a group system.
    pub fn group_entities<S: GroupSystem>(&self) -> Result<&EntitySet, EcsError> {
        self.group_systems
            .get(&TypeId::of::<S>())
            .map(|entry| &entry.entities)
            .ok_or(EcsError::SystemNotRegistered {
                type_name: type_name::<S>(),
            })
    }

    /// Returns the current membership of a query system.
    pub fn query_entities<S: QuerySystem>(&self) -> Result<&EntitySet, EcsError> {
        self.query_systems
            .get(&TypeId::of::<S>())
            .map(|entry| &entry.entities)
            .ok_or(EcsError::SystemNotRegistered {
                type_name: type_name::<S>(),
            })
    }

    /// Takes a group system out for an update, leaving its bookkeeping in
    /// place. Returns the instance and a snapshot of its membership.
    pub(crate) fn take_group_system<S: GroupSystem>(
        &mut self,
    ) -> Result<(Box<dyn GroupSystem>, EntitySet), EcsError> {
        let entry = self
            .group_systems
            .get_mut(&TypeId::of::<S>())
            .ok_or(EcsError::SystemNotRegistered {
                type_name: type_name::<S>(),
            })?;
        let system = entry.system.take().ok_or(EcsError::SystemNotRegistered {
            type_name: type_name::<S>(),
        })?;
        Ok((system, entry.entities.clone()))
    }

    /// Puts a group system back after an update.
    pub(crate) fn restore_group_system<S: GroupSystem>(&mut self, system: Box<dyn GroupSystem>) {
        if let Some(entry) = self.group_systems.get_mut(&TypeId::of::<S>()) {
            entry.system = Some(system);
        }
    }

    /// Takes a query system out for an update.
    pub(crate) fn take_query_system<S: QuerySystem>(
        &mut self,
    ) -> Result<(Box<dyn QuerySystem>, EntitySet), EcsError> {
        let entry = self
            .query_systems
            .get_mut(&TypeId::of::<S>())
            .ok_or(EcsError::SystemNotRegistered {
                type_name: type_name::<S>(),
            })?;
        let system = entry.system.take().ok_or(EcsError::SystemNotRegistered {
            type_name: type_name::<S>(),
        })?;
        Ok((system, entry.entities.clone()))
    }

    /// Puts a query system back after an update.
    pub(crate) fn restore_query_system<S: QuerySystem>(&mut self, system: Box<dyn QuerySystem>) {
        if let Some(entry) = self.query_systems.get_mut(&TypeId::of::<S>()) {
            entry.system = Some(system);
        }
    }
}

impl Default for SystemManager {
    fn default() -> Self {
        Self::new()
    }
}
