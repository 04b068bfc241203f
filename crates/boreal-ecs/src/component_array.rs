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

//! Densely-packed per-type component storage.

use crate::Component;
use boreal_core::ecs::{EcsError, Entity};
use std::any::{type_name, Any};
use std::collections::HashMap;

/// An internal helper trait to operate on a type-erased component array.
///
/// This allows the component manager to hold every `ComponentArray<T>` in a
/// single map and to dispatch the entity-destruction sweep without knowing
/// the concrete component types.
pub(crate) trait AnyComponentArray: Send + Sync {
    /// Casts the trait object to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Casts the trait object to `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Removes the entity's component if present. Must not fail.
    fn entity_destroyed(&mut self, entity: Entity);
}

/// Dense storage for all components of a single type `T`.
///
/// Components live in a gap-free `Vec<T>`; two maps relate entities to rows
/// in both directions. Removal swap-fills the vacated row with the last
/// element so the array stays dense.
///
/// Invariant: `entity_to_row[e] == r` exactly when `row_to_entity[r] == e`,
/// and the maps cover precisely the rows `[0, components.len())`.
pub(crate) struct ComponentArray<T: Component> {
    components: Vec<T>,
    entity_to_row: HashMap<Entity, usize>,
    row_to_entity: HashMap<usize, Entity>,
}

impl<T: Component> ComponentArray<T> {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entity_to_row: HashMap::new(),
            row_to_entity: HashMap::new(),
        }
    }

    /// Appends a component for `entity`.
    ///
    /// Fails with [`EcsError::ComponentAlreadyExists`] if the entity already
    /// has a row in this array.
    pub fn insert(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        if self.entity_to_row.contains_key(&entity) {
            return Err(EcsError::ComponentAlreadyExists {
                entity,
                type_name: type_name::<T>(),
            });
        }
        let row = self.components.len();
        self.components.push(component);
        self.entity_to_row.insert(entity, row);
        self.row_to_entity.insert(row, entity);
        Ok(())
    }

    /// Removes and returns the component of `entity`, swap-filling the
    /// vacated row with the last element.
    pub fn remove(&mut self, entity: Entity) -> Result<T, EcsError> {
        let row = self
            .entity_to_row
            .remove(&entity)
            .ok_or(EcsError::ComponentNotFound {
                entity,
                type_name: type_name::<T>(),
            })?;
        let last_row = self.components.len() - 1;
        let removed = self.components.swap_remove(row);

        // If the removed row was not the last one, the previous last element
        // now lives in `row`; update both maps for the moved entity.
        if row != last_row {
            let moved = self.row_to_entity[&last_row];
            self.entity_to_row.insert(moved, row);
            self.row_to_entity.insert(row, moved);
        }
        self.row_to_entity.remove(&last_row);

        Ok(removed)
    }

    /// Non-failing removal; returns whether a component was removed.
    pub fn try_remove(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_ok()
    }

    /// Returns a reference to the component of `entity`.
    pub fn get(&self, entity: Entity) -> Result<&T, EcsError> {
        self.try_get(entity).ok_or(EcsError::ComponentNotFound {
            entity,
            type_name: type_name::<T>(),
        })
    }

    /// Returns a mutable reference to the component of `entity`.
    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        let row = self
            .entity_to_row
            .get(&entity)
            .copied()
            .ok_or(EcsError::ComponentNotFound {
                entity,
                type_name: type_name::<T>(),
            })?;
        Ok(&mut self.components[row])
    }

    /// Non-failing lookup.
    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        self.entity_to_row
            .get(&entity)
            .map(|row| &self.components[*row])
    }

    /// Non-failing mutable lookup.
    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let row = self.entity_to_row.get(&entity).copied()?;
        Some(&mut self.components[row])
    }

    /// Returns true if `entity` has a component in this array.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_row.contains_key(&entity)
    }

    /// Returns the number of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }
}

impl<T: Component> AnyComponentArray for ComponentArray<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn entity_destroyed(&mut self, entity: Entity) {
        // Destruction must not fail: absent rows are simply skipped.
        self.try_remove(entity);
    }
}
