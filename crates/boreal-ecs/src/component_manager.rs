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

//! Component type registration and per-type storage dispatch.

use crate::component_array::{AnyComponentArray, ComponentArray};
use crate::{Component, ComponentType};
use boreal_core::ecs::{EcsError, Entity, MAX_COMPONENTS};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// A per-type hook table captured at registration time.
///
/// Registrars let the manager answer "which components does this entity
/// have" without naming any concrete type: each entry closes over one
/// registered `T` through plain fn pointers.
struct ComponentRegistrar {
    component_type: ComponentType,
    type_name: &'static str,
    has: fn(&ComponentManager, Entity) -> bool,
    get: fn(&ComponentManager, Entity) -> Option<&dyn Any>,
}

fn has_component_erased<T: Component>(components: &ComponentManager, entity: Entity) -> bool {
    components
        .array::<T>()
        .map_or(false, |array| array.contains(entity))
}

fn get_component_erased<T: Component>(
    components: &ComponentManager,
    entity: Entity,
) -> Option<&dyn Any> {
    components
        .array::<T>()
        .ok()?
        .try_get(entity)
        .map(|component| component as &dyn Any)
}

/// Owns one dense [`ComponentArray`] per registered component type and maps
/// each type to its dense index.
///
/// Component types must be registered before use; every distinct type
/// receives the next index in `[0, MAX_COMPONENTS)`, which is also its bit
/// position inside entity signatures.
pub struct ComponentManager {
    indices: HashMap<TypeId, ComponentType>,
    arrays: HashMap<TypeId, Box<dyn AnyComponentArray>>,
    /// One entry per registered type, in registration (= index) order.
    registrars: Vec<ComponentRegistrar>,
}

impl ComponentManager {
    /// Creates an empty manager with no registered types.
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            arrays: HashMap::new(),
            registrars: Vec::new(),
        }
    }

    /// Registers the component type `T`, allocating its dense index.
    ///
    /// Fails with [`EcsError::ComponentAlreadyRegistered`] on a duplicate
    /// registration and [`EcsError::TooManyComponents`] once all
    /// `MAX_COMPONENTS` indices are in use.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentType, EcsError> {
        let type_id = TypeId::of::<T>();
        if self.indices.contains_key(&type_id) {
            return Err(EcsError::ComponentAlreadyRegistered {
                type_name: type_name::<T>(),
            });
        }
        let next = self.registrars.len();
        if next >= MAX_COMPONENTS {
            return Err(EcsError::TooManyComponents {
                capacity: MAX_COMPONENTS,
            });
        }

        let component_type = ComponentType::new(next as u8);
        self.indices.insert(type_id, component_type);
        self.arrays
            .insert(type_id, Box::new(ComponentArray::<T>::new()));
        self.registrars.push(ComponentRegistrar {
            component_type,
            type_name: type_name::<T>(),
            has: has_component_erased::<T>,
            get: get_component_erased::<T>,
        });

        log::debug!(
            "registered component type '{}' as {component_type}",
            type_name::<T>()
        );
        Ok(component_type)
    }

    /// Returns the dense index of `T`.
    ///
    /// Fails with [`EcsError::ComponentNotRegistered`] if `T` has not been
    /// registered.
    pub fn component_type<T: Component>(&self) -> Result<ComponentType, EcsError> {
        self.indices
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or(EcsError::ComponentNotRegistered {
                type_name: type_name::<T>(),
            })
    }

    /// Adds a component to an entity.
    ///
    /// Fails with [`EcsError::ComponentAlreadyExists`] if the entity already
    /// owns a `T`.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), EcsError> {
        self.array_mut::<T>()?.insert(entity, component)
    }

    /// Removes and returns the `T` component of an entity.
    ///
    /// Fails with [`EcsError::ComponentNotFound`].
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.array_mut::<T>()?.remove(entity)
    }

    /// Non-failing removal; returns whether a removal occurred.
    ///
    /// Unregistered component types simply report `false`.
    pub fn try_remove_component<T: Component>(&mut self, entity: Entity) -> bool {
        match self.array_mut::<T>() {
            Ok(array) => array.try_remove(entity),
            Err(_) => false,
        }
    }

    /// Returns a reference to the `T` component of an entity.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.array::<T>()?.get(entity)
    }

    /// Returns a mutable reference to the `T` component of an entity.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.array_mut::<T>()?.get_mut(entity)
    }

    /// Non-failing lookup.
    pub fn try_get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.array::<T>().ok()?.try_get(entity)
    }

    /// Non-failing mutable lookup.
    pub fn try_get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.array_mut::<T>().ok()?.try_get_mut(entity)
    }

    /// Returns true if the entity owns a `T` component.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.try_get_component::<T>(entity).is_some()
    }

    /// Removes the entity's row from every registered array. Never fails.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for array in self.arrays.values_mut() {
            array.entity_destroyed(entity);
        }
    }

    /// Enumerates the dense indices of every component the entity currently
    /// owns, in registration order.
    pub fn component_types_of(&self, entity: Entity) -> Vec<ComponentType> {
        self.registrars
            .iter()
            .filter(|registrar| (registrar.has)(self, entity))
            .map(|registrar| registrar.component_type)
            .collect()
    }

    /// Enumerates the entity's components as type-erased references, in
    /// registration order, without naming any component type.
    pub fn components_of(&self, entity: Entity) -> Vec<(ComponentType, &dyn Any)> {
        self.registrars
            .iter()
            .filter_map(|registrar| {
                (registrar.get)(self, entity).map(|component| (registrar.component_type, component))
            })
            .collect()
    }

    /// Returns the type name recorded for a dense index, if one is assigned.
    pub fn type_name_of(&self, component_type: ComponentType) -> Option<&'static str> {
        self.registrars
            .get(component_type.index())
            .map(|registrar| registrar.type_name)
    }

    /// Returns the number of registered component types.
    pub fn registered_count(&self) -> usize {
        self.registrars.len()
    }

    /// Returns the number of stored `T` components, for density checks.
    pub fn component_count<T: Component>(&self) -> Result<usize, EcsError> {
        Ok(self.array::<T>()?.len())
    }

    fn array<T: Component>(&self) -> Result<&ComponentArray<T>, EcsError> {
        let array = self
            .arrays
            .get(&TypeId::of::<T>())
            .ok_or(EcsError::ComponentNotRegistered {
                type_name: type_name::<T>(),
            })?;
        Ok(array
            .as_any()
            .downcast_ref::<ComponentArray<T>>()
            .expect("array type matches its registration"))
    }

    fn array_mut<T: Component>(&mut self) -> Result<&mut ComponentArray<T>, EcsError> {
        let array = self
            .arrays
            .get_mut(&TypeId::of::<T>())
            .ok_or(EcsError::ComponentNotRegistered {
                type_name: type_name::<T>(),
            })?;
        Ok(array
            .as_any_mut()
            .downcast_mut::<ComponentArray<T>>()
            .expect("array type matches its registration"))
    }
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new()
    }
}
