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

//! The coordinator façade over the four ECS managers.

use crate::{
    Component, ComponentManager, ComponentTuple, ComponentType, EntityManager, EntitySet,
    GroupSystem, QuerySystem, SingletonComponentManager, SystemManager,
};
use boreal_core::ecs::{EcsError, Entity, Signature};
use std::any::Any;

/// The public entry point of the ECS.
///
/// The coordinator composes the entity, component, singleton, and system
/// managers and keeps them consistent: every structural mutation flows
/// through here so that component storage, entity signatures, and system
/// membership can never drift apart.
///
/// References returned by the accessors are valid until the next structural
/// mutation of the same component type (adds and removes may move rows).
pub struct Coordinator {
    entities: EntityManager,
    components: ComponentManager,
    singletons: SingletonComponentManager,
    systems: SystemManager,
}

impl Coordinator {
    /// Creates a coordinator with empty managers.
    pub fn new() -> Self {
        Self {
            entities: EntityManager::new(),
            components: ComponentManager::new(),
            singletons: SingletonComponentManager::new(),
            systems: SystemManager::new(),
        }
    }

    // --- Entities ---

    /// Issues a new entity ID.
    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        self.entities.create_entity()
    }

    /// Destroys an entity, erasing it everywhere.
    ///
    /// Component rows are removed first, then system membership, and the ID
    /// is reclaimed last, so observers never see a half-dead entity.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.entities.ensure_in_range(entity)?;
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        self.entities.destroy_entity(entity)
    }

    /// Returns the signature of an entity.
    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.entities.signature(entity)
    }

    /// Returns the number of currently live entities.
    pub fn living_entity_count(&self) -> usize {
        self.entities.living_entity_count()
    }

    /// Returns true if the entity is currently live.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    // --- Components ---

    /// Registers the component type `T`.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentType, EcsError> {
        self.components.register_component::<T>()
    }

    /// Returns the dense index of the component type `T`.
    pub fn component_type<T: Component>(&self) -> Result<ComponentType, EcsError> {
        self.components.component_type::<T>()
    }

    /// Adds a component to an entity, updating its signature and re-deriving
    /// system membership.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), EcsError> {
        let component_type = self.components.component_type::<T>()?;
        let mut signature = self.entities.signature(entity)?;

        self.components.add_component(entity, component)?;

        signature.set(component_type.index());
        self.entities.set_signature(entity, signature)?;
        self.systems
            .entity_signature_changed(entity, signature, &self.components);
        Ok(())
    }

    /// Removes and returns the `T` component of an entity, updating its
    /// signature and re-deriving system membership.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        let component_type = self.components.component_type::<T>()?;
        let mut signature = self.entities.signature(entity)?;

        let removed = self.components.remove_component::<T>(entity)?;

        signature.clear(component_type.index());
        self.entities.set_signature(entity, signature)?;
        self.systems
            .entity_signature_changed(entity, signature, &self.components);
        Ok(removed)
    }

    /// Non-failing removal; returns whether a removal occurred.
    pub fn try_remove_component<T: Component>(&mut self, entity: Entity) -> bool {
        let Ok(component_type) = self.components.component_type::<T>() else {
            return false;
        };
        let Ok(mut signature) = self.entities.signature(entity) else {
            return false;
        };
        if !self.components.try_remove_component::<T>(entity) {
            return false;
        }
        signature.clear(component_type.index());
        // The entity was range-checked above; this cannot fail.
        let _ = self.entities.set_signature(entity, signature);
        self.systems
            .entity_signature_changed(entity, signature, &self.components);
        true
    }

    /// Returns a reference to the `T` component of an entity.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.components.get_component::<T>(entity)
    }

    /// Returns a mutable reference to the `T` component of an entity.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.components.get_component_mut::<T>(entity)
    }

    /// Non-failing lookup.
    pub fn try_get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components.try_get_component::<T>(entity)
    }

    /// Non-failing mutable lookup.
    pub fn try_get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.try_get_component_mut::<T>(entity)
    }

    /// Returns true if the entity owns a `T` component.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.components.has_component::<T>(entity)
    }

    /// Enumerates the dense indices of every component the entity owns.
    pub fn component_types_of(&self, entity: Entity) -> Vec<ComponentType> {
        self.components.component_types_of(entity)
    }

    /// Enumerates the entity's components as type-erased references, without
    /// naming any component type.
    pub fn components_of(&self, entity: Entity) -> Vec<(ComponentType, &dyn Any)> {
        self.components.components_of(entity)
    }

    /// Returns the underlying component manager, for read-only inspection.
    pub fn component_manager(&self) -> &ComponentManager {
        &self.components
    }

    // --- Queries ---

    /// Builds the combined signature mask of a component tuple.
    pub fn signature_of<Q: ComponentTuple>(&self) -> Result<Signature, EcsError> {
        Q::signature(&self.components)
    }

    /// Returns every live entity owning all components of the tuple `Q`.
    ///
    /// The pool is scanned once; the scan stops as soon as
    /// `living_entity_count` live entities have been examined.
    pub fn entities_with<Q: ComponentTuple>(&self) -> Result<Vec<Entity>, EcsError> {
        let mask = Q::signature(&self.components)?;
        Ok(self
            .entities
            .iter_live()
            .filter(|(_, signature)| signature.contains_all(&mask))
            .map(|(entity, _)| entity)
            .collect())
    }

    // --- Singletons ---

    /// Registers the singleton instance for type `T`.
    pub fn register_singleton<T: Component>(&mut self, singleton: T) -> Result<(), EcsError> {
        self.singletons.register_singleton(singleton)
    }

    /// Removes and returns the singleton instance for type `T`.
    pub fn unregister_singleton<T: Component>(&mut self) -> Result<T, EcsError> {
        self.singletons.unregister_singleton::<T>()
    }

    /// Returns a reference to the singleton instance for type `T`.
    pub fn singleton<T: Component>(&self) -> Result<&T, EcsError> {
        self.singletons.singleton::<T>()
    }

    /// Returns a mutable reference to the singleton instance for type `T`.
    pub fn singleton_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        self.singletons.singleton_mut::<T>()
    }

    /// Non-failing singleton lookup.
    pub fn try_singleton<T: Component>(&self) -> Option<&T> {
        self.singletons.try_singleton::<T>()
    }

    /// Non-failing mutable singleton lookup.
    pub fn try_singleton_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.singletons.try_singleton_mut::<T>()
    }

    // --- Systems ---

    /// Registers a group system. Install its mask with
    /// [`set_system_signature`](Coordinator::set_system_signature).
    pub fn register_group_system<S: GroupSystem>(&mut self, system: S) -> Result<(), EcsError> {
        self.systems.register_group_system(system)
    }

    /// Registers a query system; its membership predicate is captured from
    /// [`QuerySystem::matches`].
    pub fn register_query_system<S: QuerySystem>(&mut self, system: S) -> Result<(), EcsError> {
        self.systems.register_query_system(system)?;
        // Entities that already exist must be offered to the new predicate.
        self.refresh_memberships();
        Ok(())
    }

    /// Installs the signature mask of a group system and re-derives its
    /// membership for all live entities.
    pub fn set_system_signature<S: GroupSystem>(
        &mut self,
        signature: Signature,
    ) -> Result<(), EcsError> {
        self.systems.set_group_signature::<S>(signature)?;
        self.refresh_memberships();
        Ok(())
    }

    /// Returns the current membership of a group system.
    pub fn group_entities<S: GroupSystem>(&self) -> Result<&EntitySet, EcsError> {
        self.systems.group_entities::<S>()
    }

    /// Returns the current membership of a query system.
    pub fn query_entities<S: QuerySystem>(&self) -> Result<&EntitySet, EcsError> {
        self.systems.query_entities::<S>()
    }

    /// Drives one update of a group system over a snapshot of its members.
    pub fn run_group_system<S: GroupSystem>(&mut self) -> Result<(), EcsError> {
        let (mut system, entities) = self.systems.take_group_system::<S>()?;
        system.update(self, &entities);
        self.systems.restore_group_system::<S>(system);
        Ok(())
    }

    /// Drives one update of a query system with the frame timestep.
    pub fn run_query_system<S: QuerySystem>(&mut self, dt: f32) -> Result<(), EcsError> {
        let (mut system, entities) = self.systems.take_query_system::<S>()?;
        system.update(self, dt, &entities);
        self.systems.restore_query_system::<S>(system);
        Ok(())
    }

    /// Replays every live entity's signature through the system manager.
    fn refresh_memberships(&mut self) {
        let live: Vec<(Entity, Signature)> = self.entities.iter_live().collect();
        for (entity, signature) in live {
            self.systems
                .entity_signature_changed(entity, signature, &self.components);
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
