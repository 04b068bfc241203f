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

//! One-of-a-kind component instances keyed by type.

use crate::Component;
use boreal_core::ecs::EcsError;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Owns at most one instance per component type, independent of entities.
///
/// Singletons carry process-scoped state (the active camera configuration,
/// editor selection, frame timing) that belongs to the scene as a whole
/// rather than to any entity. Their lifetime is tied to the manager
/// instance.
pub struct SingletonComponentManager {
    singletons: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl SingletonComponentManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            singletons: HashMap::new(),
        }
    }

    /// Registers the singleton instance for type `T`.
    ///
    /// Fails with [`EcsError::SingletonAlreadyExists`] if one is present.
    pub fn register_singleton<T: Component>(&mut self, singleton: T) -> Result<(), EcsError> {
        let type_id = TypeId::of::<T>();
        if self.singletons.contains_key(&type_id) {
            return Err(EcsError::SingletonAlreadyExists {
                type_name: type_name::<T>(),
            });
        }
        self.singletons.insert(type_id, Box::new(singleton));
        Ok(())
    }

    /// Removes and returns the singleton instance for type `T`.
    ///
    /// Fails with [`EcsError::SingletonNotFound`] if none is registered.
    pub fn unregister_singleton<T: Component>(&mut self) -> Result<T, EcsError> {
        let singleton =
            self.singletons
                .remove(&TypeId::of::<T>())
                .ok_or(EcsError::SingletonNotFound {
                    type_name: type_name::<T>(),
                })?;
        Ok(*singleton
            .downcast::<T>()
            .expect("singleton type matches its registration"))
    }

    /// Returns a reference to the singleton instance for type `T`.
    pub fn singleton<T: Component>(&self) -> Result<&T, EcsError> {
        self.try_singleton::<T>().ok_or(EcsError::SingletonNotFound {
            type_name: type_name::<T>(),
        })
    }

    /// Returns a mutable reference to the singleton instance for type `T`.
    pub fn singleton_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        self.try_singleton_mut::<T>()
            .ok_or(EcsError::SingletonNotFound {
                type_name: type_name::<T>(),
            })
    }

    /// Non-failing lookup.
    pub fn try_singleton<T: Component>(&self) -> Option<&T> {
        self.singletons
            .get(&TypeId::of::<T>())
            .and_then(|singleton| singleton.downcast_ref::<T>())
    }

    /// Non-failing mutable lookup.
    pub fn try_singleton_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.singletons
            .get_mut(&TypeId::of::<T>())
            .and_then(|singleton| singleton.downcast_mut::<T>())
    }
}

impl Default for SingletonComponentManager {
    fn default() -> Self {
        Self::new()
    }
}
