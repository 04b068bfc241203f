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

//! Defines the error taxonomy raised on ECS misuse.
//!
//! Every variant here is a programmer error: the ECS never recovers from one
//! internally, it propagates the error unchanged to the caller. The `try_*`
//! manager operations are the non-failing companions for the hot paths.

use crate::ecs::Entity;
use std::fmt;

/// An error raised by the ECS managers on invalid use of their API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity pool is exhausted; no more IDs can be issued.
    TooManyEntities {
        /// The fixed capacity of the pool.
        capacity: usize,
    },
    /// An entity ID outside the fixed pool range was passed to a manager.
    EntityOutOfRange {
        /// The offending entity.
        entity: Entity,
        /// The fixed capacity of the pool.
        capacity: usize,
    },
    /// A component type was registered a second time.
    ComponentAlreadyRegistered {
        /// The name of the component type.
        type_name: &'static str,
    },
    /// A component type was used before being registered.
    ComponentNotRegistered {
        /// The name of the component type.
        type_name: &'static str,
    },
    /// All component type indices are in use.
    TooManyComponents {
        /// The fixed number of component type slots.
        capacity: usize,
    },
    /// The entity already owns a component of this type.
    ComponentAlreadyExists {
        /// The entity the component was added to.
        entity: Entity,
        /// The name of the component type.
        type_name: &'static str,
    },
    /// The entity owns no component of this type.
    ComponentNotFound {
        /// The entity the component was requested for.
        entity: Entity,
        /// The name of the component type.
        type_name: &'static str,
    },
    /// A singleton component of this type is already registered.
    SingletonAlreadyExists {
        /// The name of the singleton component type.
        type_name: &'static str,
    },
    /// No singleton component of this type is registered.
    SingletonNotFound {
        /// The name of the singleton component type.
        type_name: &'static str,
    },
    /// A system of this type is already registered.
    SystemAlreadyRegistered {
        /// The name of the system type.
        type_name: &'static str,
    },
    /// No system of this type is registered.
    SystemNotRegistered {
        /// The name of the system type.
        type_name: &'static str,
    },
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::TooManyEntities { capacity } => {
                write!(f, "Entity pool exhausted (capacity {capacity})")
            }
            EcsError::EntityOutOfRange { entity, capacity } => {
                write!(f, "{entity} is outside the entity pool range [0, {capacity})")
            }
            EcsError::ComponentAlreadyRegistered { type_name } => {
                write!(f, "Component type '{type_name}' is already registered")
            }
            EcsError::ComponentNotRegistered { type_name } => {
                write!(f, "Component type '{type_name}' is not registered")
            }
            EcsError::TooManyComponents { capacity } => {
                write!(f, "All {capacity} component type slots are in use")
            }
            EcsError::ComponentAlreadyExists { entity, type_name } => {
                write!(f, "{entity} already has a '{type_name}' component")
            }
            EcsError::ComponentNotFound { entity, type_name } => {
                write!(f, "{entity} has no '{type_name}' component")
            }
            EcsError::SingletonAlreadyExists { type_name } => {
                write!(f, "Singleton component '{type_name}' already exists")
            }
            EcsError::SingletonNotFound { type_name } => {
                write!(f, "Singleton component '{type_name}' not found")
            }
            EcsError::SystemAlreadyRegistered { type_name } => {
                write!(f, "System '{type_name}' is already registered")
            }
            EcsError::SystemNotRegistered { type_name } => {
                write!(f, "System '{type_name}' is not registered")
            }
        }
    }
}

impl std::error::Error for EcsError {}
