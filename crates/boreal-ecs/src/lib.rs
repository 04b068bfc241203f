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

//! Implements Boreal's Entity-Component-System store.
//!
//! The ECS is a data-oriented store built from four cooperating managers,
//! composed behind a single façade:
//!
//! - [`EntityManager`]: issues and recycles entity IDs from a fixed pool and
//!   owns each entity's component [`Signature`](boreal_core::ecs::Signature).
//! - [`ComponentManager`]: densely-packed per-type component storage with
//!   entity ↔ row bookkeeping.
//! - [`SingletonComponentManager`]: one-of-a-kind component instances keyed
//!   by type, independent of any entity.
//! - [`SystemManager`]: maintains per-system entity membership as signatures
//!   change and drives system updates.
//!
//! The [`Coordinator`] is the public entry point: it owns the managers and
//! keeps them consistent (a component mutation updates the entity's
//! signature and re-derives system membership in one call).
//!
//! The store is single-threaded cooperative: one control thread drives
//! system updates in an externally chosen order, and every operation here is
//! synchronous and bounded.

mod component;
mod component_array;
mod component_manager;
mod components;
mod coordinator;
mod entity_manager;
mod query;
mod singleton;
mod system;
mod system_manager;

pub use component::*;
pub use component_manager::*;
pub use components::*;
pub use coordinator::*;
pub use entity_manager::*;
pub use query::*;
pub use singleton::*;
pub use system::*;
pub use system_manager::*;

pub use boreal_core::ecs::{EcsError, Entity, Signature, MAX_COMPONENTS, MAX_ENTITIES};

#[cfg(test)]
mod tests;
