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

//! System contracts: the two match modes a system can be registered under.

use crate::{ComponentManager, Coordinator};
use boreal_core::ecs::{Entity, Signature};
use std::collections::BTreeSet;

/// The set of entities currently matching a system.
///
/// A `BTreeSet` keeps iteration order deterministic, which makes system
/// behavior reproducible frame to frame.
pub type EntitySet = BTreeSet<Entity>;

/// A system whose membership is defined by a signature mask.
///
/// The mask is installed through the coordinator's `set_system_signature`
/// after registration; an entity belongs to the system exactly when its
/// signature contains every bit of the mask. Membership is maintained by the
/// [`SystemManager`](crate::SystemManager) as entity signatures change.
pub trait GroupSystem: 'static + Send + Sync {
    /// Runs the system over the entities matching its mask.
    ///
    /// The coordinator is handed in mutably so the system can read and write
    /// components; `entities` is a snapshot of the membership at the time
    /// the update was driven.
    fn update(&mut self, coordinator: &mut Coordinator, entities: &EntitySet);
}

/// A system whose membership is defined by an arbitrary signature predicate.
///
/// The predicate is captured at registration and re-evaluated whenever an
/// entity's signature changes. Query systems receive the frame timestep on
/// update.
pub trait QuerySystem: 'static + Send + Sync {
    /// Returns true if an entity with this signature belongs to the system.
    ///
    /// The component manager is available so the predicate can resolve the
    /// indices of the types it requires (typically through a
    /// [`ComponentTuple`](crate::ComponentTuple) mask). This is an
    /// associated function so the manager can keep evaluating membership
    /// while the system instance itself is being driven.
    fn matches(components: &ComponentManager, signature: &Signature) -> bool
    where
        Self: Sized;

    /// Runs the system over its current members with the frame timestep.
    fn update(&mut self, coordinator: &mut Coordinator, dt: f32, entities: &EntitySet);
}
