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

//! Defines the core entity identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The maximum number of entities that can be alive at the same time.
///
/// Entity IDs are drawn from a fixed pool of `[0, MAX_ENTITIES)`; creating an
/// entity while the pool is exhausted fails with
/// [`EcsError::TooManyEntities`](crate::ecs::EcsError::TooManyEntities).
pub const MAX_ENTITIES: usize = 5000;

/// A unique identifier for an entity in the scene.
///
/// An `Entity` is an opaque index into the entity pool. It carries no
/// generation counter: the only identity guarantee is that a live ID is
/// unique among live IDs. Once an entity is destroyed its ID returns to the
/// free pool and may be reissued for a completely unrelated entity, so
/// holding on to the ID of a destroyed entity is a logic error in the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Entity(u32);

impl Entity {
    /// Creates an entity identifier from a raw pool index.
    ///
    /// This is intended for the entity manager and for tests; regular code
    /// receives its `Entity` values from `create_entity`.
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw pool index of this entity.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the pool index as a `usize`, for direct array indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
