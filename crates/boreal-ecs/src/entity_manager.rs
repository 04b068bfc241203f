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

//! Entity ID allocation and signature ownership.

use boreal_core::ecs::{EcsError, Entity, Signature, MAX_ENTITIES};
use std::collections::VecDeque;

/// Allocates and recycles entity IDs and owns per-entity signatures.
///
/// IDs are drawn from a fixed pool of `[0, MAX_ENTITIES)` through a FIFO
/// free queue: destroying an entity pushes its ID to the back of the queue,
/// so recently freed IDs are reissued last. The ordering among free IDs is
/// not observable by callers; only uniqueness-while-live is guaranteed.
pub struct EntityManager {
    /// IDs available for issue, in FIFO order.
    free: VecDeque<Entity>,
    /// One signature per pool slot, indexed by the raw entity ID.
    signatures: Vec<Signature>,
    /// One liveness flag per pool slot.
    alive: Vec<bool>,
    /// Number of currently live entities.
    living_count: usize,
}

impl EntityManager {
    /// Creates a manager with the full ID range available.
    pub fn new() -> Self {
        Self {
            free: (0..MAX_ENTITIES as u32).map(Entity::from_raw).collect(),
            signatures: vec![Signature::empty(); MAX_ENTITIES],
            alive: vec![false; MAX_ENTITIES],
            living_count: 0,
        }
    }

    /// Issues an unused entity ID.
    ///
    /// Fails with [`EcsError::TooManyEntities`] once all `MAX_ENTITIES` IDs
    /// are live.
    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        let entity = self.free.pop_front().ok_or(EcsError::TooManyEntities {
            capacity: MAX_ENTITIES,
        })?;
        self.alive[entity.index()] = true;
        self.living_count += 1;
        Ok(entity)
    }

    /// Destroys an entity: clears its signature and returns its ID to the
    /// free pool.
    ///
    /// Fails with [`EcsError::EntityOutOfRange`] for IDs outside the pool.
    /// Destroying an entity that is not live is ignored (the free pool must
    /// never hold duplicate IDs).
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.ensure_in_range(entity)?;
        if !self.alive[entity.index()] {
            log::warn!("destroy of non-live {entity} ignored");
            return Ok(());
        }
        self.signatures[entity.index()].clear_all();
        self.alive[entity.index()] = false;
        self.living_count -= 1;
        self.free.push_back(entity);
        Ok(())
    }

    /// Replaces the signature of an entity.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<(), EcsError> {
        self.ensure_in_range(entity)?;
        self.signatures[entity.index()] = signature;
        Ok(())
    }

    /// Returns the signature of an entity.
    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.ensure_in_range(entity)?;
        Ok(self.signatures[entity.index()])
    }

    /// Returns the number of currently live entities.
    pub fn living_entity_count(&self) -> usize {
        self.living_count
    }

    /// Returns true if the entity is currently live.
    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.index() < MAX_ENTITIES && self.alive[entity.index()]
    }

    /// Iterates over all live entities with their signatures.
    ///
    /// The scan stops after `living_entity_count` entities have been
    /// yielded, so sparse pools do not pay for the full fixed range.
    pub fn iter_live(&self) -> impl Iterator<Item = (Entity, Signature)> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(index, alive)| {
                alive.then(|| (Entity::from_raw(index as u32), self.signatures[index]))
            })
            .take(self.living_count)
    }

    /// Checks that an entity ID lies inside the fixed pool range.
    pub(crate) fn ensure_in_range(&self, entity: Entity) -> Result<(), EcsError> {
        if entity.index() >= MAX_ENTITIES {
            return Err(EcsError::EntityOutOfRange {
                entity,
                capacity: MAX_ENTITIES,
            });
        }
        Ok(())
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
