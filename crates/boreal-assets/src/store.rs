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

//! The slot arena backing the asset catalog.
//!
//! Each slot owns one asset and carries a generation counter that is bumped
//! on removal, so a stale `(slot, generation)` pair held by a reference can
//! be rejected in O(1) without touching the asset itself.

use crate::ErasedAsset;
use boreal_core::asset::AssetId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// One arena slot: an optional owning entry plus its recycling generation.
pub(crate) struct Slot {
    pub generation: u32,
    pub entry: Option<Arc<dyn ErasedAsset>>,
}

/// The catalog's owning table: slots, a free list, and the UUID index.
pub(crate) struct StoreInner {
    slots: Vec<Slot>,
    free: Vec<u32>,
    by_id: HashMap<AssetId, u32>,
}

/// The store as shared by the catalog and (weakly) by every asset ref.
pub(crate) type SharedStore = Arc<RwLock<StoreInner>>;

impl StoreInner {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Inserts an asset, reusing a free slot when one is available.
    /// Returns the `(slot, generation)` pair identifying the entry.
    pub fn insert(&mut self, asset: Arc<dyn ErasedAsset>) -> (u32, u32) {
        let id = asset.id();
        let slot_index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(asset);
                index
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(asset),
                });
                index
            }
        };
        self.by_id.insert(id, slot_index);
        (slot_index, self.slots[slot_index as usize].generation)
    }

    /// Resolves a `(slot, generation)` pair to its entry, if still current.
    pub fn get(&self, slot: u32, generation: u32) -> Option<Arc<dyn ErasedAsset>> {
        let slot = self.slots.get(slot as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.entry.clone()
    }

    /// Resolves an asset ID to `(slot, generation, entry)`.
    pub fn get_by_id(&self, id: AssetId) -> Option<(u32, u32, Arc<dyn ErasedAsset>)> {
        let slot_index = *self.by_id.get(&id)?;
        let slot = &self.slots[slot_index as usize];
        let entry = slot.entry.clone()?;
        Some((slot_index, slot.generation, entry))
    }

    /// Returns true if an asset with this ID is registered.
    pub fn contains_id(&self, id: AssetId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Removes the entry for `id`, bumping the slot generation so stale
    /// references stop resolving. Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: AssetId) -> bool {
        let Some(slot_index) = self.by_id.remove(&id) else {
            return false;
        };
        let slot = &mut self.slots[slot_index as usize];
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(slot_index);
        true
    }

    /// Iterates over every live entry with its `(slot, generation)` pair.
    pub fn iter_entries(
        &self,
    ) -> impl Iterator<Item = (u32, u32, &Arc<dyn ErasedAsset>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.entry
                    .as_ref()
                    .map(|entry| (index as u32, slot.generation, entry))
            })
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}
