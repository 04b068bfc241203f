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

//! Non-owning asset references.
//!
//! References identify a catalog slot by `(slot, generation)` and hold the
//! store only weakly. `lock()` is the single legal access path: it upgrades
//! to an owning handle that keeps the asset alive across a critical section,
//! or returns `None` if the asset has been deleted. `is_valid()` is a
//! momentary hint only; under concurrent deletion it can be stale by the
//! time the caller acts on it.

use crate::store::{SharedStore, StoreInner};
use crate::{Asset, AssetHandle, GenericAssetHandle};
use boreal_core::asset::{AssetData, AssetId};
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock, Weak};

/// A non-owning reference to a typed asset in the catalog.
pub struct AssetRef<T: AssetData> {
    store: Weak<RwLock<StoreInner>>,
    slot: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T: AssetData> AssetRef<T> {
    pub(crate) fn new(store: &SharedStore, slot: u32, generation: u32) -> Self {
        Self {
            store: Arc::downgrade(store),
            slot,
            generation,
            _marker: PhantomData,
        }
    }

    /// Returns the empty reference; it never locks successfully.
    pub fn null() -> Self {
        Self {
            store: Weak::new(),
            slot: u32::MAX,
            generation: u32::MAX,
            _marker: PhantomData,
        }
    }

    /// Upgrades to an owning handle.
    ///
    /// Returns `None` when the asset has been deleted from the catalog (or
    /// the catalog itself is gone). This is the only access path that is
    /// safe under concurrent deletion: the returned handle keeps the asset
    /// alive regardless of what the catalog does afterwards.
    pub fn lock(&self) -> Option<AssetHandle<T>> {
        let store = self.store.upgrade()?;
        let entry = {
            let guard = store.read().expect("asset store lock poisoned");
            guard.get(self.slot, self.generation)?
        };
        entry
            .as_any_arc()
            .downcast::<Asset<T>>()
            .ok()
            .map(AssetHandle::from_arc)
    }

    /// Returns true if the asset currently exists in the catalog.
    ///
    /// Advisory only: prefer `lock()` and check for `None`.
    pub fn is_valid(&self) -> bool {
        self.store
            .upgrade()
            .map(|store| {
                store
                    .read()
                    .expect("asset store lock poisoned")
                    .get(self.slot, self.generation)
                    .is_some()
            })
            .unwrap_or(false)
    }

    /// Returns the asset's ID, if it still exists.
    pub fn id(&self) -> Option<AssetId> {
        self.lock().map(|handle| handle.id())
    }

    /// Converts into the type-erased form.
    pub fn into_generic(self) -> GenericAssetRef {
        GenericAssetRef {
            store: self.store,
            slot: self.slot,
            generation: self.generation,
            data_type: TypeId::of::<T>(),
        }
    }
}

impl<T: AssetData> Clone for AssetRef<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            slot: self.slot,
            generation: self.generation,
            _marker: PhantomData,
        }
    }
}

impl<T: AssetData> Default for AssetRef<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: AssetData> fmt::Debug for AssetRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRef")
            .field("slot", &self.slot)
            .field("generation", &self.generation)
            .finish()
    }
}

/// A non-owning, type-erased reference to a catalog asset.
///
/// Carries the payload `TypeId` as its type tag, so
/// [`as_typed`](GenericAssetRef::as_typed) can recover the typed reference
/// without touching the asset.
#[derive(Clone)]
pub struct GenericAssetRef {
    store: Weak<RwLock<StoreInner>>,
    slot: u32,
    generation: u32,
    data_type: TypeId,
}

impl GenericAssetRef {
    pub(crate) fn with_tag(
        store: &SharedStore,
        slot: u32,
        generation: u32,
        data_type: TypeId,
    ) -> Self {
        Self {
            store: Arc::downgrade(store),
            slot,
            generation,
            data_type,
        }
    }

    /// Returns the empty reference; it never locks successfully.
    pub fn null() -> Self {
        Self {
            store: Weak::new(),
            slot: u32::MAX,
            generation: u32::MAX,
            data_type: TypeId::of::<()>(),
        }
    }

    /// Upgrades to a type-erased owning handle, or `None` if the asset has
    /// been deleted.
    pub fn lock(&self) -> Option<GenericAssetHandle> {
        let store = self.store.upgrade()?;
        let entry = {
            let guard = store.read().expect("asset store lock poisoned");
            guard.get(self.slot, self.generation)?
        };
        Some(GenericAssetHandle::from_arc(entry))
    }

    /// Returns true if the asset currently exists in the catalog.
    ///
    /// Advisory only: prefer `lock()` and check for `None`.
    pub fn is_valid(&self) -> bool {
        self.lock().is_some()
    }

    /// Returns the asset's ID, if it still exists.
    pub fn id(&self) -> Option<AssetId> {
        self.lock().map(|handle| handle.id())
    }

    /// Recovers the typed reference if the payload type tag matches `T`;
    /// returns the null reference otherwise.
    pub fn as_typed<T: AssetData>(&self) -> AssetRef<T> {
        if self.data_type != TypeId::of::<T>() {
            return AssetRef::null();
        }
        AssetRef {
            store: self.store.clone(),
            slot: self.slot,
            generation: self.generation,
            _marker: PhantomData,
        }
    }

    /// Returns the `TypeId` tag of the payload type.
    pub fn data_type(&self) -> TypeId {
        self.data_type
    }
}

impl fmt::Debug for GenericAssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericAssetRef")
            .field("slot", &self.slot)
            .field("generation", &self.generation)
            .finish()
    }
}
