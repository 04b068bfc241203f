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

//! The typed asset container and its type-erased view.

use boreal_core::asset::{AssetData, AssetId, AssetLocation, AssetMetadata, AssetStatus};
use std::any::{Any, TypeId};
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// Returns the unqualified name of a payload type, used as the metadata
/// `type_name`.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// A typed asset: a payload of type `T` plus its metadata header.
///
/// The payload sits behind interior mutability so a placeholder created with
/// `AssetCatalog::create_empty_asset` can be populated after it has been
/// registered and handed out. `is_loaded` reports true only once the status
/// says `Loaded` *and* a payload is actually present.
///
/// The metadata's ID and location are stamped by the catalog at
/// registration; nothing else ever rewrites them.
pub struct Asset<T: AssetData> {
    metadata: RwLock<AssetMetadata>,
    data: RwLock<Option<T>>,
}

impl<T: AssetData> Asset<T> {
    /// Creates an empty, unloaded asset at `location`.
    pub fn new(location: AssetLocation) -> Self {
        Self {
            metadata: RwLock::new(AssetMetadata::new(short_type_name::<T>(), location)),
            data: RwLock::new(None),
        }
    }

    /// Creates a loaded asset carrying `data`.
    pub fn with_data(location: AssetLocation, data: T) -> Self {
        let asset = Self::new(location);
        asset.set_data(data);
        asset
    }

    /// Returns a snapshot of the asset's metadata.
    pub fn metadata(&self) -> AssetMetadata {
        self.metadata.read().expect("asset metadata lock poisoned").clone()
    }

    /// Returns the asset's stable ID (nil until registered).
    pub fn id(&self) -> AssetId {
        self.metadata.read().expect("asset metadata lock poisoned").id
    }

    /// Returns the asset's catalog location.
    pub fn location(&self) -> AssetLocation {
        self.metadata
            .read()
            .expect("asset metadata lock poisoned")
            .location
            .clone()
    }

    /// Returns the asset's load state.
    pub fn status(&self) -> AssetStatus {
        self.metadata.read().expect("asset metadata lock poisoned").status
    }

    /// Returns true if the asset is loaded and carries a payload.
    pub fn is_loaded(&self) -> bool {
        self.status() == AssetStatus::Loaded
            && self.data.read().expect("asset data lock poisoned").is_some()
    }

    /// Returns a read guard over the payload.
    ///
    /// The guard holds `Some` once the asset has been populated. Keep the
    /// borrow short; importers and the catalog take the write side.
    pub fn data(&self) -> RwLockReadGuard<'_, Option<T>> {
        self.data.read().expect("asset data lock poisoned")
    }

    /// Installs the payload and flips the status to `Loaded`.
    ///
    /// This is the populate path for placeholder assets; importers use
    /// [`Asset::with_data`] instead.
    pub fn set_data(&self, data: T) {
        *self.data.write().expect("asset data lock poisoned") = Some(data);
        self.metadata
            .write()
            .expect("asset metadata lock poisoned")
            .status = AssetStatus::Loaded;
    }

    pub(crate) fn stamp_id(&self, id: AssetId) {
        let mut metadata = self.metadata.write().expect("asset metadata lock poisoned");
        debug_assert!(metadata.id.is_nil(), "asset IDs are assigned exactly once");
        if metadata.id.is_nil() {
            metadata.id = id;
        }
    }

    pub(crate) fn set_location(&self, location: AssetLocation) {
        self.metadata
            .write()
            .expect("asset metadata lock poisoned")
            .location = location;
    }
}

/// The object-safe view of an [`Asset`] the catalog stores.
///
/// Every `Asset<T>` implements this trait; the payload `TypeId` acts as the
/// type tag that lets `GenericAssetRef::as_typed` downcast safely.
pub trait ErasedAsset: Send + Sync + 'static {
    /// Returns a snapshot of the asset's metadata.
    fn metadata(&self) -> AssetMetadata;

    /// Returns the asset's stable ID (nil until registered).
    fn id(&self) -> AssetId;

    /// Returns the asset's catalog location.
    fn location(&self) -> AssetLocation;

    /// Returns the asset's load state.
    fn status(&self) -> AssetStatus;

    /// Returns true if the asset is loaded and carries a payload.
    fn is_loaded(&self) -> bool;

    /// Returns the `TypeId` of the payload type.
    fn data_type_id(&self) -> TypeId;

    /// Returns the unqualified name of the payload type.
    fn type_name(&self) -> &'static str;

    /// Upcasts an owning handle to `Any` so it can be downcast to the
    /// concrete `Asset<T>`.
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Assigns the stable ID. Catalog use only; a non-nil ID is never
    /// overwritten.
    fn stamp_id(&self, id: AssetId);

    /// Reassigns the location. Catalog use only (registration stamping and
    /// the rename path).
    fn set_location(&self, location: AssetLocation);
}

impl<T: AssetData> ErasedAsset for Asset<T> {
    fn metadata(&self) -> AssetMetadata {
        Asset::metadata(self)
    }

    fn id(&self) -> AssetId {
        Asset::id(self)
    }

    fn location(&self) -> AssetLocation {
        Asset::location(self)
    }

    fn status(&self) -> AssetStatus {
        Asset::status(self)
    }

    fn is_loaded(&self) -> bool {
        Asset::is_loaded(self)
    }

    fn data_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn stamp_id(&self, id: AssetId) {
        Asset::stamp_id(self, id);
    }

    fn set_location(&self, location: AssetLocation) {
        Asset::set_location(self, location);
    }
}
