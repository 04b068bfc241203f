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

use crate::{Asset, ErasedAsset};
use boreal_core::asset::{AssetData, AssetMetadata};
use std::ops::Deref;
use std::sync::Arc;

/// A thread-safe, reference-counted owning handle to a catalog asset.
///
/// This acts as a smart pointer, providing shared ownership of an asset's
/// data. Cloning a handle is cheap: it only bumps the reference count.
/// Holding a handle keeps the asset alive even if the catalog deletes its
/// entry, which is exactly what the `AssetRef::lock()` critical-section
/// pattern relies on.
pub struct AssetHandle<T: AssetData>(Arc<Asset<T>>);

impl<T: AssetData> AssetHandle<T> {
    /// Creates a handle that takes ownership of the asset.
    pub fn new(asset: Asset<T>) -> Self {
        Self(Arc::new(asset))
    }

    pub(crate) fn from_arc(asset: Arc<Asset<T>>) -> Self {
        Self(asset)
    }

    /// Returns a metadata snapshot with the live reference count filled in.
    pub fn metadata(&self) -> AssetMetadata {
        let mut metadata = self.0.metadata();
        metadata.reference_count = Arc::strong_count(&self.0);
        metadata
    }

    /// Returns the number of owning references alive right now, including
    /// the catalog's own (if the asset is still registered) and this one.
    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl<T: AssetData> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: AssetData> Deref for AssetHandle<T> {
    type Target = Asset<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A type-erased owning handle, produced by `GenericAssetRef::lock()`.
pub struct GenericAssetHandle(Arc<dyn ErasedAsset>);

impl GenericAssetHandle {
    pub(crate) fn from_arc(asset: Arc<dyn ErasedAsset>) -> Self {
        Self(asset)
    }

    /// Returns a metadata snapshot with the live reference count filled in.
    pub fn metadata(&self) -> AssetMetadata {
        let mut metadata = self.0.metadata();
        metadata.reference_count = Arc::strong_count(&self.0);
        metadata
    }

    /// Attempts to recover the typed handle.
    ///
    /// Returns `None` when the payload type is not `T`.
    pub fn downcast<T: AssetData>(self) -> Option<AssetHandle<T>> {
        let any = self.0.as_any_arc();
        any.downcast::<Asset<T>>().ok().map(AssetHandle::from_arc)
    }
}

impl Clone for GenericAssetHandle {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl Deref for GenericAssetHandle {
    type Target = dyn ErasedAsset;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
