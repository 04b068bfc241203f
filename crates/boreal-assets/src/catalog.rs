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

//! The owning asset store and entry point of the import pipeline.

use crate::store::{SharedStore, StoreInner};
use crate::{
    Asset, AssetImporter, AssetRef, ErasedAsset, GenericAssetRef, ImportContext, ImportInput,
    ImporterRegistry, RegisteredImporter,
};
use boreal_core::asset::{AssetData, AssetId, AssetLocation, AssetName};
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// The process-wide owner of all registered assets.
///
/// The catalog maps asset UUIDs to owning handles stored in a slot arena,
/// fronts the [`ImporterRegistry`], and hands out non-owning
/// [`GenericAssetRef`]s / [`AssetRef`]s. There is deliberately no global
/// instance: whoever bootstraps the engine owns the catalog and passes it
/// down, and tests construct their own.
///
/// Deleting an asset is silent towards outstanding references; they
/// observe it on their next `lock()`.
pub struct AssetCatalog {
    store: SharedStore,
    registry: ImporterRegistry,
    /// IDs whose dependency imports are currently being processed; guards
    /// against an import cycle registering an asset twice.
    in_flight: HashSet<AssetId>,
}

impl AssetCatalog {
    /// Creates an empty catalog with an empty importer registry.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreInner::new())),
            registry: ImporterRegistry::new(),
            in_flight: HashSet::new(),
        }
    }

    // --- Importer registry ---

    /// Registers an importer for asset type `A`; see
    /// [`ImporterRegistry::register_importer`].
    pub fn register_importer<A: AssetData, I: AssetImporter<A>>(
        &mut self,
        importer: I,
        priority: i32,
    ) -> RegisteredImporter {
        self.registry.register_importer::<A, I>(importer, priority)
    }

    /// Read access to the importer registry.
    pub fn registry(&self) -> &ImporterRegistry {
        &self.registry
    }

    /// Mutable access to the importer registry.
    pub fn registry_mut(&mut self) -> &mut ImporterRegistry {
        &mut self.registry
    }

    // --- Imports ---

    /// Imports an asset by trying every registered importer type in
    /// registration order. Returns the null reference when nothing
    /// succeeded.
    pub fn import_asset(&mut self, location: AssetLocation, input: ImportInput) -> GenericAssetRef {
        self.import_asset_with(location, input, serde_json::Value::Null)
    }

    /// Auto-import with explicit importer parameters.
    pub fn import_asset_with(
        &mut self,
        location: AssetLocation,
        input: ImportInput,
        parameters: serde_json::Value,
    ) -> GenericAssetRef {
        let mut ctx = ImportContext::new(location, input).with_parameters(parameters);
        self.registry.run_auto(&mut ctx);
        self.finish_import(ctx)
    }

    /// Imports an asset of a known type `T`, trying only the importers
    /// registered for it.
    pub fn import_asset_typed<T: AssetData>(
        &mut self,
        location: AssetLocation,
        input: ImportInput,
    ) -> AssetRef<T> {
        self.import_asset_typed_with(location, input, serde_json::Value::Null)
    }

    /// Typed import with explicit importer parameters.
    pub fn import_asset_typed_with<T: AssetData>(
        &mut self,
        location: AssetLocation,
        input: ImportInput,
        parameters: serde_json::Value,
    ) -> AssetRef<T> {
        let mut ctx = ImportContext::new(location, input).with_parameters(parameters);
        self.registry.run_for_type(TypeId::of::<T>(), &mut ctx);
        self.finish_import(ctx).as_typed::<T>()
    }

    /// Imports with one chosen importer, bypassing selection entirely:
    /// the importer is invoked regardless of what `can_read` would say.
    pub fn import_with_importer(
        &mut self,
        location: AssetLocation,
        input: ImportInput,
        importer: &RegisteredImporter,
    ) -> GenericAssetRef {
        let mut ctx = ImportContext::new(location, input);
        importer.import(&mut ctx);
        self.finish_import(ctx)
    }

    /// Registers whatever an import produced: the main asset first, then
    /// every declared dependency, recursively.
    fn finish_import(&mut self, mut ctx: ImportContext) -> GenericAssetRef {
        let (main, dependencies) = ctx.take_products();
        let Some(main) = main else {
            return GenericAssetRef::null();
        };

        let target_location = ctx.location().clone();
        let main_ref = self.register_erased(target_location, main);
        let Some(main_id) = main_ref.id() else {
            return main_ref;
        };
        // Re-read the location: registration may have stamped it.
        let main_location = match main_ref.lock() {
            Some(handle) => handle.location(),
            None => return main_ref,
        };

        if dependencies.is_empty() {
            return main_ref;
        }

        self.in_flight.insert(main_id);
        for (index, dependency) in dependencies.into_iter().enumerate() {
            let Some(dep_location) = dependency_location(&main_location, index) else {
                log::warn!(
                    "skipping dependency {index} of '{main_location}': cannot derive a location"
                );
                continue;
            };

            let mut dep_ctx = ImportContext::new(dep_location, dependency.input)
                .with_parameters(dependency.parameters);
            dep_ctx.set_parent(main_ref.clone());

            match &dependency.importer {
                Some(importer) => importer.import(&mut dep_ctx),
                None => {
                    self.registry.run_for_type(dependency.data_type, &mut dep_ctx);
                }
            }

            if !dep_ctx.has_main_asset() {
                log::warn!(
                    "dependency {index} ('{}') of '{main_location}' failed to import",
                    dependency.type_name
                );
                continue;
            }
            self.finish_import(dep_ctx);
        }
        self.in_flight.remove(&main_id);

        main_ref
    }

    // --- Registration ---

    /// Allocates and registers an empty, unloaded asset of type `T` at
    /// `location`, to be populated later through its handle.
    pub fn create_empty_asset<T: AssetData>(&mut self, location: AssetLocation) -> AssetRef<T> {
        let asset = Asset::<T>::new(location.clone());
        self.register_asset(location, asset)
    }

    /// Registers a typed asset, stamping its ID (if nil) and its location
    /// (if still the unlocated sentinel).
    pub fn register_asset<T: AssetData>(
        &mut self,
        location: AssetLocation,
        asset: Asset<T>,
    ) -> AssetRef<T> {
        self.register_erased(location, Box::new(asset)).as_typed::<T>()
    }

    fn register_erased(
        &mut self,
        location: AssetLocation,
        asset: Box<dyn ErasedAsset>,
    ) -> GenericAssetRef {
        if asset.id().is_nil() {
            asset.stamp_id(AssetId::generate());
        }
        if asset.location().is_unlocated() {
            asset.set_location(location);
        }
        let id = asset.id();

        if self.in_flight.contains(&id) {
            log::warn!("refusing to register asset {id} while its own import is in flight");
            return GenericAssetRef::null();
        }
        {
            let guard = self.store.read().expect("asset store lock poisoned");
            if guard.contains_id(id) {
                log::warn!("asset {id} is already registered; returning the existing entry");
                drop(guard);
                return self.get_asset(id).unwrap_or_else(GenericAssetRef::null);
            }
        }

        let entry: Arc<dyn ErasedAsset> = Arc::from(asset);
        let data_type = entry.data_type_id();
        let (slot, generation) = self
            .store
            .write()
            .expect("asset store lock poisoned")
            .insert(entry.clone());

        log::debug!(
            "registered {} asset '{}' as {id}",
            entry.type_name(),
            entry.location()
        );
        GenericAssetRef::with_tag(&self.store, slot, generation, data_type)
    }

    // --- Lookup and enumeration ---

    /// Returns a reference to the asset with the given ID.
    pub fn get_asset(&self, id: AssetId) -> Option<GenericAssetRef> {
        let guard = self.store.read().expect("asset store lock poisoned");
        let (slot, generation, entry) = guard.get_by_id(id)?;
        Some(GenericAssetRef::with_tag(
            &self.store,
            slot,
            generation,
            entry.data_type_id(),
        ))
    }

    /// Returns references to every registered asset.
    pub fn get_assets(&self) -> Vec<GenericAssetRef> {
        let guard = self.store.read().expect("asset store lock poisoned");
        guard
            .iter_entries()
            .map(|(slot, generation, entry)| {
                GenericAssetRef::with_tag(&self.store, slot, generation, entry.data_type_id())
            })
            .collect()
    }

    /// Returns typed references to every registered asset whose payload is
    /// a `T`.
    pub fn assets_of_type<T: AssetData>(&self) -> Vec<AssetRef<T>> {
        let guard = self.store.read().expect("asset store lock poisoned");
        guard
            .iter_entries()
            .filter(|(_, _, entry)| entry.data_type_id() == TypeId::of::<T>())
            .map(|(slot, generation, _)| AssetRef::new(&self.store, slot, generation))
            .collect()
    }

    /// Returns the number of registered assets.
    pub fn asset_count(&self) -> usize {
        self.store.read().expect("asset store lock poisoned").len()
    }

    // --- Deletion and renaming ---

    /// Deletes the asset with the given ID. Outstanding references observe
    /// the deletion on their next `lock()`. Returns whether an asset was
    /// removed.
    pub fn delete_asset(&mut self, id: AssetId) -> bool {
        let removed = self
            .store
            .write()
            .expect("asset store lock poisoned")
            .remove_by_id(id);
        if removed {
            log::debug!("deleted asset {id}");
        }
        removed
    }

    /// Deletes the asset a reference points at. Returns whether an asset
    /// was removed.
    pub fn delete_asset_ref(&mut self, reference: &GenericAssetRef) -> bool {
        match reference.id() {
            Some(id) => self.delete_asset(id),
            None => false,
        }
    }

    /// Moves the asset with the given ID to a new location. This is the
    /// only legal way to reassign an asset's location after registration.
    /// Returns whether the asset existed.
    pub fn rename_asset(&mut self, id: AssetId, new_location: AssetLocation) -> bool {
        let guard = self.store.read().expect("asset store lock poisoned");
        match guard.get_by_id(id) {
            Some((_, _, entry)) => {
                entry.set_location(new_location);
                true
            }
            None => false,
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the catalog location of the `index`-th dependency of the asset
/// at `parent`: same pack, `<parent-name>.dep<index>` as the name.
fn dependency_location(parent: &AssetLocation, index: usize) -> Option<AssetLocation> {
    let name = AssetName::new(format!("{}.dep{index}", parent.asset_name())).ok()?;
    Some(AssetLocation::from_parts(
        parent.pack_name().cloned(),
        name,
        None,
    ))
}
