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

//! The asset pillar: a content-addressed catalog with a prioritized
//! importer pipeline.
//!
//! Assets are typed payloads ([`TextureData`], [`ModelData`], or any type
//! implementing [`AssetData`](boreal_core::asset::AssetData)) wrapped in an
//! [`Asset`] container that carries their metadata. The [`AssetCatalog`]
//! owns every registered asset by UUID; external code holds non-owning
//! [`AssetRef`]s and upgrades them with `lock()` for the duration of a
//! critical section.
//!
//! Imports flow through the [`ImporterRegistry`]: importers register per
//! asset type with a priority, the registry selects candidates by their
//! `can_read` probe, and the catalog registers whatever the winning importer
//! produced: main asset first, then every declared dependency, recursively.
//! Importer failures are logged and absorbed; the caller only ever sees a
//! valid reference or a null one.

mod asset;
mod catalog;
mod context;
mod handle;
mod importer;
pub mod importers;
mod params;
mod refs;
mod registry;
mod store;
pub mod types;

pub use asset::*;
pub use catalog::*;
pub use context::*;
pub use handle::*;
pub use importer::*;
pub use params::*;
pub use refs::*;
pub use registry::*;
pub use types::{MeshData, ModelData, TextureData, TextureFormat};

pub use boreal_core::asset::{
    AssetData, AssetError, AssetId, AssetLocation, AssetMetadata, AssetName, AssetPackName,
    AssetStatus,
};
