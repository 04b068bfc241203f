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

use crate::asset::{AssetId, AssetLocation};
use serde::{Deserialize, Serialize};

/// The load state of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    /// The asset exists in the catalog but carries no payload yet.
    Unloaded,
    /// The asset's payload has been populated by an importer or by hand.
    Loaded,
}

/// The "identity card" every asset carries.
///
/// Metadata describes an asset independently of its payload: what kind of
/// data it holds, whether that data is present, the stable UUID assigned at
/// registration, and the human-readable catalog location. The catalog and
/// editor tooling operate on metadata without ever touching payload bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// A short identifier for the payload type (e.g. `"TextureData"`).
    pub type_name: String,

    /// The current load state.
    pub status: AssetStatus,

    /// The number of owning handles alive at the time this snapshot was
    /// taken. Advisory only; the catalog's own handle is not counted.
    #[serde(skip)]
    pub reference_count: usize,

    /// The stable identifier. Nil until the catalog registers the asset,
    /// immutable afterwards.
    pub id: AssetId,

    /// The catalog location. Reassigned only through the catalog's rename
    /// path.
    pub location: AssetLocation,
}

impl AssetMetadata {
    /// Creates metadata for a freshly constructed, unregistered asset.
    pub fn new(type_name: impl Into<String>, location: AssetLocation) -> Self {
        Self {
            type_name: type_name.into(),
            status: AssetStatus::Unloaded,
            reference_count: 0,
            id: AssetId::nil(),
            location,
        }
    }
}
