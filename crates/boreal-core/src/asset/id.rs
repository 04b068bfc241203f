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

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A globally unique, persistent identifier for a logical asset.
///
/// The ID represents the "idea" of an asset, decoupled from its physical
/// location: an asset can be moved or renamed without breaking references
/// that were persisted by UUID.
///
/// A freshly constructed asset carries the [`nil`](AssetId::nil) ID, meaning
/// "not yet registered". The catalog assigns a random (version 4) ID exactly
/// once, at registration time; after that the ID never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Creates a new, random (version 4) `AssetId`.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the nil ID, representing "unassigned".
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil ("unassigned") ID.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for AssetId {
    /// Returns the nil ID; real IDs are stamped by the catalog.
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_and_non_nil() {
        let a = AssetId::generate();
        let b = AssetId::generate();
        assert!(!a.is_nil());
        assert!(!b.is_nil());
        assert_ne!(a, b);
    }

    #[test]
    fn default_is_nil() {
        assert!(AssetId::default().is_nil());
        assert_eq!(AssetId::default(), AssetId::nil());
    }
}
