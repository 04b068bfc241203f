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

//! Provides the foundational traits and primitive types of the asset system.
//!
//! This module defines the "common language" for all asset-related
//! operations: stable asset identifiers, validated names, parsed locations,
//! and the metadata header every asset carries. It has no knowledge of how
//! assets are stored or imported; the catalog and the importer pipeline are
//! built on top of these primitives in the `boreal-assets` crate.

mod error;
mod id;
mod location;
mod metadata;
mod name;

pub use error::*;
pub use id::*;
pub use location::*;
pub use metadata::*;
pub use name::*;

/// A marker trait for types that can be stored as asset payloads.
///
/// Implementing `AssetData` makes a type eligible for the typed asset layer:
/// it can be wrapped in an `Asset<T>`, referenced through an `AssetRef<T>`,
/// and produced by an importer registered for it.
///
/// The supertraits enforce the safety guarantees the catalog relies on:
/// - `Send` + `Sync`: payloads may be shared across threads through handles.
/// - `'static`: payloads contain no borrowed data, so they can live for the
///   lifetime of the catalog.
pub trait AssetData: Send + Sync + 'static {}
