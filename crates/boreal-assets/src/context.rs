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

//! The per-import scratchpad passed between the catalog and an importer.

use crate::asset::short_type_name;
use crate::{Asset, ErasedAsset, GenericAssetRef, RegisteredImporter};
use anyhow::Context as _;
use boreal_core::asset::{AssetData, AssetLocation};
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// The input an importer reads from: a file on disk or an in-memory buffer.
#[derive(Clone)]
pub enum ImportInput {
    /// A filesystem-backed input.
    File {
        /// Path to the source file.
        path: PathBuf,
    },
    /// An in-memory buffer, with an optional extension hint (`".png"`
    /// style, leading dot included) standing in for the file name.
    Memory {
        /// The raw bytes of the input.
        bytes: Vec<u8>,
        /// Optional extension hint. Always starts with a dot.
        extension: Option<String>,
    },
}

impl ImportInput {
    /// Creates a file-backed input.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a memory-backed input with no extension hint.
    pub fn memory(bytes: Vec<u8>) -> Self {
        Self::Memory {
            bytes,
            extension: None,
        }
    }

    /// Creates a memory-backed input with an extension hint.
    ///
    /// The hint must include the leading dot (`".png"`).
    pub fn memory_with_extension(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        assert!(
            extension.starts_with('.'),
            "extension hint must start with a dot"
        );
        Self::Memory {
            bytes,
            extension: Some(extension),
        }
    }

    /// Returns the lowercase extension of the input, dot included, when one
    /// is known (`".png"`).
    pub fn extension(&self) -> Option<String> {
        match self {
            Self::File { path } => path
                .extension()
                .and_then(|extension| extension.to_str())
                .map(|extension| format!(".{}", extension.to_ascii_lowercase())),
            Self::Memory { extension, .. } => {
                extension.as_ref().map(|hint| hint.to_ascii_lowercase())
            }
        }
    }

    /// Reads the whole input into memory. File inputs hit the disk; memory
    /// inputs borrow their buffer.
    pub fn read_bytes(&self) -> anyhow::Result<Cow<'_, [u8]>> {
        match self {
            Self::File { path } => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read '{}'", path.display()))?;
                Ok(Cow::Owned(bytes))
            }
            Self::Memory { bytes, .. } => Ok(Cow::Borrowed(bytes)),
        }
    }

    /// Returns the directory containing a file input, used by importers to
    /// resolve resources referenced relative to the source file.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            Self::File { path } => path.parent(),
            Self::Memory { .. } => None,
        }
    }
}

impl fmt::Debug for ImportInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => f.debug_struct("File").field("path", path).finish(),
            Self::Memory { bytes, extension } => f
                .debug_struct("Memory")
                .field("len", &bytes.len())
                .field("extension", extension)
                .finish(),
        }
    }
}

/// A dependency declared by an importer, to be imported by the catalog
/// after the main asset has been registered.
pub struct PendingDependency {
    pub(crate) data_type: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) input: ImportInput,
    pub(crate) importer: Option<RegisteredImporter>,
    pub(crate) parameters: serde_json::Value,
}

/// Per-import state shared between the catalog, the registry, and the
/// selected importer.
///
/// The context carries the import's input and configuration in, and the
/// importer's products (the main asset and any declared dependencies)
/// back out. The location starts as the caller's target (or the unlocated
/// sentinel) and is stamped onto the asset at registration.
pub struct ImportContext {
    input: ImportInput,
    location: AssetLocation,
    parent: Option<GenericAssetRef>,
    parameters: serde_json::Value,
    main_asset: Option<Box<dyn ErasedAsset>>,
    dependencies: Vec<PendingDependency>,
}

impl ImportContext {
    /// Creates a context for importing `input` into `location`.
    pub fn new(location: AssetLocation, input: ImportInput) -> Self {
        Self {
            input,
            location,
            parent: None,
            parameters: serde_json::Value::Null,
            main_asset: None,
            dependencies: Vec::new(),
        }
    }

    /// Attaches importer parameters (a JSON object; unknown keys are
    /// ignored by the importers).
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }

    pub(crate) fn set_parent(&mut self, parent: GenericAssetRef) {
        self.parent = Some(parent);
    }

    /// The input to import from.
    pub fn input(&self) -> &ImportInput {
        &self.input
    }

    /// The catalog location this import will be registered under.
    pub fn location(&self) -> &AssetLocation {
        &self.location
    }

    /// The parameters attached to this import.
    pub fn parameters(&self) -> &serde_json::Value {
        &self.parameters
    }

    /// The asset this import is a dependency of, when the catalog spawned
    /// it from another importer's declaration.
    pub fn parent(&self) -> Option<&GenericAssetRef> {
        self.parent.as_ref()
    }

    /// Installs the import's result. Importers must call this before
    /// returning success.
    pub fn set_main_asset<T: AssetData>(&mut self, asset: Asset<T>) {
        self.main_asset = Some(Box::new(asset));
    }

    /// Returns true if a main asset has been produced.
    pub fn has_main_asset(&self) -> bool {
        self.main_asset.is_some()
    }

    /// Declares that the imported asset depends on another asset of type
    /// `T`, to be auto-imported from `input` after registration.
    pub fn add_dependency<T: AssetData>(&mut self, input: ImportInput) {
        self.add_dependency_with::<T>(input, None, serde_json::Value::Null);
    }

    /// Declares a dependency with an explicit importer choice and/or
    /// parameters.
    pub fn add_dependency_with<T: AssetData>(
        &mut self,
        input: ImportInput,
        importer: Option<RegisteredImporter>,
        parameters: serde_json::Value,
    ) {
        self.dependencies.push(PendingDependency {
            data_type: TypeId::of::<T>(),
            type_name: short_type_name::<T>(),
            input,
            importer,
            parameters,
        });
    }

    /// The dependencies declared so far.
    pub fn dependencies(&self) -> &[PendingDependency] {
        &self.dependencies
    }

    /// Discards the main asset and all declared dependencies.
    ///
    /// Called before every importer attempt and after a failed one, so a
    /// losing importer can never leak products into the next attempt.
    pub(crate) fn clear_products(&mut self) {
        self.main_asset = None;
        self.dependencies.clear();
    }

    pub(crate) fn take_products(
        &mut self,
    ) -> (Option<Box<dyn ErasedAsset>>, Vec<PendingDependency>) {
        (self.main_asset.take(), std::mem::take(&mut self.dependencies))
    }

    pub(crate) fn data_type_of_main(&self) -> Option<TypeId> {
        self.main_asset.as_ref().map(|main| main.data_type_id())
    }
}
