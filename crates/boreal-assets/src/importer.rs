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

//! The importer contract and the type-erased registration handle.

use crate::{ImportContext, ImportInput};
use boreal_core::asset::AssetData;
use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;

/// A type that can turn an import input into an asset of type `A`.
///
/// Implementors provide the cheap [`can_read`](AssetImporter::can_read)
/// probe and the actual [`import_impl`](AssetImporter::import_impl); the
/// provided [`import`](AssetImporter::import) wrapper is what the registry
/// invokes: it absorbs failures so a broken file can never abort the
/// selection loop.
pub trait AssetImporter<A: AssetData>: Send + Sync + 'static {
    /// Cheap compatibility probe.
    ///
    /// May inspect the extension or sniff magic bytes; must not perform the
    /// import and must not fail. The registry may call this repeatedly.
    fn can_read(&self, input: &ImportInput) -> bool;

    /// Performs the import.
    ///
    /// On success the implementation must have installed the main asset via
    /// [`ImportContext::set_main_asset`]. Declared dependencies are imported
    /// by the catalog after the main asset is registered.
    fn import_impl(&self, ctx: &mut ImportContext) -> anyhow::Result<()>;

    /// Failure-absorbing wrapper around [`import_impl`](AssetImporter::import_impl).
    ///
    /// Errors are logged with the target location and the context's products
    /// are cleared, which the registry reads as "try the next candidate".
    fn import(&self, ctx: &mut ImportContext) {
        match self.import_impl(ctx) {
            Ok(()) => {
                if !ctx.has_main_asset() {
                    log::warn!(
                        "importer for '{}' returned without producing a main asset",
                        ctx.location()
                    );
                    ctx.clear_products();
                }
            }
            Err(error) => {
                log::warn!("import of '{}' failed: {error:#}", ctx.location());
                ctx.clear_products();
            }
        }
    }
}

/// Object-safe bridge over [`AssetImporter`], so the registry can hold
/// importers for different asset types in one table.
pub(crate) trait ErasedImporter: Send + Sync {
    fn can_read(&self, input: &ImportInput) -> bool;
    fn import(&self, ctx: &mut ImportContext);
}

/// Adapts a typed importer to the erased interface, checking that whatever
/// it produced really is an `A`.
struct TypedImporter<A: AssetData, I: AssetImporter<A>> {
    importer: I,
    _marker: PhantomData<fn() -> A>,
}

impl<A: AssetData, I: AssetImporter<A>> ErasedImporter for TypedImporter<A, I> {
    fn can_read(&self, input: &ImportInput) -> bool {
        self.importer.can_read(input)
    }

    fn import(&self, ctx: &mut ImportContext) {
        self.importer.import(ctx);
        // A payload of the wrong type would poison every typed ref handed
        // out for it; treat it as a failed import instead.
        if let Some(produced) = ctx.data_type_of_main() {
            if produced != TypeId::of::<A>() {
                log::warn!(
                    "importer for '{}' produced a payload of an unexpected type",
                    ctx.location()
                );
                ctx.clear_products();
            }
        }
    }
}

/// A handle to an importer registered in the registry.
///
/// The registry owns the importer instance; the handle is a cheap clone
/// that can be stored, compared against the candidate lists, or passed to
/// `AssetCatalog::import_with_importer` to bypass auto-selection.
#[derive(Clone)]
pub struct RegisteredImporter {
    pub(crate) importer: Arc<dyn ErasedImporter>,
    pub(crate) data_type: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) priority: i32,
}

impl RegisteredImporter {
    pub(crate) fn new<A: AssetData, I: AssetImporter<A>>(importer: I, priority: i32) -> Self {
        Self {
            importer: Arc::new(TypedImporter::<A, I> {
                importer,
                _marker: PhantomData,
            }),
            data_type: TypeId::of::<A>(),
            type_name: crate::asset::short_type_name::<A>(),
            priority,
        }
    }

    /// The registration priority (higher is tried first).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The `TypeId` of the asset payload this importer produces.
    pub fn asset_type(&self) -> TypeId {
        self.data_type
    }

    /// The unqualified name of the asset payload type.
    pub fn asset_type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn can_read(&self, input: &ImportInput) -> bool {
        self.importer.can_read(input)
    }

    pub(crate) fn import(&self, ctx: &mut ImportContext) {
        self.importer.import(ctx);
    }
}
