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

//! The prioritized importer registry and its selection loop.

use crate::{AssetImporter, ImportContext, RegisteredImporter};
use boreal_core::asset::AssetData;
use std::any::TypeId;
use std::collections::HashMap;

/// Holds a priority-ordered list of importer instances per asset type.
///
/// Within a type, importers are kept sorted by descending priority;
/// registrations at equal priority preserve their insertion order. Across
/// types, auto-import tries each type's list in the order the types first
/// appeared in the registry.
pub struct ImporterRegistry {
    importers: HashMap<TypeId, Vec<RegisteredImporter>>,
    /// Asset types in first-registration order, for auto-import iteration.
    type_order: Vec<TypeId>,
}

impl ImporterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            importers: HashMap::new(),
            type_order: Vec::new(),
        }
    }

    /// Registers an importer for asset type `A` with the given priority and
    /// returns its handle. The registry takes ownership of the instance.
    pub fn register_importer<A: AssetData, I: AssetImporter<A>>(
        &mut self,
        importer: I,
        priority: i32,
    ) -> RegisteredImporter {
        let registered = RegisteredImporter::new::<A, I>(importer, priority);
        let type_id = TypeId::of::<A>();

        if !self.importers.contains_key(&type_id) {
            self.type_order.push(type_id);
        }
        let list = self.importers.entry(type_id).or_default();

        // Descending priority; equal priorities keep insertion order by
        // inserting after the last entry of the same tier.
        let position = list
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(list.len());
        list.insert(position, registered.clone());

        log::debug!(
            "registered importer for '{}' at priority {priority}",
            registered.asset_type_name()
        );
        registered
    }

    /// Drops every importer registered for asset type `A`.
    pub fn unregister_importers_for_type<A: AssetData>(&mut self) {
        let type_id = TypeId::of::<A>();
        self.importers.remove(&type_id);
        self.type_order.retain(|entry| *entry != type_id);
    }

    /// Returns true if at least one importer is registered for `A`.
    pub fn has_importers_for_type<A: AssetData>(&self) -> bool {
        self.importers
            .get(&TypeId::of::<A>())
            .map_or(false, |list| !list.is_empty())
    }

    /// Returns the importer handles registered for `A`, in selection order.
    pub fn importers_for_type<A: AssetData>(&self) -> Vec<RegisteredImporter> {
        self.importers
            .get(&TypeId::of::<A>())
            .cloned()
            .unwrap_or_default()
    }

    /// Runs the selection loop for one asset type. Returns true when an
    /// importer produced a main asset into the context.
    pub(crate) fn run_for_type(&self, data_type: TypeId, ctx: &mut ImportContext) -> bool {
        match self.importers.get(&data_type) {
            Some(list) => Self::try_importers(list, ctx),
            None => false,
        }
    }

    /// Runs the selection loop across every registered type, in type
    /// registration order, until one succeeds.
    pub(crate) fn run_auto(&self, ctx: &mut ImportContext) -> bool {
        for type_id in &self.type_order {
            if self.run_for_type(*type_id, ctx) {
                return true;
            }
        }
        false
    }

    /// The selection algorithm: partition the candidates into compatible
    /// (`can_read` true) and untried, preserving order; try all compatibles
    /// first, then the untried ones; stop at the first importer that
    /// produces a main asset.
    fn try_importers(list: &[RegisteredImporter], ctx: &mut ImportContext) -> bool {
        let (compatible, untried): (Vec<_>, Vec<_>) = list
            .iter()
            .partition(|importer| importer.can_read(ctx.input()));

        for importer in compatible.into_iter().chain(untried) {
            ctx.clear_products();
            importer.import(ctx);
            if ctx.has_main_asset() {
                return true;
            }
        }
        false
    }
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Asset, ImportInput};
    use boreal_core::asset::AssetLocation;
    use std::sync::Arc;

    struct Blob(#[allow(dead_code)] u8);
    impl boreal_core::asset::AssetData for Blob {}

    /// Records its invocation order into a shared log.
    struct ProbeImporter {
        tag: &'static str,
        readable: bool,
        succeeds: bool,
        call_log: Arc<std::sync::Mutex<Vec<&'static str>>>,
    }

    impl AssetImporter<Blob> for ProbeImporter {
        fn can_read(&self, _input: &ImportInput) -> bool {
            self.readable
        }

        fn import_impl(&self, ctx: &mut ImportContext) -> anyhow::Result<()> {
            self.call_log.lock().unwrap().push(self.tag);
            if self.succeeds {
                ctx.set_main_asset(Asset::with_data(ctx.location().clone(), Blob(1)));
                Ok(())
            } else {
                anyhow::bail!("probe importer '{}' declines", self.tag)
            }
        }
    }

    fn probe(
        tag: &'static str,
        readable: bool,
        succeeds: bool,
        log: &Arc<std::sync::Mutex<Vec<&'static str>>>,
    ) -> ProbeImporter {
        ProbeImporter {
            tag,
            readable,
            succeeds,
            call_log: log.clone(),
        }
    }

    #[test]
    fn priority_order_is_descending_and_stable() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = ImporterRegistry::new();
        registry.register_importer::<Blob, _>(probe("p10", true, false, &log), 10);
        registry.register_importer::<Blob, _>(probe("p100-a", true, false, &log), 100);
        registry.register_importer::<Blob, _>(probe("p50", true, false, &log), 50);
        registry.register_importer::<Blob, _>(probe("p100-b", true, false, &log), 100);

        let priorities: Vec<i32> = registry
            .importers_for_type::<Blob>()
            .iter()
            .map(|importer| importer.priority())
            .collect();
        assert_eq!(priorities, vec![100, 100, 50, 10]);

        // Equal-priority entries keep their insertion order; verify by
        // running the whole (all-failing) selection loop.
        let mut ctx = ImportContext::new(
            AssetLocation::parse("probe").unwrap(),
            ImportInput::memory(vec![]),
        );
        assert!(!registry.run_for_type(std::any::TypeId::of::<Blob>(), &mut ctx));
        assert_eq!(*log.lock().unwrap(), vec!["p100-a", "p100-b", "p50", "p10"]);
    }

    #[test]
    fn compatibles_run_before_untried() {
        // A (priority 10) reads and succeeds, B (priority 100) cannot read,
        // C (priority 50) reads but fails: expected call order C then A,
        // with B never invoked.
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = ImporterRegistry::new();
        registry.register_importer::<Blob, _>(probe("A", true, true, &log), 10);
        registry.register_importer::<Blob, _>(probe("B", false, true, &log), 100);
        registry.register_importer::<Blob, _>(probe("C", true, false, &log), 50);

        let mut ctx = ImportContext::new(
            AssetLocation::parse("probe").unwrap(),
            ImportInput::memory(vec![]),
        );
        assert!(registry.run_for_type(std::any::TypeId::of::<Blob>(), &mut ctx));
        assert_eq!(*log.lock().unwrap(), vec!["C", "A"]);
    }

    #[test]
    fn untried_run_only_after_all_compatibles_fail() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = ImporterRegistry::new();
        registry.register_importer::<Blob, _>(probe("readable", true, false, &log), 100);
        registry.register_importer::<Blob, _>(probe("fallback", false, true, &log), 50);

        let mut ctx = ImportContext::new(
            AssetLocation::parse("probe").unwrap(),
            ImportInput::memory(vec![]),
        );
        assert!(registry.run_for_type(std::any::TypeId::of::<Blob>(), &mut ctx));
        assert_eq!(*log.lock().unwrap(), vec!["readable", "fallback"]);
    }

    #[test]
    fn unregister_clears_the_type() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = ImporterRegistry::new();
        registry.register_importer::<Blob, _>(probe("only", true, true, &log), 1);
        assert!(registry.has_importers_for_type::<Blob>());

        registry.unregister_importers_for_type::<Blob>();
        assert!(!registry.has_importers_for_type::<Blob>());
        assert!(registry.importers_for_type::<Blob>().is_empty());
    }
}
