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

//! Heterogeneous multi-component query support.

use crate::{Component, ComponentManager};
use boreal_core::ecs::{EcsError, Signature};

/// A tuple of component types usable in a coordinator query.
///
/// Implemented for tuples `(A,)` through twelve elements, where every
/// element is a registered [`Component`]. The tuple's combined signature is
/// the bitwise union of each element's registered index; an entity matches
/// the query when its own signature contains all of those bits.
pub trait ComponentTuple {
    /// Builds the combined signature mask for this tuple.
    ///
    /// Fails with [`EcsError::ComponentNotRegistered`] naming the first
    /// unregistered element.
    fn signature(components: &ComponentManager) -> Result<Signature, EcsError>;
}

// Implementation for tuples of component types. We use a macro to avoid an
// "infinity" of manual implementations while keeping every arity in lockstep.
macro_rules! impl_component_tuple {
    ($($C:ident),*) => {
        impl<$($C: Component),*> ComponentTuple for ($($C,)*) {
            fn signature(components: &ComponentManager) -> Result<Signature, EcsError> {
                let mut signature = Signature::empty();
                $(signature.set(components.component_type::<$C>()?.index());)*
                Ok(signature)
            }
        }
    };
}

impl_component_tuple!(C1);
impl_component_tuple!(C1, C2);
impl_component_tuple!(C1, C2, C3);
impl_component_tuple!(C1, C2, C3, C4);
impl_component_tuple!(C1, C2, C3, C4, C5);
impl_component_tuple!(C1, C2, C3, C4, C5, C6);
impl_component_tuple!(C1, C2, C3, C4, C5, C6, C7);
impl_component_tuple!(C1, C2, C3, C4, C5, C6, C7, C8);
impl_component_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9);
impl_component_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10);
impl_component_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11);
impl_component_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11, C12);
