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

use std::fmt;

/// A marker trait for types that can be used as components in the ECS.
///
/// This trait must be implemented for any struct you wish to attach to an
/// entity. The `'static` lifetime ensures that the component type does not
/// contain any non-static references, and `Send + Sync` are required so
/// component data can be safely accessed from multiple threads.
pub trait Component: 'static + Send + Sync {}

/// The dense index assigned to a component type at registration.
///
/// Indices are handed out in registration order, starting at zero, and never
/// exceed `MAX_COMPONENTS`. The index doubles as the bit position of the
/// type inside an entity [`Signature`](boreal_core::ecs::Signature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(u8);

impl ComponentType {
    /// Wraps a raw dense index. Intended for the component manager.
    pub(crate) const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the index as a `usize`, suitable as a signature bit position.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.0)
    }
}
