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

use crate::Component;

/// A component that describes an entity's position, rotation, and scale in
/// the scene.
///
/// Rotation is stored as a quaternion in `[x, y, z, w]` order. The renderer
/// and the gizmo tooling consume this component; systems that animate
/// entities modify it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation (position) of the entity.
    pub translation: [f32; 3],
    /// The rotation of the entity, as a quaternion `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// The scale of the entity.
    pub scale: [f32; 3],
}

impl Component for Transform {}

impl Transform {
    /// The identity quaternion.
    const ROTATION_IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Creates a transform from its three parts.
    pub fn new(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a transform at `translation` with identity rotation and scale.
    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            rotation: Self::ROTATION_IDENTITY,
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Creates the identity transform, representing the world origin.
    pub fn identity() -> Self {
        Self::from_translation([0.0, 0.0, 0.0])
    }
}

impl Default for Transform {
    /// Returns the identity transform.
    fn default() -> Self {
        Self::identity()
    }
}
