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

//! Defines the Light component for the ECS.

use crate::Component;

/// The type and shape-specific properties of a light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightType {
    /// A sun-like light: parallel rays, no attenuation. Direction comes from
    /// the entity's transform.
    Directional,
    /// A point light radiating in all directions.
    Point {
        /// The distance at which the light's contribution reaches zero.
        range: f32,
    },
    /// A cone-shaped spot light.
    Spot {
        /// The distance at which the light's contribution reaches zero.
        range: f32,
        /// The half-angle of the inner (full-intensity) cone, in radians.
        inner_angle: f32,
        /// The half-angle of the outer (falloff) cone, in radians.
        outer_angle: f32,
    },
}

/// A component that adds a light source to an entity.
///
/// The entity's [`Transform`](crate::Transform) provides the light's
/// world-space position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// The type and properties of the light source.
    pub light_type: LightType,

    /// Linear RGB color of the emitted light.
    pub color: [f32; 3],

    /// Intensity multiplier applied to the color.
    pub intensity: f32,

    /// Whether the light is currently active.
    ///
    /// Disabled lights are not extracted for rendering and have no
    /// performance impact on the scene.
    pub enabled: bool,
}

impl Component for Light {}

impl Default for Light {
    fn default() -> Self {
        Self {
            light_type: LightType::Directional,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            enabled: true,
        }
    }
}

impl Light {
    /// Creates a new enabled white light with the given type.
    pub fn new(light_type: LightType) -> Self {
        Self {
            light_type,
            ..Self::default()
        }
    }

    /// Creates a new directional light (sun-like).
    pub fn directional() -> Self {
        Self::new(LightType::Directional)
    }

    /// Creates a new point light with a default 10 unit range.
    pub fn point() -> Self {
        Self::new(LightType::Point { range: 10.0 })
    }

    /// Creates a new spot light with a default 30°/45° cone.
    pub fn spot() -> Self {
        Self::new(LightType::Spot {
            range: 10.0,
            inner_angle: 30.0_f32.to_radians(),
            outer_angle: 45.0_f32.to_radians(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_default() {
        let light = Light::default();
        assert!(light.enabled);
        assert!(matches!(light.light_type, LightType::Directional));
    }

    #[test]
    fn test_light_constructors() {
        assert!(matches!(Light::point().light_type, LightType::Point { .. }));
        assert!(matches!(Light::spot().light_type, LightType::Spot { .. }));
        assert!(Light::directional().enabled);
    }
}
