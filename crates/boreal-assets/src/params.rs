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

//! Typed views over the JSON parameter blobs attached to imports.
//!
//! Importers receive parameters as a raw `serde_json::Value` on the context
//! and deserialize the struct they understand. Unknown keys are ignored;
//! missing keys take the defaults documented on each field; a malformed blob
//! is logged and replaced by the defaults rather than failing the import.

use boreal_core::asset::AssetLocation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Deserializes a parameter struct from the context's JSON blob, falling
/// back to `P::default()` (with a warning) when the blob is malformed.
pub fn parse_params<P: DeserializeOwned + Default>(
    value: &serde_json::Value,
    location: &AssetLocation,
) -> P {
    if value.is_null() {
        return P::default();
    }
    match serde_json::from_value(value.clone()) {
        Ok(params) => params,
        Err(error) => {
            log::warn!("malformed import parameters for '{location}': {error}; using defaults");
            P::default()
        }
    }
}

/// Target pixel format for an imported texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextureFormatParam {
    /// Keep whatever the source carries.
    #[default]
    Preserve,
    /// Force 8-bit RGB.
    #[serde(rename = "RGB")]
    Rgb,
    /// Force 8-bit RGBA.
    #[serde(rename = "RGBA")]
    Rgba,
    /// Request BC1 block compression.
    #[serde(rename = "BC1")]
    Bc1,
    /// Request BC3 block compression.
    #[serde(rename = "BC3")]
    Bc3,
    /// Request BC7 block compression.
    #[serde(rename = "BC7")]
    Bc7,
}

/// Parameters recognized by texture importers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextureImportParams {
    /// Whether to compute a full mip chain. Default: `true`.
    pub generate_mipmaps: bool,
    /// Whether to tag the pixels as sRGB-encoded. Default: `true`.
    #[serde(rename = "convertToSRGB")]
    pub convert_to_srgb: bool,
    /// Whether to flip the image vertically on import. Default: `false`.
    pub flip_vertically: bool,
    /// Target pixel format. Default: `Preserve`.
    pub format: TextureFormatParam,
    /// Maximum edge length in pixels; larger images are downscaled.
    /// `0` disables the limit. Default: `0`.
    pub max_size: u32,
    /// Block-compression quality in `[0, 1]`. Default: `0.9`.
    pub compression_quality: f32,
}

impl Default for TextureImportParams {
    fn default() -> Self {
        Self {
            generate_mipmaps: true,
            convert_to_srgb: true,
            flip_vertically: false,
            format: TextureFormatParam::Preserve,
            max_size: 0,
            compression_quality: 0.9,
        }
    }
}

/// Texture quality tier applied to a model's dependent textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextureQuality {
    /// Quarter-resolution textures.
    Low,
    /// Half-resolution textures.
    #[default]
    Medium,
    /// Full-resolution textures.
    High,
}

/// The post-process switches recognized by model importers.
///
/// Switches that only apply to richer formats (skinning, animations) are
/// accepted for every model import and ignored by importers whose format
/// cannot carry the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelPostProcessParams {
    /// Whether to compute tangents and bitangents. Default: `false`.
    pub calculate_tangent_space: bool,
    /// Whether to merge identical vertices into one index. Default: `true`.
    pub join_identical_vertices: bool,
    /// Whether to synthesize smooth vertex normals when the source has
    /// none. Default: `true`.
    pub generate_smooth_normals: bool,
    /// Whether to drop empty or degenerate meshes. Default: `true`.
    pub optimize_meshes: bool,
    /// Upper bound on bones per mesh for skinned formats. Default: `64`.
    pub max_bones: u32,
    /// Whether to import animation data. Default: `true`.
    pub import_animations: bool,
    /// Whether to read material definitions. Default: `true`.
    pub import_materials: bool,
    /// Whether to spawn texture dependencies for referenced images.
    /// Default: `true`.
    pub import_textures: bool,
    /// Uniform scale applied to all positions. Default: `1.0`.
    pub global_scale: f32,
    /// Quality tier for dependent textures. Default: `Medium`.
    pub texture_quality: TextureQuality,
    /// Whether to force dependent textures to stay uncompressed.
    /// Default: `false`.
    pub convert_to_uncompressed: bool,
}

impl Default for ModelPostProcessParams {
    fn default() -> Self {
        Self {
            calculate_tangent_space: false,
            join_identical_vertices: true,
            generate_smooth_normals: true,
            optimize_meshes: true,
            max_bones: 64,
            import_animations: true,
            import_materials: true,
            import_textures: true,
            global_scale: 1.0,
            texture_quality: TextureQuality::Medium,
            convert_to_uncompressed: false,
        }
    }
}

/// Parameters recognized by model importers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelImportParams {
    /// Per-texture overrides, applied positionally to the model's declared
    /// texture dependencies.
    pub texture_parameters: Vec<TextureImportParams>,
    /// The post-process switch group.
    pub post_process: ModelPostProcessParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_take_defaults_and_unknown_keys_are_ignored() {
        let location = AssetLocation::parse("params-test").unwrap();
        let value = json!({
            "flipVertically": true,
            "format": "BC7",
            "someFutureKnob": 42
        });

        let params: TextureImportParams = parse_params(&value, &location);
        assert!(params.flip_vertically);
        assert_eq!(params.format, TextureFormatParam::Bc7);
        // Untouched keys keep their documented defaults.
        assert!(params.generate_mipmaps);
        assert_eq!(params.max_size, 0);
    }

    #[test]
    fn null_and_malformed_blobs_fall_back_to_defaults() {
        let location = AssetLocation::parse("params-test").unwrap();

        let from_null: TextureImportParams = parse_params(&serde_json::Value::Null, &location);
        assert!(from_null.convert_to_srgb);

        let malformed = json!({ "maxSize": "not-a-number" });
        let from_bad: TextureImportParams = parse_params(&malformed, &location);
        assert_eq!(from_bad.max_size, 0);
    }

    #[test]
    fn model_params_nest_the_post_process_group() {
        let location = AssetLocation::parse("params-test").unwrap();
        let value = json!({
            "textureParameters": [ { "maxSize": 256 } ],
            "postProcess": {
                "globalScale": 0.01,
                "importTextures": false,
                "textureQuality": "High"
            }
        });

        let params: ModelImportParams = parse_params(&value, &location);
        assert_eq!(params.texture_parameters.len(), 1);
        assert_eq!(params.texture_parameters[0].max_size, 256);
        assert_eq!(params.post_process.global_scale, 0.01);
        assert!(!params.post_process.import_textures);
        assert_eq!(params.post_process.texture_quality, TextureQuality::High);
        // The untouched switches keep their defaults.
        assert!(params.post_process.join_identical_vertices);
        assert_eq!(params.post_process.max_bones, 64);
    }
}
