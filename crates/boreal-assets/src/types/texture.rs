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

use boreal_core::asset::AssetData;

/// Pixel layout of a decoded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, linear.
    Rgba8,
    /// 8-bit RGBA, sRGB-encoded.
    Rgba8Srgb,
    /// 8-bit RGB, linear.
    Rgb8,
    /// 8-bit RGB, sRGB-encoded.
    Rgb8Srgb,
}

impl TextureFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 | Self::Rgba8Srgb => 4,
            Self::Rgb8 | Self::Rgb8Srgb => 3,
        }
    }
}

/// A CPU-side decoded texture.
///
/// Pixels are tightly packed rows in the given format, top row first (unless
/// the import flipped it). Mip levels beyond the base are a count only; the
/// renderer generates the chain on upload.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Raw pixel bytes, `width * height * bytes_per_pixel` long.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout.
    pub format: TextureFormat,
    /// Number of mip levels (1 = base level only).
    pub mip_level_count: u32,
}

impl AssetData for TextureData {}

impl TextureData {
    /// Returns the number of mip levels of a full chain for the given
    /// dimensions.
    pub fn full_mip_chain_len(width: u32, height: u32) -> u32 {
        32 - width.max(height).max(1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mip_chain_counts() {
        assert_eq!(TextureData::full_mip_chain_len(1, 1), 1);
        assert_eq!(TextureData::full_mip_chain_len(2, 2), 2);
        assert_eq!(TextureData::full_mip_chain_len(256, 256), 9);
        assert_eq!(TextureData::full_mip_chain_len(640, 480), 10);
    }
}
