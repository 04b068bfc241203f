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

//! PNG texture importing.

use crate::types::{TextureData, TextureFormat};
use crate::{
    parse_params, Asset, AssetImporter, ImportContext, ImportInput, TextureFormatParam,
    TextureImportParams,
};
use anyhow::Context as _;
use image::imageops::FilterType;

/// The 8-byte PNG file signature.
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Imports PNG files into [`TextureData`] assets.
///
/// Honors the texture parameter set: vertical flip, maximum size, RGB/RGBA
/// forcing, sRGB tagging, and mip chain length. Block-compressed target
/// formats are accepted but applied later in the pipeline; the imported
/// payload stays uncompressed.
#[derive(Clone, Default)]
pub struct PngTextureImporter;

impl AssetImporter<TextureData> for PngTextureImporter {
    fn can_read(&self, input: &ImportInput) -> bool {
        match input {
            ImportInput::Memory { bytes, extension } => {
                bytes.starts_with(&PNG_MAGIC)
                    || extension.as_deref().is_some_and(|hint| {
                        hint.eq_ignore_ascii_case(".png")
                    })
            }
            ImportInput::File { .. } => input.extension().as_deref() == Some(".png"),
        }
    }

    fn import_impl(&self, ctx: &mut ImportContext) -> anyhow::Result<()> {
        let params: TextureImportParams = parse_params(ctx.parameters(), ctx.location());
        let bytes = ctx.input().read_bytes()?.into_owned();

        let mut img =
            image::load_from_memory(&bytes).context("Failed to decode image from memory")?;

        if params.flip_vertically {
            img = img.flipv();
        }
        if params.max_size > 0 && (img.width() > params.max_size || img.height() > params.max_size)
        {
            img = img.resize(params.max_size, params.max_size, FilterType::Triangle);
        }

        let (pixels, format) = match params.format {
            TextureFormatParam::Rgb => {
                let rgb = img.to_rgb8();
                let format = if params.convert_to_srgb {
                    TextureFormat::Rgb8Srgb
                } else {
                    TextureFormat::Rgb8
                };
                (rgb.into_raw(), format)
            }
            TextureFormatParam::Preserve | TextureFormatParam::Rgba => {
                let rgba = img.to_rgba8();
                let format = if params.convert_to_srgb {
                    TextureFormat::Rgba8Srgb
                } else {
                    TextureFormat::Rgba8
                };
                (rgba.into_raw(), format)
            }
            TextureFormatParam::Bc1 | TextureFormatParam::Bc3 | TextureFormatParam::Bc7 => {
                log::debug!(
                    "block compression for '{}' is applied at pack time; importing uncompressed",
                    ctx.location()
                );
                let rgba = img.to_rgba8();
                let format = if params.convert_to_srgb {
                    TextureFormat::Rgba8Srgb
                } else {
                    TextureFormat::Rgba8
                };
                (rgba.into_raw(), format)
            }
        };

        let (width, height) = (img.width(), img.height());
        let mip_level_count = if params.generate_mipmaps {
            TextureData::full_mip_chain_len(width, height)
        } else {
            1
        };

        ctx.set_main_asset(Asset::with_data(
            ctx.location().clone(),
            TextureData {
                pixels,
                width,
                height,
                format,
                mip_level_count,
            },
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreal_core::asset::AssetLocation;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn can_read_by_magic_and_extension() {
        let importer = PngTextureImporter;
        assert!(importer.can_read(&ImportInput::memory(png_bytes(1, 1))));
        assert!(importer.can_read(&ImportInput::memory_with_extension(vec![0, 1], ".png")));
        assert!(importer.can_read(&ImportInput::file("textures/wall.png")));
        assert!(!importer.can_read(&ImportInput::memory(vec![0, 1, 2, 3])));
        assert!(!importer.can_read(&ImportInput::file("meshes/car.obj")));
    }

    #[test]
    fn imports_with_default_parameters() {
        let importer = PngTextureImporter;
        let mut ctx = ImportContext::new(
            AssetLocation::parse("wall").unwrap(),
            ImportInput::memory(png_bytes(4, 2)),
        );
        importer.import(&mut ctx);
        assert!(ctx.has_main_asset());
    }

    #[test]
    fn max_size_downscales_and_disabling_mipmaps_yields_one_level() {
        let importer = PngTextureImporter;
        let params = serde_json::json!({
            "generateMipmaps": false,
            "maxSize": 2,
            "convertToSRGB": false
        });
        let mut ctx = ImportContext::new(
            AssetLocation::parse("wall").unwrap(),
            ImportInput::memory(png_bytes(8, 8)),
        )
        .with_parameters(params);

        importer.import_impl(&mut ctx).unwrap();

        let texture = imported_texture(&mut ctx);
        assert_eq!(texture.width, 2);
        assert_eq!(texture.height, 2);
        assert_eq!(texture.mip_level_count, 1);
        assert_eq!(texture.format, TextureFormat::Rgba8);
        assert_eq!(texture.pixels.len(), 2 * 2 * 4);
    }

    /// Pulls the imported texture payload back out of the context.
    fn imported_texture(ctx: &mut ImportContext) -> TextureData {
        let (main, _deps) = ctx.take_products();
        let entry: std::sync::Arc<dyn crate::ErasedAsset> =
            std::sync::Arc::from(main.expect("import should have produced a main asset"));
        let typed = entry
            .as_any_arc()
            .downcast::<Asset<TextureData>>()
            .ok()
            .expect("payload should be a TextureData");
        let data = typed.data();
        data.clone().expect("payload should be present")
    }
}
