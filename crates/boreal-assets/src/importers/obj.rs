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

//! OBJ model importing, with texture dependency spawning.

use crate::types::{MeshData, ModelData, TextureData};
use crate::{
    parse_params, Asset, AssetImporter, ImportContext, ImportInput, ModelImportParams,
    TextureFormatParam, TextureImportParams, TextureQuality,
};
use ahash::AHashMap;
use anyhow::Context as _;
use std::path::Path;

/// Imports Wavefront OBJ files into [`ModelData`] assets.
///
/// File-backed imports resolve the sibling `.mtl` library and, when
/// `importTextures` is enabled, declare one [`TextureData`] dependency per
/// referenced diffuse texture. Memory-backed imports carry no material
/// library, so they only record geometry.
///
/// OBJ carries no skinning or animation data; the corresponding parameter
/// switches are accepted and ignored.
#[derive(Clone, Default)]
pub struct ObjModelImporter;

impl AssetImporter<ModelData> for ObjModelImporter {
    fn can_read(&self, input: &ImportInput) -> bool {
        match input.extension().as_deref() {
            Some(".obj") => true,
            Some(_) => false,
            None => match input {
                ImportInput::Memory { bytes, .. } => looks_like_obj(bytes),
                ImportInput::File { .. } => false,
            },
        }
    }

    fn import_impl(&self, ctx: &mut ImportContext) -> anyhow::Result<()> {
        let params: ModelImportParams = parse_params(ctx.parameters(), ctx.location());
        let post = &params.post_process;

        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };

        let (models, materials_result) = match ctx.input() {
            ImportInput::File { path } => tobj::load_obj(path, &options)
                .with_context(|| format!("Failed to parse OBJ file '{}'", path.display()))?,
            ImportInput::Memory { bytes, .. } => {
                let text =
                    std::str::from_utf8(bytes).context("OBJ file is not valid UTF-8")?;
                tobj::load_obj_buf(
                    &mut std::io::Cursor::new(text),
                    &options,
                    // Memory inputs have no directory to resolve an .mtl
                    // library against.
                    |_| Ok((Vec::new(), AHashMap::new())),
                )
                .context("Failed to parse OBJ file")?
            }
        };

        if models.is_empty() {
            anyhow::bail!("No models found in OBJ file");
        }

        let materials = if post.import_materials {
            materials_result.unwrap_or_default()
        } else {
            Vec::new()
        };

        let mut meshes = Vec::with_capacity(models.len());
        let mut texture_names: Vec<String> = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            if post.optimize_meshes && (mesh.positions.is_empty() || mesh.indices.is_empty()) {
                continue;
            }

            let scale = post.global_scale;
            let positions: Vec<[f32; 3]> = mesh
                .positions
                .chunks(3)
                .map(|v| [v[0] * scale, v[1] * scale, v[2] * scale])
                .collect();

            let mut normals: Vec<[f32; 3]> = mesh
                .normals
                .chunks(3)
                .map(|n| [n[0], n[1], n[2]])
                .collect();
            if normals.is_empty() && post.generate_smooth_normals {
                normals = compute_smooth_normals(&positions, &mesh.indices);
            }

            let tex_coords: Vec<[f32; 2]> =
                mesh.texcoords.chunks(2).map(|t| [t[0], t[1]]).collect();

            let diffuse_texture = mesh
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|material| material.diffuse_texture.clone())
                .filter(|name| !name.is_empty());

            if let Some(name) = &diffuse_texture {
                if !texture_names.contains(name) {
                    texture_names.push(name.clone());
                }
            }

            let mut mesh_data = MeshData {
                name: model.name.clone(),
                positions,
                normals,
                tex_coords,
                indices: mesh.indices.clone(),
                diffuse_texture,
            };
            if !post.join_identical_vertices {
                unroll_indices(&mut mesh_data);
            }
            meshes.push(mesh_data);
        }

        if post.import_textures {
            match ctx.input().base_dir().map(Path::to_path_buf) {
                Some(base_dir) => {
                    for (index, name) in texture_names.iter().enumerate() {
                        let texture_params = texture_params_for(&params, index);
                        let value = serde_json::to_value(&texture_params)
                            .context("Failed to encode texture parameters")?;
                        ctx.add_dependency_with::<TextureData>(
                            ImportInput::file(base_dir.join(name)),
                            None,
                            value,
                        );
                    }
                }
                None if !texture_names.is_empty() => {
                    log::debug!(
                        "'{}' references {} texture(s) but a memory input has no base directory; skipping dependencies",
                        ctx.location(),
                        texture_names.len()
                    );
                }
                None => {}
            }
        }

        ctx.set_main_asset(Asset::with_data(
            ctx.location().clone(),
            ModelData {
                meshes,
                texture_names,
            },
        ));
        Ok(())
    }
}

/// Builds the parameter set for the `index`-th texture dependency from the
/// per-texture overrides and the model-wide switches.
fn texture_params_for(params: &ModelImportParams, index: usize) -> TextureImportParams {
    let mut texture_params = params
        .texture_parameters
        .get(index)
        .cloned()
        .unwrap_or_default();

    if params.post_process.convert_to_uncompressed {
        texture_params.format = TextureFormatParam::Preserve;
    }
    if texture_params.max_size == 0 {
        texture_params.max_size = match params.post_process.texture_quality {
            TextureQuality::Low => 512,
            TextureQuality::Medium => 2048,
            TextureQuality::High => 0,
        };
    }
    texture_params
}

/// Area-weighted smooth vertex normals from the triangle list.
fn compute_smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let (a, b, c) = (positions[i0], positions[i1], positions[i2]);
        let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        // Cross product; the magnitude carries the triangle area, so larger
        // faces weigh more in the accumulated normal.
        let face = [
            ab[1] * ac[2] - ab[2] * ac[1],
            ab[2] * ac[0] - ab[0] * ac[2],
            ab[0] * ac[1] - ab[1] * ac[0],
        ];
        for index in [i0, i1, i2] {
            normals[index][0] += face[0];
            normals[index][1] += face[1];
            normals[index][2] += face[2];
        }
    }

    for normal in &mut normals {
        let length =
            (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if length > f32::EPSILON {
            normal[0] /= length;
            normal[1] /= length;
            normal[2] /= length;
        }
    }
    normals
}

/// Expands indexed geometry into one vertex per triangle corner.
fn unroll_indices(mesh: &mut MeshData) {
    let mut positions = Vec::with_capacity(mesh.indices.len());
    let mut normals = Vec::with_capacity(mesh.indices.len());
    let mut tex_coords = Vec::with_capacity(mesh.indices.len());

    for &index in &mesh.indices {
        let index = index as usize;
        positions.push(mesh.positions[index]);
        if !mesh.normals.is_empty() {
            normals.push(mesh.normals[index]);
        }
        if !mesh.tex_coords.is_empty() {
            tex_coords.push(mesh.tex_coords[index]);
        }
    }

    mesh.indices = (0..positions.len() as u32).collect();
    mesh.positions = positions;
    mesh.normals = normals;
    mesh.tex_coords = tex_coords;
}

/// A cheap sniff for OBJ text: the first few meaningful lines start with a
/// known OBJ keyword.
fn looks_like_obj(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    text.lines()
        .map(str::trim_start)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(4)
        .any(|line| {
            ["v ", "vn ", "vt ", "f ", "o ", "g ", "mtllib ", "usemtl "]
                .iter()
                .any(|keyword| line.starts_with(keyword))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreal_core::asset::AssetLocation;

    const TRIANGLE_OBJ: &str = "\
# a single triangle
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    #[test]
    fn can_read_by_extension_and_sniff() {
        let importer = ObjModelImporter;
        assert!(importer.can_read(&ImportInput::file("meshes/car.obj")));
        assert!(importer.can_read(&ImportInput::memory(TRIANGLE_OBJ.as_bytes().to_vec())));
        assert!(!importer.can_read(&ImportInput::file("textures/wall.png")));
        assert!(!importer.can_read(&ImportInput::memory(vec![0x89, 0x50, 0x4E, 0x47])));
    }

    #[test]
    fn imports_triangle_from_memory() {
        let importer = ObjModelImporter;
        let mut ctx = ImportContext::new(
            AssetLocation::parse("tri").unwrap(),
            ImportInput::memory(TRIANGLE_OBJ.as_bytes().to_vec()),
        );
        importer.import(&mut ctx);
        assert!(ctx.has_main_asset());
    }

    #[test]
    fn smooth_normals_point_up_for_a_flat_triangle() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]];
        let indices = vec![0, 1, 2];
        let normals = compute_smooth_normals(&positions, &indices);
        for normal in normals {
            assert!((normal[1] - 1.0).abs() < 1e-6, "expected +Y, got {normal:?}");
        }
    }

    #[test]
    fn unroll_produces_one_vertex_per_corner() {
        let mut mesh = MeshData {
            name: "tri".to_string(),
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![],
            tex_coords: vec![],
            indices: vec![0, 1, 2, 0, 2, 1],
            diffuse_texture: None,
        };
        unroll_indices(&mut mesh);
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    }
}
