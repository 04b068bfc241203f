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

/// One mesh of an imported model: indexed triangle geometry plus the name
/// of its diffuse texture, if the source material declared one.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// The mesh name from the source file (may be empty).
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals; empty when the source has none and smoothing was
    /// disabled.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates; empty when the source has none.
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle indices into the vertex arrays.
    pub indices: Vec<u32>,
    /// File name of the diffuse texture referenced by the mesh's material.
    pub diffuse_texture: Option<String>,
}

impl MeshData {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// An imported model: a set of meshes and the texture files they reference.
///
/// The texture names record what the source materials pointed at; when the
/// importer ran with `importTextures` enabled, each name also produced a
/// texture asset dependency in the catalog.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    /// The model's meshes.
    pub meshes: Vec<MeshData>,
    /// Unique texture file names referenced by the meshes' materials, in
    /// first-reference order.
    pub texture_names: Vec<String>,
}

impl AssetData for ModelData {}

impl ModelData {
    /// Total vertex count across all meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(MeshData::vertex_count).sum()
    }

    /// Total triangle count across all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(MeshData::triangle_count).sum()
    }
}
