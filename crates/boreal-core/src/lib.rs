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

//! Foundational types and contracts for the Boreal engine core.
//!
//! This crate defines the "common language" shared by the two pillars of the
//! engine runtime:
//!
//! - The **ECS pillar**: entity identifiers, component signatures, and the
//!   error taxonomy raised on ECS misuse. The managers themselves live in
//!   `boreal-ecs`.
//! - The **Asset pillar**: stable asset UUIDs, validated names, parsed asset
//!   locations, and asset metadata. The catalog and importer pipeline live in
//!   `boreal-assets`.
//!
//! Nothing in this crate stores data or makes policy decisions; it only
//! provides the identifier conventions and contracts the higher-level crates
//! implement against.

pub mod asset;
pub mod ecs;
