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

//! Defines the error types raised when constructing asset identifiers.

use std::fmt;

/// An error raised when an asset name or location fails validation.
///
/// Both variants are programmer errors: they indicate a malformed string was
/// handed to a constructor, and they carry the offending input together with
/// the validator's reason so the caller can surface an exact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// A string failed the name validation rules.
    InvalidName {
        /// The offending input string.
        name: String,
        /// The validator's reason for rejecting it.
        reason: String,
    },
    /// A location string could not be parsed into a `(pack, name, path)` triple.
    InvalidAssetLocation {
        /// The full, original location string.
        location: String,
        /// The inner reason (usually a name validation failure).
        reason: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::InvalidName { name, reason } => {
                write!(f, "Invalid name '{name}': {reason}")
            }
            AssetError::InvalidAssetLocation { location, reason } => {
                write!(f, "Invalid asset location '{location}': {reason}")
            }
        }
    }
}

impl std::error::Error for AssetError {}
