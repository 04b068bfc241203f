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

//! Defines the human-readable `(pack, name, path)` asset location.

use crate::asset::{AssetError, AssetName, AssetPackName};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between the pack name and the asset name.
const PACK_SEPARATOR: &str = "::";

/// Separator between the asset name and the path.
const PATH_SEPARATOR: char = '@';

/// The asset name used by locations that have not been assigned yet.
const UNLOCATED_NAME: &str = "_unlocated";

/// The human-readable location of an asset: `pack::name@path`.
///
/// The wire format is `[pack_name "::"] asset_name ["@" path]`, with both the
/// pack prefix and the path suffix optional. Pack and asset names obey the
/// filename validation rules; the path is arbitrary UTF-8. The pack separator
/// is only recognized before the path marker, so a path may itself contain
/// `::`.
///
/// [`full_location`](AssetLocation::full_location) (and the `Display` impl)
/// is the exact inverse of [`parse`](AssetLocation::parse) on valid inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetLocation {
    pack: Option<AssetPackName>,
    name: AssetName,
    path: Option<String>,
}

impl AssetLocation {
    /// Creates a location consisting of a bare asset name.
    pub fn new(name: AssetName) -> Self {
        Self {
            pack: None,
            name,
            path: None,
        }
    }

    /// Creates a location from its three parts.
    pub fn from_parts(pack: Option<AssetPackName>, name: AssetName, path: Option<String>) -> Self {
        Self { pack, name, path }
    }

    /// Parses a location string of the form `[pack::]name[@path]`.
    ///
    /// Fails with [`AssetError::InvalidAssetLocation`] carrying the original
    /// string and the inner validation reason.
    pub fn parse(location: &str) -> Result<Self, AssetError> {
        let invalid = |reason: String| AssetError::InvalidAssetLocation {
            location: location.to_string(),
            reason,
        };

        // The pack separator only counts before the path marker; a "::"
        // inside the path is path content.
        let path_start = location.find(PATH_SEPARATOR);
        let pack_split = match location.find(PACK_SEPARATOR) {
            Some(at) if path_start.map_or(true, |p| at < p) => Some(at),
            _ => None,
        };

        let (pack, remainder) = match pack_split {
            Some(at) => {
                let pack = AssetPackName::new(&location[..at])
                    .map_err(|error| invalid(error.to_string()))?;
                (Some(pack), &location[at + PACK_SEPARATOR.len()..])
            }
            None => (None, location),
        };

        let (name_part, path) = match remainder.split_once(PATH_SEPARATOR) {
            Some((name_part, path)) => (name_part, Some(path.to_string())),
            None => (remainder, None),
        };

        let name = AssetName::new(name_part).map_err(|error| invalid(error.to_string()))?;

        Ok(Self { pack, name, path })
    }

    /// Returns the sentinel location assigned to assets that have not been
    /// placed in the catalog yet. The import pipeline replaces it with the
    /// real location at registration time.
    pub fn unlocated() -> Self {
        Self {
            pack: None,
            // The sentinel is a valid name by construction.
            name: AssetName::new(UNLOCATED_NAME).expect("sentinel name is valid"),
            path: None,
        }
    }

    /// Returns true if this is the sentinel produced by
    /// [`unlocated`](AssetLocation::unlocated).
    pub fn is_unlocated(&self) -> bool {
        self.pack.is_none() && self.path.is_none() && self.name == *UNLOCATED_NAME
    }

    /// Returns the pack name, if any.
    pub fn pack_name(&self) -> Option<&AssetPackName> {
        self.pack.as_ref()
    }

    /// Returns the asset name.
    pub fn asset_name(&self) -> &AssetName {
        &self.name
    }

    /// Returns the path, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Renders the location back into its `[pack::]name[@path]` string form.
    pub fn full_location(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pack) = &self.pack {
            write!(f, "{pack}{PACK_SEPARATOR}")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(path) = &self.path {
            write!(f, "{PATH_SEPARATOR}{path}")?;
        }
        Ok(())
    }
}

impl FromStr for AssetLocation {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AssetLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.full_location())
    }
}

impl<'de> Deserialize<'de> for AssetLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_triple() {
        let location = AssetLocation::parse("pkg::model@meshes/car.obj").unwrap();
        assert_eq!(location.pack_name().unwrap().as_str(), "pkg");
        assert_eq!(location.asset_name().as_str(), "model");
        assert_eq!(location.path(), Some("meshes/car.obj"));
        assert_eq!(location.full_location(), "pkg::model@meshes/car.obj");
    }

    #[test]
    fn parses_bare_name() {
        let location = AssetLocation::parse("model").unwrap();
        assert!(location.pack_name().is_none());
        assert_eq!(location.asset_name().as_str(), "model");
        assert!(location.path().is_none());
        assert_eq!(location.full_location(), "model");
    }

    #[test]
    fn parses_name_with_path_only() {
        let location = AssetLocation::parse("tex@textures/wall.png").unwrap();
        assert!(location.pack_name().is_none());
        assert_eq!(location.asset_name().as_str(), "tex");
        assert_eq!(location.path(), Some("textures/wall.png"));
    }

    #[test]
    fn pack_separator_inside_path_is_path_content() {
        let location = AssetLocation::parse("mesh@odd::dir/file").unwrap();
        assert!(location.pack_name().is_none());
        assert_eq!(location.asset_name().as_str(), "mesh");
        assert_eq!(location.path(), Some("odd::dir/file"));
        assert_eq!(location.full_location(), "mesh@odd::dir/file");
    }

    #[test]
    fn round_trip_is_identity() {
        for input in [
            "pkg::model@meshes/car.obj",
            "model",
            "pkg::model",
            "model@a/b/c",
            "p.ack::na-me_01@path with spaces/αβ.bin",
        ] {
            let parsed = AssetLocation::parse(input).unwrap();
            let reparsed = AssetLocation::parse(&parsed.full_location()).unwrap();
            assert_eq!(parsed, reparsed, "round trip failed for '{input}'");
            assert_eq!(parsed.full_location(), input);
        }
    }

    #[test]
    fn invalid_components_carry_the_original_string() {
        let error = AssetLocation::parse("bad pack::model").unwrap_err();
        match error {
            AssetError::InvalidAssetLocation { location, reason } => {
                assert_eq!(location, "bad pack::model");
                assert!(reason.contains("allowed characters"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(AssetLocation::parse("").is_err());
        assert!(AssetLocation::parse("pkg::").is_err());
        assert!(AssetLocation::parse("::name").is_err());
    }

    #[test]
    fn unlocated_sentinel_is_recognized() {
        let sentinel = AssetLocation::unlocated();
        assert!(sentinel.is_unlocated());
        assert!(!AssetLocation::parse("model").unwrap().is_unlocated());

        // The sentinel still round-trips like any other location.
        let reparsed = AssetLocation::parse(&sentinel.full_location()).unwrap();
        assert!(reparsed.is_unlocated());
    }
}
