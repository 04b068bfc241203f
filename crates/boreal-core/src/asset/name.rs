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

//! Validated string wrappers for asset and asset-pack names.

use crate::asset::AssetError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Maximum length, in bytes, of a validated name.
const MAX_NAME_LENGTH: usize = 255;

/// Device-like tokens that are rejected as names (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// A validation policy for a [`ValidatedName`].
///
/// `validate` returns `Ok(())` for an acceptable string, or the reason for
/// rejection. The reason strings are part of the public contract: they are
/// carried verbatim inside [`AssetError::InvalidName`].
pub trait NameValidator {
    /// Checks `value` against the policy.
    fn validate(value: &str) -> Result<(), String>;
}

/// Filename-style validation shared by asset and pack names.
///
/// Rules: non-empty, at most 255 bytes, characters drawn from
/// `[0-9a-zA-Z._-]`, and not a reserved device-like token such as `CON` or
/// `LPT1` (compared case-insensitively).
fn validate_filename(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("cannot be empty".to_string());
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(format!("cannot exceed {MAX_NAME_LENGTH} characters"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err("allowed characters are 0-9, a-z, A-Z, '.', '_', and '-'".to_string());
    }
    if RESERVED_NAMES.contains(&value.to_ascii_uppercase().as_str()) {
        return Err("reserved keyword".to_string());
    }
    Ok(())
}

/// The validation policy for asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetNameValidator;

impl NameValidator for AssetNameValidator {
    fn validate(value: &str) -> Result<(), String> {
        validate_filename(value)
    }
}

/// The validation policy for asset pack names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackNameValidator;

impl NameValidator for PackNameValidator {
    fn validate(value: &str) -> Result<(), String> {
        validate_filename(value)
    }
}

/// A string that has passed a [`NameValidator`] policy.
///
/// The wrapper guarantees its contents are valid for the policy `V` for the
/// whole lifetime of the value: construction and deserialization validate,
/// and the only mutation path, [`rename`](ValidatedName::rename), validates
/// before committing.
///
/// Construction failure is a typed error ([`AssetError::InvalidName`]);
/// `rename` instead returns the validator's message and leaves the value
/// untouched. The asymmetry is deliberate: a failed mutation is recoverable,
/// a value that never existed is not.
pub struct ValidatedName<V: NameValidator> {
    value: String,
    _validator: PhantomData<fn() -> V>,
}

/// The name type for assets.
pub type AssetName = ValidatedName<AssetNameValidator>;

/// The name type for asset packs.
pub type AssetPackName = ValidatedName<PackNameValidator>;

impl<V: NameValidator> ValidatedName<V> {
    /// Validates `value` and wraps it.
    pub fn new(value: impl Into<String>) -> Result<Self, AssetError> {
        let value = value.into();
        match V::validate(&value) {
            Ok(()) => Ok(Self {
                value,
                _validator: PhantomData,
            }),
            Err(reason) => Err(AssetError::InvalidName {
                name: value,
                reason,
            }),
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Replaces the name in place if `value` passes validation.
    ///
    /// On failure the validator's message is returned and the current name
    /// is left unchanged.
    pub fn rename(&mut self, value: impl Into<String>) -> Result<(), String> {
        let value = value.into();
        V::validate(&value)?;
        self.value = value;
        Ok(())
    }
}

impl<V: NameValidator> Clone for ValidatedName<V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _validator: PhantomData,
        }
    }
}

impl<V: NameValidator> fmt::Debug for ValidatedName<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidatedName").field(&self.value).finish()
    }
}

impl<V: NameValidator> fmt::Display for ValidatedName<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<V: NameValidator> PartialEq for ValidatedName<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: NameValidator> Eq for ValidatedName<V> {}

impl<V: NameValidator> Hash for ValidatedName<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<V: NameValidator> PartialEq<str> for ValidatedName<V> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<V: NameValidator> AsRef<str> for ValidatedName<V> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

// Serialize as the bare string; deserialize through the validator so a
// persisted scene cannot smuggle an invalid name back in.
impl<V: NameValidator> Serialize for ValidatedName<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, V: NameValidator> Deserialize<'de> for ValidatedName<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        for name in ["model", "car.obj", "tex_01-final", "a", "COM10", "nul.bak"] {
            assert!(AssetName::new(name).is_ok(), "'{name}' should be accepted");
        }
    }

    #[test]
    fn rejects_empty_name() {
        let error = AssetName::new("").unwrap_err();
        assert_eq!(
            error,
            AssetError::InvalidName {
                name: String::new(),
                reason: "cannot be empty".to_string(),
            }
        );
    }

    #[test]
    fn rejects_invalid_characters() {
        let error = AssetName::new("a/b").unwrap_err();
        match error {
            AssetError::InvalidName { name, reason } => {
                assert_eq!(name, "a/b");
                assert_eq!(reason, "allowed characters are 0-9, a-z, A-Z, '.', '_', and '-'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_reserved_keywords() {
        for name in ["CON", "con", "Nul", "COM1", "lpt9"] {
            let error = AssetName::new(name).unwrap_err();
            match error {
                AssetError::InvalidName { reason, .. } => {
                    assert_eq!(reason, "reserved keyword", "'{name}' should be reserved");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let long = "x".repeat(256);
        let error = AssetName::new(long).unwrap_err();
        match error {
            AssetError::InvalidName { reason, .. } => {
                assert_eq!(reason, "cannot exceed 255 characters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(AssetName::new("x".repeat(255)).is_ok());
    }

    #[test]
    fn rename_mutates_only_on_success() {
        let mut name = AssetName::new("original").unwrap();

        assert_eq!(name.rename("renamed"), Ok(()));
        assert_eq!(name.as_str(), "renamed");

        let result = name.rename("bad/name");
        assert_eq!(
            result,
            Err("allowed characters are 0-9, a-z, A-Z, '.', '_', and '-'".to_string())
        );
        assert_eq!(name.as_str(), "renamed", "failed rename must not mutate");
    }

    #[test]
    fn serde_round_trip_validates() {
        let name = AssetName::new("mesh.obj").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"mesh.obj\"");

        let back: AssetName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);

        let bad: Result<AssetName, _> = serde_json::from_str("\"a/b\"");
        assert!(bad.is_err());
    }
}
