//! # Codec Profiles
//!
//! A codec profile is a named serialization convention: a field-naming rule
//! plus an unknown-field policy. Messages produced internally and messages
//! consumed by the external party use different conventions, so the
//! pipelines take the profile as an explicit parameter; nothing is resolved
//! through ambient state.
//!
//! Rust structs serialize snake_case natively. A profile's naming rule is
//! applied by recursively renaming the keys of the serialized JSON tree on
//! the way out, and inverted on the way in, so one set of derives serves
//! every convention.
//!
//! Profiles are cheap value objects; the [`CodecRegistry`] is constructed
//! once at wiring time and shared read-only across all pipeline invocations.

use exchange_types::ExchangeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Field-naming rule applied to wire JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNaming {
    /// Keys on the wire are snake_case (the native Rust convention).
    SnakeCase,
    /// Keys on the wire are camelCase.
    CamelCase,
}

/// Policy for wire fields the target schema does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFields {
    /// Unknown fields are ignored.
    Tolerate,
    /// Unknown top-level fields reject the payload.
    Deny,
}

/// A named serialization convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecProfile {
    /// Stable name used for registry lookup and diagnostics.
    pub name: &'static str,
    /// Field-naming rule.
    pub naming: FieldNaming,
    /// Unknown-field policy.
    pub unknown_fields: UnknownFields,
    /// Field names whose values are open data maps rather than declared
    /// schema fields. The naming rule covers schema fields only, so these
    /// subtrees cross the wire with their keys untouched.
    pub opaque_fields: &'static [&'static str],
}

/// Profile for messages produced and consumed internally: snake_case,
/// strict about unknown fields.
pub const INTERNAL_PROFILE: CodecProfile = CodecProfile {
    name: "internal",
    naming: FieldNaming::SnakeCase,
    unknown_fields: UnknownFields::Deny,
    opaque_fields: &["details"],
};

/// Profile for messages exchanged with the external party: camelCase,
/// tolerant of unknown fields. Used for inbound/fallback parsing.
pub const EXTERNAL_PROFILE: CodecProfile = CodecProfile {
    name: "external",
    naming: FieldNaming::CamelCase,
    unknown_fields: UnknownFields::Tolerate,
    opaque_fields: &["details"],
};

impl CodecProfile {
    /// Serialize a value to wire bytes under this profile.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Serialization`] when the value cannot be
    /// represented as JSON.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ExchangeError> {
        let native = serde_json::to_value(value)
            .map_err(|e| ExchangeError::Serialization(e.to_string()))?;
        let wire = match self.naming {
            FieldNaming::SnakeCase => native,
            FieldNaming::CamelCase => rename_keys(native, &snake_to_camel, self.opaque_fields),
        };
        serde_json::to_vec(&wire).map_err(|e| ExchangeError::Serialization(e.to_string()))
    }

    /// Deserialize wire bytes into a value under this profile.
    ///
    /// The `Serialize` bound exists for the strict unknown-field check: the
    /// parsed value is echoed back to JSON and the input's top-level keys
    /// are compared against the keys the target actually consumed.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Serialization`] when the bytes are not JSON,
    /// do not match the target schema, or (under [`UnknownFields::Deny`])
    /// carry fields the target does not know.
    pub fn deserialize<T>(&self, bytes: &[u8]) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned + Serialize,
    {
        let wire: Value = serde_json::from_slice(bytes)
            .map_err(|e| ExchangeError::Serialization(e.to_string()))?;
        let native = match self.naming {
            FieldNaming::SnakeCase => wire,
            FieldNaming::CamelCase => rename_keys(wire, &camel_to_snake, self.opaque_fields),
        };

        match self.unknown_fields {
            UnknownFields::Tolerate => serde_json::from_value(native)
                .map_err(|e| ExchangeError::Serialization(e.to_string())),
            UnknownFields::Deny => {
                let parsed: T = serde_json::from_value(native.clone())
                    .map_err(|e| ExchangeError::Serialization(e.to_string()))?;
                if let (Value::Object(input), Ok(Value::Object(echo))) =
                    (&native, serde_json::to_value(&parsed))
                {
                    for key in input.keys() {
                        if !echo.contains_key(key) {
                            return Err(ExchangeError::Serialization(format!(
                                "unknown field `{key}` rejected by strict profile `{}`",
                                self.name
                            )));
                        }
                    }
                }
                Ok(parsed)
            }
        }
    }
}

/// Explicit name-to-profile registry, constructed once and shared read-only.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    profiles: HashMap<&'static str, CodecProfile>,
}

impl CodecRegistry {
    /// Registry with the built-in `internal` and `external` profiles.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self {
            profiles: HashMap::new(),
        };
        registry.register(INTERNAL_PROFILE);
        registry.register(EXTERNAL_PROFILE);
        registry
    }

    /// Register a profile under its own name, replacing any previous entry.
    pub fn register(&mut self, profile: CodecProfile) {
        self.profiles.insert(profile.name, profile);
    }

    /// Look up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::UnknownProfile`] when no profile is
    /// registered under `name`.
    pub fn get(&self, name: &str) -> Result<CodecProfile, ExchangeError> {
        self.profiles
            .get(name)
            .copied()
            .ok_or_else(|| ExchangeError::UnknownProfile(name.to_string()))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Recursively rename object keys in a JSON tree, leaving the subtrees of
/// opaque fields untouched.
fn rename_keys(value: Value, rename: &dyn Fn(&str) -> String, opaque: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    if opaque.contains(&key.as_str()) {
                        (key, value)
                    } else {
                        (rename(&key), rename_keys(value, rename, opaque))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rename_keys(item, rename, opaque))
                .collect(),
        ),
        other => other,
    }
}

/// Inverse of [`camel_to_snake`] for snake_case keys. An underscore whose
/// following character has no uppercase form (a digit, say) is kept in
/// place: camelCase cannot mark that word boundary, so dropping the
/// underscore would not survive the trip back.
fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut boundary = false;
    for c in key.chars() {
        if c == '_' {
            boundary = true;
        } else if boundary {
            boundary = false;
            if c.is_ascii_lowercase() {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push('_');
                out.push(c);
            }
        } else {
            out.push(c);
        }
    }
    if boundary {
        out.push('_');
    }
    out
}

fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
