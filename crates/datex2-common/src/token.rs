//! Interned token machinery backing the DATEX II string enumerations.
//!
//! DATEX II enumerations are open-world: the schema publishes a catalog of
//! well-known literals (e.g. `"monday"`, `"pricePerKWh"`) but profiles and
//! vendors may introduce extension values at any time. Each enumeration is
//! therefore modelled as a lightweight `Copy` token wrapping an interned
//! canonical string, backed by a per-type [`TokenRegistry`]:
//!
//! - lookup is case-insensitive and ignores surrounding whitespace;
//! - the canonical spelling is the one first registered (the schema literal
//!   for seeded constants, the input text for extension values);
//! - unknown non-empty input registers a new token instead of failing;
//! - registered tokens live for the remainder of the process.
//!
//! Equality, ordering and hashing on token types are ordinal over the
//! canonical spelling. Case-insensitivity is confined to registry lookup,
//! which guarantees a single canonical spelling per logical value.
//!
//! Concrete token types are declared with the [`token_type!`] macro; see
//! [`crate::vocabulary`] for the catalog declarations.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use indexmap::IndexMap;

// ---------------------------------------------------------------------------
// TokenRegistry
// ---------------------------------------------------------------------------

/// Process-wide intern pool for one token type.
///
/// Maps the case-folded lookup key of every registered token to its
/// canonical spelling. Seeded with the type's named constants at
/// construction, grown by [`resolve`](Self::resolve) when parsing meets an
/// unknown value. Insertion order is the enumeration order reported by
/// [`values`](Self::values).
#[derive(Debug)]
pub struct TokenRegistry {
    schema_name: &'static str,
    entries: RwLock<IndexMap<String, &'static str>>,
}

impl TokenRegistry {
    /// Create a registry seeded with the given canonical spellings.
    pub fn new(schema_name: &'static str, seeds: &[&'static str]) -> Self {
        let mut entries = IndexMap::with_capacity(seeds.len());
        for seed in seeds {
            entries.insert(seed.to_ascii_lowercase(), *seed);
        }
        Self {
            schema_name,
            entries: RwLock::new(entries),
        }
    }

    /// DATEX II schema name of the enumeration this registry backs.
    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    /// Look up `text`, registering it as a new token when unknown.
    ///
    /// Returns `None` only for empty or whitespace-only input. For any
    /// other input the canonical spelling is returned: the already
    /// registered one on a case-insensitive hit, otherwise the trimmed
    /// input itself, interned for the lifetime of the process.
    pub fn resolve(&self, text: &str) -> Option<&'static str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let key = trimmed.to_ascii_lowercase();
        if let Some(canonical) = self.read_entries().get(key.as_str()) {
            return Some(canonical);
        }
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Re-check under the write lock: another thread may have registered
        // the same token between the two lock acquisitions.
        if let Some(canonical) = entries.get(key.as_str()) {
            return Some(canonical);
        }
        let canonical: &'static str = Box::leak(trimmed.to_owned().into_boxed_str());
        entries.insert(key, canonical);
        tracing::debug!(
            enumeration = self.schema_name,
            token = canonical,
            "registered extension token"
        );
        Some(canonical)
    }

    /// Snapshot of every registered canonical spelling, in registration
    /// order (seeds first). Registrations made before the call are always
    /// included; the returned vector does not track later ones.
    pub fn values(&self) -> Vec<&'static str> {
        self.read_entries().values().copied().collect()
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// `true` if no token has been registered.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, IndexMap<String, &'static str>> {
        // The registry is insert-only, so data behind a poisoned lock is
        // still valid; recover instead of propagating the panic.
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// token_type!
// ---------------------------------------------------------------------------

/// Declare one DATEX II string-enumeration type.
///
/// Expands to a `Copy` tuple struct wrapping the interned canonical
/// spelling, with named constants for the schema's well-known literals, a
/// lazily initialised [`TokenRegistry`] seeded with those literals, and the
/// full parsing surface: `parse` (strict), `try_parse` (lenient),
/// `values`, `as_str`, `schema_name`, plus `Display`, `Default` (the empty
/// token), `FromStr` and string-form serde implementations.
///
/// ```
/// datex2_common::token_type! {
///     /// Quality of a mobile connection.
///     pub struct SignalQuality, "SignalQualityEnum" {
///         /// No usable signal.
///         NONE => "none",
///         /// Full strength.
///         EXCELLENT => "excellent",
///     }
/// }
///
/// assert_eq!(SignalQuality::parse("Excellent").unwrap(), SignalQuality::EXCELLENT);
/// assert_eq!(SignalQuality::EXCELLENT.as_str(), "excellent");
/// ```
#[macro_export]
macro_rules! token_type {
    (
        $(#[$type_doc:meta])*
        pub struct $name:ident, $schema:literal {
            $(
                $(#[$const_doc:meta])*
                $const_name:ident => $literal:literal
            ),* $(,)?
        }
    ) => {
        $(#[$type_doc])*
        ///
        /// Open-world DATEX II enumeration: the named constants are the
        /// schema's well-known literals, and parsing registers any further
        /// non-empty value as an extension token. Equality and ordering are
        /// ordinal over the canonical spelling.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(&'static str);

        impl $name {
            $(
                $(#[$const_doc])*
                pub const $const_name: $name = $name($literal);
            )*

            fn registry() -> &'static $crate::token::TokenRegistry {
                static REGISTRY: std::sync::LazyLock<$crate::token::TokenRegistry> =
                    std::sync::LazyLock::new(|| {
                        $crate::token::TokenRegistry::new($schema, &[$($literal),*])
                    });
                &REGISTRY
            }

            /// DATEX II schema name of this enumeration type.
            pub fn schema_name() -> &'static str {
                $schema
            }

            /// Parse `text` into a token of this type.
            ///
            /// Surrounding whitespace is ignored and the lookup is
            /// case-insensitive; an unknown non-empty value is registered
            /// and returned as a new extension token.
            ///
            /// # Errors
            ///
            /// Returns an `EmptyToken` error if `text` is empty or
            /// whitespace-only.
            pub fn parse(text: &str) -> $crate::error::Result<Self> {
                match Self::registry().resolve(text) {
                    Some(canonical) => Ok(Self(canonical)),
                    None => Err($crate::error::DatexError::EmptyToken {
                        type_name: $schema,
                    }),
                }
            }

            /// Lenient variant of [`Self::parse`]: returns `None` instead
            /// of failing on empty or whitespace-only input.
            pub fn try_parse(text: &str) -> Option<Self> {
                Self::registry().resolve(text).map(Self)
            }

            /// Canonical spelling of this token. Empty for the default
            /// (uninitialised) token.
            pub fn as_str(&self) -> &str {
                self.0
            }

            /// Every token currently registered for this type, in
            /// registration order (named constants first). The vector is a
            /// snapshot taken at call time.
            pub fn values() -> Vec<Self> {
                Self::registry().values().into_iter().map(Self).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self("")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DatexError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(token: $name) -> String {
                token.0.to_string()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let text = String::deserialize(deserializer)?;
                Self::parse(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
