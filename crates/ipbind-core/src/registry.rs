//! Codec registry
//!
//! The registry is the host-facing lookup table: one codec instance per
//! (entity kind, version bound) pair. It is populated once, normally by
//! [`IpModule::install`](crate::module::IpModule::install), and is
//! immutable afterwards, so any number of threads may resolve and use
//! codecs concurrently.
//!
//! ## Usage
//!
//! ```rust
//! use ipbind_core::codec::EntityKind;
//! use ipbind_core::module::IpModule;
//! use ipbind_core::registry::CodecRegistry;
//! use ipbind_core::resolve::VersionBound;
//!
//! let mut registry = CodecRegistry::new();
//! IpModule::new().install(&mut registry);
//!
//! let value = registry
//!     .decode(EntityKind::Range, VersionBound::AnyVersion, &serde_json::json!("10.0.0.0/8"))
//!     .unwrap();
//! assert!(value.as_range().is_some());
//! ```

use crate::codec::{EntityKind, HandledKind, IpValue, JsonCodec};
use crate::error::{Error, Result};
use crate::resolve::VersionBound;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table of codec instances keyed by handled kind
#[derive(Default)]
pub struct CodecRegistry {
    codecs: HashMap<HandledKind, Arc<dyn JsonCodec>>,
}

impl CodecRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a codec under its handled kind
    ///
    /// A later registration for the same kind replaces the earlier one.
    pub fn register(&mut self, codec: Arc<dyn JsonCodec>) {
        let kind = codec.handled_kind();
        tracing::debug!(codec = %kind, "registering codec");
        self.codecs.insert(kind, codec);
    }

    /// Look up the codec registered for an exact handled kind
    pub fn get(&self, kind: HandledKind) -> Option<&dyn JsonCodec> {
        self.codecs.get(&kind).map(|codec| codec.as_ref())
    }

    /// Resolve the codec for an entity kind and a declared version bound
    ///
    /// An exact match wins; an unknown or unregistered bound falls back
    /// to the entity's version-agnostic codec. Returns `None` only when
    /// no codec for the entity kind is installed at all.
    pub fn resolve(&self, entity: EntityKind, bound: VersionBound) -> Option<&dyn JsonCodec> {
        self.get(HandledKind::new(entity, bound))
            .or_else(|| self.get(HandledKind::new(entity, VersionBound::AnyVersion)))
    }

    /// Decode a JSON node using the codec resolved for the binding site
    pub fn decode(
        &self,
        entity: EntityKind,
        bound: VersionBound,
        node: &serde_json::Value,
    ) -> Result<IpValue> {
        self.resolve(entity, bound)
            .ok_or_else(|| Error::unregistered(entity))?
            .decode_json(node)
    }

    /// Encode a value using the codec resolved for the binding site
    pub fn encode(
        &self,
        entity: EntityKind,
        bound: VersionBound,
        value: &IpValue,
    ) -> Result<serde_json::Value> {
        self.resolve(entity, bound)
            .ok_or_else(|| Error::unregistered(entity))?
            .encode_json(value)
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether the registry has no codecs
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::address::Ipv4AddressCodec;
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let mut registry = CodecRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(Ipv4AddressCodec::new()));
        assert_eq!(registry.len(), 1);

        let kind = HandledKind::new(EntityKind::Address, VersionBound::V4Only);
        assert!(registry.get(kind).is_some());
    }

    #[test]
    fn test_decode_without_codec_fails() {
        let registry = CodecRegistry::new();
        let err = registry
            .decode(EntityKind::Address, VersionBound::AnyVersion, &json!("::1"))
            .unwrap_err();
        assert!(matches!(err, Error::Unregistered { .. }));
    }

    #[test]
    fn test_resolve_falls_back_to_any_version() {
        let mut registry = CodecRegistry::new();
        crate::module::IpModule::new().install(&mut registry);

        // No exact entry is registered for Unknown; the agnostic codec
        // answers instead
        let codec = registry.resolve(EntityKind::Address, VersionBound::Unknown).unwrap();
        assert_eq!(codec.handled_kind().bound, VersionBound::AnyVersion);
    }
}
