//! Binding Contract Test: Registration & Resolution
//!
//! The module facade installs the full codec matrix; the resolution
//! layer maps a binding site's declared bound to the right instance,
//! falling back to the version-agnostic codec when the bound is absent
//! or unrecognized.
//!
//! Constraints verified:
//! - all nine (entity, bound) pairs are installed
//! - installation into independent registries is idempotent
//! - unknown bounds resolve to the version-agnostic codec
//! - codecs are shareable across threads without coordination

mod common;

use common::*;
use ipbind_core::codec::{EntityKind, HandledKind, IpValue};
use ipbind_core::module::IpModule;
use ipbind_core::registry::CodecRegistry;
use ipbind_core::resolve::{self, VersionBound};
use serde_json::json;
use std::sync::Arc;

const ALL_ENTITIES: [EntityKind; 3] = [EntityKind::Address, EntityKind::Subnet, EntityKind::Range];
const INSTALLED_BOUNDS: [VersionBound; 3] = [
    VersionBound::V4Only,
    VersionBound::V6Only,
    VersionBound::AnyVersion,
];

#[test]
fn module_installs_full_matrix() {
    let registry = installed_registry();
    assert_eq!(registry.len(), 9);

    for entity in ALL_ENTITIES {
        for bound in INSTALLED_BOUNDS {
            let kind = HandledKind::new(entity, bound);
            let codec = registry.get(kind).expect("codec installed");
            assert_eq!(codec.handled_kind(), kind);
        }
    }
}

#[test]
fn independent_registries_behave_identically() {
    let module = IpModule::new();
    let mut first = CodecRegistry::new();
    let mut second = CodecRegistry::new();
    module.install(&mut first);
    module.install(&mut second);

    let node = json!({"from": "10.0.0.1", "to": "10.0.0.100"});
    for registry in [&first, &second] {
        let decoded = registry
            .decode(EntityKind::Range, VersionBound::V4Only, &node)
            .unwrap();
        assert_eq!(
            decoded,
            IpValue::Range(ipbind_core::range::IpRange::V4(v4_range(
                "10.0.0.1",
                "10.0.0.100"
            )))
        );
    }
}

#[test]
fn unknown_bound_resolves_to_any_version() {
    // Static resolution over the default instances
    for entity_codec in [
        resolve::address_codec,
        resolve::subnet_codec,
        resolve::range_codec,
    ] {
        let codec = entity_codec(VersionBound::Unknown);
        assert_eq!(codec.handled_kind().bound, VersionBound::AnyVersion);
    }

    // Registry resolution mirrors the fallback
    let registry = installed_registry();
    let value = registry
        .decode(EntityKind::Address, VersionBound::Unknown, &json!("::1"))
        .unwrap();
    assert_eq!(value, IpValue::Address(ip("::1")));
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Arc::new(installed_registry());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let text = format!("10.{worker}.{i}.0/24");
                    let value = registry
                        .decode(EntityKind::Subnet, VersionBound::V4Only, &json!(text))
                        .unwrap();
                    let encoded = registry
                        .encode(EntityKind::Subnet, VersionBound::V4Only, &value)
                        .unwrap();
                    assert_eq!(encoded, json!(text));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
