//! Minimal embedding example for ipbind-core
//!
//! This example demonstrates both binding paths: the dynamic registry
//! (install the module, decode by entity kind and declared bound) and
//! the static serde derive path (fields typed as range values).

use ipbind_core::codec::range::RangeShape;
use ipbind_core::codec::{EntityKind, IpValue};
use ipbind_core::range::{IpRange, Ipv4Range};
use ipbind_core::registry::CodecRegistry;
use ipbind_core::resolve::VersionBound;
use ipbind_core::{IpModule, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::IpAddr;

/// A config fragment bound statically through serde derive
#[derive(Debug, Serialize, Deserialize)]
struct DhcpPool {
    /// Addresses handed out to clients; IPv4 by declaration
    lease_range: Ipv4Range,

    /// Hosts excluded from leasing, any version
    excluded: Vec<IpRange>,
}

fn dynamic_path() -> Result<()> {
    let mut registry = CodecRegistry::new();
    IpModule::new().install(&mut registry);

    // A field declared "range over IPv4" rejects IPv6 input outright
    let err = registry
        .decode(
            EntityKind::Range,
            VersionBound::V4Only,
            &json!({"from": "::1", "to": "::9"}),
        )
        .unwrap_err();
    println!("IPv4-bound decode of IPv6 input: {err}");

    // An unbound field infers the version from the input syntax
    let value = registry.decode(
        EntityKind::Range,
        VersionBound::AnyVersion,
        &json!("2001:db8::/32"),
    )?;
    println!("decoded version-agnostic range: {value}");

    // Encoding picks CIDR text whenever the range is a subnet block
    let aligned = IpValue::Range(IpRange::single(IpAddr::from([192, 0, 2, 1])));
    println!(
        "single-point range encodes as {}",
        registry.encode(EntityKind::Range, VersionBound::AnyVersion, &aligned)?
    );

    Ok(())
}

fn configured_module_path() -> Result<()> {
    fn uppercase(addr: &std::net::Ipv6Addr) -> String {
        addr.to_string().to_uppercase()
    }

    // A module configured at registration time: custom IPv6 text form,
    // object-only range encoding
    let mut registry = CodecRegistry::new();
    IpModule::new()
        .with_ipv6_formatter(uppercase)
        .with_range_shape(RangeShape::AlwaysObject)
        .install(&mut registry);

    let value = registry.decode(
        EntityKind::Range,
        VersionBound::V6Only,
        &json!("fd00:abcd::/32"),
    )?;
    println!(
        "configured encoding: {}",
        registry.encode(EntityKind::Range, VersionBound::V6Only, &value)?
    );

    Ok(())
}

fn derive_path() -> serde_json::Result<()> {
    let pool: DhcpPool = serde_json::from_value(json!({
        "lease_range": {"from": "10.0.0.10", "to": "10.0.0.200"},
        "excluded": ["10.0.0.128/25", {"from": "10.0.0.10", "to": "10.0.0.12"}],
    }))?;
    println!("decoded pool: {pool:?}");
    println!("re-encoded pool: {}", serde_json::to_string_pretty(&pool)?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    if let Err(err) = dynamic_path() {
        eprintln!("dynamic path failed: {err}");
    }
    if let Err(err) = configured_module_path() {
        eprintln!("configured module path failed: {err}");
    }
    if let Err(err) = derive_path() {
        eprintln!("derive path failed: {err}");
    }
}
