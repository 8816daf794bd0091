//! Binding Contract Test: Round Trips
//!
//! Every valid value must survive encode followed by decode unchanged,
//! through both the dynamic registry path and the serde derive path.
//!
//! Constraints verified:
//! - `decode(encode(a)) == a` for addresses of either version
//! - `decode(encode(s)) == s` for subnets, with `<addr>/<digits>` text
//! - ranges round trip through whichever wire shape encode picks

mod common;

use common::*;
use ipbind_core::codec::{EntityKind, IpValue};
use ipbind_core::range::{IpRange, Ipv4Range, Ipv6Range};
use ipbind_core::resolve::VersionBound;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[test]
fn address_round_trip_through_registry() {
    let registry = installed_registry();

    for (bound, text) in [
        (VersionBound::V4Only, "127.0.0.1"),
        (VersionBound::V6Only, "::1"),
        (VersionBound::AnyVersion, "192.0.2.17"),
        (VersionBound::AnyVersion, "2001:db8::1"),
    ] {
        let value = registry
            .decode(EntityKind::Address, bound, &json!(text))
            .expect("valid address decodes");
        assert_eq!(value, IpValue::Address(ip(text)));

        let encoded = registry
            .encode(EntityKind::Address, bound, &value)
            .expect("valid address encodes");
        assert_eq!(encoded, json!(text));
    }
}

#[test]
fn subnet_round_trip_through_registry() {
    let registry = installed_registry();

    for (bound, text) in [
        (VersionBound::V4Only, "127.0.0.0/24"),
        (VersionBound::V6Only, "2001:db8::/32"),
        (VersionBound::AnyVersion, "10.0.0.0/8"),
    ] {
        let value = registry
            .decode(EntityKind::Subnet, bound, &json!(text))
            .expect("valid subnet decodes");
        let encoded = registry
            .encode(EntityKind::Subnet, bound, &value)
            .expect("valid subnet encodes");
        assert_eq!(encoded, json!(text));

        // Encoded form is exactly <addr>/<digits>
        let (addr, digits) = text.split_once('/').unwrap();
        assert!(addr.parse::<std::net::IpAddr>().is_ok());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn range_round_trip_through_registry() {
    let registry = installed_registry();

    let ranges = [
        IpValue::Range(IpRange::V4(v4_range("10.0.0.0", "10.0.0.255"))),
        IpValue::Range(IpRange::V4(v4_range("10.0.0.1", "10.0.0.6"))),
        IpValue::Range(IpRange::V6(v6_range("::1", "::9"))),
        IpValue::Range(IpRange::single(ip("::1"))),
    ];

    for value in ranges {
        let encoded = registry
            .encode(EntityKind::Range, VersionBound::AnyVersion, &value)
            .expect("valid range encodes");
        let decoded = registry
            .decode(EntityKind::Range, VersionBound::AnyVersion, &encoded)
            .expect("encoded range decodes");
        assert_eq!(decoded, value, "round trip through {encoded}");
    }
}

#[test]
fn scenario_loopback_address() {
    // Encode 127.0.0.1, decode back to the same address
    let registry = installed_registry();
    let value = IpValue::Address(ip("127.0.0.1"));

    let encoded = registry
        .encode(EntityKind::Address, VersionBound::V4Only, &value)
        .unwrap();
    assert_eq!(encoded, json!("127.0.0.1"));
    assert_eq!(
        registry
            .decode(EntityKind::Address, VersionBound::V4Only, &encoded)
            .unwrap(),
        value
    );
}

#[test]
fn scenario_loopback_subnet() {
    let registry = installed_registry();
    let value = registry
        .decode(EntityKind::Subnet, VersionBound::V4Only, &json!("127.0.0.0/24"))
        .unwrap();

    let net = value.as_subnet().expect("subnet value");
    assert_eq!(net.network().to_string(), "127.0.0.0");
    assert_eq!(net.prefix_len(), 24);
    assert_eq!(
        registry
            .encode(EntityKind::Subnet, VersionBound::V4Only, &value)
            .unwrap(),
        json!("127.0.0.0/24")
    );
}

#[test]
fn scenario_single_point_range_either_shape() {
    let registry = installed_registry();
    let single = IpValue::Range(IpRange::single(ip("::1")));

    // Default shape emits the full-width CIDR form
    let encoded = registry
        .encode(EntityKind::Range, VersionBound::V6Only, &single)
        .unwrap();
    assert_eq!(encoded, json!("::1/128"));

    // Both shapes decode to the same single-point range
    for node in [json!("::1/128"), json!({"from": "::1", "to": "::1"})] {
        let decoded = registry
            .decode(EntityKind::Range, VersionBound::V6Only, &node)
            .unwrap();
        assert_eq!(decoded, single);
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Allocation {
    pool: Ipv4Range,
    reserved: Ipv6Range,
    spillover: IpRange,
}

#[test]
fn range_fields_round_trip_through_derive() {
    let allocation = Allocation {
        pool: v4_range("10.0.0.0", "10.0.0.255"),
        reserved: v6_range("2001:db8::1", "2001:db8::9"),
        spillover: IpRange::single(ip("192.0.2.1")),
    };

    let encoded = serde_json::to_value(&allocation).unwrap();
    assert_eq!(
        encoded,
        json!({
            "pool": "10.0.0.0/24",
            "reserved": {"from": "2001:db8::1", "to": "2001:db8::9"},
            "spillover": "192.0.2.1/32",
        })
    );

    let decoded: Allocation = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, allocation);
}
