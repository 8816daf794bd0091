//! Common utilities for binding contract tests

#![allow(dead_code)]

use ipbind_core::module::IpModule;
use ipbind_core::range::{IpRange, Ipv4Range, Ipv6Range};
use ipbind_core::registry::CodecRegistry;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Parse an IPv4 address, panicking on bad test input
pub fn v4(text: &str) -> Ipv4Addr {
    text.parse().expect("valid IPv4 test address")
}

/// Parse an IPv6 address, panicking on bad test input
pub fn v6(text: &str) -> Ipv6Addr {
    text.parse().expect("valid IPv6 test address")
}

/// Parse an address of either version, panicking on bad test input
pub fn ip(text: &str) -> IpAddr {
    text.parse().expect("valid test address")
}

/// Build an IPv4 range, panicking on bad test input
pub fn v4_range(from: &str, to: &str) -> Ipv4Range {
    Ipv4Range::new(v4(from), v4(to)).expect("valid IPv4 test range")
}

/// Build an IPv6 range, panicking on bad test input
pub fn v6_range(from: &str, to: &str) -> Ipv6Range {
    Ipv6Range::new(v6(from), v6(to)).expect("valid IPv6 test range")
}

/// Build a version-agnostic range, panicking on bad test input
pub fn any_range(from: &str, to: &str) -> IpRange {
    IpRange::new(ip(from), ip(to)).expect("valid test range")
}

/// A registry with the default module installed
pub fn installed_registry() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    IpModule::new().install(&mut registry);
    registry
}
