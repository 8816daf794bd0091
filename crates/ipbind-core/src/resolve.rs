//! Contextual type resolution
//!
//! A binding site may be declared with a version bound: IPv4 only, IPv6
//! only, or no bound at all. The functions here map that declared bound
//! to the matching codec instance, so that a site bound to one version
//! permanently rejects values of the other.
//!
//! Resolution is a pure deterministic function of the bound; the host
//! framework is expected to cache the result per binding site, and
//! concurrent racing resolutions of the same site are harmless. An
//! absent or unrecognized bound always falls back to the
//! version-agnostic codec, so there is no error path.

use crate::codec::JsonCodec;
use crate::codec::address::{IpAddressCodec, Ipv4AddressCodec, Ipv6AddressCodec};
use crate::codec::range::{IpRangeCodec, Ipv4RangeCodec, Ipv6RangeCodec};
use crate::codec::subnet::{IpSubnetCodec, Ipv4SubnetCodec, Ipv6SubnetCodec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A binding site's declared version bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionBound {
    /// Bound to IPv4 values only
    V4Only,
    /// Bound to IPv6 values only
    V6Only,
    /// Accepts values of either version
    #[default]
    AnyVersion,
    /// Bound could not be determined; treated as any-version
    Unknown,
}

impl fmt::Display for VersionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::V4Only => "IPv4",
            Self::V6Only => "IPv6",
            Self::AnyVersion => "any-version",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

// Default codec instances, canonical text form and default shape.
// Custom-configured instances are built by IpModule at install time.
static IPV4_ADDRESS: Ipv4AddressCodec = Ipv4AddressCodec::new();
static IPV6_ADDRESS: Ipv6AddressCodec = Ipv6AddressCodec::new();
static ANY_ADDRESS: IpAddressCodec = IpAddressCodec::new();

static IPV4_SUBNET: Ipv4SubnetCodec = Ipv4SubnetCodec::new();
static IPV6_SUBNET: Ipv6SubnetCodec = Ipv6SubnetCodec::new();
static ANY_SUBNET: IpSubnetCodec = IpSubnetCodec::new();

static IPV4_RANGE: Ipv4RangeCodec = Ipv4RangeCodec::new();
static IPV6_RANGE: Ipv6RangeCodec = Ipv6RangeCodec::new();
static ANY_RANGE: IpRangeCodec = IpRangeCodec::new();

/// Resolve the address codec for a declared bound
pub fn address_codec(bound: VersionBound) -> &'static dyn JsonCodec {
    match bound {
        VersionBound::V4Only => &IPV4_ADDRESS,
        VersionBound::V6Only => &IPV6_ADDRESS,
        VersionBound::AnyVersion | VersionBound::Unknown => &ANY_ADDRESS,
    }
}

/// Resolve the subnet codec for a declared bound
pub fn subnet_codec(bound: VersionBound) -> &'static dyn JsonCodec {
    match bound {
        VersionBound::V4Only => &IPV4_SUBNET,
        VersionBound::V6Only => &IPV6_SUBNET,
        VersionBound::AnyVersion | VersionBound::Unknown => &ANY_SUBNET,
    }
}

/// Resolve the range codec for a declared bound
pub fn range_codec(bound: VersionBound) -> &'static dyn JsonCodec {
    match bound {
        VersionBound::V4Only => &IPV4_RANGE,
        VersionBound::V6Only => &IPV6_RANGE,
        VersionBound::AnyVersion | VersionBound::Unknown => &ANY_RANGE,
    }
}
