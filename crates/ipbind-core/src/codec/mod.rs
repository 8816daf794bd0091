//! JSON codecs for IP values
//!
//! Each entity kind (address, subnet, range) has three sibling codecs:
//! an IPv4-only one, an IPv6-only one, and a version-agnostic one. The
//! three are independent implementations of the [`JsonCodec`] trait, not
//! an inheritance chain; the logic they share (range shape branching,
//! field validation) lives in free functions in [`range`].
//!
//! Every codec instance is immutable after construction. Encode and
//! decode are pure functions of their inputs plus the instance's fixed
//! formatter, so a single instance may serve unlimited concurrent calls
//! with no coordination.

pub mod address;
pub mod range;
pub mod subnet;

use crate::error::{Error, Result};
use crate::range::IpRange;
use ipnet::IpNet;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

/// Pull the string payload out of a JSON node, or fail with the node's
/// textual form
pub(crate) fn text_of(node: &serde_json::Value) -> Result<&str> {
    node.as_str()
        .ok_or_else(|| Error::invalid_format(node.to_string(), "expected a JSON string"))
}

/// Formatter overriding the canonical text form of an IPv6 address
///
/// At most one formatter is held per codec instance; absence means the
/// address's canonical `Display` form is used.
pub type Ipv6Formatter = fn(&Ipv6Addr) -> String;

/// Formatter overriding the canonical text form of an address of either
/// version
pub type IpFormatter = fn(&IpAddr) -> String;

/// The kind of IP entity a codec converts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A single IP address
    Address,
    /// An address range expressible as prefix plus prefix length
    Subnet,
    /// An arbitrary inclusive address range
    Range,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Address => "address",
            Self::Subnet => "subnet",
            Self::Range => "range",
        };
        f.write_str(name)
    }
}

/// The entity kind and version scope a codec handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandledKind {
    /// Entity kind the codec converts
    pub entity: EntityKind,
    /// Version scope the codec accepts
    pub bound: crate::resolve::VersionBound,
}

impl HandledKind {
    /// Create a handled-kind descriptor
    pub const fn new(entity: EntityKind, bound: crate::resolve::VersionBound) -> Self {
        Self { entity, bound }
    }
}

impl fmt::Display for HandledKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bound, self.entity)
    }
}

/// A decoded IP value, type-erased for the dynamic codec path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpValue {
    /// A single address
    Address(IpAddr),
    /// A subnet
    Subnet(IpNet),
    /// A range
    Range(IpRange),
}

impl IpValue {
    /// The entity kind of this value
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            Self::Address(_) => EntityKind::Address,
            Self::Subnet(_) => EntityKind::Subnet,
            Self::Range(_) => EntityKind::Range,
        }
    }

    /// The contained address, if this is an address value
    pub fn as_address(&self) -> Option<IpAddr> {
        match self {
            Self::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    /// The contained subnet, if this is a subnet value
    pub fn as_subnet(&self) -> Option<IpNet> {
        match self {
            Self::Subnet(net) => Some(*net),
            _ => None,
        }
    }

    /// The contained range, if this is a range value
    pub fn as_range(&self) -> Option<IpRange> {
        match self {
            Self::Range(range) => Some(*range),
            _ => None,
        }
    }
}

impl fmt::Display for IpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => addr.fmt(f),
            Self::Subnet(net) => net.fmt(f),
            Self::Range(range) => range.fmt(f),
        }
    }
}

/// A paired encode/decode implementation for one entity kind and one
/// version scope, operating on JSON trees
///
/// This is the type-erased surface the [registry](crate::registry) and
/// the [resolution layer](crate::resolve) dispatch through. Typed
/// callers use the inherent `encode`/`decode` methods on the concrete
/// codecs instead.
pub trait JsonCodec: Send + Sync {
    /// The entity kind and version scope this codec handles
    fn handled_kind(&self) -> HandledKind;

    /// Encode a value into its JSON representation
    ///
    /// Fails only with [`Error::UnsupportedValue`](crate::Error) when
    /// handed a value outside the handled kind; encoding a matching
    /// in-memory value cannot fail.
    fn encode_json(&self, value: &IpValue) -> Result<serde_json::Value>;

    /// Decode a JSON node into a value of the handled kind
    fn decode_json(&self, node: &serde_json::Value) -> Result<IpValue>;
}
