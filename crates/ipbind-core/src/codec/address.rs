//! Address codecs
//!
//! A single address is always encoded as its text form and decoded from
//! a JSON string. The IPv4 and IPv6 codecs parse with the
//! version-specific parser, so text of the other version fails exactly
//! the way that parser rejects it; the version-agnostic codec infers the
//! version from the syntax.

use crate::codec::{
    EntityKind, HandledKind, IpFormatter, IpValue, Ipv6Formatter, JsonCodec, text_of,
};
use crate::error::{Error, Result};
use crate::resolve::VersionBound;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Codec for IPv4 addresses
///
/// IPv4 addresses have a single canonical text form, so this codec takes
/// no formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4AddressCodec;

impl Ipv4AddressCodec {
    /// Create a new IPv4 address codec
    pub const fn new() -> Self {
        Self
    }

    /// Encode an address as its canonical text form
    pub fn encode(&self, addr: &Ipv4Addr) -> String {
        addr.to_string()
    }

    /// Decode an address from text
    pub fn decode(&self, text: &str) -> Result<Ipv4Addr> {
        text.parse()
            .map_err(|err| Error::invalid_format(text, err))
    }
}

impl JsonCodec for Ipv4AddressCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Address, VersionBound::V4Only)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Address(IpAddr::V4(addr)) => Ok(Value::String(self.encode(addr))),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        let addr = self.decode(text_of(node)?)?;
        Ok(IpValue::Address(IpAddr::V4(addr)))
    }
}

/// Codec for IPv6 addresses
///
/// An optional formatter overrides the canonical text form on encode,
/// e.g. to emit fully expanded instead of compressed notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv6AddressCodec {
    pub(crate) formatter: Option<Ipv6Formatter>,
}

impl Ipv6AddressCodec {
    /// Create a codec using the canonical text form
    pub const fn new() -> Self {
        Self { formatter: None }
    }

    /// Create a codec using a custom text form on encode
    pub const fn with_formatter(formatter: Ipv6Formatter) -> Self {
        Self {
            formatter: Some(formatter),
        }
    }

    /// Encode an address as text
    pub fn encode(&self, addr: &Ipv6Addr) -> String {
        match self.formatter {
            Some(format) => format(addr),
            None => addr.to_string(),
        }
    }

    /// Decode an address from text
    pub fn decode(&self, text: &str) -> Result<Ipv6Addr> {
        text.parse()
            .map_err(|err| Error::invalid_format(text, err))
    }
}

impl JsonCodec for Ipv6AddressCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Address, VersionBound::V6Only)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Address(IpAddr::V6(addr)) => Ok(Value::String(self.encode(addr))),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        let addr = self.decode(text_of(node)?)?;
        Ok(IpValue::Address(IpAddr::V6(addr)))
    }
}

/// Codec for addresses of either version
#[derive(Debug, Clone, Copy, Default)]
pub struct IpAddressCodec {
    pub(crate) formatter: Option<IpFormatter>,
}

impl IpAddressCodec {
    /// Create a codec using the canonical text form
    pub const fn new() -> Self {
        Self { formatter: None }
    }

    /// Create a codec using a custom text form on encode
    pub const fn with_formatter(formatter: IpFormatter) -> Self {
        Self {
            formatter: Some(formatter),
        }
    }

    /// Encode an address as text
    pub fn encode(&self, addr: &IpAddr) -> String {
        match self.formatter {
            Some(format) => format(addr),
            None => addr.to_string(),
        }
    }

    /// Decode an address from text, inferring the version from syntax
    pub fn decode(&self, text: &str) -> Result<IpAddr> {
        text.parse()
            .map_err(|err| Error::invalid_format(text, err))
    }
}

impl JsonCodec for IpAddressCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Address, VersionBound::AnyVersion)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Address(addr) => Ok(Value::String(self.encode(addr))),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        let addr = self.decode(text_of(node)?)?;
        Ok(IpValue::Address(addr))
    }
}
