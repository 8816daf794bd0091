//! Subnet codecs
//!
//! A subnet is encoded as CIDR text, `<routing-prefix>/<prefixLength>`,
//! and decoded from the same form. The `ipnet` parsers enforce the
//! prefix-length bounds; on top of that the codecs require the address
//! part to be a valid routing prefix, i.e. no host bits set.

use crate::codec::{
    EntityKind, HandledKind, IpFormatter, IpValue, Ipv6Formatter, JsonCodec, text_of,
};
use crate::error::{Error, Result};
use crate::resolve::VersionBound;
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde_json::Value;

const HOST_BITS_SET: &str = "host bits set after the routing prefix";

/// Codec for IPv4 subnets
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4SubnetCodec;

impl Ipv4SubnetCodec {
    /// Create a new IPv4 subnet codec
    pub const fn new() -> Self {
        Self
    }

    /// Encode a subnet as CIDR text
    pub fn encode(&self, net: &Ipv4Net) -> String {
        net.to_string()
    }

    /// Decode a subnet from CIDR text
    pub fn decode(&self, text: &str) -> Result<Ipv4Net> {
        let net: Ipv4Net = text
            .parse()
            .map_err(|err| Error::invalid_format(text, err))?;
        if net.addr() != net.network() {
            return Err(Error::invalid_format(text, HOST_BITS_SET));
        }
        Ok(net)
    }
}

impl JsonCodec for Ipv4SubnetCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Subnet, VersionBound::V4Only)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Subnet(IpNet::V4(net)) => Ok(Value::String(self.encode(net))),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        let net = self.decode(text_of(node)?)?;
        Ok(IpValue::Subnet(IpNet::V4(net)))
    }
}

/// Codec for IPv6 subnets
///
/// An optional formatter overrides the routing prefix's text form on
/// encode; the prefix length is always appended as decimal digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv6SubnetCodec {
    pub(crate) formatter: Option<Ipv6Formatter>,
}

impl Ipv6SubnetCodec {
    /// Create a codec using the canonical text form
    pub const fn new() -> Self {
        Self { formatter: None }
    }

    /// Create a codec using a custom routing-prefix text form on encode
    pub const fn with_formatter(formatter: Ipv6Formatter) -> Self {
        Self {
            formatter: Some(formatter),
        }
    }

    /// Encode a subnet as CIDR text
    pub fn encode(&self, net: &Ipv6Net) -> String {
        match self.formatter {
            Some(format) => format!("{}/{}", format(&net.network()), net.prefix_len()),
            None => net.to_string(),
        }
    }

    /// Decode a subnet from CIDR text
    pub fn decode(&self, text: &str) -> Result<Ipv6Net> {
        let net: Ipv6Net = text
            .parse()
            .map_err(|err| Error::invalid_format(text, err))?;
        if net.addr() != net.network() {
            return Err(Error::invalid_format(text, HOST_BITS_SET));
        }
        Ok(net)
    }
}

impl JsonCodec for Ipv6SubnetCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Subnet, VersionBound::V6Only)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Subnet(IpNet::V6(net)) => Ok(Value::String(self.encode(net))),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        let net = self.decode(text_of(node)?)?;
        Ok(IpValue::Subnet(IpNet::V6(net)))
    }
}

/// Codec for subnets of either version
#[derive(Debug, Clone, Copy, Default)]
pub struct IpSubnetCodec {
    pub(crate) formatter: Option<IpFormatter>,
}

impl IpSubnetCodec {
    /// Create a codec using the canonical text form
    pub const fn new() -> Self {
        Self { formatter: None }
    }

    /// Create a codec using a custom routing-prefix text form on encode
    pub const fn with_formatter(formatter: IpFormatter) -> Self {
        Self {
            formatter: Some(formatter),
        }
    }

    /// Encode a subnet as CIDR text
    pub fn encode(&self, net: &IpNet) -> String {
        match self.formatter {
            Some(format) => format!("{}/{}", format(&net.network()), net.prefix_len()),
            None => net.to_string(),
        }
    }

    /// Decode a subnet from CIDR text, inferring the version from syntax
    pub fn decode(&self, text: &str) -> Result<IpNet> {
        let net: IpNet = text
            .parse()
            .map_err(|err| Error::invalid_format(text, err))?;
        if net.addr() != net.network() {
            return Err(Error::invalid_format(text, HOST_BITS_SET));
        }
        Ok(net)
    }
}

impl JsonCodec for IpSubnetCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Subnet, VersionBound::AnyVersion)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Subnet(net) => Ok(Value::String(self.encode(net))),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        let net = self.decode(text_of(node)?)?;
        Ok(IpValue::Subnet(net))
    }
}
