//! Range codecs
//!
//! A range has two wire shapes. When it is exactly a subnet-aligned
//! block (and the codec is configured to prefer it), it is encoded as
//! CIDR text, identically to the subnet codec. Otherwise it is encoded
//! as an object with exactly two string fields, `from` then `to`.
//!
//! Decode branches on the JSON node's shape: a string is decoded as a
//! subnet (which also covers single-point ranges written with a
//! full-width prefix), an object is validated to carry exactly the two
//! recognized fields and its endpoints are decoded as addresses. A range
//! whose endpoints are equal collapses to the single-point range.
//! Swapped endpoints are never reordered.

use crate::codec::address::{IpAddressCodec, Ipv4AddressCodec, Ipv6AddressCodec};
use crate::codec::subnet::{IpSubnetCodec, Ipv4SubnetCodec, Ipv6SubnetCodec};
use crate::codec::{EntityKind, HandledKind, IpFormatter, IpValue, Ipv6Formatter, JsonCodec};
use crate::error::{Error, Result};
use crate::range::{IpRange, Ipv4Range, Ipv6Range, RangeError};
use crate::resolve::VersionBound;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire field holding a range's first address
pub const FROM_FIELD: &str = "from";

/// Wire field holding a range's last address
pub const TO_FIELD: &str = "to";

/// Encoding policy for ranges that are exactly subnet-aligned blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeShape {
    /// Emit CIDR text when the range is exactly a subnet, the object
    /// shape otherwise
    #[default]
    PreferCidr,
    /// Always emit the `{from, to}` object shape
    AlwaysObject,
}

/// Validate an object-shaped range node and return the two endpoint
/// texts
///
/// Exactly the fields `from` and `to` are permitted, each holding a
/// string. Field order is irrelevant.
fn endpoint_texts(map: &Map<String, Value>) -> Result<(&str, &str)> {
    let mut from = None;
    let mut to = None;
    for (field, value) in map {
        match field.as_str() {
            FROM_FIELD => from = Some(value),
            TO_FIELD => to = Some(value),
            _ => return Err(Error::unrecognized_field(field)),
        }
    }
    let from = from.ok_or_else(|| Error::missing_field(FROM_FIELD))?;
    let to = to.ok_or_else(|| Error::missing_field(TO_FIELD))?;
    let from = from
        .as_str()
        .ok_or_else(|| Error::invalid_field_value(FROM_FIELD, from))?;
    let to = to
        .as_str()
        .ok_or_else(|| Error::invalid_field_value(TO_FIELD, to))?;
    Ok((from, to))
}

fn unexpected_shape(node: &Value) -> Error {
    Error::invalid_format(
        node.to_string(),
        "expected a CIDR string or an object with \"from\" and \"to\" fields",
    )
}

fn translate_range_error(err: RangeError) -> Error {
    match &err {
        RangeError::Inverted { from, to } => {
            Error::invalid_format(format!("{from}-{to}"), &err)
        }
        RangeError::MixedVersions { from, to } => Error::incompatible_endpoints(from, to),
    }
}

/// Decode an IPv4 range from CIDR text
pub(crate) fn decode_v4_str(text: &str) -> Result<Ipv4Range> {
    let net = Ipv4SubnetCodec::new().decode(text)?;
    Ok(Ipv4Range::from_subnet(net))
}

/// Decode an IPv4 range from a validated `{from, to}` object
pub(crate) fn decode_v4_object(map: &Map<String, Value>) -> Result<Ipv4Range> {
    let (from, to) = endpoint_texts(map)?;
    let codec = Ipv4AddressCodec::new();
    let from = codec.decode(from)?;
    let to = codec.decode(to)?;
    if from == to {
        return Ok(Ipv4Range::single(from));
    }
    Ipv4Range::new(from, to).map_err(translate_range_error)
}

/// Decode an IPv6 range from CIDR text
pub(crate) fn decode_v6_str(text: &str) -> Result<Ipv6Range> {
    let net = Ipv6SubnetCodec::new().decode(text)?;
    Ok(Ipv6Range::from_subnet(net))
}

/// Decode an IPv6 range from a validated `{from, to}` object
pub(crate) fn decode_v6_object(map: &Map<String, Value>) -> Result<Ipv6Range> {
    let (from, to) = endpoint_texts(map)?;
    let codec = Ipv6AddressCodec::new();
    let from = codec.decode(from)?;
    let to = codec.decode(to)?;
    if from == to {
        return Ok(Ipv6Range::single(from));
    }
    Ipv6Range::new(from, to).map_err(translate_range_error)
}

/// Decode a version-agnostic range from CIDR text
pub(crate) fn decode_any_str(text: &str) -> Result<IpRange> {
    let net = IpSubnetCodec::new().decode(text)?;
    Ok(IpRange::from_subnet(net))
}

/// Decode a version-agnostic range from a validated `{from, to}` object
///
/// Endpoints of different concrete versions fail with
/// [`Error::IncompatibleEndpoints`], naming both values.
pub(crate) fn decode_any_object(map: &Map<String, Value>) -> Result<IpRange> {
    let (from, to) = endpoint_texts(map)?;
    let codec = IpAddressCodec::new();
    let from = codec.decode(from)?;
    let to = codec.decode(to)?;
    if from == to {
        return Ok(IpRange::single(from));
    }
    IpRange::new(from, to).map_err(translate_range_error)
}

/// Codec for IPv4 ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4RangeCodec {
    pub(crate) shape: RangeShape,
}

impl Ipv4RangeCodec {
    /// Create a codec with the default CIDR-when-possible shape
    pub const fn new() -> Self {
        Self {
            shape: RangeShape::PreferCidr,
        }
    }

    /// Create a codec with an explicit shape policy
    pub const fn with_shape(shape: RangeShape) -> Self {
        Self { shape }
    }

    /// Encode a range as CIDR text or a `{from, to}` object
    pub fn encode(&self, range: &Ipv4Range) -> Value {
        if self.shape == RangeShape::PreferCidr {
            if let Some(net) = range.as_subnet() {
                return Value::String(Ipv4SubnetCodec::new().encode(&net));
            }
        }
        let codec = Ipv4AddressCodec::new();
        let mut map = Map::new();
        map.insert(FROM_FIELD.to_string(), Value::String(codec.encode(&range.from())));
        map.insert(TO_FIELD.to_string(), Value::String(codec.encode(&range.to())));
        Value::Object(map)
    }

    /// Decode a range from either wire shape
    pub fn decode(&self, node: &Value) -> Result<Ipv4Range> {
        match node {
            Value::String(text) => decode_v4_str(text),
            Value::Object(map) => decode_v4_object(map),
            other => Err(unexpected_shape(other)),
        }
    }
}

impl JsonCodec for Ipv4RangeCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Range, VersionBound::V4Only)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Range(IpRange::V4(range)) => Ok(self.encode(range)),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        Ok(IpValue::Range(IpRange::V4(self.decode(node)?)))
    }
}

/// Codec for IPv6 ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv6RangeCodec {
    pub(crate) formatter: Option<Ipv6Formatter>,
    pub(crate) shape: RangeShape,
}

impl Ipv6RangeCodec {
    /// Create a codec with the canonical text form and the default
    /// CIDR-when-possible shape
    pub const fn new() -> Self {
        Self {
            formatter: None,
            shape: RangeShape::PreferCidr,
        }
    }

    /// Create a codec using a custom endpoint text form on encode
    pub const fn with_formatter(formatter: Ipv6Formatter) -> Self {
        Self {
            formatter: Some(formatter),
            shape: RangeShape::PreferCidr,
        }
    }

    /// Create a codec with an explicit shape policy
    pub const fn with_shape(shape: RangeShape) -> Self {
        Self {
            formatter: None,
            shape,
        }
    }

    /// Encode a range as CIDR text or a `{from, to}` object
    pub fn encode(&self, range: &Ipv6Range) -> Value {
        let subnet_codec = Ipv6SubnetCodec {
            formatter: self.formatter,
        };
        if self.shape == RangeShape::PreferCidr {
            if let Some(net) = range.as_subnet() {
                return Value::String(subnet_codec.encode(&net));
            }
        }
        let codec = Ipv6AddressCodec {
            formatter: self.formatter,
        };
        let mut map = Map::new();
        map.insert(FROM_FIELD.to_string(), Value::String(codec.encode(&range.from())));
        map.insert(TO_FIELD.to_string(), Value::String(codec.encode(&range.to())));
        Value::Object(map)
    }

    /// Decode a range from either wire shape
    pub fn decode(&self, node: &Value) -> Result<Ipv6Range> {
        match node {
            Value::String(text) => decode_v6_str(text),
            Value::Object(map) => decode_v6_object(map),
            other => Err(unexpected_shape(other)),
        }
    }
}

impl JsonCodec for Ipv6RangeCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Range, VersionBound::V6Only)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Range(IpRange::V6(range)) => Ok(self.encode(range)),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        Ok(IpValue::Range(IpRange::V6(self.decode(node)?)))
    }
}

/// Codec for ranges of either version
#[derive(Debug, Clone, Copy, Default)]
pub struct IpRangeCodec {
    pub(crate) formatter: Option<IpFormatter>,
    pub(crate) shape: RangeShape,
}

impl IpRangeCodec {
    /// Create a codec with the canonical text form and the default
    /// CIDR-when-possible shape
    pub const fn new() -> Self {
        Self {
            formatter: None,
            shape: RangeShape::PreferCidr,
        }
    }

    /// Create a codec using a custom endpoint text form on encode
    pub const fn with_formatter(formatter: IpFormatter) -> Self {
        Self {
            formatter: Some(formatter),
            shape: RangeShape::PreferCidr,
        }
    }

    /// Create a codec with an explicit shape policy
    pub const fn with_shape(shape: RangeShape) -> Self {
        Self {
            formatter: None,
            shape,
        }
    }

    /// Encode a range as CIDR text or a `{from, to}` object
    pub fn encode(&self, range: &IpRange) -> Value {
        let subnet_codec = IpSubnetCodec {
            formatter: self.formatter,
        };
        if self.shape == RangeShape::PreferCidr {
            if let Some(net) = range.as_subnet() {
                return Value::String(subnet_codec.encode(&net));
            }
        }
        let codec = IpAddressCodec {
            formatter: self.formatter,
        };
        let mut map = Map::new();
        map.insert(FROM_FIELD.to_string(), Value::String(codec.encode(&range.from())));
        map.insert(TO_FIELD.to_string(), Value::String(codec.encode(&range.to())));
        Value::Object(map)
    }

    /// Decode a range from either wire shape, inferring the version from
    /// the endpoint syntax
    pub fn decode(&self, node: &Value) -> Result<IpRange> {
        match node {
            Value::String(text) => decode_any_str(text),
            Value::Object(map) => decode_any_object(map),
            other => Err(unexpected_shape(other)),
        }
    }
}

impl JsonCodec for IpRangeCodec {
    fn handled_kind(&self) -> HandledKind {
        HandledKind::new(EntityKind::Range, VersionBound::AnyVersion)
    }

    fn encode_json(&self, value: &IpValue) -> Result<Value> {
        match value {
            IpValue::Range(range) => Ok(self.encode(range)),
            other => Err(Error::unsupported_value(self.handled_kind(), other)),
        }
    }

    fn decode_json(&self, node: &Value) -> Result<IpValue> {
        Ok(IpValue::Range(self.decode(node)?))
    }
}
