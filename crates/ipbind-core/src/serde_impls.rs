//! serde integration for the range types
//!
//! These impls are the statically resolved binding path: a field
//! declared `Ipv4Range` is permanently bound to the IPv4-only decoding
//! rules through its own `Deserialize` impl, so IPv6 input at that
//! field fails exactly as it would through the IPv4 codec. They use the
//! default policy — canonical text forms and the CIDR-when-possible
//! shape; per-instance formatters and shapes exist only on the dynamic
//! codecs.
//!
//! Addresses and subnets are not covered here: `std::net` and `ipnet`
//! already serialize those as their canonical text forms.
//!
//! Adapter errors are reported through `serde::de::Error::custom`, the
//! host framework's standard error channel.

use crate::codec::range::{
    FROM_FIELD, TO_FIELD, decode_any_object, decode_any_str, decode_v4_object, decode_v4_str,
    decode_v6_object, decode_v6_str,
};
use crate::range::{IpRange, Ipv4Range, Ipv6Range};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const EXPECTING: &str = "a CIDR string or an object with \"from\" and \"to\" fields";

fn serialize_range<S>(
    serializer: S,
    subnet: Option<impl fmt::Display>,
    from: impl fmt::Display,
    to: impl fmt::Display,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match subnet {
        Some(net) => serializer.collect_str(&net),
        None => {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry(FROM_FIELD, &from.to_string())?;
            map.serialize_entry(TO_FIELD, &to.to_string())?;
            map.end()
        }
    }
}

fn collect_object<'de, A>(mut access: A) -> Result<serde_json::Map<String, serde_json::Value>, A::Error>
where
    A: MapAccess<'de>,
{
    let mut map = serde_json::Map::new();
    while let Some((field, value)) = access.next_entry::<String, serde_json::Value>()? {
        map.insert(field, value);
    }
    Ok(map)
}

impl Serialize for Ipv4Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_range(serializer, self.as_subnet(), self.from(), self.to())
    }
}

impl<'de> Deserialize<'de> for Ipv4Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangeVisitor;

        impl<'de> Visitor<'de> for RangeVisitor {
            type Value = Ipv4Range;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(EXPECTING)
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                decode_v4_str(text).map_err(E::custom)
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
                decode_v4_object(&collect_object(access)?).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(RangeVisitor)
    }
}

impl Serialize for Ipv6Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_range(serializer, self.as_subnet(), self.from(), self.to())
    }
}

impl<'de> Deserialize<'de> for Ipv6Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangeVisitor;

        impl<'de> Visitor<'de> for RangeVisitor {
            type Value = Ipv6Range;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(EXPECTING)
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                decode_v6_str(text).map_err(E::custom)
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
                decode_v6_object(&collect_object(access)?).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(RangeVisitor)
    }
}

impl Serialize for IpRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_range(serializer, self.as_subnet(), self.from(), self.to())
    }
}

impl<'de> Deserialize<'de> for IpRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangeVisitor;

        impl<'de> Visitor<'de> for RangeVisitor {
            type Value = IpRange;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(EXPECTING)
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                decode_any_str(text).map_err(E::custom)
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
                decode_any_object(&collect_object(access)?).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(RangeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_aligned_range_as_cidr() {
        let range: IpRange = serde_json::from_value(json!("10.0.0.0/24")).unwrap();
        assert_eq!(serde_json::to_value(range).unwrap(), json!("10.0.0.0/24"));
    }

    #[test]
    fn test_serialize_unaligned_range_as_object() {
        let range = Ipv4Range::new(
            "10.0.0.1".parse().unwrap(),
            "10.0.0.9".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_string(&range).unwrap(),
            r#"{"from":"10.0.0.1","to":"10.0.0.9"}"#
        );
    }

    #[test]
    fn test_deserialize_is_version_bound_by_field_type() {
        // The declared type performs the contextual binding
        let err = serde_json::from_value::<Ipv4Range>(json!("::1/128")).unwrap_err();
        assert!(err.to_string().contains("::1/128"));

        let err =
            serde_json::from_value::<Ipv6Range>(json!({"from": "10.0.0.1", "to": "10.0.0.9"}))
                .unwrap_err();
        assert!(err.to_string().contains("10.0.0.1"));
    }

    #[test]
    fn test_deserialize_reports_field_errors() {
        let err = serde_json::from_value::<IpRange>(json!({"to": "10.0.0.1"})).unwrap_err();
        assert!(err.to_string().contains("missing field"));

        let err =
            serde_json::from_value::<IpRange>(json!({"from": "10.0.0.1", "to": "10.0.0.9", "x": 1}))
                .unwrap_err();
        assert!(err.to_string().contains("unrecognized field"));
    }
}
