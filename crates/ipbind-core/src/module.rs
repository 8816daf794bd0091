//! Registration facade
//!
//! [`IpModule`] installs the full codec matrix — three entity kinds,
//! each in an IPv4-only, IPv6-only, and version-agnostic variant — into
//! a [`CodecRegistry`]. The module itself is stateless; the only
//! configuration it carries is the optional custom formatters and the
//! range encoding shape, fixed at construction time.
//!
//! Installing the same module into independent registries produces
//! independent but behaviorally identical codec sets.

use crate::codec::address::{IpAddressCodec, Ipv4AddressCodec, Ipv6AddressCodec};
use crate::codec::range::{IpRangeCodec, Ipv4RangeCodec, Ipv6RangeCodec, RangeShape};
use crate::codec::subnet::{IpSubnetCodec, Ipv4SubnetCodec, Ipv6SubnetCodec};
use crate::codec::{IpFormatter, Ipv6Formatter};
use crate::registry::CodecRegistry;
use std::sync::Arc;

/// Registration facade for the IP codec matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct IpModule {
    /// Custom text form for IPv6 values at the IPv6-only codecs
    ipv6_formatter: Option<Ipv6Formatter>,

    /// Custom text form for values at the version-agnostic codecs
    ip_formatter: Option<IpFormatter>,

    /// Encoding policy for subnet-aligned ranges
    range_shape: RangeShape,
}

impl IpModule {
    /// Create a module with canonical text forms and the default
    /// CIDR-when-possible range shape
    pub const fn new() -> Self {
        Self {
            ipv6_formatter: None,
            ip_formatter: None,
            range_shape: RangeShape::PreferCidr,
        }
    }

    /// Use a custom text form for the IPv6-only codecs
    pub fn with_ipv6_formatter(mut self, formatter: Ipv6Formatter) -> Self {
        self.ipv6_formatter = Some(formatter);
        self
    }

    /// Use a custom text form for the version-agnostic codecs
    pub fn with_ip_formatter(mut self, formatter: IpFormatter) -> Self {
        self.ip_formatter = Some(formatter);
        self
    }

    /// Use an explicit range encoding shape
    pub fn with_range_shape(mut self, shape: RangeShape) -> Self {
        self.range_shape = shape;
        self
    }

    /// Module name, for host-framework diagnostics only
    pub fn name(&self) -> &'static str {
        env!("CARGO_PKG_NAME")
    }

    /// Module version, for host-framework diagnostics only
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Install all nine codec instances into a registry
    pub fn install(&self, registry: &mut CodecRegistry) {
        tracing::debug!(
            module = self.name(),
            version = self.version(),
            "installing IP codecs"
        );

        registry.register(Arc::new(Ipv4AddressCodec::new()));
        registry.register(Arc::new(Ipv6AddressCodec {
            formatter: self.ipv6_formatter,
        }));
        registry.register(Arc::new(IpAddressCodec {
            formatter: self.ip_formatter,
        }));

        registry.register(Arc::new(Ipv4SubnetCodec::new()));
        registry.register(Arc::new(Ipv6SubnetCodec {
            formatter: self.ipv6_formatter,
        }));
        registry.register(Arc::new(IpSubnetCodec {
            formatter: self.ip_formatter,
        }));

        registry.register(Arc::new(Ipv4RangeCodec {
            shape: self.range_shape,
        }));
        registry.register(Arc::new(Ipv6RangeCodec {
            formatter: self.ipv6_formatter,
            shape: self.range_shape,
        }));
        registry.register(Arc::new(IpRangeCodec {
            formatter: self.ip_formatter,
            shape: self.range_shape,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{EntityKind, HandledKind};
    use crate::resolve::VersionBound;

    #[test]
    fn test_install_registers_full_matrix() {
        let mut registry = CodecRegistry::new();
        IpModule::new().install(&mut registry);

        assert_eq!(registry.len(), 9);
        for entity in [EntityKind::Address, EntityKind::Subnet, EntityKind::Range] {
            for bound in [
                VersionBound::V4Only,
                VersionBound::V6Only,
                VersionBound::AnyVersion,
            ] {
                let kind = HandledKind::new(entity, bound);
                let codec = registry.get(kind).expect("codec installed");
                assert_eq!(codec.handled_kind(), kind);
            }
        }
    }

    #[test]
    fn test_install_is_idempotent_across_registries() {
        let module = IpModule::new();

        let mut first = CodecRegistry::new();
        module.install(&mut first);
        let mut second = CodecRegistry::new();
        module.install(&mut second);

        // Independent installations behave identically
        let node = serde_json::json!({"from": "10.0.0.1", "to": "10.0.0.9"});
        let bound = VersionBound::V4Only;
        let a = first.decode(EntityKind::Range, bound, &node).unwrap();
        let b = second.decode(EntityKind::Range, bound, &node).unwrap();
        assert_eq!(a, b);

        // Re-installing into the same registry replaces, not duplicates
        module.install(&mut first);
        assert_eq!(first.len(), 9);
    }

    #[test]
    fn test_name_and_version_tags() {
        let module = IpModule::new();
        assert_eq!(module.name(), "ipbind-core");
        assert!(!module.version().is_empty());
    }
}
