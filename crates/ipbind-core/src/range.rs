//! IP range value types
//!
//! An IP range is an inclusive, ordered pair of addresses of the same
//! version. Every subnet is a range, but a range need not be aligned to
//! a subnet boundary. The types here are thin value objects: all address
//! parsing, formatting, and comparison is delegated to `std::net` and
//! `ipnet`.
//!
//! Ranges never mix address versions, and `from` is never allowed to
//! exceed `to`; both are enforced at construction and never silently
//! coerced.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use thiserror::Error;

/// Error raised by range constructors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// `from` is numerically greater than `to`
    #[error("range start {from} is after range end {to}")]
    Inverted {
        /// Requested start address
        from: IpAddr,
        /// Requested end address
        to: IpAddr,
    },

    /// The two endpoints are of different IP versions
    #[error("range endpoints {from} and {to} are of different IP versions")]
    MixedVersions {
        /// Requested start address
        from: IpAddr,
        /// Requested end address
        to: IpAddr,
    },
}

/// An inclusive range of IPv4 addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    from: Ipv4Addr,
    to: Ipv4Addr,
}

impl Ipv4Range {
    /// Create a range from `from` up to and including `to`
    ///
    /// Fails with [`RangeError::Inverted`] when `from > to`; endpoints
    /// are never reordered on the caller's behalf.
    pub fn new(from: Ipv4Addr, to: Ipv4Addr) -> Result<Self, RangeError> {
        if from > to {
            return Err(RangeError::Inverted {
                from: IpAddr::V4(from),
                to: IpAddr::V4(to),
            });
        }
        Ok(Self { from, to })
    }

    /// Create the single-point range covering exactly one address
    pub const fn single(addr: Ipv4Addr) -> Self {
        Self {
            from: addr,
            to: addr,
        }
    }

    /// Create the range covering every address in a subnet
    pub fn from_subnet(net: Ipv4Net) -> Self {
        Self {
            from: net.network(),
            to: net.broadcast(),
        }
    }

    /// First address in the range
    pub fn from(&self) -> Ipv4Addr {
        self.from
    }

    /// Last address in the range
    pub fn to(&self) -> Ipv4Addr {
        self.to
    }

    /// Whether the range covers exactly one address
    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    /// Whether the range contains the given address
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.from <= addr && addr <= self.to
    }

    /// The subnet this range is exactly equal to, if any
    ///
    /// A range is a subnet when its extent is a power-of-two block and
    /// its start is aligned to that block size. A single-point range is
    /// the full-width `/32` subnet.
    pub fn as_subnet(&self) -> Option<Ipv4Net> {
        let from = self.from.to_bits();
        let span = from ^ self.to.to_bits();
        // span must be a contiguous run of low ones, with from aligned
        // to the block it spans
        if from & span != 0 || span & span.wrapping_add(1) != 0 {
            return None;
        }
        let prefix_len = (u32::BITS - span.count_ones()) as u8;
        Ipv4Net::new(self.from, prefix_len).ok()
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// An inclusive range of IPv6 addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Range {
    from: Ipv6Addr,
    to: Ipv6Addr,
}

impl Ipv6Range {
    /// Create a range from `from` up to and including `to`
    ///
    /// Fails with [`RangeError::Inverted`] when `from > to`.
    pub fn new(from: Ipv6Addr, to: Ipv6Addr) -> Result<Self, RangeError> {
        if from > to {
            return Err(RangeError::Inverted {
                from: IpAddr::V6(from),
                to: IpAddr::V6(to),
            });
        }
        Ok(Self { from, to })
    }

    /// Create the single-point range covering exactly one address
    pub const fn single(addr: Ipv6Addr) -> Self {
        Self {
            from: addr,
            to: addr,
        }
    }

    /// Create the range covering every address in a subnet
    pub fn from_subnet(net: Ipv6Net) -> Self {
        Self {
            from: net.network(),
            to: net.broadcast(),
        }
    }

    /// First address in the range
    pub fn from(&self) -> Ipv6Addr {
        self.from
    }

    /// Last address in the range
    pub fn to(&self) -> Ipv6Addr {
        self.to
    }

    /// Whether the range covers exactly one address
    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    /// Whether the range contains the given address
    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        self.from <= addr && addr <= self.to
    }

    /// The subnet this range is exactly equal to, if any
    pub fn as_subnet(&self) -> Option<Ipv6Net> {
        let from = self.from.to_bits();
        let span = from ^ self.to.to_bits();
        if from & span != 0 || span & span.wrapping_add(1) != 0 {
            return None;
        }
        let prefix_len = (u128::BITS - span.count_ones()) as u8;
        Ipv6Net::new(self.from, prefix_len).ok()
    }
}

impl fmt::Display for Ipv6Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// An inclusive range of either IPv4 or IPv6 addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpRange {
    /// A range of IPv4 addresses
    V4(Ipv4Range),
    /// A range of IPv6 addresses
    V6(Ipv6Range),
}

impl IpRange {
    /// Create a range from `from` up to and including `to`
    ///
    /// Fails with [`RangeError::MixedVersions`] when the endpoints are of
    /// different IP versions, and [`RangeError::Inverted`] when
    /// `from > to`.
    pub fn new(from: IpAddr, to: IpAddr) -> Result<Self, RangeError> {
        match (from, to) {
            (IpAddr::V4(from), IpAddr::V4(to)) => Ipv4Range::new(from, to).map(Self::V4),
            (IpAddr::V6(from), IpAddr::V6(to)) => Ipv6Range::new(from, to).map(Self::V6),
            _ => Err(RangeError::MixedVersions { from, to }),
        }
    }

    /// Create the single-point range covering exactly one address
    pub const fn single(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => Self::V4(Ipv4Range::single(addr)),
            IpAddr::V6(addr) => Self::V6(Ipv6Range::single(addr)),
        }
    }

    /// Create the range covering every address in a subnet
    pub fn from_subnet(net: IpNet) -> Self {
        match net {
            IpNet::V4(net) => Self::V4(Ipv4Range::from_subnet(net)),
            IpNet::V6(net) => Self::V6(Ipv6Range::from_subnet(net)),
        }
    }

    /// First address in the range
    pub fn from(&self) -> IpAddr {
        match self {
            Self::V4(range) => IpAddr::V4(range.from()),
            Self::V6(range) => IpAddr::V6(range.from()),
        }
    }

    /// Last address in the range
    pub fn to(&self) -> IpAddr {
        match self {
            Self::V4(range) => IpAddr::V4(range.to()),
            Self::V6(range) => IpAddr::V6(range.to()),
        }
    }

    /// Whether the range covers exactly one address
    pub fn is_single(&self) -> bool {
        match self {
            Self::V4(range) => range.is_single(),
            Self::V6(range) => range.is_single(),
        }
    }

    /// Whether the range contains the given address
    ///
    /// An address of the other IP version is never contained.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self, addr) {
            (Self::V4(range), IpAddr::V4(addr)) => range.contains(addr),
            (Self::V6(range), IpAddr::V6(addr)) => range.contains(addr),
            _ => false,
        }
    }

    /// The subnet this range is exactly equal to, if any
    pub fn as_subnet(&self) -> Option<IpNet> {
        match self {
            Self::V4(range) => range.as_subnet().map(IpNet::V4),
            Self::V6(range) => range.as_subnet().map(IpNet::V6),
        }
    }

    /// Whether this is an IPv4 range
    pub fn is_ipv4(&self) -> bool {
        matches!(self, Self::V4(_))
    }

    /// Whether this is an IPv6 range
    pub fn is_ipv6(&self) -> bool {
        matches!(self, Self::V6(_))
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(range) => range.fmt(f),
            Self::V6(range) => range.fmt(f),
        }
    }
}
