// # ipbind-core
//
// JSON data binding for IP address, subnet, and range values.
//
// ## Architecture Overview
//
// This library teaches serde-based JSON binding how to convert IP value
// objects to and from their textual or structured representations:
// - **codec**: address, subnet, and range codecs, each in IPv4-only,
//   IPv6-only, and version-agnostic variants
// - **range**: the `Ipv4Range`/`Ipv6Range`/`IpRange` value types
// - **resolve**: maps a binding site's declared version bound to the
//   matching codec instance
// - **registry**: the host-facing codec lookup table
// - **module**: the facade that installs the full codec matrix
//
// All address parsing, formatting, and comparison is delegated to
// `std::net` and `ipnet`; this crate only chooses wire shapes,
// dispatches on version bounds, and translates parse failures into
// binding errors.
//
// ## Design Principles
//
// 1. **No address logic of its own**: value semantics live in the
//    external address types
// 2. **Stateless codecs**: every instance is immutable after
//    construction and safe for unlimited concurrent use
// 3. **Version bounds are binding**: a site bound to one IP version
//    rejects values of the other, never coerces
// 4. **Terminal failures**: decode either returns a value or fails
//    synchronously; there are no retries

pub mod codec;
pub mod error;
pub mod module;
pub mod range;
pub mod registry;
pub mod resolve;

mod serde_impls;

// Re-export core types for convenience
pub use codec::{EntityKind, HandledKind, IpValue, JsonCodec};
pub use error::{Error, Result};
pub use module::IpModule;
pub use range::{IpRange, Ipv4Range, Ipv6Range, RangeError};
pub use registry::CodecRegistry;
pub use resolve::VersionBound;
