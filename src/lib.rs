//! Wire-format marshaling for cluster control messages.
//!
//! # Overview
//!
//! The lowest-level layer of an inter-daemon RPC protocol: a growable
//! binary [`Buffer`] plus typed pack/unpack primitives designed to
//! - serialize message fields into a canonical, architecture-independent
//!   binary format, and
//! - deserialize untrusted binary input defensively, failing cleanly on
//!   truncated or corrupt data.
//!
//! All multi-byte integers are big-endian on the wire. Variable-length
//! data carries a 16-bit big-endian length or count prefix; nothing else
//! (no padding, no type tags) appears in the stream. Field identity is
//! positional: encoder and decoder must issue the same call sequence, and
//! that sequence is the message schema, owned by the caller.
//!
//! Packing never fails — the buffer grows on demand. Unpacking returns
//! [`Error::EndOfBuffer`] when too few bytes remain, leaving the cursor
//! unchanged so the caller can abort the message or retry once the missing
//! bytes arrive.
//!
//! # Supported Wire Values
//!
//! - Fixed-width: `u8`, `u16`, `u32`, and 64-bit signed time values
//! - Byte strings: 16-bit length prefix, then the raw payload
//! - Counted arrays of any packable element ([`Pack`]/[`Unpack`])
//! - Raw blocks with caller-managed, out-of-band lengths
//!
//! # Example
//!
//! ```
//! use packbuf::Buffer;
//!
//! // Producer: pack the fields of a message in schema order. The initial
//! // capacity is a hint; the store grows as needed.
//! let mut buf = Buffer::with_capacity(4);
//! buf.pack_u16(300);
//! buf.pack_mem(b"ab");
//! let wire = buf.freeze();
//! assert_eq!(&wire[..], &[0x01, 0x2C, 0x00, 0x02, 0x61, 0x62]);
//!
//! // Consumer: wrap the received bytes and unpack the same sequence.
//! let mut buf = Buffer::from_vec(wire.to_vec());
//! assert_eq!(buf.unpack_u16().unwrap(), 300);
//! assert_eq!(buf.unpack_mem().unwrap(), b"ab");
//! assert!(buf.unpack_u16().is_err());
//! ```
//!
//! # Example (Generic Fields)
//!
//! ```
//! use packbuf::Buffer;
//!
//! let mut buf = Buffer::with_capacity(64);
//! buf.pack_array(&[1u32, 2, 3]);
//! buf.pack_time(1_700_000_000);
//!
//! let mut buf = Buffer::from_vec(buf.freeze().to_vec());
//! assert_eq!(buf.unpack_array::<u32>().unwrap(), [1, 2, 3]);
//! assert_eq!(buf.unpack_time().unwrap(), 1_700_000_000);
//! ```

pub mod buffer;
pub mod error;
mod fixed;
mod mem;
pub mod pack;

// Re-export main types and traits
pub use buffer::{Buffer, GROWTH_UNIT};
pub use error::Error;
pub use pack::{Pack, Unpack};
