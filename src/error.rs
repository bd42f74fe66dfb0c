//! Error types for pack/unpack operations

use thiserror::Error;

/// Error type for unpack operations.
///
/// Pack operations have no error path: insufficient capacity is always
/// resolved by growing the buffer, and caller-contract violations (such as
/// a byte string longer than its 16-bit length prefix can describe) panic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
}
