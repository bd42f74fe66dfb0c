//! Fixed-width integer and time pack/unpack.
//!
//! All multi-byte values are big-endian ("network byte order") on the wire
//! regardless of host endianness. Time values are always promoted to a
//! signed 64-bit integer so the wire format does not depend on the width
//! of any host's native time type.

use crate::{buffer::Buffer, error::Error};
use paste::paste;

macro_rules! impl_fixed {
    ($type:ty) => {
        paste! {
            #[doc = concat!(
                "Converts `val` to network byte order and appends it, \
                 growing the store if needed. Never fails."
            )]
            #[inline]
            pub fn [<pack_ $type>](&mut self, val: $type) {
                self.put(&val.to_be_bytes());
            }

            #[doc = concat!(
                "Reads the next `", stringify!($type), "` from network byte \
                 order, advancing the cursor.\n\nFails with \
                 [`Error::EndOfBuffer`] if too few bytes remain, leaving \
                 the cursor unchanged."
            )]
            #[inline]
            pub fn [<unpack_ $type>](&mut self) -> Result<$type, Error> {
                const WIDTH: usize = std::mem::size_of::<$type>();
                let mut raw = [0u8; WIDTH];
                raw.copy_from_slice(self.take(WIDTH)?);
                Ok(<$type>::from_be_bytes(raw))
            }
        }
    };
}

impl Buffer {
    impl_fixed!(u8);
    impl_fixed!(u16);
    impl_fixed!(u32);

    /// Packs a time value as a signed 64-bit integer, big-endian.
    #[inline]
    pub fn pack_time(&mut self, val: i64) {
        self.put(&val.to_be_bytes());
    }

    /// Unpacks a time value packed by [`Buffer::pack_time`].
    ///
    /// A host with a narrower native time type truncates only if the value
    /// is out of range; that conversion is the caller's concern.
    #[inline]
    pub fn unpack_time(&mut self) -> Result<i64, Error> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8)?);
        Ok(i64::from_be_bytes(raw))
    }
}
