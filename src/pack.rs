//! Pack/unpack traits and generic counted arrays.
//!
//! Message schemas are a fixed call sequence shared by encoder and
//! decoder; the traits here let that sequence be written generically over
//! field type, and give arrays of any packable element the same wire shape
//! (16-bit big-endian count prefix, then each element in sequence).

use crate::{buffer::Buffer, error::Error};
use paste::paste;

/// Trait for values that can be packed into a [`Buffer`].
pub trait Pack {
    /// Appends this value to the buffer in its canonical wire encoding.
    /// Never fails; the buffer grows on demand.
    fn pack_into(&self, buf: &mut Buffer);

    /// The exact number of bytes [`Pack::pack_into`] will write.
    fn wire_size(&self) -> usize;
}

/// Trait for values that can be unpacked from a [`Buffer`].
pub trait Unpack: Sized {
    /// Reads the next value from the buffer's unconsumed region.
    ///
    /// Fails with [`Error::EndOfBuffer`] if too few bytes remain, leaving
    /// the cursor unchanged.
    fn unpack_from(buf: &mut Buffer) -> Result<Self, Error>;

    /// Unpacks a single value from `data`, requiring the whole input to be
    /// consumed.
    ///
    /// Fails with [`Error::ExtraData`] if unconsumed bytes trail the
    /// decoded value.
    ///
    /// (Provided method).
    fn unpack_all(data: Vec<u8>) -> Result<Self, Error> {
        let mut buf = Buffer::from_vec(data);
        let out = Self::unpack_from(&mut buf)?;
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(out)
    }
}

// Fixed-width integers delegate to the Buffer methods of the same name.
macro_rules! impl_fixed_pack {
    ($type:ty) => {
        paste! {
            impl Pack for $type {
                #[inline]
                fn pack_into(&self, buf: &mut Buffer) {
                    buf.[<pack_ $type>](*self);
                }

                #[inline]
                fn wire_size(&self) -> usize {
                    std::mem::size_of::<$type>()
                }
            }

            impl Unpack for $type {
                #[inline]
                fn unpack_from(buf: &mut Buffer) -> Result<Self, Error> {
                    buf.[<unpack_ $type>]()
                }
            }
        }
    };
}

impl_fixed_pack!(u8);
impl_fixed_pack!(u16);
impl_fixed_pack!(u32);

// Time values are 64-bit signed on the wire.
impl Pack for i64 {
    #[inline]
    fn pack_into(&self, buf: &mut Buffer) {
        buf.pack_time(*self);
    }

    #[inline]
    fn wire_size(&self) -> usize {
        std::mem::size_of::<i64>()
    }
}

impl Unpack for i64 {
    #[inline]
    fn unpack_from(buf: &mut Buffer) -> Result<Self, Error> {
        buf.unpack_time()
    }
}

// Byte strings travel length-prefixed.
impl Pack for Vec<u8> {
    #[inline]
    fn pack_into(&self, buf: &mut Buffer) {
        buf.pack_mem(self);
    }

    #[inline]
    fn wire_size(&self) -> usize {
        2 + self.len()
    }
}

impl Unpack for Vec<u8> {
    #[inline]
    fn unpack_from(buf: &mut Buffer) -> Result<Self, Error> {
        buf.unpack_mem()
    }
}

impl Buffer {
    /// Appends a 16-bit count prefix followed by each element.
    ///
    /// Panics if there are more than 65 535 elements.
    pub fn pack_array<T: Pack>(&mut self, vals: &[T]) {
        let count = u16::try_from(vals.len()).expect("array length exceeds u16");
        self.pack_u16(count);
        for val in vals {
            val.pack_into(self);
        }
    }

    /// Unpacks a counted array, allocating a vector sized to the decoded
    /// count. An empty array decodes to an empty vector.
    ///
    /// On any failure (truncated count or truncated element) the cursor is
    /// restored to where the array began.
    pub fn unpack_array<T: Unpack>(&mut self) -> Result<Vec<T>, Error> {
        self.restore_on_err(|b| {
            let count = b.unpack_u16()? as usize;
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                out.push(T::unpack_from(b)?);
            }
            Ok(out)
        })
    }
}
