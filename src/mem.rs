//! Length-prefixed byte strings and string arrays.
//!
//! A byte string travels as a 16-bit big-endian length prefix followed by
//! that many raw bytes, with no terminator; the prefix width caps payloads
//! at 65 535 bytes. Because the prefix bounds every decode-side allocation
//! at 64 KiB, untrusted input cannot force an oversized allocation.
//!
//! Unpacking offers three ownership variants over the same prefix decode:
//! a zero-copy view into the store, a copy into a caller-supplied
//! destination, and a copy into a new owned allocation.

use crate::{buffer::Buffer, error::Error};

impl Buffer {
    /// Appends a 16-bit length prefix followed by `val`, growing the store
    /// if needed. A zero-length payload writes the prefix only.
    ///
    /// Panics if `val` is longer than 65 535 bytes; the prefix width is a
    /// hard limit the caller must respect.
    pub fn pack_mem(&mut self, val: &[u8]) {
        let len = u16::try_from(val.len()).expect("payload length exceeds u16");
        self.ensure(2 + val.len());
        self.pack_u16(len);
        self.put(val);
    }

    /// Unpacks a byte string as a borrow directly into the store (zero
    /// copy). A zero-length payload yields an empty slice.
    ///
    /// The view is tied to the buffer's borrow, so it cannot outlive the
    /// buffer or survive a subsequent pack operation (growth may
    /// reallocate the store):
    ///
    /// ```compile_fail
    /// use packbuf::Buffer;
    ///
    /// let mut buf = Buffer::from_vec(vec![0x00, 0x02, b'a', b'b']);
    /// let view = buf.unpack_mem_view().unwrap();
    /// buf.pack_u32(7); // may reallocate the store
    /// assert_eq!(view, b"ab"); // does not compile
    /// ```
    pub fn unpack_mem_view(&mut self) -> Result<&[u8], Error> {
        let start = self.position();
        let len = self.unpack_u16()? as usize;
        if self.remaining() < len {
            self.set_position(start);
            return Err(Error::EndOfBuffer);
        }
        self.take(len)
    }

    /// Unpacks a byte string into a caller-supplied destination, returning
    /// the payload length. A zero-length payload leaves `dst` untouched
    /// and returns 0.
    ///
    /// Fails with [`Error::LengthExceeded`] if `dst` is too small for the
    /// decoded payload; on any failure the cursor is restored and `dst` is
    /// untouched.
    pub fn unpack_mem_into(&mut self, dst: &mut [u8]) -> Result<usize, Error> {
        self.restore_on_err(|b| {
            let len = b.unpack_u16()? as usize;
            if len > dst.len() {
                return Err(Error::LengthExceeded(len, dst.len()));
            }
            let src = b.take(len)?;
            dst[..len].copy_from_slice(src);
            Ok(len)
        })
    }

    /// Unpacks a byte string into a new owned allocation. A zero-length
    /// payload yields an empty vector.
    pub fn unpack_mem(&mut self) -> Result<Vec<u8>, Error> {
        self.restore_on_err(|b| {
            let len = b.unpack_u16()? as usize;
            Ok(b.take(len)?.to_vec())
        })
    }

    /// Appends a 16-bit count prefix followed by each element as a byte
    /// string.
    ///
    /// Panics if there are more than 65 535 elements, or if any element is
    /// longer than 65 535 bytes.
    pub fn pack_str_array<S: AsRef<[u8]>>(&mut self, vals: &[S]) {
        let count = u16::try_from(vals.len()).expect("array length exceeds u16");
        self.pack_u16(count);
        for val in vals {
            self.pack_mem(val.as_ref());
        }
    }

    /// Unpacks an array of byte strings packed by [`Buffer::pack_str_array`].
    ///
    /// The returned vector carries the decoded count; no sentinel entry is
    /// appended.
    pub fn unpack_str_array(&mut self) -> Result<Vec<Vec<u8>>, Error> {
        self.restore_on_err(|b| {
            let count = b.unpack_u16()? as usize;
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                out.push(b.unpack_mem()?);
            }
            Ok(out)
        })
    }
}
