//! Buffer lifecycle, growth, and raw block operations.

use crate::error::Error;
use bytes::{Bytes, BytesMut};

/// Headroom added to the store when a pack operation outgrows it.
///
/// Payload writes larger than this grow by the payload size plus one unit,
/// so a single oversized byte string still leaves room to amortize the
/// small fixed-width packs that typically follow it.
pub const GROWTH_UNIT: usize = 4096;

/// An owned, growable byte region with a single pack/unpack cursor.
///
/// A producer packs a fixed sequence of fields into a `Buffer` and hands
/// the result to a transport via [`Buffer::freeze`]; a consumer wraps the
/// received bytes with [`Buffer::from_vec`] and unpacks the same sequence.
/// Field identity is positional: no type tags or schema metadata appear on
/// the wire, so encoder and decoder must agree on the call sequence.
///
/// The buffer is a move-only owning handle. Ownership transfer
/// ([`Buffer::into_store`], [`Buffer::freeze`]) consumes the handle, so a
/// released store can never be reached through a stale `Buffer`.
pub struct Buffer {
    store: BytesMut,
    cursor: usize,
}

impl Buffer {
    /// Creates a buffer with a freshly owned, zeroed store of `capacity`
    /// bytes and the cursor at 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: BytesMut::zeroed(capacity),
            cursor: 0,
        }
    }

    /// Wraps caller-owned bytes without copying them.
    ///
    /// The resulting buffer has capacity `data.len()` and the cursor at 0,
    /// ready for unpacking from the beginning. Use [`Buffer::set_position`]
    /// to resume consumption partway through.
    pub fn from_vec(data: Vec<u8>) -> Self {
        // Bytes::from(Vec) takes the allocation as-is, and BytesMut::from
        // reclaims it from the unique handle, so no copy is made.
        Self {
            store: BytesMut::from(Bytes::from(data)),
            cursor: 0,
        }
    }

    /// Total allocated length of the store.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Count of bytes already written (packing) or consumed (unpacking).
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to `pos`.
    ///
    /// Panics if `pos` exceeds the capacity; an out-of-range cursor is a
    /// programming error, not a data error.
    pub fn set_position(&mut self, pos: usize) {
        assert!(
            pos <= self.store.len(),
            "position {pos} exceeds capacity {}",
            self.store.len()
        );
        self.cursor = pos;
    }

    /// Unconsumed (or unwritten) bytes: `capacity - position`.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.store.len() - self.cursor
    }

    /// Consumes the buffer and returns the packed prefix `store[..position]`
    /// as an immutable handle, discarding unwritten capacity.
    pub fn freeze(self) -> Bytes {
        let mut store = self.store;
        store.truncate(self.cursor);
        store.freeze()
    }

    /// Consumes the buffer and hands the raw store (including unwritten
    /// capacity) to the caller.
    pub fn into_store(self) -> BytesMut {
        self.store
    }

    /// Grows the store until at least `needed` bytes remain past the cursor.
    ///
    /// Growth zero-fills new capacity, preserves previously written bytes,
    /// and never moves the cursor. It cannot fail: an allocation failure
    /// aborts, matching the "packing never fails" contract.
    pub(crate) fn ensure(&mut self, needed: usize) {
        if self.remaining() >= needed {
            return;
        }
        let grow = if needed > GROWTH_UNIT {
            needed + GROWTH_UNIT
        } else {
            GROWTH_UNIT
        };
        let new_len = self.store.len() + grow;
        self.store.resize(new_len, 0);
    }

    /// Copies `src` into the store at the cursor, growing first if needed.
    pub(crate) fn put(&mut self, src: &[u8]) {
        self.ensure(src.len());
        self.store[self.cursor..self.cursor + src.len()].copy_from_slice(src);
        self.cursor += src.len();
    }

    /// Returns the next `len` unconsumed bytes and advances the cursor, or
    /// fails with the cursor unchanged if fewer than `len` remain.
    pub(crate) fn take(&mut self, len: usize) -> Result<&[u8], Error> {
        if self.remaining() < len {
            return Err(Error::EndOfBuffer);
        }
        let out = &self.store[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(out)
    }

    /// Runs a compound unpack, restoring the cursor to its starting value
    /// if any step fails. A caller that sees an error may append the
    /// missing bytes and retry the whole operation.
    pub(crate) fn restore_on_err<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let start = self.cursor;
        let out = op(self);
        if out.is_err() {
            self.cursor = start;
        }
        out
    }

    /// Appends `src` verbatim, with no length prefix. The consumer must
    /// know the block length out-of-band.
    pub fn pack_raw(&mut self, src: &[u8]) {
        self.put(src);
    }

    /// Copies exactly `dst.len()` raw bytes into `dst`.
    ///
    /// Fails with [`Error::EndOfBuffer`] if fewer bytes remain, leaving
    /// both the cursor and `dst` untouched.
    pub fn unpack_raw(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        let src = self.take(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Zero-copy variant of [`Buffer::unpack_raw`]: borrows the next `len`
    /// bytes directly from the store.
    ///
    /// The view borrows the buffer, so it cannot outlive it or survive a
    /// subsequent pack operation (which may grow and reallocate the store).
    pub fn unpack_raw_view(&mut self, len: usize) -> Result<&[u8], Error> {
        self.take(len)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let buf = Buffer::with_capacity(16);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.remaining(), 16);

        let buf = Buffer::from_vec(vec![1, 2, 3]);
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.remaining(), 3);
    }

    #[test]
    fn test_from_vec_wraps_contents() {
        let data: Vec<u8> = (0..=255).collect();
        let mut buf = Buffer::from_vec(data.clone());
        assert_eq!(buf.capacity(), data.len());
        assert_eq!(buf.unpack_raw_view(data.len()).unwrap(), &data[..]);
        assert_eq!(buf.into_store()[..], data[..]);
    }

    #[test]
    fn test_set_position() {
        let mut buf = Buffer::from_vec(vec![0xAA, 0xBB, 0xCC]);
        buf.set_position(2);
        assert_eq!(buf.unpack_u8().unwrap(), 0xCC);
    }

    #[test]
    #[should_panic(expected = "position 4 exceeds capacity 3")]
    fn test_set_position_out_of_bounds() {
        let mut buf = Buffer::from_vec(vec![0; 3]);
        buf.set_position(4);
    }

    #[test]
    fn test_freeze_truncates_to_packed() {
        let mut buf = Buffer::with_capacity(64);
        buf.pack_u16(0x0102);
        let wire = buf.freeze();
        assert_eq!(wire, Bytes::from_static(&[0x01, 0x02]));
    }

    #[test]
    fn test_into_store_keeps_capacity() {
        let mut buf = Buffer::with_capacity(8);
        buf.pack_u8(0xFF);
        let store = buf.into_store();
        assert_eq!(store.len(), 8);
        assert_eq!(store[0], 0xFF);
    }

    #[test]
    fn test_growth_preserves_content() {
        let mut buf = Buffer::with_capacity(2);
        buf.pack_u16(0xBEEF);
        // Next write does not fit; the store must grow without disturbing
        // previously packed bytes.
        buf.pack_u32(0x01020304);
        assert!(buf.capacity() >= 6);
        let wire = buf.freeze();
        assert_eq!(wire, Bytes::from_static(&[0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04]));
    }

    #[test]
    fn test_growth_oversized_payload() {
        let mut buf = Buffer::with_capacity(4);
        let payload = vec![0x5A; GROWTH_UNIT + 100];
        buf.pack_raw(&payload);
        // One unit of headroom beyond the payload itself.
        assert!(buf.remaining() >= GROWTH_UNIT);
        assert_eq!(&buf.freeze()[..], &payload[..]);
    }

    #[test]
    fn test_raw_round_trip() {
        let mut buf = Buffer::with_capacity(8);
        buf.pack_raw(&[1, 2, 3, 4]);
        let mut rd = Buffer::from_vec(buf.freeze().to_vec());
        let mut dst = [0u8; 4];
        rd.unpack_raw(&mut dst).unwrap();
        assert_eq!(dst, [1, 2, 3, 4]);
        assert_eq!(rd.remaining(), 0);
    }

    #[test]
    fn test_unpack_raw_insufficient_leaves_dst() {
        let mut rd = Buffer::from_vec(vec![1, 2]);
        let mut dst = [0xEEu8; 4];
        assert!(matches!(rd.unpack_raw(&mut dst), Err(Error::EndOfBuffer)));
        assert_eq!(rd.position(), 0);
        assert_eq!(dst, [0xEE; 4]);
    }

    #[test]
    fn test_unpack_raw_view() {
        let mut rd = Buffer::from_vec(vec![9, 8, 7]);
        assert_eq!(rd.unpack_raw_view(2).unwrap(), &[9, 8]);
        assert_eq!(rd.remaining(), 1);
        assert!(matches!(rd.unpack_raw_view(2), Err(Error::EndOfBuffer)));
        assert_eq!(rd.remaining(), 1);
    }

    #[test]
    fn test_buffer_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Buffer>();
    }
}
