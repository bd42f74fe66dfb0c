#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use packbuf::{Buffer, Error};

const MAX_PREFIX: usize = u16::MAX as usize;

#[derive(Arbitrary, Debug)]
enum Field<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    Time(i64),
    Mem(&'a [u8]),
    U32Array(Vec<u32>),
    StrArray(Vec<Vec<u8>>),
    Raw(&'a [u8]),
}

impl Field<'_> {
    /// Whether the field fits the 16-bit length/count prefixes; oversized
    /// inputs are a caller-contract violation (they panic), not a wire
    /// property, so the fuzzer skips them.
    fn packable(&self) -> bool {
        match self {
            Field::Mem(v) => v.len() <= MAX_PREFIX,
            Field::U32Array(v) => v.len() <= MAX_PREFIX,
            Field::StrArray(v) => {
                v.len() <= MAX_PREFIX && v.iter().all(|s| s.len() <= MAX_PREFIX)
            }
            _ => true,
        }
    }

    fn pack(&self, buf: &mut Buffer) {
        match self {
            Field::U8(v) => buf.pack_u8(*v),
            Field::U16(v) => buf.pack_u16(*v),
            Field::U32(v) => buf.pack_u32(*v),
            Field::Time(v) => buf.pack_time(*v),
            Field::Mem(v) => buf.pack_mem(v),
            Field::U32Array(v) => buf.pack_array(v),
            Field::StrArray(v) => buf.pack_str_array(v),
            Field::Raw(v) => buf.pack_raw(v),
        }
    }

    fn unpack_and_check(&self, buf: &mut Buffer) {
        match self {
            Field::U8(v) => assert_eq!(buf.unpack_u8().unwrap(), *v),
            Field::U16(v) => assert_eq!(buf.unpack_u16().unwrap(), *v),
            Field::U32(v) => assert_eq!(buf.unpack_u32().unwrap(), *v),
            Field::Time(v) => assert_eq!(buf.unpack_time().unwrap(), *v),
            Field::Mem(v) => assert_eq!(buf.unpack_mem().unwrap(), *v),
            Field::U32Array(v) => assert_eq!(&buf.unpack_array::<u32>().unwrap(), v),
            Field::StrArray(v) => assert_eq!(&buf.unpack_str_array().unwrap(), v),
            Field::Raw(v) => {
                let mut dst = vec![0u8; v.len()];
                buf.unpack_raw(&mut dst).unwrap();
                assert_eq!(&dst[..], *v);
            }
        }
    }
}

fuzz_target!(|fields: Vec<Field>| {
    let fields: Vec<_> = fields.iter().filter(|f| f.packable()).collect();

    // Pack every field in sequence, starting from a deliberately small
    // buffer so growth paths are exercised constantly.
    let mut buf = Buffer::with_capacity(16);
    for field in &fields {
        field.pack(&mut buf);
    }
    let wire = buf.freeze();

    // Unpack the same sequence and compare field by field.
    let mut rd = Buffer::from_vec(wire.to_vec());
    for field in &fields {
        field.unpack_and_check(&mut rd);
    }
    assert_eq!(rd.remaining(), 0);

    // A truncated stream must error without advancing the cursor past the
    // failure point, never panic.
    if !wire.is_empty() {
        let mut rd = Buffer::from_vec(wire[..wire.len() - 1].to_vec());
        for field in &fields {
            let before = rd.position();
            let result: Result<(), Error> = match field {
                Field::U8(_) => rd.unpack_u8().map(drop),
                Field::U16(_) => rd.unpack_u16().map(drop),
                Field::U32(_) => rd.unpack_u32().map(drop),
                Field::Time(_) => rd.unpack_time().map(drop),
                Field::Mem(_) => rd.unpack_mem().map(drop),
                Field::U32Array(_) => rd.unpack_array::<u32>().map(drop),
                Field::StrArray(_) => rd.unpack_str_array().map(drop),
                Field::Raw(v) => {
                    let mut dst = vec![0u8; v.len()];
                    rd.unpack_raw(&mut dst)
                }
            };
            if result.is_err() {
                assert_eq!(rd.position(), before);
                break;
            }
        }
    }
});
