//! End-to-end wire contract tests: a producer packs a message field by
//! field, a consumer unpacks the same sequence from the raw bytes.

use packbuf::{Buffer, Error, Unpack};

#[test]
fn test_reference_scenario() {
    // Pack a u16 and a byte string into a buffer too small for both; the
    // exact wire bytes are fixed by the protocol.
    let mut buf = Buffer::with_capacity(4);
    buf.pack_u16(300);
    buf.pack_mem(b"ab");
    let wire = buf.freeze();
    assert_eq!(&wire[..], &[0x01, 0x2C, 0x00, 0x02, 0x61, 0x62]);

    let mut rd = Buffer::from_vec(wire.to_vec());
    assert_eq!(rd.unpack_u16().unwrap(), 300);
    assert_eq!(rd.unpack_mem().unwrap(), b"ab");
    assert!(matches!(rd.unpack_u16(), Err(Error::EndOfBuffer)));
}

#[test]
fn test_message_round_trip() {
    // A representative control message: id, flags, submit time, node
    // names, a credential blob, and a task-count array.
    let nodes = [b"node[0-3]".to_vec(), b"node7".to_vec()];
    let cred = vec![0xC5u8; 512];
    let tasks = [4u32, 4, 4, 4, 1];

    let mut buf = Buffer::with_capacity(64);
    buf.pack_u32(81_234);
    buf.pack_u16(0x0003);
    buf.pack_time(1_700_000_000);
    buf.pack_str_array(&nodes);
    buf.pack_mem(&cred);
    buf.pack_array(&tasks);

    let mut rd = Buffer::from_vec(buf.freeze().to_vec());
    assert_eq!(rd.unpack_u32().unwrap(), 81_234);
    assert_eq!(rd.unpack_u16().unwrap(), 0x0003);
    assert_eq!(rd.unpack_time().unwrap(), 1_700_000_000);
    assert_eq!(rd.unpack_str_array().unwrap(), nodes);
    assert_eq!(rd.unpack_mem().unwrap(), cred);
    assert_eq!(rd.unpack_array::<u32>().unwrap(), tasks);
    assert_eq!(rd.remaining(), 0);
}

#[test]
fn test_truncation_then_retry() {
    // Every field type must fail cleanly on a truncated stream and decode
    // successfully once the missing bytes arrive.
    let mut buf = Buffer::with_capacity(16);
    buf.pack_u32(0xDEADBEEF);
    buf.pack_mem(b"payload");
    let wire = buf.freeze().to_vec();

    for cut in 0..wire.len() {
        let mut rd = Buffer::from_vec(wire[..cut].to_vec());
        let u32_ok = rd.unpack_u32().is_ok();
        if !u32_ok {
            assert_eq!(rd.position(), 0);
            continue;
        }
        let before = rd.position();
        if rd.unpack_mem().is_err() {
            assert_eq!(rd.position(), before);
        }
    }

    // Full stream decodes.
    let mut rd = Buffer::from_vec(wire);
    assert_eq!(rd.unpack_u32().unwrap(), 0xDEADBEEF);
    assert_eq!(rd.unpack_mem().unwrap(), b"payload");
}

#[test]
fn test_growth_across_many_fields() {
    // Start from a zero-capacity buffer and pack until well past several
    // growth steps; the final byte stream must equal the concatenation of
    // every field in order.
    let mut buf = Buffer::with_capacity(0);
    let mut expected = Vec::new();
    for i in 0..4096u32 {
        buf.pack_u32(i);
        expected.extend_from_slice(&i.to_be_bytes());
    }
    let blob = vec![0xA7u8; 10_000];
    buf.pack_mem(&blob);
    expected.extend_from_slice(&(10_000u16.to_be_bytes()));
    expected.extend_from_slice(&blob);

    assert_eq!(&buf.freeze()[..], &expected[..]);
}

#[test]
fn test_unpack_all_rejects_trailing_bytes() {
    let mut buf = Buffer::with_capacity(8);
    buf.pack_mem(b"ok");
    let mut wire = buf.freeze().to_vec();
    assert_eq!(Vec::<u8>::unpack_all(wire.clone()).unwrap(), b"ok");

    wire.extend_from_slice(&[0x00, 0x00]);
    assert!(matches!(
        Vec::<u8>::unpack_all(wire),
        Err(Error::ExtraData(2))
    ));
}

#[test]
fn test_resumed_consumption() {
    // A consumer that has already processed a framing header can set the
    // cursor past it and unpack the body.
    let mut buf = Buffer::with_capacity(16);
    buf.pack_u32(0x11223344); // header written by another layer
    buf.pack_u16(77);
    let wire = buf.freeze().to_vec();

    let mut rd = Buffer::from_vec(wire);
    rd.set_position(4);
    assert_eq!(rd.unpack_u16().unwrap(), 77);
}

#[test]
fn test_transport_handoff() {
    // A transport that wants to own the serialized bytes takes the store
    // directly; the packed length travels separately.
    let mut buf = Buffer::with_capacity(32);
    buf.pack_u16(5);
    let packed = buf.position();
    let store = buf.into_store();
    assert_eq!(&store[..packed], &[0x00, 0x05]);
}
