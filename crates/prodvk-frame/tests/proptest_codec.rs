//! Property tests for command and response framing.

use bytes::{Bytes, BytesMut};
use prodvk_frame::{
    decode_response, encode_command, CommandFrame, DeviceSlot, FrameError, HEADER_SIZE,
    MAX_ARGUMENT_LEN,
};
use proptest::prelude::*;

fn slot() -> impl Strategy<Value = DeviceSlot> {
    prop_oneof![Just(DeviceSlot::Ref), Just(DeviceSlot::Dut)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The length byte always equals 3 + argument count and the frame is
    /// exactly header plus arguments.
    #[test]
    fn prop_length_field_matches_arguments(
        subcmd in any::<u8>(),
        seq in any::<u8>(),
        slot in slot(),
        args in proptest::collection::vec(any::<u8>(), 0..=MAX_ARGUMENT_LEN),
    ) {
        let frame = CommandFrame::testop(subcmd, slot, args.clone()).with_sequence(seq);
        let mut buf = BytesMut::new();
        encode_command(&frame, &mut buf).unwrap();

        prop_assert_eq!(buf.len(), HEADER_SIZE + args.len());
        prop_assert_eq!(usize::from(buf[1]), 3 + args.len());
        prop_assert_eq!(buf[2], subcmd);
        prop_assert_eq!(buf[3], seq);
        prop_assert_eq!(buf[4], slot.code());
        prop_assert_eq!(&buf[HEADER_SIZE..], args.as_slice());
    }

    /// Decoding never panics, whatever the board sends.
    #[test]
    fn prop_decode_total(packet in proptest::collection::vec(any::<u8>(), 0..=64)) {
        match decode_response(&packet) {
            Ok(frame) => {
                prop_assert!(packet.len() >= HEADER_SIZE);
                prop_assert!(frame.length >= 3);
                prop_assert!(frame.detail.len() <= usize::from(frame.length) - 3);
                prop_assert!(frame.detail.len() <= packet.len() - HEADER_SIZE);
            }
            Err(FrameError::Truncated { len, .. }) => prop_assert!(len < HEADER_SIZE),
            Err(FrameError::InvalidLength(len)) => prop_assert!(len < 3),
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    /// Detail is exactly the claimed bytes when the packet carries them all.
    #[test]
    fn prop_detail_follows_length_field(
        detail in proptest::collection::vec(any::<u8>(), 0..=59),
        error_code in any::<u8>(),
    ) {
        let mut packet = vec![0x20, 3 + detail.len() as u8, 0x06, 0x02, error_code];
        packet.extend_from_slice(&detail);
        packet.resize(64, 0);

        let frame = decode_response(&packet).unwrap();
        prop_assert_eq!(frame.detail, Bytes::from(detail));
        prop_assert_eq!(frame.error_code, error_code);
    }
}
