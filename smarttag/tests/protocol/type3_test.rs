#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use smarttag::Error;
use smarttag::type3::{Type3Responder, attribute_block, num_blocks};

fn record() -> Vec<u8> {
    (0..70u8).collect()
}

#[test]
fn reads_whole_record_block_by_block() {
    common::init_logger();
    let idm = common::fixtures::card_idm();
    let responder = Type3Responder::new(idm);
    let record = record();
    let total = num_blocks(record.len());
    assert_eq!(total, 5);

    let attr = responder
        .respond(&common::fixtures::check_command(&idm, &[0])[1..], &record)
        .unwrap();
    assert_eq!(&attr.response[13..], &attribute_block(record.len()));
    assert!(!attr.read_complete);

    let mut collected = Vec::new();
    for (blocks, last) in [(&[1u8, 2, 3, 4][..], false), (&[5u8][..], true)] {
        let reply = responder
            .respond(&common::fixtures::check_command(&idm, blocks)[1..], &record)
            .unwrap();
        assert_eq!(reply.response[0] as usize, reply.response.len());
        assert_eq!(reply.response[1], 0x07);
        assert_eq!(&reply.response[2..10], idm.as_bytes());
        assert_eq!(reply.response[12] as usize, blocks.len());
        assert_eq!(reply.read_complete, last);
        collected.extend_from_slice(&reply.response[13..]);
    }
    assert_eq!(&collected[..record.len()], &record[..]);
    assert!(collected[record.len()..].iter().all(|&b| b == 0));
}

#[test]
fn block_past_the_record_is_rejected() {
    let idm = common::fixtures::card_idm();
    let responder = Type3Responder::new(idm);
    let cmd = common::fixtures::check_command(&idm, &[6]);
    assert!(matches!(
        responder.respond(&cmd[1..], &record()),
        Err(Error::ProtocolReject(_))
    ));
}

#[test]
fn poll_with_system_code_request() {
    let idm = common::fixtures::card_idm();
    let reply = Type3Responder::new(idm)
        .respond(&[0x00, 0x12, 0xfc, 0x01, 0x00], &record())
        .unwrap();
    assert_eq!(reply.response.len(), 20);
    assert_eq!(reply.response[0], 20);
    assert_eq!(&reply.response[18..], &[0x12, 0xfc]);
}

proptest! {
    #[test]
    fn completion_flag_tracks_last_block(
        len in 1usize..200,
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..=4),
    ) {
        let idm = common::fixtures::card_idm();
        let record: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let total = num_blocks(len);
        // a lone block 0 would be the attribute request
        let blocks: Vec<u8> = picks.iter().map(|p| (p.index(total) + 1) as u8).collect();

        let cmd = common::fixtures::check_command(&idm, &blocks);
        let reply = Type3Responder::new(idm).respond(&cmd[1..], &record).unwrap();
        prop_assert_eq!(reply.read_complete, blocks.contains(&(total as u8)));
        prop_assert_eq!(reply.response.len(), 13 + 16 * blocks.len());
    }

    #[test]
    fn arbitrary_commands_never_panic(cmd in proptest::collection::vec(any::<u8>(), 0..40)) {
        let _ = Type3Responder::new(common::fixtures::card_idm()).respond(&cmd, &record());
    }
}
