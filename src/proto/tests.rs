use super::{
    error::ProtoError,
    io::{
        read_bool, read_string_bounded, read_u16_be, read_u32_be, read_u64_be, write_string_bounded,
        write_u16_be, write_u64_be,
    },
    packets::{HandshakeC2s, JoinGameS2c, LoginSuccessS2c, StatusPingC2s},
    state::{HandshakeNextState, PacketState},
    types::{
        Difficulty, Dimension, Gamemode, LevelType, PacketDecode, PacketDecoder, PacketEncode,
        PacketEncoder, Uuid, MAX_PACKET_SIZE,
    },
    varint::{read_varint, varint_len, write_varint},
};

fn frame_of<P: PacketEncode>(packet: &P) -> Vec<u8> {
    let mut enc = PacketEncoder::new();
    enc.write_packet(packet).unwrap();
    enc.take()
}

fn roundtrip<P: PacketEncode + PacketDecode>(packet: &P) -> P {
    let bytes = frame_of(packet);
    let mut dec = PacketDecoder::new();
    dec.queue_slice(&bytes);
    let frame = dec.try_next_packet().unwrap().unwrap();
    assert_eq!(frame.id, <P as PacketDecode>::ID);
    let mut body = frame.body.as_slice();
    let decoded = P::decode_body(&mut body).unwrap();
    assert!(body.is_empty());
    decoded
}

#[test]
fn varint_roundtrip() {
    let values = [0, 1, 2, 127, 128, 255, 25_565, 2_097_151, 2_147_483_647, -1];
    for value in values {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        assert_eq!(buf.len(), varint_len(value));
        let mut slice = buf.as_slice();
        let decoded = read_varint(&mut slice).unwrap();
        assert_eq!(decoded, value);
        assert!(slice.is_empty());
    }
}

#[test]
fn varint_known_encodings() {
    let mut buf = Vec::new();
    write_varint(&mut buf, 300);
    assert_eq!(buf, [0xac, 0x02]);

    buf.clear();
    write_varint(&mut buf, i32::MAX);
    assert_eq!(buf, [0xff, 0xff, 0xff, 0xff, 0x07]);
}

#[test]
fn varint_with_fifth_continuation_bit_is_malformed() {
    let mut input: &[u8] = &[0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
    assert_eq!(read_varint(&mut input), Err(ProtoError::MalformedVarInt));

    let mut input: &[u8] = &[0xff, 0xff, 0xff, 0xff, 0x8f];
    assert_eq!(read_varint(&mut input), Err(ProtoError::MalformedVarInt));
}

#[test]
fn varint_cut_short_is_truncated() {
    let mut input: &[u8] = &[0x80, 0x80];
    assert_eq!(read_varint(&mut input), Err(ProtoError::TruncatedPayload));
}

#[test]
fn string_roundtrip() {
    for text in ["", "Typhoon", "héllo 世界 🌀"] {
        let mut buf = Vec::new();
        write_string_bounded(&mut buf, text, 32_767).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(read_string_bounded(&mut slice, 32_767).unwrap(), text);
        assert!(slice.is_empty());
    }
}

#[test]
fn string_longer_than_remaining_bytes_is_truncated() {
    let mut input: &[u8] = &[0x05, b'a', b'b'];
    assert_eq!(
        read_string_bounded(&mut input, 16),
        Err(ProtoError::TruncatedPayload)
    );
}

#[test]
fn string_rejects_bad_utf8_and_negative_length() {
    let mut input: &[u8] = &[0x02, 0xff, 0xfe];
    assert_eq!(read_string_bounded(&mut input, 16), Err(ProtoError::InvalidUtf8));

    let mut buf = Vec::new();
    write_varint(&mut buf, -1);
    let mut input = buf.as_slice();
    assert_eq!(
        read_string_bounded(&mut input, 16),
        Err(ProtoError::NegativeLength(-1))
    );
}

#[test]
fn string_over_bound_fails_to_encode() {
    let mut buf = Vec::new();
    let err = write_string_bounded(&mut buf, "seventeen-chars!!", 16).unwrap_err();
    assert_eq!(err, ProtoError::StringTooLong { max: 16, actual: 17 });
    assert!(buf.is_empty());
}

#[test]
fn bool_is_strict() {
    let mut input: &[u8] = &[0x00, 0x01, 0x02];
    assert!(!read_bool(&mut input).unwrap());
    assert!(read_bool(&mut input).unwrap());
    assert_eq!(read_bool(&mut input), Err(ProtoError::MalformedBool(0x02)));
}

#[test]
fn fixed_width_integers_are_big_endian() {
    let mut buf = Vec::new();
    write_u16_be(&mut buf, 25_565);
    write_u64_be(&mut buf, 0x0102_0304_0506_0708);
    assert_eq!(buf, [0x63, 0xdd, 1, 2, 3, 4, 5, 6, 7, 8]);

    let mut input = buf.as_slice();
    assert_eq!(read_u16_be(&mut input).unwrap(), 25_565);
    assert_eq!(read_u64_be(&mut input).unwrap(), 0x0102_0304_0506_0708);

    let mut short: &[u8] = &[0, 0, 1];
    assert_eq!(read_u32_be(&mut short), Err(ProtoError::TruncatedPayload));
}

#[test]
fn handshake_roundtrip() {
    let packet = HandshakeC2s {
        protocol_version: 404,
        server_address: "localhost".to_owned(),
        server_port: 25565,
        next_state: HandshakeNextState::Login,
    };
    assert_eq!(roundtrip(&packet), packet);
    assert_eq!(<HandshakeC2s as PacketDecode>::STATE, PacketState::Handshaking);
}

#[test]
fn handshake_rejects_unknown_next_state() {
    let mut body = Vec::new();
    write_varint(&mut body, 404);
    write_string_bounded(&mut body, "localhost", 255).unwrap();
    write_u16_be(&mut body, 25565);
    write_varint(&mut body, 3);

    let mut input = body.as_slice();
    assert_eq!(
        HandshakeC2s::decode_body(&mut input),
        Err(ProtoError::InvalidHandshakeState(3))
    );
}

#[test]
fn status_ping_roundtrip() {
    let packet = StatusPingC2s {
        payload: 1_694_857_600_123,
    };
    assert_eq!(roundtrip(&packet), packet);
}

#[test]
fn join_game_wire_layout() {
    let packet = JoinGameS2c {
        entity_id: 0,
        gamemode: Gamemode::Spectator,
        dimension: Dimension::Overworld,
        difficulty: Difficulty::Normal,
        max_players: 0xFF,
        level_type: LevelType::Default,
        reduced_debug: false,
    };

    let mut expected = vec![21, 0x23, 0, 0, 0, 0, 3, 0, 0, 0, 0, 2, 0xff, 7];
    expected.extend_from_slice(b"default");
    expected.push(0);
    assert_eq!(frame_of(&packet), expected);
    assert_eq!(roundtrip(&packet), packet);
}

#[test]
fn login_success_carries_hyphenated_uuid() {
    let packet = LoginSuccessS2c {
        uuid: Uuid::from_u64s(0x0102_0304_0506_0708, 0x090a_0b0c_0d0e_0f10),
        username: "player".to_owned(),
    };

    let bytes = frame_of(&packet);
    let mut dec = PacketDecoder::new();
    dec.queue_slice(&bytes);
    let frame = dec.try_next_packet().unwrap().unwrap();
    let mut body = frame.body.as_slice();
    assert_eq!(
        read_string_bounded(&mut body, 36).unwrap(),
        "01020304-0506-0708-090a-0b0c0d0e0f10"
    );

    assert_eq!(roundtrip(&packet), packet);
}

#[test]
fn uuid_parse_and_random_version() {
    let uuid: Uuid = "01020304-0506-0708-090A-0b0c0d0e0f10".parse().unwrap();
    assert_eq!(
        uuid,
        Uuid::from_u64s(0x0102_0304_0506_0708, 0x090a_0b0c_0d0e_0f10)
    );
    assert_eq!(
        "0102030405060708090a0b0c0d0e0f10".parse::<Uuid>(),
        Err(ProtoError::InvalidUuid)
    );
    assert_eq!(
        "01020304-0506-0708-090a-0b0c0d0e0fzz".parse::<Uuid>(),
        Err(ProtoError::InvalidUuid)
    );

    let random = Uuid::new_v4();
    assert_eq!(random.version(), 4);
    assert_eq!(random.as_bytes()[8] & 0xc0, 0x80);
    assert_ne!(random, Uuid::new_v4());
}

#[test]
fn decoder_waits_for_complete_frame() {
    let bytes = frame_of(&StatusPingC2s { payload: 7 });
    let (head, tail) = bytes.split_at(4);

    let mut dec = PacketDecoder::new();
    dec.queue_slice(head);
    assert_eq!(dec.try_next_packet().unwrap(), None);
    assert_eq!(dec.pending_len(), 4);

    dec.queue_slice(tail);
    let frame = dec.try_next_packet().unwrap().unwrap();
    assert_eq!(frame.id, 0x01);
    assert_eq!(frame.body, 7u64.to_be_bytes());
    assert_eq!(dec.pending_len(), 0);
}

#[test]
fn decoder_rejects_oversized_frame() {
    let mut bytes = Vec::new();
    write_varint(&mut bytes, (MAX_PACKET_SIZE + 1) as i32);

    let mut dec = PacketDecoder::new();
    dec.queue_slice(&bytes);
    assert_eq!(
        dec.try_next_packet(),
        Err(ProtoError::PacketTooLarge {
            len: MAX_PACKET_SIZE + 1
        })
    );
}
