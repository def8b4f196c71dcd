use super::{
    error::{ProtoError, Result},
    io::{
        read_bool, read_string_bounded, read_u16_be, read_u32_be, read_u64_be, read_u8,
        write_bool, write_string_bounded, write_u16_be, write_u32_be, write_u64_be, write_u8,
    },
    state::{HandshakeNextState, PacketState},
    types::{Difficulty, Dimension, Gamemode, LevelType, PacketDecode, PacketEncode, Uuid},
    varint::{read_varint, write_varint},
};

const SERVER_ADDRESS_MAX: usize = 255;
const CHAT_MAX: usize = 32_767;
const USERNAME_MAX: usize = 16;
const UUID_STRING_MAX: usize = 36;
const LEVEL_TYPE_MAX: usize = 16;

/// Handshake (C2S) packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeC2s {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: HandshakeNextState,
}

/// Status request (C2S) packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRequestC2s;

/// Status response (S2C) packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponseS2c {
    pub json: String,
}

/// Status ping (C2S) packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPingC2s {
    pub payload: u64,
}

/// Status pong (S2C) packet, the echo of [`StatusPingC2s`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPongS2c {
    pub payload: u64,
}

/// Login start (C2S) packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStartC2s {
    pub username: String,
}

/// Login disconnect (S2C) packet. `reason` is a JSON chat component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDisconnectS2c {
    pub reason: String,
}

/// Login success (S2C) packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccessS2c {
    pub uuid: Uuid,
    pub username: String,
}

/// Play disconnect (S2C) packet. `reason` is a JSON chat component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayDisconnectS2c {
    pub reason: String,
}

/// Keepalive answer (C2S) packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveC2s {
    pub id: i32,
}

/// Keepalive probe (S2C) packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveS2c {
    pub id: i32,
}

/// Join game (S2C) packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGameS2c {
    pub entity_id: u32,
    pub gamemode: Gamemode,
    pub dimension: Dimension,
    pub difficulty: Difficulty,
    pub max_players: u8,
    pub level_type: LevelType,
    pub reduced_debug: bool,
}

/// Any serverbound packet the server understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerboundPacket {
    Handshake(HandshakeC2s),
    StatusRequest(StatusRequestC2s),
    StatusPing(StatusPingC2s),
    LoginStart(LoginStartC2s),
    KeepAlive(KeepAliveC2s),
}

macro_rules! impl_into_serverbound {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ServerboundPacket {
                fn from(packet: $ty) -> Self {
                    ServerboundPacket::$variant(packet)
                }
            }
        )*
    };
}

impl_into_serverbound!(
    Handshake(HandshakeC2s),
    StatusRequest(StatusRequestC2s),
    StatusPing(StatusPingC2s),
    LoginStart(LoginStartC2s),
    KeepAlive(KeepAliveC2s),
);

impl PacketDecode for HandshakeC2s {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Handshaking;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        let protocol_version = read_varint(input)?;
        let server_address = read_string_bounded(input, SERVER_ADDRESS_MAX)?.to_owned();
        let server_port = read_u16_be(input)?;
        let next_state = match read_varint(input)? {
            1 => HandshakeNextState::Status,
            2 => HandshakeNextState::Login,
            other => return Err(ProtoError::InvalidHandshakeState(other)),
        };

        Ok(Self {
            protocol_version,
            server_address,
            server_port,
            next_state,
        })
    }
}

impl PacketEncode for HandshakeC2s {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Handshaking;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_varint(out, self.protocol_version);
        write_string_bounded(out, &self.server_address, SERVER_ADDRESS_MAX)?;
        write_u16_be(out, self.server_port);
        let next = match self.next_state {
            HandshakeNextState::Status => 1,
            HandshakeNextState::Login => 2,
        };
        write_varint(out, next);
        Ok(())
    }
}

impl PacketDecode for StatusRequestC2s {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Status;

    fn decode_body(_input: &mut &[u8]) -> Result<Self> {
        Ok(Self)
    }
}

impl PacketEncode for StatusRequestC2s {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Status;

    fn encode_body(&self, _out: &mut Vec<u8>) -> Result<()> {
        Ok(())
    }
}

impl PacketDecode for StatusResponseS2c {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Status;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            json: read_string_bounded(input, CHAT_MAX)?.to_owned(),
        })
    }
}

impl PacketEncode for StatusResponseS2c {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Status;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_string_bounded(out, &self.json, CHAT_MAX)
    }
}

impl PacketDecode for StatusPingC2s {
    const ID: i32 = 0x01;
    const STATE: PacketState = PacketState::Status;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            payload: read_u64_be(input)?,
        })
    }
}

impl PacketEncode for StatusPingC2s {
    const ID: i32 = 0x01;
    const STATE: PacketState = PacketState::Status;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_u64_be(out, self.payload);
        Ok(())
    }
}

impl PacketDecode for StatusPongS2c {
    const ID: i32 = 0x01;
    const STATE: PacketState = PacketState::Status;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            payload: read_u64_be(input)?,
        })
    }
}

impl PacketEncode for StatusPongS2c {
    const ID: i32 = 0x01;
    const STATE: PacketState = PacketState::Status;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_u64_be(out, self.payload);
        Ok(())
    }
}

impl PacketDecode for LoginStartC2s {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Login;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            username: read_string_bounded(input, USERNAME_MAX)?.to_owned(),
        })
    }
}

impl PacketEncode for LoginStartC2s {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Login;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_string_bounded(out, &self.username, USERNAME_MAX)
    }
}

impl PacketDecode for LoginDisconnectS2c {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Login;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            reason: read_string_bounded(input, CHAT_MAX)?.to_owned(),
        })
    }
}

impl PacketEncode for LoginDisconnectS2c {
    const ID: i32 = 0x00;
    const STATE: PacketState = PacketState::Login;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_string_bounded(out, &self.reason, CHAT_MAX)
    }
}

impl PacketDecode for LoginSuccessS2c {
    const ID: i32 = 0x02;
    const STATE: PacketState = PacketState::Login;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        let uuid = read_string_bounded(input, UUID_STRING_MAX)?.parse()?;
        let username = read_string_bounded(input, USERNAME_MAX)?.to_owned();
        Ok(Self { uuid, username })
    }
}

impl PacketEncode for LoginSuccessS2c {
    const ID: i32 = 0x02;
    const STATE: PacketState = PacketState::Login;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_string_bounded(out, &self.uuid.to_string(), UUID_STRING_MAX)?;
        write_string_bounded(out, &self.username, USERNAME_MAX)
    }
}

impl PacketDecode for PlayDisconnectS2c {
    const ID: i32 = 0x1A;
    const STATE: PacketState = PacketState::Play;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            reason: read_string_bounded(input, CHAT_MAX)?.to_owned(),
        })
    }
}

impl PacketEncode for PlayDisconnectS2c {
    const ID: i32 = 0x1A;
    const STATE: PacketState = PacketState::Play;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_string_bounded(out, &self.reason, CHAT_MAX)
    }
}

impl PacketDecode for KeepAliveC2s {
    const ID: i32 = 0x1F;
    const STATE: PacketState = PacketState::Play;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            id: read_varint(input)?,
        })
    }
}

impl PacketEncode for KeepAliveC2s {
    const ID: i32 = 0x1F;
    const STATE: PacketState = PacketState::Play;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_varint(out, self.id);
        Ok(())
    }
}

impl PacketDecode for KeepAliveS2c {
    const ID: i32 = 0x1F;
    const STATE: PacketState = PacketState::Play;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            id: read_varint(input)?,
        })
    }
}

impl PacketEncode for KeepAliveS2c {
    const ID: i32 = 0x1F;
    const STATE: PacketState = PacketState::Play;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_varint(out, self.id);
        Ok(())
    }
}

impl PacketDecode for JoinGameS2c {
    const ID: i32 = 0x23;
    const STATE: PacketState = PacketState::Play;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            entity_id: read_u32_be(input)?,
            gamemode: Gamemode::try_from(read_u8(input)?)?,
            dimension: Dimension::try_from(read_u32_be(input)?)?,
            difficulty: Difficulty::try_from(read_u8(input)?)?,
            max_players: read_u8(input)?,
            level_type: read_string_bounded(input, LEVEL_TYPE_MAX)?.parse()?,
            reduced_debug: read_bool(input)?,
        })
    }
}

impl PacketEncode for JoinGameS2c {
    const ID: i32 = 0x23;
    const STATE: PacketState = PacketState::Play;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_u32_be(out, self.entity_id);
        write_u8(out, self.gamemode as u8);
        write_u32_be(out, self.dimension as u32);
        write_u8(out, self.difficulty as u8);
        write_u8(out, self.max_players);
        write_string_bounded(out, self.level_type.as_str(), LEVEL_TYPE_MAX)?;
        write_bool(out, self.reduced_debug);
        Ok(())
    }
}
