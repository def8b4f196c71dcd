//! Wire protocol for the handshake, status, login, and join-game slice.

mod error;
mod io;
mod packets;
mod state;
mod types;
mod varint;

#[cfg(test)]
mod tests;

pub use error::{ProtoError, Result};
pub use packets::{
    HandshakeC2s, JoinGameS2c, KeepAliveC2s, KeepAliveS2c, LoginDisconnectS2c, LoginStartC2s,
    LoginSuccessS2c, PlayDisconnectS2c, ServerboundPacket, StatusPingC2s, StatusPongS2c,
    StatusRequestC2s, StatusResponseS2c,
};
pub use state::{HandshakeNextState, PacketState};
pub use types::{
    encode_packet, encode_raw_packet, Difficulty, Dimension, Gamemode, LevelType, PacketDecode,
    PacketDecoder, PacketEncode, PacketEncoder, PacketFrame, Uuid, MAX_PACKET_SIZE,
};
pub use varint::{read_varint, varint_len, write_varint};
pub use io::{read_string_bounded, write_string_bounded};
