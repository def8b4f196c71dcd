//! Side effects of serverbound packets.

mod handshake;
mod login;
mod play;
mod status;

pub use status::StatusPayload;

use crate::{context::ServerContext, error::SessionError, proto::ServerboundPacket, session::Session};

/// Applies a decoded serverbound packet to its session.
///
/// Responses are queued on the session; an `Err` ends the connection.
pub trait Handle {
    fn handle(self, session: &mut Session, server: &ServerContext) -> Result<(), SessionError>;
}

impl Handle for ServerboundPacket {
    fn handle(self, session: &mut Session, server: &ServerContext) -> Result<(), SessionError> {
        match self {
            ServerboundPacket::Handshake(packet) => packet.handle(session, server),
            ServerboundPacket::StatusRequest(packet) => packet.handle(session, server),
            ServerboundPacket::StatusPing(packet) => packet.handle(session, server),
            ServerboundPacket::LoginStart(packet) => packet.handle(session, server),
            ServerboundPacket::KeepAlive(packet) => packet.handle(session, server),
        }
    }
}
