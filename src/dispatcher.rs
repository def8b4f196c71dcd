//! (state, packet id) → decoder table and the decode → handle step.

use std::collections::HashMap;

use crate::{
    context::ServerContext,
    error::SessionError,
    handler::Handle,
    proto::{
        HandshakeC2s, KeepAliveC2s, LoginStartC2s, PacketDecode, PacketFrame, PacketState,
        ProtoError, Result, ServerboundPacket, StatusPingC2s, StatusRequestC2s,
    },
    session::Session,
};

type Constructor = fn(&mut &[u8]) -> Result<ServerboundPacket>;

fn decode_as<P>(input: &mut &[u8]) -> Result<ServerboundPacket>
where
    P: PacketDecode + Into<ServerboundPacket>,
{
    P::decode_body(input).map(Into::into)
}

/// Decoders for every serverbound packet, keyed by the state it is legal in.
pub struct Dispatcher {
    table: HashMap<(PacketState, i32), Constructor>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let mut dispatcher = Self {
            table: HashMap::new(),
        };
        dispatcher.register::<HandshakeC2s>();
        dispatcher.register::<StatusRequestC2s>();
        dispatcher.register::<StatusPingC2s>();
        dispatcher.register::<LoginStartC2s>();
        dispatcher.register::<KeepAliveC2s>();
        dispatcher
    }

    fn register<P>(&mut self)
    where
        P: PacketDecode + Into<ServerboundPacket>,
    {
        let previous = self
            .table
            .insert((P::STATE, P::ID), decode_as::<P> as Constructor);
        debug_assert!(previous.is_none(), "duplicate packet id in one state");
    }

    pub fn is_legal(&self, state: PacketState, id: i32) -> bool {
        self.table.contains_key(&(state, id))
    }

    /// Decodes `frame` as the packet legal for `state` with its id.
    pub fn decode(&self, state: PacketState, frame: &PacketFrame) -> Result<ServerboundPacket> {
        let constructor = self
            .table
            .get(&(state, frame.id))
            .ok_or(ProtoError::UnknownPacket {
                state,
                id: frame.id,
            })?;

        let mut input = frame.body.as_slice();
        let packet = constructor(&mut input)?;
        if !input.is_empty() {
            return Err(ProtoError::TrailingBytes(input.len()));
        }
        Ok(packet)
    }

    /// Decodes one inbound frame against the session's state and handles it.
    pub fn dispatch(
        &self,
        session: &mut Session,
        server: &ServerContext,
        frame: &PacketFrame,
    ) -> std::result::Result<(), SessionError> {
        let packet = self.decode(session.state(), frame)?;
        packet.handle(session, server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{write_varint, PacketEncode};

    fn frame_of<P: PacketEncode>(packet: &P) -> PacketFrame {
        let mut body = Vec::new();
        packet.encode_body(&mut body).unwrap();
        PacketFrame { id: P::ID, body }
    }

    #[test]
    fn ids_are_resolved_per_state() {
        let dispatcher = Dispatcher::new();
        let ping = frame_of(&StatusPingC2s { payload: 9 });

        assert_eq!(
            dispatcher.decode(PacketState::Status, &ping).unwrap(),
            ServerboundPacket::StatusPing(StatusPingC2s { payload: 9 })
        );
        assert_eq!(
            dispatcher.decode(PacketState::Login, &ping),
            Err(ProtoError::UnknownPacket {
                state: PacketState::Login,
                id: 0x01
            })
        );
    }

    #[test]
    fn play_packet_is_unknown_in_handshaking() {
        let dispatcher = Dispatcher::new();
        let keepalive = frame_of(&KeepAliveC2s { id: 3 });
        assert!(!dispatcher.is_legal(PacketState::Handshaking, keepalive.id));
        assert_eq!(
            dispatcher.decode(PacketState::Handshaking, &keepalive),
            Err(ProtoError::UnknownPacket {
                state: PacketState::Handshaking,
                id: 0x1F
            })
        );
    }

    #[test]
    fn id_zero_means_different_packets() {
        let dispatcher = Dispatcher::new();
        let login = frame_of(&LoginStartC2s {
            username: "Alex".into(),
        });
        assert!(matches!(
            dispatcher.decode(PacketState::Login, &login),
            Ok(ServerboundPacket::LoginStart(_))
        ));
        assert!(matches!(
            dispatcher.decode(PacketState::Status, &PacketFrame { id: 0, body: Vec::new() }),
            Ok(ServerboundPacket::StatusRequest(_))
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let dispatcher = Dispatcher::new();
        let mut frame = frame_of(&KeepAliveC2s { id: 3 });
        write_varint(&mut frame.body, 4);
        assert_eq!(
            dispatcher.decode(PacketState::Play, &frame),
            Err(ProtoError::TrailingBytes(1))
        );
    }
}
