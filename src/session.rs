//! Per-connection protocol state.

use std::net::SocketAddr;

use serde_json::json;

use crate::{
    error::{KickReason, SessionError},
    proto::{
        KeepAliveS2c, LoginDisconnectS2c, PacketEncode, PacketEncoder, PacketState,
        PlayDisconnectS2c, ProtoError, Uuid,
    },
    registry::{OnlinePlayer, PlayerRegistry},
};

/// Mutable record owned by exactly one connection task.
///
/// Handlers queue outbound packets here; the connection driver drains them
/// with [`Session::take_outbound`] after every inbound packet.
pub struct Session {
    peer: SocketAddr,
    state: PacketState,
    protocol: i32,
    server_address: String,
    server_port: u16,
    name: Option<String>,
    identity: Option<Uuid>,
    pending_keepalive: i32,
    outbound: PacketEncoder,
    closing: bool,
    registered: bool,
}

impl Session {
    pub fn new(peer: SocketAddr) -> Self {
        Self {
            peer,
            state: PacketState::Handshaking,
            protocol: 0,
            server_address: String::new(),
            server_port: 0,
            name: None,
            identity: None,
            pending_keepalive: 0,
            outbound: PacketEncoder::new(),
            closing: false,
            registered: false,
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn state(&self) -> PacketState {
        self.state
    }

    /// Protocol version declared in the handshake, 0 before it.
    pub fn protocol(&self) -> i32 {
        self.protocol
    }

    /// Address and port the client says it dialed.
    pub fn requested_host(&self) -> (&str, u16) {
        (&self.server_address, self.server_port)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn identity(&self) -> Option<Uuid> {
        self.identity
    }

    /// Outstanding keepalive token, 0 when none.
    pub fn pending_keepalive(&self) -> i32 {
        self.pending_keepalive
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Moves the state machine forward. States never regress.
    pub fn advance(&mut self, next: PacketState) -> Result<(), SessionError> {
        if !self.state.can_advance_to(next) {
            return Err(SessionError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    pub(crate) fn record_handshake(&mut self, protocol: i32, address: String, port: u16) {
        self.protocol = protocol;
        self.server_address = address;
        self.server_port = port;
    }

    /// Queues `pkt`. Packets only go out in the state they belong to.
    pub fn send<P: PacketEncode>(&mut self, pkt: &P) -> Result<(), SessionError> {
        if P::STATE != self.state {
            return Err(ProtoError::WrongState {
                packet: P::STATE,
                session: self.state,
            }
            .into());
        }
        self.outbound.write_packet(pkt)?;
        Ok(())
    }

    pub fn has_outbound(&self) -> bool {
        !self.outbound.is_empty()
    }

    pub fn take_outbound(&mut self) -> Vec<u8> {
        self.outbound.take()
    }

    /// Queues the disconnect packet for the current state, if it has one, and
    /// marks the session for closing. Encoding failures are ignored.
    pub fn disconnect(&mut self, reason: &str) {
        let component = json!({ "text": reason }).to_string();
        let _ = match self.state {
            PacketState::Login => self.send(&LoginDisconnectS2c { reason: component }),
            PacketState::Play => self.send(&PlayDisconnectS2c { reason: component }),
            PacketState::Handshaking | PacketState::Status => Ok(()),
        };
        self.closing = true;
    }

    /// Disconnects with `reason` and returns the error that ends the session.
    #[must_use]
    pub fn kick(&mut self, reason: KickReason) -> SessionError {
        self.disconnect(reason.message());
        SessionError::Kicked(reason)
    }

    /// Sends a keepalive probe and remembers its token. `id` must be nonzero.
    pub fn issue_keepalive(&mut self, id: i32) -> Result<(), SessionError> {
        debug_assert_ne!(id, 0, "0 means no keepalive is outstanding");
        self.send(&KeepAliveS2c { id })?;
        self.pending_keepalive = id;
        Ok(())
    }

    pub(crate) fn clear_keepalive(&mut self) {
        self.pending_keepalive = 0;
    }

    /// Claims an online slot for `name` under `identity`, at most `cap`
    /// players in total. The session only takes on the player once the
    /// registry has accepted it; on refusal nothing changes.
    pub fn register(
        &mut self,
        registry: &PlayerRegistry,
        name: String,
        identity: Uuid,
        cap: Option<usize>,
    ) -> bool {
        if self.registered {
            return false;
        }
        let player = OnlinePlayer {
            name: name.clone(),
            address: self.peer,
        };
        if !registry.try_register(identity, player, cap) {
            return false;
        }
        self.name = Some(name);
        self.identity = Some(identity);
        self.registered = true;
        true
    }

    pub fn unregister(&mut self, registry: &PlayerRegistry) {
        if !self.registered {
            return;
        }
        if let Some(identity) = self.identity {
            registry.unregister(&identity);
        }
        self.registered = false;
    }
}
