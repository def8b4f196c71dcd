use std::fmt;

/// Connection phase; gates which packet IDs are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketState {
    Handshaking,
    Status,
    Login,
    Play,
}

impl PacketState {
    /// Whether a session may move from `self` to `next`.
    ///
    /// Only Handshaking→Status, Handshaking→Login and Login→Play are legal;
    /// states never regress.
    #[must_use]
    pub const fn can_advance_to(self, next: PacketState) -> bool {
        matches!(
            (self, next),
            (PacketState::Handshaking, PacketState::Status)
                | (PacketState::Handshaking, PacketState::Login)
                | (PacketState::Login, PacketState::Play)
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PacketState::Handshaking => "handshaking",
            PacketState::Status => "status",
            PacketState::Login => "login",
            PacketState::Play => "play",
        }
    }
}

impl fmt::Display for PacketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next state value in the handshake packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeNextState {
    Status,
    Login,
}

impl HandshakeNextState {
    pub const fn as_state(self) -> PacketState {
        match self {
            HandshakeNextState::Status => PacketState::Status,
            HandshakeNextState::Login => PacketState::Login,
        }
    }
}
