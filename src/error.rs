use std::fmt;

use crate::proto::{PacketState, ProtoError};

/// Policy reasons for ending a session, shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickReason {
    IncompatibleVersion,
    ServerFull,
    InvalidKeepalive,
    KeepaliveTimeout,
}

impl KickReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            KickReason::IncompatibleVersion => "Incompatible version",
            KickReason::ServerFull => "Server is full",
            KickReason::InvalidKeepalive => "Invalid keepalive",
            KickReason::KeepaliveTimeout => "Timed out",
        }
    }

    /// Short label for metrics attributes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            KickReason::IncompatibleVersion => "incompatible_version",
            KickReason::ServerFull => "server_full",
            KickReason::InvalidKeepalive => "invalid_keepalive",
            KickReason::KeepaliveTimeout => "keepalive_timeout",
        }
    }
}

impl fmt::Display for KickReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Anything that ends a connection. Every variant is fatal to its session only.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Networking error - {0}")]
    Transport(#[from] std::io::Error),
    #[error("Protocol violation - {0}")]
    Protocol(#[from] ProtoError),
    #[error("Illegal state transition {from} -> {to}")]
    IllegalTransition { from: PacketState, to: PacketState },
    #[error("Kicked: {0}")]
    Kicked(KickReason),
    #[error("Idle timeout")]
    IdleTimeout,
}

impl SessionError {
    /// Protocol-level failures get a best-effort disconnect notice; transport
    /// failures close without writing, and kicks have already queued theirs.
    #[must_use]
    pub const fn wants_notice(&self) -> bool {
        matches!(
            self,
            SessionError::Protocol(_) | SessionError::IllegalTransition { .. }
        )
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            SessionError::Transport(_) => "transport",
            SessionError::Protocol(_) => "protocol",
            SessionError::IllegalTransition { .. } => "transition",
            SessionError::Kicked(_) => "kicked",
            SessionError::IdleTimeout => "idle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kick_messages_are_player_facing() {
        assert_eq!(KickReason::ServerFull.to_string(), "Server is full");
        assert_eq!(
            SessionError::Kicked(KickReason::InvalidKeepalive).to_string(),
            "Kicked: Invalid keepalive"
        );
    }

    #[test]
    fn only_protocol_failures_want_notice() {
        assert!(SessionError::from(ProtoError::MalformedVarInt).wants_notice());
        assert!(SessionError::IllegalTransition {
            from: PacketState::Status,
            to: PacketState::Play,
        }
        .wants_notice());
        assert!(!SessionError::Kicked(KickReason::ServerFull).wants_notice());
        assert!(!SessionError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            .wants_notice());
    }

    #[test]
    fn json_encoding_failures_count_as_protocol() {
        let err = SessionError::from(ProtoError::Json("key must be a string".into()));
        assert_eq!(err.kind(), "protocol");
        assert!(err.wants_notice());
    }
}
