use super::state::PacketState;

/// Wire format or packet-level protocol violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtoError {
    #[error("varint exceeds 5 bytes")]
    MalformedVarInt,
    #[error("payload ended before the field was complete")]
    TruncatedPayload,
    #[error("packet of {len} bytes exceeds the frame limit")]
    PacketTooLarge { len: usize },
    #[error("negative length prefix {0}")]
    NegativeLength(i32),
    #[error("bool byte must be 0 or 1, got {0:#04x}")]
    MalformedBool(u8),
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("string of {actual} chars exceeds {max}")]
    StringTooLong { max: usize, actual: usize },
    #[error("length {actual} exceeds {max}")]
    LengthTooLarge { max: usize, actual: usize },
    #[error("{0} trailing bytes after packet body")]
    TrailingBytes(usize),
    #[error("packet id {id:#04x} is not valid in {state} state")]
    UnknownPacket { state: PacketState, id: i32 },
    #[error("handshake requested unknown next state {0}")]
    InvalidHandshakeState(i32),
    #[error("malformed uuid")]
    InvalidUuid,
    #[error("invalid {field} value {value}")]
    InvalidEnum { field: &'static str, value: i64 },
    #[error("could not encode JSON payload: {0}")]
    Json(String),
    #[error("{packet} packet cannot be sent in {session} state")]
    WrongState {
        packet: PacketState,
        session: PacketState,
    },
}

pub type Result<T> = std::result::Result<T, ProtoError>;

pub(crate) fn debug_log_error(context: &str, error: &ProtoError) {
    #[cfg(debug_assertions)]
    {
        log::debug!("{}: {}", context, error);
    }
    let _ = context;
    let _ = error;
}
