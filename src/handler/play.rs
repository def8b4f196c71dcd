use super::Handle;
use crate::{
    context::ServerContext,
    error::{KickReason, SessionError},
    proto::KeepAliveC2s,
    session::Session,
};

impl Handle for KeepAliveC2s {
    fn handle(self, session: &mut Session, _server: &ServerContext) -> Result<(), SessionError> {
        if self.id != session.pending_keepalive() {
            return Err(session.kick(KickReason::InvalidKeepalive));
        }
        session.clear_keepalive();
        Ok(())
    }
}
