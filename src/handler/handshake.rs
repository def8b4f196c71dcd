use super::Handle;
use crate::{
    context::ServerContext, error::SessionError, logging::TyphoonLogger, proto::HandshakeC2s,
    session::Session,
};

impl Handle for HandshakeC2s {
    fn handle(self, session: &mut Session, server: &ServerContext) -> Result<(), SessionError> {
        let next = self.next_state.as_state();
        session.record_handshake(self.protocol_version, self.server_address, self.server_port);
        session.advance(next)?;

        server.metrics.record_handshake(next.as_str());
        TyphoonLogger::handshake_completed(&session.peer(), self.protocol_version, next.as_str());
        Ok(())
    }
}
