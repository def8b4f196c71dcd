use serde::Serialize;

use super::Handle;
use crate::{
    context::ServerContext,
    error::SessionError,
    logging::TyphoonLogger,
    proto::{self, ProtoError, StatusPingC2s, StatusPongS2c, StatusRequestC2s, StatusResponseS2c},
    session::Session,
};

/// Server list entry, serialized with keys in wire order.
#[derive(Debug, Serialize)]
pub struct StatusPayload<'a> {
    pub version: StatusVersion<'a>,
    pub players: StatusPlayers,
    pub description: StatusDescription<'a>,
    pub favicon: &'a str,
}

#[derive(Debug, Serialize)]
pub struct StatusVersion<'a> {
    pub name: &'a str,
    pub protocol: i32,
}

#[derive(Debug, Serialize)]
pub struct StatusPlayers {
    pub max: usize,
    pub online: usize,
    pub sample: [(); 0],
}

#[derive(Debug, Serialize)]
pub struct StatusDescription<'a> {
    pub text: &'a str,
}

impl<'a> StatusPayload<'a> {
    /// Snapshot of the advertisement for a client speaking `protocol`.
    ///
    /// An unrestricted server never reports fewer max slots than players online.
    pub fn build(server: &'a ServerContext, protocol: i32, online: usize) -> Self {
        let config = &server.config;
        let mut max = config.max_players as usize;
        if !config.restricted && online > max {
            max = online;
        }

        Self {
            version: StatusVersion {
                name: &config.server_name,
                protocol: server.compat.preferred_advertised(protocol),
            },
            players: StatusPlayers {
                max,
                online,
                sample: [],
            },
            description: StatusDescription { text: &config.motd },
            favicon: "",
        }
    }

    pub fn to_json(&self) -> proto::Result<String> {
        serde_json::to_string(self).map_err(|err| ProtoError::Json(err.to_string()))
    }
}

impl Handle for StatusRequestC2s {
    fn handle(self, session: &mut Session, server: &ServerContext) -> Result<(), SessionError> {
        let online = server.registry.online_count();
        let payload = StatusPayload::build(server, session.protocol(), online);
        let json = payload.to_json()?;

        session.send(&StatusResponseS2c { json })?;
        server.metrics.record_status();
        TyphoonLogger::status_served(&session.peer(), payload.players.online, payload.players.max);
        Ok(())
    }
}

impl Handle for StatusPingC2s {
    fn handle(self, session: &mut Session, _server: &ServerContext) -> Result<(), SessionError> {
        session.send(&StatusPongS2c {
            payload: self.payload,
        })
    }
}
