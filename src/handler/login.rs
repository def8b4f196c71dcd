use super::Handle;
use crate::{
    context::ServerContext,
    error::{KickReason, SessionError},
    logging::TyphoonLogger,
    proto::{
        Difficulty, Dimension, Gamemode, JoinGameS2c, LevelType, LoginStartC2s, LoginSuccessS2c,
        PacketState, Uuid,
    },
    session::Session,
};

/// The fixed world every player joins.
fn lobby_join_game() -> JoinGameS2c {
    JoinGameS2c {
        entity_id: 0,
        gamemode: Gamemode::Spectator,
        dimension: Dimension::Overworld,
        difficulty: Difficulty::Normal,
        max_players: 0xFF,
        level_type: LevelType::Default,
        reduced_debug: false,
    }
}

impl Handle for LoginStartC2s {
    fn handle(self, session: &mut Session, server: &ServerContext) -> Result<(), SessionError> {
        if !server.compat.is_compatible(session.protocol()) {
            return Err(session.kick(KickReason::IncompatibleVersion));
        }

        let config = &server.config;
        let cap = config.restricted.then_some(config.max_players as usize);
        let identity = Uuid::new_v4();
        if !session.register(&server.registry, self.username.clone(), identity, cap) {
            return Err(session.kick(KickReason::ServerFull));
        }
        server.metrics.record_player_joined();

        session.send(&LoginSuccessS2c {
            uuid: identity,
            username: self.username,
        })?;
        session.advance(PacketState::Play)?;
        // Nothing else may reach the client between login success and join game.
        session.send(&lobby_join_game())?;

        server.metrics.record_login();
        TyphoonLogger::login_success(&session.peer(), session.name().unwrap_or_default(), &identity);
        Ok(())
    }
}
