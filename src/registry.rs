//! Players currently in play state, shared by every connection task.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{PoisonError, RwLock},
};

use crate::proto::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlinePlayer {
    pub name: String,
    pub address: SocketAddr,
}

#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: RwLock<HashMap<Uuid, OnlinePlayer>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `uuid` was already registered; the entry is replaced.
    pub fn register(&self, uuid: Uuid, player: OnlinePlayer) -> bool {
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uuid, player)
            .is_none()
    }

    /// Inserts `player` unless `uuid` is already online or the registry
    /// already holds `cap` players. The check and the insert share one write
    /// guard, so concurrent logins never overshoot the cap.
    pub fn try_register(&self, uuid: Uuid, player: OnlinePlayer, cap: Option<usize>) -> bool {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        if players.contains_key(&uuid) || cap.is_some_and(|cap| players.len() >= cap) {
            return false;
        }
        players.insert(uuid, player);
        true
    }

    pub fn unregister(&self, uuid: &Uuid) -> Option<OnlinePlayer> {
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(uuid)
    }

    pub fn online_count(&self) -> usize {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn get(&self, uuid: &Uuid) -> Option<OnlinePlayer> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uuid)
            .cloned()
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(uuid)
    }
}
