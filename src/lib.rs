//! Typhoon: protocol front end of a game server, from handshake to join game.

pub mod compat;
pub mod config;
pub mod connection;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod logging;
pub mod metrics;
pub mod proto;
pub mod ratelimit;
pub mod registry;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod utils;

pub use context::ServerContext;
pub use error::{KickReason, SessionError};
pub use server::Typhoon;
pub use session::Session;
