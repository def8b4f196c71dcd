use std::{fmt::Display, net::SocketAddr};

use log::{debug, error, info, warn};

use crate::proto::Uuid;

pub struct TyphoonLogger;

impl TyphoonLogger {
    pub fn preparing_socket(address: &str) {
        info!("Preparing socket {}", address);
    }

    pub fn rate_limited(addr: &SocketAddr) {
        debug!("Rate-limited {}", addr.ip());
    }

    pub fn connection_limit(addr: &SocketAddr) {
        debug!("Connection limit reached, dropping {addr}");
    }

    pub fn tcp_nodelay_failed(err: &std::io::Error) {
        error!("Failed to set TCP_NODELAY: {err}");
    }

    pub fn new_connection(address: &SocketAddr) {
        info!("New connection {}", address);
    }

    pub fn handshake_completed(addr: &SocketAddr, protocol: i32, next_state: &str) {
        debug!("Handshake from {addr} (protocol {protocol}), next state: {next_state}");
    }

    pub fn status_served(addr: &SocketAddr, online: usize, max: usize) {
        debug!("Status for {addr}: {online}/{max}");
    }

    pub fn login_success(addr: &SocketAddr, name: &str, identity: &Uuid) {
        info!("{name} ({identity}) joined from {addr}");
    }

    pub fn player_left(addr: &SocketAddr, name: &str) {
        info!("{name} left ({addr})");
    }

    pub fn disconnect_warning(addr: &SocketAddr, reason: &str) {
        warn!("Disconnecting client {addr}: {reason}");
    }

    pub fn connection_closed(addr: &SocketAddr, err: &dyn Display) {
        debug!("Connection {addr} closed: {err}");
    }

    pub fn flush_failed(addr: &SocketAddr, err: &std::io::Error) {
        debug!("Failed to flush final packets to {addr}: {err}");
    }

    pub fn accept_failed(err: &std::io::Error) {
        error!("Failed to accept connection: {err}");
    }

    pub fn stopping() {
        info!("Stop signal received, closing listener");
    }
}
