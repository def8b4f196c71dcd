//! Drives one client stream through the session state machine.

use std::{net::SocketAddr, sync::Arc};

use bytes::BytesMut;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    time::{interval_at, timeout, Instant, Interval, MissedTickBehavior},
};

use crate::{
    context::ServerContext,
    error::{KickReason, SessionError},
    logging::TyphoonLogger,
    proto::{PacketDecoder, PacketState},
    session::Session,
};

const MAX_CHUNK_SIZE: usize = 1024;

enum Event {
    Read(usize),
    KeepaliveTick,
}

pub struct Connection<S> {
    stream: S,
    dec: PacketDecoder,
    session: Session,
    server: Arc<ServerContext>,
    opened: Instant,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, server: Arc<ServerContext>) -> Self {
        Self {
            stream,
            dec: PacketDecoder::new(),
            session: Session::new(peer),
            server,
            opened: Instant::now(),
        }
    }

    /// Serves until the peer hangs up or the session fails. Every failure
    /// closes the connection; protocol failures first get a best-effort
    /// disconnect notice.
    pub async fn serve(mut self) -> Result<(), SessionError> {
        let result = self.drive().await;
        if let Err(err) = &result {
            self.fail(err).await;
        }
        self.finish().await;
        result
    }

    async fn drive(&mut self) -> Result<(), SessionError> {
        let mut buf = BytesMut::with_capacity(MAX_CHUNK_SIZE);
        let mut keepalive: Option<Interval> = None;

        loop {
            let in_play = self.session.state() == PacketState::Play;
            if in_play && keepalive.is_none() {
                keepalive = self.server.config.keepalive_interval().map(|period| {
                    let mut ticker = interval_at(Instant::now() + period, period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    ticker
                });
            }

            buf.clear();
            let event = tokio::select! {
                read = self.read_chunk(&mut buf) => Event::Read(read?),
                _ = next_tick(&mut keepalive), if in_play => Event::KeepaliveTick,
            };

            match event {
                Event::Read(0) => return Ok(()),
                Event::Read(n) => {
                    self.dec.queue_slice(&buf[..n]);
                    while let Some(frame) = self.dec.try_next_packet()? {
                        self.server
                            .dispatcher
                            .dispatch(&mut self.session, &self.server, &frame)?;
                        if self.session.is_closing() {
                            break;
                        }
                    }
                }
                Event::KeepaliveTick => self.keepalive_tick()?,
            }

            self.flush().await?;
            if self.session.is_closing() {
                return Ok(());
            }
        }
    }

    /// Reads one chunk. Before play state the peer must not stay silent past
    /// the handshake timeout, when one is configured.
    async fn read_chunk(&mut self, buf: &mut BytesMut) -> Result<usize, SessionError> {
        let limit = match self.server.config.handshake_timeout() {
            Some(limit) if self.session.state() != PacketState::Play => limit,
            _ => return Ok(self.stream.read_buf(buf).await?),
        };
        match timeout(limit, self.stream.read_buf(buf)).await {
            Ok(read) => Ok(read?),
            Err(_) => Err(SessionError::IdleTimeout),
        }
    }

    /// Probes the client, or kicks it if the previous probe is unanswered.
    fn keepalive_tick(&mut self) -> Result<(), SessionError> {
        if self.session.pending_keepalive() != 0 {
            return Err(self.session.kick(KickReason::KeepaliveTimeout));
        }
        self.session.issue_keepalive(rand::random_range(1..=i32::MAX))
    }

    async fn flush(&mut self) -> Result<(), SessionError> {
        if !self.session.has_outbound() {
            return Ok(());
        }
        let bytes = self.session.take_outbound();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn fail(&mut self, err: &SessionError) {
        let peer = self.session.peer();
        self.server.metrics.record_failure(err.kind());

        match err {
            SessionError::Transport(_) => return,
            SessionError::Kicked(reason) => {
                self.server.metrics.record_kick(reason.label());
                TyphoonLogger::disconnect_warning(&peer, reason.message());
            }
            other if other.wants_notice() => {
                let reason = other.to_string();
                TyphoonLogger::disconnect_warning(&peer, &reason);
                self.session.disconnect(&reason);
            }
            _ => {}
        }

        if let Err(SessionError::Transport(io)) = self.flush().await {
            TyphoonLogger::flush_failed(&peer, &io);
        }
    }

    async fn finish(&mut self) {
        if self.session.is_registered() {
            self.session.unregister(&self.server.registry);
            self.server.metrics.record_player_left();
            TyphoonLogger::player_left(&self.session.peer(), self.session.name().unwrap_or_default());
        }
        let elapsed = self.opened.elapsed().as_millis() as u64;
        self.server
            .metrics
            .record_duration(elapsed, self.session.state().as_str());
        let _ = self.stream.shutdown().await;
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
