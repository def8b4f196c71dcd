use opentelemetry::{
    metrics::{Counter, Histogram, Meter, UpDownCounter},
    KeyValue,
};

pub struct SessionMetrics {
    open: Counter<u64>,
    handshakes: Counter<u64>,
    status: Counter<u64>,
    logins: Counter<u64>,
    kicks: Counter<u64>,
    failures: Counter<u64>,
    online: UpDownCounter<i64>,
    duration: Histogram<u64>,
}

impl SessionMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            open: meter.u64_counter("typhoon_socket_open_total").build(),
            handshakes: meter.u64_counter("typhoon_handshake_total").build(),
            status: meter.u64_counter("typhoon_status_total").build(),
            logins: meter.u64_counter("typhoon_login_total").build(),
            kicks: meter.u64_counter("typhoon_kick_total").build(),
            failures: meter.u64_counter("typhoon_session_fail_total").build(),
            online: meter.i64_up_down_counter("typhoon_players_online").build(),
            duration: meter
                .u64_histogram("typhoon_session_time_ms")
                .with_unit("ms")
                .build(),
        }
    }

    pub fn record_open(&self) {
        self.open.add(1, &[]);
    }

    pub fn record_handshake(&self, next_state: &'static str) {
        self.handshakes
            .add(1, &[KeyValue::new("state", next_state)]);
    }

    pub fn record_status(&self) {
        self.status.add(1, &[]);
    }

    pub fn record_login(&self) {
        self.logins.add(1, &[]);
    }

    pub fn record_kick(&self, reason: &'static str) {
        self.kicks.add(1, &[KeyValue::new("reason", reason)]);
    }

    pub fn record_failure(&self, kind: &'static str) {
        self.failures.add(1, &[KeyValue::new("kind", kind)]);
    }

    pub fn record_player_joined(&self) {
        self.online.add(1, &[]);
    }

    pub fn record_player_left(&self) {
        self.online.add(-1, &[]);
    }

    pub fn record_duration(&self, elapsed_ms: u64, state: &'static str) {
        self.duration
            .record(elapsed_ms, &[KeyValue::new("state", state)]);
    }
}
