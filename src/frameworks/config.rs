use std::{env, time::Duration};

// Runtime/client constants (not gameplay tuning).

pub fn api_base_url() -> String {
    env::var("SHOOTER_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

pub fn trigger_channel_url() -> String {
    env::var("SHOOTER_TRIGGER_URL").unwrap_or_else(|_| "ws://localhost:5000/ws".to_string())
}

/// Bearer token issued by the login service. Empty counts as absent.
pub fn api_token() -> Option<String> {
    env::var("SHOOTER_TOKEN")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn username() -> String {
    env::var("SHOOTER_USERNAME").unwrap_or_else(|_| "player".to_string())
}

pub fn http_timeout() -> Duration {
    let millis = env::var("SHOOTER_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(3000);
    Duration::from_millis(millis)
}

pub fn target_count() -> usize {
    env::var("SHOOTER_TARGETS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5)
}

pub fn field_size() -> (f32, f32) {
    let read = |key: &str, default: f32| {
        env::var(key)
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(default)
    };
    (
        read("SHOOTER_FIELD_WIDTH", 800.0),
        read("SHOOTER_FIELD_HEIGHT", 600.0),
    )
}

pub fn rng_seed() -> Option<u64> {
    env::var("SHOOTER_SEED").ok().and_then(|v| v.parse().ok())
}

pub const COMMAND_CHANNEL_CAPACITY: usize = 256;
pub const INPUT_LINE_CAPACITY: usize = 64;
pub const HIT_BROADCAST_CAPACITY: usize = 64;
pub const LISTENER_GRACE: Duration = Duration::from_millis(500);

pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);
