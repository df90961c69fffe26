//! Serde default values.

pub(super) fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

pub(super) fn default_request_timeout() -> u64 {
    60
}

pub(super) fn default_limit() -> u8 {
    100
}

pub(super) fn default_poll_timeout() -> u32 {
    30
}

pub(super) fn default_handoff_capacity() -> usize {
    1
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}
