use std::time::{SystemTime, UNIX_EPOCH};

const RANDOM_PADDING: usize = 7;

/// Generates a client-side unique id the way the Appwrite SDKs do: hex
/// seconds, five hex digits of sub-second microseconds, then random hex.
pub fn unique_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{:x}{:05x}{}",
        now.as_secs(),
        now.subsec_micros(),
        &random[..RANDOM_PADDING]
    )
}
