/// Get current timestamp in seconds since Unix epoch
/// Used for the `exp` claim of admin tokens
pub fn get_current_timestamp_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
