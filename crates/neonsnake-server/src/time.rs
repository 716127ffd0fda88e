/// Unix-epoch-seconds timestamp with a Z suffix, good enough for mock store
/// record-keeping.
pub fn timestamp_now() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{secs}Z")
}
