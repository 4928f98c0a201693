/// Extract the generated root password from the container startup logs.
///
/// With `ARANGO_RANDOM_ROOT_PASSWORD=1` the official image prints a banner
/// once, on first start against an empty data directory:
///
/// ```text
/// ==========================================
/// GENERATED ROOT PASSWORD: OIdcqAWnICrWSEGv
/// ==========================================
/// ```
///
/// Returns `None` when no banner is present, which happens while the
/// entrypoint is still booting or when the volume already held a database.
pub fn parse_generated_password(logs: &str) -> Option<String> {
    const BANNER: &str = "GENERATED ROOT PASSWORD:";

    for line in logs.lines() {
        if let Some(rest) = line.trim().strip_prefix(BANNER) {
            let password = rest.trim();
            if !password.is_empty() {
                return Some(password.to_string());
            }
        }
    }
    None
}
