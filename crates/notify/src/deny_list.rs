/// Consumer mail domains that transactional mail is never delivered to.
pub const BLOCKED_DOMAINS: [&str; 4] = ["@qq.com", "@foxmail.com", "@126.com", "@163.com"];

/// # Summary
/// Checks whether an address ends with one of the blocked domains.
///
/// # Logic
/// Case-insensitive suffix match against `BLOCKED_DOMAINS`.
pub fn is_blocked(address: &str) -> bool {
    let address = address.trim().to_lowercase();
    BLOCKED_DOMAINS
        .iter()
        .any(|suffix| address.ends_with(suffix))
}
