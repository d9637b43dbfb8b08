//! Email address utilities

/// Mask an email address for logs (e.g., a***e@example.com).
///
/// The domain is kept so delivery problems can still be traced to a relay.
pub fn mask_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = match chars.len() {
                1 | 2 => format!("{}***", chars[0]),
                n => format!("{}***{}", chars[0], chars[n - 1]),
            };
            format!("{}@{}", masked_local, domain)
        }
        _ => "***".to_string(),
    }
}
