//! Pure field-format validators for the collection stages.
//! Only email carries real structure; every other field accepts any
//! non-empty text verbatim.

/// Validates an email address: a non-empty local part of alphanumerics and
/// `._%+-`, exactly one `@`, a domain of alphanumerics, dots, and hyphens,
/// and an alphabetic TLD of at least two characters.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    let mut labels = domain.split('.');
    let tld = match labels.next_back() {
        Some(t) => t,
        None => return false,
    };
    let mut rest = labels.peekable();
    if rest.peek().is_none() {
        return false; // no dot in domain
    }
    if !rest.clone().all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    }) {
        return false;
    }

    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
