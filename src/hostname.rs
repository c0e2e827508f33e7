use crate::constants::{HOSTNAME_LABEL_MAX_LEN, HOSTNAME_MAX_LEN};

// RFC 1123 host name: dot separated labels of ASCII letters, digits and
// hyphens, no label starting or ending with a hyphen. No trailing dot.
pub fn is_valid_hostname(name: &str) -> bool {
    if name.is_empty() || name.len() > HOSTNAME_MAX_LEN {
        return false;
    }

    name.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= HOSTNAME_LABEL_MAX_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
