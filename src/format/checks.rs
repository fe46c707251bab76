//! Semantic value checkers.

use url::Url;

/// Maximum length of a fully qualified host name (RFC 1123).
const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Characters permitted in an RFC 5322 `atext` run besides ASCII letters and digits.
const ATEXT_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

fn is_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
        return false;
    }
    let alnum = |b: &u8| b.is_ascii_alphanumeric();
    alnum(&bytes[0])
        && alnum(&bytes[bytes.len() - 1])
        && bytes.iter().all(|b| alnum(b) || *b == b'-')
}

/// RFC 1123 host name: dot-separated labels of letters, digits and inner
/// hyphens. A single trailing dot (fully qualified form) is accepted.
pub fn hostname(value: &str) -> bool {
    let name = value.strip_suffix('.').unwrap_or(value);
    !name.is_empty() && name.len() <= MAX_HOSTNAME_LEN && name.split('.').all(is_label)
}

fn is_dot_atom(local: &str) -> bool {
    !local.is_empty()
        && local.split('.').all(|atom| {
            !atom.is_empty()
                && atom
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(c))
        })
}

/// RFC 5322 `addr-spec` restricted to the dot-atom form: `local@host`.
pub fn email(value: &str) -> bool {
    match value.rsplit_once('@') {
        Some((local, domain)) => is_dot_atom(local) && hostname(domain),
        None => false,
    }
}

/// RFC 3986 absolute URI: must carry a scheme.
pub fn uri(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// IPv4 or IPv6 address in binary form.
pub fn ip_addr(value: &[u8]) -> bool {
    matches!(value.len(), 4 | 16)
}

/// EUI-48 or EUI-64 hardware address.
pub fn mac_addr(value: &[u8]) -> bool {
    matches!(value.len(), 6 | 8)
}

pub fn port(value: i64) -> bool {
    (0..=65535).contains(&value)
}
