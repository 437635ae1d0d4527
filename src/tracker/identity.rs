//! Client identity resolution.
//!
//! A hit is attributed to a visitor through the `cid` parameter. Callers can
//! pass a hint (a raw client id, or a full `_ga`-style cookie value whose
//! tail carries the id), the inbound `_ga` cookie can supply one, and when
//! neither yields an id a random UUID-v4 is synthesized.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tracker::constants::GA_COOKIE_PREFIX_LEN;
use crate::tracker::error::{configuration_error, TrackerResult};

static PROPERTY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^UA-\d+-\d$").expect("property id pattern"));

static COOKIE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{9}\.\d{9})$").expect("cookie suffix pattern"));

static UUID_V4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d{8}-\d{4}-4\d{3}-[89ab]\d{3}-\d{12}$").expect("uuid pattern")
});

/// Validates a Universal Analytics property ID (`UA-<digits>-<digit>`).
pub(crate) fn validate_property_id(property_id: &str) -> TrackerResult<()> {
    if PROPERTY_ID_RE.is_match(property_id) {
        return Ok(());
    }
    Err(configuration_error(format!(
        "`{property_id}` is not a valid Universal Analytics property ID (expected UA-XXXXX-Y)"
    )))
}

/// Resolves the definitive client id, first match wins:
///
/// 1. the hint ends with a cookie-style `<9 digits>.<9 digits>` pair;
/// 2. the hint is a well-formed UUID-v4;
/// 3. the inbound `_ga` cookie, with its `GA1.2.` prefix stripped;
/// 4. a freshly synthesized random UUID-v4.
pub(crate) fn resolve_client_id(hint: Option<&str>, ga_cookie: Option<&str>) -> String {
    if let Some(hint) = hint {
        if let Some(captures) = COOKIE_SUFFIX_RE.captures(hint) {
            return captures[1].to_string();
        }
        if UUID_V4_RE.is_match(hint) {
            return hint.to_string();
        }
    }

    if let Some(cookie) = ga_cookie {
        if cookie.len() > GA_COOKIE_PREFIX_LEN {
            return cookie[GA_COOKIE_PREFIX_LEN..].to_string();
        }
    }

    log::warn!("no usable client id hint or _ga cookie; synthesizing a random UUID");
    synthesize_uuid_v4()
}

/// Standard UUID-v4: 122 random bits with the version nibble set to `4` and
/// the variant bits set to `10xx`.
fn synthesize_uuid_v4() -> String {
    use rand::Rng;

    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes[..]);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut out = String::with_capacity(36);
    for (index, byte) in bytes.iter().enumerate() {
        if matches!(index, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_property_ids() {
        for id in ["UA-1-1", "UA-123456-7", "UA-99999999-0"] {
            assert!(validate_property_id(id).is_ok(), "{id} should validate");
        }
    }

    #[test]
    fn rejects_invalid_property_ids() {
        for id in ["", "UA-123456", "UA-12-34", "GA-123-4", "ua-123-4", "UA-abc-1"] {
            let err = validate_property_id(id).unwrap_err();
            assert_eq!(err.code_str(), "tracker/invalid-configuration");
        }
    }

    #[test]
    fn cookie_style_suffix_wins_regardless_of_prefix() {
        let resolved = resolve_client_id(Some("GA1.2.123456789.987654321"), None);
        assert_eq!(resolved, "123456789.987654321");

        let resolved = resolve_client_id(Some("123456789.987654321"), None);
        assert_eq!(resolved, "123456789.987654321");
    }

    #[test]
    fn uuid_hint_is_used_verbatim() {
        let hint = "12345678-1234-4123-9123-123456789012";
        assert_eq!(resolve_client_id(Some(hint), None), hint);

        // Variant nibble matching is case-insensitive.
        let hint = "12345678-1234-4123-A123-123456789012";
        assert_eq!(resolve_client_id(Some(hint), None), hint);
    }

    #[test]
    fn cookie_suffix_takes_precedence_over_ga_cookie() {
        let resolved = resolve_client_id(
            Some("prefix.123456789.987654321"),
            Some("GA1.2.111111111.222222222"),
        );
        assert_eq!(resolved, "123456789.987654321");
    }

    #[test]
    fn falls_back_to_ga_cookie_with_prefix_stripped() {
        let resolved = resolve_client_id(Some("not-an-id"), Some("GA1.2.111111111.222222222"));
        assert_eq!(resolved, "111111111.222222222");

        let resolved = resolve_client_id(None, Some("GA1.2.111111111.222222222"));
        assert_eq!(resolved, "111111111.222222222");
    }

    #[test]
    fn synthesizes_uuid_when_nothing_matches() {
        let resolved = resolve_client_id(None, None);
        assert!(UUID_V4_RE.is_match(&resolved) || is_hex_uuid_v4(&resolved));
        assert_eq!(resolved.len(), 36);
        assert_eq!(&resolved[14..15], "4");
        assert!(matches!(
            resolved.as_bytes()[19],
            b'8' | b'9' | b'a' | b'b'
        ));

        let again = resolve_client_id(None, None);
        assert_ne!(resolved, again);
    }

    fn is_hex_uuid_v4(candidate: &str) -> bool {
        let hyphens: Vec<usize> = candidate
            .char_indices()
            .filter(|(_, c)| *c == '-')
            .map(|(i, _)| i)
            .collect();
        hyphens == [8, 13, 18, 23]
            && candidate
                .chars()
                .filter(|c| *c != '-')
                .all(|c| c.is_ascii_hexdigit())
    }
}
