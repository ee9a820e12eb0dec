//! Link and image URL filtering.

const SAFE_PROTOCOLS: &[&str] = &["http", "https", "irc", "ircs", "mailto", "xmpp"];

/// Return `url` unchanged if it is relative or uses a safe protocol,
/// otherwise an empty string.
///
/// A colon only counts as a protocol separator when it appears before any
/// `/`, `?` or `#`.
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    let Some(colon) = url.find(':') else {
        return url.to_string();
    };

    let before = |c: char| url.find(c).is_some_and(|pos| pos < colon);
    if before('/') || before('?') || before('#') {
        return url.to_string();
    }

    let protocol = &url[..colon];
    if SAFE_PROTOCOLS
        .iter()
        .any(|safe| safe.eq_ignore_ascii_case(protocol))
    {
        url.to_string()
    } else {
        String::new()
    }
}
