use std::borrow::Cow;

/// Turns a camelCase directive key into its wire token: `scriptSrc` becomes
/// `script-src`. Keys already in wire form come back borrowed.
pub fn dashify(key: &str) -> Cow<'_, str> {
    if !key.bytes().any(|b| b.is_ascii_uppercase()) {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase();
        }
    }
    Cow::Owned(out)
}

/// Parses the leading decimal number of `input` the way `parseFloat` does:
/// `"4.4.3"` is 4.4, `"32.0.1700.99"` is 32.0 and `"abc"` is `None`.
pub fn parse_version(input: &str) -> Option<f64> {
    let input = input.trim_start();
    let bytes = input.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    let number = input[..end].trim_end_matches('.');
    if number.is_empty() || number == "." {
        return None;
    }
    number.parse().ok()
}
