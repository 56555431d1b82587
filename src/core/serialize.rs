use crate::constants::{DEFAULT_BUFFER_CAPACITY, SEMICOLON_SPACE};
use crate::core::value::ResolvedValue;
use crate::utils::dashify;
use std::borrow::Cow;

/// Writes directives as a policy string: `default-src 'self'; img-src data:`.
///
/// Entries are emitted in iteration order. `false` entries are skipped and a
/// `true` entry is written as the bare directive token.
pub fn serialize<'a, I, K>(directives: I) -> String
where
    I: IntoIterator<Item = (K, &'a ResolvedValue)>,
    K: AsRef<str>,
{
    let mut buffer = String::with_capacity(DEFAULT_BUFFER_CAPACITY);

    for (name, value) in directives {
        if value.is_disabled() {
            continue;
        }

        if !buffer.is_empty() {
            buffer.push_str(SEMICOLON_SPACE);
        }
        buffer.push_str(&dashify(name.as_ref()));
        write_value(value, &mut buffer);
    }

    buffer
}

fn write_value(value: &ResolvedValue, buffer: &mut String) {
    match value {
        ResolvedValue::Flag(_) => {}
        ResolvedValue::Token(token) => {
            if !token.is_empty() {
                buffer.push(' ');
                buffer.push_str(token);
            }
        }
        ResolvedValue::List(values) => {
            let start = buffer.len();
            buffer.push(' ');
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    buffer.push(' ');
                }
                buffer.push_str(v);
            }
            // An empty join leaves the bare directive token.
            if buffer.len() == start + 1 {
                buffer.truncate(start);
            }
        }
    }
}

/// Splits a serialized policy back into `(directive, values)` pairs.
pub fn parse_policy(policy: &str) -> Vec<(Cow<'_, str>, Vec<&str>)> {
    policy
        .split(';')
        .filter_map(|segment| {
            let mut tokens = segment.split_whitespace();
            let name = tokens.next()?;
            Some((Cow::Owned(name.to_ascii_lowercase()), tokens.collect()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve::ResolvedDirectives;

    #[test]
    fn flags_and_disabled_entries() {
        let mut directives = ResolvedDirectives::new();
        directives.insert("scriptSrc".into(), ResolvedValue::Flag(false));
        directives.insert("styleSrc".into(), ResolvedValue::from(vec!["example.com"]));
        directives.insert("upgradeInsecureRequests".into(), ResolvedValue::Flag(true));
        directives.insert("reportUri".into(), ResolvedValue::from("/report"));

        assert_eq!(
            serialize(&directives),
            "style-src example.com; upgrade-insecure-requests; report-uri /report"
        );
    }

    #[test]
    fn list_elements_are_joined_verbatim() {
        let mut directives = ResolvedDirectives::new();
        directives.insert("sandbox".into(), ResolvedValue::List(Vec::new()));
        directives.insert("imgSrc".into(), ResolvedValue::from(vec!["a.com", "", "b.com"]));

        assert_eq!(serialize(&directives), "sandbox; img-src a.com  b.com");
    }

    #[test]
    fn empty_directive_set_is_empty_string() {
        assert_eq!(serialize(&ResolvedDirectives::new()), "");
    }

    #[test]
    fn parse_policy_round_trips() {
        let mut directives = ResolvedDirectives::new();
        directives.insert("defaultSrc".into(), ResolvedValue::from(vec!["'self'", "domain.com"]));

        let policy = serialize(&directives);
        assert_eq!(
            parse_policy(&policy),
            vec![(Cow::Borrowed("default-src"), vec!["'self'", "domain.com"])]
        );
    }
}
