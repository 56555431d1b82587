use actix_web_csp_compat::core::{parse_policy, serialize, ResolvedDirectives};
use actix_web_csp_compat::ResolvedValue;
use proptest::prelude::*;
use std::borrow::Cow;

fn directive_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(-[a-z]{1,8}){0,2}"
}

fn source() -> impl Strategy<Value = String> {
    "[a-z0-9'.:*/-]{1,16}"
}

fn resolved_value() -> impl Strategy<Value = ResolvedValue> {
    prop_oneof![
        any::<bool>().prop_map(ResolvedValue::Flag),
        source().prop_map(ResolvedValue::from),
        prop::collection::vec(source(), 1..5).prop_map(ResolvedValue::from),
    ]
}

fn directives() -> impl Strategy<Value = ResolvedDirectives> {
    prop::collection::vec((directive_name(), resolved_value()), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(name, value)| (Cow::Owned(name), value))
            .collect()
    })
}

proptest! {
    #[test]
    fn serialization_is_deterministic(directives in directives()) {
        prop_assert_eq!(serialize(&directives), serialize(&directives.clone()));
    }

    #[test]
    fn disabled_directives_never_appear(directives in directives()) {
        let policy = serialize(&directives);
        let emitted: Vec<_> = parse_policy(&policy)
            .into_iter()
            .map(|(name, _)| name.into_owned())
            .collect();

        let expected: Vec<_> = directives
            .iter()
            .filter(|(_, value)| !value.is_disabled())
            .map(|(name, _)| name.to_string())
            .collect();

        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn values_survive_a_parse(directives in directives()) {
        let policy = serialize(&directives);
        let parsed = parse_policy(&policy);
        let enabled = directives.iter().filter(|(_, value)| !value.is_disabled());

        for ((_, value), (_, tokens)) in enabled.zip(parsed) {
            let expected: Vec<String> = match value {
                ResolvedValue::Flag(_) => Vec::new(),
                ResolvedValue::Token(token) => vec![token.to_string()],
                ResolvedValue::List(values) => values.iter().map(|v| v.to_string()).collect(),
            };
            prop_assert_eq!(tokens, expected);
        }
    }
}

#[test]
fn camel_case_keys_are_dashified() {
    let mut directives = ResolvedDirectives::new();
    directives.insert(Cow::Borrowed("defaultSrc"), ResolvedValue::from(vec!["'self'"]));
    directives.insert(
        Cow::Borrowed("blockAllMixedContent"),
        ResolvedValue::Flag(true),
    );

    assert_eq!(
        serialize(&directives),
        "default-src 'self'; block-all-mixed-content"
    );
}

#[test]
fn plain_pairs_serialize_too() {
    let value = ResolvedValue::from("/report");
    assert_eq!(serialize([("report-uri", &value)]), "report-uri /report");
}
