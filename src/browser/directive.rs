//! Rewrites a resolved policy into the pre-standard dialect spoken by
//! Firefox 4-22, Firefox OS before 32 and Firefox for Android before 25.
//!
//! Only the Firefox family ever shipped that syntax, so every other browser
//! gets its directives back untouched.

use crate::browser::descriptor::{BrowserDescriptor, BrowserFamily, OS_ANDROID, OS_FIREFOX_OS};
use crate::constants::{
    ALLOW, CONNECT_SRC, DEFAULT_SRC, EVAL_SCRIPT, INLINE_SCRIPT, OPTIONS, SCRIPT_SRC,
    UNSAFE_EVAL_SOURCE, UNSAFE_INLINE_SOURCE, WILDCARD_SOURCE, XHR_SRC,
};
use crate::core::resolve::ResolvedDirectives;
use crate::core::value::ResolvedValue;
use std::borrow::Cow;

pub fn rewrite_for_browser(
    browser: &BrowserDescriptor,
    mut directives: ResolvedDirectives,
) -> ResolvedDirectives {
    if !needs_rewrite(browser) {
        return directives;
    }

    let mut base = ResolvedDirectives::with_capacity(directives.len() + 2);
    if browser.family == BrowserFamily::Firefox && browser.version_below(5.0) {
        // Firefox 4 spells default-src as allow. A disabled default-src
        // leaves the wildcard in place.
        let allow = if directives.get(DEFAULT_SRC).is_some_and(|v| !v.is_disabled()) {
            directives.shift_remove(DEFAULT_SRC)
        } else {
            None
        };
        base.insert(Cow::Borrowed(ALLOW), allow.unwrap_or_else(wildcard));
    } else {
        base.insert(Cow::Borrowed(DEFAULT_SRC), wildcard());
    }

    pre_csp10(directives, base)
}

/// True when `browser` needs the pre-standard rewrite.
pub fn needs_rewrite(browser: &BrowserDescriptor) -> bool {
    match browser.family {
        BrowserFamily::Firefox => {
            browser.version_at_least(4.0) && browser.version_below(23.0)
        }
        BrowserFamily::FirefoxMobile => {
            (browser.os_is(OS_FIREFOX_OS) && browser.version_below(32.0))
                || (browser.os_is(OS_ANDROID) && browser.version_below(25.0))
        }
        _ => false,
    }
}

#[inline]
fn wildcard() -> ResolvedValue {
    ResolvedValue::List(vec![Cow::Borrowed(WILDCARD_SOURCE)])
}

/// Folds `directives` over `base`: `connect-src` becomes `xhr-src` and the
/// unsafe keywords of `script-src` become an `options` directive.
fn pre_csp10(directives: ResolvedDirectives, mut result: ResolvedDirectives) -> ResolvedDirectives {
    for (name, value) in directives {
        let options = if name == SCRIPT_SRC {
            script_options(&value)
        } else {
            None
        };

        let name = if name == CONNECT_SRC {
            Cow::Borrowed(XHR_SRC)
        } else {
            name
        };
        result.insert(name, value);

        if let Some(options) = options {
            result.insert(Cow::Borrowed(OPTIONS), options);
        }
    }

    result
}

fn script_options(script_src: &ResolvedValue) -> Option<ResolvedValue> {
    let mut options = Vec::with_capacity(2);
    if script_src.contains(UNSAFE_INLINE_SOURCE) {
        options.push(Cow::Borrowed(INLINE_SCRIPT));
    }
    if script_src.contains(UNSAFE_EVAL_SOURCE) {
        options.push(Cow::Borrowed(EVAL_SCRIPT));
    }

    (!options.is_empty()).then_some(ResolvedValue::List(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(entries: &[(&'static str, &[&'static str])]) -> ResolvedDirectives {
        entries
            .iter()
            .map(|(name, values)| (Cow::Borrowed(*name), ResolvedValue::from(values.to_vec())))
            .collect()
    }

    #[test]
    fn firefox_4_uses_allow_in_place_of_default_src() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, 4.0);
        let rewritten = rewrite_for_browser(
            &browser,
            directives(&[("img-src", &["img.com"]), ("default-src", &["'self'"])]),
        );

        let keys: Vec<_> = rewritten.keys().map(|k| k.as_ref()).collect();
        assert_eq!(keys, ["allow", "img-src"]);
        assert_eq!(rewritten["allow"], ResolvedValue::from(vec!["'self'"]));
    }

    #[test]
    fn firefox_4_without_default_src_allows_everything() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, 4.0);
        let rewritten = rewrite_for_browser(&browser, directives(&[("img-src", &["img.com"])]));
        assert_eq!(rewritten["allow"], ResolvedValue::from(vec!["*"]));
    }

    #[test]
    fn disabled_default_src_replaces_the_wildcard_base() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, 22.0);
        let mut input = directives(&[("img-src", &["img.com"])]);
        input.insert(Cow::Borrowed("default-src"), ResolvedValue::Flag(false));

        let rewritten = rewrite_for_browser(&browser, input);
        assert!(rewritten["default-src"].is_disabled());
    }

    #[test]
    fn firefox_4_keeps_the_wildcard_when_default_src_is_disabled() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, 4.0);
        let mut input = directives(&[("img-src", &["img.com"])]);
        input.insert(Cow::Borrowed("default-src"), ResolvedValue::Flag(false));

        let rewritten = rewrite_for_browser(&browser, input);
        assert_eq!(rewritten["allow"], ResolvedValue::from(vec!["*"]));
        assert!(rewritten["default-src"].is_disabled());
    }

    #[test]
    fn firefox_without_a_version_is_untouched() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, None);
        let input = directives(&[("connect-src", &["connect.com"])]);
        assert!(!needs_rewrite(&browser));
        assert_eq!(rewrite_for_browser(&browser, input.clone()), input);
    }

    #[test]
    fn options_follow_script_src() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, 10.0);
        let rewritten = rewrite_for_browser(
            &browser,
            directives(&[
                ("script-src", &["'self'", "'unsafe-inline'", "'unsafe-eval'"]),
                ("img-src", &["img.com"]),
            ]),
        );

        let keys: Vec<_> = rewritten.keys().map(|k| k.as_ref()).collect();
        assert_eq!(keys, ["default-src", "script-src", "options", "img-src"]);
        assert_eq!(
            rewritten["options"],
            ResolvedValue::from(vec!["inline-script", "eval-script"])
        );
    }

    #[test]
    fn modern_firefox_is_untouched() {
        let browser = BrowserDescriptor::new(BrowserFamily::Firefox, 23.0);
        let input = directives(&[("connect-src", &["connect.com"])]);
        assert_eq!(rewrite_for_browser(&browser, input.clone()), input);
        assert!(!needs_rewrite(&browser));
    }
}
