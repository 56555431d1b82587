pub(crate) const HEADER_CSP: &str = "content-security-policy";
pub(crate) const HEADER_CSP_REPORT_ONLY: &str = "content-security-policy-report-only";
pub(crate) const HEADER_X_CSP: &str = "x-content-security-policy";
pub(crate) const HEADER_X_CSP_REPORT_ONLY: &str = "x-content-security-policy-report-only";
pub(crate) const HEADER_WEBKIT_CSP: &str = "x-webkit-csp";
pub(crate) const HEADER_WEBKIT_CSP_REPORT_ONLY: &str = "x-webkit-csp-report-only";

pub(crate) const DEFAULT_SRC: &str = "default-src";
pub(crate) const SCRIPT_SRC: &str = "script-src";
pub(crate) const CONNECT_SRC: &str = "connect-src";

// Firefox 4-22 dialect
pub(crate) const XHR_SRC: &str = "xhr-src";
pub(crate) const OPTIONS: &str = "options";
pub(crate) const ALLOW: &str = "allow";
pub(crate) const INLINE_SCRIPT: &str = "inline-script";
pub(crate) const EVAL_SCRIPT: &str = "eval-script";
pub(crate) const WILDCARD_SOURCE: &str = "*";

pub(crate) const UNSAFE_INLINE_SOURCE: &str = "'unsafe-inline'";
pub(crate) const UNSAFE_EVAL_SOURCE: &str = "'unsafe-eval'";
pub(crate) const NONCE_PREFIX: &str = "'nonce-";
pub(crate) const SUFFIX_QUOTE: &str = "'";

/// Keywords that are only meaningful when wrapped in single quotes.
pub(crate) const MUST_QUOTE: &[&str] = &[
    "none",
    "self",
    "unsafe-inline",
    "unsafe-eval",
    "strict-dynamic",
];
pub(crate) const UNSAFES: &[&str] = &[
    "'unsafe-inline'",
    "unsafe-inline",
    "'unsafe-eval'",
    "unsafe-eval",
];
pub(crate) const STRICT_DYNAMICS: &[&str] = &["'strict-dynamic'", "strict-dynamic"];
pub(crate) const SELFS: &[&str] = &["self", "'self'"];
pub(crate) const REQUIRE_SRI_FOR_VALUES: &[&str] = &["script", "style"];
pub(crate) const SANDBOX_TOKENS: &[&str] = &[
    "allow-downloads",
    "allow-forms",
    "allow-modals",
    "allow-orientation-lock",
    "allow-pointer-lock",
    "allow-popups",
    "allow-popups-to-escape-sandbox",
    "allow-presentation",
    "allow-same-origin",
    "allow-scripts",
    "allow-top-navigation",
    "allow-top-navigation-by-user-activation",
];

pub(crate) const SEMICOLON_SPACE: &str = "; ";

pub(crate) const DEFAULT_NONCE_LENGTH: usize = 16;
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 256;
pub(crate) const DEFAULT_POLICY_CACHE_ENTRIES: usize = 1000;
pub(crate) const NONCE_BUFFER_POOL_SIZE: usize = 32;
