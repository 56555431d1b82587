pub mod descriptor;
pub mod directive;
pub mod header;
pub mod parser;

pub use descriptor::{BrowserDescriptor, BrowserFamily};
pub use directive::{needs_rewrite, rewrite_for_browser};
pub use header::{all_headers, select_headers, CspHeader, HeaderSet, ALL_HEADERS};
pub use parser::{PlatformParser, UserAgentParser};

use crate::core::resolve::ResolvedDirectives;

/// Header names and directive set for one browser.
///
/// `directives` is only evaluated when at least one header will be sent; an
/// empty header set comes back with `None`.
pub fn plan_for_browser<F>(
    browser: &BrowserDescriptor,
    set_all_headers: bool,
    disable_android: bool,
    directives: F,
) -> (HeaderSet, Option<ResolvedDirectives>)
where
    F: FnOnce() -> ResolvedDirectives,
{
    let headers = if set_all_headers {
        all_headers()
    } else {
        select_headers(browser, disable_android)
    };

    if headers.is_empty() {
        return (headers, None);
    }

    let directives = rewrite_for_browser(browser, directives());
    (headers, Some(directives))
}
