//! User-agent parsing.
//!
//! `PlatformParser` only knows the families the header and directive tables
//! care about. Anything else comes back as [`BrowserFamily::Unknown`], which
//! gets every header name.

use crate::browser::descriptor::{
    BrowserDescriptor, BrowserFamily, OS_ANDROID, OS_FIREFOX_OS, OS_IOS,
};
use crate::utils::parse_version;

pub trait UserAgentParser: Send + Sync {
    fn parse(&self, user_agent: &str) -> BrowserDescriptor;
}

impl<F> UserAgentParser for F
where
    F: Fn(&str) -> BrowserDescriptor + Send + Sync,
{
    fn parse(&self, user_agent: &str) -> BrowserDescriptor {
        self(user_agent)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformParser;

impl PlatformParser {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

/// Version following `marker`, e.g. `version_after(ua, "Chrome/")`.
fn version_after(ua: &str, marker: &str) -> Option<f64> {
    let start = ua.find(marker)? + marker.len();
    parse_version(&ua[start..].replace('_', "."))
}

#[inline]
fn has(ua: &str, marker: &str) -> bool {
    ua.contains(marker)
}

fn detect_os(ua: &str) -> (Option<&'static str>, Option<f64>) {
    if has(ua, "Windows Phone") {
        return (Some("Windows Phone"), version_after(ua, "Windows Phone "));
    }
    if has(ua, "Android") {
        return (Some(OS_ANDROID), version_after(ua, "Android "));
    }
    if has(ua, "iPhone") || has(ua, "iPad") || has(ua, "iPod") {
        let version = version_after(ua, "iPhone OS ").or_else(|| version_after(ua, "CPU OS "));
        return (Some(OS_IOS), version);
    }
    if has(ua, "Firefox/") && (has(ua, "(Mobile;") || has(ua, "(Tablet;")) {
        return (Some(OS_FIREFOX_OS), None);
    }
    if has(ua, "Windows") {
        return (Some("Windows"), version_after(ua, "Windows NT "));
    }
    if has(ua, "Mac OS X") {
        return (Some("OS X"), version_after(ua, "Mac OS X "));
    }
    if has(ua, "Linux") {
        return (Some("Linux"), None);
    }
    (None, None)
}

fn detect_browser(ua: &str, os: Option<&str>) -> (BrowserFamily, Option<f64>) {
    let mobile = has(ua, "Mobile") || has(ua, "Windows Phone");

    for marker in ["Edge/", "EdgA/", "EdgiOS/", "Edg/"] {
        if has(ua, marker) {
            let family = if mobile {
                BrowserFamily::EdgeMobile
            } else {
                BrowserFamily::Edge
            };
            return (family, version_after(ua, marker));
        }
    }

    if has(ua, "IEMobile/") {
        return (BrowserFamily::IeMobile, version_after(ua, "IEMobile/"));
    }
    if has(ua, "MSIE ") {
        return (BrowserFamily::Ie, version_after(ua, "MSIE "));
    }
    if has(ua, "Trident/") {
        return (BrowserFamily::Ie, version_after(ua, "rv:"));
    }

    if has(ua, "OPR/") {
        return (BrowserFamily::Opera, version_after(ua, "OPR/"));
    }
    if has(ua, "Opera") {
        let version = version_after(ua, "Version/")
            .or_else(|| version_after(ua, "Opera/"))
            .or_else(|| version_after(ua, "Opera "));
        return (BrowserFamily::Opera, version);
    }

    if has(ua, "FxiOS/") {
        return (BrowserFamily::FirefoxIos, version_after(ua, "FxiOS/"));
    }
    if has(ua, "CriOS/") {
        return (BrowserFamily::ChromeMobile, version_after(ua, "CriOS/"));
    }

    if has(ua, "Firefox/") {
        let version = version_after(ua, "Firefox/");
        let family = if matches!(os, Some(OS_ANDROID) | Some(OS_FIREFOX_OS)) {
            BrowserFamily::FirefoxMobile
        } else {
            BrowserFamily::Firefox
        };
        return (family, version);
    }

    for marker in ["Chrome/", "Chromium/"] {
        if has(ua, marker) {
            let family = if os == Some(OS_ANDROID) {
                BrowserFamily::ChromeMobile
            } else {
                BrowserFamily::Chrome
            };
            return (family, version_after(ua, marker));
        }
    }

    if os == Some(OS_ANDROID) && has(ua, "AppleWebKit/") {
        return (BrowserFamily::AndroidBrowser, version_after(ua, "Version/"));
    }

    if has(ua, "Safari/") || (os == Some(OS_IOS) && has(ua, "AppleWebKit/")) {
        return (BrowserFamily::Safari, version_after(ua, "Version/"));
    }

    (BrowserFamily::Unknown, None)
}

impl UserAgentParser for PlatformParser {
    fn parse(&self, user_agent: &str) -> BrowserDescriptor {
        let (os_family, os_version) = detect_os(user_agent);
        let (family, version) = detect_browser(user_agent, os_family);

        if family == BrowserFamily::Unknown {
            return BrowserDescriptor::unknown();
        }

        BrowserDescriptor {
            family,
            version,
            os_family: os_family.map(str::to_owned),
            os_version,
        }
    }
}
