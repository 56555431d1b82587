use crate::browser::descriptor::{BrowserDescriptor, BrowserFamily, OS_ANDROID, OS_FIREFOX_OS, OS_IOS};
use crate::constants::{
    HEADER_CSP, HEADER_CSP_REPORT_ONLY, HEADER_WEBKIT_CSP, HEADER_WEBKIT_CSP_REPORT_ONLY,
    HEADER_X_CSP, HEADER_X_CSP_REPORT_ONLY,
};
use actix_web::http::header::HeaderName;
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// One of the three header names a CSP has been delivered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CspHeader {
    /// `Content-Security-Policy`
    Standard,
    /// `X-Content-Security-Policy`, Firefox 4-22 and IE 10-11.
    Mozilla,
    /// `X-WebKit-CSP`, Chrome 14-24 and Safari 6.
    WebKit,
}

pub type HeaderSet = SmallVec<[CspHeader; 3]>;

pub const ALL_HEADERS: [CspHeader; 3] = [CspHeader::Standard, CspHeader::Mozilla, CspHeader::WebKit];

impl CspHeader {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CspHeader::Standard => "Content-Security-Policy",
            CspHeader::Mozilla => "X-Content-Security-Policy",
            CspHeader::WebKit => "X-WebKit-CSP",
        }
    }

    pub fn header_name(&self, report_only: bool) -> HeaderName {
        HeaderName::from_static(match (self, report_only) {
            (CspHeader::Standard, false) => HEADER_CSP,
            (CspHeader::Standard, true) => HEADER_CSP_REPORT_ONLY,
            (CspHeader::Mozilla, false) => HEADER_X_CSP,
            (CspHeader::Mozilla, true) => HEADER_X_CSP_REPORT_ONLY,
            (CspHeader::WebKit, false) => HEADER_WEBKIT_CSP,
            (CspHeader::WebKit, true) => HEADER_WEBKIT_CSP_REPORT_ONLY,
        })
    }
}

impl fmt::Display for CspHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
pub fn all_headers() -> HeaderSet {
    SmallVec::from_buf(ALL_HEADERS)
}

#[inline]
fn standard() -> HeaderSet {
    smallvec![CspHeader::Standard]
}

#[inline]
fn only(header: CspHeader) -> HeaderSet {
    smallvec![header]
}

/// Picks the header names `browser` understands. An empty set means the
/// browser cannot use any form of the policy.
pub fn select_headers(browser: &BrowserDescriptor, disable_android: bool) -> HeaderSet {
    match &browser.family {
        BrowserFamily::AndroidBrowser => android(browser, disable_android),
        BrowserFamily::Chrome => {
            if browser.version_at_least(25.0) {
                standard()
            } else if browser.version_at_least(14.0) {
                only(CspHeader::WebKit)
            } else {
                HeaderSet::new()
            }
        }
        BrowserFamily::ChromeMobile => {
            if browser.os_is(OS_IOS) {
                standard()
            } else {
                android(browser, disable_android)
            }
        }
        BrowserFamily::Firefox => {
            if browser.version_at_least(23.0) {
                standard()
            } else if browser.version_at_least(4.0) {
                only(CspHeader::Mozilla)
            } else {
                HeaderSet::new()
            }
        }
        BrowserFamily::FirefoxMobile => {
            let legacy_below = if browser.os_is(OS_FIREFOX_OS) {
                32.0
            } else if browser.os_is(OS_ANDROID) {
                25.0
            } else {
                return HeaderSet::new();
            };

            if browser.version_below(legacy_below) {
                only(CspHeader::Mozilla)
            } else {
                standard()
            }
        }
        BrowserFamily::FirefoxIos | BrowserFamily::Edge | BrowserFamily::EdgeMobile => standard(),
        BrowserFamily::Ie | BrowserFamily::IeMobile => {
            if browser.version_below(12.0) {
                only(CspHeader::Mozilla)
            } else {
                standard()
            }
        }
        BrowserFamily::Opera => {
            if browser.version_at_least(15.0) {
                standard()
            } else {
                HeaderSet::new()
            }
        }
        BrowserFamily::Safari => {
            if browser.version_at_least(7.0) {
                standard()
            } else if browser.version_at_least(6.0) {
                only(CspHeader::WebKit)
            } else {
                HeaderSet::new()
            }
        }
        BrowserFamily::Other(_) | BrowserFamily::Unknown => all_headers(),
    }
}

fn android(browser: &BrowserDescriptor, disable_android: bool) -> HeaderSet {
    let old_os = browser.os_version.is_some_and(|v| v < 4.4);
    if old_os || disable_android {
        HeaderSet::new()
    } else {
        standard()
    }
}
