use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser families the header and directive tables know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BrowserFamily {
    AndroidBrowser,
    Chrome,
    ChromeMobile,
    Firefox,
    FirefoxMobile,
    FirefoxIos,
    Ie,
    IeMobile,
    Edge,
    EdgeMobile,
    Opera,
    Safari,
    /// A named family outside the table.
    Other(String),
    /// The user agent could not be identified.
    Unknown,
}

impl BrowserFamily {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Android Browser" => Self::AndroidBrowser,
            "Chrome" => Self::Chrome,
            "Chrome Mobile" => Self::ChromeMobile,
            "Firefox" => Self::Firefox,
            "Firefox Mobile" => Self::FirefoxMobile,
            "Firefox for iOS" => Self::FirefoxIos,
            "IE" => Self::Ie,
            "IE Mobile" => Self::IeMobile,
            "Microsoft Edge" => Self::Edge,
            "Microsoft Edge Mobile" => Self::EdgeMobile,
            "Opera" => Self::Opera,
            "Safari" => Self::Safari,
            "" => Self::Unknown,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::AndroidBrowser => "Android Browser",
            Self::Chrome => "Chrome",
            Self::ChromeMobile => "Chrome Mobile",
            Self::Firefox => "Firefox",
            Self::FirefoxMobile => "Firefox Mobile",
            Self::FirefoxIos => "Firefox for iOS",
            Self::Ie => "IE",
            Self::IeMobile => "IE Mobile",
            Self::Edge => "Microsoft Edge",
            Self::EdgeMobile => "Microsoft Edge Mobile",
            Self::Opera => "Opera",
            Self::Safari => "Safari",
            Self::Other(name) => name,
            Self::Unknown => "",
        }
    }
}

impl From<String> for BrowserFamily {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BrowserFamily> for String {
    fn from(family: BrowserFamily) -> Self {
        family.name().to_owned()
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const OS_ANDROID: &str = "Android";
pub const OS_IOS: &str = "iOS";
pub const OS_FIREFOX_OS: &str = "Firefox OS";

/// What the header and directive tables need to know about a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserDescriptor {
    pub family: BrowserFamily,
    #[serde(default)]
    pub version: Option<f64>,
    #[serde(default)]
    pub os_family: Option<String>,
    #[serde(default)]
    pub os_version: Option<f64>,
}

impl BrowserDescriptor {
    pub fn new(family: BrowserFamily, version: impl Into<Option<f64>>) -> Self {
        Self {
            family,
            version: version.into(),
            os_family: None,
            os_version: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(BrowserFamily::Unknown, None)
    }

    pub fn with_os(mut self, family: impl Into<String>, version: impl Into<Option<f64>>) -> Self {
        self.os_family = Some(family.into());
        self.os_version = version.into();
        self
    }

    #[inline]
    pub fn os_is(&self, family: &str) -> bool {
        self.os_family.as_deref() == Some(family)
    }

    /// `version < bound`; false when the version is unknown.
    #[inline]
    pub(crate) fn version_below(&self, bound: f64) -> bool {
        self.version.is_some_and(|v| v < bound)
    }

    /// `version >= bound`; false when the version is unknown.
    #[inline]
    pub(crate) fn version_at_least(&self, bound: f64) -> bool {
        self.version.is_some_and(|v| v >= bound)
    }
}
