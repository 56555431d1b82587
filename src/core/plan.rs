use crate::browser::header::{CspHeader, HeaderSet};
use crate::error::CspError;
use actix_web::http::header::{HeaderName, HeaderValue};

/// The headers to write for one request and the policy they all carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPlan {
    headers: HeaderSet,
    policy: String,
    value: HeaderValue,
}

impl HeaderPlan {
    pub fn new(headers: HeaderSet, policy: String) -> Result<Self, CspError> {
        let value = HeaderValue::from_str(&policy)
            .map_err(|_| CspError::HeaderError(format!("invalid policy value: {:?}", policy)))?;
        Ok(Self {
            headers,
            policy,
            value,
        })
    }

    #[inline]
    pub fn headers(&self) -> &[CspHeader] {
        &self.headers
    }

    #[inline]
    pub fn policy(&self) -> &str {
        &self.policy
    }

    #[inline]
    pub fn header_value(&self) -> &HeaderValue {
        &self.value
    }

    /// True when the browser understands none of the header names.
    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.headers.is_empty()
    }

    /// `(name, value)` pairs ready to be inserted into a response.
    pub fn header_pairs(&self, report_only: bool) -> impl Iterator<Item = (HeaderName, HeaderValue)> + '_ {
        self.headers
            .iter()
            .map(move |header| (header.header_name(report_only), self.value.clone()))
    }
}
