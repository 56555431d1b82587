use crate::constants::{NONCE_PREFIX, SUFFIX_QUOTE};
use crate::security::nonce::RequestNonce;
use actix_web::dev::ResponseHead;
use actix_web::{HttpMessage, HttpRequest};
use std::{borrow::Cow, fmt, sync::Arc};

/// What a dynamic value gets to look at while a response is being finished.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    request: &'a HttpRequest,
    response: Option<&'a ResponseHead>,
}

impl<'a> RequestContext<'a> {
    #[inline]
    pub fn new(request: &'a HttpRequest) -> Self {
        Self {
            request,
            response: None,
        }
    }

    #[inline]
    pub fn with_response(mut self, response: &'a ResponseHead) -> Self {
        self.response = Some(response);
        self
    }

    #[inline]
    pub fn request(&self) -> &'a HttpRequest {
        self.request
    }

    #[inline]
    pub fn response(&self) -> Option<&'a ResponseHead> {
        self.response
    }

    /// The nonce the middleware generated for this request, if any.
    pub fn nonce(&self) -> Option<String> {
        self.request
            .extensions()
            .get::<RequestNonce>()
            .map(|nonce| nonce.0.clone())
    }
}

impl fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("path", &self.request.path())
            .field("status", &self.response.map(|head| head.status))
            .finish()
    }
}

pub type DynamicSourceFn = Arc<dyn Fn(&RequestContext<'_>) -> String + Send + Sync + 'static>;
pub type DynamicValueFn = Arc<dyn Fn(&RequestContext<'_>) -> ResolvedValue + Send + Sync + 'static>;
pub type DynamicFlagFn = Arc<dyn Fn(&RequestContext<'_>) -> bool + Send + Sync + 'static>;

/// One entry of a source list.
#[derive(Clone)]
pub enum SourceExpr {
    Literal(Cow<'static, str>),
    Dynamic(DynamicSourceFn),
}

impl SourceExpr {
    #[inline]
    pub fn literal(value: impl Into<Cow<'static, str>>) -> Self {
        SourceExpr::Literal(value.into())
    }

    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&RequestContext<'_>) -> String + Send + Sync + 'static,
    {
        SourceExpr::Dynamic(Arc::new(f))
    }

    /// `'nonce-<value>'` for the per-request nonce. Resolves to nothing when
    /// the middleware was not configured to generate nonces.
    pub fn nonce() -> Self {
        Self::dynamic(|ctx| {
            ctx.nonce()
                .map(|nonce| format!("{}{}{}", NONCE_PREFIX, nonce, SUFFIX_QUOTE))
                .unwrap_or_default()
        })
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, SourceExpr::Dynamic(_))
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            SourceExpr::Literal(value) => Some(value),
            SourceExpr::Dynamic(_) => None,
        }
    }
}

impl From<&'static str> for SourceExpr {
    fn from(value: &'static str) -> Self {
        SourceExpr::Literal(Cow::Borrowed(value))
    }
}

impl From<String> for SourceExpr {
    fn from(value: String) -> Self {
        SourceExpr::Literal(Cow::Owned(value))
    }
}

impl fmt::Debug for SourceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceExpr::Literal(value) => write!(f, "{:?}", value),
            SourceExpr::Dynamic(_) => f.write_str("<dynamic>"),
        }
    }
}

impl fmt::Display for SourceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceExpr::Literal(value) => f.write_str(value),
            SourceExpr::Dynamic(_) => f.write_str("[dynamic]"),
        }
    }
}

/// A directive value as configured.
#[derive(Clone)]
pub enum DirectiveValue {
    /// `true`: a flag directive such as `upgrade-insecure-requests`.
    Enabled,
    /// `false`: the directive is left out of the policy.
    Disabled,
    Literal(Cow<'static, str>),
    List(Vec<SourceExpr>),
    Dynamic(DynamicValueFn),
}

impl DirectiveValue {
    pub fn list<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceExpr>,
    {
        DirectiveValue::List(sources.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn literal(value: impl Into<Cow<'static, str>>) -> Self {
        DirectiveValue::Literal(value.into())
    }

    pub fn dynamic<F, R>(f: F) -> Self
    where
        F: Fn(&RequestContext<'_>) -> R + Send + Sync + 'static,
        R: Into<ResolvedValue>,
    {
        DirectiveValue::Dynamic(Arc::new(move |ctx: &RequestContext<'_>| -> ResolvedValue {
            f(ctx).into()
        }))
    }

    /// True when resolving this value calls user code.
    pub fn is_dynamic(&self) -> bool {
        match self {
            DirectiveValue::Dynamic(_) => true,
            DirectiveValue::List(sources) => sources.iter().any(SourceExpr::is_dynamic),
            _ => false,
        }
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        matches!(self, DirectiveValue::Disabled)
    }
}

impl From<bool> for DirectiveValue {
    fn from(value: bool) -> Self {
        if value {
            DirectiveValue::Enabled
        } else {
            DirectiveValue::Disabled
        }
    }
}

impl From<&'static str> for DirectiveValue {
    fn from(value: &'static str) -> Self {
        DirectiveValue::Literal(Cow::Borrowed(value))
    }
}

impl From<String> for DirectiveValue {
    fn from(value: String) -> Self {
        DirectiveValue::Literal(Cow::Owned(value))
    }
}

impl<S: Into<SourceExpr>> From<Vec<S>> for DirectiveValue {
    fn from(sources: Vec<S>) -> Self {
        DirectiveValue::list(sources)
    }
}

impl<S: Into<SourceExpr>, const N: usize> From<[S; N]> for DirectiveValue {
    fn from(sources: [S; N]) -> Self {
        DirectiveValue::list(sources)
    }
}

impl fmt::Debug for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Enabled => f.write_str("Enabled"),
            DirectiveValue::Disabled => f.write_str("Disabled"),
            DirectiveValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DirectiveValue::List(sources) => f.debug_tuple("List").field(sources).finish(),
            DirectiveValue::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Enabled => f.write_str("true"),
            DirectiveValue::Disabled => f.write_str("false"),
            DirectiveValue::Literal(value) => f.write_str(value),
            DirectiveValue::List(sources) => {
                let mut first = true;
                for source in sources {
                    if !first {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", source)?;
                    first = false;
                }
                Ok(())
            }
            DirectiveValue::Dynamic(_) => f.write_str("[dynamic]"),
        }
    }
}

/// A directive value after every dynamic part has been evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedValue {
    Flag(bool),
    Token(Cow<'static, str>),
    List(Vec<Cow<'static, str>>),
}

impl ResolvedValue {
    #[inline]
    pub fn is_disabled(&self) -> bool {
        matches!(self, ResolvedValue::Flag(false))
    }

    /// Whether `token` appears in the value.
    pub fn contains(&self, token: &str) -> bool {
        match self {
            ResolvedValue::Flag(_) => false,
            ResolvedValue::Token(value) => value.split_whitespace().any(|t| t == token),
            ResolvedValue::List(values) => values.iter().any(|v| v == token),
        }
    }
}

impl From<bool> for ResolvedValue {
    fn from(value: bool) -> Self {
        ResolvedValue::Flag(value)
    }
}

impl From<&'static str> for ResolvedValue {
    fn from(value: &'static str) -> Self {
        ResolvedValue::Token(Cow::Borrowed(value))
    }
}

impl From<String> for ResolvedValue {
    fn from(value: String) -> Self {
        ResolvedValue::Token(Cow::Owned(value))
    }
}

impl From<Vec<String>> for ResolvedValue {
    fn from(values: Vec<String>) -> Self {
        ResolvedValue::List(values.into_iter().map(Cow::Owned).collect())
    }
}

impl From<Vec<&'static str>> for ResolvedValue {
    fn from(values: Vec<&'static str>) -> Self {
        ResolvedValue::List(values.into_iter().map(Cow::Borrowed).collect())
    }
}

/// Whether the policy headers get the `-Report-Only` suffix.
#[derive(Clone)]
pub enum ReportOnly {
    Static(bool),
    Dynamic(DynamicFlagFn),
}

impl ReportOnly {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&RequestContext<'_>) -> bool + Send + Sync + 'static,
    {
        ReportOnly::Dynamic(Arc::new(f))
    }

    #[inline]
    pub fn evaluate(&self, ctx: &RequestContext<'_>) -> bool {
        match self {
            ReportOnly::Static(value) => *value,
            ReportOnly::Dynamic(f) => f(ctx),
        }
    }
}

impl Default for ReportOnly {
    fn default() -> Self {
        ReportOnly::Static(false)
    }
}

impl From<bool> for ReportOnly {
    fn from(value: bool) -> Self {
        ReportOnly::Static(value)
    }
}

impl fmt::Debug for ReportOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportOnly::Static(value) => f.debug_tuple("Static").field(value).finish(),
            ReportOnly::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}
