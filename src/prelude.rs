pub use crate::browser::{BrowserDescriptor, BrowserFamily, UserAgentParser};
pub use crate::core::{
    CspConfig, CspConfigBuilder, CspOptions, DirectiveValue, ReportOnly, RequestContext,
    SourceExpr,
};
pub use crate::error::CspError;
pub use crate::middleware::{
    configure_csp, csp_middleware, csp_middleware_with_nonce, CspExtensions, CspMiddleware,
};
pub use crate::monitoring::CspStats;
pub use crate::security::NonceGenerator;
