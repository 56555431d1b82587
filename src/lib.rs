pub mod browser;
pub mod constants;
pub mod core;
pub mod error;
pub mod middleware;
pub mod monitoring;
pub mod prelude;
pub mod security;
pub mod utils;

// Re-export commonly used types for convenience
pub use browser::{BrowserDescriptor, BrowserFamily, CspHeader, PlatformParser, UserAgentParser};
pub use core::{
    CspConfig, CspConfigBuilder, CspOptions, CspOptionsBuilder, DirectiveValue, HeaderPlan,
    ReportOnly, RequestContext, ResolvedValue, SourceExpr,
};
pub use error::CspError;
pub use middleware::{
    configure_csp, csp_middleware, csp_middleware_with_nonce, CspExtensions, CspMiddleware,
};
pub use monitoring::CspStats;
pub use security::{NonceGenerator, RequestNonce};
