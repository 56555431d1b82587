pub mod csp;
pub mod extensions;

pub use csp::{CspMiddleware, CspMiddlewareService};
pub use extensions::CspExtensions;

pub use csp::{configure_csp, csp_middleware, csp_middleware_with_nonce};
