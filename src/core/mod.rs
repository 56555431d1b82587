pub mod cache;
pub mod config;
pub mod options;
pub mod plan;
pub mod resolve;
pub mod schema;
pub mod serialize;
pub mod validate;
pub mod value;

pub use cache::PolicyCache;
pub use config::{CspConfig, CspConfigBuilder};
pub use options::{CspOptions, CspOptionsBuilder, Directives};
pub use plan::HeaderPlan;
pub use resolve::{resolve, ResolvedDirectives};
pub use schema::{lookup, DirectiveSpec, ValueKind, DIRECTIVES};
pub use serialize::{parse_policy, serialize};
pub use validate::{validate, validate_directive};
pub use value::{DirectiveValue, ReportOnly, RequestContext, ResolvedValue, SourceExpr};
