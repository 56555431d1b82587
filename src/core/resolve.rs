use crate::core::options::Directives;
use crate::core::value::{DirectiveValue, RequestContext, ResolvedValue, SourceExpr};
use indexmap::IndexMap;
use std::borrow::Cow;

/// Concrete directive values for one request, keyed by wire name.
pub type ResolvedDirectives = IndexMap<Cow<'static, str>, ResolvedValue>;

/// Evaluates every dynamic part of `directives` against `ctx`.
///
/// Disabled directives, and dynamic directives that come back as `false`,
/// stay in place as `Flag(false)` so later rewrites see them; the serializer
/// skips them. Dynamic list elements that come back empty are dropped.
#[inline]
pub fn resolve(directives: &Directives, ctx: &RequestContext<'_>) -> ResolvedDirectives {
    resolve_with(directives, Some(ctx))
}

/// Resolution at setup time. Only meaningful for directive sets without
/// dynamic parts; any dynamic part is skipped.
#[inline]
pub(crate) fn resolve_static(directives: &Directives) -> ResolvedDirectives {
    resolve_with(directives, None)
}

fn resolve_with(directives: &Directives, ctx: Option<&RequestContext<'_>>) -> ResolvedDirectives {
    let mut resolved = ResolvedDirectives::with_capacity(directives.len());

    for (name, value) in directives {
        let value = match value {
            DirectiveValue::Disabled => ResolvedValue::Flag(false),
            DirectiveValue::Enabled => ResolvedValue::Flag(true),
            DirectiveValue::Literal(literal) => ResolvedValue::Token(literal.clone()),
            DirectiveValue::List(sources) => ResolvedValue::List(
                sources
                    .iter()
                    .filter_map(|source| match source {
                        SourceExpr::Literal(literal) => Some(literal.clone()),
                        SourceExpr::Dynamic(f) => {
                            let computed = f(ctx?);
                            (!computed.is_empty()).then_some(Cow::Owned(computed))
                        }
                    })
                    .collect(),
            ),
            DirectiveValue::Dynamic(f) => match ctx {
                Some(ctx) => f(ctx),
                None => continue,
            },
        };
        resolved.insert(name.clone(), value);
    }

    resolved
}
