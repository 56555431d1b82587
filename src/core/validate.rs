//! Setup-time checks of a directive map against the schema registry.
//!
//! Every check stops at the first violation. Shape problems are reported
//! before any element is looked at, and elements are checked in order.

use crate::constants::{
    MUST_QUOTE, REQUIRE_SRI_FOR_VALUES, SANDBOX_TOKENS, SELFS, STRICT_DYNAMICS, UNSAFES,
};
use crate::core::options::CspOptions;
use crate::core::schema::{self, DirectiveSpec, ValueKind};
use crate::core::value::{DirectiveValue, SourceExpr};
use crate::error::CspError;

pub fn validate(options: &CspOptions) -> Result<(), CspError> {
    if options.directives().is_empty() {
        return Err(CspError::DirectivesEmpty);
    }

    if options.is_loose() {
        log::warn!("CSP directive validation is disabled by the loose option");
        return Ok(());
    }

    for (name, value) in options.directives() {
        validate_directive(name, value)?;
    }

    Ok(())
}

/// Validates one directive. `name` may be camelCase or wire form.
pub fn validate_directive(name: &str, value: &DirectiveValue) -> Result<(), CspError> {
    let spec = schema::lookup(name).ok_or_else(|| CspError::UnknownDirective(name.to_owned()))?;

    match spec.kind {
        ValueKind::SourceList => check_source_list(spec, value),
        ValueKind::Boolean => check_boolean(spec, value),
        ValueKind::PluginTypes => check_plugin_types(spec, value),
        ValueKind::Sandbox => check_sandbox(spec, value),
        ValueKind::ReportUri => check_report_uri(spec, value),
        ValueKind::RequireSriFor => check_require_sri_for(spec, value),
    }
}

#[inline]
fn contains(set: &[&str], value: &str) -> bool {
    set.iter().any(|candidate| *candidate == value)
}

/// Returns the non-empty list of a list-shaped directive.
fn non_empty_list<'a>(
    spec: &DirectiveSpec,
    value: &'a DirectiveValue,
) -> Result<&'a [SourceExpr], CspError> {
    match value {
        DirectiveValue::List(sources) if !sources.is_empty() => Ok(sources),
        other => Err(CspError::not_array(spec.name, other)),
    }
}

/// Literal element of a list; empty strings are rejected.
fn literal_element<'a>(spec: &DirectiveSpec, source: &'a SourceExpr) -> Result<Option<&'a str>, CspError> {
    match source.as_literal() {
        None => Ok(None),
        Some("") => Err(CspError::not_valid_value(spec.name, "")),
        Some(literal) => Ok(Some(literal)),
    }
}

fn check_source_list(spec: &DirectiveSpec, value: &DirectiveValue) -> Result<(), CspError> {
    if value.is_disabled() {
        return Ok(());
    }

    for source in non_empty_list(spec, value)? {
        let Some(expr) = literal_element(spec, source)? else {
            continue;
        };

        if (!spec.has_unsafes && contains(UNSAFES, expr))
            || (!spec.has_strict_dynamic && contains(STRICT_DYNAMICS, expr))
        {
            return Err(CspError::not_make_sense(spec.name, expr));
        }
        if contains(MUST_QUOTE, expr) {
            return Err(CspError::must_quote(spec.name, expr));
        }
    }

    Ok(())
}

fn check_boolean(spec: &DirectiveSpec, value: &DirectiveValue) -> Result<(), CspError> {
    match value {
        DirectiveValue::Enabled | DirectiveValue::Disabled => Ok(()),
        other => Err(CspError::not_valid_value(spec.name, other)),
    }
}

fn check_plugin_types(spec: &DirectiveSpec, value: &DirectiveValue) -> Result<(), CspError> {
    if value.is_disabled() {
        return Ok(());
    }

    for source in non_empty_list(spec, value)? {
        let Some(plugin_type) = literal_element(spec, source)? else {
            continue;
        };

        if contains(UNSAFES, plugin_type) || contains(SELFS, plugin_type) {
            return Err(CspError::not_make_sense(spec.name, plugin_type));
        }
        if contains(MUST_QUOTE, plugin_type) {
            return Err(CspError::must_quote(spec.name, plugin_type));
        }
    }

    Ok(())
}

fn check_sandbox(spec: &DirectiveSpec, value: &DirectiveValue) -> Result<(), CspError> {
    if matches!(value, DirectiveValue::Enabled | DirectiveValue::Disabled) {
        return Ok(());
    }

    for source in non_empty_list(spec, value)? {
        if let Some(token) = source.as_literal() {
            if !contains(SANDBOX_TOKENS, token) {
                return Err(CspError::not_valid_value(spec.name, token));
            }
        }
    }

    Ok(())
}

fn check_report_uri(spec: &DirectiveSpec, value: &DirectiveValue) -> Result<(), CspError> {
    match value {
        DirectiveValue::Disabled | DirectiveValue::Dynamic(_) => Ok(()),
        DirectiveValue::Literal(uri) if !uri.is_empty() => Ok(()),
        other => Err(CspError::not_valid_value(spec.name, other)),
    }
}

fn check_require_sri_for(spec: &DirectiveSpec, value: &DirectiveValue) -> Result<(), CspError> {
    for source in non_empty_list(spec, value)? {
        if let Some(kind) = source.as_literal() {
            if !contains(REQUIRE_SRI_FOR_VALUES, kind) {
                return Err(CspError::not_valid_value(spec.name, kind));
            }
        }
    }

    Ok(())
}
