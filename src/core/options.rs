use crate::core::schema::{self, ValueKind};
use crate::core::validate;
use crate::core::value::{DirectiveValue, ReportOnly, SourceExpr};
use crate::error::CspError;
use crate::utils::dashify;
use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;

pub type Directives = IndexMap<Cow<'static, str>, DirectiveValue>;

/// A validated policy configuration.
///
/// Directive keys are kept in wire form (`script-src`) in the order they were
/// first supplied.
#[derive(Debug, Clone)]
pub struct CspOptions {
    directives: Directives,
    browser_sniff: bool,
    set_all_headers: bool,
    disable_android: bool,
    report_only: ReportOnly,
    loose: bool,
}

impl CspOptions {
    #[inline]
    pub fn builder() -> CspOptionsBuilder {
        CspOptionsBuilder::new()
    }

    #[inline]
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    #[inline]
    pub fn directive(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives.get(dashify(name).as_ref())
    }

    #[inline]
    pub fn browser_sniff(&self) -> bool {
        self.browser_sniff
    }

    #[inline]
    pub fn set_all_headers(&self) -> bool {
        self.set_all_headers
    }

    #[inline]
    pub fn disable_android(&self) -> bool {
        self.disable_android
    }

    #[inline]
    pub fn report_only(&self) -> &ReportOnly {
        &self.report_only
    }

    #[inline]
    pub fn is_loose(&self) -> bool {
        self.loose
    }

    /// True when any directive has to be computed per request.
    pub fn has_dynamic_directives(&self) -> bool {
        self.directives.values().any(DirectiveValue::is_dynamic)
    }

    pub fn from_json_str(input: &str) -> Result<Self, CspError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| CspError::SerializationError(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Reads options from a JSON document shaped like
    /// `{"directives": {"defaultSrc": ["'self'"]}, "reportOnly": true}`.
    pub fn from_json(value: &Value) -> Result<Self, CspError> {
        let object = value.as_object().ok_or(CspError::ConfigNotObject)?;
        let raw_directives = object
            .get("directives")
            .and_then(Value::as_object)
            .ok_or(CspError::DirectivesMissing)?;

        let flag = |key: &str, default: bool| {
            object
                .get(key)
                .and_then(Value::as_bool)
                .unwrap_or(default)
        };
        let loose = flag("loose", false);

        let mut builder = CspOptionsBuilder::new()
            .directives(Directives::new())
            .browser_sniff(flag("browserSniff", true))
            .set_all_headers(flag("setAllHeaders", false))
            .disable_android(flag("disableAndroid", false))
            .report_only(flag("reportOnly", false))
            .loose(loose);

        for (name, raw) in raw_directives {
            let kind = if loose {
                None
            } else {
                let spec =
                    schema::lookup(name).ok_or_else(|| CspError::UnknownDirective(name.clone()))?;
                Some(spec.kind)
            };

            let value = directive_from_json(&dashify(name), kind, raw)?;
            if !loose {
                validate::validate_directive(name, &value)?;
            }
            builder = builder.directive(name.clone(), value);
        }

        builder.build()
    }
}

fn shape_error(name: &str, kind: Option<ValueKind>, raw: &Value) -> CspError {
    match kind {
        Some(ValueKind::SourceList)
        | Some(ValueKind::PluginTypes)
        | Some(ValueKind::Sandbox)
        | Some(ValueKind::RequireSriFor) => CspError::not_array(name, raw),
        _ => CspError::not_valid_value(name, raw),
    }
}

fn directive_from_json(
    name: &str,
    kind: Option<ValueKind>,
    raw: &Value,
) -> Result<DirectiveValue, CspError> {
    match raw {
        Value::Bool(flag) => Ok(DirectiveValue::from(*flag)),
        Value::String(literal) => Ok(DirectiveValue::literal(literal.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(source) => Ok(SourceExpr::literal(source.clone())),
                other => Err(CspError::not_valid_value(name, other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DirectiveValue::List),
        other => Err(shape_error(name, kind, other)),
    }
}

#[derive(Debug, Default)]
pub struct CspOptionsBuilder {
    directives: Option<Directives>,
    browser_sniff: Option<bool>,
    set_all_headers: bool,
    disable_android: bool,
    report_only: ReportOnly,
    loose: bool,
}

impl CspOptionsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one directive. camelCase keys are stored in wire form.
    pub fn directive(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<DirectiveValue>,
    ) -> Self {
        let name = name.into();
        let dashed = match dashify(&name) {
            Cow::Owned(dashed) => Some(dashed),
            Cow::Borrowed(_) => None,
        };
        let key = dashed.map(Cow::Owned).unwrap_or(name);
        self.directives
            .get_or_insert_with(Directives::new)
            .insert(key, value.into());
        self
    }

    /// Replaces the whole directive map.
    pub fn directives<I, K, V>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<DirectiveValue>,
    {
        self.directives = Some(Directives::new());
        for (name, value) in directives {
            self = self.directive(name, value);
        }
        self
    }

    pub fn default_src(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("default-src", value)
    }

    pub fn script_src(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("script-src", value)
    }

    pub fn style_src(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("style-src", value)
    }

    pub fn img_src(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("img-src", value)
    }

    pub fn connect_src(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("connect-src", value)
    }

    pub fn object_src(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("object-src", value)
    }

    pub fn report_uri(self, value: impl Into<DirectiveValue>) -> Self {
        self.directive("report-uri", value)
    }

    pub fn upgrade_insecure_requests(self) -> Self {
        self.directive("upgrade-insecure-requests", DirectiveValue::Enabled)
    }

    #[inline]
    pub fn browser_sniff(mut self, enabled: bool) -> Self {
        self.browser_sniff = Some(enabled);
        self
    }

    #[inline]
    pub fn set_all_headers(mut self, enabled: bool) -> Self {
        self.set_all_headers = enabled;
        self
    }

    #[inline]
    pub fn disable_android(mut self, disabled: bool) -> Self {
        self.disable_android = disabled;
        self
    }

    #[inline]
    pub fn report_only(mut self, report_only: impl Into<ReportOnly>) -> Self {
        self.report_only = report_only.into();
        self
    }

    #[inline]
    pub fn loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    pub fn build(self) -> Result<CspOptions, CspError> {
        let directives = self.directives.ok_or(CspError::DirectivesMissing)?;
        let options = CspOptions {
            directives,
            browser_sniff: self.browser_sniff.unwrap_or(true),
            set_all_headers: self.set_all_headers,
            disable_android: self.disable_android,
            report_only: self.report_only,
            loose: self.loose,
        };

        validate::validate(&options)?;
        Ok(options)
    }
}
