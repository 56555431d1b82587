//! The table of directives this crate knows how to validate.

use crate::utils::dashify;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Shape of the value a directive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    SourceList,
    Boolean,
    PluginTypes,
    Sandbox,
    ReportUri,
    RequireSriFor,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::SourceList => "source list",
            ValueKind::Boolean => "boolean",
            ValueKind::PluginTypes => "plugin types",
            ValueKind::Sandbox => "sandbox",
            ValueKind::ReportUri => "report uri",
            ValueKind::RequireSriFor => "require-sri-for",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    /// `'unsafe-inline'` and `'unsafe-eval'` are accepted.
    pub has_unsafes: bool,
    /// `'strict-dynamic'` is accepted.
    pub has_strict_dynamic: bool,
}

impl DirectiveSpec {
    const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            has_unsafes: false,
            has_strict_dynamic: false,
        }
    }

    const fn with_unsafes(mut self) -> Self {
        self.has_unsafes = true;
        self
    }

    const fn with_strict_dynamic(mut self) -> Self {
        self.has_strict_dynamic = true;
        self
    }
}

pub static DIRECTIVES: &[DirectiveSpec] = &[
    DirectiveSpec::new("base-uri", ValueKind::SourceList),
    DirectiveSpec::new("block-all-mixed-content", ValueKind::Boolean),
    DirectiveSpec::new("child-src", ValueKind::SourceList),
    DirectiveSpec::new("connect-src", ValueKind::SourceList),
    DirectiveSpec::new("default-src", ValueKind::SourceList).with_strict_dynamic(),
    DirectiveSpec::new("font-src", ValueKind::SourceList),
    DirectiveSpec::new("form-action", ValueKind::SourceList),
    DirectiveSpec::new("frame-ancestors", ValueKind::SourceList),
    DirectiveSpec::new("frame-src", ValueKind::SourceList),
    DirectiveSpec::new("img-src", ValueKind::SourceList),
    DirectiveSpec::new("manifest-src", ValueKind::SourceList),
    DirectiveSpec::new("media-src", ValueKind::SourceList),
    DirectiveSpec::new("object-src", ValueKind::SourceList),
    DirectiveSpec::new("plugin-types", ValueKind::PluginTypes),
    DirectiveSpec::new("prefetch-src", ValueKind::SourceList),
    DirectiveSpec::new("report-to", ValueKind::ReportUri),
    DirectiveSpec::new("report-uri", ValueKind::ReportUri),
    DirectiveSpec::new("require-sri-for", ValueKind::RequireSriFor),
    DirectiveSpec::new("sandbox", ValueKind::Sandbox),
    DirectiveSpec::new("script-src", ValueKind::SourceList)
        .with_unsafes()
        .with_strict_dynamic(),
    DirectiveSpec::new("style-src", ValueKind::SourceList).with_unsafes(),
    DirectiveSpec::new("upgrade-insecure-requests", ValueKind::Boolean),
    DirectiveSpec::new("worker-src", ValueKind::SourceList).with_unsafes(),
];

static REGISTRY: OnceLock<FxHashMap<&'static str, &'static DirectiveSpec>> = OnceLock::new();

fn registry() -> &'static FxHashMap<&'static str, &'static DirectiveSpec> {
    REGISTRY.get_or_init(|| {
        let mut map = FxHashMap::with_capacity_and_hasher(DIRECTIVES.len(), Default::default());
        for spec in DIRECTIVES {
            map.insert(spec.name, spec);
        }
        map
    })
}

/// Looks a directive up by wire name (`script-src`) or camelCase key
/// (`scriptSrc`).
pub fn lookup(name: &str) -> Option<&'static DirectiveSpec> {
    registry().get(dashify(name).as_ref()).copied()
}

#[inline]
pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}
