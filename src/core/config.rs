use crate::browser::header::{all_headers, CspHeader, HeaderSet};
use crate::browser::{plan_for_browser, BrowserDescriptor, PlatformParser, UserAgentParser};
use crate::constants::DEFAULT_POLICY_CACHE_ENTRIES;
use crate::core::cache::PolicyCache;
use crate::core::options::CspOptions;
use crate::core::plan::HeaderPlan;
use crate::core::resolve::{resolve, resolve_static, ResolvedDirectives};
use crate::core::serialize::serialize;
use crate::core::value::RequestContext;
use crate::error::CspError;
use crate::monitoring::stats::CspStats;
use crate::security::nonce::NonceGenerator;
use smallvec::smallvec;
use std::sync::Arc;

/// A compiled policy: validated options plus everything needed to answer
/// "which headers does this request get".
#[derive(Clone)]
pub struct CspConfig {
    options: Arc<CspOptions>,
    dynamic: bool,
    no_sniff_headers: HeaderSet,
    static_directives: Option<Arc<ResolvedDirectives>>,
    static_plan: Option<Arc<HeaderPlan>>,
    cache: Arc<PolicyCache>,
    parser: Arc<dyn UserAgentParser>,
    nonce_generator: Option<Arc<NonceGenerator>>,
    stats: Arc<CspStats>,
}

impl CspConfig {
    pub fn new(options: CspOptions) -> Result<Self, CspError> {
        CspConfigBuilder::new().options(options).build()
    }

    #[inline]
    pub fn builder() -> CspConfigBuilder {
        CspConfigBuilder::new()
    }

    #[inline]
    pub fn options(&self) -> &CspOptions {
        &self.options
    }

    /// True when directives are recomputed for every request.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    #[inline]
    pub fn stats(&self) -> &Arc<CspStats> {
        &self.stats
    }

    #[inline]
    pub fn cache(&self) -> &Arc<PolicyCache> {
        &self.cache
    }

    #[inline]
    pub fn nonce_generator(&self) -> Option<&Arc<NonceGenerator>> {
        self.nonce_generator.as_ref()
    }

    /// Header names and policy for a request with the given `User-Agent`.
    pub fn plan(
        &self,
        user_agent: Option<&str>,
        ctx: &RequestContext<'_>,
    ) -> Result<Arc<HeaderPlan>, CspError> {
        self.stats.increment_request_count();

        let sniffed = user_agent.filter(|ua| self.options.browser_sniff() && !ua.is_empty());
        let Some(user_agent) = sniffed else {
            if let Some(plan) = &self.static_plan {
                return Ok(plan.clone());
            }
            let policy = serialize(&self.resolve(ctx));
            return HeaderPlan::new(self.no_sniff_headers.clone(), policy).map(Arc::new);
        };

        if !self.dynamic {
            if let Some(plan) = self.cache.get(user_agent) {
                self.stats.increment_cache_hit_count();
                log::debug!("CSP plan cache hit for user agent {:?}", user_agent);
                return Ok(plan);
            }
            self.stats.increment_cache_miss_count();
        }

        let browser = self.parser.parse(user_agent);
        let plan = self.plan_for_browser(&browser, ctx)?;

        if !self.dynamic {
            self.cache.insert(user_agent, plan.clone());
        }

        Ok(plan)
    }

    /// Whether this request's headers get the `-Report-Only` suffix.
    #[inline]
    pub fn is_report_only(&self, ctx: &RequestContext<'_>) -> bool {
        self.options.report_only().evaluate(ctx)
    }

    /// Fresh nonce for one request, or `None` when nonces are not enabled.
    pub fn generate_nonce(&self) -> Result<Option<String>, CspError> {
        let Some(generator) = &self.nonce_generator else {
            return Ok(None);
        };
        let nonce = generator.generate()?;
        self.stats.increment_nonce_generation_count();
        Ok(Some(nonce))
    }

    fn plan_for_browser(
        &self,
        browser: &BrowserDescriptor,
        ctx: &RequestContext<'_>,
    ) -> Result<Arc<HeaderPlan>, CspError> {
        self.stats.increment_browser_plan_count();

        let (headers, directives) = plan_for_browser(
            browser,
            self.options.set_all_headers(),
            self.options.disable_android(),
            || self.resolve(ctx),
        );

        let Some(directives) = directives else {
            self.stats.increment_suppressed_count();
            log::debug!(
                "no CSP header understood by {} {:?}",
                browser.family,
                browser.version
            );
            return HeaderPlan::new(headers, String::new()).map(Arc::new);
        };

        HeaderPlan::new(headers, serialize(&directives)).map(Arc::new)
    }

    fn resolve(&self, ctx: &RequestContext<'_>) -> ResolvedDirectives {
        match &self.static_directives {
            Some(directives) => directives.as_ref().clone(),
            None => {
                self.stats.increment_dynamic_resolution_count();
                resolve(self.options.directives(), ctx)
            }
        }
    }
}

#[derive(Default)]
pub struct CspConfigBuilder {
    options: Option<CspOptions>,
    cache_size: Option<usize>,
    parser: Option<Arc<dyn UserAgentParser>>,
    nonce_length: Option<usize>,
    nonce_generator: Option<Arc<NonceGenerator>>,
    stats: Option<Arc<CspStats>>,
}

impl CspConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn options(mut self, options: CspOptions) -> Self {
        self.options = Some(options);
        self
    }

    #[inline]
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }

    #[inline]
    pub fn with_parser(mut self, parser: impl UserAgentParser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    #[inline]
    pub fn with_shared_parser(mut self, parser: Arc<dyn UserAgentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    #[inline]
    pub fn with_nonce_generator(mut self, length: usize) -> Self {
        self.nonce_length = Some(length);
        self
    }

    #[inline]
    pub fn with_prebuilt_nonce_generator(mut self, generator: Arc<NonceGenerator>) -> Self {
        self.nonce_generator = Some(generator);
        self
    }

    #[inline]
    pub fn with_stats(mut self, stats: Arc<CspStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn build(self) -> Result<CspConfig, CspError> {
        let options = self.options.ok_or(CspError::DirectivesMissing)?;
        let dynamic = options.has_dynamic_directives();

        let no_sniff_headers: HeaderSet = if options.set_all_headers() {
            all_headers()
        } else {
            smallvec![CspHeader::Standard]
        };

        let (static_directives, static_plan) = if dynamic {
            (None, None)
        } else {
            let directives = resolve_static(options.directives());
            let plan = HeaderPlan::new(no_sniff_headers.clone(), serialize(&directives))?;
            (Some(Arc::new(directives)), Some(Arc::new(plan)))
        };

        let nonce_generator = self.nonce_generator.or_else(|| {
            self.nonce_length
                .map(|length| Arc::new(NonceGenerator::with_capacity(8, length)))
        });

        Ok(CspConfig {
            options: Arc::new(options),
            dynamic,
            no_sniff_headers,
            static_directives,
            static_plan,
            cache: Arc::new(PolicyCache::new(
                self.cache_size.unwrap_or(DEFAULT_POLICY_CACHE_ENTRIES),
            )),
            parser: self
                .parser
                .unwrap_or_else(|| Arc::new(PlatformParser::new())),
            nonce_generator,
            stats: self.stats.unwrap_or_default(),
        })
    }
}
