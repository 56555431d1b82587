use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug)]
pub struct CspStats {
    request_count: AtomicUsize,
    cache_hit_count: AtomicUsize,
    cache_miss_count: AtomicUsize,
    browser_plan_count: AtomicUsize,
    dynamic_resolution_count: AtomicUsize,
    suppressed_count: AtomicUsize,
    nonce_generation_count: AtomicUsize,
    header_generation_time_ns: AtomicUsize,
    start_time: Instant,
}

impl Default for CspStats {
    fn default() -> Self {
        Self {
            request_count: Default::default(),
            cache_hit_count: Default::default(),
            cache_miss_count: Default::default(),
            browser_plan_count: Default::default(),
            dynamic_resolution_count: Default::default(),
            suppressed_count: Default::default(),
            nonce_generation_count: Default::default(),
            header_generation_time_ns: Default::default(),
            start_time: Instant::now(),
        }
    }
}

impl CspStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cache_hit_count(&self) -> usize {
        self.cache_hit_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cache_miss_count(&self) -> usize {
        self.cache_miss_count.load(Ordering::Relaxed)
    }

    /// Number of times a user agent was parsed and a browser plan computed.
    #[inline]
    pub fn browser_plan_count(&self) -> usize {
        self.browser_plan_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dynamic_resolution_count(&self) -> usize {
        self.dynamic_resolution_count.load(Ordering::Relaxed)
    }

    /// Browser plans that ended up with no header at all.
    #[inline]
    pub fn suppressed_count(&self) -> usize {
        self.suppressed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn nonce_generation_count(&self) -> usize {
        self.nonce_generation_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn avg_header_generation_time_ns(&self) -> f64 {
        let count = self.request_count.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            self.header_generation_time_ns.load(Ordering::Relaxed) as f64 / count as f64
        }
    }

    #[inline]
    pub fn cache_hit_ratio(&self) -> f64 {
        let hits = self.cache_hit_count();
        let total = hits + self.cache_miss_count();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    #[inline]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    #[inline]
    pub fn requests_per_second(&self) -> f64 {
        let uptime = self.start_time.elapsed().as_secs_f64();
        if uptime > 0.0 {
            self.request_count() as f64 / uptime
        } else {
            0.0
        }
    }

    #[inline]
    pub(crate) fn increment_request_count(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_cache_hit_count(&self) {
        self.cache_hit_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_cache_miss_count(&self) {
        self.cache_miss_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_browser_plan_count(&self) {
        self.browser_plan_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_dynamic_resolution_count(&self) {
        self.dynamic_resolution_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_suppressed_count(&self) {
        self.suppressed_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_nonce_generation_count(&self) {
        self.nonce_generation_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_header_generation_time(&self, time_ns: usize) {
        self.header_generation_time_ns
            .fetch_add(time_ns, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.request_count.store(0, Ordering::Relaxed);
        self.cache_hit_count.store(0, Ordering::Relaxed);
        self.cache_miss_count.store(0, Ordering::Relaxed);
        self.browser_plan_count.store(0, Ordering::Relaxed);
        self.dynamic_resolution_count.store(0, Ordering::Relaxed);
        self.suppressed_count.store(0, Ordering::Relaxed);
        self.nonce_generation_count.store(0, Ordering::Relaxed);
        self.header_generation_time_ns.store(0, Ordering::Relaxed);
    }
}

impl fmt::Display for CspStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSP Middleware Statistics:")?;
        writeln!(f, "  Uptime: {} seconds", self.uptime_secs())?;
        writeln!(f, "  Requests processed: {}", self.request_count())?;
        writeln!(
            f,
            "  Requests per second: {:.2}",
            self.requests_per_second()
        )?;
        writeln!(
            f,
            "  Plan cache: {} hits, {} misses ({:.1}% hit ratio)",
            self.cache_hit_count(),
            self.cache_miss_count(),
            self.cache_hit_ratio() * 100.0
        )?;
        writeln!(f, "  Browser plans computed: {}", self.browser_plan_count())?;
        writeln!(f, "  Suppressed browsers: {}", self.suppressed_count())?;
        writeln!(
            f,
            "  Dynamic resolutions: {}",
            self.dynamic_resolution_count()
        )?;
        writeln!(f, "  Nonces generated: {}", self.nonce_generation_count())?;
        writeln!(
            f,
            "  Average header generation time: {:.2} ns",
            self.avg_header_generation_time_ns()
        )?;
        Ok(())
    }
}
