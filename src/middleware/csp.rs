use crate::core::config::{CspConfig, CspConfigBuilder};
use crate::core::options::CspOptions;
use crate::core::value::RequestContext;
use crate::error::CspError;
use crate::security::nonce::RequestNonce;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::USER_AGENT,
    web::Data,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::time::Instant;
use std::{rc::Rc, sync::Arc};

#[derive(Clone)]
pub struct CspMiddleware {
    config: Arc<CspConfig>,
}

impl CspMiddleware {
    #[inline]
    pub fn new(config: CspConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn config(&self) -> Arc<CspConfig> {
        self.config.clone()
    }
}

impl<S, B> Transform<S, ServiceRequest> for CspMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = CspMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CspMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct CspMiddlewareService<S> {
    service: Rc<S>,
    config: Arc<CspConfig>,
}

impl<S, B> Service<ServiceRequest> for CspMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            if let Some(nonce) = config.generate_nonce()? {
                req.extensions_mut().insert(RequestNonce(nonce));
            }

            let mut res = service.call(req).await?;

            let started = Instant::now();

            let outcome = {
                let ctx = RequestContext::new(res.request()).with_response(res.response().head());
                let user_agent = res
                    .request()
                    .headers()
                    .get(USER_AGENT)
                    .and_then(|value| value.to_str().ok());

                config
                    .plan(user_agent, &ctx)
                    .map(|plan| (plan, config.is_report_only(&ctx)))
            };

            let (plan, report_only) = outcome.map_err(|e| {
                log::error!("failed to build Content-Security-Policy header: {}", e);
                Error::from(e)
            })?;

            let headers = res.headers_mut();
            for (name, value) in plan.header_pairs(report_only) {
                log::trace!("setting {}: {}", name, plan.policy());
                headers.insert(name, value);
            }

            config
                .stats()
                .add_header_generation_time(started.elapsed().as_nanos() as usize);

            Ok(res)
        })
    }
}

/// Validates `options` and wraps them in a middleware with default settings.
#[inline]
pub fn csp_middleware(options: CspOptions) -> Result<CspMiddleware, CspError> {
    CspConfig::new(options).map(CspMiddleware::new)
}

/// Like [`csp_middleware`], also generating a nonce of `nonce_length` random
/// bytes for every request. Use [`SourceExpr::nonce`](crate::SourceExpr::nonce)
/// to place it in a source list.
#[inline]
pub fn csp_middleware_with_nonce(
    options: CspOptions,
    nonce_length: usize,
) -> Result<CspMiddleware, CspError> {
    CspConfigBuilder::new()
        .options(options)
        .with_nonce_generator(nonce_length)
        .build()
        .map(CspMiddleware::new)
}

/// Registers `config` as app data so handlers can reach its stats and cache.
pub fn configure_csp(config: CspConfig) -> impl FnOnce(&mut actix_web::web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(Data::new(config));
    }
}
