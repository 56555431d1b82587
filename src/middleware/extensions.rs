use crate::constants::{NONCE_PREFIX, SUFFIX_QUOTE};
use crate::security::nonce::RequestNonce;
use actix_web::HttpMessage;

pub trait CspExtensions {
    /// The nonce generated for this request, if nonces are enabled.
    fn get_nonce(&self) -> Option<String>;

    /// The nonce as a quoted source expression, e.g. `'nonce-abc'`.
    fn get_nonce_source(&self) -> Option<String>;
}

impl<T> CspExtensions for T
where
    T: HttpMessage,
{
    fn get_nonce(&self) -> Option<String> {
        self.extensions()
            .get::<RequestNonce>()
            .map(|nonce| nonce.0.clone())
    }

    fn get_nonce_source(&self) -> Option<String> {
        self.get_nonce()
            .map(|nonce| format!("{}{}{}", NONCE_PREFIX, nonce, SUFFIX_QUOTE))
    }
}
