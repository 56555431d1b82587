use crate::constants::{DEFAULT_NONCE_LENGTH, NONCE_BUFFER_POOL_SIZE};
use crate::error::CspError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use getrandom::getrandom;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::{
    ops::Deref,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Produces per-request nonces for `'nonce-…'` sources.
///
/// Random byte buffers are pooled so steady-state generation only allocates
/// the encoded string.
#[derive(Debug)]
pub struct NonceGenerator {
    length: AtomicUsize,
    buffer_pool: Arc<Mutex<SmallVec<[Vec<u8>; NONCE_BUFFER_POOL_SIZE]>>>,
    stats: Arc<NonceStats>,
}

#[derive(Debug, Default)]
struct NonceStats {
    generated: AtomicUsize,
    buffer_hits: AtomicUsize,
    buffer_misses: AtomicUsize,
}

impl Clone for NonceGenerator {
    fn clone(&self) -> Self {
        Self {
            length: AtomicUsize::new(self.length.load(Ordering::Relaxed)),
            buffer_pool: self.buffer_pool.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl NonceGenerator {
    #[inline]
    pub fn new(length: usize) -> Self {
        Self::with_capacity(0, length)
    }

    pub fn with_capacity(capacity: usize, length: usize) -> Self {
        let buffers = (0..capacity.min(NONCE_BUFFER_POOL_SIZE))
            .map(|_| vec![0u8; length])
            .collect();

        Self {
            length: AtomicUsize::new(length),
            buffer_pool: Arc::new(Mutex::new(buffers)),
            stats: Arc::new(NonceStats::default()),
        }
    }

    pub fn generate(&self) -> Result<String, CspError> {
        let length = self.length.load(Ordering::Relaxed);
        let mut buffer = {
            let mut pool = self.buffer_pool.lock();
            match pool.pop() {
                Some(mut buf) => {
                    self.stats.buffer_hits.fetch_add(1, Ordering::Relaxed);
                    buf.clear();
                    buf.resize(length, 0);
                    buf
                }
                None => {
                    self.stats.buffer_misses.fetch_add(1, Ordering::Relaxed);
                    vec![0u8; length]
                }
            }
        };

        let filled = getrandom(&mut buffer)
            .map_err(|e| CspError::CryptoError(format!("failed to generate nonce: {}", e)));
        let encoded = filled.map(|()| BASE64.encode(&buffer));

        {
            let mut pool = self.buffer_pool.lock();
            if pool.len() < NONCE_BUFFER_POOL_SIZE {
                pool.push(buffer);
            }
        }

        if encoded.is_ok() {
            self.stats.generated.fetch_add(1, Ordering::Relaxed);
        }
        encoded
    }

    #[inline]
    pub fn set_length(&self, length: usize) {
        self.length.store(length, Ordering::Relaxed);
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn generated_count(&self) -> usize {
        self.stats.generated.load(Ordering::Relaxed)
    }

    /// Fraction of generations served from a pooled buffer.
    pub fn buffer_hit_ratio(&self) -> f64 {
        let hits = self.stats.buffer_hits.load(Ordering::Relaxed);
        let total = hits + self.stats.buffer_misses.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NONCE_LENGTH)
    }
}

/// The nonce generated for the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestNonce(pub String);

impl Deref for RequestNonce {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonces_are_unique_and_sized() {
        let generator = NonceGenerator::new(16);
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert_ne!(a, b);
        // 16 bytes -> 22 base64 chars without padding
        assert_eq!(a.len(), 22);
        assert_eq!(generator.generated_count(), 2);
    }

    #[test]
    fn pooled_buffers_are_reused() {
        let generator = NonceGenerator::with_capacity(4, 8);
        generator.generate().unwrap();
        generator.generate().unwrap();
        assert_eq!(generator.buffer_hit_ratio(), 1.0);
    }

    #[test]
    fn length_change_applies_to_pooled_buffers() {
        let generator = NonceGenerator::with_capacity(1, 8);
        generator.set_length(32);
        let nonce = generator.generate().unwrap();
        assert_eq!(nonce.len(), 43);
    }
}
