// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Random source implementations.
//!
//! [`OsRandom`] draws from the operating system's cryptographically secure
//! generator. [`SharedRandom`] is the process-wide handle: constructed once
//! at startup and cloned into every component that needs entropy, it
//! serializes access internally so seeding and generation calls from
//! unrelated operation threads may race safely.

use std::sync::Arc;

use parking_lot::Mutex;
use ::rand::rngs::OsRng;
use ::rand::TryRngCore;

use super::*;

/// Operating-system-backed random byte source.
///
/// Zero-sized; every call goes straight to the platform generator.
#[derive(Debug, Clone, Default)]
pub struct OsRandom;

impl RngOp for OsRandom {
    /// Fills `buf` with random bytes from the OS generator.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the platform generator fails.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
        OsRng.try_fill_bytes(buf).map_err(|_| CryptoError::RngError)
    }
}

/// Shared, internally serialized random source handle.
///
/// Cloning the handle shares the underlying source; the internal lock makes
/// concurrent fills from multiple operation threads safe. Components take
/// the handle explicitly rather than reaching for a global.
#[derive(Clone)]
pub struct SharedRandom {
    inner: Arc<Mutex<Box<dyn RngOp + Send>>>,
}

impl SharedRandom {
    /// Creates a shared handle over the given source.
    pub fn new<R: RngOp + Send + 'static>(rng: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(rng))),
        }
    }

    /// Fills `buf` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the underlying source fails.
    pub fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        self.inner.lock().fill(buf)
    }

    /// Generates `n` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the underlying source fails.
    pub fn bytes(&self, n: usize) -> Result<Vec<u8>, CryptoError> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

impl Default for SharedRandom {
    /// A shared handle over the OS generator.
    fn default() -> Self {
        Self::new(OsRandom)
    }
}

#[cfg(test)]
mod tests;
