// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The random source contract.
//!
//! Random number generator internals are out of scope for the engine; this
//! trait is the capability it consumes. The process-wide shared handle built
//! on top of it lives in the [`crate::rand`] module.

use super::*;

/// Cryptographically secure random byte source.
pub trait RngOp {
    /// Fills `buf` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the source fails. This is rare
    /// and typically indicates a system-level problem.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), CryptoError>;
}
