// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Password-based key derivation.
//!
//! Three derivation schemes turn a passphrase plus the algorithm's configured
//! salt and iteration count into key material:
//!
//! - [`Pbkdf2Algo`]: PBKDF2 with an HMAC-based PRF (RFC 2898 §5.2)
//! - [`IteratedHashAlgo`]: the legacy iterated-hash scheme (PKCS#5 v1.5
//!   PBKDF1), in the standard variant and an extended variant that re-seeds
//!   for outputs longer than one digest
//! - [`Pkcs12Algo`]: the PKCS#12 §B.2 diversifier scheme
//!
//! Each scheme is an algorithm struct implementing [`DeriveOp`] with the
//! passphrase as the source key. A derivation either returns exactly the
//! requested number of bytes or fails with
//! [`CryptoError::InvalidParameter`]; it never writes partial output, and a
//! rejected parameter set (such as a zero iteration count) is refused before
//! any hashing happens.

mod iterated;
mod pbkdf2;
mod pkcs12;

pub use iterated::*;
pub use pbkdf2::*;
pub use pkcs12::*;

pub(crate) use super::*;

#[cfg(test)]
pub(crate) mod tests;
