// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PKCS#12 key derivation (RFC 7292 appendix B.2).

use zeroize::Zeroizing;

use super::*;

/// Purpose of a PKCS#12 derivation.
///
/// The purpose selects the diversifier id byte, so key, IV, and MAC-key
/// derivations from the same passphrase and salt produce unrelated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pkcs12Purpose {
    /// Deriving a cipher key (id byte 1).
    CipherKey,
    /// Deriving an IV (id byte 2).
    Iv,
    /// Deriving a MAC key (id byte 3).
    MacKey,
}

impl Pkcs12Purpose {
    fn id(self) -> u8 {
        match self {
            Pkcs12Purpose::CipherKey => 1,
            Pkcs12Purpose::Iv => 2,
            Pkcs12Purpose::MacKey => 3,
        }
    }
}

/// PKCS#12 §B.2 diversifier-based key derivation.
///
/// Builds a diversifier `D` of `v` id bytes (`v` the digest's input block
/// size), expands salt and passphrase each to a multiple of `v`, and hashes
/// `D ‖ S ‖ P` through the configured iteration count per output chunk.
/// Between chunks the expanded input is renewed by adding `B + 1` into each
/// `v`-byte slice, where `B` is the previous chunk's digest repeated to
/// length `v`.
///
/// The passphrase is consumed as raw bytes; the PKCS#12 BMPString encoding
/// of text passwords belongs to the blob codec layer outside this crate.
pub struct Pkcs12Algo {
    hash_algo: HashAlgo,
    purpose: Pkcs12Purpose,
    salt: Vec<u8>,
    iterations: u32,
}

impl Pkcs12Algo {
    /// Creates a PKCS#12 derivation for the given purpose.
    pub fn new(hash_algo: HashAlgo, purpose: Pkcs12Purpose, salt: &[u8], iterations: u32) -> Self {
        Self {
            hash_algo,
            purpose,
            salt: salt.to_vec(),
            iterations,
        }
    }

    /// Repeats `src` to fill the smallest multiple of `unit` covering it.
    /// Empty input stays empty.
    fn expand(src: &[u8], unit: usize) -> Vec<u8> {
        if src.is_empty() {
            return Vec::new();
        }
        let len = src.len().div_ceil(unit) * unit;
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            let take = src.len().min(len - out.len());
            out.extend_from_slice(&src[..take]);
        }
        out
    }

    /// Adds `B + 1` into `chunk` modulo 2^(8·len), big-endian.
    fn add_renewal(chunk: &mut [u8], b: &[u8]) {
        let mut carry = 1u16;
        for (x, y) in chunk.iter_mut().rev().zip(b.iter().rev()) {
            let sum = u16::from(*x) + u16::from(*y) + carry;
            *x = sum as u8;
            carry = sum >> 8;
        }
    }
}

impl DeriveOp for Pkcs12Algo {
    type Key = KeyMaterial;
    type DerivedKey = KeyMaterial;

    /// Derives `derived_len` bytes for the configured purpose.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] if `derived_len` is zero or
    /// the configured iteration count is zero; no hashing is performed in
    /// either case.
    fn derive(&self, key: &Self::Key, derived_len: usize) -> Result<Self::DerivedKey, CryptoError> {
        if derived_len == 0 || self.iterations == 0 {
            return Err(CryptoError::InvalidParameter);
        }

        let u = self.hash_algo.size();
        let v = self.hash_algo.block_size();

        let diversifier = vec![self.purpose.id(); v];
        let expanded_salt = Self::expand(&self.salt, v);
        let expanded_pass = Zeroizing::new(Self::expand(key.as_bytes(), v));

        // I = S || P, renewed in place between chunks
        let mut input = Zeroizing::new(Vec::with_capacity(expanded_salt.len() + expanded_pass.len()));
        input.extend_from_slice(&expanded_salt);
        input.extend_from_slice(&expanded_pass);

        let chunks = derived_len.div_ceil(u);
        let mut derived = Zeroizing::new(Vec::with_capacity(chunks * u));

        for chunk in 0..chunks {
            // A = H^r(D || I)
            let mut a = Zeroizing::new(self.hash_algo.digest(&[&diversifier, &input]));
            for _ in 1..self.iterations {
                a = Zeroizing::new(self.hash_algo.digest(&[&a]));
            }
            derived.extend_from_slice(&a);

            if chunk + 1 < chunks {
                let b = Zeroizing::new(Self::expand(&a, v));
                for slice in input.chunks_exact_mut(v) {
                    Self::add_renewal(slice, &b);
                }
            }
        }

        KeyMaterial::from_bytes(&derived[..derived_len])
    }
}
