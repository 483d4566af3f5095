// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PBKDF2 key derivation (RFC 2898 §5.2).

use zeroize::Zeroizing;

use super::*;

/// PBKDF2 key derivation with an HMAC-based PRF.
///
/// Output is the concatenation of blocks `F(P, S, c, i)` where
/// `F = U1 ⊕ U2 ⊕ … ⊕ Uc`, `U1 = HMAC(P, S ‖ be32(i))`, and
/// `Uj = HMAC(P, U_{j−1})`, truncated to the requested length.
///
/// # Policy
///
/// Minimum salt length and iteration count are caller policy; the engine
/// itself only refuses an iteration count of zero. RFC 8018 recommends a
/// salt of at least 8 bytes and at least 1000 iterations.
pub struct Pbkdf2Algo {
    hash_algo: HashAlgo,
    salt: Vec<u8>,
    iterations: u32,
}

impl Pbkdf2Algo {
    /// Creates a PBKDF2 derivation with the given PRF digest, salt, and
    /// iteration count.
    pub fn new(hash_algo: HashAlgo, salt: &[u8], iterations: u32) -> Self {
        Self {
            hash_algo,
            salt: salt.to_vec(),
            iterations,
        }
    }

    /// Computes one output block `F(P, S, c, i)`.
    fn compute_block(&self, pass: &[u8], index: u32) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        // U1 = HMAC(P, S || be32(i)), i is 1-indexed
        let mut u = Zeroizing::new(
            self.hash_algo
                .hmac(pass, &[&self.salt, &index.to_be_bytes()])?,
        );
        let mut f = u.clone();

        for _ in 1..self.iterations {
            u = Zeroizing::new(self.hash_algo.hmac(pass, &[&u])?);
            for (acc, byte) in f.iter_mut().zip(u.iter()) {
                *acc ^= byte;
            }
        }

        Ok(f)
    }
}

impl DeriveOp for Pbkdf2Algo {
    type Key = KeyMaterial;
    type DerivedKey = KeyMaterial;

    /// Derives `derived_len` bytes of key material from the passphrase.
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

        let hash_size = self.hash_algo.size();
        let blocks = derived_len.div_ceil(hash_size);
        let mut derived = Zeroizing::new(vec![0u8; derived_len]);

        for block in 0..blocks {
            let f = self.compute_block(key.as_bytes(), (block + 1) as u32)?;

            let start = block * hash_size;
            let len = (derived_len - start).min(hash_size);
            derived[start..start + len].copy_from_slice(&f[..len]);
        }

        KeyMaterial::from_bytes(&derived)
    }
}
