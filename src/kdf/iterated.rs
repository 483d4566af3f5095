// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Legacy iterated-hash key derivation (PKCS#5 v1.5 PBKDF1 and an extended
//! variant).

use zeroize::Zeroizing;

use super::*;

/// Legacy iterated-hash key derivation.
///
/// Computes `T1 = H(P ‖ S)`, `Ti = H(T_{i−1})` for the configured number of
/// hash applications, then takes output bytes from the final digest: key
/// bytes first, IV bytes after.
///
/// The standard variant is limited to one digest of total output and fails
/// when more is requested. The extended variant re-seeds by hashing the
/// previous digest through another full iteration round per additional
/// block, looping until both the key and IV requests are satisfied.
pub struct IteratedHashAlgo {
    hash_algo: HashAlgo,
    salt: Vec<u8>,
    iterations: u32,
    extended: bool,
}

impl IteratedHashAlgo {
    /// Creates the standard PKCS#5 v1.5 derivation.
    ///
    /// Key plus IV output is limited to one digest
    /// ([`size`](HashAlgo::size) bytes).
    pub fn new(hash_algo: HashAlgo, salt: &[u8], iterations: u32) -> Self {
        Self {
            hash_algo,
            salt: salt.to_vec(),
            iterations,
            extended: false,
        }
    }

    /// Creates the extended derivation, which re-seeds past one digest of
    /// output.
    pub fn extended(hash_algo: HashAlgo, salt: &[u8], iterations: u32) -> Self {
        Self {
            hash_algo,
            salt: salt.to_vec(),
            iterations,
            extended: true,
        }
    }

    /// Runs one full iteration round: `H(seed)` then `H` applied to its own
    /// output for the remaining iterations.
    fn iterate(&self, seed: &[&[u8]]) -> Zeroizing<Vec<u8>> {
        let mut digest = Zeroizing::new(self.hash_algo.digest(seed));
        for _ in 1..self.iterations {
            digest = Zeroizing::new(self.hash_algo.digest(&[&digest]));
        }
        digest
    }

    /// Derives `key_len` key bytes and `iv_len` IV bytes in one pass.
    ///
    /// The key bytes come first in the derived stream, the IV bytes follow;
    /// deriving key and IV together therefore yields different IV bytes
    /// than two separate derivations would.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] if the total requested
    /// length or the iteration count is zero, or if the standard variant is
    /// asked for more than one digest of output. No hashing is performed on
    /// rejection.
    pub fn derive_key_iv(
        &self,
        key: &KeyMaterial,
        key_len: usize,
        iv_len: usize,
    ) -> Result<(KeyMaterial, Vec<u8>), CryptoError> {
        let total = key_len + iv_len;
        if total == 0 || self.iterations == 0 {
            return Err(CryptoError::InvalidParameter);
        }
        if !self.extended && total > self.hash_algo.size() {
            return Err(CryptoError::InvalidParameter);
        }

        let mut digest = self.iterate(&[key.as_bytes(), &self.salt]);
        let mut material = Zeroizing::new(Vec::with_capacity(total));
        material.extend_from_slice(&digest);

        // extended variant only: re-seed from the previous digest until the
        // request is covered
        while material.len() < total {
            digest = self.iterate(&[&digest]);
            material.extend_from_slice(&digest);
        }

        let derived_key = KeyMaterial::from_bytes(&material[..key_len])?;
        let iv = material[key_len..total].to_vec();
        Ok((derived_key, iv))
    }
}

impl DeriveOp for IteratedHashAlgo {
    type Key = KeyMaterial;
    type DerivedKey = KeyMaterial;

    /// Derives `derived_len` key bytes with no IV share.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] under the same conditions
    /// as [`derive_key_iv`](Self::derive_key_iv).
    fn derive(&self, key: &Self::Key, derived_len: usize) -> Result<Self::DerivedKey, CryptoError> {
        let (derived_key, _) = self.derive_key_iv(key, derived_len, 0)?;
        Ok(derived_key)
    }
}
