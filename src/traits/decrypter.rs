// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decryption operation wrapper.

use super::*;

/// Decryption operation wrapper.
///
/// Provides a unified entry point for streaming decryption over any
/// [`DecryptStreamingOp`] implementation.
pub struct Decrypter;

impl Decrypter {
    /// Performs single-operation decryption.
    ///
    /// Follows the two-phase pattern: `None` output queries an output size
    /// that never under-predicts, `Some(buffer)` decrypts and returns the
    /// exact recovered length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] on invalid padding,
    /// [`CryptoError::OutputLengthError`] if the buffer is too small, or
    /// the underlying cipher error.
    pub fn decrypt<Algo: DecryptOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.decrypt(key, input, output)
    }

    /// Initializes a streaming decryption context.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid for this operation or the
    /// algorithm configuration is inconsistent.
    pub fn decrypt_init<Algo: DecryptStreamingOp>(
        algo: Algo,
        key: Algo::Key,
    ) -> Result<Algo::Context, CryptoError> {
        algo.decrypt_init(key)
    }

    /// Decrypts a complete message and returns the plaintext as a vector.
    ///
    /// Convenience method that drives a streaming context over the whole
    /// input: size query, one `update`, one `finish`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as the underlying context operations,
    /// including [`CryptoError::MalformedCiphertext`] for bad padding.
    pub fn decrypt_vec<Algo: DecryptStreamingOp>(
        algo: Algo,
        key: Algo::Key,
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let mut context = algo.decrypt_init(key)?;
        let update_size = context.update(input, None)?;
        let mut output = vec![0u8; update_size];
        let written = context.update(input, Some(&mut output))?;
        let finish_size = context.finish(None)?;
        output.resize(written + finish_size, 0);
        let finished = context.finish(Some(&mut output[written..]))?;
        output.truncate(written + finished);
        Ok(output)
    }
}
