// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Standard key wrap: cipher encryption plus structural encoding.

use zeroize::Zeroizing;

use super::*;

/// Standard key wrap algorithm.
///
/// Encrypts the raw key blob through the streaming engine (CBC or ECB, with
/// PKCS#7 padding so blobs of any length wrap cleanly) and hands the
/// ciphertext to the injected [`KeyBlobCodec`] for structural encoding as
/// the configured [`KeyBlobKind`]. Unwrapping decodes first, verifies the
/// decoded kind, and decrypts.
pub struct StandardWrapAlgo<P: BlockCipherOp + Clone, C: KeyBlobCodec> {
    primitive: P,
    mode: ChainMode,
    iv: Option<Zeroizing<Vec<u8>>>,
    kind: KeyBlobKind,
    codec: C,
}

impl<P: BlockCipherOp + Clone, C: KeyBlobCodec> StandardWrapAlgo<P, C> {
    /// Creates a standard wrap over the given primitive, chaining mode, and
    /// codec.
    ///
    /// The IV is required for CBC; its consistency with the primitive's
    /// block size is checked when the operation runs.
    pub fn new(
        primitive: P,
        mode: ChainMode,
        iv: Option<&[u8]>,
        kind: KeyBlobKind,
        codec: C,
    ) -> Self {
        Self {
            primitive,
            mode,
            iv: iv.map(|iv| Zeroizing::new(iv.to_vec())),
            kind,
            codec,
        }
    }

    fn cipher(&self) -> Result<BlockCipherAlgo<P>, CryptoError> {
        let iv = self.iv.as_ref().map(|iv| iv.as_slice());
        BlockCipherAlgo::with_padding(self.primitive.clone(), self.mode, iv)
    }
}

impl<P, C> WrapOp for StandardWrapAlgo<P, C>
where
    P: BlockCipherOp + Clone,
    P::Key: WrappingKey + EncryptionKey + Clone,
    C: KeyBlobCodec,
{
    type Key = P::Key;

    /// Wraps `key_blob` under the KEK and encodes the result.
    ///
    /// The encoded size is codec-determined, so the size query runs the
    /// full pipeline and reports the resulting length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ConfigError`] for an inconsistent cipher
    /// setup, [`CryptoError::OutputLengthError`] if the buffer is too
    /// small, or the underlying cipher or codec error.
    fn wrap_key(
        &mut self,
        key: &Self::Key,
        key_blob: &[u8],
        wrapped: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let ciphertext = Zeroizing::new(Encrypter::encrypt_vec(
            self.cipher()?,
            key.clone(),
            key_blob,
        )?);
        let blob = self.codec.encode(self.kind, &ciphertext)?;

        let Some(wrapped) = wrapped else {
            return Ok(blob.len());
        };
        if wrapped.len() < blob.len() {
            return Err(CryptoError::OutputLengthError);
        }
        wrapped[..blob.len()].copy_from_slice(&blob);
        Ok(blob.len())
    }
}

impl<P, C> UnwrapOp for StandardWrapAlgo<P, C>
where
    P: BlockCipherOp + Clone,
    P::Key: UnwrappingKey + DecryptionKey + Clone,
    C: KeyBlobCodec,
{
    type Key = P::Key;

    /// Decodes `wrapped`, checks the blob kind, and decrypts the key blob.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] if the blob cannot be
    /// decoded, decodes to a different kind than configured, or fails
    /// padding validation; or [`CryptoError::OutputLengthError`] if the
    /// buffer is too small.
    fn unwrap_key(
        &mut self,
        key: &Self::Key,
        wrapped: &[u8],
        key_blob: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let (kind, ciphertext) = self.codec.decode(wrapped)?;
        if kind != self.kind {
            return Err(CryptoError::MalformedCiphertext);
        }

        let plain = Zeroizing::new(
            Decrypter::decrypt_vec(self.cipher()?, key.clone(), &ciphertext).map_err(|err| {
                match err {
                    CryptoError::InputLengthError => CryptoError::MalformedCiphertext,
                    other => other,
                }
            })?,
        );

        let Some(key_blob) = key_blob else {
            return Ok(plain.len());
        };
        if key_blob.len() < plain.len() {
            return Err(CryptoError::OutputLengthError);
        }
        key_blob[..plain.len()].copy_from_slice(&plain);
        Ok(plain.len())
    }
}
