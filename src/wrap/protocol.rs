// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wrap format orchestration.

use zeroize::Zeroizing;

use super::*;

/// Cipher selection for a wrap operation.
///
/// Bundles the injected primitive with the chaining mode and IV the wrap's
/// encryption passes use. A protocol constructed without one of these runs
/// the "none" algorithm and can only perform [`WrapFormat::NullWrap`].
pub struct WrapCipher<P: BlockCipherOp + Clone> {
    primitive: P,
    mode: ChainMode,
    iv: Option<Zeroizing<Vec<u8>>>,
}

impl<P: BlockCipherOp + Clone> WrapCipher<P> {
    /// Creates a cipher selection. The IV is required for CBC and for the
    /// custom wrap format.
    pub fn new(primitive: P, mode: ChainMode, iv: Option<&[u8]>) -> Self {
        Self {
            primitive,
            mode,
            iv: iv.map(|iv| Zeroizing::new(iv.to_vec())),
        }
    }
}

/// Key wrap protocol orchestrator.
///
/// Fixes a [`WrapFormat`], the [`KeyClass`] of the key being moved, and the
/// cipher selection once per operation, then dispatches wrap and unwrap
/// calls over the format exhaustively. Format coherence is validated at
/// construction: a passthrough with a cipher attached, an encrypting format
/// without one, or a null wrap of asymmetric material is refused before any
/// key bytes are touched.
pub struct KeyWrapProtocol<P: BlockCipherOp + Clone, C: KeyBlobCodec> {
    format: WrapFormat,
    class: KeyClass,
    cipher: Option<WrapCipher<P>>,
    codec: C,
}

impl<P, C> KeyWrapProtocol<P, C>
where
    P: BlockCipherOp + Clone,
    P::Key: WrappingKey + UnwrappingKey + EncryptionKey + DecryptionKey + Clone,
    C: KeyBlobCodec + Clone,
{
    /// Creates a protocol instance for one wrap or unwrap operation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] if the format, key class,
    /// and cipher selection are incoherent: [`WrapFormat::NullWrap`]
    /// requires no cipher and a symmetric key; the encrypting formats
    /// require a cipher.
    pub fn new(
        format: WrapFormat,
        class: KeyClass,
        cipher: Option<WrapCipher<P>>,
        codec: C,
    ) -> Result<Self, CryptoError> {
        match format {
            WrapFormat::NullWrap => {
                if cipher.is_some() || class != KeyClass::Symmetric {
                    return Err(CryptoError::InvalidParameter);
                }
            }
            WrapFormat::StandardWrap(_) | WrapFormat::CustomWrap => {
                if cipher.is_none() {
                    return Err(CryptoError::InvalidParameter);
                }
            }
        }
        Ok(Self {
            format,
            class,
            cipher,
            codec,
        })
    }

    /// The format this protocol instance runs.
    pub fn format(&self) -> WrapFormat {
        self.format
    }

    /// The class of key this protocol instance moves.
    pub fn class(&self) -> KeyClass {
        self.class
    }

    fn custom_algo(&self) -> Result<CustomKeyWrapAlgo<P>, CryptoError> {
        let cipher = self.cipher.as_ref().ok_or(CryptoError::InvalidParameter)?;
        let iv = cipher.iv.as_deref().ok_or(CryptoError::ConfigError)?;
        CustomKeyWrapAlgo::new(cipher.primitive.clone(), iv)
    }

    fn standard_algo(&self, kind: KeyBlobKind) -> Result<StandardWrapAlgo<P, C>, CryptoError> {
        let cipher = self.cipher.as_ref().ok_or(CryptoError::InvalidParameter)?;
        Ok(StandardWrapAlgo::new(
            cipher.primitive.clone(),
            cipher.mode,
            cipher.iv.as_ref().map(|iv| iv.as_slice()),
            kind,
            self.codec.clone(),
        ))
    }

    /// Wraps `key_blob` into this protocol's exportable representation.
    ///
    /// `desc` is carried inside the blob for the custom format; the other
    /// formats cannot represent it and refuse a non-empty value. The KEK is
    /// required for the encrypting formats and must be absent for the
    /// passthrough.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] for a missing KEK,
    /// [`CryptoError::InvalidParameter`] for an inapplicable KEK or
    /// descriptive data, or the underlying wrap error.
    pub fn wrap(
        &mut self,
        kek: Option<&P::Key>,
        key_blob: &[u8],
        desc: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        tracing::debug!(format = ?self.format, "wrap operation");
        match self.format {
            WrapFormat::NullWrap => {
                if kek.is_some() || !desc.is_empty() {
                    return Err(CryptoError::InvalidParameter);
                }
                Ok(key_blob.to_vec())
            }
            WrapFormat::StandardWrap(kind) => {
                if !desc.is_empty() {
                    return Err(CryptoError::InvalidParameter);
                }
                let kek = kek.ok_or(CryptoError::InvalidKey)?;
                let mut algo = self.standard_algo(kind)?;
                KeyWrapper::wrap_vec(&mut algo, kek, key_blob)
            }
            WrapFormat::CustomWrap => {
                let kek = kek.ok_or(CryptoError::InvalidKey)?;
                let mut algo = self.custom_algo()?;
                algo.set_descriptive_data(desc);
                KeyWrapper::wrap_vec(&mut algo, kek, key_blob)
            }
        }
    }

    /// Unwraps `wrapped`, recovering the raw key blob and any descriptive
    /// data carried inside it (empty for the formats that cannot carry
    /// any).
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] for a missing KEK,
    /// [`CryptoError::InvalidParameter`] for an inapplicable KEK,
    /// [`CryptoError::MalformedCiphertext`] for corrupt wrapped material,
    /// or the underlying unwrap error. No key bytes are committed on
    /// failure.
    pub fn unwrap(
        &mut self,
        kek: Option<&P::Key>,
        wrapped: &[u8],
    ) -> Result<(KeyMaterial, Vec<u8>), CryptoError> {
        tracing::debug!(format = ?self.format, "unwrap operation");
        match self.format {
            WrapFormat::NullWrap => {
                if kek.is_some() {
                    return Err(CryptoError::InvalidParameter);
                }
                Ok((KeyMaterial::from_bytes(wrapped)?, Vec::new()))
            }
            WrapFormat::StandardWrap(kind) => {
                let kek = kek.ok_or(CryptoError::InvalidKey)?;
                let mut algo = self.standard_algo(kind)?;
                let key = KeyUnwrapper::unwrap_vec(&mut algo, kek, wrapped)?;
                Ok((key, Vec::new()))
            }
            WrapFormat::CustomWrap => {
                let kek = kek.ok_or(CryptoError::InvalidKey)?;
                let mut algo = self.custom_algo()?;
                let key = KeyUnwrapper::unwrap_vec(&mut algo, kek, wrapped)?;
                Ok((key, algo.descriptive_data().to_vec()))
            }
        }
    }
}
