// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Custom key wrap: double CBC encryption with byte reversal.

use zeroize::Zeroizing;

use super::*;

/// Custom key wrap algorithm.
///
/// Wraps a raw key blob together with caller-supplied descriptive data into
/// one opaque byte string:
///
/// 1. `PRIVATE_KEY_BYTES = be32(len(desc)) ‖ desc ‖ key_blob`
/// 2. `TEMP1` = CBC+pad encryption of `PRIVATE_KEY_BYTES` under the KEK and
///    the per-key IV
/// 3. `TEMP2 = IV ‖ TEMP1`
/// 4. `TEMP3` = `TEMP2` with its byte order reversed end to end
/// 5. `TEMP4` = CBC+pad encryption of `TEMP3` under the same KEK and the
///    fixed protocol IV — the wrapped blob
///
/// Unwrapping runs the steps in reverse. Chaining the whole blob through two
/// CBC passes with a reversal between them makes every output byte depend on
/// both ends of the plaintext, and the fixed second-pass IV lets the
/// unwrapper bootstrap without the true IV travelling in the clear.
///
/// # Wire Format
///
/// The output is the raw `TEMP4` byte string. Its byte order and the fixed
/// 8-byte IV are bit-exact protocol requirements.
///
/// # Descriptive Data
///
/// Descriptive data is algorithm state: set it before wrapping, read it back
/// after unwrapping.
pub struct CustomKeyWrapAlgo<P: BlockCipherOp + Clone> {
    primitive: P,
    iv: [u8; IV_SIZE],
    desc: Zeroizing<Vec<u8>>,
}

/// Cipher block and IV size in bytes. Both CBC passes and the IV split on
/// unwrap operate at this width.
const IV_SIZE: usize = 8;

/// Fixed IV for the second encryption pass.
const PROTOCOL_IV: [u8; IV_SIZE] = [0x4A, 0xDD, 0xA2, 0x2C, 0x79, 0xE8, 0x21, 0x05];

impl<P: BlockCipherOp + Clone> CustomKeyWrapAlgo<P> {
    /// Creates a custom wrap over the given primitive and per-key IV.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ConfigError`] if the primitive's block sizes
    /// are not both 8 bytes (the width the fixed IV and the IV split
    /// require), or if `iv` is not exactly 8 bytes.
    pub fn new(primitive: P, iv: &[u8]) -> Result<Self, CryptoError> {
        if primitive.plain_block_size() != IV_SIZE
            || primitive.cipher_block_size() != IV_SIZE
        {
            return Err(CryptoError::ConfigError);
        }
        let iv: [u8; IV_SIZE] = iv.try_into().map_err(|_| CryptoError::ConfigError)?;
        Ok(Self {
            primitive,
            iv,
            desc: Zeroizing::new(Vec::new()),
        })
    }

    /// Sets the descriptive data carried inside the next wrapped blob.
    pub fn set_descriptive_data(&mut self, desc: &[u8]) {
        self.desc = Zeroizing::new(desc.to_vec());
    }

    /// Descriptive data recovered by the last unwrap (or set for the next
    /// wrap).
    pub fn descriptive_data(&self) -> &[u8] {
        &self.desc
    }

    /// Output length of one CBC+pad pass: the next block multiple, with a
    /// full pad block for aligned input.
    fn padded_len(input_len: usize) -> usize {
        (input_len / IV_SIZE + 1) * IV_SIZE
    }

    fn encrypt_pass(
        &self,
        key: &P::Key,
        iv: &[u8],
        input: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError>
    where
        P::Key: EncryptionKey + Clone,
    {
        let algo =
            BlockCipherAlgo::with_padding(self.primitive.clone(), ChainMode::Cbc, Some(iv))?;
        Ok(Zeroizing::new(Encrypter::encrypt_vec(
            algo,
            key.clone(),
            input,
        )?))
    }

    fn decrypt_pass(
        &self,
        key: &P::Key,
        iv: &[u8],
        input: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError>
    where
        P::Key: DecryptionKey + Clone,
    {
        let algo =
            BlockCipherAlgo::with_padding(self.primitive.clone(), ChainMode::Cbc, Some(iv))?;
        let plain = Decrypter::decrypt_vec(algo, key.clone(), input).map_err(|err| match err {
            // a blob that cannot even form whole blocks is corrupt, not short
            CryptoError::InputLengthError => CryptoError::MalformedCiphertext,
            other => other,
        })?;
        Ok(Zeroizing::new(plain))
    }
}

impl<P> WrapOp for CustomKeyWrapAlgo<P>
where
    P: BlockCipherOp + Clone,
    P::Key: WrappingKey + EncryptionKey + Clone,
{
    type Key = P::Key;

    /// Wraps `key_blob` and the configured descriptive data under the KEK.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the buffer is too
    /// small, or the underlying cipher error if an encryption pass fails.
    fn wrap_key(
        &mut self,
        key: &Self::Key,
        key_blob: &[u8],
        wrapped: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        // both pass lengths are fully determined by the input lengths
        let private_len = 4 + self.desc.len() + key_blob.len();
        let temp2_len = IV_SIZE + Self::padded_len(private_len);
        let expected_len = Self::padded_len(temp2_len);

        let Some(wrapped) = wrapped else {
            return Ok(expected_len);
        };
        if wrapped.len() < expected_len {
            return Err(CryptoError::OutputLengthError);
        }

        tracing::debug!(blob_len = key_blob.len(), "wrapping key blob");

        let desc_len =
            u32::try_from(self.desc.len()).map_err(|_| CryptoError::InvalidParameter)?;
        let mut private = Zeroizing::new(Vec::with_capacity(private_len));
        private.extend_from_slice(&desc_len.to_be_bytes());
        private.extend_from_slice(&self.desc);
        private.extend_from_slice(key_blob);

        let temp1 = self.encrypt_pass(key, &self.iv, &private)?;

        let mut temp2 = Zeroizing::new(Vec::with_capacity(temp2_len));
        temp2.extend_from_slice(&self.iv);
        temp2.extend_from_slice(&temp1);
        temp2.reverse();

        let temp4 = self.encrypt_pass(key, &PROTOCOL_IV, &temp2)?;
        debug_assert!(temp4.len() == expected_len);

        wrapped[..temp4.len()].copy_from_slice(&temp4);
        Ok(temp4.len())
    }
}

impl<P> UnwrapOp for CustomKeyWrapAlgo<P>
where
    P: BlockCipherOp + Clone,
    P::Key: UnwrappingKey + DecryptionKey + Clone,
{
    type Key = P::Key;

    /// Unwraps `wrapped`, recovering the raw key blob and the descriptive
    /// data (readable afterwards through
    /// [`descriptive_data`](Self::descriptive_data)).
    ///
    /// The size query returns an upper bound; the write call returns the
    /// exact recovered length. Nothing is committed on failure.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] for corrupt wrapped
    /// material: bad padding in either pass, a blob too short to hold the
    /// IV, or a descriptive-data length field exceeding the remaining
    /// bytes. Returns [`CryptoError::OutputLengthError`] if the buffer is
    /// too small.
    fn unwrap_key(
        &mut self,
        key: &Self::Key,
        wrapped: &[u8],
        key_blob: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(key_blob) = key_blob else {
            // the recovered blob is strictly shorter than the wrapped input
            return Ok(wrapped.len());
        };

        tracing::debug!(wrapped_len = wrapped.len(), "unwrapping key blob");

        let mut temp2 = self.decrypt_pass(key, &PROTOCOL_IV, wrapped)?;
        temp2.reverse();

        if temp2.len() < IV_SIZE {
            return Err(CryptoError::MalformedCiphertext);
        }
        let (iv, temp1) = temp2.split_at(IV_SIZE);
        let iv = Zeroizing::new(iv.to_vec());

        let private = self.decrypt_pass(key, &iv, temp1)?;

        // bounds-check the length prefix before trusting it
        if private.len() < 4 {
            return Err(CryptoError::MalformedCiphertext);
        }
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&private[..4]);
        let desc_len = u32::from_be_bytes(prefix) as usize;
        if desc_len > private.len() - 4 {
            return Err(CryptoError::MalformedCiphertext);
        }

        let blob = &private[4 + desc_len..];
        if key_blob.len() < blob.len() {
            return Err(CryptoError::OutputLengthError);
        }

        self.desc = Zeroizing::new(private[4..4 + desc_len].to_vec());
        key_blob[..blob.len()].copy_from_slice(blob);
        Ok(blob.len())
    }
}
