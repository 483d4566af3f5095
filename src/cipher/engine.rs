// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Streaming encryption and decryption over an injected block primitive.

use zeroize::Zeroizing;

use super::*;

/// Configuration for a streaming block-cipher operation.
///
/// Wraps a [`BlockCipherOp`] primitive with a chaining mode, a padding
/// policy, and the IV for CBC. The configuration is consumed by
/// `encrypt_init`/`decrypt_init`, which return the streaming context for the
/// operation; the chain state lives in this structure and travels with the
/// context.
pub struct BlockCipherAlgo<P: BlockCipherOp> {
    primitive: P,
    mode: ChainMode,
    pad: bool,
    needs_final: bool,

    /// CBC chain state, updated to the latest ciphertext block after each
    /// primitive call. Empty in ECB mode.
    iv: Zeroizing<Vec<u8>>,
}

impl<P: BlockCipherOp> BlockCipherAlgo<P> {
    /// Creates a fully specified configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ConfigError`] if:
    /// - `pad` and `needs_final` are both set (their final-call semantics
    ///   are mutually exclusive)
    /// - the mode is CBC and the primitive's block sizes differ, the IV is
    ///   absent, or the IV is shorter than one block
    /// - the primitive reports a zero block size
    pub fn new(
        primitive: P,
        mode: ChainMode,
        pad: bool,
        needs_final: bool,
        iv: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        if pad && needs_final {
            tracing::debug!("padding and needs-final-data are mutually exclusive");
            return Err(CryptoError::ConfigError);
        }

        let plain_block = primitive.plain_block_size();
        let cipher_block = primitive.cipher_block_size();
        if plain_block == 0 || cipher_block == 0 {
            return Err(CryptoError::ConfigError);
        }

        let iv = match mode {
            ChainMode::Cbc => {
                if plain_block != cipher_block {
                    tracing::debug!(plain_block, cipher_block, "CBC requires equal block sizes");
                    return Err(CryptoError::ConfigError);
                }
                let Some(iv) = iv else {
                    return Err(CryptoError::ConfigError);
                };
                if iv.len() < plain_block {
                    return Err(CryptoError::ConfigError);
                }
                Zeroizing::new(iv[..plain_block].to_vec())
            }
            ChainMode::Ecb => Zeroizing::new(Vec::new()),
        };

        Ok(Self {
            primitive,
            mode,
            pad,
            needs_final,
            iv,
        })
    }

    /// Configuration with PKCS#7 padding.
    pub fn with_padding(primitive: P, mode: ChainMode, iv: Option<&[u8]>) -> Result<Self, CryptoError> {
        Self::new(primitive, mode, true, false, iv)
    }

    /// Configuration without padding; input must be block-aligned.
    pub fn with_no_padding(
        primitive: P,
        mode: ChainMode,
        iv: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        Self::new(primitive, mode, false, false, iv)
    }

    /// Configuration for a final-data cipher: the trailing `finish` call
    /// carries real data and the primitive handles its own padding and
    /// chaining for it.
    pub fn with_final_data(
        primitive: P,
        mode: ChainMode,
        iv: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        Self::new(primitive, mode, false, true, iv)
    }

    /// Current chain state (the IV before any block has been processed).
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Whether PKCS#7 padding is enabled.
    pub fn pad(&self) -> bool {
        self.pad
    }

    /// Whether the final call must carry real data.
    pub fn needs_final_data(&self) -> bool {
        self.needs_final
    }

    fn plain_block(&self) -> usize {
        self.primitive.plain_block_size()
    }

    fn cipher_block(&self) -> usize {
        self.primitive.cipher_block_size()
    }

    /// Whether the engine manages the chain buffer itself.
    fn engine_chains(&self) -> bool {
        self.mode == ChainMode::Cbc && !self.primitive.chains_internally()
    }
}

/// Transforms one plaintext block, applying engine-side CBC chaining when
/// the primitive does not chain itself.
fn encrypt_chunk<P: BlockCipherOp>(
    algo: &mut BlockCipherAlgo<P>,
    key: &P::Key,
    scratch: &mut [u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    if algo.engine_chains() {
        for ((s, c), v) in scratch.iter_mut().zip(input).zip(algo.iv.iter()) {
            *s = c ^ v;
        }
        algo.primitive.encrypt_block(key, scratch, output)?;
        algo.iv.copy_from_slice(output);
    } else {
        algo.primitive.encrypt_block(key, input, output)?;
    }
    Ok(())
}

/// Transforms one ciphertext block, applying engine-side CBC chaining when
/// the primitive does not chain itself.
fn decrypt_chunk<P: BlockCipherOp>(
    algo: &mut BlockCipherAlgo<P>,
    key: &P::Key,
    scratch: &mut [u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    if algo.engine_chains() {
        algo.primitive.decrypt_block(key, input, scratch)?;
        for (s, v) in scratch.iter_mut().zip(algo.iv.iter()) {
            *s ^= v;
        }
        algo.iv.copy_from_slice(input);
        output.copy_from_slice(scratch);
    } else {
        algo.primitive.decrypt_block(key, input, output)?;
    }
    Ok(())
}

impl<P: BlockCipherOp + Clone> EncryptOp for BlockCipherAlgo<P>
where
    P::Key: EncryptionKey + Clone,
{
    type Key = P::Key;

    /// Encrypts a complete message through a fresh streaming context, so
    /// the algorithm's own chain state is untouched and the operation can
    /// repeat.
    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let iv = match self.mode {
            ChainMode::Cbc => Some(self.iv.as_slice()),
            ChainMode::Ecb => None,
        };
        let algo = Self::new(self.primitive.clone(), self.mode, self.pad, self.needs_final, iv)?;
        let mut context = algo.encrypt_init(key.clone())?;

        let Some(output) = output else {
            return Ok(context.output_size(true, input.len()));
        };
        let written = context.update(input, Some(&mut *output))?;
        let finished = context.finish(Some(&mut output[written..]))?;
        Ok(written + finished)
    }
}

impl<P: BlockCipherOp + Clone> DecryptOp for BlockCipherAlgo<P>
where
    P::Key: DecryptionKey + Clone,
{
    type Key = P::Key;

    /// Decrypts a complete message through a fresh streaming context.
    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let iv = match self.mode {
            ChainMode::Cbc => Some(self.iv.as_slice()),
            ChainMode::Ecb => None,
        };
        let algo = Self::new(self.primitive.clone(), self.mode, self.pad, self.needs_final, iv)?;
        let mut context = algo.decrypt_init(key.clone())?;

        let Some(output) = output else {
            return Ok(context.output_size(true, input.len()));
        };
        let written = context.update(input, Some(&mut *output))?;
        let finished = context.finish(Some(&mut output[written..]))?;
        Ok(written + finished)
    }
}

impl<P: BlockCipherOp> EncryptStreamingOp for BlockCipherAlgo<P>
where
    P::Key: EncryptionKey,
{
    type Key = P::Key;
    type Context = BlockCipherEncryptContext<P>;

    /// Initializes a streaming encryption context.
    fn encrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError> {
        let in_block = self.plain_block();
        let scratch = Zeroizing::new(vec![0u8; in_block]);
        // only final-data ciphers need a full block retained for finish
        let block = BlockBuffer::new(in_block, self.needs_final);
        Ok(BlockCipherEncryptContext {
            algo: self,
            key,
            block,
            scratch,
        })
    }
}

impl<P: BlockCipherOp> DecryptStreamingOp for BlockCipherAlgo<P>
where
    P::Key: DecryptionKey,
{
    type Key = P::Key;
    type Context = BlockCipherDecryptContext<P>;

    /// Initializes a streaming decryption context.
    fn decrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError> {
        let in_block = self.cipher_block();
        let scratch = Zeroizing::new(vec![0u8; self.plain_block()]);
        // padding removal and final-data ciphers both consume a full block in finish
        let block = BlockBuffer::new(in_block, self.needs_final || self.pad);
        Ok(BlockCipherDecryptContext {
            algo: self,
            key,
            block,
            scratch,
        })
    }
}

/// Context for a streaming encryption operation.
pub struct BlockCipherEncryptContext<P: BlockCipherOp> {
    algo: BlockCipherAlgo<P>,
    key: P::Key,
    block: BlockBuffer,
    scratch: Zeroizing<Vec<u8>>,
}

impl<P: BlockCipherOp> BlockCipherEncryptContext<P> {
    fn in_block(&self) -> usize {
        self.algo.plain_block()
    }

    fn out_block(&self) -> usize {
        self.algo.cipher_block()
    }

    fn finish_len(&self) -> Result<usize, CryptoError> {
        if self.algo.needs_final {
            if self.block.is_empty() {
                return Err(CryptoError::InputLengthError);
            }
            Ok(self.out_block())
        } else if self.algo.pad {
            Ok(self.out_block())
        } else if self.block.is_empty() {
            Ok(0)
        } else if self.block.len() == self.in_block() {
            Ok(self.out_block())
        } else {
            Err(CryptoError::InputLengthError)
        }
    }

    /// Exact number of output bytes produced for `input_len` more input
    /// bytes, optionally including the final call. Never under-predicts:
    /// buffers sized from this function cannot trip
    /// [`CryptoError::OutputLengthError`].
    pub fn output_size(&self, include_final: bool, input_len: usize) -> usize {
        let processed = self.block.update_len(input_len);
        let mut size = processed / self.in_block() * self.out_block();
        if include_final {
            // the final block exists whenever padding is on, and otherwise
            // only when the leftover happens to fill a block
            let leftover = self.block.len() + input_len - processed;
            if self.algo.needs_final || self.algo.pad || leftover == self.in_block() {
                size += self.out_block();
            }
        }
        size
    }

    /// Largest input length whose `update` output fits in `output_len`
    /// bytes.
    pub fn input_size(&self, output_len: usize) -> usize {
        self.block.max_input_for(output_len / self.out_block())
    }

    /// Smallest output granularity of this context.
    pub fn minimum_progress(&self) -> usize {
        self.out_block()
    }

    /// Re-initializes the context for a fresh message: clears the pending
    /// buffer and reloads the chain state from `iv`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ConfigError`] if the mode is CBC and `iv` is
    /// absent or shorter than one block.
    pub fn reset(&mut self, iv: Option<&[u8]>) -> Result<(), CryptoError> {
        self.block.clear();
        if self.algo.mode == ChainMode::Cbc {
            let n = self.in_block();
            let Some(iv) = iv else {
                return Err(CryptoError::ConfigError);
            };
            if iv.len() < n {
                return Err(CryptoError::ConfigError);
            }
            self.algo.iv.copy_from_slice(&iv[..n]);
        }
        Ok(())
    }
}

impl<P: BlockCipherOp> EncryptOpContext for BlockCipherEncryptContext<P>
where
    P::Key: EncryptionKey,
{
    type Algo = BlockCipherAlgo<P>;

    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let in_block = self.in_block();
        let out_block = self.out_block();
        let expected = self.block.update_len(input.len()) / in_block * out_block;

        let Some(output) = output else {
            return Ok(expected);
        };
        if output.len() < expected {
            return Err(CryptoError::OutputLengthError);
        }

        let algo = &mut self.algo;
        let key = &self.key;
        let scratch = &mut self.scratch;
        let mut offset = 0usize;

        self.block.update(input, |run| {
            let mut written = 0;
            for chunk in run.chunks_exact(in_block) {
                let out_chunk = &mut output[offset + written..offset + written + out_block];
                encrypt_chunk(algo, key, scratch, chunk, out_chunk)?;
                written += out_block;
            }
            offset += written;
            Ok(written)
        })
    }

    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let expected = self.finish_len()?;
        let Some(output) = output else {
            return Ok(expected);
        };
        if output.len() < expected {
            return Err(CryptoError::OutputLengthError);
        }

        let in_block = self.in_block();
        let out_block = self.out_block();

        if self.algo.needs_final {
            // trailing call with real data; the primitive pads and chains itself
            let pending = Zeroizing::new(self.block.pending().to_vec());
            self.algo
                .primitive
                .encrypt_block(&self.key, &pending, &mut output[..out_block])?;
            self.block.clear();
            return Ok(out_block);
        }

        if self.algo.pad {
            let filled = self.block.len();
            let pad_byte = (in_block - filled) as u8;
            let mut padded = Zeroizing::new(vec![pad_byte; in_block]);
            padded[..filled].copy_from_slice(self.block.pending());
            encrypt_chunk(
                &mut self.algo,
                &self.key,
                &mut self.scratch,
                &padded,
                &mut output[..out_block],
            )?;
            self.block.clear();
            return Ok(out_block);
        }

        if self.block.is_empty() {
            return Ok(0);
        }

        // a full block can only be buffered here by a prior finish_len check
        let pending = Zeroizing::new(self.block.pending().to_vec());
        encrypt_chunk(
            &mut self.algo,
            &self.key,
            &mut self.scratch,
            &pending,
            &mut output[..out_block],
        )?;
        self.block.clear();
        Ok(out_block)
    }

    fn algo(&self) -> &Self::Algo {
        &self.algo
    }

    fn algo_mut(&mut self) -> &mut Self::Algo {
        &mut self.algo
    }

    fn into_algo(self) -> Self::Algo {
        self.algo
    }
}

/// Context for a streaming decryption operation.
pub struct BlockCipherDecryptContext<P: BlockCipherOp> {
    algo: BlockCipherAlgo<P>,
    key: P::Key,
    block: BlockBuffer,
    scratch: Zeroizing<Vec<u8>>,
}

impl<P: BlockCipherOp> BlockCipherDecryptContext<P> {
    fn in_block(&self) -> usize {
        self.algo.cipher_block()
    }

    fn out_block(&self) -> usize {
        self.algo.plain_block()
    }

    fn finish_len(&self) -> Result<usize, CryptoError> {
        if self.algo.needs_final {
            if self.block.is_empty() {
                return Err(CryptoError::InputLengthError);
            }
            Ok(self.out_block())
        } else if self.algo.pad {
            // the pad length is unknown until the block is decrypted; this
            // is the upper bound and the write path reports the exact count
            if self.block.len() != self.in_block() {
                return Err(CryptoError::InputLengthError);
            }
            Ok(self.out_block())
        } else if self.block.is_empty() {
            Ok(0)
        } else if self.block.len() == self.in_block() {
            Ok(self.out_block())
        } else {
            Err(CryptoError::InputLengthError)
        }
    }

    /// Exact number of output bytes produced for `input_len` more input
    /// bytes, optionally including the final call. For padded decryption
    /// the final block is counted whole, so the prediction is an upper
    /// bound that never under-predicts.
    pub fn output_size(&self, include_final: bool, input_len: usize) -> usize {
        let processed = self.block.update_len(input_len);
        let mut size = processed / self.in_block() * self.out_block();
        if include_final {
            let leftover = self.block.len() + input_len - processed;
            if leftover == self.in_block() || (self.algo.needs_final && leftover > 0) {
                size += self.out_block();
            }
        }
        size
    }

    /// Largest input length whose `update` output fits in `output_len`
    /// bytes.
    pub fn input_size(&self, output_len: usize) -> usize {
        self.block.max_input_for(output_len / self.out_block())
    }

    /// Smallest output granularity of this context.
    pub fn minimum_progress(&self) -> usize {
        self.out_block()
    }

    /// Re-initializes the context for a fresh message: clears the pending
    /// buffer and reloads the chain state from `iv`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ConfigError`] if the mode is CBC and `iv` is
    /// absent or shorter than one block.
    pub fn reset(&mut self, iv: Option<&[u8]>) -> Result<(), CryptoError> {
        self.block.clear();
        if self.algo.mode == ChainMode::Cbc {
            let n = self.in_block();
            let Some(iv) = iv else {
                return Err(CryptoError::ConfigError);
            };
            if iv.len() < n {
                return Err(CryptoError::ConfigError);
            }
            self.algo.iv.copy_from_slice(&iv[..n]);
        }
        Ok(())
    }
}

impl<P: BlockCipherOp> DecryptOpContext for BlockCipherDecryptContext<P>
where
    P::Key: DecryptionKey,
{
    type Algo = BlockCipherAlgo<P>;

    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let in_block = self.in_block();
        let out_block = self.out_block();
        let expected = self.block.update_len(input.len()) / in_block * out_block;

        let Some(output) = output else {
            return Ok(expected);
        };
        if output.len() < expected {
            return Err(CryptoError::OutputLengthError);
        }

        let algo = &mut self.algo;
        let key = &self.key;
        let scratch = &mut self.scratch;
        let mut offset = 0usize;

        self.block.update(input, |run| {
            let mut written = 0;
            for chunk in run.chunks_exact(in_block) {
                let out_chunk = &mut output[offset + written..offset + written + out_block];
                decrypt_chunk(algo, key, scratch, chunk, out_chunk)?;
                written += out_block;
            }
            offset += written;
            Ok(written)
        })
    }

    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let expected = self.finish_len()?;
        let Some(output) = output else {
            return Ok(expected);
        };

        let out_block = self.out_block();

        if self.algo.needs_final {
            if output.len() < expected {
                return Err(CryptoError::OutputLengthError);
            }
            let pending = Zeroizing::new(self.block.pending().to_vec());
            self.algo
                .primitive
                .decrypt_block(&self.key, &pending, &mut output[..out_block])?;
            self.block.clear();
            return Ok(out_block);
        }

        if self.algo.pad {
            // decrypt into an owned buffer first so a bad pad commits nothing
            let cipher_block = Zeroizing::new(self.block.pending().to_vec());
            let mut plain = Zeroizing::new(vec![0u8; out_block]);
            decrypt_chunk(
                &mut self.algo,
                &self.key,
                &mut self.scratch,
                &cipher_block,
                &mut plain,
            )?;
            self.block.clear();

            let pad = *plain.last().ok_or(CryptoError::MalformedCiphertext)? as usize;
            if pad == 0 || pad > out_block {
                return Err(CryptoError::MalformedCiphertext);
            }
            if plain[out_block - pad..].iter().any(|&b| b as usize != pad) {
                return Err(CryptoError::MalformedCiphertext);
            }

            let len = out_block - pad;
            if output.len() < len {
                return Err(CryptoError::OutputLengthError);
            }
            output[..len].copy_from_slice(&plain[..len]);
            return Ok(len);
        }

        if self.block.is_empty() {
            return Ok(0);
        }

        if output.len() < expected {
            return Err(CryptoError::OutputLengthError);
        }
        let cipher_block = Zeroizing::new(self.block.pending().to_vec());
        decrypt_chunk(
            &mut self.algo,
            &self.key,
            &mut self.scratch,
            &cipher_block,
            &mut output[..out_block],
        )?;
        self.block.clear();
        Ok(out_block)
    }

    fn algo(&self) -> &Self::Algo {
        &self.algo
    }

    fn algo_mut(&mut self) -> &mut Self::Algo {
        &mut self.algo
    }

    fn into_algo(self) -> Self::Algo {
        self.algo
    }
}
