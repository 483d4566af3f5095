// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used)]

mod sizing_tests;

use super::*;

/// Deterministic keyed permutation used as the injected primitive.
///
/// Not a real cipher: each byte is XORed with the key stream, rotated, and
/// the block is reversed. Invertible and key/position dependent, which is
/// all the engine tests need.
#[derive(Clone)]
pub(crate) struct RotorCipher {
    block: usize,
}

impl RotorCipher {
    pub fn new(block: usize) -> Self {
        Self { block }
    }
}

impl BlockCipherOp for RotorCipher {
    type Key = KeyMaterial;

    fn plain_block_size(&self) -> usize {
        self.block
    }

    fn cipher_block_size(&self) -> usize {
        self.block
    }

    fn encrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if input.len() != self.block || output.len() != self.block {
            return Err(CryptoError::InternalError);
        }
        let k = key.as_bytes();
        if k.is_empty() {
            return Err(CryptoError::InvalidKey);
        }
        for (i, (o, b)) in output.iter_mut().zip(input).enumerate() {
            *o = (b ^ k[i % k.len()]).rotate_left(3);
        }
        output.reverse();
        Ok(())
    }

    fn decrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if input.len() != self.block || output.len() != self.block {
            return Err(CryptoError::InternalError);
        }
        let k = key.as_bytes();
        if k.is_empty() {
            return Err(CryptoError::InvalidKey);
        }
        for (i, o) in output.iter_mut().enumerate() {
            *o = input[self.block - 1 - i].rotate_right(3) ^ k[i % k.len()];
        }
        Ok(())
    }
}

/// Primitive that accepts a short trailing block and zero-extends it, the
/// way a block-like asymmetric cipher pads internally.
#[derive(Clone)]
pub(crate) struct FinalDataCipher {
    block: usize,
}

impl FinalDataCipher {
    pub fn new(block: usize) -> Self {
        Self { block }
    }
}

impl BlockCipherOp for FinalDataCipher {
    type Key = KeyMaterial;

    fn plain_block_size(&self) -> usize {
        self.block
    }

    fn cipher_block_size(&self) -> usize {
        self.block
    }

    fn encrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if input.is_empty() || input.len() > self.block || output.len() != self.block {
            return Err(CryptoError::InternalError);
        }
        let k = key.as_bytes();
        for (i, o) in output.iter_mut().enumerate() {
            let b = input.get(i).copied().unwrap_or(0);
            *o = b ^ k[i % k.len()] ^ 0x5A;
        }
        Ok(())
    }

    fn decrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if input.is_empty() || input.len() > self.block || output.len() != self.block {
            return Err(CryptoError::InternalError);
        }
        let k = key.as_bytes();
        for (i, o) in output.iter_mut().enumerate() {
            let b = input.get(i).copied().unwrap_or(0);
            *o = b ^ k[i % k.len()] ^ 0x5A;
        }
        Ok(())
    }
}

/// Primitive that performs its own block chaining and says so.
#[derive(Clone)]
pub(crate) struct SelfChainingCipher {
    block: usize,
    state: Vec<u8>,
}

impl SelfChainingCipher {
    pub fn new(block: usize) -> Self {
        Self {
            block,
            state: vec![0u8; block],
        }
    }
}

impl BlockCipherOp for SelfChainingCipher {
    type Key = KeyMaterial;

    fn plain_block_size(&self) -> usize {
        self.block
    }

    fn cipher_block_size(&self) -> usize {
        self.block
    }

    fn chains_internally(&self) -> bool {
        true
    }

    fn encrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        let k = key.as_bytes();
        for (i, (o, b)) in output.iter_mut().zip(input).enumerate() {
            *o = b ^ k[i % k.len()] ^ self.state[i];
        }
        self.state.copy_from_slice(output);
        Ok(())
    }

    fn decrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        let k = key.as_bytes();
        for (i, (o, b)) in output.iter_mut().zip(input).enumerate() {
            *o = b ^ k[i % k.len()] ^ self.state[i];
        }
        self.state.copy_from_slice(input);
        Ok(())
    }
}

/// Primitive whose ciphertext blocks are twice its plaintext blocks.
#[derive(Clone)]
pub(crate) struct WideningCipher {
    block: usize,
}

impl WideningCipher {
    pub fn new(block: usize) -> Self {
        Self { block }
    }
}

impl BlockCipherOp for WideningCipher {
    type Key = KeyMaterial;

    fn plain_block_size(&self) -> usize {
        self.block
    }

    fn cipher_block_size(&self) -> usize {
        self.block * 2
    }

    fn encrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        let k = key.as_bytes();
        for (i, b) in input.iter().enumerate() {
            output[i] = b ^ k[i % k.len()];
            output[self.block + i] = !b;
        }
        Ok(())
    }

    fn decrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        let k = key.as_bytes();
        for (i, o) in output.iter_mut().enumerate() {
            *o = input[i] ^ k[i % k.len()];
        }
        Ok(())
    }
}

pub(crate) fn test_key(pattern: u8, len: usize) -> KeyMaterial {
    KeyMaterial::from_bytes(&vec![pattern; len]).unwrap()
}
