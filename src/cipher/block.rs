// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Partial-block buffering for streaming cipher contexts.

use zeroize::Zeroizing;

use super::*;

/// Internal block buffer for streaming operations.
///
/// Block primitives consume aligned input, so contexts route all data
/// through this buffer: whole blocks are handed to the processing closure
/// immediately while the trailing remainder waits for the next `update` or
/// the `finish` call.
///
/// When `hold_full` is set, the last block is retained even when the input
/// ends exactly on a block boundary. Decrypt-with-padding contexts need this
/// (the pad lives in the final ciphertext block) and so do final-data
/// ciphers (the trailing call must carry real data).
pub(crate) struct BlockBuffer {
    /// Buffered partial input, never longer than one block.
    block: Zeroizing<Vec<u8>>,
    block_size: usize,
    hold_full: bool,
}

impl BlockBuffer {
    pub fn new(block_size: usize, hold_full: bool) -> Self {
        Self {
            block: Zeroizing::new(Vec::with_capacity(block_size)),
            block_size,
            hold_full,
        }
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// The buffered bytes awaiting processing.
    pub fn pending(&self) -> &[u8] {
        &self.block
    }

    /// Discards buffered bytes. The backing storage stays owned and is
    /// zeroized when the buffer is dropped.
    pub fn clear(&mut self) {
        self.block.clear();
    }

    /// Routes `input` through the buffer, handing every processable run of
    /// whole blocks to `op`. Returns the sum of the values `op` returned.
    ///
    /// `op` receives slices whose length is a non-zero multiple of the block
    /// size and returns the number of output bytes it produced.
    pub fn update<F>(&mut self, input: &[u8], mut op: F) -> Result<usize, CryptoError>
    where
        F: FnMut(&[u8]) -> Result<usize, CryptoError>,
    {
        let mut count = 0;
        let avail = self.block_size - self.block.len();
        let fill = &input[..input.len().min(avail)];

        self.block.extend_from_slice(fill);

        let input = &input[fill.len()..];

        // flush the buffered block once full, unless it must be held for finish
        if self.block.len() == self.block_size && (!self.hold_full || !input.is_empty()) {
            count += op(&self.block)?;
            self.block.clear();
        }

        let mut blocks = input.len() / self.block_size;
        let tailing = input.len() % self.block_size;

        if self.hold_full && tailing == 0 && blocks > 0 {
            blocks -= 1;
        }

        let bytes = blocks * self.block_size;
        if bytes > 0 {
            count += op(&input[..bytes])?;
        }

        self.block.extend_from_slice(&input[bytes..]);

        Ok(count)
    }

    /// Mirrors [`update`](Self::update) without processing anything: returns
    /// the number of bytes (a block multiple) that `update` would hand to
    /// its closure for an input of `input_len` bytes.
    pub fn update_len(&self, input_len: usize) -> usize {
        let avail = self.block_size - self.block.len();
        let fill = input_len.min(avail);
        let rest = input_len - fill;

        let mut count = 0;
        if self.block.len() + fill == self.block_size && (!self.hold_full || rest > 0) {
            count += self.block_size;
        }

        let mut blocks = rest / self.block_size;
        let tailing = rest % self.block_size;

        if self.hold_full && tailing == 0 && blocks > 0 {
            blocks -= 1;
        }

        count + blocks * self.block_size
    }

    /// Largest input length for which `update` hands at most `blocks` whole
    /// blocks to its closure.
    pub fn max_input_for(&self, blocks: usize) -> usize {
        let limit = (blocks + 1) * self.block_size;
        if self.hold_full {
            limit.saturating_sub(self.block.len())
        } else {
            limit.saturating_sub(self.block.len() + 1)
        }
    }
}
