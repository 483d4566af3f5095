// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Consistency tests for the pure sizing functions.
//!
//! Callers size buffers from `output_size`/`input_size` before calling
//! `update`/`finish`; a buffer sized from a prediction must never trip
//! `OutputLengthError`, and the encrypt-side predictions must be exact.

use super::*;

const IV: [u8; 16] = [0x5Au8; 16];

fn pad_encrypt_context() -> BlockCipherEncryptContext<RotorCipher> {
    BlockCipherAlgo::with_padding(RotorCipher::new(16), ChainMode::Cbc, Some(&IV))
        .unwrap()
        .encrypt_init(test_key(0x42, 16))
        .unwrap()
}

fn pad_decrypt_context() -> BlockCipherDecryptContext<RotorCipher> {
    BlockCipherAlgo::with_padding(RotorCipher::new(16), ChainMode::Cbc, Some(&IV))
        .unwrap()
        .decrypt_init(test_key(0x42, 16))
        .unwrap()
}

#[test]
fn test_encrypt_output_size_is_exact() {
    for len in 0..=50usize {
        let input = vec![0xC7u8; len];

        let mut context = pad_encrypt_context();
        let update_predicted = context.output_size(false, len);
        let total_predicted = context.output_size(true, len);

        let mut out = vec![0u8; update_predicted];
        let written = context.update(&input, Some(&mut out)).unwrap();
        assert_eq!(written, update_predicted, "length {len}");

        let finished = context.finish_vec().unwrap();
        assert_eq!(written + finished.len(), total_predicted, "length {len}");
    }
}

#[test]
fn test_encrypt_output_size_accounts_for_residue() {
    // predictions must include bytes already sitting in the pending buffer
    let mut context = pad_encrypt_context();
    let mut out = vec![0u8; 16];
    let written = context.update(&[0u8; 10], Some(&mut out)).unwrap();
    assert_eq!(written, 0);

    // 10 buffered + 6 more completes exactly one block
    assert_eq!(context.output_size(false, 6), 16);
    assert_eq!(context.output_size(false, 5), 0);

    let written = context.update(&[0u8; 6], Some(&mut out)).unwrap();
    assert_eq!(written, 16);
}

#[test]
fn test_decrypt_output_size_never_under_predicts() {
    let key = test_key(0x42, 16);
    for len in [0usize, 1, 15, 16, 17, 32, 33, 47] {
        let plaintext = vec![0x3Cu8; len];
        let algo =
            BlockCipherAlgo::with_padding(RotorCipher::new(16), ChainMode::Cbc, Some(&IV)).unwrap();
        let ciphertext = Encrypter::encrypt_vec(algo, key.clone(), &plaintext).unwrap();

        let mut context = pad_decrypt_context();
        let update_predicted = context.output_size(false, ciphertext.len());
        let total_predicted = context.output_size(true, ciphertext.len());

        let mut out = vec![0u8; update_predicted];
        let written = context.update(&ciphertext, Some(&mut out)).unwrap();
        assert_eq!(written, update_predicted, "length {len}");

        let finish_predicted = context.finish(None).unwrap();
        let mut tail = vec![0u8; finish_predicted];
        let finished = context.finish(Some(&mut tail)).unwrap();

        // the pad is unknown until decryption, so the totals are an upper
        // bound, never an under-count
        assert!(written + finished <= total_predicted, "length {len}");
        assert_eq!(written + finished, plaintext.len(), "length {len}");
    }
}

#[test]
fn test_input_size_bounds_update_output() {
    let mut context = pad_encrypt_context();
    // partially fill the pending buffer so the residue matters
    context.update(&[0u8; 5], Some(&mut [])).unwrap();

    for budget in [0usize, 16, 32, 64] {
        let fits = context.input_size(budget);
        assert!(
            context.output_size(false, fits) <= budget,
            "budget {budget}"
        );
        assert!(
            context.output_size(false, fits + 1) > budget,
            "budget {budget}"
        );
    }
}

#[test]
fn test_input_size_accounts_for_held_block() {
    // decrypt-with-padding holds a full block back, shifting the boundary
    let mut context = pad_decrypt_context();
    for budget in [0usize, 16, 32] {
        let fits = context.input_size(budget);
        assert!(context.output_size(false, fits) <= budget);
        assert!(context.output_size(false, fits + 1) > budget);
    }
    let mut out = vec![0u8; 16];
    context.update(&[0u8; 7], Some(&mut out)).unwrap();
    let fits = context.input_size(16);
    assert!(context.output_size(false, fits) <= 16);
    assert!(context.output_size(false, fits + 1) > 16);
}

#[test]
fn test_minimum_progress_is_one_output_block() {
    let encrypt = pad_encrypt_context();
    assert_eq!(encrypt.minimum_progress(), 16);

    let algo =
        BlockCipherAlgo::with_no_padding(WideningCipher::new(8), ChainMode::Ecb, None).unwrap();
    let context = algo.encrypt_init(test_key(0x42, 8)).unwrap();
    assert_eq!(context.minimum_progress(), 16);
    let algo =
        BlockCipherAlgo::with_no_padding(WideningCipher::new(8), ChainMode::Ecb, None).unwrap();
    let context = algo.decrypt_init(test_key(0x42, 8)).unwrap();
    assert_eq!(context.minimum_progress(), 8);
}

#[test]
fn test_widening_cipher_sizing() {
    // 8-byte plaintext blocks become 16-byte ciphertext blocks
    let algo =
        BlockCipherAlgo::with_no_padding(WideningCipher::new(8), ChainMode::Ecb, None).unwrap();
    let context = algo.encrypt_init(test_key(0x42, 8)).unwrap();
    assert_eq!(context.output_size(false, 24), 48);
    assert_eq!(context.output_size(true, 24), 48);
    assert_eq!(context.output_size(false, 7), 0);
    assert_eq!(context.output_size(true, 7), 0);
}

#[test]
fn test_sized_buffers_never_trip_output_length_error() {
    // drive a context with buffers sized exactly from the predictions,
    // across chunkings that leave every possible residue
    let key = test_key(0x42, 16);
    let plaintext = (0u8..61).collect::<Vec<_>>();

    for chunk_size in [1usize, 5, 16, 17, 30] {
        let algo =
            BlockCipherAlgo::with_padding(RotorCipher::new(16), ChainMode::Cbc, Some(&IV)).unwrap();
        let mut context = algo.encrypt_init(key.clone()).unwrap();
        let mut ciphertext = Vec::new();
        for chunk in plaintext.chunks(chunk_size) {
            let size = context.output_size(false, chunk.len());
            let mut out = vec![0u8; size];
            let written = context.update(chunk, Some(&mut out)).unwrap();
            assert_eq!(written, size);
            ciphertext.extend_from_slice(&out);
        }
        let size = context.finish(None).unwrap();
        let mut out = vec![0u8; size];
        let written = context.finish(Some(&mut out)).unwrap();
        ciphertext.extend_from_slice(&out[..written]);

        let algo =
            BlockCipherAlgo::with_padding(RotorCipher::new(16), ChainMode::Cbc, Some(&IV)).unwrap();
        let decrypted = Decrypter::decrypt_vec(algo, key.clone(), &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext, "chunk size {chunk_size}");
    }
}
