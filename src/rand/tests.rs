// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

#[test]
fn test_fill_lengths() {
    let rng = SharedRandom::default();
    for len in [0usize, 1, 8, 16, 64, 1024] {
        let bytes = rng.bytes(len).unwrap();
        assert_eq!(bytes.len(), len);
    }
}

#[test]
fn test_fill_produces_varied_output() {
    let rng = SharedRandom::default();
    let a = rng.bytes(32).unwrap();
    let b = rng.bytes(32).unwrap();
    // 32 identical random bytes back to back would indicate a broken source
    assert_ne!(a, b);
    assert_ne!(a, vec![0u8; 32]);
}

#[test]
fn test_clone_shares_source() {
    let rng = SharedRandom::default();
    let clone = rng.clone();
    let a = rng.bytes(16).unwrap();
    let b = clone.bytes(16).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_concurrent_fill() {
    let rng = SharedRandom::default();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rng = rng.clone();
            std::thread::spawn(move || rng.bytes(64).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 64);
    }
}
