// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used)]

mod protocol_tests;

use super::*;

pub(crate) use crate::cipher::tests::{test_key, RotorCipher};

/// Codec that frames raw bytes behind a one-byte kind tag. Stands in for
/// the provider's structural encoder, which is injected in production.
#[derive(Clone)]
pub(crate) struct TagCodec;

fn kind_tag(kind: KeyBlobKind) -> u8 {
    match kind {
        KeyBlobKind::Raw => 0,
        KeyBlobKind::Pkcs7 => 7,
        KeyBlobKind::Pkcs8 => 8,
    }
}

impl KeyBlobCodec for TagCodec {
    fn encode(&self, kind: KeyBlobKind, raw: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut blob = Vec::with_capacity(raw.len() + 1);
        blob.push(kind_tag(kind));
        blob.extend_from_slice(raw);
        Ok(blob)
    }

    fn decode(&self, blob: &[u8]) -> Result<(KeyBlobKind, Vec<u8>), CryptoError> {
        let (&tag, raw) = blob.split_first().ok_or(CryptoError::MalformedCiphertext)?;
        let kind = match tag {
            0 => KeyBlobKind::Raw,
            7 => KeyBlobKind::Pkcs7,
            8 => KeyBlobKind::Pkcs8,
            _ => return Err(CryptoError::MalformedCiphertext),
        };
        Ok((kind, raw.to_vec()))
    }
}
