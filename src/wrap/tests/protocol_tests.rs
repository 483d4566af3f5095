// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

const WRAP_IV: [u8; 8] = [0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7];

fn cbc_cipher() -> WrapCipher<RotorCipher> {
    WrapCipher::new(RotorCipher::new(8), ChainMode::Cbc, Some(&WRAP_IV))
}

#[test]
fn test_null_wrap_passthrough() {
    let mut protocol = KeyWrapProtocol::<RotorCipher, _>::new(
        WrapFormat::NullWrap,
        KeyClass::Symmetric,
        None,
        TagCodec,
    )
    .unwrap();

    let wrapped = protocol.wrap(None, b"raw key bytes", b"").unwrap();
    assert_eq!(wrapped, b"raw key bytes");

    let (key, desc) = protocol.unwrap(None, &wrapped).unwrap();
    assert_eq!(key.to_vec().unwrap(), b"raw key bytes");
    assert!(desc.is_empty());
}

#[test]
fn test_null_wrap_rejects_cipher() {
    assert!(matches!(
        KeyWrapProtocol::new(
            WrapFormat::NullWrap,
            KeyClass::Symmetric,
            Some(cbc_cipher()),
            TagCodec,
        ),
        Err(CryptoError::InvalidParameter)
    ));
}

#[test]
fn test_null_wrap_rejects_asymmetric_class() {
    assert!(matches!(
        KeyWrapProtocol::<RotorCipher, _>::new(
            WrapFormat::NullWrap,
            KeyClass::Asymmetric,
            None,
            TagCodec,
        ),
        Err(CryptoError::InvalidParameter)
    ));
}

#[test]
fn test_null_wrap_rejects_kek() {
    let mut protocol = KeyWrapProtocol::<RotorCipher, _>::new(
        WrapFormat::NullWrap,
        KeyClass::Symmetric,
        None,
        TagCodec,
    )
    .unwrap();
    let kek = test_key(0xC3, 16);
    assert_eq!(
        protocol.wrap(Some(&kek), b"raw", b""),
        Err(CryptoError::InvalidParameter)
    );
}

#[test]
fn test_encrypting_formats_require_cipher() {
    for format in [
        WrapFormat::StandardWrap(KeyBlobKind::Pkcs8),
        WrapFormat::CustomWrap,
    ] {
        assert!(matches!(
            KeyWrapProtocol::<RotorCipher, _>::new(format, KeyClass::Symmetric, None, TagCodec),
            Err(CryptoError::InvalidParameter)
        ));
    }
}

#[test]
fn test_standard_wrap_round_trip() {
    let kek = test_key(0xC3, 16);
    let mut protocol = KeyWrapProtocol::new(
        WrapFormat::StandardWrap(KeyBlobKind::Pkcs8),
        KeyClass::Asymmetric,
        Some(cbc_cipher()),
        TagCodec,
    )
    .unwrap();

    let wrapped = protocol.wrap(Some(&kek), b"private key blob", b"").unwrap();
    assert_ne!(&wrapped[1..], b"private key blob");

    let (key, desc) = protocol.unwrap(Some(&kek), &wrapped).unwrap();
    assert_eq!(key.to_vec().unwrap(), b"private key blob");
    assert!(desc.is_empty());
}

#[test]
fn test_standard_wrap_rejects_kind_mismatch() {
    let kek = test_key(0xC3, 16);
    let mut wrapper = KeyWrapProtocol::new(
        WrapFormat::StandardWrap(KeyBlobKind::Pkcs7),
        KeyClass::Symmetric,
        Some(cbc_cipher()),
        TagCodec,
    )
    .unwrap();
    let wrapped = wrapper.wrap(Some(&kek), b"secret key", b"").unwrap();

    let mut unwrapper = KeyWrapProtocol::new(
        WrapFormat::StandardWrap(KeyBlobKind::Pkcs8),
        KeyClass::Symmetric,
        Some(cbc_cipher()),
        TagCodec,
    )
    .unwrap();
    assert!(matches!(
        unwrapper.unwrap(Some(&kek), &wrapped),
        Err(CryptoError::MalformedCiphertext)
    ));
}

#[test]
fn test_standard_wrap_rejects_descriptive_data() {
    let kek = test_key(0xC3, 16);
    let mut protocol = KeyWrapProtocol::new(
        WrapFormat::StandardWrap(KeyBlobKind::Raw),
        KeyClass::Symmetric,
        Some(cbc_cipher()),
        TagCodec,
    )
    .unwrap();
    assert_eq!(
        protocol.wrap(Some(&kek), b"secret key", b"comment"),
        Err(CryptoError::InvalidParameter)
    );
}

#[test]
fn test_standard_wrap_requires_kek() {
    let mut protocol = KeyWrapProtocol::new(
        WrapFormat::StandardWrap(KeyBlobKind::Raw),
        KeyClass::Symmetric,
        Some(cbc_cipher()),
        TagCodec,
    )
    .unwrap();
    assert_eq!(
        protocol.wrap(None, b"secret key", b""),
        Err(CryptoError::InvalidKey)
    );
}

#[test]
fn test_custom_wrap_through_protocol() {
    let kek = test_key(0xC3, 16);
    let mut protocol = KeyWrapProtocol::new(
        WrapFormat::CustomWrap,
        KeyClass::Asymmetric,
        Some(cbc_cipher()),
        TagCodec,
    )
    .unwrap();

    let wrapped = protocol
        .wrap(Some(&kek), b"private key blob", b"backup 2024-11")
        .unwrap();
    let (key, desc) = protocol.unwrap(Some(&kek), &wrapped).unwrap();
    assert_eq!(key.to_vec().unwrap(), b"private key blob");
    assert_eq!(desc, b"backup 2024-11");
}

#[test]
fn test_custom_wrap_requires_iv() {
    let kek = test_key(0xC3, 16);
    let no_iv = WrapCipher::new(RotorCipher::new(8), ChainMode::Cbc, None);
    let mut protocol =
        KeyWrapProtocol::new(WrapFormat::CustomWrap, KeyClass::Symmetric, Some(no_iv), TagCodec)
            .unwrap();
    assert_eq!(
        protocol.wrap(Some(&kek), b"secret key", b""),
        Err(CryptoError::ConfigError)
    );
}
