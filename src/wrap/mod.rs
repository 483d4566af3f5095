// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key wrapping and unwrapping.
//!
//! This module converts key material between an opaque in-provider
//! representation and an exportable encrypted blob, and back. Three wrap
//! formats exist, chosen once per operation and matched exhaustively:
//!
//! - **NullWrap**: raw passthrough with no encryption; valid only when no
//!   wrap cipher is selected and the wrapped key is symmetric
//! - **StandardWrap**: the raw key blob encrypted through the streaming
//!   engine under a caller-supplied cipher, then structurally encoded by the
//!   injected [`KeyBlobCodec`]
//! - **CustomWrap**: the double-CBC-encryption-with-byte-reversal scheme of
//!   [`CustomKeyWrapAlgo`], which carries caller-supplied descriptive data
//!   alongside the key and needs no codec
//!
//! [`KeyWrapProtocol`] orchestrates the formats behind one wrap/unwrap
//! entry point; the individual algorithm types are also usable directly
//! through [`WrapOp`] and [`UnwrapOp`].

mod custom;
mod protocol;
mod standard;

pub use custom::*;
pub use protocol::*;
pub use standard::*;

pub(crate) use super::*;

/// Wrap format for a key wrap operation.
///
/// The set is closed: adding a format means extending this enum and every
/// `match` over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapFormat {
    /// Raw passthrough, no encryption.
    NullWrap,
    /// Cipher-encrypted blob, structurally encoded as the given kind.
    StandardWrap(KeyBlobKind),
    /// Double CBC encryption with byte reversal and embedded descriptive
    /// data.
    CustomWrap,
}

/// Class of the key being wrapped or unwrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Symmetric (secret) key material.
    Symmetric,
    /// Asymmetric (private) key material.
    Asymmetric,
}

#[cfg(test)]
pub(crate) mod tests;
