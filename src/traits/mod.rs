// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! High-level cryptographic operation wrappers.
//!
//! Each wrapper consolidates algorithm-specific implementations behind a
//! consistent API:
//!
//! - [`Encrypter`] / [`Decrypter`]: streaming encryption and decryption
//! - [`KeyWrapper`] / [`KeyUnwrapper`]: key wrapping and unwrapping
//! - [`KeyDeriver`]: key derivation
//!
//! All wrappers support the two-phase buffer pattern of the underlying
//! operations and add `_vec` convenience methods that allocate the output
//! buffer automatically.

mod decrypter;
mod encrypter;

mod unwrapper;
mod wrapper;

mod deriver;

pub use decrypter::*;
pub use deriver::*;
pub use encrypter::*;
pub use unwrapper::*;
pub use wrapper::*;

use super::*;
