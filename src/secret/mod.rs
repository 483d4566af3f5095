// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Generic secret key material.
//!
//! This module provides the owned container for raw symmetric key material
//! used across the engine: as cipher keys, as derivation passphrases, and as
//! the recovered output of unwrap operations. Material is zeroized on drop
//! and whenever it is replaced.

mod key;

pub use key::*;

use super::*;
