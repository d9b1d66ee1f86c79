//! # crcforge-core
//!
//! A bidirectional CRC engine and the patch-solving algorithm built on
//! top of it: given a target checksum, solve for the exact byte splice
//! that makes a stream digest to that target.
//!
//! This crate provides the fundamental building blocks:
//!
//! - [`bits`]: polynomial/endian bit-twiddling primitives
//! - [`algorithm`]: the `Algorithm` descriptor and the standard presets
//! - [`tables`]: cached forward/reverse lookup table construction
//! - [`engine`]: `CrcEngine`, the stateful forward/reverse checksum
//! - [`stream`]: the seekable `Stream` trait and chunked window scans
//! - [`patch`]: `compute_patch` / `apply_patch`
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Patch layer: compute_patch / apply_patch                 │
//! │     solves for the splice that hits a target checksum   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Stream layer: Stream trait, consume / consume_reverse    │
//! │     windowed, chunked I/O over a seekable source         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Engine layer: CrcEngine                                  │
//! │     forward_step / reverse_step over cached tables       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Foundation: Algorithm descriptor, table builder, bits     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use crcforge_core::algorithm::CRC32;
//! use crcforge_core::engine::CrcEngine;
//!
//! let mut crc = CrcEngine::new(CRC32).unwrap();
//! crc.update(b"123456789");
//! assert_eq!(crc.digest(), 0xCBF4_3926);
//! ```
//!
//! Reversing a checksum to solve for a splice:
//!
//! ```rust
//! use crcforge_core::algorithm::CRC32;
//! use crcforge_core::patch::apply_patch;
//! use std::io::Cursor;
//!
//! let mut input = Cursor::new(b"hello".to_vec());
//! let mut output = Vec::new();
//! apply_patch(CRC32, &mut input, &mut output, 0xDEADBEEF, 5, false).unwrap();
//! assert_eq!(output, b"hello\x45\x7E\x34\x30");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithm;
pub mod bits;
pub mod engine;
pub mod error;
pub mod patch;
pub mod stream;
pub mod tables;

// Re-exports for convenience.
pub use algorithm::{Algorithm, Preset};
pub use engine::CrcEngine;
pub use error::{CrcForgeError, Result};
pub use patch::{apply_patch, compute_patch};
pub use stream::Stream;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::algorithm::{Algorithm, Preset};
    pub use crate::engine::CrcEngine;
    pub use crate::error::{CrcForgeError, Result};
    pub use crate::patch::{apply_patch, compute_patch};
    pub use crate::stream::Stream;
}
