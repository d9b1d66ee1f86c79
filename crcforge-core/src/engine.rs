//! The stateful CRC engine: forward update, reverse update, reset, and
//! digest finalization.
//!
//! Unlike this crate family's slicing-by-8 `Crc32`/`Crc64` types (built
//! for raw throughput over a fixed, well-known algorithm), `CrcEngine` is
//! generic over any [`Algorithm`] descriptor and walks one byte at a
//! time in both directions — the patch solver in [`crate::patch`] needs
//! the reverse direction, which a wide table cannot provide.

use crate::algorithm::Algorithm;
use crate::bits::to_min_le_bytes;
use crate::error::Result;
use crate::tables::{tables_for, CrcTables};

/// A single forward step: fold byte `b` into register `v`.
///
/// Exposed at module level (rather than only as a method) so the table
/// reversibility property test in [`crate::tables`] can drive it directly
/// against arbitrary states without constructing a full engine.
pub fn forward_step(algo: Algorithm, tables: &CrcTables, v: u64, b: u8) -> u64 {
    let mask_n = algo.mask();
    if algo.big_endian {
        let idx = ((v >> (algo.num_bits - 8)) ^ b as u64) & 0xFF;
        ((v << 8) & mask_n) ^ tables.forward[idx as usize]
    } else {
        let idx = (v ^ b as u64) & 0xFF;
        (v >> 8) ^ tables.forward[idx as usize]
    }
}

/// A single reverse step: the inverse of [`forward_step`] — given the
/// state *after* consuming byte `b`, recover the state *before*.
pub fn reverse_step(algo: Algorithm, tables: &CrcTables, v: u64, b: u8) -> u64 {
    let mask_n = algo.mask();
    if algo.big_endian {
        let idx = v & 0xFF;
        ((v >> 8)
            ^ tables.reverse[idx as usize]
            ^ ((b as u64) << (algo.num_bits - 8))
            ^ (idx << (algo.num_bits - 8)))
            & mask_n
    } else {
        let idx = (v >> (algo.num_bits - 8)) & 0xFF;
        ((v << 8) & mask_n) ^ tables.reverse[idx as usize] ^ (b as u64)
    }
}

/// A stateful, bidirectional CRC checksum.
///
/// `CrcEngine` carries its own copy of the [`Algorithm`] descriptor and a
/// reference to the (cached, shared) lookup tables for that descriptor.
/// It is cheap to construct and intended to be created per operation.
#[derive(Debug, Clone)]
pub struct CrcEngine {
    algorithm: Algorithm,
    tables: &'static CrcTables,
    raw_value: u64,
    consumed: u64,
}

impl CrcEngine {
    /// Create a new engine for the given algorithm, reset to its initial
    /// state.
    ///
    /// Fails with [`crate::error::CrcForgeError::ProgrammingError`] if the
    /// descriptor's `num_bits` is not a positive multiple of 8.
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        algorithm.validate()?;
        let tables = tables_for(algorithm.polynomial, algorithm.num_bits, algorithm.big_endian);
        Ok(Self {
            algorithm,
            tables,
            raw_value: algorithm.initial_xor & algorithm.mask(),
            consumed: 0,
        })
    }

    /// The algorithm descriptor this engine was built for.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Reset the engine. With `raw_value = None`, resets to `initial_xor`
    /// and zeroes the consumed-byte counter. With `Some(v)`, seeds the
    /// register with `v` directly (used by the patch solver to resume
    /// from an intermediate state) and still zeroes the counter.
    pub fn reset(&mut self, raw_value: Option<u64>) {
        self.raw_value = raw_value.unwrap_or(self.algorithm.initial_xor) & self.algorithm.mask();
        self.consumed = 0;
    }

    /// Fold `data` into the register, advancing forward.
    pub fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.raw_value = forward_step(self.algorithm, self.tables, self.raw_value, b);
        }
        self.consumed += data.len() as u64;
    }

    /// Fold `data` into the register, retreating backward.
    ///
    /// `data` is given in the order the bytes appear in the stream; since
    /// undoing a forward update must retire the most-recently-consumed
    /// byte first, the bytes are walked in reverse.
    pub fn update_reverse(&mut self, data: &[u8]) {
        for &b in data.iter().rev() {
            self.raw_value = reverse_step(self.algorithm, self.tables, self.raw_value, b);
        }
        self.consumed += data.len() as u64;
    }

    /// The current raw register value (before `final_xor` and the
    /// length suffix).
    pub fn raw_value(&self) -> u64 {
        self.raw_value
    }

    /// Number of bytes folded in since the last [`CrcEngine::reset`].
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Finalize: fold in the length suffix if `use_file_size`, apply
    /// `final_xor`, and mask to `num_bits`.
    pub fn digest(&self) -> u64 {
        let mut value = self.raw_value;
        if self.algorithm.use_file_size {
            let suffix = to_min_le_bytes(self.consumed);
            for b in suffix {
                value = forward_step(self.algorithm, self.tables, value, b);
            }
        }
        (value ^ self.algorithm.final_xor) & self.algorithm.mask()
    }

    /// The digest, formatted as uppercase hex, zero-padded to
    /// `2 * num_bytes` characters.
    pub fn hex_digest(&self) -> String {
        format!("{:0width$X}", self.digest(), width = self.algorithm.num_bytes() * 2)
    }
}
