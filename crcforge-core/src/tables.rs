//! Forward and reverse lookup table construction.
//!
//! Tables are pure functions of `(polynomial, num_bits, big_endian)`, so
//! they are built once per distinct triple and cached behind a
//! process-wide registry, the same "build once, look up by key"
//! discipline this crate family uses for its CRC-32/64 slicing tables.

use crate::bits::{reverse_bits, swap_endian};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// A matched pair of forward and reverse 256-entry lookup tables for one
/// `(polynomial, num_bits, big_endian)` triple.
#[derive(Debug, Clone)]
pub struct CrcTables {
    /// `forward[b]` is the register contribution of byte `b`.
    pub forward: [u64; 256],
    /// `reverse[b]` is the byte-`b` step used to roll the register
    /// backward; see the module docs for the construction rule.
    pub reverse: [u64; 256],
}

type TableKey = (u64, u32, bool);

static TABLE_CACHE: OnceLock<Mutex<HashMap<TableKey, &'static CrcTables>>> = OnceLock::new();

/// Build (or fetch from cache) the forward/reverse table pair for the
/// given polynomial, register width, and bit order.
///
/// The returned reference is valid for the lifetime of the process:
/// tables are leaked into the cache once built, since there are at most
/// a handful of distinct algorithms active in any program.
pub fn tables_for(polynomial: u64, num_bits: u32, big_endian: bool) -> &'static CrcTables {
    let key = (polynomial, num_bits, big_endian);
    let cache = TABLE_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let mut guard = cache.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(tables) = guard.get(&key) {
        return tables;
    }

    let built = Box::leak(Box::new(build_tables(polynomial, num_bits, big_endian)));
    guard.insert(key, built);
    built
}

fn build_tables(polynomial: u64, num_bits: u32, big_endian: bool) -> CrcTables {
    let poly_rev = reverse_bits(polynomial, num_bits);
    let mask_bit = 1u64 << (num_bits - 1);
    let mask_n = if num_bits >= 64 {
        u64::MAX
    } else {
        (1u64 << num_bits) - 1
    };

    let mut forward = [0u64; 256];
    let mut reverse = [0u64; 256];

    for num in 0u64..256 {
        // Forward entry.
        let mut value = if big_endian {
            swap_endian(num, num_bits)
        } else {
            num
        };
        for _ in 0..8 {
            value = if big_endian {
                if value & mask_bit != 0 {
                    (value << 1) ^ polynomial
                } else {
                    value << 1
                }
            } else if value & 1 != 0 {
                (value >> 1) ^ poly_rev
            } else {
                value >> 1
            };
        }
        forward[num as usize] = value & mask_n;

        // Reverse entry: same seed/swap discipline, per-bit rule inverted.
        let mut value = if big_endian { num } else { swap_endian(num, num_bits) };
        for _ in 0..8 {
            value = if big_endian {
                if value & 1 != 0 {
                    ((value ^ polynomial) >> 1) | mask_bit
                } else {
                    value >> 1
                }
            } else if value & mask_bit != 0 {
                ((value ^ poly_rev) << 1) | 1
            } else {
                value << 1
            };
        }
        if big_endian {
            value ^= swap_endian(num, num_bits);
        }
        reverse[num as usize] = value & mask_n;
    }

    CrcTables { forward, reverse }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{CRC16_CCITT, CRC16_IBM, CRC16_XMODEM, CRC32, CRC32_POSIX};

    #[test]
    fn test_cache_returns_identical_pointer() {
        let a = tables_for(CRC32.polynomial, CRC32.num_bits, CRC32.big_endian);
        let b = tables_for(CRC32.polynomial, CRC32.num_bits, CRC32.big_endian);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_crc32_table_matches_known_values() {
        let t = tables_for(CRC32.polynomial, CRC32.num_bits, CRC32.big_endian);
        // Standard reflected CRC-32 table, first and second entries.
        assert_eq!(t.forward[0], 0x0000_0000);
        assert_eq!(t.forward[1], 0x7707_3096);
    }

    #[test]
    fn test_reversibility_of_table_step() {
        // For every preset, forward-then-reverse-stepping every byte value
        // from a variety of states returns to the original state.
        for algo in [CRC32, CRC32_POSIX, CRC16_CCITT, CRC16_XMODEM, CRC16_IBM] {
            let tables = tables_for(algo.polynomial, algo.num_bits, algo.big_endian);
            let mask = algo.mask();
            for &state in &[0u64, 1, mask, mask / 2, 0xABCD & mask] {
                for byte in 0u8..=255 {
                    let fwd = crate::engine::forward_step(algo, tables, state, byte);
                    let back = crate::engine::reverse_step(algo, tables, fwd, byte);
                    assert_eq!(back, state, "algo={:?} byte={byte:#x}", algo);
                }
            }
        }
    }
}
