//! CLI command implementations.

mod apply;
mod checksum;
mod list_algorithms;
mod patch;

pub use apply::cmd_apply;
pub use checksum::cmd_checksum;
pub use list_algorithms::cmd_list_algorithms;
pub use patch::cmd_patch;

use clap::ValueEnum;
use crcforge_core::Preset;

/// CRC algorithm preset (for clap `ValueEnum`), mirroring [`Preset`] the
/// way this workspace's CLI translates core enums into argument enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Standard CRC-32 (ZIP, GZIP, PNG)
    Crc32,
    /// CRC-32 with the POSIX `cksum(1)` convention
    Crc32Posix,
    /// CRC-16/CCITT
    Crc16Ccitt,
    /// CRC-16/XMODEM
    Crc16Xmodem,
    /// CRC-16/IBM (ARC)
    Crc16Ibm,
}

impl From<AlgorithmArg> for Preset {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Crc32 => Preset::Crc32,
            AlgorithmArg::Crc32Posix => Preset::Crc32Posix,
            AlgorithmArg::Crc16Ccitt => Preset::Crc16Ccitt,
            AlgorithmArg::Crc16Xmodem => Preset::Crc16Xmodem,
            AlgorithmArg::Crc16Ibm => Preset::Crc16Ibm,
        }
    }
}

/// Parse a checksum given on the command line, accepting an optional
/// `0x` prefix.
pub fn parse_target_checksum(s: &str) -> Result<u64, String> {
    let trimmed = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(trimmed, 16).map_err(|e| format!("invalid hex checksum {s:?}: {e}"))
}

/// Resolve a CLI-supplied `--pos` into the position `compute_patch`/
/// `apply_patch` should receive.
///
/// When `--pos` is omitted (`pos = None`), the default is mode-dependent:
/// inserting defaults to the true end of the file (`source_len`), while
/// overwriting defaults to the last `patch_len` bytes
/// (`source_len - patch_len`, clamped to 0 if the file is shorter than a
/// splice). When `--pos` is given, negative values are repeatedly offset
/// by `source_len` until nonnegative, so positions can index from the
/// end of the file. The core itself never does either of these — it
/// requires an already-resolved, nonnegative position and rejects
/// anything else outright.
pub fn resolve_pos(pos: Option<i64>, overwrite: bool, patch_len: u64, source_len: u64) -> i64 {
    match pos {
        None => {
            if overwrite {
                source_len.saturating_sub(patch_len) as i64
            } else {
                source_len as i64
            }
        }
        Some(mut pos) => {
            if source_len > 0 {
                while pos < 0 {
                    pos += source_len as i64;
                }
            }
            pos
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_checksum_accepts_0x_prefix() {
        assert_eq!(parse_target_checksum("0xDEADBEEF"), Ok(0xDEAD_BEEF));
        assert_eq!(parse_target_checksum("deadbeef"), Ok(0xDEAD_BEEF));
    }

    #[test]
    fn test_resolve_pos_wraps_negative_values() {
        assert_eq!(resolve_pos(Some(-1), false, 4, 5), 4);
        assert_eq!(resolve_pos(Some(-6), false, 4, 5), 4);
        assert_eq!(resolve_pos(Some(3), false, 4, 5), 3);
    }

    #[test]
    fn test_resolve_pos_defaults_to_end_for_insert() {
        assert_eq!(resolve_pos(None, false, 4, 5), 5);
        assert_eq!(resolve_pos(None, false, 4, 0), 0);
    }

    #[test]
    fn test_resolve_pos_defaults_to_last_splice_width_for_overwrite() {
        assert_eq!(resolve_pos(None, true, 4, 10), 6);
        // Clamp to 0 when the file is shorter than a splice.
        assert_eq!(resolve_pos(None, true, 4, 2), 0);
    }
}
