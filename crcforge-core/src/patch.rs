//! The patch solver and applier: given a target checksum, compute (or
//! write) the exact splice of `num_bytes` bytes that makes a stream's
//! checksum equal that target.

use crate::algorithm::Algorithm;
use crate::bits::{swap_endian, to_le_bytes, to_min_le_bytes};
use crate::engine::CrcEngine;
use crate::error::{CrcForgeError, Result};
use crate::stream::{consume, consume_reverse, read_exact_or_short, Stream, DEFAULT_CHUNK_SIZE};
use std::io::{SeekFrom, Write};

/// Compute the splice bytes that, written at `target_pos` into `source`,
/// make the resulting stream's checksum equal `target_checksum`.
///
/// `overwrite = true` replaces `num_bytes` of existing content at
/// `target_pos`; `overwrite = false` inserts the splice without
/// consuming any existing bytes.
///
/// Returns [`CrcForgeError::InvalidPosition`] if `target_pos` is
/// negative or past the end of `source`.
pub fn compute_patch(
    algorithm: Algorithm,
    source: &mut (impl Stream + ?Sized),
    target_checksum: u64,
    target_pos: i64,
    overwrite: bool,
) -> Result<Vec<u8>> {
    algorithm.validate()?;
    let orig_size = Stream::stream_len(source)?;

    if target_pos < 0 || target_pos as u64 > orig_size {
        return Err(CrcForgeError::invalid_position(target_pos, orig_size));
    }
    let target_pos = target_pos as u64;
    let patch_len = algorithm.num_bytes();
    let mask = algorithm.mask();

    let target_size = if overwrite {
        orig_size.max(target_pos + patch_len as u64)
    } else {
        orig_size + patch_len as u64
    };

    // Register-level goal: undo final_xor, then (if applicable) undo the
    // length-suffix fold, landing on the raw value the payload scan must
    // produce.
    let mut goal_engine = CrcEngine::new(algorithm)?;
    let mut goal = (target_checksum ^ algorithm.final_xor) & mask;
    if algorithm.use_file_size {
        goal_engine.reset(Some(goal));
        goal_engine.update_reverse(&to_min_le_bytes(target_size));
        goal = goal_engine.raw_value();
    }

    // Forward scan of the prefix.
    let mut engine = CrcEngine::new(algorithm)?;
    engine.reset(Some(algorithm.initial_xor));
    consume(&mut engine, source, Some(0), Some(target_pos), DEFAULT_CHUNK_SIZE)?;
    let mut a = engine.raw_value();

    // Reverse scan of the suffix. When overwriting near the end of the
    // source, the nominal splice end can run past the real data; there is
    // nothing there to fold in, so clamp to what actually exists.
    let suffix_start =
        (target_pos + if overwrite { patch_len as u64 } else { 0 }).min(orig_size);
    engine.reset(Some(goal));
    consume_reverse(&mut engine, source, Some(suffix_start), Some(orig_size), DEFAULT_CHUNK_SIZE)?;
    let b = engine.raw_value();

    // Solve for the splice: the patch_len-byte sequence that forward-updates
    // A into B is recovered by reverse-updating a register seeded with B
    // using A's little-endian byte encoding.
    if algorithm.big_endian {
        a = swap_endian(a, algorithm.num_bits);
    }
    engine.reset(Some(b));
    engine.update_reverse(&to_le_bytes(a, patch_len));
    let mut patch = engine.raw_value();
    if algorithm.big_endian {
        patch = swap_endian(patch, algorithm.num_bits);
    }

    Ok(to_le_bytes(patch, patch_len))
}

/// Copy `input` to `output`, substituting the computed splice at
/// `target_pos`.
///
/// See [`compute_patch`] for the meaning of `overwrite`.
pub fn apply_patch(
    algorithm: Algorithm,
    input: &mut (impl Stream + ?Sized),
    output: &mut (impl Write + ?Sized),
    target_checksum: u64,
    target_pos: i64,
    overwrite: bool,
) -> Result<()> {
    let splice = compute_patch(algorithm, input, target_checksum, target_pos, overwrite)?;
    let patch_len = splice.len() as u64;
    let target_pos = target_pos as u64;
    let end_pos = Stream::stream_len(input)?;

    input.seek(SeekFrom::Start(0))?;
    let mut pos = 0u64;
    let mut buf = vec![0u8; DEFAULT_CHUNK_SIZE];

    while pos < target_pos {
        let this_chunk = (DEFAULT_CHUNK_SIZE as u64).min(target_pos - pos) as usize;
        buf.resize(this_chunk, 0);
        read_exact_or_short(input, &mut buf)?;
        output.write_all(&buf)?;
        pos += this_chunk as u64;
    }

    output.write_all(&splice)?;
    if overwrite {
        pos += patch_len;
        input.seek(SeekFrom::Start(pos))?;
    }

    while pos < end_pos {
        let this_chunk = (DEFAULT_CHUNK_SIZE as u64).min(end_pos - pos) as usize;
        buf.resize(this_chunk, 0);
        read_exact_or_short(input, &mut buf)?;
        output.write_all(&buf)?;
        pos += this_chunk as u64;
    }

    Ok(())
}
