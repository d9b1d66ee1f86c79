//! Patch command implementation: solve for the splice bytes without
//! writing any file.

use crate::commands::{resolve_pos, AlgorithmArg};
use crate::utils::create_spinner;
use crcforge_core::{compute_patch, Preset, Stream};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn cmd_patch(
    input: &Path,
    algorithm: AlgorithmArg,
    target_checksum: u64,
    pos: Option<i64>,
    overwrite: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = BufReader::new(File::open(input)?);
    let len = source.stream_len()?;
    let descriptor = Preset::from(algorithm).descriptor();
    let pos = resolve_pos(pos, overwrite, descriptor.num_bytes() as u64, len);

    let pb = create_spinner("solving for splice bytes", !quiet);
    let splice = compute_patch(descriptor, &mut source, target_checksum, pos, overwrite)?;
    pb.finish_and_clear();

    let hex: String = splice.iter().map(|b| format!("{b:02X}")).collect();
    println!("{hex}");
    Ok(())
}
