//! Apply command implementation: write a patched copy of the input,
//! either to an explicit output path or in place (via a `.tmp` sibling
//! swapped over the original on success).

use crate::commands::{resolve_pos, AlgorithmArg};
use crate::utils::create_spinner;
use crcforge_core::{apply_patch, Preset, Stream};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[allow(clippy::too_many_arguments)]
pub fn cmd_apply(
    input: &Path,
    algorithm: AlgorithmArg,
    target_checksum: u64,
    output: Option<PathBuf>,
    pos: Option<i64>,
    overwrite: bool,
    backup: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let in_place = output.is_none();
    let write_path = output.unwrap_or_else(|| {
        let mut s = input.as_os_str().to_os_string();
        s.push(".tmp");
        PathBuf::from(s)
    });

    let mut source = BufReader::new(File::open(input)?);
    let len = source.stream_len()?;
    let descriptor = Preset::from(algorithm).descriptor();
    let pos = resolve_pos(pos, overwrite, descriptor.num_bytes() as u64, len);

    let pb = create_spinner("applying patch", !quiet);
    {
        let mut dest = File::create(&write_path)?;
        apply_patch(descriptor, &mut source, &mut dest, target_checksum, pos, overwrite)?;
    }
    pb.finish_and_clear();

    if in_place {
        if backup {
            let mut bak = input.as_os_str().to_os_string();
            bak.push(".bak");
            std::fs::copy(input, &bak)?;
        }
        std::fs::rename(&write_path, input)?;
        println!("patched {} in place", input.display());
    } else {
        println!("wrote patched copy to {}", write_path.display());
    }

    Ok(())
}
