//! Checksum command implementation.

use crate::commands::AlgorithmArg;
use crate::utils::create_progress_bar;
use crcforge_core::stream::DEFAULT_CHUNK_SIZE;
use crcforge_core::{CrcEngine, Preset, Stream};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn cmd_checksum(
    path: &Path,
    algorithm: AlgorithmArg,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = BufReader::new(File::open(path)?);
    let len = source.stream_len()?;

    let pb = create_progress_bar(len, !quiet);
    pb.set_message(format!("{}", path.display()));

    let mut engine = CrcEngine::new(Preset::from(algorithm).descriptor())?;
    let mut buf = vec![0u8; DEFAULT_CHUNK_SIZE];
    loop {
        let n = source.read(&mut buf)?;
        if n == 0 {
            break;
        }
        engine.update(&buf[..n]);
        pb.inc(n as u64);
    }
    pb.finish_and_clear();

    println!("{}", engine.hex_digest());
    Ok(())
}
