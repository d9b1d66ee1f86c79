//! crcforge CLI - bidirectional CRC checksums and checksum-targeted
//! byte patching.
//!
//! A Pure Rust command-line front end over the `crcforge-core` engine
//! and patch solver.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{
    cmd_apply, cmd_checksum, cmd_list_algorithms, cmd_patch, parse_target_checksum, AlgorithmArg,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crcforge")]
#[command(author, version, about = "Bidirectional CRC checksums and checksum-targeted patching")]
#[command(long_about = "
crcforge computes CRC checksums and can solve for the exact bytes to
splice into a file so that it digests to a chosen target checksum.

Examples:
  crcforge checksum file.bin
  crcforge checksum -a crc32-posix file.bin
  crcforge patch file.bin DEADBEEF --overwrite
  crcforge apply file.bin DEADBEEF -o patched.bin
  crcforge list-algorithms
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the checksum of a file
    Checksum {
        /// File to checksum
        path: PathBuf,

        /// CRC algorithm preset
        #[arg(short, long, value_enum, default_value = "crc32")]
        algorithm: AlgorithmArg,

        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Solve for the splice bytes that hit a target checksum, without
    /// writing any file
    Patch {
        /// Input file
        input: PathBuf,

        /// Target checksum, as hex (optionally prefixed with 0x)
        #[arg(value_parser = parse_target_checksum)]
        target_checksum: u64,

        /// CRC algorithm preset
        #[arg(short, long, value_enum, default_value = "crc32")]
        algorithm: AlgorithmArg,

        /// Splice position. Negative values index from the end of the
        /// file (repeatedly adding the file size until nonnegative). If
        /// omitted, defaults to the true end of the file when inserting,
        /// or to the last splice-width of bytes when overwriting.
        #[arg(short = 'P', long)]
        pos: Option<i64>,

        /// Overwrite existing bytes at the splice position instead of
        /// inserting
        #[arg(short = 'O', long)]
        overwrite: bool,

        /// Suppress the progress spinner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write a patched copy of a file that digests to a target checksum
    Apply {
        /// Input file
        input: PathBuf,

        /// Target checksum, as hex (optionally prefixed with 0x)
        #[arg(value_parser = parse_target_checksum)]
        target_checksum: u64,

        /// CRC algorithm preset
        #[arg(short, long, value_enum, default_value = "crc32")]
        algorithm: AlgorithmArg,

        /// Output file; defaults to patching the input in place via a
        /// `.tmp` sibling swapped over it on success
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Splice position. Negative values index from the end of the
        /// file (repeatedly adding the file size until nonnegative). If
        /// omitted, defaults to the true end of the file when inserting,
        /// or to the last splice-width of bytes when overwriting.
        #[arg(short = 'P', long)]
        pos: Option<i64>,

        /// Overwrite existing bytes at the splice position instead of
        /// inserting
        #[arg(short = 'O', long)]
        overwrite: bool,

        /// Keep a `.bak` copy of the original when patching in place
        #[arg(short, long)]
        backup: bool,

        /// Suppress the progress spinner
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the built-in CRC algorithm presets
    #[command(alias = "list")]
    ListAlgorithms,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Checksum { path, algorithm, quiet } => cmd_checksum(&path, algorithm, quiet),
        Commands::Patch {
            input,
            target_checksum,
            algorithm,
            pos,
            overwrite,
            quiet,
        } => cmd_patch(&input, algorithm, target_checksum, pos, overwrite, quiet),
        Commands::Apply {
            input,
            target_checksum,
            algorithm,
            output,
            pos,
            overwrite,
            backup,
            quiet,
        } => cmd_apply(&input, algorithm, target_checksum, output, pos, overwrite, backup, quiet),
        Commands::ListAlgorithms => cmd_list_algorithms(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
