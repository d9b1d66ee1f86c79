//! List-algorithms command implementation.

use crcforge_core::algorithm::ALL;

pub fn cmd_list_algorithms() -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{:<12} {:>5} {:>10} {:>10} {:>10}  endian  file-size",
        "Name", "bits", "poly", "init", "final"
    );
    println!("{}", "-".repeat(70));
    for preset in ALL {
        let d = preset.descriptor();
        println!(
            "{:<12} {:>5} {:>#10x} {:>#10x} {:>#10x}  {:<6}  {}",
            preset.name(),
            d.num_bits,
            d.polynomial,
            d.initial_xor,
            d.final_xor,
            if d.big_endian { "big" } else { "little" },
            d.use_file_size,
        );
    }
    Ok(())
}
