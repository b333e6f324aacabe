//! PLY header inspection.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use mesh_io::read_ply_header;

/// Print the encoding, comments and element counts of a PLY file.
pub fn run(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let header = read_ply_header(&mut BufReader::new(file))
        .with_context(|| format!("failed to read PLY header of {}", path.display()))?;

    println!("{}", path.display());
    println!("  encoding: {}", header.encoding.keyword());
    for comment in &header.comments {
        println!("  comment:  {comment}");
    }
    for element in &header.elements {
        println!(
            "  element:  {} x {} ({} properties)",
            element.name,
            element.count,
            element.properties.len()
        );
    }
    Ok(())
}
