/// Example: Print highlight sizes for a range of sweep angles
///
/// Usage: cargo run --example sweep_table -- [segments]

use quatviz_core::{ring_highlight, segments_to_draw, RingMesh};
use std::env;
use std::io;

fn main() -> io::Result<()> {
    let segments = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("Bad segment count: {}", e)))?,
        None => 64,
    };

    let ring = RingMesh::new(10.0, 11.0, segments)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    println!("{:>8} {:>9} {:>9} {:>6}", "degrees", "segments", "vertices", "faces");
    for degrees in (-360..=360).step_by(45) {
        let theta = (degrees as f32).to_radians();
        let mesh = ring_highlight(&ring, theta)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!(
            "{:>8} {:>9} {:>9} {:>6}",
            degrees,
            segments_to_draw(segments, theta),
            mesh.vertex_count(),
            mesh.face_count()
        );
    }

    Ok(())
}
