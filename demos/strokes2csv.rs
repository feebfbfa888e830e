use std::env;
use std::io;
use std::process::exit;

use serde::Serialize;

/// One control point, tagged with the index of the path it belongs to.
#[derive(Serialize)]
struct Row {
    path: usize,
    x: f64,
    y: f64,
}

fn main() {
    // Logging
    env_logger::init();

    // Argument parsing
    let args: Vec<_> = env::args().collect();
    match args.len() {
        2 => {}
        _ => {
            println!("Usage: {} <path/to/file.svg>", args[0]);
            exit(1);
        }
    };

    // Parse data
    let (paths, _) = svg2strokes::parse_file(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(2);
    });

    // Write data
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for (num, path) in paths.iter().enumerate() {
        for point in path.control_points() {
            wtr.serialize(Row {
                path: num,
                x: point.x,
                y: point.y,
            })
            .unwrap();
        }
    }
    wtr.flush().unwrap();
}
