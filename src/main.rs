use std::io::Write;

pub const HELP: &str = "svg2strokes

USAGE:
    svg2strokes [OPTIONS] [INPUT]

OPTIONS:
    -h, --help\t\t\tPrint this message
    -m, --marker <MARKER>\tText written before every line (default: 1)

ARGS:
    INPUT\tSVG file to read, \"-\" for stdin
    \t\t(default: brush_stroke_calibration_curves.svg)

Prints one line \"1; x1, y1, x2, y2, ...\" per SVG shape, listing the control
points of all its segments. Set RUST_LOG=debug for diagnostics.";

const DEFAULT_INPUT: &str = "brush_stroke_calibration_curves.svg";

fn main() {
    env_logger::init();

    fn inner() -> Result<(), Box<dyn std::error::Error>> {
        let mut input = None;
        let mut marker = svg2strokes::DEFAULT_MARKER.to_string();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    println!("{}", HELP);
                    return Ok(());
                }
                "-m" | "--marker" => match args.next() {
                    Some(value) => marker = value,
                    None => {
                        eprintln!("Missing value for {}\n\n{}", arg, HELP);
                        std::process::exit(1);
                    }
                },
                _ => {
                    if input.is_some() {
                        eprintln!("Unexpected argument {}\n\n{}", arg, HELP);
                        std::process::exit(1);
                    }
                    input = Some(arg);
                }
            }
        }

        let input = input.unwrap_or_else(|| DEFAULT_INPUT.to_string());
        let (paths, _attributes) = if input == "-" {
            let mut buffer = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
            svg2strokes::parse(&buffer)?
        } else {
            svg2strokes::parse_file(&input)?
        };
        log::debug!("Printing {} paths", paths.len());

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for path in &paths {
            writeln!(out, "{}", svg2strokes::format_path_with_marker(path, &marker))?;
        }
        out.flush()?;

        Ok(())
    }

    if let Err(e) = inner() {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}
