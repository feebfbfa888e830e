//! Extract the control points of the curves in an SVG file.
//!
//! Every shape element (`path`, `polyline`, `polygon`, `line`, `rect`,
//! `circle`, `ellipse`) is converted into a [`Path`]: an ordered list of line,
//! quadratic and cubic Bézier [`Segment`]s. Elliptical arcs are approximated
//! with cubic curves using the [Lyon](https://github.com/nical/lyon) library.
//!
//! A path can then be written as a single "brush stroke" line with
//! [`format_path`]:
//!
//! ```text
//! 1; x1, y1, x2, y2, ..., xn, yn
//! ```
//!
//! **Note: Transforms and styles are not applied. The element attributes are
//! returned alongside each path, untouched.**
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

use std::fs;

use log::{debug, trace};

mod error;
mod format;
mod geometry;
mod path;
mod xml;

pub use crate::error::Error;
pub use crate::format::{format_path, format_path_with_marker, DEFAULT_MARKER};
pub use crate::geometry::{CoordinatePair, Path, Segment};
pub use crate::path::parse_path;
pub use crate::xml::Attributes;

/// Parse an SVG string into paths and their element attributes.
///
/// Both vectors have the same length, `attributes[i]` belongs to `paths[i]`.
/// Shapes are returned in document order.
pub fn parse(svg: &str) -> Result<(Vec<Path>, Vec<Attributes>), Error> {
    trace!("parse");

    // Parse the XML string into a list of shapes
    let shapes = xml::parse_xml(svg)?;
    trace!("parse: Found {} shapes", shapes.len());

    let mut paths = Vec::with_capacity(shapes.len());
    let mut attributes = Vec::with_capacity(shapes.len());
    for shape in shapes {
        paths.push(parse_path(&shape.expr)?);
        attributes.push(shape.attributes);
    }

    debug!(
        "parse: {} paths with {} segments",
        paths.len(),
        paths.iter().map(|p| p.segments.len()).sum::<usize>()
    );
    Ok((paths, attributes))
}

/// Read and parse an SVG file, see [`parse`].
pub fn parse_file<P: AsRef<std::path::Path>>(
    file_path: P,
) -> Result<(Vec<Path>, Vec<Attributes>), Error> {
    let file_path = file_path.as_ref();
    debug!("parse_file: Reading {}", file_path.display());
    let svg = fs::read_to_string(file_path).map_err(|source| Error::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    parse(&svg)
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_absolute_nonclosed() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 113,35 H 40 L -39,49 H 40" />
            </svg>
        "#;
        let (paths, attributes) = parse(input).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(attributes.len(), 1);
        assert_eq!(paths[0].segments.len(), 3);
        let expected: Vec<CoordinatePair> = vec![
            (113., 35.).into(),
            (40., 35.).into(),
            (40., 35.).into(),
            (-39., 49.).into(),
            (-39., 49.).into(),
            (40., 49.).into(),
        ];
        assert_eq!(paths[0].control_points().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_one_line_per_path() {
        let _ = env_logger::try_init();
        let input = r##"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 0,0 C 1,1 2,2 3,3" stroke="#ff0000" />
                <path d="M 10,10 20,15 10,20 Z m 0,40 H 0" stroke="#00ff00" />
                <circle cx="10" cy="10" r="5" />
            </svg>
        "##;
        let (paths, attributes) = parse(input).unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[1]["stroke"], "#00ff00");
        assert_eq!(attributes[2]["r"], "5");

        let lines: Vec<String> = paths.iter().map(format_path).collect();
        assert_eq!(lines[0], "1; 0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0");
        for (path, line) in paths.iter().zip(&lines) {
            assert!(line.starts_with("1; "));
            assert!(!line.ends_with(", "));
            let tokens = line["1; ".len()..].split(", ").count();
            assert_eq!(tokens, 2 * path.control_points().count());
        }
    }

    #[test]
    fn test_circle_is_closed() {
        let input = r#"<svg><circle cx="10" cy="10" r="5" /></svg>"#;
        let (paths, _) = parse(input).unwrap();
        let segments = &paths[0].segments;
        assert!(segments.len() >= 2);
        assert_eq!(segments[0].start(), (5., 10.).into());
        assert_eq!(segments.last().unwrap().end(), (5., 10.).into());
    }

    #[test]
    fn test_empty_document() {
        let (paths, attributes) = parse("<svg></svg>").unwrap();
        assert!(paths.is_empty());
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_invalid_path_data() {
        let input = r#"<svg><path d="L 10,10" /></svg>"#;
        assert!(matches!(parse(input), Err(Error::PathParse(_))));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("this/file/does/not/exist.svg");
        match result {
            Err(Error::Io { path, .. }) => {
                assert_eq!(path, std::path::Path::new("this/file/does/not/exist.svg"));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let path = parse_path("M 0,0 Q 1,1 2,0").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let path2: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, path2);
    }
}
