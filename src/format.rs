use crate::geometry::Path;

/// Marker written at the start of every stroke line.
pub const DEFAULT_MARKER: &str = "1";

/// Format a path as `"1; x1, y1, x2, y2, ..."`.
///
/// See [`format_path_with_marker`].
pub fn format_path(path: &Path) -> String {
    format_path_with_marker(path, DEFAULT_MARKER)
}

/// Format a path as a single stroke line.
///
/// The line starts with `marker` followed by `"; "`, then lists the x and y
/// coordinate of every control point of every segment, separated by `", "`.
/// Coordinates use the shortest round-trip representation: integral values
/// keep their fractional part (`3.0`, not `3`), very large or small ones use
/// exponent notation (`1e16`, `1e-5`).
/// A path without segments results in the bare prefix.
pub fn format_path_with_marker(path: &Path, marker: &str) -> String {
    let mut out = String::with_capacity(marker.len() + 2 + path.segments.len() * 48);
    out.push_str(marker);
    out.push_str("; ");
    for (idx, point) in path.control_points().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{:?}, {:?}", point.x, point.y));
    }
    out
}
