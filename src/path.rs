//! Parsing of SVG path data (the `d` attribute) into segments.

use log::trace;
use lyon_geom::{point, vector, Angle, ArcFlags, CubicBezierSegment, SvgArc};
use svgtypes::{PathParser, PathSegment};

use crate::error::Error;
use crate::geometry::{CoordinatePair, Path, Segment};

/// Segment buffer for the path that is currently being parsed.
#[derive(Debug, Default, PartialEq)]
struct CurrentPath {
    segments: Vec<Segment>,

    /// The current point, `None` until the first move-to.
    current: Option<CoordinatePair>,

    /// Start of the current subpath, target of a close-path command.
    subpath_start: Option<CoordinatePair>,
}

impl CurrentPath {
    fn new() -> Self {
        Self::default()
    }

    /// Return the current point or fail if no subpath has been started.
    fn current_point(&self, command: &str) -> Result<CoordinatePair, Error> {
        self.current.ok_or_else(|| {
            Error::PathParse(format!("Invalid state: {} without a current point", command))
        })
    }

    /// Resolve a (possibly relative) coordinate pair against `base`.
    fn resolve(base: CoordinatePair, abs: bool, x: f64, y: f64) -> CoordinatePair {
        if abs {
            CoordinatePair::new(x, y)
        } else {
            CoordinatePair::new(base.x + x, base.y + y)
        }
    }

    fn move_to(&mut self, to: CoordinatePair) {
        self.current = Some(to);
        self.subpath_start = Some(to);
    }

    /// Add a segment and advance the current point to its end.
    fn add(&mut self, segment: Segment) {
        self.current = Some(segment.end());
        self.segments.push(segment);
    }

    /// Second control handle of the last segment, if it is a cubic curve.
    fn last_cubic_ctrl(&self) -> Option<CoordinatePair> {
        match self.segments.last() {
            Some(Segment::Cubic { ctrl2, .. }) => Some(*ctrl2),
            _ => None,
        }
    }

    /// Control handle of the last segment, if it is a quadratic curve.
    fn last_quadratic_ctrl(&self) -> Option<CoordinatePair> {
        match self.segments.last() {
            Some(Segment::Quadratic { ctrl, .. }) => Some(*ctrl),
            _ => None,
        }
    }

    /// Close the subpath with a line back to its start (if needed).
    fn close(&mut self) -> Result<(), Error> {
        let from = self.current_point("ClosePath")?;
        let start = self.subpath_start.unwrap_or(from);
        if from != start {
            self.add(Segment::Line { from, to: start });
        }
        self.current = Some(start);
        Ok(())
    }

    fn finish(self) -> Path {
        Path::new(self.segments)
    }
}

/// Approximate an elliptical arc with cubic Bézier segments.
///
/// The first segment starts exactly at `from` and the last one ends exactly
/// at `to`. Coinciding endpoints result in no segments at all, a zero radius
/// in a straight line.
#[allow(clippy::too_many_arguments)]
fn arc_segments(
    from: CoordinatePair,
    to: CoordinatePair,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Vec<Segment> {
    if from == to {
        return Vec::new();
    }
    if rx == 0.0 || ry == 0.0 {
        return vec![Segment::Line { from, to }];
    }

    let arc = SvgArc {
        from: point(from.x, from.y),
        to: point(to.x, to.y),
        radii: vector(rx.abs(), ry.abs()),
        x_rotation: Angle::degrees(x_axis_rotation),
        flags: ArcFlags { large_arc, sweep },
    };

    let mut segments = Vec::new();
    arc.to_arc()
        .for_each_cubic_bezier(&mut |curve: &CubicBezierSegment<f64>| {
            segments.push(Segment::Cubic {
                from: CoordinatePair::new(curve.from.x, curve.from.y),
                ctrl1: CoordinatePair::new(curve.ctrl1.x, curve.ctrl1.y),
                ctrl2: CoordinatePair::new(curve.ctrl2.x, curve.ctrl2.y),
                to: CoordinatePair::new(curve.to.x, curve.to.y),
            });
        });

    // Pin the endpoints, the arc parametrisation is subject to rounding.
    if let Some(Segment::Cubic { from: first, .. }) = segments.first_mut() {
        *first = from;
    }
    if let Some(Segment::Cubic { to: last, .. }) = segments.last_mut() {
        *last = to;
    }
    segments
}

#[allow(clippy::similar_names)]
fn parse_path_segment(
    segment: &PathSegment,
    prev_segment: Option<PathSegment>,
    current_path: &mut CurrentPath,
) -> Result<(), Error> {
    trace!("parse_path_segment");
    match *segment {
        PathSegment::MoveTo { abs, x, y } => {
            trace!("parse_path_segment: MoveTo");
            let base = current_path.current.unwrap_or_default();
            current_path.move_to(CurrentPath::resolve(base, abs, x, y));
        }
        PathSegment::LineTo { abs, x, y } => {
            trace!("parse_path_segment: LineTo");
            let from = current_path.current_point("LineTo")?;
            let to = CurrentPath::resolve(from, abs, x, y);
            current_path.add(Segment::Line { from, to });
        }
        PathSegment::HorizontalLineTo { abs, x } => {
            trace!("parse_path_segment: HorizontalLineTo");
            let from = current_path.current_point("HorizontalLineTo")?;
            let x = if abs { x } else { from.x + x };
            let to = CoordinatePair::new(x, from.y);
            current_path.add(Segment::Line { from, to });
        }
        PathSegment::VerticalLineTo { abs, y } => {
            trace!("parse_path_segment: VerticalLineTo");
            let from = current_path.current_point("VerticalLineTo")?;
            let y = if abs { y } else { from.y + y };
            let to = CoordinatePair::new(from.x, y);
            current_path.add(Segment::Line { from, to });
        }
        PathSegment::CurveTo {
            abs,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => {
            trace!("parse_path_segment: CurveTo");
            let from = current_path.current_point("CurveTo")?;
            current_path.add(Segment::Cubic {
                from,
                ctrl1: CurrentPath::resolve(from, abs, x1, y1),
                ctrl2: CurrentPath::resolve(from, abs, x2, y2),
                to: CurrentPath::resolve(from, abs, x, y),
            });
        }
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            trace!("parse_path_segment: SmoothCurveTo");
            let from = current_path.current_point("SmoothCurveTo")?;

            // The first handle mirrors the previous curve's second handle,
            // but only if the previous command was a cubic curve.
            let ctrl1 = match prev_segment {
                Some(PathSegment::CurveTo { .. }) | Some(PathSegment::SmoothCurveTo { .. }) => {
                    current_path
                        .last_cubic_ctrl()
                        .map_or(from, |ctrl| ctrl.reflect(from))
                }
                Some(_) | None => from,
            };
            current_path.add(Segment::Cubic {
                from,
                ctrl1,
                ctrl2: CurrentPath::resolve(from, abs, x2, y2),
                to: CurrentPath::resolve(from, abs, x, y),
            });
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            trace!("parse_path_segment: Quadratic");
            let from = current_path.current_point("Quadratic")?;
            current_path.add(Segment::Quadratic {
                from,
                ctrl: CurrentPath::resolve(from, abs, x1, y1),
                to: CurrentPath::resolve(from, abs, x, y),
            });
        }
        PathSegment::SmoothQuadratic { abs, x, y } => {
            trace!("parse_path_segment: SmoothQuadratic");
            let from = current_path.current_point("SmoothQuadratic")?;
            let ctrl = match prev_segment {
                Some(PathSegment::Quadratic { .. }) | Some(PathSegment::SmoothQuadratic { .. }) => {
                    current_path
                        .last_quadratic_ctrl()
                        .map_or(from, |ctrl| ctrl.reflect(from))
                }
                Some(_) | None => from,
            };
            current_path.add(Segment::Quadratic {
                from,
                ctrl,
                to: CurrentPath::resolve(from, abs, x, y),
            });
        }
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => {
            trace!("parse_path_segment: EllipticalArc");
            let from = current_path.current_point("EllipticalArc")?;
            let to = CurrentPath::resolve(from, abs, x, y);
            for segment in arc_segments(from, to, rx, ry, x_axis_rotation, large_arc, sweep) {
                current_path.add(segment);
            }
            current_path.current = Some(to);
        }
        PathSegment::ClosePath { .. } => {
            trace!("parse_path_segment: ClosePath");
            current_path.close()?;
        }
    }
    Ok(())
}

/// Parse an SVG path expression (the contents of a `d` attribute).
pub fn parse_path(expr: &str) -> Result<Path, Error> {
    trace!("parse_path");
    let mut path = CurrentPath::new();

    let mut prev_segment_store: Option<PathSegment> = None;
    for segment in PathParser::from(expr) {
        let current_segment = segment
            .map_err(|e| Error::PathParse(format!("Could not parse path segment: {}", e)))?;
        let prev_segment = prev_segment_store.replace(current_segment);
        parse_path_segment(&current_segment, prev_segment, &mut path)?;
    }

    Ok(path.finish())
}
