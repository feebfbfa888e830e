use std::convert;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `CoordinatePair` consists of an x and y coordinate.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinatePair {
    pub x: f64,
    pub y: f64,
}

impl CoordinatePair {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror `self` along `center`.
    pub(crate) fn reflect(self, center: Self) -> Self {
        Self::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }
}

impl convert::From<(f64, f64)> for CoordinatePair {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

/// A single curve primitive of a [`Path`].
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Segment {
    Line {
        from: CoordinatePair,
        to: CoordinatePair,
    },
    Quadratic {
        from: CoordinatePair,
        ctrl: CoordinatePair,
        to: CoordinatePair,
    },
    Cubic {
        from: CoordinatePair,
        ctrl1: CoordinatePair,
        ctrl2: CoordinatePair,
        to: CoordinatePair,
    },
}

impl Segment {
    /// Return the control points in drawing order, start and end included.
    pub fn control_points(&self) -> Vec<CoordinatePair> {
        match *self {
            Segment::Line { from, to } => vec![from, to],
            Segment::Quadratic { from, ctrl, to } => vec![from, ctrl, to],
            Segment::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => vec![from, ctrl1, ctrl2, to],
        }
    }

    pub fn start(&self) -> CoordinatePair {
        match *self {
            Segment::Line { from, .. }
            | Segment::Quadratic { from, .. }
            | Segment::Cubic { from, .. } => from,
        }
    }

    pub fn end(&self) -> CoordinatePair {
        match *self {
            Segment::Line { to, .. } | Segment::Quadratic { to, .. } | Segment::Cubic { to, .. } => {
                to
            }
        }
    }
}

/// A path is the ordered list of segments built from one SVG shape element.
///
/// Subpaths are not split up, a `d` attribute with several move-to commands
/// still results in a single `Path`.
#[derive(Debug, Default, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    pub segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the control points of all segments, in order.
    pub fn control_points(&self) -> impl Iterator<Item = CoordinatePair> + '_ {
        self.segments.iter().flat_map(Segment::control_points)
    }
}
