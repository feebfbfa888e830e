//! Extraction of shape elements from an SVG document.
//!
//! Every supported shape is turned into an equivalent path expression, which
//! is then handed to the path data parser.

use std::collections::BTreeMap;
use std::str::{self, FromStr};

use log::trace;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use svgtypes::{Length, LengthUnit};

use crate::error::Error;

/// All XML attributes of a shape element, by name.
pub type Attributes = BTreeMap<String, String>;

/// A shape element converted to a path expression.
#[derive(Debug, PartialEq)]
pub(crate) struct Shape {
    pub expr: String,
    pub attributes: Attributes,
}

fn read_attributes(element: &BytesStart) -> Result<Attributes, Error> {
    let mut attributes = Attributes::new();

    // Duplicated attributes are tolerated, the first occurrence wins
    let mut raw = element.attributes();
    raw.with_checks(false);
    for attr in raw {
        let attr: Attribute = attr.map_err(quick_xml::Error::from)?;
        let key = str::from_utf8(attr.key)
            .map_err(|e| Error::SvgParse(format!("Invalid attribute name: {}", e)))?;
        let value = attr.unescaped_value()?;
        let value = str::from_utf8(&value)
            .map_err(|e| Error::SvgParse(format!("Invalid value for \"{}\": {}", key, e)))?;
        attributes
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }
    Ok(attributes)
}

/// Read a numeric attribute in user units.
fn length(
    element: &str,
    attributes: &Attributes,
    name: &str,
    default: Option<f64>,
) -> Result<f64, Error> {
    let error = |reason: String| Error::Attribute {
        element: element.to_string(),
        name: name.to_string(),
        reason,
    };
    match attributes.get(name) {
        Some(value) => {
            let length = Length::from_str(value.trim()).map_err(|e| error(e.to_string()))?;
            match length.unit {
                LengthUnit::None | LengthUnit::Px => Ok(length.number),
                unit => Err(error(format!("Unsupported unit {:?}", unit))),
            }
        }
        None => default.ok_or_else(|| error("Missing attribute".into())),
    }
}

/// Path expression of an axis aligned ellipse, drawn as two half arcs.
fn ellipse_expr(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    format!(
        "M {},{} a {},{} 0 1,0 {},0 a {},{} 0 1,0 {},0",
        cx - rx,
        cy,
        rx,
        ry,
        2.0 * rx,
        rx,
        ry,
        -2.0 * rx
    )
}

/// The `points` list of a polyline or polygon, `None` if missing or blank.
fn points(attributes: &Attributes) -> Option<&str> {
    attributes
        .get("points")
        .map(|points| points.trim())
        .filter(|points| !points.is_empty())
}

/// Build the path expression for a shape element.
///
/// Returns `None` for elements that do not describe a shape (or a `path`
/// without `d` attribute, or a polyline/polygon without points).
fn shape_expr(name: &str, attributes: &Attributes) -> Result<Option<String>, Error> {
    let expr = match name {
        "path" => attributes.get("d").cloned(),
        "polyline" => points(attributes).map(|points| format!("M {}", points)),
        "polygon" => points(attributes).map(|points| format!("M {} Z", points)),
        "line" => {
            let x1 = length(name, attributes, "x1", Some(0.0))?;
            let y1 = length(name, attributes, "y1", Some(0.0))?;
            let x2 = length(name, attributes, "x2", Some(0.0))?;
            let y2 = length(name, attributes, "y2", Some(0.0))?;
            Some(format!("M {},{} L {},{}", x1, y1, x2, y2))
        }
        "rect" => {
            let x = length(name, attributes, "x", Some(0.0))?;
            let y = length(name, attributes, "y", Some(0.0))?;
            let w = length(name, attributes, "width", None)?;
            let h = length(name, attributes, "height", None)?;
            Some(format!(
                "M {},{} L {},{} L {},{} L {},{} Z",
                x,
                y,
                x + w,
                y,
                x + w,
                y + h,
                x,
                y + h
            ))
        }
        "circle" => {
            let cx = length(name, attributes, "cx", Some(0.0))?;
            let cy = length(name, attributes, "cy", Some(0.0))?;
            let r = length(name, attributes, "r", None)?;
            Some(ellipse_expr(cx, cy, r, r))
        }
        "ellipse" => {
            let cx = length(name, attributes, "cx", Some(0.0))?;
            let cy = length(name, attributes, "cy", Some(0.0))?;
            let rx = length(name, attributes, "rx", None)?;
            let ry = length(name, attributes, "ry", None)?;
            Some(ellipse_expr(cx, cy, rx, ry))
        }
        _ => None,
    };
    Ok(expr)
}

/// Parse an SVG string, return the shapes in document order.
pub(crate) fn parse_xml(svg: &str) -> Result<Vec<Shape>, Error> {
    trace!("parse_xml");

    let mut reader = quick_xml::Reader::from_str(svg);
    reader.trim_text(true);

    let mut shapes = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let name = str::from_utf8(e.local_name())
                    .map_err(|e| Error::SvgParse(format!("Invalid element name: {}", e)))?;
                trace!("parse_xml: Matched start of {:?}", name);
                let attributes = read_attributes(e)?;
                if let Some(expr) = shape_expr(name, &attributes)? {
                    trace!("parse_xml: Found {} shape", name);
                    shapes.push(Shape { expr, attributes });
                }
            }
            Event::Eof => {
                trace!("parse_xml: EOF");
                break;
            }
            _ => {}
        }

        // If we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
        buf.clear();
    }
    trace!("parse_xml: Return {} shapes", shapes.len());
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exprs(svg: &str) -> Vec<String> {
        parse_xml(svg)
            .unwrap()
            .into_iter()
            .map(|shape| shape.expr)
            .collect()
    }

    #[test]
    fn test_parse_xml_single() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 10,100 40,70 h 10 m -20,40 10,-20" stroke="red" />
            </svg>
        "#;
        let result = parse_xml(input).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].expr, "M 10,100 40,70 h 10 m -20,40 10,-20");
        assert_eq!(result[0].attributes.get("stroke"), Some(&"red".to_string()));
        assert_eq!(result[0].attributes.len(), 2);
    }

    #[test]
    fn test_parse_xml_nested_and_ordered() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" xmlns:svg="http://www.w3.org/2000/svg">
                <g id="layer1">
                    <svg:path d="M 20,30" />
                    <line x1="1" y1="2" x2="3" y2="4" />
                </g>
                <path id="no-data" />
                <polyline points="0,0 1,1 2,0" />
            </svg>
        "#;
        assert_eq!(
            exprs(input),
            vec![
                "M 20,30".to_string(),
                "M 1,2 L 3,4".to_string(),
                "M 0,0 1,1 2,0".to_string(),
            ]
        );
    }

    /// If multiple "d" attributes are found, simply use the first one.
    #[test]
    fn test_parse_xml_duplicate_attr() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 20,30" d="M 10,100 40,70 h 10 m -20,40 10,-20"/>
            </svg>
        "#;
        assert_eq!(exprs(input), vec!["M 20,30".to_string()]);
    }

    #[test]
    fn test_parse_xml_escaped_attr() {
        let input = r#"<svg><path d="M 0,0 L 1,1" id="a&amp;b"/></svg>"#;
        let result = parse_xml(input).unwrap();
        assert_eq!(result[0].attributes.get("id"), Some(&"a&b".to_string()));
    }

    #[test]
    fn test_parse_xml_malformed() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 20,30"/>
            </baa>
        "#;
        assert!(matches!(parse_xml(input), Err(Error::Xml(_))));
    }

    #[test]
    fn test_shapes() {
        let input = r#"
            <svg>
                <polygon points="0,0 4,0 4,3" />
                <rect x="1" y="2" width="3" height="4" rx="1" />
                <circle cx="5" cy="5" r="2" />
                <ellipse rx="3px" ry="1" />
            </svg>
        "#;
        assert_eq!(
            exprs(input),
            vec![
                "M 0,0 4,0 4,3 Z".to_string(),
                "M 1,2 L 4,2 L 4,6 L 1,6 Z".to_string(),
                "M 3,5 a 2,2 0 1,0 4,0 a 2,2 0 1,0 -4,0".to_string(),
                "M -3,0 a 3,1 0 1,0 6,0 a 3,1 0 1,0 -6,0".to_string(),
            ]
        );
    }

    #[test]
    fn test_blank_points_are_skipped() {
        let input = r#"
            <svg>
                <polyline points="" />
                <polygon points="   " />
                <polyline />
                <polyline points="1,1 2,2" />
            </svg>
        "#;
        assert_eq!(exprs(input), vec!["M 1,1 2,2".to_string()]);
    }

    #[test]
    fn test_shape_attribute_errors() {
        let missing = r#"<svg><circle cx="5" cy="5" /></svg>"#;
        match parse_xml(missing) {
            Err(Error::Attribute { element, name, .. }) => {
                assert_eq!(element, "circle");
                assert_eq!(name, "r");
            }
            other => panic!("Unexpected result: {:?}", other),
        }

        let unit = r#"<svg><rect width="3cm" height="1" /></svg>"#;
        assert!(matches!(parse_xml(unit), Err(Error::Attribute { .. })));

        let garbage = r#"<svg><line x1="foo" /></svg>"#;
        assert!(matches!(parse_xml(garbage), Err(Error::Attribute { .. })));
    }
}
