use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error when parsing XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("SVG parse error: {0}")]
    SvgParse(String),
    #[error("SVG path parse error: {0}")]
    PathParse(String),
    #[error("Invalid attribute \"{name}\" on <{element}>: {reason}")]
    Attribute {
        element: String,
        name: String,
        reason: String,
    },
}
