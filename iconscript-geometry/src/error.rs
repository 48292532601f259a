use std::fmt;

/// Errors returned by geometry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The path serializer met a geometry kind it cannot express.
    UnsupportedGeometry(&'static str),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedGeometry(kind) => {
                write!(f, "unsupported geometry type: `{kind}`")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
