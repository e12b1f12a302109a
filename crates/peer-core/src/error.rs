use std::fmt;

/// Failures surfaced by component setters, state styles and gestures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerError {
    /// The component kind does not carry this attribute.
    UnsupportedAttribute {
        component: &'static str,
        attribute: &'static str,
    },
    /// The component kind never wires this operation.
    UnsupportedOperation {
        component: &'static str,
        operation: &'static str,
    },
    /// A gesture descriptor with a kind this router does not know, rejected
    /// by configuration.
    UnrecognizedGesture { kind: u32 },
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerError::UnsupportedAttribute {
                component,
                attribute,
            } => write!(f, "{component} does not support attribute `{attribute}`"),
            PeerError::UnsupportedOperation {
                component,
                operation,
            } => write!(f, "{component} does not implement `{operation}`"),
            PeerError::UnrecognizedGesture { kind } => {
                write!(f, "unrecognized gesture kind {kind}")
            }
        }
    }
}

impl std::error::Error for PeerError {}
