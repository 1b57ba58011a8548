use core::error::Error;
use core::fmt;

use drag_host::NodeKey;

/// Failures surfaced by drag sessions.
#[derive(Debug)]
pub enum DragError {
    /// The element already carries a live session's marker.
    DuplicateSession { target: NodeKey, existing: String },
    /// The host rejected a write.
    Host(anyhow::Error),
}

impl fmt::Display for DragError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSession { target, existing } => write!(
                formatter,
                "{target} is already draggable (session {existing})"
            ),
            Self::Host(error) => write!(formatter, "visual host error: {error}"),
        }
    }
}

impl Error for DragError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateSession { .. } => None,
            Self::Host(error) => Some(error.as_ref()),
        }
    }
}

impl From<anyhow::Error> for DragError {
    fn from(error: anyhow::Error) -> Self {
        Self::Host(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_keep_their_source() {
        let error = DragError::from(anyhow::anyhow!("no such node: node#9"));
        assert_eq!(error.to_string(), "visual host error: no such node: node#9");
        assert!(error.source().is_some());

        let duplicate = DragError::DuplicateSession {
            target: NodeKey(3),
            existing: "7".to_owned(),
        };
        assert_eq!(duplicate.to_string(), "node#3 is already draggable (session 7)");
        assert!(duplicate.source().is_none());
    }
}
