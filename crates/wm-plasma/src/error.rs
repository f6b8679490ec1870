//! Error Types for the plasma renderer
//!
//! None of these reach the page: the browser layer turns them into a
//! fallback marker on the container or a console diagnostic.

use crate::config::ConfigError;

/// Errors that can occur while setting up the renderer
#[derive(Debug, thiserror::Error)]
pub enum PlasmaError {
    /// The browser cannot provide a GPU surface, adapter or device.
    #[error("graphics unsupported: {0}")]
    Unsupported(String),

    /// The shader program failed validation or pipeline creation.
    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),

    /// Options could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of mounting a renderer onto a container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlasmaStatus {
    /// Frame loop is live (or paused while hidden)
    Running,
    /// Skipped because the user prefers reduced motion
    ReducedMotion,
    /// No usable graphics context
    Unsupported,
    /// Shader setup failed; the static background stays
    Failed,
    /// Torn down with `dispose`
    Disposed,
}

impl PlasmaStatus {
    /// Value written to the container's `data-plasma` attribute, if any
    pub fn marker(self) -> Option<&'static str> {
        match self {
            PlasmaStatus::ReducedMotion => Some("reduced-motion"),
            PlasmaStatus::Unsupported => Some("unsupported"),
            _ => None,
        }
    }

    /// Get the string ID for this status
    pub fn id(self) -> &'static str {
        match self {
            PlasmaStatus::Running => "running",
            PlasmaStatus::ReducedMotion => "reduced-motion",
            PlasmaStatus::Unsupported => "unsupported",
            PlasmaStatus::Failed => "failed",
            PlasmaStatus::Disposed => "disposed",
        }
    }
}

impl From<&PlasmaError> for PlasmaStatus {
    fn from(e: &PlasmaError) -> Self {
        match e {
            PlasmaError::Unsupported(_) => PlasmaStatus::Unsupported,
            PlasmaError::ShaderCompilation(_) | PlasmaError::Config(_) => PlasmaStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(PlasmaStatus::Unsupported.marker(), Some("unsupported"));
        assert_eq!(PlasmaStatus::ReducedMotion.marker(), Some("reduced-motion"));
        assert_eq!(PlasmaStatus::Failed.marker(), None);
        assert_eq!(PlasmaStatus::Running.marker(), None);
    }

    #[test]
    fn test_status_from_error() {
        let e = PlasmaError::Unsupported("no adapter".to_string());
        assert_eq!(PlasmaStatus::from(&e), PlasmaStatus::Unsupported);
        assert_eq!(e.to_string(), "graphics unsupported: no adapter");

        let e = PlasmaError::ShaderCompilation("bad token".to_string());
        assert_eq!(PlasmaStatus::from(&e), PlasmaStatus::Failed);
    }
}
