use std::fmt;

/// Lifecycle state of a [`crate::ProcessDriver`].
///
/// `Created → Starting → Ready | Failed → Disposed`. `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, `start()` not called yet
    Created,
    /// Process launched, waiting for readiness
    Starting,
    /// Server answered its readiness endpoint
    Ready,
    /// Launch or readiness failed
    Failed,
    /// Torn down
    Disposed,
}

impl DriverState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
