/// How a server process ended during teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The process had exited on its own before teardown
    AlreadyExited { code: Option<i32> },
    /// The process exited within the grace period after being asked to stop
    Graceful { code: Option<i32> },
    /// The grace period elapsed and the process was killed
    Killed,
}
