/// How a surface error is handled by the presentation path.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next present may succeed.
    Reconfigured,
    /// Transient error; this frame is dropped.
    SkipFrame,
    /// Unrecoverable (commonly OOM); the loop must stop.
    Fatal,
}
