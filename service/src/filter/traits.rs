use image::RgbImage;

/// A stateless per-pixel colour transform.
///
/// Implementations mutate the frame in place. They hold no per-connection
/// state, so one instance is shared by every session.
pub trait FrameFilter: Send + Sync {
    fn apply(&self, frame: &mut RgbImage);

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}
