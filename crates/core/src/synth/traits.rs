use super::Resource;

/// A declaration that can render itself into a stack resource.
///
/// Implementations must be pure: rendering the same declaration twice
/// yields the same [`Resource`].
pub trait Synthesize {
    /// Render the declaration into its template form.
    fn render(&self) -> Resource;
}
