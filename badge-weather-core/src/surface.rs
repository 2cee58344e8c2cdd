//! Render surface the controller draws into

/// Title shown above the weather text
pub const TITLE: &str = "Weather";

/// Static control hint, shown regardless of the fetch outcome
pub const STATUS_HINT: &str = "R: Refresh | ESC: Exit";

/// The screen resource owned by one activation of the view.
///
/// The controller calls [`set_display_text`](Self::set_display_text) followed
/// by [`request_immediate_redraw`](Self::request_immediate_redraw) whenever the
/// display text changes. Rendering problems are the surface's own business:
/// these calls cannot fail from the controller's point of view.
pub trait RenderSurface {
    fn set_display_text(&mut self, text: &str);

    /// Draw now, before returning to the caller
    fn request_immediate_redraw(&mut self);

    /// Give the screen back. Consumes the surface, so it happens once.
    fn release(self);
}
