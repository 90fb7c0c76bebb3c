//! Rendering port for log panels.

use crate::domain::RenderFrame;

/// Draws a log panel.
///
/// Called synchronously from event callbacks, so implementations must not
/// block. `frame.follows_tail()` tells the renderer whether to pin the
/// viewport to the newest line.
pub trait LogRendererPort: Send + Sync {
    fn render(&self, frame: RenderFrame);
}

/// Renderer that draws nothing. Useful for headless views and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl LogRendererPort for NoopRenderer {
    fn render(&self, _frame: RenderFrame) {}
}
