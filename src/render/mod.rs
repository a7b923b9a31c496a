//! Brush outline generation and frame-buffer compositing.

pub mod brush;
pub mod framebuffer;

pub use brush::{outline_pixels, OverlayPixel, BRUSH_OUTLINE_COLOR};
pub use framebuffer::{FrameBuffer, QueuedPixel};
