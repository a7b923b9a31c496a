//! Frame buffer compositor: indexed pixel writes plus source-over alpha
//! blending of overlay/UI queues, with the sim-to-image y-flip confined
//! entirely to this module.

use crate::core::particle::Particle;
use crate::domain::element::Rgba8;
use crate::render::brush::{outline_pixels, OverlayPixel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedPixel {
    pub index: usize,
    pub rgba: Rgba8,
}

pub struct FrameBuffer {
    width: u32,
    height: u32,
    /// Base framebuffer: particle writes only, never touched by overlay/UI
    /// blending. Persists across frames so a partial particle queue doesn't
    /// need every cell repainted.
    pixels: Vec<u8>,
    /// The composite actually handed to consumers: `pixels` with the
    /// overlay and UI queues blended over it, rebuilt fresh each `render`.
    presented: Vec<u8>,
    particle_queue: Vec<(u32, u32, Rgba8)>,
    overlay_queue: Vec<QueuedPixel>,
    ui_queue: Vec<QueuedPixel>,
    cursor: Option<(i32, i32, i32)>, // (cx, cy, r) in sim-space
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> FrameBuffer {
        let size = (width as usize) * (height as usize) * 4;
        FrameBuffer {
            width,
            height,
            pixels: vec![0; size],
            presented: vec![0; size],
            particle_queue: Vec::new(),
            overlay_queue: Vec::new(),
            ui_queue: Vec::new(),
            cursor: None,
        }
    }

    /// Schedule particles for repaint. If `debug_color` is given, the same
    /// cell is also pushed onto the (persistent) overlay queue.
    pub fn queue_particles<'a>(&mut self, particles: impl IntoIterator<Item = &'a Particle>, debug_color: Option<Rgba8>) {
        for p in particles {
            let (x, y) = p.position;
            self.particle_queue.push((x, y, p.color));
            if let Some(color) = debug_color {
                let flipped_y = self.height.saturating_sub(1).saturating_sub(y);
                let index = (flipped_y as usize) * (self.width as usize) + (x as usize);
                self.overlay_queue.push(QueuedPixel { index, rgba: color });
            }
        }
    }

    pub fn queue_overlay_pixels(&mut self, pixels: impl IntoIterator<Item = QueuedPixel>) {
        self.overlay_queue.extend(pixels);
    }

    pub fn queue_ui_pixels(&mut self, pixels: impl IntoIterator<Item = QueuedPixel>) {
        self.ui_queue.extend(pixels);
    }

    /// Set (or clear) the cursor position in sim-space so `render` can
    /// rebuild the brush outline into the UI queue.
    pub fn set_cursor(&mut self, cursor: Option<(i32, i32, i32)>) {
        self.cursor = cursor;
    }

    pub fn render(&mut self) {
        // 1. Rebuild the UI queue from the brush outline, if the cursor is
        // on canvas.
        self.ui_queue.clear();
        if let Some((cx, cy, r)) = self.cursor {
            let flipped_cy = self.height as i32 - 1 - cy;
            for OverlayPixel { x, y, color } in outline_pixels(cx, flipped_cy, r, self.width as i32, self.height as i32) {
                let index = (y as usize) * (self.width as usize) + (x as usize);
                self.ui_queue.push(QueuedPixel { index, rgba: color });
            }
        }

        // 2. Write queued particles into the RGBA framebuffer with the
        // sim-to-image y-flip: pixel_index = (H-1-y)*W + x.
        for &(x, y, color) in &self.particle_queue {
            let flipped_y = self.height.saturating_sub(1).saturating_sub(y);
            let index = (flipped_y as usize) * (self.width as usize) + (x as usize);
            write_pixel(&mut self.pixels, index, color);
        }

        // 3. Blend overlay then UI onto a copy of the base buffer, leaving
        // `pixels` itself as particle-writes only.
        self.presented.copy_from_slice(&self.pixels);
        for pixel in &self.overlay_queue {
            blend_over(&mut self.presented, pixel.index, pixel.rgba);
        }
        for pixel in &self.ui_queue {
            blend_over(&mut self.presented, pixel.index, pixel.rgba);
        }

        // 5. Clear particle queue and overlay queue. UI queue is rebuilt at
        // the top of the next render, not cleared here.
        self.particle_queue.clear();
        self.overlay_queue.clear();
    }

    pub fn bytes(&self) -> &[u8] {
        &self.presented
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn write_pixel(buf: &mut [u8], index: usize, color: Rgba8) {
    let offset = index * 4;
    if offset + 4 > buf.len() {
        return;
    }
    buf[offset] = color.r;
    buf[offset + 1] = color.g;
    buf[offset + 2] = color.b;
    buf[offset + 3] = color.a;
}

/// Source-over alpha blend of `src` onto the pixel at `index` in `buf`.
/// `out.rgb = src.rgb * (src.a/255) + dst.rgb * (1 - src.a/255)`;
/// `out.a = min(dst.a, src.a)`.
fn blend_over(buf: &mut [u8], index: usize, src: Rgba8) {
    let offset = index * 4;
    if offset + 4 > buf.len() {
        return;
    }
    let src_a = src.a as f32 / 255.0;
    let blend_channel = |dst: u8, src: u8| -> u8 {
        let out = src as f32 * src_a + dst as f32 * (1.0 - src_a);
        out.round().clamp(0.0, 255.0) as u8
    };
    let dst_r = buf[offset];
    let dst_g = buf[offset + 1];
    let dst_b = buf[offset + 2];
    let dst_a = buf[offset + 3];

    buf[offset] = blend_channel(dst_r, src.r);
    buf[offset + 1] = blend_channel(dst_g, src.g);
    buf[offset + 2] = blend_channel(dst_b, src.b);
    buf[offset + 3] = dst_a.min(src.a);
}
