//! CPU rasterization primitives
//!
//! Draws into a `0x00RRGGBB` framebuffer (softbuffer's pixel format) with
//! software alpha blending. Everything works in physical pixels; the
//! painter applies the scale factor before calling in. Clipping is a
//! single active rectangle (the painter maintains the stack and passes the
//! current intersection).

use slate_core::{Color, CornerRadius, Rect};

/// Mutable view over one frame's pixels
pub struct Canvas<'a> {
    pub buf: &'a mut [u32],
    pub width: u32,
    pub height: u32,
}

/// Integer pixel bounds of `rect` clamped to the canvas and `clip`
fn pixel_span(canvas: &Canvas, rect: Rect, clip: Rect) -> Option<(u32, u32, u32, u32)> {
    let clipped = rect.intersect(clip);
    if clipped.width <= 0.0 || clipped.height <= 0.0 {
        return None;
    }
    let x0 = clipped.x.max(0.0) as u32;
    let y0 = clipped.y.max(0.0) as u32;
    let x1 = ((clipped.x + clipped.width).ceil().max(0.0) as u32).min(canvas.width);
    let y1 = ((clipped.y + clipped.height).ceil().max(0.0) as u32).min(canvas.height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

/// Source-over blend of an RGBA color onto one framebuffer pixel
fn blend_pixel(dst: u32, color: Color, coverage: f32) -> u32 {
    let alpha = (color.a * coverage).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return dst;
    }
    if alpha >= 1.0 {
        let [r, g, b, _] = color.to_rgba8();
        return u32::from_be_bytes([0, r, g, b]);
    }
    let dr = ((dst >> 16) & 0xFF) as f32 / 255.0;
    let dg = ((dst >> 8) & 0xFF) as f32 / 255.0;
    let db = (dst & 0xFF) as f32 / 255.0;
    let r = color.r * alpha + dr * (1.0 - alpha);
    let g = color.g * alpha + dg * (1.0 - alpha);
    let b = color.b * alpha + db * (1.0 - alpha);
    u32::from_be_bytes([
        0,
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

/// Coverage of a pixel center against the rounded corners; 0 outside the
/// arc, 1 inside, with a half-pixel feather on the boundary
fn corner_coverage(rect: Rect, radius: &CornerRadius, px: f32, py: f32) -> f32 {
    let corners = [
        (
            radius.top_left,
            rect.x + radius.top_left,
            rect.y + radius.top_left,
            px < rect.x + radius.top_left && py < rect.y + radius.top_left,
        ),
        (
            radius.top_right,
            rect.x + rect.width - radius.top_right,
            rect.y + radius.top_right,
            px >= rect.x + rect.width - radius.top_right && py < rect.y + radius.top_right,
        ),
        (
            radius.bottom_right,
            rect.x + rect.width - radius.bottom_right,
            rect.y + rect.height - radius.bottom_right,
            px >= rect.x + rect.width - radius.bottom_right
                && py >= rect.y + rect.height - radius.bottom_right,
        ),
        (
            radius.bottom_left,
            rect.x + radius.bottom_left,
            rect.y + rect.height - radius.bottom_left,
            px < rect.x + radius.bottom_left && py >= rect.y + rect.height - radius.bottom_left,
        ),
    ];

    for (r, cx, cy, in_corner) in corners {
        if r > 0.0 && in_corner {
            let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            return (r - distance + 0.5).clamp(0.0, 1.0);
        }
    }
    1.0
}

/// Fill a rectangle, rounded when any corner radius is positive
pub fn fill_rect(canvas: &mut Canvas, rect: Rect, radius: CornerRadius, color: Color, clip: Rect) {
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, rect, clip) else {
        return;
    };
    let rounded = !radius.is_zero();
    for y in y0..y1 {
        let row = (y * canvas.width) as usize;
        for x in x0..x1 {
            let coverage = if rounded {
                corner_coverage(rect, &radius, x as f32 + 0.5, y as f32 + 0.5)
            } else {
                1.0
            };
            if coverage > 0.0 {
                let index = row + x as usize;
                canvas.buf[index] = blend_pixel(canvas.buf[index], color, coverage);
            }
        }
    }
}

/// Blit an alpha coverage bitmap (a rasterized glyph) tinted with `color`
pub fn blit_mask(
    canvas: &mut Canvas,
    mask: &[u8],
    mask_width: u32,
    mask_height: u32,
    dest_x: f32,
    dest_y: f32,
    color: Color,
    clip: Rect,
) {
    let rect = Rect::new(dest_x, dest_y, mask_width as f32, mask_height as f32);
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, rect, clip) else {
        return;
    };
    for y in y0..y1 {
        let my = (y as f32 - dest_y) as i64;
        if my < 0 || my >= i64::from(mask_height) {
            continue;
        }
        let row = (y * canvas.width) as usize;
        for x in x0..x1 {
            let mx = (x as f32 - dest_x) as i64;
            if mx < 0 || mx >= i64::from(mask_width) {
                continue;
            }
            let coverage = mask[(my as u32 * mask_width + mx as u32) as usize] as f32 / 255.0;
            if coverage > 0.0 {
                let index = row + x as usize;
                canvas.buf[index] = blend_pixel(canvas.buf[index], color, coverage);
            }
        }
    }
}

/// Blit RGBA pixels stretched into `dest` with nearest-neighbor sampling
pub fn blit_rgba(
    canvas: &mut Canvas,
    pixels: &[u8],
    src_width: u32,
    src_height: u32,
    dest: Rect,
    clip: Rect,
) {
    if src_width == 0 || src_height == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, dest, clip) else {
        return;
    };
    for y in y0..y1 {
        let v = ((y as f32 + 0.5 - dest.y) / dest.height).clamp(0.0, 1.0);
        let sy = ((v * src_height as f32) as u32).min(src_height - 1);
        let row = (y * canvas.width) as usize;
        for x in x0..x1 {
            let u = ((x as f32 + 0.5 - dest.x) / dest.width).clamp(0.0, 1.0);
            let sx = ((u * src_width as f32) as u32).min(src_width - 1);
            let src = ((sy * src_width + sx) * 4) as usize;
            let color = Color::from_rgba8(
                pixels[src],
                pixels[src + 1],
                pixels[src + 2],
                pixels[src + 3],
            );
            let index = row + x as usize;
            canvas.buf[index] = blend_pixel(canvas.buf[index], color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(buf: &mut Vec<u32>, w: u32, h: u32) -> Canvas<'_> {
        buf.clear();
        buf.resize((w * h) as usize, 0);
        Canvas {
            buf,
            width: w,
            height: h,
        }
    }

    fn full_clip(w: u32, h: u32) -> Rect {
        Rect::new(0.0, 0.0, w as f32, h as f32)
    }

    #[test]
    fn test_opaque_fill_writes_exact_pixels() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 8, 8);
        fill_rect(
            &mut c,
            Rect::new(2.0, 2.0, 4.0, 4.0),
            CornerRadius::ZERO,
            Color::new(1.0, 0.0, 0.0, 1.0),
            full_clip(8, 8),
        );
        assert_eq!(buf[2 * 8 + 2], 0x00FF0000);
        assert_eq!(buf[5 * 8 + 5], 0x00FF0000);
        // Outside the rect untouched
        assert_eq!(buf[0], 0);
        assert_eq!(buf[6 * 8 + 6], 0);
    }

    #[test]
    fn test_alpha_blend_halfway() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 2, 1);
        // White at 50% over black
        fill_rect(
            &mut c,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            CornerRadius::ZERO,
            Color::new(1.0, 1.0, 1.0, 0.5),
            full_clip(2, 1),
        );
        let pixel = buf[0];
        let r = (pixel >> 16) & 0xFF;
        assert!((r as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_clip_restricts_fill() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 8, 8);
        fill_rect(
            &mut c,
            Rect::new(0.0, 0.0, 8.0, 8.0),
            CornerRadius::ZERO,
            Color::WHITE,
            Rect::new(4.0, 0.0, 4.0, 8.0),
        );
        assert_eq!(buf[3], 0);
        assert_ne!(buf[4], 0);
    }

    #[test]
    fn test_rounded_corner_leaves_corner_pixel_empty() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 16, 16);
        fill_rect(
            &mut c,
            Rect::new(0.0, 0.0, 16.0, 16.0),
            CornerRadius::uniform(8.0),
            Color::WHITE,
            full_clip(16, 16),
        );
        // The extreme corner is outside the arc, the center is inside
        assert_eq!(buf[0], 0);
        assert_ne!(buf[8 * 16 + 8], 0);
        // Edge midpoints are filled
        assert_ne!(buf[8], 0);
    }

    #[test]
    fn test_mask_blit_tints_with_color() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 4, 4);
        let mask = [255u8, 0, 0, 255];
        blit_mask(
            &mut c,
            &mask,
            2,
            2,
            1.0,
            1.0,
            Color::new(0.0, 1.0, 0.0, 1.0),
            full_clip(4, 4),
        );
        assert_eq!(buf[4 + 1], 0x0000FF00);
        assert_eq!(buf[4 + 2], 0);
        assert_eq!(buf[2 * 4 + 2], 0x0000FF00);
    }

    #[test]
    fn test_rgba_blit_stretches() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 4, 2);
        // 1x1 blue source stretched over 4x2
        let pixels = [0u8, 0, 255, 255];
        blit_rgba(
            &mut c,
            &pixels,
            1,
            1,
            Rect::new(0.0, 0.0, 4.0, 2.0),
            full_clip(4, 2),
        );
        assert!(buf.iter().all(|p| *p == 0x000000FF));
    }

    #[test]
    fn test_offscreen_rect_is_a_noop() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf, 4, 4);
        fill_rect(
            &mut c,
            Rect::new(100.0, 100.0, 10.0, 10.0),
            CornerRadius::ZERO,
            Color::WHITE,
            full_clip(4, 4),
        );
        assert!(buf.iter().all(|p| *p == 0));
    }
}
