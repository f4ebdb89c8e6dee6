//! Sobel edge magnitude filter.

use crate::frame::{Frame, PixelFormat};
use rayon::prelude::*;

/// Applies a 3x3 Sobel operator to every colour channel.
///
/// Neighbors outside the frame clamp to the nearest edge pixel. Output is
/// RGBA with `sqrt(gx^2 + gy^2)` per channel and opaque alpha.
pub fn sobel(input: &Frame) -> Frame {
    let src = input.to_rgba();
    let width = src.width as usize;
    let height = src.height as usize;
    let mut out = Frame::new(src.width, src.height, PixelFormat::Rgba);
    if width == 0 || height == 0 {
        return out;
    }

    let sample = |x: isize, y: isize, c: usize| -> f32 {
        let cx = x.clamp(0, width as isize - 1) as usize;
        let cy = y.clamp(0, height as isize - 1) as usize;
        src.data[(cy * width + cx) * 4 + c] as f32 / 255.0
    };

    out.data
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as isize;
            for x in 0..width {
                let xi = x as isize;
                for c in 0..3 {
                    let n0 = sample(xi - 1, y - 1, c);
                    let n1 = sample(xi, y - 1, c);
                    let n2 = sample(xi + 1, y - 1, c);
                    let n3 = sample(xi - 1, y, c);
                    let n5 = sample(xi + 1, y, c);
                    let n6 = sample(xi - 1, y + 1, c);
                    let n7 = sample(xi, y + 1, c);
                    let n8 = sample(xi + 1, y + 1, c);

                    let gx = n2 + 2.0 * n5 + n8 - (n0 + 2.0 * n3 + n6);
                    let gy = n0 + 2.0 * n1 + n2 - (n6 + 2.0 * n7 + n8);
                    let magnitude = (gx * gx + gy * gy).sqrt().clamp(0.0, 1.0);
                    row[x * 4 + c] = (magnitude * 255.0).round() as u8;
                }
                row[x * 4 + 3] = 255;
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(width: u32, height: u32, data: Vec<u8>) -> Frame {
        Frame::from_data(width, height, PixelFormat::Luma, data).unwrap()
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let frame = luma(5, 4, vec![200; 20]);
        let edges = sobel(&frame);
        assert_eq!(edges.format, PixelFormat::Rgba);
        for px in edges.data.chunks_exact(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_vertical_edge_detected() {
        // Left half black, right half white.
        let mut data = Vec::new();
        for _ in 0..4 {
            data.extend_from_slice(&[0, 0, 0, 255, 255, 255]);
        }
        let edges = sobel(&luma(6, 4, data));

        let at = |x: usize, y: usize| edges.data[(y * 6 + x) * 4];
        // Columns next to the boundary saturate; columns away from it stay dark.
        assert_eq!(at(2, 1), 255);
        assert_eq!(at(3, 1), 255);
        assert_eq!(at(0, 1), 0);
        assert_eq!(at(5, 2), 0);
    }

    #[test]
    fn test_channels_are_filtered_independently() {
        // Red varies across x, green is constant.
        let mut data = Vec::new();
        for _ in 0..3 {
            data.extend_from_slice(&[0, 90, 0, 255]);
            data.extend_from_slice(&[0, 90, 0, 255]);
            data.extend_from_slice(&[255, 90, 0, 255]);
        }
        let frame = Frame::from_data(3, 3, PixelFormat::Rgba, data).unwrap();
        let edges = sobel(&frame);
        let center = &edges.data[16..20];
        assert_eq!(center[0], 255);
        assert_eq!(center[1], 0);
        assert_eq!(center[2], 0);
        assert_eq!(center[3], 255);
    }

    #[test]
    fn test_weak_gradient_is_proportional() {
        // A step of 32 levels: gx = 4 * 32 / 255 at the boundary.
        let mut data = Vec::new();
        for _ in 0..3 {
            data.extend_from_slice(&[100, 100, 132, 132]);
        }
        let edges = sobel(&luma(4, 3, data));
        let value = edges.data[20];
        assert_eq!(value, 128);
    }
}
