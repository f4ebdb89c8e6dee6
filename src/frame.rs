//! Pixel frames and conversions used by the display path and the edge filter.

use crate::board::Board;
use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};
use std::path::Path;

/// Supported pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single 8-bit luminance channel
    Luma,
    /// RGB with 8 bits per channel (24 bits per pixel)
    Rgb,
    /// RGBA with 8 bits per channel (32 bits per pixel)
    Rgba,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Luma => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A row-major image buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format of the frame data
    pub format: PixelFormat,
    /// Raw pixel data
    pub data: Vec<u8>,
}

impl Frame {
    /// Creates a black frame.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let size = (width as usize) * (height as usize) * format.bytes_per_pixel();
        Self {
            width,
            height,
            format,
            data: vec![0; size],
        }
    }

    /// Wraps existing pixel data, checking its length against the dimensions.
    pub fn from_data(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(anyhow!(
                "{:?} frame {}x{} needs {} bytes, got {}",
                format,
                width,
                height,
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Luminance frame of a board: white for alive, black for dead.
    pub fn from_board(board: &Board) -> Self {
        Self {
            width: board.width() as u32,
            height: board.height() as u32,
            format: PixelFormat::Luma,
            data: board.to_luminance(),
        }
    }

    /// Converts this frame to RGBA format.
    pub fn to_rgba(&self) -> Frame {
        let pixel_count = (self.width as usize) * (self.height as usize);
        let data = match self.format {
            PixelFormat::Rgba => return self.clone(),
            PixelFormat::Rgb => {
                let mut rgba = Vec::with_capacity(pixel_count * 4);
                for px in self.data.chunks_exact(3) {
                    rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                rgba
            }
            PixelFormat::Luma => {
                let mut rgba = Vec::with_capacity(pixel_count * 4);
                for &l in &self.data {
                    rgba.extend_from_slice(&[l, l, l, 255]);
                }
                rgba
            }
        };
        Frame {
            width: self.width,
            height: self.height,
            format: PixelFormat::Rgba,
            data,
        }
    }

    /// Decodes an image file into an RGBA frame.
    pub fn open(path: &Path) -> Result<Frame> {
        let img = image::open(path)
            .map_err(|e| anyhow!("Failed to open image {:?}: {}", path, e))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Frame::from_data(width, height, PixelFormat::Rgba, img.into_raw())
    }

    /// Encodes the frame; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let color = match self.format {
            PixelFormat::Luma => image::ExtendedColorType::L8,
            PixelFormat::Rgb => image::ExtendedColorType::Rgb8,
            PixelFormat::Rgba => image::ExtendedColorType::Rgba8,
        };
        image::save_buffer(path, &self.data, self.width, self.height, color)
            .map_err(|e| anyhow!("Failed to write image {:?}: {}", path, e))
    }
}

/// Vertex for rendering a full-screen quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    /// Vertices for a full-screen quad, texture row 0 at the top.
    pub const VERTICES: &'static [QuadVertex] = &[
        QuadVertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0] },
        QuadVertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0] },
        QuadVertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0] },
        QuadVertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0] },
    ];

    /// Indices for the quad (two triangles).
    pub const INDICES: &'static [u16] = &[0, 1, 2, 2, 3, 0];

    /// Returns the vertex buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
