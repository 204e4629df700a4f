use crate::core::math::transform::{TransformFactory, apply_perspective_division, ndc_to_screen};
use crate::error::Result;
use crate::io::config::ThumbnailConfig;
use crate::scene::mesh::Mesh;
use crate::scene::node::SceneNode;
use image::ImageBuffer;
use log::info;
use nalgebra::{Matrix4, Point2, Vector4};
use std::path::Path;

/// Share of the frame's shorter side a node of `frame_size` spans.
const FILL: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct ThumbnailOptions {
    pub width: usize,
    pub height: usize,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    /// Scene units that map to `FILL` of the shorter side.
    pub frame_size: f32,
}

impl ThumbnailOptions {
    pub fn from_config(config: &ThumbnailConfig, frame_size: f32) -> Self {
        Self {
            width: config.width,
            height: config.height,
            background: config.background,
            foreground: config.foreground,
            frame_size,
        }
    }
}

fn pack(rgb: [u8; 3]) -> u32 {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32
}

/// Draws the triangle edges of `node` as seen from +Z with an orthographic
/// camera centered on the origin. Returns a row-major 0RGB buffer.
pub fn render_silhouette(node: &SceneNode, options: &ThumbnailOptions) -> Vec<u32> {
    let (w, h) = (options.width, options.height);
    let mut buffer = vec![pack(options.background); w * h];
    if w == 0 || h == 0 {
        return buffer;
    }

    let aspect = w as f32 / h as f32;
    let half = options.frame_size.max(f32::EPSILON) * 0.5 / FILL;
    let (half_w, half_h) = if aspect >= 1.0 {
        (half * aspect, half)
    } else {
        (half, half / aspect)
    };
    let projection = TransformFactory::orthographic(-half_w, half_w, -half_h, half_h, -100.0, 100.0);
    let ink = pack(options.foreground);

    node.visit_meshes(&mut |mesh: &Mesh, world: &Matrix4<f32>| {
        let mvp = projection * world;
        let screen: Vec<Point2<f32>> = mesh
            .vertices
            .iter()
            .map(|v| {
                let p = v.position;
                let ndc = apply_perspective_division(&(mvp * Vector4::new(p.x, p.y, p.z, 1.0)));
                ndc_to_screen(ndc.x, ndc.y, w as f32, h as f32)
            })
            .collect();

        if mesh.indices.is_empty() {
            for p in &screen {
                plot(&mut buffer, w, h, *p, ink);
            }
            return;
        }
        for [a, b, c] in mesh.triangles() {
            let (Some(&pa), Some(&pb), Some(&pc)) = (screen.get(a), screen.get(b), screen.get(c))
            else {
                continue;
            };
            draw_line(&mut buffer, w, h, pa, pb, ink);
            draw_line(&mut buffer, w, h, pb, pc, ink);
            draw_line(&mut buffer, w, h, pc, pa, ink);
        }
    });

    buffer
}

#[inline]
fn plot(buffer: &mut [u32], w: usize, h: usize, p: Point2<f32>, color: u32) {
    let (x, y) = (p.x.floor(), p.y.floor());
    if x < 0.0 || y < 0.0 || x >= w as f32 || y >= h as f32 {
        return;
    }
    buffer[y as usize * w + x as usize] = color;
}

fn draw_line(buffer: &mut [u32], w: usize, h: usize, a: Point2<f32>, b: Point2<f32>, color: u32) {
    let steps = (b - a).abs().max().ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        plot(buffer, w, h, a + (b - a) * t, color);
    }
}

/// Saves a u32 (0RGB) buffer to a PNG file.
pub fn save_buffer_to_image(buffer: &[u32], width: usize, height: usize, path: &Path) -> Result<()> {
    let mut img_buf = ImageBuffer::new(width as u32, height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let color_u32 = buffer[(y as usize) * width + (x as usize)];

        let r = ((color_u32 >> 16) & 0xFF) as u8;
        let g = ((color_u32 >> 8) & 0xFF) as u8;
        let b = (color_u32 & 0xFF) as u8;

        *pixel = image::Rgb([r, g, b]);
    }

    img_buf.save(path)?;
    Ok(())
}

pub fn save_thumbnail(node: &SceneNode, options: &ThumbnailOptions, path: &Path) -> Result<()> {
    let buffer = render_silhouette(node, options);
    save_buffer_to_image(&buffer, options.width, options.height, path)?;
    info!("Thumbnail saved to '{}'", path.display());
    Ok(())
}
