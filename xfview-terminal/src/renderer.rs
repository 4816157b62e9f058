/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Vector4;
use std::io::Write;
use xfview_core::{Frame, Mat4, Mesh, Transform, Triangle};

/// Fill characters from farthest to nearest
const DEPTH_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A vertex after projection: screen column, screen row, NDC depth
type ScreenVertex = (f64, f64, f64);

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, `None` outside the buffer
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Rasterize `mesh` placed and viewed as described by `frame`
    pub fn render_frame(&mut self, frame: &Frame, mesh: &Mesh) {
        let mvp = Transform::mvp_matrix(
            &frame.model,
            &frame.camera.view_matrix(),
            &frame.camera.projection_matrix(),
        );

        let projected: Vec<[ScreenVertex; 3]> = mesh
            .triangles
            .iter()
            .filter_map(|triangle| self.project_triangle(triangle, &mvp))
            .collect();

        let depth = |coords: &[ScreenVertex; 3]| (coords[0].2 + coords[1].2 + coords[2].2) / 3.0;
        let (nearest, farthest) = projected
            .iter()
            .map(depth)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)));
        let span = farthest - nearest;

        for coords in &projected {
            // Nearer triangles get denser characters
            let closeness = if span > 1e-12 {
                (farthest - depth(coords)) / span
            } else {
                1.0
            };
            let char_index = (closeness * (DEPTH_RAMP.len() - 1) as f64).round() as usize;
            let character = DEPTH_RAMP[char_index.min(DEPTH_RAMP.len() - 1)];

            self.rasterize_triangle(coords, character);
        }
    }

    fn project_triangle(&self, triangle: &Triangle, mvp: &Mat4) -> Option<[ScreenVertex; 3]> {
        let mut coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in coords.iter_mut().zip(&triangle.vertices) {
            let p = vertex.position;
            *slot = self.project_to_screen(mvp * Vector4::new(p.x, p.y, p.z, 1.0))?;
        }
        Some(coords)
    }

    /// Homogeneous divide and viewport mapping of a clip-space point
    fn project_to_screen(&self, clip: Vector4<f64>) -> Option<ScreenVertex> {
        // Points behind a perspective camera have w <= 0
        if !(clip.w > 1e-9) {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(ndc_x.is_finite() && ndc_y.is_finite()) || !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * self.width as f64;
        let screen_y = (1.0 - ndc_y) * 0.5 * self.height as f64;

        Some((screen_x, screen_y, depth))
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenVertex; 3], character: char) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box clipped to screen bounds
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as usize;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil().min(self.width as f64 - 1.0);
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as usize;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil().min(self.height as f64 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py)) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y * self.width + x;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    /// Buffer contents as plain text, one string per row
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character density
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xfview_core::{render, CameraPose, GeometryKind, ProjectionMode, SceneParams, Vec3};

    fn filled(renderer: &AsciiRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.cell(x, y) != Some(' '))
            .count()
    }

    #[test]
    fn test_cube_fills_screen_centre() {
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_frame(&render(&SceneParams::default()), &Mesh::cube(1.0));

        assert_ne!(renderer.cell(20, 10), Some(' '));
        assert_eq!(renderer.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_orthographic_cube_fills_screen_centre() {
        let mut params = SceneParams::default();
        params.switch_projection(ProjectionMode::Orthographic);
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_frame(&render(&params), &Mesh::from_kind(GeometryKind::Sphere));

        assert_ne!(renderer.cell(20, 10), Some(' '));
    }

    #[test]
    fn test_object_behind_camera_is_not_drawn() {
        let mut params = SceneParams::default();
        params.pose = CameraPose::new(Vec3::new(0.0, 0.0, -5.0), Vec3::zeros());
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_frame(&render(&params), &Mesh::cube(1.0));

        assert_eq!(filled(&renderer), 0);
    }

    #[test]
    fn test_degenerate_camera_draws_nothing() {
        let mut params = SceneParams::default();
        params.camera.near = 5.0;
        params.camera.far = 5.0;
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_frame(&render(&params), &Mesh::cube(1.0));

        assert_eq!(filled(&renderer), 0);
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.render_frame(&render(&SceneParams::default()), &Mesh::cube(3.0));
        assert!(filled(&renderer) > 0);

        renderer.clear();
        assert_eq!(filled(&renderer), 0);
    }

    #[test]
    fn test_rows() {
        let mut renderer = AsciiRenderer::new(8, 3);
        renderer.render_frame(&render(&SceneParams::default()), &Mesh::cube(0.5));
        let rows: Vec<String> = renderer.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.chars().count() == 8));
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-12);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
    }
}
