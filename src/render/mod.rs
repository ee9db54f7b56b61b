//! Terminal implementation of the drawing surface
//!
//! Rasterizes the sim's draw calls into a character-cell back buffer and
//! flushes whole frames with crossterm. World coordinates are y-up while
//! terminal rows grow downward, so the vertical axis is flipped on write.
//! Anything outside the grid is clipped silently.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use glam::Vec2;

use crate::draw::{DrawSurface, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Rgb,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Rgb(0, 0, 0),
};

/// A character-cell canvas over any writer (a terminal in the game, a
/// byte buffer in tests)
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// World extents mapped onto the full grid
    world: Vec2,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            world: Vec2::ONE,
            cells: vec![EMPTY; cols as usize * rows as usize],
        }
    }

    /// Grid column/row containing a world position. May be out of range;
    /// `put` clips.
    fn world_to_cell(&self, pos: Vec2) -> (i32, i32) {
        let mut col = (pos.x / self.world.x * self.cols as f32).floor() as i32;
        let mut row = ((1.0 - pos.y / self.world.y) * self.rows as f32).floor() as i32;
        // Positions exactly on the field edge belong to the border cell,
        // not one past it, so bottom- and right-edge geometry stays visible.
        if col == self.cols as i32 && pos.x <= self.world.x {
            col -= 1;
        }
        if row == self.rows as i32 && pos.y >= 0.0 {
            row -= 1;
        }
        (col, row)
    }

    /// World position at the center of a cell, for coverage tests.
    fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) / self.cols as f32 * self.world.x,
            (1.0 - (row as f32 + 0.5) / self.rows as f32) * self.world.y,
        )
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Rgb) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
    }
}

/// Even-odd crossing test
fn point_in_polygon(p: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

impl<W: Write> DrawSurface for TerminalSurface<W> {
    fn set_world_scale(&mut self, width: f32, height: f32) {
        self.world = Vec2::new(width.max(f32::EPSILON), height.max(f32::EPSILON));
    }

    fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let (min_col, max_row) = self.world_to_cell(center - Vec2::splat(radius));
        let (max_col, min_row) = self.world_to_cell(center + Vec2::splat(radius));

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                if self.cell_center(col, row).distance(center) <= radius {
                    self.put(col, row, '█', color);
                }
            }
        }

        // Sub-cell circles (the bird's eyes) still get their center cell.
        let (col, row) = self.world_to_cell(center);
        self.put(col, row, '█', color);
    }

    fn filled_polygon(&mut self, vertices: &[Vec2], color: Rgb) {
        if vertices.is_empty() {
            return;
        }

        let lo = vertices.iter().copied().reduce(Vec2::min).unwrap_or(Vec2::ZERO);
        let hi = vertices.iter().copied().reduce(Vec2::max).unwrap_or(Vec2::ZERO);
        let (min_col, max_row) = self.world_to_cell(lo);
        let (max_col, min_row) = self.world_to_cell(hi);

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                if point_in_polygon(self.cell_center(col, row), vertices) {
                    self.put(col, row, '█', color);
                }
            }
        }

        // Sub-cell polygons (the beak) still get their centroid cell.
        let centroid = vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32;
        let (col, row) = self.world_to_cell(centroid);
        self.put(col, row, '█', color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        let (c0, r0) = self.world_to_cell(from);
        let (c1, r1) = self.world_to_cell(to);
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = from.lerp(to, t);
            let (col, row) = self.world_to_cell(p);
            self.put(col, row, '·', color);
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Rgb) {
        let (col, row) = self.world_to_cell(pos);
        let start = col - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, color);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut last_color: Option<Rgb> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if cell.ch != ' ' && last_color != Some(cell.color) {
                    let Rgb(r, g, b) = cell.color;
                    self.out
                        .queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
                    last_color = Some(cell.color);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::palette;

    fn surface(cols: u16, rows: u16) -> TerminalSurface<Vec<u8>> {
        let mut s = TerminalSurface::new(Vec::new(), cols, rows);
        s.set_world_scale(10.0, 5.0);
        s
    }

    fn cell_at(s: &TerminalSurface<Vec<u8>>, col: usize, row: usize) -> Cell {
        s.cells[row * s.cols as usize + col]
    }

    #[test]
    fn vertical_axis_is_flipped() {
        let s = surface(20, 10);
        // World origin is the bottom-left corner of the grid.
        assert_eq!(s.world_to_cell(Vec2::new(0.0, 0.0)), (0, 9));
        // Near the top of the world maps to the first row.
        assert_eq!(s.world_to_cell(Vec2::new(0.1, 4.9)), (0, 0));
    }

    #[test]
    fn field_edges_land_in_border_cells() {
        let s = surface(20, 10);
        // The far corner maps to the last cell, not one past it.
        assert_eq!(s.world_to_cell(Vec2::new(10.0, 0.0)), (19, 9));
        // Just past the edge is still out of range and gets clipped.
        assert_eq!(s.world_to_cell(Vec2::new(10.1, -0.1)), (20, 10));
    }

    #[test]
    fn bottom_edge_geometry_is_visible() {
        let mut s = surface(20, 10);
        s.text(Vec2::new(5.0, 0.0), "X", palette::LABEL);
        let (col, row) = s.world_to_cell(Vec2::new(5.0, 0.0));
        assert_eq!(row, 9);
        assert_eq!(cell_at(&s, col as usize, row as usize).ch, 'X');
    }

    #[test]
    fn circle_paints_its_center_cell() {
        let mut s = surface(20, 10);
        s.filled_circle(Vec2::new(5.0, 2.5), 1.0, palette::TARGET);
        let (col, row) = s.world_to_cell(Vec2::new(5.0, 2.5));
        let cell = cell_at(&s, col as usize, row as usize);
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.color, palette::TARGET);
    }

    #[test]
    fn sub_cell_circle_is_still_visible() {
        let mut s = surface(20, 10);
        // Far smaller than one cell.
        s.filled_circle(Vec2::new(5.0, 2.5), 0.01, palette::BIRD_EYE);
        assert!(s.cells.iter().any(|c| c.ch == '█'));
    }

    #[test]
    fn text_is_centered_on_its_position() {
        let mut s = surface(20, 10);
        s.text(Vec2::new(5.0, 2.5), "AB", palette::LABEL);
        let (col, row) = s.world_to_cell(Vec2::new(5.0, 2.5));
        assert_eq!(cell_at(&s, col as usize - 1, row as usize).ch, 'A');
        assert_eq!(cell_at(&s, col as usize, row as usize).ch, 'B');
    }

    #[test]
    fn offscreen_draws_are_clipped() {
        let mut s = surface(20, 10);
        s.text(Vec2::new(-50.0, 2.5), "clip", palette::LABEL);
        s.filled_circle(Vec2::new(200.0, 200.0), 1.0, palette::TARGET);
        s.line(
            Vec2::new(-10.0, -10.0),
            Vec2::new(50.0, 50.0),
            palette::AIM_LINE,
        );
        // Nothing panicked; the line crossed the grid and left some cells.
        assert!(s.cells.iter().any(|c| c.ch == '·'));
    }

    #[test]
    fn clear_erases_the_previous_frame() {
        let mut s = surface(20, 10);
        s.filled_circle(Vec2::new(5.0, 2.5), 2.0, palette::TARGET);
        s.clear();
        assert!(s.cells.iter().all(|c| *c == EMPTY));
    }

    #[test]
    fn polygon_fills_interior_cells() {
        let mut s = surface(20, 10);
        // A large triangle covering the lower-left of the world.
        s.filled_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(8.0, 0.0),
                Vec2::new(0.0, 4.0),
            ],
            palette::BIRD_BEAK,
        );
        let (col, row) = s.world_to_cell(Vec2::new(1.0, 0.5));
        assert_eq!(cell_at(&s, col as usize, row as usize).ch, '█');
        // A corner well outside the triangle stays empty.
        let (col, row) = s.world_to_cell(Vec2::new(9.5, 4.5));
        assert_eq!(cell_at(&s, col as usize, row as usize), EMPTY);
    }

    #[test]
    fn present_flushes_the_frame() {
        let mut s = surface(4, 2);
        s.filled_circle(Vec2::new(5.0, 2.5), 2.0, palette::TARGET);
        s.present().unwrap();
        assert!(!s.out.is_empty());
    }
}
