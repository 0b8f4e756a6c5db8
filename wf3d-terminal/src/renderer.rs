/// Character-cell framebuffer for drawing wireframes in a terminal
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::{Canvas, Color, ScreenPoint};

/// Glyph used for filled circles.
const FILL_GLYPH: char = '@';

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

/// Canvas that maps a virtual pixel viewport onto terminal cells.
///
/// The engine projects into `virtual_width` x `virtual_height` pixels; every
/// draw call is scaled down to the `cols` x `rows` grid.
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    virtual_width: f64,
    virtual_height: f64,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: usize, rows: usize, virtual_width: u32, virtual_height: u32) -> Self {
        Self {
            cols,
            rows,
            virtual_width: virtual_width as f64,
            virtual_height: virtual_height as f64,
            cells: vec![Cell { glyph: ' ', color: Color::BLACK }; cols * rows],
        }
    }

    /// Change the cell grid, keeping the virtual resolution.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell { glyph: ' ', color: Color::BLACK }; cols * rows];
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Glyph at a cell, or `None` when out of range.
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i].glyph)
    }

    pub fn color_at(&self, col: usize, row: usize) -> Option<Color> {
        self.index(col, row).map(|i| self.cells[i].color)
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col < self.cols && row < self.rows {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    fn to_cell_space(&self, p: ScreenPoint) -> (f64, f64) {
        (
            p.x * self.cols as f64 / self.virtual_width,
            p.y * self.rows as f64 / self.virtual_height,
        )
    }

    fn plot(&mut self, col: i64, row: i64, glyph: char, color: Color) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(i) = self.index(col as usize, row as usize) {
            self.cells[i] = Cell { glyph, color };
        }
    }

    /// Write the whole grid, one terminal row per canvas row.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_terminal_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for CellCanvas {
    fn clear(&mut self, color: Color) {
        for cell in self.cells.iter_mut() {
            *cell = Cell { glyph: ' ', color };
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color) {
        let (x0, y0) = self.to_cell_space(from);
        let (x1, y1) = self.to_cell_space(to);
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return;
        }

        let glyph = line_glyph(x1 - x0, y1 - y0);
        let bounds = (self.cols as f64 - 1e-3, self.rows as f64 - 1e-3);
        let Some(((x0, y0), (x1, y1))) = clip_to_rect((x0, y0), (x1, y1), bounds) else {
            return;
        };

        // Bresenham over the clipped, now bounded, segment
        let (mut x, mut y) = (x0.floor() as i64, y0.floor() as i64);
        let (end_x, end_y) = (x1.floor() as i64, y1.floor() as i64);
        let dx = (end_x - x).abs();
        let dy = -(end_y - y).abs();
        let sx = if x < end_x { 1 } else { -1 };
        let sy = if y < end_y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, glyph, color);
            if x == end_x && y == end_y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_circle(&mut self, center: ScreenPoint, radius: u32, color: Color) {
        let (cx, cy) = self.to_cell_space(center);
        if !cx.is_finite() || !cy.is_finite() {
            return;
        }

        let rx = radius as f64 * self.cols as f64 / self.virtual_width;
        let ry = radius as f64 * self.rows as f64 / self.virtual_height;

        // always at least the center cell
        self.plot(cx.floor() as i64, cy.floor() as i64, FILL_GLYPH, color);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }

        let (min_col, max_col) = ((cx - rx).floor().max(0.0), (cx + rx).ceil().min(self.cols as f64));
        let (min_row, max_row) = ((cy - ry).floor().max(0.0), (cy + ry).ceil().min(self.rows as f64));
        let mut row = min_row;
        while row < max_row {
            let mut col = min_col;
            while col < max_col {
                let nx = (col + 0.5 - cx) / rx;
                let ny = (row + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.plot(col as i64, row as i64, FILL_GLYPH, color);
                }
                col += 1.0;
            }
            row += 1.0;
        }
    }
}

fn to_terminal_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Pick a glyph that follows the slope of a segment in cell space.
fn line_glyph(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if dx * dy > 0.0 {
        // y grows downward
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment to `[0, max_x] x [0, max_y]`.
fn clip_to_rect(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    (max_x, max_y): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (x0 + t0 * dx, y0 + t0 * dy),
        (x0 + t1 * dx, y0 + t1 * dy),
    ))
}
