use ratatui::buffer::Buffer;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

use crate::config::{BORDER_CORNER, BORDER_HORIZONTAL, BORDER_VERTICAL, GridSize};

/// Character grid the game is drawn onto. Coordinates are `(row, col)`
/// relative to the canvas origin; anything outside is dropped silently.
pub trait Canvas {
    fn clear(&mut self);

    /// Draws a border enclosing `size` cells from the origin.
    fn draw_border(&mut self, size: GridSize);

    fn put_glyph(&mut self, row: i32, col: i32, glyph: char);

    /// Writes `text` centered on `row`, truncated to the canvas width.
    fn draw_centered(&mut self, row: i32, text: &str);

    /// Visible dimensions.
    fn size(&self) -> GridSize;
}

impl Canvas for Buffer {
    fn clear(&mut self) {
        self.reset();
    }

    fn draw_border(&mut self, size: GridSize) {
        let bottom = i32::from(size.height) - 1;
        let right = i32::from(size.width) - 1;
        if bottom < 1 || right < 1 {
            return;
        }

        for col in 1..right {
            self.put_glyph(0, col, BORDER_HORIZONTAL);
            self.put_glyph(bottom, col, BORDER_HORIZONTAL);
        }
        for row in 1..bottom {
            self.put_glyph(row, 0, BORDER_VERTICAL);
            self.put_glyph(row, right, BORDER_VERTICAL);
        }
        for (row, col) in [(0, 0), (0, right), (bottom, 0), (bottom, right)] {
            self.put_glyph(row, col, BORDER_CORNER);
        }
    }

    fn put_glyph(&mut self, row: i32, col: i32, glyph: char) {
        let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
            return;
        };
        if row >= self.area.height || col >= self.area.width {
            return;
        }

        let position = (self.area.x + col, self.area.y + row);
        if let Some(cell) = self.cell_mut(position) {
            cell.set_char(glyph);
        }
    }

    fn draw_centered(&mut self, row: i32, text: &str) {
        let Ok(row) = u16::try_from(row) else {
            return;
        };
        if row >= self.area.height {
            return;
        }

        let width = usize::from(self.area.width);
        let text_width = text.width().min(width);
        let offset = u16::try_from((width - text_width) / 2).unwrap_or(0);
        self.set_stringn(
            self.area.x + offset,
            self.area.y + row,
            text,
            text_width,
            Style::default(),
        );
    }

    fn size(&self) -> GridSize {
        GridSize::new(self.area.height, self.area.width)
    }
}
