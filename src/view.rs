use std::io::{self, stdout, Write};

use crate::Row;

use canvas::Canvas;
mod canvas;

const ALIVE_GLYPH: &str = "■ ";
const DEAD_GLYPH: &str = "  ";
const GLYPH_WIDTH: usize = 2;
const FALLBACK_WIDTH: usize = 80;

/// Width of the attached terminal, or a sane default when piped.
pub fn terminal_width() -> usize {
    if !termion::is_tty(&stdout()) {
        return FALLBACK_WIDTH;
    }
    match termion::terminal_size() {
        Ok((width, _)) => width as usize,
        Err(e) => {
            log::warn!("could not read terminal size, using {FALLBACK_WIDTH} columns: {e}");
            FALLBACK_WIDTH
        }
    }
}

/// Renders `row` as one line centered within `display_width` columns.
pub fn render_line(row: &Row, display_width: usize) -> String {
    let mut canvas = Canvas::centered(display_width, row.len() * GLYPH_WIDTH);
    for cell in row.iter() {
        canvas.draw(if cell.is_alive() { ALIVE_GLYPH } else { DEAD_GLYPH });
    }
    canvas.into_line()
}

pub struct View<W>
where
    W: Write,
{
    out: W,
    display_width: usize,
}

impl<W> View<W>
where
    W: Write,
{
    pub fn new(out: W, display_width: usize) -> Self {
        Self { out, display_width }
    }

    pub fn display(&mut self, row: &Row) -> io::Result<()> {
        let line = render_line(row, self.display_width);
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
