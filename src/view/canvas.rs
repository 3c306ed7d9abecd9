/// A single text line, with content centered inside a fixed display width.
pub struct Canvas {
    line: String,
}

impl Canvas {
    /// Starts a line whose content will be `content_width` columns wide.
    /// Content wider than the display is left aligned.
    pub fn centered(display_width: usize, content_width: usize) -> Self {
        let padding = display_width.saturating_sub(content_width) / 2;
        let line = " ".repeat(padding);
        Self { line }
    }

    pub fn draw(&mut self, glyph: &str) {
        self.line.push_str(glyph);
    }

    pub fn into_line(self) -> String {
        self.line
    }
}

#[test]
fn test_centered() {
    let mut canvas = Canvas::centered(10, 4);
    canvas.draw("ab");
    canvas.draw("cd");
    assert_eq!(canvas.into_line(), "   abcd");

    assert_eq!(Canvas::centered(3, 4).into_line(), "");
    assert_eq!(Canvas::centered(9, 4).into_line(), "  ");
}
