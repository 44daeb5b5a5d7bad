use crate::util::hit;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};

/// A labelled rectangle that knows whether a click landed on it.
#[derive(Clone, Debug)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub color: Color,
    pub focused: bool,
}

impl Button {
    pub const DARK_GREEN: Color = Color::Rgb(0, 100, 0);
    pub const DARK_RED: Color = Color::Rgb(139, 0, 0);

    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
            color: Self::DARK_GREEN,
            focused: false,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn is_clicked(&self, column: u16, row: u16) -> bool {
        hit(self.rect, column, row)
    }
}

impl Widget for &Button {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };
        let label = Line::from(self.label.as_str()).bold().white();
        let label = if self.focused { label.reversed() } else { label };
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_type(border).white())
            .style(Style::new().bg(self.color))
            .render(area, buf);
    }
}

/// Wrapped text on a bordered background.
#[derive(Clone, Debug)]
pub struct TextBox<'a> {
    pub lines: Vec<Line<'a>>,
    pub bg: Color,
    pub border: Color,
}

impl<'a> TextBox<'a> {
    pub fn new(lines: Vec<Line<'a>>, bg: Color) -> Self {
        Self {
            lines,
            bg,
            border: Color::Black,
        }
    }
}

impl Widget for TextBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::new().fg(self.border)))
            .style(Style::new().bg(self.bg).fg(Color::Black))
            .render(area, buf);
    }
}
