//! Input Field Widget
//!
//! Draws the label, the input line with its affordances and the message line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::state::{FieldMessage, InputField};
use crate::theme;

pub struct InputFieldWidget<'a> {
    field: &'a InputField,
    focused: bool,
}

impl<'a> InputFieldWidget<'a> {
    pub fn new(field: &'a InputField) -> Self {
        Self { field, focused: false }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rows needed to draw `field`
    pub fn height(field: &InputField) -> u16 {
        let label = u16::from(field.label_text().is_some());
        let message = u16::from(field.message().is_some());
        label + field.style(false).height() + message
    }
}

fn label_line(field: &InputField) -> Option<Line<'_>> {
    let label = field.label_text()?;
    let mut spans = vec![Span::styled(label, Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))];
    if field.is_required() {
        spans.push(Span::styled(" *", Style::default().fg(theme::ERROR)));
    }
    Some(Line::from(spans))
}

fn affordance_spans(field: &InputField) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if field.style(false).busy {
        spans.push(Span::styled(" …", theme::muted_style()));
    }
    if field.has_password_toggle() {
        let text = if field.is_revealed() { " [hide]" } else { " [show]" };
        spans.push(Span::styled(text, Style::default().fg(theme::ACCENT)));
    }
    if field.can_clear() {
        spans.push(Span::styled(" [✕]", Style::default().fg(theme::ACCENT)));
    }
    spans
}

fn message_line<'a>(message: FieldMessage<'a>) -> Line<'a> {
    match message {
        FieldMessage::Error(text) => Line::styled(text, Style::default().fg(theme::ERROR)),
        FieldMessage::Helper(text) => Line::styled(text, theme::muted_style()),
    }
}

impl<'a> InputFieldWidget<'a> {
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let style = self.field.style(self.focused);
        let inner = match style.border {
            Some(border_style) => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style);
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        buf.set_style(inner, style.text);

        let affordances = Line::from(affordance_spans(self.field));
        let affordance_width = affordances.width() as u16;
        let value_x = inner.x + style.padding;
        let value_width = inner.width.saturating_sub(style.padding * 2 + affordance_width);

        let display = self.field.display_value();
        if display.is_empty() {
            if let Some(placeholder) = self.field.placeholder_text() {
                buf.set_stringn(value_x, inner.y, placeholder, value_width as usize, style.text.patch(theme::muted_style()));
            }
        } else {
            buf.set_stringn(value_x, inner.y, &display, value_width as usize, style.text);
        }

        let affordance_x = inner.right().saturating_sub(style.padding + affordance_width);
        buf.set_line(affordance_x, inner.y, &affordances, affordance_width);

        if self.focused && !self.field.is_disabled() {
            let value = self.field.value();
            let before = &value[..self.field.cursor()];
            // One cell per mask character, otherwise the displayed width
            let column = (if self.field.is_masked() { before.chars().count() } else { before.width() }) as u16;
            let cursor_x = value_x + column;
            if column < value_width {
                if let Some(cell) = buf.cell_mut((cursor_x, inner.y)) {
                    cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                }
            }
        }
    }
}

impl<'a> Widget for InputFieldWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        let bottom = area.bottom();

        if let Some(label) = label_line(self.field) {
            if y >= bottom {
                return;
            }
            buf.set_line(area.x, y, &label, area.width);
            y += 1;
        }

        let input_height = self.field.style(self.focused).height().min(bottom.saturating_sub(y));
        if input_height == 0 {
            return;
        }
        self.render_input(Rect::new(area.x, y, area.width, input_height), buf);
        y += input_height;

        if let Some(message) = self.field.message() {
            if y < bottom {
                buf.set_line(area.x, y, &message_line(message), area.width);
            }
        }
    }
}
