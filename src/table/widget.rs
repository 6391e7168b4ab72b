//! Table Widget
//!
//! Renders a `DataTable` with its header indicators, selection column and
//! body state.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use super::column::Record;
use super::selection::SelectionMode;
use super::state::{BodyState, DataTable};
use crate::a11y::LOADING_MESSAGE;
use crate::theme;

const SELECT_COLUMN_WIDTH: u16 = 4;

pub struct DataTableWidget<'a, R> {
    table: &'a DataTable<R>,
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a, R: Record> DataTableWidget<'a, R> {
    pub fn new(table: &'a DataTable<R>) -> Self {
        Self {
            table,
            block: None,
            focused: true,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn radio(checked: bool) -> &'static str {
    if checked { "(•)" } else { "( )" }
}

fn select_all_symbol<R: Record>(table: &DataTable<R>) -> &'static str {
    match table.mode() {
        SelectionMode::Multiple if table.some_selected() => "[-]",
        SelectionMode::Multiple => checkbox(table.all_selected()),
        _ => "",
    }
}

fn row_symbol(mode: SelectionMode, selected: bool) -> &'static str {
    match mode {
        SelectionMode::Single => radio(selected),
        _ => checkbox(selected),
    }
}

fn build_header<R: Record>(table: &DataTable<R>, focused: bool) -> Row<'static> {
    let mut cells: Vec<Cell> = Vec::with_capacity(table.span());
    if table.mode().is_enabled() {
        cells.push(Cell::from(select_all_symbol(table)));
    }

    for header in table.header_cells() {
        let mut spans = vec![Span::raw(header.title)];
        if let Some(glyph) = header.glyph {
            spans.push(Span::styled(format!(" {}", glyph), theme::muted_style()));
        }
        let mut style = theme::header_style();
        if focused && header.focused {
            style = style.fg(theme::ACCENT).add_modifier(Modifier::UNDERLINED);
        }
        cells.push(Cell::from(Line::from(spans)).style(style));
    }

    Row::new(cells)
}

fn build_rows<R: Record>(table: &DataTable<R>) -> Vec<Row<'static>> {
    let mode = table.mode();
    table
        .ordered_rows()
        .into_iter()
        .enumerate()
        .map(|(position, row)| {
            let selected = table.is_selected(position);
            let mut cells: Vec<Cell> = Vec::with_capacity(table.span());
            if mode.is_enabled() {
                cells.push(Cell::from(row_symbol(mode, selected)));
            }
            cells.extend(table.columns().iter().map(|col| Cell::from(col.cell_line(row))));

            let row = Row::new(cells);
            if selected { row.style(theme::selected_row_style()) } else { row }
        })
        .collect()
}

fn widths<R: Record>(table: &DataTable<R>) -> Vec<Constraint> {
    let mut widths = Vec::with_capacity(table.span());
    if table.mode().is_enabled() {
        widths.push(Constraint::Length(SELECT_COLUMN_WIDTH));
    }
    widths.extend(table.columns().iter().map(|_| Constraint::Fill(1)));
    widths
}

/// One full-width line below the header
fn render_body_message(buf: &mut Buffer, inner: Rect, message: &str) {
    if inner.height < 2 {
        return;
    }
    let line_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
    Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(theme::muted_style())
        .render(line_area, buf);
}

impl<'a, R: Record> Widget for DataTableWidget<'a, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let header = build_header(self.table, self.focused);
        let body_state = self.table.body_state();
        let rows = match body_state {
            BodyState::Populated => build_rows(self.table),
            _ => Vec::new(),
        };

        let mut table = Table::new(rows, widths(self.table)).header(header);
        if self.focused {
            table = table.row_highlight_style(theme::cursor_row_style());
        }
        let mut state = TableState::default().with_selected(Some(self.table.cursor()));
        StatefulWidget::render(table, inner, buf, &mut state);

        match body_state {
            BodyState::Loading => render_body_message(buf, inner, LOADING_MESSAGE),
            BodyState::Empty(message) => render_body_message(buf, inner, message),
            BodyState::Populated => {}
        }
    }
}
