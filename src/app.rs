//! Application State
//!
//! Demo application tying a table and a small form to the keyboard.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use serde_json::{json, Value};
use tracing::info;

use crate::config::AppConfig;
use crate::field::{InputField, InputFieldWidget, InputType, InputVariant, ValueChange};
use crate::input::{FocusTarget, GlobalAction, InputHandler, Routed};
use crate::table::{CellValue, Column, DataTable, DataTableWidget, RowKey};
use crate::theme;

const NAME_FIELD: usize = 0;
const EMAIL_FIELD: usize = 1;

pub fn sample_rows() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "Grace Hopper", "age": 85, "email": "grace@navy.mil" }),
        json!({ "id": 2, "name": "alan turing", "age": 41, "email": "alan@bletchley.uk" }),
        json!({ "id": 3, "name": "Ada Lovelace", "age": 36, "email": null }),
        json!({ "id": 4, "name": "Edsger Dijkstra", "age": 72, "email": "ewd@utexas.edu" }),
        json!({ "id": 5, "name": "Barbara Liskov", "age": null, "email": "liskov@mit.edu" }),
    ]
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One column per key of the first row. `id` is shown but not sortable.
pub fn columns_for(rows: &[Value]) -> Vec<Column<Value>> {
    let Some(Value::Object(first)) = rows.first() else {
        return Vec::new();
    };
    first
        .keys()
        .map(|key| {
            let column = Column::new(key.as_str(), title_case(key), key.as_str()).sortable(key != "id");
            if key == "age" {
                column.render_with(|value, _| match value {
                    CellValue::Null => Line::styled("n/a", theme::muted_style()),
                    other => Line::from(other.to_string()),
                })
            } else {
                column
            }
        })
        .collect()
}

fn row_id(row: &Value, index: usize) -> RowKey {
    match row.get("id") {
        Some(id) => RowKey::Named(id.to_string()),
        None => RowKey::Index(index),
    }
}

fn is_valid_email(value: &str) -> bool {
    value.is_empty() || value.split_once('@').is_some_and(|(user, host)| !user.is_empty() && host.contains('.'))
}

pub struct App {
    pub config: AppConfig,
    pub table: DataTable<Value>,
    pub fields: Vec<InputField>,
    /// 0 is the table, then one slot per field
    pub focus: usize,
    pub selected: Rc<RefCell<Vec<Value>>>,
    pub email: Rc<RefCell<String>>,
    pub should_quit: bool,
    page_size: usize,
}

impl App {
    pub fn new(config: AppConfig, rows: Vec<Value>) -> Self {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let email = Rc::new(RefCell::new(String::new()));

        let sink = Rc::clone(&selected);
        let columns = columns_for(&rows);
        let table = DataTable::new(rows, columns)
            .selection_mode(config.selection_mode)
            .empty_message(config.empty_message.clone())
            .row_key(row_id)
            .on_row_select(move |rows: &[&Value]| {
                *sink.borrow_mut() = rows.iter().map(|r| (*r).clone()).collect();
            })
            .mount();

        let fields = vec![
            InputField::new()
                .label("Name")
                .placeholder("Jane Doe")
                .helper_text("As shown on your profile")
                .clearable(true),
            Self::email_field(&email),
            InputField::new()
                .label("Password")
                .input_type(InputType::Password)
                .password_toggle(true)
                .required(true)
                .variant(InputVariant::Filled),
        ];

        Self {
            config,
            table,
            fields,
            focus: 0,
            selected,
            email,
            should_quit: false,
            page_size: 10,
        }
    }

    fn email_field(email: &Rc<RefCell<String>>) -> InputField {
        let reader = Rc::clone(email);
        let writer = Rc::clone(email);
        InputField::controlled(move || reader.borrow().clone())
            .label("Email")
            .input_type(InputType::Email)
            .placeholder("you@example.com")
            .error_message("Enter a valid email address")
            .clearable(true)
            .on_change(move |change: &ValueChange| {
                *writer.borrow_mut() = change.value.clone();
            })
    }

    pub fn focus_target(&self) -> FocusTarget {
        if self.focus == 0 { FocusTarget::Table } else { FocusTarget::Field }
    }

    pub fn focused_field(&self) -> Option<&InputField> {
        self.focus.checked_sub(1).and_then(|i| self.fields.get(i))
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            0 => self.fields.len(),
            n => n - 1,
        };
    }

    /// Handle a key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match InputHandler::route(key, self.focus_target()) {
            Routed::Global(GlobalAction::Quit) => self.should_quit = true,
            Routed::Global(GlobalAction::FocusNext) => self.focus_next(),
            Routed::Global(GlobalAction::FocusPrev) => self.focus_prev(),
            Routed::Global(GlobalAction::Remount) => {
                info!("table remounted");
                self.table.remount();
            }
            Routed::Global(GlobalAction::None) | Routed::Ignored => {}
            Routed::Table(action) => {
                self.table.handle_action(action, self.page_size);
            }
            Routed::Field(action) => {
                if let Some(field) = self.focus.checked_sub(1).and_then(|i| self.fields.get_mut(i)) {
                    field.handle_action(action);
                }
                self.validate_email();
            }
        }
        self.should_quit
    }

    fn validate_email(&mut self) {
        let valid = is_valid_email(&self.email.borrow());
        self.fields[EMAIL_FIELD].set_invalid(!valid);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let form_height: u16 = self.fields.iter().map(InputFieldWidget::height).sum();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(form_height + 2),
                Constraint::Length(1),
            ])
            .split(area);

        self.page_size = chunks[0].height.saturating_sub(3).max(1) as usize;
        self.render_table(frame, chunks[0]);
        self.render_form(frame, chunks[1]);
        frame.render_widget(self.status_line(), chunks[2]);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == 0 { theme::ACCENT } else { theme::MUTED };
        let block = Block::default()
            .title(" Records ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let widget = DataTableWidget::new(&self.table).block(block).focused(self.focus == 0);
        frame.render_widget(widget, area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus > 0 { theme::ACCENT } else { theme::MUTED };
        let block = Block::default()
            .title(" Profile ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|f| Constraint::Length(InputFieldWidget::height(f)))
            .collect();
        let slots = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, (field, slot)) in self.fields.iter().zip(slots.iter()).enumerate() {
            let widget = InputFieldWidget::new(field).focused(self.focus == i + 1);
            frame.render_widget(widget, *slot);
        }
    }

    fn status_line(&self) -> Line<'static> {
        let key_style = Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::Gray);
        let mut spans = vec![Span::styled(
            format!(" {} selected ", self.selected.borrow().len()),
            Style::default().fg(Color::Black).bg(Color::Blue),
        )];

        let hints: &[(&str, &str)] = match self.focus_target() {
            FocusTarget::Table => &[
                ("j/k", "move"),
                ("h/l", "column"),
                ("s", "sort"),
                ("Space", "select"),
                ("a", "all"),
                ("Tab", "form"),
                ("q", "quit"),
            ],
            FocusTarget::Field => &[("C-u", "clear"), ("C-s", "show pwd"), ("Tab", "next"), ("C-c", "quit")],
        };
        for (key, desc) in hints {
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(format!(" {}", desc), hint_style));
        }
        Line::from(spans)
    }

    pub fn name(&self) -> String {
        self.fields[NAME_FIELD].value().into_owned()
    }
}
