//! Input Handler
//!
//! Routes key events to the application or the focused widget.

use crossterm::event::{KeyEvent, KeyEventKind};

use super::keymap::{field_action, global_action, table_action, FieldAction, GlobalAction, TableAction};

/// Which kind of widget currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Table,
    Field,
}

/// Where a key event ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Global(GlobalAction),
    Table(TableAction),
    Field(FieldAction),
    Ignored,
}

pub struct InputHandler;

impl InputHandler {
    pub fn route(key: KeyEvent, focus: FocusTarget) -> Routed {
        if key.kind != KeyEventKind::Press {
            return Routed::Ignored;
        }

        let global = global_action(key, focus == FocusTarget::Field);
        if global != GlobalAction::None {
            return Routed::Global(global);
        }

        match focus {
            FocusTarget::Table => match table_action(key) {
                TableAction::None => Routed::Ignored,
                action => Routed::Table(action),
            },
            FocusTarget::Field => match field_action(key) {
                FieldAction::None => Routed::Ignored,
                action => Routed::Field(action),
            },
        }
    }
}
