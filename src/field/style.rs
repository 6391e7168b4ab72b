//! Field Style
//!
//! Composes the field's look from its variant, size and state flags.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputVariant {
    Filled,
    #[default]
    Outlined,
    Ghost,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl InputSize {
    /// Horizontal padding inside the input, in cells
    pub fn padding(&self) -> u16 {
        match self {
            Self::Sm => 0,
            Self::Md => 1,
            Self::Lg => 2,
        }
    }
}

/// Resolved styles for one render of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStyle {
    /// Border style; `None` draws the input without a frame
    pub border: Option<Style>,
    pub text: Style,
    pub padding: u16,
    /// Show a progress marker
    pub busy: bool,
}

impl FieldStyle {
    pub fn compose(variant: InputVariant, size: InputSize, invalid: bool, loading: bool, focused: bool) -> Self {
        let focus_color = if focused { Color::Blue } else { Color::Gray };

        let (border, mut text) = match variant {
            InputVariant::Filled => (None, Style::default().fg(Color::White).bg(theme::hex_color(0x2E3440))),
            InputVariant::Outlined => (Some(Style::default().fg(focus_color)), Style::default().fg(Color::White)),
            InputVariant::Ghost => (None, Style::default().fg(Color::White)),
        };

        if size == InputSize::Lg {
            text = text.add_modifier(Modifier::BOLD);
        }

        let border = match border {
            Some(_) if invalid => Some(Style::default().fg(theme::ERROR)),
            other => other,
        };
        if invalid && border.is_none() {
            text = text.fg(theme::ERROR).add_modifier(Modifier::UNDERLINED);
        }

        if loading {
            text = text.add_modifier(Modifier::DIM);
        }

        Self {
            border,
            text,
            padding: size.padding(),
            busy: loading,
        }
    }

    /// Rows the input line occupies
    pub fn height(&self) -> u16 {
        if self.border.is_some() { 3 } else { 1 }
    }
}
