//! Input Field State
//!
//! Labeled text input with clear and password-visibility affordances.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use super::style::{FieldStyle, InputSize, InputVariant};
use super::value::{ChangeCallback, ChangeOrigin, FieldValue, ValueChange};
use crate::a11y;
use crate::input::FieldAction;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

const MASK_CHAR: char = '•';

/// Semantic type of the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Search,
    Tel,
    Url,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Url => "url",
        }
    }
}

/// Message shown under the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage<'a> {
    Error(&'a str),
    Helper(&'a str),
}

/// Assistive-technology attributes derived from the field's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccessibility<'a> {
    pub id: &'a str,
    pub invalid: bool,
    pub required: bool,
    /// Id of the message the field is described by
    pub described_by: Option<String>,
    pub message: Option<FieldMessage<'a>>,
}

pub struct InputField {
    id: String,
    label: Option<String>,
    placeholder: Option<String>,
    helper_text: Option<String>,
    error_message: Option<String>,
    invalid: bool,
    loading: bool,
    disabled: bool,
    required: bool,
    clearable: bool,
    password_toggle: bool,
    input_type: InputType,
    variant: InputVariant,
    size: InputSize,
    value: FieldValue,
    on_change: Option<ChangeCallback>,
    revealed: bool,
    /// Byte index into the effective value
    cursor: usize,
}

impl Default for InputField {
    fn default() -> Self {
        Self::with_value(FieldValue::default())
    }
}

impl InputField {
    /// Field that owns its value, starting empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Field that owns its value, starting from `default_value`
    pub fn uncontrolled(default_value: impl Into<String>) -> Self {
        Self::with_value(FieldValue::owned(default_value))
    }

    /// Field whose value is read from the caller on every access
    pub fn controlled<F>(accessor: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Self::with_value(FieldValue::controlled(accessor))
    }

    fn with_value(value: FieldValue) -> Self {
        let cursor = value.get().len();
        Self {
            id: format!("input-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            invalid: false,
            loading: false,
            disabled: false,
            required: false,
            clearable: false,
            password_toggle: false,
            input_type: InputType::Text,
            variant: InputVariant::default(),
            size: InputSize::default(),
            value,
            on_change: None,
            revealed: false,
            cursor,
        }
    }

    // ----- Builder -----

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn password_toggle(mut self, password_toggle: bool) -> Self {
        self.password_toggle = password_toggle;
        self
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ValueChange) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    // ----- Caller-driven state -----

    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // ----- Getters -----

    pub fn field_id(&self) -> &str {
        &self.id
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Disabled, either explicitly or while loading
    pub fn is_disabled(&self) -> bool {
        self.disabled || self.loading
    }

    pub fn is_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    pub fn declared_type(&self) -> InputType {
        self.input_type
    }

    /// The effective value
    pub fn value(&self) -> Cow<'_, str> {
        self.value.get()
    }

    pub fn cursor(&self) -> usize {
        clamp_cursor(&self.value(), self.cursor)
    }

    pub fn style(&self, focused: bool) -> FieldStyle {
        FieldStyle::compose(self.variant, self.size, self.invalid, self.loading, focused)
    }

    // ----- Password visibility -----

    /// Whether the show/hide affordance applies
    pub fn has_password_toggle(&self) -> bool {
        self.password_toggle && self.input_type == InputType::Password
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) -> bool {
        if !self.has_password_toggle() {
            return false;
        }
        self.revealed = !self.revealed;
        debug!(id = %self.id, revealed = self.revealed, "password visibility toggled");
        true
    }

    pub fn toggle_label(&self) -> Option<&'static str> {
        self.has_password_toggle()
            .then(|| a11y::password_toggle_label(self.revealed))
    }

    pub fn effective_type(&self) -> InputType {
        match (self.has_password_toggle(), self.revealed) {
            (true, true) => InputType::Text,
            (true, false) => InputType::Password,
            (false, _) => self.input_type,
        }
    }

    pub fn is_masked(&self) -> bool {
        self.effective_type() == InputType::Password
    }

    /// Text drawn in the input; masked values show one dot per character
    pub fn display_value(&self) -> String {
        let value = self.value();
        if self.is_masked() {
            value.chars().map(|_| MASK_CHAR).collect()
        } else {
            value.into_owned()
        }
    }

    // ----- Clear -----

    pub fn can_clear(&self) -> bool {
        self.clearable && !self.value().is_empty()
    }

    pub fn clear_label(&self) -> Option<&'static str> {
        self.can_clear().then_some(a11y::CLEAR_INPUT_LABEL)
    }

    /// Emit an empty value through the normal change path
    pub fn clear(&mut self) -> bool {
        if !self.can_clear() {
            return false;
        }
        self.commit(String::new(), ChangeOrigin::Clear);
        self.cursor = 0;
        true
    }

    // ----- Editing -----

    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.is_editable() {
            return false;
        }
        let value = self.value().into_owned();
        let at = clamp_cursor(&value, self.cursor);
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..at]);
        next.push(c);
        next.push_str(&value[at..]);
        self.commit(next, ChangeOrigin::Edit);
        self.cursor = at + c.len_utf8();
        true
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        let value = self.value().into_owned();
        let at = clamp_cursor(&value, self.cursor);
        let Some(prev) = value[..at].chars().last() else {
            return false;
        };
        let start = at - prev.len_utf8();
        let next = format!("{}{}", &value[..start], &value[at..]);
        self.commit(next, ChangeOrigin::Edit);
        self.cursor = start;
        true
    }

    /// Delete the char under the cursor
    pub fn delete_forward(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        let value = self.value().into_owned();
        let at = clamp_cursor(&value, self.cursor);
        let Some(next_char) = value[at..].chars().next() else {
            return false;
        };
        let next = format!("{}{}", &value[..at], &value[at + next_char.len_utf8()..]);
        self.commit(next, ChangeOrigin::Edit);
        self.cursor = at;
        true
    }

    /// Replace the whole value, as if the user typed it
    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        let value = value.into();
        let len = value.len();
        self.commit(value, ChangeOrigin::Edit);
        self.cursor = len;
        true
    }

    pub fn move_left(&mut self) {
        let value = self.value();
        let at = clamp_cursor(&value, self.cursor);
        let prev = value[..at].chars().last().map_or(0, char::len_utf8);
        self.cursor = at - prev;
    }

    pub fn move_right(&mut self) {
        let value = self.value();
        let at = clamp_cursor(&value, self.cursor);
        let next = value[at..].chars().next().map_or(0, char::len_utf8);
        self.cursor = at + next;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value().len();
    }

    /// Apply a keymap action. Returns true if the value or visibility changed.
    pub fn handle_action(&mut self, action: FieldAction) -> bool {
        if self.is_disabled() {
            return false;
        }
        match action {
            FieldAction::InsertChar(c) => self.insert_char(c),
            FieldAction::Backspace => self.backspace(),
            FieldAction::Delete => self.delete_forward(),
            FieldAction::CursorLeft => {
                self.move_left();
                false
            }
            FieldAction::CursorRight => {
                self.move_right();
                false
            }
            FieldAction::CursorHome => {
                self.move_home();
                false
            }
            FieldAction::CursorEnd => {
                self.move_end();
                false
            }
            FieldAction::Clear => self.clear(),
            FieldAction::ToggleReveal => self.toggle_reveal(),
            FieldAction::None => false,
        }
    }

    // ----- Accessibility -----

    /// Helper text, ignoring an empty string
    fn helper(&self) -> Option<&str> {
        self.helper_text.as_deref().filter(|text| !text.is_empty())
    }

    /// Error text, ignoring an empty string
    fn error(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|text| !text.is_empty())
    }

    pub fn helper_id(&self) -> Option<String> {
        self.helper().map(|_| format!("{}-help", self.id))
    }

    /// Present only when the field is invalid and has an error message
    pub fn error_id(&self) -> Option<String> {
        (self.invalid && self.error().is_some()).then(|| format!("{}-error", self.id))
    }

    /// The error message when invalid, otherwise the helper text
    pub fn message(&self) -> Option<FieldMessage<'_>> {
        match (self.error(), self.helper()) {
            (Some(error), _) if self.invalid => Some(FieldMessage::Error(error)),
            (_, Some(helper)) => Some(FieldMessage::Helper(helper)),
            _ => None,
        }
    }

    pub fn accessibility(&self) -> FieldAccessibility<'_> {
        let message = self.message();
        let described_by = match message {
            Some(FieldMessage::Error(_)) => self.error_id(),
            Some(FieldMessage::Helper(_)) => self.helper_id(),
            None => None,
        };
        FieldAccessibility {
            id: &self.id,
            invalid: self.invalid,
            required: self.required,
            described_by,
            message,
        }
    }

    // ----- Internals -----

    fn is_editable(&self) -> bool {
        !self.is_disabled()
    }

    /// Notify first, then store if the field owns the value
    fn commit(&mut self, value: String, origin: ChangeOrigin) {
        debug!(id = %self.id, origin = ?origin, len = value.chars().count(), "value changed");
        let change = ValueChange { value, origin };
        if let Some(callback) = self.on_change.as_mut() {
            callback(&change);
        }
        self.value.store(&change.value);
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("input_type", &self.input_type)
            .field("value", &self.value)
            .field("invalid", &self.invalid)
            .field("disabled", &self.disabled)
            .field("loading", &self.loading)
            .field("revealed", &self.revealed)
            .finish()
    }
}

fn clamp_cursor(value: &str, cursor: usize) -> usize {
    let mut at = cursor.min(value.len());
    while !value.is_char_boundary(at) {
        at -= 1;
    }
    at
}
