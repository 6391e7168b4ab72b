//! Field Value
//!
//! Ownership of the field's string value and the change notification type.

use std::borrow::Cow;
use std::fmt;

use zeroize::Zeroizing;

/// Reads the caller's current value
pub type ValueAccessor = Box<dyn Fn() -> String>;

/// Receives every value change before the field applies it
pub type ChangeCallback = Box<dyn FnMut(&ValueChange)>;

/// Where the value lives, decided once when the field is built
pub enum FieldValue {
    /// The caller owns the value; the field only reads it
    Controlled(ValueAccessor),
    /// The field owns the value. Wiped on drop since it may hold a secret.
    Owned(Zeroizing<String>),
}

impl FieldValue {
    pub fn controlled<F>(accessor: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Self::Controlled(Box::new(accessor))
    }

    pub fn owned(initial: impl Into<String>) -> Self {
        Self::Owned(Zeroizing::new(initial.into()))
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled(_))
    }

    pub fn get(&self) -> Cow<'_, str> {
        match self {
            Self::Controlled(accessor) => Cow::Owned(accessor()),
            Self::Owned(value) => Cow::Borrowed(value.as_str()),
        }
    }

    /// Store `value` if the field owns it. Controlled values are left alone.
    pub fn store(&mut self, value: &str) {
        if let Self::Owned(current) = self {
            *current = Zeroizing::new(value.to_string());
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::owned(String::new())
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controlled(_) => f.write_str("Controlled"),
            Self::Owned(value) => write!(f, "Owned({} bytes)", value.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Typing, deleting or a programmatic edit
    Edit,
    /// The clear affordance
    Clear,
}

/// "The value changed to X"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub value: String,
    pub origin: ChangeOrigin,
}
