//! Field Module
//!
//! Labeled text input with validation display, clear and password toggle.

pub mod state;
pub mod style;
pub mod value;
pub mod widget;

// Re-exports
pub use state::{FieldAccessibility, FieldMessage, InputField, InputType};
pub use style::{FieldStyle, InputSize, InputVariant};
pub use value::{ChangeCallback, ChangeOrigin, FieldValue, ValueAccessor, ValueChange};
pub use widget::InputFieldWidget;
