//! Error values accepted by field renderers

/// A field error as handed to a renderer: either a bare message or a
/// structured error carrying one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorInput {
    Str(String),
    Structured { message: String },
}

impl FieldErrorInput {
    /// Reduce either form to the string shown under the field
    pub fn display_message(&self) -> &str {
        match self {
            Self::Str(msg) => msg,
            Self::Structured { message } => message,
        }
    }

    pub fn structured(message: impl Into<String>) -> Self {
        Self::Structured {
            message: message.into(),
        }
    }
}

impl From<&str> for FieldErrorInput {
    fn from(msg: &str) -> Self {
        Self::Str(msg.to_string())
    }
}

impl From<String> for FieldErrorInput {
    fn from(msg: String) -> Self {
        Self::Str(msg)
    }
}

/// Display string for an optional error; empty strings count as no error
pub fn error_display(error: Option<&FieldErrorInput>) -> Option<&str> {
    error
        .map(FieldErrorInput::display_message)
        .filter(|msg| !msg.is_empty())
}
