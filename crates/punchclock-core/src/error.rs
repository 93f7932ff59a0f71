use thiserror::Error;

/// Validation errors for core domain types.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid employee id: {0}")]
    InvalidEmployeeId(String),

    #[error("Invalid user name: {0}")]
    InvalidName(String),

    #[error("Template slot must be 0-9, got {slot}")]
    InvalidTemplateSlot { slot: u8 },

    #[error("Prompt index must be 0-54, got {index}")]
    InvalidPromptIndex { index: u8 },

    #[error("Unknown privilege label: {0}")]
    UnknownPrivilegeLabel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
