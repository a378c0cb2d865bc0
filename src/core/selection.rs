use thiserror::Error;

pub const MIN_SELECTION_CHARS: usize = 10;
pub const MAX_SELECTION_CHARS: usize = 5000;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least 10 characters of text to simplify.")]
    TooShort,

    #[error("Please select less than 5000 characters. Try selecting a smaller section.")]
    TooLong,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::TooShort => "Selection Too Short",
            ValidationError::TooLong => "Selection Too Long",
        }
    }
}

/// 檢查選取文字長度（以字元計）。不修改輸入，也不會 panic。
pub fn validate_selection(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() < MIN_SELECTION_CHARS {
        return Err(ValidationError::TooShort);
    }
    if text.chars().count() > MAX_SELECTION_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}
