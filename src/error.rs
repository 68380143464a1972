use thiserror::Error;

/// Rejections raised while turning user text into actions, moods or
/// driver commands. The pet itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("unknown mood: {0}")]
    UnknownMood(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("command `{0}` needs an argument")]
    MissingArgument(String),

    #[error("invalid repeat count: {0}")]
    InvalidCount(String),

    #[error("unexpected trailing input: {0}")]
    TrailingInput(String),
}
