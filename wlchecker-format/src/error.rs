#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Split limit must be at least 2 UTF-16 units, got {0}")]
    InvalidLimit(usize),

    #[error("Entity ceiling must be at least 1")]
    InvalidEntityCeiling,

    #[error("Delimiter markers must not be empty")]
    EmptyDelimiter,

    #[error("Entity kind `{0}` cannot be expressed with a delimiter")]
    UnsupportedDelimiterKind(&'static str),

    #[error("Link pattern error: {0}")]
    LinkPattern(#[from] regex::Error),

    #[error("Link pattern needs a label and a url capture group, found {0} groups")]
    LinkPatternGroups(usize),
}

pub type FormatResult<T> = Result<T, FormatError>;
