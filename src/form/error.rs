/// Rejection raised when raw JSON offered to the form cannot be parsed.
/// The form keeps its previous state when this is returned.
#[derive(Debug, Clone)]
pub struct DocumentParseError {
    pub message: String,
}

impl std::fmt::Display for DocumentParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid document: {}", self.message)
    }
}

impl std::error::Error for DocumentParseError {}

impl From<serde_json::Error> for DocumentParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
