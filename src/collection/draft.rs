pub(super) const MSG_NO_VALID_FILES: &str =
    "Please add at least one file with both filename and content.";

/// The create form: description, visibility and file rows as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateDraft {
    pub description: String,
    pub public: bool,
    pub files: Vec<DraftFile>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftFile {
    pub filename: String,
    pub content: String,
}

impl DraftFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

impl CreateDraft {
    /// Rows with both a filename and content. A later row with the same
    /// filename replaces an earlier one once the map is built.
    pub fn valid_files(&self) -> Vec<&DraftFile> {
        self.files
            .iter()
            .filter(|f| !f.filename.is_empty() && !f.content.is_empty())
            .collect()
    }
}
