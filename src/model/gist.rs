use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

fn is_false(v: &bool) -> bool {
    !*v
}

fn null_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// One remote gist as returned by the list and detail endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    pub html_url: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(rename = "public")]
    pub is_public: bool,

    pub created_at: String,
    pub updated_at: String,

    /// Keyed by filename. The API returns files in filename order, so the
    /// first entry is the primary file.
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistFile {
    pub filename: String,

    #[serde(rename = "type", default)]
    pub file_type: String,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub raw_url: String,

    #[serde(default)]
    pub size: u64,

    /// Absent until the detail endpoint has been fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub truncated: bool,
}

impl Gist {
    pub fn primary_file(&self) -> Option<&GistFile> {
        self.files.values().next()
    }

    /// True when the primary file has no content loaded yet.
    pub fn needs_detail(&self) -> bool {
        self.primary_file().is_some_and(|f| f.content.is_none())
    }

    pub fn title(&self) -> &str {
        if self.description.is_empty() {
            "Untitled Gist"
        } else {
            &self.description
        }
    }

    /// Case-insensitive substring match over the description and filenames.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.description.to_lowercase().contains(&term)
            || self.files.keys().any(|f| f.to_lowercase().contains(&term))
    }

    /// All files rendered as one text blob, each prefixed with a
    /// `// <filename>` header line.
    pub fn combined_content(&self) -> String {
        self.files
            .values()
            .map(|f| format!("// {}\n{}", f.filename, f.content.as_deref().unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Body of `POST /gists`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewGist {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, FileContent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
}

/// Body of `PATCH /gists/{id}`. Omitted fields are left unchanged remotely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GistPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<BTreeMap<String, FilePatch>>,
}

/// One entry of a patch's `files` map. `filename` is set only for a rename,
/// in which case the map key is the old name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub content: String,
}

impl FilePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            filename: None,
            content: content.into(),
        }
    }
}

impl GistPatch {
    pub fn description(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
            files: None,
        }
    }

    pub fn files(files: BTreeMap<String, FilePatch>) -> Self {
        Self {
            description: None,
            files: Some(files),
        }
    }
}
