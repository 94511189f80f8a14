use super::{Input, TextArea};

pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) input: Input,
    pub(in crate::tui_shell) editor: TextArea,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ModalKind {
    Viewer,
    ConfirmAction {
        action: ConfirmAction,
    },
    TextInput {
        prompt: String,
        action: TextInputAction,
    },
    Editor {
        target: EditorTarget,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ConfirmAction {
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum TextInputAction {
    Search,
    Description,
    Rename,
    NewFileName,
    CreateDescription,
    CreateVisibility,
    CreateFilename,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EditorTarget {
    FileContent { filename: String },
    NewFileContent,
    CreateFileContent { filename: String },
}
