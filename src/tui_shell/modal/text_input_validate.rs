use super::super::TextInputAction;

pub(super) fn allow_empty_text_input(action: &TextInputAction) -> bool {
    matches!(
        action,
        TextInputAction::Search
            | TextInputAction::Description
            | TextInputAction::Rename
            | TextInputAction::CreateDescription
            | TextInputAction::CreateVisibility
            | TextInputAction::CreateFilename
    )
}

pub(super) fn validate_text_input(action: &TextInputAction, raw: &str) -> Result<(), String> {
    match action {
        TextInputAction::CreateVisibility => match raw.to_lowercase().as_str() {
            "" | "y" | "yes" | "n" | "no" | "public" | "secret" => Ok(()),
            _ => Err("answer y (public) or n (secret)".to_string()),
        },
        TextInputAction::Rename | TextInputAction::NewFileName | TextInputAction::CreateFilename => {
            if raw.contains('/') {
                Err("filenames cannot contain '/'".to_string())
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}
