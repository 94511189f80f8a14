use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gistdeck::collection::{CreateDraft, DraftFile};
use gistdeck::editing::ItemEditor;
use gistdeck::model::Gist;

use super::*;

fn visibility(g: &Gist) -> &'static str {
    if g.is_public { "public" } else { "secret" }
}

/// An editor over `id` with detail content loaded. Records missing from the
/// list are fetched directly.
fn open_editor(opts: &GlobalOpts, state: &CollectionState, id: &str) -> Result<ItemEditor> {
    let gateway = opts.ctx.gateway.as_ref();
    let record = match state.find(id) {
        Some(g) => Arc::clone(g),
        None => Arc::new(
            gateway
                .get_detail(state.token(), id)
                .with_context(|| format!("fetch gist {}", id))?,
        ),
    };
    let mut editor = ItemEditor::new(record, state.token());
    editor
        .load_detail(gateway)
        .with_context(|| format!("load gist {}", id))?;
    Ok(editor)
}

pub(super) fn handle_list_command(
    opts: &GlobalOpts,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let mut state = require_session(opts)?;
    if let Some(term) = search.as_deref() {
        state.set_search(term);
    }
    let visible = state.visible();

    if json {
        let records: Vec<&Gist> = visible.iter().map(|g| g.as_ref()).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("serialize gists json")?
        );
        return Ok(());
    }

    if visible.is_empty() {
        println!("No gists found");
        return Ok(());
    }
    for g in visible {
        println!(
            "{} {:<6} {:>2} files  {}  {}",
            g.id,
            visibility(g),
            g.files.len(),
            g.updated_at,
            g.title()
        );
    }
    Ok(())
}

pub(super) fn handle_show_command(opts: &GlobalOpts, id: &str, raw: bool, json: bool) -> Result<()> {
    let state = require_session(opts)?;
    let editor = open_editor(opts, &state, id)?;
    let g = editor.record();

    if raw {
        println!("{}", g.combined_content());
        return Ok(());
    }
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(g).context("serialize gist json")?
        );
        return Ok(());
    }

    println!("{}", g.title());
    println!("id: {}", g.id);
    println!("visibility: {}", visibility(g));
    println!("created: {}", g.created_at);
    println!("updated: {}", g.updated_at);
    println!("url: {}", g.html_url);
    for f in g.files.values() {
        println!();
        let lang = f.language.as_deref().unwrap_or("text");
        if f.truncated {
            println!("== {} ({}, {} bytes, truncated)", f.filename, lang, f.size);
        } else {
            println!("== {} ({}, {} bytes)", f.filename, lang, f.size);
        }
        println!("{}", f.content.as_deref().unwrap_or(""));
    }
    Ok(())
}

fn draft_file(path: &Path) -> Result<DraftFile> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("no usable file name in {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(DraftFile::new(filename, content))
}

pub(super) fn handle_create_command(
    opts: &GlobalOpts,
    files: Vec<PathBuf>,
    description: String,
    public: bool,
    json: bool,
) -> Result<()> {
    let draft = CreateDraft {
        description,
        public,
        files: files
            .iter()
            .map(|p| draft_file(p))
            .collect::<Result<Vec<_>>>()?,
    };
    if draft.valid_files().is_empty() {
        anyhow::bail!("nothing to create: pass at least one non-empty --file");
    }
    let mut state = require_session(opts)?;
    let created = state
        .create_record(opts.ctx.gateway.as_ref(), &draft)
        .context("create gist")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(created.as_ref()).context("serialize gist json")?
        );
        return Ok(());
    }
    println!("Created {} gist {}", visibility(&created), created.id);
    println!("{}", created.html_url);
    Ok(())
}

pub(super) fn handle_describe_command(opts: &GlobalOpts, id: &str, description: &str) -> Result<()> {
    let mut state = require_session(opts)?;
    state
        .update_description(opts.ctx.gateway.as_ref(), id, description)
        .with_context(|| format!("update description of {}", id))?;
    println!("Updated description of {}", id);
    Ok(())
}

pub(super) fn handle_delete_command(opts: &GlobalOpts, id: &str, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to delete {} without --yes", id);
    }
    let mut state = require_session(opts)?;
    state
        .delete_record(opts.ctx.gateway.as_ref(), id)
        .with_context(|| format!("delete {}", id))?;
    println!("Deleted {}", id);
    Ok(())
}

pub(super) fn handle_put_command(
    opts: &GlobalOpts,
    id: &str,
    filename: &str,
    from: Option<PathBuf>,
) -> Result<()> {
    let content = match from {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            buf
        }
    };

    let state = require_session(opts)?;
    let mut editor = open_editor(opts, &state, id)?;
    let gateway = opts.ctx.gateway.as_ref();
    let saved = if editor.record().files.contains_key(filename) {
        editor
            .save_content(gateway, filename, &content)
            .with_context(|| format!("save {}", filename))?
    } else if editor.record().files.is_empty() {
        editor
            .add_file(gateway, filename, &content)
            .with_context(|| format!("add {}", filename))?
    } else {
        anyhow::bail!(
            "gist {} has no file named {} (new files can only be added to an empty gist)",
            id,
            filename
        );
    };
    println!("Saved {} in {}", filename, saved.id);
    Ok(())
}

pub(super) fn handle_rename_command(opts: &GlobalOpts, id: &str, from: &str, to: &str) -> Result<()> {
    let state = require_session(opts)?;
    let mut editor = open_editor(opts, &state, id)?;
    if !editor.record().files.contains_key(from) {
        anyhow::bail!("gist {} has no file named {}", id, from);
    }
    editor
        .rename_file(opts.ctx.gateway.as_ref(), from, to)
        .with_context(|| format!("rename {} to {}", from, to))?;
    println!("Renamed {} to {} in {}", from, to, id);
    Ok(())
}
