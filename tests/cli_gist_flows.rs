mod common;

use anyhow::{Context, Result};

use common::{GOOD_TOKEN, gistdeck_ok, run_gistdeck, spawn_server};

fn status_json(state: &std::path::Path, base_url: &str) -> Result<serde_json::Value> {
    let out = gistdeck_ok(state, base_url, &["status", "--json"])?;
    serde_json::from_str(&out).context("parse status json")
}

#[test]
fn login_persists_token_and_logout_clears_it() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;

    let out = gistdeck_ok(state.path(), &server.base_url, &["login", GOOD_TOKEN])?;
    assert!(out.contains("Logged in (3 gists)"));
    assert!(state.path().join("cookies.json").exists());

    let status = status_json(state.path(), &server.base_url)?;
    assert_eq!(status["mode"], "authenticated");
    assert_eq!(status["source"], "stored");
    assert_eq!(status["stored_token"], true);
    assert_eq!(status["gists"], 3);

    gistdeck_ok(state.path(), &server.base_url, &["logout"])?;
    let status = status_json(state.path(), &server.base_url)?;
    assert_eq!(status["mode"], "awaiting-credential");
    assert_eq!(status["stored_token"], false);
    Ok(())
}

#[test]
fn rejected_login_stores_nothing() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;

    let out = run_gistdeck(state.path(), &server.base_url, &["login", "ghp_bad"])?;
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Please check your token"));

    let status = status_json(state.path(), &server.base_url)?;
    assert_eq!(status["stored_token"], false);
    Ok(())
}

#[test]
fn commands_without_a_session_explain_how_to_log_in() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;

    let out = run_gistdeck(state.path(), &server.base_url, &["list"])?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not logged in"));
    assert!(server.requests().is_empty());
    Ok(())
}

#[test]
fn token_flag_is_never_written() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;

    let out = gistdeck_ok(
        state.path(),
        &server.base_url,
        &["--token", GOOD_TOKEN, "list", "--search", "shell"],
    )?;
    assert!(out.contains("g1"));
    assert!(!out.contains("g2"));
    assert!(!state.path().join("cookies.json").exists());
    Ok(())
}

#[test]
fn show_loads_detail_content() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;
    gistdeck_ok(state.path(), &server.base_url, &["login", GOOD_TOKEN])?;

    let raw = gistdeck_ok(state.path(), &server.base_url, &["show", "g1", "--raw"])?;
    assert_eq!(raw, "// a.txt\nalpha\n\n// c.txt\ngamma\n");

    let text = gistdeck_ok(state.path(), &server.base_url, &["show", "g2"])?;
    assert!(text.starts_with("Untitled Gist\n"));
    assert!(text.contains("visibility: secret"));
    assert!(text.contains("# notes"));
    Ok(())
}

#[test]
fn put_describe_and_rename_update_the_remote_gist() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;
    gistdeck_ok(state.path(), &server.base_url, &["login", GOOD_TOKEN])?;

    let src = state.path().join("new-alpha.txt");
    std::fs::write(&src, "ALPHA").context("write source file")?;
    let src_arg = src.to_string_lossy().to_string();
    gistdeck_ok(
        state.path(),
        &server.base_url,
        &["put", "g1", "a.txt", "--from", &src_arg],
    )?;
    let g1 = server.gist("g1").context("g1 exists")?;
    assert_eq!(g1["files"]["a.txt"]["content"], "ALPHA");

    gistdeck_ok(state.path(), &server.base_url, &["describe", "g1", "Better tricks"])?;
    assert_eq!(server.gist("g1").context("g1")?["description"], "Better tricks");

    gistdeck_ok(state.path(), &server.base_url, &["mv", "g1", "a.txt", "b.txt"])?;
    let g1 = server.gist("g1").context("g1")?;
    assert!(g1["files"].get("a.txt").is_none());
    assert_eq!(g1["files"]["b.txt"]["content"], "ALPHA");
    assert_eq!(g1["files"]["c.txt"]["content"], "gamma");

    let out = run_gistdeck(state.path(), &server.base_url, &["mv", "g1", "b.txt", "c.txt"])?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    Ok(())
}

#[test]
fn put_adds_a_file_only_to_an_empty_gist() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;
    gistdeck_ok(state.path(), &server.base_url, &["login", GOOD_TOKEN])?;
    let src = state.path().join("body.txt");
    std::fs::write(&src, "first").context("write source file")?;
    let src_arg = src.to_string_lossy().to_string();

    gistdeck_ok(
        state.path(),
        &server.base_url,
        &["put", "g3", "first.txt", "--from", &src_arg],
    )?;
    assert_eq!(
        server.gist("g3").context("g3")?["files"]["first.txt"]["content"],
        "first"
    );

    let out = run_gistdeck(
        state.path(),
        &server.base_url,
        &["put", "g2", "other.txt", "--from", &src_arg],
    )?;
    assert!(!out.status.success());
    assert!(server.gist("g2").context("g2")?["files"].get("other.txt").is_none());
    Ok(())
}

#[test]
fn create_and_delete_round_trip() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;
    gistdeck_ok(state.path(), &server.base_url, &["login", GOOD_TOKEN])?;

    let out = run_gistdeck(state.path(), &server.base_url, &["create", "-d", "nothing"])?;
    assert!(!out.status.success());
    assert!(server.requests_with("POST").is_empty());

    let src = state.path().join("hello.rs");
    std::fs::write(&src, "fn main() {}").context("write source file")?;
    let src_arg = src.to_string_lossy().to_string();
    let out = gistdeck_ok(
        state.path(),
        &server.base_url,
        &["create", "-d", "Hello", "--file", &src_arg, "--json"],
    )?;
    let created: serde_json::Value = serde_json::from_str(&out).context("parse create json")?;
    let id = created["id"].as_str().context("created id")?.to_string();
    assert_eq!(created["public"], false);
    assert!(created["files"].get("hello.rs").is_some());

    let out = run_gistdeck(state.path(), &server.base_url, &["delete", &id])?;
    assert!(!out.status.success());
    assert!(server.requests_with("DELETE").is_empty());

    gistdeck_ok(state.path(), &server.base_url, &["delete", &id, "--yes"])?;
    assert!(server.gist(&id).is_none());
    Ok(())
}

#[test]
fn create_without_usable_files_makes_no_request() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;
    gistdeck_ok(state.path(), &server.base_url, &["login", GOOD_TOKEN])?;
    let before = server.requests().len();

    let out = run_gistdeck(state.path(), &server.base_url, &["create", "-d", "nothing"])?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nothing to create"));

    let blank = state.path().join("blank.txt");
    std::fs::write(&blank, "").context("write blank file")?;
    let blank_arg = blank.to_string_lossy().to_string();
    let out = run_gistdeck(state.path(), &server.base_url, &["create", "--file", &blank_arg])?;
    assert!(!out.status.success());

    assert_eq!(server.requests().len(), before);
    Ok(())
}

#[test]
fn ephemeral_session_leaves_state_dir_empty() -> Result<()> {
    let server = spawn_server()?;
    let state = tempfile::tempdir().context("create state dir")?;

    let out = gistdeck_ok(
        state.path(),
        &server.base_url,
        &["--ephemeral", "login", GOOD_TOKEN],
    )?;
    assert!(out.contains("Ephemeral session"));
    let entries = std::fs::read_dir(state.path())
        .context("read state dir")?
        .count();
    assert_eq!(entries, 0);
    Ok(())
}

#[test]
fn config_updates_persist_without_the_api_url_override() -> Result<()> {
    let state = tempfile::tempdir().context("create state dir")?;
    let override_url = "http://127.0.0.1:9";

    let out = gistdeck_ok(
        state.path(),
        override_url,
        &[
            "config",
            "--api-base-url",
            "https://gists.example.test/",
            "--settle-delay-ms",
            "0",
            "--json",
        ],
    )?;
    let shown: serde_json::Value = serde_json::from_str(&out).context("parse config json")?;
    assert_eq!(shown["api_base_url"], "https://gists.example.test");
    assert_eq!(shown["settle_delay_ms"], 0);

    let raw = std::fs::read_to_string(state.path().join("config.json")).context("read config")?;
    let on_disk: serde_json::Value = serde_json::from_str(&raw).context("parse config.json")?;
    assert_eq!(on_disk, shown);
    assert!(!raw.contains(override_url));

    let out = gistdeck_ok(state.path(), override_url, &["config"])?;
    assert!(out.contains("settle_delay_ms: 0"));

    let out = run_gistdeck(
        state.path(),
        override_url,
        &["--ephemeral", "config", "--user-agent", "other"],
    )?;
    assert!(!out.status.success());
    assert!(!std::fs::read_to_string(state.path().join("config.json"))?.contains("other"));
    Ok(())
}
