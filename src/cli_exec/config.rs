use gistdeck::model::AppConfig;

use crate::cli_commands::config::ConfigArgs;

use super::*;

/// Applies any setters to `cfg`. Returns whether something changed.
fn apply_settings(cfg: &mut AppConfig, args: &ConfigArgs) -> bool {
    let before = cfg.clone();
    if let Some(url) = &args.api_base_url {
        cfg.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(v) = &args.api_version {
        cfg.api_version = v.clone();
    }
    if let Some(ms) = args.settle_delay_ms {
        cfg.settle_delay_ms = ms;
    }
    if let Some(ua) = &args.user_agent {
        cfg.user_agent = ua.clone();
    }
    *cfg != before
}

pub(super) fn handle_config_command(opts: &GlobalOpts, args: ConfigArgs) -> Result<()> {
    let store = opts.ctx.store.as_ref();
    // Read from disk so the global --api-url override is never persisted.
    let mut cfg = store.read_config()?;
    if apply_settings(&mut cfg, &args) {
        let Some(root) = store.root() else {
            anyhow::bail!("--ephemeral runs keep no config.json to update");
        };
        store.write_config(&cfg)?;
        tracing::info!(state_dir = %root.display(), "config updated");
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&cfg).context("serialize config json")?
        );
        return Ok(());
    }
    println!("api_base_url: {}", cfg.api_base_url);
    println!("api_version: {}", cfg.api_version);
    println!("settle_delay_ms: {}", cfg.settle_delay_ms);
    println!("user_agent: {}", cfg.user_agent);
    Ok(())
}
