//! Full command flows over a temporary data directory and a `file://`
//! plugin directory.

use std::path::Path;

use kpm_cli::commands::ResolveArgs;
use kpm_cli::config_commands::{ConfigCommand, SetSettingsArgs};
use kpm_cli::{CliConfig, IdentifiersCommand, bootstrap, exit_code_for, handlers};
use kpm_core::{Coordinate, IdentifierBackend};

const DIRECTORY: &str = r"
:stripe:
  :type: :java
  :versions:
    :0.22: 4.0.1
    :0.24: 8.0.0
:email-notifications:
  :type: :java
  :artifact_id: killbill-email-notifications-plugin
  :versions:
    :0.24: 0.7.2
";

fn config(data_dir: &Path) -> CliConfig {
    let catalog = data_dir.join("plugins_directory.yml");
    std::fs::write(&catalog, DIRECTORY).unwrap();
    CliConfig {
        data_dir: Some(data_dir.to_path_buf()),
        catalog_url: Some(format!("file://{}", catalog.display())),
    }
}

fn resolve_args(key: &str, host: &str) -> ResolveArgs {
    ResolveArgs {
        plugin_key: key.to_string(),
        host_version: Some(host.to_string()),
        artifact_id: None,
        version: None,
        force: false,
        json: false,
        save: true,
    }
}

#[tokio::test]
async fn resolve_and_save_to_sqlite_ledger() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = bootstrap(config(tmp.path())).await.unwrap();

    handlers::resolve::execute(&ctx, resolve_args("email-notifications", "0.24.3"))
        .await
        .unwrap();

    let stored = ctx.identifiers().get("email-notifications").await.unwrap();
    assert_eq!(
        stored.coordinate(),
        Coordinate::new("killbill-email-notifications-plugin", "0.7.2")
    );
    assert!(!ctx.paths().identifiers_file.exists());
}

#[tokio::test]
async fn saved_identifier_wins_over_newer_catalog_line() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = bootstrap(config(tmp.path())).await.unwrap();

    handlers::resolve::execute(&ctx, resolve_args("stripe", "0.22.0"))
        .await
        .unwrap();

    // A different host line, but the ledger answers first
    let mut again = resolve_args("stripe", "0.24.0");
    again.save = false;
    handlers::resolve::execute(&ctx, again).await.unwrap();

    let stored = ctx.identifiers().get("stripe").await.unwrap();
    assert_eq!(stored.version.as_deref(), Some("4.0.1"));
}

#[tokio::test]
async fn json_backend_writes_ledger_file() {
    let tmp = tempfile::tempdir().unwrap();
    let first = bootstrap(config(tmp.path())).await.unwrap();
    handlers::config::execute(
        &first,
        ConfigCommand::Set(SetSettingsArgs {
            identifier_backend: Some(IdentifierBackend::Json),
            ..SetSettingsArgs::default()
        }),
    )
    .await
    .unwrap();
    drop(first);

    let ctx = bootstrap(config(tmp.path())).await.unwrap();
    handlers::resolve::execute(&ctx, resolve_args("stripe", "0.24.1"))
        .await
        .unwrap();

    let ledger = std::fs::read_to_string(&ctx.paths().identifiers_file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&ledger).unwrap();
    assert_eq!(parsed["stripe"]["artifact_id"], "stripe-plugin");
    assert_eq!(parsed["stripe"]["version"], "8.0.0");

    handlers::identifiers::execute(
        &ctx,
        IdentifiersCommand::Remove {
            plugin_key: "stripe".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(ctx.identifiers().list_identifiers().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_plugin_exits_with_code_3() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = bootstrap(config(tmp.path())).await.unwrap();

    let err = handlers::resolve::execute(&ctx, resolve_args("ghost", "0.24.0"))
        .await
        .unwrap_err();

    assert_eq!(exit_code_for(&err), 3);
    assert!(ctx.identifiers().list_identifiers().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_catalog_file_fails_forced_resolution() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config(tmp.path());
    cfg.catalog_url = Some(format!(
        "file://{}",
        tmp.path().join("missing.yml").display()
    ));
    let ctx = bootstrap(cfg).await.unwrap();

    let mut forced = resolve_args("stripe", "0.24.0");
    forced.force = true;
    let err = handlers::resolve::execute(&ctx, forced).await.unwrap_err();

    assert_eq!(exit_code_for(&err), 69);
}
