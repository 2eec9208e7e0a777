//! Route table loading and hot reload.

use std::fs;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use dashboard_router::config::watcher::ConfigWatcher;
use dashboard_router::config::{load_config, ConfigError, RouterConfig};
use dashboard_router::host::MemoryHost;

mod common;

const INITIAL: &str = r#"
mount_node = "content"

[[routes]]
pattern = "/"
view = "index"
name = "index"
default = true

[[routes]]
pattern = "sites"
view = "sites_list"
name = "sites"

[fallback]
view = "not_found"
"#;

const RELOADED: &str = r#"
mount_node = "main"

[[routes]]
pattern = "crawls/:id"
view = "job"
name = "job"

[[routes]]
pattern = "sites"
view = "index"
name = "sites"

[fallback]
view = "not_found"
"#;

#[test]
fn test_reload_rebuilds_dispatcher_and_remounts() {
    let path = common::scratch_file("reload");
    fs::write(&path, INITIAL).unwrap();

    let config = load_config(&path).unwrap();
    let mut host = MemoryHost::with_node(&config.mount_node, "/sites");
    let mut dispatcher = config.build_dispatcher().unwrap();
    assert_eq!(
        dispatcher.start(&mut host, &config.mount_node).unwrap().view(),
        "sites_list"
    );

    fs::write(&path, RELOADED).unwrap();
    let reloaded = load_config(&path).unwrap();
    let _ = fs::remove_file(&path);

    dispatcher.stop(&mut host).unwrap();
    host.document.add_node(reloaded.mount_node.as_str());
    let mut dispatcher = reloaded.build_dispatcher().unwrap();
    let mounted = dispatcher.start(&mut host, &reloaded.mount_node).unwrap();

    assert_eq!(mounted.view(), "index");
    assert_eq!(host.document.mounted_view("content"), None);
    assert_eq!(host.document.mounted_view("main"), Some("index"));

    let mounted = dispatcher.navigate(&mut host, "/crawls/9").unwrap();
    assert_eq!(mounted.view(), "job");
    assert_eq!(mounted.params().get("id"), Some("9"));
}

#[test]
fn test_invalid_file_is_rejected_with_every_problem() {
    let path = common::scratch_file("invalid");
    fs::write(
        &path,
        r#"
            mount_node = ""
            [[routes]]
            pattern = "job/:id"
            view = "job"
            name = "job"
            [[routes]]
            pattern = "job/:other"
            view = "job"
            name = "job"
        "#,
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    let _ = fs::remove_file(&path);

    match err {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation errors, got {other}"),
    }
}

#[tokio::test]
async fn test_watcher_delivers_reloaded_config() {
    let path = common::scratch_file("watch");
    fs::write(&path, INITIAL).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    fs::write(&path, RELOADED).unwrap();

    let received = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(config) = updates.recv().await {
            if config.mount_node == "main" {
                return Some(config);
            }
        }
        None
    })
    .await;
    let _ = fs::remove_file(&path);

    let config = received
        .expect("no reload within timeout")
        .expect("watcher channel closed");
    assert_eq!(config.routes.len(), 2);
}

/// Wait for a reload whose mount node is `wanted`.
async fn next_mount_node(
    updates: &mut UnboundedReceiver<RouterConfig>,
    wanted: &str,
) -> bool {
    tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(config) = updates.recv().await {
            if config.mount_node == wanted {
                return true;
            }
        }
        false
    })
    .await
    .unwrap_or(false)
}

#[tokio::test]
async fn test_watcher_survives_repeated_atomic_saves() {
    let path = common::scratch_file("atomic");
    let tmp = path.with_extension("toml.tmp");
    fs::write(&path, INITIAL).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Write-then-rename replaces the inode on every save.
    let mut delivered = Vec::new();
    for node in ["second", "third"] {
        fs::write(&tmp, RELOADED.replace("\"main\"", &format!("\"{node}\""))).unwrap();
        fs::rename(&tmp, &path).unwrap();
        delivered.push(next_mount_node(&mut updates, node).await);
    }
    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(&tmp);

    assert_eq!(delivered, [true, true]);
}
