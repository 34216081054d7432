//! Collaborator tests — settings store, local filesystem, workspace entity.

use serde_json::json;
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Settings store
// ─────────────────────────────────────────────────────────────────────────────

mod settings {
    use super::*;
    use chainbench_services::{JsonSettingsStore, SettingsStore};

    fn open(dir: &TempDir) -> JsonSettingsStore {
        let ws = dir.path().join("ws");
        JsonSettingsStore::open(&ws, &ws.join("chaindata")).unwrap()
    }

    #[test]
    fn open_without_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        assert!(store.values().is_empty());
        assert_eq!(store.get("name"), None);
        assert!(!store.get_bool("isDefault"));
    }

    #[test]
    fn bootstrap_creates_directories_and_defaults() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.bootstrap().unwrap();

        assert!(dir.path().join("ws").is_dir());
        assert!(dir.path().join("ws/chaindata").is_dir());
        assert!(dir.path().join("ws/Settings").is_file());
        assert_eq!(store.get_str("flavor").as_deref(), Some("ethereum"));
        assert_eq!(store.get("server.port"), Some(json!(7545)));
        assert!(store.get_str("uuid").is_some());
        assert_eq!(store.get("name"), None);
    }

    #[test]
    fn bootstrap_keeps_existing_values() {
        let dir = TempDir::new().unwrap();
        let ws = dir.path().join("ws");
        std::fs::create_dir_all(&ws).unwrap();
        std::fs::write(
            ws.join("Settings"),
            json!({
                "name": "My Chain",
                "flavor": "corda",
                "uuid": "fixed",
                "server": { "port": 9000 },
            })
            .to_string(),
        )
        .unwrap();

        let mut store = JsonSettingsStore::open(&ws, &ws.join("chaindata")).unwrap();
        store.bootstrap().unwrap();

        assert_eq!(store.get_str("name").as_deref(), Some("My Chain"));
        assert_eq!(store.get_str("flavor").as_deref(), Some("corda"));
        assert_eq!(store.get_str("uuid").as_deref(), Some("fixed"));
        assert_eq!(store.get("server.port"), Some(json!(9000)));
        // Nested defaults are filled in beside existing keys
        assert_eq!(store.get("server.network_id"), Some(json!(5777)));
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.bootstrap().unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();

        let mut again = open(&dir);
        again.bootstrap().unwrap();
        let second = std::fs::read_to_string(again.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_file_is_reset_on_bootstrap() {
        let dir = TempDir::new().unwrap();
        let ws = dir.path().join("ws");
        std::fs::create_dir_all(&ws).unwrap();
        std::fs::write(ws.join("Settings"), "{ not json").unwrap();

        let mut store = JsonSettingsStore::open(&ws, &ws.join("chaindata")).unwrap();
        assert!(store.values().is_empty());
        store.bootstrap().unwrap();

        let content = std::fs::read_to_string(ws.join("Settings")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["flavor"], "ethereum");
    }

    #[test]
    fn non_object_file_is_treated_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let ws = dir.path().join("ws");
        std::fs::create_dir_all(&ws).unwrap();
        std::fs::write(ws.join("Settings"), "[1, 2, 3]").unwrap();

        let store = JsonSettingsStore::open(&ws, &ws.join("chaindata")).unwrap();
        assert!(store.values().is_empty());
    }

    #[test]
    fn set_dotted_key_and_save() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.bootstrap().unwrap();
        store.set("server.hostname", json!("0.0.0.0"));
        store.set("isDefault", json!(true));
        store.save().unwrap();

        let reopened = open(&dir);
        assert_eq!(reopened.get_str("server.hostname").as_deref(), Some("0.0.0.0"));
        assert_eq!(reopened.get("server.port"), Some(json!(7545)));
        assert!(reopened.get_bool("isDefault"));
    }

    #[test]
    fn set_replaces_scalar_with_object() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.set("a", json!(1));
        store.set("a.b", json!(2));
        assert_eq!(store.get("a"), Some(json!({ "b": 2 })));
    }

    #[test]
    fn get_bool_requires_literal_true() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.set("isDefault", json!("true"));
        assert!(!store.get_bool("isDefault"));
        store.set("isDefault", json!(1));
        assert!(!store.get_bool("isDefault"));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Local filesystem
// ─────────────────────────────────────────────────────────────────────────────

mod local_fs {
    use super::*;
    use chainbench_services::{LocalFs, WorkspaceFs};

    #[test]
    fn read_dir_reports_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("b-dir")).unwrap();
        std::fs::write(dir.path().join("a-file"), "x").unwrap();

        let entries = LocalFs.read_dir(dir.path()).unwrap();
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.name.to_string_lossy().to_string(), e.is_dir))
            .collect();
        assert_eq!(
            summary,
            vec![("a-file".to_string(), false), ("b-dir".to_string(), true)]
        );
    }

    #[test]
    fn read_dir_missing_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(LocalFs.read_dir(&dir.path().join("missing")).is_err());
        assert!(!LocalFs.exists(&dir.path().join("missing")));
    }

    #[test]
    fn rename_moves_directory() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("old");
        std::fs::create_dir_all(from.join("chaindata")).unwrap();

        LocalFs.rename(&from, &dir.path().join("new")).unwrap();
        assert!(!from.exists());
        assert!(dir.path().join("new/chaindata").is_dir());
    }

    #[test]
    fn rename_refuses_existing_target() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("old");
        let to = dir.path().join("new");
        std::fs::create_dir(&from).unwrap();
        std::fs::create_dir(&to).unwrap();

        let err = LocalFs.rename(&from, &to).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert!(from.is_dir());
    }

    #[test]
    fn remove_dir_all_removes_tree() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("gone");
        std::fs::create_dir_all(target.join("chaindata")).unwrap();
        LocalFs.remove_dir_all(&target).unwrap();
        assert!(!target.exists());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Workspace entity
// ─────────────────────────────────────────────────────────────────────────────

mod workspace {
    use super::*;
    use chainbench_protocol::{Flavor, WorkspaceError};
    use chainbench_services::{SettingsStore, Workspace};

    #[test]
    fn sanitized_name_replaces_whitespace_and_drops_symbols() {
        assert_eq!(Workspace::sanitized_name("My Chain"), "My-Chain");
        assert_eq!(Workspace::sanitized_name("a\tb  c"), "a-b--c");
        assert_eq!(Workspace::sanitized_name("dev/net:1"), "devnet1");
        assert_eq!(Workspace::sanitized_name("v1.0_final-x"), "v1.0_final-x");
        assert_eq!(Workspace::sanitized_name("ünï"), "n");
    }

    #[test]
    fn directory_name_rejects_empty_and_dot_names() {
        assert_eq!(Workspace::directory_name("My Chain").as_deref(), Some("My-Chain"));
        assert_eq!(Workspace::directory_name("!!!"), None);
        assert_eq!(Workspace::directory_name(".."), None);
        assert_eq!(Workspace::directory_name("."), None);
    }

    #[test]
    fn directories_follow_layout() {
        let named = Workspace::new(Some("My Chain".into()), "/data", Some(Flavor::Corda));
        assert_eq!(named.directory(), std::path::Path::new("/data/workspaces/My-Chain"));
        assert_eq!(
            named.chaindata_directory(),
            std::path::PathBuf::from("/data/workspaces/My-Chain/chaindata")
        );

        let eth = Workspace::new(None, "/data", Some(Flavor::Ethereum));
        assert_eq!(eth.directory(), std::path::Path::new("/data/default"));
        let corda = Workspace::new(None, "/data", Some(Flavor::Corda));
        assert_eq!(corda.directory(), std::path::Path::new("/data/default_corda"));
    }

    #[test]
    fn bootstrap_default_marks_settings() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::new(None, dir.path(), Some(Flavor::Corda));
        assert!(ws.settings().is_none());
        ws.bootstrap().unwrap();

        let settings = ws.settings().unwrap();
        assert!(settings.get_bool("isDefault"));
        assert_eq!(settings.get_str("flavor").as_deref(), Some("corda"));
        assert!(dir.path().join("default_corda/chaindata").is_dir());
    }

    #[test]
    fn bootstrap_named_records_name() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::new(Some("Alpha Net".into()), dir.path(), Some(Flavor::Ethereum));
        ws.bootstrap().unwrap();

        let settings = ws.settings().unwrap();
        assert_eq!(settings.get_str("name").as_deref(), Some("Alpha Net"));
        assert!(!settings.get_bool("isDefault"));
        assert!(dir.path().join("workspaces/Alpha-Net/Settings").is_file());
    }

    #[test]
    fn bootstrap_named_corda_keeps_flavor() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::new(Some("Zed".into()), dir.path(), Some(Flavor::Corda));
        ws.bootstrap().unwrap();

        assert_eq!(ws.settings().unwrap().get_str("flavor").as_deref(), Some("corda"));
        let raw = std::fs::read_to_string(dir.path().join("workspaces/Zed/Settings")).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved["flavor"], "corda");
        assert_eq!(saved["name"], "Zed");
    }

    #[test]
    fn bootstrap_named_keeps_stored_flavor() {
        let dir = TempDir::new().unwrap();
        let ws_dir = dir.path().join("workspaces/Zed");
        std::fs::create_dir_all(&ws_dir).unwrap();
        std::fs::write(
            ws_dir.join("Settings"),
            json!({ "name": "Zed", "flavor": "ethereum" }).to_string(),
        )
        .unwrap();

        let mut ws = Workspace::new(Some("Zed".into()), dir.path(), Some(Flavor::Corda));
        ws.bootstrap().unwrap();
        assert_eq!(ws.settings().unwrap().get_str("flavor").as_deref(), Some("ethereum"));
    }

    #[test]
    fn bootstrap_rejects_unusable_name() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::new(Some("???".into()), dir.path(), None);
        let err = ws.bootstrap().unwrap_err();
        assert!(matches!(err, WorkspaceError::Bootstrap { ref name, .. } if name == "???"));
    }

    #[test]
    fn bootstrap_fails_when_directory_is_a_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("default"), "not a directory").unwrap();
        let mut ws = Workspace::new(None, dir.path(), Some(Flavor::Ethereum));
        let err = ws.bootstrap().unwrap_err();
        assert!(matches!(err, WorkspaceError::Io { .. }));
    }
}
