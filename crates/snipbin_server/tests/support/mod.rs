//! Shared integration-test server bootstrap helpers.

use axum_test::multipart::MultipartForm;
use axum_test::TestServer;
use snipbin_server::{create_app, AppState, Config, Database, SnippetStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        retention: Duration::from_secs(3_600),
        max_snippet_size: 1024 * 1024,
        ..Config::default()
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::open(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    TestServer::new(create_app(state)).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    setup_test_server_with(|_| {})
}

pub(crate) fn setup_test_server_with(tweak: impl FnOnce(&mut Config)) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let mut config = test_config_for_db_path(&temp_dir.path().join("db"));
    tweak(&mut config);
    (test_server_for_config(config), temp_dir)
}

pub(crate) fn test_server_for_store(store: Arc<dyn SnippetStore>) -> TestServer {
    let config = Config {
        port: 0,
        ..Config::default()
    };
    TestServer::new(create_app(AppState::with_store(config, store))).expect("server")
}

pub(crate) fn snippet_form(name: Option<&str>, body: Option<&str>, mode: Option<&str>) -> MultipartForm {
    let mut form = MultipartForm::new();
    if let Some(name) = name {
        form = form.add_text("snippetName", name.to_string());
    }
    if let Some(body) = body {
        form = form.add_text("snippetText", body.to_string());
    }
    if let Some(mode) = mode {
        form = form.add_text("mode", mode.to_string());
    }
    form
}
