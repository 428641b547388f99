//! End-to-end CRUD over a disk-backed document.

use std::sync::Arc;

use cfd_settings::{
    FileStore, SearchRequest, Settings, SettingsError, TunnelRepository, TunnelRule,
    TunnelRuleFields, TunnelRuleValidator,
};

#[tokio::test]
async fn crud_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let id = {
        let repo = TunnelRepository::new(FileStore::new(&path), TunnelRuleValidator);
        repo.add(
            &TunnelRuleFields::new("app.example.com", "https").with_url("http://127.0.0.1:8080"),
        )
        .await
        .unwrap()
    };

    // A fresh store handle over the same file sees the record
    let repo = TunnelRepository::new(FileStore::new(&path), TunnelRuleValidator);
    let rule = repo.get(id).await.unwrap();
    assert_eq!(rule.hostname, "app.example.com");

    repo.delete(id).await.unwrap();
    assert!(matches!(
        repo.get(id).await,
        Err(SettingsError::NotFound { .. })
    ));
}

#[tokio::test]
async fn settings_and_rules_share_one_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("config.json")));

    let settings = Settings::new(store.clone());
    let repo = TunnelRepository::new(store.clone(), TunnelRuleValidator);

    let mut general = settings.general().await.unwrap();
    general.enabled = true;
    settings.set_general(general).await.unwrap();

    repo.add(&TunnelRuleFields::new("a.example.com", "http"))
        .await
        .unwrap();

    // Neither write clobbered the other section
    assert!(settings.is_enabled().await.unwrap());
    let result = repo
        .search(&SearchRequest::matching(
            "a.example",
            &TunnelRule::SEARCH_FIELDS,
        ))
        .await
        .unwrap();
    assert_eq!(result.total, 1);
}
