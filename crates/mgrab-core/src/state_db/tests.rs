//! Tests for the state store (use the in-memory DB helper from db).

use crate::classify::ResourceCategory;
use crate::filter::FilterConfig;
use crate::registry::CapturedResource;
use crate::state_db::db::open_memory;
use crate::state_db::PersistedState;

fn resource(url: &str) -> CapturedResource {
    CapturedResource {
        url: url.to_string(),
        category: ResourceCategory::Image,
        format: "png".to_string(),
        size: 2048,
        timestamp: 1_700_000_000_000,
        status_code: 200,
        method: "GET".to_string(),
        content_type: "image/png".to_string(),
    }
}

#[tokio::test]
async fn kv_put_get_replace() {
    let db = open_memory().await.unwrap();
    assert!(db.get("missing").await.unwrap().is_none());

    db.put("k", &serde_json::json!({"a": 1})).await.unwrap();
    assert_eq!(
        db.get("k").await.unwrap().unwrap(),
        serde_json::json!({"a": 1})
    );

    db.put("k", &serde_json::json!(2)).await.unwrap();
    assert_eq!(db.get("k").await.unwrap().unwrap(), serde_json::json!(2));
}

#[tokio::test]
async fn state_roundtrip() {
    let db = open_memory().await.unwrap();

    let mut filters = FilterConfig::default();
    filters.resource_types.push(ResourceCategory::Video);

    let state = PersistedState {
        active: true,
        context: Some(42),
        filters: filters.clone(),
        resources: vec![resource("https://a.b/1.png"), resource("https://a.b/2.png")],
    };
    db.save_state(&state).await.unwrap();

    let loaded = db.load_state().await.unwrap();
    assert!(loaded.active);
    assert_eq!(loaded.context, Some(42));
    assert_eq!(loaded.filters, filters);
    assert_eq!(loaded.resources.len(), 2);
    assert_eq!(loaded.resources[0].url, "https://a.b/1.png");
}

#[tokio::test]
async fn empty_db_loads_defaults() {
    let db = open_memory().await.unwrap();
    let loaded = db.load_state().await.unwrap();
    assert!(!loaded.active);
    assert_eq!(loaded.context, None);
    assert_eq!(loaded.filters, FilterConfig::default());
    assert!(loaded.resources.is_empty());
}

#[tokio::test]
async fn panel_mode_defaults_to_side_panel() {
    let db = open_memory().await.unwrap();
    assert!(db.load_panel_mode().await.unwrap());

    db.save_panel_mode(false).await.unwrap();
    assert!(!db.load_panel_mode().await.unwrap());
}

#[tokio::test]
async fn open_at_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state dir").join("state.db");

    {
        let db = crate::state_db::StateDb::open_at(&path).await.unwrap();
        db.save_panel_mode(false).await.unwrap();
    }

    let db = crate::state_db::StateDb::open_at(&path).await.unwrap();
    assert!(!db.load_panel_mode().await.unwrap());
}
