//! Typed load/save of the mirrored session state over the kv table.

use anyhow::Result;
use serde_json::json;

use super::StateDb;
use crate::filter::FilterConfig;
use crate::registry::CapturedResource;

const KEY_SESSION_ACTIVE: &str = "session_active";
const KEY_SESSION_CONTEXT: &str = "session_context";
const KEY_FILTER_CONFIG: &str = "filter_config";
const KEY_RESOURCE_LIST: &str = "resource_list";
const KEY_PANEL_MODE: &str = "panel_mode";

/// Everything the coordinator mirrors after each mutation. Missing keys load
/// as defaults, so a first run restores into an empty, inactive session.
#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    pub active: bool,
    pub context: Option<i64>,
    pub filters: FilterConfig,
    pub resources: Vec<CapturedResource>,
}

impl StateDb {
    /// Read the full persisted state. Unparseable individual values fall
    /// back to defaults rather than failing the whole restore.
    pub async fn load_state(&self) -> Result<PersistedState> {
        let active = self
            .get(KEY_SESSION_ACTIVE)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let context = self
            .get(KEY_SESSION_CONTEXT)
            .await?
            .and_then(|v| v.as_i64());
        let filters = self
            .get(KEY_FILTER_CONFIG)
            .await?
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let resources = self
            .get(KEY_RESOURCE_LIST)
            .await?
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        Ok(PersistedState {
            active,
            context,
            filters,
            resources,
        })
    }

    /// Mirror the full state. The caller treats failure as non-fatal.
    pub async fn save_state(&self, state: &PersistedState) -> Result<()> {
        self.put(KEY_SESSION_ACTIVE, &json!(state.active)).await?;
        self.put(KEY_SESSION_CONTEXT, &json!(state.context)).await?;
        self.put(KEY_FILTER_CONFIG, &serde_json::to_value(&state.filters)?)
            .await?;
        self.put(KEY_RESOURCE_LIST, &serde_json::to_value(&state.resources)?)
            .await?;
        Ok(())
    }

    /// UI preference passthrough: true = side panel, false = popup window.
    pub async fn save_panel_mode(&self, side_panel: bool) -> Result<()> {
        self.put(KEY_PANEL_MODE, &json!(side_panel)).await
    }

    /// Defaults to side panel when never set.
    pub async fn load_panel_mode(&self) -> Result<bool> {
        Ok(self
            .get(KEY_PANEL_MODE)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(true))
    }
}
