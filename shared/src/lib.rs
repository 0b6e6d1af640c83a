use serde::{Deserialize, Serialize};

pub mod config;
pub mod filter;
pub mod navigation;
pub mod reconcile;
pub mod server;
pub mod snapshot;
pub mod view_state;

pub use config::{ConfigError, ViewConfig};
pub use filter::{StatusFilter, TagSelection, ViewFilter};
pub use navigation::{NavigationCoordinator, ScrollContainer, ViewPhase};
pub use reconcile::{ListModel, Reconciled, TagSummary, list_model, reconcile};
pub use server::{ServerApi, ServerRecord, ServerStatus, SnapshotOverview};
pub use snapshot::{SnapshotFeed, SnapshotState};
pub use view_state::{KeyValueStore, MemoryStore, StoreError, ViewStateStore};

// ===== MESSAGE TYPES =====

#[derive(Serialize, Deserialize, Debug)]
pub enum UpMsg {
    LoadViewConfig,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum DownMsg {
    /// Always usable: file problems fall back to defaults on the backend.
    ViewConfigLoaded(ViewConfig),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_msg_carries_config_over_json() {
        let config = ViewConfig {
            show_tag: true,
            ..ViewConfig::default()
        };
        let encoded = serde_json::to_string(&DownMsg::ViewConfigLoaded(config.clone())).unwrap();

        let DownMsg::ViewConfigLoaded(decoded) = serde_json::from_str::<DownMsg>(&encoded).unwrap();
        assert_eq!(decoded, config);
    }
}
