use futures::StreamExt;
use shared::ViewConfig;

use crate::dataflow::{Actor, Relay, relay};

/// View configuration served by the backend.
///
/// Starts from [`ViewConfig::default`] and switches to the backend's values
/// once `DownMsg::ViewConfigLoaded` arrives. Consumers observe it through
/// `view_config_actor.signal()`, so a changed poll interval takes effect
/// without a reload.
#[derive(Clone)]
pub struct AppConfig {
    pub view_config_actor: Actor<ViewConfig>,

    /// Backend answered `UpMsg::LoadViewConfig`
    pub config_loaded_relay: Relay<ViewConfig>,
}

impl AppConfig {
    pub fn new() -> Self {
        let (config_loaded_relay, mut config_loaded_stream) = relay::<ViewConfig>();

        let view_config_actor = Actor::new(ViewConfig::default(), async move |state| {
            while let Some(config) = config_loaded_stream.next().await {
                zoon::println!(
                    "⚙️ CONFIG: polling {} every {} ms, tag selector {}",
                    config.snapshot_url,
                    config.refresh_interval_ms,
                    if config.show_tag { "shown" } else { "hidden" },
                );
                state.set_neq(config);
            }
        });

        Self {
            view_config_actor,
            config_loaded_relay,
        }
    }
}
