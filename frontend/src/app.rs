//! DashboardApp - owns every domain of the server status page

use std::sync::Arc;
use zoon::*;

use shared::UpMsg;

use crate::config::AppConfig;
use crate::connection::{ConnectionAdapter, create_connection_message_handler};
use crate::dataflow::Actor;
use crate::server_list::{ServerList, server_list_view};
use crate::snapshot_source::SnapshotSource;
use crate::theme::*;
use crate::view_controls::{ViewControls, view_controls_bar};

#[derive(Clone)]
pub struct DashboardApp {
    /// View configuration served by the backend
    pub config: AppConfig,

    /// Backend communication (Arc for cloning)
    pub connection: Arc<ConnectionAdapter>,
    _message_handler: Actor<()>,

    /// Polled server snapshots
    pub snapshot_source: SnapshotSource,

    /// Status filter and traffic sort
    pub view_controls: ViewControls,

    /// Tag selection, scroll restoration, the list itself
    pub server_list: ServerList,
}

impl DashboardApp {
    pub async fn new() -> Self {
        let config = AppConfig::new();
        let (connection, message_handler) = create_connection_message_handler(&config);

        connection.send_up_msg(UpMsg::LoadViewConfig).await;

        let snapshot_source = SnapshotSource::new(&config);
        let view_controls = ViewControls::new();
        let server_list = ServerList::new();

        Self {
            config,
            connection: Arc::new(connection),
            _message_handler: message_handler,
            snapshot_source,
            view_controls,
            server_list,
        }
    }

    /// Root UI element. Holds a clone of the app, so polling and the
    /// navigation state live exactly as long as the page does.
    pub fn root(&self) -> impl Element {
        Column::new()
            .s(Height::screen())
            .s(Width::fill())
            .s(Background::new().color(BACKGROUND))
            .s(Font::new().color(TEXT).family([
                FontFamily::new("Inter"),
                FontFamily::new("system-ui"),
                FontFamily::new("Segoe UI"),
                FontFamily::new("Arial"),
                FontFamily::SansSerif,
            ]))
            .after_remove({
                let app = self.clone();
                move |_| drop(app)
            })
            .item(view_controls_bar(&self.view_controls, &self.snapshot_source))
            .item(server_list_view(
                &self.server_list,
                &self.snapshot_source,
                &self.view_controls,
                &self.config,
            ))
    }
}
