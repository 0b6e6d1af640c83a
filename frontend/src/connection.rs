use futures::stream::StreamExt;
use shared::{DownMsg, UpMsg};
use zoon::*;

use crate::config::AppConfig;
use crate::dataflow::Actor;

/// Actor+Relay compatible Connection adapter
pub struct ConnectionAdapter {
    connection: Connection<UpMsg, DownMsg>,
}

impl ConnectionAdapter {
    pub fn new() -> (Self, impl futures::stream::Stream<Item = DownMsg>) {
        let (message_sender, message_stream) = futures::channel::mpsc::unbounded();

        let connection = Connection::new(move |down_msg, _| {
            let _ = message_sender.unbounded_send(down_msg);
        });

        (ConnectionAdapter { connection }, message_stream)
    }

    pub async fn send_up_msg(&self, up_msg: UpMsg) {
        if let Err(error) = self.connection.send_up_msg(up_msg).await {
            zoon::eprintln!("🔌 CONNECTION: failed to send message: {:?}", error);
        }
    }
}

/// Routes every DownMsg to the domain that owns it.
pub fn create_connection_message_handler(app_config: &AppConfig) -> (ConnectionAdapter, Actor<()>) {
    let (connection_adapter, mut down_msg_stream) = ConnectionAdapter::new();
    let app_config = app_config.clone();

    let message_handler = Actor::new((), async move |_state| {
        while let Some(down_msg) = down_msg_stream.next().await {
            handle_down_msg(down_msg, &app_config);
        }
    });

    (connection_adapter, message_handler)
}

fn handle_down_msg(down_msg: DownMsg, app_config: &AppConfig) {
    match down_msg {
        DownMsg::ViewConfigLoaded(config) => {
            app_config.config_loaded_relay.send(config);
        }
    }
}
