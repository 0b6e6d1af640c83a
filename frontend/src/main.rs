//! Server status dashboard entry point

use std::sync::OnceLock;
use zoon::*;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

mod app;
mod config;
mod connection;
mod dataflow;
mod navigation;
mod server_card;
mod server_list;
mod session_store;
mod snapshot_source;
mod tag_selector;
mod theme;
mod utils;
mod view_controls;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::DashboardApp::new().await;
        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
