//! The server list view and the state that survives navigation.
//!
//! `selected_tag_actor` owns a [`NavigationCoordinator`] backed by
//! `sessionStorage`. Mounting restores the last tag and scroll offset,
//! history navigation back to the page restores the offset again, and every
//! tag change persists both before the new tag is shown.

use futures::{StreamExt, select};
use shared::{
    ListModel, NavigationCoordinator, Reconciled, ScrollContainer, TagSelection, ViewFilter,
    list_model,
};
use zoon::*;

use crate::config::AppConfig;
use crate::dataflow::{Actor, Relay, relay};
use crate::navigation::{DomScrollContainer, NavigationSubscription, SERVER_LIST_CONTAINER, navigate_to};
use crate::server_card::server_card;
use crate::session_store::SessionStore;
use crate::snapshot_source::SnapshotSource;
use crate::tag_selector::tag_selector;
use crate::theme::*;
use crate::view_controls::ViewControls;

const FETCH_ERROR_HINT: &str = "The status endpoint could not be reached. Retrying on the next refresh.";

#[derive(Clone)]
pub struct ServerList {
    pub selected_tag_actor: Actor<TagSelection>,

    pub tag_clicked_relay: Relay<TagSelection>,
    pub view_mounted_relay: Relay<()>,
    pub history_navigated_relay: Relay<()>,
    pub list_attached_relay: Relay<()>,
    pub view_unmounted_relay: Relay<()>,
}

impl ServerList {
    pub fn new() -> Self {
        let (tag_clicked_relay, tag_clicked_stream) = relay::<TagSelection>();
        let (view_mounted_relay, view_mounted_stream) = relay::<()>();
        let (history_navigated_relay, history_navigated_stream) = relay::<()>();
        let (list_attached_relay, list_attached_stream) = relay::<()>();
        let (view_unmounted_relay, view_unmounted_stream) = relay::<()>();

        let selected_tag_actor = Actor::new(TagSelection::All, async move |state| {
            let mut coordinator = NavigationCoordinator::new(SessionStore);
            let mut tag_clicked = tag_clicked_stream.fuse();
            let mut view_mounted = view_mounted_stream.fuse();
            let mut history_navigated = history_navigated_stream.fuse();
            let mut list_attached = list_attached_stream.fuse();
            let mut view_unmounted = view_unmounted_stream.fuse();

            loop {
                select! {
                    event = view_mounted.next() => {
                        match event {
                            Some(()) => {
                                if let Some(tag) = with_scroll_container(|container| coordinator.mount(container)) {
                                    zoon::println!("🧭 NAVIGATION: restored tag {:?}", tag);
                                    state.set_neq(tag);
                                }
                            }
                            None => break,
                        }
                    }
                    event = history_navigated.next() => {
                        match event {
                            Some(()) => with_scroll_container(|container| coordinator.view_activated(container)),
                            None => break,
                        }
                    }
                    event = list_attached.next() => {
                        match event {
                            Some(()) => with_scroll_container(|container| coordinator.content_attached(container)),
                            None => break,
                        }
                    }
                    event = tag_clicked.next() => {
                        match event {
                            Some(tag) => {
                                if with_scroll_container(|container| coordinator.tag_changed(&tag, container)) {
                                    state.set_neq(tag);
                                }
                            }
                            None => break,
                        }
                    }
                    event = view_unmounted.next() => {
                        match event {
                            Some(()) => coordinator.teardown(),
                            None => break,
                        }
                    }
                    complete => break,
                }
            }
        });

        Self {
            selected_tag_actor,
            tag_clicked_relay,
            view_mounted_relay,
            history_navigated_relay,
            list_attached_relay,
            view_unmounted_relay,
        }
    }
}

/// Looks the container up for one synchronous step; DOM handles never live
/// across an await of the actor loop.
fn with_scroll_container<R>(f: impl FnOnce(Option<&dyn ScrollContainer>) -> R) -> R {
    let container = DomScrollContainer::find();
    f(container.as_ref().map(|container| container as &dyn ScrollContainer))
}

fn list_model_signal(
    server_list: &ServerList,
    snapshot_source: &SnapshotSource,
    view_controls: &ViewControls,
) -> impl Signal<Item = ListModel> + use<> {
    map_ref! {
        let snapshot = snapshot_source.snapshot_actor.signal(),
        let status = view_controls.status_filter_actor.signal(),
        let sort_by_traffic = view_controls.traffic_sort_actor.signal(),
        let tag = server_list.selected_tag_actor.signal() => {
            let filter = ViewFilter {
                status: *status,
                tag: tag.clone(),
                sort_by_traffic: *sort_by_traffic,
            };
            list_model(snapshot, &filter)
        }
    }
}

pub fn server_list_view(
    server_list: &ServerList,
    snapshot_source: &SnapshotSource,
    view_controls: &ViewControls,
    app_config: &AppConfig,
) -> impl Element {
    let navigation = NavigationSubscription::new();

    Column::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Gap::new().y(SPACING_8))
        .s(Padding::new().x(SPACING_16).bottom(SPACING_16))
        .after_insert({
            let navigation = navigation.clone();
            let history_navigated_relay = server_list.history_navigated_relay.clone();
            let view_mounted_relay = server_list.view_mounted_relay.clone();
            move |_| {
                navigation.start(&history_navigated_relay);
                view_mounted_relay.send(());
            }
        })
        .after_remove({
            let view_unmounted_relay = server_list.view_unmounted_relay.clone();
            move |_| {
                navigation.stop();
                view_unmounted_relay.send(());
            }
        })
        .item(toolbar(server_list, snapshot_source, view_controls, app_config))
        .item(scroll_container(server_list, snapshot_source, view_controls))
}

/// Global view button and tag selector, only while there is data to show.
fn toolbar(
    server_list: &ServerList,
    snapshot_source: &SnapshotSource,
    view_controls: &ViewControls,
    app_config: &AppConfig,
) -> impl Element {
    let tag_clicked_relay = server_list.tag_clicked_relay.clone();

    El::new().child_signal(map_ref! {
        let model = list_model_signal(server_list, snapshot_source, view_controls),
        let selected = server_list.selected_tag_actor.signal(),
        let config = app_config.view_config_actor.signal() => {
            match model {
                ListModel::Ready(reconciled) => Some(
                    Row::new()
                        .s(Gap::new().x(SPACING_8))
                        .s(Align::new().top())
                        .item(global_view_button(config.global_view_url.clone()))
                        .item(config.show_tag.then(|| {
                            tag_selector(&reconciled.tags, selected, &tag_clicked_relay)
                        })),
                ),
                ListModel::Loading | ListModel::Failed(_) => None,
            }
        }
    })
}

fn global_view_button(url: String) -> impl Element {
    Button::new()
        .s(Padding::new().x(SPACING_8).y(SPACING_4))
        .s(RoundedCorners::all(4))
        .s(Background::new().color(SURFACE))
        .s(Font::new().size(14))
        .update_raw_el(|raw_el| raw_el.attr("title", "Global view"))
        .label("🌏")
        .on_press(move || navigate_to(&url))
}

/// Stays mounted across polls so the browser keeps its scroll offset; only
/// the content inside it is replaced.
fn scroll_container(
    server_list: &ServerList,
    snapshot_source: &SnapshotSource,
    view_controls: &ViewControls,
) -> impl Element {
    let list_attached_relay = server_list.list_attached_relay.clone();

    El::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Scrollbars::y_and_clip_x())
        .update_raw_el(|raw_el| {
            raw_el
                .attr("data-scroll-container", SERVER_LIST_CONTAINER)
                .style("scrollbar-width", "thin")
        })
        .child_signal(
            list_model_signal(server_list, snapshot_source, view_controls).map(move |model| {
                match model {
                    ListModel::Loading => None,
                    ListModel::Failed(error) => Some(fetch_error(&error).unify()),
                    ListModel::Ready(reconciled) => {
                        Some(server_cards(reconciled, list_attached_relay.clone()).unify())
                    }
                }
            }),
        )
}

fn server_cards(reconciled: Reconciled, list_attached_relay: Relay<()>) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_8))
        .after_insert(move |_| list_attached_relay.send(()))
        .items(reconciled.servers.into_iter().map(server_card))
}

fn fetch_error(error: &str) -> impl Element {
    Column::new()
        .s(Gap::new().y(SPACING_4))
        .s(Padding::all(SPACING_16))
        .item(
            El::new()
                .s(Font::new().size(14).weight(FontWeight::SemiBold).color(OFFLINE))
                .child(Text::new(error)),
        )
        .item(
            El::new()
                .s(Font::new().size(13).color(TEXT_MUTED))
                .child(Text::new(FETCH_ERROR_HINT)),
        )
}
