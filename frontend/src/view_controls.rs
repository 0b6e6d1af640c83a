//! Status filter, traffic sort toggle, and the overview line above the list.

use futures::StreamExt;
use shared::{SnapshotOverview, SnapshotState, StatusFilter};
use zoon::*;

use crate::dataflow::{Actor, Relay, relay};
use crate::snapshot_source::SnapshotSource;
use crate::theme::*;
use crate::utils::format_bytes;

#[derive(Clone)]
pub struct ViewControls {
    pub status_filter_actor: Actor<StatusFilter>,
    pub traffic_sort_actor: Actor<bool>,

    pub status_filter_clicked_relay: Relay<StatusFilter>,
    pub traffic_sort_toggled_relay: Relay<()>,
}

impl ViewControls {
    pub fn new() -> Self {
        let (status_filter_clicked_relay, mut status_filter_clicked_stream) = relay::<StatusFilter>();
        let (traffic_sort_toggled_relay, mut traffic_sort_toggled_stream) = relay::<()>();

        let status_filter_actor = Actor::new(StatusFilter::default(), async move |state| {
            while let Some(filter) = status_filter_clicked_stream.next().await {
                state.set_neq(filter);
            }
        });

        let traffic_sort_actor = Actor::new(false, async move |state| {
            while traffic_sort_toggled_stream.next().await.is_some() {
                state.update(|sort_by_traffic| !sort_by_traffic);
            }
        });

        Self {
            status_filter_actor,
            traffic_sort_actor,
            status_filter_clicked_relay,
            traffic_sort_toggled_relay,
        }
    }
}

pub fn view_controls_bar(view_controls: &ViewControls, snapshot_source: &SnapshotSource) -> impl Element {
    Row::new()
        .s(Gap::new().x(SPACING_8))
        .s(Padding::new().x(SPACING_16).y(SPACING_8))
        .s(Align::new().center_y())
        .items(StatusFilter::ALL.map(|filter| status_filter_button(filter, view_controls)))
        .item(traffic_sort_button(view_controls))
        .item(El::new().s(Width::fill()))
        .item(overview_text(snapshot_source))
}

fn status_filter_button(filter: StatusFilter, view_controls: &ViewControls) -> impl Element {
    let status_filter_clicked_relay = view_controls.status_filter_clicked_relay.clone();
    let is_selected = view_controls
        .status_filter_actor
        .signal()
        .map(move |current| current == filter);

    Button::new()
        .s(Padding::new().x(SPACING_12).y(SPACING_4))
        .s(RoundedCorners::all(4))
        .s(Background::new().color_signal(is_selected.map_bool(|| ACCENT, || SURFACE)))
        .s(Font::new().size(13).color(TEXT))
        .label(filter.as_str())
        .on_press(move || status_filter_clicked_relay.send(filter))
}

fn traffic_sort_button(view_controls: &ViewControls) -> impl Element {
    let traffic_sort_toggled_relay = view_controls.traffic_sort_toggled_relay.clone();

    Button::new()
        .s(Padding::new().x(SPACING_12).y(SPACING_4))
        .s(RoundedCorners::all(4))
        .s(Background::new().color_signal(
            view_controls
                .traffic_sort_actor
                .signal()
                .map_bool(|| ACCENT, || SURFACE),
        ))
        .s(Font::new().size(13).color(TEXT))
        .label("sort by traffic")
        .on_press(move || traffic_sort_toggled_relay.send(()))
}

fn overview_text(snapshot_source: &SnapshotSource) -> impl Element {
    El::new()
        .s(Font::new().size(13).color(TEXT_MUTED))
        .child_signal(
            snapshot_source
                .snapshot_actor
                .signal_ref(|snapshot| overview_line(snapshot))
                .map(|line| line.map(Text::new)),
        )
}

fn overview_line(snapshot: &SnapshotState) -> Option<String> {
    let overview = SnapshotOverview::from_servers(snapshot.servers()?);
    Some(format!(
        "{} servers, {} online, {} offline, ↓ {} ↑ {}",
        overview.total,
        overview.online,
        overview.offline,
        format_bytes(overview.net_in_transfer),
        format_bytes(overview.net_out_transfer),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ServerRecord, ServerStatus};

    #[test]
    fn overview_line_needs_a_snapshot() {
        assert_eq!(overview_line(&SnapshotState::Loading), None);
        assert_eq!(overview_line(&SnapshotState::Failed("timeout".into())), None);
        assert_eq!(overview_line(&SnapshotState::Ready(None)), None);
    }

    #[test]
    fn overview_line_counts_servers() {
        let servers = vec![
            ServerRecord {
                id: 1,
                online_status: true,
                status: ServerStatus {
                    net_in_transfer: 1024,
                    ..ServerStatus::default()
                },
                ..ServerRecord::default()
            },
            ServerRecord {
                id: 2,
                ..ServerRecord::default()
            },
        ];

        assert_eq!(
            overview_line(&SnapshotState::Ready(Some(servers))).as_deref(),
            Some("2 servers, 1 online, 1 offline, ↓ 1.00 KiB ↑ 0 B")
        );
    }
}
