//! Server list reconciliation
//!
//! Combines one snapshot with the current [`ViewFilter`] into the ordered
//! display list and the tag summary that drives the tag selector. Everything
//! here is pure: identical inputs always give identical outputs.

use indexmap::IndexMap;
use std::cmp::Reverse;

use crate::filter::{TagSelection, ViewFilter};
use crate::server::ServerRecord;
use crate::snapshot::SnapshotState;

/// Distinct tags of the status-filtered servers with their counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSummary {
    /// Status-filtered server count; what the "all tags" entry stands for.
    pub all_count: usize,
    /// Concrete tags in first-seen order.
    pub counts: IndexMap<String, usize>,
}

impl TagSummary {
    /// Selector entries; the first one is always [`TagSelection::All`].
    pub fn entries(&self) -> Vec<TagSelection> {
        std::iter::once(TagSelection::All)
            .chain(self.counts.keys().cloned().map(TagSelection::Tag))
            .collect()
    }

    pub fn count(&self, selection: &TagSelection) -> usize {
        match selection {
            TagSelection::All => self.all_count,
            TagSelection::Tag(tag) => self.counts.get(tag).copied().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
    pub servers: Vec<ServerRecord>,
    pub tags: TagSummary,
}

/// What the list area shows for the latest poll outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ListModel {
    Loading,
    Failed(String),
    Ready(Reconciled),
}

/// `None` when there is no snapshot yet.
pub fn reconcile(snapshot: Option<&[ServerRecord]>, filter: &ViewFilter) -> Option<Reconciled> {
    let snapshot = snapshot?;

    let status_filtered: Vec<&ServerRecord> = sort_by_priority(snapshot)
        .into_iter()
        .filter(|server| filter.status.matches(server))
        .collect();

    let tags = summarize_tags(&status_filtered);

    let mut servers: Vec<ServerRecord> = status_filtered
        .into_iter()
        .filter(|server| filter.tag.matches(server))
        .cloned()
        .collect();

    if filter.sort_by_traffic {
        sort_by_traffic(&mut servers);
    }

    Some(Reconciled { servers, tags })
}

pub fn list_model(snapshot: &SnapshotState, filter: &ViewFilter) -> ListModel {
    match snapshot {
        SnapshotState::Failed(error) => ListModel::Failed(error.clone()),
        SnapshotState::Loading => ListModel::Loading,
        SnapshotState::Ready(servers) => match reconcile(servers.as_deref(), filter) {
            Some(reconciled) => ListModel::Ready(reconciled),
            None => ListModel::Loading,
        },
    }
}

/// `display_index` descending, then `id` ascending. Ids are unique, so the
/// order is total.
pub fn sort_by_priority(servers: &[ServerRecord]) -> Vec<&ServerRecord> {
    let mut sorted: Vec<&ServerRecord> = servers.iter().collect();
    sorted.sort_by_key(|server| (Reverse(server.display_index()), server.id));
    sorted
}

pub fn summarize_tags(servers: &[&ServerRecord]) -> TagSummary {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for tag in servers.iter().filter_map(|server| server.tag()) {
        *counts.entry(tag.to_string()).or_default() += 1;
    }
    TagSummary {
        all_count: servers.len(),
        counts,
    }
}

/// Stable: equal totals keep their priority order.
pub fn sort_by_traffic(servers: &mut [ServerRecord]) {
    servers.sort_by_key(|server| Reverse(server.total_transfer()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use crate::server::ServerStatus;

    fn server(id: u64, display_index: Option<i64>, tag: Option<&str>, online_status: bool) -> ServerRecord {
        ServerRecord {
            id,
            name: format!("node-{}", id),
            display_index,
            tag: tag.map(str::to_string),
            online_status,
            status: ServerStatus::default(),
        }
    }

    fn with_traffic(mut server: ServerRecord, net_in: u64, net_out: u64) -> ServerRecord {
        server.status.net_in_transfer = net_in;
        server.status.net_out_transfer = net_out;
        server
    }

    fn ids(reconciled: &Reconciled) -> Vec<u64> {
        reconciled.servers.iter().map(|server| server.id).collect()
    }

    fn scenario() -> Vec<ServerRecord> {
        vec![
            server(1, Some(0), Some("eu"), true),
            server(2, Some(5), Some("us"), true),
            server(3, Some(5), None, false),
        ]
    }

    fn filter(status: StatusFilter, tag: TagSelection, sort_by_traffic: bool) -> ViewFilter {
        ViewFilter { status, tag, sort_by_traffic }
    }

    #[test]
    fn orders_by_display_index_then_id() {
        let reconciled = reconcile(Some(scenario().as_slice()), &ViewFilter::default()).unwrap();
        assert_eq!(ids(&reconciled), vec![2, 3, 1]);
    }

    #[test]
    fn absent_display_index_sorts_like_zero() {
        let servers = vec![
            server(4, None, None, true),
            server(2, Some(0), None, true),
            server(9, Some(-1), None, true),
            server(1, Some(1), None, true),
        ];
        let reconciled = reconcile(Some(servers.as_slice()), &ViewFilter::default()).unwrap();
        assert_eq!(ids(&reconciled), vec![1, 2, 4, 9]);
    }

    #[test]
    fn selecting_a_tag_keeps_summary_of_status_filtered_set() {
        let reconciled = reconcile(
            Some(scenario().as_slice()),
            &filter(StatusFilter::All, TagSelection::from_tag("eu"), false),
        )
        .unwrap();

        assert_eq!(ids(&reconciled), vec![1]);
        assert_eq!(
            reconciled.tags.entries(),
            vec![
                TagSelection::All,
                TagSelection::from_tag("us"),
                TagSelection::from_tag("eu"),
            ]
        );
        assert_eq!(reconciled.tags.count(&TagSelection::from_tag("eu")), 1);
        assert_eq!(reconciled.tags.count(&TagSelection::from_tag("us")), 1);
        assert_eq!(reconciled.tags.all_count, 3);
    }

    #[test]
    fn status_filter_narrows_list_and_tags() {
        let reconciled = reconcile(
            Some(scenario().as_slice()),
            &filter(StatusFilter::Offline, TagSelection::All, false),
        )
        .unwrap();

        assert_eq!(ids(&reconciled), vec![3]);
        assert_eq!(reconciled.tags.entries(), vec![TagSelection::All]);
        assert!(reconciled.servers.iter().all(|server| !server.online_status));
    }

    #[test]
    fn unknown_tag_yields_empty_list() {
        let reconciled = reconcile(
            Some(scenario().as_slice()),
            &filter(StatusFilter::All, TagSelection::from_tag("gone"), false),
        )
        .unwrap();

        assert!(reconciled.servers.is_empty());
        assert_eq!(reconciled.tags.count(&TagSelection::from_tag("gone")), 0);
    }

    #[test]
    fn tag_hidden_by_status_filter_yields_empty_list() {
        let reconciled = reconcile(
            Some(scenario().as_slice()),
            &filter(StatusFilter::Offline, TagSelection::from_tag("eu"), false),
        )
        .unwrap();
        assert!(reconciled.servers.is_empty());
    }

    #[test]
    fn summary_counts_duplicates_once_per_tag() {
        let servers = vec![
            server(1, None, Some("eu"), true),
            server(2, None, Some("us"), true),
            server(3, None, Some("eu"), true),
            server(4, None, Some(""), true),
        ];
        let reconciled = reconcile(Some(servers.as_slice()), &ViewFilter::default()).unwrap();

        assert_eq!(
            reconciled.tags.entries(),
            vec![
                TagSelection::All,
                TagSelection::from_tag("eu"),
                TagSelection::from_tag("us"),
            ]
        );
        assert_eq!(reconciled.tags.counts["eu"], 2);
        assert_eq!(reconciled.tags.counts["us"], 1);
    }

    #[test]
    fn traffic_sort_uses_each_records_own_counters() {
        // A priority order that puts B first, so only the traffic sort can
        // bring A to the top.
        let a = with_traffic(server(1, Some(0), None, true), 10, 1);
        let b = with_traffic(server(2, Some(9), None, true), 2, 2);
        let servers = vec![a, b];

        let reconciled = reconcile(
            Some(servers.as_slice()),
            &filter(StatusFilter::All, TagSelection::All, true),
        )
        .unwrap();

        assert_eq!(ids(&reconciled), vec![1, 2]);
        assert_eq!(reconciled.servers[0].total_transfer(), 11);
        assert_eq!(reconciled.servers[1].total_transfer(), 4);
    }

    #[test]
    fn traffic_sort_keeps_priority_order_on_ties() {
        let servers = vec![
            with_traffic(server(3, Some(1), None, true), 5, 5),
            with_traffic(server(1, Some(1), None, true), 1, 9),
            with_traffic(server(2, Some(7), None, true), 10, 0),
            with_traffic(server(4, Some(0), None, true), 50, 0),
        ];

        let reconciled = reconcile(
            Some(servers.as_slice()),
            &filter(StatusFilter::All, TagSelection::All, true),
        )
        .unwrap();

        assert_eq!(ids(&reconciled), vec![4, 2, 1, 3]);
    }

    #[test]
    fn traffic_sort_applies_after_tag_filter() {
        let servers = vec![
            with_traffic(server(1, None, Some("eu"), true), 1, 1),
            with_traffic(server(2, None, Some("us"), true), 100, 100),
            with_traffic(server(3, None, Some("eu"), true), 7, 0),
        ];

        let reconciled = reconcile(
            Some(servers.as_slice()),
            &filter(StatusFilter::All, TagSelection::from_tag("eu"), true),
        )
        .unwrap();

        assert_eq!(ids(&reconciled), vec![3, 1]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let servers = scenario();
        let view = filter(StatusFilter::Online, TagSelection::from_tag("us"), true);
        assert_eq!(reconcile(Some(servers.as_slice()), &view), reconcile(Some(servers.as_slice()), &view));
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut reversed = scenario();
        reversed.reverse();
        assert_eq!(
            reconcile(Some(reversed.as_slice()), &ViewFilter::default()),
            reconcile(Some(scenario().as_slice()), &ViewFilter::default())
        );
    }

    #[test]
    fn missing_snapshot_is_no_data() {
        assert_eq!(reconcile(None, &ViewFilter::default()), None);
    }

    #[test]
    fn empty_snapshot_still_lists_sentinel() {
        let reconciled = reconcile(Some(&[][..]), &ViewFilter::default()).unwrap();
        assert!(reconciled.servers.is_empty());
        assert_eq!(reconciled.tags.entries(), vec![TagSelection::All]);
    }

    #[test]
    fn list_model_follows_snapshot_state() {
        let view = ViewFilter::default();

        assert_eq!(list_model(&SnapshotState::Loading, &view), ListModel::Loading);
        assert_eq!(
            list_model(&SnapshotState::Failed("HTTP 502".to_string()), &view),
            ListModel::Failed("HTTP 502".to_string())
        );
        assert_eq!(list_model(&SnapshotState::Ready(None), &view), ListModel::Loading);

        match list_model(&SnapshotState::Ready(Some(scenario())), &view) {
            ListModel::Ready(reconciled) => assert_eq!(ids(&reconciled), vec![2, 3, 1]),
            other => panic!("expected a ready list, got {:?}", other),
        }
    }
}
