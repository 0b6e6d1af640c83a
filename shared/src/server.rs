use serde::{Deserialize, Serialize};

// ===== WIRE TYPES =====

/// Response envelope of the server status endpoint.
///
/// `result` is optional on the wire; a missing array means the dashboard has
/// nothing to show yet, not an error.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ServerApi {
    #[serde(default)]
    pub live_servers: u64,
    #[serde(default)]
    pub offline_servers: u64,
    #[serde(default)]
    pub result: Option<Vec<ServerRecord>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ServerRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_index: Option<i64>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub online_status: bool,
    #[serde(default)]
    pub status: ServerStatus,
}

/// Network counters reported by the agent. Transfer counters are cumulative
/// but may be reset upstream at any time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct ServerStatus {
    #[serde(rename = "NetInTransfer", default)]
    pub net_in_transfer: u64,
    #[serde(rename = "NetOutTransfer", default)]
    pub net_out_transfer: u64,
    #[serde(rename = "NetInSpeed", default)]
    pub net_in_speed: u64,
    #[serde(rename = "NetOutSpeed", default)]
    pub net_out_speed: u64,
}

impl ServerRecord {
    pub fn display_index(&self) -> i64 {
        self.display_index.unwrap_or(0)
    }

    /// Non-empty tag, `None` for untagged servers.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.is_empty())
    }

    pub fn online_label(&self) -> &'static str {
        if self.online_status { "online" } else { "offline" }
    }

    /// Inbound plus outbound transfer of this record only.
    pub fn total_transfer(&self) -> u64 {
        self.status
            .net_in_transfer
            .saturating_add(self.status.net_out_transfer)
    }
}

// ===== OVERVIEW =====

/// Aggregate numbers shown above the list, computed from one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapshotOverview {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub net_in_transfer: u64,
    pub net_out_transfer: u64,
}

impl SnapshotOverview {
    pub fn from_servers(servers: &[ServerRecord]) -> Self {
        servers.iter().fold(Self::default(), |mut overview, server| {
            overview.total += 1;
            if server.online_status {
                overview.online += 1;
            } else {
                overview.offline += 1;
            }
            overview.net_in_transfer = overview
                .net_in_transfer
                .saturating_add(server.status.net_in_transfer);
            overview.net_out_transfer = overview
                .net_out_transfer
                .saturating_add(server.status.net_out_transfer);
            overview
        })
    }
}
