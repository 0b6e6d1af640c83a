use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::server::ServerRecord;

/// Online/offline filter owned by the overview controls.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Online,
    Offline,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Online, StatusFilter::Offline];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Online => "online",
            StatusFilter::Offline => "offline",
        }
    }

    pub fn matches(self, server: &ServerRecord) -> bool {
        match self {
            StatusFilter::All => true,
            filter => filter.as_str() == server.online_label(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(StatusFilter::All),
            "online" => Ok(StatusFilter::Online),
            "offline" => Ok(StatusFilter::Offline),
            other => Err(format!("Unknown status filter '{}'", other)),
        }
    }
}

/// Selected tag of the server list.
///
/// `All` is the "no tag filter" sentinel. It is a separate variant, so no tag
/// string coming from the data can ever be mistaken for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TagSelection {
    #[default]
    All,
    Tag(String),
}

impl TagSelection {
    /// Empty strings select everything, like untagged servers belong to no tag.
    pub fn from_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag.is_empty() {
            TagSelection::All
        } else {
            TagSelection::Tag(tag)
        }
    }

    pub fn as_tag(&self) -> Option<&str> {
        match self {
            TagSelection::All => None,
            TagSelection::Tag(tag) => Some(tag),
        }
    }

    pub fn matches(&self, server: &ServerRecord) -> bool {
        match self {
            TagSelection::All => true,
            TagSelection::Tag(tag) => server.tag() == Some(tag.as_str()),
        }
    }
}

/// Every user-controlled input of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilter {
    pub status: StatusFilter,
    pub tag: TagSelection,
    pub sort_by_traffic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(online_status: bool, tag: Option<&str>) -> ServerRecord {
        ServerRecord {
            id: 1,
            online_status,
            tag: tag.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn status_filter_matches_derived_label() {
        assert!(StatusFilter::All.matches(&server(false, None)));
        assert!(StatusFilter::Online.matches(&server(true, None)));
        assert!(!StatusFilter::Online.matches(&server(false, None)));
        assert!(StatusFilter::Offline.matches(&server(false, None)));
    }

    #[test]
    fn status_filter_parses_its_own_labels() {
        for filter in StatusFilter::ALL {
            assert_eq!(filter.as_str().parse::<StatusFilter>(), Ok(filter));
        }
        assert!("Online".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn tag_selection_is_exact_and_case_sensitive() {
        let selection = TagSelection::from_tag("eu");
        assert!(selection.matches(&server(true, Some("eu"))));
        assert!(!selection.matches(&server(true, Some("EU"))));
        assert!(!selection.matches(&server(true, None)));
        assert!(TagSelection::All.matches(&server(true, None)));
    }

    #[test]
    fn empty_tag_selects_all() {
        assert_eq!(TagSelection::from_tag(""), TagSelection::All);
    }
}
