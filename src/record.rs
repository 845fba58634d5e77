//! The user-agent record shared by the crawler and the accuracy checker

use serde::{Deserialize, Serialize};

/// One (category, title) group of user-agent strings scraped from a detail page
///
/// Serialized as `{"type": .., "title": .., "user_agents": [..]}`, with empty
/// fields omitted on write and defaulted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentRecord {
    /// Ground-truth category label, lowercased (e.g. "crawlers", "browsers")
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub category: String,

    /// Name of the client or bot (e.g. "Googlebot")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// User-agent header values in page order; duplicates are kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_agents: Vec<String>,
}

impl UserAgentRecord {
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        user_agents: Vec<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            user_agents,
        }
    }
}
