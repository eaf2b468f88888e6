//! Event standings: wire shapes and the domain records built from them

use serde::{Deserialize, Serialize};

use super::EntrantId;
use crate::pagination::PageInfo;

// =============================================================================
// API Response Types (Deserialization)
// =============================================================================

/// `data` of the standings queries
#[derive(Debug, Deserialize, Clone)]
pub struct StandingsData {
    #[serde(default)]
    pub event: Option<StandingsEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StandingsEvent {
    #[serde(default)]
    pub standings: Option<StandingConnection>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StandingConnection {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub nodes: Option<Vec<StandingNode>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StandingNode {
    #[serde(default)]
    pub placement: Option<u32>,
    #[serde(default)]
    pub entrant: Option<EntrantNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EntrantNode {
    pub id: EntrantId,
    #[serde(default)]
    pub participants: Option<Vec<ParticipantNode>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantNode {
    #[serde(default)]
    pub gamer_tag: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub user: Option<UserNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserNode {
    #[serde(default)]
    pub authorizations: Option<Vec<AuthorizationNode>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationNode {
    #[serde(default)]
    pub external_username: Option<String>,
}

// =============================================================================
// Domain Types
// =============================================================================

/// One entrant's placement within an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: u32,
    pub entrant: Entrant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub display_tag: String,
    pub prefix: Option<String>,
    pub social_handle: Option<String>,
}

// =============================================================================
// Transformations
// =============================================================================

impl StandingsData {
    /// The standings connection, if the event and its standings were present
    pub fn into_connection(self) -> Option<StandingConnection> {
        self.event.and_then(|event| event.standings)
    }
}

/// Build a participant, treating blank prefixes and handles as absent
pub fn transform_participant(node: ParticipantNode) -> Participant {
    let social_handle = node
        .user
        .and_then(|user| user.authorizations)
        .and_then(|auths| auths.into_iter().next())
        .and_then(|auth| auth.external_username)
        .filter(|handle| !handle.is_empty());

    Participant {
        display_tag: node.gamer_tag.unwrap_or_default(),
        prefix: node.prefix.filter(|prefix| !prefix.is_empty()),
        social_handle,
    }
}

/// Build a standing. Nodes without a placement or entrant are dropped.
pub fn transform_standing(node: StandingNode) -> Option<Standing> {
    let rank = node.placement?;
    let entrant = node.entrant?;

    Some(Standing {
        rank,
        entrant: Entrant {
            id: entrant.id,
            participants: entrant
                .participants
                .unwrap_or_default()
                .into_iter()
                .map(transform_participant)
                .collect(),
        },
    })
}

/// Standings of one page, in the order the service returned them
pub fn transform_standings_page(connection: StandingConnection) -> Vec<Standing> {
    connection
        .nodes
        .unwrap_or_default()
        .into_iter()
        .filter_map(transform_standing)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_fixture() -> serde_json::Value {
        json!({
            "event": {
                "standings": {
                    "nodes": [
                        {
                            "placement": 1,
                            "entrant": {
                                "id": 5,
                                "participants": [{
                                    "gamerTag": "Tweek",
                                    "prefix": "DRS",
                                    "user": {"authorizations": [{"externalUsername": "TweekSSB"}]}
                                }]
                            }
                        },
                        {
                            "placement": 2,
                            "entrant": {
                                "id": 9,
                                "participants": [{
                                    "gamerTag": "Sparg0",
                                    "prefix": "",
                                    "user": null
                                }]
                            }
                        }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_transform_standings_page() {
        let data: StandingsData = serde_json::from_value(page_fixture()).unwrap();
        let standings = transform_standings_page(data.into_connection().unwrap());

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].entrant.id, EntrantId(5));
        assert_eq!(
            standings[0].entrant.participants[0],
            Participant {
                display_tag: "Tweek".to_string(),
                prefix: Some("DRS".to_string()),
                social_handle: Some("TweekSSB".to_string()),
            }
        );
        assert_eq!(standings[1].entrant.participants[0].prefix, None);
        assert_eq!(standings[1].entrant.participants[0].social_handle, None);
    }

    #[test]
    fn test_missing_event_has_no_connection() {
        let data: StandingsData = serde_json::from_value(json!({"event": null})).unwrap();
        assert!(data.into_connection().is_none());

        let data: StandingsData =
            serde_json::from_value(json!({"event": {"standings": null}})).unwrap();
        assert!(data.into_connection().is_none());
    }

    #[test]
    fn test_incomplete_nodes_are_dropped() {
        let connection: StandingConnection = serde_json::from_value(json!({
            "nodes": [
                {"placement": null, "entrant": {"id": 1}},
                {"placement": 3},
                {"placement": 4, "entrant": {"id": 2, "participants": null}}
            ]
        }))
        .unwrap();

        let standings = transform_standings_page(connection);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].rank, 4);
        assert!(standings[0].entrant.participants.is_empty());
    }

    #[test]
    fn test_page_info_only_response() {
        let data: StandingsData = serde_json::from_value(json!({
            "event": {"standings": {"pageInfo": {"total": 37, "totalPages": 1}}}
        }))
        .unwrap();

        let connection = data.into_connection().unwrap();
        assert_eq!(connection.page_info.unwrap().total(), 37);
        assert!(transform_standings_page(connection).is_empty());
    }
}
