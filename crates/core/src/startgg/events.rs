//! Event and tournament discovery

use serde::{Deserialize, Serialize};

use super::EventId;

#[derive(Debug, Deserialize, Clone)]
pub struct EventMetaData {
    #[serde(default)]
    pub event: Option<EventMetaNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EventMetaNode {
    pub id: EventId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tournament: Option<NamedNode>,
    #[serde(default)]
    pub videogame: Option<NamedNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NamedNode {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TournamentEventsData {
    #[serde(default)]
    pub tournament: Option<TournamentNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TournamentNode {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub events: Option<Vec<TournamentEventNode>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TournamentEventNode {
    pub id: EventId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub videogame: Option<NamedNode>,
}

/// An event to report on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub game: String,
    pub tournament: String,
}

fn name_of(node: Option<NamedNode>) -> String {
    node.and_then(|n| n.name).unwrap_or_default()
}

/// `None` when the slug did not match an event
pub fn transform_event_meta(data: EventMetaData) -> Option<EventSummary> {
    let event = data.event?;
    Some(EventSummary {
        id: event.id,
        name: event.name.unwrap_or_default(),
        game: name_of(event.videogame),
        tournament: name_of(event.tournament),
    })
}

/// `None` when the slug did not match a tournament
pub fn transform_tournament_events(data: TournamentEventsData) -> Option<Vec<EventSummary>> {
    let tournament = data.tournament?;
    let tournament_name = tournament.name.unwrap_or_default();

    Some(
        tournament
            .events
            .unwrap_or_default()
            .into_iter()
            .map(|event| EventSummary {
                id: event.id,
                name: event.name.unwrap_or_default(),
                game: name_of(event.videogame),
                tournament: tournament_name.clone(),
            })
            .collect(),
    )
}
