//! GraphQL operation documents for the start.gg API
//!
//! Each builder returns a ready-to-send [`Operation`]. Documents only ask for
//! the fields the collectors consume.

use serde_json::json;

use crate::graphql::Operation;
use crate::pagination::PageSize;
use crate::startgg::{EntrantId, EventId};

/// Page size used for an entrant's set history. Large enough that one page
/// covers a realistic bracket run.
pub const ENTRANT_SETS_PER_PAGE: u32 = 150;

const EVENT_META: &str = r#"
query EventMeta($slug: String) {
  event(slug: $slug) {
    id
    name
    tournament { name }
    videogame { name }
  }
}"#;

const TOURNAMENT_EVENTS: &str = r#"
query TournamentEvents($slug: String) {
  tournament(slug: $slug) {
    name
    events {
      id
      name
      videogame { name }
    }
  }
}"#;

const STANDINGS_PAGE_INFO: &str = r#"
query EventStandingsInfo($eventId: ID!, $perPage: Int!) {
  event(id: $eventId) {
    standings(query: { page: 1, perPage: $perPage }) {
      pageInfo { total totalPages }
    }
  }
}"#;

const STANDINGS_PAGE: &str = r#"
query EventStandings($eventId: ID!, $page: Int!, $perPage: Int!) {
  event(id: $eventId) {
    standings(query: { page: $page, perPage: $perPage }) {
      nodes {
        placement
        entrant {
          id
          participants {
            gamerTag
            prefix
            user {
              authorizations(types: [TWITTER]) { externalUsername }
            }
          }
        }
      }
    }
  }
}"#;

const EVENT_CHARACTERS: &str = r#"
query EventCharacters($eventId: ID!) {
  event(id: $eventId) {
    videogame {
      characters { id name }
    }
  }
}"#;

const ENTRANT_SETS: &str = r#"
query EntrantSets($eventId: ID!, $entrantId: ID!, $page: Int!, $perPage: Int!) {
  event(id: $eventId) {
    sets(page: $page, perPage: $perPage, sortType: RECENT, filters: { entrantIds: [$entrantId] }) {
      pageInfo { total totalPages }
      nodes {
        games {
          selections {
            entrant { id }
            selectionType
            selectionValue
          }
        }
      }
    }
  }
}"#;

/// Event id, tournament name and game for an event slug
pub fn event_meta(slug: &str) -> Operation {
    Operation::new("EventMeta", EVENT_META, json!({ "slug": slug }))
}

/// All events of a tournament
pub fn tournament_events(slug: &str) -> Operation {
    Operation::new(
        "TournamentEvents",
        TOURNAMENT_EVENTS,
        json!({ "slug": slug }),
    )
}

/// First standings page, selecting only the page info
pub fn standings_page_info(event: EventId, per_page: PageSize) -> Operation {
    Operation::new(
        "EventStandingsInfo",
        STANDINGS_PAGE_INFO,
        json!({ "eventId": event, "perPage": per_page }),
    )
}

/// One page of standings nodes
pub fn standings_page(event: EventId, page: u32, per_page: PageSize) -> Operation {
    Operation::new(
        "EventStandings",
        STANDINGS_PAGE,
        json!({ "eventId": event, "page": page, "perPage": per_page }),
    )
}

/// Character lookup for the event's game
pub fn event_characters(event: EventId) -> Operation {
    Operation::new(
        "EventCharacters",
        EVENT_CHARACTERS,
        json!({ "eventId": event }),
    )
}

/// One page of an entrant's sets, most recent first
pub fn entrant_sets(event: EventId, entrant: EntrantId, page: u32) -> Operation {
    Operation::new(
        "EntrantSets",
        ENTRANT_SETS,
        json!({
            "eventId": event,
            "entrantId": entrant,
            "page": page,
            "perPage": ENTRANT_SETS_PER_PAGE,
        }),
    )
}
