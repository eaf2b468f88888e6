use podium_core::link::Link;
use podium_core::queries;
use podium_core::startgg::events::{
    transform_event_meta, transform_tournament_events, EventMetaData, EventSummary,
    TournamentEventsData,
};

use super::executor::BackoffExecutor;
use super::transport::Transport;
use crate::prelude::*;

/// Look up a single event by its slug
pub async fn fetch_event<T: Transport>(
    executor: &BackoffExecutor<T>,
    slug: &str,
) -> Result<EventSummary, Error> {
    let data: EventMetaData = executor.execute(&queries::event_meta(slug)).await?;
    transform_event_meta(data).ok_or_else(|| Error::MissingData(format!("No event found for {slug}")))
}

/// Every event of a tournament, in the order the service lists them
pub async fn fetch_tournament_events<T: Transport>(
    executor: &BackoffExecutor<T>,
    slug: &str,
) -> Result<Vec<EventSummary>, Error> {
    let data: TournamentEventsData = executor.execute(&queries::tournament_events(slug)).await?;
    transform_tournament_events(data)
        .ok_or_else(|| Error::MissingData(format!("No tournament found for {slug}")))
}

/// Events a link refers to
pub async fn events_for_link<T: Transport>(
    executor: &BackoffExecutor<T>,
    link: &Link,
) -> Result<Vec<EventSummary>, Error> {
    match link {
        Link::Event(slug) => Ok(vec![fetch_event(executor, slug).await?]),
        Link::Tournament(slug) | Link::Shorthand(slug) => {
            fetch_tournament_events(executor, slug).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::startgg::testing::ScriptedTransport;
    use podium_core::startgg::EventId;
    use serde_json::json;

    fn executor() -> BackoffExecutor<ScriptedTransport> {
        BackoffExecutor::new(ScriptedTransport::new(|op| match op.name {
            "EventMeta" => Ok(json!({"event": {
                "id": 10,
                "name": "Singles",
                "tournament": {"name": "Evo"},
                "videogame": {"name": "Tekken 8"}
            }})),
            "TournamentEvents" if op.variables["slug"] == "nowhere" => {
                Ok(json!({"tournament": null}))
            }
            "TournamentEvents" => Ok(json!({"tournament": {
                "name": "Evo",
                "events": [
                    {"id": 10, "name": "Singles", "videogame": {"name": "Tekken 8"}},
                    {"id": 11, "name": "Doubles", "videogame": {"name": "Tekken 8"}}
                ]
            }})),
            other => panic!("unexpected {other}"),
        }))
    }

    #[tokio::test]
    async fn test_event_link_resolves_one_event() {
        let executor = executor();
        let link = Link::Event("tournament/evo/event/singles".to_string());

        let events = events_for_link(&executor, &link).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, EventId(10));
        assert_eq!(events[0].tournament, "Evo");
    }

    #[tokio::test]
    async fn test_tournament_link_lists_events() {
        let executor = executor();

        for link in [
            Link::Tournament("tournament/evo".to_string()),
            Link::Shorthand("evo".to_string()),
        ] {
            let events = events_for_link(&executor, &link).await.unwrap();
            let ids: Vec<u64> = events.iter().map(|e| e.id.0).collect();
            assert_eq!(ids, vec![10, 11]);
        }
    }

    #[tokio::test]
    async fn test_unknown_tournament() {
        let executor = executor();

        let err = fetch_tournament_events(&executor, "nowhere")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingData("No tournament found for nowhere".to_string())
        );
    }
}
