//! Characters played by an entrant
//!
//! The character lookup belongs to the event's game, so it is fetched once
//! per event and reused for every entrant of that event. An empty lookup
//! means the game has no characters and every entrant resolves to nothing.

use std::collections::BTreeSet;

use podium_core::queries;
use podium_core::startgg::selections::{
    derive_characters, flatten_games, CharacterTable, CharactersData, EntrantSetsData, GameNode,
};
use podium_core::startgg::{EntrantId, EventId};

use super::executor::BackoffExecutor;
use super::pacer::Pacer;
use super::transport::Transport;
use crate::prelude::*;

pub struct SelectionResolver<'a, T> {
    executor: &'a BackoffExecutor<T>,
    pacer: Pacer,
    characters: CharacterTable,
    characters_for: Option<EventId>,
}

impl<'a, T: Transport> SelectionResolver<'a, T> {
    /// `pacer` spaces successive resolutions
    pub fn new(executor: &'a BackoffExecutor<T>, pacer: Pacer) -> Self {
        Self {
            executor,
            pacer,
            characters: CharacterTable::default(),
            characters_for: None,
        }
    }

    /// Distinct names of the characters `entrant` played in `event`
    pub async fn resolve(
        &mut self,
        event: EventId,
        entrant: EntrantId,
    ) -> Result<BTreeSet<String>, Error> {
        self.pacer.pace().await;
        self.load_characters(event).await?;

        if self.characters.is_empty() {
            return Ok(BTreeSet::new());
        }

        let games = self.match_history(event, entrant).await?;
        let derived = derive_characters(&games, entrant, &self.characters);
        if !derived.unmapped.is_empty() {
            log::debug!(
                "Entrant {} selected unknown character ids {:?}",
                entrant,
                derived.unmapped
            );
        }

        Ok(derived.names)
    }

    async fn load_characters(&mut self, event: EventId) -> Result<(), Error> {
        if self.characters_for == Some(event) {
            return Ok(());
        }

        let data: CharactersData = self
            .executor
            .execute(&queries::event_characters(event))
            .await?;
        self.characters = data.into_table();
        self.characters_for = Some(event);

        log::debug!(
            "Loaded {} characters for event {}",
            self.characters.len(),
            event
        );
        Ok(())
    }

    /// Every game in the entrant's sets, most recent set first
    async fn match_history(
        &self,
        event: EventId,
        entrant: EntrantId,
    ) -> Result<Vec<GameNode>, Error> {
        let mut sets = Vec::new();
        let mut page = 1;

        loop {
            let data: EntrantSetsData = self
                .executor
                .execute(&queries::entrant_sets(event, entrant, page))
                .await?;
            let connection = data.into_connection();
            let total_pages = connection
                .page_info
                .map(|info| info.total_pages())
                .unwrap_or(0);
            sets.extend(connection.nodes.unwrap_or_default());

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(flatten_games(sets))
    }
}
