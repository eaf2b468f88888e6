//! Character selections recorded in an entrant's games
//!
//! A selection belongs to one entrant within one game. Only `CHARACTER`
//! selections are consumed; their value is a character id resolved through
//! the event game's [`CharacterTable`].

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use super::{CharacterId, EntrantId};
use crate::pagination::PageInfo;

// =============================================================================
// API Response Types (Deserialization)
// =============================================================================

/// `data` of the character lookup query
#[derive(Debug, Deserialize, Clone)]
pub struct CharactersData {
    #[serde(default)]
    pub event: Option<CharactersEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CharactersEvent {
    #[serde(default)]
    pub videogame: Option<VideogameNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideogameNode {
    #[serde(default)]
    pub characters: Option<Vec<CharacterNode>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CharacterNode {
    pub id: CharacterId,
    pub name: String,
}

/// `data` of the entrant set history query
#[derive(Debug, Deserialize, Clone)]
pub struct EntrantSetsData {
    #[serde(default)]
    pub event: Option<EntrantSetsEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EntrantSetsEvent {
    #[serde(default)]
    pub sets: Option<SetConnection>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetConnection {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub nodes: Option<Vec<SetNode>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SetNode {
    #[serde(default)]
    pub games: Option<Vec<GameNode>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameNode {
    #[serde(default)]
    pub selections: Option<Vec<SelectionNode>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SelectionNode {
    #[serde(default)]
    pub entrant: Option<SelectionEntrant>,
    #[serde(default)]
    pub selection_type: Option<String>,
    #[serde(default)]
    pub selection_value: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SelectionEntrant {
    pub id: EntrantId,
}

// =============================================================================
// Domain Types
// =============================================================================

/// Kind of in-game choice a selection records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionKind {
    Character,
    Other(String),
}

impl From<&str> for SelectionKind {
    fn from(value: &str) -> Self {
        match value {
            "CHARACTER" => SelectionKind::Character,
            other => SelectionKind::Other(other.to_string()),
        }
    }
}

/// One selection made by an entrant in a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    pub entrant_id: EntrantId,
    pub kind: SelectionKind,
    pub value: CharacterId,
}

impl SelectionRecord {
    /// Nodes missing an entrant, type or value carry nothing usable
    pub fn from_node(node: &SelectionNode) -> Option<Self> {
        Some(Self {
            entrant_id: node.entrant.as_ref()?.id,
            kind: SelectionKind::from(node.selection_type.as_deref()?),
            value: CharacterId(node.selection_value?),
        })
    }
}

/// Character id to name lookup for one event's game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterTable(HashMap<CharacterId, String>);

impl CharacterTable {
    pub fn from_nodes(nodes: Vec<CharacterNode>) -> Self {
        CharacterTable(
            nodes
                .into_iter()
                .map(|node| (node.id, node.name))
                .collect(),
        )
    }

    pub fn name(&self, id: CharacterId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Characters an entrant played, derived from their games
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedCharacters {
    /// Distinct character names
    pub names: BTreeSet<String>,
    /// Selected ids missing from the lookup
    pub unmapped: Vec<CharacterId>,
}

// =============================================================================
// Transformations
// =============================================================================

impl CharactersData {
    /// Lookup table for the event's game; empty when the service reports none
    pub fn into_table(self) -> CharacterTable {
        let nodes = self
            .event
            .and_then(|event| event.videogame)
            .and_then(|game| game.characters)
            .unwrap_or_default();
        CharacterTable::from_nodes(nodes)
    }
}

impl EntrantSetsData {
    pub fn into_connection(self) -> SetConnection {
        self.event
            .and_then(|event| event.sets)
            .unwrap_or_default()
    }
}

/// Flatten sets into their games, in set order. Sets without games are skipped.
pub fn flatten_games(sets: Vec<SetNode>) -> Vec<GameNode> {
    sets.into_iter()
        .filter_map(|set| set.games)
        .flatten()
        .collect()
}

/// Distinct characters `entrant` selected across `games`
///
/// Any game without selection data means the event does not track selections
/// consistently, and the whole result is empty rather than partial.
pub fn derive_characters(
    games: &[GameNode],
    entrant: EntrantId,
    table: &CharacterTable,
) -> DerivedCharacters {
    let mut derived = DerivedCharacters::default();

    for game in games {
        let selections = match game.selections.as_deref() {
            Some(selections) if !selections.is_empty() => selections,
            _ => return DerivedCharacters::default(),
        };

        for record in selections.iter().filter_map(SelectionRecord::from_node) {
            if record.entrant_id != entrant || record.kind != SelectionKind::Character {
                continue;
            }
            match table.name(record.value) {
                Some(name) => {
                    derived.names.insert(name.to_string());
                }
                None => derived.unmapped.push(record.value),
            }
        }
    }

    derived
}
