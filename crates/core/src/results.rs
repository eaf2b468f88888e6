//! Ranked results and their text rendering

use std::collections::BTreeSet;

use serde::Serialize;

use crate::startgg::events::EventSummary;
use crate::startgg::standings::{Participant, Standing};

/// One retained entrant with the characters they played
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub rank: u32,
    pub participants: Vec<Participant>,
    pub characters: BTreeSet<String>,
}

/// Results for one event, ready to print
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    pub event: EventSummary,
    pub results: Vec<RankedResult>,
}

/// Standings with `rank <= cutoff`, ordered by rank. Ties keep service order.
pub fn retain_top(standings: Vec<Standing>, cutoff: u32) -> Vec<Standing> {
    let mut kept: Vec<Standing> = standings
        .into_iter()
        .filter(|standing| standing.rank <= cutoff)
        .collect();
    kept.sort_by_key(|standing| standing.rank);
    kept
}

/// `prefix | tag(@handle)`
pub fn format_participant(participant: &Participant) -> String {
    let mut out = String::new();
    if let Some(prefix) = &participant.prefix {
        out.push_str(prefix);
        out.push_str(" | ");
    }
    out.push_str(&participant.display_tag);
    if let Some(handle) = &participant.social_handle {
        out.push_str(&format!("(@{handle})"));
    }
    out
}

/// `1. prefix | tag(@handle) - Char, Char`
pub fn format_result_line(result: &RankedResult) -> String {
    let mut line = format!("{}. ", result.rank);
    for participant in &result.participants {
        line.push_str(&format_participant(participant));
    }
    if !result.characters.is_empty() {
        line.push_str(" - ");
        line.push_str(
            &result
                .characters
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    line
}

/// Header for a single event report
pub fn format_event_header(event: &EventSummary) -> String {
    format!("<h3>{} {}</h3>", event.tournament, event.game)
}

/// Header for an event listed under a tournament
pub fn format_tournament_event_header(event: &EventSummary) -> String {
    format!("{} - {}", event.game, event.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::startgg::standings::Entrant;
    use crate::startgg::{EntrantId, EventId};

    fn standing(rank: u32, id: u64) -> Standing {
        Standing {
            rank,
            entrant: Entrant {
                id: EntrantId(id),
                participants: vec![],
            },
        }
    }

    fn participant(tag: &str, prefix: Option<&str>, handle: Option<&str>) -> Participant {
        Participant {
            display_tag: tag.to_string(),
            prefix: prefix.map(str::to_string),
            social_handle: handle.map(str::to_string),
        }
    }

    #[test]
    fn test_retain_top_cutoff() {
        let standings = [17, 5, 1, 16, 3, 2]
            .into_iter()
            .enumerate()
            .map(|(i, rank)| standing(rank, i as u64))
            .collect();

        let ranks: Vec<u32> = retain_top(standings, 16)
            .iter()
            .map(|s| s.rank)
            .collect();
        assert_eq!(ranks, vec![1, 2, 3, 5, 16]);
    }

    #[test]
    fn test_retain_top_stable_on_ties() {
        let standings = vec![standing(5, 10), standing(1, 11), standing(5, 12)];

        let kept = retain_top(standings, 8);
        let ids: Vec<u64> = kept.iter().map(|s| s.entrant.id.0).collect();
        assert_eq!(ids, vec![11, 10, 12]);
    }

    #[test]
    fn test_retain_top_zero_cutoff() {
        assert!(retain_top(vec![standing(1, 1)], 0).is_empty());
    }

    #[test]
    fn test_format_participant() {
        assert_eq!(
            format_participant(&participant("Tweek", Some("DRS"), Some("TweekSSB"))),
            "DRS | Tweek(@TweekSSB)"
        );
        assert_eq!(format_participant(&participant("Sparg0", None, None)), "Sparg0");
    }

    #[test]
    fn test_format_result_line_with_characters() {
        let result = RankedResult {
            rank: 1,
            participants: vec![participant("Tweek", None, None)],
            characters: BTreeSet::from(["Sonic".to_string(), "Diddy Kong".to_string()]),
        };

        assert_eq!(format_result_line(&result), "1. Tweek - Diddy Kong, Sonic");
    }

    #[test]
    fn test_format_result_line_team() {
        let result = RankedResult {
            rank: 3,
            participants: vec![
                participant("A", Some("X"), None),
                participant("B", None, Some("b")),
            ],
            characters: BTreeSet::new(),
        };

        assert_eq!(format_result_line(&result), "3. X | AB(@b)");
    }

    #[test]
    fn test_headers() {
        let event = EventSummary {
            id: EventId(1),
            name: "Ultimate Singles".to_string(),
            game: "Super Smash Bros. Ultimate".to_string(),
            tournament: "Genesis 9".to_string(),
        };

        assert_eq!(
            format_event_header(&event),
            "<h3>Genesis 9 Super Smash Bros. Ultimate</h3>"
        );
        assert_eq!(
            format_tournament_event_header(&event),
            "Super Smash Bros. Ultimate - Ultimate Singles"
        );
    }
}
