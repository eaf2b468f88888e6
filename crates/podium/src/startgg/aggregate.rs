use podium_core::results::{retain_top, RankedResult};
use podium_core::startgg::standings::Standing;
use podium_core::startgg::EventId;

use super::selections::SelectionResolver;
use super::transport::Transport;
use crate::prelude::*;

/// Pair every standing within `cutoff` with the characters its entrant played
///
/// Results are ordered by rank; ties keep the order the service returned.
pub async fn aggregate<T: Transport>(
    resolver: &mut SelectionResolver<'_, T>,
    event: EventId,
    standings: Vec<Standing>,
    cutoff: u32,
) -> Result<Vec<RankedResult>, Error> {
    let retained = retain_top(standings, cutoff);
    let mut results = Vec::with_capacity(retained.len());

    for standing in retained {
        let characters = resolver.resolve(event, standing.entrant.id).await?;
        results.push(RankedResult {
            rank: standing.rank,
            participants: standing.entrant.participants,
            characters,
        });
    }

    Ok(results)
}
