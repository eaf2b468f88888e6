use crate::prelude::{eprintln, println, *};
use crate::startgg::events::events_for_link;
use crate::startgg::{connect, PacingPolicy};
use podium_core::link::parse_link;
use podium_core::startgg::events::EventSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct EventsOptions {
    /// Link to a start.gg tournament or event
    #[arg(value_name = "LINK")]
    pub link: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: EventsOptions, global: crate::Global) -> Result<()> {
    let link = parse_link(&options.link)?;
    let executor = connect(&global, &PacingPolicy::default())?;

    if global.verbose {
        eprintln!("Looking up events for {}", link.slug());
    }

    let events = events_for_link(&executor, &link).await?;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&events)
                .map_err(|e| eyre!("JSON serialization failed: {}", e))?
        );
    } else {
        print!("{}", format_events_text(&events));
    }

    Ok(())
}

/// One `id  game - name` line per event
fn format_events_text(events: &[EventSummary]) -> String {
    if events.is_empty() {
        return "No events found.\n".to_string();
    }

    let width = events
        .iter()
        .map(|event| event.id.to_string().len())
        .max()
        .unwrap_or(0);

    events
        .iter()
        .map(|event| {
            format!(
                "{:>width$}  {} - {}\n",
                event.id.0,
                event.game,
                event.name,
                width = width
            )
        })
        .collect()
}
