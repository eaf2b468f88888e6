use crate::prelude::{eprintln, println, *};
use crate::startgg::aggregate::aggregate;
use crate::startgg::collector::{collect, EventStandings};
use crate::startgg::events::events_for_link;
use crate::startgg::selections::SelectionResolver;
use crate::startgg::{connect, BackoffExecutor, Pacer, PacingPolicy, Transport};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use podium_core::link::{parse_link, Link};
use podium_core::pagination::PageSize;
use podium_core::results::{
    format_event_header, format_result_line, format_tournament_event_header, EventReport,
};
use podium_core::startgg::events::EventSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ResultsOptions {
    /// Link to a start.gg tournament or event
    #[arg(value_name = "LINK")]
    pub link: String,

    /// Number of top placements to display
    #[arg(short = 'n', long, env = "PODIUM_PLACES", default_value = "16")]
    pub places: u32,

    /// Standings requested per page before any reconciliation retry
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// What happened to one event
#[derive(Debug)]
pub enum EventOutcome {
    Reported(EventReport),
    /// Standings could not be reconciled; the remaining events still run
    Skipped { event: EventSummary, reason: Error },
}

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

pub async fn run(options: ResultsOptions, global: crate::Global) -> Result<()> {
    let link = parse_link(&options.link)?;
    let pacing = PacingPolicy::default();
    let executor = connect(&global, &pacing)?;

    if global.verbose {
        eprintln!("Endpoint: {}", global.endpoint);
        eprintln!("Link: {:?}", link);
        eprintln!("Backoff: {:?}", executor.policy());
        eprintln!();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("Invalid spinner template: {}", e))?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    set_spinner_msg(Some(&spinner), format!("Looking up {}...", link.slug()));
    let events = events_for_link(&executor, &link).await?;
    if global.verbose {
        spinner.suspend(|| eprintln!("{}", format_event_plan(&events)));
    }

    let per_page = PageSize::new(options.per_page).ok_or_eyre("--per-page must be at least 1")?;
    let outcomes =
        results_data(&executor, events, per_page, options.places, &pacing, Some(&spinner)).await;
    spinner.finish_and_clear();
    let outcomes = outcomes?;

    let mut reports = Vec::new();
    for outcome in outcomes {
        match outcome {
            EventOutcome::Reported(report) => reports.push(report),
            EventOutcome::Skipped { event, reason } => {
                eprintln!("{} {} - {}: {}", "Skipped".yellow(), event.game, event.name, reason);
            }
        }
    }

    if options.json {
        output_json(&reports)
    } else {
        output_formatted(&reports, matches!(link, Link::Event(_)))
    }
}

/// Verbose listing of the events a run is about to process
fn format_event_plan(events: &[EventSummary]) -> String {
    let mut plan = format!("Processing {} event(s):", events.len());
    for event in events {
        plan.push_str(&format!("\n  {} {} - {}", event.id, event.game, event.name));
    }
    plan
}

/// Collect standings and character selections for every event
///
/// Events are processed one after another with event pacing between them.
/// An event whose standings cannot be reconciled is skipped; any other
/// failure aborts the run.
pub async fn results_data<T: Transport>(
    executor: &BackoffExecutor<T>,
    events: Vec<EventSummary>,
    per_page: PageSize,
    places: u32,
    pacing: &PacingPolicy,
    spinner: Option<&ProgressBar>,
) -> Result<Vec<EventOutcome>, Error> {
    let event_pacer = Pacer::new(pacing.event_interval);
    let mut resolver = SelectionResolver::new(executor, Pacer::new(pacing.selection_interval));
    let mut outcomes = Vec::with_capacity(events.len());

    for event in events {
        event_pacer.pace().await;

        set_spinner_msg(spinner, format!("Fetching standings for {}...", event.name));
        let standings = match collect(executor, &EventStandings(event.id), per_page).await {
            Ok(standings) => standings,
            Err(reason @ Error::PaginationExhausted { .. }) => {
                log::error!("{}", reason);
                outcomes.push(EventOutcome::Skipped { event, reason });
                continue;
            }
            Err(e) => return Err(e),
        };

        set_spinner_msg(spinner, format!("Fetching characters for {}...", event.name));
        let results = aggregate(&mut resolver, event.id, standings, places).await?;
        outcomes.push(EventOutcome::Reported(EventReport { event, results }));
    }

    Ok(outcomes)
}

/// Convert reports to JSON string
fn format_reports_json(reports: &[EventReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert one report to text, headed for a single event or a tournament listing
fn format_report_text(report: &EventReport, single_event: bool) -> String {
    let mut out = String::new();
    if single_event {
        out.push_str(&format_event_header(&report.event));
    } else {
        out.push_str(&format_tournament_event_header(&report.event));
    }
    out.push('\n');

    for result in &report.results {
        out.push_str(&format_result_line(result));
        out.push('\n');
    }
    out
}

fn output_json(reports: &[EventReport]) -> Result<()> {
    let json = format_reports_json(reports)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(reports: &[EventReport], single_event: bool) -> Result<()> {
    for report in reports {
        print!("{}", format_report_text(report, single_event));
    }
    Ok(())
}
