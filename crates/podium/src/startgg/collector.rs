//! Full collection of paginated resources with total-count reconciliation
//!
//! A collection cycle reads the reported total and page count, sweeps every
//! page through the [`BackoffExecutor`], and compares what it gathered with
//! the total. The service is known to under-deliver under load, so a
//! mismatch halves the page size and starts a fresh cycle, up to
//! [`MAX_COLLECT_ATTEMPTS`] cycles.

use podium_core::graphql::Operation;
use podium_core::pagination::{
    page_numbers, reconcile, Mismatch, PageInfo, PageSize, MAX_COLLECT_ATTEMPTS,
};
use podium_core::queries;
use podium_core::startgg::standings::{transform_standings_page, Standing, StandingsData};
use podium_core::startgg::EventId;
use serde::de::DeserializeOwned;

use super::executor::BackoffExecutor;
use super::transport::Transport;
use crate::prelude::*;

/// A logical collection the service only exposes one page at a time
pub trait PagedResource {
    type Item;
    type Response: DeserializeOwned;

    /// Human-readable name used in diagnostics
    fn describe(&self) -> String;

    /// Query for the first page, used only for its page info
    fn info_operation(&self, per_page: PageSize) -> Operation;

    fn page_operation(&self, page: u32, per_page: PageSize) -> Operation;

    /// `None` when the connection, its page info or its total is missing
    fn page_info(&self, response: Self::Response) -> Option<PageInfo>;

    /// `None` when the connection is missing from the response
    fn items(&self, response: Self::Response) -> Option<Vec<Self::Item>>;
}

/// Every standing of an event
#[derive(Debug, Clone, Copy)]
pub struct EventStandings(pub EventId);

impl PagedResource for EventStandings {
    type Item = Standing;
    type Response = StandingsData;

    fn describe(&self) -> String {
        format!("standings for event {}", self.0)
    }

    fn info_operation(&self, per_page: PageSize) -> Operation {
        queries::standings_page_info(self.0, per_page)
    }

    fn page_operation(&self, page: u32, per_page: PageSize) -> Operation {
        queries::standings_page(self.0, page, per_page)
    }

    fn page_info(&self, response: StandingsData) -> Option<PageInfo> {
        let info = response.into_connection()?.page_info?;
        info.total?;
        Some(info)
    }

    fn items(&self, response: StandingsData) -> Option<Vec<Standing>> {
        Some(transform_standings_page(response.into_connection()?))
    }
}

/// How a single collection cycle ended
enum Sweep<I> {
    Complete(Vec<I>),
    Incomplete { observed: Mismatch, reason: String },
}

/// Collect every item of `resource`, starting at `per_page` items per page
///
/// Items keep page order, then service order within a page. Transport
/// failures are the executor's concern and only surface here when its policy
/// is bounded or it is cancelled.
pub async fn collect<T, P>(
    executor: &BackoffExecutor<T>,
    resource: &P,
    per_page: PageSize,
) -> Result<Vec<P::Item>, Error>
where
    T: Transport,
    P: PagedResource,
{
    let mut per_page = per_page;
    let mut last_observed = Mismatch {
        collected: 0,
        total: 0,
    };

    for attempt in 1..=MAX_COLLECT_ATTEMPTS {
        log::info!(
            "Collecting {} ({} per page, attempt {}/{})",
            resource.describe(),
            per_page,
            attempt,
            MAX_COLLECT_ATTEMPTS
        );

        match sweep(executor, resource, per_page).await? {
            Sweep::Complete(items) => return Ok(items),
            Sweep::Incomplete { observed, reason } => {
                log::warn!(
                    "Incomplete {} with {} per page: {}",
                    resource.describe(),
                    per_page,
                    reason
                );
                last_observed = observed;
            }
        }

        per_page = per_page.halve();
    }

    Err(Error::PaginationExhausted {
        resource: resource.describe(),
        collected: last_observed.collected,
        total: last_observed.total,
        attempts: MAX_COLLECT_ATTEMPTS,
    })
}

async fn sweep<T, P>(
    executor: &BackoffExecutor<T>,
    resource: &P,
    per_page: PageSize,
) -> Result<Sweep<P::Item>, Error>
where
    T: Transport,
    P: PagedResource,
{
    let response = executor
        .execute::<P::Response>(&resource.info_operation(per_page))
        .await?;
    let Some(info) = resource.page_info(response) else {
        return Ok(Sweep::Incomplete {
            observed: Mismatch {
                collected: 0,
                total: 0,
            },
            reason: "page info or total missing from response".to_string(),
        });
    };

    let total = info.total();
    let mut items = Vec::new();

    for page in page_numbers(info.total_pages()) {
        let response = executor
            .execute::<P::Response>(&resource.page_operation(page, per_page))
            .await?;
        match resource.items(response) {
            Some(page_items) => {
                log::debug!(
                    "Page {}/{} of {}: {} items",
                    page,
                    info.total_pages(),
                    resource.describe(),
                    page_items.len()
                );
                items.extend(page_items);
            }
            None => {
                return Ok(Sweep::Incomplete {
                    observed: Mismatch {
                        collected: items.len(),
                        total,
                    },
                    reason: format!("page {page} missing from response"),
                })
            }
        }
    }

    match reconcile(items.len(), total) {
        Ok(()) => Ok(Sweep::Complete(items)),
        Err(mismatch) => Ok(Sweep::Incomplete {
            observed: mismatch,
            reason: mismatch.to_string(),
        }),
    }
}
