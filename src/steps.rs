use crate::{
  providers::yelp,
  results::{LocationQuery, LocationResult},
};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};

/// Fetches the businesses around a single address.
pub async fn fetch_location_step(
  client: &yelp::Client,
  address: String,
  radius: u32,
) -> Result<LocationResult> {
  tracing::info!(%address, radius, "searching restaurants");
  let businesses = client
    .search_businesses(&address, radius)
    .await
    .with_context(|| format!("Restaurant search around \"{address}\" failed"))?;
  tracing::info!(%address, found = businesses.len(), "search done");

  Ok(LocationResult {
    location: LocationQuery { address, radius },
    businesses,
  })
}

/// Fetches every address, keeping the input order in the output.
///
/// At most `concurrency` requests are in flight; with `1` each fetch starts
/// only after the previous one has finished. The first failure aborts the
/// whole run and drops any request still pending.
///
/// # Errors
///
/// Returns the first location error, wrapped with the failing address.
pub async fn fetch_all(
  client: &yelp::Client,
  addresses: &[String],
  radius: u32,
  concurrency: usize,
  on_done: impl Fn(&LocationResult),
) -> Result<Vec<LocationResult>> {
  stream::iter(addresses.iter().cloned())
    .map(|address| fetch_location_step(client, address, radius))
    .buffered(concurrency.max(1))
    .inspect_ok(|result| on_done(result))
    .try_collect()
    .await
}
