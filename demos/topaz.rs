//! Topaz API example walking from meetings to races, runs, and dogs.
//!
//! Requires an API key in `TOPAZ_API_KEY`. Run with tracing enabled:
//! ```sh
//! TOPAZ_API_KEY=... RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example topaz --features tracing
//! ```
//!
//! Optionally log to a file:
//! ```sh
//! LOG_FILE=topaz.log TOPAZ_API_KEY=... RUST_LOG=info cargo run --example topaz --features tracing
//! ```

use std::fs::File;

use topaz_client_sdk::Client;
use topaz_client_sdk::error::Kind;
use topaz_client_sdk::types::request::{DateRangeRequest, MeetingDetailsRequest, SearchRequest};
use topaz_client_sdk::types::{MeetingFormat, OwningAuthority, Table, Value};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let api_key = std::env::var("TOPAZ_API_KEY")?;
    let client = Client::with_api_key(api_key)?;

    match client.owning_authorities().await {
        Ok(authorities) => {
            for authority in &authorities {
                info!(
                    endpoint = "owning_authorities",
                    code = ?authority.get("code"),
                    description = ?authority.get("description")
                );
            }
        }
        Err(e) => debug!(endpoint = "owning_authorities", error = %e),
    }

    // Races from several authorities are collected into one table
    let mut races = Table::default();
    for code in [OwningAuthority::Vic, OwningAuthority::Nsw] {
        let request = DateRangeRequest::builder()
            .from("2023-12-01")
            .to("2023-12-06")
            .owning_authority_code(code)
            .build();

        match client.races(&request).await {
            Ok(response) => {
                info!(endpoint = "races", authority = %code, count = response.len());
                races.extend(response);
            }
            Err(e) => debug!(endpoint = "races", authority = %code, error = %e),
        }
    }
    info!(endpoint = "races", total = races.len(), columns = ?races.columns());

    let meeting_id = races
        .column("meetingId")
        .flatten()
        .find_map(Value::as_u64);

    if let Some(meeting_id) = meeting_id {
        let request = MeetingDetailsRequest::builder()
            .meeting_id(meeting_id)
            .format(MeetingFormat::Basic)
            .build();

        match client.meeting(&request).await {
            Ok(details) => {
                let runs = details.as_table().map_or(0, Table::len);
                info!(endpoint = "meeting", meeting_id, runs);
            }
            Err(e) => debug!(endpoint = "meeting", meeting_id, error = %e),
        }
    }

    let race_id = races.column("raceId").flatten().find_map(Value::as_u64);

    if let Some(race_id) = race_id {
        match client.race_runs(race_id).await {
            Ok(runs) => info!(endpoint = "race_runs", race_id, count = runs.len()),
            Err(e) => debug!(endpoint = "race_runs", race_id, error = %e),
        }

        match client.race_runs_first_split(race_id).await {
            Ok(splits) => info!(endpoint = "race_runs_first_split", race_id, keys = splits.len()),
            Err(e) if e.kind() == Kind::PermissionDenied => {
                warn!(endpoint = "race_runs_first_split", "API key lacks first split access");
            }
            Err(e) => debug!(endpoint = "race_runs_first_split", race_id, error = %e),
        }
    }

    let request = SearchRequest::builder().search_term("Crimson").records(5).build();
    match client.search_dogs(&request).await {
        Ok(dogs) => {
            for dog in &dogs {
                info!(
                    endpoint = "search_dogs",
                    dog_id = ?dog.get("dogId"),
                    name = ?dog.get("dogName")
                );
            }
        }
        Err(e) => debug!(endpoint = "search_dogs", error = %e),
    }

    Ok(())
}
