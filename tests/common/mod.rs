#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Not every test binary uses every helper"
)]

use std::time::Duration;

use httpmock::MockServer;
use topaz_client_sdk::{Client, Config};

pub const API_KEY: &str = "00000000-0000-0000-0000-000000000000";
pub const API_KEY_HEADER: &str = "X-API-Key";

pub const DOG_ID: u64 = 695_144_538;
pub const MEETING_ID: u64 = 900_012_680;
pub const RACE_ID: u64 = 972_428_497;

pub fn create_client(server: &MockServer) -> anyhow::Result<Client> {
    Ok(Client::new(&server.base_url(), API_KEY, Config::default())?)
}

pub fn create_client_with_timeout(
    server: &MockServer,
    timeout: Duration,
) -> anyhow::Result<Client> {
    let config = Config::builder().timeout(timeout).build();

    Ok(Client::new(&server.base_url(), API_KEY, config)?)
}
