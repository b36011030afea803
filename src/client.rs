//! Client for the Topaz API.
//!
//! Every operation issues a single `GET`, waits at most [`REQUEST_TIMEOUT`] for the full
//! response, and returns either a [`Record`] or a [`Table`] depending on the endpoint.
//!
//! # Example
//!
//! ```no_run
//! use topaz_client_sdk::Client;
//! use topaz_client_sdk::types::request::DateRangeRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_api_key("YOUR_API_KEY")?;
//!
//! let request = DateRangeRequest::builder().from("2023-12-01").build();
//! let races = client.races(&request).await?;
//!
//! for race in &races {
//!     println!("{:?}", race.get("raceId"));
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use bon::Builder;
use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{self, ApiKey};
use crate::error::Error;
use crate::types::request::{
    DateRangeRequest, DogFormRequest, MeetingDetailsRequest, SearchRequest, TrialResultsRequest,
    UpcomingRacesRequest, UpdatedMeetingsRequest,
};
use crate::types::{MeetingDetails, MeetingFormat, OwningAuthority, Record, Table};
use crate::{Access, DEFAULT_HOST, REQUEST_TIMEOUT, Result, ToQueryParams as _};

/// Configuration for [`Client`]
#[derive(Clone, Debug, Builder)]
pub struct Config {
    /// Time allowed for each call. Defaults to [`REQUEST_TIMEOUT`]; overriding it is
    /// primarily useful for testing.
    #[builder(default = REQUEST_TIMEOUT)]
    timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

/// HTTP client for the Topaz API.
///
/// The client holds only immutable configuration and a connection pool, so it is cheap to
/// clone and can be shared between tasks.
///
/// # API Base URL
///
/// The default API endpoint is [`DEFAULT_HOST`].
///
/// # Example
///
/// ```no_run
/// use topaz_client_sdk::{Client, Config};
///
/// // Client against the production endpoint
/// let client = Client::with_api_key("YOUR_API_KEY").unwrap();
///
/// // Or against a custom endpoint
/// let client = Client::new("http://localhost:8080/api", "YOUR_API_KEY", Config::default()).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    client: ReqwestClient,
}

impl Client {
    /// Creates a new client against `host`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host URL is invalid, the key is not a valid header value, or the
    /// HTTP client fails to build.
    pub fn new<K: Into<ApiKey>>(host: &str, api_key: K, config: Config) -> Result<Client> {
        let headers = auth::default_headers(&api_key.into())?;

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        // Endpoint paths are appended to the host, so it must end with a separator
        let mut host = Url::parse(host)?;
        if !host.path().ends_with('/') {
            let path = format!("{}/", host.path());
            host.set_path(&path);
        }

        Ok(Self { host, client })
    }

    /// Creates a new client against [`DEFAULT_HOST`] with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP client fails to
    /// build.
    pub fn with_api_key<K: Into<ApiKey>>(api_key: K) -> Result<Client> {
        Client::new(DEFAULT_HOST, api_key, Config::default())
    }

    /// Returns the host URL for the client.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    async fn get<Req: Serialize, Res: DeserializeOwned>(
        &self,
        path: &str,
        req: &Req,
        access: Access,
    ) -> Result<Res> {
        let url = self.host.join(path)?;

        self.get_url(url, req, access).await
    }

    async fn get_url<Req: Serialize, Res: DeserializeOwned>(
        &self,
        mut url: Url,
        req: &Req,
        access: Access,
    ) -> Result<Res> {
        let query = req.query_params();
        url.set_query(query.strip_prefix('?'));

        let request = self.client.request(Method::GET, url).build()?;

        crate::request(&self.client, request, access).await
    }

    /// Fetches one entry of a code table, escaping the code as a single path segment.
    ///
    /// An empty code would address the whole table, so it is rejected before sending.
    async fn get_code<Res: DeserializeOwned>(&self, table: &str, code: &str) -> Result<Res> {
        if code.is_empty() {
            return Err(Error::validation(format!("{table} code must not be empty")));
        }

        let mut url = self.host.join(table)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(code);

        self.get_url(url, &(), Access::Public).await
    }

    async fn get_public<Res: DeserializeOwned>(&self, path: &str) -> Result<Res> {
        self.get(path, &(), Access::Public).await
    }

    async fn get_restricted<Res: DeserializeOwned>(&self, path: &str) -> Result<Res> {
        self.get(path, &(), Access::Restricted).await
    }

    // Codes

    /// Lists the dog colour codes and their descriptions.
    pub async fn dog_colours(&self) -> Result<Table> {
        self.get_public("codes/dogcolour").await
    }

    /// Gets a single dog colour, e.g. `"BK"` for black.
    pub async fn dog_colour(&self, colour_code: &str) -> Result<Record> {
        self.get_code("codes/dogcolour", colour_code).await
    }

    /// Lists the owning authority codes and their descriptions.
    pub async fn owning_authorities(&self) -> Result<Table> {
        self.get_public("codes/owningauthority").await
    }

    pub async fn owning_authority(&self, code: OwningAuthority) -> Result<Record> {
        self.get_code("codes/owningauthority", &code.to_string())
            .await
    }

    /// Lists the track codes and their descriptions.
    pub async fn tracks(&self) -> Result<Table> {
        self.get_public("codes/track").await
    }

    /// Gets a single track, e.g. `"WPK"` for Wentworth Park.
    pub async fn track(&self, track_code: &str) -> Result<Record> {
        self.get_code("codes/track", track_code).await
    }

    /// Lists the grade codes and their descriptions.
    pub async fn grades(&self) -> Result<Table> {
        self.get_public("codes/grade").await
    }

    /// Gets a single grade. Grade codes are strings even when numeric, e.g. `"1"`.
    pub async fn grade(&self, grade_code: &str) -> Result<Record> {
        self.get_code("codes/grade", grade_code).await
    }

    // Dogs

    pub async fn dog(&self, dog_id: u64) -> Result<Record> {
        self.get_public(&format!("dog/{dog_id}")).await
    }

    /// Form lines for a dog, optionally as at a meeting date.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use topaz_client_sdk::Client;
    /// use topaz_client_sdk::types::request::DogFormRequest;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::with_api_key("YOUR_API_KEY")?;
    ///
    /// let request = DogFormRequest::builder()
    ///     .dog_id(695_144_538)
    ///     .meeting_date("2023-12-03")
    ///     .build();
    /// let form = client.dog_form(&request).await?;
    ///
    /// println!("{} starts, columns: {:?}", form.len(), form.columns());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dog_form(&self, request: &DogFormRequest) -> Result<Table> {
        self.get(
            &format!("dog/{}/form", request.dog_id),
            request,
            Access::Public,
        )
        .await
    }

    pub async fn dog_statistics(&self, dog_id: u64) -> Result<Record> {
        self.get_public(&format!("dog/{dog_id}/statistics")).await
    }

    /// Searches dogs by full or partial name.
    pub async fn search_dogs(&self, request: &SearchRequest) -> Result<Table> {
        self.get("search/dogs", request, Access::Public).await
    }

    // Meetings

    /// Lists meetings between two dates, limited to the dates the API key may access for each
    /// owning authority.
    pub async fn meetings(&self, request: &DateRangeRequest) -> Result<Table> {
        self.get("meeting", request, Access::Public).await
    }

    /// Lists meetings with scratchings or results changed since a point in time.
    pub async fn updated_meetings(&self, request: &UpdatedMeetingsRequest) -> Result<Table> {
        self.get("meeting/updated", request, Access::Public).await
    }

    /// Gets a meeting with its races and runs.
    ///
    /// The response shape follows the requested format: [`MeetingFormat::All`] yields
    /// [`MeetingDetails::Record`], every other format yields [`MeetingDetails::Table`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use topaz_client_sdk::Client;
    /// use topaz_client_sdk::types::{MeetingDetails, MeetingFormat};
    /// use topaz_client_sdk::types::request::MeetingDetailsRequest;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::with_api_key("YOUR_API_KEY")?;
    ///
    /// let request = MeetingDetailsRequest::builder()
    ///     .meeting_id(900_012_680)
    ///     .format(MeetingFormat::Basic)
    ///     .build();
    ///
    /// match client.meeting(&request).await? {
    ///     MeetingDetails::Table(runs) => println!("{} runs", runs.len()),
    ///     MeetingDetails::Record(meeting) => println!("{meeting:?}"),
    ///     _ => {}
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn meeting(&self, request: &MeetingDetailsRequest) -> Result<MeetingDetails> {
        let path = format!("meeting/{}", request.meeting_id);

        match request.format {
            MeetingFormat::All => self
                .get(&path, request, Access::Public)
                .await
                .map(MeetingDetails::Record),
            _ => self
                .get(&path, request, Access::Public)
                .await
                .map(MeetingDetails::Table),
        }
    }

    /// Gets a meeting with its races, runs, and form for every dog.
    pub async fn meeting_form(&self, meeting_id: u64) -> Result<Record> {
        self.get_public(&format!("meeting/{meeting_id}/form")).await
    }

    pub async fn meeting_results(&self, meeting_id: u64) -> Result<Record> {
        self.get_public(&format!("meeting/{meeting_id}/results"))
            .await
    }

    /// Gets meeting results including first split data where available.
    ///
    /// # Errors
    ///
    /// Returns [`Kind::PermissionDenied`](crate::error::Kind::PermissionDenied) if the API key
    /// is not entitled to first split data.
    pub async fn meeting_results_first_split(&self, meeting_id: u64) -> Result<Record> {
        self.get_restricted(&format!("meeting/{meeting_id}/results/firstsplit"))
            .await
    }

    pub async fn meeting_races(&self, meeting_id: u64) -> Result<Record> {
        self.get_public(&format!("meeting/{meeting_id}/races")).await
    }

    /// Lists the races of a meeting including first split data where available.
    ///
    /// # Errors
    ///
    /// Returns [`Kind::PermissionDenied`](crate::error::Kind::PermissionDenied) if the API key
    /// is not entitled to first split data.
    pub async fn meeting_races_first_split(&self, meeting_id: u64) -> Result<Record> {
        self.get_restricted(&format!("meeting/{meeting_id}/races/firstsplit"))
            .await
    }

    /// Latest field for a meeting, mainly for scratchings and reserves.
    pub async fn meeting_field(&self, meeting_id: u64) -> Result<Record> {
        self.get_public(&format!("meeting/{meeting_id}/field")).await
    }

    /// Latest field for one race of a meeting. See [`Client::race_field`] for the same
    /// summary addressed by race alone.
    pub async fn meeting_race_field(&self, meeting_id: u64, race_id: u64) -> Result<Record> {
        self.get_public(&format!("meeting/{meeting_id}/field/{race_id}"))
            .await
    }

    // Races

    /// Lists races between two dates, constrained by the API key's access per owning
    /// authority.
    pub async fn races(&self, request: &DateRangeRequest) -> Result<Table> {
        self.get("race", request, Access::Public).await
    }

    pub async fn races_for_meeting(&self, meeting_id: u64) -> Result<Record> {
        self.get_public(&format!("race/meeting/{meeting_id}")).await
    }

    pub async fn race_result(&self, race_id: u64) -> Result<Record> {
        self.get_public(&format!("race/{race_id}/result")).await
    }

    /// Dogs in a race and the details of their runs.
    pub async fn race_runs(&self, race_id: u64) -> Result<Table> {
        self.get_public(&format!("race/{race_id}/runs")).await
    }

    pub async fn race_runs_form(&self, race_id: u64) -> Result<Record> {
        self.get_public(&format!("race/{race_id}/runs/form")).await
    }

    /// Latest field for a race, mainly for scratchings and reserves.
    pub async fn race_field(&self, race_id: u64) -> Result<Record> {
        self.get_public(&format!("race/{race_id}/field")).await
    }

    /// Runs of a race including first split data where available.
    ///
    /// # Errors
    ///
    /// Returns [`Kind::PermissionDenied`](crate::error::Kind::PermissionDenied) if the API key
    /// is not entitled to first split data.
    pub async fn race_runs_first_split(&self, race_id: u64) -> Result<Record> {
        self.get_restricted(&format!("race/{race_id}/runs/firstsplit"))
            .await
    }

    /// Only the first split data for the runs of a race.
    ///
    /// # Errors
    ///
    /// Returns [`Kind::PermissionDenied`](crate::error::Kind::PermissionDenied) if the API key
    /// is not entitled to first split data.
    pub async fn race_first_split(&self, race_id: u64) -> Result<Record> {
        self.get_restricted(&format!("race/{race_id}/firstsplit"))
            .await
    }

    /// Remaining races of the day after a point in time (VIC races only).
    pub async fn upcoming_races(&self, request: &UpcomingRacesRequest) -> Result<Table> {
        self.get("race/upcoming", request, Access::Public).await
    }

    /// Runners of a race with ISO-Lynx tracking splits.
    ///
    /// # Errors
    ///
    /// Returns [`Kind::PermissionDenied`](crate::error::Kind::PermissionDenied) if the API key
    /// is not entitled to ISO-Lynx data.
    pub async fn isolynx_splits(&self, race_id: u64) -> Result<Record> {
        self.get_restricted(&format!("isolynx/{race_id}/splits"))
            .await
    }

    // Runs, results, trainers, trials

    /// Same data as [`Client::race_runs`], served from the run resource.
    pub async fn runs_for_race(&self, race_id: u64) -> Result<Table> {
        self.get_public(&format!("run/race/{race_id}")).await
    }

    /// Most recently finalised race results.
    pub async fn recent_race_results(&self) -> Result<Record> {
        self.get_public("raceresult/recent").await
    }

    /// Searches trainers by full or partial name.
    pub async fn search_trainers(&self, request: &SearchRequest) -> Result<Table> {
        self.get("search/trainers", request, Access::Public).await
    }

    pub async fn trial_results(&self, request: &TrialResultsRequest) -> Result<Table> {
        self.get("trialresult", request, Access::Public).await
    }

    // System

    pub async fn change_log(&self) -> Result<Record> {
        self.get_public("changelog").await
    }

    /// Health of the API server.
    pub async fn health(&self) -> Result<Record> {
        self.get_public("health").await
    }

    /// Health of the API's cache layer.
    pub async fn cache_health(&self) -> Result<Record> {
        self.get_public("health/cache").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_should_gain_trailing_slash() {
        let client = Client::new("https://topaz.grv.org.au/api", "key", Config::default())
            .expect("valid client");
        assert_eq!(client.host().as_str(), "https://topaz.grv.org.au/api/");

        let client = Client::new("http://127.0.0.1:8080", "key", Config::default())
            .expect("valid client");
        assert_eq!(client.host().as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn host_path_should_be_kept_when_joining() {
        let client = Client::new("https://topaz.grv.org.au/api", "key", Config::default())
            .expect("valid client");

        let url = client.host().join("race/972428497/runs").expect("valid path");
        assert_eq!(url.as_str(), "https://topaz.grv.org.au/api/race/972428497/runs");
    }

    #[test]
    fn with_api_key_should_use_default_host() {
        let client = Client::with_api_key("key").expect("valid client");

        assert_eq!(client.host().as_str(), "https://topaz.grv.org.au/api/");
    }

    #[test]
    fn default_config_should_use_request_timeout() {
        assert_eq!(Config::default().timeout, REQUEST_TIMEOUT);
        assert_eq!(Duration::from_secs(30), REQUEST_TIMEOUT);
    }

    #[test]
    fn invalid_host_should_fail() {
        let err = Client::new("not a url", "key", Config::default()).unwrap_err();

        assert_eq!(err.kind(), crate::error::Kind::Internal);
    }

    #[test]
    fn debug_should_not_leak_api_key() {
        let client = Client::with_api_key("super-secret-key").expect("valid client");

        assert!(!format!("{client:?}").contains("super-secret-key"));
    }
}
