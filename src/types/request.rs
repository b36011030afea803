#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use bon::Builder;
use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;

use super::{MeetingFormat, OwningAuthority};

/// Default number of hits returned by the search endpoints.
pub const DEFAULT_SEARCH_RECORDS: u32 = 300;

/// Request parameters for the `/meeting` and `/race` listings.
///
/// When `to` is not supplied, the service is asked for the single day `from`. The owning
/// authority is only sent when set.
///
/// # Example
///
/// ```
/// use topaz_client_sdk::ToQueryParams as _;
/// use topaz_client_sdk::types::request::DateRangeRequest;
///
/// let request = DateRangeRequest::builder().from("2023-12-05").build();
///
/// assert_eq!(request.query_params(), "?from=2023-12-05&to=2023-12-05");
/// ```
#[derive(Debug, Clone, Builder)]
#[non_exhaustive]
pub struct DateRangeRequest {
    /// First day, `YYYY-MM-DD`.
    #[builder(into)]
    pub from: String,
    /// Last day, `YYYY-MM-DD`. Defaults to `from`.
    #[builder(into)]
    pub to: Option<String>,
    pub owning_authority_code: Option<OwningAuthority>,
}

/// Treats an empty string the same as an unset value.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[expect(clippy::ref_option, reason = "Need an explicit reference for serde")]
fn is_blank(value: &Option<String>) -> bool {
    non_empty(value.as_deref()).is_none()
}

#[skip_serializing_none]
#[derive(Serialize)]
struct DateRangeQuery<'req> {
    from: &'req str,
    to: &'req str,
    #[serde(rename = "owningauthoritycode")]
    owning_authority_code: Option<OwningAuthority>,
}

impl Serialize for DateRangeRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DateRangeQuery {
            from: &self.from,
            to: non_empty(self.to.as_deref()).unwrap_or(&self.from),
            owning_authority_code: self.owning_authority_code,
        }
        .serialize(serializer)
    }
}

/// Request parameters for `/trialresult`. `to` defaults to `from`.
#[derive(Debug, Clone, Builder)]
#[non_exhaustive]
pub struct TrialResultsRequest {
    #[builder(into)]
    pub from: String,
    #[builder(into)]
    pub to: Option<String>,
}

impl Serialize for TrialResultsRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DateRangeQuery {
            from: &self.from,
            to: non_empty(self.to.as_deref()).unwrap_or(&self.from),
            owning_authority_code: None,
        }
        .serialize(serializer)
    }
}

/// Request parameters for `/meeting/updated`.
///
/// Meetings are limited to the authorities the API key has access to. The authority
/// defaults to [`OwningAuthority::Vic`], where updates are the most timely, and is always
/// sent.
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct UpdatedMeetingsRequest {
    /// `YYYY-MM-DD HH:mm:ss`, interpreted as Melbourne local time unless a zone is given.
    #[builder(into)]
    pub since: String,
    #[serde(rename = "owningauthoritycode")]
    #[builder(default)]
    pub owning_authority_code: OwningAuthority,
}

/// Request parameters for `/meeting/{meeting_id}`.
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct MeetingDetailsRequest {
    #[serde(skip_serializing)]
    pub meeting_id: u64,
    #[builder(default)]
    pub format: MeetingFormat,
}

/// Request parameters for `/dog/{dog_id}/form`. An empty meeting date is left out.
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct DogFormRequest {
    #[serde(skip_serializing)]
    pub dog_id: u64,
    /// Form as at this meeting date, `YYYY-MM-DD`.
    #[serde(rename = "meetingdate", skip_serializing_if = "is_blank")]
    #[builder(into)]
    pub meeting_date: Option<String>,
}

/// Request parameters for the dog and trainer search endpoints.
///
/// # Example
///
/// ```
/// use topaz_client_sdk::ToQueryParams as _;
/// use topaz_client_sdk::types::request::SearchRequest;
///
/// let request = SearchRequest::builder().search_term("Crimson").records(10).build();
///
/// assert_eq!(
///     request.query_params(),
///     "?searchterm=Crimson&exactmatch=false&records=10"
/// );
/// ```
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct SearchRequest {
    /// Full or partial name.
    #[serde(rename = "searchterm")]
    #[builder(into)]
    pub search_term: String,
    /// Only return the unique match with exactly this name.
    #[serde(rename = "exactmatch")]
    #[builder(default)]
    pub exact_match: bool,
    /// Maximum number of hits.
    #[builder(default = DEFAULT_SEARCH_RECORDS)]
    pub records: u32,
}

/// Request parameters for `/race/upcoming`.
///
/// Without `from`, or with an empty one, the service uses the current Melbourne date and
/// time.
#[derive(Debug, Clone, Builder, Default, Serialize)]
#[non_exhaustive]
pub struct UpcomingRacesRequest {
    /// `YYYY-MM-DD HH:mm`.
    #[serde(skip_serializing_if = "is_blank")]
    #[builder(into)]
    pub from: Option<String>,
}
