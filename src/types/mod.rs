//! Types for the Topaz API.
//!
//! - **Common types**: codes shared across requests, e.g. [`OwningAuthority`] and
//!   [`MeetingFormat`].
//!
//! - **Request types**: builder-pattern structs for endpoints that take query parameters
//!   (e.g. [`request::DateRangeRequest`], [`request::SearchRequest`]).
//!
//! - **Response types**: the two shapes the service answers with, a single [`Record`] or a
//!   [`Table`] of records, plus [`MeetingDetails`] for the one endpoint whose shape depends on
//!   the requested format.
//!
//! Response contents are defined by the service and are not validated locally.
//!
//! ```
//! use topaz_client_sdk::types::OwningAuthority;
//! use topaz_client_sdk::types::request::DateRangeRequest;
//!
//! let request = DateRangeRequest::builder()
//!     .from("2023-12-01")
//!     .to("2023-12-06")
//!     .owning_authority_code(OwningAuthority::Vic)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

pub mod request;
pub mod response;

/// JSON value and object types, re-exported so callers can inspect records without adding
/// `serde_json` themselves.
pub use serde_json::{Map, Value};

pub use self::response::{MeetingDetails, Table};

/// A single JSON object returned by the service, keyed by field name in the order the
/// service sent them.
pub type Record = Map<String, Value>;

/// Regional racing body governing a meeting or race.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum OwningAuthority {
    Act,
    Nsw,
    Nt,
    Qld,
    Sa,
    Tas,
    #[default]
    Vic,
    Wa,
    Nz,
}

/// Level of detail requested from the meeting details endpoint.
///
/// [`MeetingFormat::All`] answers with a single nested record; every other format answers
/// with a table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum MeetingFormat {
    #[default]
    All,
    Basic,
    BasicPlus,
    Full,
    FullPlus,
}
