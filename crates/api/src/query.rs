//! Query parameter types for list endpoints.

use std::fmt::Display;
use std::str::FromStr;

use courses_core::types::DbId;
use courses_db::models::course::CourseFilter;
use serde::{de, Deserialize, Deserializer};

/// Treat an empty query value (`?id=`) the same as an absent one.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Filters accepted by `GET /courses/` (`?pk=&id=&name=`).
///
/// `pk` is an alias for `id`. All filters are exact-match and AND-combined,
/// so supplying both `pk` and `id` with different values yields nothing.
/// Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CourseListParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub pk: Option<DbId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<DbId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
}

impl From<CourseListParams> for CourseFilter {
    fn from(params: CourseListParams) -> Self {
        CourseFilter {
            ids: params.pk.into_iter().chain(params.id).collect(),
            name: params.name,
        }
    }
}

/// Filters accepted by `GET /students/` (`?name=`).
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
}
