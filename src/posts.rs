use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProxyError, Result};

/// A blog post as returned by the upstream API.
///
/// Fields the proxy does not sort on (author, authorId, ...) are kept in
/// `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub reads: i64,
    pub likes: i64,
    pub popularity: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body shape shared by the upstream API and our `/api/posts` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsBody {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Reads,
    Likes,
    Popularity,
}

impl SortField {
    pub fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Reads => a.reads.cmp(&b.reads),
            SortField::Likes => a.likes.cmp(&b.likes),
            SortField::Popularity => a.popularity.total_cmp(&b.popularity),
        }
    }
}

impl FromStr for SortField {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "reads" => Ok(SortField::Reads),
            "likes" => Ok(SortField::Likes),
            "popularity" => Ok(SortField::Popularity),
            other => Err(ProxyError::InvalidSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ProxyError::InvalidDirection(other.to_string())),
        }
    }
}

/// A validated `/api/posts` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub tags: Vec<String>,
    pub sort_by: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl PostQuery {
    /// Validate raw query parameters. Empty strings count as absent.
    ///
    /// Tags are split on `,` and passed through as-is, without trimming.
    pub fn validate(
        raw_tags: Option<&str>,
        raw_sort_by: Option<&str>,
        raw_direction: Option<&str>,
    ) -> Result<Self> {
        let tags = match non_empty(raw_tags) {
            Some(tags) => tags.split(',').map(str::to_string).collect(),
            None => return Err(ProxyError::MissingTags),
        };

        let sort_by: Option<SortField> = non_empty(raw_sort_by).map(str::parse).transpose()?;
        let direction: Option<SortDirection> =
            non_empty(raw_direction).map(str::parse).transpose()?;

        Ok(Self {
            tags,
            sort_by,
            direction,
        })
    }

    pub fn effective_sort(&self) -> (SortField, SortDirection) {
        (
            self.sort_by.unwrap_or_default(),
            self.direction.unwrap_or_default(),
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
