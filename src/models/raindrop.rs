use std::{
    fmt,
    hash::{Hash, Hasher},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Error, models::macros::str_opt_ref, result::Result};

/// Identifier of a raindrop that is known to be present.
///
/// Operations that address a single raindrop take this type instead of an
/// `Option`, so a missing id is rejected before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaindropId(i64);

impl RaindropId {
    /// Wraps a raw identifier.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for RaindropId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<Option<i64>> for RaindropId {
    type Error = Error;

    fn try_from(value: Option<i64>) -> Result<Self> {
        value
            .map(Self)
            .ok_or_else(|| Error::validation("raindrop id cannot be None"))
    }
}

impl fmt::Display for RaindropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookmark and the metadata this crate reads and writes.
///
/// Built locally without an id before creation, or decoded from a server
/// reply with the id assigned.
///
/// # Equivalence
///
/// Two raindrops are equivalent when their links are equal; the id and
/// every other field are ignored. The relation is explicit, see
/// [`Raindrop::same_link`] and [`ByLink`]. `Raindrop` deliberately has no
/// `PartialEq` impl.
#[derive(Debug, Clone, Default)]
pub struct Raindrop {
    id: Option<RaindropId>,
    collection_id: Option<i64>,
    link: Option<String>,
    title: Option<String>,
    tags: Option<Vec<String>>,
    created: Option<DateTime<Utc>>,
    last_update: Option<DateTime<Utc>>,
}

impl Raindrop {
    /// Starts a raindrop for `link` with nothing else set.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(RaindropId(id));
        self
    }

    /// Sets the collection the raindrop lives in.
    #[must_use]
    pub fn with_collection(mut self, collection_id: i64) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the tags, keeping their order and duplicates.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the identifier, if the service has assigned one.
    pub fn id(&self) -> Option<RaindropId> {
        self.id
    }

    /// Returns the identifier or a validation error when it is absent.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] if no id has been assigned.
    pub fn require_id(&self) -> Result<RaindropId> {
        self.id
            .ok_or_else(|| Error::validation("raindrop id cannot be None"))
    }

    /// Returns the collection identifier.
    pub fn collection_id(&self) -> Option<i64> {
        self.collection_id
    }

    /// Returns the bookmarked link.
    pub fn link(&self) -> Option<&str> {
        str_opt_ref!(self.link)
    }

    /// Returns the title.
    pub fn title(&self) -> Option<&str> {
        str_opt_ref!(self.title)
    }

    /// Returns the tags in the order they were given.
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    /// Returns when the service created the raindrop.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// Returns when the service last modified the raindrop.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Returns `true` when both raindrops point at the same link.
    pub fn same_link(&self, other: &Raindrop) -> bool {
        self.link == other.link
    }
}

/// Hash-map key comparing raindrops by link only.
///
/// ```
/// use std::collections::HashSet;
/// use raindropio::{ByLink, Raindrop};
///
/// let a = Raindrop::new("https://example.com").with_id(1);
/// let b = Raindrop::new("https://example.com").with_title("dup");
/// let unique: HashSet<_> = [&a, &b].into_iter().map(ByLink).collect();
/// assert_eq!(unique.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByLink<'a>(pub &'a Raindrop);

impl PartialEq for ByLink<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_link(other.0)
    }
}

impl Eq for ByLink<'_> {}

impl Hash for ByLink<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.link.hash(state);
    }
}

#[derive(Deserialize)]
struct WireRaindrop {
    #[serde(rename = "_id")]
    id: Option<i64>,
    collection: Option<WireCollection>,
    #[serde(rename = "collectionId")]
    collection_id: Option<i64>,
    link: Option<String>,
    title: Option<String>,
    tags: Option<Vec<String>>,
    created: Option<DateTime<Utc>>,
    #[serde(rename = "lastUpdate")]
    last_update: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct WireCollection {
    #[serde(rename = "$id")]
    id: Option<i64>,
}

/// Converts one decoded raindrop object into a [`Raindrop`].
///
/// The collection is read from `collection.$id`, falling back to a flat
/// `collectionId`.
///
/// # Errors
///
/// Fails with [`Error::Mapping`] if the value is not an object, if `_id` or
/// `link` is missing, or if a field has an unexpected type.
pub fn to_raindrop(value: &Value) -> Result<Raindrop> {
    let wire = WireRaindrop::deserialize(value).map_err(|e| Error::mapping(e.to_string()))?;
    let id = wire
        .id
        .ok_or_else(|| Error::mapping("raindrop is missing `_id`"))?;
    let link = wire
        .link
        .ok_or_else(|| Error::mapping("raindrop is missing `link`"))?;
    let collection_id = wire
        .collection
        .and_then(|c| c.id)
        .or(wire.collection_id);

    Ok(Raindrop {
        id: Some(RaindropId(id)),
        collection_id,
        link: Some(link),
        title: wire.title,
        tags: wire.tags,
        created: wire.created,
        last_update: wire.last_update,
    })
}
