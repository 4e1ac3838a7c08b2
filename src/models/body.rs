//! Request bodies sent to the service.
//!
//! Optional members are left out of the JSON entirely rather than sent as
//! `null`, matching what the service accepts.

use serde::Serialize;

use crate::{error::Error, models::raindrop::Raindrop, result::Result};

/// `{"$id": n}` reference to a collection.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct CollectionRef {
    #[serde(rename = "$id")]
    id: i64,
}

impl CollectionRef {
    /// Zero is not a usable collection and is treated as absent.
    pub(crate) fn non_zero(id: Option<i64>) -> Option<Self> {
        id.filter(|id| *id != 0).map(|id| Self { id })
    }
}

/// Asks the service to fetch the page and fill in missing metadata.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct PleaseParse {}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBody<'a> {
    #[serde(rename = "pleaseParse")]
    please_parse: PleaseParse,
    link: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<CollectionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
}

impl<'a> TryFrom<&'a Raindrop> for CreateBody<'a> {
    type Error = Error;

    fn try_from(raindrop: &'a Raindrop) -> Result<Self> {
        let link = raindrop
            .link()
            .ok_or_else(|| Error::validation("raindrop link is required"))?;
        Ok(Self {
            please_parse: PleaseParse {},
            link,
            title: raindrop.title().filter(|t| !t.is_empty()),
            collection: CollectionRef::non_zero(raindrop.collection_id()),
            tags: raindrop.tags().filter(|t| !t.is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkCreateBody<'a> {
    pub(crate) items: &'a [CreateBody<'a>],
}

#[derive(Debug, Serialize)]
pub(crate) struct TagsBody<'a> {
    pub(crate) tags: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
}

impl<'a> From<&'a Raindrop> for UpdateBody<'a> {
    fn from(raindrop: &'a Raindrop) -> Self {
        Self {
            title: raindrop.title(),
            tags: raindrop.tags(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MoveBody {
    collection: CollectionRef,
}

impl MoveBody {
    pub(crate) fn to(collection_id: i64) -> Self {
        Self {
            collection: CollectionRef { id: collection_id },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkUpdateBody<'a> {
    ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<CollectionRef>,
}

impl<'a> BulkUpdateBody<'a> {
    pub(crate) fn new(ids: Vec<i64>, tags: Option<&'a [String]>, dst_collection: Option<i64>) -> Self {
        Self {
            ids,
            tags,
            collection: CollectionRef::non_zero(dst_collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, to_value};

    use super::*;

    #[test]
    fn create_body_with_everything() {
        let raindrop = Raindrop::new("https://example.com")
            .with_title("Example")
            .with_collection(12)
            .with_tags(["x", "y"]);
        let body = to_value(CreateBody::try_from(&raindrop).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "pleaseParse": {},
                "link": "https://example.com",
                "title": "Example",
                "collection": { "$id": 12 },
                "tags": ["x", "y"],
            })
        );
    }

    #[test]
    fn create_body_skips_empty_members() {
        let raindrop = Raindrop::new("https://example.com")
            .with_title("")
            .with_collection(0)
            .with_tags(Vec::<String>::new());
        let body = to_value(CreateBody::try_from(&raindrop).unwrap()).unwrap();
        assert_eq!(body, json!({ "pleaseParse": {}, "link": "https://example.com" }));
    }

    #[test]
    fn create_body_requires_link() {
        let raindrop = Raindrop::default().with_title("no link");
        assert!(matches!(
            CreateBody::try_from(&raindrop),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn bulk_update_body_members() {
        let tags = vec!["a".to_string()];
        let body = to_value(BulkUpdateBody::new(vec![1, 2], Some(tags.as_slice()), Some(9))).unwrap();
        assert_eq!(
            body,
            json!({ "ids": [1, 2], "tags": ["a"], "collection": { "$id": 9 } })
        );

        let none: Vec<String> = Vec::new();
        let cleared = to_value(BulkUpdateBody::new(vec![1], Some(none.as_slice()), None)).unwrap();
        assert_eq!(cleared, json!({ "ids": [1], "tags": [] }));

        let bare = to_value(BulkUpdateBody::new(vec![1], None, Some(0))).unwrap();
        assert_eq!(bare, json!({ "ids": [1] }));
    }

    #[test]
    fn update_and_move_bodies() {
        let raindrop = Raindrop::new("https://a.test").with_title("T");
        assert_eq!(
            to_value(UpdateBody::from(&raindrop)).unwrap(),
            json!({ "title": "T" })
        );
        assert_eq!(
            to_value(MoveBody::to(4)).unwrap(),
            json!({ "collection": { "$id": 4 } })
        );
    }
}
