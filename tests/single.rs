mod common;

use common::{item, repo, Pauses, Scripted};
use raindropio::{client::Method, Error, Raindrop, RaindropId, RaindropIo};
use serde_json::json;

#[tokio::test]
async fn get_decodes_item() -> anyhow::Result<()> {
    let transport = Scripted::default();
    transport.reply(200, json!({ "result": true, "item": item(7) }));
    let repo = repo(&transport, &Pauses::default());

    let raindrop = repo.get(RaindropId::new(7)).await?;
    assert_eq!(raindrop.link(), Some("https://example7.com"));
    assert_eq!(raindrop.collection_id(), Some(46_274_319));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, "http://api.test/rest/v1/raindrop/7");
    assert_eq!(requests[0].header("Authorization"), Some("Bearer test-token"));
    assert!(requests[0].body.is_none());
    Ok(())
}

#[tokio::test]
async fn get_not_found_is_api_error() {
    let transport = Scripted::default();
    transport.reply(404, json!({ "result": false, "error": "not found" }));
    let repo = repo(&transport, &Pauses::default());

    let err = repo.get(RaindropId::new(1)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, Error::Api { ref body, .. } if body.contains("not found")));
}

#[tokio::test]
async fn create_sends_parse_flag_and_members() -> anyhow::Result<()> {
    let transport = Scripted::default();
    transport.reply(200, json!({ "result": true, "item": item(11) }));
    let repo = repo(&transport, &Pauses::default());

    let draft = Raindrop::new("https://example11.com")
        .with_collection(46_274_319)
        .with_tags(["test", "integration"]);
    let created = repo.create(&draft).await?;
    assert_eq!(created.id(), Some(RaindropId::new(11)));
    assert!(created.same_link(&draft));

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "http://api.test/rest/v1/raindrop");
    assert_eq!(
        request.body,
        Some(json!({
            "pleaseParse": {},
            "link": "https://example11.com",
            "collection": { "$id": 46274319 },
            "tags": ["test", "integration"],
        }))
    );
    Ok(())
}

#[tokio::test]
async fn create_without_link_sends_nothing() {
    let transport = Scripted::default();
    let repo = repo(&transport, &Pauses::default());

    let draft = Raindrop::default().with_title("no link");
    let err = repo.create(&draft).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn missing_id_fails_before_any_request() {
    let transport = Scripted::default();
    let repo = repo(&transport, &Pauses::default());
    let draft = Raindrop::new("https://example.com");

    async fn get_draft(repo: &RaindropIo, draft: &Raindrop) -> raindropio::Result<Raindrop> {
        repo.get(draft.require_id()?).await
    }

    async fn retag_draft(repo: &RaindropIo, draft: &Raindrop) -> raindropio::Result<Raindrop> {
        let tags = vec!["updated".to_string()];
        repo.update_tags(draft.require_id()?, &tags).await
    }

    async fn delete_draft(repo: &RaindropIo, draft: &Raindrop) -> raindropio::Result<bool> {
        repo.delete(draft.require_id()?).await
    }

    let err = get_draft(&repo, &draft).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let err = retag_draft(&repo, &draft).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let err = delete_draft(&repo, &draft).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn updates_put_to_item_endpoint() -> anyhow::Result<()> {
    let transport = Scripted::default();
    transport
        .reply(200, json!({ "item": item(3) }))
        .reply(200, json!({ "item": item(3) }))
        .reply(200, json!({ "item": item(3) }));
    let repo = repo(&transport, &Pauses::default());
    let id = RaindropId::new(3);

    let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
    repo.update_tags(id, &tags).await?;
    repo.update(id, &Raindrop::new("https://example3.com").with_title("Renamed"))
        .await?;
    repo.update_collection(id, 99).await?;

    let requests = transport.requests();
    assert!(requests
        .iter()
        .all(|r| r.method == Method::Put && r.url == "http://api.test/rest/v1/raindrop/3"));
    assert_eq!(requests[0].body, Some(json!({ "tags": ["b", "a", "b"] })));
    assert_eq!(requests[1].body, Some(json!({ "title": "Renamed" })));
    assert_eq!(requests[2].body, Some(json!({ "collection": { "$id": 99 } })));
    Ok(())
}

#[tokio::test]
async fn delete_returns_result_flag() -> anyhow::Result<()> {
    let transport = Scripted::default();
    transport.reply(200, json!({ "result": true }));
    let repo = repo(&transport, &Pauses::default());

    assert!(repo.delete(RaindropId::new(5)).await?);
    assert_eq!(transport.requests()[0].method, Method::Delete);
    Ok(())
}

#[tokio::test]
async fn reply_without_item_is_mapping_error() {
    let transport = Scripted::default();
    transport.reply(200, json!({ "result": true }));
    let repo = repo(&transport, &Pauses::default());

    let err = repo.get(RaindropId::new(5)).await.unwrap_err();
    assert!(matches!(err, Error::Mapping(_)));
}
