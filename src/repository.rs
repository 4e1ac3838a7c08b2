//! Operations on raindrops, single and bulk.
//!
//! Requests are issued strictly one after another. Bulk writes are split
//! into chunks of at most `max_items_per_request` raindrops, and consecutive
//! page or chunk requests are separated by the configured pause. A failing
//! request aborts the operation: chunks already sent stay applied and the
//! rest are never sent.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::{
    chunk,
    client::{Client, Method, Request, Transport},
    config::Config,
    models::{
        body::{BulkCreateBody, BulkUpdateBody, CreateBody, MoveBody, TagsBody, UpdateBody},
        envelope,
        raindrop::{Raindrop, RaindropId},
        url::Endpoints,
    },
    policy::{PagePicker, Pacer, RandomPage, Sleep},
    result::Result,
};

const NO_TAGS: &[String] = &[];

/// Repository over the raindrop endpoints.
pub struct RaindropIo {
    client: Client,
    urls: Endpoints,
    max_items_per_request: usize,
    per_page: u32,
    page_pause: Duration,
    overwrite_pause: Duration,
    pacer: Box<dyn Pacer>,
    picker: Box<dyn PagePicker>,
}

impl RaindropIo {
    /// Creates a repository talking to the network.
    pub fn new(config: Config) -> Self {
        let client = Client::new(&config.token);
        Self::with_client(config, client)
    }

    /// Creates a repository on top of a custom [`Transport`].
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        let client = Client::with_transport(&config.token, transport);
        Self::with_client(config, client)
    }

    fn with_client(config: Config, client: Client) -> Self {
        let Config {
            base_url,
            max_items_per_request,
            per_page,
            page_pause,
            overwrite_pause,
            ..
        } = config;
        Self {
            client,
            urls: Endpoints::new(&base_url),
            max_items_per_request,
            per_page,
            page_pause,
            overwrite_pause,
            pacer: Box::new(Sleep),
            picker: Box::new(RandomPage),
        }
    }

    /// Replaces the pause implementation.
    #[must_use]
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    /// Replaces the page choice used by [`RaindropIo::bulk_get_random`].
    #[must_use]
    pub fn with_picker(mut self, picker: impl PagePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Returns the endpoint URLs in use.
    pub fn endpoints(&self) -> &Endpoints {
        &self.urls
    }

    async fn send(&self, method: Method, url: String) -> Result<Value> {
        self.client.send(Request::new(method, url)).await
    }

    async fn send_json<B: Serialize>(&self, method: Method, url: String, body: &B) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.client.send(Request::new(method, url).json(body)).await
    }

    /// Fetches one raindrop.
    ///
    /// # Errors
    ///
    /// Fails on a non-2xx status or a malformed reply.
    pub async fn get(&self, id: RaindropId) -> Result<Raindrop> {
        let reply = self.send(Method::Get, self.urls.item(id.value())).await?;
        envelope::item(&reply)
    }

    /// Creates a raindrop and returns the stored version.
    ///
    /// The service is asked to parse the page and fill in missing metadata.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any request if the link is
    /// missing, otherwise on a non-2xx status or a malformed reply.
    ///
    /// [`Error::Validation`]: crate::error::Error::Validation
    pub async fn create(&self, raindrop: &Raindrop) -> Result<Raindrop> {
        let body = CreateBody::try_from(raindrop)?;
        let reply = self.send_json(Method::Post, self.urls.single(), &body).await?;
        envelope::item(&reply)
    }

    /// Replaces the tags of one raindrop.
    ///
    /// # Errors
    ///
    /// Fails on a non-2xx status or a malformed reply.
    pub async fn update_tags(&self, id: RaindropId, tags: &[String]) -> Result<Raindrop> {
        let body = TagsBody { tags };
        let reply = self
            .send_json(Method::Put, self.urls.item(id.value()), &body)
            .await?;
        envelope::item(&reply)
    }

    /// Writes the title and tags of `raindrop` to the raindrop `id`.
    ///
    /// Fields that are `None` on `raindrop` are left untouched.
    ///
    /// # Errors
    ///
    /// Fails on a non-2xx status or a malformed reply.
    pub async fn update(&self, id: RaindropId, raindrop: &Raindrop) -> Result<Raindrop> {
        let body = UpdateBody::from(raindrop);
        let reply = self
            .send_json(Method::Put, self.urls.item(id.value()), &body)
            .await?;
        envelope::item(&reply)
    }

    /// Moves one raindrop to another collection.
    ///
    /// # Errors
    ///
    /// Fails on a non-2xx status or a malformed reply.
    pub async fn update_collection(&self, id: RaindropId, collection_id: i64) -> Result<Raindrop> {
        let body = MoveBody::to(collection_id);
        let reply = self
            .send_json(Method::Put, self.urls.item(id.value()), &body)
            .await?;
        envelope::item(&reply)
    }

    /// Deletes one raindrop and returns the service's `result` flag.
    ///
    /// # Errors
    ///
    /// Fails on a non-2xx status or a malformed reply.
    pub async fn delete(&self, id: RaindropId) -> Result<bool> {
        let reply = self.send(Method::Delete, self.urls.item(id.value())).await?;
        envelope::result(&reply)
    }

    /// Fetches one page of a collection. Page `0` holds the newest raindrops.
    ///
    /// An empty list means `page` is past the end of the collection.
    ///
    /// # Errors
    ///
    /// Fails on a non-2xx status or a malformed reply.
    pub async fn bulk_get(&self, collection_id: i64, page: u32) -> Result<Vec<Raindrop>> {
        let request = Request::new(Method::Get, self.urls.collection(collection_id))
            .query("perpage", self.per_page.to_string())
            .query("page", page.to_string());
        let reply = self.client.send(request).await?;
        envelope::items(&reply)
    }

    /// Counts the pages of a collection by fetching pages until one is empty.
    ///
    /// Returns the index of the first empty page. Every call walks the
    /// collection again.
    ///
    /// # Errors
    ///
    /// Fails as soon as one page fetch fails.
    pub async fn total_pages(&self, collection_id: i64) -> Result<u32> {
        let mut page = 0;
        loop {
            if page > 0 {
                self.pacer.pause(self.page_pause).await;
            }
            if self.bulk_get(collection_id, page).await?.is_empty() {
                break;
            }
            page += 1;
        }
        log::debug!("collection {collection_id} has {page} pages");
        Ok(page)
    }

    /// Fetches every raindrop of a collection, newest page first.
    ///
    /// # Errors
    ///
    /// Fails as soon as one page fetch fails.
    pub async fn bulk_get_all(&self, collection_id: i64) -> Result<Vec<Raindrop>> {
        let total = self.total_pages(collection_id).await?;

        let mut raindrops = Vec::new();
        for page in 0..total {
            self.pacer.pause(self.page_pause).await;
            raindrops.extend(self.bulk_get(collection_id, page).await?);
            log::debug!("fetched page {}/{}", page + 1, total);
        }
        Ok(raindrops)
    }

    /// Fetches one page of a collection chosen by the page picker.
    ///
    /// An empty collection yields an empty list after the first probe.
    ///
    /// # Errors
    ///
    /// Fails as soon as one page fetch fails.
    pub async fn bulk_get_random(&self, collection_id: i64) -> Result<Vec<Raindrop>> {
        let total = self.total_pages(collection_id).await?;
        if total == 0 {
            return Ok(Vec::new());
        }
        let page = self.picker.pick(total);
        log::debug!("picked page {page} of {total}");
        self.pacer.pause(self.page_pause).await;
        self.bulk_get(collection_id, page).await
    }

    /// Creates many raindrops, `max_items_per_request` at a time.
    ///
    /// Returns the stored raindrops in input order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any request if any raindrop
    /// lacks a link. A failing chunk aborts the remaining ones.
    ///
    /// [`Error::Validation`]: crate::error::Error::Validation
    pub async fn bulk_create(&self, raindrops: &[Raindrop]) -> Result<Vec<Raindrop>> {
        let bodies = raindrops
            .iter()
            .map(CreateBody::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut created = Vec::with_capacity(raindrops.len());
        for (idx, chunk) in chunk::split(&bodies, self.max_items_per_request).enumerate() {
            if idx > 0 {
                self.pacer.pause(self.page_pause).await;
            }
            let body = BulkCreateBody { items: chunk };
            let reply = self.send_json(Method::Post, self.urls.bulk(), &body).await?;
            created.extend(envelope::items(&reply)?);
            log::debug!("created chunk {} ({} raindrops)", idx + 1, chunk.len());
        }
        Ok(created)
    }

    /// Sets tags on many raindrops of `src_collection_id`.
    ///
    /// Without `overwrite` the service merges `tags` into the existing ones.
    /// With `overwrite` the tags are first cleared, then set after the
    /// overwrite pause. Returns the modified count of the final update.
    /// An empty `raindrops` slice sends nothing and does not pause.
    ///
    /// # Errors
    ///
    /// See [`RaindropIo::bulk_update`].
    pub async fn bulk_update_tags(
        &self,
        src_collection_id: i64,
        tags: &[String],
        raindrops: &[Raindrop],
        overwrite: bool,
    ) -> Result<u64> {
        if raindrops.is_empty() {
            return Ok(0);
        }
        if overwrite {
            self.bulk_update(src_collection_id, raindrops, Some(NO_TAGS), None)
                .await?;
            self.pacer.pause(self.overwrite_pause).await;
        }
        self.bulk_update(src_collection_id, raindrops, Some(tags), None)
            .await
    }

    /// Updates many raindrops of `src_collection_id` at once.
    ///
    /// `tags` is sent only when `Some` (an empty slice clears tags).
    /// `dst_collection_id` moves the raindrops when it is non-zero.
    /// Returns the number of raindrops the service reports as modified,
    /// summed over all chunks.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any request if any raindrop
    /// lacks an id. A failing chunk aborts the remaining ones.
    ///
    /// [`Error::Validation`]: crate::error::Error::Validation
    pub async fn bulk_update(
        &self,
        src_collection_id: i64,
        raindrops: &[Raindrop],
        tags: Option<&[String]>,
        dst_collection_id: Option<i64>,
    ) -> Result<u64> {
        let ids = raindrops
            .iter()
            .map(|r| r.require_id().map(RaindropId::value))
            .collect::<Result<Vec<_>>>()?;

        let url = self.urls.collection(src_collection_id);
        let mut modified = 0;
        for (idx, chunk) in chunk::split(&ids, self.max_items_per_request).enumerate() {
            if idx > 0 {
                self.pacer.pause(self.page_pause).await;
            }
            let body = BulkUpdateBody::new(chunk.to_vec(), tags, dst_collection_id);
            let reply = self.send_json(Method::Put, url.clone(), &body).await?;
            modified += envelope::modified(&reply, chunk.len())?;
            log::debug!("updated chunk {} ({} raindrops)", idx + 1, chunk.len());
        }
        Ok(modified)
    }

    /// Moves many raindrops from `src_collection_id` to `dst_collection_id`.
    ///
    /// # Errors
    ///
    /// See [`RaindropIo::bulk_update`].
    pub async fn bulk_move(
        &self,
        src_collection_id: i64,
        raindrops: &[Raindrop],
        dst_collection_id: i64,
    ) -> Result<u64> {
        self.bulk_update(src_collection_id, raindrops, None, Some(dst_collection_id))
            .await
    }
}

impl std::fmt::Debug for RaindropIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaindropIo")
            .field("urls", &self.urls)
            .field("max_items_per_request", &self.max_items_per_request)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}
