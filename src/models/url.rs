/// Default base path of the REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

const SINGLE: &str = "/raindrop";
const BULK: &str = "/raindrops";

/// Builds the single-item and bulk endpoint URLs from a base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Creates endpoints rooted at `base`. Trailing slashes are dropped.
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base path.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/raindrop`
    pub fn single(&self) -> String {
        format!("{}{SINGLE}", self.base)
    }

    /// `{base}/raindrops`
    pub fn bulk(&self) -> String {
        format!("{}{BULK}", self.base)
    }

    /// `{base}/raindrop/{id}`
    pub fn item(&self, id: i64) -> String {
        format!("{}/{id}", self.single())
    }

    /// `{base}/raindrops/{collection_id}`
    pub fn collection(&self, collection_id: i64) -> String {
        format!("{}/{collection_id}", self.bulk())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints() {
        let urls = Endpoints::default();
        assert_eq!(urls.single(), "https://api.raindrop.io/rest/v1/raindrop");
        assert_eq!(urls.bulk(), "https://api.raindrop.io/rest/v1/raindrops");
    }

    #[test]
    fn keyed_endpoints() {
        let urls = Endpoints::new("http://localhost:8080/");
        assert_eq!(urls.item(42), "http://localhost:8080/raindrop/42");
        assert_eq!(urls.collection(-1), "http://localhost:8080/raindrops/-1");
    }
}
