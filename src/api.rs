use crate::errors::FetchError;
use crate::models::ProfileData;
use tracing::debug;

pub const DEFAULT_ORIGIN: &str = "https://www.thanku.social";

/// Client for the public profile endpoint. One GET per call, no retries; the
/// three failure modes map onto the `FetchErrorKind` taxonomy.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    origin: String,
    client: reqwest::Client,
}

impl Default for ProfileClient {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl ProfileClient {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub async fn fetch_profile(&self, slug: &str) -> Result<ProfileData, FetchError> {
        let url = format!("{}/api/profile/{slug}", self.origin);
        debug!(%url, "fetching profile");

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|err| {
                debug!("profile request failed: {err}");
                FetchError::connection_problems("Connection problems")
            })?;

        if response.status().as_u16() >= 400 {
            return Err(FetchError::data_not_available("Data not available"));
        }

        // A body that cannot be read or decoded counts as malformed data,
        // not as a connection problem; the request itself already succeeded.
        let body = response
            .text()
            .await
            .map_err(|_| FetchError::data_malformed("Data malformed"))?;
        serde_json::from_str::<ProfileData>(&body).map_err(|err| {
            debug!("profile body did not parse: {err}");
            FetchError::data_malformed("Data malformed")
        })
    }
}
