//! Credential context for the Stream API
//!
//! Account identity plus the endpoints derived from it, fixed for the
//! lifetime of a client.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, StreamError};

/// Fixed API host all requests are issued against.
pub const API_HOST: &str = "api.cloudflare.com";

/// Validated account identity and the endpoints derived from it.
///
/// Constructed once per client; every field is immutable afterwards.
///
/// # Security
///
/// The account key is a secret. The `Debug` implementation redacts it.
///
/// # Examples
///
/// ```
/// use core_stream::Credentials;
///
/// let credentials = Credentials::new("023e105f", "user@example.com", "c2547eb7").unwrap();
/// assert_eq!(credentials.collection_path(), "/client/v4/zones/023e105f/media");
/// ```
#[derive(Clone)]
pub struct Credentials {
    zone: String,
    email: String,
    key: String,
    collection_path: String,
    upload_endpoint: String,
}

impl Credentials {
    /// Validate the identity fields and derive the API endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Configuration`] when any field is empty.
    pub fn new(
        zone: impl Into<String>,
        email: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self> {
        let zone = zone.into();
        let email = email.into();
        let key = key.into();

        for (field, value) in [("zone", &zone), ("email", &email), ("key", &key)] {
            if value.is_empty() {
                return Err(StreamError::Configuration(format!(
                    "{{ zone, email, key }} with non-empty {field}"
                )));
            }
        }

        let collection_path = format!("/client/v4/zones/{zone}/media");
        let upload_endpoint = format!("https://{API_HOST}{collection_path}");

        Ok(Self {
            zone,
            email,
            key,
            collection_path,
            upload_endpoint,
        })
    }

    /// Zone (tenant) identifier the client is scoped to
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Account email identity
    pub fn email(&self) -> &str {
        &self.email
    }

    /// REST path of the video collection for this zone
    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    /// Fully-qualified endpoint upload sessions are created against
    pub fn upload_endpoint(&self) -> &str {
        &self.upload_endpoint
    }

    /// Mandatory identity headers sent with every request and session.
    ///
    /// Built per call so nothing process-global ever holds the key.
    pub fn identity_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("X-Auth-Email".to_string(), self.email.clone());
        headers.insert("X-Auth-Key".to_string(), self.key.clone());
        headers
    }
}

// Custom Debug implementation to avoid logging the account key
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("zone", &self.zone)
            .field("email", &self.email)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
