//! Cloudflare Stream API client
//!
//! Request normalization against the Stream REST surface plus the fixed
//! convenience operations, over host-injected transport capabilities.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::FileSystemAccess;
use bridge_traits::upload::UploadEngine;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::credentials::{Credentials, API_HOST};
use crate::error::{Result, StreamError};
use crate::options::{RequestOptions, RequestTarget, ResourceView};

/// External collaborators the client delegates to.
///
/// Bundled once at construction and shared by every call; none of them is
/// ever mutated.
pub struct StreamDependencies {
    /// Transport for the REST surface
    pub http_client: Arc<dyn HttpClient>,
    /// Resumable chunked-upload engine
    pub upload_engine: Arc<dyn UploadEngine>,
    /// Local reads for path-shaped upload input
    pub filesystem: Arc<dyn FileSystemAccess>,
}

impl StreamDependencies {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        upload_engine: Arc<dyn UploadEngine>,
        filesystem: Arc<dyn FileSystemAccess>,
    ) -> Self {
        Self {
            http_client,
            upload_engine,
            filesystem,
        }
    }
}

/// Cloudflare Stream client
///
/// One convenience object binding the Stream REST API and a resumable
/// upload engine. Cheap to clone; clones share the same credentials and
/// collaborators, and concurrent calls are safe because no call mutates
/// shared state.
///
/// # Example
///
/// ```ignore
/// use core_stream::{Credentials, StreamClient, StreamDependencies};
///
/// let credentials = Credentials::new(zone, email, key)?;
/// let client = StreamClient::new(credentials, deps);
/// let videos = client.list_videos().await?;
/// ```
#[derive(Clone)]
pub struct StreamClient {
    credentials: Credentials,
    deps: Arc<StreamDependencies>,
}

impl StreamClient {
    /// Create a new client from validated credentials and the collaborator
    /// bundle.
    pub fn new(credentials: Credentials, deps: StreamDependencies) -> Self {
        Self {
            credentials,
            deps: Arc::new(deps),
        }
    }

    /// Credentials and derived endpoints this client operates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Access the collaborator bundle, e.g. to reach the upload engine
    /// directly.
    pub fn dependencies(&self) -> Arc<StreamDependencies> {
        Arc::clone(&self.deps)
    }

    /// Build the REST path for a set of request options.
    ///
    /// Collection path, plus `/{id}` when an id is given, plus `/{view}`
    /// when the view parses as a known sub-resource. Unrecognized views,
    /// and views without an id, drop out silently.
    pub fn path(&self, options: &RequestOptions) -> String {
        let mut path = self.credentials.collection_path().to_string();
        if let Some(id) = options.id.as_deref() {
            path.push('/');
            path.push_str(id);
            if let Some(view) = options.view.as_deref().and_then(ResourceView::parse) {
                path.push('/');
                path.push_str(view.as_str());
            }
        }
        path
    }

    /// Issue a request against the Stream API.
    ///
    /// Accepts either a literal path / absolute URL (used as-is with GET
    /// and no extra headers) or structured [`RequestOptions`]. The
    /// mandatory identity headers are always sent; caller headers layer on
    /// top and may override values but never remove them.
    ///
    /// # Errors
    ///
    /// [`StreamError::Api`] when the decoded body carries a non-empty
    /// error list, [`StreamError::Transport`] on connection-level failure.
    /// HTTP status alone never fails a request; classification is driven
    /// by the body.
    #[instrument(skip(self, target))]
    pub async fn request(&self, target: impl Into<RequestTarget>) -> Result<Value> {
        let (path, options) = match target.into() {
            RequestTarget::Path(path) => (path, RequestOptions::default()),
            RequestTarget::Options(options) => (self.path(&options), options),
        };

        // The upload follow-up passes the session location, which is
        // already absolute.
        let url = if path.starts_with("https://") || path.starts_with("http://") {
            path
        } else {
            format!("https://{API_HOST}{path}")
        };

        let method = options.method.unwrap_or(HttpMethod::Get);
        debug!(%url, ?method, "Stream API request");

        let mut request = HttpRequest::new(method, url)
            .headers(self.credentials.identity_headers())
            .headers(options.headers);
        if let Some(payload) = options.payload {
            request = request.body(payload);
        }

        let response = self
            .deps
            .http_client
            .execute(request)
            .await
            .map_err(StreamError::from_bridge)?;

        normalize_response(&response)
    }

    /// List every video in the zone.
    #[instrument(skip(self))]
    pub async fn list_videos(&self) -> Result<Value> {
        self.request(RequestOptions::new()).await
    }

    /// Fetch one video record by id.
    #[instrument(skip(self))]
    pub async fn get_video(&self, id: &str) -> Result<Value> {
        self.request(RequestOptions::new().id(id)).await
    }

    /// Fetch the preview link for a video.
    #[instrument(skip(self))]
    pub async fn get_preview_link(&self, id: &str) -> Result<Value> {
        self.request(RequestOptions::new().id(id).view(ResourceView::Preview.as_str()))
            .await
    }

    /// Fetch the embeddable player snippet for a video.
    #[instrument(skip(self))]
    pub async fn get_embed_code(&self, id: &str) -> Result<Value> {
        self.request(RequestOptions::new().id(id).view(ResourceView::Embed.as_str()))
            .await
    }

    /// Delete a video by id.
    #[instrument(skip(self))]
    pub async fn delete_video(&self, id: &str) -> Result<Value> {
        self.request(RequestOptions::new().id(id).method(HttpMethod::Delete))
            .await
    }
}

/// Classify a response by its body.
///
/// Valid JSON with a non-empty `errors` list fails with that list
/// verbatim; valid JSON otherwise yields the `result` field when present
/// and non-null, else the whole value; anything that is not JSON passes
/// through as raw text.
fn normalize_response(response: &HttpResponse) -> Result<Value> {
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(decoded) => {
            if let Some(errors) = decoded.get("errors").and_then(Value::as_array) {
                if !errors.is_empty() {
                    return Err(StreamError::Api(errors.clone()));
                }
            }
            match decoded.get("result") {
                Some(result) if !result.is_null() => Ok(result.clone()),
                _ => Ok(decoded),
            }
        }
        Err(_) => Ok(Value::String(
            String::from_utf8_lossy(&response.body).into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::BridgeError;
    use bridge_traits::storage::FileMetadata;
    use bridge_traits::upload::{SessionOptions, UploadEvents, UploadSession};
    use bytes::Bytes;
    use mockall::mock;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::Path;

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> bridge_traits::error::Result<HttpResponse>;
        }
    }

    mock! {
        Engine {}

        #[async_trait]
        impl UploadEngine for Engine {
            async fn start(
                &self,
                input: Bytes,
                options: SessionOptions,
                events: UploadEvents,
            ) -> bridge_traits::error::Result<Arc<dyn UploadSession>>;
        }
    }

    mock! {
        Fs {}

        #[async_trait]
        impl FileSystemAccess for Fs {
            async fn exists(&self, path: &Path) -> bridge_traits::error::Result<bool>;
            async fn metadata(&self, path: &Path) -> bridge_traits::error::Result<FileMetadata>;
            async fn read_file(&self, path: &Path) -> bridge_traits::error::Result<Bytes>;
        }
    }

    fn test_client(http: MockHttp) -> StreamClient {
        let credentials = Credentials::new("zone1", "user@example.com", "secret").unwrap();
        // Engine and filesystem mocks carry no expectations: these tests
        // must never touch them.
        let deps = StreamDependencies::new(
            Arc::new(http),
            Arc::new(MockEngine::new()),
            Arc::new(MockFs::new()),
        );
        StreamClient::new(credentials, deps)
    }

    fn json_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_path_collection() {
        let client = test_client(MockHttp::new());
        assert_eq!(
            client.path(&RequestOptions::new()),
            "/client/v4/zones/zone1/media"
        );
    }

    #[test]
    fn test_path_with_id() {
        let client = test_client(MockHttp::new());
        assert_eq!(
            client.path(&RequestOptions::new().id("X")),
            "/client/v4/zones/zone1/media/X"
        );
    }

    #[test]
    fn test_path_with_known_view() {
        let client = test_client(MockHttp::new());
        assert_eq!(
            client.path(&RequestOptions::new().id("X").view("preview")),
            "/client/v4/zones/zone1/media/X/preview"
        );
        assert_eq!(
            client.path(&RequestOptions::new().id("X").view("embed")),
            "/client/v4/zones/zone1/media/X/embed"
        );
    }

    #[test]
    fn test_path_ignores_unknown_view() {
        let client = test_client(MockHttp::new());
        assert_eq!(
            client.path(&RequestOptions::new().id("X").view("bogus")),
            client.path(&RequestOptions::new().id("X"))
        );
    }

    #[test]
    fn test_path_ignores_view_without_id() {
        let client = test_client(MockHttp::new());
        assert_eq!(
            client.path(&RequestOptions::new().view("preview")),
            "/client/v4/zones/zone1/media"
        );
    }

    #[tokio::test]
    async fn test_request_unwraps_result_field() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(r#"{"result":{"foo":1}}"#)));

        let client = test_client(http);
        let value = client.request(RequestOptions::new()).await.unwrap();
        assert_eq!(value, json!({"foo": 1}));
    }

    #[tokio::test]
    async fn test_request_returns_whole_body_without_result() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(r#"{"bar":2}"#)));

        let client = test_client(http);
        let value = client.request(RequestOptions::new()).await.unwrap();
        assert_eq!(value, json!({"bar": 2}));
    }

    #[tokio::test]
    async fn test_request_empty_errors_list_is_success() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(r#"{"errors":[],"result":{"ok":true}}"#)));

        let client = test_client(http);
        let value = client.request(RequestOptions::new()).await.unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_request_fails_with_error_list_verbatim() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(r#"{"errors":["e1"]}"#)));

        let client = test_client(http);
        let err = client.request(RequestOptions::new()).await.unwrap_err();
        match err {
            StreamError::Api(errors) => assert_eq!(errors, vec![json!("e1")]),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_passes_non_json_body_through() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response("<html>")));

        let client = test_client(http);
        let value = client.request(RequestOptions::new()).await.unwrap();
        assert_eq!(value, Value::String("<html>".to_string()));
    }

    #[tokio::test]
    async fn test_request_sends_identity_headers() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .withf(|request| {
                request.headers.get("X-Auth-Email") == Some(&"user@example.com".to_string())
                    && request.headers.get("X-Auth-Key") == Some(&"secret".to_string())
            })
            .returning(|_| Ok(json_response("{}")));

        let client = test_client(http);
        client.request(RequestOptions::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_caller_headers_override_but_never_remove_identity() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .withf(|request| {
                // overridden value, key still present alongside the other
                // identity header
                request.headers.get("X-Auth-Email") == Some(&"override@example.com".to_string())
                    && request.headers.get("X-Auth-Key") == Some(&"secret".to_string())
            })
            .returning(|_| Ok(json_response("{}")));

        let client = test_client(http);
        client
            .request(RequestOptions::new().header("X-Auth-Email", "override@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_request_sends_payload() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .withf(|request| {
                request.method == HttpMethod::Post
                    && request.body.as_deref() == Some(b"payload bytes".as_slice())
            })
            .returning(|_| Ok(json_response("{}")));

        let client = test_client(http);
        client
            .request(
                RequestOptions::new()
                    .method(HttpMethod::Post)
                    .payload("payload bytes"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_string_target_used_as_path_with_get() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.url == "https://api.cloudflare.com/client/v4/zones/zone1/media/X"
            })
            .returning(|_| Ok(json_response("{}")));

        let client = test_client(http);
        client
            .request("/client/v4/zones/zone1/media/X")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_absolute_url_target_used_verbatim() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .withf(|request| {
                request.url == "https://api.cloudflare.com/client/v4/zones/zone1/media/abc"
            })
            .returning(|_| Ok(json_response("{}")));

        let client = test_client(http);
        client
            .request("https://api.cloudflare.com/client/v4/zones/zone1/media/abc")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure_classifies_bridge_error() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::OperationFailed("connection refused".to_string())));

        let client = test_client(http);
        let err = client.request(RequestOptions::new()).await.unwrap_err();
        match err {
            StreamError::Transport(message) => {
                assert_eq!(message, "Bridge operation failed: connection refused")
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_video_uses_delete_method() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .withf(|request| {
                request.method == HttpMethod::Delete
                    && request.url.ends_with("/client/v4/zones/zone1/media/X")
            })
            .returning(|_| Ok(json_response(r#"{"result":{"deleted":true}}"#)));

        let client = test_client(http);
        let value = client.delete_video("X").await.unwrap();
        assert_eq!(value, json!({"deleted": true}));
    }

    #[tokio::test]
    async fn test_surface_operations_build_expected_paths() {
        let mut http = MockHttp::new();
        let mut expected = vec![
            "https://api.cloudflare.com/client/v4/zones/zone1/media",
            "https://api.cloudflare.com/client/v4/zones/zone1/media/X",
            "https://api.cloudflare.com/client/v4/zones/zone1/media/X/preview",
            "https://api.cloudflare.com/client/v4/zones/zone1/media/X/embed",
        ]
        .into_iter();
        http.expect_execute().times(4).returning(move |request| {
            assert_eq!(request.url, expected.next().unwrap());
            Ok(json_response("{}"))
        });

        let client = test_client(http);
        client.list_videos().await.unwrap();
        client.get_video("X").await.unwrap();
        client.get_preview_link("X").await.unwrap();
        client.get_embed_code("X").await.unwrap();
    }
}
