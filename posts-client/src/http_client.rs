use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::api::{DEFAULT_AUTHOR_ID, PostApi};
use crate::error::{Operation, PostClientError, PostClientResult};
use crate::models::{Comment, NewPost, Post};

/// Базовый URL демо-API.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: i64,
}

impl<'a> From<&'a NewPost> for CreatePostRequestDto<'a> {
    fn from(value: &'a NewPost) -> Self {
        Self {
            title: &value.title,
            body: &value.body,
            user_id: DEFAULT_AUTHOR_ID,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API постов.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент для [`DEFAULT_BASE_URL`].
    pub fn new() -> PostClientResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Создаёт клиент с другим базовым URL (например, для локального mock-сервера).
    pub fn with_base_url(base_url: impl Into<String>) -> PostClientResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("posts-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL, на который уходят запросы.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// отправляет запрос и отсекает не-2xx ответы
    async fn send<TReq>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> PostClientResult<Response>
    where
        TReq: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(PostClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostClientError::Status(status));
        }
        debug!(%status, "request succeeded");

        Ok(response)
    }

    async fn decode_json<T: DeserializeOwned>(response: Response) -> PostClientResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(PostClientError::from_reqwest)?;
        serde_json::from_slice(&bytes).map_err(|err| PostClientError::Decode(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PostClientResult<T> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Self::decode_json(response).await
    }
}

fn log_failure(operation: Operation, err: &PostClientError) {
    warn!(operation = operation.name(), error = %err, "request failed");
}

#[async_trait]
impl PostApi for HttpClient {
    async fn list_posts(&self) -> PostClientResult<Vec<Post>> {
        self.get_json("/posts")
            .await
            .inspect_err(|err| log_failure(Operation::FetchPosts, err))
    }

    async fn create_post(&self, post: &NewPost) -> PostClientResult<Post> {
        let payload = CreatePostRequestDto::from(post);
        let result = match self.send(Method::POST, "/posts", Some(&payload)).await {
            Ok(response) => Self::decode_json(response).await,
            Err(err) => Err(err),
        };
        result.inspect_err(|err| log_failure(Operation::CreatePost, err))
    }

    async fn delete_post(&self, id: i64) -> PostClientResult<()> {
        // тело ответа не нужно, демо-API отдаёт `{}`
        self.send::<()>(Method::DELETE, &format!("/posts/{id}"), None)
            .await
            .map(|_| ())
            .inspect_err(|err| log_failure(Operation::DeletePost, err))
    }

    async fn list_comments(&self, post_id: i64) -> PostClientResult<Vec<Comment>> {
        self.get_json(&format!("/posts/{post_id}/comments"))
            .await
            .inspect_err(|err| log_failure(Operation::FetchComments, err))
    }
}
