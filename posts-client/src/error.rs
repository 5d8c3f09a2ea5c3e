use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `posts-client`.
///
/// Причина сохраняется для логов и тестов; пользователю показывается только
/// фиксированное сообщение операции, см. [`Operation::failure_message`].
pub enum PostClientError {
    /// Ошибка HTTP-транспорта (`reqwest`): сеть, таймаут, TLS.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("unexpected http status {0}")]
    Status(reqwest::StatusCode),

    /// Тело ответа не удалось разобрать как ожидаемый JSON.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `posts-client`.
pub type PostClientResult<T> = Result<T, PostClientError>;

impl PostClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status(status);
        }
        Self::Http(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Операция удалённого сервиса постов.
///
/// У каждой операции ровно одно сообщение об ошибке, независимо от причины.
pub enum Operation {
    /// `GET /posts`.
    FetchPosts,
    /// `POST /posts`.
    CreatePost,
    /// `DELETE /posts/{id}`.
    DeletePost,
    /// `GET /posts/{id}/comments`.
    FetchComments,
}

impl Operation {
    /// Фиксированный текст ошибки, который видит пользователь.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::FetchPosts => "Failed to fetch posts. Please try again.",
            Self::CreatePost => "Failed to create post. Please try again.",
            Self::DeletePost => "Failed to delete post. Please try again.",
            Self::FetchComments => "Failed to fetch comments. Please try again.",
        }
    }

    /// Короткое имя операции для логов.
    pub fn name(self) -> &'static str {
        match self {
            Self::FetchPosts => "list_posts",
            Self::CreatePost => "create_post",
            Self::DeletePost => "delete_post",
            Self::FetchComments => "list_comments",
        }
    }
}
