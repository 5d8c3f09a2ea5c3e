use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пост в том виде, в котором его отдаёт сервер.
pub struct Post {
    /// Идентификатор поста, назначается сервером.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Текст поста.
    pub body: String,
    /// Идентификатор автора (`userId` в JSON).
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Комментарий к посту. Только для чтения.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Идентификатор поста (`postId` в JSON).
    #[serde(rename = "postId")]
    pub post_id: i64,
    /// Имя (тема) комментария.
    pub name: String,
    /// Email автора комментария.
    pub email: String,
    /// Текст комментария.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Черновик поста: ещё без идентификатора.
pub struct NewPost {
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub body: String,
}

impl NewPost {
    /// Создаёт черновик из заголовка и текста.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
