use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PostClientResult;
use crate::models::{Comment, NewPost, Post};

/// Идентификатор автора, с которым создаются все посты.
pub const DEFAULT_AUTHOR_ID: i64 = 1;

/// Контракт удалённого сервиса постов.
///
/// Каждый вызов это отдельный запрос: без ретраев, кэша и пагинации.
#[async_trait]
pub trait PostApi: Send + Sync {
    /// Возвращает все посты в порядке, который отдал сервер.
    async fn list_posts(&self) -> PostClientResult<Vec<Post>>;

    /// Создаёт пост от имени [`DEFAULT_AUTHOR_ID`] и возвращает ответ сервера.
    ///
    /// Демо-API не сохраняет пост, в следующих `list_posts` его может не быть.
    async fn create_post(&self, post: &NewPost) -> PostClientResult<Post>;

    /// Удаляет пост. Любой успешный ответ считается удалением, в том числе
    /// для несуществующего `id`.
    async fn delete_post(&self, id: i64) -> PostClientResult<()>;

    /// Возвращает комментарии поста `post_id`.
    async fn list_comments(&self, post_id: i64) -> PostClientResult<Vec<Comment>>;
}

#[async_trait]
impl<T: PostApi + ?Sized> PostApi for Arc<T> {
    async fn list_posts(&self) -> PostClientResult<Vec<Post>> {
        (**self).list_posts().await
    }

    async fn create_post(&self, post: &NewPost) -> PostClientResult<Post> {
        (**self).create_post(post).await
    }

    async fn delete_post(&self, id: i64) -> PostClientResult<()> {
        (**self).delete_post(id).await
    }

    async fn list_comments(&self, post_id: i64) -> PostClientResult<Vec<Comment>> {
        (**self).list_comments(post_id).await
    }
}
