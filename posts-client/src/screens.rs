//! Состояние экранов поверх [`PostApi`].
//!
//! Экран владеет своей копией данных, статусом загрузки и последним
//! сообщением. Ошибки сервиса здесь превращаются в фиксированный текст
//! операции и дальше не пробрасываются.
//!
//! Статус загрузки публикуется через `tokio::sync::watch`: пока операция
//! держит `&mut` экрана, наблюдатель из [`PostDirectory::subscribe`] видит
//! переход в [`LoadState::Loading`] и обратно.

use tokio::sync::watch;
use tracing::info;

use crate::api::PostApi;
use crate::error::Operation;
use crate::models::{Comment, NewPost, Post};

/// Сообщение после успешного создания поста.
pub const POST_CREATED_MESSAGE: &str = "Post created successfully!";
/// Сообщение после успешного удаления поста.
pub const POST_DELETED_MESSAGE: &str = "Post deleted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Статус загрузки данных экрана.
pub enum LoadState {
    /// Ещё ничего не запрашивали.
    #[default]
    Idle,
    /// Запрос в процессе.
    Loading,
    /// Последний запрос завершился успешно.
    Ready,
    /// Последний запрос завершился ошибкой.
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Последние сообщения экрана: об ошибке и об успехе.
pub struct Feedback {
    error: Option<String>,
    success: Option<String>,
}

impl Feedback {
    /// Текущее сообщение об ошибке.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Текущее сообщение об успехе.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Фиксированное сообщение об ошибке операции; сообщение об успехе сбрасывается.
    pub fn failed(operation: Operation) -> Self {
        let mut feedback = Self::default();
        feedback.fail(operation);
        feedback
    }

    fn succeed(&mut self, message: &str) {
        self.error = None;
        self.success = Some(message.to_string());
    }

    fn fail(&mut self, operation: Operation) {
        self.error = Some(operation.failure_message().to_string());
        self.success = None;
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}

#[derive(Debug)]
struct LoadTracker {
    tx: watch::Sender<LoadState>,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self {
            tx: watch::Sender::new(LoadState::Idle),
        }
    }
}

impl LoadTracker {
    fn get(&self) -> LoadState {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.tx.subscribe()
    }

    fn begin(&self) -> LoadingGuard<'_> {
        let previous = self.tx.send_replace(LoadState::Loading);
        LoadingGuard {
            tx: &self.tx,
            previous,
            settled: false,
        }
    }
}

/// Держит экран в `Loading` до `settle`. Если future запроса бросили
/// раньше, возвращает статус, который был до начала загрузки.
struct LoadingGuard<'a> {
    tx: &'a watch::Sender<LoadState>,
    previous: LoadState,
    settled: bool,
}

impl LoadingGuard<'_> {
    fn settle(mut self, next: LoadState) {
        self.settled = true;
        self.tx.send_replace(next);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.tx.send_replace(self.previous);
        }
    }
}

#[derive(Debug, Default)]
struct PostList {
    posts: Vec<Post>,
    load: LoadTracker,
}

impl PostList {
    async fn fetch<A: PostApi>(&mut self, api: &A, feedback: &mut Feedback) {
        let guard = self.load.begin();

        match api.list_posts().await {
            Ok(posts) => {
                info!(count = posts.len(), "posts loaded");
                self.posts = posts;
                guard.settle(LoadState::Ready);
                feedback.clear_error();
            }
            Err(_) => {
                // прежний список остаётся на экране
                guard.settle(LoadState::Failed);
                feedback.fail(Operation::FetchPosts);
            }
        }
    }
}

/// Экран списка постов: загрузка, обновление, удаление.
pub struct PostDirectory<A> {
    api: A,
    list: PostList,
    feedback: Feedback,
}

impl<A: PostApi> PostDirectory<A> {
    /// Создаёт пустой экран в состоянии [`LoadState::Idle`].
    pub fn new(api: A) -> Self {
        Self {
            api,
            list: PostList::default(),
            feedback: Feedback::default(),
        }
    }

    /// Первичная загрузка при открытии экрана.
    pub async fn load(&mut self) {
        self.list.fetch(&self.api, &mut self.feedback).await;
    }

    /// Повторная загрузка по запросу пользователя.
    pub async fn refresh(&mut self) {
        info!("refreshing posts");
        self.list.fetch(&self.api, &mut self.feedback).await;
    }

    /// Удаляет пост и при успехе перезагружает список.
    pub async fn delete(&mut self, id: i64) {
        match self.api.delete_post(id).await {
            Ok(()) => {
                info!(post_id = id, "post deleted");
                self.feedback.succeed(POST_DELETED_MESSAGE);
                self.after_mutation().await;
            }
            Err(_) => self.feedback.fail(Operation::DeletePost),
        }
    }

    async fn after_mutation(&mut self) {
        self.refresh().await;
    }

    /// Открывает экран комментариев для поста из текущего списка.
    pub fn select(&self, id: i64) -> Option<PostDetail<A>>
    where
        A: Clone,
    {
        self.list
            .posts
            .iter()
            .find(|post| post.id == id)
            .map(|post| PostDetail::new(self.api.clone(), post.clone()))
    }

    /// Посты в порядке, полученном от сервера.
    pub fn posts(&self) -> &[Post] {
        &self.list.posts
    }

    /// Статус загрузки списка.
    pub fn state(&self) -> LoadState {
        self.list.load.get()
    }

    /// Подписка на статус загрузки списка, в том числе во время запроса.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.list.load.subscribe()
    }

    /// Идёт ли сейчас загрузка списка.
    pub fn is_refreshing(&self) -> bool {
        self.state() == LoadState::Loading
    }

    /// Последние сообщения экрана.
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}

/// Экран создания поста.
pub struct PostComposer<A> {
    api: A,
    list: PostList,
    last_created: Option<Post>,
    feedback: Feedback,
}

impl<A: PostApi> PostComposer<A> {
    /// Создаёт экран без данных.
    pub fn new(api: A) -> Self {
        Self {
            api,
            list: PostList::default(),
            last_created: None,
            feedback: Feedback::default(),
        }
    }

    /// Отправляет новый пост и при успехе перезагружает список.
    pub async fn submit(&mut self, title: &str, body: &str) {
        let draft = NewPost::new(title, body);

        match self.api.create_post(&draft).await {
            Ok(created) => {
                info!(post_id = created.id, "post created");
                self.last_created = Some(created);
                self.feedback.succeed(POST_CREATED_MESSAGE);
                self.after_mutation().await;
            }
            Err(_) => self.feedback.fail(Operation::CreatePost),
        }
    }

    async fn after_mutation(&mut self) {
        self.list.fetch(&self.api, &mut self.feedback).await;
    }

    /// Пост, который сервер вернул на последний успешный `submit`.
    pub fn last_created(&self) -> Option<&Post> {
        self.last_created.as_ref()
    }

    /// Список постов после последней перезагрузки.
    pub fn posts(&self) -> &[Post] {
        &self.list.posts
    }

    /// Статус загрузки списка.
    pub fn state(&self) -> LoadState {
        self.list.load.get()
    }

    /// Подписка на статус загрузки списка.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.list.load.subscribe()
    }

    /// Последние сообщения экрана.
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}

/// Экран поста с комментариями.
pub struct PostDetail<A> {
    api: A,
    post: Post,
    comments: Vec<Comment>,
    load: LoadTracker,
    feedback: Feedback,
}

impl<A: PostApi> PostDetail<A> {
    /// Создаёт экран для выбранного поста.
    pub fn new(api: A, post: Post) -> Self {
        Self {
            api,
            post,
            comments: Vec::new(),
            load: LoadTracker::default(),
            feedback: Feedback::default(),
        }
    }

    /// Загружает комментарии поста.
    pub async fn load(&mut self) {
        let guard = self.load.begin();

        match self.api.list_comments(self.post.id).await {
            Ok(comments) => {
                info!(post_id = self.post.id, count = comments.len(), "comments loaded");
                self.comments = comments;
                guard.settle(LoadState::Ready);
                self.feedback.clear_error();
            }
            Err(_) => {
                guard.settle(LoadState::Failed);
                self.feedback.fail(Operation::FetchComments);
            }
        }
    }

    /// Выбранный пост.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Комментарии в порядке, полученном от сервера.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Статус загрузки комментариев.
    pub fn state(&self) -> LoadState {
        self.load.get()
    }

    /// Подписка на статус загрузки комментариев.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.load.subscribe()
    }

    /// Последние сообщения экрана.
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}
