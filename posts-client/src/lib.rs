//! Клиентская библиотека для REST API постов (jsonplaceholder).
//!
//! Состоит из двух слоёв:
//! - [`PostApi`]: четыре сетевые операции (список постов, создание, удаление,
//!   комментарии поста) и их HTTP-реализация [`HttpClient`] на `reqwest`;
//! - экраны ([`PostDirectory`], [`PostComposer`], [`PostDetail`]), которые
//!   держат данные, статус загрузки и последние сообщения для пользователя.
#![warn(missing_docs)]

mod api;
mod error;
mod http_client;
mod models;
mod screens;

pub use api::{DEFAULT_AUTHOR_ID, PostApi};
pub use error::{Operation, PostClientError, PostClientResult};
pub use http_client::{DEFAULT_BASE_URL, HttpClient};
pub use models::{Comment, NewPost, Post};
pub use screens::{
    Feedback, LoadState, POST_CREATED_MESSAGE, POST_DELETED_MESSAGE, PostComposer, PostDetail,
    PostDirectory,
};
