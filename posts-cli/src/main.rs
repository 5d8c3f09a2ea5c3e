use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use posts_client::{Comment, Feedback, HttpClient, Post, PostComposer, PostDetail, PostDirectory};
use tracing::debug;

mod logging;
mod settings;

use logging::init_logging;
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "CLI клиент для jsonplaceholder posts API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список всех постов.
    List,
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Удаление поста по id, затем обновлённый список.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Пост и его комментарии.
    Show {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let settings = Settings::from_env();
    init_logging(&settings.log_level)?;
    debug!(command = ?cli.command, "running command");

    let client = HttpClient::new().context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::List => {
            let mut directory = PostDirectory::new(client);
            directory.load().await;
            report(directory.feedback())?;
            print_posts(directory.posts());
        }
        Command::Create { title, body } => {
            let mut composer = PostComposer::new(client);
            composer.submit(&title, &body).await;
            if let Some(post) = composer.last_created() {
                print_post("Ответ сервера", post);
            }
            report(composer.feedback())?;
            println!("Постов после обновления: {}", composer.posts().len());
        }
        Command::Delete { id } => {
            let mut directory = PostDirectory::new(client);
            directory.delete(id).await;
            report(directory.feedback())?;
            print_posts(directory.posts());
        }
        Command::Show { id } => {
            let mut directory = PostDirectory::new(client);
            directory.load().await;
            report(directory.feedback())?;

            let mut detail = directory
                .select(id)
                .ok_or_else(|| anyhow!("пост {id} не найден в списке"))?;
            detail.load().await;
            print_detail(&detail);
            report(detail.feedback())?;
        }
    }

    Ok(())
}

/// Печатает сообщение об успехе; сообщение об ошибке превращает в `Err`.
fn report(feedback: &Feedback) -> Result<()> {
    if let Some(success) = feedback.success() {
        println!("{success}");
    }
    match feedback.error() {
        Some(error) => Err(anyhow!(error.to_string())),
        None => Ok(()),
    }
}

fn format_post_line(post: &Post) -> String {
    format!("- [{}] {} (user_id={})", post.id, post.title, post.user_id)
}

fn format_comments(comments: &[Comment]) -> Vec<String> {
    if comments.is_empty() {
        return vec!["(no comments)".to_string()];
    }

    comments
        .iter()
        .map(|comment| format!("- {} | {}\n  {}", comment.email, comment.name, comment.body))
        .collect()
}

fn print_posts(posts: &[Post]) {
    println!("Постов: {}", posts.len());
    for post in posts {
        println!("{}", format_post_line(post));
    }
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("body: {}", post.body);
    println!("user_id: {}", post.user_id);
}

fn print_detail(detail: &PostDetail<HttpClient>) {
    print_post("Пост", detail.post());
    println!("Комментарии:");
    for line in format_comments(detail.comments()) {
        println!("{line}");
    }
}
