//! Command-line front end: generate one comment for a post.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commentron::{
    generate_comment, CommentLength, CommentSession, CommentStyle, GeminiClient, PostProcessor,
    Settings, SourcePost, Tone, UserProfile,
};

#[derive(Parser)]
#[command(name = "commentron")]
#[command(about = "Generate a LinkedIn comment for a post")]
#[command(version)]
struct Cli {
    /// Post text. Read from stdin when omitted.
    post: Option<String>,

    /// Post author
    #[arg(long, default_value = "")]
    author: String,

    /// Post URL
    #[arg(long, default_value = "")]
    url: String,

    /// Settings file path (defaults to the user config directory)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[arg(long, value_enum)]
    tone: Option<Tone>,

    #[arg(long, value_enum)]
    length: Option<CommentLength>,

    #[arg(long, value_enum)]
    style: Option<CommentStyle>,

    /// Allow questions in the comment
    #[arg(long)]
    questions: bool,

    /// Commenter profile (JSON: name, headline, experience, skills) used as prompt context
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout carries only the comment.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

fn read_post(arg: Option<String>) -> Result<String> {
    let text = match arg {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read post from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("Post text is empty");
    }
    Ok(text)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if let Some(tone) = cli.tone {
        settings.generation.tone = tone;
    }
    if let Some(length) = cli.length {
        settings.generation.comment_length = length;
    }
    if let Some(style) = cli.style {
        settings.generation.comment_style = style;
    }
    if cli.questions {
        settings.generation.include_questions = true;
    }

    let post = SourcePost {
        content: read_post(cli.post)?,
        author: cli.author,
        url: cli.url,
    };

    let profile = cli
        .profile
        .as_deref()
        .map(UserProfile::load_from)
        .transpose()
        .context("Failed to load profile")?;

    let client = GeminiClient::from_settings(&settings)
        .context("Set geminiApiKey in settings or GEMINI_API_KEY in the environment")?;
    let filters = settings.phrase_filters().context("Invalid filter list in settings")?;
    let mut session = CommentSession::new(PostProcessor::new(filters));

    info!(author = %post.author, "post loaded");

    let comment = generate_comment(&client, &mut session, settings.generation_config(), &post, profile.as_ref())
        .await
        .context("Comment generation failed")?;

    println!("{}", comment);
    Ok(())
}
