use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tulu::{
    App, Backend, Config, HttpBackend, Role, SubmitError,
    config::parse_backend_url,
    routes,
    state::AppState,
    tutor::QUICK_QUESTIONS,
};

#[derive(Parser)]
#[command(name = "tulu", about = "Turkish tutor client and stub backend")]
struct Cli {
    /// Backend base url (overrides TULU_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the stub backend
    Serve {
        /// Bind address (overrides TULU_BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Chat with the tutor on stdin
    Chat,
    /// List scenes
    Scenes,
    /// Look up a word
    Word { word: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.backend_url {
        config.backend_url = parse_backend_url(url)?;
    }

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            serve(&config).await
        }
        Command::Chat => chat(&config).await,
        Command::Scenes => scenes(&config).await,
        Command::Word { word } => {
            let mut app = App::new(backend(&config)?);
            let entry = app.open_word(&word).await;
            println!("Word:          {}", entry.word);
            println!("Meaning:       {}", entry.meaning);
            println!("Pronunciation: {}", entry.pronunciation);
            println!("Example:       {}", entry.example);
            Ok(())
        }
    }
}

fn backend(config: &Config) -> anyhow::Result<Arc<dyn Backend>> {
    let backend = HttpBackend::from_config(config).context("building http client")?;
    Ok(Arc::new(backend))
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.session_ttl));

    let sessions = state.sessions.clone();
    let period = config.session_ttl;
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        loop {
            tick.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                info!(removed, "purged idle tutor sessions");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %listener.local_addr()?, "stub tutor backend listening");
    routes::serve(listener, state).await?;
    Ok(())
}

async fn scenes(config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(backend(config)?);
    app.load_scenes().await;
    for scene in app.home().scenes() {
        println!("[{}] {} ({} lines)", scene.id, scene.title, scene.transcript.len());
        for line in &scene.transcript {
            println!("    {}  /  {}", line.text, line.translation);
        }
    }
    Ok(())
}

async fn chat(config: &Config) -> anyhow::Result<()> {
    let app = App::new(backend(config)?);
    let tutor = app.tutor();

    let mut stdout = tokio::io::stdout();
    let mut shown = 0;
    print_new(&mut stdout, tutor, &mut shown).await?;
    stdout.write_all(b"Quick questions:\n").await?;
    for q in QUICK_QUESTIONS {
        stdout.write_all(format!("  - {q}\n").as_bytes()).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match tutor.submit(&line).await {
            Ok(_) => print_new(&mut stdout, tutor, &mut shown).await?,
            Err(SubmitError::EmptyQuestion) => continue,
            Err(err) => stdout.write_all(format!("! {err}\n").as_bytes()).await?,
        }
    }
    Ok(())
}

async fn print_new(
    out: &mut tokio::io::Stdout,
    tutor: &tulu::TutorConversation,
    shown: &mut usize,
) -> std::io::Result<()> {
    let messages = tutor.messages();
    for message in &messages[*shown..] {
        let who = match message.role() {
            Role::User => "you",
            Role::Assistant => "tulu",
        };
        let at = message.created_at().format("%H:%M");
        out.write_all(format!("[{at}] {who}: {}\n", message.content()).as_bytes())
            .await?;
    }
    *shown = messages.len();
    out.flush().await
}
