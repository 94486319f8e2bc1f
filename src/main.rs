use anyhow::{Context, Result};
use campus_connect::home::{self, Destination, Notification};
use campus_connect::models::{available_models, ModelDownloader, SPECIAL_TOKENS};
use campus_connect::screens::internship_page;
use campus_connect::version::{
    BrowserOpener, FirestoreVersionSource, GateSettings, StaticPrompt, TerminalPrompt,
    UpdateChoice, UpdatePrompt, UrlOpener, VersionGate,
};
use campus_connect::{AppConfig, PreferencesStore};
use chrono::Timelike;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "campus-connect", version, about = "Campus Connect companion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the once-a-day update check
    CheckVersion {
        /// Accept the update without asking
        #[arg(long, conflicts_with = "no")]
        yes: bool,
        /// Decline the update without asking
        #[arg(long)]
        no: bool,
    },
    /// List downloadable models
    Models {
        #[arg(long)]
        json: bool,
    },
    /// Download a model by its position in the list (1-based)
    Download {
        index: usize,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show the home menu, or resolve one entry
    Menu {
        #[arg(long)]
        authenticated: bool,
        #[arg(long)]
        select: Option<u8>,
        /// Open the selected entry when it is an external link
        #[arg(long, requires = "select")]
        open: bool,
    },
    /// Print the home screen greeting
    Greet {
        #[arg(long)]
        hour: Option<u32>,
    },
    /// Print the share message
    Share,
    /// Print the internship info page
    Internship,
    /// Tell whether a JSON notification list has unread entries
    Notifications { file: PathBuf },
}

struct AppState {
    config: AppConfig,
    store: Arc<PreferencesStore>,
}

impl AppState {
    fn new() -> Result<Self> {
        let config = AppConfig::load().context("Failed to load configuration")?;
        let store = PreferencesStore::new().context("Failed to open preferences")?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_connect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Only the commands that read or write preferences open them
    match cli.command {
        Command::CheckVersion { yes, no } => check_version(&AppState::new()?, yes, no).await,
        Command::Models { json } => list_models(json),
        Command::Download { index, dir } => download_model(index, dir).await,
        Command::Menu {
            authenticated,
            select,
            open,
        } => show_menu(authenticated, select, open),
        Command::Greet { hour } => greet(&AppState::new()?, hour).await,
        Command::Share => {
            println!("{}", home::SHARE_MESSAGE);
            Ok(())
        }
        Command::Internship => {
            println!("{}", serde_json::to_string_pretty(&internship_page())?);
            Ok(())
        }
        Command::Notifications { file } => notifications(&file),
    }
}

async fn check_version(state: &AppState, yes: bool, no: bool) -> Result<()> {
    let prompt: Arc<dyn UpdatePrompt> = if yes {
        Arc::new(StaticPrompt(UpdateChoice::UpdateNow))
    } else if no {
        Arc::new(StaticPrompt(UpdateChoice::RemindTomorrow))
    } else {
        Arc::new(TerminalPrompt)
    };

    let gate = VersionGate::new(
        GateSettings::from_config(&state.config),
        state.store.clone(),
        Arc::new(FirestoreVersionSource::from_config(&state.config)),
        prompt,
        Arc::new(BrowserOpener),
    );

    let outcome = gate.check_app_version().await;
    info!("Version check finished: {:?}", outcome);
    Ok(())
}

fn list_models(json: bool) -> Result<()> {
    if json {
        let payload = serde_json::json!({
            "models": available_models(),
            "special_tokens": SPECIAL_TOKENS,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for (i, model) in available_models().iter().enumerate() {
        println!("{}. {} ({})\n   {}", i + 1, model.name, model.size, model.url);
    }
    Ok(())
}

async fn download_model(index: usize, dir: Option<PathBuf>) -> Result<()> {
    let model = index
        .checked_sub(1)
        .and_then(|i| available_models().get(i))
        .with_context(|| format!("No model at position {index}"))?;

    let models_dir = match dir {
        Some(dir) => dir,
        None => AppConfig::load()
            .context("Failed to load configuration")?
            .resolve_models_dir()?,
    };
    let downloader = ModelDownloader::new(models_dir);

    if downloader.is_installed(model) {
        println!("Already installed: {:?}", downloader.model_path(model));
        return Ok(());
    }

    let mut last_reported = -10.0_f32;
    let path = downloader
        .download_model(model, |p| {
            if p.progress - last_reported >= 10.0 {
                last_reported = p.progress;
                eprintln!("{:>5.1}% ({} / {} bytes)", p.progress, p.bytes, p.total);
            }
        })
        .await
        .with_context(|| format!("Download failed for {}", model.name))?;

    println!("{}", path.display());
    Ok(())
}

fn show_menu(authenticated: bool, select: Option<u8>, open: bool) -> Result<()> {
    let Some(id) = select else {
        for item in home::menu_items() {
            println!("{:>2}. {}", item.id, item.label);
        }
        return Ok(());
    };

    let item = home::menu_item(id).with_context(|| format!("No menu entry {id}"))?;
    let destination = item.resolve(authenticated);
    println!("{}", serde_json::to_string(&destination)?);

    if let (true, Destination::External(url)) = (open, &destination) {
        BrowserOpener
            .open(url)
            .with_context(|| format!("Failed to open {url}"))?;
    }
    Ok(())
}

async fn greet(state: &AppState, hour: Option<u32>) -> Result<()> {
    let hour = hour.unwrap_or_else(|| chrono::Local::now().hour());
    let name = home::load_user_name(state.store.as_ref()).await;
    println!("{}", home::greeting_line(hour, &name));
    Ok(())
}

fn notifications(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let list: Vec<Notification> =
        serde_json::from_str(&content).context("Failed to parse notifications")?;

    let unread = list.iter().filter(|n| !n.read).count();
    println!(
        "{} notification(s), {} unread{}",
        list.len(),
        unread,
        if home::has_unread(&list) { " (badge on)" } else { "" }
    );
    Ok(())
}
