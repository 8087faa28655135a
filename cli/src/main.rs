use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use client::config::{ClientConfig, ConfigError};
use client::form::Validation;
use client::nav::{Navigator, Route};
use client::net::{ApiError, HttpApi, ImageFile};
use client::notify::{Level, Notifier};
use client::session::{Session, SessionError, SessionProvider};
use client::state::create_post::{CreatePostState, SubmitError, SubmitOutcome};
use client::state::layout::{self, Layout};
use client::state::login::{LoginOutcome, LoginState};
use client::state::nearby::{LoadError, NearbyPosts};
use client::state::register::{RegisterOutcome, RegisterState};
use client::storage::{FileStorage, StorageError};
use tracing_subscriber::EnvFilter;
use wire::{Location, LocationError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to read {}: {source}", .path.display())]
    ReadImage { path: PathBuf, source: std::io::Error },
    #[error("unsupported image file {}; expected .jpg, .png, .gif or .webp", .0.display())]
    UnsupportedImage(PathBuf),
    #[error("invalid input")]
    Invalid,
    #[error("request rejected")]
    Rejected,
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "around", about = "Around social map client")]
struct Cli {
    /// Backend root URL. Falls back to the client default when unset.
    #[arg(long, env = "AROUND_API_ROOT")]
    api_root: Option<String>,

    /// JSON file holding the session token and cached position.
    #[arg(long, env = "AROUND_STATE_FILE", default_value = ".around-state.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Password confirmation; defaults to `--password`.
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the session token.
    Logout,
    Position(PositionCommand),
    /// Publish an image with a message at the cached position.
    Post {
        #[arg(long)]
        message: String,
        #[arg(long)]
        image: PathBuf,
    },
    /// List posts around the cached position.
    Nearby {
        /// Search radius in kilometres.
        #[arg(long)]
        range: Option<f64>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show which screen a path resolves to for the current session.
    Status {
        #[arg(long, default_value = "/home")]
        path: String,
    },
}

#[derive(Args, Debug)]
struct PositionCommand {
    #[command(subcommand)]
    command: PositionSubcommand,
}

#[derive(Subcommand, Debug)]
enum PositionSubcommand {
    /// Cache the current position.
    #[command(allow_negative_numbers = true)]
    Set { lat: f64, lon: f64 },
    Show,
}

/// Notifications go to the terminal: successes on stdout, errors on stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, level: Level, message: &str) {
        match level {
            Level::Success => println!("{message}"),
            Level::Error => eprintln!("error: {message}"),
        }
    }
}

/// There is no screen to switch, so a navigation is just reported.
#[derive(Default)]
struct TerminalNavigator {
    current: Option<Route>,
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(route = route.path(), "navigate");
        self.current = Some(route);
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_root) = cli.api_root {
        config.api_root = api_root;
    }
    let mut session = Session::new(FileStorage::open(&cli.state_file)?);

    match cli.command {
        Command::Register { username, password, confirm } => {
            run_register(&config, username, password, confirm).await
        }
        Command::Login { username, password } => run_login(&config, &mut session, username, password).await,
        Command::Logout => {
            let mut navigator = TerminalNavigator::default();
            layout::logout(&mut session, &mut navigator)?;
            println!("Logged out");
            Ok(())
        }
        Command::Position(position) => run_position(&mut session, position),
        Command::Post { message, image } => run_post(&config, &session, message, &image).await,
        Command::Nearby { range, json } => run_nearby(&config, &session, range, json).await,
        Command::Status { path } => {
            let layout = Layout::compose(&path, session.is_logged_in()?);
            println!("{} | {}", layout.top_bar.title, layout.main.path());
            if layout.top_bar.show_logout {
                println!("logged in (use `around logout` to sign out)");
            }
            Ok(())
        }
    }
}

fn report_invalid(errors: &Validation) -> CliError {
    for (field, message) in errors.errors() {
        eprintln!("{field}: {message}");
    }
    CliError::Invalid
}

async fn run_register(
    config: &ClientConfig,
    username: String,
    password: String,
    confirm: Option<String>,
) -> Result<(), CliError> {
    let api = HttpApi::new(config)?;
    let mut form = RegisterState::new();
    form.set_username(username);
    form.set_confirm(confirm.unwrap_or_else(|| password.clone()));
    form.confirm_blur();
    form.set_password(password);

    let mut navigator = TerminalNavigator::default();
    match form.submit(&api, &mut TerminalNotifier, &mut navigator).await {
        RegisterOutcome::Registered => {
            if navigator.current == Some(Route::Login) {
                println!("Next: around login --username <name> --password <password>");
            }
            Ok(())
        }
        RegisterOutcome::Invalid => Err(report_invalid(&form.errors)),
        RegisterOutcome::Failed => Err(CliError::Rejected),
    }
}

async fn run_login(
    config: &ClientConfig,
    session: &mut Session<FileStorage>,
    username: String,
    password: String,
) -> Result<(), CliError> {
    let api = HttpApi::new(config)?;
    let mut form = LoginState::new();
    form.set_username(username);
    form.set_password(password);

    let mut navigator = TerminalNavigator::default();
    match form.submit(&api, session, &mut TerminalNotifier, &mut navigator).await? {
        LoginOutcome::LoggedIn => {
            tracing::info!(state_file = %session.storage().path().display(), "token stored");
            Ok(())
        }
        LoginOutcome::Invalid => Err(report_invalid(&form.errors)),
        LoginOutcome::Failed => Err(CliError::Rejected),
    }
}

fn run_position(session: &mut Session<FileStorage>, position: PositionCommand) -> Result<(), CliError> {
    match position.command {
        PositionSubcommand::Set { lat, lon } => {
            session.set_position(Location::new(lat, lon)?)?;
            println!("Position set to {lat}, {lon}");
        }
        PositionSubcommand::Show => {
            let location = session.position()?;
            println!("{}", serde_json::to_string(&location)?);
        }
    }
    Ok(())
}

/// MIME type for an image path, judged by its extension.
fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn read_image(path: &Path) -> Result<ImageFile, CliError> {
    let content_type = content_type_for(path).ok_or_else(|| CliError::UnsupportedImage(path.to_path_buf()))?;
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadImage { path: path.to_path_buf(), source })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(ImageFile { file_name, content_type: content_type.to_owned(), bytes })
}

async fn run_post(
    config: &ClientConfig,
    session: &Session<FileStorage>,
    message: String,
    image: &Path,
) -> Result<(), CliError> {
    let api = HttpApi::new(config)?;
    let mut modal = CreatePostState::new(config.loc_shake);
    modal.show_modal();
    modal.set_message(message);
    modal.set_image(read_image(image)?);

    let mut nearby = NearbyPosts::new(config.search_range_km);
    let mut rng = rand::rng();
    let outcome = {
        let (api, nearby) = (&api, &mut nearby);
        modal
            .submit(api, session, &mut TerminalNotifier, &mut rng, move || async move {
                nearby.load(api, session).await
            })
            .await?
    };

    match outcome {
        SubmitOutcome::Created => {
            println!("{} posts nearby", nearby.markers().len());
            Ok(())
        }
        SubmitOutcome::Invalid => Err(report_invalid(&modal.errors)),
        SubmitOutcome::Failed | SubmitOutcome::Busy => Err(CliError::Rejected),
    }
}

async fn run_nearby(
    config: &ClientConfig,
    session: &Session<FileStorage>,
    range: Option<f64>,
    json: bool,
) -> Result<(), CliError> {
    let api = HttpApi::new(config)?;
    let mut nearby = NearbyPosts::new(range.or(config.search_range_km));
    nearby.load(&api, session).await?;

    if json {
        let posts: Vec<_> = nearby.posts().collect();
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    let center = session.position()?;
    if nearby.markers().is_empty() {
        println!("No posts nearby");
    }
    for marker in nearby.markers_mut() {
        marker.hover_enter();
        if let Some(info) = marker.info() {
            let distance = center.distance_km(&marker.position());
            println!("{}  ({distance:.1} km)\n    {}", info.caption, info.image_url);
        }
        marker.close();
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
