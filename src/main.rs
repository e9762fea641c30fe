//! Docchat CLI
//!
//! Terminal front-end for the document assistant:
//! - Sign up / log in
//! - Ask questions and browse the chat history
//! - List, upload and delete documents
//! - Show and edit the profile
//!
//! Commands other than `login`, `signup` and `config` log in first when
//! credentials are given (`--email`/`--password` or `DOCCHAT_EMAIL`/
//! `DOCCHAT_PASSWORD`); the session lasts for the process.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docchat::*;

#[derive(Parser)]
#[command(name = "docchat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with your documents from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/docchat/config.toml or ./docchat.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Server URL, overrides the config file
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Account email
    #[arg(long, global = true, env = "DOCCHAT_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "DOCCHAT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check credentials against the server
    Login,

    /// Create an account
    Signup {
        /// Full name
        #[arg(long)]
        name: String,
    },

    /// Ask a question about your documents
    Ask {
        /// The question (words are joined with spaces)
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Show the chat history
    History,

    /// List uploaded documents
    Documents,

    /// Delete a document
    Delete {
        /// Document ID (see `documents`)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload documents (pdf, docx, txt, csv)
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// End the session
    Logout,

    /// Interactive session: type questions, `/help` for commands
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show name, email and picture
    Show,

    /// Change the name and/or password
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
    },

    /// Upload a new profile picture (png, jpg, jpeg, gif)
    Picture { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => match Config::try_load_default() {
            Ok(config) => (config, None),
            Err(e) => (Config::from_env(), Some(e)),
        },
    };
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }

    init_logging(&config.logging);
    if let Some(e) = load_error {
        tracing::warn!("{}; using defaults", e);
    }

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    tracing::info!(server = %config.server.base_url, "docchat v{}", env!("CARGO_PKG_VERSION"));

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let backend = Arc::new(HttpBackend::new(&config.server)?);
    let view = Arc::new(TerminalView::new(assume_yes));
    let auth = AuthController::new(backend.clone(), view.clone(), config.ui.clone());

    let outcome = match &cli.command {
        Commands::Login => {
            let (email, password) = credentials(&cli)?;
            auth.login(&LoginForm { email, password }).await
        }
        Commands::Signup { name } => {
            let (email, password) = credentials(&cli)?;
            auth.signup(&SignupForm {
                name: name.clone(),
                email,
                password,
            })
            .await
        }
        command => {
            if let (Some(email), Some(password)) = (&cli.email, &cli.password) {
                let form = LoginForm {
                    email: email.clone(),
                    password: password.clone(),
                };
                if !auth.login(&form).await.is_success() {
                    std::process::exit(1);
                }
            }

            let dashboard = Dashboard::new(backend.clone(), view.clone(), config.ui.clone());
            run_command(&dashboard, backend.as_ref(), &view, command).await?
        }
    };

    if matches!(outcome, Outcome::Rejected | Outcome::Declined | Outcome::Failed) {
        std::process::exit(1);
    }
    Ok(())
}

fn credentials(cli: &Cli) -> anyhow::Result<(String, String)> {
    match (&cli.email, &cli.password) {
        (Some(email), Some(password)) => Ok((email.clone(), password.clone())),
        _ => anyhow::bail!("--email and --password (or DOCCHAT_EMAIL/DOCCHAT_PASSWORD) are required"),
    }
}

async fn run_command(
    dashboard: &Dashboard<HttpBackend, TerminalView>,
    backend: &HttpBackend,
    view: &Arc<TerminalView>,
    command: &Commands,
) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Commands::Ask { question } => dashboard.submit_question(&question.join(" ")).await,
        Commands::History => {
            dashboard.show_section(Section::Chat).await;
            Outcome::Succeeded
        }
        Commands::Documents => {
            dashboard.show_section(Section::Documents).await;
            Outcome::Succeeded
        }
        Commands::Delete { id, .. } => dashboard.delete_document(id).await,
        Commands::Upload { paths } => {
            dashboard.show_section(Section::Upload).await;
            let outcomes = dashboard.handle_files(read_files(paths).await?).await;
            Outcome::worst(&outcomes)
        }
        Commands::Profile { action } => run_profile(dashboard, backend, action).await?,
        Commands::Logout => {
            dashboard.logout().await;
            Outcome::Succeeded
        }
        Commands::Shell => {
            run_shell(dashboard, view).await?;
            Outcome::Succeeded
        }
        Commands::Login | Commands::Signup { .. } | Commands::Config { .. } => Outcome::Skipped,
    };

    Ok(outcome)
}

async fn run_profile(
    dashboard: &Dashboard<HttpBackend, TerminalView>,
    backend: &HttpBackend,
    action: &ProfileCommand,
) -> anyhow::Result<Outcome> {
    let outcome = match action {
        ProfileCommand::Show => {
            dashboard.show_section(Section::Profile).await;
            Outcome::Succeeded
        }
        ProfileCommand::Update { name, new_password } => {
            // The service overwrites the name on every update
            let name = match name {
                Some(name) => name.clone(),
                None => backend
                    .user_info()
                    .await?
                    .user
                    .map(|user| user.name)
                    .context("not logged in")?,
            };
            dashboard
                .update_profile(&ProfileForm {
                    name,
                    password: new_password.clone().unwrap_or_default(),
                })
                .await
        }
        ProfileCommand::Picture { path } => {
            let file = UploadFile::from_path(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            dashboard.upload_profile_picture(file).await
        }
    };

    Ok(outcome)
}

async fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

const SHELL_HELP: &str = "\
Type a question to ask it, or one of:
  /chat                 show the chat history
  /documents            list documents
  /upload <path>...     upload documents
  /delete <id>          delete a document
  /profile              show the profile
  /section <name>       switch section (chat, documents, upload, profile)
  /logout               end the session and quit
  /quit                 quit";

async fn run_shell(
    dashboard: &Dashboard<HttpBackend, TerminalView>,
    view: &Arc<TerminalView>,
) -> anyhow::Result<()> {
    dashboard.init().await;
    println!("{}", SHELL_HELP);

    // Lines come from the view's reader, the same one `/delete` confirms on
    loop {
        let reader = view.clone();
        let Some(line) = tokio::task::spawn_blocking(move || reader.read_line()).await?? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => {}
            "/quit" | "/exit" => break,
            "/help" => println!("{}", SHELL_HELP),
            "/chat" => dashboard.show_section(Section::Chat).await,
            "/documents" => dashboard.show_section(Section::Documents).await,
            "/profile" => dashboard.show_section(Section::Profile).await,
            "/section" => {
                if let Err(e) = dashboard.show_section_named(rest).await {
                    eprintln!("{}", e);
                }
            }
            "/delete" if !rest.is_empty() => {
                dashboard.delete_document(rest).await;
            }
            "/upload" if !rest.is_empty() => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                match read_files(&paths).await {
                    Ok(files) => {
                        dashboard.handle_files(files).await;
                    }
                    Err(e) => eprintln!("{:#}", e),
                }
            }
            "/logout" => {
                dashboard.logout().await;
                break;
            }
            _ if command.starts_with('/') => eprintln!("Unknown command: {}", command),
            _ => {
                dashboard.submit_question(line).await;
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("docchat={}", config.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
