use docvault::app::{App, AppSettings};
use docvault::cli::{AppConfig, Args};
use docvault::commands::{self, CommandContext};
use docvault::config::UserConfig;
use docvault::domain::repository::DocumentRepository;
use docvault::error::{Action, Notice, VaultError};
use docvault::share::SystemShare;
use docvault::tui::render;
use docvault::Document;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};

const LOG_FILE_NAME: &str = "docvault.log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let config: AppConfig = args.into();

    if config.is_interactive() {
        init_file_logging(&config);
        match run_app_with_config(&config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        }
    } else {
        init_stderr_logging(&config);
        run_command(&config).await
    }
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level())
        .with_target(false)
        .init();
}

/// The terminal belongs to the UI, so its log goes to a file in the private root
fn init_file_logging(config: &AppConfig) {
    let opened = fs::create_dir_all(&config.private_root).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.private_root.join(LOG_FILE_NAME))
    });

    match opened {
        Ok(file) => tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_max_level(config.log_level().max(tracing::Level::INFO))
            .with_ansi(false)
            .init(),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
}

/// Runs one non-interactive subcommand and maps its outcome to an exit code
async fn run_command(config: &AppConfig) -> ExitCode {
    let mut repository = DocumentRepository::local(&config.private_root);
    if let Err(e) = repository.initialize().await {
        return report_failure(Action::Load, e);
    }

    let share = SystemShare;
    let context = CommandContext {
        export_dir: &config.export_dir,
        share: &share,
        skip_confirm: config.skip_confirm,
    };

    match commands::run(&mut repository, &config.command, &context, &mut confirm_on_stdin).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(commands::action_for(&config.command), e),
    }
}

fn report_failure(action: Action, error: VaultError) -> ExitCode {
    match Notice::for_failure(action, &error) {
        Some(notice) => {
            warn!(?action, error = %error, "command failed");
            eprintln!("{}\n{}", notice.title, notice.message);
            ExitCode::FAILURE
        }
        // A cancelled pick is not a failure
        None => ExitCode::SUCCESS,
    }
}

fn confirm_on_stdin(document: &Document) -> bool {
    print!("Delete {}? [y/N] ", document.name());
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

/// Runs the TUI application with configuration
pub async fn run_app_with_config(config: &AppConfig) -> io::Result<()> {
    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load user config, using defaults");
        UserConfig::default()
    });

    let settings = AppSettings {
        export_dir: config.export_dir.clone(),
        skip_confirm: config.skip_confirm,
        show_welcome: config.force_welcome || !user_config.welcome_shown,
    };
    let mut app = App::new(
        DocumentRepository::local(&config.private_root),
        Box::new(SystemShare),
        settings,
    );
    app.load().await;
    info!(root = %config.private_root.display(), "session started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app, &mut user_config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &*app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases as well as presses
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key).await;
            }
        }

        if app.welcome_acknowledged() && !user_config.welcome_shown {
            // Mark welcome as shown and persist
            user_config.welcome_shown = true;
            if let Err(e) = user_config.save() {
                warn!(error = %e, "failed to save user config");
            }
        }

        if app.should_quit() {
            info!("session ended");
            return Ok(());
        }
    }
}
