use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use liftlog::cli::{
    handle_backup_command, handle_exercise_command, handle_log_command, handle_report_command,
    handle_user_command, handle_workout_command, prompt_secret, resolve_user, BackupCommands,
    ExerciseCommands, ReportCommands, UserCommands, WorkoutCommands,
};
use liftlog::config::{check_access, paths::LiftlogPaths, settings::Settings};
use liftlog::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "liftlog",
    version,
    about = "Multi-user workout logbook",
    long_about = "Liftlog records workout sets for several people on one machine. \
                  Each user has their own exercise catalog and log; deleted users \
                  are archived and can be restored."
)]
struct Cli {
    /// Shared access password (prompted when required and not given)
    #[arg(long, global = true, env = "LIFTLOG_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Show diagnostic logging on stderr
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Exercise catalog commands
    Exercise {
        /// User to act as
        #[arg(short, long, global = true, env = "LIFTLOG_USER")]
        user: Option<String>,

        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// Workout logging commands
    Workout {
        /// User to act as
        #[arg(short, long, global = true, env = "LIFTLOG_USER")]
        user: Option<String>,

        #[command(subcommand)]
        command: WorkoutCommands,
    },

    /// Training reports
    Report {
        /// User to act as
        #[arg(short, long, global = true, env = "LIFTLOG_USER")]
        user: Option<String>,

        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Backup and snapshot commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show entries about this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "liftlog=debug",
        _ => "liftlog=trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LiftlogPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Liftlog at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Register a user with: liftlog user add <NAME>");
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("Liftlog Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Archive directory: {}", paths.archive_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backup retention:    {}", settings.backup_retention);
            println!("  Date format:         {}", settings.display_date_format);
            println!("  Password protected:  {}", settings.is_access_gated());
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("Liftlog - multi-user workout logbook");
            println!();
            println!("Run 'liftlog --help' for usage information.");
            return Ok(());
        }
    };

    let password = match cli.password {
        Some(password) => Some(password),
        None if settings.is_access_gated() => Some(prompt_secret("Password: ")?),
        None => None,
    };
    check_access(&settings, password.as_deref())?;

    // Initialize storage
    if !paths.is_initialized() {
        initialize_storage(&paths)?;
    }
    let mut storage = Storage::with_settings(paths, settings.clone())?;
    storage.load_all()?;

    match command {
        Commands::User(cmd) => handle_user_command(&storage, cmd)?,
        Commands::Exercise { user, command } => {
            let user = resolve_user(user.as_deref())?;
            handle_exercise_command(&storage, &user, command)?;
        }
        Commands::Workout { user, command } => {
            let user = resolve_user(user.as_deref())?;
            handle_workout_command(&storage, &user, command)?;
        }
        Commands::Report { user, command } => {
            let user = resolve_user(user.as_deref())?;
            handle_report_command(&storage, &settings, &user, command)?;
        }
        Commands::Backup(cmd) => handle_backup_command(&storage, cmd)?,
        Commands::Log { limit, user } => handle_log_command(&storage, limit, user.as_deref())?,
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
