mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "charsheet", version, about = "Character sheet bot for tabletop games")]
struct Cli {
    /// Project root (defaults to the nearest directory with a charsheet.yaml)
    #[arg(long, global = true, env = "CHARSHEET_ROOT")]
    root: Option<PathBuf>,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a charsheet.yaml config and an empty user data file
    Init,
    /// Link a Google Sheet character sheet to a user
    Link {
        /// Full Google Sheets URL of the character sheet
        url: String,
        /// Numeric user id to link the sheet to
        #[arg(long)]
        user: u64,
        /// Pronoun override, e.g. "they/them/themselves"
        #[arg(long)]
        pronouns: Option<String>,
        /// Verb override, e.g. "are/have"
        #[arg(long)]
        verbs: Option<String>,
    },
    /// Remove the character sheet linked to a user
    Unlink {
        #[arg(long)]
        user: u64,
    },
    /// Print a character's prose description
    Desc {
        #[arg(long)]
        user: u64,
    },
    /// Roll dice, optionally adding a stat modifier
    Roll {
        /// Dice expression, e.g. "d20" or "3d6+2"
        dice: String,
        #[arg(long)]
        user: u64,
        /// Ability whose modifier is added to the roll
        #[arg(long)]
        stat: Option<String>,
        /// Flat modifier added on top of everything else
        #[arg(long, default_value_t = 0)]
        modifier: i64,
    },
    /// Look up a monster in the DM sheet, or list them all
    Monster {
        /// Monster name to look up
        name: Option<String>,
        /// List every monster name instead
        #[arg(long)]
        list: bool,
    },
    /// Re-fetch the DM sheet and rebuild the monster directory
    ReloadDmSheet,
    /// Dump the persisted user store
    State,
    /// Run the web companion server
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
        /// Open the UI in a browser once the server is up
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Link {
            url,
            user,
            pronouns,
            verbs,
        } => cmd::link::run(&root, &url, user, pronouns.as_deref(), verbs.as_deref(), cli.json),
        Commands::Unlink { user } => cmd::unlink::run(&root, user),
        Commands::Desc { user } => cmd::desc::run(&root, user, cli.json),
        Commands::Roll {
            dice,
            user,
            stat,
            modifier,
        } => cmd::roll::run(&root, &dice, user, stat.as_deref(), modifier, cli.json),
        Commands::Monster { name, list } => cmd::monster::run(&root, name.as_deref(), list, cli.json),
        Commands::ReloadDmSheet => cmd::reload_dm_sheet::run(&root, cli.json),
        Commands::State => cmd::state::run(&root, cli.json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
