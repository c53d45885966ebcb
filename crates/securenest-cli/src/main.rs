//! SecureNest CLI - local password vault

use clap::{Parser, Subcommand};
use securenest_core::breach::BreachQueryResult;
use securenest_core::config::Config;
use securenest_core::generator::{self, GeneratorOptions};
use securenest_core::strength;
use securenest_core::vault::{Record, VaultStore};

#[derive(Parser)]
#[command(name = "securenest")]
#[command(author, version, about = "Local password vault", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new entry to the vault
    Add {
        /// Entry title (the lookup key)
        title: String,
        #[arg(short, long, default_value = "")]
        username: String,
        /// Password value; omit together with --generate for an empty password
        #[arg(short, long, default_value = "")]
        password: String,
        #[arg(short, long, default_value = "")]
        web_address: String,
        #[arg(short, long, default_value = "")]
        note: String,
        /// Generate the password using the configured generator
        #[arg(long, conflicts_with = "password")]
        generate: bool,
    },

    /// List entry titles in the vault
    List,

    /// Show an entry's details
    Show {
        title: String,
        /// Print the stored password instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Move an entry to the trash
    Delete { title: String },

    /// Manage trashed entries
    Trash {
        #[command(subcommand)]
        action: TrashAction,
    },

    /// Generate a random password
    Generate {
        /// Password length
        #[arg(short, long)]
        length: Option<usize>,
        /// Exclude letters
        #[arg(long)]
        no_letters: bool,
        /// Exclude digits
        #[arg(long)]
        no_numbers: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
    },

    /// Check a password against the breach corpus
    Check {
        /// Password to check
        #[arg(short, long, conflicts_with = "title")]
        password: Option<String>,
        /// Check the password stored under this title
        #[arg(short, long)]
        title: Option<String>,
        /// Report a failed lookup as "unknown" instead of a count of 0
        #[arg(long)]
        strict: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TrashAction {
    /// List trashed entries
    List,
    /// Restore a trashed entry to the vault
    Restore { title: String },
    /// Permanently delete a trashed entry
    Purge { title: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("securenest=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Add {
            title,
            username,
            password,
            web_address,
            note,
            generate,
        } => {
            let store = config.store()?;
            let password = if generate {
                generator::generate(&config.generator_options())
            } else {
                password
            };
            cmd_add(
                &store,
                Record {
                    title,
                    username,
                    password,
                    web_address,
                    note,
                },
                generate,
                cli.quiet,
            )
        }

        Commands::List => cmd_list(&config.store()?, cli.quiet),

        Commands::Show { title, reveal } => cmd_show(&config.store()?, &title, reveal),

        Commands::Delete { title } => cmd_delete(&config.store()?, &title, cli.quiet),

        Commands::Trash { action } => cmd_trash(&config.store()?, action, cli.quiet),

        Commands::Generate {
            length,
            no_letters,
            no_numbers,
            no_symbols,
        } => {
            let defaults = config.generator_options();
            let options = GeneratorOptions {
                length: length.unwrap_or(defaults.length),
                letters: !no_letters && defaults.letters,
                numbers: !no_numbers && defaults.numbers,
                symbols: !no_symbols && defaults.symbols,
            };
            cmd_generate(&options)
        }

        Commands::Check {
            password,
            title,
            strict,
        } => cmd_check(&config, password, title, strict, cli.quiet).await,

        Commands::Config { action } => cmd_config(action, cli.quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_add(store: &VaultStore, record: Record, generated: bool, quiet: bool) -> anyhow::Result<()> {
    if record.title.trim().is_empty() {
        return Err(anyhow::anyhow!("Entry title must not be empty."));
    }

    store.add(&record)?;

    if !quiet {
        println!("Entry '{}' added.", record.title.trim());
        if generated {
            println!("  Password: {}", record.password);
        }
        println!("  Strength: {}", strength::evaluate(&record.password));
    }
    Ok(())
}

fn cmd_list(store: &VaultStore, quiet: bool) -> anyhow::Result<()> {
    let entries = store.list_active()?;
    if entries.is_empty() {
        if !quiet {
            println!("No entries found.");
            println!("\nAdd one with: securenest add <title> --password <password>");
        }
    } else {
        if !quiet {
            println!("Entries:");
        }
        for entry in entries {
            if entry.username.is_empty() {
                println!("  {}", entry.title);
            } else {
                println!("  {} ({})", entry.title, entry.username);
            }
        }
    }
    Ok(())
}

fn cmd_show(store: &VaultStore, title: &str, reveal: bool) -> anyhow::Result<()> {
    let Some(entry) = store.find(title)? else {
        return Err(anyhow::anyhow!(
            "Entry '{}' not found. Run `securenest list` to see all entries.",
            title
        ));
    };

    println!("Title: {}", entry.title);
    println!("Username: {}", entry.username);
    if reveal {
        println!("Password: {}", entry.password);
    } else {
        println!("Password: ******** (use --reveal to show)");
    }
    println!("Web Address: {}", entry.web_address);
    println!("Note: {}", entry.note);
    println!("Strength: {}", strength::evaluate(&entry.password));
    Ok(())
}

fn cmd_delete(store: &VaultStore, title: &str, quiet: bool) -> anyhow::Result<()> {
    if store.move_to_trash(title)? {
        if !quiet {
            println!("Entry '{}' moved to trash.", title);
            println!("Restore it with: securenest trash restore {}", title);
        }
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Entry '{}' not found. Run `securenest list` to see all entries.",
            title
        ))
    }
}

fn cmd_trash(store: &VaultStore, action: TrashAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        TrashAction::List => {
            let entries = store.list_trash()?;
            if entries.is_empty() {
                if !quiet {
                    println!("Trash is empty.");
                }
            } else {
                if !quiet {
                    println!("Trashed entries:");
                }
                for entry in entries {
                    println!("  {}", entry.title);
                }
            }
        }
        TrashAction::Restore { title } => {
            let Some(entry) = store.find_in_trash(&title)? else {
                return Err(anyhow::anyhow!(
                    "Entry '{}' not found in trash. Run `securenest trash list` to see trashed entries.",
                    title
                ));
            };
            store.restore(&entry)?;
            if !quiet {
                println!("Entry '{}' restored.", title);
            }
        }
        TrashAction::Purge { title } => {
            store.purge(&title)?;
            if !quiet {
                println!("Entry '{}' permanently deleted.", title);
            }
        }
    }
    Ok(())
}

fn cmd_generate(options: &GeneratorOptions) -> anyhow::Result<()> {
    let password = generator::generate(options);
    if password.is_empty() {
        return Err(anyhow::anyhow!(
            "No character classes selected. Enable at least one of letters, numbers, or symbols."
        ));
    }
    println!("{}", password);
    Ok(())
}

async fn cmd_check(
    config: &Config,
    password: Option<String>,
    title: Option<String>,
    strict: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let password = match (password, title) {
        (Some(p), _) => p,
        (None, Some(title)) => {
            let store = config.store()?;
            let Some(entry) = store.find(&title)? else {
                return Err(anyhow::anyhow!(
                    "Entry '{}' not found. Run `securenest list` to see all entries.",
                    title
                ));
            };
            entry.password
        }
        (None, None) => {
            return Err(anyhow::anyhow!(
                "Provide a password with --password or an entry with --title."
            ));
        }
    };

    let client = config.breach_client()?;

    if strict {
        match client.query(&password).await {
            BreachQueryResult::Found(count) => {
                println!("breached: {}", count);
            }
            BreachQueryResult::Clean => println!("clean"),
            BreachQueryResult::Unknown => println!("unknown"),
        }
        return Ok(());
    }

    // Faithful collapsed behavior: a failed lookup reads as 0 breaches.
    let count = client.check_count(&password).await;
    if quiet {
        println!("{}", count);
    } else if count == 0 {
        println!("Not found in known breaches.");
    } else {
        println!("Found in {} known breaches. Consider changing this password.", count);
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
