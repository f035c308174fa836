//! usersecrets - Find or create the .NET user secrets file for a project
//!
//! Commands:
//! - edit <PATH>: Ensure the project has a UserSecretsId and a secrets file, then open it
//! - id <PATH>: Print the project's UserSecretsId (minting one if needed)
//! - path <ID>: Print the secrets file path for an identifier

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use usersecrets::host::TerminalHost;
use usersecrets::{
    descriptor, IdentifierResolver, SecretsEditor, SecretsId, SecretsLocator, UserSecretsConfig,
};
use usersecrets_core::{Paths, Platform};

#[derive(Parser)]
#[command(name = "usersecrets")]
#[command(about = "Find or create the .NET user secrets file for a project")]
#[command(version)]
#[command(after_help = r#"LOCATIONS:
    Windows:      %APPDATA%\Microsoft\UserSecrets\<id>\secrets.json
    macOS/Linux:  ~/.microsoft/usersecrets/<id>/secrets.json

    The same files the dotnet CLI and Visual Studio use.

CONFIG:
    ~/.config/usersecrets/config.yaml
        strict: false          # fail if the project file has no <PropertyGroup>/<Project>
        open_in_editor: false  # launch the editor on `edit`
        editor: "code --wait"  # defaults to $VISUAL, then $EDITOR"#)]
struct Cli {
    /// Path convention to use (win32, darwin, linux, ...); defaults to this machine
    #[arg(long, global = true)]
    platform: Option<String>,

    /// Fail if the UserSecretsId cannot be saved to the project file
    #[arg(long, global = true)]
    strict: bool,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure a UserSecretsId and secrets file exist, then open the file
    Edit {
        /// Project file, or a directory containing exactly one
        path: PathBuf,
        /// Launch $VISUAL/$EDITOR on the secrets file
        #[arg(long)]
        open: bool,
    },

    /// Print the project's UserSecretsId, adding one if missing
    Id {
        /// Project file, or a directory containing exactly one
        path: PathBuf,
    },

    /// Print the secrets file path for an identifier
    Path {
        /// UserSecretsId
        id: String,
        /// Only compute the path, don't create anything
        #[arg(long)]
        no_create: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directives = log_directives(cli.verbose, std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let paths = Paths::from_env().context("Failed to read user directories")?;
    let config = match &cli.config {
        Some(path) => UserSecretsConfig::load_from(path)?,
        None => UserSecretsConfig::load(&paths)?,
    };

    let locator = match &cli.platform {
        Some(name) => SecretsLocator::for_platform(name, paths)?,
        None => SecretsLocator::new(Platform::current(), paths),
    };
    let resolver = IdentifierResolver::default().strict(cli.strict || config.strict);

    match cli.command {
        Commands::Edit { ref path, open } => {
            cmd_edit(SecretsEditor::new(resolver, locator), &config, path, open, cli.json)
        }
        Commands::Id { ref path } => cmd_id(&resolver, path, cli.json),
        Commands::Path { ref id, no_create } => cmd_path(&locator, id, no_create, cli.json),
    }
}

/// Log filter: RUST_LOG if set, else warn. `-v` turns on debug for our
/// own crates on top of either.
fn log_directives(verbose: bool, rust_log: Option<&str>) -> String {
    let rust_log = rust_log.map(str::trim).filter(|s| !s.is_empty());
    match (rust_log, verbose) {
        (Some(env), true) => format!("{},usersecrets=debug,usersecrets_core=debug", env),
        (Some(env), false) => env.to_string(),
        (None, true) => "debug".to_string(),
        (None, false) => "warn".to_string(),
    }
}

/// Find or create the secrets file and hand it to the terminal
fn cmd_edit(
    editor: SecretsEditor,
    config: &UserSecretsConfig,
    path: &Path,
    open: bool,
    json: bool,
) -> Result<()> {
    let editor_cmd = if open || config.open_in_editor {
        config.editor_command()
    } else {
        None
    };

    let mut host = TerminalHost::new(editor_cmd).quiet(json);
    let Some(report) = editor.edit(path, &mut host) else {
        std::process::exit(1);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Print (and if needed mint) the UserSecretsId
fn cmd_id(resolver: &IdentifierResolver, path: &Path, json: bool) -> Result<()> {
    let descriptor = descriptor::discover(path)?;
    let resolution = resolver
        .resolve(&descriptor)
        .with_context(|| format!("Failed to resolve UserSecretsId for {}", descriptor.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    if resolution.minted {
        if resolution.persisted {
            eprintln!("info: Added UserSecretsId to {}", descriptor.display());
        } else {
            eprintln!(
                "warning: No <PropertyGroup> or <Project> in {}, UserSecretsId not saved",
                descriptor.display()
            );
        }
    }
    println!("{}", resolution.id);

    Ok(())
}

/// Print the secrets file path for an identifier
fn cmd_path(locator: &SecretsLocator, id: &str, no_create: bool, json: bool) -> Result<()> {
    let id = SecretsId::new(id);

    let (path, created) = if no_create {
        (locator.file_path(&id)?, false)
    } else {
        let file = locator.ensure(&id)?;
        (file.path, file.created)
    };

    if json {
        let out = serde_json::json!({
            "user_secrets_id": id,
            "platform": locator.platform().as_str(),
            "secrets_file": path,
            "created": created,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
