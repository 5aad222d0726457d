mod cli;

use vaultview::{catalog::Catalog, config, player, vault::Vault};
use vv_core::{format_hhmmss, MediaEntry, MediaKind};
use vv_probe::{FfprobeProber, Prober};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vaultview=trace,vv_probe=debug,vv_core=debug".to_string()
        } else {
            "vaultview=debug,vv_probe=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Vault { path } => select_vault(&path, config_path),
        Commands::List { path, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_vault(path, config_path, json))
        }
        Commands::Franchise { dir, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_franchise(&dir, config_path, json))
        }
        Commands::Series { dir, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_series(&dir, config_path, json))
        }
        Commands::Seasons { dir, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_seasons(&dir, config_path, json))
        }
        Commands::Probe { file, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(probe_file(&file, config_path, json))
        }
        Commands::Play { file } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(play_file(&file))
        }
        Commands::CheckTools => check_tools(),
        Commands::Version => {
            println!("vaultview {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn build_prober(config: &config::Config) -> Arc<dyn Prober> {
    Arc::new(FfprobeProber::new(config.probe.tool()).with_timeout(config.probe.timeout()))
}

/// Resolve a vault root from an explicit argument or the remembered config.
fn resolve_vault(path: Option<PathBuf>, config: &config::Config) -> Result<Vault> {
    let root = match path.or_else(|| config.vault.root.clone()) {
        Some(root) => root,
        None => anyhow::bail!("No vault selected. Run `vaultview vault <path>` first."),
    };
    Ok(Vault::open(root)?)
}

fn select_vault(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let vault = Vault::open(path)?;

    // A custom config path that does not exist yet starts from defaults.
    let mut config = match config_path {
        Some(p) if !p.exists() => config::Config::default(),
        _ => config::load_config_or_default(config_path)?,
    };
    config.vault.root = Some(vault.root().to_path_buf());

    let save_path = config_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(config::default_config_path);
    config::save_config(&save_path, &config)?;

    println!("Vault selected: {}", vault.root().display());
    Ok(())
}

async fn list_vault(path: Option<PathBuf>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let vault = resolve_vault(path, &config)?;

    let catalog = Catalog::new(build_prober(&config));
    let entries = catalog.list_top_level(&vault).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{} entries in {}\n", entries.len(), vault.root().display());
        for entry in &entries {
            print_entry_line(entry);
        }
    }

    Ok(())
}

async fn list_franchise(dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = Catalog::new(build_prober(&config));

    let mut parent = MediaEntry::new(dir_title(dir), MediaKind::All);
    parent.is_franchise = Some(true);
    parent.dir_path = Some(dir.to_path_buf());

    let members = catalog.list_franchise(&parent).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
    } else {
        println!("{} franchise members\n", members.len());
        for member in &members {
            match member.franchise_number {
                Some(n) => println!("  {}. {}", n, member.title),
                None => println!("  -. {}", member.title),
            }
        }
    }

    Ok(())
}

async fn list_series(dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = Catalog::new(build_prober(&config));

    let mut parent = MediaEntry::new(dir_title(dir), MediaKind::All);
    parent.is_series = Some(true);
    parent.dir_path = Some(dir.to_path_buf());

    let members = catalog.list_series(&parent).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
    } else {
        println!("{} series members\n", members.len());
        for member in &members {
            print_entry_line(member);
        }
    }

    Ok(())
}

async fn list_seasons(dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = Catalog::new(build_prober(&config));

    let mut show = MediaEntry::new(dir_title(dir), MediaKind::Show);
    show.dir_path = Some(dir.to_path_buf());

    let listing = catalog.list_seasons_and_episodes(&show).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        println!(
            "{} seasons, {} episodes\n",
            listing.seasons.len(),
            listing.number_of_episodes_obtained
        );
        for season in &listing.seasons {
            match season.season_number {
                Some(n) => println!("Season {} - {}", n, season.entry.title),
                None => println!("Season ? - {}", season.entry.title),
            }
            for episode in &season.episodes {
                match episode.episode_number {
                    Some(n) => println!("  {:>3}. {}", n, episode.title),
                    None => println!("    -. {}", episode.title),
                }
            }
        }
    }

    Ok(())
}

async fn probe_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let prober = build_prober(&config);
    let info = prober.probe(file).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("File: {}", info.file_path.display());
        println!("Quality: {}", info.quality.as_text());
        if let Some(ref codec) = info.video_codec {
            println!("Codec: {}", codec);
        }
        if let Some(runtime) = info.runtime_seconds {
            println!("Runtime: {}", format_hhmmss(runtime));
        }
        println!("Audio languages: {}", join_or_dash(&info.audios));
        println!("Subtitle languages: {}", join_or_dash(&info.subs));
    }

    Ok(())
}

async fn play_file(file: &Path) -> Result<()> {
    let outcome = player::play(file).await;

    if outcome.ok {
        println!("Opened {} with the system player", file.display());
        Ok(())
    } else {
        anyhow::bail!(
            "Playback failed: {}",
            outcome.error.unwrap_or_else(|| "unknown error".to_string())
        )
    }
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = vv_probe::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Folder listings will lack probe details.");
    }

    Ok(())
}

fn dir_title(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn print_entry_line(entry: &MediaEntry) {
    print!("  {}", entry.title);
    if let Some(quality) = entry.quality {
        print!(" [{}]", quality.as_text());
    }
    if let Some(runtime) = entry.runtime_seconds {
        print!(" ({})", format_hhmmss(runtime));
    }
    if entry.is_franchise == Some(true) {
        print!(" [franchise]");
    }
    if entry.is_series == Some(true) {
        print!(" [series]");
    }
    println!();
}
