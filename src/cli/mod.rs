use crate::config::Config;
use crate::resolver::AniResolver;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ani-resolver")]
#[command(about = "Resolve anime episodes into playable stream links")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./ani-resolver.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve an episode id into stream links
    Resolve {
        /// Episode id as used by the mirror
        #[arg(value_name = "ID")]
        id: String,

        /// Only run these providers (repeatable)
        #[arg(short, long = "provider")]
        providers: Vec<String>,

        /// Skip providers whose streams need a referer
        #[arg(long)]
        casting: bool,

        /// Use the alternative mirror host
        #[arg(long)]
        alternative_mirror: bool,

        /// Print links as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Show the catalog home page
    Home,
    /// Search the catalog
    Search {
        query: String,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::load()?,
        };

        if let Command::Resolve {
            providers,
            casting,
            alternative_mirror,
            ..
        } = &self.command
        {
            if !providers.is_empty() {
                config.active_providers = providers.clone();
            }
            config.casting |= *casting;
            config.alternative_mirror |= *alternative_mirror;
        }

        Ok(config)
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let resolver = AniResolver::from_config(&config)?;

        match &self.command {
            Command::Resolve { id, json, .. } => {
                let mut resolution = resolver.resolve(id);
                let mut count = 0;
                while let Some(link) = resolution.links.recv().await {
                    count += 1;
                    if *json {
                        println!("{}", serde_json::to_string(&link)?);
                    } else {
                        println!("[{}] {} {}", link.source, link.quality, link.url);
                        if let Some(referer) = &link.referer {
                            println!("    referer: {}", referer);
                        }
                    }
                }

                let page_ok = resolution.done.await?;
                if !page_ok {
                    eprintln!("Server list for {} could not be loaded", id);
                }
                if count == 0 {
                    bail!("No streams found for {}", id);
                }
                eprintln!("{} links found", count);
            }
            Command::Home => {
                if !resolver.init().await {
                    bail!("Could not establish a session");
                }
                let Some(home) = resolver.request_home(true, false).await else {
                    bail!("Home page unavailable");
                };

                println!("Trending:");
                for card in &home.trending_data {
                    println!("  {} ({})", card.title.display(), card.id);
                }
                println!("Recently added:");
                for card in &home.recently_added_data {
                    println!("  {} ({})", card.title.display(), card.id);
                }
                if !home.favorites.is_empty() {
                    println!("Favorites:");
                    for fav in &home.favorites {
                        println!("  {} ({})", fav.title.display(), fav.id);
                    }
                }
            }
            Command::Search { query, page } => {
                if !resolver.init().await {
                    bail!("Could not establish a session");
                }
                let results = resolver.search(query, *page).await?;
                for card in &results.anime_data.cards {
                    println!("{} - {} episodes ({})", card.title.display(), card.episodes, card.id);
                }
            }
        }

        Ok(())
    }
}
