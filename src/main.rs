use anyhow::{Context, Result};
use clap::{Args as CommandArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use url::Url;

mod client;
mod config;
mod form;
mod media;
mod posting;
mod server;
mod utils;

use config::{Config, LogFormat};
use form::{CredentialField, FormState, StatusReport};
use posting::Platform;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the posting form and API (default)
    Serve(ServeArgs),
    /// Submit a video to a running server from the terminal
    Post(PostArgs),
}

#[derive(CommandArgs, Debug, Default)]
struct ServeArgs {
    /// Address to bind, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(CommandArgs, Debug)]
struct PostArgs {
    /// Base URL of the crosspost server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: Url,

    #[arg(short, long, default_value = "")]
    title: String,

    #[arg(short, long, default_value = "")]
    description: String,

    /// Video file to upload
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Remote video URL
    #[arg(long)]
    url: Option<String>,

    /// Platform to post to (youtube, tiktok, instagram), repeatable
    #[arg(short, long = "platform")]
    platforms: Vec<Platform>,

    /// API key for a platform
    #[arg(long = "api-key", value_name = "ID=KEY", value_parser = parse_credential)]
    api_keys: Vec<(Platform, String)>,

    /// Access token for a platform
    #[arg(long = "access-token", value_name = "ID=TOKEN", value_parser = parse_credential)]
    access_tokens: Vec<(Platform, String)>,
}

fn parse_credential(s: &str) -> Result<(Platform, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", s))?;
    Ok((id.parse()?, value.to_string()))
}

fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, config_path) = config::load(args.config.as_deref())?;
    init_logging(config.log_format());

    match &config_path {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match args.command {
        Some(Command::Post(post_args)) => post(post_args).await,
        Some(Command::Serve(serve_args)) => serve(&mut config, serve_args).await,
        None => serve(&mut config, ServeArgs::default()).await,
    }
}

async fn serve(config: &mut Config, args: ServeArgs) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("Starting crosspost server...");
    server::run(config).await
}

async fn post(args: PostArgs) -> Result<()> {
    let client = client::PostClient::new(&args.server)?;
    let mut form = FormState::new();

    for platform in &args.platforms {
        let enabled = form
            .enabled_platforms()
            .any(|p| p.id == platform.id());
        if !enabled {
            form.toggle(platform.id())?;
        }
    }
    for (platform, key) in &args.api_keys {
        form.set_credential(platform.id(), CredentialField::ApiKey, key.as_str())?;
    }
    for (platform, token) in &args.access_tokens {
        form.set_credential(platform.id(), CredentialField::AccessToken, token.as_str())?;
    }

    if let Some(path) = &args.file {
        let file = media::VideoFile::from_path(path)
            .await
            .with_context(|| format!("Cannot use {} as the video", path.display()))?;
        println!(
            "Selected: {} ({})",
            file.name,
            utils::format_megabytes(file.size)
        );
        form.select_file(file);
    } else if let Some(url) = &args.url {
        form.set_url(url.as_str());
    }

    form.set_title(args.title);
    form.set_description(args.description);

    let submission = form.begin_submit()?;
    print!("{}", StatusReport(form.statuses()));

    client.deliver(&mut form, submission).await;

    println!();
    print!("{}", StatusReport(form.statuses()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credential() {
        assert_eq!(
            parse_credential("youtube=abc=123").unwrap(),
            (Platform::YouTube, "abc=123".to_string())
        );
        assert_eq!(
            parse_credential("tiktok=").unwrap(),
            (Platform::TikTok, String::new())
        );
        assert!(parse_credential("youtube").is_err());
        assert!(parse_credential("vimeo=abc").is_err());
    }

    #[test]
    fn test_post_args() {
        let args = Args::try_parse_from([
            "crosspost",
            "post",
            "--title",
            "Demo",
            "--url",
            "https://x/v.mp4",
            "-p",
            "youtube",
            "-p",
            "instagram",
            "--api-key",
            "youtube=k",
            "--access-token",
            "youtube=t",
        ])
        .unwrap();

        let Some(Command::Post(post)) = args.command else {
            panic!("expected post command");
        };
        assert_eq!(post.platforms, [Platform::YouTube, Platform::Instagram]);
        assert_eq!(post.api_keys, [(Platform::YouTube, "k".to_string())]);
        assert_eq!(post.server.as_str(), "http://127.0.0.1:3000/");
    }

    #[test]
    fn test_file_conflicts_with_url() {
        let result = Args::try_parse_from([
            "crosspost",
            "post",
            "--file",
            "a.mp4",
            "--url",
            "https://x/v.mp4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_to_serve() {
        let args = Args::try_parse_from(["crosspost", "--config", "c.toml"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.config.as_deref(), Some("c.toml"));
    }
}
