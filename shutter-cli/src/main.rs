mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use shutter::client::{
    ClientConfig, HttpRoomCreator, RoomCreator, RoomSession, SessionConfig, WebSocketChannel,
};
use shutter::model::{PeerIdentity, RoomId};
use shutter::server::{ServerConfig, serve};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shutter", version, about = "Shared photo booth rooms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the rendezvous server.
    Serve {
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Seats per room, host included.
        #[arg(long)]
        max_peers: Option<usize>,

        /// Base of the links handed out for new rooms.
        #[arg(long)]
        public_url: Option<String>,
    },
    /// Open a new room and enter it as host.
    Create {
        #[command(flatten)]
        peer: PeerArgs,
    },
    /// Enter an existing room by id or invite link.
    Join {
        room: String,

        #[command(flatten)]
        peer: PeerArgs,
    },
}

#[derive(clap::Args)]
struct PeerArgs {
    /// Rendezvous server, e.g. http://localhost:3000. Falls back to
    /// SHUTTER_SERVER_URL.
    #[arg(long)]
    server: Option<String>,

    #[arg(short, long)]
    nickname: Option<String>,
}

impl PeerArgs {
    fn client_config(&self) -> ClientConfig {
        match &self.server {
            Some(url) => ClientConfig::new(url.clone()),
            None => ClientConfig::from_env(),
        }
    }

    fn identity(&self) -> Result<PeerIdentity> {
        let nickname = match &self.nickname {
            Some(nickname) => nickname.clone(),
            None => Input::<String>::new()
                .with_prompt("Nickname")
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("nickname cannot be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?,
        };
        Ok(PeerIdentity::new(nickname.trim()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            max_peers,
            public_url,
        } => {
            init_tracing("info");
            let mut config = ServerConfig::from_env();
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(max_peers) = max_peers {
                config.max_peers = max_peers;
            }
            if let Some(public_url) = public_url {
                config.public_url = public_url;
            }

            println!("{}", "📸 Starting Shutter rendezvous server...".green().bold());
            println!("   🔌 Listening on {}", config.bind_addr);
            println!("   👥 Seats per room: {}", config.max_peers);
            serve(config).await?;
        }
        Commands::Create { peer } => {
            init_tracing("warn");
            let config = peer.client_config();
            let identity = peer.identity()?;

            let invite = HttpRoomCreator::new(config.clone())
                .create_room(identity.clone())
                .await
                .context("Failed to create a room")?;
            println!("{}", "✨ Room created!".green().bold());
            println!("   🔗 Invite: {}", invite.link.cyan());

            enter_room(config, identity, invite.room).await?;
        }
        Commands::Join { room, peer } => {
            init_tracing("warn");
            let room = parse_room(&room)?;
            enter_room(peer.client_config(), peer.identity()?, room).await?;
        }
    }

    Ok(())
}

async fn enter_room(config: ClientConfig, identity: PeerIdentity, room: RoomId) -> Result<()> {
    println!("{} {}", "🚪 Joining room".cyan(), room);
    let channel = Arc::new(WebSocketChannel::new(config));
    let handle = RoomSession::start(SessionConfig::new(room), channel, identity)
        .await
        .context("Could not reach the rendezvous server")?;
    console::run(handle).await
}

/// Accepts a bare room id or an invite link ending in one.
fn parse_room(input: &str) -> Result<RoomId> {
    let id = input.trim().trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    id.parse()
        .with_context(|| format!("'{input}' is not a room id or invite link"))
}

fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
