use anyhow::Result;
use colored::*;
use shutter::client::{ConnectionState, SessionError, SessionEvent, SessionHandle};
use shutter::membership::MembershipEvent;
use shutter::model::{CanvasPoint, StickerKind};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

#[derive(Debug, PartialEq)]
enum Command {
    Start,
    Photo,
    Share,
    Frame,
    Sticker { kind: StickerKind, at: CanvasPoint },
    Who,
    Reconnect,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("type 'help' for commands".to_owned());
    };

    let command = match verb {
        "start" => Command::Start,
        "photo" => Command::Photo,
        "share" => Command::Share,
        "frame" => Command::Frame,
        "who" => Command::Who,
        "reconnect" => Command::Reconnect,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "sticker" => {
            let emoji = words.next().ok_or("usage: sticker <emoji> [x y]")?;
            let coords: Vec<f64> = words
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| "coordinates must be numbers in [0, 1]")?;
            let at = match coords.as_slice() {
                [] => CanvasPoint::new(0.5, 0.5),
                [x, y] if (0.0..=1.0).contains(x) && (0.0..=1.0).contains(y) => {
                    CanvasPoint::new(*x, *y)
                }
                _ => return Err("coordinates must be two numbers in [0, 1]".to_owned()),
            };
            Command::Sticker {
                kind: StickerKind::Emoji(emoji.to_owned()),
                at,
            }
        }
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(command)
}

/// Prints room events and runs typed commands until the user quits or the
/// session stops.
pub async fn run(handle: SessionHandle) -> Result<()> {
    let mut events = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    print_event(&event);
                    if matches!(event, SessionEvent::Fatal(_)) {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!("Skipped {} room events", missed),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => match line? {
                None => break,
                Some(line) => match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = execute(&handle, command).await {
                            println!("{} {}", "✗".red(), e);
                        }
                    }
                    Err(usage) => println!("{}", usage.yellow()),
                },
            },
        }
    }

    handle.leave().await;
    println!("{}", "👋 Left the room.".green());
    Ok(())
}

async fn execute(handle: &SessionHandle, command: Command) -> Result<(), SessionError> {
    match command {
        Command::Start => {
            handle.start_countdown().await?;
        }
        Command::Photo => {
            handle.navigate_to_photo_room().await?;
        }
        Command::Share => {
            handle.navigate_to_share_room().await?;
        }
        Command::Frame => {
            handle.toggle_frame().await?;
        }
        Command::Sticker { kind, at } => {
            handle.add_sticker(kind, at).await?;
        }
        Command::Reconnect => handle.reconnect().await?,
        Command::Who => {
            let snapshot = handle.snapshot();
            println!("{} {:?}", "Room phase:".bold(), snapshot.phase);
            for member in &snapshot.roster {
                let me = if member.identity.id == snapshot.local.id {
                    " (you)"
                } else {
                    ""
                };
                println!("   {} {}{}", member.position, member.nickname(), me.dimmed());
            }
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
    Ok(())
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::Connection(ConnectionState::Connected) => {
            println!("{}", "● connected".green())
        }
        SessionEvent::Connection(state) => println!("{} {:?}", "●".yellow(), state),
        SessionEvent::Membership(MembershipEvent::MemberJoined(member)) => println!(
            "{} {} took seat {}",
            "→".green(),
            member.nickname().bold(),
            member.position
        ),
        SessionEvent::Membership(MembershipEvent::MemberLeft(member)) => println!(
            "{} {} left seat {}",
            "←".yellow(),
            member.nickname().bold(),
            member.position
        ),
        SessionEvent::Lifecycle(notification) => {
            println!("{} {}", "⏱".cyan(), notification.to_string().cyan())
        }
        SessionEvent::StickersChanged(stickers) => {
            println!("{} {} sticker(s) on the photo", "★".magenta(), stickers.len())
        }
        SessionEvent::FrameChanged(frame) => println!("{} frame is now {:?}", "▣".blue(), frame),
        SessionEvent::Handshake { from, .. } => {
            println!("{}", format!("handshake from {from}").dimmed())
        }
        SessionEvent::IceServers(servers) => {
            println!("{}", format!("{} ICE server(s) offered", servers.len()).dimmed())
        }
        SessionEvent::Notice(notice) => println!("{} {}", "!".yellow().bold(), notice),
        SessionEvent::Fatal(e) => println!("{} {}", "✗ session stopped:".red().bold(), e),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("   sticker <emoji> [x y]   place a sticker");
    println!("   frame                   switch the photo frame (host)");
    println!("   photo | start | share   move the room along (host)");
    println!("   who                     show the room");
    println!("   reconnect               rejoin after a lost connection");
    println!("   quit");
}
