//! `talkspace rooms` — list and create rooms.
//!
//! - `talkspace rooms list` — fetch from the backend and print newest first
//! - `talkspace rooms create --name NAME --type audio|video --interest I...`

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use talkspace_api::flows;
use talkspace_core::rooms::AddOutcome;
use talkspace_core::types::{find_interest, find_interest_by_name, Privacy, Room, RoomType, INTERESTS};
use talkspace_core::utils::truncate_string;
use talkspace_core::validation::CreateRoomForm;

use crate::helpers::{print_success, report, App};

const DESCRIPTION_WIDTH: usize = 48;

// ─────────────────────────────────────────────
// Subcommand enum
// ─────────────────────────────────────────────

#[derive(Subcommand)]
pub enum RoomsCommands {
    /// List rooms visible to the signed-in account
    List,

    /// Create a room
    Create {
        /// Room name
        #[arg(short, long)]
        name: String,

        /// Room type: audio or video
        #[arg(short = 't', long = "type")]
        room_type: Option<RoomType>,

        /// public or private
        #[arg(short, long, default_value = "public")]
        privacy: Privacy,

        /// Interest name or id (repeatable)
        #[arg(short, long = "interest")]
        interests: Vec<String>,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
}

// ─────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────

pub async fn dispatch(config_path: Option<&Path>, cmd: RoomsCommands) -> Result<()> {
    match cmd {
        RoomsCommands::List => list_rooms(config_path).await,
        RoomsCommands::Create {
            name,
            room_type,
            privacy,
            interests,
            description,
        } => {
            let form = CreateRoomForm {
                name,
                description,
                privacy,
                room_type,
                interests: interests.iter().map(|i| resolve_interest(i)).collect(),
            };
            create_room(config_path, form).await
        }
    }
}

async fn list_rooms(config_path: Option<&Path>) -> Result<()> {
    let mut app = App::bootstrap(config_path);
    let api = app.api()?;

    flows::refresh_rooms(&mut app.client, &api)
        .await
        .map_err(report)?;

    let rooms = app.client.rooms().current_rooms();
    if rooms.is_empty() {
        println!("  {}", "no rooms yet".dimmed());
        return Ok(());
    }
    println!();
    for room in &rooms {
        print_room(room);
    }
    println!();
    Ok(())
}

async fn create_room(config_path: Option<&Path>, form: CreateRoomForm) -> Result<()> {
    let mut app = App::bootstrap(config_path);
    let api = app.api()?;

    let (room, outcome) = flows::create_room(&mut app.client, &api, &form)
        .await
        .map_err(report)?;

    match outcome {
        AddOutcome::Inserted | AddOutcome::Replaced => {
            print_success(&format!("room created: {}", room.name.bold()))
        }
        AddOutcome::Rejected => println!(
            "  {} room {} was already known locally",
            "·".dimmed(),
            room.id
        ),
    }
    print_room(&room);
    Ok(())
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

/// Accept an interest by display name or by id. Unknown values pass through
/// so the backend can judge them.
fn resolve_interest(value: &str) -> String {
    find_interest_by_name(value)
        .or_else(|| find_interest(value))
        .map_or_else(|| value.trim().to_string(), |i| i.id.to_string())
}

fn print_room(room: &Room) {
    let kind = match room.room_type {
        RoomType::Audio => "audio".cyan(),
        RoomType::Video => "video".magenta(),
    };
    let privacy = match room.privacy {
        Privacy::Public => "public".green(),
        Privacy::Private => "private".yellow(),
    };
    println!("  {} [{}] [{}] {}", room.name.bold(), kind, privacy, room.id.dimmed());
    if let Some(description) = &room.description {
        println!("      {}", truncate_string(description, DESCRIPTION_WIDTH));
    }
    if !room.interests.is_empty() {
        println!("      {}", room.interest_names().join(", ").dimmed());
    }
}

/// `talkspace interests`
pub fn print_interests() {
    println!();
    for interest in INTERESTS {
        println!("  {:<10} {}", interest.name.bold(), interest.id.dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_interest_by_name_or_id() {
        assert_eq!(resolve_interest("Book"), "dbac4910-103d-421d-a51d-3a1dbd2720f0");
        assert_eq!(resolve_interest("eating"), "6ee6d0d8-69eb-4655-a40a-3c467c63279f");
        assert_eq!(
            resolve_interest("6ee6d0d8-69eb-4655-a40a-3c467c63279f"),
            "6ee6d0d8-69eb-4655-a40a-3c467c63279f"
        );
        assert_eq!(resolve_interest(" chess "), "chess");
    }
}
