//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern: CLI argument structs carry
//! the clap-specific attributes and convert into core parameter types, so
//! the core stays free of framework derives and the CLI can evolve its
//! flags, aliases, and help text independently.
//!
//! Conversions that are pure field mapping implement `From`; posting and
//! encoding read the plan JSON from a flag or a file, so those convert
//! through a fallible `plan_value()` helper instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use daymark_core::params::{DeleteMessage, EditMessage, Id, ListMessages, PostMessage};

/// Main command-line interface for the Daymark message tool
///
/// Daymark keeps a local log of chat messages in which a structured day
/// plan can ride along inside a message. Plans are embedded into the
/// stored text by a marker-delimited payload block and recovered on
/// display, so a message always stays readable even when its plan block
/// is damaged. The `serve` command exposes the same operations over MCP
/// for AI assistant integration.
#[derive(Parser)]
#[command(version, about, name = "daymark")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/daymark/daymark.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Daymark CLI
///
/// The CLI is organized into three main command categories:
/// - `message`: Post, list, show, edit, and delete stored messages
/// - `codec`: Encode and decode payload-bearing content without the store
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage messages
    #[command(alias = "m")]
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Work with payload-bearing content directly
    #[command(alias = "c")]
    Codec {
        #[command(subcommand)]
        command: CodecCommands,
    },
    /// Start the MCP server
    Serve,
}

#[derive(Subcommand)]
pub enum MessageCommands {
    /// Post a new message, optionally attaching a plan
    #[command(alias = "p")]
    Post(PostMessageArgs),
    /// List messages, newest first
    #[command(aliases = ["l", "ls"])]
    List(ListMessagesArgs),
    /// Show a single message with its decoded plan
    #[command(alias = "s")]
    Show(ShowMessageArgs),
    /// Replace a message's text (drops any attached plan)
    #[command(alias = "e")]
    Edit(EditMessageArgs),
    /// Delete a message permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteMessageArgs),
}

#[derive(Subcommand)]
pub enum CodecCommands {
    /// Embed a plan into text and print the combined content
    Encode(EncodeArgs),
    /// Decode content from a file or stdin and report what was found
    Decode(DecodeArgs),
}

/// Post a new message
#[derive(ClapArgs)]
pub struct PostMessageArgs {
    /// Message text
    pub content: String,
    /// Author of the message
    #[arg(short, long, help = "Author of the message ('user' or 'assistant')")]
    pub author: Option<String>,
    /// Plan to attach, as inline JSON
    #[arg(long, conflicts_with = "plan_file", help = "Plan to attach, as inline JSON")]
    pub plan: Option<String>,
    /// Plan to attach, read from a JSON file
    #[arg(long, help = "Plan to attach, read from a JSON file")]
    pub plan_file: Option<PathBuf>,
    /// Calendar date the plan targets
    #[arg(long, help = "Calendar date the plan targets, YYYY-MM-DD")]
    pub date: Option<String>,
}

impl PostMessageArgs {
    /// Convert CLI arguments to core posting parameters, reading the
    /// plan JSON from the flag or file when one was given.
    pub fn into_params(self) -> Result<PostMessage> {
        let plan = read_plan(self.plan.as_deref(), self.plan_file.as_deref())?;
        Ok(PostMessage {
            content: self.content,
            author: self.author,
            plan,
            target_date: self.date,
        })
    }
}

/// List messages
#[derive(ClapArgs)]
pub struct ListMessagesArgs {
    /// Only show messages from this author
    #[arg(short, long, help = "Only show messages from this author ('user' or 'assistant')")]
    pub author: Option<String>,
    /// Maximum number of messages to show
    #[arg(short, long, help = "Maximum number of messages to show")]
    pub limit: Option<u32>,
}

impl From<ListMessagesArgs> for ListMessages {
    fn from(val: ListMessagesArgs) -> Self {
        ListMessages {
            author: val.author,
            limit: val.limit,
        }
    }
}

/// Show details of a specific message
#[derive(ClapArgs)]
pub struct ShowMessageArgs {
    /// ID of the message to display
    #[arg(help = "Unique identifier of the message to show")]
    pub id: u64,
}

impl From<ShowMessageArgs> for Id {
    fn from(val: ShowMessageArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a message's text
///
/// The stored content is replaced wholesale. A plan embedded in the old
/// content does not survive the edit; attach a new plan by posting a new
/// message instead.
#[derive(ClapArgs)]
pub struct EditMessageArgs {
    /// ID of the message to edit
    #[arg(help = "Unique identifier of the message to edit")]
    pub id: u64,
    /// Replacement message text
    pub content: String,
}

impl From<EditMessageArgs> for EditMessage {
    fn from(val: EditMessageArgs) -> Self {
        EditMessage {
            id: val.id,
            content: val.content,
        }
    }
}

/// Delete a message permanently
#[derive(ClapArgs)]
pub struct DeleteMessageArgs {
    /// ID of the message to delete
    #[arg(help = "Unique identifier of the message to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteMessageArgs> for DeleteMessage {
    fn from(val: DeleteMessageArgs) -> Self {
        DeleteMessage {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Embed a plan into message text
#[derive(ClapArgs)]
pub struct EncodeArgs {
    /// Message text to embed the plan into
    pub content: String,
    /// Plan as inline JSON
    #[arg(long, conflicts_with = "plan_file", help = "Plan as inline JSON")]
    pub plan: Option<String>,
    /// Plan read from a JSON file
    #[arg(long, help = "Plan read from a JSON file")]
    pub plan_file: Option<PathBuf>,
    /// Calendar date the plan targets
    #[arg(long, help = "Calendar date the plan targets, YYYY-MM-DD")]
    pub date: Option<String>,
}

impl EncodeArgs {
    /// Read the plan JSON from the flag or file; one of them is required.
    pub fn plan_value(&self) -> Result<serde_json::Value> {
        read_plan(self.plan.as_deref(), self.plan_file.as_deref())?
            .context("A plan is required: pass --plan or --plan-file")
    }
}

/// Decode payload-bearing content
#[derive(ClapArgs)]
pub struct DecodeArgs {
    /// File to read content from; stdin when omitted
    pub file: Option<PathBuf>,
}

/// Reads a plan value from an inline JSON string or a file path.
fn read_plan(
    inline: Option<&str>,
    file: Option<&std::path::Path>,
) -> Result<Option<serde_json::Value>> {
    let raw = match (inline, file) {
        (Some(json), _) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file: {}", path.display()))?,
        (None, None) => return Ok(None),
    };

    let value = serde_json::from_str(&raw).context("Plan is not valid JSON")?;
    Ok(Some(value))
}
