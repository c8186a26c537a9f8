//! Command handlers joining the messenger and the terminal renderer.

use anyhow::{Context, Result};
use daymark_core::{
    codec,
    display::{DeleteResult, OperationStatus},
    params::ListMessages,
    MalformedBlock, Messenger, PayloadBlock,
};

use crate::args::{CodecCommands, MessageCommands};
use crate::renderer::TerminalRenderer;

/// CLI command dispatcher holding the messenger and renderer.
pub struct Cli {
    messenger: Messenger,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI dispatcher.
    pub fn new(messenger: Messenger, renderer: TerminalRenderer) -> Self {
        Self {
            messenger,
            renderer,
        }
    }

    /// Handle a message subcommand.
    pub async fn handle_message_command(&self, command: MessageCommands) -> Result<()> {
        match command {
            MessageCommands::Post(args) => {
                let params = args.into_params()?;
                let result = self.messenger.post_message_result(&params).await?;
                self.renderer.render(&result.to_string());
            }
            MessageCommands::List(args) => {
                let feed = self.messenger.list_message_feed(&args.into()).await?;
                self.renderer.render(&feed.to_string());
            }
            MessageCommands::Show(args) => {
                let params = args.into();
                match self.messenger.show_message(&params).await? {
                    Some(message) => self.renderer.render(&message.to_string()),
                    None => self.render_not_found(params.id),
                }
            }
            MessageCommands::Edit(args) => {
                let params: daymark_core::params::EditMessage = args.into();
                match self.messenger.edit_message_result(&params).await? {
                    Some(result) => self.renderer.render(&result.to_string()),
                    None => self.render_not_found(params.id),
                }
            }
            MessageCommands::Delete(args) => {
                let params: daymark_core::params::DeleteMessage = args.into();
                let id = params.id;
                match self.messenger.delete_message(&params).await? {
                    Some(message) => self.renderer.render(&DeleteResult::new(message).to_string()),
                    None => self.render_not_found(id),
                }
            }
        }
        Ok(())
    }

    /// Render the default view: the message feed.
    pub async fn list_feed(&self) -> Result<()> {
        let feed = self
            .messenger
            .list_message_feed(&ListMessages::default())
            .await?;
        self.renderer.render(&feed.to_string());
        Ok(())
    }

    fn render_not_found(&self, id: u64) {
        let status = OperationStatus::failure(format!("Message with ID {id} not found"));
        self.renderer.render(&status.to_string());
    }
}

/// Handle a codec subcommand.
///
/// These are pure text operations and never touch the message store, so
/// they run without a messenger. Encoded output goes to stdout raw so it
/// can be piped; decode reports its outcome explicitly since this is the
/// diagnostic surface.
pub fn run_codec_command(command: CodecCommands, renderer: &TerminalRenderer) -> Result<()> {
    match command {
        CodecCommands::Encode(args) => {
            let plan = args.plan_value()?;
            let combined = codec::encode(&args.content, &plan, args.date.as_deref())?;
            println!("{combined}");
        }
        CodecCommands::Decode(args) => {
            let content = match &args.file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin())
                    .context("Failed to read content from stdin")?,
            };

            let decoded = codec::decode(&content);
            let mut output = String::new();

            output.push_str("# Text\n\n");
            if decoded.text.is_empty() {
                output.push_str("(empty)\n");
            } else {
                output.push_str(&decoded.text);
                output.push('\n');
            }
            output.push('\n');

            match &decoded.block {
                PayloadBlock::Absent => output.push_str("No payload block.\n"),
                PayloadBlock::Malformed(MalformedBlock::Unterminated) => {
                    output.push_str("Payload block unterminated; trailing fragment discarded.\n");
                }
                PayloadBlock::Malformed(MalformedBlock::Unparsable) => {
                    output.push_str("Payload block unparsable; interior discarded.\n");
                }
                PayloadBlock::Present(payload) => {
                    output.push_str("# Payload\n\n");
                    if let Some(date) = &payload.target_date {
                        output.push_str(&format!("- Target date: {date}\n\n"));
                    }
                    let pretty = serde_json::to_string_pretty(&payload.plan)
                        .context("Failed to render plan JSON")?;
                    output.push_str(&format!("```json\n{pretty}\n```\n"));
                }
            }

            renderer.render(&output);
        }
    }
    Ok(())
}
