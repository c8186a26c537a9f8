//! MCP server implementation for Daymark
//!
//! This module implements the Model Context Protocol server for Daymark,
//! providing a standardized interface for AI models to post and read
//! plan-bearing messages. Tool parameters reuse the core parameter types
//! directly: with the `schema` feature enabled they already derive
//! `Deserialize` and `JsonSchema`, so no wrapper structs are needed.

use std::sync::Arc;

use anyhow::Result;
use daymark_core::{
    codec,
    display::DeleteResult,
    params::{DeleteMessage, EditMessage, Id, ListMessages, PostMessage},
    MalformedBlock, Messenger, MessengerError, PayloadBlock,
};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
        ListPromptsResult, PaginatedRequestParam, Prompt, PromptArgument, PromptMessage,
        PromptMessageContent, PromptMessageRole, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData, ErrorData as McpError, RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for decoding raw content
#[derive(Debug, Deserialize, JsonSchema)]
struct DecodeContentParams {
    /// Message content that may carry an embedded plan block
    content: String,
}

/// Helper to convert messenger errors to MCP errors
fn to_mcp_error(message: &str, error: MessengerError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
struct PromptTemplate {
    name: String,
    description: String,
    template: String,
    arguments: Vec<PromptTemplateArg>,
}

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
struct PromptTemplateArg {
    name: String,
    description: String,
    required: bool,
}

/// Get predefined prompt templates for the message log
fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan_my_day".to_string(),
            description: "Draft a day plan and post it as an assistant message with the plan attached".to_string(),
            template: r#"Draft a structured plan for the user's day.

Target date: {date}
Focus: {focus}

Produce a JSON object with a "tasks" array of short, actionable entries, ordered by when they should happen. Then post it with the post_message tool: set author to "assistant", put a one-line summary in content, pass the JSON object as the plan, and pass the target date. The plan will be embedded into the stored message and re-rendered as a widget whenever the message is shown."#.to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "date".to_string(),
                    description: "The calendar date to plan, YYYY-MM-DD".to_string(),
                    required: true,
                },
                PromptTemplateArg {
                    name: "focus".to_string(),
                    description: "Optional theme or priority for the day".to_string(),
                    required: false,
                },
            ],
        },
        PromptTemplate {
            name: "catch_up".to_string(),
            description: "Summarize recent messages and any plans they carry".to_string(),
            template: r#"Use the list_messages tool to read the latest messages, then summarize the conversation so far. Call out any attached plans and their target dates. Keep the summary short."#.to_string(),
            arguments: vec![],
        },
    ]
}

/// MCP server for Daymark
#[derive(Clone)]
pub struct DaymarkMcpServer {
    messenger: Arc<Messenger>,
    tool_router: ToolRouter<Self>,
}

type McpResult = Result<CallToolResult, ErrorData>;

#[tool_router]
impl DaymarkMcpServer {
    /// Create a new Daymark MCP server
    pub fn new(messenger: Messenger) -> Self {
        Self {
            messenger: Arc::new(messenger),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "post_message",
        description = "Post a new message to the log. Provide the message text (required), an optional author ('user' or 'assistant', default 'user'), an optional structured plan to attach, and an optional target_date (YYYY-MM-DD, only valid alongside a plan). An attached plan is embedded into the stored text and re-rendered as a widget whenever the message is displayed."
    )]
    async fn post_message(&self, Parameters(params): Parameters<PostMessage>) -> McpResult {
        debug!("post_message: {:?}", params);

        let result = self
            .messenger
            .post_message_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to post message", e))?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "list_messages",
        description = "List stored messages, newest first. Optionally filter by author ('user' or 'assistant') and cap the count with limit. Each entry shows the decoded text and notes when a plan is attached."
    )]
    async fn list_messages(&self, Parameters(params): Parameters<ListMessages>) -> McpResult {
        debug!("list_messages: {:?}", params);

        let feed = self
            .messenger
            .list_message_feed(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to list messages", e))?;

        Ok(CallToolResult::success(vec![Content::text(
            feed.to_string(),
        )]))
    }

    #[tool(
        name = "show_message",
        description = "Display a single message by ID with its decoded text and, when present, the attached plan rendered as a widget with its target date."
    )]
    async fn show_message(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_message: {:?}", params);

        let message = self
            .messenger
            .show_message(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get message", e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Message with ID {} not found", params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            message.to_string(),
        )]))
    }

    #[tool(
        name = "edit_message",
        description = "Replace a message's text by ID. The stored content is replaced wholesale, so a plan attached to the old content is destroyed; post a new message to attach a new plan."
    )]
    async fn edit_message(&self, Parameters(params): Parameters<EditMessage>) -> McpResult {
        debug!("edit_message: {:?}", params);

        let result = self
            .messenger
            .edit_message_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to edit message", e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Message with ID {} not found", params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "delete_message",
        description = "Permanently delete a message by ID. This cannot be undone; set 'confirmed' to true to proceed."
    )]
    async fn delete_message(&self, Parameters(params): Parameters<DeleteMessage>) -> McpResult {
        debug!("delete_message: {:?}", params);

        let message = self
            .messenger
            .delete_message(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete message", e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Message with ID {} not found", params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            DeleteResult::new(message).to_string(),
        )]))
    }

    #[tool(
        name = "decode_content",
        description = "Decode raw message content without touching the store. Returns the clean display text and reports whether a plan payload was recovered, absent, or malformed (unterminated or unparsable block). Useful for inspecting hand-edited or legacy content."
    )]
    async fn decode_content(
        &self,
        Parameters(params): Parameters<DecodeContentParams>,
    ) -> McpResult {
        debug!("decode_content: {} bytes", params.content.len());

        let decoded = codec::decode(&params.content);

        let mut result = format!("Text:\n{}\n\n", decoded.text);
        match &decoded.block {
            PayloadBlock::Absent => result.push_str("No payload block."),
            PayloadBlock::Malformed(MalformedBlock::Unterminated) => {
                result.push_str("Payload block unterminated; trailing fragment discarded.");
            }
            PayloadBlock::Malformed(MalformedBlock::Unparsable) => {
                result.push_str("Payload block unparsable; interior discarded.");
            }
            PayloadBlock::Present(payload) => {
                if let Some(date) = &payload.target_date {
                    result.push_str(&format!("Target date: {date}\n"));
                }
                let pretty = serde_json::to_string_pretty(&payload.plan).map_err(|e| {
                    ErrorData::internal_error(format!("Failed to render plan JSON: {e}"), None)
                })?;
                result.push_str(&format!("Plan:\n{pretty}"));
            }
        }

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let templates = get_prompt_templates();
        let prompts = templates
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(McpError::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(McpError::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            // Check if any required arguments are missing
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(McpError::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DaymarkMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "daymark".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Daymark is a local chat-style message log in which a structured day plan can ride along inside a message.

## Core Concepts
- **Messages**: Stored text with an author ('user' or 'assistant') and timestamps
- **Plans**: Opaque JSON attached to a message at post time, plus an optional target date (YYYY-MM-DD). The plan is embedded into the stored text between fixed markers and recovered whenever the message is displayed; damaged blocks degrade to clean text with no widget.

## Workflow Examples

### Planning a day
1. Read context with `list_messages`
2. Post the plan with `post_message`: author "assistant", a short summary as content, the plan JSON, and the target date
3. Confirm with `show_message` to see the rendered widget

### Housekeeping
- `edit_message` replaces a message's text and drops any attached plan
- `delete_message` permanently removes a message (requires confirmed=true)
- `decode_content` inspects raw content without touching the store; it reports absent, malformed, and recovered payloads distinctly

## Best Practices
- Always attach plans through `post_message` rather than pasting marker blocks into content
- Keep plan JSON small and structured (e.g. a "tasks" array)
- Use target dates so plans can be found and rendered by day"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: DaymarkMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Daymark MCP server on stdio");

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
