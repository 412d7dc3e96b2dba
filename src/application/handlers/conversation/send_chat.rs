//! SendChat command handler.
//!
//! Runs one chat turn: validate the widget's request, normalize its history,
//! call the active provider with the persona, and hand back the reply. Each
//! request is independent; nothing is stored and nothing is retried.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{normalize_history, ChatPhase, IncomingTurn};
use crate::domain::foundation::{require_text, StateMachine, ValidationError};
use crate::domain::persona::PersonaPolicy;
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata, TokenUsage};

/// Command carrying one widget request.
#[derive(Debug, Clone)]
pub struct SendChatCommand {
    /// Prior turns, resent in full by the widget. `None` if the field was absent.
    pub history: Option<Vec<IncomingTurn>>,
    /// The visitor's new message.
    pub user_message: Option<String>,
    /// Correlation id for logs.
    pub request_id: String,
}

impl SendChatCommand {
    /// Creates a new command.
    pub fn new(
        history: Option<Vec<IncomingTurn>>,
        user_message: Option<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            history,
            user_message,
            request_id: request_id.into(),
        }
    }
}

/// Successful chat turn.
#[derive(Debug, Clone)]
pub struct SendChatResult {
    /// Reply text, passed through unmodified from the provider.
    pub reply: String,
    /// Model that answered.
    pub model: String,
    /// Token usage reported by the provider.
    pub usage: TokenUsage,
}

/// Errors that can occur when sending a chat message.
#[derive(Debug, Error)]
pub enum SendChatError {
    /// `history` or `userMessage` was missing.
    #[error("Validation error: {0}")]
    MissingFields(#[from] ValidationError),

    /// The provider call failed.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

/// Handler for SendChat commands.
pub struct SendChatHandler {
    ai_provider: Arc<dyn AIProvider>,
    persona: PersonaPolicy,
}

impl SendChatHandler {
    /// Creates a new handler with the given provider and persona.
    pub fn new(ai_provider: Arc<dyn AIProvider>, persona: PersonaPolicy) -> Self {
        Self {
            ai_provider,
            persona,
        }
    }

    /// Handles a send chat command.
    pub async fn handle(&self, cmd: SendChatCommand) -> Result<SendChatResult, SendChatError> {
        let request_id = cmd.request_id.as_str();
        let mut phase = ChatPhase::Validating;

        tracing::info!(
            request_id,
            user_message_len = cmd.user_message.as_deref().map(str::len),
            history_len = cmd.history.as_ref().map(Vec::len),
            "Incoming chat request"
        );

        let (history, user_message) = match validate(&cmd) {
            Ok(fields) => fields,
            Err(err) => {
                advance(&mut phase, ChatPhase::Failed, request_id);
                tracing::warn!(
                    request_id,
                    has_user_message = cmd.user_message.is_some(),
                    has_history = cmd.history.is_some(),
                    field = err.field(),
                    "Missing required fields"
                );
                return Err(err.into());
            }
        };

        advance(&mut phase, ChatPhase::Normalizing, request_id);
        let normalized = normalize_history(history);
        if normalized.had_malformed_input() {
            tracing::warn!(
                request_id,
                coerced_roles = normalized.coerced_roles,
                dropped_turns = normalized.dropped_turns,
                "Coerced malformed history turns"
            );
        }
        let messages = normalized.with_user_message(user_message).turns;

        advance(&mut phase, ChatPhase::Calling, request_id);
        let provider = self.ai_provider.provider_info();
        tracing::info!(
            request_id,
            provider = %provider.name,
            model = %provider.model,
            message_count = messages.len(),
            "Calling completion provider"
        );

        let request = CompletionRequest::new(RequestMetadata::new(request_id))
            .with_messages(messages)
            .with_system_prompt(self.persona.as_str());

        let outcome = self
            .ai_provider
            .complete(request)
            .await
            .and_then(|response| {
                if response.content.trim().is_empty() {
                    Err(AIError::EmptyCompletion)
                } else {
                    Ok(response)
                }
            });

        match outcome {
            Ok(response) => {
                advance(&mut phase, ChatPhase::Replied, request_id);
                tracing::info!(
                    request_id,
                    reply_len = response.content.len(),
                    model = %response.model,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    finish_reason = ?response.finish_reason,
                    "Completion succeeded"
                );
                Ok(SendChatResult {
                    reply: response.content,
                    model: response.model,
                    usage: response.usage,
                })
            }
            Err(err) => {
                advance(&mut phase, ChatPhase::Failed, request_id);
                tracing::error!(
                    request_id,
                    provider = %provider.name,
                    kind = err.kind(),
                    transient = err.is_transient(),
                    error = %err,
                    "Completion failed"
                );
                Err(err.into())
            }
        }
    }
}

fn validate(cmd: &SendChatCommand) -> Result<(&[IncomingTurn], &str), ValidationError> {
    let user_message = require_text("userMessage", cmd.user_message.as_deref())?;
    let history = cmd
        .history
        .as_deref()
        .ok_or_else(|| ValidationError::empty_field("history"))?;
    Ok((history, user_message))
}

fn advance(phase: &mut ChatPhase, next: ChatPhase, request_id: &str) {
    match phase.transition_to(next) {
        Ok(entered) => {
            tracing::debug!(request_id, from = ?phase, to = ?entered, "Chat phase transition");
            *phase = entered;
        }
        Err(err) => {
            tracing::error!(request_id, error = %err, "Invalid chat phase transition");
        }
    }
}
