//! LLM provider abstraction and OpenAI-compatible implementation.

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use proto::LlmError;
use tracing::debug;

/// Message role accepted by [`LlmProvider::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// System-level instruction message.
    System,
    /// Prompt content authored by the calling tool.
    User,
}

/// A single message in a completion request
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Semantic role of this message.
    pub role: Role,
    /// Prompt text content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system-role message with the given content.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user-role message with the given content.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Model-access handle: ordered messages in, text completion out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends the messages to the model and returns its text completion.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// OpenAI-compatible provider (works with OpenAI, together.ai, etc.)
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiProvider {
    /// Creates an OpenAI provider using the default API base URL.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);
        Self {
            client,
            model: model.into(),
        }
    }

    /// Creates an OpenAI provider with a custom API base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        let client = Client::with_config(config);
        Self {
            client,
            model: model.into(),
        }
    }

    /// Returns the model id this handle targets.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(convert_message)
            .collect::<Result<_, _>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| LlmError::Serialization(e.to_string()))?;

        debug!(model = %self.model, "Sending completion request to OpenAI");

        let response = self.client.chat().create(request).await.map_err(|e| {
            let msg = e.to_string();
            debug!(error = %msg, "OpenAI API error");
            if msg.to_lowercase().contains("rate limit") {
                LlmError::RateLimit
            } else {
                LlmError::Api(msg)
            }
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".into()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

/// Converts an internal chat message into OpenAI request format.
fn convert_message(m: &ChatMessage) -> Result<ChatCompletionRequestMessage, LlmError> {
    match m.role {
        Role::System => Ok(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(m.content.clone())
                .build()
                .map_err(|e| LlmError::Serialization(e.to_string()))?,
        )),
        Role::User => Ok(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(m.content.clone())
                .build()
                .map_err(|e| LlmError::Serialization(e.to_string()))?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_constructors_set_expected_roles() {
        let system = ChatMessage::system("s");
        assert_eq!(system.role, Role::System);
        assert_eq!(system.content, "s");

        let user = ChatMessage::user("u");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "u");
    }

    #[test]
    fn convert_message_supports_both_roles() {
        let system = convert_message(&ChatMessage::system("sys")).expect("system");
        assert!(matches!(system, ChatCompletionRequestMessage::System(_)));

        let user = convert_message(&ChatMessage::user("hello")).expect("user");
        assert!(matches!(user, ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn provider_builders_construct_provider_instances() {
        let provider = OpenAiProvider::new("k", "gpt-4o-mini");
        assert_eq!(provider.model(), "gpt-4o-mini");

        let provider = OpenAiProvider::with_base_url("k", "https://example.com/v1", "m");
        assert_eq!(provider.model(), "m");
    }

    #[test]
    fn chat_message_debug_and_clone() {
        let msg = ChatMessage::user("test");
        let cloned = msg.clone();
        assert_eq!(cloned.content, "test");
        let debug = format!("{:?}", msg);
        assert!(debug.contains("User"));
    }
}
