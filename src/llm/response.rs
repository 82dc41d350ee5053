use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};

use crate::error::UpstreamError;

pub const MAX_TOKENS: u32 = 4000;

/// One system + user exchange, answered in a single non-streamed message.
#[allow(deprecated)]
pub fn chat_request(
    model: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()?
            .into(),
    ];

    CreateChatCompletionRequestArgs::default()
        .model(model)
        .max_tokens(MAX_TOKENS)
        .stream(false)
        .messages(messages)
        .build()
}

/// First non-blank message content across all choices.
pub fn response_text(response: &CreateChatCompletionResponse) -> Option<&str> {
    response
        .choices
        .iter()
        .filter_map(|choice| choice.message.content.as_deref())
        .map(str::trim)
        .find(|text| !text.is_empty())
}

pub fn upstream_error(endpoint: &str, err: OpenAIError) -> UpstreamError {
    match err {
        OpenAIError::ApiError(api) => UpstreamError::Api {
            message: api.message,
        },
        err @ OpenAIError::JSONDeserialize(..) => UpstreamError::MalformedResponse(err.to_string()),
        source => UpstreamError::Transport {
            endpoint: endpoint.to_string(),
            source,
        },
    }
}
