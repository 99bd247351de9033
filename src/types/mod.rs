pub mod openai;

pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ModelEntry, ModelList,
};
