mod cached_llm_client;
mod openai_client;

pub use cached_llm_client::CachedLlmClient;
pub use openai_client::{DEFAULT_BASE_URL, OpenAiClient, SamplingOptions};
