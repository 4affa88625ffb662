mod ollama_client;

pub use ollama_client::OllamaClient;
