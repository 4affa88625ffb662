pub mod llm;
pub mod observability;
pub mod rendering;
pub mod storage;
pub mod text_processing;
