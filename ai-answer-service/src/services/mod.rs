pub mod perplexity_service;

pub use perplexity_service::PerplexityService;
