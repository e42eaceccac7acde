use ai_answer_service::AiAnswerService;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Built once at startup and handed to the router behind an `Arc`; handlers
/// receive the answer service by explicit injection instead of reaching for
/// a process-wide singleton.
pub struct AppState {
    /// Gateway to the external answer API.
    pub answers: AiAnswerService,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Fails when `PERPLEXITY_API_KEY` is absent, aborting startup.
    pub fn from_env() -> Result<Self, AppError> {
        let answers = AiAnswerService::from_env().map_err(AppError::Config)?;
        Ok(Self { answers })
    }
}
