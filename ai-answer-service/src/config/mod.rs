pub mod answer_model_config;
pub mod default_config;

pub use answer_model_config::AnswerModelConfig;
pub use default_config::config_sonar;
