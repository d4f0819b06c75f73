use std::collections::HashMap;

use async_trait::async_trait;
use celo_plugin_commons::error::ExternalError;
use serde::Serialize;
use serde_json::Value;

/// Conversation state handed to actions, keyed by template placeholder.
pub type State = HashMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelClass {
    Small,
    Medium,
    Large,
}

/// Host-side settings lookup.
#[cfg_attr(test, mockall::automock)]
pub trait AgentRuntime: Send + Sync {
    fn get_setting(&self, key: &str) -> Option<String>;
}

/// Turns a composed prompt into a JSON object, usually by asking an LLM.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectGenerator: Send + Sync {
    async fn generate_object(&self, context: &str, model: ModelClass) -> Result<Value, ExternalError>;
}

/// What an action reports back to the conversation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionResponse {
    pub text: String,
    pub content: Value,
}

// Settings straight from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvRuntime;

impl AgentRuntime for EnvRuntime {
    fn get_setting(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

// Answers every prompt with the same object. Used by the CLI, where the
// request is already structured.
#[derive(Clone, Debug)]
pub struct StaticObjectGenerator {
    object: Value,
}

impl StaticObjectGenerator {
    pub fn new(object: Value) -> Self {
        Self { object }
    }
}

#[async_trait]
impl ObjectGenerator for StaticObjectGenerator {
    async fn generate_object(&self, _context: &str, _model: ModelClass) -> Result<Value, ExternalError> {
        Ok(self.object.clone())
    }
}
