pub mod mento;
pub mod transfer;

use async_trait::async_trait;
use celo_plugin_commons::error::CodedError;
use celo_plugin_core::chain::CeloChain;
use log::error;
use serde_json::json;

use crate::config::{PRIVATE_KEY_ENV, looks_like_private_key};
use crate::error::{PluginError, PluginResult};
use crate::runtime::{ActionResponse, AgentRuntime, State};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionExample {
    pub user: &'static str,
    pub text: &'static str,
    pub action: &'static str,
}

/// Static metadata the host uses to pick an action for a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub similes: &'static [&'static str],
    pub examples: &'static [ActionExample],
}

impl ActionDescriptor {
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.similes.iter().any(|s| s.eq_ignore_ascii_case(name))
    }
}

pub type Callback<'a> = &'a mut (dyn FnMut(ActionResponse) + Send);

#[async_trait]
pub trait Action: Send + Sync {
    fn descriptor(&self) -> &ActionDescriptor;

    /// Whether the action can run at all for this runtime.
    fn validate(&self, runtime: &dyn AgentRuntime) -> bool {
        has_private_key(runtime)
    }

    /// Extracts the request from the conversation state and executes it.
    async fn run(&self, state: &State) -> PluginResult<ActionResponse>;

    /// Like `run`, but reports through `callback` and returns `true` on success.
    async fn handle(&self, state: &State, callback: Option<Callback<'_>>) -> bool {
        respond(self.descriptor().name, self.run(state).await, callback)
    }
}

pub fn has_private_key(runtime: &dyn AgentRuntime) -> bool {
    runtime
        .get_setting(PRIVATE_KEY_ENV)
        .is_some_and(|key| looks_like_private_key(&key))
}

// Adds the chain list the templates reference.
pub(crate) fn prompt_state(state: &State) -> State {
    let mut state = state.clone();
    state
        .entry("supportedChains".to_string())
        .or_insert_with(CeloChain::supported_names);
    state
}

pub(crate) fn error_response(action: &str, err: &PluginError) -> ActionResponse {
    error!("{action} failed: {err}");
    ActionResponse {
        text: format!("Error: {err}"),
        content: json!({
            "error": err.to_string(),
            "code": err.code().as_u16(),
        }),
    }
}

pub(crate) fn respond(action: &str, result: PluginResult<ActionResponse>, callback: Option<Callback<'_>>) -> bool {
    let (ok, response) = match result {
        Ok(response) => (true, response),
        Err(err) => (false, error_response(action, &err)),
    };
    if let Some(callback) = callback {
        callback(response);
    }
    ok
}
