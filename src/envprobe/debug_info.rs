use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Extension, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ProbeState, ROUTES};

const UNKNOWN_DEPLOYMENT: &str = "unknown";

#[derive(Deserialize, Serialize, Debug)]
pub struct DebugInfo {
    pub timestamp: String,
    pub version: String,
    pub runtime: String,
    #[serde(rename = "deploymentEnv")]
    pub deployment_env: String,
    pub routes: Vec<String>,
    pub env: BTreeMap<String, String>,
}

pub async fn handle(state: Extension<Arc<ProbeState>>) -> Json<DebugInfo> {
    let info = collect(&state);

    info!(
        deployment_env = %info.deployment_env,
        exposed = info.env.len(),
        "debug info requested"
    );

    Json(info)
}

pub fn collect(state: &ProbeState) -> DebugInfo {
    let deployment_env = state
        .environment
        .var(&state.config.deployment_variable)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_DEPLOYMENT.to_string());

    DebugInfo {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION").to_string(),
        runtime: "rust".to_string(),
        deployment_env,
        routes: ROUTES.iter().map(|r| r.to_string()).collect(),
        env: exposed_vars(state),
    }
}

/// Variables under an exposed prefix. The key variable is always withheld.
fn exposed_vars(state: &ProbeState) -> BTreeMap<String, String> {
    let config = &state.config;

    state
        .environment
        .vars()
        .into_iter()
        .filter(|(name, _)| *name != config.key_variable)
        .filter(|(name, _)| {
            config
                .exposed_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
        })
        .collect()
}
