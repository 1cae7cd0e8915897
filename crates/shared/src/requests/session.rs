use serde::{Deserialize, Serialize};

/// Body of `POST /api/sessions`.
///
/// Either pick a built-in scenario by id or describe one. When both are given
/// the built-in id wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

/// Body of `POST /api/sessions/{id}/select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptionRequest {
    pub option_index: usize,
}
