use serde::Deserialize;

/// Question answering request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// Absent means a malformed request, an empty list matches nothing
    #[serde(default)]
    pub document_ids: Option<Vec<String>>,
    #[serde(default)]
    pub question: String,
}
