// Equinix wire types
//
// Only the fields the sync path reads are typed; everything else the API
// returns is ignored by serde.

use serde::{Deserialize, Serialize};

/// Patch panel as returned by `GET /colocations/v2/patchPanels/{id}`.
///
/// `available_ports` is required: a body without it is a malformed
/// response, not a panel with zero free ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPanel {
    #[serde(default)]
    pub patch_panel_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ibx: Option<String>,
    #[serde(default)]
    pub cage_id: Option<String>,
    #[serde(default)]
    pub cabinet_id: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub dedicated_media_type: Option<String>,
    #[serde(default, rename = "type")]
    pub panel_type: Option<String>,
    #[serde(default)]
    pub max_ports: Option<u32>,
    pub available_ports: Vec<u32>,
}

impl PatchPanel {
    /// The panel identifier, whichever key the API used for it.
    pub fn panel_id(&self) -> Option<&str> {
        self.patch_panel_id.as_deref().or(self.id.as_deref())
    }
}

/// OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Form body for the client-credentials grant.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}
