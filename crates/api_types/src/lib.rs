//! Payloads accepted by the HTTP API. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

pub mod request {
    use super::*;

    /// Body of `POST /requests`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestNew {
        pub contract_id: String,
        #[serde(default)]
        pub call_off_order_ids: Vec<String>,
    }

    /// Body of `PUT /requests/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestUpdate {
        pub call_off_order_ids: Vec<String>,
    }

    /// Body of `PATCH /requests/{id}/status`. `status` is a system name,
    /// matched case-insensitively.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestStatusUpdate {
        pub status: String,
    }

    /// Query of `GET /requests`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestList {
        pub contract_id: Option<String>,
    }
}
