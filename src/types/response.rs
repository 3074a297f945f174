//! Shared response types.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Uniform mutation result envelope.
///
/// Failures take the mirrored shape `{ "ok": false, "error": "..." }`,
/// produced by the error type's response conversion.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationAck {
    pub ok: bool,
    /// Identifier of a newly created resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl MutationAck {
    /// Plain success marker
    pub fn ok() -> Self {
        Self { ok: true, id: None }
    }

    /// Success marker carrying the created identifier
    pub fn created(id: Uuid) -> Self {
        Self {
            ok: true,
            id: Some(id),
        }
    }
}
