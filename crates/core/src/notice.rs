//! Notices (`avisos`) sent to customers.

use serde::{Deserialize, Serialize};

use crate::catalog::non_blank;
use crate::types::NoticeId;

/// Default notice type.
pub const DEFAULT_NOTICE_KIND: &str = "Informativo";

/// Default notice status.
pub const DEFAULT_NOTICE_STATUS: &str = "Activo";

/// A notice as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    #[serde(rename = "asunto", default)]
    pub subject: String,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "estado", default)]
    pub status: String,
    #[serde(rename = "prioridad", default)]
    pub priority: i32,
    #[serde(rename = "fecha_programada", default)]
    pub scheduled_for: Option<String>,
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "link_accion", default)]
    pub action_link: Option<String>,
}

/// Notice form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoticeDraft {
    pub title: String,
    pub message: String,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub scheduled_for: Option<String>,
    pub image_url: Option<String>,
    pub action_link: Option<String>,
}

/// Wire payload for creating or replacing a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticePayload {
    #[serde(rename = "asunto")]
    pub subject: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "prioridad")]
    pub priority: i32,
    #[serde(rename = "fecha_programada", skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    #[serde(rename = "imagen_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "link_accion", skip_serializing_if = "Option::is_none")]
    pub action_link: Option<String>,
}

impl NoticeDraft {
    /// Map the form onto the backend payload.
    ///
    /// The title becomes `asunto`; missing type, status and priority take
    /// their defaults; blank optional fields are left out.
    #[must_use]
    pub fn into_payload(self) -> NoticePayload {
        NoticePayload {
            subject: self.title,
            message: self.message,
            kind: non_blank(self.kind).unwrap_or_else(|| DEFAULT_NOTICE_KIND.to_owned()),
            status: non_blank(self.status).unwrap_or_else(|| DEFAULT_NOTICE_STATUS.to_owned()),
            priority: self.priority.filter(|p| *p != 0).unwrap_or(1),
            scheduled_for: non_blank(self.scheduled_for),
            image_url: non_blank(self.image_url),
            action_link: non_blank(self.action_link),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payload_defaults_and_blank_fields() {
        let payload = NoticeDraft {
            title: "Ofertas de invierno".into(),
            message: "20% en estufas".into(),
            image_url: Some("  ".into()),
            action_link: Some("https://tienda.bo/ofertas".into()),
            ..NoticeDraft::default()
        }
        .into_payload();

        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({
                "asunto": "Ofertas de invierno",
                "mensaje": "20% en estufas",
                "tipo": "Informativo",
                "estado": "Activo",
                "prioridad": 1,
                "link_accion": "https://tienda.bo/ofertas"
            })
        );
    }
}
