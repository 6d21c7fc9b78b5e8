use crate::models::report::{Report, ReportKind};
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Estrutura real do MongoDB - documento na collection "users"
///
/// Um documento por usuário, criado fora deste serviço. Campos desconhecidos
/// são mantidos em `extra` para que a resposta devolva o documento completo.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: String,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(rename = "pitchReports", default)]
    pub pitch_reports: Vec<Report>,
    #[serde(flatten)]
    pub extra: Document,
}

impl UserDocument {
    pub fn reports_of(&self, kind: ReportKind) -> &[Report] {
        match kind {
            ReportKind::Trip => &self.reports,
            ReportKind::Picture => &self.pitch_reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_both_lists() {
        let doc: UserDocument = serde_json::from_value(json!({
            "user": "alice",
            "reports": [{ "id": "1", "text": "hello", "upvotes": 0 }],
            "pitchReports": [{ "id": 2, "photo": "x.jpg" }]
        }))
        .unwrap();

        assert_eq!(doc.user, "alice");
        assert_eq!(doc.reports.len(), 1);
        assert_eq!(doc.pitch_reports.len(), 1);
        assert_eq!(doc.reports_of(ReportKind::Picture)[0].id, "2");
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let doc: UserDocument = serde_json::from_value(json!({ "user": "bob" })).unwrap();
        assert!(doc.reports.is_empty());
        assert!(doc.pitch_reports.is_empty());
    }

    #[test]
    fn test_field_name_round_trip() {
        let doc: UserDocument = serde_json::from_value(json!({
            "user": "carol",
            "pitchReports": [{ "id": "a" }],
            "bio": "climbs on weekends"
        }))
        .unwrap();

        let back = serde_json::to_value(&doc).unwrap();
        assert!(back.get("pitchReports").is_some());
        assert!(back.get("pitch_reports").is_none());
        assert_eq!(back["bio"], json!("climbs on weekends"));
    }
}
