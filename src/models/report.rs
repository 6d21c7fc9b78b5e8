use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// Item dentro dos arrays "reports" / "pitchReports" do documento do usuário.
///
/// Apenas `id` e `upvotes` são conhecidos pelo serviço; qualquer outro campo
/// enviado pelo cliente é preservado intacto em `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Report {
    #[serde(deserialize_with = "deserialize_report_id")]
    pub id: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// Qual dos dois arrays do documento do usuário uma rota opera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Trip,
    Picture,
}

impl ReportKind {
    /// Nome do campo array no documento MongoDB
    pub fn field(&self) -> &'static str {
        match self {
            ReportKind::Trip => "reports",
            ReportKind::Picture => "pitchReports",
        }
    }
}

/// Ids de relato chegam como string, número ou ObjectId dependendo de quem
/// gravou o documento; canonicaliza tudo para String antes de comparar.
fn deserialize_report_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bson_value = Bson::deserialize(deserializer)?;
    match bson_value {
        Bson::String(s) => Ok(s),
        Bson::Int32(n) => Ok(n.to_string()),
        Bson::Int64(n) => Ok(n.to_string()),
        Bson::Double(n) if n.is_finite() && n.fract() == 0.0 => Ok((n as i64).to_string()),
        Bson::Double(n) => Ok(n.to_string()),
        Bson::ObjectId(oid) => Ok(oid.to_hex()),
        _ => Err(serde::de::Error::custom(
            "Expected string, number or ObjectId report id",
        )),
    }
}
