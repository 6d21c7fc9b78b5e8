// ==================== TRIP REPORTS ====================
// Operações na collection "users" - um documento por usuário com os arrays
// "reports" e "pitchReports". O serviço nunca cria usuários: submit só
// adiciona relato a um documento que já existe.

use crate::{
    database::MongoDB,
    models::{Report, ReportKind, UserDocument},
    utils::AppError,
};
use mongodb::bson::{doc, to_bson};
use serde::Deserialize;

const COLLECTION: &str = "users";

// ==================== REQUEST MODELS ====================

/// Corpo de submit/update: `{ "report": { ... } }`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReportBody {
    pub report: Report,
}

// ==================== REPORT LOCATOR ====================

/// Primeiro relato do array cujo id bate exatamente com `report_id`.
///
/// Ids numéricos gravados no documento já chegam canonicalizados como string
/// pela deserialização, então "1" encontra um relato gravado com id 1.
pub fn find_report<'a>(
    user_info: &'a UserDocument,
    report_id: &str,
    kind: ReportKind,
) -> Option<&'a Report> {
    user_info
        .reports_of(kind)
        .iter()
        .find(|report| report.id == report_id)
}

// ==================== SERVICE FUNCTIONS ====================

/// Busca o documento do usuário pelo nome
pub async fn find_user(db: &MongoDB, user_name: &str) -> Result<Option<UserDocument>, AppError> {
    let users = db.collection::<UserDocument>(COLLECTION);

    users
        .find_one(doc! { "user": user_name })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// GET por id - busca o documento e localiza o relato em memória
pub async fn get_report(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    kind: ReportKind,
) -> Result<Option<Report>, AppError> {
    let user_info = find_user(db, user_name).await?;

    Ok(user_info.and_then(|info| find_report(&info, report_id, kind).cloned()))
}

/// POST submit - acrescenta o relato ao final do array do usuário
pub async fn submit_report(
    db: &MongoDB,
    user_name: &str,
    report: &Report,
    kind: ReportKind,
) -> Result<UserDocument, AppError> {
    let users = db.collection::<UserDocument>(COLLECTION);

    let report_bson =
        to_bson(report).map_err(|e| AppError::InvalidRequest(format!("Bad report body: {}", e)))?;

    let result = users
        .update_one(
            doc! { "user": user_name },
            doc! { "$push": { kind.field(): report_bson } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("User '{}' not found", user_name)));
    }

    fetch_updated(db, user_name).await
}

/// POST upvote - um único $inc atômico no elemento casado; sem janela de
/// read-then-write, um upvote concorrente nunca se perde.
pub async fn upvote_report(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    kind: ReportKind,
) -> Result<UserDocument, AppError> {
    let users = db.collection::<UserDocument>(COLLECTION);

    let result = users
        .update_one(
            doc! { "user": user_name, format!("{}.id", kind.field()): report_id },
            doc! { "$inc": { format!("{}.$.upvotes", kind.field()): 1 } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!(
            "Report '{}' not found for user '{}'",
            report_id, user_name
        )));
    }

    fetch_updated(db, user_name).await
}

/// POST update - substitui o elemento casado inteiro pelo corpo recebido.
/// O casamento é pelo id da URL; o id dentro do corpo não é consultado.
pub async fn update_report(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    report: &Report,
    kind: ReportKind,
) -> Result<UserDocument, AppError> {
    let users = db.collection::<UserDocument>(COLLECTION);

    let report_bson =
        to_bson(report).map_err(|e| AppError::InvalidRequest(format!("Bad report body: {}", e)))?;

    let result = users
        .update_one(
            doc! { "user": user_name, format!("{}.id", kind.field()): report_id },
            doc! { "$set": { format!("{}.$", kind.field()): report_bson } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!(
            "Report '{}' not found for user '{}'",
            report_id, user_name
        )));
    }

    fetch_updated(db, user_name).await
}

/// POST delete - remove todos os elementos cujo id bate; id inexistente
/// deixa o array como está e ainda devolve o documento.
pub async fn delete_report(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    kind: ReportKind,
) -> Result<UserDocument, AppError> {
    let users = db.collection::<UserDocument>(COLLECTION);

    let result = users
        .update_one(
            doc! { "user": user_name },
            doc! { "$pull": { kind.field(): { "id": report_id } } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("User '{}' not found", user_name)));
    }

    fetch_updated(db, user_name).await
}

/// Toda escrita devolve o documento recém-atualizado, como o cliente espera
async fn fetch_updated(db: &MongoDB, user_name: &str) -> Result<UserDocument, AppError> {
    find_user(db, user_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> UserDocument {
        serde_json::from_value(json!({
            "user": "alice",
            "reports": [
                { "id": "1", "text": "hello", "upvotes": 0 },
                { "id": 2, "text": "numeric id", "upvotes": 3 },
                { "id": "2", "text": "string twin", "upvotes": 0 }
            ],
            "pitchReports": [
                { "id": "1", "photo": "summit.jpg", "upvotes": 1 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_report_exact_match() {
        let user = sample_user();
        let found = find_report(&user, "1", ReportKind::Trip).unwrap();
        assert_eq!(found.extra.get_str("text").unwrap(), "hello");
    }

    #[test]
    fn test_find_report_matches_numeric_id_first() {
        let user = sample_user();
        let found = find_report(&user, "2", ReportKind::Trip).unwrap();
        assert_eq!(found.extra.get_str("text").unwrap(), "numeric id");
        assert_eq!(found.upvotes, 3);
    }

    #[test]
    fn test_find_report_kind_separation() {
        let user = sample_user();
        let picture = find_report(&user, "1", ReportKind::Picture).unwrap();
        assert_eq!(picture.extra.get_str("photo").unwrap(), "summit.jpg");
    }

    #[test]
    fn test_find_report_missing() {
        let user = sample_user();
        assert!(find_report(&user, "999", ReportKind::Trip).is_none());
    }

    // ==================== DB TESTS ====================
    // Rodam contra um MongoDB local: cargo test -- --ignored

    async fn test_db() -> MongoDB {
        MongoDB::new("mongodb://localhost:27017/trips_test")
            .await
            .expect("Failed to connect to MongoDB")
    }

    async fn seed_user(db: &MongoDB, user_name: &str) {
        let users = db.collection::<UserDocument>(COLLECTION);
        users
            .delete_many(doc! { "user": user_name })
            .await
            .unwrap();
        users
            .insert_one(
                serde_json::from_value::<UserDocument>(json!({
                    "user": user_name,
                    "reports": [],
                    "pitchReports": []
                }))
                .unwrap(),
            )
            .await
            .unwrap();
    }

    fn report(id: &str, text: &str, upvotes: i64) -> Report {
        serde_json::from_value(json!({ "id": id, "text": text, "upvotes": upvotes })).unwrap()
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_submit_appends_in_order() {
        let db = test_db().await;
        seed_user(&db, "submit-order").await;

        submit_report(&db, "submit-order", &report("1", "first", 0), ReportKind::Trip)
            .await
            .unwrap();
        let updated = submit_report(&db, "submit-order", &report("2", "second", 0), ReportKind::Trip)
            .await
            .unwrap();

        assert_eq!(updated.reports.len(), 2);
        assert_eq!(updated.reports[0].id, "1");
        assert_eq!(updated.reports[1].id, "2");
        assert!(updated.pitch_reports.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_submit_unknown_user_is_not_found() {
        let db = test_db().await;
        let users = db.collection::<UserDocument>(COLLECTION);
        users.delete_many(doc! { "user": "ghost" }).await.unwrap();

        let result = submit_report(&db, "ghost", &report("1", "x", 0), ReportKind::Trip).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_upvote_increments_only_the_match() {
        let db = test_db().await;
        seed_user(&db, "upvoter").await;
        submit_report(&db, "upvoter", &report("1", "a", 0), ReportKind::Trip)
            .await
            .unwrap();
        submit_report(&db, "upvoter", &report("2", "b", 5), ReportKind::Trip)
            .await
            .unwrap();

        let updated = upvote_report(&db, "upvoter", "1", ReportKind::Trip)
            .await
            .unwrap();

        assert_eq!(updated.reports[0].upvotes, 1);
        assert_eq!(updated.reports[1].upvotes, 5);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_upvote_missing_report_is_not_found() {
        let db = test_db().await;
        seed_user(&db, "upvote-miss").await;

        let result = upvote_report(&db, "upvote-miss", "404", ReportKind::Trip).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_update_replaces_in_place() {
        let db = test_db().await;
        seed_user(&db, "updater").await;
        submit_report(&db, "updater", &report("1", "before", 0), ReportKind::Trip)
            .await
            .unwrap();
        submit_report(&db, "updater", &report("2", "sibling", 0), ReportKind::Trip)
            .await
            .unwrap();

        let replacement = report("1", "after", 9);
        let updated = update_report(&db, "updater", "1", &replacement, ReportKind::Trip)
            .await
            .unwrap();

        assert_eq!(updated.reports.len(), 2);
        assert_eq!(updated.reports[0].extra.get_str("text").unwrap(), "after");
        assert_eq!(updated.reports[0].upvotes, 9);
        assert_eq!(updated.reports[1].extra.get_str("text").unwrap(), "sibling");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_delete_removes_all_matches_and_tolerates_missing() {
        let db = test_db().await;
        seed_user(&db, "deleter").await;
        submit_report(&db, "deleter", &report("1", "a", 0), ReportKind::Trip)
            .await
            .unwrap();
        submit_report(&db, "deleter", &report("1", "dup", 0), ReportKind::Trip)
            .await
            .unwrap();
        submit_report(&db, "deleter", &report("2", "keep", 0), ReportKind::Trip)
            .await
            .unwrap();

        let updated = delete_report(&db, "deleter", "1", ReportKind::Trip)
            .await
            .unwrap();
        assert_eq!(updated.reports.len(), 1);
        assert_eq!(updated.reports[0].id, "2");

        let unchanged = delete_report(&db, "deleter", "404", ReportKind::Trip)
            .await
            .unwrap();
        assert_eq!(unchanged.reports.len(), 1);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_kinds_are_independent() {
        let db = test_db().await;
        seed_user(&db, "two-kinds").await;
        submit_report(&db, "two-kinds", &report("1", "trip", 0), ReportKind::Trip)
            .await
            .unwrap();
        submit_report(&db, "two-kinds", &report("1", "picture", 0), ReportKind::Picture)
            .await
            .unwrap();

        let updated = upvote_report(&db, "two-kinds", "1", ReportKind::Picture)
            .await
            .unwrap();

        assert_eq!(updated.reports[0].upvotes, 0);
        assert_eq!(updated.pitch_reports[0].upvotes, 1);
    }
}
