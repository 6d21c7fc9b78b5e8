use crate::{
    api::metrics,
    database::MongoDB,
    models::ReportKind,
    services::report_service::{self, ReportBody},
    utils::AppError,
};
use actix_web::{web, HttpResponse};

/// Registra as rotas de relatos; extraído do bootstrap para os testes
/// montarem o mesmo App contra um banco de teste.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/{user}/trip-reports", web::get().to(get_trip_reports))
        .route("/{user}/trip-reports/{id}", web::get().to(get_trip_report))
        .route(
            "/{user}/picture-trip-reports",
            web::get().to(get_picture_reports),
        )
        .route(
            "/{user}/picture-trip-reports/{id}",
            web::get().to(get_picture_report),
        )
        .service(
            web::scope("/api")
                .route(
                    "/{user}/trip-reports/submit",
                    web::post().to(submit_trip_report),
                )
                .route(
                    "/{user}/trip-reports/{id}/upvote",
                    web::post().to(upvote_trip_report),
                )
                .route(
                    "/{user}/trip-reports/{id}/update",
                    web::post().to(update_trip_report),
                )
                .route(
                    "/{user}/trip-reports/{id}/delete",
                    web::post().to(delete_trip_report),
                )
                .route(
                    "/{user}/picture-trip-reports/submit",
                    web::post().to(submit_picture_report),
                )
                .route(
                    "/{user}/picture-trip-reports/{id}/upvote",
                    web::post().to(upvote_picture_report),
                )
                .route(
                    "/{user}/picture-trip-reports/{id}/update",
                    web::post().to(update_picture_report),
                )
                .route(
                    "/{user}/picture-trip-reports/{id}/delete",
                    web::post().to(delete_picture_report),
                ),
        );
}

// ==================== READ ROUTES ====================

/// GET /{user}/trip-reports - Documento completo do usuário
#[utoipa::path(
    get,
    path = "/{user}/trip-reports",
    tag = "Trip Reports",
    params(("user" = String, Path, description = "User name")),
    responses(
        (status = 200, description = "Full user document, or null for an unknown user"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_trip_reports(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let user_name = path.into_inner();
    log::info!("📋 GET /{}/trip-reports", user_name);
    user_document_response(&db, &user_name).await
}

/// GET /{user}/picture-trip-reports - Documento completo do usuário
pub async fn get_picture_reports(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let user_name = path.into_inner();
    log::info!("📋 GET /{}/picture-trip-reports", user_name);
    user_document_response(&db, &user_name).await
}

/// GET /{user}/trip-reports/{id} - Um relato pelo id
#[utoipa::path(
    get,
    path = "/{user}/trip-reports/{id}",
    tag = "Trip Reports",
    params(
        ("user" = String, Path, description = "User name"),
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report JSON, or null when no report matches"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_trip_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!("📖 GET /{}/trip-reports/{}", user_name, report_id);
    single_report_response(&db, &user_name, &report_id, ReportKind::Trip).await
}

/// GET /{user}/picture-trip-reports/{id} - Um relato pelo id
pub async fn get_picture_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!("📖 GET /{}/picture-trip-reports/{}", user_name, report_id);
    single_report_response(&db, &user_name, &report_id, ReportKind::Picture).await
}

// ==================== WRITE ROUTES ====================

/// POST /api/{user}/trip-reports/submit - Acrescenta relato ao usuário
#[utoipa::path(
    post,
    path = "/api/{user}/trip-reports/submit",
    tag = "Trip Reports",
    params(("user" = String, Path, description = "User name")),
    responses(
        (status = 200, description = "Updated user document"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn submit_trip_report(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<ReportBody>,
) -> HttpResponse {
    let user_name = path.into_inner();
    log::info!("📝 POST /api/{}/trip-reports/submit", user_name);
    submit_response(&db, &user_name, body.into_inner(), ReportKind::Trip).await
}

/// POST /api/{user}/picture-trip-reports/submit - Acrescenta relato ao usuário
pub async fn submit_picture_report(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<ReportBody>,
) -> HttpResponse {
    let user_name = path.into_inner();
    log::info!("📝 POST /api/{}/picture-trip-reports/submit", user_name);
    submit_response(&db, &user_name, body.into_inner(), ReportKind::Picture).await
}

/// POST /api/{user}/trip-reports/{id}/upvote - Incrementa upvotes em 1
#[utoipa::path(
    post,
    path = "/api/{user}/trip-reports/{id}/upvote",
    tag = "Trip Reports",
    params(
        ("user" = String, Path, description = "User name"),
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Updated user document"),
        (status = 404, description = "Report or user not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn upvote_trip_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!("👍 POST /api/{}/trip-reports/{}/upvote", user_name, report_id);
    upvote_response(&db, &user_name, &report_id, ReportKind::Trip).await
}

/// POST /api/{user}/picture-trip-reports/{id}/upvote - Incrementa upvotes em 1
pub async fn upvote_picture_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!(
        "👍 POST /api/{}/picture-trip-reports/{}/upvote",
        user_name,
        report_id
    );
    upvote_response(&db, &user_name, &report_id, ReportKind::Picture).await
}

/// POST /api/{user}/trip-reports/{id}/update - Substitui o relato casado
/// pelo corpo recebido; o casamento usa o id da URL, não o do corpo.
#[utoipa::path(
    post,
    path = "/api/{user}/trip-reports/{id}/update",
    tag = "Trip Reports",
    params(
        ("user" = String, Path, description = "User name"),
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Updated user document"),
        (status = 404, description = "Report or user not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update_trip_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
    body: web::Json<ReportBody>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!("🔧 POST /api/{}/trip-reports/{}/update", user_name, report_id);
    update_response(&db, &user_name, &report_id, body.into_inner(), ReportKind::Trip).await
}

/// POST /api/{user}/picture-trip-reports/{id}/update - Substitui o relato casado
pub async fn update_picture_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
    body: web::Json<ReportBody>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!(
        "🔧 POST /api/{}/picture-trip-reports/{}/update",
        user_name,
        report_id
    );
    update_response(
        &db,
        &user_name,
        &report_id,
        body.into_inner(),
        ReportKind::Picture,
    )
    .await
}

/// POST /api/{user}/trip-reports/{id}/delete - Remove os relatos com o id
#[utoipa::path(
    post,
    path = "/api/{user}/trip-reports/{id}/delete",
    tag = "Trip Reports",
    params(
        ("user" = String, Path, description = "User name"),
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Updated user document"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_trip_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!("🗑️  POST /api/{}/trip-reports/{}/delete", user_name, report_id);
    delete_response(&db, &user_name, &report_id, ReportKind::Trip).await
}

/// POST /api/{user}/picture-trip-reports/{id}/delete - Remove os relatos com o id
pub async fn delete_picture_report(
    db: web::Data<MongoDB>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_name, report_id) = path.into_inner();
    log::info!(
        "🗑️  POST /api/{}/picture-trip-reports/{}/delete",
        user_name,
        report_id
    );
    delete_response(&db, &user_name, &report_id, ReportKind::Picture).await
}

// ==================== SHARED RESPONSE BUILDERS ====================

async fn user_document_response(db: &MongoDB, user_name: &str) -> HttpResponse {
    match report_service::find_user(db, user_name).await {
        // Usuário desconhecido responde 200 com null, não 404
        Ok(user_info) => HttpResponse::Ok().json(user_info),
        Err(e) => error_response(e),
    }
}

async fn single_report_response(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    kind: ReportKind,
) -> HttpResponse {
    match report_service::get_report(db, user_name, report_id, kind).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(e),
    }
}

async fn submit_response(
    db: &MongoDB,
    user_name: &str,
    body: ReportBody,
    kind: ReportKind,
) -> HttpResponse {
    match report_service::submit_report(db, user_name, &body.report, kind).await {
        Ok(updated) => {
            log::info!("✅ Report '{}' submitted for {}", body.report.id, user_name);
            metrics::increment_submit_count();
            HttpResponse::Ok().json(updated)
        }
        Err(e) => error_response(e),
    }
}

async fn upvote_response(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    kind: ReportKind,
) -> HttpResponse {
    match report_service::upvote_report(db, user_name, report_id, kind).await {
        Ok(updated) => {
            log::info!("✅ Report '{}' upvoted for {}", report_id, user_name);
            metrics::increment_upvote_count();
            HttpResponse::Ok().json(updated)
        }
        Err(e) => error_response(e),
    }
}

async fn update_response(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    body: ReportBody,
    kind: ReportKind,
) -> HttpResponse {
    match report_service::update_report(db, user_name, report_id, &body.report, kind).await {
        Ok(updated) => {
            log::info!("✅ Report '{}' updated for {}", report_id, user_name);
            HttpResponse::Ok().json(updated)
        }
        Err(e) => error_response(e),
    }
}

async fn delete_response(
    db: &MongoDB,
    user_name: &str,
    report_id: &str,
    kind: ReportKind,
) -> HttpResponse {
    match report_service::delete_report(db, user_name, report_id, kind).await {
        Ok(updated) => {
            log::info!("✅ Report '{}' deleted for {}", report_id, user_name);
            HttpResponse::Ok().json(updated)
        }
        Err(e) => error_response(e),
    }
}

fn error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::NotFound(msg) => {
            log::warn!("⚠️ {}", msg);
            HttpResponse::NotFound().json(serde_json::json!({ "message": msg }))
        }
        AppError::InvalidRequest(msg) => {
            log::warn!("⚠️ {}", msg);
            HttpResponse::BadRequest().json(serde_json::json!({ "message": msg }))
        }
        e => {
            log::error!("❌ {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Error connecting to db",
                "error": e.to_string()
            }))
        }
    }
}
