use crate::config::Config;
use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use std::path::{Path, PathBuf};

/// Página mínima devolvida quando o diretório estático não existe
const PLACEHOLDER_PAGE: &str = "<!DOCTYPE html>\n\
<html>\n\
<head><title>Trip Reports</title></head>\n\
<body><h1>Trip Reports</h1><p>Frontend build not found.</p></body>\n\
</html>\n";

/// Catch-all: serve um asset do diretório estático quando o caminho aponta
/// para um arquivo, senão o index.html da SPA.
pub async fn spa_fallback(config: web::Data<Config>, req: HttpRequest) -> HttpResponse {
    if req.method() != Method::GET {
        return HttpResponse::NotFound().finish();
    }

    if let Some(file) = resolve_asset(&config.static_dir, req.path()) {
        if let Ok(bytes) = std::fs::read(&file) {
            return HttpResponse::Ok()
                .content_type(content_type_for(&file))
                .body(bytes);
        }
    }

    let index = Path::new(&config.static_dir).join("index.html");
    match std::fs::read(&index) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(bytes),
        Err(_) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(PLACEHOLDER_PAGE),
    }
}

fn resolve_asset(static_dir: &str, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    if relative.is_empty() || relative.split('/').any(|part| part == "..") {
        return None;
    }

    let candidate = Path::new(static_dir).join(relative);
    candidate.is_file().then_some(candidate)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn test_config(static_dir: &str) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "mongodb://localhost:27017/trips".to_string(),
            static_dir: static_dir.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_fallback_serves_placeholder_without_build_dir() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config("./does-not-exist")))
                .default_service(web::to(spa_fallback)),
        )
        .await;

        let req = test::TestRequest::get().uri("/some/unmatched/path").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("Trip Reports"));
    }

    #[actix_web::test]
    async fn test_fallback_rejects_non_get() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config("./does-not-exist")))
                .default_service(web::to(spa_fallback)),
        )
        .await;

        let req = test::TestRequest::post().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[::core::prelude::v1::test]
    fn test_resolve_asset_blocks_traversal() {
        assert!(resolve_asset("./build", "/../etc/passwd").is_none());
        assert!(resolve_asset("./build", "/").is_none());
    }
}
