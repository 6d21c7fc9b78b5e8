use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trip Reports API",
        version = "1.0.0",
        description = "API documentation for the Trip Reports Service.\n\n**Features:**\n- Fetch, submit, update, delete and upvote trip reports\n- Two report kinds per user: text reports and picture reports\n- Health monitoring and metrics\n\nPicture routes (`/picture-trip-reports`) mirror the documented trip routes one for one.",
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Trip reports (picture routes are identical apart from the path)
        crate::api::reports::get_trip_reports,
        crate::api::reports::get_trip_report,
        crate::api::reports::submit_trip_report,
        crate::api::reports::upvote_trip_report,
        crate::api::reports::update_trip_report,
        crate::api::reports::delete_trip_report,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Trip Reports", description = "Per-user trip report lists stored in MongoDB. Reads return null for misses; writes return the updated user document."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
