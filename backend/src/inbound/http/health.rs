//! Health endpoints: liveness and readiness probes for orchestration.
//!
//! Both probes answer with `Cache-Control: no-store` and a small JSON body
//! naming the storage backend the process was wired with.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Storage backend chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Postgres,
    Memory,
}

/// Probe body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    status: &'static str,
    storage: StorageKind,
}

/// Shared readiness and liveness flags.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    storage: StorageKind,
}

impl HealthState {
    /// Start live but not ready.
    pub fn new(storage: StorageKind) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            storage,
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(&self, probe_ok: bool) -> HttpResponse {
        let (mut response, status) = if probe_ok {
            (HttpResponse::Ok(), "ok")
        } else {
            (HttpResponse::ServiceUnavailable(), "unavailable")
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeBody {
                status,
                storage: self.storage,
            })
    }
}

/// Readiness probe. 200 once repositories are wired, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ProbeBody),
        (status = 503, description = "Server is not ready", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.probe_response(state.is_ready())
}

/// Liveness probe. 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive", body = ProbeBody),
        (status = 503, description = "Server is shutting down", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Value, bool) {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let no_store = res
            .headers()
            .get(header::CACHE_CONTROL)
            .is_some_and(|value| value == "no-store");
        let body: Value = test::read_body_json(res).await;
        (status, body, no_store)
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_the_ready_flag() {
        let state = web::Data::new(HealthState::new(StorageKind::Memory));
        let (status, body, no_store) = probe(state.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
        assert!(no_store);

        state.mark_ready();
        let (status, body, _) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storage"], "memory");
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new(StorageKind::Postgres));
        let (status, body, _) = probe(state.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storage"], "postgres");

        state.mark_unhealthy();
        let (status, _, _) = probe(state, "/health/live").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
