//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use pagination::PageDefaults;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::registry::{ServiceRegistry, Storage};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

struct AppDependencies<S: Storage> {
    health_state: web::Data<HealthState>,
    page_defaults: web::Data<PageDefaults>,
    registry: web::Data<ServiceRegistry<S>>,
}

impl<S: Storage> Clone for AppDependencies<S> {
    fn clone(&self) -> Self {
        Self {
            health_state: self.health_state.clone(),
            page_defaults: self.page_defaults.clone(),
            registry: self.registry.clone(),
        }
    }
}

fn build_app<S: Storage>(
    deps: AppDependencies<S>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        page_defaults,
        registry,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(page_defaults)
        .app_data(registry)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over `registry`.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server<S: Storage>(
    health_state: web::Data<HealthState>,
    registry: ServiceRegistry<S>,
    config: ServerConfig,
) -> std::io::Result<Server>
where
    ServiceRegistry<S>: Send + Sync,
{
    let ServerConfig {
        bind_addr,
        page_defaults,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        page_defaults: web::Data::new(page_defaults),
        registry: web::Data::new(registry),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
