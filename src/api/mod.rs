pub mod health;
pub mod job;
pub mod validation;

use actix_web::web;

/// Register every HTTP route the service exposes
pub fn routes(config: &mut web::ServiceConfig) {
    config
        .configure(health::health_config)
        .configure(job::handlers::job_config);
}
