use actix_web::{
    HttpResponse, delete, get, patch, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;

use super::dto::{
    CreateJobRequest, JobResponse, MessageResponse, UpdateJobRequest, UpdateStatusRequest,
};
use super::service::{JobService, ServiceError};

#[get("")]
async fn list_jobs(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs().await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    body: Json<CreateJobRequest>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(JobResponse {
        message: "Job created successfully".to_string(),
        job,
    }))
}

#[get("/stats")]
async fn job_stats(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(service.stats().await?))
}

#[get("/board")]
async fn job_board(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(service.board().await?))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[put("/{id}")]
async fn update_job(
    service: Data<JobService>,
    path: Path<String>,
    body: Json<UpdateJobRequest>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.update_job(&path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job updated successfully".to_string(),
        job,
    }))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

#[patch("/{id}/update-status")]
async fn update_status(
    service: Data<JobService>,
    path: Path<String>,
    body: Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ServiceError> {
    let job = service
        .update_status(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job status updated successfully".to_string(),
        job,
    }))
}

pub fn job_config(config: &mut ServiceConfig) {
    // Fixed paths go first so they are not captured by `/{id}`
    config.service(
        scope("/jobs")
            .service(list_jobs)
            .service(create_job)
            .service(job_stats)
            .service(job_board)
            .service(get_job)
            .service(update_job)
            .service(delete_job)
            .service(update_status),
    );
}
