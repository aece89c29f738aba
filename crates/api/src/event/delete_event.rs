use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::delete_event::{APIResponse, PathParams};
use forening_domain::{Event, ID};
use forening_infra::ForeningContext;

pub async fn delete_event_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, ForeningError> {
    let usecase = DeleteEventUseCase {
        organization_id: path_params.organization_id.clone(),
        event_id: path_params.event_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct DeleteEventUseCase {
    organization_id: ID,
    event_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.organization_id == self.organization_id => event,
            _ => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        // Sent-log rows for a deleted event have nothing left to guard.
        // Messages stay, they are the audit trail.
        ctx.repos
            .sent_logs
            .delete_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .events
            .delete(&event.id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        Ok(event)
    }
}
