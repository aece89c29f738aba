use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::get_event::{APIResponse, PathParams};
use forening_domain::{Event, ID};
use forening_infra::ForeningContext;

pub async fn get_event_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, ForeningError> {
    let usecase = GetEventUseCase {
        organization_id: path_params.organization_id.clone(),
        event_id: path_params.event_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct GetEventUseCase {
    organization_id: ID,
    event_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        // An event belonging to another tenant does not exist as far as
        // this organization is concerned
        match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.organization_id == self.organization_id => Ok(event),
            _ => Err(UseCaseError::NotFound(self.event_id.clone())),
        }
    }
}
