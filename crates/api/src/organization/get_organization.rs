use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::get_organization::{APIResponse, PathParams};
use forening_domain::{Organization, ID};
use forening_infra::ForeningContext;

pub async fn get_organization_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, ForeningError> {
    let usecase = GetOrganizationUseCase {
        organization_id: path_params.organization_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|organization| HttpResponse::Ok().json(APIResponse::new(organization)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct GetOrganizationUseCase {
    organization_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(organization_id) => Self::NotFound(format!(
                "The organization with id: {}, was not found.",
                organization_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetOrganizationUseCase {
    type Response = Organization;

    type Error = UseCaseError;

    const NAME: &'static str = "GetOrganization";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .organizations
            .find(&self.organization_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.organization_id.clone()))
    }
}
