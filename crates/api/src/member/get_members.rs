use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::get_members::{APIResponse, PathParams};
use forening_domain::{Member, ID};
use forening_infra::ForeningContext;

pub async fn get_members_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, ForeningError> {
    let usecase = GetMembersUseCase {
        organization_id: path_params.organization_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|members| HttpResponse::Ok().json(APIResponse::new(members)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct GetMembersUseCase {
    organization_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    OrganizationNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OrganizationNotFound(organization_id) => Self::NotFound(format!(
                "The organization with id: {}, was not found.",
                organization_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMembersUseCase {
    type Response = Vec<Member>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMembers";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .organizations
            .find(&self.organization_id)
            .await
            .is_none()
        {
            return Err(UseCaseError::OrganizationNotFound(
                self.organization_id.clone(),
            ));
        }

        ctx.repos
            .members
            .find_by_org(&self.organization_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
