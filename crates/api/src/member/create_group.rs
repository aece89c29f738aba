use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::create_group::{APIResponse, PathParams, RequestBody};
use forening_domain::{MemberGroup, ID};
use forening_infra::ForeningContext;

pub async fn create_group_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ForeningError> {
    let usecase = CreateGroupUseCase {
        organization_id: path_params.organization_id.clone(),
        name: body.0.name,
    };
    execute(usecase, &ctx)
        .await
        .map(|group| HttpResponse::Created().json(APIResponse::new(group)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct CreateGroupUseCase {
    organization_id: ID,
    name: String,
}

#[derive(Debug)]
enum UseCaseError {
    OrganizationNotFound(ID),
    InvalidName,
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OrganizationNotFound(organization_id) => Self::NotFound(format!(
                "The organization with id: {}, was not found.",
                organization_id
            )),
            UseCaseError::InvalidName => Self::BadClientData("Group name cannot be empty".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateGroupUseCase {
    type Response = MemberGroup;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateGroup";

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
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidName);
        }

        let group = MemberGroup::new(self.organization_id.clone(), self.name.clone());
        ctx.repos
            .groups
            .insert(&group)
            .await
            .map(|_| group)
            .map_err(|_| UseCaseError::StorageError)
    }
}
