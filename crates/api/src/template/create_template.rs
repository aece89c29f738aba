use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::create_template::{APIResponse, PathParams, RequestBody};
use forening_domain::{MessageTemplate, ID};
use forening_infra::ForeningContext;

pub async fn create_template_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ForeningError> {
    let body = body.0;
    let usecase = CreateTemplateUseCase {
        organization_id: path_params.organization_id.clone(),
        name: body.name,
        body: body.body,
    };
    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Created().json(APIResponse::new(template)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct CreateTemplateUseCase {
    organization_id: ID,
    name: String,
    body: String,
}

#[derive(Debug)]
enum UseCaseError {
    OrganizationNotFound(ID),
    EmptyBody,
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OrganizationNotFound(organization_id) => Self::NotFound(format!(
                "The organization with id: {}, was not found.",
                organization_id
            )),
            UseCaseError::EmptyBody => {
                Self::BadClientData("Template body cannot be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTemplate";

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
        if self.body.trim().is_empty() {
            return Err(UseCaseError::EmptyBody);
        }

        let template = MessageTemplate::new(
            self.organization_id.clone(),
            self.name.clone(),
            self.body.clone(),
        );
        ctx.repos
            .templates
            .insert(&template)
            .await
            .map(|_| template)
            .map_err(|_| UseCaseError::StorageError)
    }
}
