use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::create_organization::{APIResponse, RequestBody};
use forening_domain::Organization;
use forening_infra::ForeningContext;

pub async fn create_organization_controller(
    ctx: web::Data<ForeningContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ForeningError> {
    let body = body.0;
    let usecase = CreateOrganizationUseCase {
        name: body.name,
        code: body.code,
    };
    execute(usecase, &ctx)
        .await
        .map(|organization| HttpResponse::Created().json(APIResponse::new(organization)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct CreateOrganizationUseCase {
    name: String,
    code: String,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    InvalidCreateOrganizationCode,
    InvalidName,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCreateOrganizationCode => {
                Self::Unauthorized("Invalid code provided".into())
            }
            UseCaseError::InvalidName => {
                Self::BadClientData("Organization name cannot be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateOrganizationUseCase {
    type Response = Organization;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateOrganization";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        if self.code != ctx.config.create_organization_secret_code {
            return Err(UseCaseError::InvalidCreateOrganizationCode);
        }
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidName);
        }
        let organization = Organization::new(self.name.clone());
        let res = ctx.repos.organizations.insert(&organization).await;

        res.map(|_| organization)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_code() {
        let ctx = ForeningContext::create_inmemory();

        let mut usecase = CreateOrganizationUseCase {
            name: "Korpset".into(),
            code: "not the code".into(),
        };
        assert!(usecase.execute(&ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn creates_organization_with_valid_code() {
        let ctx = ForeningContext::create_inmemory();

        let mut usecase = CreateOrganizationUseCase {
            name: "Korpset".into(),
            code: ctx.config.create_organization_secret_code.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());

        let organization = res.unwrap();
        assert!(ctx
            .repos
            .organizations
            .find(&organization.id)
            .await
            .is_some());
    }
}
