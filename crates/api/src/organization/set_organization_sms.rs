use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::set_organization_sms::{APIResponse, PathParams, RequestBody};
use forening_domain::{Organization, SmsSettings, ID};
use forening_infra::ForeningContext;

pub async fn set_organization_sms_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ForeningError> {
    let body = body.0;
    let usecase = SetOrganizationSmsUseCase {
        organization_id: path_params.organization_id.clone(),
        sender_id: body.sender_id,
        api_key: body.api_key,
        api_url: body.api_url,
        country_code: body.country_code,
    };
    execute(usecase, &ctx)
        .await
        .map(|organization| HttpResponse::Ok().json(APIResponse::new(organization)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct SetOrganizationSmsUseCase {
    organization_id: ID,
    sender_id: String,
    api_key: String,
    api_url: String,
    country_code: String,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    InvalidSettings(String),
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(organization_id) => Self::NotFound(format!(
                "The organization with id: {}, was not found.",
                organization_id
            )),
            UseCaseError::InvalidSettings(reason) => Self::BadClientData(reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetOrganizationSmsUseCase {
    type Response = Organization;

    type Error = UseCaseError;

    const NAME: &'static str = "SetOrganizationSms";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        let mut organization = ctx
            .repos
            .organizations
            .find(&self.organization_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.organization_id.clone()))?;

        let settings = SmsSettings::new(
            self.sender_id.clone(),
            self.api_key.clone(),
            self.api_url.clone(),
            self.country_code.clone(),
        )
        .map_err(|e| UseCaseError::InvalidSettings(e.to_string()))?;
        organization.settings.sms = Some(settings);

        ctx.repos
            .organizations
            .save(&organization)
            .await
            .map(|_| organization)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_api_url() {
        let ctx = ForeningContext::create_inmemory();
        let organization = Organization::new("Korpset".into());
        ctx.repos.organizations.insert(&organization).await.unwrap();

        let mut usecase = SetOrganizationSmsUseCase {
            organization_id: organization.id.clone(),
            sender_id: "Korpset".into(),
            api_key: "secret".into(),
            api_url: "not-an-url".into(),
            country_code: "+47".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidSettings(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn stores_valid_settings() {
        let ctx = ForeningContext::create_inmemory();
        let organization = Organization::new("Korpset".into());
        ctx.repos.organizations.insert(&organization).await.unwrap();

        let mut usecase = SetOrganizationSmsUseCase {
            organization_id: organization.id.clone(),
            sender_id: "Korpset".into(),
            api_key: "secret".into(),
            api_url: "https://sms.example.com/send".into(),
            country_code: "+47".into(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());

        let stored = ctx
            .repos
            .organizations
            .find(&organization.id)
            .await
            .unwrap();
        assert!(stored.settings.sms.is_some());
    }
}
