use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use forening_api_structs::create_member::{APIResponse, PathParams, RequestBody};
use forening_domain::{Member, ID};
use forening_infra::ForeningContext;

pub async fn create_member_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ForeningError> {
    let body = body.0;
    let usecase = CreateMemberUseCase {
        organization_id: path_params.organization_id.clone(),
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
        groups: body.groups.unwrap_or_default(),
    };
    execute(usecase, &ctx)
        .await
        .map(|member| HttpResponse::Created().json(APIResponse::new(member)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
struct CreateMemberUseCase {
    organization_id: ID,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    groups: Vec<String>,
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
impl UseCase for CreateMemberUseCase {
    type Response = Member;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateMember";

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

        let mut member = Member::new(
            self.organization_id.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
        );
        member.phone = self.phone.clone();
        member.groups = self.groups.clone();

        ctx.repos
            .members
            .insert(&member)
            .await
            .map(|_| member)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use forening_domain::Organization;

    #[actix_web::main]
    #[test]
    async fn creates_member_in_existing_organization() {
        let ctx = ForeningContext::create_inmemory();
        let organization = Organization::new("Korpset".into());
        ctx.repos.organizations.insert(&organization).await.unwrap();

        let mut usecase = CreateMemberUseCase {
            organization_id: organization.id.clone(),
            first_name: "Kari".into(),
            last_name: "Nordmann".into(),
            phone: Some("41234567".into()),
            groups: vec!["Styret".into()],
        };
        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());

        let members = ctx
            .repos
            .members
            .find_by_org(&organization.id)
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_organization() {
        let ctx = ForeningContext::create_inmemory();

        let mut usecase = CreateMemberUseCase {
            organization_id: ID::default(),
            first_name: "Kari".into(),
            last_name: "Nordmann".into(),
            phone: None,
            groups: vec![],
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::OrganizationNotFound(_))
        ));
    }
}
