use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use forening_api_structs::create_event::{APIResponse, PathParams, RequestBody};
use forening_domain::{Event, EventReminder, RecipientSelector, RecurrenceFrequency, ID};
use forening_infra::ForeningContext;

pub async fn create_event_controller(
    ctx: web::Data<ForeningContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ForeningError> {
    let body = body.0;
    let usecase = CreateEventUseCase {
        organization_id: path_params.organization_id.clone(),
        name: body.name,
        description: body.description,
        anchor_date: body.anchor_date,
        end_date: body.end_date,
        start_time: body.start_time,
        location: body.location,
        frequency: body.frequency,
        reminder: body.reminder,
    };
    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(ForeningError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub organization_id: ID,
    pub name: String,
    pub description: Option<String>,
    pub anchor_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub frequency: Option<RecurrenceFrequency>,
    pub reminder: Option<EventReminder>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    OrganizationNotFound(ID),
    InvalidEndDate,
    InvalidReminder(String),
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OrganizationNotFound(organization_id) => Self::NotFound(format!(
                "The organization with id: {}, was not found.",
                organization_id
            )),
            UseCaseError::InvalidEndDate => {
                Self::BadClientData("End date cannot be before the event date".into())
            }
            UseCaseError::InvalidReminder(reason) => Self::BadClientData(reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Reminder settings are checked on the way in: a selector that names
/// groups or members must carry at least one id and every id must be
/// well-formed. Resolution is lenient about ids later, this boundary is
/// not.
fn validate_reminder(reminder: &EventReminder) -> Result<(), String> {
    match &reminder.recipients {
        RecipientSelector::AllMembers => Ok(()),
        RecipientSelector::Groups(ids) | RecipientSelector::SelectedMembers(ids) => {
            if ids.is_empty() {
                return Err("Recipient id list cannot be empty".into());
            }
            for id in ids {
                if id.parse::<ID>().is_err() {
                    return Err(format!("Recipient id: {} is malformed", id));
                }
            }
            Ok(())
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

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

        if let Some(end_date) = self.end_date {
            if end_date < self.anchor_date {
                return Err(UseCaseError::InvalidEndDate);
            }
        }
        if let Some(reminder) = &self.reminder {
            validate_reminder(reminder).map_err(UseCaseError::InvalidReminder)?;
        }

        let mut event = Event::new(
            self.organization_id.clone(),
            self.name.clone(),
            self.anchor_date,
        );
        event.description = self.description.clone();
        event.end_date = self.end_date;
        event.start_time = self.start_time;
        event.location = self.location.clone();
        event.frequency = self.frequency;
        event.reminder = self.reminder.clone();

        ctx.repos
            .events
            .insert(&event)
            .await
            .map(|_| event)
            .map_err(|_| UseCaseError::StorageError)
    }
}
