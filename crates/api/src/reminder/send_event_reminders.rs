use super::recipients::{resolve_recipients, RecipientError};
use crate::{
    error::ForeningError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use forening_api_structs::run_reminders::APIResponse;
use forening_domain::{
    default_message, render_message, DeliveryStatus, DueOccurrence, ErrorCategory, Event, Member,
    Message, MessageRecipient, MessageStatus, PhoneNumber, ReminderSentLog, RunError,
    RunExecution, RunReport, SmsSettings, ID,
};
use forening_infra::{ForeningContext, OutgoingSms, SmsError};
use tracing::{debug, error, warn};

/// The daily trigger endpoint. Always answers 200 with the aggregated
/// report, even when every event failed; only a broken deployment gets
/// an error status.
pub async fn run_reminders_controller(
    ctx: web::Data<ForeningContext>,
) -> Result<HttpResponse, ForeningError> {
    let usecase = SendEventRemindersUseCase {};
    execute(usecase, &ctx)
        .await
        .map(|outcome| {
            HttpResponse::Ok().json(APIResponse {
                message: "Event reminders processed".into(),
                sent: outcome.report.sent,
                errors: outcome.report.errors,
                processed: outcome.report.processed,
                events_processed: outcome.report.events_with_sends,
                date: outcome.date,
                duration_ms: outcome.duration_ms,
                status: outcome.report.status().as_str().into(),
            })
        })
        .map_err(ForeningError::from)
}

/// Walks every reminder-enabled event across all organizations once:
/// matches due occurrences against today, resolves recipients, sends
/// one personalized SMS per recipient and writes the sent-log marker.
/// One failing event never takes the rest of the run down with it.
#[derive(Debug)]
pub struct SendEventRemindersUseCase {}

#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub date: NaiveDate,
    pub duration_ms: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ForeningError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendEventRemindersUseCase {
    type Response = RunOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendEventReminders";

    async fn execute(&mut self, ctx: &ForeningContext) -> Result<Self::Response, Self::Error> {
        let started = std::time::Instant::now();
        let today = ctx.sys.date_today();

        let events = ctx
            .repos
            .events
            .find_reminder_enabled()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut report = RunReport::new();
        for event in &events {
            process_event(event, today, ctx, &mut report).await;
        }

        let duration_ms = started.elapsed().as_millis() as i64;
        let execution = RunExecution::from_report(
            &report,
            today,
            duration_ms,
            ctx.sys.get_timestamp_millis(),
        );
        if let Err(e) = ctx.repos.run_executions.insert(&execution).await {
            // The run itself happened, a missing log row is not worth a 500
            error!("Could not persist run execution log: {:?}", e);
        }

        Ok(RunOutcome {
            report,
            date: today,
            duration_ms,
        })
    }
}

fn run_error(event: &Event, category: ErrorCategory, message: String, context: String) -> RunError {
    RunError {
        event_id: Some(event.id.clone()),
        category,
        message,
        context,
    }
}

async fn process_event(
    event: &Event,
    today: NaiveDate,
    ctx: &ForeningContext,
    report: &mut RunReport,
) {
    let due = match event.due_occurrence(today) {
        Some(due) => due,
        None => {
            debug!("Event: {} has no reminder due on {}", event.id, today);
            return;
        }
    };

    // Idempotency: an existing sent-log row means this occurrence was
    // already handled by an earlier run
    if ctx
        .repos
        .sent_logs
        .find(&event.id, due.date, due.lead)
        .await
        .is_some()
    {
        debug!(
            "Event: {} already has a reminder sent for occurrence {}",
            event.id, due.date
        );
        return;
    }

    let organization = match ctx.repos.organizations.find(&event.organization_id).await {
        Some(organization) => organization,
        None => {
            report.record_error(run_error(
                event,
                ErrorCategory::Validation,
                "Organization not found".into(),
                format!("organization: {}", event.organization_id),
            ));
            return;
        }
    };
    let sms_settings = match organization.settings.sms {
        Some(settings) => settings,
        None => {
            report.record_error(run_error(
                event,
                ErrorCategory::Validation,
                "No active SMS provider configuration for organization".into(),
                format!("organization: {}", organization.id),
            ));
            return;
        }
    };

    let recipients = match resolve_recipients(event, ctx).await {
        Ok(recipients) => recipients,
        Err(e) => {
            let (category, message) = match e {
                RecipientError::NoValidRecipientIds => (
                    ErrorCategory::Validation,
                    "No valid recipient identifiers".to_string(),
                ),
                RecipientError::NoneResolved => (
                    ErrorCategory::Validation,
                    "No recipients resolved after filtering".to_string(),
                ),
                RecipientError::Storage(e) => (ErrorCategory::Database, e.to_string()),
            };
            report.record_error(run_error(
                event,
                category,
                message,
                format!("occurrence: {}", due.date),
            ));
            return;
        }
    };

    // Single-flight guard against a concurrent run dispatching the same
    // occurrence. The loser backs off and leaves the occurrence to the
    // winner.
    match ctx
        .repos
        .reminder_locks
        .acquire(&event.id, due.date, due.lead)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            debug!(
                "Event: {} occurrence {} is being dispatched by another run",
                event.id, due.date
            );
            return;
        }
        Err(e) => {
            report.record_error(run_error(
                event,
                ErrorCategory::Database,
                e.to_string(),
                format!("occurrence: {}", due.date),
            ));
            return;
        }
    }

    dispatch(event, &due, &sms_settings, recipients, ctx, report).await;

    if let Err(e) = ctx
        .repos
        .reminder_locks
        .release(&event.id, due.date, due.lead)
        .await
    {
        warn!(
            "Could not release dispatch lock for event: {} occurrence {}: {:?}",
            event.id, due.date, e
        );
    }
}

/// Resolution order for the message body: configured template, then
/// literal custom text, then a generated default
async fn resolve_body(event: &Event, ctx: &ForeningContext) -> String {
    let reminder = match &event.reminder {
        Some(reminder) => reminder,
        None => return default_message(event),
    };

    if let Some(template_id) = &reminder.template_id {
        match ctx.repos.templates.find(template_id).await {
            Some(template) if template.organization_id == event.organization_id => {
                return template.body;
            }
            _ => {
                warn!(
                    "Template: {} for event: {} not found, falling back",
                    template_id, event.id
                );
            }
        }
    }
    match &reminder.custom_message {
        Some(custom_message) if !custom_message.trim().is_empty() => custom_message.clone(),
        _ => default_message(event),
    }
}

async fn dispatch(
    event: &Event,
    due: &DueOccurrence,
    sms_settings: &SmsSettings,
    recipients: Vec<Member>,
    ctx: &ForeningContext,
    report: &mut RunReport,
) {
    // Re-check under the lock, a competing run may have finished
    // between our first check and the acquire
    if ctx
        .repos
        .sent_logs
        .find(&event.id, due.date, due.lead)
        .await
        .is_some()
    {
        return;
    }

    let body = resolve_body(event, ctx).await;
    let mut message = Message::new(
        event.organization_id.clone(),
        event.id.clone(),
        due.date,
        body.clone(),
        recipients.len(),
        ctx.sys.get_timestamp_millis(),
    );
    if let Err(e) = ctx.repos.messages.insert(&message).await {
        report.record_error(run_error(
            event,
            ErrorCategory::Database,
            e.to_string(),
            format!("occurrence: {}", due.date),
        ));
        return;
    }

    let mut sent = 0;
    let mut failed = 0;
    for member in &recipients {
        match send_to_recipient(member, event, &body, &message, sms_settings, ctx).await {
            Ok(()) => sent += 1,
            Err((category, error_message)) => {
                failed += 1;
                report.attach_error(run_error(
                    event,
                    category,
                    error_message,
                    format!("member: {}, occurrence: {}", member.id, due.date),
                ));
            }
        }
    }
    report.record_dispatch(sent, failed);

    // The sent-log write happens strictly after every recipient attempt
    // finished, and only when something actually went out. A fully
    // failed occurrence stays unlogged so the next run can retry it.
    if sent > 0 {
        message.status = if failed == 0 {
            MessageStatus::Sent
        } else {
            MessageStatus::PartiallySent
        };
        if let Err(e) = ctx.repos.messages.update_status(&message).await {
            warn!("Could not update message status: {:?}", e);
        }
        let log = ReminderSentLog::new(
            event.id.clone(),
            event.organization_id.clone(),
            due.date,
            due.lead,
            sent,
            ctx.sys.get_timestamp_millis(),
        );
        if let Err(e) = ctx.repos.sent_logs.insert(&log).await {
            report.record_error(run_error(
                event,
                ErrorCategory::Database,
                format!("Could not write sent log: {}", e),
                format!("occurrence: {}", due.date),
            ));
        }
    } else {
        message.status = MessageStatus::Failed;
        if let Err(e) = ctx.repos.messages.update_status(&message).await {
            warn!("Could not update message status: {:?}", e);
        }
    }
}

async fn send_to_recipient(
    member: &Member,
    event: &Event,
    body: &str,
    message: &Message,
    sms_settings: &SmsSettings,
    ctx: &ForeningContext,
) -> Result<(), (ErrorCategory, String)> {
    let raw_phone = match &member.phone {
        Some(phone) => phone,
        None => {
            return Err((
                ErrorCategory::Validation,
                format!("Member: {} has no phone number", member.id),
            ));
        }
    };

    let phone = match PhoneNumber::parse(raw_phone, &sms_settings.country_code) {
        Ok(phone) => phone,
        Err(e) => {
            // Counted as failed without ever reaching the provider
            let mut row = MessageRecipient::new(
                message.id.clone(),
                member.id.clone(),
                raw_phone.clone(),
                String::new(),
            );
            row.status = DeliveryStatus::Failed;
            row.error = Some(e.to_string());
            if let Err(e) = ctx.repos.messages.insert_recipient(&row).await {
                warn!("Could not persist failed recipient row: {:?}", e);
            }
            return Err((ErrorCategory::Validation, e.to_string()));
        }
    };

    let text = render_message(body, event, &member.first_name, &member.last_name);
    let mut row = MessageRecipient::new(
        message.id.clone(),
        member.id.clone(),
        phone.as_str().to_string(),
        text.clone(),
    );
    if let Err(e) = ctx.repos.messages.insert_recipient(&row).await {
        return Err((ErrorCategory::Database, e.to_string()));
    }

    let sms = OutgoingSms {
        to: phone.as_str().to_string(),
        body: text,
        reference: ID::new().as_string(),
    };
    match ctx.sms.send(sms_settings, &sms).await {
        Ok(()) => {
            row.status = DeliveryStatus::Sent;
            if let Err(e) = ctx.repos.messages.update_recipient_status(&row).await {
                warn!("Could not persist recipient status: {:?}", e);
            }
            Ok(())
        }
        Err(e) => {
            row.status = DeliveryStatus::Failed;
            row.error = Some(e.to_string());
            if let Err(e) = ctx.repos.messages.update_recipient_status(&row).await {
                warn!("Could not persist recipient status: {:?}", e);
            }
            let category = match e {
                SmsError::Network(_) | SmsError::Timeout => ErrorCategory::Network,
                SmsError::Rejected(_) => ErrorCategory::Api,
            };
            Err((category, e.to_string()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use forening_domain::{
        EventReminder, LeadTime, MessageTemplate, Organization, RecipientSelector,
        RecurrenceFrequency, RunStatus,
    };
    use forening_infra::{ISys, StubSmsGateway};
    use std::sync::Arc;

    struct StaticSys {
        today: NaiveDate,
    }
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.today.and_hms(8, 0, 0).timestamp_millis()
        }
        fn date_today(&self) -> NaiveDate {
            self.today
        }
    }

    struct TestContext {
        ctx: ForeningContext,
        organization: Organization,
        sms: Arc<StubSmsGateway>,
    }

    /// Inmemory context frozen at `today`, with one organization that
    /// has a working SMS setup
    async fn setup(today: NaiveDate) -> TestContext {
        let mut ctx = ForeningContext::create_inmemory();
        ctx.sys = Arc::new(StaticSys { today });
        let sms = Arc::new(StubSmsGateway::new());
        ctx.sms = sms.clone();

        let mut organization = Organization::new("Korpset".into());
        organization.settings.sms = Some(
            SmsSettings::new(
                "Korpset".into(),
                "secret".into(),
                "https://sms.example.com/send".into(),
                "+47".into(),
            )
            .unwrap(),
        );
        ctx.repos.organizations.insert(&organization).await.unwrap();

        TestContext {
            ctx,
            organization,
            sms,
        }
    }

    async fn insert_member(
        ctx: &ForeningContext,
        organization: &Organization,
        first_name: &str,
        phone: &str,
    ) -> Member {
        let mut member = Member::new(
            organization.id.clone(),
            first_name.into(),
            "Nordmann".into(),
        );
        member.phone = Some(phone.into());
        ctx.repos.members.insert(&member).await.unwrap();
        member
    }

    /// Weekly event anchored on Monday 2025-06-02 with a day-before
    /// reminder to every member
    async fn insert_weekly_event(ctx: &ForeningContext, organization: &Organization) -> Event {
        let mut event = Event::new(
            organization.id.clone(),
            "Korpsøvelse".into(),
            NaiveDate::from_ymd(2025, 6, 2),
        );
        event.frequency = Some(RecurrenceFrequency::Weekly);
        event.reminder = Some(EventReminder {
            lead: LeadTime::DayBefore,
            recipients: RecipientSelector::AllMembers,
            template_id: None,
            custom_message: None,
        });
        ctx.repos.events.insert(&event).await.unwrap();
        event
    }

    async fn run(ctx: &ForeningContext) -> RunOutcome {
        let mut usecase = SendEventRemindersUseCase {};
        usecase.execute(ctx).await.unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn sends_weekly_reminder_the_day_before_and_only_once() {
        // Sunday before the Monday occurrence
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let monday = NaiveDate::from_ymd(2025, 6, 9);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        insert_member(&ctx, &organization, "Ola", "41234568").await;
        let event = insert_weekly_event(&ctx, &organization).await;

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 2);
        assert_eq!(outcome.report.errors, 0);
        assert_eq!(outcome.report.processed, 2);
        assert_eq!(outcome.report.events_with_sends, 1);
        assert_eq!(outcome.report.status(), RunStatus::Completed);
        assert_eq!(sms.sent_count(), 2);

        let messages = ctx.repos.messages.find_by_event(&event.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].recipient_count, 2);
        assert_eq!(messages[0].status, MessageStatus::Sent);
        assert_eq!(messages[0].occurrence_date, monday);

        let rows = ctx
            .repos
            .messages
            .find_recipients_by_message(&messages[0].id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == DeliveryStatus::Sent));

        assert!(ctx
            .repos
            .sent_logs
            .find(&event.id, monday, LeadTime::DayBefore)
            .await
            .is_some());

        // Second run on the same day is a no-op
        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 0);
        assert_eq!(outcome.report.processed, 0);
        assert_eq!(sms.sent_count(), 2);
        let messages = ctx.repos.messages.find_by_event(&event.id).await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn nothing_is_due_on_the_wrong_day() {
        // The occurrence day itself, but the policy is day-before
        let monday = NaiveDate::from_ymd(2025, 6, 9);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(monday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        insert_weekly_event(&ctx, &organization).await;

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 0);
        assert_eq!(outcome.report.errors, 0);
        assert_eq!(sms.sent_count(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn partial_failure_still_writes_the_sent_log() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let monday = NaiveDate::from_ymd(2025, 6, 9);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        insert_member(&ctx, &organization, "Ola", "41234568").await;
        insert_member(&ctx, &organization, "Per", "41234569").await;
        sms.reject_number("+4741234569");
        let event = insert_weekly_event(&ctx, &organization).await;

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 2);
        assert_eq!(outcome.report.errors, 1);
        assert_eq!(outcome.report.processed, 3);
        assert_eq!(outcome.report.status(), RunStatus::CompletedWithErrors);
        assert_eq!(outcome.report.error_sample().len(), 1);
        assert_eq!(outcome.report.error_sample()[0].category, ErrorCategory::Api);

        let messages = ctx.repos.messages.find_by_event(&event.id).await.unwrap();
        assert_eq!(messages[0].status, MessageStatus::PartiallySent);

        // At least one send succeeded, so the occurrence is marked done
        assert!(ctx
            .repos
            .sent_logs
            .find(&event.id, monday, LeadTime::DayBefore)
            .await
            .is_some());
    }

    #[actix_web::main]
    #[test]
    async fn total_failure_leaves_the_occurrence_retryable() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let monday = NaiveDate::from_ymd(2025, 6, 9);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        sms.reject_number("+4741234567");
        let event = insert_weekly_event(&ctx, &organization).await;

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 0);
        assert_eq!(outcome.report.errors, 1);
        assert_eq!(outcome.report.events_with_sends, 0);

        let messages = ctx.repos.messages.find_by_event(&event.id).await.unwrap();
        assert_eq!(messages[0].status, MessageStatus::Failed);
        assert!(ctx
            .repos
            .sent_logs
            .find(&event.id, monday, LeadTime::DayBefore)
            .await
            .is_none());

        // Provider recovered: the same occurrence goes out on a rerun
        sms.reject_numbers.lock().unwrap().clear();
        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 1);
        assert!(ctx
            .repos
            .sent_logs
            .find(&event.id, monday, LeadTime::DayBefore)
            .await
            .is_some());
    }

    #[actix_web::main]
    #[test]
    async fn invalid_phone_number_fails_without_a_send_attempt() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        insert_member(&ctx, &organization, "Ola", "ring meg").await;
        let event = insert_weekly_event(&ctx, &organization).await;

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 1);
        assert_eq!(outcome.report.errors, 1);
        // Only the valid number reached the provider
        assert_eq!(sms.sent_count(), 1);

        let messages = ctx.repos.messages.find_by_event(&event.id).await.unwrap();
        let rows = ctx
            .repos
            .messages
            .find_recipients_by_message(&messages[0].id)
            .await
            .unwrap();
        let failed = rows
            .iter()
            .filter(|r| r.status == DeliveryStatus::Failed)
            .collect::<Vec<_>>();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].error.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn missing_sms_configuration_is_reported_and_skipped() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let TestContext {
            ctx,
            organization: _,
            sms,
        } = setup(sunday).await;

        // A second organization without SMS settings
        let bare_organization = Organization::new("Teaterlaget".into());
        ctx.repos
            .organizations
            .insert(&bare_organization)
            .await
            .unwrap();
        insert_member(&ctx, &bare_organization, "Kari", "41234567").await;
        insert_weekly_event(&ctx, &bare_organization).await;

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 0);
        assert_eq!(outcome.report.errors, 1);
        assert_eq!(
            outcome.report.error_sample()[0].category,
            ErrorCategory::Validation
        );
        assert_eq!(sms.sent_count(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn malformed_recipient_ids_are_dropped_not_fatal() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        let kari = insert_member(&ctx, &organization, "Kari", "41234567").await;

        let mut event = Event::new(
            organization.id.clone(),
            "Styremøte".into(),
            NaiveDate::from_ymd(2025, 6, 9),
        );
        event.reminder = Some(EventReminder {
            lead: LeadTime::DayBefore,
            recipients: RecipientSelector::SelectedMembers(vec![
                "not-a-uuid".into(),
                kari.id.as_string(),
            ]),
            template_id: None,
            custom_message: None,
        });
        ctx.repos.events.insert(&event).await.unwrap();

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 1);
        assert_eq!(outcome.report.errors, 0);
        assert_eq!(sms.sent_count(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn template_body_is_personalized_per_recipient() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        insert_member(&ctx, &organization, "Ola", "41234568").await;

        let template = MessageTemplate::new(
            organization.id.clone(),
            "Standard".into(),
            "Hei {FirstName}! Husk {EventName} i morgen.".into(),
        );
        ctx.repos.templates.insert(&template).await.unwrap();

        let mut event = insert_weekly_event(&ctx, &organization).await;
        event.reminder.as_mut().unwrap().template_id = Some(template.id.clone());
        ctx.repos.events.save(&event).await.unwrap();

        run(&ctx).await;

        let bodies = sms
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.body.clone())
            .collect::<Vec<_>>();
        assert_eq!(bodies.len(), 2);
        assert!(bodies
            .iter()
            .any(|b| b == "Hei Kari! Husk Korpsøvelse i morgen."));
        assert!(bodies
            .iter()
            .any(|b| b == "Hei Ola! Husk Korpsøvelse i morgen."));
    }

    #[actix_web::main]
    #[test]
    async fn occurrence_locked_by_another_run_is_skipped() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let monday = NaiveDate::from_ymd(2025, 6, 9);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        let event = insert_weekly_event(&ctx, &organization).await;

        // Simulate a concurrent run holding the dispatch lock
        assert!(ctx
            .repos
            .reminder_locks
            .acquire(&event.id, monday, LeadTime::DayBefore)
            .await
            .unwrap());

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 0);
        assert_eq!(sms.sent_count(), 0);
        assert!(ctx
            .repos
            .sent_logs
            .find(&event.id, monday, LeadTime::DayBefore)
            .await
            .is_none());

        // Lock released (the other run died): dispatch goes through
        ctx.repos
            .reminder_locks
            .release(&event.id, monday, LeadTime::DayBefore)
            .await
            .unwrap();
        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 1);
    }

    #[actix_web::main]
    #[test]
    async fn one_off_event_with_day_of_policy() {
        let day = NaiveDate::from_ymd(2025, 12, 12);
        let TestContext {
            ctx,
            organization,
            sms,
        } = setup(day).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;

        let mut event = Event::new(organization.id.clone(), "Julebord".into(), day);
        event.reminder = Some(EventReminder {
            lead: LeadTime::DayOf,
            recipients: RecipientSelector::AllMembers,
            template_id: None,
            custom_message: Some("Velkommen til julebord i kveld!".into()),
        });
        ctx.repos.events.insert(&event).await.unwrap();

        let outcome = run(&ctx).await;
        assert_eq!(outcome.report.sent, 1);
        let sent = sms.sent.lock().unwrap();
        assert_eq!(sent[0].body, "Velkommen til julebord i kveld!");
    }

    #[actix_web::main]
    #[test]
    async fn run_execution_log_is_written() {
        let sunday = NaiveDate::from_ymd(2025, 6, 8);
        let TestContext {
            ctx,
            organization,
            sms: _,
        } = setup(sunday).await;
        insert_member(&ctx, &organization, "Kari", "41234567").await;
        insert_weekly_event(&ctx, &organization).await;

        run(&ctx).await;

        let execution = ctx.repos.run_executions.find_latest().await.unwrap();
        assert_eq!(execution.run_date, sunday);
        assert_eq!(execution.sent, 1);
        assert_eq!(execution.status, RunStatus::Completed);
    }
}
