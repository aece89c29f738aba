use forening_domain::{Event, Member, RecipientSelector};
use forening_infra::ForeningContext;
use itertools::Itertools;
use tracing::warn;

/// Why an event resolved to nobody. None of these abort a run, each is
/// reported against the event and the run moves on.
#[derive(Debug)]
pub enum RecipientError {
    /// The selector names groups or members but every id was malformed
    NoValidRecipientIds,
    /// Resolution ran but nobody with a phone number matched
    NoneResolved,
    Storage(anyhow::Error),
}

/// Expands the event's recipient selector into concrete members,
/// scoped to the event's organization. Malformed ids are dropped, not
/// fatal; members without a phone number are filtered out here since
/// they can never be contacted.
pub async fn resolve_recipients(
    event: &Event,
    ctx: &ForeningContext,
) -> Result<Vec<Member>, RecipientError> {
    let reminder = match &event.reminder {
        Some(reminder) => reminder,
        None => return Err(RecipientError::NoneResolved),
    };

    let members = match &reminder.recipients {
        RecipientSelector::AllMembers => ctx
            .repos
            .members
            .find_by_org(&event.organization_id)
            .await
            .map_err(RecipientError::Storage)?,
        RecipientSelector::Groups(raw_ids) => {
            let group_ids = reminder.recipients.valid_ids();
            if group_ids.is_empty() {
                warn!(
                    "Event: {} has no well-formed group ids among: {:?}",
                    event.id, raw_ids
                );
                return Err(RecipientError::NoValidRecipientIds);
            }
            let groups = ctx
                .repos
                .groups
                .find_by_ids(&event.organization_id, &group_ids)
                .await
                .map_err(RecipientError::Storage)?;
            let group_names = groups.into_iter().map(|g| g.name).collect::<Vec<_>>();
            if group_names.is_empty() {
                return Err(RecipientError::NoneResolved);
            }
            ctx.repos
                .members
                .find_by_group_names(&event.organization_id, &group_names)
                .await
                .map_err(RecipientError::Storage)?
        }
        RecipientSelector::SelectedMembers(raw_ids) => {
            let member_ids = reminder.recipients.valid_ids();
            if member_ids.is_empty() {
                warn!(
                    "Event: {} has no well-formed member ids among: {:?}",
                    event.id, raw_ids
                );
                return Err(RecipientError::NoValidRecipientIds);
            }
            ctx.repos
                .members
                .find_by_ids(&event.organization_id, &member_ids)
                .await
                .map_err(RecipientError::Storage)?
        }
    };

    let recipients = members
        .into_iter()
        .filter(|member| member.phone.is_some())
        .unique_by(|member| member.id.clone())
        .collect::<Vec<_>>();

    if recipients.is_empty() {
        return Err(RecipientError::NoneResolved);
    }
    Ok(recipients)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use forening_domain::{EventReminder, LeadTime, MemberGroup, Organization};

    struct TestContext {
        ctx: ForeningContext,
        organization: Organization,
    }

    async fn setup() -> TestContext {
        let ctx = ForeningContext::create_inmemory();
        let organization = Organization::new("Korpset".into());
        ctx.repos.organizations.insert(&organization).await.unwrap();
        TestContext { ctx, organization }
    }

    async fn insert_member(
        ctx: &ForeningContext,
        organization: &Organization,
        first_name: &str,
        phone: Option<&str>,
        groups: Vec<String>,
    ) -> Member {
        let mut member = Member::new(
            organization.id.clone(),
            first_name.into(),
            "Nordmann".into(),
        );
        member.phone = phone.map(|p| p.to_string());
        member.groups = groups;
        ctx.repos.members.insert(&member).await.unwrap();
        member
    }

    fn event_with_selector(organization: &Organization, selector: RecipientSelector) -> Event {
        let mut event = Event::new(
            organization.id.clone(),
            "Sommerfest".into(),
            NaiveDate::from_ymd(2025, 6, 14),
        );
        event.reminder = Some(EventReminder {
            lead: LeadTime::DayBefore,
            recipients: selector,
            template_id: None,
            custom_message: None,
        });
        event
    }

    #[actix_web::main]
    #[test]
    async fn all_members_includes_only_members_with_phone() {
        let TestContext { ctx, organization } = setup().await;
        insert_member(&ctx, &organization, "Kari", Some("41234567"), vec![]).await;
        insert_member(&ctx, &organization, "Ola", None, vec![]).await;

        let event = event_with_selector(&organization, RecipientSelector::AllMembers);
        let recipients = resolve_recipients(&event, &ctx).await.unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].first_name, "Kari");
    }

    #[actix_web::main]
    #[test]
    async fn selected_members_drops_malformed_ids() {
        let TestContext { ctx, organization } = setup().await;
        let kari =
            insert_member(&ctx, &organization, "Kari", Some("41234567"), vec![]).await;

        let event = event_with_selector(
            &organization,
            RecipientSelector::SelectedMembers(vec![
                "not-a-uuid".into(),
                kari.id.as_string(),
            ]),
        );
        let recipients = resolve_recipients(&event, &ctx).await.unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].first_name, "Kari");
    }

    #[actix_web::main]
    #[test]
    async fn fails_when_no_id_is_well_formed() {
        let TestContext { ctx, organization } = setup().await;
        insert_member(&ctx, &organization, "Kari", Some("41234567"), vec![]).await;

        let event = event_with_selector(
            &organization,
            RecipientSelector::SelectedMembers(vec!["not-a-uuid".into(), "1234".into()]),
        );
        assert!(matches!(
            resolve_recipients(&event, &ctx).await,
            Err(RecipientError::NoValidRecipientIds)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn groups_resolve_through_group_names() {
        let TestContext { ctx, organization } = setup().await;
        let group = MemberGroup::new(organization.id.clone(), "Styret".into());
        ctx.repos.groups.insert(&group).await.unwrap();

        insert_member(
            &ctx,
            &organization,
            "Kari",
            Some("41234567"),
            vec!["Styret".into()],
        )
        .await;
        insert_member(
            &ctx,
            &organization,
            "Ola",
            Some("41234568"),
            vec!["Kor".into()],
        )
        .await;

        let event = event_with_selector(
            &organization,
            RecipientSelector::Groups(vec![group.id.as_string()]),
        );
        let recipients = resolve_recipients(&event, &ctx).await.unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].first_name, "Kari");
    }

    #[actix_web::main]
    #[test]
    async fn fails_when_nobody_matches() {
        let TestContext { ctx, organization } = setup().await;
        insert_member(&ctx, &organization, "Kari", None, vec![]).await;

        let event = event_with_selector(&organization, RecipientSelector::AllMembers);
        assert!(matches!(
            resolve_recipients(&event, &ctx).await,
            Err(RecipientError::NoneResolved)
        ));
    }
}
