use super::IReminderSentLogRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
use forening_domain::{LeadTime, ReminderSentLog, ID};
use std::sync::Mutex;

pub struct InMemoryReminderSentLogRepo {
    logs: Mutex<Vec<ReminderSentLog>>,
}

impl InMemoryReminderSentLogRepo {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderSentLogRepo for InMemoryReminderSentLogRepo {
    async fn insert(&self, log: &ReminderSentLog) -> anyhow::Result<()> {
        let mut logs = self.logs.lock().unwrap();
        let duplicate = logs.iter().any(|l| {
            l.event_id == log.event_id
                && l.occurrence_date == log.occurrence_date
                && l.lead == log.lead
        });
        if duplicate {
            return Err(anyhow::anyhow!(
                "Sent log already exists for event: {} on {}",
                log.event_id,
                log.occurrence_date
            ));
        }
        logs.push(log.clone());
        Ok(())
    }

    async fn find(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> Option<ReminderSentLog> {
        let logs = self.logs.lock().unwrap();
        logs.iter()
            .find(|l| {
                l.event_id == *event_id && l.occurrence_date == occurrence_date && l.lead == lead
            })
            .cloned()
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        let mut logs = self.logs.lock().unwrap();
        let before = logs.len();
        logs.retain(|l| l.event_id != *event_id);
        Ok(DeleteResult {
            deleted_count: (before - logs.len()) as i64,
        })
    }
}
