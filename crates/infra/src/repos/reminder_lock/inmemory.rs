use super::IReminderLockRepo;
use chrono::NaiveDate;
use forening_domain::{LeadTime, ID};
use std::collections::HashSet;
use std::sync::Mutex;

pub struct InMemoryReminderLockRepo {
    locks: Mutex<HashSet<(ID, NaiveDate, &'static str)>>,
}

impl InMemoryReminderLockRepo {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderLockRepo for InMemoryReminderLockRepo {
    async fn acquire(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> anyhow::Result<bool> {
        let mut locks = self.locks.lock().unwrap();
        Ok(locks.insert((event_id.clone(), occurrence_date, lead.as_str())))
    }

    async fn release(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> anyhow::Result<()> {
        let mut locks = self.locks.lock().unwrap();
        locks.remove(&(event_id.clone(), occurrence_date, lead.as_str()));
        Ok(())
    }
}
