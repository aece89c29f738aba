use super::IRunExecutionRepo;
use crate::repos::shared::inmemory_repo::*;
use forening_domain::RunExecution;

pub struct InMemoryRunExecutionRepo {
    executions: std::sync::Mutex<Vec<RunExecution>>,
}

impl InMemoryRunExecutionRepo {
    pub fn new() -> Self {
        Self {
            executions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRunExecutionRepo for InMemoryRunExecutionRepo {
    async fn insert(&self, execution: &RunExecution) -> anyhow::Result<()> {
        insert(execution, &self.executions);
        Ok(())
    }

    async fn find_latest(&self) -> Option<RunExecution> {
        let executions = self.executions.lock().unwrap();
        executions.iter().max_by_key(|e| e.created).cloned()
    }
}
