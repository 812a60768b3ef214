//! Automation engine: executes an automation's steps against trigger data.
//!
//! Steps run in order. A step whose guards do not hold is recorded as
//! skipped and execution continues. Otherwise its config is rendered
//! against the trigger data and handed to the [`ActionDispatcher`]; a
//! dispatch failure marks the step failed and ends the run. `delay` steps
//! are recorded but never slept on: there is no scheduler behind the engine.

use serde_json::Value;

use ministryhub_domain::automation::{ActionKind, Automation, Step};
use ministryhub_domain::id::RunId;
use ministryhub_domain::placeholder::render_value;
use ministryhub_domain::run::{Run, StepResult, StepStatus};
use ministryhub_domain::time;

use crate::ports::ActionDispatcher;

/// Runs automations through an action dispatcher.
pub struct AutomationEngine<D> {
    dispatcher: D,
}

impl<D: ActionDispatcher> AutomationEngine<D> {
    /// Create a new engine.
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    /// The dispatcher steps are handed to.
    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Execute every step of `automation` and return the finished run.
    ///
    /// The run is not persisted; callers own the activity log.
    #[tracing::instrument(skip(self, automation, trigger_data), fields(automation_id = %automation.id))]
    pub async fn execute(
        &self,
        automation: &Automation,
        trigger_data: Value,
        replay_of: Option<RunId>,
    ) -> Run {
        let mut run = Run::start(
            automation.id,
            automation.name.clone(),
            trigger_data,
            time::now(),
        );
        if let Some(original) = replay_of {
            run = run.replaying(original);
        }

        for step in &automation.steps {
            let result = self.execute_step(step, &run.trigger_data).await;
            let failed = result.status == StepStatus::Failed;
            run.record(result);
            if failed {
                break;
            }
        }

        run.finish(time::now());
        tracing::info!(
            run_id = %run.id,
            status = %run.status,
            steps = run.steps.len(),
            "automation run finished"
        );
        run
    }

    async fn execute_step(&self, step: &Step, trigger_data: &Value) -> StepResult {
        let started_at = time::now();
        let kind = step.action.kind.clone();

        if !step.should_run(trigger_data) {
            tracing::debug!(step_id = %step.id, "step skipped by conditions");
            return StepResult {
                step_id: step.id.clone(),
                action_type: kind,
                status: StepStatus::Skipped,
                started_at,
                finished_at: time::now(),
                output: None,
                error: None,
            };
        }

        let rendered = render_value(&step.action.config_value(), trigger_data);
        let outcome = match kind {
            ActionKind::Delay => Ok(()),
            _ => self.dispatcher.dispatch(kind.clone(), rendered.clone()).await,
        };

        let (status, error) = match outcome {
            Ok(()) => (StepStatus::Completed, None),
            Err(err) => {
                tracing::warn!(step_id = %step.id, error = %err, "step failed");
                (StepStatus::Failed, Some(err.to_string()))
            }
        };

        StepResult {
            step_id: step.id.clone(),
            action_type: kind,
            status,
            started_at,
            finished_at: time::now(),
            output: Some(rendered),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    use ministryhub_domain::automation::{Action, Condition, Operator, Trigger, TriggerKind};
    use ministryhub_domain::run::RunStatus;
    use serde_json::json;

    use crate::ports::DispatchError;

    // ── Spy dispatcher ─────────────────────────────────────────────

    #[derive(Default)]
    struct SpyDispatcher {
        calls: Mutex<Vec<(ActionKind, Value)>>,
        fail_on: Option<ActionKind>,
    }

    impl ActionDispatcher for SpyDispatcher {
        fn dispatch(
            &self,
            kind: ActionKind,
            config: Value,
        ) -> impl Future<Output = Result<(), DispatchError>> + Send {
            let result = if self.fail_on.as_ref() == Some(&kind) {
                Err(DispatchError::Delivery("gateway timeout".to_string()))
            } else {
                Ok(())
            };
            self.calls.lock().unwrap().push((kind, config));
            async { result }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn email(id: &str) -> Step {
        Step::new(
            id,
            Action::new(
                ActionKind::SendEmail,
                json!({"to": "{{donorEmail}}", "subject": "Thanks {{donorName}}", "body": "${{amount}}"}),
            ),
        )
    }

    fn automation(steps: Vec<Step>) -> Automation {
        let mut builder = Automation::builder()
            .name("Welcome")
            .trigger(Trigger::new(TriggerKind::DonationCreated));
        for step in steps {
            builder = builder.step(step);
        }
        builder.build().unwrap()
    }

    fn donation() -> Value {
        json!({"donorEmail": "ann@example.org", "donorName": "Ann", "amount": 50})
    }

    #[tokio::test]
    async fn should_dispatch_rendered_config() {
        let engine = AutomationEngine::new(SpyDispatcher::default());
        let run = engine.execute(&automation(vec![email("thanks")]), donation(), None).await;

        assert_eq!(run.status, RunStatus::Completed);
        assert!(run.is_finished());
        let calls = engine.dispatcher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1,
            json!({"to": "ann@example.org", "subject": "Thanks Ann", "body": "$50"})
        );
        assert_eq!(run.steps[0].output, Some(calls[0].1.clone()));
    }

    #[tokio::test]
    async fn should_skip_guarded_step_and_continue() {
        let guarded = Step::new(
            "sms",
            Action::new(ActionKind::SendSms, json!({"to": "{{donorPhone}}", "message": "hi"})),
        )
        .when(Condition::new("donorPhone", Operator::Exists, Value::Null));

        let engine = AutomationEngine::new(SpyDispatcher::default());
        let run = engine
            .execute(&automation(vec![guarded, email("thanks")]), donation(), None)
            .await;

        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[0].status, StepStatus::Skipped);
        assert!(run.steps[0].output.is_none());
        assert_eq!(run.steps[1].status, StepStatus::Completed);
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(engine.dispatcher.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_stop_after_failed_step() {
        let slack = Step::new(
            "slack",
            Action::new(ActionKind::SendSlack, json!({"channel": "#x", "message": "y"})),
        );
        let engine = AutomationEngine::new(SpyDispatcher {
            fail_on: Some(ActionKind::SendSlack),
            ..SpyDispatcher::default()
        });
        let run = engine
            .execute(&automation(vec![slack, email("thanks")]), donation(), None)
            .await;

        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.steps.len(), 1);
        assert_eq!(
            run.steps[0].error.as_deref(),
            Some("delivery failed: gateway timeout")
        );
    }

    #[tokio::test]
    async fn should_record_delay_without_dispatching() {
        let delay = Step::new(
            "wait",
            Action::new(ActionKind::Delay, json!({"duration": 3, "unit": "days"})),
        );
        let engine = AutomationEngine::new(SpyDispatcher::default());
        let run = engine.execute(&automation(vec![delay]), donation(), None).await;

        assert_eq!(run.steps[0].status, StepStatus::Completed);
        assert!(engine.dispatcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_mark_run_skipped_when_every_step_is_skipped() {
        let guarded = email("thanks").when(Condition::new(
            "amount",
            Operator::GreaterThan,
            json!(1000),
        ));
        let engine = AutomationEngine::new(SpyDispatcher::default());
        let run = engine.execute(&automation(vec![guarded]), donation(), None).await;
        assert_eq!(run.status, RunStatus::Skipped);
    }

    #[tokio::test]
    async fn should_link_replay_to_original_run() {
        let original = RunId::new();
        let engine = AutomationEngine::new(SpyDispatcher::default());
        let run = engine
            .execute(&automation(vec![email("thanks")]), donation(), Some(original))
            .await;
        assert_eq!(run.replay_of, Some(original));
        assert_eq!(run.trigger_data, donation());
    }
}
