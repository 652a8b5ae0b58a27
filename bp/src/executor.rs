//! Plan execution

use tracing::{debug, warn};

use crate::callable::Arguments;
use crate::error::ExecuteError;
use crate::plan::ConstructionPlan;
use crate::target::Constructible;

impl<T: Constructible> ConstructionPlan<T> {
    /// Produce a new instance by running the plan.
    ///
    /// Plans with errors are refused before the callable is touched. If the
    /// callable or an assignment fails, the partly built instance is dropped.
    pub fn execute(&self) -> Result<T, ExecuteError> {
        let error_count = self.error_count();
        if error_count > 0 {
            warn!(type_name = %self.type_name, error_count, "Refusing to execute plan with errors");
            return Err(ExecuteError::InvalidPlan { error_count });
        }

        debug!(
            type_name = %self.type_name,
            callable = self.callable.name(),
            "ConstructionPlan::execute: calling"
        );
        let mut instance = self.callable.call(&Arguments::new(&self.with_parameters))?;

        for (member, value) in &self.then_set_properties {
            debug!(member = %member.name, "ConstructionPlan::execute: assigning");
            instance.assign(&member.name, value)?;
        }

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use crate::callable::FnCallable;
    use crate::error::ExecuteError;
    use crate::plan::ConstructionPlan;
    use crate::provider::MapValueProvider;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Counter {
        start: i64,
        step: i64,
        label: Option<String>,
    }

    crate::constructible! {
        Counter {
            val start: i64,
            var step: i64 = default,
            var label: Option<String>,
        }
    }

    fn counted_ctor(calls: Arc<AtomicUsize>) -> FnCallable<Counter> {
        FnCallable::<Counter>::constructor("new").param("start").build(move |args| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Counter {
                start: args.required("start")?,
                step: 1,
                label: None,
            })
        })
    }

    #[test]
    fn test_execute_applies_arguments_then_assignments() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MapValueProvider::new()
            .with("start", 10)
            .with("step", 5)
            .with("label", "ten");
        let plan = ConstructionPlan::build(counted_ctor(calls.clone()), &provider).unwrap();

        let counter = plan.execute().unwrap();
        assert_eq!(counter.start, 10);
        assert_eq!(counter.step, 5);
        assert_eq!(counter.label.as_deref(), Some("ten"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_plan_never_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let plan = ConstructionPlan::build(counted_ctor(calls.clone()), &MapValueProvider::new()).unwrap();

        let err = plan.execute().unwrap_err();
        assert!(matches!(err, ExecuteError::InvalidPlan { error_count: 1 }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bad_assignment_value_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MapValueProvider::new().with("start", 1).with("step", "fast");
        let plan = ConstructionPlan::build(counted_ctor(calls), &provider).unwrap();
        assert!(plan.is_executable());

        let err = plan.execute().unwrap_err();
        assert!(matches!(err, ExecuteError::InvalidValue { ref name, .. } if name == "step"));
    }

    #[test]
    fn test_execute_is_repeatable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MapValueProvider::new().with("start", 2);
        let plan = ConstructionPlan::build(counted_ctor(calls.clone()), &provider).unwrap();

        let a = plan.execute().unwrap();
        let b = plan.execute().unwrap();
        assert_eq!(a.start, b.start);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
