//! Audit view of a plan

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::callable::CallableKind;
use crate::error::ConstructionError;
use crate::plan::ConstructionPlan;

/// One error attributed to a parameter or member name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDiagnostic {
    pub name: String,
    pub error: ConstructionError,
}

/// Serializable summary of every decision in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub type_name: String,
    pub callable: String,
    pub kind: CallableKind,
    pub error_count: usize,
    pub warning_count: usize,
    /// Parameters supplied to the callable; the receiver shows as `<receiver>`
    pub arguments: Vec<String>,
    pub defaulted: Vec<String>,
    pub assignments: Vec<String>,
    pub errors: Vec<PlanDiagnostic>,
    pub unset: Vec<String>,
    /// Unset members whose declaration carries a default
    pub unset_with_default: Vec<String>,
    pub unused: Vec<String>,
}

impl<T> ConstructionPlan<T> {
    pub fn summary(&self) -> PlanSummary {
        let errors = self
            .parameter_errors()
            .iter()
            .map(|(slot, error)| PlanDiagnostic {
                name: slot.name.clone(),
                error: *error,
            })
            .chain(self.property_errors().iter().map(|(slot, error)| PlanDiagnostic {
                name: slot.name.clone(),
                error: *error,
            }))
            .collect();

        PlanSummary {
            type_name: self.type_name().to_string(),
            callable: self.callable_name().to_string(),
            kind: self.callable_kind(),
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            arguments: self.with_parameters().iter().map(|(s, _)| s.name.clone()).collect(),
            defaulted: self.defaulted_parameters().iter().map(|s| s.name.clone()).collect(),
            assignments: self.then_set_properties().iter().map(|(s, _)| s.name.clone()).collect(),
            errors,
            unset: self.unset_properties().iter().map(|s| s.name.clone()).collect(),
            unset_with_default: self
                .unset_properties()
                .iter()
                .filter(|s| s.has_default)
                .map(|s| s.name.clone())
                .collect(),
            unused: self.nonmatching_provider_entries().iter().cloned().collect(),
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} via {} ({}): {} error(s), {} warning(s)",
            self.type_name, self.callable, self.kind, self.error_count, self.warning_count
        )?;
        writeln!(f, "  arguments: {}", list(&self.arguments))?;
        writeln!(f, "  defaulted: {}", list(&self.defaulted))?;
        writeln!(f, "  assign:    {}", list(&self.assignments))?;
        for diag in &self.errors {
            writeln!(f, "  error:     {} {}", diag.name, diag.error)?;
        }
        let unset: Vec<String> = self
            .unset
            .iter()
            .map(|name| {
                if self.unset_with_default.contains(name) {
                    format!("{} (default)", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        writeln!(f, "  unset:     {}", list(&unset))?;
        write!(f, "  unused:    {}", list(&self.unused))
    }
}

fn list(names: &[String]) -> String {
    if names.is_empty() { "-".to_string() } else { names.join(", ") }
}

#[cfg(test)]
mod tests {
    use crate::callable::{CallableKind, FnCallable};
    use crate::error::ConstructionError;
    use crate::plan::ConstructionPlan;
    use crate::provider::MapValueProvider;

    #[derive(Debug, Default)]
    struct Note {
        title: String,
        body: String,
        pinned: bool,
    }

    crate::constructible! {
        Note {
            val title: String,
            val body: String = default,
            var pinned: bool,
        }
    }

    #[test]
    fn test_summary_lists_decisions() {
        let ctor = FnCallable::<Note>::constructor("new")
            .param("title")
            .param_with_default("body")
            .build(|args| {
                Ok(Note {
                    title: args.required("title")?,
                    body: args.optional_or("body", String::new())?,
                    pinned: false,
                })
            });
        let provider = MapValueProvider::new().with("title", "t").with("color", "red");
        let summary = ConstructionPlan::build(ctor, &provider).unwrap().summary();

        assert_eq!(summary.type_name, "Note");
        assert_eq!(summary.kind, CallableKind::PrimaryConstructor);
        assert_eq!(summary.arguments, vec!["title"]);
        assert_eq!(summary.defaulted, vec!["body"]);
        assert!(summary.assignments.is_empty());
        assert_eq!(summary.unset, vec!["pinned"]);
        assert_eq!(summary.unused, vec!["color"]);
        assert_eq!(summary.warning_count, 1);

        let text = summary.to_string();
        assert!(text.contains("Note via new"));
        assert!(text.contains("unused:    color"));
    }

    #[derive(Debug, Default)]
    struct Draft {
        title: String,
        tags: Vec<String>,
        pinned: bool,
    }

    crate::constructible! {
        Draft {
            var title: String,
            var tags: Vec<String> = default,
            var pinned: bool,
        }
    }

    #[test]
    fn test_summary_marks_unset_defaults() {
        let ctor = FnCallable::<Draft>::constructor("new").build(|_| Ok(Draft::default()));
        let provider = MapValueProvider::new().with("title", "t");
        let summary = ConstructionPlan::build(ctor, &provider).unwrap().summary();

        assert_eq!(summary.unset, vec!["tags", "pinned"]);
        assert_eq!(summary.unset_with_default, vec!["tags"]);
        assert!(summary.to_string().contains("unset:     tags (default), pinned"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["unset_with_default"][0], "tags");
    }

    #[test]
    fn test_summary_errors_serialize() {
        let ctor = FnCallable::<Note>::constructor("blank").build(|_| Ok(Note::default()));
        let provider = MapValueProvider::new().with("title", "t").with("pinned", true);
        let summary = ConstructionPlan::build(ctor, &provider).unwrap().summary();

        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.errors[0].name, "title");
        assert_eq!(summary.errors[0].error, ConstructionError::NonSettableProperty);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["errors"][0]["error"], "NON_SETTABLE_PROPERTY");
        assert_eq!(json["kind"], "primary_constructor");
    }
}
