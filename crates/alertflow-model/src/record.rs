use serde::{Deserialize, Serialize};

/// Review priority of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Team that owns a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    #[default]
    Ops,
    Tech,
    Dm,
}

impl Owner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ops => "ops",
            Self::Tech => "tech",
            Self::Dm => "dm",
        }
    }
}

/// A single compliance/fraud/sanctions alert workflow record.
///
/// Records are immutable inputs to the aggregation core. Hierarchy fields
/// may be blank; grouping substitutes a placeholder label for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    #[serde(default)]
    pub director_project: String,
    #[serde(default)]
    pub director_feedname: String,
    /// Upstream feed name. Carried along but not a hierarchy level.
    #[serde(default)]
    pub scm_feedname: String,
    #[serde(default)]
    pub match_process: String,
    #[serde(default)]
    pub scm_source: String,
    #[serde(default)]
    pub workflow: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_count: Option<u64>,
}

impl WorkflowRecord {
    /// Build a record from its six hierarchy values and an alert count.
    pub fn new(
        project: &str,
        feed: &str,
        source: &str,
        match_process: &str,
        workflow: &str,
        state: &str,
        alert_count: Option<u64>,
    ) -> Self {
        Self {
            director_project: project.to_string(),
            director_feedname: feed.to_string(),
            scm_source: source.to_string(),
            match_process: match_process.to_string(),
            workflow: workflow.to_string(),
            state: state.to_string(),
            alert_count,
            ..Default::default()
        }
    }

    /// Amount this record adds to every aggregate it passes through.
    /// Absent or zero counts contribute 1.
    pub fn contribution(&self) -> u64 {
        match self.alert_count {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_fallbacks() {
        let mut r = WorkflowRecord::new("A", "F", "S", "M", "W", "Done", Some(10));
        assert_eq!(r.contribution(), 10);
        r.alert_count = Some(0);
        assert_eq!(r.contribution(), 1);
        r.alert_count = None;
        assert_eq!(r.contribution(), 1);
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{"directorProject":"Fraud","directorFeedname":"Tx","workflow":"Auto","state":"Blocked","alertCount":5}"#;
        let r: WorkflowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.director_project, "Fraud");
        assert_eq!(r.scm_source, "");
        assert_eq!(r.priority, Priority::Medium);
        assert_eq!(r.owner, Owner::Ops);
        assert_eq!(r.alert_count, Some(5));
    }
}
