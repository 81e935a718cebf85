use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The closed set of document tasks a session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Qa,
    Summary,
    Eli5,
    Medications,
    Recommendations,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Qa,
        TaskKind::Summary,
        TaskKind::Eli5,
        TaskKind::Medications,
        TaskKind::Recommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Qa => "qa",
            TaskKind::Summary => "summary",
            TaskKind::Eli5 => "eli5",
            TaskKind::Medications => "medications",
            TaskKind::Recommendations => "recommendations",
        }
    }

    /// `qa` needs a question and `eli5` needs the term to explain.
    pub fn requires_query(&self) -> bool {
        matches!(self, TaskKind::Qa | TaskKind::Eli5)
    }

    pub fn is_chunked(&self) -> bool {
        matches!(self, TaskKind::Summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task: {0}. Expected one of: qa, summary, eli5, medications, recommendations")]
pub struct ParseTaskError(pub String);

impl FromStr for TaskKind {
    type Err = ParseTaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qa" => Ok(TaskKind::Qa),
            "summary" => Ok(TaskKind::Summary),
            "eli5" => Ok(TaskKind::Eli5),
            "medications" => Ok(TaskKind::Medications),
            "recommendations" => Ok(TaskKind::Recommendations),
            other => Err(ParseTaskError(other.to_string())),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
