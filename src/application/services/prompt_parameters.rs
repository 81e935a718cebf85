use serde::Deserialize;

use crate::domain::TaskKind;

/// Character budget and sampling settings for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskParameters {
    /// Maximum number of document characters embedded into one prompt. For
    /// `summary` this is also the chunk size.
    pub budget_chars: usize,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl TaskParameters {
    pub const fn new(budget_chars: usize, temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            budget_chars,
            temperature,
            max_tokens,
        }
    }
}

/// Named parameter sets. `Basic` keeps small budgets with no output limit;
/// `Extended` raises the budgets and caps every answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPreset {
    Basic,
    #[default]
    Extended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptParameters {
    pub qa: TaskParameters,
    pub summary: TaskParameters,
    pub eli5: TaskParameters,
    pub medications: TaskParameters,
    pub recommendations: TaskParameters,
    pub include_system_preamble: bool,
}

pub const SUMMARY_CHUNK_CHARS: usize = 3000;

impl PromptParameters {
    pub fn preset(preset: PromptPreset) -> Self {
        match preset {
            PromptPreset::Basic => Self {
                qa: TaskParameters::new(3000, 0.3, None),
                summary: TaskParameters::new(SUMMARY_CHUNK_CHARS, 0.3, None),
                eli5: TaskParameters::new(1500, 0.7, None),
                medications: TaskParameters::new(2000, 0.1, None),
                recommendations: TaskParameters::new(2000, 0.7, None),
                include_system_preamble: false,
            },
            PromptPreset::Extended => Self {
                qa: TaskParameters::new(5000, 0.3, Some(800)),
                summary: TaskParameters::new(SUMMARY_CHUNK_CHARS, 0.3, Some(600)),
                eli5: TaskParameters::new(4000, 0.7, Some(500)),
                medications: TaskParameters::new(5000, 0.1, Some(700)),
                recommendations: TaskParameters::new(5000, 0.4, Some(900)),
                include_system_preamble: true,
            },
        }
    }

    pub fn for_task(&self, task: TaskKind) -> TaskParameters {
        match task {
            TaskKind::Qa => self.qa,
            TaskKind::Summary => self.summary,
            TaskKind::Eli5 => self.eli5,
            TaskKind::Medications => self.medications,
            TaskKind::Recommendations => self.recommendations,
        }
    }

    pub fn with_task(mut self, task: TaskKind, params: TaskParameters) -> Self {
        let slot = match task {
            TaskKind::Qa => &mut self.qa,
            TaskKind::Summary => &mut self.summary,
            TaskKind::Eli5 => &mut self.eli5,
            TaskKind::Medications => &mut self.medications,
            TaskKind::Recommendations => &mut self.recommendations,
        };
        *slot = params;
        self
    }
}

impl Default for PromptParameters {
    fn default() -> Self {
        Self::preset(PromptPreset::default())
    }
}
