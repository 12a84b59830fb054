//! Persona and job-to-be-done input.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::analysis::Keywords;
use crate::error::{Error, Result};

/// Who is reading, and what they are trying to get done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription {
    /// Persona role
    pub persona: String,
    /// Task description; its words are the ranking keywords
    pub task: String,
}

/// On-disk shape: `{"persona": {"role": ..}, "job_to_be_done": {"task": ..}}`.
#[derive(Deserialize)]
struct JobFile {
    persona: Option<PersonaField>,
    job_to_be_done: Option<TaskField>,
}

#[derive(Deserialize)]
struct PersonaField {
    role: Option<String>,
}

#[derive(Deserialize)]
struct TaskField {
    task: Option<String>,
}

impl JobDescription {
    /// Create a job description from literal strings.
    pub fn new(persona: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            task: task.into(),
        }
    }

    /// Read a job description from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Parse a job description from JSON text. Unknown keys are ignored.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let file: JobFile = serde_json::from_str(data)?;

        let persona = file
            .persona
            .and_then(|p| p.role)
            .ok_or_else(|| Error::InvalidJob("missing persona.role".to_string()))?;
        let task = file
            .job_to_be_done
            .and_then(|j| j.task)
            .ok_or_else(|| Error::InvalidJob("missing job_to_be_done.task".to_string()))?;

        Ok(Self { persona, task })
    }

    /// Ranking keywords derived from the task.
    pub fn keywords(&self) -> Keywords {
        Keywords::from_task(&self.task)
    }
}
