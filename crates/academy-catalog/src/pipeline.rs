//! Sample CI/CD pipeline status shown on the landing view

use serde::{Deserialize, Serialize};

/// Pipeline step status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Not started
    Pending,
    /// Running now
    Active,
    /// Finished green
    Success,
    /// Finished red
    Error,
}

impl StepStatus {
    /// Terminal marker
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Pending => "○",
            Self::Active => "●",
            Self::Success => "✔",
            Self::Error => "✖",
        }
    }
}

/// One pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStep {
    /// Stage name
    pub name: String,
    /// Current status
    pub status: StepStatus,
    /// What the stage does
    pub description: String,
}

/// A pipeline run pinned to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Short commit hash
    pub commit: String,
    /// Stages in order
    pub steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// The stage currently running, if any
    #[must_use]
    pub fn active_step(&self) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.status == StepStatus::Active)
    }

    /// Render one line per stage
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("Pipeline Status  [{}]\n", self.commit);
        for step in &self.steps {
            out.push_str(&format!(
                "  {} {:<10} {}\n",
                step.status.marker(),
                step.name,
                step.description
            ));
        }
        out
    }
}

/// The fixed demo pipeline
#[must_use]
pub fn sample_pipeline() -> Pipeline {
    let step = |name: &str, status, description: &str| PipelineStep {
        name: name.to_string(),
        status,
        description: description.to_string(),
    };

    Pipeline {
        commit: "03f92a1".to_string(),
        steps: vec![
            step("Build", StepStatus::Success, "Compiling assets"),
            step("Test", StepStatus::Success, "Unit & integration tests"),
            step("Staging", StepStatus::Active, "Deployment to pre-prod"),
            step("Security", StepStatus::Pending, "Vulnerability scan"),
            step("Deploy", StepStatus::Pending, "Production rollout"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_pipeline_is_staging() {
        let pipeline = sample_pipeline();
        assert_eq!(pipeline.steps.len(), 5);
        assert_eq!(pipeline.active_step().map(|s| s.name.as_str()), Some("Staging"));
    }

    #[test]
    fn render_lists_every_step() {
        let text = sample_pipeline().render();
        assert!(text.starts_with("Pipeline Status  [03f92a1]"));
        for name in ["Build", "Test", "Staging", "Security", "Deploy"] {
            assert!(text.contains(name), "missing {name}");
        }
    }
}
