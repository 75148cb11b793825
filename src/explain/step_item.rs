use std::fmt;

use tabled::builder::Builder;
use tabled::settings::Style;

/// One line of a step-by-step explanation. `content` is TeX.
#[derive(Debug, Clone, PartialEq)]
pub struct StepItem {
    pub label: String,
    pub content: String,
    pub explanation: Option<String>,
}

impl StepItem {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        StepItem {
            label: label.into(),
            content: content.into(),
            explanation: None,
        }
    }

    pub fn explained(label: impl Into<String>, content: impl Into<String>, explanation: impl Into<String>) -> Self {
        StepItem {
            label: label.into(),
            content: content.into(),
            explanation: Some(explanation.into()),
        }
    }
}

impl fmt::Display for StepItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.content)?;
        if let Some(explanation) = &self.explanation {
            write!(f, " ({})", explanation)?;
        }
        Ok(())
    }
}

/// Renders a step list as a numbered text table.
pub fn render_steps(steps: &[StepItem]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Step", "Expression", "Explanation"]);
    for (i, step) in steps.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            step.label.clone(),
            step.content.clone(),
            step.explanation.clone().unwrap_or_default(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}
