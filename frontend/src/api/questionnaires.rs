use serde::{Deserialize, Serialize};

use super::{client::ApiClient, types::ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionnaireKind {
    RiskAssessment,
    SupportPlan,
}

impl QuestionnaireKind {
    pub fn slug(self) -> &'static str {
        match self {
            QuestionnaireKind::RiskAssessment => "risk-assessment",
            QuestionnaireKind::SupportPlan => "support-plan",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuestionnaireKind::RiskAssessment => "Risk Assessment",
            QuestionnaireKind::SupportPlan => "Support Plan",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Text,
    Radio,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub section: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

impl Question {
    fn new(id: &str, section: &str, text: &str, kind: QuestionType, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            section: section.to_string(),
            text: text.to_string(),
            kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            required: true,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

pub fn default_questions(kind: QuestionnaireKind) -> Vec<Question> {
    use QuestionType::*;
    match kind {
        QuestionnaireKind::RiskAssessment => vec![
            Question::new(
                "home_access",
                "Environment",
                "How is the property accessed?",
                Radio,
                &["Key safe", "Family member", "Service user opens door"],
            ),
            Question::new(
                "home_hazards",
                "Environment",
                "Which hazards are present in the home?",
                Checkbox,
                &["Pets", "Trip hazards", "Poor lighting", "Smoking"],
            )
            .optional(),
            Question::new(
                "mobility_level",
                "Mobility",
                "What is the service user's mobility level?",
                Radio,
                &["Independent", "Walking aid", "Hoist required"],
            ),
            Question::new(
                "falls_history",
                "Mobility",
                "Describe any falls in the last 12 months.",
                Text,
                &[],
            )
            .optional(),
            Question::new(
                "medication_support",
                "Medication",
                "What level of medication support is needed?",
                Radio,
                &["None", "Prompt", "Administer"],
            ),
            Question::new(
                "control_measures",
                "Medication",
                "Control measures agreed with the service user.",
                Text,
                &[],
            ),
        ],
        QuestionnaireKind::SupportPlan => vec![
            Question::new(
                "about_me",
                "About me",
                "What is important to the service user?",
                Text,
                &[],
            ),
            Question::new(
                "communication",
                "About me",
                "Preferred communication methods",
                Checkbox,
                &["Verbal", "Written", "Sign language", "Picture cards"],
            ),
            Question::new(
                "personal_care",
                "Daily living",
                "Support needed with personal care",
                Radio,
                &["None", "Some", "Full"],
            ),
            Question::new(
                "meals",
                "Daily living",
                "Dietary requirements and meal preferences",
                Text,
                &[],
            )
            .optional(),
            Question::new(
                "outcomes",
                "Goals",
                "Outcomes the service user wants to achieve",
                Text,
                &[],
            ),
        ],
    }
}

/// Section names in first-seen order.
pub fn sections(questions: &[Question]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for question in questions {
        if !seen.contains(&question.section) {
            seen.push(question.section.clone());
        }
    }
    seen
}

impl ApiClient {
    pub async fn questionnaire_template(
        &self,
        kind: QuestionnaireKind,
    ) -> Result<Vec<Question>, ApiError> {
        self.get_json(&format!("/questionnaire-templates/{}", kind.slug()), &[])
            .await
    }

    /// Remote template, or the built-in set when the template cannot be loaded.
    pub async fn questionnaire_or_default(&self, kind: QuestionnaireKind) -> Vec<Question> {
        match self.questionnaire_template(kind).await {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                log::warn!("empty {} template, using built-in questions", kind.slug());
                default_questions(kind)
            }
            Err(err) => {
                log::warn!(
                    "{} template unavailable ({}), using built-in questions",
                    kind.slug(),
                    err
                );
                default_questions(kind)
            }
        }
    }
}
