//! Answers collected by the questionnaire wizard.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::{
    api::{
        questionnaires::{Question, QuestionType},
        Answers,
    },
    utils::forms::FieldErrors,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(String),
    Choices(BTreeSet<String>),
}

impl Answer {
    fn is_blank(&self) -> bool {
        match self {
            Answer::Text(text) => text.trim().is_empty(),
            Answer::Choice(choice) => choice.is_empty(),
            Answer::Choices(choices) => choices.is_empty(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Answer::Text(text) => Value::String(text.trim().to_string()),
            Answer::Choice(choice) => Value::String(choice.clone()),
            Answer::Choices(choices) => {
                Value::Array(choices.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap(BTreeMap<String, Answer>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id)
    }

    pub fn set_text(&mut self, question_id: &str, text: String) {
        self.0.insert(question_id.to_string(), Answer::Text(text));
    }

    pub fn choose(&mut self, question_id: &str, option: &str) {
        self.0
            .insert(question_id.to_string(), Answer::Choice(option.to_string()));
    }

    /// Adds or removes one option of a checkbox question.
    pub fn toggle(&mut self, question_id: &str, option: &str, checked: bool) {
        let entry = self
            .0
            .entry(question_id.to_string())
            .or_insert_with(|| Answer::Choices(BTreeSet::new()));
        if !matches!(entry, Answer::Choices(_)) {
            *entry = Answer::Choices(BTreeSet::new());
        }
        if let Answer::Choices(choices) = entry {
            if checked {
                choices.insert(option.to_string());
            } else {
                choices.remove(option);
            }
        }
    }

    pub fn text(&self, question_id: &str) -> String {
        match self.get(question_id) {
            Some(Answer::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    pub fn is_selected(&self, question_id: &str, option: &str) -> bool {
        match self.get(question_id) {
            Some(Answer::Choice(choice)) => choice == option,
            Some(Answer::Choices(choices)) => choices.contains(option),
            _ => false,
        }
    }

    pub fn is_answered(&self, question: &Question) -> bool {
        self.get(&question.id).map(|a| !a.is_blank()).unwrap_or(false)
    }

    /// One error per required question left blank.
    pub fn missing<'a>(&self, questions: impl IntoIterator<Item = &'a Question>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for question in questions {
            if question.required && !self.is_answered(question) {
                let message = match question.kind {
                    QuestionType::Text => "This answer is required",
                    QuestionType::Radio => "Choose one option",
                    QuestionType::Checkbox => "Choose at least one option",
                };
                errors.add(question.id.clone(), format!("{}: {}", question.text, message));
            }
        }
        errors
    }

    /// Wire form: text and radio as strings, checkbox as a sorted array.
    /// Blank answers are left out.
    pub fn to_answers(&self) -> Answers {
        self.0
            .iter()
            .filter(|(_, answer)| !answer.is_blank())
            .map(|(id, answer)| (id.clone(), answer.to_value()))
            .collect()
    }

    /// Rebuilds the map from stored answers, using the questions for types.
    pub fn from_answers(questions: &[Question], answers: &Answers) -> Self {
        let mut map = Self::new();
        for question in questions {
            let Some(value) = answers.get(&question.id) else {
                continue;
            };
            match (question.kind, value) {
                (QuestionType::Text, Value::String(text)) => map.set_text(&question.id, text.clone()),
                (QuestionType::Radio, Value::String(choice)) => map.choose(&question.id, choice),
                (QuestionType::Checkbox, Value::Array(items)) => {
                    for item in items.iter().filter_map(Value::as_str) {
                        map.toggle(&question.id, item, true);
                    }
                }
                _ => {}
            }
        }
        map
    }
}
