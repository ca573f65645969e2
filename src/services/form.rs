use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AnswerSet, Question, QuestionType};

/// Label of the terminal free-text page
pub const SUGGESTION_PAGE: &str = "Saran";

/// One step of the questionnaire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormPage {
    /// Every question sharing a label, shown together
    Group { label: String },
    /// A single yes/no question on its own page
    Single { question_id: Uuid, label: String },
    /// Free-text suggestion step
    Suggestion,
}

impl FormPage {
    pub fn title(&self) -> &str {
        match self {
            FormPage::Group { label } | FormPage::Single { label, .. } => label,
            FormPage::Suggestion => SUGGESTION_PAGE,
        }
    }
}

/// Where the wizard ends up after a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Show the page at `index`
    Page { index: usize },
    /// Back to the respondent information form
    Info,
    /// Last page passed validation, the form can be submitted
    Submit,
}

/// Derive the form pages from active questions ordered by `urutan`.
///
/// Labels keep their first-appearance order. A label whose first question is
/// yes/no expands to one page per question; any other label is one page.
pub fn build_pages(questions: &[Question]) -> Vec<FormPage> {
    if questions.is_empty() {
        return Vec::new();
    }

    let mut labels: Vec<&str> = Vec::new();
    for question in questions {
        if !labels.contains(&question.label.as_str()) {
            labels.push(&question.label);
        }
    }

    let mut pages = Vec::new();
    for label in labels {
        let in_label: Vec<&Question> = questions.iter().filter(|q| q.label == label).collect();

        match in_label.first() {
            Some(first) if first.question_type == QuestionType::YesNoText => {
                pages.extend(in_label.iter().map(|q| FormPage::Single {
                    question_id: q.id,
                    label: q.label.clone(),
                }));
            }
            _ => pages.push(FormPage::Group {
                label: label.to_string(),
            }),
        }
    }
    pages.push(FormPage::Suggestion);

    pages
}

/// Linear cursor over the form pages
#[derive(Debug, Clone)]
pub struct FormWizard {
    questions: Vec<Question>,
    pages: Vec<FormPage>,
    cursor: usize,
}

impl FormWizard {
    pub fn new(questions: Vec<Question>) -> Self {
        let pages = build_pages(&questions);
        Self {
            questions,
            pages,
            cursor: 0,
        }
    }

    /// Wizard positioned on page `index`
    pub fn at(questions: Vec<Question>, index: usize) -> AppResult<Self> {
        let mut wizard = Self::new(questions);
        if index >= wizard.pages.len() {
            return Err(AppError::Validation(format!(
                "Halaman {} tidak ada (jumlah halaman {})",
                index,
                wizard.pages.len()
            )));
        }
        wizard.cursor = index;
        Ok(wizard)
    }

    pub fn pages(&self) -> &[FormPage] {
        &self.pages
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&FormPage> {
        self.pages.get(self.cursor)
    }

    /// Questions shown on a page, in form order
    pub fn page_questions(&self, page: &FormPage) -> Vec<&Question> {
        match page {
            FormPage::Group { label } => self
                .questions
                .iter()
                .filter(|q| &q.label == label)
                .collect(),
            FormPage::Single { question_id, .. } => self
                .questions
                .iter()
                .filter(|q| &q.id == question_id)
                .collect(),
            FormPage::Suggestion => Vec::new(),
        }
    }

    /// Validate the current page, then advance
    pub fn next(&mut self, answers: &AnswerSet) -> AppResult<Step> {
        let Some(page) = self.current() else {
            return Err(AppError::Validation(
                "Kuesioner belum memiliki pertanyaan aktif".to_string(),
            ));
        };
        self.validate_page(page, answers)?;

        if self.cursor + 1 < self.pages.len() {
            self.cursor += 1;
            Ok(Step::Page { index: self.cursor })
        } else {
            Ok(Step::Submit)
        }
    }

    pub fn back(&mut self) -> Step {
        if self.cursor > 0 {
            self.cursor -= 1;
            Step::Page { index: self.cursor }
        } else {
            Step::Info
        }
    }

    /// Validate every page in order; the first unanswered question wins
    pub fn validate_all(&self, answers: &AnswerSet) -> AppResult<()> {
        if self.pages.is_empty() {
            return Err(AppError::Validation(
                "Kuesioner belum memiliki pertanyaan aktif".to_string(),
            ));
        }
        self.pages
            .iter()
            .try_for_each(|page| self.validate_page(page, answers))
    }

    fn validate_page(&self, page: &FormPage, answers: &AnswerSet) -> AppResult<()> {
        for question in self.page_questions(page) {
            let answered = answers
                .get(&question.id)
                .is_some_and(|answer| answer.is_answered(question.question_type));
            if answered {
                continue;
            }

            let message = match question.question_type {
                QuestionType::Scale => {
                    format!("Harap menjawab pertanyaan: \"{}\"", question.text)
                }
                QuestionType::YesNoText => format!(
                    "Harap memilih \"Ya\" atau \"Tidak\" untuk pertanyaan: \"{}\"",
                    question.text
                ),
            };
            return Err(AppError::Validation(message));
        }
        Ok(())
    }
}
