//! Career tools - résumé examples, vacancy reviews, interview Q&A

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use super::{Tool, ToolContext, str_arg};

const SUCCESSFUL_RESUMES: &[&str] = &[
    "Frontend разработчик: 2 пет-проекта, вклад в open-source и рост производительности UI на 30%.",
    "Data engineer: автоматизация пайплайна, снижение стоимости хранения на 18%, стек Airflow + Spark.",
    "Product менеджер: запуск discovery цикла, рост MAU на 22% и NPS +14 пунктов.",
];

const FAILED_RESUMES: &[&str] = &[
    "Резюме без конкретики, только список обязанностей и без цифр.",
    "Перегруженный документ на 7 страниц, отсутствуют контакты и ссылки.",
    "Копия описания вакансии, нет уникальных достижений кандидата.",
];

#[derive(Debug, Serialize)]
struct VacancyExample {
    title: &'static str,
    label: &'static str,
    reasons: &'static [&'static str],
}

const VACANCY_DESCRIPTIONS: &[VacancyExample] = &[
    VacancyExample {
        title: "Хорошая стажировка frontend",
        label: "good",
        reasons: &["есть наставник", "оплачиваемая", "четкие задачи и стек"],
    },
    VacancyExample {
        title: "Сомнительная роль аналитика",
        label: "bad",
        reasons: &["нет договора", "оплата после испытательного срока", "24/7"],
    },
];

#[derive(Debug, Serialize)]
struct InterviewQa {
    question: &'static str,
    answer: &'static str,
}

const INTERVIEW_QA: &[InterviewQa] = &[
    InterviewQa {
        question: "Как вы объясните свой провал в проекте?",
        answer: "Расскажите по схеме STAR, добавьте уроки и то, как исправили процесс.",
    },
    InterviewQa {
        question: "Чем гордитесь больше всего?",
        answer: "Опишите конкретный вклад и метрику результата, завершите связью с ролью.",
    },
    InterviewQa {
        question: "Что сделаете в первые 90 дней?",
        answer: "Сбор контекста, быстрая победа, фокус на коммуникацию и фидбек.",
    },
];

pub struct ResumeExamplesTool;

#[async_trait]
impl Tool for ResumeExamplesTool {
    fn name(&self) -> &'static str {
        "career_resume_examples"
    }

    fn description(&self) -> &'static str {
        "Возвращает примеры успешных/неуспешных резюме и по желанию добавляет извлечённый текст из прикреплённого PDF резюме пользователя."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pdf_path": {
                    "type": "string",
                    "description": "Путь до PDF резюме кандидата"
                },
                "include_failures": {
                    "type": "boolean",
                    "description": "Добавлять ли неудачные примеры",
                    "default": true
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, eyre::Error> {
        let pdf_excerpt = ctx.document_excerpt(&input).await?;
        let include_failures = input["include_failures"].as_bool().unwrap_or(true);
        let unsuccessful: &[&str] = if include_failures { FAILED_RESUMES } else { &[] };

        Ok(json!({
            "successful": SUCCESSFUL_RESUMES,
            "unsuccessful": unsuccessful,
            "pdf_excerpt": pdf_excerpt
        }))
    }
}

pub struct VacancyReviewsTool;

#[async_trait]
impl Tool for VacancyReviewsTool {
    fn name(&self) -> &'static str {
        "career_vacancy_reviews"
    }

    fn description(&self) -> &'static str {
        "Показывает примеры хороших и плохих описаний вакансий, может разобрать PDF вакансии"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pdf_path": {
                    "type": "string",
                    "description": "Путь к PDF описанию вакансии"
                },
                "notes": {
                    "type": "string",
                    "description": "Дополнительные пользовательские комментарии"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, eyre::Error> {
        let pdf_excerpt = ctx.document_excerpt(&input).await?;
        let comment = str_arg(&input, "notes").unwrap_or_default();

        Ok(json!({
            "vacancies": VACANCY_DESCRIPTIONS,
            "comment": comment,
            "pdf_excerpt": pdf_excerpt
        }))
    }
}

pub struct InterviewQaTool;

#[async_trait]
impl Tool for InterviewQaTool {
    fn name(&self) -> &'static str {
        "career_interview_qa"
    }

    fn description(&self) -> &'static str {
        "Предоставляет реальные вопросы и ответы с собеседований"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Фильтр по ключевому слову"
                }
            }
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<Value, eyre::Error> {
        let topic = str_arg(&input, "topic").map(str::to_lowercase);

        let matching: Vec<&InterviewQa> = match &topic {
            Some(topic) => INTERVIEW_QA
                .iter()
                .filter(|item| item.question.to_lowercase().contains(topic.as_str()))
                .collect(),
            None => Vec::new(),
        };

        // No topic, or nothing matched: the whole list
        if matching.is_empty() {
            return Ok(json!({ "qa": INTERVIEW_QA }));
        }
        Ok(json!({ "qa": matching }))
    }
}
