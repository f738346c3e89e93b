//! Learning tools - career paths, study materials, plain-language explanations

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{Tool, ToolContext, str_arg};

#[derive(Debug, Serialize)]
struct CareerPath {
    role: &'static str,
    road: &'static [&'static str],
}

const CAREER_PATHS: &[CareerPath] = &[
    CareerPath {
        role: "Frontend разработчик",
        road: &["HTML/CSS", "React/TypeScript", "Тестирование", "Участие в open-source"],
    },
    CareerPath {
        role: "Data аналитик",
        road: &["SQL и статистика", "BI инструменты", "A/B тесты", "Продуктовая аналитика"],
    },
];

#[derive(Debug, Serialize)]
struct LearningMaterial {
    title: &'static str,
    effectiveness: &'static str,
}

const LEARNING_MATERIALS: &[LearningMaterial] = &[
    LearningMaterial {
        title: "Stepik курсы",
        effectiveness: "90% при прохождении проектов",
    },
    LearningMaterial {
        title: "MIT OpenCourseWare",
        effectiveness: "80% благодаря глубине теории",
    },
    LearningMaterial {
        title: "YouTube спринты",
        effectiveness: "65%: подходит для повторения",
    },
];

const CONCEPT_EXPLANATIONS: &[(&str, &str)] = &[
    (
        "docker",
        "Представь контейнер как коробку с приложением и всем, что ему нужно.",
    ),
    (
        "api",
        "API — контракт: ты отправляешь запрос, сервис отвечает строго по договорённости.",
    ),
    (
        "ml",
        "ML-модель — это функция, которая учится на данных, чтобы предсказывать ответы.",
    ),
];

pub struct CareerPathsTool;

#[async_trait]
impl Tool for CareerPathsTool {
    fn name(&self) -> &'static str {
        "learning_career_paths"
    }

    fn description(&self) -> &'static str {
        "Возвращает карьерные пути и образовательные траектории"
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<Value, eyre::Error> {
        Ok(json!({ "paths": CAREER_PATHS }))
    }
}

pub struct LearningMaterialsTool;

#[async_trait]
impl Tool for LearningMaterialsTool {
    fn name(&self) -> &'static str {
        "learning_materials_with_reviews"
    }

    fn description(&self) -> &'static str {
        "Обучающие материалы и оценка их эффективности. Может разбирать PDF конспекты."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pdf_path": {
                    "type": "string",
                    "description": "Файл с материалами"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, eyre::Error> {
        let pdf_excerpt = ctx.document_excerpt(&input).await?;
        Ok(json!({
            "materials": LEARNING_MATERIALS,
            "pdf_excerpt": pdf_excerpt
        }))
    }
}

pub struct SimpleExplanationsTool;

#[async_trait]
impl Tool for SimpleExplanationsTool {
    fn name(&self) -> &'static str {
        "learning_simple_explanations"
    }

    fn description(&self) -> &'static str {
        "Дает простые объяснения сложных концепций"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "term": {
                    "type": "string",
                    "description": "Конкретный термин"
                }
            }
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<Value, eyre::Error> {
        let term = str_arg(&input, "term").map(str::to_lowercase);

        let concepts: Map<String, Value> = CONCEPT_EXPLANATIONS
            .iter()
            .filter(|(key, _)| match &term {
                Some(term) if is_known_term(term) => *key == term.as_str(),
                _ => true,
            })
            .map(|(key, text)| (key.to_string(), json!(text)))
            .collect();

        Ok(json!({ "concepts": concepts }))
    }
}

fn is_known_term(term: &str) -> bool {
    CONCEPT_EXPLANATIONS.iter().any(|(key, _)| *key == term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_career_paths() {
        let output = CareerPathsTool
            .execute(json!({}), &ToolContext::default())
            .await
            .unwrap();

        let paths = output["paths"].as_array().unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0]["role"], "Frontend разработчик");
        assert_eq!(paths[1]["road"][0], "SQL и статистика");
    }

    #[tokio::test]
    async fn test_learning_materials_without_document() {
        let output = LearningMaterialsTool
            .execute(json!({}), &ToolContext::default())
            .await
            .unwrap();

        assert_eq!(output["materials"].as_array().unwrap().len(), 3);
        assert!(output["pdf_excerpt"].is_null());
    }

    #[tokio::test]
    async fn test_learning_materials_missing_document_fails() {
        let result = LearningMaterialsTool
            .execute(json!({ "pdf_path": "/nope/notes.pdf" }), &ToolContext::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_explanations_known_term() {
        let output = SimpleExplanationsTool
            .execute(json!({ "term": "Docker" }), &ToolContext::default())
            .await
            .unwrap();

        let concepts = output["concepts"].as_object().unwrap();
        assert_eq!(concepts.len(), 1);
        assert!(concepts["docker"].as_str().unwrap().contains("контейнер"));
    }

    #[tokio::test]
    async fn test_explanations_unknown_term_returns_all() {
        let output = SimpleExplanationsTool
            .execute(json!({ "term": "kafka" }), &ToolContext::default())
            .await
            .unwrap();
        assert_eq!(output["concepts"].as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_explanations_no_term_returns_all() {
        let output = SimpleExplanationsTool
            .execute(json!({}), &ToolContext::default())
            .await
            .unwrap();
        assert_eq!(output["concepts"].as_object().unwrap().len(), 3);
    }
}
