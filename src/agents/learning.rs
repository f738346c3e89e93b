//! Learning agent - study roadmaps, resources and job search steps

use serde::Serialize;

const LEVEL_ORDER: &[&str] = &["новичок", "стажер", "выпускник", "junior", "middle", "senior"];

const FRONTEND_STEPS: &[&str] = &[
    "HTML5/доступность и семантическая разметка",
    "Современный CSS: flex/grid, responsive дизайн, препроцессоры",
    "JavaScript/TypeScript и принципы асинхронности",
    "Фреймворки (React/Vue/Svelte) и state-менеджмент",
    "Тестирование (Jest/Vitest, e2e Cypress/Playwright) и CI",
];

const BACKEND_STEPS: &[&str] = &[
    "Языки (Python/Go/Java) + чистый код",
    "Базы данных SQL/NoSQL, транзакции и моделирование",
    "REST/gRPC, аутентификация, документация API",
    "Архитектура (слои, очереди, кэш), контейнеризация",
    "Наблюдаемость, метрики, профилирование и безопасность",
];

const DATA_STEPS: &[&str] = &[
    "Статистика, вероятность, основы линейной алгебры",
    "Python / R, библиотеки анализа данных",
    "ETL, SQL, визуализация, BI-инструменты",
    "Машинное обучение, валидация, MLOps базовые практики",
    "Коммуникация результатов, сторителлинг и продуктовый контекст",
];

const GENERIC_STEPS: &[&str] = &[
    "Базовая теория выбранного направления",
    "Инструменты и стек, принятый в индустрии",
    "Практика через пет-проекты и open-source",
    "Тестирование, документация и совместная работа",
    "Продвинутая специализация и решение прикладных задач",
];

const FRONTEND_RESOURCES: &[&str] = &[
    "freecodecamp.org дорожки по HTML/CSS/JS",
    "Frontend Masters / Udemy React путь",
    "Книги: 'You Don't Know JS', 'Refactoring UI'",
    "Сообщества: Frontend Conf, VK FE-сообщество",
];

const BACKEND_RESOURCES: &[&str] = &[
    "Книги: 'Clean Architecture', 'Designing Data-Intensive Applications'",
    "Практика: exercism.org, codewars, pet-проекты",
    "Курсы: Stepik backend на Python/Go, Coursera",
    "Сообщества: backend hangouts, подкаст Radio-T",
];

const DATA_RESOURCES: &[&str] = &[
    "Курс Andrew Ng ML, Stepik 'Аналитик данных'",
    "Книги: 'Storytelling with Data', 'Python for Data Analysis'",
    "Песочницы Kaggle, Yandex Praktikum тренажёры",
    "Telegram чаты data-сообщества, митапы ODS.ai",
];

const GENERIC_RESOURCES: &[&str] = &[
    "Coursera/Stepik курсы по направлению",
    "Книги и официальные гайды от ведущих компаний",
    "Практические площадки (Kaggle, GitHub Issues)",
    "Профильные подкасты, конференции, митапы",
];

const JOB_STEPS: &[&str] = &[
    "Подготовка портфолио и описание проектов с цифрами",
    "Оптимизация резюме под ключевые слова и требования",
    "Тренировка интервью (тех и soft-skills) и тестовые задания",
    "Системная подача откликов и ведение CRM откликов",
    "Нетворкинг: митапы, профильные чаты, open-source вклад",
];

const JOB_RESOURCES: &[&str] = &[
    "hh.ru, habr career, linkedin.com/jobs",
    "t.me/junior_jobs, карьерные каналы направления",
    "Github для open-source активности",
    "Job trackers (Airtable, Notion) для контроля откликов",
];

const SUPPORT_LINE: &str = "Ты на правильном пути — бери план по шагам и пиши, если нужна помощь. Удачи!";

/// Study track a free-form direction maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Frontend,
    Backend,
    Data,
    Generic,
}

impl Direction {
    /// Map a free-form direction onto a known track
    pub fn normalize(direction: &str) -> Self {
        let direction = direction.trim().to_lowercase();
        let has_any = |keys: &[&str]| keys.iter().any(|key| direction.contains(key));

        if has_any(&["front", "ui", "web"]) {
            Self::Frontend
        } else if has_any(&["back", "server", "api"]) {
            Self::Backend
        } else if has_any(&["data", "аналит", "ml", "ds"]) {
            Self::Data
        } else {
            Self::Generic
        }
    }

    fn steps(self) -> &'static [&'static str] {
        match self {
            Self::Frontend => FRONTEND_STEPS,
            Self::Backend => BACKEND_STEPS,
            Self::Data => DATA_STEPS,
            Self::Generic => GENERIC_STEPS,
        }
    }

    fn resources(self) -> &'static [&'static str] {
        match self {
            Self::Frontend => FRONTEND_RESOURCES,
            Self::Backend => BACKEND_RESOURCES,
            Self::Data => DATA_RESOURCES,
            Self::Generic => GENERIC_RESOURCES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoadmapRequest {
    pub direction: String,
    pub current_level: String,
    pub target_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapInput {
    #[serde(rename = "направление")]
    pub direction: String,
    #[serde(rename = "стартовый уровень")]
    pub current_level: String,
    #[serde(rename = "желаемый уровень")]
    pub target_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Roadmap {
    pub user_input: RoadmapInput,
    #[serde(rename = "примерная длительность")]
    pub duration: String,
    #[serde(rename = "шаги обучения")]
    pub learning_steps: Vec<String>,
    #[serde(rename = "рекомендуемые ресурсы обучения")]
    pub learning_resources: &'static [&'static str],
    #[serde(rename = "шаги по устройству")]
    pub job_steps: &'static [&'static str],
    #[serde(rename = "ресурсы для поиска работы")]
    pub job_resources: &'static [&'static str],
    #[serde(rename = "поддержка")]
    pub support: &'static str,
}

/// Generates study paths, resources, and job search tips for a direction
#[derive(Debug, Clone, Default)]
pub struct LearningAgent;

impl LearningAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn build_roadmap(&self, request: &RoadmapRequest) -> Roadmap {
        let direction = Direction::normalize(&request.direction);
        log::debug!("Direction '{}' normalized to {:?}", request.direction, direction);

        Roadmap {
            user_input: RoadmapInput {
                direction: request.direction.clone(),
                current_level: request.current_level.clone(),
                target_level: request.target_level.clone(),
            },
            duration: estimate_time(&request.current_level, &request.target_level),
            learning_steps: tailor_learning_steps(direction.steps(), &request.current_level),
            learning_resources: direction.resources(),
            job_steps: JOB_STEPS,
            job_resources: JOB_RESOURCES,
            support: SUPPORT_LINE,
        }
    }
}

fn level_index(level: &str) -> Option<usize> {
    let level = level.to_lowercase();
    LEVEL_ORDER.iter().position(|l| *l == level)
}

/// Estimated duration: three months per level step on top of a two-month base
pub fn estimate_months(current: &str, target: &str) -> usize {
    let start = level_index(current).unwrap_or(0);
    let target = level_index(target).unwrap_or(start + 1);
    2 + target.saturating_sub(start) * 3
}

pub fn estimate_time(current: &str, target: &str) -> String {
    let months = estimate_months(current, target);
    format!("{}–{} месяцев при занятиях 12–15 часов в неделю", months, months + 2)
}

fn tailor_learning_steps(steps: &[&str], current_level: &str) -> Vec<String> {
    match current_level.to_lowercase().as_str() {
        "выпускник" | "стажер" => steps.iter().map(|s| s.to_string()).collect(),
        "junior" | "middle" => steps
            .iter()
            .filter(|s| !s.contains("Тестирование"))
            .take(4)
            .map(|s| s.to_string())
            .chain(std::iter::once("Усиление soft-skills и product-мышления".to_string()))
            .collect(),
        _ => std::iter::once("Фундаментальные основы + синтаксис".to_string())
            .chain(steps.iter().take(3).map(|s| s.to_string()))
            .chain(std::iter::once("Мини-проект каждую неделю с ретро и анализом".to_string()))
            .collect(),
    }
}
