//! Career agent - résumé/cover templates, document review, vacancy checks

use serde::Serialize;

use crate::error::{AssistantError, Result};

/// Examples and skeletons for one project group
struct TemplateGroup {
    name: &'static str,
    resume_examples: &'static [&'static str],
    cover_examples: &'static [&'static str],
    resume_templates: &'static [&'static str],
    cover_templates: &'static [&'static str],
}

const PROJECT_GROUPS: &[TemplateGroup] = &[
    TemplateGroup {
        name: "ИТ-продукты",
        resume_examples: &[
            "Фронтенд-разработчик: стек React/TypeScript, 2 pet-проекта, волонтёрство в open-source.",
            "Python backend: FastAPI, PostgreSQL, описанные кейсы оптимизации API (-30% latency).",
            "Fullstack стажёр: Next.js + Node, учебные проекты с деплоем на Render, участие в хакатонах.",
        ],
        cover_examples: &[
            "Письмо: интерес к продукту, ссылка на демо, 2 абзаца про вклад и мотивацию.",
            "Письмо: акцент на опыт командной разработки и готовность быстро учиться.",
            "Письмо: история проблемы пользователя и как кандидат хочет её решать в компании.",
        ],
        resume_templates: &[
            "ФИО | контакты | GitHub\nЦель\nНавыки (язык, фреймворки)\nОпыт/проекты\nОбразование\nСертификаты",
            "ФИО | роль\nКраткое summary (3 предложения)\nКейсы\nИнструменты\nОбразование и активность",
        ],
        cover_templates: &[
            "Приветствие -> интерес к компании\n1) недавний успех\n2) связь опыта с задачами\nЗакрытие + контакты",
            "Крючок (продукт/миссия)\nОсновные навыки bullets\nПредложение о встрече\nБлагодарность",
        ],
    },
    TemplateGroup {
        name: "Данные и аналитика",
        resume_examples: &[
            "Аналитик данных: SQL, PowerBI, кейс по снижению затрат на 12%.",
            "Data scientist: sklearn, MLflow, pet-проект рекомендаций, Kaggle bronze.",
            "BI-аналитик: Tableau, автоматизация отчётности, практика A/B тестов.",
        ],
        cover_examples: &[
            "Письмо: метрики, которые кандидат улучшил, и ожидания от роли.",
            "Письмо: акцент на работающие дашборды и взаимодействие с бизнесом.",
            "Письмо: история обучения, почему выбирает именно эту индустрию.",
        ],
        resume_templates: &[
            "ФИО | направление\nSummary с цифрами\nHard skills (SQL, Python, BI)\nПроекты/опыт\nОбразование\nСообщества",
            "ФИО и цель\nСписок ключевых компетенций\nВклады в продукт\nОбразование и курсы\nПубликации/выступления",
        ],
        cover_templates: &[
            "Обращение\nПроблема заказчика -> ваш опыт её решать\nПример метрики\nПризыв созвониться",
            "Структура STAR: ситуация, задача, действия, результат -> связь с вакансией",
        ],
    },
    TemplateGroup {
        name: "Продукт и маркетинг",
        resume_examples: &[
            "Product manager: discovery, A/B тесты, рост MAU на 18%.",
            "Product marketing: go-to-market план, сегментация, рост конверсии лендинга.",
            "Growth specialist: CRM-воронки, эксперименты, автоматизация рассылок.",
        ],
        cover_examples: &[
            "Письмо: что понравилось в продукте и какую гипотезу кандидат готов проверить.",
            "Письмо: опыт работы с кросс-функциональными командами, упоминание цикла PDCA.",
            "Письмо: история пользователя и предложение по улучшению, которое кандидат уже проверил.",
        ],
        resume_templates: &[
            "ФИО | роль\nSummary\nКлючевые достижения (цифры)\nОпыт (продукты, метрики)\nНавыки\nОбразование",
            "ФИО, контакты\nМиссия кандидата\nОпыт product discovery/delivery\nИнструменты\nСофт-скиллы\nХобби",
        ],
        cover_templates: &[
            "Hook про рынок\n2-3 маркера экспертизы\nПредложение эксперимента\nCTA",
            "Почему компания\nКейс из опыта (результат)\nКак поможет продукту\nПожелание связаться",
        ],
    },
];

const RESUME_SECTIONS: &[&str] = &["summary", "навык", "опыт", "проекты", "образование", "контакты"];

const RED_FLAGS: &[&str] = &[
    "без оплаты",
    "неоплачиваем",
    "24/7",
    "оплата по результату испытательного срока",
    "многозадачность без границ",
    "требуем круглосуточно",
    "штрафы за опоздания",
    "свой ноутбук обязателен без компенсации",
    "нет договора",
];

const GREEN_SIGNALS: &[&str] = &[
    "ментор",
    "оплачиваемая стажировка",
    "гибкий график",
    "medстраховка",
    "индивидуальный план развития",
    "официальное оформление",
    "review процесса",
    "компенсация обучения",
];

/// Kind of document under review
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentKind {
    Resume,
    Cover,
}

/// Templates and examples for one project group
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResult {
    #[serde(rename = "группа")]
    pub group: &'static str,
    #[serde(rename = "примеры резюме")]
    pub resume_examples: &'static [&'static str],
    #[serde(rename = "примеры сопроводительных")]
    pub cover_examples: &'static [&'static str],
    #[serde(rename = "шаблоны резюме")]
    pub resume_templates: &'static [&'static str],
    #[serde(rename = "шаблоны сопроводительных")]
    pub cover_templates: &'static [&'static str],
}

/// Review findings grouped by aspect
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentFindings {
    #[serde(rename = "структура")]
    pub structure: Vec<String>,
    #[serde(rename = "содержание")]
    pub content: Vec<String>,
    #[serde(rename = "редактура")]
    pub editing: Vec<String>,
    #[serde(rename = "переформулировки")]
    pub rewrites: Vec<String>,
}

/// Risk assessment of a job posting
#[derive(Debug, Clone, Serialize)]
pub struct VacancyReport {
    #[serde(rename = "красные флаги")]
    pub red_flags: Vec<String>,
    #[serde(rename = "зеленые флаги")]
    pub green_flags: Vec<String>,
    #[serde(rename = "комментарий")]
    pub comment: String,
}

/// Provides resume/cover letter templates and runs document/vacancy reviews
#[derive(Debug, Clone, Default)]
pub struct CareerAgent;

impl CareerAgent {
    pub fn new() -> Self {
        Self
    }

    /// Names of the known template groups, in display order
    fn groups(&self) -> Vec<&'static str> {
        PROJECT_GROUPS.iter().map(|g| g.name).collect()
    }

    /// One group when named, otherwise all of them. An empty name means all.
    pub fn provide_templates(&self, group: Option<&str>) -> Result<Vec<TemplateResult>> {
        match group.filter(|name| !name.is_empty()) {
            Some(name) => {
                let group = PROJECT_GROUPS.iter().find(|g| g.name == name).ok_or_else(|| {
                    AssistantError::UnknownGroup(format!("{} (доступны: {})", name, self.groups().join(", ")))
                })?;
                Ok(vec![build_result(group)])
            }
            None => Ok(PROJECT_GROUPS.iter().map(build_result).collect()),
        }
    }

    pub fn analyze_document(&self, text: &str, kind: DocumentKind) -> DocumentFindings {
        let normalized = text.to_lowercase();
        let mut findings = DocumentFindings::default();

        let missing_sections: Vec<&str> = RESUME_SECTIONS
            .iter()
            .copied()
            .filter(|section| !normalized.contains(section))
            .collect();
        if !missing_sections.is_empty() {
            let shown: Vec<&str> = missing_sections.iter().copied().take(3).collect();
            findings.structure.push(format!(
                "Добавь блоки: {} (нужны для быстрого сканирования HR).",
                shown.join(", ")
            ));
        }
        if text.matches('\n').count() < 5 {
            findings
                .structure
                .push("Добавь разбивку на блоки и списки — сплошной текст тяжело читать.".to_string());
        }

        if text.chars().count() < 600 {
            findings
                .content
                .push("Документ кажется коротким: раскрой 2-3 достижения с цифрами.".to_string());
        }
        if normalized.contains("я занимался") {
            findings
                .content
                .push("Заменяй формулировку 'я занимался' на активные глаголы и конкретику.".to_string());
        }
        if normalized.contains("responsible") {
            findings
                .content
                .push("Слово 'responsible' лучше заменить на результат (например, 'увеличил').".to_string());
        }

        if text.contains("  ") {
            findings
                .editing
                .push("Есть двойные пробелы — пройдись автоформатированием.".to_string());
        }
        if has_lowercase_sentence_start(text) {
            findings
                .editing
                .push("Начинай предложения с заглавной буквы.".to_string());
        }
        if !text.trim().ends_with(['.', '!', '?']) {
            findings
                .editing
                .push("Добавь финальную точку/призыв — завершение сейчас обрывается.".to_string());
        }

        findings.rewrites.push(
            "Вместо 'участвовал в проекте' -> 'Скоординировал релиз фичи, сократил TTM на 20%'.".to_string(),
        );
        findings
            .rewrites
            .push("Добавь метрики: пользователи, конверсия, скорость, качество.".to_string());

        if kind == DocumentKind::Cover {
            findings
                .content
                .push("Сопроводительное письмо должно отвечать на 'почему компания' и 'почему вы'.".to_string());
            findings.rewrites.push(
                "Свяжи опыт с задачами вакансии: 'Мой опыт оптимизации CRM поможет вашим процессам продаж'."
                    .to_string(),
            );
        }

        findings
    }

    pub fn analyze_vacancy(&self, text: &str) -> VacancyReport {
        let normalized = text.to_lowercase();
        let red: Vec<String> = matching_flags(RED_FLAGS, &normalized);
        let green: Vec<String> = matching_flags(GREEN_SIGNALS, &normalized);

        let mut comment_parts = Vec::new();
        if !red.is_empty() {
            comment_parts.push("Проверь детали оффера и попроси подтвердить условия письменно.");
        }
        if normalized.contains("без опыта") && normalized.contains("высокая ответственность") {
            comment_parts.push("Комбинация 'без опыта' и высокой ответственности — уточни поддержку команды.");
        }
        if red.is_empty() && green.is_empty() {
            comment_parts.push("Текст нейтральный: уточни процесс интервью и ожидания к первым 3 месяцам.");
        }

        VacancyReport {
            red_flags: or_placeholder(red, "не найдены явно, смотри детали контракта"),
            green_flags: or_placeholder(green, "не озвучены — спроси про менторство и оформление"),
            comment: comment_parts.join(" "),
        }
    }
}

fn build_result(group: &TemplateGroup) -> TemplateResult {
    TemplateResult {
        group: group.name,
        resume_examples: group.resume_examples,
        cover_examples: group.cover_examples,
        resume_templates: group.resume_templates,
        cover_templates: group.cover_templates,
    }
}

/// A lowercase letter right after ". "
fn has_lowercase_sentence_start(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(3)
        .any(|w| w[0] == '.' && w[1] == ' ' && w[2].is_lowercase())
}

fn matching_flags(flags: &[&str], normalized: &str) -> Vec<String> {
    flags
        .iter()
        .filter(|flag| normalized.contains(*flag))
        .map(|flag| flag.to_string())
        .collect()
}

fn or_placeholder(found: Vec<String>, placeholder: &str) -> Vec<String> {
    if found.is_empty() { vec![placeholder.to_string()] } else { found }
}
