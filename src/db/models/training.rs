use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "page_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Text,
    Image,
    Video,
    Slide,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TrainingSection {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TrainingModule {
    pub id: Uuid,
    pub section_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub estimated_duration: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ModulePage {
    pub id: Uuid,
    pub module_id: Uuid,
    pub page_order: i32,
    pub page_type: PageType,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSection {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSection {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewModule {
    pub section_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub estimated_duration: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateModule {
    pub section_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub estimated_duration: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewPage {
    pub page_order: i32,
    pub page_type: PageType,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePage {
    pub page_order: Option<i32>,
    pub page_type: Option<PageType>,
    pub title: Option<String>,
    pub content: Option<String>,
}
