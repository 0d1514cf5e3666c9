use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{
    ModulePage, NewModule, NewPage, NewSection, TrainingModule, TrainingSection, UpdateModule,
    UpdatePage, UpdateSection,
};
use crate::db::DatabaseError;

pub struct TrainingRepository;

impl TrainingRepository {
    // Sections

    pub async fn list_sections(pool: &PgPool) -> Result<Vec<TrainingSection>, DatabaseError> {
        let sections = sqlx::query_as::<_, TrainingSection>(
            r#"
            SELECT id, title, description, "order", created_at, updated_at
            FROM training_sections
            ORDER BY "order" ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(sections)
    }

    pub async fn get_section(
        pool: &PgPool,
        section_id: Uuid,
    ) -> Result<Option<TrainingSection>, DatabaseError> {
        let section = sqlx::query_as::<_, TrainingSection>(
            r#"
            SELECT id, title, description, "order", created_at, updated_at
            FROM training_sections
            WHERE id = $1
            "#,
        )
        .bind(section_id)
        .fetch_optional(pool)
        .await?;

        Ok(section)
    }

    pub async fn create_section(
        pool: &PgPool,
        new_section: &NewSection,
    ) -> Result<TrainingSection, DatabaseError> {
        let section = sqlx::query_as::<_, TrainingSection>(
            r#"
            INSERT INTO training_sections (title, description, "order")
            VALUES ($1, $2, $3)
            RETURNING id, title, description, "order", created_at, updated_at
            "#,
        )
        .bind(&new_section.title)
        .bind(&new_section.description)
        .bind(new_section.order)
        .fetch_one(pool)
        .await?;

        Ok(section)
    }

    pub async fn update_section(
        pool: &PgPool,
        section_id: Uuid,
        update: &UpdateSection,
    ) -> Result<TrainingSection, DatabaseError> {
        let section = sqlx::query_as::<_, TrainingSection>(
            r#"
            UPDATE training_sections
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                "order" = COALESCE($3, "order"),
                updated_at = now()
            WHERE id = $4
            RETURNING id, title, description, "order", created_at, updated_at
            "#,
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.order)
        .bind(section_id)
        .fetch_one(pool)
        .await?;

        Ok(section)
    }

    pub async fn delete_section(pool: &PgPool, section_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM training_sections WHERE id = $1")
            .bind(section_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    // Modules

    pub async fn list_modules(pool: &PgPool) -> Result<Vec<TrainingModule>, DatabaseError> {
        let modules = sqlx::query_as::<_, TrainingModule>(
            r#"
            SELECT id, section_id, title, description, "order", estimated_duration,
                   created_at, updated_at
            FROM training_modules
            ORDER BY "order" ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(modules)
    }

    pub async fn modules_by_section(
        pool: &PgPool,
        section_id: Uuid,
    ) -> Result<Vec<TrainingModule>, DatabaseError> {
        let modules = sqlx::query_as::<_, TrainingModule>(
            r#"
            SELECT id, section_id, title, description, "order", estimated_duration,
                   created_at, updated_at
            FROM training_modules
            WHERE section_id = $1
            ORDER BY "order" ASC
            "#,
        )
        .bind(section_id)
        .fetch_all(pool)
        .await?;

        Ok(modules)
    }

    pub async fn get_module(
        pool: &PgPool,
        module_id: Uuid,
    ) -> Result<Option<TrainingModule>, DatabaseError> {
        let module = sqlx::query_as::<_, TrainingModule>(
            r#"
            SELECT id, section_id, title, description, "order", estimated_duration,
                   created_at, updated_at
            FROM training_modules
            WHERE id = $1
            "#,
        )
        .bind(module_id)
        .fetch_optional(pool)
        .await?;

        Ok(module)
    }

    pub async fn create_module(
        pool: &PgPool,
        new_module: &NewModule,
    ) -> Result<TrainingModule, DatabaseError> {
        let module = sqlx::query_as::<_, TrainingModule>(
            r#"
            INSERT INTO training_modules (section_id, title, description, "order", estimated_duration)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, section_id, title, description, "order", estimated_duration,
                      created_at, updated_at
            "#,
        )
        .bind(new_module.section_id)
        .bind(&new_module.title)
        .bind(&new_module.description)
        .bind(new_module.order)
        .bind(new_module.estimated_duration)
        .fetch_one(pool)
        .await?;

        Ok(module)
    }

    pub async fn update_module(
        pool: &PgPool,
        module_id: Uuid,
        update: &UpdateModule,
    ) -> Result<TrainingModule, DatabaseError> {
        let module = sqlx::query_as::<_, TrainingModule>(
            r#"
            UPDATE training_modules
            SET section_id = COALESCE($1, section_id),
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                "order" = COALESCE($4, "order"),
                estimated_duration = COALESCE($5, estimated_duration),
                updated_at = now()
            WHERE id = $6
            RETURNING id, section_id, title, description, "order", estimated_duration,
                      created_at, updated_at
            "#,
        )
        .bind(update.section_id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.order)
        .bind(update.estimated_duration)
        .bind(module_id)
        .fetch_one(pool)
        .await?;

        Ok(module)
    }

    pub async fn delete_module(pool: &PgPool, module_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM training_modules WHERE id = $1")
            .bind(module_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    /// Module ids for the progress summary's set-difference over all modules.
    pub async fn module_ids(pool: &PgPool) -> Result<Vec<Uuid>, DatabaseError> {
        let ids: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM training_modules")
            .fetch_all(pool)
            .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    // Pages

    pub async fn pages_by_module(
        pool: &PgPool,
        module_id: Uuid,
    ) -> Result<Vec<ModulePage>, DatabaseError> {
        let pages = sqlx::query_as::<_, ModulePage>(
            r#"
            SELECT id, module_id, page_order, page_type, title, content,
                   created_at, updated_at
            FROM module_pages
            WHERE module_id = $1
            ORDER BY page_order ASC
            "#,
        )
        .bind(module_id)
        .fetch_all(pool)
        .await?;

        Ok(pages)
    }

    pub async fn get_page(
        pool: &PgPool,
        page_id: Uuid,
    ) -> Result<Option<ModulePage>, DatabaseError> {
        let page = sqlx::query_as::<_, ModulePage>(
            r#"
            SELECT id, module_id, page_order, page_type, title, content,
                   created_at, updated_at
            FROM module_pages
            WHERE id = $1
            "#,
        )
        .bind(page_id)
        .fetch_optional(pool)
        .await?;

        Ok(page)
    }

    pub async fn create_page(
        pool: &PgPool,
        module_id: Uuid,
        new_page: &NewPage,
    ) -> Result<ModulePage, DatabaseError> {
        let page = sqlx::query_as::<_, ModulePage>(
            r#"
            INSERT INTO module_pages (module_id, page_order, page_type, title, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, module_id, page_order, page_type, title, content,
                      created_at, updated_at
            "#,
        )
        .bind(module_id)
        .bind(new_page.page_order)
        .bind(new_page.page_type)
        .bind(&new_page.title)
        .bind(&new_page.content)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    pub async fn update_page(
        pool: &PgPool,
        page_id: Uuid,
        update: &UpdatePage,
    ) -> Result<ModulePage, DatabaseError> {
        let page = sqlx::query_as::<_, ModulePage>(
            r#"
            UPDATE module_pages
            SET page_order = COALESCE($1, page_order),
                page_type = COALESCE($2, page_type),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = now()
            WHERE id = $5
            RETURNING id, module_id, page_order, page_type, title, content,
                      created_at, updated_at
            "#,
        )
        .bind(update.page_order)
        .bind(update.page_type)
        .bind(&update.title)
        .bind(&update.content)
        .bind(page_id)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    pub async fn delete_page(pool: &PgPool, page_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM module_pages WHERE id = $1")
            .bind(page_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}
