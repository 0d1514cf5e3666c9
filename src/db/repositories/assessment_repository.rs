use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::models::{AssessmentQuestion, AssessmentResult, NewQuestion, UpdateQuestion};
use crate::db::DatabaseError;
use crate::modules::assessments::scoring::{AssessmentScope, ScoreOutcome};

pub struct AssessmentRepository;

impl AssessmentRepository {
    // Questions

    /// Questions for a scope in presentation order; id breaks order ties so
    /// scoring and listing stay deterministic.
    pub async fn questions_for_scope(
        pool: &PgPool,
        scope: AssessmentScope,
    ) -> Result<Vec<AssessmentQuestion>, DatabaseError> {
        let (clause, id) = match scope {
            AssessmentScope::Module(id) => ("module_id", id),
            AssessmentScope::Section(id) => ("section_id", id),
        };

        let sql = format!(
            r#"
            SELECT id, question, options, correct_answer, module_id, section_id,
                   "order", created_at
            FROM assessment_questions
            WHERE {clause} = $1
            ORDER BY "order" ASC, id ASC
            "#
        );

        let questions = sqlx::query_as::<_, AssessmentQuestion>(&sql)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(questions)
    }

    pub async fn get_question(
        pool: &PgPool,
        question_id: Uuid,
    ) -> Result<Option<AssessmentQuestion>, DatabaseError> {
        let question = sqlx::query_as::<_, AssessmentQuestion>(
            r#"
            SELECT id, question, options, correct_answer, module_id, section_id,
                   "order", created_at
            FROM assessment_questions
            WHERE id = $1
            "#,
        )
        .bind(question_id)
        .fetch_optional(pool)
        .await?;

        Ok(question)
    }

    pub async fn create_question(
        pool: &PgPool,
        scope: AssessmentScope,
        new_question: &NewQuestion,
    ) -> Result<AssessmentQuestion, DatabaseError> {
        let (module_id, section_id) = match scope {
            AssessmentScope::Module(id) => (Some(id), None),
            AssessmentScope::Section(id) => (None, Some(id)),
        };

        let question = sqlx::query_as::<_, AssessmentQuestion>(
            r#"
            INSERT INTO assessment_questions (question, options, correct_answer, module_id, section_id, "order")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, question, options, correct_answer, module_id, section_id,
                      "order", created_at
            "#,
        )
        .bind(&new_question.question)
        .bind(Json(&new_question.options))
        .bind(&new_question.correct_answer)
        .bind(module_id)
        .bind(section_id)
        .bind(new_question.order)
        .fetch_one(pool)
        .await?;

        Ok(question)
    }

    pub async fn update_question(
        pool: &PgPool,
        question_id: Uuid,
        update: &UpdateQuestion,
    ) -> Result<AssessmentQuestion, DatabaseError> {
        let question = sqlx::query_as::<_, AssessmentQuestion>(
            r#"
            UPDATE assessment_questions
            SET question = COALESCE($1, question),
                options = COALESCE($2, options),
                correct_answer = COALESCE($3, correct_answer),
                "order" = COALESCE($4, "order")
            WHERE id = $5
            RETURNING id, question, options, correct_answer, module_id, section_id,
                      "order", created_at
            "#,
        )
        .bind(&update.question)
        .bind(update.options.as_ref().map(Json))
        .bind(&update.correct_answer)
        .bind(update.order)
        .bind(question_id)
        .fetch_one(pool)
        .await?;

        Ok(question)
    }

    pub async fn delete_question(pool: &PgPool, question_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM assessment_questions WHERE id = $1")
            .bind(question_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    // Results (append-only attempt history)

    pub async fn insert_result(
        pool: &PgPool,
        user_id: Uuid,
        scope: AssessmentScope,
        outcome: &ScoreOutcome,
        answers: &HashMap<String, String>,
    ) -> Result<AssessmentResult, DatabaseError> {
        let (module_id, section_id) = match scope {
            AssessmentScope::Module(id) => (Some(id), None),
            AssessmentScope::Section(id) => (None, Some(id)),
        };

        let result = sqlx::query_as::<_, AssessmentResult>(
            r#"
            INSERT INTO assessment_results
                (user_id, module_id, section_id, score, total_questions, correct_answers, answers, passed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, module_id, section_id, score, total_questions,
                      correct_answers, answers, passed, certificate_generated, date_taken
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .bind(section_id)
        .bind(outcome.score)
        .bind(outcome.total_questions as i32)
        .bind(outcome.correct_answers as i32)
        .bind(Json(answers))
        .bind(outcome.passed)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    pub async fn get_result(
        pool: &PgPool,
        result_id: Uuid,
    ) -> Result<Option<AssessmentResult>, DatabaseError> {
        let result = sqlx::query_as::<_, AssessmentResult>(
            r#"
            SELECT id, user_id, module_id, section_id, score, total_questions,
                   correct_answers, answers, passed, certificate_generated, date_taken
            FROM assessment_results
            WHERE id = $1
            "#,
        )
        .bind(result_id)
        .fetch_optional(pool)
        .await?;

        Ok(result)
    }

    pub async fn results_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<AssessmentResult>, DatabaseError> {
        let results = sqlx::query_as::<_, AssessmentResult>(
            r#"
            SELECT id, user_id, module_id, section_id, score, total_questions,
                   correct_answers, answers, passed, certificate_generated, date_taken
            FROM assessment_results
            WHERE user_id = $1
            ORDER BY date_taken DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(results)
    }

    pub async fn latest_for_user_section(
        pool: &PgPool,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Option<AssessmentResult>, DatabaseError> {
        let result = sqlx::query_as::<_, AssessmentResult>(
            r#"
            SELECT id, user_id, module_id, section_id, score, total_questions,
                   correct_answers, answers, passed, certificate_generated, date_taken
            FROM assessment_results
            WHERE user_id = $1 AND section_id = $2
            ORDER BY date_taken DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(section_id)
        .fetch_optional(pool)
        .await?;

        Ok(result)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<AssessmentResult>, DatabaseError> {
        let results = sqlx::query_as::<_, AssessmentResult>(
            r#"
            SELECT id, user_id, module_id, section_id, score, total_questions,
                   correct_answers, answers, passed, certificate_generated, date_taken
            FROM assessment_results
            ORDER BY date_taken DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(results)
    }

    /// The one sanctioned mutation of a persisted attempt.
    pub async fn mark_certificate_generated(
        pool: &PgPool,
        result_id: Uuid,
    ) -> Result<AssessmentResult, DatabaseError> {
        let result = sqlx::query_as::<_, AssessmentResult>(
            r#"
            UPDATE assessment_results
            SET certificate_generated = true
            WHERE id = $1
            RETURNING id, user_id, module_id, section_id, score, total_questions,
                      correct_answers, answers, passed, certificate_generated, date_taken
            "#,
        )
        .bind(result_id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    pub async fn delete_results_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM assessment_results WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
