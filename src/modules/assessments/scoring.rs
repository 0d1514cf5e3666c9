use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::models::{AssessmentQuestion, AssessmentResult};
use crate::db::repositories::AssessmentRepository;
use crate::error::AppResult;

/// Fixed pass threshold; not configurable per module or section.
pub const PASS_THRESHOLD: i32 = 80;

/// Letter codes stored in `correct_answer`, in index order.
const ANSWER_LETTERS: [&str; 4] = ["a", "b", "c", "d"];

/// The set of questions an attempt is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentScope {
    Module(Uuid),
    Section(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: i32,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub passed: bool,
}

/// Unknown letters fall back to the first option, matching the stored data's
/// legacy behavior.
fn letter_to_index(letter: &str) -> usize {
    ANSWER_LETTERS
        .iter()
        .position(|l| *l == letter)
        .unwrap_or(0)
}

/// The submission forms accepted as correct for one question, all derived
/// from the single letter→index table: the stored letter code, the decimal
/// string of the zero-based index, and the option text at that index.
/// Clients have historically submitted any of the three.
fn accepted_forms(question: &AssessmentQuestion) -> Vec<&str> {
    let index = letter_to_index(&question.correct_answer);
    let mut forms = vec![question.correct_answer.as_str(), ANSWER_INDEX_STRINGS[index]];
    if let Some(text) = question.options.0.get(index) {
        forms.push(text.as_str());
    }
    forms
}

const ANSWER_INDEX_STRINGS: [&str; 4] = ["0", "1", "2", "3"];

fn is_correct(question: &AssessmentQuestion, submitted: &str) -> bool {
    accepted_forms(question).iter().any(|form| *form == submitted)
}

/// Integer percentage, round half up. 1/3 → 33, 1/8 → 13, 3/4 → 75.
/// Zero total yields zero rather than a division error.
pub fn percentage(part: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as i32
}

/// Score a submitted answer map against the scope's questions. Questions
/// without a submission count incorrect; submissions for unknown question ids
/// are ignored. Each question contributes at most one point.
pub fn score_answers(
    questions: &[AssessmentQuestion],
    submitted: &HashMap<String, String>,
) -> ScoreOutcome {
    let total_questions = questions.len();
    let correct_answers = questions
        .iter()
        .filter(|q| {
            submitted
                .get(&q.id.to_string())
                .is_some_and(|answer| is_correct(q, answer))
        })
        .count();

    let score = percentage(correct_answers, total_questions);

    ScoreOutcome {
        score,
        total_questions,
        correct_answers,
        passed: score >= PASS_THRESHOLD,
    }
}

/// Score one attempt and persist it. Every submission appends a new result
/// row; prior attempts are never touched, and progress is left to the caller.
pub async fn score_submission(
    pool: &PgPool,
    user_id: Uuid,
    scope: AssessmentScope,
    submitted: HashMap<String, String>,
) -> AppResult<AssessmentResult> {
    let questions = AssessmentRepository::questions_for_scope(pool, scope).await?;
    let outcome = score_answers(&questions, &submitted);

    let result =
        AssessmentRepository::insert_result(pool, user_id, scope, &outcome, &submitted).await?;

    tracing::info!(
        user_id = %user_id,
        score = outcome.score,
        passed = outcome.passed,
        total = outcome.total_questions,
        "Assessment attempt recorded"
    );

    Ok(result)
}

/// A stored answer key must be a known letter that indexes into the options.
pub fn validate_answer_key(correct_answer: &str, options: &[String]) -> Result<(), String> {
    let Some(index) = ANSWER_LETTERS.iter().position(|l| *l == correct_answer) else {
        return Err(format!(
            "correct_answer must be one of a-d, got {:?}",
            correct_answer
        ));
    };
    if index >= options.len() {
        return Err(format!(
            "correct_answer {:?} does not index into {} options",
            correct_answer,
            options.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;
    use time::OffsetDateTime;

    fn question(id: Uuid, options: &[&str], correct: &str) -> AssessmentQuestion {
        AssessmentQuestion {
            id,
            question: "q".to_string(),
            options: Json(options.iter().map(|s| s.to_string()).collect()),
            correct_answer: correct.to_string(),
            module_id: None,
            section_id: Some(Uuid::new_v4()),
            order: 0,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn submit(pairs: &[(Uuid, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(id, v)| (id.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn accepts_letter_index_and_text_forms() {
        let id = Uuid::new_v4();
        let q = question(id, &["Red", "Blue", "Green"], "b");

        for form in ["b", "1", "Blue"] {
            let outcome = score_answers(std::slice::from_ref(&q), &submit(&[(id, form)]));
            assert_eq!(outcome.correct_answers, 1, "form {:?} should match", form);
        }

        for wrong in ["a", "0", "Red", "blue", "B", ""] {
            let outcome = score_answers(std::slice::from_ref(&q), &submit(&[(id, wrong)]));
            assert_eq!(outcome.correct_answers, 0, "form {:?} should not match", wrong);
        }
    }

    #[test]
    fn unknown_stored_letter_falls_back_to_first_option() {
        let id = Uuid::new_v4();
        let q = question(id, &["Red", "Blue"], "z");

        let outcome = score_answers(std::slice::from_ref(&q), &submit(&[(id, "Red")]));
        assert_eq!(outcome.correct_answers, 1);
        let outcome = score_answers(std::slice::from_ref(&q), &submit(&[(id, "0")]));
        assert_eq!(outcome.correct_answers, 1);
    }

    #[test]
    fn missing_and_unknown_submissions_are_tolerated() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let questions = vec![question(a, &["x", "y"], "a"), question(b, &["x", "y"], "b")];

        // One answered, one missing, one stray id: 1/2 correct.
        let mut submitted = submit(&[(a, "x"), (Uuid::new_v4(), "y")]);
        submitted.insert("not-a-uuid".to_string(), "x".to_string());

        let outcome = score_answers(&questions, &submitted);
        assert_eq!(outcome.total_questions, 2);
        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.score, 50);
        assert!(!outcome.passed);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 4), 75);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 2), 50);
    }

    #[test]
    fn zero_questions_score_zero_and_fail() {
        let outcome = score_answers(&[], &HashMap::new());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.total_questions, 0);
        assert!(!outcome.passed);
    }

    #[test]
    fn pass_threshold_is_exact() {
        // 11/14 → 79: just under the bar.
        let questions: Vec<AssessmentQuestion> = (0..14)
            .map(|_| question(Uuid::new_v4(), &["x", "y"], "a"))
            .collect();
        let submitted = submit(
            &questions[..11]
                .iter()
                .map(|q| (q.id, "x"))
                .collect::<Vec<_>>(),
        );
        let outcome = score_answers(&questions, &submitted);
        assert_eq!(outcome.score, 79);
        assert!(!outcome.passed);

        // 4/5 → 80: exactly at the bar.
        let questions: Vec<AssessmentQuestion> = (0..5)
            .map(|_| question(Uuid::new_v4(), &["x", "y"], "a"))
            .collect();
        let submitted = submit(
            &questions[..4]
                .iter()
                .map(|q| (q.id, "x"))
                .collect::<Vec<_>>(),
        );
        let outcome = score_answers(&questions, &submitted);
        assert_eq!(outcome.score, 80);
        assert!(outcome.passed);
    }

    #[test]
    fn answer_key_validation() {
        let options = vec!["x".to_string(), "y".to_string()];
        assert!(validate_answer_key("a", &options).is_ok());
        assert!(validate_answer_key("b", &options).is_ok());
        assert!(validate_answer_key("c", &options).is_err());
        assert!(validate_answer_key("e", &options).is_err());
    }
}
