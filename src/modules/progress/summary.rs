use std::collections::HashSet;
use uuid::Uuid;

use crate::db::models::{ProgressStatus, ProgressSummary};
use crate::modules::assessments::scoring::percentage;

/// Fold a learner's progress rows into the aggregate summary.
///
/// A module with no progress row is not started; that state and an explicit
/// `not_started` row are two encodings of the same thing and must land in the
/// same bucket. The absent set is computed as a set difference over module
/// ids, so `completed + in_progress + not_started == total` holds always.
pub fn summarize(module_ids: &[Uuid], rows: &[(Uuid, ProgressStatus)]) -> ProgressSummary {
    let total_modules = module_ids.len();

    let mut completed_modules = 0;
    let mut in_progress_modules = 0;
    let mut not_started_modules = 0;

    for (_, status) in rows {
        match status {
            ProgressStatus::Completed => completed_modules += 1,
            ProgressStatus::InProgress => in_progress_modules += 1,
            ProgressStatus::NotStarted => not_started_modules += 1,
        }
    }

    let tracked: HashSet<Uuid> = rows.iter().map(|(module_id, _)| *module_id).collect();
    not_started_modules += module_ids
        .iter()
        .filter(|id| !tracked.contains(id))
        .count();

    ProgressSummary {
        total_modules,
        completed_modules,
        in_progress_modules,
        not_started_modules,
        overall_completion_rate: percentage(completed_modules, total_modules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn absent_rows_count_as_not_started() {
        let modules = ids(10);
        let rows: Vec<(Uuid, ProgressStatus)> = vec![
            (modules[0], ProgressStatus::Completed),
            (modules[1], ProgressStatus::Completed),
            (modules[2], ProgressStatus::Completed),
            (modules[3], ProgressStatus::InProgress),
            (modules[4], ProgressStatus::InProgress),
        ];

        let summary = summarize(&modules, &rows);
        assert_eq!(
            summary,
            ProgressSummary {
                total_modules: 10,
                completed_modules: 3,
                in_progress_modules: 2,
                not_started_modules: 5,
                overall_completion_rate: 30,
            }
        );
    }

    #[test]
    fn explicit_and_absent_not_started_merge() {
        let modules = ids(4);
        let rows = vec![
            (modules[0], ProgressStatus::NotStarted),
            (modules[1], ProgressStatus::Completed),
        ];

        let summary = summarize(&modules, &rows);
        assert_eq!(summary.not_started_modules, 3);
        assert_eq!(
            summary.completed_modules + summary.in_progress_modules + summary.not_started_modules,
            summary.total_modules
        );
    }

    #[test]
    fn no_modules_yields_zero_rate() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_modules, 0);
        assert_eq!(summary.overall_completion_rate, 0);
    }

    #[test]
    fn completion_rate_rounds_half_up() {
        let modules = ids(3);
        let rows = vec![(modules[0], ProgressStatus::Completed)];
        // 1/3 completed → 33.
        assert_eq!(summarize(&modules, &rows).overall_completion_rate, 33);
    }
}
