//! Progress aggregation.
//!
//! Progress flows bottom-up: subtask status -> step percent -> project
//! percent -> category percent / KPI report. Nothing here is persisted;
//! callers recompute on every read.
//!
//! Rounding is round-half-to-even at every level (62.5 -> 62, 63.5 -> 64)
//! so that results are bit-exact regardless of where they are computed.

use serde::Serialize;

use crate::status::{ProjectStatus, TaskStatus};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A weighted unit of work (a subtask, or a step seen from its project).
pub trait Weighted {
    /// Raw status name as stored.
    fn status(&self) -> &str;
    /// Relative contribution to the parent. Non-negative.
    fn weight(&self) -> f64;
}

/// A project as seen by the KPI report.
pub trait KpiSource {
    fn category_id(&self) -> DbId;
    /// Raw project status name as stored.
    fn project_status(&self) -> &str;
    /// Totals already computed for this project.
    fn progress(&self) -> &ProjectProgress;
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round to the nearest integer, ties to even.
pub fn round_percent(value: f64) -> i32 {
    value.round_ties_even() as i32
}

/// Round to two decimal places, ties to even.
pub fn round_two_places(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ---------------------------------------------------------------------------
// Status value
// ---------------------------------------------------------------------------

/// Fractional credit for a status.
///
/// `done` is always 1.0, `in_progress` earns `inprogress_coeff`, and every
/// other status (including unrecognized ones) earns nothing.
pub fn status_value(status: &str, inprogress_coeff: f64) -> f64 {
    match TaskStatus::from_name(status) {
        Ok(TaskStatus::Done) => 1.0,
        Ok(TaskStatus::InProgress) => inprogress_coeff,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Step progress
// ---------------------------------------------------------------------------

/// Integer percent (0-100) for a step.
///
/// With subtasks, the step's own status is ignored and the result is the
/// weighted mean of subtask values. A zero total subtask weight yields 0.
/// Without subtasks, the step's own status decides.
pub fn step_progress<T: Weighted>(
    step_status: &str,
    subtasks: &[T],
    inprogress_coeff: f64,
) -> i32 {
    if subtasks.is_empty() {
        return round_percent(status_value(step_status, inprogress_coeff) * 100.0);
    }

    let total_weight: f64 = subtasks.iter().map(Weighted::weight).sum();
    if total_weight <= 0.0 {
        return 0;
    }

    let earned: f64 = subtasks
        .iter()
        .map(|s| status_value(s.status(), inprogress_coeff) * s.weight())
        .sum();

    round_percent(earned / total_weight * 100.0)
}

/// Per-step figures needed by the project roll-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRollup {
    pub progress_percent: i32,
    pub weight: f64,
    pub subtasks_total: i64,
    pub subtasks_done: i64,
}

impl StepRollup {
    /// Compute a step's progress and subtask counts in one pass.
    pub fn compute<T: Weighted>(
        step_status: &str,
        step_weight: f64,
        subtasks: &[T],
        inprogress_coeff: f64,
    ) -> Self {
        let subtasks_done = subtasks
            .iter()
            .filter(|s| s.status() == TaskStatus::Done.name())
            .count() as i64;

        Self {
            progress_percent: step_progress(step_status, subtasks, inprogress_coeff),
            weight: step_weight,
            subtasks_total: subtasks.len() as i64,
            subtasks_done,
        }
    }
}

// ---------------------------------------------------------------------------
// Project progress
// ---------------------------------------------------------------------------

/// Computed project-level figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub progress_percent: i32,
    pub steps_total: i64,
    pub steps_done: i64,
    pub subtasks_total: i64,
    pub subtasks_done: i64,
}

/// Roll step figures up into project figures.
///
/// Steps are weighted by their `weight`. If every weight is zero the steps
/// count equally; with no steps the project is at 0. A step counts as done
/// only when its own percent reached 100, whatever its status says.
pub fn project_progress(steps: &[StepRollup]) -> ProjectProgress {
    if steps.is_empty() {
        return ProjectProgress::default();
    }

    let total_weight: f64 = steps.iter().map(|s| s.weight).sum();
    let progress_percent = if total_weight > 0.0 {
        let weighted: f64 = steps
            .iter()
            .map(|s| f64::from(s.progress_percent) * s.weight)
            .sum();
        round_percent(weighted / total_weight)
    } else {
        let sum: f64 = steps.iter().map(|s| f64::from(s.progress_percent)).sum();
        round_percent(sum / steps.len() as f64)
    };

    ProjectProgress {
        progress_percent,
        steps_total: steps.len() as i64,
        steps_done: steps.iter().filter(|s| s.progress_percent == 100).count() as i64,
        subtasks_total: steps.iter().map(|s| s.subtasks_total).sum(),
        subtasks_done: steps.iter().map(|s| s.subtasks_done).sum(),
    }
}

// ---------------------------------------------------------------------------
// Category progress & KPI
// ---------------------------------------------------------------------------

/// Unweighted mean of member project percents; 0 for an empty category.
pub fn category_progress(project_percents: &[i32]) -> i32 {
    if project_percents.is_empty() {
        return 0;
    }
    let sum: f64 = project_percents.iter().copied().map(f64::from).sum();
    round_percent(sum / project_percents.len() as f64)
}

/// Aggregate summary over a set of projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiReport {
    pub total_projects: i64,
    pub active_projects: i64,
    pub archived_projects: i64,
    pub average_progress: f64,
    pub steps_total: i64,
    pub steps_done: i64,
    pub subtasks_total: i64,
    pub subtasks_done: i64,
}

/// Build a KPI report, optionally restricted to one category.
///
/// Step and subtask totals are summed from each project's precomputed
/// [`ProjectProgress`], not recounted.
pub fn kpi_report<T: KpiSource>(projects: &[T], category_id: Option<DbId>) -> KpiReport {
    let included: Vec<&T> = projects
        .iter()
        .filter(|p| category_id.map_or(true, |c| p.category_id() == c))
        .collect();

    let mut report = KpiReport {
        total_projects: included.len() as i64,
        ..KpiReport::default()
    };

    let mut percent_sum = 0.0;
    for project in &included {
        match ProjectStatus::from_name(project.project_status()) {
            Ok(ProjectStatus::Active) => report.active_projects += 1,
            Ok(ProjectStatus::Archived) => report.archived_projects += 1,
            Err(_) => {}
        }
        let progress = project.progress();
        percent_sum += f64::from(progress.progress_percent);
        report.steps_total += progress.steps_total;
        report.steps_done += progress.steps_done;
        report.subtasks_total += progress.subtasks_total;
        report.subtasks_done += progress.subtasks_done;
    }

    if !included.is_empty() {
        report.average_progress = round_two_places(percent_sum / included.len() as f64);
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
