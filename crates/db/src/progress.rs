//! Attach computed progress to loaded rows.
//!
//! Repositories load plain rows; the functions here group them by parent
//! and run the aggregator from `tracker_core::progress` over them. Progress
//! is never written back to the database.

use std::collections::HashMap;

use tracker_core::ordering::{sort_canonical, Ordered};
use tracker_core::progress::{
    category_progress, project_progress, step_progress, KpiSource, ProjectProgress, StepRollup,
    Weighted,
};
use tracker_core::types::DbId;

use crate::models::attachment::Attachment;
use crate::models::category::{Category, CategoryDetail, CategoryWithProgress};
use crate::models::characteristic::Characteristic;
use crate::models::project::{Project, ProjectDetail, ProjectSummary};
use crate::models::step::{Step, StepDetail};
use crate::models::subtask::Subtask;

impl Weighted for Subtask {
    fn status(&self) -> &str {
        &self.status
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

impl Ordered for Step {
    fn id(&self) -> DbId {
        self.id
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }
}

impl Ordered for Subtask {
    fn id(&self) -> DbId {
        self.id
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }
}

impl KpiSource for ProjectSummary {
    fn category_id(&self) -> DbId {
        self.project.category_id
    }

    fn project_status(&self) -> &str {
        &self.project.status
    }

    fn progress(&self) -> &ProjectProgress {
        &self.progress
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Pair each step with its subtasks and compute per-step figures.
///
/// `subtasks` may contain rows for other steps; they are ignored. Both
/// steps and subtasks come back in canonical `(order_index, id)` order.
pub fn build_step_details(
    mut steps: Vec<Step>,
    subtasks: Vec<Subtask>,
    inprogress_coeff: f64,
) -> (Vec<StepDetail>, Vec<StepRollup>) {
    sort_canonical(&mut steps);
    let mut by_step = group_by(subtasks, |s| s.step_id);

    let mut details = Vec::with_capacity(steps.len());
    let mut rollups = Vec::with_capacity(steps.len());
    for step in steps {
        let mut subtasks = by_step.remove(&step.id).unwrap_or_default();
        sort_canonical(&mut subtasks);
        let rollup = StepRollup::compute(&step.status, step.weight, &subtasks, inprogress_coeff);
        rollups.push(rollup);
        details.push(StepDetail {
            step,
            progress_percent: rollup.progress_percent,
            subtasks,
            attachments: Vec::new(),
        });
    }
    (details, rollups)
}

/// Progress of a single step given its own subtasks.
pub fn step_detail(step: Step, mut subtasks: Vec<Subtask>, inprogress_coeff: f64) -> StepDetail {
    sort_canonical(&mut subtasks);
    StepDetail {
        progress_percent: step_progress(&step.status, &subtasks, inprogress_coeff),
        step,
        subtasks,
        attachments: Vec::new(),
    }
}

/// Hand each step detail the attachments recorded against it.
///
/// Rows without a `step_id`, or for steps not in `details`, are dropped.
pub fn attach_step_files(details: &mut [StepDetail], attachments: Vec<Attachment>) {
    let mut by_step: HashMap<DbId, Vec<Attachment>> = HashMap::new();
    for attachment in attachments {
        if let Some(step_id) = attachment.step_id {
            by_step.entry(step_id).or_default().push(attachment);
        }
    }
    for detail in details {
        detail.attachments = by_step.remove(&detail.step.id).unwrap_or_default();
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Recompute every derived figure on a loaded project detail.
///
/// Steps and subtasks are put into canonical order, each step's
/// `progress_percent` is refreshed, and the project totals are rebuilt.
pub fn apply_progress(mut detail: ProjectDetail) -> ProjectDetail {
    let coeff = detail.project.inprogress_coeff;
    detail
        .steps
        .sort_by_key(|d| (d.step.order_index, d.step.id));

    let rollups: Vec<StepRollup> = detail
        .steps
        .iter_mut()
        .map(|d| {
            sort_canonical(&mut d.subtasks);
            let rollup = StepRollup::compute(&d.step.status, d.step.weight, &d.subtasks, coeff);
            d.progress_percent = rollup.progress_percent;
            rollup
        })
        .collect();

    detail.progress = project_progress(&rollups);
    detail
}

/// Assemble a project detail from loaded rows and compute its progress.
///
/// `subtasks` and `step_attachments` may span several steps; each row is
/// attached to its own step. `attachments` are the project-level files.
pub fn assemble_detail(
    project: Project,
    steps: Vec<Step>,
    subtasks: Vec<Subtask>,
    characteristics: Vec<Characteristic>,
    attachments: Vec<Attachment>,
    step_attachments: Vec<Attachment>,
) -> ProjectDetail {
    let mut by_step = group_by(subtasks, |s| s.step_id);
    let mut steps: Vec<StepDetail> = steps
        .into_iter()
        .map(|step| StepDetail {
            subtasks: by_step.remove(&step.id).unwrap_or_default(),
            progress_percent: 0,
            attachments: Vec::new(),
            step,
        })
        .collect();
    attach_step_files(&mut steps, step_attachments);

    apply_progress(ProjectDetail {
        project,
        progress: ProjectProgress::default(),
        steps,
        characteristics,
        attachments,
    })
}

/// Progress figures and step details for one project.
pub fn summarize_project(
    project: &Project,
    steps: Vec<Step>,
    subtasks: Vec<Subtask>,
) -> (ProjectProgress, Vec<StepDetail>) {
    let (details, rollups) = build_step_details(steps, subtasks, project.inprogress_coeff);
    (project_progress(&rollups), details)
}

/// Compute progress for a batch of projects from their steps and subtasks.
///
/// Projects keep the order they were passed in.
pub fn summarize_projects(
    projects: Vec<Project>,
    steps: Vec<Step>,
    subtasks: Vec<Subtask>,
) -> Vec<ProjectSummary> {
    let mut steps_by_project = group_by(steps, |s| s.project_id);
    let mut subtasks_by_step = group_by(subtasks, |s| s.step_id);

    projects
        .into_iter()
        .map(|project| {
            let steps = steps_by_project.remove(&project.id).unwrap_or_default();
            let subtasks: Vec<Subtask> = steps
                .iter()
                .flat_map(|step| subtasks_by_step.remove(&step.id).unwrap_or_default())
                .collect();
            let (_, rollups) = build_step_details(steps, subtasks, project.inprogress_coeff);
            ProjectSummary {
                progress: project_progress(&rollups),
                project,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Attach project counts and progress to each category.
pub fn categories_with_progress(
    categories: Vec<Category>,
    projects: &[ProjectSummary],
) -> Vec<CategoryWithProgress> {
    let mut percents: HashMap<DbId, Vec<i32>> = HashMap::new();
    for summary in projects {
        percents
            .entry(summary.project.category_id)
            .or_default()
            .push(summary.progress.progress_percent);
    }

    categories
        .into_iter()
        .map(|category| {
            let members = percents.remove(&category.id).unwrap_or_default();
            CategoryWithProgress {
                projects_count: members.len() as i64,
                progress_percent: category_progress(&members),
                category,
            }
        })
        .collect()
}

/// Build a category detail from its member projects.
pub fn category_detail(category: Category, projects: Vec<ProjectSummary>) -> CategoryDetail {
    let percents: Vec<i32> = projects
        .iter()
        .map(|p| p.progress.progress_percent)
        .collect();
    CategoryDetail {
        category,
        progress_percent: category_progress(&percents),
        projects,
    }
}

fn group_by<T>(items: Vec<T>, key: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut groups: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn project(id: DbId, category_id: DbId, coeff: f64) -> Project {
        let now = Utc::now();
        Project {
            id,
            category_id,
            name: format!("Project {id}"),
            code: None,
            status: "active".into(),
            owner_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            target_date: None,
            description: None,
            inprogress_coeff: coeff,
            moq: None,
            base_price: None,
            retail_price: None,
            cover_image: None,
            media_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn step(id: DbId, project_id: DbId, status: &str, order_index: i32, weight: f64) -> Step {
        let now = Utc::now();
        Step {
            id,
            project_id,
            name: format!("Step {id}"),
            description: None,
            status: status.into(),
            assignee_id: None,
            start_date: None,
            target_date: None,
            completed_date: None,
            order_index,
            weight,
            comments: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn subtask(id: DbId, step_id: DbId, status: &str, weight: f64) -> Subtask {
        let now = Utc::now();
        Subtask {
            id,
            step_id,
            name: format!("Subtask {id}"),
            status: status.into(),
            weight,
            target_date: None,
            completed_date: None,
            order_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn step_details_follow_canonical_order() {
        let steps = vec![
            step(2, 1, "todo", 1, 1.0),
            step(1, 1, "done", 1, 1.0),
            step(3, 1, "todo", 0, 1.0),
        ];
        let (details, _) = build_step_details(steps, vec![], 0.5);
        let ids: Vec<DbId> = details.iter().map(|d| d.step.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn subtasks_attach_to_their_step() {
        let steps = vec![step(1, 1, "todo", 0, 1.0), step(2, 1, "todo", 1, 1.0)];
        let subtasks = vec![
            subtask(10, 1, "done", 2.0),
            subtask(11, 1, "in_progress", 1.0),
            subtask(12, 1, "blocked", 1.0),
            subtask(20, 2, "done", 1.0),
        ];
        let (details, rollups) = build_step_details(steps, subtasks, 0.5);
        assert_eq!(details[0].subtasks.len(), 3);
        assert_eq!(details[0].progress_percent, 62);
        assert_eq!(details[1].progress_percent, 100);
        assert_eq!(rollups[1].subtasks_done, 1);
    }

    #[test]
    fn projects_summarize_independently() {
        let projects = vec![project(1, 1, 0.4), project(2, 1, 0.5)];
        let steps = vec![
            step(1, 1, "done", 0, 2.0),
            step(2, 1, "in_progress", 1, 1.0),
            step(3, 2, "in_progress", 0, 1.0),
        ];
        let subtasks = vec![subtask(1, 2, "done", 1.0), subtask(2, 2, "in_progress", 1.0)];

        let summaries = summarize_projects(projects, steps, subtasks);
        assert_eq!(summaries[0].progress.progress_percent, 90);
        assert_eq!(summaries[0].progress.steps_done, 1);
        assert_eq!(summaries[1].progress.progress_percent, 50);
        assert_eq!(summaries[1].progress.subtasks_total, 0);
    }

    #[test]
    fn apply_progress_refreshes_stale_figures() {
        let detail = ProjectDetail {
            project: project(1, 1, 0.5),
            progress: ProjectProgress::default(),
            steps: vec![
                StepDetail {
                    step: step(2, 1, "todo", 1, 1.0),
                    progress_percent: 0,
                    subtasks: vec![subtask(5, 2, "done", 1.0), subtask(4, 2, "in_progress", 1.0)],
                    attachments: vec![],
                },
                StepDetail {
                    step: step(1, 1, "done", 0, 1.0),
                    progress_percent: 0,
                    subtasks: vec![],
                    attachments: vec![],
                },
            ],
            characteristics: vec![],
            attachments: vec![],
        };

        let detail = apply_progress(detail);
        assert_eq!(detail.steps[0].step.id, 1);
        assert_eq!(detail.steps[0].progress_percent, 100);
        assert_eq!(detail.steps[1].progress_percent, 75);
        assert_eq!(detail.steps[1].subtasks[0].id, 4);
        assert_eq!(detail.progress.progress_percent, 88);
        assert_eq!(detail.progress.steps_done, 1);
        assert_eq!(detail.progress.subtasks_total, 2);
    }

    fn attachment(id: DbId, project_id: Option<DbId>, step_id: Option<DbId>) -> Attachment {
        Attachment {
            id,
            project_id,
            step_id,
            path: format!("files/{id}.pdf"),
            added_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn step_files_land_on_their_step() {
        let detail = assemble_detail(
            project(1, 1, 0.5),
            vec![step(1, 1, "todo", 0, 1.0), step(2, 1, "todo", 1, 1.0)],
            vec![],
            vec![],
            vec![attachment(1, Some(1), None)],
            vec![attachment(2, None, Some(2)), attachment(3, Some(1), Some(2))],
        );
        assert_eq!(detail.attachments.len(), 1);
        assert!(detail.steps[0].attachments.is_empty());
        let ids: Vec<DbId> = detail.steps[1].attachments.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn categories_average_member_projects() {
        let now = Utc::now();
        let categories = vec![
            Category { id: 1, name: "Kitchen".into(), created_at: now, updated_at: now },
            Category { id: 2, name: "Empty".into(), created_at: now, updated_at: now },
        ];
        let projects = vec![
            ProjectSummary {
                project: project(1, 1, 0.5),
                progress: ProjectProgress { progress_percent: 90, ..Default::default() },
            },
            ProjectSummary {
                project: project(2, 1, 0.5),
                progress: ProjectProgress { progress_percent: 70, ..Default::default() },
            },
        ];

        let listed = categories_with_progress(categories, &projects);
        assert_eq!(listed[0].projects_count, 2);
        assert_eq!(listed[0].progress_percent, 80);
        assert_eq!(listed[1].projects_count, 0);
        assert_eq!(listed[1].progress_percent, 0);
    }
}
