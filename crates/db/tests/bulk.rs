//! Integration tests for all-or-nothing bulk delete and status updates.

use sqlx::PgPool;
use tracker_core::status::{ProjectStatus, TaskStatus};
use tracker_db::models::bulk::{BulkOutcome, BulkResult};
use tracker_db::models::category::CreateCategory;
use tracker_db::models::project::CreateProject;
use tracker_db::models::step::CreateStep;
use tracker_db::models::subtask::CreateSubtask;
use tracker_db::repositories::{CategoryRepo, ProjectRepo, StepRepo, SubtaskRepo};

async fn seed_projects(pool: &PgPool, count: usize) -> Vec<i64> {
    let category = CategoryRepo::create(pool, &CreateCategory { name: "Bulk".into() })
        .await
        .unwrap();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let input = CreateProject {
            category_id: category.id,
            name: format!("Project {i}"),
            code: None,
            status: None,
            owner_id: None,
            start_date: None,
            target_date: None,
            description: None,
            inprogress_coeff: None,
            moq: None,
            base_price: None,
            retail_price: None,
            cover_image: None,
            media_path: None,
        };
        ids.push(ProjectRepo::create(pool, &input).await.unwrap().id);
    }
    ids
}

fn step_named(name: &str) -> CreateStep {
    CreateStep {
        name: name.to_string(),
        description: None,
        status: None,
        assignee_id: None,
        start_date: None,
        target_date: None,
        completed_date: None,
        order_index: None,
        weight: None,
        comments: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_projects(pool: PgPool) {
    let ids = seed_projects(&pool, 3).await;

    let outcome = ProjectRepo::bulk_delete(&pool, &ids[..2]).await.unwrap();
    assert_eq!(outcome, BulkOutcome::Applied(BulkResult { affected: 2 }));

    assert!(ProjectRepo::find_by_id(&pool, ids[0]).await.unwrap().is_none());
    assert!(ProjectRepo::find_by_id(&pool, ids[1]).await.unwrap().is_none());
    assert!(ProjectRepo::find_by_id(&pool, ids[2]).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_with_unknown_id_deletes_nothing(pool: PgPool) {
    let ids = seed_projects(&pool, 2).await;

    let outcome = ProjectRepo::bulk_delete(&pool, &[ids[0], ids[1], 999_999])
        .await
        .unwrap();
    assert_eq!(outcome, BulkOutcome::UnknownIds(vec![999_999]));

    for id in ids {
        assert!(ProjectRepo::find_by_id(&pool, id).await.unwrap().is_some());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_project_status(pool: PgPool) {
    let ids = seed_projects(&pool, 2).await;

    let outcome = ProjectRepo::bulk_update_status(&pool, &ids, ProjectStatus::Archived)
        .await
        .unwrap();
    assert_eq!(outcome, BulkOutcome::Applied(BulkResult { affected: 2 }));

    for id in ids {
        let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(project.status, "archived");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_step_status_is_all_or_nothing(pool: PgPool) {
    let project_id = seed_projects(&pool, 1).await[0];
    let a = StepRepo::create(&pool, project_id, &step_named("A")).await.unwrap();
    let b = StepRepo::create(&pool, project_id, &step_named("B")).await.unwrap();

    let rejected = StepRepo::bulk_update_status(&pool, &[a.id, 424_242], TaskStatus::Done)
        .await
        .unwrap();
    assert_eq!(rejected, BulkOutcome::UnknownIds(vec![424_242]));
    let a_after = StepRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(a_after.status, "todo");

    let applied = StepRepo::bulk_update_status(&pool, &[a.id, b.id], TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(applied, BulkOutcome::Applied(BulkResult { affected: 2 }));
    let b_after = StepRepo::find_by_id(&pool, b.id).await.unwrap().unwrap();
    assert_eq!(b_after.status, "in_progress");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_subtasks(pool: PgPool) {
    let project_id = seed_projects(&pool, 1).await[0];
    let step = StepRepo::create(&pool, project_id, &step_named("S")).await.unwrap();
    let mut ids = Vec::new();
    for name in ["a", "b"] {
        let input = CreateSubtask {
            name: name.to_string(),
            status: None,
            weight: None,
            target_date: None,
            completed_date: None,
            order_index: None,
        };
        ids.push(SubtaskRepo::create(&pool, step.id, &input).await.unwrap().id);
    }

    let outcome = SubtaskRepo::bulk_delete(&pool, &ids).await.unwrap();
    assert_eq!(outcome, BulkOutcome::Applied(BulkResult { affected: 2 }));
    assert!(SubtaskRepo::list_by_step(&pool, step.id).await.unwrap().is_empty());
}
