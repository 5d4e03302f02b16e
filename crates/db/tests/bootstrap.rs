use sqlx::PgPool;

/// Connect, migrate, verify the schema is in place.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    tracker_db::health_check(&pool).await.unwrap();

    let tables = [
        "categories",
        "pms",
        "projects",
        "steps",
        "subtasks",
        "project_characteristics",
        "attachments",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Status columns only accept known names.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_check_constraints(pool: PgPool) {
    let category: (i64,) = sqlx::query_as("INSERT INTO categories (name) VALUES ('C') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();

    let bad_project =
        sqlx::query("INSERT INTO projects (category_id, name, status) VALUES ($1, 'P', 'paused')")
            .bind(category.0)
            .execute(&pool)
            .await;
    assert!(bad_project.is_err(), "unknown project status must be rejected");

    let bad_coeff = sqlx::query(
        "INSERT INTO projects (category_id, name, inprogress_coeff) VALUES ($1, 'P', 1.5)",
    )
    .bind(category.0)
    .execute(&pool)
    .await;
    assert!(bad_coeff.is_err(), "coefficient above 1 must be rejected");
}
