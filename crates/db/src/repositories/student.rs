use crate::models::DbStudent;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_student_by_number(
    pool: &Pool<Postgres>,
    student_number: &str,
) -> Result<Option<DbStudent>> {
    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT student_number, full_name, created_at
        FROM students
        WHERE student_number = $1
        "#,
    )
    .bind(student_number)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}
