//! # Student Lookup Handler
//!
//! Identity lookup backing the booking form's student-number check. A
//! missing number is a normal 404; an infrastructure failure is a 500-class
//! error, so the client can show "try again later" instead of implying the
//! number is wrong.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;

use slotbook_core::errors::SlotError;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLookupResponse {
    pub student_number: String,
    pub full_name: String,
}

#[axum::debug_handler]
pub async fn lookup_student(
    State(state): State<Arc<ApiState>>,
    Path(student_number): Path<String>,
) -> Result<Json<StudentLookupResponse>, AppError> {
    let student =
        slotbook_db::repositories::student::get_student_by_number(&state.db_pool, &student_number)
            .await
            .map_err(SlotError::Database)?
            .ok_or_else(|| {
                SlotError::NotFound(format!("No student on file for number {student_number}"))
            })?;

    Ok(Json(StudentLookupResponse {
        student_number: student.student_number,
        full_name: student.full_name,
    }))
}
