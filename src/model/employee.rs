use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "nik": "G-0451",
        "full_name": "Budi Santoso",
        "branch_code": "JKT01",
        "department_code": "SECURITY",
        "default_shift_code": "P",
        "schedule_is_locked": true,
        "location_is_locked": true
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// Employee identity number, unique across the company.
    #[schema(example = "G-0451")]
    pub nik: String,

    #[schema(example = "Budi Santoso")]
    pub full_name: String,

    #[schema(example = "JKT01")]
    pub branch_code: String,

    #[schema(example = "SECURITY")]
    pub department_code: String,

    /// Last-resort shift code when no schedule source applies.
    #[schema(example = "P", nullable = true)]
    pub default_shift_code: Option<String>,

    /// When false, attendance windows are not enforced for this employee.
    #[schema(example = true)]
    pub schedule_is_locked: bool,

    /// When false, out-of-radius clocking is tolerated.
    #[schema(example = true)]
    pub location_is_locked: bool,
}
