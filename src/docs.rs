use crate::api::schedule::MonthlyScheduleResponse;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::model::policy::AttendanceWindowPolicy;
use crate::model::schedule::ScheduleSourceTag;
use crate::model::shift::ShiftDefinition;
use crate::scheduling::calendar::DayView;
use crate::scheduling::clock::CurrentStatus;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Absensi API",
        version = "1.0.0",
        description = r#"
## Workforce Attendance System

Shift-aware attendance backend for field personnel (guards, patrols,
office staff).

### 🔹 Key Features
- **Shift Resolution**
  - Five overlapping schedule sources resolved through one priority cascade
- **Attendance Tracking**
  - Clock-in / clock-out with grace windows and overnight ("lintas hari") shifts
- **Monthly Schedule**
  - Day-by-day projection merging schedule, attendance and leave

### 🔐 Security
Endpoints are protected with **JWT Bearer authentication** issued by the
company identity service.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::today_status,
        crate::api::attendance::get_policy,

        crate::api::schedule::monthly_schedule,
    ),
    components(
        schemas(
            Employee,
            ShiftDefinition,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceWindowPolicy,
            ScheduleSourceTag,
            CurrentStatus,
            DayView,
            MonthlyScheduleResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Clock-in / clock-out APIs"),
        (name = "Schedule", description = "Schedule projection APIs"),
    )
)]
pub struct ApiDoc;
