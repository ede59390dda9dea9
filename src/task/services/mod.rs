//! Application services for task lifecycle orchestration.

mod insights;
mod lifecycle;
mod requests;

pub use insights::{
    AdminDashboard, EmployeeDashboard, EmployeeWorkload, TaskAnalytics, TaskInsightsService,
};
pub use lifecycle::{BulkOutcome, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use requests::{CreateTaskRequest, SubmitTaskRequest, TaskFilter, UpdateTaskRequest};
