//! HTTP API module for the Payroll Engine.
//!
//! Exposes `GET /payroll`, which computes net pay for a gross pay, a number
//! of dependents and two optional discounts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollQuery, PayrollRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
