use crate::error::DashboardUpdaterError;
use once_cell::sync::Lazy;
use rusoto_core::Region;
use std::env;

pub const STACK_NAME_VAR: &str = "STACK_NAME";
const LAMBDA_RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";
const DEFAULT_LOG_FILTER: &str = "info";

/// Region of the current session, resolved from `AWS_DEFAULT_REGION` / `AWS_REGION`.
pub static REGION: Lazy<Region> = Lazy::new(Region::default);

pub fn region_name() -> &'static str {
    REGION.name()
}

pub fn is_lambda_environment() -> bool {
    env::var_os(LAMBDA_RUNTIME_API_VAR).is_some()
}

pub fn stack_name() -> Result<String, DashboardUpdaterError> {
    stack_name_from(env::var(STACK_NAME_VAR).ok())
}

fn stack_name_from(value: Option<String>) -> Result<String, DashboardUpdaterError> {
    value
        .filter(|name| !name.trim().is_empty())
        .ok_or(DashboardUpdaterError::MissingStackName)
}

pub fn log_filter() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}
