use std::error::Error;

use rusoto_autoscaling::DescribeAutoScalingGroupsError;
use rusoto_cloudformation::DescribeStacksError;
use rusoto_cloudwatch::PutDashboardError;
use rusoto_core::RusotoError;
use rusoto_ec2::{DescribeInstancesError, MonitorInstancesError};
use rusoto_emr::ListInstancesError;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum DashboardUpdaterError {
    NoneValue,
    MissingStackName,
    StackNotFound(String),
    MissingOutput(String),
    AutoScalingGroupNotFound(String),
    InvalidWidgetSize { width: u32, height: u32, max_x: u32 },
    SerializeError(String),
    DescribeStacksError(RusotoError<DescribeStacksError>),
    DescribeAutoScalingGroupsError(RusotoError<DescribeAutoScalingGroupsError>),
    ListInstancesError(RusotoError<ListInstancesError>),
    DescribeInstancesError(RusotoError<DescribeInstancesError>),
    MonitorInstancesError(RusotoError<MonitorInstancesError>),
    PutDashboardError(RusotoError<PutDashboardError>),
}

impl Display for DashboardUpdaterError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            DashboardUpdaterError::NoneValue => write!(f, "Value is None"),
            DashboardUpdaterError::MissingStackName => write!(f, "Missing env var STACK_NAME!"),
            DashboardUpdaterError::StackNotFound(ref name) => {
                write!(f, "Stack {} does not exist", name)
            }
            DashboardUpdaterError::MissingOutput(ref key) => {
                write!(f, "Stack output {} is missing", key)
            }
            DashboardUpdaterError::AutoScalingGroupNotFound(ref name) => {
                write!(f, "Auto scaling group {} does not exist", name)
            }
            DashboardUpdaterError::InvalidWidgetSize {
                width,
                height,
                max_x,
            } => write!(
                f,
                "Widget size {}x{} does not fit a grid {} wide",
                width, height, max_x
            ),
            DashboardUpdaterError::SerializeError(ref message) => {
                write!(f, "Failed to serialize dashboard: {}", message)
            }
            DashboardUpdaterError::DescribeStacksError(ref error) => Display::fmt(error, f),
            DashboardUpdaterError::DescribeAutoScalingGroupsError(ref error) => {
                Display::fmt(error, f)
            }
            DashboardUpdaterError::ListInstancesError(ref error) => Display::fmt(error, f),
            DashboardUpdaterError::DescribeInstancesError(ref error) => Display::fmt(error, f),
            DashboardUpdaterError::MonitorInstancesError(ref error) => Display::fmt(error, f),
            DashboardUpdaterError::PutDashboardError(ref error) => Display::fmt(error, f),
        }
    }
}

impl Error for DashboardUpdaterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            DashboardUpdaterError::DescribeStacksError(ref error) => Some(error),
            DashboardUpdaterError::DescribeAutoScalingGroupsError(ref error) => Some(error),
            DashboardUpdaterError::ListInstancesError(ref error) => Some(error),
            DashboardUpdaterError::DescribeInstancesError(ref error) => Some(error),
            DashboardUpdaterError::MonitorInstancesError(ref error) => Some(error),
            DashboardUpdaterError::PutDashboardError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DashboardUpdaterError {
    fn from(e: serde_json::Error) -> DashboardUpdaterError {
        DashboardUpdaterError::SerializeError(e.to_string())
    }
}

impl From<RusotoError<DescribeStacksError>> for DashboardUpdaterError {
    fn from(e: RusotoError<DescribeStacksError>) -> DashboardUpdaterError {
        DashboardUpdaterError::DescribeStacksError(e)
    }
}

impl From<RusotoError<DescribeAutoScalingGroupsError>> for DashboardUpdaterError {
    fn from(e: RusotoError<DescribeAutoScalingGroupsError>) -> DashboardUpdaterError {
        DashboardUpdaterError::DescribeAutoScalingGroupsError(e)
    }
}

impl From<RusotoError<ListInstancesError>> for DashboardUpdaterError {
    fn from(e: RusotoError<ListInstancesError>) -> DashboardUpdaterError {
        DashboardUpdaterError::ListInstancesError(e)
    }
}

impl From<RusotoError<DescribeInstancesError>> for DashboardUpdaterError {
    fn from(e: RusotoError<DescribeInstancesError>) -> DashboardUpdaterError {
        DashboardUpdaterError::DescribeInstancesError(e)
    }
}

impl From<RusotoError<MonitorInstancesError>> for DashboardUpdaterError {
    fn from(e: RusotoError<MonitorInstancesError>) -> DashboardUpdaterError {
        DashboardUpdaterError::MonitorInstancesError(e)
    }
}

impl From<RusotoError<PutDashboardError>> for DashboardUpdaterError {
    fn from(e: RusotoError<PutDashboardError>) -> DashboardUpdaterError {
        DashboardUpdaterError::PutDashboardError(e)
    }
}
