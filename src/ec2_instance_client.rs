use async_trait::async_trait;
use rusoto_ec2::{Ec2, Ec2Client};

use crate::error::DashboardUpdaterError;
use rusoto_ec2::{DescribeInstancesRequest, Filter, MonitorInstancesRequest};
use tracing::info;

pub struct Ec2InstanceClient {
    client: Ec2Client,
}

#[async_trait]
pub trait Monitor {
    /// The subset of `instance_ids` still on basic (five minute) monitoring.
    async fn describe_unmonitored_instances(
        &self,
        instance_ids: &[String],
    ) -> Result<Vec<String>, DashboardUpdaterError>;

    async fn enable_detailed_monitoring(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<(), DashboardUpdaterError>;
}

#[async_trait]
impl Monitor for Ec2InstanceClient {
    async fn describe_unmonitored_instances(
        &self,
        instance_ids: &[String],
    ) -> Result<Vec<String>, DashboardUpdaterError> {
        let request = DescribeInstancesRequest {
            instance_ids: Some(instance_ids.to_vec()),
            filters: Some(vec![Filter {
                name: Some("monitoring-state".to_string()),
                values: Some(vec!["disabled".to_string()]),
            }]),
            ..DescribeInstancesRequest::default()
        };

        let result = self.client.describe_instances(request).await?;

        let mut unmonitored = Vec::<String>::new();
        for reservation in result.reservations.unwrap_or_default() {
            for instance in reservation.instances.unwrap_or_default() {
                unmonitored.push(instance.instance_id.ok_or(DashboardUpdaterError::NoneValue)?);
            }
        }
        Ok(unmonitored)
    }

    async fn enable_detailed_monitoring(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<(), DashboardUpdaterError> {
        self.client
            .monitor_instances(MonitorInstancesRequest {
                instance_ids,
                ..MonitorInstancesRequest::default()
            })
            .await?;
        Ok(())
    }
}

impl Ec2InstanceClient {
    pub fn new_with_client(client: Ec2Client) -> Self {
        Ec2InstanceClient { client }
    }
}

/// Enables detailed monitoring on whichever of `instance_ids` lack it, in one call.
/// Issues no call at all once every instance is monitored.
pub async fn ensure_detailed_monitoring<M>(
    monitor: &M,
    instance_ids: &[String],
) -> Result<Vec<String>, DashboardUpdaterError>
where
    M: Monitor + Sync + ?Sized,
{
    if instance_ids.is_empty() {
        return Ok(vec![]);
    }
    let unmonitored = monitor.describe_unmonitored_instances(instance_ids).await?;
    if unmonitored.is_empty() {
        return Ok(unmonitored);
    }
    info!(instance_ids = ?unmonitored, "enabling detailed monitoring");
    monitor.enable_detailed_monitoring(unmonitored.clone()).await?;
    Ok(unmonitored)
}
