use crate::error::DashboardUpdaterError;
use async_trait::async_trait;
use rusoto_autoscaling::{AutoScalingGroupNamesType, Autoscaling, AutoscalingClient};

pub struct AutoScalingGroupClient {
    client: AutoscalingClient,
}

#[async_trait]
pub trait DescribeGroups {
    /// Current member instances of the group; empty while it scales up from zero.
    async fn describe_group_instance_ids(
        &self,
        group_name: &str,
    ) -> Result<Vec<String>, DashboardUpdaterError>;
}

#[async_trait]
impl DescribeGroups for AutoScalingGroupClient {
    async fn describe_group_instance_ids(
        &self,
        group_name: &str,
    ) -> Result<Vec<String>, DashboardUpdaterError> {
        let result = self
            .client
            .describe_auto_scaling_groups(AutoScalingGroupNamesType {
                auto_scaling_group_names: Some(vec![group_name.to_string()]),
                ..AutoScalingGroupNamesType::default()
            })
            .await?;

        let group = result
            .auto_scaling_groups
            .into_iter()
            .next()
            .ok_or_else(|| DashboardUpdaterError::AutoScalingGroupNotFound(group_name.to_string()))?;

        Ok(group
            .instances
            .unwrap_or_default()
            .into_iter()
            .map(|instance| instance.instance_id)
            .collect())
    }
}

impl AutoScalingGroupClient {
    pub fn new_with_client(client: AutoscalingClient) -> Self {
        AutoScalingGroupClient { client }
    }
}
