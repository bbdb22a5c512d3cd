use crate::auto_scaling_group_client::DescribeGroups;
use crate::cloud_formation_stack_client::LocateStacks;
use crate::cloud_watch_dashboard_client::{PublishAcknowledgement, PublishDashboard};
use crate::dashboard::{build_widgets, Dashboard, StackResources};
use crate::ec2_instance_client::{ensure_detailed_monitoring, Monitor};
use crate::emr_cluster_client::ListClusterInstances;
use crate::error::DashboardUpdaterError;
use crate::layout::LayoutEngine;
use crate::stack::{PerformanceTestOutputs, Stack};
use chrono::Utc;
use std::convert::TryFrom;
use tracing::{debug, info};

/// Runs fetch, enumerate, ensure monitoring, layout and publish for each stack.
pub struct DashboardUpdater<S, G, C, M, P> {
    pub stacks: S,
    pub groups: G,
    pub clusters: C,
    pub instances: M,
    pub dashboards: P,
    pub region: String,
}

impl<S, G, C, M, P> DashboardUpdater<S, G, C, M, P>
where
    S: LocateStacks + Sync,
    G: DescribeGroups + Sync,
    C: ListClusterInstances + Sync,
    M: Monitor + Sync,
    P: PublishDashboard + Sync,
{
    pub async fn update_stack_named(
        &self,
        stack_name: &str,
    ) -> Result<PublishAcknowledgement, DashboardUpdaterError> {
        let stack = self.stacks.describe_stack(stack_name).await?;
        self.update_stack(&stack).await
    }

    /// Updates every tagged stack in listing order, stopping at the first failure.
    pub async fn update_all(&self) -> Result<Vec<PublishAcknowledgement>, DashboardUpdaterError> {
        let stacks = self.stacks.describe_tagged_stacks().await?;
        info!(count = stacks.len(), "found performance test stacks");

        let mut acknowledgements = Vec::with_capacity(stacks.len());
        for stack in &stacks {
            acknowledgements.push(self.update_stack(stack).await?);
        }
        Ok(acknowledgements)
    }

    pub async fn update_stack(
        &self,
        stack: &Stack,
    ) -> Result<PublishAcknowledgement, DashboardUpdaterError> {
        let outputs = PerformanceTestOutputs::try_from(stack)?;
        let resources = self.enumerate_resources(&outputs).await?;
        debug!(stack = %stack.name, ?resources, "enumerated stack resources");

        ensure_detailed_monitoring(&self.instances, &resources.emr_instance_ids).await?;

        let widgets = build_widgets(
            LayoutEngine::new(self.region.as_str()),
            &outputs,
            &resources,
            Utc::now(),
        )?;
        let acknowledgement = self
            .dashboards
            .put_dashboard(&stack.name, &Dashboard { widgets })
            .await?;
        info!(
            stack = %stack.name,
            validation_messages = acknowledgement.validation_messages.len(),
            "dashboard updated"
        );
        Ok(acknowledgement)
    }

    async fn enumerate_resources(
        &self,
        outputs: &PerformanceTestOutputs,
    ) -> Result<StackResources, DashboardUpdaterError> {
        let data_generator_instance_ids = self
            .groups
            .describe_group_instance_ids(&outputs.data_generator_group)
            .await?;
        let query_generator_instance_ids = self
            .groups
            .describe_group_instance_ids(&outputs.query_generator_group)
            .await?;
        let cluster = self
            .clusters
            .list_cluster_instances(&outputs.emr_cluster_id)
            .await?;

        Ok(StackResources {
            data_generator_instance_ids,
            query_generator_instance_ids,
            emr_instance_ids: cluster.instance_ids,
            emr_private_dns_names: cluster.private_dns_names,
        })
    }
}
