mod auto_scaling_group_client;
mod cloud_formation_stack_client;
mod cloud_watch_dashboard_client;
mod config;
mod dashboard;
mod ec2_instance_client;
mod emr_cluster_client;
mod error;
mod layout;
mod metric;
mod stack;
#[cfg(test)]
mod test_support;
mod updater;

use crate::auto_scaling_group_client::AutoScalingGroupClient;
use crate::cloud_formation_stack_client::CloudFormationStackClient;
use crate::cloud_watch_dashboard_client::CloudWatchDashboardClient;
use crate::ec2_instance_client::Ec2InstanceClient;
use crate::emr_cluster_client::EmrClusterClient;
use crate::updater::DashboardUpdater;
use anyhow::Context as _;
use lambda_runtime::{handler_fn, Context};
use rusoto_autoscaling::AutoscalingClient;
use rusoto_cloudformation::CloudFormationClient;
use rusoto_cloudwatch::CloudWatchClient;
use rusoto_ec2::Ec2Client;
use rusoto_emr::EmrClient;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

type AwsDashboardUpdater = DashboardUpdater<
    CloudFormationStackClient,
    AutoScalingGroupClient,
    EmrClusterClient,
    Ec2InstanceClient,
    CloudWatchDashboardClient,
>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config::log_filter()))
        // CloudWatch Logs adds the ingestion time.
        .without_time()
        .with_target(false)
        .init();

    if config::is_lambda_environment() {
        lambda_runtime::run(handler_fn(update_handler)).await?;
    } else {
        update_all_stacks().await?;
    }
    Ok(())
}

fn aws_updater() -> AwsDashboardUpdater {
    let region = config::REGION.clone();
    DashboardUpdater {
        stacks: CloudFormationStackClient::new_with_client(CloudFormationClient::new(region.clone())),
        groups: AutoScalingGroupClient::new_with_client(AutoscalingClient::new(region.clone())),
        clusters: EmrClusterClient::new_with_client(EmrClient::new(region.clone())),
        instances: Ec2InstanceClient::new_with_client(Ec2Client::new(region.clone())),
        dashboards: CloudWatchDashboardClient::new_with_client(CloudWatchClient::new(region)),
        region: config::region_name().to_string(),
    }
}

async fn update_handler(event: Value, _: Context) -> Result<Value, Error> {
    info!(%event, "received event");
    let stack_name = config::stack_name()?;

    let acknowledgement = aws_updater().update_stack_named(&stack_name).await?;
    info!("{}: {:?}", stack_name, acknowledgement);
    Ok(serde_json::to_value(acknowledgement)?)
}

async fn update_all_stacks() -> anyhow::Result<()> {
    let acknowledgements = aws_updater()
        .update_all()
        .await
        .context("failed to update performance test dashboards")?;
    for acknowledgement in acknowledgements {
        info!("{}: {:?}", acknowledgement.dashboard_name, acknowledgement);
    }
    Ok(())
}
