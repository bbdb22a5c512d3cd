use crate::error::DashboardUpdaterError;
use crate::layout::{GraphSpec, LayoutEngine, Widget};
use crate::metric::{MetricSpec, YAxis};
use crate::stack::PerformanceTestOutputs;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const GAFFER_GRAPH_ID: &str = "gaffer_performance_test";

/// The dashboard body accepted by `PutDashboard`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub widgets: Vec<Widget>,
}

impl Dashboard {
    pub fn to_body(&self) -> Result<String, DashboardUpdaterError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Instances currently backing one performance test stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackResources {
    pub data_generator_instance_ids: Vec<String>,
    pub query_generator_instance_ids: Vec<String>,
    pub emr_instance_ids: Vec<String>,
    pub emr_private_dns_names: Vec<String>,
}

fn ec2_metrics(metric_name: &str, instance_ids: &[String]) -> Vec<MetricSpec> {
    instance_ids
        .iter()
        .map(|instance_id| {
            MetricSpec::new("AWS/EC2", metric_name)
                .dimension("InstanceId", instance_id.as_str())
                .label(instance_id.as_str())
        })
        .collect()
}

fn ec2_graph(title: &str, metric_name: &str, instance_ids: &[String]) -> GraphSpec {
    GraphSpec::new(title, ec2_metrics(metric_name, instance_ids))
}

fn gaffer_metrics(
    metric_name: &str,
    instance_ids: &[String],
    outputs: &PerformanceTestOutputs,
) -> Vec<MetricSpec> {
    instance_ids
        .iter()
        .map(|instance_id| {
            MetricSpec::new("Gaffer", metric_name)
                .dimension("EmrJobFlowId", outputs.emr_cluster_id.as_str())
                .dimension("InstanceId", instance_id.as_str())
                .dimension("InstanceName", outputs.accumulo_instance_name.as_str())
                .dimension("TableName", GAFFER_GRAPH_ID)
                .label(instance_id.as_str())
        })
        .collect()
}

fn group_size_metric(group_name: &str) -> MetricSpec {
    MetricSpec::new("AWS/AutoScaling", "GroupInServiceInstances")
        .dimension("AutoScalingGroupName", group_name)
}

// Tablet server metrics are keyed by hostname, so instances still launching are absent.
fn tablet_server_graph(
    title: &str,
    metric_name: &str,
    private_dns_names: &[String],
    outputs: &PerformanceTestOutputs,
) -> GraphSpec {
    let metrics = private_dns_names
        .iter()
        .map(|private_dns_name| {
            MetricSpec::new("Accumulo", metric_name)
                .dimension("EmrJobFlowId", outputs.emr_cluster_id.as_str())
                .dimension("InstanceName", outputs.accumulo_instance_name.as_str())
                .dimension("TableName", GAFFER_GRAPH_ID)
                .dimension("TabletServerName", private_dns_name.as_str())
                .label(private_dns_name.as_str())
        })
        .collect();
    GraphSpec::new(title, metrics).stacked(true)
}

fn hdfs_metrics(emr_cluster_id: &str) -> Vec<MetricSpec> {
    vec![
        MetricSpec::new("AWS/ElasticMapReduce", "HDFSUtilization")
            .dimension("JobFlowId", emr_cluster_id),
        MetricSpec::new("AWS/ElasticMapReduce", "CapacityRemainingGB")
            .dimension("JobFlowId", emr_cluster_id)
            .y_axis(YAxis::Right),
    ]
}

/// Lays out the performance test dashboard for one stack.
pub fn build_widgets(
    mut engine: LayoutEngine,
    outputs: &PerformanceTestOutputs,
    resources: &StackResources,
    updated_at: DateTime<Utc>,
) -> Result<Vec<Widget>, DashboardUpdaterError> {
    let data_gen = &resources.data_generator_instance_ids;
    let query_gen = &resources.query_generator_instance_ids;
    let emr = &resources.emr_instance_ids;
    let hosts = &resources.emr_private_dns_names;

    engine.place_header(format!(
        "WARNING: This dashboard gets auto-updated by a Lambda function every minute! (Last Updated: {})",
        updated_at.format("%a %b %e %H:%M:%S %Y")
    ));

    engine.place_header("** GENERATOR METRICS **");
    engine.place_graph(
        GraphSpec::new(
            "Data Generator Instance Count",
            vec![group_size_metric(&outputs.data_generator_group)],
        )
        .width(6),
    )?;
    engine.place_graph(ec2_graph("Data Generator CPU", "CPUUtilization", data_gen).width(6))?;
    engine.place_graph(ec2_graph("Data Generator NetOut", "NetworkOut", data_gen).width(6))?;
    engine.place_graph(
        GraphSpec::new(
            "Data Generator Ingest Rate",
            gaffer_metrics("elements_per_second_batch", data_gen, outputs),
        )
        .width(6),
    )?;

    engine.place_graph(
        GraphSpec::new(
            "Query Generator Instance Count",
            vec![group_size_metric(&outputs.query_generator_group)],
        )
        .width(4),
    )?;
    engine.place_graph(ec2_graph("Query Generator CPU", "CPUUtilization", query_gen).width(5))?;
    engine.place_graph(ec2_graph("Query Generator NetOut", "NetworkOut", query_gen).width(5))?;
    engine.place_graph(
        GraphSpec::new(
            "Query Generator Seed Rate",
            gaffer_metrics("seeds_per_second", query_gen, outputs),
        )
        .width(5),
    )?;
    engine.place_graph(
        GraphSpec::new(
            "Query Generator Results Rate",
            gaffer_metrics("results_per_second", query_gen, outputs),
        )
        .width(5),
    )?;

    engine.place_header("** EMR CLUSTER METRICS **");
    engine.place_graph(ec2_graph("EMR CPU", "CPUUtilization", emr))?;
    engine.place_graph(ec2_graph("EMR NetIn", "NetworkIn", emr))?;
    engine.place_graph(ec2_graph("EMR NetOut", "NetworkOut", emr))?;
    for (title, metric_name) in &[
        ("EMR Disk Read Bytes", "DiskReadBytes"),
        ("EMR Disk Read Ops", "DiskReadOps"),
        ("EMR Disk Write Bytes", "DiskWriteBytes"),
        ("EMR Disk Write Ops", "DiskWriteOps"),
    ] {
        engine.place_graph(ec2_graph(title, metric_name, emr).width(6))?;
    }

    engine.place_header("** ACCUMULO METRICS **");
    for (title, metric_name) in &[
        ("Online Tablets", "OnlineTabletCount"),
        ("Records", "RecordCount"),
        ("Records In Memory", "RecordsInMemoryCount"),
    ] {
        engine.place_graph(tablet_server_graph(title, metric_name, hosts, outputs).width(6))?;
    }
    engine.place_graph(GraphSpec::new("HDFS Usage", hdfs_metrics(&outputs.emr_cluster_id)).width(6))?;

    for (title, metric_name) in &[
        ("Ingest Rate", "IngestRate"),
        ("Calculated Ingest Rate", "CalculatedIngestRate"),
        ("Ingest Byte Rate", "IngestByteRate"),
        ("Scan Rate", "ScanRate"),
        ("Query Rate", "QueryRate"),
        ("Query Byte Rate", "QueryByteRate"),
    ] {
        engine.place_graph(tablet_server_graph(title, metric_name, hosts, outputs))?;
    }

    for (title, metric_name) in &[
        ("Minor Compactions", "MinorCompactionCount"),
        ("Major Compactions", "MajorCompactionCount"),
        ("Queued Minor Compactions", "MinorCompactionQueuedCount"),
        ("Queued Major Compactions", "MajorCompactionQueuedCount"),
    ] {
        engine.place_graph(tablet_server_graph(title, metric_name, hosts, outputs).width(12))?;
    }

    Ok(engine.into_widgets())
}
