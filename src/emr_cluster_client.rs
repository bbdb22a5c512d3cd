use crate::error::DashboardUpdaterError;
use async_trait::async_trait;
use rusoto_emr::{Emr, EmrClient, ListInstancesInput};

/// Instances of a cluster. `private_dns_names` skips instances still launching,
/// so it may be shorter than `instance_ids`.
#[derive(Debug, Default, PartialEq)]
pub struct ClusterInstances {
    pub instance_ids: Vec<String>,
    pub private_dns_names: Vec<String>,
}

pub struct EmrClusterClient {
    client: EmrClient,
}

#[async_trait]
pub trait ListClusterInstances {
    async fn list_cluster_instances(
        &self,
        cluster_id: &str,
    ) -> Result<ClusterInstances, DashboardUpdaterError>;
}

#[async_trait]
impl ListClusterInstances for EmrClusterClient {
    async fn list_cluster_instances(
        &self,
        cluster_id: &str,
    ) -> Result<ClusterInstances, DashboardUpdaterError> {
        let mut cluster_instances = ClusterInstances::default();
        let mut marker = None;
        loop {
            let result = self
                .client
                .list_instances(ListInstancesInput {
                    cluster_id: cluster_id.to_string(),
                    marker: marker.take(),
                    ..ListInstancesInput::default()
                })
                .await?;

            for instance in result.instances.unwrap_or_default() {
                cluster_instances
                    .instance_ids
                    .push(instance.ec_2_instance_id.ok_or(DashboardUpdaterError::NoneValue)?);
                if let Some(private_dns_name) = instance.private_dns_name {
                    cluster_instances.private_dns_names.push(private_dns_name);
                }
            }

            match result.marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }
        Ok(cluster_instances)
    }
}

impl EmrClusterClient {
    pub fn new_with_client(client: EmrClient) -> Self {
        EmrClusterClient { client }
    }
}

#[cfg(test)]
mod tests {
    use crate::emr_cluster_client::{ClusterInstances, EmrClusterClient, ListClusterInstances};
    use crate::test_support::request_body;
    use rusoto_core::signature::SignedRequest;
    use rusoto_emr::EmrClient;
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader,
        MultipleMockRequestDispatcher, ReadMockResponse,
    };

    #[tokio::test]
    async fn test_list_cluster_instances() {
        let mock = EmrClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "list_instances.json",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = EmrClusterClient::new_with_client(mock);
        let result = client.list_cluster_instances("j-2AXXXXXXGAPLF").await;

        assert_eq!(
            result.unwrap(),
            ClusterInstances {
                instance_ids: vec![
                    "i-0e0000000000000a1".to_string(),
                    "i-0e0000000000000a2".to_string(),
                    "i-0e0000000000000a3".to_string(),
                ],
                private_dns_names: vec![
                    "ip-10-0-0-11.eu-west-2.compute.internal".to_string(),
                    "ip-10-0-0-12.eu-west-2.compute.internal".to_string(),
                ],
            }
        );
    }

    #[tokio::test]
    async fn test_list_cluster_instances_error() {
        let mock = EmrClient::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "list_instances.json",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = EmrClusterClient::new_with_client(mock);
        let result = client.list_cluster_instances("j-2AXXXXXXGAPLF").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_cluster_instances_follows_marker() {
        let mock = EmrClient::new_with(
            MultipleMockRequestDispatcher::new(vec![
                MockRequestDispatcher::default()
                    .with_body(&*MockResponseReader::read_response(
                        "test_resources/valid",
                        "list_instances_page_1.json",
                    ))
                    .with_request_checker(|request: &SignedRequest| {
                        let body = request_body(request);
                        assert!(body.contains("\"ClusterId\":\"j-2AXXXXXXGAPLF\""));
                        assert!(!body.contains("Marker"));
                    }),
                MockRequestDispatcher::default()
                    .with_body(&*MockResponseReader::read_response(
                        "test_resources/valid",
                        "list_instances_page_2.json",
                    ))
                    .with_request_checker(|request: &SignedRequest| {
                        assert!(request_body(request).contains("\"Marker\":\"page-2-marker\""));
                    }),
            ]),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = EmrClusterClient::new_with_client(mock);
        let result = client.list_cluster_instances("j-2AXXXXXXGAPLF").await;

        assert_eq!(
            result.unwrap(),
            ClusterInstances {
                instance_ids: vec![
                    "i-0e0000000000000a1".to_string(),
                    "i-0e0000000000000a2".to_string(),
                    "i-0e0000000000000a3".to_string(),
                ],
                private_dns_names: vec![
                    "ip-10-0-0-11.eu-west-2.compute.internal".to_string(),
                    "ip-10-0-0-13.eu-west-2.compute.internal".to_string(),
                ],
            }
        );
    }
}
