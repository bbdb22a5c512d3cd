use crate::dashboard::Dashboard;
use crate::error::DashboardUpdaterError;
use async_trait::async_trait;
use rusoto_cloudwatch::{CloudWatch, CloudWatchClient, PutDashboardInput, PutDashboardOutput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationMessage {
    pub data_path: Option<String>,
    pub message: Option<String>,
}

/// What CloudWatch said about an upserted dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishAcknowledgement {
    pub dashboard_name: String,
    pub validation_messages: Vec<ValidationMessage>,
}

pub struct CloudWatchDashboardClient {
    client: CloudWatchClient,
}

#[async_trait]
pub trait PublishDashboard {
    async fn put_dashboard(
        &self,
        dashboard_name: &str,
        dashboard: &Dashboard,
    ) -> Result<PublishAcknowledgement, DashboardUpdaterError>;
}

#[async_trait]
impl PublishDashboard for CloudWatchDashboardClient {
    async fn put_dashboard(
        &self,
        dashboard_name: &str,
        dashboard: &Dashboard,
    ) -> Result<PublishAcknowledgement, DashboardUpdaterError> {
        let output = self
            .client
            .put_dashboard(PutDashboardInput {
                dashboard_name: dashboard_name.to_string(),
                dashboard_body: dashboard.to_body()?,
            })
            .await?;
        Ok(self.acknowledge(dashboard_name, output))
    }
}

impl CloudWatchDashboardClient {
    pub fn new_with_client(client: CloudWatchClient) -> Self {
        CloudWatchDashboardClient { client }
    }

    fn acknowledge(&self, dashboard_name: &str, output: PutDashboardOutput) -> PublishAcknowledgement {
        PublishAcknowledgement {
            dashboard_name: dashboard_name.to_string(),
            validation_messages: output
                .dashboard_validation_messages
                .unwrap_or_default()
                .into_iter()
                .map(|message| ValidationMessage {
                    data_path: message.data_path,
                    message: message.message,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cloud_watch_dashboard_client::{
        CloudWatchDashboardClient, PublishAcknowledgement, PublishDashboard, ValidationMessage,
    };
    use crate::dashboard::Dashboard;
    use crate::layout::LayoutEngine;
    use rusoto_cloudwatch::CloudWatchClient;
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader, ReadMockResponse,
    };

    fn dashboard() -> Dashboard {
        let mut engine = LayoutEngine::new("eu-west-2");
        engine.place_header("** GENERATOR METRICS **");
        Dashboard {
            widgets: engine.into_widgets(),
        }
    }

    #[tokio::test]
    async fn test_put_dashboard() {
        let mock = CloudWatchClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "put_dashboard.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudWatchDashboardClient::new_with_client(mock);
        let result = client.put_dashboard("gaffer-perf-1", &dashboard()).await;

        assert_eq!(
            result.unwrap(),
            PublishAcknowledgement {
                dashboard_name: "gaffer-perf-1".to_string(),
                validation_messages: vec![ValidationMessage {
                    data_path: Some("/widgets/0/properties".to_string()),
                    message: Some("Should NOT have additional properties".to_string()),
                }],
            }
        );
    }

    #[tokio::test]
    async fn test_put_dashboard_error() {
        let mock = CloudWatchClient::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "put_dashboard.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudWatchDashboardClient::new_with_client(mock);
        let result = client.put_dashboard("gaffer-perf-1", &dashboard()).await;

        assert!(result.is_err());
    }
}
