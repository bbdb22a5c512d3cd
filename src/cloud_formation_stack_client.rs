use crate::error::DashboardUpdaterError;
use crate::stack::Stack;
use async_trait::async_trait;
use rusoto_cloudformation::{
    CloudFormation, CloudFormationClient, DescribeStacksError, DescribeStacksInput,
};
use rusoto_core::RusotoError;
use tracing::debug;

pub struct CloudFormationStackClient {
    client: CloudFormationClient,
}

#[async_trait]
pub trait LocateStacks {
    async fn describe_stack(&self, stack_name: &str) -> Result<Stack, DashboardUpdaterError>;
    async fn describe_tagged_stacks(&self) -> Result<Vec<Stack>, DashboardUpdaterError>;
}

#[async_trait]
impl LocateStacks for CloudFormationStackClient {
    async fn describe_stack(&self, stack_name: &str) -> Result<Stack, DashboardUpdaterError> {
        let result = self
            .client
            .describe_stacks(DescribeStacksInput {
                stack_name: Some(stack_name.to_string()),
                ..DescribeStacksInput::default()
            })
            .await
            .map_err(|error| not_found_or(stack_name, error))?;

        result
            .stacks
            .and_then(|stacks| stacks.into_iter().next())
            .map(convert_stack)
            .ok_or_else(|| DashboardUpdaterError::StackNotFound(stack_name.to_string()))
    }

    async fn describe_tagged_stacks(&self) -> Result<Vec<Stack>, DashboardUpdaterError> {
        let mut tagged = Vec::<Stack>::new();
        let mut next_token = None;
        loop {
            let result = self
                .client
                .describe_stacks(DescribeStacksInput {
                    next_token: next_token.take(),
                    ..DescribeStacksInput::default()
                })
                .await?;

            for stack in result.stacks.unwrap_or_default() {
                let stack = convert_stack(stack);
                if stack.is_performance_test_stack() {
                    tagged.push(stack);
                } else {
                    debug!(stack = %stack.name, "skipping untagged stack");
                }
            }

            match result.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }
        Ok(tagged)
    }
}

impl CloudFormationStackClient {
    pub fn new_with_client(client: CloudFormationClient) -> Self {
        CloudFormationStackClient { client }
    }
}

fn convert_stack(stack: rusoto_cloudformation::Stack) -> Stack {
    let mut converted = Stack::new(stack.stack_name);
    for output in stack.outputs.unwrap_or_default() {
        if let (Some(key), Some(value)) = (output.output_key, output.output_value) {
            converted.outputs.insert(key, value);
        }
    }
    converted
}

// CloudFormation reports an unknown stack name as a 400 ValidationError.
fn not_found_or(
    stack_name: &str,
    error: RusotoError<DescribeStacksError>,
) -> DashboardUpdaterError {
    match error {
        RusotoError::Unknown(ref response)
            if response.status.as_u16() == 400
                && String::from_utf8_lossy(&response.body).contains("does not exist") =>
        {
            DashboardUpdaterError::StackNotFound(stack_name.to_string())
        }
        error => DashboardUpdaterError::DescribeStacksError(error),
    }
}

#[cfg(test)]
mod tests {
    use crate::cloud_formation_stack_client::{CloudFormationStackClient, LocateStacks};
    use crate::error::DashboardUpdaterError;
    use crate::stack::Stack;
    use crate::test_support::request_body;
    use rusoto_cloudformation::CloudFormationClient;
    use rusoto_core::signature::SignedRequest;
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader,
        MultipleMockRequestDispatcher, ReadMockResponse,
    };

    #[tokio::test]
    async fn test_describe_stack() {
        let mock = CloudFormationClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "describe_stack.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudFormationStackClient::new_with_client(mock);
        let result = client.describe_stack("gaffer-perf-1").await;

        assert_eq!(
            result.unwrap(),
            Stack::new("gaffer-perf-1")
                .with_output("AccumuloInstanceName", "accumulo")
                .with_output("DataGeneratorAutoScalingGroupName", "data-gen-asg")
                .with_output("EmrClusterId", "j-2AXXXXXXGAPLF")
                .with_output("GafferTemplateType", "gaffer-performance-tests")
                .with_output("QueryGeneratorAutoScalingGroupName", "query-gen-asg")
        );
    }

    #[tokio::test]
    async fn test_describe_stack_not_found() {
        let mock = CloudFormationClient::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "describe_stacks.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudFormationStackClient::new_with_client(mock);
        let result = client.describe_stack("missing").await;

        assert_eq!(
            result.err().unwrap(),
            DashboardUpdaterError::StackNotFound("missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_describe_tagged_stacks() {
        let mock = CloudFormationClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "describe_stacks.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudFormationStackClient::new_with_client(mock);
        let stacks = client.describe_tagged_stacks().await.unwrap();

        let names: Vec<&str> = stacks.iter().map(|stack| stack.name.as_str()).collect();
        assert_eq!(names, ["gaffer-perf-1", "gaffer-perf-2"]);
    }

    #[tokio::test]
    async fn test_describe_tagged_stacks_follows_next_token() {
        let mock = CloudFormationClient::new_with(
            MultipleMockRequestDispatcher::new(vec![
                MockRequestDispatcher::default()
                    .with_body(&*MockResponseReader::read_response(
                        "test_resources/valid",
                        "describe_stacks_page_1.xml",
                    ))
                    .with_request_checker(|request: &SignedRequest| {
                        assert!(!request_body(request).contains("NextToken"));
                    }),
                MockRequestDispatcher::default()
                    .with_body(&*MockResponseReader::read_response(
                        "test_resources/valid",
                        "describe_stacks_page_2.xml",
                    ))
                    .with_request_checker(|request: &SignedRequest| {
                        assert!(request_body(request).contains("NextToken=page-2-token"));
                    }),
            ]),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudFormationStackClient::new_with_client(mock);
        let stacks = client.describe_tagged_stacks().await.unwrap();

        let names: Vec<&str> = stacks.iter().map(|stack| stack.name.as_str()).collect();
        assert_eq!(names, ["gaffer-perf-1", "gaffer-perf-2", "gaffer-perf-3"]);
    }
}
