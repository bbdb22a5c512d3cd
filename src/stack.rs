use crate::error::DashboardUpdaterError;
use std::collections::BTreeMap;
use std::convert::TryFrom;

pub const TEMPLATE_TYPE_OUTPUT: &str = "GafferTemplateType";
pub const TEMPLATE_TYPE: &str = "gaffer-performance-tests";

const DATA_GENERATOR_GROUP_OUTPUT: &str = "DataGeneratorAutoScalingGroupName";
const QUERY_GENERATOR_GROUP_OUTPUT: &str = "QueryGeneratorAutoScalingGroupName";
const EMR_CLUSTER_ID_OUTPUT: &str = "EmrClusterId";
const ACCUMULO_INSTANCE_NAME_OUTPUT: &str = "AccumuloInstanceName";

/// A deployed environment and its output parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub name: String,
    pub outputs: BTreeMap<String, String>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Stack {
            name: name.into(),
            outputs: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }

    pub fn output(&self, key: &str) -> Result<&str, DashboardUpdaterError> {
        self.outputs
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| DashboardUpdaterError::MissingOutput(key.to_string()))
    }

    pub fn is_performance_test_stack(&self) -> bool {
        self.outputs
            .get(TEMPLATE_TYPE_OUTPUT)
            .map_or(false, |value| value == TEMPLATE_TYPE)
    }
}

/// The outputs a performance test stack must expose for its dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTestOutputs {
    pub data_generator_group: String,
    pub query_generator_group: String,
    pub emr_cluster_id: String,
    pub accumulo_instance_name: String,
}

impl TryFrom<&Stack> for PerformanceTestOutputs {
    type Error = DashboardUpdaterError;

    fn try_from(stack: &Stack) -> Result<Self, Self::Error> {
        Ok(PerformanceTestOutputs {
            data_generator_group: stack.output(DATA_GENERATOR_GROUP_OUTPUT)?.to_string(),
            query_generator_group: stack.output(QUERY_GENERATOR_GROUP_OUTPUT)?.to_string(),
            emr_cluster_id: stack.output(EMR_CLUSTER_ID_OUTPUT)?.to_string(),
            accumulo_instance_name: stack.output(ACCUMULO_INSTANCE_NAME_OUTPUT)?.to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) fn performance_test_stack(name: &str) -> Stack {
    Stack::new(name)
        .with_output(TEMPLATE_TYPE_OUTPUT, TEMPLATE_TYPE)
        .with_output(DATA_GENERATOR_GROUP_OUTPUT, "data-gen-asg")
        .with_output(QUERY_GENERATOR_GROUP_OUTPUT, "query-gen-asg")
        .with_output(EMR_CLUSTER_ID_OUTPUT, "j-2AXXXXXXGAPLF")
        .with_output(ACCUMULO_INSTANCE_NAME_OUTPUT, "accumulo")
}

#[cfg(test)]
mod tests {
    use crate::error::DashboardUpdaterError;
    use crate::stack::{performance_test_stack, PerformanceTestOutputs, Stack};
    use std::convert::TryFrom;

    #[test]
    fn test_is_performance_test_stack() {
        assert!(performance_test_stack("perf").is_performance_test_stack());
        assert!(!Stack::new("untagged").is_performance_test_stack());
        assert!(!Stack::new("other")
            .with_output("GafferTemplateType", "gaffer-road-traffic")
            .is_performance_test_stack());
    }

    #[test]
    fn test_outputs_try_from() {
        let outputs = PerformanceTestOutputs::try_from(&performance_test_stack("perf")).unwrap();
        assert_eq!(
            outputs,
            PerformanceTestOutputs {
                data_generator_group: "data-gen-asg".to_string(),
                query_generator_group: "query-gen-asg".to_string(),
                emr_cluster_id: "j-2AXXXXXXGAPLF".to_string(),
                accumulo_instance_name: "accumulo".to_string(),
            }
        );
    }

    #[test]
    fn test_outputs_missing_key() {
        let mut stack = performance_test_stack("perf");
        stack.outputs.remove("EmrClusterId");
        assert_eq!(
            PerformanceTestOutputs::try_from(&stack).err().unwrap(),
            DashboardUpdaterError::MissingOutput("EmrClusterId".to_string())
        );
    }
}
