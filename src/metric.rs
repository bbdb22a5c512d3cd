use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<YAxis>,
}

impl RenderingHints {
    fn is_empty(&self) -> bool {
        self.label.is_none() && self.y_axis.is_none()
    }
}

/// One line of a graph, serialized the way CloudWatch dashboards expect it:
/// `[namespace, metric, dim1, value1, ..., {hints}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<(String, String)>,
    pub hints: RenderingHints,
}

impl MetricSpec {
    pub fn new(namespace: impl Into<String>, metric_name: impl Into<String>) -> Self {
        MetricSpec {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            dimensions: vec![],
            hints: RenderingHints::default(),
        }
    }

    pub fn dimension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push((key.into(), value.into()));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.hints.label = Some(label.into());
        self
    }

    pub fn y_axis(mut self, y_axis: YAxis) -> Self {
        self.hints.y_axis = Some(y_axis);
        self
    }
}

impl Serialize for MetricSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let hints = if self.hints.is_empty() { 0 } else { 1 };
        let mut seq = serializer.serialize_seq(Some(2 + self.dimensions.len() * 2 + hints))?;
        seq.serialize_element(&self.namespace)?;
        seq.serialize_element(&self.metric_name)?;
        for (key, value) in &self.dimensions {
            seq.serialize_element(key)?;
            seq.serialize_element(value)?;
        }
        if !self.hints.is_empty() {
            seq.serialize_element(&self.hints)?;
        }
        seq.end()
    }
}
