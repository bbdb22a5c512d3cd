use crate::error::DashboardUpdaterError;
use crate::metric::MetricSpec;
use serde::Serialize;

pub const GRID_WIDTH: u32 = 24;
const PERIOD_SECONDS: u32 = 60;
const DEFAULT_GRAPH_WIDTH: u32 = 8;
const DEFAULT_GRAPH_HEIGHT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Widget {
    #[serde(rename = "text")]
    Header(HeaderWidget),
    #[serde(rename = "metric")]
    Graph(GraphWidget),
}

impl Widget {
    #[cfg(test)]
    pub fn position(&self) -> Position {
        match self {
            Widget::Header(header) => header.position,
            Widget::Graph(graph) => graph.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderWidget {
    #[serde(flatten)]
    pub position: Position,
    pub properties: TextProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextProperties {
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphWidget {
    #[serde(flatten)]
    pub position: Position,
    pub properties: GraphProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Stat {
    Average,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum View {
    #[serde(rename = "timeSeries")]
    TimeSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphProperties {
    pub title: String,
    pub metrics: Vec<MetricSpec>,
    pub period: u32,
    pub region: String,
    pub stat: Stat,
    pub view: View,
    pub stacked: bool,
}

/// What to draw in a graph and how much of the grid it takes.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSpec {
    pub title: String,
    pub metrics: Vec<MetricSpec>,
    pub width: u32,
    pub height: u32,
    pub stacked: bool,
}

impl GraphSpec {
    pub fn new(title: impl Into<String>, metrics: Vec<MetricSpec>) -> Self {
        GraphSpec {
            title: title.into(),
            metrics,
            width: DEFAULT_GRAPH_WIDTH,
            height: DEFAULT_GRAPH_HEIGHT,
            stacked: false,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[cfg(test)]
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
    pub row_height: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            row_height: 1,
        }
    }
}

/// Packs widgets left to right into rows of a fixed-width grid.
///
/// A graph that would overflow the grid starts a new row below the tallest
/// graph of the current one. Headers always start a new row (unless the cursor
/// is already at the left edge), span the full width, and move the cursor one
/// row down.
#[derive(Debug)]
pub struct LayoutEngine {
    cursor: Cursor,
    max_x: u32,
    region: String,
    widgets: Vec<Widget>,
}

impl LayoutEngine {
    pub fn new(region: impl Into<String>) -> Self {
        LayoutEngine {
            cursor: Cursor::default(),
            max_x: GRID_WIDTH,
            region: region.into(),
            widgets: vec![],
        }
    }

    #[cfg(test)]
    pub fn with_max_x(mut self, max_x: u32) -> Self {
        self.max_x = max_x;
        self
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[cfg(test)]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn into_widgets(self) -> Vec<Widget> {
        self.widgets
    }

    fn flush_row(&mut self) {
        self.cursor.x = 0;
        self.cursor.y += self.cursor.row_height;
        self.cursor.row_height = 1;
    }

    pub fn place_header(&mut self, markdown: impl Into<String>) -> Position {
        if self.cursor.x > 0 {
            self.flush_row();
        }

        let position = Position {
            x: self.cursor.x,
            y: self.cursor.y,
            width: self.max_x,
            height: 1,
        };
        self.widgets.push(Widget::Header(HeaderWidget {
            position,
            properties: TextProperties {
                markdown: markdown.into(),
            },
        }));

        self.cursor.y += 1;
        self.cursor.row_height = 1;
        position
    }

    pub fn place_graph(&mut self, spec: GraphSpec) -> Result<Position, DashboardUpdaterError> {
        if spec.width == 0 || spec.width > self.max_x || spec.height == 0 {
            return Err(DashboardUpdaterError::InvalidWidgetSize {
                width: spec.width,
                height: spec.height,
                max_x: self.max_x,
            });
        }

        if self.cursor.x + spec.width > self.max_x {
            self.flush_row();
        }

        let position = Position {
            x: self.cursor.x,
            y: self.cursor.y,
            width: spec.width,
            height: spec.height,
        };
        self.widgets.push(Widget::Graph(GraphWidget {
            position,
            properties: GraphProperties {
                title: spec.title,
                metrics: spec.metrics,
                period: PERIOD_SECONDS,
                region: self.region.clone(),
                stat: Stat::Average,
                view: View::TimeSeries,
                stacked: spec.stacked,
            },
        }));

        self.cursor.x += spec.width;
        self.cursor.row_height = self.cursor.row_height.max(spec.height);
        Ok(position)
    }
}
