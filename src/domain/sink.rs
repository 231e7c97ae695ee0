//! Output capability injected into traversals.

use crate::domain::arena::NodeId;

/// One record produced per visited node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub node: NodeId,
    /// Distance from the traversal start (start = 0)
    pub depth: usize,
    pub text: String,
}

/// Receiver of traversal output.
pub trait Sink {
    fn emit(&mut self, line: Line);
}

/// Sink that keeps every line, so traversal results can be inspected as data.
#[derive(Debug, Default, Clone)]
pub struct Collector {
    lines: Vec<Line>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.lines.iter().map(|l| l.node).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Sink for Collector {
    fn emit(&mut self, line: Line) {
        self.lines.push(line);
    }
}
