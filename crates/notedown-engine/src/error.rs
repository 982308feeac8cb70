use crate::markdown::NodeType;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    /// The markdown engine produced a link-like node without source offsets.
    #[error("{node} node has no source position")]
    MissingPosition { node: NodeType },
    #[error("{node} node position {start}..{end} is outside the {len} byte source")]
    SourceOutOfRange {
        node: NodeType,
        start: usize,
        end: usize,
        len: usize,
    },
}
