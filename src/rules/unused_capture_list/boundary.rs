//! Where a capture list may appear inside a closure.

use crate::common::{ByteRange, CharRange, SourceFile};
use crate::syntax::{ExprKind, StructureNode};

/// The slice of a closure structure node the rule works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureNode {
    pub byte_offset: usize,
    pub byte_length: usize,
    /// Offset of the first nested expression, if there is one.
    pub first_child_byte_offset: Option<usize>,
}

impl ClosureNode {
    /// `None` unless `node` is a closure.
    pub fn from_structure(node: &StructureNode) -> Option<Self> {
        (node.kind == ExprKind::Closure).then(|| Self {
            byte_offset: node.byte_offset,
            byte_length: node.byte_length,
            first_child_byte_offset: node.first_child_byte_offset(),
        })
    }

    pub fn byte_range(&self) -> ByteRange {
        ByteRange::new(self.byte_offset, self.byte_length)
    }
}

/// Character range from the closure's start to its first nested expression
/// (or to its end). A capture list can only appear inside this window, so a
/// `[...]` belonging to a nested array or closure is never inspected.
pub fn capture_list_search_range(file: &SourceFile, closure: &ClosureNode) -> Option<CharRange> {
    let closure_end = closure.byte_range().end();
    let end = closure.first_child_byte_offset.unwrap_or(closure_end);
    if end > closure_end {
        return None;
    }
    let length = end.checked_sub(closure.byte_offset)?;
    file.byte_range_to_char_range(ByteRange::new(closure.byte_offset, length))
}
