use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};

use crate::application::render::types::RenderError;

use super::highlight::{CodeHighlighter, FenceInfo};

/// Replace fenced and indented code blocks with pre-highlighted HTML blocks.
///
/// Returns the number of blocks rewritten.
pub(crate) fn highlight_code_blocks<'a>(
    root: &'a AstNode<'a>,
    highlighter: &CodeHighlighter,
) -> Result<usize, RenderError> {
    let mut walker = CodeBlockWalker {
        highlighter,
        rewritten: 0,
    };
    walker.visit_nodes(root)?;
    Ok(walker.rewritten)
}

struct CodeBlockWalker<'a> {
    highlighter: &'a CodeHighlighter,
    rewritten: usize,
}

impl CodeBlockWalker<'_> {
    fn visit_nodes(&mut self, node: &AstNode<'_>) -> Result<(), RenderError> {
        if let Some((info, literal)) = extract_code_block(node) {
            let html = self
                .highlighter
                .highlight(&FenceInfo::parse(&info), &literal)?;
            self.rewritten += 1;

            let mut data = node.data.borrow_mut();
            data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal: html,
            });
        }

        let mut child = node.first_child();
        while let Some(next) = child {
            self.visit_nodes(next)?;
            child = next.next_sibling();
        }

        Ok(())
    }
}

fn extract_code_block(node: &AstNode<'_>) -> Option<(String, String)> {
    let data = node.data.borrow();
    if let NodeValue::CodeBlock(block) = &data.value {
        Some((block.info.clone(), block.literal.clone()))
    } else {
        None
    }
}
