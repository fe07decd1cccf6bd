//! CommonMark pass that finds regions where link syntax must be ignored.
//!
//! Fenced/indented code blocks, inline code and raw HTML are collected as
//! byte ranges; the regex link parsers skip any match starting inside them.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;

/// Byte ranges excluded from link extraction, sorted by start offset.
#[derive(Debug, Clone, Default)]
pub struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    /// Build from arbitrary ranges
    pub fn from_ranges(mut ranges: Vec<Range<usize>>) -> Self {
        ranges.sort_by_key(|r| r.start);
        Self { ranges }
    }

    /// Check if a byte offset falls within any excluded range.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        // Ranges may nest (inline code inside HTML), so any earlier range can match
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        self.ranges[..idx].iter().rev().any(|r| offset < r.end)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Collect code and HTML ranges from markdown content
pub fn excluded_ranges(content: &str) -> ExcludedRanges {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut ranges = Vec::new();
    let mut code_block_start: Option<usize> = None;

    for (event, range) in Parser::new_ext(content, opts).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                code_block_start = Some(range.start);
            }
            Event::End(TagEnd::CodeBlock) => {
                let start = code_block_start.take().unwrap_or(range.start);
                ranges.push(start..range.end);
            }
            Event::Code(_) | Event::Html(_) | Event::InlineHtml(_) => {
                ranges.push(range);
            }
            _ => {}
        }
    }

    ExcludedRanges::from_ranges(ranges)
}
