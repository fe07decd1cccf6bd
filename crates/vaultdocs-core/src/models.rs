//! Data models for parsed vault notes.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: Enums replace magic strings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Position in source text (line, column, byte offset)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub length: usize,
}

impl SourcePosition {
    /// Create a new source position
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }

    /// Create position at start
    pub fn start() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Create position from byte offset by computing line and column.
    ///
    /// Line numbers start at 1, column numbers start at 1.
    pub fn from_offset(content: &str, offset: usize, length: usize) -> Self {
        let before = &content[..offset.min(content.len())];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map(|pos| offset - pos)
            .unwrap_or(offset + 1);

        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// Type of link in note content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Wikilink: `[[Note]]`
    WikiLink,
    /// Embedded note: `![[Note]]`
    Embed,
    /// Block reference: `[[Note#^block]]`
    BlockRef,
    /// Heading reference: `[[Note#Heading]]` or `file.md#section`
    HeadingRef,
    /// Same-document anchor: `#section`
    Anchor,
    /// Markdown link: `[text](url)` to relative file
    MarkdownLink,
    /// External URL: `http://...`, `https://...`, `mailto:...`
    ExternalLink,
}

impl LinkType {
    /// Whether this link points at another note in the vault
    pub fn is_internal(self) -> bool {
        matches!(
            self,
            LinkType::WikiLink
                | LinkType::Embed
                | LinkType::BlockRef
                | LinkType::HeadingRef
                | LinkType::MarkdownLink
        )
    }
}

/// A link in note content
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct Link {
    pub type_: LinkType,
    pub source_file: PathBuf,
    pub target: String,
    pub display_text: Option<String>,
    pub position: SourcePosition,
}

impl Link {
    /// Create a new link
    pub fn new(
        type_: LinkType,
        source_file: PathBuf,
        target: String,
        position: SourcePosition,
    ) -> Self {
        Self {
            type_,
            source_file,
            target,
            display_text: None,
            position,
        }
    }

    /// Attach display text
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    /// Target with heading/block fragment and `.md` suffix removed.
    ///
    /// Returns `None` for same-document anchors.
    pub fn note_target(&self) -> Option<&str> {
        let bare = self.target.split('#').next()?.trim();
        let bare = bare.strip_suffix(".md").unwrap_or(bare);
        if bare.is_empty() { None } else { Some(bare) }
    }

    /// Whether the target is a non-note file (image, pdf, media)
    pub fn is_attachment(&self) -> bool {
        let Some(bare) = self.target.split('#').next() else {
            return false;
        };
        Path::new(bare.trim())
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ATTACHMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }
}

/// Extensions treated as attachments rather than notes
pub const ATTACHMENT_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "avif", "pdf", "mp3", "wav", "ogg", "flac",
    "mp4", "webm", "mov", "mkv", "canvas", "excalidraw", "zip",
];

/// YAML frontmatter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    pub data: HashMap<String, serde_json::Value>,
}

impl Frontmatter {
    fn string_list(&self, key: &str) -> Vec<String> {
        match self.data.get(key) {
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            _ => vec![],
        }
    }

    /// Extract aliases from frontmatter
    pub fn aliases(&self) -> Vec<String> {
        self.string_list("aliases")
    }

    /// The `title` key, if it is a string
    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(|v| v.as_str())
    }
}

/// A parsed note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultFile {
    /// Path relative to the vault root
    pub path: PathBuf,
    /// Content with frontmatter stripped
    pub content: String,
    pub frontmatter: Option<Frontmatter>,
    pub links: Vec<Link>,
}

impl VaultFile {
    /// Create a new, unparsed vault file
    pub fn new(path: PathBuf, content: String) -> Self {
        Self {
            path,
            content,
            frontmatter: None,
            links: vec![],
        }
    }

    /// Note name as shown in the vault (file stem)
    pub fn name(&self) -> String {
        note_name(&self.path)
    }
}

/// Note name for a path: the file stem, or the whole path when it has none
pub fn note_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
