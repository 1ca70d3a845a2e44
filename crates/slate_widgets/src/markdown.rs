//! Markdown viewer
//!
//! Parses a document with pulldown-cmark into a flat list of typed blocks
//! the application renders with theme-driven styling. Inline emphasis,
//! strong, and code spans are carried as flags on [`TextSpan`]s; the
//! rendering side maps each block to a font, size, and color through
//! [`MarkdownViewer::block_style`].

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use slate_core::{Color, FontId, Theme};
use std::path::Path;

/// One styled run of inline text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

/// One parsed block element
#[derive(Clone, Debug, PartialEq)]
pub enum MarkdownBlock {
    Heading {
        /// 1..=6
        level: u8,
        spans: Vec<TextSpan>,
    },
    Paragraph(Vec<TextSpan>),
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<Vec<TextSpan>>,
    },
    Rule,
}

/// Style resolved for one block against the current theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    pub font: FontId,
    pub font_size: f32,
    pub color: Color,
    /// Filled behind the block when present (code blocks)
    pub background: Option<Color>,
}

/// Parsed document plus the fonts it renders with
#[derive(Clone, Debug, Default)]
pub struct MarkdownViewer {
    blocks: Vec<MarkdownBlock>,
    base_font: FontId,
    code_font: FontId,
}

impl MarkdownViewer {
    pub fn new(base_font: FontId, code_font: FontId) -> Self {
        Self {
            blocks: Vec::new(),
            base_font,
            code_font,
        }
    }

    /// Replace the document from markdown text
    pub fn load_str(&mut self, text: &str) {
        self.blocks = parse(text);
        tracing::debug!(blocks = self.blocks.len(), "markdown document loaded");
    }

    /// Replace the document from a file
    pub fn load_file(&mut self, path: &Path) -> std::io::Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.load_str(&text);
        Ok(())
    }

    pub fn blocks(&self) -> &[MarkdownBlock] {
        &self.blocks
    }

    /// Heading sizes shrink with depth, floored for readability
    pub fn heading_font_size(level: u8) -> f32 {
        (24.0 - f32::from(level) * 3.0).max(10.0)
    }

    /// Font, size, and colors for one block under `theme`
    pub fn block_style(&self, block: &MarkdownBlock, theme: &Theme) -> BlockStyle {
        match block {
            MarkdownBlock::Heading { level, .. } => BlockStyle {
                font: self.base_font,
                font_size: Self::heading_font_size(*level),
                color: theme.text,
                background: None,
            },
            MarkdownBlock::Paragraph(_) | MarkdownBlock::List { .. } => BlockStyle {
                font: self.base_font,
                font_size: 16.0,
                color: theme.text,
                background: None,
            },
            MarkdownBlock::CodeBlock { .. } => BlockStyle {
                font: self.code_font,
                font_size: 14.0,
                color: theme.text_secondary,
                background: Some(theme.secondary),
            },
            MarkdownBlock::Rule => BlockStyle {
                font: self.base_font,
                font_size: 16.0,
                color: theme.text_secondary,
                background: None,
            },
        }
    }
}

/// Streaming parse into the block model. Nested lists flatten into their
/// parent's item list; deeper inline structure than bold/italic/code keeps
/// the flags of its innermost style.
fn parse(text: &str) -> Vec<MarkdownBlock> {
    let mut blocks = Vec::new();
    let mut spans: Vec<TextSpan> = Vec::new();
    let mut bold_depth = 0u32;
    let mut italic_depth = 0u32;

    let mut heading_level: Option<u8> = None;
    let mut code_language: Option<String> = None;
    let mut code_text = String::new();
    let mut in_code_block = false;

    let mut list_ordered = false;
    let mut list_items: Vec<Vec<TextSpan>> = Vec::new();
    let mut item_spans: Vec<TextSpan> = Vec::new();
    let mut list_depth = 0u32;

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading_level = Some(level as u8);
                spans.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(level) = heading_level.take() {
                    blocks.push(MarkdownBlock::Heading {
                        level,
                        spans: std::mem::take(&mut spans),
                    });
                }
            }
            Event::Start(Tag::Paragraph) => {
                if list_depth == 0 {
                    spans.clear();
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if list_depth == 0 && !spans.is_empty() {
                    blocks.push(MarkdownBlock::Paragraph(std::mem::take(&mut spans)));
                }
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_text.clear();
                code_language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                blocks.push(MarkdownBlock::CodeBlock {
                    language: code_language.take(),
                    text: std::mem::take(&mut code_text),
                });
            }
            Event::Start(Tag::List(start)) => {
                list_depth += 1;
                if list_depth == 1 {
                    list_ordered = start.is_some();
                    list_items.clear();
                }
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    blocks.push(MarkdownBlock::List {
                        ordered: list_ordered,
                        items: std::mem::take(&mut list_items),
                    });
                }
            }
            Event::Start(Tag::Item) => {
                if list_depth == 1 {
                    item_spans.clear();
                }
            }
            Event::End(TagEnd::Item) => {
                if list_depth == 1 {
                    list_items.push(std::mem::take(&mut item_spans));
                }
            }
            Event::Start(Tag::Strong) => bold_depth += 1,
            Event::End(TagEnd::Strong) => bold_depth = bold_depth.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic_depth += 1,
            Event::End(TagEnd::Emphasis) => italic_depth = italic_depth.saturating_sub(1),
            Event::Rule => blocks.push(MarkdownBlock::Rule),
            Event::Text(text) => {
                if in_code_block {
                    code_text.push_str(&text);
                } else {
                    let span = TextSpan {
                        text: text.to_string(),
                        bold: bold_depth > 0,
                        italic: italic_depth > 0,
                        code: false,
                    };
                    if list_depth > 0 {
                        item_spans.push(span);
                    } else {
                        spans.push(span);
                    }
                }
            }
            Event::Code(text) => {
                let span = TextSpan {
                    text: text.to_string(),
                    bold: bold_depth > 0,
                    italic: italic_depth > 0,
                    code: true,
                };
                if list_depth > 0 {
                    item_spans.push(span);
                } else {
                    spans.push(span);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                let target = if list_depth > 0 {
                    &mut item_spans
                } else {
                    &mut spans
                };
                if let Some(last) = target.last_mut() {
                    last.text.push(' ');
                }
            }
            _ => {}
        }
    }

    blocks
}
