use logos::Logos;

use crate::Document;
use crate::FocusError;
use crate::FocusResult;
use crate::FocusTree;
use crate::NodeId;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: [&str; 13] = [
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Raw tokens produced by logos for flat tokenization of the markup.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("<!--")]
	CommentOpen,
	#[token("-->")]
	CommentClose,
	#[token("</")]
	EndTagOpen,
	#[token("<")]
	TagOpen,
	#[token("/>")]
	SelfClose,
	#[token(">")]
	TagClose,
	#[token("/")]
	Slash,
	#[token("=")]
	Equals,
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	#[regex(r"[a-zA-Z_:][a-zA-Z0-9_:.\-]*", priority = 5)]
	Name,
	#[regex(r#""[^"<]*""#)]
	DoubleQuoted,
	#[regex(r"'[^'<]*'")]
	SingleQuoted,
	#[regex(r#"[^<>="'/ \t\r\n]+"#, priority = 1)]
	Text,
}

/// Where newly parsed nodes are appended.
#[derive(Debug)]
enum Frame {
	Element { id: NodeId, tag: String },
	/// Inside `<template shadowrootmode>`: children go to `host`'s shadow
	/// root.
	Shadow { host: NodeId },
}

/// Walks the logos token stream and builds a [`Document`].
struct MarkupWalker<'a> {
	source: &'a str,
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
	cursor: usize,
	document: Document,
	stack: Vec<Frame>,
	text: String,
}

impl<'a> MarkupWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();
		let document = Document::new();
		let body = document.body();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			document,
			stack: vec![Frame::Element {
				id: body,
				tag: "body".to_string(),
			}],
			text: String::new(),
		}
	}

	fn peek(&self) -> Option<Result<RawToken, ()>> {
		self.raw_tokens.get(self.cursor).map(|(token, _)| *token)
	}

	fn offset(&self) -> usize {
		self.raw_tokens
			.get(self.cursor)
			.map_or(self.source.len(), |(_, span)| span.start)
	}

	fn current_slice(&self) -> &'a str {
		let (_, span) = &self.raw_tokens[self.cursor];
		&self.source[span.clone()]
	}

	fn error(&self, reason: impl Into<String>) -> FocusError {
		FocusError::Markup {
			offset: self.offset(),
			reason: reason.into(),
		}
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.peek(), Some(Ok(RawToken::Whitespace))) {
			self.cursor += 1;
		}
	}

	fn append(&mut self, node: NodeId) {
		match self.stack.last() {
			Some(Frame::Element { id, .. }) => self.document.append_child(*id, node),
			Some(Frame::Shadow { host }) => self.document.append_shadow_child(*host, node),
			None => {}
		}
	}

	/// The element new children are currently appended to.
	fn current_parent(&self) -> Option<NodeId> {
		match self.stack.last()? {
			Frame::Element { id, .. } => Some(*id),
			Frame::Shadow { host } => Some(*host),
		}
	}

	/// Turn buffered text into a text node, dropping whitespace-only runs.
	fn flush_text(&mut self) {
		let text = std::mem::take(&mut self.text);
		if text.trim().is_empty() {
			return;
		}

		let node = self.document.create_text(decode_entities(text.trim()));
		self.append(node);
	}

	fn walk(mut self) -> FocusResult<Document> {
		while let Some(token) = self.peek() {
			match token {
				Ok(RawToken::CommentOpen) => {
					self.flush_text();
					self.skip_comment()?;
				}
				Ok(RawToken::TagOpen) => {
					self.flush_text();
					self.cursor += 1;
					self.process_start_tag()?;
				}
				Ok(RawToken::EndTagOpen) => {
					self.flush_text();
					self.cursor += 1;
					self.process_end_tag()?;
				}
				_ => {
					let slice = self.current_slice();
					self.text.push_str(slice);
					self.cursor += 1;
				}
			}
		}

		self.flush_text();

		if self.stack.len() > 1 {
			let reason = match self.stack.last() {
				Some(Frame::Element { tag, .. }) => format!("unclosed element `<{tag}>`"),
				_ => "unclosed `<template shadowrootmode>`".to_string(),
			};
			return Err(self.error(reason));
		}

		Ok(self.document)
	}

	/// Skip past the `-->` that closes the comment opened at the cursor.
	/// The source is searched directly since a comment body may tokenize
	/// across the closing marker.
	fn skip_comment(&mut self) -> FocusResult<()> {
		let start = self.offset() + "<!--".len();
		let Some(relative_end) = self.source[start..].find("-->") else {
			return Err(self.error("unterminated comment"));
		};
		let end = start + relative_end + "-->".len();

		while self
			.raw_tokens
			.get(self.cursor)
			.is_some_and(|(_, span)| span.start < end)
		{
			self.cursor += 1;
		}

		Ok(())
	}

	fn expect_name(&mut self, context: &str) -> FocusResult<String> {
		match self.peek() {
			Some(Ok(RawToken::Name)) => {
				let name = self.current_slice().to_ascii_lowercase();
				self.cursor += 1;
				Ok(name)
			}
			_ => Err(self.error(format!("expected {context}"))),
		}
	}

	fn process_start_tag(&mut self) -> FocusResult<()> {
		let tag = self.expect_name("a tag name after `<`")?;
		let mut attributes: Vec<(String, String)> = Vec::new();

		let self_closing = loop {
			self.skip_whitespace();

			match self.peek() {
				Some(Ok(RawToken::TagClose)) => {
					self.cursor += 1;
					break false;
				}
				Some(Ok(RawToken::SelfClose)) => {
					self.cursor += 1;
					break true;
				}
				Some(Ok(RawToken::Name)) => {
					let name = self.expect_name("an attribute name")?;
					let value = self.process_attribute_value()?;
					attributes.push((name, value));
				}
				None => return Err(self.error(format!("unterminated start tag `<{tag}`"))),
				_ => {
					let found = self.current_slice();
					return Err(self.error(format!("unexpected `{found}` in start tag `<{tag}>`")));
				}
			}
		};

		let is_shadow_template = tag == "template"
			&& attributes
				.iter()
				.any(|(name, _)| name == "shadowrootmode" || name == "shadowroot");

		if is_shadow_template && !self_closing {
			let Some(host) = self.current_parent() else {
				return Err(self.error("shadow root template without a host"));
			};
			if host == self.document.body() {
				return Err(self.error("the document body cannot host a shadow root"));
			}

			self.document.attach_shadow(host);
			self.stack.push(Frame::Shadow { host });
			return Ok(());
		}

		let node = self.document.create_element(&tag);
		for (name, value) in &attributes {
			self.document.set_attribute(node, name, value);
		}
		self.append(node);

		if !self_closing && !VOID_ELEMENTS.contains(&tag.as_str()) {
			self.stack.push(Frame::Element { id: node, tag });
		}

		Ok(())
	}

	/// Parse `="value"`, `='value'`, `=value`, or nothing (a bare
	/// attribute, whose value is empty).
	fn process_attribute_value(&mut self) -> FocusResult<String> {
		let checkpoint = self.cursor;
		self.skip_whitespace();

		if self.peek() != Some(Ok(RawToken::Equals)) {
			self.cursor = checkpoint;
			return Ok(String::new());
		}

		self.cursor += 1;
		self.skip_whitespace();

		match self.peek() {
			Some(Ok(RawToken::DoubleQuoted | RawToken::SingleQuoted)) => {
				let slice = self.current_slice();
				self.cursor += 1;
				Ok(decode_entities(&slice[1..slice.len() - 1]))
			}
			Some(Ok(RawToken::Name | RawToken::Text | RawToken::Slash)) => {
				let mut value = String::new();
				while let Some(Ok(RawToken::Name | RawToken::Text | RawToken::Slash)) = self.peek() {
					value.push_str(self.current_slice());
					self.cursor += 1;
				}
				Ok(decode_entities(&value))
			}
			_ => Err(self.error("expected an attribute value after `=`")),
		}
	}

	fn process_end_tag(&mut self) -> FocusResult<()> {
		let tag = self.expect_name("a tag name after `</`")?;
		self.skip_whitespace();

		if self.peek() != Some(Ok(RawToken::TagClose)) {
			return Err(self.error(format!("expected `>` to close `</{tag}`")));
		}
		self.cursor += 1;

		let matches = match self.stack.last() {
			Some(Frame::Element { tag: open, .. }) => self.stack.len() > 1 && *open == tag,
			Some(Frame::Shadow { .. }) => tag == "template",
			None => false,
		};

		if !matches {
			return Err(self.error(format!("unexpected closing tag `</{tag}>`")));
		}

		self.stack.pop();
		Ok(())
	}
}

fn decode_entities(value: &str) -> String {
	if !value.contains('&') {
		return value.to_string();
	}

	value
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&apos;", "'")
		.replace("&amp;", "&")
}

/// Parse a small HTML subset into a [`Document`].
///
/// Top-level nodes are appended to the document body. A
/// `<template shadowrootmode="open">` element attaches its content as the
/// shadow tree of its parent, the same way declarative shadow DOM does.
///
/// ```
/// use focuskit_core::FocusTree;
/// use focuskit_core::parse_markup;
///
/// let document = parse_markup(r#"<div id="root"><button id="ok">OK</button></div>"#).unwrap();
/// let root = document.get_element_by_id("root").unwrap();
/// assert_eq!(document.children(root).len(), 1);
/// ```
pub fn parse_markup(source: &str) -> FocusResult<Document> {
	MarkupWalker::new(source).walk()
}
