use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::{ComposeError, Embedding};

/// Longest delimiter a C++ raw string literal accepts.
pub const MAX_DELIMITER_LEN: usize = 16;

const DELIMITER_STEM: &str = "kh";

/// String literal form of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
  /// `R"delimiter(...)delimiter"`, content copied as is
  Raw { delimiter: String },
  /// `"..."` with escapes
  Escaped,
}

impl Literal {
  /// Picks the literal used to embed `content`.
  ///
  /// Verbatim embedding uses the empty delimiter unless the content contains
  /// `)"`, in which case the first of `kh`, `kh1`, `kh2`, ... whose closing
  /// sequence is absent from the content is used. Escaping is the fallback
  /// once delimiters would exceed [`MAX_DELIMITER_LEN`].
  pub fn for_content(content: &[u8], embedding: Embedding) -> Self {
    if embedding == Embedding::Escaped {
      return Literal::Escaped;
    }

    let taken = closing_delimiters(content);
    delimiter_candidates()
      .find(|candidate| !taken.contains(candidate.as_bytes()))
      .map(|delimiter| Literal::Raw { delimiter })
      .unwrap_or(Literal::Escaped)
  }
}

/// Every `d` such that `)d"` occurs in `content` with `d` short enough to be a
/// raw string delimiter.
fn closing_delimiters(content: &[u8]) -> HashSet<&[u8]> {
  let mut taken = HashSet::new();

  for (i, _) in content.iter().enumerate().filter(|(_, b)| **b == b')') {
    let rest = &content[i + 1..];
    let window = &rest[..rest.len().min(MAX_DELIMITER_LEN + 1)];
    if let Some(end) = window.iter().position(|&b| b == b'"') {
      taken.insert(&rest[..end]);
    }
  }

  taken
}

fn delimiter_candidates() -> impl Iterator<Item = String> {
  std::iter::once(String::new())
    .chain((0u64..).map(|n| match n {
      0 => DELIMITER_STEM.to_string(),
      n => format!("{DELIMITER_STEM}{n}"),
    }))
    .take_while(|candidate| candidate.len() <= MAX_DELIMITER_LEN)
}

/// One `inline char const <identifier>[] = ...;` line of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub identifier: String,
  pub content: Vec<u8>,
  pub literal: Literal,
}

impl Declaration {
  pub fn new(identifier: impl Into<String>, content: impl Into<Vec<u8>>, embedding: Embedding) -> Self {
    let content = content.into();
    let literal = Literal::for_content(&content, embedding);

    Self {
      identifier: identifier.into(),
      content,
      literal,
    }
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    let prefix = format!("inline char const {}[] = ", self.identifier);

    // Escaping grows the content by at most four bytes per input byte
    let body_size = match self.literal {
      Literal::Raw { ref delimiter } => self.content.len() + 2 * delimiter.len() + 5,
      Literal::Escaped => self.content.len() * 4 + 2,
    };

    let mut out = Vec::with_capacity(prefix.len() + body_size + 2);
    out.extend_from_slice(prefix.as_bytes());

    match &self.literal {
      Literal::Raw { delimiter } => {
        out.extend_from_slice(b"R\"");
        out.extend_from_slice(delimiter.as_bytes());
        out.push(b'(');
        out.extend_from_slice(&self.content);
        out.push(b')');
        out.extend_from_slice(delimiter.as_bytes());
        out.push(b'"');
      }
      Literal::Escaped => {
        out.push(b'"');
        escape_into(&self.content, &mut out);
        out.push(b'"');
      }
    }

    out.extend_from_slice(b";\n");
    out
  }

  pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
    out.write_all(&self.to_bytes())
  }
}

fn escape_into(content: &[u8], out: &mut Vec<u8>) {
  for &byte in content {
    match byte {
      b'\\' => out.extend_from_slice(b"\\\\"),
      b'"' => out.extend_from_slice(b"\\\""),
      b'\n' => out.extend_from_slice(b"\\n"),
      b'\t' => out.extend_from_slice(b"\\t"),
      b'\r' => out.extend_from_slice(b"\\r"),
      0x20..=0x7e => out.push(byte),
      // Always three digits, so a following digit can't extend the escape
      _ => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
    }
  }
}

/// Identifier for a source path: the file name without its final extension.
pub fn identifier_for(path: &Path) -> Result<String, ComposeError> {
  path
    .file_stem()
    .and_then(|stem| stem.to_str())
    .map(str::to_string)
    .ok_or_else(|| ComposeError::InvalidFileName {
      path: path.to_path_buf(),
    })
}

/// Whether `name` can be used as a C++ identifier as is.
pub fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  }
}

/// Reads `path` and builds its declaration.
pub fn render_declaration(path: &Path, embedding: Embedding) -> Result<Declaration, ComposeError> {
  let identifier = identifier_for(path)?;
  if !is_identifier(&identifier) {
    tracing::warn!(
      path = %path.display(),
      identifier = %identifier,
      "file name is not a valid C++ identifier, the header will not compile"
    );
  }

  let content = fs::read(path).map_err(|source| ComposeError::ReadSource {
    path: path.to_path_buf(),
    source,
  })?;

  let declaration = Declaration::new(identifier, content, embedding);
  tracing::debug!(
    path = %path.display(),
    identifier = %declaration.identifier,
    bytes = declaration.content.len(),
    literal = ?declaration.literal,
    "rendered declaration"
  );

  Ok(declaration)
}
