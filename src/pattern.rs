//! Glob and brace pattern matching against a finite set of asset names.
//!
//! Patterns are translated into anchored regular expressions once and then matched against
//! candidate names. The matcher knows nothing about the asset index so it can be tested on
//! plain string lists.

use regex::Regex;

/// Returns `true` when `pattern` uses any glob syntax.
pub fn has_glob_syntax(pattern: &str) -> bool {
  pattern.contains(['*', '?', '[', '{'])
}

/// Compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
  source: String,
  regex: Regex,
}

impl GlobPattern {
  /// Compile a glob pattern.
  pub fn new(pattern: &str) -> Result<Self, regex::Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut expression = String::from("^");
    translate(&chars, &mut expression);
    expression.push('$');

    Ok(Self {
      source: pattern.to_string(),
      regex: Regex::new(&expression)?,
    })
  }

  /// Pattern text the glob was compiled from.
  pub fn as_str(&self) -> &str {
    &self.source
  }

  /// Returns `true` when `name` matches the whole pattern.
  pub fn is_match(&self, name: &str) -> bool {
    self.regex.is_match(name)
  }

  /// Filter `names`, preserving their order.
  pub fn matches<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    names.into_iter().filter(|name| self.is_match(name)).collect()
  }
}

fn translate(chars: &[char], out: &mut String) {
  let mut i = 0;
  while i < chars.len() {
    match chars[i] {
      '\\' => {
        let escaped = chars.get(i + 1).copied().unwrap_or('\\');
        push_literal(out, escaped);
        i += 2;
      }
      '*' => {
        let run = chars[i..].iter().take_while(|&&c| c == '*').count();
        out.push_str(if run > 1 { ".*" } else { "[^/]*" });
        i += run;
      }
      '?' => {
        out.push_str("[^/]");
        i += 1;
      }
      '[' => match class_end(chars, i) {
        Some(end) => {
          push_class(out, &chars[i + 1..end]);
          i = end + 1;
        }
        None => {
          push_literal(out, '[');
          i += 1;
        }
      },
      '{' => match brace_group(chars, i) {
        Some((end, commas)) => {
          out.push_str("(?:");
          let mut start = i + 1;
          for (n, &comma) in commas.iter().chain(std::iter::once(&end)).enumerate() {
            if n > 0 {
              out.push('|');
            }
            translate(&chars[start..comma], out);
            start = comma + 1;
          }
          out.push(')');
          i = end + 1;
        }
        None => {
          push_literal(out, '{');
          i += 1;
        }
      },
      c => {
        push_literal(out, c);
        i += 1;
      }
    }
  }
}

fn push_literal(out: &mut String, c: char) {
  let mut buf = [0u8; 4];
  out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Index of the `]` closing the class opened at `open`.
///
/// A `]` directly after the opening bracket (or after a negation mark) is part of the class.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
  let mut i = open + 1;
  if matches!(chars.get(i), Some('!' | '^')) {
    i += 1;
  }
  if chars.get(i) == Some(&']') {
    i += 1;
  }
  while i < chars.len() {
    match chars[i] {
      '\\' => i += 2,
      ']' => return Some(i),
      _ => i += 1,
    }
  }
  None
}

fn push_class(out: &mut String, body: &[char]) {
  out.push('[');
  let mut rest = body;
  if let Some(('!' | '^', tail)) = rest.split_first() {
    out.push('^');
    rest = tail;
  }

  let mut i = 0;
  while i < rest.len() {
    let (c, escaped) = match rest[i] {
      '\\' if i + 1 < rest.len() => {
        i += 1;
        (rest[i], true)
      }
      c => (c, false),
    };
    if c == '-' && !escaped && i > 0 && i + 1 < rest.len() {
      out.push('-');
    } else if matches!(c, '[' | ']' | '\\' | '^' | '&' | '~' | '-') {
      out.push('\\');
      out.push(c);
    } else {
      out.push(c);
    }
    i += 1;
  }
  out.push(']');
}

/// Locate the `}` closing the group opened at `open` and its top-level commas.
///
/// Groups without a top-level comma are not alternations and yield `None`.
fn brace_group(chars: &[char], open: usize) -> Option<(usize, Vec<usize>)> {
  let mut depth = 0usize;
  let mut commas = Vec::new();
  let mut i = open;
  while i < chars.len() {
    match chars[i] {
      '\\' => i += 1,
      '[' => {
        if let Some(end) = class_end(chars, i) {
          i = end;
        }
      }
      '{' => depth += 1,
      '}' => {
        depth -= 1;
        if depth == 0 {
          return (!commas.is_empty()).then_some((i, commas));
        }
      }
      ',' if depth == 1 => commas.push(i),
      _ => {}
    }
    i += 1;
  }
  None
}
