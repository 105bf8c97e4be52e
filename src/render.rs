//! Text rendering of a [`Tree`] in the style of tree(1)
//!
//! ```text
//! Pantera
//! ├── Far Beyond Driven
//! │   (1994)
//! │   └── 5 minutes Alone
//! └── Cowboys from Hell
//!     (1990)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::errors::TreeError;
use crate::label::ItemText;
use crate::tree::Tree;

const NEW_LINE: char = '\n';

/// The four connector strings drawn in front of labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    /// Branch of a child that has following siblings
    pub middle: String,
    /// Branch of the last child
    pub last: String,
    /// Column below an ancestor that has following siblings
    pub vertical: String,
    /// Column below a last ancestor
    pub blank: String,
}

impl Glyphs {
    pub fn unicode() -> Self {
        Self {
            middle: "├── ".into(),
            last: "└── ".into(),
            vertical: "│   ".into(),
            blank: "    ".into(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            middle: "|-- ".into(),
            last: "`-- ".into(),
            vertical: "|   ".into(),
            blank: "    ".into(),
        }
    }

    fn branch(&self, last: bool) -> &str {
        if last {
            &self.last
        } else {
            &self.middle
        }
    }

    fn column(&self, closed: bool) -> &str {
        if closed {
            &self.blank
        } else {
            &self.vertical
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Named glyph preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Style {
    #[default]
    Unicode,
    Ascii,
}

impl Style {
    pub fn glyphs(self) -> Glyphs {
        match self {
            Style::Unicode => Glyphs::unicode(),
            Style::Ascii => Glyphs::ascii(),
        }
    }
}

impl FromStr for Style {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unicode" => Ok(Style::Unicode),
            "ascii" => Ok(Style::Ascii),
            _ => Err(TreeError::InvalidStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for Style {
    type Error = TreeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Unicode => f.write_str("unicode"),
            Style::Ascii => f.write_str("ascii"),
        }
    }
}

/// Renders trees with a fixed glyph set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Printer {
    glyphs: Glyphs,
}

impl Printer {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.glyphs())
    }

    pub fn print<T: ItemText>(&self, tree: &Tree<T>) -> String {
        let mut out = String::new();
        self.print_into(tree, &mut out);
        out
    }

    /// Appends the rendering of `tree` to `out`.
    ///
    /// The root label is written unprefixed. Every descendant line is prefixed
    /// by one column per ancestor below the root (`rail`), where `true` marks an
    /// ancestor that was the last of its siblings.
    ///
    /// Traversal uses an explicit stack of sibling iterators, so arbitrarily
    /// deep trees do not grow the call stack.
    #[instrument(level = "debug", skip_all)]
    pub fn print_into<T: ItemText>(&self, tree: &Tree<T>, out: &mut String) {
        let start = out.len();
        out.push_str(&tree.text());
        out.push(NEW_LINE);

        let mut rail: Vec<bool> = Vec::new();
        let mut stack = vec![tree.items().iter()];

        while let Some(siblings) = stack.last_mut() {
            let Some(child) = siblings.next() else {
                stack.pop();
                rail.pop();
                continue;
            };
            let last = siblings.len() == 0;

            self.print_text(out, &child.text(), &rail, last);

            if !child.is_leaf() {
                rail.push(last);
                stack.push(child.items().iter());
            }
        }
        debug!("rendered {} bytes", out.len() - start);
    }

    fn print_text(&self, out: &mut String, text: &str, rail: &[bool], last: bool) {
        let mut prefix = String::new();
        for &closed in rail {
            prefix.push_str(self.glyphs.column(closed));
        }

        for (i, line) in text.split(NEW_LINE).enumerate() {
            out.push_str(&prefix);
            if i == 0 {
                out.push_str(self.glyphs.branch(last));
            } else {
                out.push_str(self.glyphs.column(last));
            }
            out.push_str(line);
            out.push(NEW_LINE);
        }
    }
}
