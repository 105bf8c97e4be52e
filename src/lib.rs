//! Ordered label trees rendered as tree(1)-style diagrams.
//!
//! ```
//! use boxtree::Tree;
//!
//! let mut tree = Tree::new("First Level");
//! tree.add("Second level").add("Third Level");
//!
//! assert_eq!(
//!     tree.print(),
//!     "First Level\n└── Second level\n    └── Third Level\n"
//! );
//! ```

pub mod config;
pub mod errors;
pub mod label;
pub mod render;
pub mod tree;
pub mod util;

pub use config::Settings;
pub use errors::{TreeError, TreeResult};
pub use label::ItemText;
pub use render::{Glyphs, Printer, Style};
pub use tree::{Tree, TreeIterator};
