//! Design definitions tree for DSK.
//!
//! A design-system catalogue is a directory tree: every directory is one
//! component (or a group of them). This crate discovers that tree and gives
//! lazy access to what each directory contains:
//!
//! - `index.json` with an optional import alias and demo property sets
//! - `readme.md` documentation, rendered to HTML
//! - `*.css` / `*.js` files, bundled into one buffer per extension
//!
//! Every path derived from external input must pass [`validate`] before it
//! touches the filesystem; [`node_at`] does this for single-node access.
//!
//! # Example
//!
//! ```no_run
//! use dsk_tree::{DemoSelector, TreeBuilder, node_at};
//!
//! let tree = TreeBuilder::new("/catalog").build()?;
//! println!("{} components", tree.len() - 1);
//!
//! let button = node_at("Forms/Button", "/catalog")?;
//! let css = button.css()?;
//! let demo = button.demo_variant(DemoSelector::parse("1"))?;
//! # Ok::<(), dsk_tree::TreeError>(())
//! ```

mod bundle;
mod demo;
mod error;
mod guard;
pub mod markdown;
mod meta;
mod node;
mod tree;

pub use bundle::{asset_files, bundle};
pub use demo::{DemoSelector, split_variant};
pub use error::{Result, TreeError};
pub use guard::{normalize, validate};
pub use meta::{META_FILENAME, NodeMeta, PropSet};
pub use node::{Crumb, Node, README_FILENAME, ROOT_URL, node_at};
pub use tree::{Tree, TreeBuilder};
