//! A single directory of the design definitions tree.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::bundle;
use crate::demo::DemoSelector;
use crate::error::{Result, TreeError};
use crate::guard;
use crate::markdown;
use crate::meta::{NodeMeta, PropSet};

/// Documentation file looked up in every node directory.
pub const README_FILENAME: &str = "readme.md";

/// URL of the root node.
pub const ROOT_URL: &str = "/";

/// A directory inside the design definitions tree.
///
/// Identity (`url`, `title`) is derived from the path once, at construction.
/// Everything else is read from disk on demand. The absolute path is never
/// serialized, and there is no parent link: use [`Node::parent_url`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(skip)]
    path: PathBuf,
    title: String,
    url: String,
    pub(crate) children: Vec<Node>,
}

/// One breadcrumb entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Node URL.
    pub url: String,
    /// Node title.
    pub title: String,
}

impl Node {
    /// Construct a node from its directory path.
    ///
    /// Does not touch the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidNode`] when `path` is not below `root` or a
    /// segment is not valid UTF-8.
    pub fn from_path(path: impl Into<PathBuf>, root: &Path) -> Result<Self> {
        let path = path.into();

        let url = if path == root {
            ROOT_URL.to_owned()
        } else {
            let rel = path.strip_prefix(root).map_err(|_| TreeError::InvalidNode {
                path: path.clone(),
                reason: "path is not below the root",
            })?;
            relative_url(rel).ok_or_else(|| TreeError::InvalidNode {
                path: path.clone(),
                reason: "path is not valid UTF-8",
            })?
        };

        let title = match path.file_name() {
            Some(name) => name.to_str().map(str::to_owned).ok_or_else(|| {
                TreeError::InvalidNode {
                    path: path.clone(),
                    reason: "directory name is not valid UTF-8",
                }
            })?,
            None => ROOT_URL.to_owned(),
        };

        Ok(Self {
            path,
            title,
            url,
            children: Vec::new(),
        })
    }

    /// Absolute filesystem path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the root, `"/"` for the root itself.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Directory base name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Direct children, populated only by tree construction.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.url == ROOT_URL
    }

    /// Whether this node or one of its ancestors is a dot directory.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        !self.is_root() && self.url.split('/').any(|segment| segment.starts_with('.'))
    }

    /// URL of the parent node, `None` for the root.
    #[must_use]
    pub fn parent_url(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        Some(self.url.rsplit_once('/').map_or(ROOT_URL, |(parent, _)| parent))
    }

    /// Breadcrumb trail from the top-level ancestor down to this node.
    ///
    /// The root is not included; the last element is the node itself.
    #[must_use]
    pub fn crumbs(&self) -> Vec<Crumb> {
        if self.is_root() {
            return Vec::new();
        }

        let mut crumbs = Vec::new();
        let mut end = 0;
        for segment in self.url.split('/') {
            end += segment.len();
            crumbs.push(Crumb {
                url: self.url[..end].to_owned(),
                title: segment.to_owned(),
            });
            end += 1;
        }
        crumbs
    }

    /// Parse this node's `index.json`.
    ///
    /// # Errors
    ///
    /// See [`NodeMeta::load`].
    pub fn metadata(&self) -> Result<NodeMeta> {
        NodeMeta::load(&self.path)
    }

    /// Name the rendering layer imports the component by.
    ///
    /// # Errors
    ///
    /// Fails if the metadata cannot be read.
    pub fn import_name(&self) -> Result<String> {
        let meta = self.metadata()?;
        if meta.import.is_empty() {
            Ok(self.url.clone())
        } else {
            Ok(meta.import)
        }
    }

    /// Concatenated `*.<extension>` files of this directory.
    ///
    /// # Errors
    ///
    /// See [`bundle::bundle`].
    pub fn bundled_assets(&self, extension: &str) -> Result<Vec<u8>> {
        bundle::bundle(&self.path, extension)
    }

    /// Bundled stylesheets.
    ///
    /// # Errors
    ///
    /// See [`Node::bundled_assets`].
    pub fn css(&self) -> Result<Vec<u8>> {
        self.bundled_assets("css")
    }

    /// Bundled scripts.
    ///
    /// # Errors
    ///
    /// See [`Node::bundled_assets`].
    pub fn js(&self) -> Result<Vec<u8>> {
        self.bundled_assets("js")
    }

    /// `readme.md` rendered as HTML, empty when there is no readme.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Io`] if the readme exists but cannot be read.
    pub fn documentation(&self) -> Result<String> {
        let file = self.path.join(README_FILENAME);
        match fs::read_to_string(&file) {
            Ok(content) => Ok(markdown::to_html(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(TreeError::io(file, e)),
        }
    }

    /// All demo property sets.
    ///
    /// # Errors
    ///
    /// Fails if the metadata cannot be read.
    pub fn demo_variants(&self) -> Result<Vec<PropSet>> {
        Ok(self.metadata()?.demo)
    }

    /// A single demo property set, by index or name.
    ///
    /// # Errors
    ///
    /// Fails if the metadata cannot be read or the selector matches nothing.
    pub fn demo_variant(&self, selector: impl Into<DemoSelector>) -> Result<PropSet> {
        selector.into().resolve(&self.demo_variants()?)
    }
}

/// Construct the node for `path`, which may be relative to `root`.
///
/// Validates the path with [`guard::validate`] and requires an existing
/// directory. No tree walk is performed; the node has no children.
///
/// # Errors
///
/// Returns [`TreeError::Traversal`] for paths outside `root` and
/// [`TreeError::NotFound`] if the path is not a directory.
pub fn node_at(path: impl AsRef<Path>, root: impl AsRef<Path>) -> Result<Node> {
    let root = guard::normalize(root.as_ref());
    let checked = guard::validate(path, &root)?;

    if !checked.is_dir() {
        return Err(TreeError::NotFound(checked));
    }
    Node::from_path(checked, &root)
}

/// Join the normal components of a relative path with `/`.
fn relative_url(rel: &Path) -> Option<String> {
    let mut url = String::new();
    for component in rel.components() {
        if let Component::Normal(segment) = component {
            if !url.is_empty() {
                url.push('/');
            }
            url.push_str(segment.to_str()?);
        }
    }
    if url.is_empty() {
        url.push_str(ROOT_URL);
    }
    Some(url)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::meta::META_FILENAME;

    fn catalog() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let button = dir.path().join("Button");
        fs::create_dir(&button).unwrap();
        fs::write(
            button.join(META_FILENAME),
            r#"{"import":"MyButton","demo":[{"label":"A"},{"label":"B"}]}"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("Card")).unwrap();
        dir
    }

    #[test]
    fn test_from_path_root() {
        let node = Node::from_path("/catalog", Path::new("/catalog")).unwrap();

        assert_eq!(node.url(), "/");
        assert_eq!(node.title(), "catalog");
        assert!(node.is_root());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_from_path_nested() {
        let node = Node::from_path("/catalog/Forms/Button", Path::new("/catalog")).unwrap();

        assert_eq!(node.url(), "Forms/Button");
        assert_eq!(node.title(), "Button");
        assert_eq!(node.path(), Path::new("/catalog/Forms/Button"));
    }

    #[test]
    fn test_from_path_trailing_separator() {
        let node = Node::from_path("/catalog/Forms/", Path::new("/catalog")).unwrap();
        assert_eq!(node.url(), "Forms");

        let root = Node::from_path("/catalog/", Path::new("/catalog")).unwrap();
        assert_eq!(root.url(), "/");
    }

    #[test]
    fn test_from_path_outside_root() {
        let err = Node::from_path("/elsewhere/Button", Path::new("/catalog")).unwrap_err();
        assert!(matches!(err, TreeError::InvalidNode { .. }));
    }

    #[test]
    fn test_parent_url() {
        let root = Path::new("/catalog");
        assert_eq!(Node::from_path("/catalog", root).unwrap().parent_url(), None);
        assert_eq!(
            Node::from_path("/catalog/Forms", root).unwrap().parent_url(),
            Some("/")
        );
        assert_eq!(
            Node::from_path("/catalog/Forms/Button", root)
                .unwrap()
                .parent_url(),
            Some("Forms")
        );
    }

    #[test]
    fn test_is_hidden() {
        let root = Path::new("/catalog");

        assert!(!Node::from_path("/catalog", root).unwrap().is_hidden());
        assert!(!Node::from_path("/catalog/Forms/Button", root).unwrap().is_hidden());
        assert!(Node::from_path("/catalog/.git", root).unwrap().is_hidden());
        assert!(Node::from_path("/catalog/.git/objects", root).unwrap().is_hidden());
        assert!(Node::from_path("/catalog/Forms/.draft/Button", root).unwrap().is_hidden());
    }

    #[test]
    fn test_crumbs() {
        let root = Path::new("/catalog");
        let node = Node::from_path("/catalog/Forms/Inputs/Text", root).unwrap();

        let crumbs: Vec<_> = node
            .crumbs()
            .into_iter()
            .map(|c| (c.url, c.title))
            .collect();

        assert_eq!(
            crumbs,
            vec![
                ("Forms".to_owned(), "Forms".to_owned()),
                ("Forms/Inputs".to_owned(), "Inputs".to_owned()),
                ("Forms/Inputs/Text".to_owned(), "Text".to_owned()),
            ]
        );
        assert!(Node::from_path("/catalog", root).unwrap().crumbs().is_empty());
    }

    #[test]
    fn test_serialization_omits_path() {
        let node = Node::from_path("/catalog/Button", Path::new("/catalog")).unwrap();

        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(
            value,
            json!({"title": "Button", "url": "Button", "children": []})
        );
    }

    #[test]
    fn test_import_name_from_metadata() {
        let dir = catalog();
        let node = node_at("Button", dir.path()).unwrap();

        assert_eq!(node.import_name().unwrap(), "MyButton");
    }

    #[test]
    fn test_import_name_falls_back_to_url() {
        let dir = catalog();
        let node = node_at("Card", dir.path()).unwrap();

        assert_eq!(node.metadata().unwrap(), NodeMeta::default());
        assert_eq!(node.import_name().unwrap(), "Card");
    }

    #[test]
    fn test_metadata_is_idempotent() {
        let dir = catalog();
        let node = node_at("Button", dir.path()).unwrap();

        assert_eq!(node.metadata().unwrap(), node.metadata().unwrap());
    }

    #[test]
    fn test_metadata_is_read_fresh() {
        let dir = catalog();
        let node = node_at("Card", dir.path()).unwrap();
        assert!(node.metadata().unwrap().is_empty());

        fs::write(dir.path().join("Card").join(META_FILENAME), r#"{"import":"Tile"}"#).unwrap();

        assert_eq!(node.import_name().unwrap(), "Tile");
    }

    #[test]
    fn test_demo_variant_by_index() {
        let dir = catalog();
        let node = node_at("Button", dir.path()).unwrap();

        assert_eq!(node.demo_variants().unwrap().len(), 2);
        assert_eq!(
            node.demo_variant(1_usize).unwrap(),
            PropSet(json!({"label": "B"}))
        );
        let err = node.demo_variant(5_usize).unwrap_err();
        assert!(matches!(err, TreeError::VariantIndex { index: 5, len: 2 }));
    }

    #[test]
    fn test_demo_variant_without_metadata() {
        let dir = catalog();
        let node = node_at("Card", dir.path()).unwrap();

        assert!(node.demo_variants().unwrap().is_empty());
        assert!(matches!(
            node.demo_variant(0_usize).unwrap_err(),
            TreeError::VariantIndex { index: 0, len: 0 }
        ));
    }

    #[test]
    fn test_bundled_assets() {
        let dir = catalog();
        let button = dir.path().join("Button");
        fs::write(button.join("a.css"), "a{}").unwrap();
        fs::write(button.join("b.css"), "b{}").unwrap();
        let node = node_at("Button", dir.path()).unwrap();

        assert_eq!(node.css().unwrap(), b"a{}b{}");
        assert!(matches!(
            node.bundled_assets("scss").unwrap_err(),
            TreeError::NoAssets { .. }
        ));
        assert!(matches!(node.js().unwrap_err(), TreeError::NoAssets { .. }));
    }

    #[test]
    fn test_documentation() {
        let dir = catalog();
        fs::write(
            dir.path().join("Button").join(README_FILENAME),
            "# Button\n\nPress it.",
        )
        .unwrap();

        let button = node_at("Button", dir.path()).unwrap();
        let card = node_at("Card", dir.path()).unwrap();

        assert!(button.documentation().unwrap().contains("<h1>Button</h1>"));
        assert_eq!(card.documentation().unwrap(), "");
    }

    #[test]
    fn test_node_at_rejects_traversal() {
        let dir = catalog();

        let err = node_at("../", dir.path()).unwrap_err();

        assert!(matches!(err, TreeError::Traversal { .. }));
    }

    #[test]
    fn test_node_at_missing_directory() {
        let dir = catalog();

        let err = node_at("Missing", dir.path()).unwrap_err();
        assert!(matches!(err, TreeError::NotFound(_)));

        fs::write(dir.path().join("file.txt"), "x").unwrap();
        let err = node_at("file.txt", dir.path()).unwrap_err();
        assert!(matches!(err, TreeError::NotFound(_)));
    }

    #[test]
    fn test_node_at_root() {
        let dir = catalog();

        let node = node_at("", dir.path()).unwrap();

        assert!(node.is_root());
    }
}
