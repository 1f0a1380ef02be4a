//! Frontend files of the catalogue browser.
//!
//! Three files make up the frontend: `js/index.js` drives the navigation,
//! `js/stage.js` hands demo properties to a component and `css/base.css`
//! styles the index page. Release builds compile them in with the `embed`
//! feature; without it they are read from `frontend/` on every request, so
//! edits show up without rebuilding.

use std::borrow::Cow;

/// A frontend file ready to be served.
#[derive(Debug)]
pub struct Asset {
    /// Raw file content.
    pub content: Cow<'static, [u8]>,
    /// Essence of the guessed MIME type, e.g. `text/css`.
    pub mime: String,
}

#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "../../frontend"]
struct Embedded;

#[cfg(not(feature = "embed"))]
const FRONTEND_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../frontend");

/// Load the frontend file `name`, a slash-separated path below `frontend/`.
///
/// Returns `None` for unknown files and for names that try to leave the
/// frontend directory.
pub fn load(name: &str) -> Option<Asset> {
    if !is_plain_name(name) {
        return None;
    }
    read(name).map(|content| Asset {
        content,
        mime: mime_for(name),
    })
}

#[cfg(feature = "embed")]
fn read(name: &str) -> Option<Cow<'static, [u8]>> {
    Embedded::get(name).map(|file| file.data)
}

#[cfg(not(feature = "embed"))]
fn read(name: &str) -> Option<Cow<'static, [u8]>> {
    let path = std::path::Path::new(FRONTEND_DIR).join(name);
    std::fs::read(path).ok().map(Cow::Owned)
}

/// Relative, forward-slash name without empty, `.` or `..` segments.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && name
            .split('/')
            .all(|segment| !matches!(segment, "" | "." | ".."))
}

fn mime_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_load_frontend_files() {
        let css = load("css/base.css").unwrap();
        assert_eq!(css.mime, "text/css");
        assert!(!css.content.is_empty());

        assert_eq!(load("js/index.js").unwrap().mime, "text/javascript");
        assert!(load("js/stage.js").is_some());
    }

    #[test]
    fn test_load_unknown_file() {
        assert!(load("js/missing.js").is_none());
    }

    #[test]
    fn test_load_refuses_escaping_names() {
        assert!(load("../Cargo.toml").is_none());
        assert!(load("css/../../Cargo.toml").is_none());
        assert!(load("/etc/passwd").is_none());
        assert!(load("css\\base.css").is_none());
        assert!(load("").is_none());
    }

    #[test]
    fn test_mime_fallback() {
        assert_eq!(mime_for("notes.unknown_ext_xyz"), "application/octet-stream");
    }
}
