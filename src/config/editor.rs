//! Config Editor Module
//!
//! Rewrites dependency blocks of package.kdl through the KDL AST. Only the
//! blocks being changed are replaced; every other node, comment and blank
//! line in the file is written back as it was read.

use crate::config::kdl::parse_document;
use crate::config::render::render_dependency_section;
use crate::config::types::{DependencyKind, DependencyMap};
use crate::error::{OpkError, Result};
use crate::utils::atomic::write_atomic;
use kdl::{KdlDocument, KdlNode};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Replace the given dependency blocks in the config file at `path`.
/// An empty map removes its block; a block missing from the file is
/// appended. Returns whether the file changed.
pub fn write_dependency_sections(
    path: &Path,
    sections: &BTreeMap<DependencyKind, DependencyMap>,
) -> Result<bool> {
    if sections.is_empty() {
        return Ok(false);
    }

    let content = fs::read_to_string(path).map_err(|e| OpkError::io(path, e))?;
    let updated = rewrite_sections(&content, &file_label(path), sections)?;
    if updated == content {
        return Ok(false);
    }

    write_atomic(path, &updated)?;
    Ok(true)
}

/// Content-level rewrite, independent of the filesystem
pub fn rewrite_sections(
    content: &str,
    file: &str,
    sections: &BTreeMap<DependencyKind, DependencyMap>,
) -> Result<String> {
    let mut source = content.to_string();
    if !source.is_empty() && !source.ends_with('\n') {
        source.push('\n');
    }
    let mut doc = parse_document(&source, file)?;

    for (kind, map) in sections {
        let position = doc
            .nodes()
            .iter()
            .position(|n| n.name().value() == kind.kdl_name());

        match (position, map.is_empty()) {
            (Some(idx), true) => {
                doc.nodes_mut().remove(idx);
            }
            (Some(idx), false) => {
                doc.nodes_mut()[idx] = section_node(*kind, map, file)?;
            }
            (None, true) => {}
            (None, false) => {
                doc.nodes_mut().push(section_node(*kind, map, file)?);
            }
        }
    }

    let updated = doc.to_string();

    // The written file must stay loadable
    parse_document(&updated, file)?;
    Ok(updated)
}

/// Parse a freshly rendered block so the new node carries normal layout
fn section_node(kind: DependencyKind, map: &DependencyMap, file: &str) -> Result<KdlNode> {
    let rendered = render_dependency_section(kind, map);
    let doc: KdlDocument = parse_document(&rendered, file)?;
    doc.nodes().first().cloned().ok_or_else(|| OpkError::ParseError {
        file: file.to_string(),
        message: format!("rendered '{}' block is empty", kind.kdl_name()),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
