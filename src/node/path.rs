//! Node-path addressing.
//!
//! Paths are slash-separated name sequences. A leading slash makes the path
//! absolute: it resolves against the caller's tree root, whose name must
//! match the first segment. Relative paths resolve against the caller and may
//! use `..` to escape to the parent.

use std::fmt;
use std::str::FromStr;

use super::{Node, NodeId, id::short_type_name};
use crate::error::TreeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathSegment {
    Parent,
    Name(String),
}

/// A parsed node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    pub(crate) absolute: bool,
    pub(crate) segments: Vec<PathSegment>,
    text: String,
}

impl NodePath {
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }
}

impl FromStr for NodePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let absolute = s.starts_with('/');
        let segments = s
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                if segment == ".." {
                    PathSegment::Parent
                } else {
                    PathSegment::Name(segment.to_string())
                }
            })
            .collect();
        Ok(NodePath {
            absolute,
            segments,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for NodePath {
    fn from(s: &str) -> Self {
        s.parse().expect("node path parsing is infallible")
    }
}

fn child_named(id: NodeId, name: &str) -> Option<NodeId> {
    id.children().into_iter().find(|c| c.name() == name)
}

fn resolve(base: NodeId, path: &NodePath) -> Option<NodeId> {
    let mut segments = path.segments.iter();
    let mut current = if path.absolute {
        let root = base.tree_root();
        match segments.next() {
            Some(PathSegment::Name(name)) if *name == root.name() => root,
            _ => return None,
        }
    } else {
        base
    };
    for segment in segments {
        current = match segment {
            PathSegment::Parent => current.parent()?,
            PathSegment::Name(name) => child_named(current, name)?,
        };
    }
    Some(current)
}

impl NodeId {
    /// Resolve a path to a node id, failing hard when nothing is there.
    pub fn get_node(&self, path: impl Into<NodePath>) -> Result<NodeId, TreeError> {
        let path = path.into();
        resolve(*self, &path).ok_or_else(|| TreeError::NotFound(path.to_string()))
    }

    /// Resolve a path, returning `None` when nothing is there.
    pub fn get_node_or_null(&self, path: impl Into<NodePath>) -> Option<NodeId> {
        resolve(*self, &path.into())
    }

    /// Resolve a path and require the node to be of concrete type `T`.
    /// Distinguishes "not found" from "found but the wrong type".
    pub fn get_node_as<T: Node>(&self, path: impl Into<NodePath>) -> Result<NodeId, TreeError> {
        let path = path.into();
        let id = resolve(*self, &path).ok_or_else(|| TreeError::NotFound(path.to_string()))?;
        if id.node_is::<T>() {
            Ok(id)
        } else {
            Err(TreeError::WrongType {
                path: path.to_string(),
                expected: short_type_name::<T>(),
            })
        }
    }

    /// Typed resolution that folds both failure kinds into `None`.
    pub fn get_node_as_or_null<T: Node>(&self, path: impl Into<NodePath>) -> Option<NodeId> {
        self.get_node_as::<T>(path).ok()
    }
}
