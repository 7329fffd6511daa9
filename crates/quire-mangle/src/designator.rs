//! Designator resolution.
//!
//! Every node that can carry an identifier gets one resolved here:
//!
//! - *pure* identifiers come from `ABSOLUTE_IDENTIFIER` and
//!   `RELATIVE_IDENTIFIER` children written by the author;
//! - *derived* identifiers are computed from the title of a `LEVEL` that
//!   has no explicit identifier.
//!
//! Resolution runs in two phases. The first walks the tree read-only and
//! records identifiers keyed by the index vector of their node. The second
//! rewrites the tree, visiting children before parents and later siblings
//! before earlier ones, so every index vector is still valid when it is
//! looked up: source identifier nodes are consumed and replaced by
//! `EXPLICIT_IDENTIFIER`, `IMPLICIT_IDENTIFIER` or
//! `COLLIDING_EXPLICIT_IDENTIFIER` markers.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};

use quire_core::{
    Location, Node, NodeKind, TreePath,
    identifier::{FragmentIdentifier, IdentifierError, RelativeIdentifier},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    implicit::implicit_identifier,
};

/// Identifier maps, keyed by fragment identifier, valued by index vector.
pub type IdentifierMap = IndexMap<FragmentIdentifier, Vec<usize>>;

/// The resolved identifiers of a tree.
#[derive(Debug, Clone)]
pub struct Designators {
    tree: Node,
    pure: IdentifierMap,
    derived: IdentifierMap,
}

impl Designators {
    /// Designators of a tree that has not been resolved yet.
    pub(crate) fn unresolved(tree: &Node) -> Self {
        Self {
            tree: tree.clone(),
            pure: IdentifierMap::new(),
            derived: IdentifierMap::new(),
        }
    }

    /// The tree the index vectors refer to.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Explicit identifiers, in document order.
    pub fn pure_identifiers(&self) -> &IdentifierMap {
        &self.pure
    }

    /// Identifiers derived from titles, in document order.
    pub fn derived_identifiers(&self) -> &IdentifierMap {
        &self.derived
    }

    /// Find the node designated by `identifier`, explicit identifiers first.
    pub fn get(&self, identifier: &FragmentIdentifier) -> Option<TreePath> {
        let indices = self
            .pure
            .get(identifier)
            .or_else(|| self.derived.get(identifier))?;
        TreePath::from_indices(self.tree.clone(), indices)
    }

    /// Re-key these designators against a later version of the tree.
    ///
    /// Nodes are found again through their identifier markers. Identifiers
    /// of nodes that no longer exist are dropped.
    pub fn relocate(&self, tree: &Node) -> Designators {
        // Derived identifiers of one node, found through the marker text.
        let mut groups: HashMap<&[usize], Vec<&FragmentIdentifier>> = HashMap::new();
        for (identifier, indices) in &self.derived {
            groups.entry(indices.as_slice()).or_default().push(identifier);
        }

        let mut explicit = HashMap::new();
        let mut implicit = HashMap::new();
        collect_markers(&TreePath::new(tree.clone()), &mut explicit, &mut implicit);

        let pure = self
            .pure
            .keys()
            .filter_map(|identifier| {
                let indices = explicit.get(identifier)?;
                Some((identifier.clone(), indices.clone()))
            })
            .collect();

        let mut moved: HashMap<&FragmentIdentifier, Vec<usize>> = HashMap::new();
        for group in groups.values() {
            let Some(new_indices) = group.first().and_then(|first| implicit.get(*first)) else {
                continue;
            };
            for identifier in group {
                moved.insert(*identifier, new_indices.clone());
            }
        }
        let derived = self
            .derived
            .keys()
            .filter_map(|identifier| Some((identifier.clone(), moved.get(identifier)?.clone())))
            .collect();

        Designators {
            tree: tree.clone(),
            pure,
            derived,
        }
    }
}

fn collect_markers(
    path: &TreePath,
    explicit: &mut HashMap<FragmentIdentifier, Vec<usize>>,
    implicit: &mut HashMap<FragmentIdentifier, Vec<usize>>,
) {
    let node = path.end();
    if !node.kind().is_identifier_bearing() {
        return;
    }
    for (index, child) in node.children().iter().enumerate() {
        let target = match child.kind() {
            NodeKind::ExplicitIdentifier => &mut *explicit,
            NodeKind::ImplicitIdentifier => &mut *implicit,
            _ => {
                if let Some(child_path) = path.child(index) {
                    collect_markers(&child_path, explicit, implicit);
                }
                continue;
            }
        };
        if let Some(identifier) = child.text().and_then(|text| text.parse().ok()) {
            target.entry(identifier).or_insert_with(|| path.indices().to_vec());
        }
    }
}

/// Resolve identifiers and rewrite identifier nodes into markers.
///
/// Returns the designators of the rewritten tree and the warnings raised
/// for colliding explicit identifiers.
///
/// # Errors
///
/// - `E100` for a relative identifier with no enclosing explicit identifier.
/// - `E102` for an identifier node without valid segments.
pub fn resolve(root: &Node) -> Result<(Designators, Vec<Diagnostic>)> {
    debug!(nodes = root.subtree_size(); "Resolving designators");

    let mut collector = Collector::default();
    collector.visit(&TreePath::new(root.clone()), None)?;
    let Collector {
        pure,
        derived,
        colliding,
        diagnostics,
        ..
    } = collector;
    let warnings = diagnostics.finish()?;

    let markers = Markers::new(&pure, &derived, colliding);
    let tree = markers.enrich(TreePath::new(root.clone())).start().clone();

    // Markers shift children, so the index vectors are re-derived from them.
    let designators = Designators {
        tree: root.clone(),
        pure,
        derived,
    }
    .relocate(&tree);

    trace!(
        pure = designators.pure.len(),
        derived = designators.derived.len(),
        warnings = warnings.len();
        "Designators resolved"
    );
    Ok((designators, warnings))
}

/// Phase one: read-only collection of identifiers.
#[derive(Default)]
struct Collector {
    pure: IdentifierMap,
    first_definitions: HashMap<FragmentIdentifier, Option<Location>>,
    derived: IdentifierMap,
    derived_collisions: HashSet<FragmentIdentifier>,
    colliding: HashMap<Vec<usize>, FragmentIdentifier>,
    diagnostics: DiagnosticCollector,
}

impl Collector {
    fn visit(&mut self, path: &TreePath, enclosing: Option<&FragmentIdentifier>) -> Result<()> {
        let node = path.end();
        if !node.kind().is_identifier_bearing() {
            return Ok(());
        }

        let explicit = explicit_identifier(node, enclosing)?;
        let inner = match &explicit {
            Some(identifier) => {
                self.add_pure(identifier, path, node.location());
                Some(identifier)
            }
            None => {
                self.add_derived(node, path, enclosing);
                enclosing
            }
        };

        for index in 0..node.child_count() {
            if let Some(child) = path.child(index) {
                self.visit(&child, inner)?;
            }
        }
        Ok(())
    }

    fn add_pure(
        &mut self,
        identifier: &FragmentIdentifier,
        path: &TreePath,
        location: Option<&Location>,
    ) {
        if let Some(first) = self.first_definitions.get(identifier) {
            let mut diagnostic =
                Diagnostic::warning(format!("identifier `{identifier}` is defined multiple times"))
                    .with_code(ErrorCode::E101)
                    .with_label_opt(location, "duplicate definition")
                    .with_help("the first definition is kept; rename one of them");
            if let Some(first) = first {
                diagnostic = diagnostic.with_secondary_label(first.clone(), "first defined here");
            }
            self.diagnostics.emit(diagnostic);
            self.colliding
                .insert(path.indices().to_vec(), identifier.clone());
            return;
        }
        self.first_definitions
            .insert(identifier.clone(), location.cloned());
        self.pure
            .insert(identifier.clone(), path.indices().to_vec());
    }

    fn add_derived(
        &mut self,
        node: &Node,
        path: &TreePath,
        enclosing: Option<&FragmentIdentifier>,
    ) {
        if node.kind() != NodeKind::Level {
            return;
        }
        let Some(title) = node
            .children()
            .iter()
            .find(|child| child.kind() == NodeKind::LevelTitle)
        else {
            return;
        };
        let implicit = implicit_identifier(title);
        if implicit.is_empty() {
            return;
        }

        let absolute = FragmentIdentifier::absolute([implicit.clone()]);
        let composed = enclosing.map(|parent| FragmentIdentifier::composite(parent, [implicit]));
        for identifier in std::iter::once(absolute).chain(composed).flatten() {
            if self.derived_collisions.contains(&identifier) {
                continue;
            }
            if self.derived.shift_remove(&identifier).is_some() {
                trace!(identifier:?; "Derived identifier collides");
                self.derived_collisions.insert(identifier);
                continue;
            }
            self.derived.insert(identifier, path.indices().to_vec());
        }
    }
}

/// The explicit identifier written on `node`, if any.
fn explicit_identifier(
    node: &Node,
    enclosing: Option<&FragmentIdentifier>,
) -> Result<Option<FragmentIdentifier>> {
    let written = node.children().iter().find(|child| {
        matches!(
            child.kind(),
            NodeKind::AbsoluteIdentifier | NodeKind::RelativeIdentifier
        )
    });
    // Markers left by an earlier resolution count as absolute identifiers.
    let Some(source) = written.or_else(|| {
        node.children().iter().find(|child| {
            matches!(
                child.kind(),
                NodeKind::ExplicitIdentifier | NodeKind::CollidingExplicitIdentifier
            )
        })
    }) else {
        return Ok(None);
    };

    let text = source.text().unwrap_or_default();
    let location = source.location().or(node.location());
    let resolved = match source.kind() {
        NodeKind::RelativeIdentifier => text
            .parse::<RelativeIdentifier>()
            .and_then(|relative| relative.resolve(enclosing)),
        _ => text.parse::<FragmentIdentifier>(),
    };

    match resolved {
        Ok(identifier) => Ok(Some(identifier)),
        Err(IdentifierError::MissingParent(relative)) => Err(Diagnostic::error(format!(
            "relative identifier `{relative}` has no enclosing identifier"
        ))
        .with_code(ErrorCode::E100)
        .with_label_opt(location, "cannot be resolved")
        .with_help("give an enclosing level an absolute identifier")
        .into()),
        Err(err) => Err(Diagnostic::error(err.to_string())
            .with_code(ErrorCode::E102)
            .with_label_opt(location, ErrorCode::E102.description())
            .into()),
    }
}

/// Phase two: what to write on each position.
struct Markers {
    explicit: HashMap<Vec<usize>, FragmentIdentifier>,
    implicit: HashMap<Vec<usize>, FragmentIdentifier>,
    colliding: HashMap<Vec<usize>, FragmentIdentifier>,
}

impl Markers {
    fn new(
        pure: &IdentifierMap,
        derived: &IdentifierMap,
        colliding: HashMap<Vec<usize>, FragmentIdentifier>,
    ) -> Self {
        let explicit = pure
            .iter()
            .map(|(identifier, indices)| (indices.clone(), identifier.clone()))
            .collect();
        let mut implicit = HashMap::new();
        for (identifier, indices) in derived {
            implicit
                .entry(indices.clone())
                .or_insert_with(|| identifier.clone());
        }
        Self {
            explicit,
            implicit,
            colliding,
        }
    }

    /// Rewrite the subtree at `path`, children last-to-first, then the node.
    fn enrich(&self, mut path: TreePath) -> TreePath {
        if !path.end().kind().is_identifier_bearing() {
            return path;
        }

        for index in (0..path.end().child_count()).rev() {
            let Some(child) = path.child(index) else {
                continue;
            };
            if let Some(parent) = self.enrich(child).parent() {
                path = parent;
            }
        }

        match self.marked(path.end(), path.indices()) {
            Some(node) => path.replace_end(node),
            None => path,
        }
    }

    /// The node with source identifiers and stale markers consumed and its
    /// marker prepended, or `None` when nothing changes.
    fn marked(&self, node: &Node, indices: &[usize]) -> Option<Node> {
        let marker = if let Some(identifier) = self.colliding.get(indices) {
            Some((NodeKind::CollidingExplicitIdentifier, identifier))
        } else if let Some(identifier) = self.explicit.get(indices) {
            Some((NodeKind::ExplicitIdentifier, identifier))
        } else {
            self.implicit
                .get(indices)
                .map(|identifier| (NodeKind::ImplicitIdentifier, identifier))
        };

        let consumed = |child: &Node| {
            child.kind().is_identifier_marker()
                || matches!(
                    child.kind(),
                    NodeKind::AbsoluteIdentifier | NodeKind::RelativeIdentifier
                )
        };
        if marker.is_none() && !node.children().iter().any(consumed) {
            return None;
        }

        let mut children: Vec<Node> = Vec::with_capacity(node.child_count() + 1);
        if let Some((kind, identifier)) = marker {
            let text = identifier.absolute_representation();
            // A tree resolved before already carries its marker.
            let existing = node
                .children()
                .iter()
                .find(|child| child.kind() == kind && child.text() == Some(text.as_str()));
            children.push(existing.cloned().unwrap_or_else(|| {
                Node::new(kind)
                    .with_text(text)
                    .with_location_opt(node.location().cloned())
            }));
        }
        children.extend(node.children().iter().filter(|child| !consumed(*child)).cloned());

        if children.as_slice() == node.children() {
            return None;
        }
        Some(node.adopt(children))
    }
}
