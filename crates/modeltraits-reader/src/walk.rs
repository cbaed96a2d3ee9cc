//! Depth-first traversal of a case's attribute subtree.

use log::trace;

use modeltraits_core::traits::CategoryNode;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    extract::attach_boundary_conditions,
    geometry::build_geometry_set,
    source::{AttributeTree, RepKind},
};

/// State inherited by a node from its ancestors.
///
/// Passed by value: each child receives its own copy, so updates made while
/// visiting one subtree never leak into its siblings.
#[derive(Debug, Clone)]
pub(crate) struct WalkContext<N, M, A> {
    /// The nearest enclosing case.
    pub case: N,
    /// The model the current case is bound to.
    pub model: M,
    /// The nearest association on the path from the case.
    pub association: Option<A>,
    /// Slash-separated info types from the root case, for diagnostics.
    pub path: String,
}

pub(crate) type TreeContext<T> = WalkContext<
    <T as AttributeTree>::Node,
    <T as AttributeTree>::Model,
    <T as AttributeTree>::Association,
>;

impl<N, M, A> WalkContext<N, M, A> {
    fn descend(mut self, info_type: &str) -> Self {
        self.path.push('/');
        self.path.push_str(info_type);
        self
    }
}

/// At most one association per node; several are ambiguous.
pub(crate) fn single_association<A>(associations: Vec<A>) -> Result<Option<A>> {
    if associations.len() > 1 {
        return Err(Diagnostic::error(format!(
            "node has {} model associations",
            associations.len()
        ))
        .with_code(ErrorCode::E200)
        .with_help("a node may be associated with at most one set of model items"));
    }
    Ok(associations.into_iter().next())
}

pub(crate) struct Walker<'a, T: AttributeTree> {
    tree: &'a T,
    literal_matrix_with_function: bool,
    collector: &'a mut DiagnosticCollector,
}

impl<'a, T: AttributeTree> Walker<'a, T> {
    pub fn new(
        tree: &'a T,
        literal_matrix_with_function: bool,
        collector: &'a mut DiagnosticCollector,
    ) -> Self {
        Self {
            tree,
            literal_matrix_with_function,
            collector,
        }
    }

    /// Convert `node` and its subtree into `parent`.
    ///
    /// Diagnostics raised while visiting a node carry its path.
    pub fn walk(
        &mut self,
        parent: &mut CategoryNode,
        node: T::Node,
        ctx: TreeContext<T>,
    ) -> Result<()> {
        let ctx = ctx.descend(&self.tree.info_type(node));
        let path = ctx.path.clone();
        self.visit(parent, node, ctx)
            .map_err(|diag| diag.or_node(|| path))
    }

    fn visit(
        &mut self,
        parent: &mut CategoryNode,
        node: T::Node,
        mut ctx: TreeContext<T>,
    ) -> Result<()> {
        let tree = self.tree;
        let kind = tree.kind(node);
        let info_type = tree.info_type(node);
        trace!(path = ctx.path.as_str(), kind:%; "Visiting node");

        if kind == RepKind::Case {
            ctx.case = node;
        }

        let associations = tree.find_associations(ctx.case, &ctx.model, node)?;
        if let Some(association) = single_association(associations)? {
            ctx.association = Some(association);
        }

        let parent = if kind.is_boundary_condition() {
            let geometry = build_geometry_set(tree, ctx.association.as_ref(), self.collector)?;
            attach_boundary_conditions(
                tree,
                parent,
                node,
                geometry,
                self.literal_matrix_with_function,
                self.collector,
            )?;
            parent
        } else if kind.is_category() {
            parent.add_category(info_type)
        } else {
            return Err(Diagnostic::error(format!(
                "unsupported representation kind `{kind}`"
            ))
            .with_code(ErrorCode::E201));
        };

        for child in tree.children(node)? {
            self.walk(parent, child, ctx.clone())?;
        }
        Ok(())
    }
}
