//! Conversion of a whole attribute tree into model traits.

use log::{debug, info};

use modeltraits_core::traits::ModelTraits;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ReadError, Result},
    geometry::check_dimension_mapping,
    source::{AttributeTree, RepKind},
    walk::{WalkContext, Walker, single_association},
};

/// Options controlling a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    reserved_case_names: Vec<String>,
    literal_matrix_with_function: bool,
}

impl ReadOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the info types of root cases that are never converted.
    pub fn with_reserved_case_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_case_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether a matrix with symbolic components also yields its literal matrix.
    pub fn with_literal_matrix_with_function(mut self, enabled: bool) -> Self {
        self.literal_matrix_with_function = enabled;
        self
    }

    pub fn reserved_case_names(&self) -> &[String] {
        &self.reserved_case_names
    }

    pub fn literal_matrix_with_function(&self) -> bool {
        self.literal_matrix_with_function
    }

    fn is_reserved(&self, info_type: &str) -> bool {
        self.reserved_case_names
            .iter()
            .any(|name| name == info_type)
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            reserved_case_names: vec!["Meshing".to_string()],
            literal_matrix_with_function: true,
        }
    }
}

/// The result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Harvest {
    traits: ModelTraits,
    warnings: Vec<Diagnostic>,
}

impl Harvest {
    pub fn traits(&self) -> &ModelTraits {
        &self.traits
    }

    /// Warnings reported during the conversion, in order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_traits(self) -> ModelTraits {
        self.traits
    }
}

/// Convert every root case of `tree` into one [`ModelTraits`].
///
/// Root cases are the cases without a parent whose info type is not
/// reserved. They must all share one image class. Conversion stops at the
/// first fatal diagnostic; no partial result is returned.
///
/// # Errors
///
/// Returns a [`ReadError`] holding the fatal diagnostic and the warnings
/// reported before it.
///
/// # Examples
///
/// ```
/// use modeltraits_reader::{
///     ReadOptions, read_model_traits,
///     memory::{Document, ItemSpec, MemoryTree, NodeSpec},
/// };
///
/// let doc = Document::new(vec![NodeSpec::case("case1", "fluids").with_child(
///     NodeSpec::category("Inlet")
///         .with_association(vec![ItemSpec::face(7)])
///         .with_child(NodeSpec::expression("double", "velocity", "$x + $t")),
/// )]);
/// let tree = MemoryTree::from_document(&doc);
///
/// let harvest = read_model_traits(&tree, &ReadOptions::default()).unwrap();
/// let inlet = harvest.traits().case("case1").unwrap().category("Inlet").unwrap();
/// assert_eq!(inlet.boundary_conditions()[0].name(), "velocity");
/// ```
pub fn read_model_traits<T: AttributeTree>(
    tree: &T,
    options: &ReadOptions,
) -> std::result::Result<Harvest, ReadError> {
    let mut collector = DiagnosticCollector::new();
    match harvest(tree, options, &mut collector) {
        Ok(traits) => {
            info!(
                cases = traits.cases().len(),
                warnings = collector.len();
                "Model traits read"
            );
            Ok(Harvest {
                traits,
                warnings: collector.finish(),
            })
        }
        Err(fatal) => Err(collector.fail(fatal)),
    }
}

fn harvest<T: AttributeTree>(
    tree: &T,
    options: &ReadOptions,
    collector: &mut DiagnosticCollector,
) -> Result<ModelTraits> {
    check_dimension_mapping(tree.entity_type_codes())?;

    let model = tree.model();
    let mut traits: Option<ModelTraits> = None;

    for case in tree.cases()? {
        let info_type = tree.info_type(case);
        if tree.parent_count(case) != 0 || options.is_reserved(&info_type) {
            debug!(info_type = info_type.as_str(); "Skipping case");
            continue;
        }

        let name = tree.name(case);
        let kind = tree.kind(case);
        if kind != RepKind::Case {
            return Err(Diagnostic::error(format!(
                "root case reported representation kind `{kind}`"
            ))
            .with_code(ErrorCode::E201)
            .with_node(name));
        }

        let image_class = tree.image_class(case);
        if let Some(existing) = &traits {
            if existing.image_class() != image_class {
                return Err(Diagnostic::error(format!(
                    "case has image class `{image_class}` but earlier cases have `{}`",
                    existing.image_class()
                ))
                .with_code(ErrorCode::E202)
                .with_node(name)
                .with_help("all root cases of one model must share an image class"));
            }
        }
        let traits = traits.get_or_insert_with(|| ModelTraits::new(image_class.clone()));

        info!(case = name.as_str(), image_class = image_class.as_str(); "Reading case");
        let association = tree
            .find_associations(case, &model, case)
            .map_err(Diagnostic::from)
            .and_then(single_association)
            .map_err(|diag| diag.or_node(|| name.clone()))?;

        let case_node = traits.add_case(name.clone());
        let ctx = WalkContext {
            case,
            model: model.clone(),
            association,
            path: name,
        };
        let mut walker = Walker::new(tree, options.literal_matrix_with_function(), collector);
        for child in tree.children(case)? {
            walker.walk(case_node, child, ctx.clone())?;
        }
    }

    traits.ok_or_else(|| {
        Diagnostic::error("no root case to convert")
            .with_code(ErrorCode::E204)
            .with_help("the attribute tree has no case without a parent outside the reserved names")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        memory::{Document, ItemSpec, MemoryTree, NodeSpec},
        source::EntityTypeCodes,
    };

    fn read(doc: &Document) -> std::result::Result<Harvest, ReadError> {
        read_model_traits(&MemoryTree::from_document(doc), &ReadOptions::default())
    }

    fn fatal_code(err: &ReadError) -> Option<ErrorCode> {
        err.fatal().and_then(Diagnostic::code)
    }

    #[test]
    fn test_two_root_cases() {
        let doc = Document::new(vec![
            NodeSpec::case("c1", "fluids").with_association(vec![ItemSpec::region(1)]),
            NodeSpec::case("c2", "fluids").with_association(vec![ItemSpec::region(2)]),
        ]);
        let harvest = read(&doc).unwrap();
        let traits = harvest.traits();

        assert_eq!(traits.image_class(), "fluids");
        let names: Vec<_> = traits.cases().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["c1", "c2"]);
        assert!(harvest.warnings().is_empty());
    }

    #[test]
    fn test_case_name_differs_from_info_type() {
        let doc = Document::new(vec![
            NodeSpec::new("case", "flow")
                .with_name("steady")
                .with_image_class("fluids"),
        ]);
        let harvest = read(&doc).unwrap();

        assert!(harvest.traits().case("steady").is_some());
    }

    #[test]
    fn test_image_class_mismatch() {
        let doc = Document::new(vec![
            NodeSpec::case("c1", "fluids"),
            NodeSpec::case("c2", "solids"),
        ]);
        let err = read(&doc).unwrap_err();

        assert_eq!(fatal_code(&err), Some(ErrorCode::E202));
        assert_eq!(err.fatal().unwrap().node(), Some("c2"));
    }

    #[test]
    fn test_reserved_and_nested_cases_are_not_roots() {
        let doc = Document::new(vec![
            NodeSpec::case("Meshing", "mesh"),
            NodeSpec::case("c1", "fluids").with_child(NodeSpec::case("inner", "other")),
        ]);
        let harvest = read(&doc).unwrap();
        let traits = harvest.traits();

        assert_eq!(traits.image_class(), "fluids");
        assert_eq!(traits.cases().len(), 1);
        assert!(traits.case("c1").unwrap().category("inner").is_some());
    }

    #[test]
    fn test_custom_reserved_names() {
        let doc = Document::new(vec![
            NodeSpec::case("Meshing", "mesh"),
            NodeSpec::case("Scratch", "fluids"),
        ]);
        let options = ReadOptions::new().with_reserved_case_names(["Scratch"]);
        let harvest = read_model_traits(&MemoryTree::from_document(&doc), &options).unwrap();

        assert_eq!(harvest.traits().image_class(), "mesh");
    }

    #[test]
    fn test_no_root_case() {
        let doc = Document::new(vec![NodeSpec::case("Meshing", "mesh")]);
        let err = read(&doc).unwrap_err();

        assert_eq!(fatal_code(&err), Some(ErrorCode::E204));
    }

    #[test]
    fn test_root_case_with_two_associations() {
        let doc = Document::new(vec![
            NodeSpec::case("c1", "fluids")
                .with_association(vec![ItemSpec::face(1)])
                .with_association(vec![ItemSpec::face(2)]),
        ]);
        let err = read(&doc).unwrap_err();

        assert_eq!(fatal_code(&err), Some(ErrorCode::E200));
        assert_eq!(err.fatal().unwrap().node(), Some("c1"));
    }

    #[test]
    fn test_dimension_mapping_checked_first() {
        let doc = Document::new(vec![NodeSpec::case("c1", "fluids")]).with_entity_type_codes(
            EntityTypeCodes {
                region: 4,
                ..EntityTypeCodes::EXPECTED
            },
        );
        let err = read(&doc).unwrap_err();

        assert_eq!(fatal_code(&err), Some(ErrorCode::E300));
    }

    #[test]
    fn test_warnings_survive_a_fatal_error() {
        let doc = Document::new(vec![NodeSpec::case("c1", "fluids").with_children([
            NodeSpec::category("Wall")
                .with_association(vec![ItemSpec::other("selection")])
                .with_child(NodeSpec::double("t", 1.0)),
            NodeSpec::expression("double", "bad", "$w"),
        ])]);
        let err = read(&doc).unwrap_err();

        assert_eq!(fatal_code(&err), Some(ErrorCode::E100));
        assert_eq!(err.fatal().unwrap().node(), Some("c1/bad"));
        let warnings: Vec<_> = err.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::W001));
    }

    #[test]
    fn test_source_error_becomes_e001() {
        let doc = Document::new(vec![NodeSpec::case("c1", "fluids").with_child(
            NodeSpec::tensor2("k", vec![vec![1.0.into(), 2.0.into()]]),
        )]);
        let err = read(&doc).unwrap_err();

        assert_eq!(fatal_code(&err), Some(ErrorCode::E001));
        assert_eq!(err.fatal().unwrap().node(), Some("c1/k"));
    }

    #[test]
    fn test_read_options_defaults() {
        let options = ReadOptions::default();
        assert_eq!(options.reserved_case_names(), ["Meshing".to_string()]);
        assert!(options.literal_matrix_with_function());
        assert!(options.is_reserved("Meshing"));
        assert!(!options.is_reserved("meshing"));
    }
}
