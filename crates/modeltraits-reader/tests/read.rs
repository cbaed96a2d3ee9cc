use modeltraits_core::geometry::{Dimension, GeometryEntity, GeometrySet};
use modeltraits_core::value::{BoundaryValue, EquationType, ValueKind};
use modeltraits_reader::memory::{ComponentSpec, Document, ItemSpec, MemoryTree, NodeSpec};
use modeltraits_reader::{ErrorCode, ReadOptions, read_model_traits};

fn read(doc: &Document, options: &ReadOptions) -> modeltraits_reader::Harvest {
    read_model_traits(&MemoryTree::from_document(doc), options).expect("Failed to read")
}

#[test]
fn test_inlet_velocity_expression() {
    let doc = Document::new(vec![NodeSpec::case("case1", "fluids").with_child(
        NodeSpec::category("Inlet")
            .with_association(vec![ItemSpec::face(7)])
            .with_child(NodeSpec::expression("double", "velocity", "$x + $t")),
    )]);

    let harvest = read(&doc, &ReadOptions::default());
    let traits = harvest.traits();

    assert_eq!(traits.image_class(), "fluids");
    let inlet = traits.case("case1").unwrap().category("Inlet").unwrap();
    let bcs = inlet.boundary_conditions();
    assert_eq!(bcs.len(), 1);
    assert_eq!(bcs[0].name(), "velocity");

    let expected: GeometrySet = [GeometryEntity::new(Dimension::Face, 7)]
        .into_iter()
        .collect();
    assert_eq!(bcs[0].geometry(), &expected);

    match bcs[0].value() {
        BoundaryValue::Function(function) => {
            assert_eq!(function.value_kind(), ValueKind::Scalar);
            assert_eq!(function.rank(), 0);
            assert_eq!(function.equation_type(), EquationType::SpaceTime);
            assert_eq!(function.expressions()[0].text(), "$x + $t");
        }
        other => panic!("Expected function value, got {other}"),
    }
}

#[test]
fn test_two_cases_share_image_class() {
    let doc = Document::new(vec![
        NodeSpec::case("steady", "fluids")
            .with_association(vec![ItemSpec::model(1)])
            .with_child(NodeSpec::category("Wall").with_child(NodeSpec::double("temperature", 300.0))),
        NodeSpec::case("transient", "fluids")
            .with_association(vec![ItemSpec::model(1)])
            .with_child(NodeSpec::category("Wall").with_child(NodeSpec::double("temperature", 310.0))),
    ]);

    let harvest = read(&doc, &ReadOptions::default());
    let cases = harvest.traits().cases();

    assert_eq!(cases.len(), 2);
    for case in cases {
        let wall = case.category("Wall").unwrap();
        let bc = &wall.boundary_conditions()[0];
        assert!(bc.geometry().contains(&GeometryEntity::new(Dimension::Model, 1)));
    }
}

#[test]
fn test_mismatched_image_classes_fail() {
    let doc = Document::new(vec![
        NodeSpec::case("a", "fluids"),
        NodeSpec::case("b", "structures"),
    ]);

    let err = read_model_traits(&MemoryTree::from_document(&doc), &ReadOptions::default())
        .expect_err("image classes differ");

    assert_eq!(err.fatal().and_then(|d| d.code()), Some(ErrorCode::E202));
}

#[test]
fn test_two_associations_fail() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_child(
        NodeSpec::category("Inlet")
            .with_association(vec![ItemSpec::face(1)])
            .with_association(vec![ItemSpec::face(2)])
            .with_child(NodeSpec::double("p", 1.0)),
    )]);

    let err = read_model_traits(&MemoryTree::from_document(&doc), &ReadOptions::default())
        .expect_err("two associations");

    let fatal = err.fatal().unwrap();
    assert_eq!(fatal.code(), Some(ErrorCode::E200));
    assert_eq!(fatal.node(), Some("c/Inlet"));
}

#[test]
fn test_literal_vector() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_child(
        NodeSpec::category("Gravity")
            .with_child(NodeSpec::tensor1("g", vec![0.0.into(), 0.0.into(), (-9.81).into()])),
    )]);

    let harvest = read(&doc, &ReadOptions::default());
    let gravity = harvest.traits().cases()[0].category("Gravity").unwrap();

    assert_eq!(
        gravity.boundary_conditions()[0].value(),
        &BoundaryValue::Vector(vec![0.0, 0.0, -9.81])
    );
    assert!(gravity.boundary_conditions()[0].geometry().is_empty());
}

#[test]
fn test_vector_with_one_expression() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_child(
        NodeSpec::tensor1("velocity", vec![1.0.into(), "2 * $y".into(), 0.0.into()]),
    )]);

    let harvest = read(&doc, &ReadOptions::default());
    let bc = &harvest.traits().cases()[0].boundary_conditions()[0];

    let function = bc.value().as_function().expect("function value");
    assert_eq!(function.rank(), 1);
    assert_eq!(function.equation_type(), EquationType::Space);
    let texts: Vec<_> = function.expressions().iter().map(|e| e.text()).collect();
    assert_eq!(texts, vec!["1", "2 * $y", "0"]);
}

#[test]
fn test_matrix_with_expression_is_emitted_twice() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_child(
        NodeSpec::tensor2(
            "conductivity",
            vec![vec![1.0.into(), 0.0.into()], vec![0.0.into(), "1 + $t".into()]],
        ),
    )]);

    let harvest = read(&doc, &ReadOptions::default());
    let case = &harvest.traits().cases()[0];
    let bcs: Vec<_> = case.boundary_conditions_named("conductivity").collect();

    assert_eq!(bcs.len(), 2);
    assert!(bcs[0].value().is_function());
    assert!(matches!(bcs[1].value(), BoundaryValue::Matrix(_)));

    let options = ReadOptions::default().with_literal_matrix_with_function(false);
    let harvest = read(&doc, &options);
    assert_eq!(harvest.traits().cases()[0].boundary_condition_count(), 1);
}

#[test]
fn test_constant_expressions_keep_their_values() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_children([
        NodeSpec::double("pressure", 6.0).with_expression("2 * 3"),
        NodeSpec::tensor1(
            "gravity",
            vec![
                ComponentSpec::from(0.0),
                ComponentSpec::Evaluated {
                    value: -9.81,
                    expression: "-9.81".to_string(),
                },
            ],
        ),
    ])]);

    let harvest = read(&doc, &ReadOptions::default());
    let bcs = harvest.traits().cases()[0].boundary_conditions();

    assert_eq!(bcs.len(), 2);
    assert_eq!(bcs[0].value(), &BoundaryValue::Scalar(6.0));
    assert_eq!(bcs[1].value(), &BoundaryValue::Vector(vec![0.0, -9.81]));
}

#[test]
fn test_nested_categories_follow_source_order() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_children([
        NodeSpec::category("Outlet").with_child(NodeSpec::int("order", 2)),
        NodeSpec::category("Inlet").with_child(
            NodeSpec::category("Turbulence").with_child(NodeSpec::double("intensity", 0.05)),
        ),
    ])]);

    let harvest = read(&doc, &ReadOptions::default());
    let case = &harvest.traits().cases()[0];

    let names: Vec<_> = case.categories().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Outlet", "Inlet"]);
    assert!(case.find(&["Inlet", "Turbulence"]).is_some());
}

#[test]
fn test_skipped_items_are_reported_as_warnings() {
    let doc = Document::new(vec![NodeSpec::case("c", "fluids").with_child(
        NodeSpec::category("Wall")
            .with_association(vec![ItemSpec::face(4), ItemSpec::other("wall selection")])
            .with_child(NodeSpec::double("roughness", 0.01)),
    )]);

    let harvest = read(&doc, &ReadOptions::default());

    assert_eq!(harvest.warnings().len(), 1);
    assert_eq!(harvest.warnings()[0].code(), Some(ErrorCode::W001));
    let wall = harvest.traits().cases()[0].category("Wall").unwrap();
    assert_eq!(wall.boundary_conditions()[0].geometry().len(), 1);
}
