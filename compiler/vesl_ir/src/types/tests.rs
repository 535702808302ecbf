use pretty_assertions::assert_eq;

use super::*;

#[test]
fn categories_follow_shape() {
    assert_eq!(TypeDesc::FLOAT.category(), VarCategory::Scalar);
    assert_eq!(TypeDesc::vec(3).category(), VarCategory::Vector);
    assert_eq!(TypeDesc::mat(4).category(), VarCategory::Matrix);
    assert_eq!(
        TypeDesc::Sampler(SamplerDim::D2).category(),
        VarCategory::Sampler
    );
    assert_eq!(
        TypeDesc::array(TypeDesc::FLOAT, 4).category(),
        VarCategory::Array
    );
    assert_eq!(TypeDesc::structure("Light").category(), VarCategory::Other);
}

#[test]
fn only_scalar_bool_is_bool() {
    assert!(TypeDesc::BOOL.is_bool());
    assert!(!TypeDesc::Vector(ScalarKind::Bool, 2).is_bool());
    assert!(!TypeDesc::INT.is_bool());
}

#[test]
fn display_is_dialect_neutral() {
    assert_eq!(TypeDesc::vec(3).to_string(), "float3");
    assert_eq!(
        TypeDesc::Matrix {
            scalar: ScalarKind::Float,
            cols: 3,
            rows: 2
        }
        .to_string(),
        "float3x2"
    );
    assert_eq!(TypeDesc::array(TypeDesc::INT, 8).to_string(), "int[8]");
}

#[test]
fn category_indices_are_dense() {
    let all = [
        VarCategory::Scalar,
        VarCategory::Vector,
        VarCategory::Matrix,
        VarCategory::Sampler,
        VarCategory::Array,
        VarCategory::Function,
        VarCategory::Other,
    ];
    assert_eq!(all.len(), VarCategory::COUNT);
    for (i, cat) in all.into_iter().enumerate() {
        assert_eq!(cat.index(), i);
    }
}
