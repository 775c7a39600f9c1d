//! Forces column-major interpretation of HLSL matrices.
//!
//! The cross-compiler assumes row-major layout for unqualified matrix types,
//! which transposes every matrix once the shader runs under OpenGL. Prefixing
//! each matrix declaration with `column_major` keeps the layout the engine
//! uploads.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Qualifier inserted in front of matrix types.
pub const COLUMN_MAJOR: &str = "column_major";

/// Matrix type tokens that receive the qualifier.
pub const MATRIX_TYPES: [&str; 2] = ["matrix", "float3x3"];

/// Qualifiers that already fix the layout of the following matrix type.
const MAJORNESS_QUALIFIERS: [&str; 2] = ["column_major", "row_major"];

// A matrix token preceded by a word boundary and followed by whitespace.
static MATRIX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({})(\s)", MATRIX_TYPES.join("|")))
        .expect("matrix token pattern is a valid regex")
});

/// Prefixes every standalone `matrix` and `float3x3` token with `column_major `.
///
/// A token only counts when it starts at the beginning of the text or after a
/// non-word character, and is directly followed by whitespace: `matrix4` and
/// `float3x3foo` are left alone. Tokens already qualified with `column_major`
/// or `row_major` are kept as written.
pub fn annotate_column_major(source: &str) -> Cow<'_, str> {
    let annotated = MATRIX_TOKEN.replace_all(source, |caps: &Captures<'_>| {
        let whole = &caps[0];
        let start = caps.get(0).map_or(0, |m| m.start());
        if is_qualified(&source[..start]) {
            whole.to_string()
        } else {
            format!("{COLUMN_MAJOR} {whole}")
        }
    });
    if let Cow::Owned(_) = annotated {
        log::trace!("Annotated matrix declarations with {}", COLUMN_MAJOR);
    }
    annotated
}

/// Whether `prefix` ends in a majorness qualifier (plus optional whitespace).
fn is_qualified(prefix: &str) -> bool {
    let trimmed = prefix.trim_end();
    if trimmed.len() == prefix.len() {
        // The qualifier must be separated from the type by whitespace
        return false;
    }
    MAJORNESS_QUALIFIERS.iter().any(|qualifier| {
        trimmed.strip_suffix(qualifier).is_some_and(|before| {
            !before
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_annotates_leading_matrix() {
        assert_eq!(
            annotate_column_major("matrix view;"),
            "column_major matrix view;"
        );
    }

    #[test]
    fn test_leaves_longer_identifiers() {
        assert_eq!(annotate_column_major("float3x3foo"), "float3x3foo");
        assert_eq!(annotate_column_major("matrix4 m;"), "matrix4 m;");
        assert_eq!(annotate_column_major("my_matrix x;"), "my_matrix x;");
        assert_eq!(annotate_column_major("float3x3[2] m;"), "float3x3[2] m;");
    }

    #[test]
    fn test_keeps_trailing_whitespace() {
        assert_eq!(annotate_column_major("a matrix\n"), "a column_major matrix\n");
        assert_eq!(
            annotate_column_major("\tfloat3x3\tnormalMatrix;"),
            "\tcolumn_major float3x3\tnormalMatrix;"
        );
    }

    #[test]
    fn test_annotates_every_occurrence() {
        let source = "cbuffer PerScene : register(b0) {\n    matrix projection;\n    matrix view;\n}\n";
        let expected = "cbuffer PerScene : register(b0) {\n    column_major matrix projection;\n    column_major matrix view;\n}\n";
        assert_eq!(annotate_column_major(source), expected);
    }

    #[test]
    fn test_adjacent_tokens() {
        assert_eq!(
            annotate_column_major("matrix matrix "),
            "column_major matrix column_major matrix "
        );
    }

    #[test]
    fn test_respects_existing_qualifiers() {
        let source = "column_major matrix MVP;\nrow_major float3x3 n;\n";
        assert_eq!(annotate_column_major(source), source);
        // A qualifier glued to a longer identifier does not count
        assert_eq!(
            annotate_column_major("xcolumn_major matrix m;"),
            "xcolumn_major column_major matrix m;"
        );
    }

    #[test]
    fn test_untouched_source_is_borrowed() {
        assert!(matches!(
            annotate_column_major("float4 color : COLOR;"),
            Cow::Borrowed(_)
        ));
    }

    proptest! {
        #[test]
        fn annotation_is_idempotent(words in prop::collection::vec(
            prop::sample::select(vec![
                "matrix", "float3x3", "column_major", "row_major", "m", "_", "4", " ", "\n", ";", "(",
            ]),
            0..24,
        )) {
            let source = words.concat();
            let once = annotate_column_major(&source).into_owned();
            let twice = annotate_column_major(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn text_without_matrix_types_is_unchanged(source in "[a-z0-9_ ;\n]{0,64}") {
            prop_assume!(!source.contains("matrix") && !source.contains("float3x3"));
            prop_assert_eq!(annotate_column_major(&source), source.as_str());
        }
    }
}
