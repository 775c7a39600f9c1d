use crate::ShaderKind;

/// Prefix shared by vertex outputs and pixel inputs after renaming.
pub const VARYING_PREFIX: &str = "varying_";

/// Rewrites the translator's interface variable names to the varying prefix.
///
/// The cross-compiler names pixel inputs `in_var_*` and vertex outputs
/// `out_var_*`, so the two stages would never link by name. Pixel text only
/// has `in_var_` rewritten and vertex text only `out_var_`.
pub fn rename_varyings(kind: ShaderKind, translated: &str) -> String {
    translated.replace(kind.interface_prefix(), VARYING_PREFIX)
}
