/// Fixed vertex stage shared by every program.
pub const VERTEX_WGSL: &str = include_str!("shaders/quad.wgsl");

/// Built-in fragment body used when the caller's source fails.
pub const DEFAULT_FRAGMENT: &str = include_str!("shaders/default.wgsl");

const PRELUDE: &str = include_str!("shaders/prelude.wgsl");
const FOOTER: &str = include_str!("shaders/footer.wgsl");

/// Number of lines the prelude adds before the caller's first line.
pub(crate) fn prelude_lines() -> usize {
    PRELUDE.lines().count() + 1
}

/// Produces a complete fragment module from a `main_image` body.
///
/// Layout: prelude (uniform block), a marker comment, the caller's source, then
/// the footer with `fs_main`.
pub fn wrap_fragment(source: &str) -> String {
    let mut out = String::with_capacity(PRELUDE.len() + source.len() + FOOTER.len() + 64);
    out.push_str(PRELUDE);
    out.push_str("// ── user source ──\n");
    out.push_str(source);
    if !source.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_places_source_between_prelude_and_footer() {
        let wrapped = wrap_fragment("fn main_image(p: vec2<f32>) -> vec4<f32> { return vec4<f32>(1.0); }");
        let uniform = wrapped.find("var<uniform> globals").unwrap_or(usize::MAX);
        let body = wrapped.find("fn main_image").unwrap_or(usize::MAX);
        let entry = wrapped.find("fn fs_main").unwrap_or(usize::MAX);
        assert!(uniform < body && body < entry);
    }

    #[test]
    fn user_source_starts_after_prelude() {
        let wrapped = wrap_fragment("// first\n");
        let line = wrapped.lines().nth(prelude_lines());
        assert_eq!(line, Some("// first"));
    }
}
