use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// Which engine windows to open.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Particles,
    Shader,
    #[default]
    Both,
}

impl Widget {
    pub fn wants_particles(self) -> bool {
        matches!(self, Widget::Particles | Widget::Both)
    }

    pub fn wants_shader(self) -> bool {
        matches!(self, Widget::Shader | Widget::Both)
    }
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "shimmer-studio",
    version,
    about = "Particle text field and fragment shader surface in desktop windows"
)]
pub struct Cli {
    /// Engines to open, each in its own window.
    #[arg(long, value_enum, value_name = "WIDGET")]
    pub widget: Option<Widget>,

    /// WGSL file defining `fn main_image(frag_coord: vec2<f32>) -> vec4<f32>`.
    #[arg(long, value_name = "PATH")]
    pub shader: Option<PathBuf>,

    /// Shader time multiplier.
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f32>,

    /// TrueType/OpenType font for the particle headline.
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Headline text for the particle field.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Show the interaction hint under the headline.
    #[arg(long)]
    pub hint: bool,

    /// Ignore resize events and poll the window size instead.
    #[arg(long)]
    pub poll_resize: bool,

    /// TOML file with defaults; command-line flags win.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter in `env_logger` syntax (e.g. `shimmer_engine=debug`).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_leaves_everything_unset() {
        let cli = Cli::try_parse_from(["shimmer-studio"]).unwrap();
        assert_eq!(cli.widget, None);
        assert!(!cli.hint);
        assert!(cli.shader.is_none());
    }

    #[test]
    fn parses_widget_and_speed() {
        let cli = Cli::try_parse_from([
            "shimmer-studio",
            "--widget",
            "shader",
            "--speed",
            "0.5",
            "--hint",
        ])
        .unwrap();
        assert_eq!(cli.widget, Some(Widget::Shader));
        assert_eq!(cli.speed, Some(0.5));
        assert!(cli.hint);
    }

    #[test]
    fn rejects_unknown_widget() {
        assert!(Cli::try_parse_from(["shimmer-studio", "--widget", "fireworks"]).is_err());
    }

    #[test]
    fn both_wants_both() {
        assert!(Widget::Both.wants_particles() && Widget::Both.wants_shader());
        assert!(!Widget::Particles.wants_shader());
        assert!(!Widget::Shader.wants_particles());
    }
}
