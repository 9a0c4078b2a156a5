use thiserror::Error;

/// Construction-time failures. Numeric degeneracies encountered while
/// rendering (pdf underflow, a stray NaN) are not represented here; they
/// are absorbed locally by the integrator instead.
#[derive(Error, Debug)]
pub enum RenderError {
	#[error("invalid dimensions: {width}x{height}")]
	InvalidDimensions { width: usize, height: usize },

	#[error("unsupported component count: {components}")]
	InvalidComponents { components: usize },

	#[error("pixel data is empty")]
	EmptyPixelData,

	#[error("scene has no objects to render")]
	EmptyScene,

	#[error("failed to parse scene configuration: {0}")]
	Config(#[from] toml::de::Error),

	#[error("failed to serialize scene configuration: {0}")]
	ConfigSerialize(#[from] toml::ser::Error),
}
