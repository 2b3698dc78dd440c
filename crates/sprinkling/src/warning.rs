use thiserror::Error;

/// Non-fatal conditions reported by a brush application
///
/// None of these abort a stroke. They are logged and returned next to the
/// (possibly empty) result so the UI can show an advisory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrushWarning {
    #[error("No templates assigned; add at least one template to the brush")]
    NoTemplates,
    #[error("{count} template(s) failed validation and will be ignored")]
    InvalidTemplates { count: usize },
    #[error("Placed {placed} of {requested} objects; the brush area is saturated")]
    Saturated { placed: usize, requested: usize },
}
