//! Template choice and mirroring for individual placements.

use rand::Rng;
use sprinkler_config::BrushConfiguration;
use tracing::warn;

use crate::constants::MIRROR_PROBABILITY;
use crate::warning::BrushWarning;

/// Template and mirror flag picked for one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateChoice<'a, T> {
    pub template: &'a T,
    pub mirrored: bool,
}

/// Picks templates uniformly from the valid set.
#[derive(Debug, Clone)]
pub struct TemplateSelector<'a, T> {
    templates: Vec<&'a T>,
    mirror_enabled: bool,
    warnings: Vec<BrushWarning>,
}

impl<'a, T> TemplateSelector<'a, T> {
    /// Selector over an already validated template list.
    pub fn new(templates: Vec<&'a T>, mirror_enabled: bool) -> Self {
        let warnings = if templates.is_empty() {
            vec![BrushWarning::NoTemplates]
        } else {
            Vec::new()
        };
        Self {
            templates,
            mirror_enabled,
            warnings,
        }
    }

    /// Selector over the assigned templates of `config` that pass `is_valid`.
    ///
    /// Rejected templates are reported as [`BrushWarning::InvalidTemplates`];
    /// an empty result adds [`BrushWarning::NoTemplates`].
    pub fn from_config(config: &'a BrushConfiguration<T>, is_valid: impl Fn(&T) -> bool) -> Self {
        let mut invalid = 0;
        let templates: Vec<&'a T> = config
            .assigned_templates()
            .filter(|template| {
                let valid = is_valid(*template);
                if !valid {
                    invalid += 1;
                }
                valid
            })
            .collect();

        let mut selector = Self::new(templates, config.mirror_enabled);
        if invalid > 0 {
            warn!("{} template(s) failed validation and will be ignored", invalid);
            selector
                .warnings
                .insert(0, BrushWarning::InvalidTemplates { count: invalid });
        }
        selector
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn templates(&self) -> &[&'a T] {
        &self.templates
    }

    /// Warnings raised while building the valid set.
    pub fn warnings(&self) -> &[BrushWarning] {
        &self.warnings
    }

    /// Pick a template and decide mirroring. `None` when no template is valid.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<TemplateChoice<'a, T>> {
        if self.templates.is_empty() {
            return None;
        }
        let template = self.templates[rng.gen_range(0..self.templates.len())];
        let mirrored = self.mirror_enabled && rng.gen_bool(MIRROR_PROBABILITY);
        Some(TemplateChoice { template, mirrored })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sprinkler_config::BrushShape;

    #[test]
    fn test_empty_selector_warns_and_chooses_nothing() {
        let config = BrushConfiguration::<&str>::default();
        let selector = TemplateSelector::from_config(&config, |_| true);
        assert!(selector.is_empty());
        assert_eq!(selector.warnings(), &[BrushWarning::NoTemplates]);
        assert!(selector.choose(&mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn test_unassigned_slots_are_not_invalid() {
        let config = BrushConfiguration {
            templates: vec![None, Some("rock")],
            ..Default::default()
        };
        let selector = TemplateSelector::from_config(&config, |_| true);
        assert_eq!(selector.len(), 1);
        assert!(selector.warnings().is_empty());
    }

    #[test]
    fn test_invalid_templates_are_filtered() {
        let config = BrushConfiguration::new(BrushShape::Point, ["tree", "mesh_only", "bush"]);
        let selector = TemplateSelector::from_config(&config, |t| *t != "mesh_only");
        assert_eq!(selector.templates(), &[&"tree", &"bush"]);
        assert_eq!(
            selector.warnings(),
            &[BrushWarning::InvalidTemplates { count: 1 }]
        );
    }

    #[test]
    fn test_all_invalid_degrades_to_no_templates() {
        let config = BrushConfiguration::new(BrushShape::Point, ["a", "b"]);
        let selector = TemplateSelector::from_config(&config, |_| false);
        assert!(selector.is_empty());
        assert_eq!(
            selector.warnings(),
            &[
                BrushWarning::InvalidTemplates { count: 2 },
                BrushWarning::NoTemplates
            ]
        );
    }

    #[test]
    fn test_choice_is_roughly_uniform() {
        let templates = ["a", "b", "c"];
        let selector = TemplateSelector::new(templates.iter().collect(), false);
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let choice = selector.choose(&mut rng).unwrap();
            let index = templates.iter().position(|t| t == choice.template).unwrap();
            counts[index] += 1;
            assert!(!choice.mirrored);
        }
        for count in counts {
            assert!((800..1200).contains(&count), "skewed counts {counts:?}");
        }
    }

    #[test]
    fn test_mirroring_happens_about_half_the_time() {
        let templates = ["a"];
        let selector = TemplateSelector::new(templates.iter().collect(), true);
        let mut rng = StdRng::seed_from_u64(12);
        let mirrored = (0..2000)
            .filter(|_| selector.choose(&mut rng).unwrap().mirrored)
            .count();
        assert!((800..1200).contains(&mirrored), "mirrored {mirrored} of 2000");
    }
}
