//! Plugin entry point: turns options into registrations against a host

use crate::host::{config_string, Host};
use crate::selectors::LayoutSelectors;
use crate::space_toggle::SpaceToggle;
use crate::utilities::{alignment, effects, layout, sizing, Context, Utility};
use crate::utils::Apply;
use crate::PluginOptions;

#[derive(Debug, Clone)]
pub struct Plugin {
    options: PluginOptions,
}

impl Plugin {
    pub fn new(options: PluginOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Enabled categories: `only` minus `except`, in `only` order.
    pub fn utilities(&self) -> Vec<Utility> {
        let mut utilities = Vec::new();
        for utility in &self.options.only {
            if !self.options.except.contains(utility) && !utilities.contains(utility) {
                utilities.push(*utility);
            }
        }
        utilities
    }

    /// Categories to register. Positioned center, corner and edge rules are
    /// gated on the position toggles, so `position` is registered with them
    /// even when the options leave it out.
    pub fn registered_utilities(&self) -> Vec<Utility> {
        let mut utilities = self.utilities();
        let aligns = utilities
            .iter()
            .any(|utility| matches!(utility, Utility::Center | Utility::Corner | Utility::Edge));

        if aligns && !utilities.contains(&Utility::Position) {
            log::debug!("position utilities registered for alignment toggles");
            utilities.push(Utility::Position);
        }
        utilities
    }

    pub fn context(&self, prefix: &str) -> Context {
        Context {
            toggle: SpaceToggle::new(
                self.options.variable_namespace.clone(),
                self.options.whitespace,
            ),
            selectors: LayoutSelectors::new(prefix),
            apply: Apply::new(prefix),
            max_grid_template: self.options.max_grid_template,
        }
    }

    pub fn register(&self, host: &mut dyn Host) {
        let prefix = config_string(host, "prefix").unwrap_or_default();
        let ctx = self.context(&prefix);
        let utilities = self.registered_utilities();

        log::debug!(
            "registering {} utility categories under '--{}-*' with prefix '{}'",
            utilities.len(),
            ctx.toggle.namespace(),
            prefix
        );

        if !utilities.is_empty() {
            layout::register_condition_properties(&ctx, host);
        }

        for utility in utilities {
            log::debug!("registering {} utilities", utility);
            match utility {
                Utility::Center => alignment::register_center(&ctx, host),
                Utility::Corner => alignment::register_corner(&ctx, host),
                Utility::Edge => alignment::register_edge(&ctx, host),
                Utility::Dimension => sizing::register_dimension(&ctx, host),
                Utility::Stretch => sizing::register_stretch(&ctx, host),
                Utility::Layout => layout::register_layout(&ctx, host),
                Utility::Position => layout::register_position(&ctx, host),
                Utility::Ring => effects::register_ring(&ctx, host),
                Utility::Transition => effects::register_transition(&ctx, host),
            }
        }
    }
}
