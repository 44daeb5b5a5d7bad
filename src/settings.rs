use crate::color::{Catalog, ColorName};
use crate::util::Sign;

pub const MIN_CHOICES: u8 = 1;
pub const MAX_CHOICES: u8 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub num_choices: u8,
    pub forced_color: Option<ColorName>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            num_choices: 2,
            forced_color: None,
        }
    }
}

/// Everything the options screen edits. Invariants kept by every mutator:
/// - at least `num_choices` colors are enabled
/// - `forced_color`, when set, is enabled
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub catalog: Catalog,
    pub settings: GameSettings,
}

impl Options {
    pub fn new(catalog: Catalog, settings: GameSettings) -> Self {
        Self { catalog, settings }.normalized()
    }

    /// Flips the enabled flag of `name`. Returns false when the change was refused.
    pub fn toggle_color(&mut self, name: ColorName) -> bool {
        if !self.catalog.is_enabled(name) {
            self.catalog.set_enabled(name, true);
            return true;
        }

        if self.catalog.enabled_count() - 1 < usize::from(self.settings.num_choices) {
            log::debug!(
                "refusing to disable {name}: {} choices need as many colors",
                self.settings.num_choices
            );
            return false;
        }

        self.catalog.set_enabled(name, false);
        if self.settings.forced_color == Some(name) {
            self.settings.forced_color = None;
        }
        true
    }

    /// Pins `name` as the answer of every question, or unpins it if it already is.
    /// Disabled colors are ignored.
    pub fn set_forced_color(&mut self, name: ColorName) -> bool {
        if self.settings.forced_color == Some(name) {
            self.settings.forced_color = None;
            true
        } else if self.catalog.is_enabled(name) {
            self.settings.forced_color = Some(name);
            true
        } else {
            false
        }
    }

    pub fn change_choices(&mut self, sign: Sign) -> bool {
        let current = self.settings.num_choices;
        let next = current
            .saturating_add_signed(sign as i8)
            .clamp(MIN_CHOICES, MAX_CHOICES);
        if next == current || usize::from(next) > self.catalog.enabled_count() {
            return false;
        }
        self.settings.num_choices = next;
        true
    }

    pub fn increment_choices(&mut self) -> bool {
        self.change_choices(Sign::Positive)
    }

    pub fn decrement_choices(&mut self) -> bool {
        self.change_choices(Sign::Negative)
    }

    /// Repairs values that came from outside (config file, command line).
    pub fn normalized(mut self) -> Self {
        let settings = &mut self.settings;
        settings.num_choices = settings.num_choices.clamp(MIN_CHOICES, MAX_CHOICES);

        for name in ColorName::ALL {
            if self.catalog.enabled_count() >= usize::from(settings.num_choices) {
                break;
            }
            self.catalog.set_enabled(name, true);
        }

        if let Some(forced) = settings.forced_color {
            if !self.catalog.is_enabled(forced) {
                log::warn!("forced color {forced} is not enabled, ignoring it");
                settings.forced_color = None;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorName::*;

    fn options(enabled: &[ColorName], num_choices: u8) -> Options {
        Options::new(
            Catalog::with_enabled(enabled),
            GameSettings {
                num_choices,
                forced_color: None,
            },
        )
    }

    #[test]
    fn toggle_refuses_to_drop_below_num_choices() {
        let mut o = options(&[Black, White], 2);
        assert!(!o.toggle_color(Black));
        assert!(o.catalog.is_enabled(Black));

        assert!(o.toggle_color(Red));
        assert!(o.toggle_color(Black));
        assert_eq!(o.catalog.enabled_count(), 2);
    }

    #[test]
    fn toggle_never_goes_below_num_choices() {
        let mut o = options(&[Red, Green, Blue, Yellow], 3);
        for _ in 0..3 {
            for name in ColorName::ALL {
                o.toggle_color(name);
                assert!(o.catalog.enabled_count() >= usize::from(o.settings.num_choices));
            }
        }
    }

    #[test]
    fn disabling_forced_color_clears_it() {
        let mut o = options(&[Red, Green, Blue], 2);
        assert!(o.set_forced_color(Green));
        assert!(o.toggle_color(Green));
        assert_eq!(o.settings.forced_color, None);
    }

    #[test]
    fn forcing_toggles_and_skips_disabled() {
        let mut o = options(&[Red, Green], 1);
        assert!(!o.set_forced_color(Pink));
        assert_eq!(o.settings.forced_color, None);

        assert!(o.set_forced_color(Red));
        assert_eq!(o.settings.forced_color, Some(Red));
        assert!(o.set_forced_color(Green));
        assert_eq!(o.settings.forced_color, Some(Green));
        assert!(o.set_forced_color(Green));
        assert_eq!(o.settings.forced_color, None);
    }

    #[test]
    fn choices_are_clamped() {
        let mut o = options(&ColorName::ALL, 1);
        assert!(!o.decrement_choices());
        assert_eq!(o.settings.num_choices, 1);
        for _ in 0..10 {
            o.increment_choices();
        }
        assert_eq!(o.settings.num_choices, MAX_CHOICES);
    }

    #[test]
    fn choices_cannot_exceed_enabled_colors() {
        let mut o = options(&[Black, White], 2);
        assert!(!o.increment_choices());
        assert_eq!(o.settings.num_choices, 2);
    }

    #[test]
    fn normalized_restores_invariants() {
        let o = Options::new(
            Catalog::with_enabled(&[Pink]),
            GameSettings {
                num_choices: 9,
                forced_color: Some(Blue),
            },
        );
        assert_eq!(o.settings.num_choices, MAX_CHOICES);
        assert_eq!(o.catalog.enabled_count(), 5);
        assert!(o.catalog.is_enabled(Pink));
        assert!(!o.catalog.is_enabled(Blue));
        assert_eq!(o.settings.forced_color, None);

        let o = Options::new(
            Catalog::with_enabled(&[Black, White]),
            GameSettings {
                num_choices: 0,
                forced_color: Some(Red),
            },
        );
        assert_eq!(o.settings.num_choices, 1);
        assert_eq!(o.settings.forced_color, None);
    }
}
