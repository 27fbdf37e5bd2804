//! Stepped backlight brightness driven by the `BL_*` keys.

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum BacklightAction {
    Decrease,
    Increase,
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backlight {
    levels: u8,
    level: u8,
    enabled: bool,
}

impl Backlight {
    /// Starts enabled at the brightest of `levels` steps.
    pub const fn new(levels: u8) -> Self {
        Self {
            levels,
            level: levels,
            enabled: true,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn apply(&mut self, action: BacklightAction) {
        match action {
            BacklightAction::Increase => {
                self.level = self.level.saturating_add(1).min(self.levels);
                self.enabled = true;
            }
            BacklightAction::Decrease => {
                self.level = self.level.saturating_sub(1);
                self.enabled = self.level > 0;
            }
            BacklightAction::Toggle => {
                self.enabled = !self.enabled;
                if self.enabled && self.level == 0 {
                    self.level = 1;
                }
            }
        }
    }

    /// PWM duty for a channel whose full-on value is `max`.
    pub fn duty(&self, max: u16) -> u16 {
        if !self.enabled || self.levels == 0 {
            return 0;
        }
        (u32::from(max) * u32::from(self.level) / u32::from(self.levels)) as u16
    }
}
