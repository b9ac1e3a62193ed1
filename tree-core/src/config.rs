use crate::errors::ConfigError;

/// Limits shared by every branch of a generated tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalConfig {
    /// Branching-factor range. The count is sampled uniformly between the
    /// two bounds and rounded once per branch, so fractional bounds bias
    /// the rounding.
    pub min_branches_count: f32,
    pub max_branches_count: f32,
    /// A branch at or below this length becomes a leaf.
    pub min_branch_length: f32,
    /// Floor clamp applied to every branch width.
    pub min_branch_width: f32,
    /// Drawn radius range for leaf discs.
    pub leaf_size_min: f32,
    pub leaf_size_max: f32,
}

/// Shape of the root branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitConfig {
    pub branch_length: f32,
    pub branch_width: f32,
    /// Root direction range in degrees. The world uses canvas-style
    /// y-down axes, so 270 points straight up.
    pub branch_angle_min: f32,
    pub branch_angle_max: f32,
}

/// How a child branch derives from its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildConfig {
    /// Total angular spread of a parent's children relative to the parent
    /// direction, in degrees.
    pub branch_angle_min: f32,
    pub branch_angle_max: f32,
    pub branch_length_multiplier_min: f32,
    pub branch_length_multiplier_max: f32,
    pub branch_width_multiplier_min: f32,
    pub branch_width_multiplier_max: f32,
}

/// Full generation configuration: global limits, root shape, and the
/// parent-to-child derivation rules.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Config {
    pub global: GlobalConfig,
    pub init: InitConfig,
    pub child: ChildConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            min_branches_count: 2.0,
            max_branches_count: 3.0,
            min_branch_length: 5.0,
            min_branch_width: 2.0,
            leaf_size_min: 3.0,
            leaf_size_max: 5.0,
        }
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            branch_length: 80.0,
            branch_width: 15.0,
            branch_angle_min: 270.0,
            branch_angle_max: 270.0,
        }
    }
}

impl Default for ChildConfig {
    fn default() -> Self {
        Self {
            branch_angle_min: -45.0,
            branch_angle_max: 45.0,
            branch_length_multiplier_min: 0.7,
            branch_length_multiplier_max: 0.85,
            branch_width_multiplier_min: 0.8,
            branch_width_multiplier_max: 0.9,
        }
    }
}

impl Config {
    /// Builds a configuration from named textual fields, e.g. values read
    /// from UI input boxes.
    ///
    /// Each `(name, value)` pair overrides one field when `value` parses
    /// as `f32`; unknown names and unparsable values leave the default in
    /// place. Pairs may come in any order.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut cfg = Self::default();
        for (name, value) in fields {
            if let Ok(value) = value.trim().parse::<f32>() {
                cfg.set_field(name, value);
            }
        }
        cfg
    }

    fn set_field(&mut self, name: &str, value: f32) {
        match name {
            "min_branches_count" => self.global.min_branches_count = value,
            "max_branches_count" => self.global.max_branches_count = value,
            "min_branch_length" => self.global.min_branch_length = value,
            "min_branch_width" => self.global.min_branch_width = value,
            "leaf_size_min" => self.global.leaf_size_min = value,
            "leaf_size_max" => self.global.leaf_size_max = value,
            "init_branch_length" => self.init.branch_length = value,
            "init_branch_width" => self.init.branch_width = value,
            "init_angle_min" => self.init.branch_angle_min = value,
            "init_angle_max" => self.init.branch_angle_max = value,
            "child_angle_min" => self.child.branch_angle_min = value,
            "child_angle_max" => self.child.branch_angle_max = value,
            "branch_length_multiplier_min" => self.child.branch_length_multiplier_min = value,
            "branch_length_multiplier_max" => self.child.branch_length_multiplier_max = value,
            "branch_width_multiplier_min" => self.child.branch_width_multiplier_min = value,
            "branch_width_multiplier_max" => self.child.branch_width_multiplier_max = value,
            _ => {}
        }
    }

    /// Checks that every range is ordered, every length and width is
    /// usable, and child lengths actually shrink.
    ///
    /// Validation is the configuration component's job: the generator
    /// assumes a validated configuration and only guards recursion depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        range(
            "branches_count",
            self.global.min_branches_count,
            self.global.max_branches_count,
        )?;
        range(
            "leaf_size",
            self.global.leaf_size_min,
            self.global.leaf_size_max,
        )?;
        range(
            "init_angle",
            self.init.branch_angle_min,
            self.init.branch_angle_max,
        )?;
        range(
            "child_angle",
            self.child.branch_angle_min,
            self.child.branch_angle_max,
        )?;
        range(
            "branch_length_multiplier",
            self.child.branch_length_multiplier_min,
            self.child.branch_length_multiplier_max,
        )?;
        range(
            "branch_width_multiplier",
            self.child.branch_width_multiplier_min,
            self.child.branch_width_multiplier_max,
        )?;

        positive("min_branch_length", self.global.min_branch_length)?;
        positive("min_branch_width", self.global.min_branch_width)?;
        positive("init_branch_length", self.init.branch_length)?;
        positive("init_branch_width", self.init.branch_width)?;
        positive(
            "branch_length_multiplier_min",
            self.child.branch_length_multiplier_min,
        )?;
        positive(
            "branch_width_multiplier_min",
            self.child.branch_width_multiplier_min,
        )?;

        non_negative("min_branches_count", self.global.min_branches_count)?;
        non_negative("leaf_size_min", self.global.leaf_size_min)?;

        if self.child.branch_length_multiplier_max >= 1.0 {
            return Err(ConfigError::NonShrinkingLength {
                value: self.child.branch_length_multiplier_max,
            });
        }

        Ok(())
    }
}

fn range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > max {
        Err(ConfigError::InvertedRange { name, min, max })
    } else {
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value < 0.0 {
        Err(ConfigError::Negative { name, value })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let cfg = Config::default();

        assert_eq!(cfg.global.min_branches_count, 2.0);
        assert_eq!(cfg.global.max_branches_count, 3.0);
        assert_eq!(cfg.global.min_branch_length, 5.0);
        assert_eq!(cfg.global.min_branch_width, 2.0);
        assert_eq!(cfg.global.leaf_size_min, 3.0);
        assert_eq!(cfg.global.leaf_size_max, 5.0);

        assert_eq!(cfg.init.branch_length, 80.0);
        assert_eq!(cfg.init.branch_width, 15.0);
        assert_eq!(cfg.init.branch_angle_min, 270.0);
        assert_eq!(cfg.init.branch_angle_max, 270.0);

        assert_eq!(cfg.child.branch_angle_min, -45.0);
        assert_eq!(cfg.child.branch_angle_max, 45.0);
        assert_eq!(cfg.child.branch_length_multiplier_min, 0.7);
        assert_eq!(cfg.child.branch_length_multiplier_max, 0.85);
        assert_eq!(cfg.child.branch_width_multiplier_min, 0.8);
        assert_eq!(cfg.child.branch_width_multiplier_max, 0.9);

        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn from_fields_overrides_in_any_order() {
        let cfg = Config::from_fields([
            ("child_angle_max", "30"),
            ("init_branch_length", "120.5"),
            ("min_branches_count", "1"),
        ]);

        assert_eq!(cfg.child.branch_angle_max, 30.0);
        assert_eq!(cfg.init.branch_length, 120.5);
        assert_eq!(cfg.global.min_branches_count, 1.0);

        // Untouched fields keep their defaults.
        assert_eq!(cfg.init.branch_width, 15.0);
    }

    #[test]
    fn from_fields_ignores_unknown_names_and_unparsable_values() {
        let cfg = Config::from_fields([
            ("no_such_field", "10"),
            ("init_branch_width", "not a number"),
            ("init_branch_length", ""),
        ]);

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn validate_rejects_inverted_ranges() {
        let mut cfg = Config::default();
        cfg.global.leaf_size_min = 6.0; // max stays at 5.0

        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvertedRange {
                name: "leaf_size",
                min: 6.0,
                max: 5.0
            })
        );
    }

    #[test]
    fn validate_rejects_non_positive_lengths() {
        let mut cfg = Config::default();
        cfg.init.branch_length = 0.0;

        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                name: "init_branch_length",
                value: 0.0
            })
        );
    }

    #[test]
    fn validate_rejects_negative_counts() {
        let mut cfg = Config::default();
        cfg.global.min_branches_count = -1.0;

        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Negative {
                name: "min_branches_count",
                value: -1.0
            })
        );
    }

    #[test]
    fn validate_rejects_a_non_shrinking_length_multiplier() {
        let mut cfg = Config::default();
        cfg.child.branch_length_multiplier_max = 1.0;

        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonShrinkingLength { value: 1.0 })
        );
    }

    #[test]
    fn validate_allows_a_wide_width_multiplier() {
        // Widths may grow; only lengths drive termination.
        let mut cfg = Config::default();
        cfg.child.branch_width_multiplier_max = 1.5;

        assert!(cfg.validate().is_ok());
    }
}
