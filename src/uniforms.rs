use std::collections::BTreeMap;

use serde::Deserialize;

/// Uniforms the renderer drives itself; configured settings may not shadow them.
pub const RESERVED_UNIFORMS: [&str; 6] = [
    "time",
    "progress",
    "texture1",
    "texture2",
    "displacement",
    "resolution",
];

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UniformSetting {
    pub value: f32,
    #[serde(default)]
    pub min: f32,
    #[serde(default = "default_max")]
    pub max: f32,
}

fn default_max() -> f32 {
    1.0
}

impl UniformSetting {
    pub fn new(value: f32, min: f32, max: f32) -> Self {
        Self { value, min, max }
    }
}

/// Extra float uniforms exposed to the shader and the debug inspector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct UniformSet {
    settings: BTreeMap<String, UniformSetting>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, setting: UniformSetting) {
        let mut setting = setting;
        setting.value = setting.value.clamp(setting.min, setting.max);
        self.settings.insert(name.into(), setting);
    }

    pub fn get(&self, name: &str) -> Option<UniformSetting> {
        self.settings.get(name).copied()
    }

    /// Stores `value` clamped to the uniform's range. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: f32) -> Option<f32> {
        let setting = self.settings.get_mut(name)?;
        setting.value = value.clamp(setting.min, setting.max);
        Some(setting.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformSetting)> {
        self.settings.iter().map(|(name, setting)| (name.as_str(), setting))
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Rejects reserved names and inverted ranges, and pulls initial values into range.
    pub(crate) fn normalize(&mut self) -> Result<(), String> {
        for (name, setting) in self.settings.iter_mut() {
            if RESERVED_UNIFORMS.contains(&name.as_str()) {
                return Err(format!("uniform `{name}` is set by the renderer"));
            }
            if !(setting.min <= setting.max) {
                return Err(format!(
                    "uniform `{name}` has min {} above max {}",
                    setting.min, setting.max
                ));
            }
            setting.value = setting.value.clamp(setting.min, setting.max);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_into_range() {
        let mut set = UniformSet::new();
        set.insert("intensity", UniformSetting::new(0.3, 0.0, 2.0));
        assert_eq!(set.set("intensity", 5.0), Some(2.0));
        assert_eq!(set.set("intensity", -1.0), Some(0.0));
        assert_eq!(set.get("intensity").map(|s| s.value), Some(0.0));
    }

    #[test]
    fn unknown_uniform_is_ignored() {
        let mut set = UniformSet::new();
        assert_eq!(set.set("radius", 1.0), None);
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_name_order() {
        let mut set = UniformSet::new();
        set.insert("swipe", UniformSetting::new(0.0, 0.0, 1.0));
        set.insert("border", UniformSetting::new(0.0, 0.0, 1.0));
        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["border", "swipe"]);
    }

    #[test]
    fn inverted_range_fails_validation() {
        let mut set: UniformSet =
            serde_json::from_str(r#"{"width": {"value": 0.5, "min": 1.0, "max": 0.0}}"#).unwrap();
        assert!(set.normalize().is_err());
    }

    #[test]
    fn reserved_names_fail_normalization() {
        for name in RESERVED_UNIFORMS {
            let mut set = UniformSet::new();
            set.insert(name, UniformSetting::new(0.5, 0.0, 1.0));
            let err = set.normalize().unwrap_err();
            assert!(err.contains(name), "{err}");
        }
    }

    #[test]
    fn normalize_clamps_initial_values() {
        let mut set: UniformSet =
            serde_json::from_str(r#"{"scaleX": {"value": 80.0, "min": 0.1, "max": 60.0}}"#).unwrap();
        set.normalize().unwrap();
        assert_eq!(set.get("scaleX").map(|s| s.value), Some(60.0));
    }

    #[test]
    fn range_defaults_to_unit_interval() {
        let set: UniformSet = serde_json::from_str(r#"{"radius": {"value": 0.4}}"#).unwrap();
        assert_eq!(set.get("radius"), Some(UniformSetting::new(0.4, 0.0, 1.0)));
    }
}
