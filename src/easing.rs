use serde::Deserialize;

/// Power2 easing curves applied to manual transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn curves_pin_endpoints() {
        for curve in ALL {
            assert!(curve.sample(0.0).abs() < 1e-6, "{curve:?}");
            assert!((curve.sample(1.0) - 1.0).abs() < 1e-6, "{curve:?}");
        }
    }

    #[test]
    fn curves_increase_monotonically() {
        for curve in ALL {
            let mut last = 0.0;
            for step in 0..=20 {
                let sample = curve.sample(step as f32 / 20.0);
                assert!(sample >= last - f32::EPSILON, "{curve:?} at step {step}");
                last = sample;
            }
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_around_midpoint() {
        let curve = Easing::EaseInOut;
        assert!((curve.sample(0.5) - 0.5).abs() < 1e-6);
        assert!((curve.sample(0.25) + curve.sample(0.75) - 1.0).abs() < 1e-6);
        assert!(curve.sample(0.25) < 0.25);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::EaseIn.sample(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.sample(3.0), 1.0);
    }

    #[test]
    fn deserializes_camel_case_names() {
        let easing: Easing = serde_json::from_str("\"easeOut\"").unwrap();
        assert_eq!(easing, Easing::EaseOut);
    }
}
