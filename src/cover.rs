/// Value of the `resolution` uniform: viewport size plus the UV scale that
/// makes a texture cover the viewport without distortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl CoverFit {
    pub fn new(width: f32, height: f32, image_width: f32, image_height: f32) -> Self {
        let (scale_x, scale_y) = if width <= 0.0 || height <= 0.0 || image_width <= 0.0 {
            (1.0, 1.0)
        } else {
            let image_aspect = image_height / image_width;
            if height / width > image_aspect {
                ((width / height) * image_aspect, 1.0)
            } else {
                (1.0, (height / width) / image_aspect)
            }
        };
        Self {
            width,
            height,
            scale_x,
            scale_y,
        }
    }

    pub fn as_vec4(&self) -> [f32; 4] {
        [self.width, self.height, self.scale_x, self.scale_y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn wide_viewport_crops_image_vertically() {
        let fit = CoverFit::new(1920.0, 1080.0, 1000.0, 1000.0);
        assert!(approx(fit.scale_x, 1.0));
        assert!(approx(fit.scale_y, 1080.0 / 1920.0));
    }

    #[test]
    fn tall_viewport_crops_image_horizontally() {
        let fit = CoverFit::new(1080.0, 1920.0, 1000.0, 1000.0);
        assert!(approx(fit.scale_x, 1080.0 / 1920.0));
        assert!(approx(fit.scale_y, 1.0));
    }

    #[test]
    fn matching_aspect_is_identity() {
        let fit = CoverFit::new(800.0, 600.0, 1600.0, 1200.0);
        assert_eq!(fit.as_vec4(), [800.0, 600.0, 1.0, 1.0]);
    }

    #[test]
    fn degenerate_sizes_fall_back_to_identity_scale() {
        let fit = CoverFit::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!((fit.scale_x, fit.scale_y), (1.0, 1.0));
    }
}
