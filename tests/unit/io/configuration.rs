//! Tests for mosaic constants and defaults

#[cfg(test)]
mod tests {
    use image::imageops::FilterType;
    use tintmosaic::io::configuration::{
        DEFAULT_OVERLAP_SCALE, DEFAULT_PIXEL_SIZE, DEFAULT_TILE_SIZE, GRID_FILTER,
        IMAGE_EXTENSIONS, MAX_CANVAS_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS, ON_TOP_PROBABILITY,
        OUTPUT_EXTENSION, OUTPUT_SUFFIX, PROGRESS_BAR_WIDTH, TILE_FILTER,
    };

    // Tests default sizes
    // Verified by changing default values
    #[test]
    fn test_default_sizes() {
        assert_eq!(DEFAULT_PIXEL_SIZE, 40);
        assert_eq!(DEFAULT_TILE_SIZE, 20);
    }

    // Tests default overlap actually enlarges tiles
    // Verified by setting the default scale to 1
    #[test]
    fn test_default_overlap_scale_enlarges() {
        assert!(DEFAULT_OVERLAP_SCALE > 1.0);
        assert!(DEFAULT_OVERLAP_SCALE.is_finite());
    }

    // Tests the grid uses a smoothing filter
    // Verified by switching the grid to nearest-neighbor
    #[test]
    fn test_grid_filter_is_smooth() {
        assert!(matches!(GRID_FILTER, FilterType::Triangle));
        assert!(!matches!(TILE_FILTER, FilterType::Nearest));
    }

    // Tests stacking is an even coin flip
    // Verified by biasing the probability
    #[test]
    fn test_on_top_probability() {
        assert!((ON_TOP_PROBABILITY - 0.5).abs() < f64::EPSILON);
    }

    // Tests accepted extensions are lowercase and include jpeg variants
    // Verified by removing the jpeg entry
    #[test]
    fn test_image_extensions() {
        assert_eq!(IMAGE_EXTENSIONS, &["png", "jpg", "jpeg"]);
        assert!(
            IMAGE_EXTENSIONS
                .iter()
                .all(|ext| ext.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    // Tests filesystem safety of suffix and extension
    // Verified by adding special character
    #[test]
    fn test_output_naming() {
        assert!(OUTPUT_SUFFIX.starts_with('_'));
        for ch in OUTPUT_SUFFIX.chars() {
            assert!(
                ch.is_alphanumeric() || ch == '_' || ch == '-',
                "Output suffix contains invalid character: {ch}"
            );
        }
        assert_eq!(OUTPUT_EXTENSION, "png");
    }

    // Tests allocation and display limits
    // Verified by changing limit values
    #[test]
    fn test_limits() {
        assert_eq!(MAX_CANVAS_DIMENSION, 50_000);
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(PROGRESS_BAR_WIDTH, 30);
    }
}
