//! Tests for configuration defaults, validation and extension filtering

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::configuration::{
        DEFAULT_SAMPLE_STRIDE, DEFAULT_TILE_PERCENTAGE, DEFAULT_UPSCALE_FACTOR, MosaicConfig,
        has_supported_extension,
    };
    use std::path::Path;

    fn rejected_parameter(config: MosaicConfig) -> Option<&'static str> {
        match config.validate() {
            Err(MosaicError::InvalidParameter { parameter, .. }) => Some(parameter),
            _ => None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = MosaicConfig::default();

        assert!(config.validate().is_ok());
        assert!((config.tile_percentage - DEFAULT_TILE_PERCENTAGE).abs() < f64::EPSILON);
        assert_eq!(config.upscale_factor, DEFAULT_UPSCALE_FACTOR);
        assert_eq!(config.sample_stride, DEFAULT_SAMPLE_STRIDE);
    }

    // Tests the percentage must be a finite fraction in (0, 1]
    // Verified by only rejecting zero
    #[test]
    fn test_tile_percentage_bounds() {
        for tile_percentage in [0.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let config = MosaicConfig {
                tile_percentage,
                ..MosaicConfig::default()
            };
            assert_eq!(rejected_parameter(config), Some("tile_percentage"));
        }

        let whole_width = MosaicConfig {
            tile_percentage: 1.0,
            ..MosaicConfig::default()
        };
        assert!(whole_width.validate().is_ok());
    }

    #[test]
    fn test_zero_factor_and_stride_are_rejected() {
        let no_upscale = MosaicConfig {
            upscale_factor: 0,
            ..MosaicConfig::default()
        };
        let no_stride = MosaicConfig {
            sample_stride: 0,
            ..MosaicConfig::default()
        };

        assert_eq!(rejected_parameter(no_upscale), Some("upscale_factor"));
        assert_eq!(rejected_parameter(no_stride), Some("sample_stride"));
    }

    // Tests extension matching ignores case and rejects everything else
    // Verified by comparing extensions case-sensitively
    #[test]
    fn test_supported_extensions() {
        for name in ["a.jpg", "b.jpeg", "c.png", "D.JPG", "e.Png"] {
            assert!(has_supported_extension(Path::new(name)), "{name}");
        }
        for name in ["a.gif", "b.txt", "png", "c.png.bak", ".hidden"] {
            assert!(!has_supported_extension(Path::new(name)), "{name}");
        }
    }
}
