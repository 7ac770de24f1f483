//! Tests for command-line parsing, output naming and end-to-end processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use tintmosaic::io::cli::{Cli, FileProcessor};
    use tintmosaic::io::configuration::{
        DEFAULT_OVERLAP_SCALE, DEFAULT_PIXEL_SIZE, DEFAULT_TILE_SIZE,
    };
    use tintmosaic::io::error::ErrorKind;
    use tintmosaic::mosaic::renderer::MosaicMode;

    fn write_source(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 150, 100]))
            .save(path)
            .expect("write source image");
    }

    fn write_tile(path: &Path) {
        RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]))
            .save(path)
            .expect("write tile image");
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tintmosaic").chain(args.iter().copied()))
    }

    // Tests CLI parsing with only required arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = parse(&["photo.jpg", "--tiles", "tile.png"]);

        assert_eq!(cli.target, PathBuf::from("photo.jpg"));
        assert_eq!(cli.tiles, PathBuf::from("tile.png"));
        assert_eq!(cli.pixel_size, DEFAULT_PIXEL_SIZE);
        assert_eq!(cli.tile_size, DEFAULT_TILE_SIZE);
        assert!(cli.output.is_none());
        assert!(cli.overlap.is_none());
        assert!(cli.seed.is_none());
        assert!(cli.should_show_progress());
        assert!(cli.skip_existing());
    }

    // Tests CLI parsing with all available arguments
    // Verified by swapping short flag definitions
    #[test]
    fn test_cli_parse_all_args() {
        let cli = parse(&[
            "photo.jpg", "-t", "tiles", "-o", "out/m.png", "-p", "10", "-T", "32", "-l", "2.5",
            "-s", "9", "-q", "-n",
        ]);

        assert_eq!(cli.output, Some(PathBuf::from("out/m.png")));
        assert_eq!(cli.pixel_size, 10);
        assert_eq!(cli.tile_size, 32);
        assert_eq!(cli.overlap, Some(Some(2.5)));
        assert_eq!(cli.seed, Some(9));
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
    }

    // Tests overlap flag without a value uses the default scale
    // Verified by treating a bare flag as disabled
    #[test]
    fn test_bare_overlap_flag() {
        let cli = parse(&["photo.jpg", "--tiles", "tile.png", "--overlap"]);

        assert_eq!(
            cli.mosaic_mode(),
            MosaicMode::Overlap {
                scale: DEFAULT_OVERLAP_SCALE
            }
        );
        assert!(cli.mosaic_config().validate().is_ok());
    }

    // Tests mode follows the tiles argument
    // Verified by always choosing sequential mode
    #[test]
    fn test_mode_from_tiles_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tile_path = dir.path().join("tile.png");
        let tile_arg = tile_path.to_string_lossy().to_string();
        let dir_arg = dir.path().to_string_lossy().to_string();

        let fixed = parse(&["photo.jpg", "--tiles", tile_arg.as_str()]);
        assert_eq!(fixed.mosaic_mode(), MosaicMode::Fixed);

        let sequential = parse(&["photo.jpg", "--tiles", dir_arg.as_str()]);
        assert_eq!(sequential.mosaic_mode(), MosaicMode::Sequential);

        let overlap = parse(&["photo.jpg", "--tiles", dir_arg.as_str(), "--overlap", "3"]);
        assert_eq!(overlap.mosaic_mode(), MosaicMode::Overlap { scale: 3.0 });
    }

    // Tests default and explicit output locations
    // Verified by ignoring the --output argument
    #[test]
    fn test_output_paths() {
        let beside = FileProcessor::new(parse(&["in/photo.jpg", "-t", "tile.png", "-q"]));
        assert!(
            beside
                .output_path(Path::new("in/photo.jpg"))
                .is_ok_and(|p| p == Path::new("in/photo_mosaic.png"))
        );

        let explicit = FileProcessor::new(parse(&["in/photo.jpg", "-t", "t.png", "-o", "x.png"]));
        assert!(
            explicit
                .output_path(Path::new("in/photo.jpg"))
                .is_ok_and(|p| p == Path::new("x.png"))
        );

        let dir = tempfile::tempdir().expect("temp dir");
        let dir_arg = dir.path().to_string_lossy().to_string();
        let batch_cli = parse(&[dir_arg.as_str(), "-t", "t.png", "-o", "renders"]);
        let batch = FileProcessor::new(batch_cli);
        assert!(
            batch
                .output_path(&dir.path().join("cat.jpeg"))
                .is_ok_and(|p| p == Path::new("renders/cat_mosaic.png"))
        );
    }

    // Tests a full run writes a mosaic of the expected size
    // Verified by sizing the canvas from the source image
    #[test]
    fn test_process_single_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = dir.path().join("photo.png");
        let tile = dir.path().join("tile.png");
        let output = dir.path().join("out/result.png");
        write_source(&source, 80, 80);
        write_tile(&tile);

        let args: Vec<String> = vec![
            source.to_string_lossy().to_string(),
            "-t".into(),
            tile.to_string_lossy().to_string(),
            "-o".into(),
            output.to_string_lossy().to_string(),
            "-p".into(),
            "40".into(),
            "-T".into(),
            "20".into(),
            "-q".into(),
        ];
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let mut processor = FileProcessor::new(parse(&arg_refs));

        assert!(processor.process().is_ok());
        let written = image::open(&output).expect("mosaic written");
        assert_eq!((written.width(), written.height()), (40, 40));
    }

    // Tests directory targets render every source and skip outputs
    // Verified by re-rendering previous outputs as sources
    #[test]
    fn test_process_directory_and_skip_existing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tiles = tempfile::tempdir().expect("tile dir");
        write_source(&dir.path().join("a.png"), 20, 10);
        write_source(&dir.path().join("b.jpg"), 10, 10);
        write_tile(&tiles.path().join("one.png"));
        write_tile(&tiles.path().join("two.png"));

        let dir_arg = dir.path().to_string_lossy().to_string();
        let tiles_arg = tiles.path().to_string_lossy().to_string();
        let args = [dir_arg.as_str(), "-t", tiles_arg.as_str(), "-p", "5", "-T", "4", "-q"];

        assert!(FileProcessor::new(parse(&args)).process().is_ok());
        let a_out = dir.path().join("a_mosaic.png");
        let b_out = dir.path().join("b_mosaic.png");
        assert!(a_out.exists());
        assert!(b_out.exists());
        let a_image = image::open(&a_out).expect("mosaic written");
        assert_eq!((a_image.width(), a_image.height()), (16, 8));

        // Second run skips existing outputs and ignores them as sources
        assert!(FileProcessor::new(parse(&args)).process().is_ok());
        assert!(!dir.path().join("a_mosaic_mosaic.png").exists());
    }

    // Tests an empty tile folder aborts before any output
    // Verified by loading tiles after rendering
    #[test]
    fn test_process_empty_tile_folder() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tiles = tempfile::tempdir().expect("tile dir");
        let source = dir.path().join("photo.png");
        write_source(&source, 40, 40);

        let source_arg = source.to_string_lossy().to_string();
        let tiles_arg = tiles.path().to_string_lossy().to_string();
        let cli = parse(&[source_arg.as_str(), "-t", tiles_arg.as_str(), "-q"]);
        let result = FileProcessor::new(cli).process();

        assert!(result.is_err_and(|e| e.kind() == ErrorKind::Configuration));
        assert!(!dir.path().join("photo_mosaic.png").exists());
    }

    // Tests invalid numeric configuration aborts before loading anything
    // Verified by validating after tile loading
    #[test]
    fn test_process_rejects_invalid_config() {
        let result = FileProcessor::new(parse(&[
            "missing.png",
            "-t",
            "missing_tile.png",
            "-p",
            "0",
            "-q",
        ]))
        .process();

        assert!(result.is_err_and(|e| e.kind() == ErrorKind::Configuration));
    }

    // Tests a missing target is reported as an I/O error
    // Verified by silently succeeding on missing targets
    #[test]
    fn test_process_missing_target() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tile = dir.path().join("tile.png");
        write_tile(&tile);
        let target = dir.path().join("nope.png").to_string_lossy().to_string();
        let tile_arg = tile.to_string_lossy().to_string();

        let cli = parse(&[target.as_str(), "-t", tile_arg.as_str(), "-q"]);
        let result = FileProcessor::new(cli).process();
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::Io));
    }

    // Tests a non-PNG single-file output is rejected before rendering
    // Verified by deferring the extension check to the encoder
    #[test]
    fn test_process_rejects_non_png_output() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = dir.path().join("photo.png");
        let tile = dir.path().join("tile.png");
        let output = dir.path().join("photo.jpg");
        write_source(&source, 40, 40);
        write_tile(&tile);

        let source_arg = source.to_string_lossy().to_string();
        let tile_arg = tile.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        let cli = parse(&[
            source_arg.as_str(),
            "-t",
            tile_arg.as_str(),
            "-o",
            output_arg.as_str(),
            "-q",
        ]);
        assert!(cli.validate_output().is_err());

        let result = FileProcessor::new(cli).process();
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::Configuration));
        assert!(!output.exists());

        let upper = parse(&["photo.png", "-t", "tile.png", "-o", "OUT.PNG"]);
        assert!(upper.validate_output().is_ok());
    }
}
