//! End-to-end slicing tests.
//!
//! Tests verify:
//! - Slice counts, dimensions and naming for even and remainder cases
//! - Single-slice runs bypass the archive
//! - Offset crops cut the right source pixels
//! - Format resolution and the white-fill rule for alpha-less output
//! - Sequential region access and abort-on-first-failure

use std::io::Cursor;

use image::Rgba;
use zip::ZipArchive;

use image_slicer::{
    plan, CropRect, OutputFormat, OutputSpec, SliceEngine, SourceFormat,
};

use super::test_utils::{
    coordinate_raster, is_valid_jpeg, is_valid_png, transparent_png_bytes, TrackingSource,
};

// =============================================================================
// Slice Geometry and Naming
// =============================================================================

#[tokio::test]
async fn test_three_slice_run_produces_named_archive() {
    // 800x2500 at 1000px slices: 1000 + 1000 + 500
    let source = TrackingSource::new(coordinate_raster(800, 2500), SourceFormat::Jpeg);
    let crop = CropRect::full(800, 2500);

    let mut engine = SliceEngine::new();
    let output = engine
        .slice_and_package(&source, &crop, 1000, &OutputSpec::default(), "banner.jpg")
        .await
        .unwrap();

    assert!(output.is_archive());
    assert_eq!(output.file_name(), "banner_slices.zip");

    let mut zip = ZipArchive::new(Cursor::new(output.data().to_vec())).unwrap();
    assert_eq!(zip.len(), 3);

    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, ["banner_001.jpg", "banner_002.jpg", "banner_003.jpg"]);
}

#[tokio::test]
async fn test_slice_dimensions_include_remainder() {
    let source = TrackingSource::new(coordinate_raster(200, 2500), SourceFormat::Jpeg);
    let crop = CropRect::full(200, 2500);
    let descriptors = plan(&crop, 1000).unwrap();

    let mut engine = SliceEngine::new();
    let artifacts = engine
        .render(&source, &crop, &descriptors, &OutputSpec::default(), "x.jpg")
        .await
        .unwrap();

    let dims: Vec<(u32, u32)> = artifacts
        .iter()
        .map(|a| {
            let img = image::load_from_memory(&a.data).unwrap();
            (img.width(), img.height())
        })
        .collect();
    assert_eq!(dims, [(200, 1000), (200, 1000), (200, 500)]);
}

#[tokio::test]
async fn test_short_crop_yields_single_direct_file() {
    // Crop height 800 at 1000px slices: one slice, no archive
    let source = TrackingSource::new(coordinate_raster(600, 800), SourceFormat::Jpeg);
    let crop = CropRect::full(600, 800);

    let mut engine = SliceEngine::new();
    let output = engine
        .slice_and_package(&source, &crop, 1000, &OutputSpec::default(), "short.jpg")
        .await
        .unwrap();

    assert!(!output.is_archive());
    assert_eq!(output.file_name(), "short_processed.jpg");
    assert!(is_valid_jpeg(output.data()));
}

#[tokio::test]
async fn test_offset_crop_cuts_expected_pixels() {
    let raster = coordinate_raster(300, 900);
    let source = TrackingSource::new(raster, SourceFormat::Png);
    let crop = CropRect {
        top: 150,
        bottom: 750,
        left: 40,
        right: 240,
    };
    let descriptors = plan(&crop, 300).unwrap();

    let mut engine = SliceEngine::new();
    let artifacts = engine
        .render(&source, &crop, &descriptors, &OutputSpec::default(), "c.png")
        .await
        .unwrap();
    assert_eq!(artifacts.len(), 2);

    // PNG is lossless: the second slice's origin pixel is source (40, 450),
    // which the coordinate raster paints as (40, 450 % 251, 490 % 251)
    let second = image::load_from_memory(&artifacts[1].data).unwrap().to_rgba8();
    assert_eq!(second.dimensions(), (200, 300));
    assert_eq!(second.get_pixel(0, 0), &Rgba([40, 199, 239, 255]));
}

// =============================================================================
// Format Resolution
// =============================================================================

#[tokio::test]
async fn test_original_format_follows_jpeg_source() {
    let source = TrackingSource::new(coordinate_raster(100, 100), SourceFormat::Jpeg);
    let crop = CropRect::full(100, 100);

    let mut engine = SliceEngine::new();
    let output = engine
        .slice_and_package(&source, &crop, 1000, &OutputSpec::default(), "img.jpg")
        .await
        .unwrap();

    assert_eq!(output.file_name(), "img_processed.jpg");
    assert!(is_valid_jpeg(output.data()));
}

#[tokio::test]
async fn test_original_format_with_unknown_source_defaults_to_jpeg() {
    let source = TrackingSource::new(coordinate_raster(100, 100), SourceFormat::Unknown);
    let crop = CropRect::full(100, 100);

    let mut engine = SliceEngine::new();
    let output = engine
        .slice_and_package(&source, &crop, 1000, &OutputSpec::default(), "img.webp")
        .await
        .unwrap();

    assert_eq!(output.file_name(), "img_processed.jpg");
    assert!(is_valid_jpeg(output.data()));
}

#[tokio::test]
async fn test_explicit_png_overrides_jpeg_source() {
    let source = TrackingSource::new(coordinate_raster(100, 100), SourceFormat::Jpeg);
    let crop = CropRect::full(100, 100);
    let spec = OutputSpec::new(OutputFormat::Png, 0.9);

    let mut engine = SliceEngine::new();
    let output = engine
        .slice_and_package(&source, &crop, 1000, &spec, "img.jpg")
        .await
        .unwrap();

    assert_eq!(output.file_name(), "img_processed.png");
    assert!(is_valid_png(output.data()));
}

// =============================================================================
// Transparency Handling
// =============================================================================

#[tokio::test]
async fn test_transparent_source_goes_white_in_jpeg_output() {
    let mut session = image_slicer::SlicerSession::new();
    session
        .load_image(&transparent_png_bytes(50, 50), "ghost.png")
        .unwrap();
    session.set_format(OutputFormat::Jpeg);

    let output = session.run().await.unwrap();
    let decoded = image::load_from_memory(output.data()).unwrap().to_rgba8();

    // Transparent pixels must flatten to white, not black
    let center = decoded.get_pixel(25, 25);
    assert!(
        center[0] > 250 && center[1] > 250 && center[2] > 250,
        "expected near-white, got {:?}",
        center
    );
}

#[tokio::test]
async fn test_transparent_source_stays_transparent_in_png_output() {
    let mut session = image_slicer::SlicerSession::new();
    session
        .load_image(&transparent_png_bytes(50, 50), "ghost.png")
        .unwrap();

    // Original resolves to PNG, which skips the white fill
    let output = session.run().await.unwrap();
    let decoded = image::load_from_memory(output.data()).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(25, 25)[3], 0);
}

// =============================================================================
// Access Pattern and Failure Handling
// =============================================================================

#[tokio::test]
async fn test_one_region_read_per_slice() {
    let source = TrackingSource::new(coordinate_raster(100, 2500), SourceFormat::Jpeg);
    let crop = CropRect::full(100, 2500);

    let mut engine = SliceEngine::new();
    engine
        .slice_and_package(&source, &crop, 1000, &OutputSpec::default(), "x.jpg")
        .await
        .unwrap();

    assert_eq!(source.read_count(), 3);
}

#[tokio::test]
async fn test_mid_run_failure_aborts_without_output() {
    let source =
        TrackingSource::new(coordinate_raster(100, 2500), SourceFormat::Jpeg).failing_from(1);
    let crop = CropRect::full(100, 2500);

    let mut engine = SliceEngine::new();
    let result = engine
        .slice_and_package(&source, &crop, 1000, &OutputSpec::default(), "x.jpg")
        .await;

    assert!(result.is_err());
    // The failing read stops the run: slice 0 succeeded, slice 1 failed,
    // slice 2 was never attempted
    assert_eq!(source.read_count(), 2);
}
