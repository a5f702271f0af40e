//! Session workflow tests.
//!
//! Tests verify:
//! - The load → crop → run workflow end to end
//! - Drag edits feed the run through the session state
//! - Quality changes move the encoded output size
//! - Terminal failures leave the session reusable

use std::io::Cursor;

use zip::ZipArchive;

use image_slicer::{
    CropRect, DragController, Handle, OutputFormat, SlicerSession, MIN_HANDLE_GAP,
};

use super::test_utils::{coordinate_raster, is_valid_jpeg, jpeg_bytes, png_bytes};

#[tokio::test]
async fn test_load_crop_run_workflow() {
    let mut session = SlicerSession::new();
    session
        .load_image(&png_bytes(&coordinate_raster(400, 3000)), "strip.png")
        .unwrap();

    // Drag the crop in from the edges, as the UI would
    let (width, height) = session.dimensions().unwrap();
    let mut controller = DragController::new(width, height);

    controller.pointer_down(Handle::Top);
    controller.pointer_move(0.1); // top = 300
    controller.pointer_up();
    controller.pointer_down(Handle::Bottom);
    controller.pointer_move(0.9); // bottom = 2700
    controller.pointer_up();

    session.set_crop(controller.crop());
    session.set_slice_height(800);

    // 2400px crop at 800px slices: three full slices
    let output = session.run().await.unwrap();
    assert!(output.is_archive());

    let mut zip = ZipArchive::new(Cursor::new(output.data().to_vec())).unwrap();
    assert_eq!(zip.len(), 3);

    for i in 0..zip.len() {
        let name = zip.by_index(i).unwrap().name().to_string();
        assert_eq!(name, format!("strip_{:03}.png", i + 1));
    }
}

#[tokio::test]
async fn test_drag_respects_min_gap_through_session() {
    let mut session = SlicerSession::new();
    session
        .load_image(&png_bytes(&coordinate_raster(200, 1000)), "img.png")
        .unwrap();

    let mut controller = DragController::new(200, 1000);
    controller.pointer_down(Handle::Bottom);
    controller.pointer_move(0.0); // collapses to top + MIN_HANDLE_GAP
    controller.pointer_up();

    session.set_crop(controller.crop());
    assert_eq!(session.crop().height(), MIN_HANDLE_GAP);

    // A minimum-gap crop still slices
    let output = session.run().await.unwrap();
    assert_eq!(output.file_name(), "img_processed.png");
}

#[tokio::test]
async fn test_quality_changes_move_output_size() {
    let mut session = SlicerSession::new();
    session
        .load_image(&png_bytes(&coordinate_raster(300, 600)), "img.png")
        .unwrap();
    session.set_format(OutputFormat::Jpeg);

    session.set_quality(0.1);
    let low = session.run().await.unwrap().data().len();

    session.set_quality(1.0);
    let high = session.run().await.unwrap().data().len();

    assert!(
        low < high,
        "quality 0.1 ({} bytes) should encode smaller than 1.0 ({} bytes)",
        low,
        high
    );
}

#[tokio::test]
async fn test_original_resolves_from_real_jpeg_bytes() {
    // Format detection runs on the undecoded input, so a real JPEG file
    // must come back out as JPEG under the Original choice
    let mut session = SlicerSession::new();
    session
        .load_image(&jpeg_bytes(&coordinate_raster(120, 90)), "photo.jpg")
        .unwrap();

    let output = session.run().await.unwrap();
    assert_eq!(output.file_name(), "photo_processed.jpg");
    assert!(is_valid_jpeg(output.data()));
}

#[tokio::test]
async fn test_jpeg_choice_applies_to_png_source() {
    let mut session = SlicerSession::new();
    session
        .load_image(&png_bytes(&coordinate_raster(100, 100)), "img.png")
        .unwrap();
    session.set_format(OutputFormat::Jpeg);

    let output = session.run().await.unwrap();
    assert_eq!(output.file_name(), "img_processed.jpg");
    assert!(is_valid_jpeg(output.data()));
}

#[tokio::test]
async fn test_failed_run_leaves_session_reusable() {
    let mut session = SlicerSession::new();
    session
        .load_image(&png_bytes(&coordinate_raster(100, 500)), "img.png")
        .unwrap();

    // A crop outside the image fails at render time
    session.set_crop(CropRect {
        top: 0,
        bottom: 900,
        left: 0,
        right: 100,
    });
    assert!(session.run().await.is_err());
    assert!(!session.is_processing());

    // Fixing the crop makes the same session succeed
    session.set_crop(CropRect::full(100, 500));
    assert!(session.run().await.is_ok());
}

#[tokio::test]
async fn test_reload_resets_crop() {
    let mut session = SlicerSession::new();
    session
        .load_image(&png_bytes(&coordinate_raster(100, 500)), "first.png")
        .unwrap();
    session.set_crop(CropRect {
        top: 100,
        bottom: 200,
        left: 10,
        right: 90,
    });

    session
        .load_image(&png_bytes(&coordinate_raster(80, 300)), "second.png")
        .unwrap();
    assert_eq!(session.crop(), CropRect::full(80, 300));
}
