mod common;

use std::path::PathBuf;

use common::{alphas, from_fn, solid, MemoryStore};
use keyout_core::controller::{Outcome, Pane, ViewerController, ViewerEvent};
use keyout_core::error::KeyoutError;
use keyout_core::preset::MaskPreset;
use keyout_core::threshold::{Bound, Channel, ThresholdState};
use keyout_core::viewport::{Point, ViewportTransform, ZoomDirection};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const RED: &str = "red.png";
const PROBE: &str = "probe.png";

fn red_store() -> MemoryStore {
    MemoryStore::new().with_image(RED, solid(4, 4, [255, 0, 0, 255]))
}

/// 4x4 black image with (10,20,30) at (2,2) and (10,20,31) at (3,3).
fn probe_store() -> MemoryStore {
    let buf = from_fn(4, 4, |x, y| match (x, y) {
        (2, 2) => [10, 20, 30, 255],
        (3, 3) => [10, 20, 31, 255],
        _ => [0, 0, 0, 255],
    });
    MemoryStore::new().with_image(PROBE, buf)
}

fn loaded(store: &MemoryStore, path: &str) -> ViewerController {
    let mut c = ViewerController::new(store.clone());
    c.handle(ViewerEvent::LoadImage(path.into())).unwrap();
    c
}

fn set(c: &mut ViewerController, channel: Channel, bound: Bound, value: u8) -> Outcome {
    c.handle(ViewerEvent::SetThreshold {
        channel,
        bound,
        value,
    })
    .unwrap()
}

fn click(c: &mut ViewerController, x: f64, y: f64) -> Outcome {
    c.handle(ViewerEvent::Click {
        pane: Pane::Input,
        point: Point::new(x, y),
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// NoImage state
// ---------------------------------------------------------------------------

#[test]
fn test_initial_state_is_empty() {
    let c = ViewerController::new(MemoryStore::new());
    assert!(!c.is_loaded());
    assert!(c.preview().is_none());
    assert!(c.processed().is_none());
    assert_eq!(c.thresholds(), ThresholdState::full());
    assert!(!c.click_sample_active());
    assert!(!c.highlight());
    assert_eq!(c.revision(), 0);
}

#[test]
fn test_save_without_image_fails() {
    let store = MemoryStore::new();
    let mut c = ViewerController::new(store.clone());
    let err = c.handle(ViewerEvent::SaveImage("out.png".into())).unwrap_err();
    assert!(matches!(err, KeyoutError::NoProcessedImage));
    assert!(store.saved_paths().is_empty());
}

#[test]
fn test_gestures_and_thresholds_ignored_without_image() {
    let mut c = ViewerController::new(MemoryStore::new());
    for event in [
        ViewerEvent::Wheel {
            pane: Pane::Input,
            point: Point::new(5.0, 5.0),
            direction: ZoomDirection::In,
        },
        ViewerEvent::Drag {
            pane: Pane::Output,
            delta: Point::new(3.0, 3.0),
        },
        ViewerEvent::SetThreshold {
            channel: Channel::Red,
            bound: Bound::Lower,
            value: 9,
        },
        ViewerEvent::ResetThresholds,
        ViewerEvent::ApplyPreset(MaskPreset::default()),
    ] {
        assert_eq!(c.handle(event).unwrap(), Outcome::Ignored);
    }
    assert_eq!(*c.view(Pane::Input), ViewportTransform::identity());
    assert_eq!(c.thresholds(), ThresholdState::full());
    assert_eq!(c.revision(), 0);
}

#[test]
fn test_failed_first_load_stays_empty() {
    let mut c = ViewerController::new(MemoryStore::new());
    let err = c.handle(ViewerEvent::LoadImage("missing.png".into())).unwrap_err();
    assert!(matches!(err, KeyoutError::Decode { .. }));
    assert!(!c.is_loaded());
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[test]
fn test_load_red_image_masks_everything_by_default() {
    let store = red_store();
    let mut c = ViewerController::new(store.clone());
    let outcome = c.handle(ViewerEvent::LoadImage(RED.into())).unwrap();

    assert_eq!(outcome, Outcome::Loaded { width: 4, height: 4 });
    assert!(c.is_loaded());
    assert_eq!(c.image_path(), Some(std::path::Path::new(RED)));
    assert_eq!(c.revision(), 1);
    assert!(alphas(c.preview().unwrap()).iter().all(|&a| a == 0));
    let stats = c.stats().unwrap();
    assert_eq!((stats.masked, stats.total), (16, 16));
}

#[test]
fn test_narrowing_red_unmasks_everything() {
    let mut c = loaded(&red_store(), RED);
    assert_eq!(set(&mut c, Channel::Red, Bound::Lower, 254), Outcome::Recomputed);
    assert_eq!(set(&mut c, Channel::Red, Bound::Upper, 254), Outcome::Recomputed);

    assert_eq!(c.thresholds().as_array(), [254, 254, 0, 255, 0, 255]);
    assert!(alphas(c.preview().unwrap()).iter().all(|&a| a == 255));
    assert_eq!(c.revision(), 3);
}

#[test]
fn test_load_resets_thresholds_and_views() {
    let store = red_store().with_image(PROBE, solid(2, 2, [9, 9, 9, 255]));
    let mut c = loaded(&store, RED);
    set(&mut c, Channel::Blue, Bound::Upper, 3);
    c.handle(ViewerEvent::Wheel {
        pane: Pane::Input,
        point: Point::new(1.0, 1.0),
        direction: ZoomDirection::In,
    })
    .unwrap();

    c.handle(ViewerEvent::LoadImage(PROBE.into())).unwrap();
    assert_eq!(c.thresholds(), ThresholdState::full());
    assert_eq!(*c.view(Pane::Input), ViewportTransform::identity());
    assert_eq!(c.source().unwrap().width(), 2);
}

#[test]
fn test_failed_load_keeps_previous_image() {
    let mut c = loaded(&red_store(), RED);
    set(&mut c, Channel::Green, Bound::Lower, 10);
    let before = c.preview().unwrap().clone();
    let revision = c.revision();

    assert!(c.handle(ViewerEvent::LoadImage("broken.jpg".into())).is_err());
    assert!(c.is_loaded());
    assert_eq!(c.image_path(), Some(std::path::Path::new(RED)));
    assert_eq!(c.preview().unwrap(), &before);
    assert_eq!(c.thresholds().get(Channel::Green, Bound::Lower), 10);
    assert_eq!(c.revision(), revision);
}

#[test]
fn test_landscape_load_is_rotated() {
    let store = MemoryStore::new().with_image("wide.png", solid(6, 2, [1, 2, 3, 255]));
    let mut c = ViewerController::new(store);
    let outcome = c.handle(ViewerEvent::LoadImage("wide.png".into())).unwrap();
    assert_eq!(outcome, Outcome::Loaded { width: 2, height: 6 });
    assert_eq!(c.processed().unwrap().height(), 6);
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

#[test]
fn test_reset_restores_full_range() {
    let mut c = loaded(&red_store(), RED);
    set(&mut c, Channel::Red, Bound::Lower, 200);
    set(&mut c, Channel::Green, Bound::Upper, 1);
    set(&mut c, Channel::Blue, Bound::Lower, 77);

    assert_eq!(c.handle(ViewerEvent::ResetThresholds).unwrap(), Outcome::Recomputed);
    assert_eq!(c.thresholds().as_array(), [0, 255, 0, 255, 0, 255]);
    assert!(alphas(c.preview().unwrap()).iter().all(|&a| a == 0));
}

#[test]
fn test_apply_preset_replaces_thresholds_and_highlight() {
    let mut c = loaded(&red_store(), RED);
    let mut thresholds = ThresholdState::full();
    thresholds.set(Channel::Red, Bound::Upper, 100);
    let preset = MaskPreset::new(thresholds, true);

    assert_eq!(c.handle(ViewerEvent::ApplyPreset(preset)).unwrap(), Outcome::Recomputed);
    assert_eq!(c.thresholds(), thresholds);
    assert!(c.highlight());
    assert_eq!(c.preset(), preset);
    // Red 255 is outside 0..=100, nothing is masked.
    assert_eq!(c.stats().unwrap().masked, 0);
}

// ---------------------------------------------------------------------------
// Click sampling
// ---------------------------------------------------------------------------

#[test]
fn test_click_ignored_unless_sampling_enabled() {
    let mut c = loaded(&probe_store(), PROBE);
    assert_eq!(click(&mut c, 2.0, 2.0), Outcome::Ignored);
    assert_eq!(c.thresholds(), ThresholdState::full());
}

#[test]
fn test_click_pins_thresholds_to_pixel() {
    let mut c = loaded(&probe_store(), PROBE);
    assert_eq!(c.handle(ViewerEvent::ToggleClickSample).unwrap(), Outcome::ModeChanged);
    assert!(c.click_sample_active());

    assert_eq!(click(&mut c, 2.0, 2.0), Outcome::Recomputed);
    assert_eq!(c.thresholds().as_array(), [10, 10, 20, 20, 30, 30]);

    let out = c.preview().unwrap();
    assert_eq!(out.pixel(2, 2).unwrap()[3], 0);
    // (10, 20, 31): blue is outside 30..=30.
    assert_eq!(out.pixel(3, 3).unwrap()[3], 255);
    assert_eq!(out.pixel(0, 0).unwrap()[3], 255);
}

#[test]
fn test_click_maps_through_input_view() {
    let mut c = loaded(&probe_store(), PROBE);
    c.handle(ViewerEvent::ToggleClickSample).unwrap();
    for _ in 0..3 {
        c.handle(ViewerEvent::Wheel {
            pane: Pane::Input,
            point: Point::new(0.0, 0.0),
            direction: ZoomDirection::In,
        })
        .unwrap();
    }
    c.handle(ViewerEvent::Drag {
        pane: Pane::Input,
        delta: Point::new(15.0, -4.0),
    })
    .unwrap();

    let screen = c.view(Pane::Input).to_screen(Point::new(2.5, 2.5));
    assert_eq!(click(&mut c, screen.x, screen.y), Outcome::Recomputed);
    assert_eq!(c.thresholds().as_array(), [10, 10, 20, 20, 30, 30]);
}

#[test]
fn test_out_of_bounds_click_changes_nothing() {
    let mut c = loaded(&probe_store(), PROBE);
    c.handle(ViewerEvent::ToggleClickSample).unwrap();
    set(&mut c, Channel::Red, Bound::Upper, 50);
    let revision = c.revision();
    let thresholds = c.thresholds();

    for (x, y) in [(-1.0, -1.0), (4.0, 0.0), (0.0, 4.0), (40.0, 40.0)] {
        assert_eq!(click(&mut c, x, y), Outcome::Ignored);
    }
    assert_eq!(c.thresholds(), thresholds);
    assert_eq!(c.revision(), revision);
}

#[test]
fn test_click_on_output_pane_is_ignored() {
    let mut c = loaded(&probe_store(), PROBE);
    c.handle(ViewerEvent::ToggleClickSample).unwrap();
    let outcome = c
        .handle(ViewerEvent::Click {
            pane: Pane::Output,
            point: Point::new(2.0, 2.0),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(c.thresholds(), ThresholdState::full());
}

// ---------------------------------------------------------------------------
// Highlight and save
// ---------------------------------------------------------------------------

#[test]
fn test_highlight_changes_preview_not_saved_buffer() {
    let store = red_store();
    let mut c = loaded(&store, RED);

    c.handle(ViewerEvent::SaveImage("plain.png".into())).unwrap();
    let plain_preview = c.preview().unwrap().clone();

    assert_eq!(c.handle(ViewerEvent::ToggleHighlight).unwrap(), Outcome::Recomputed);
    assert!(c.highlight());
    assert_ne!(c.preview().unwrap(), &plain_preview);
    assert_eq!(c.preview().unwrap().pixel(0, 0), Some([128, 0, 0, 128]));

    c.handle(ViewerEvent::SaveImage("highlighted.png".into())).unwrap();
    assert_eq!(store.saved("plain.png"), store.saved("highlighted.png"));
    assert_eq!(store.saved("highlighted.png").as_ref(), c.processed());

    c.handle(ViewerEvent::ToggleHighlight).unwrap();
    assert_eq!(c.preview().unwrap(), &plain_preview);
}

#[test]
fn test_highlight_toggle_without_image_only_flips_flag() {
    let mut c = ViewerController::new(MemoryStore::new());
    assert_eq!(c.handle(ViewerEvent::ToggleHighlight).unwrap(), Outcome::ModeChanged);
    assert!(c.highlight());
}

#[test]
fn test_highlight_survives_reload() {
    let store = red_store();
    let mut c = ViewerController::new(store);
    c.handle(ViewerEvent::ToggleHighlight).unwrap();
    c.handle(ViewerEvent::LoadImage(RED.into())).unwrap();
    assert_eq!(c.preview().unwrap().pixel(1, 1), Some([128, 0, 0, 128]));
    assert_eq!(c.processed().unwrap().pixel(1, 1), Some([255, 0, 0, 0]));
}

#[test]
fn test_save_normalizes_extension() {
    let store = red_store();
    let mut c = loaded(&store, RED);
    let outcome = c.handle(ViewerEvent::SaveImage("result".into())).unwrap();
    assert_eq!(outcome, Outcome::Saved(PathBuf::from("result.png")));
    assert!(store.saved("result.png").is_some());

    let outcome = c.handle(ViewerEvent::SaveImage("result.JPG".into())).unwrap();
    assert_eq!(outcome, Outcome::Saved(PathBuf::from("result.JPG")));
}

#[test]
fn test_failed_save_keeps_session_usable() {
    let store = red_store();
    let mut c = loaded(&store, RED);
    store.fail_saves();

    let err = c.handle(ViewerEvent::SaveImage("out.png".into())).unwrap_err();
    assert!(matches!(err, KeyoutError::Encode { .. }));
    assert!(c.is_loaded());
    assert_eq!(set(&mut c, Channel::Red, Bound::Lower, 1), Outcome::Recomputed);
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[test]
fn test_panes_zoom_independently() {
    let mut c = loaded(&red_store(), RED);
    let outcome = c
        .handle(ViewerEvent::Wheel {
            pane: Pane::Output,
            point: Point::new(2.0, 2.0),
            direction: ZoomDirection::In,
        })
        .unwrap();
    assert_eq!(outcome, Outcome::ViewChanged);
    assert!(c.view(Pane::Output).scale() > 1.0);
    assert_eq!(*c.view(Pane::Input), ViewportTransform::identity());
    // A view change never recomputes the mask.
    assert_eq!(c.revision(), 1);
}

#[test]
fn test_drag_pans_only_named_pane() {
    let mut c = loaded(&red_store(), RED);
    c.handle(ViewerEvent::Drag {
        pane: Pane::Input,
        delta: Point::new(10.0, 5.0),
    })
    .unwrap();
    assert_eq!(c.view(Pane::Input).offset(), Point::new(10.0, 5.0));
    assert_eq!(c.view(Pane::Output).offset(), Point::ZERO);
}

#[test]
fn test_fit_and_reset_views() {
    let mut c = loaded(&red_store(), RED);
    c.handle(ViewerEvent::FitView {
        pane: Pane::Output,
        view_size: Point::new(40.0, 80.0),
    })
    .unwrap();
    assert!((c.view(Pane::Output).scale() - 10.0).abs() < 1e-12);

    assert_eq!(c.handle(ViewerEvent::ResetViews).unwrap(), Outcome::ViewChanged);
    assert_eq!(*c.view(Pane::Output), ViewportTransform::identity());
}
