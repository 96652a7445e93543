use visual_tests::{
    run_visual_test, should_update_references, update_reference, Scene, VisualTestConfig,
};

/// Helper macro to generate visual test functions
macro_rules! visual_test {
    ($name:ident, $scene:literal) => {
        #[test]
        fn $name() {
            if should_update_references() {
                update_reference($scene).expect("Failed to update reference");
                return;
            }

            let result = run_visual_test(&VisualTestConfig {
                scene_name: $scene.to_string(),
                similarity_threshold: 0.999,
            })
            .expect("Visual test failed to run");

            assert!(
                result.passed,
                "Visual regression detected for '{}': similarity {:.4}% (threshold: 99.9%)\n\
                 Reference: {}\n\
                 Captured:  {}\n\
                 Diff:      {}",
                $scene,
                result.similarity * 100.0,
                result.reference_path.display(),
                result.captured_path.display(),
                result
                    .diff_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            );
        }
    };
}

visual_test!(test_circle_sweep, "circle_sweep");
visual_test!(test_cool_clearing, "cool_clearing");
visual_test!(test_square_gradient, "square_gradient");
visual_test!(test_waves, "waves");
visual_test!(test_heart, "heart");
visual_test!(test_flashlight, "flashlight");

#[test]
fn test_rendering_is_deterministic() {
    let _ = env_logger::try_init();
    let scene = Scene::find("cool_clearing").expect("scene");
    let first = scene.render().expect("render");
    let second = scene.render().expect("render");
    assert_eq!(first, second);
}

#[test]
fn test_circle_sweep_draws_lower_half_only() {
    // Half a turn from 5 degrees: the bottom of the ring is lit, the top is not
    let image = Scene::find("circle_sweep").expect("scene").render().expect("render");
    let (w, h) = image.dimensions();
    let bottom = image.get_pixel(w / 2, h - 3);
    let top = image.get_pixel(w / 2, 2);
    assert!(bottom[1] > top[1]);
}

#[test]
fn test_unknown_scene_is_reported() {
    assert!(Scene::find("missing").is_err());
}
