mod common;

use burst_core::config::EngineConfig;
use burst_core::error::BurstError;
use burst_core::frame::Burst;
use burst_core::pipeline::align_and_merge;
use ndarray::s;

use common::{mse, noise_frame, noisy_copy, ramp_frame, shifted_frame};

#[test]
fn test_identity_burst_reproduces_reference() {
    let reference = noise_frame(128, 128, 8);
    let burst = Burst::new(vec![
        reference.clone(),
        reference.clone(),
        reference.clone(),
        reference.clone(),
    ])
    .unwrap();

    let merged = align_and_merge(&burst, &EngineConfig::default()).unwrap();
    assert_eq!(merged.data, reference.data);
}

#[test]
fn test_output_dimensions_match_reference() {
    for (width, height, alternates) in [(128, 128, 1), (192, 128, 3), (256, 160, 5), (330, 270, 2)]
    {
        let reference = noise_frame(width, height, 19);
        let mut frames = vec![reference];
        for i in 0..alternates {
            frames.push(noise_frame(width, height, 20 + i as u64));
        }
        let burst = Burst::new(frames).unwrap();

        let merged = align_and_merge(&burst, &EngineConfig::default()).unwrap();
        assert_eq!((merged.width(), merged.height()), (width, height));
    }
}

#[test]
fn test_uneven_dimensions_reproduce_reference_interior() {
    // 330x270 is not a multiple of the half-tile step, so the rightmost and
    // bottom pixels fall past the last tile and take the clamped-edge path.
    let reference = noise_frame(330, 270, 77);
    let burst = Burst::new(vec![reference.clone(), reference.clone()]).unwrap();

    let merged = align_and_merge(&burst, &EngineConfig::default()).unwrap();
    assert_eq!((merged.width(), merged.height()), (330, 270));

    // Tile coverage at defaults ends at x = 39*8 + 16 = 328, y = 31*8 + 16
    // = 264; within it an identity burst must come back bit-exact.
    assert_eq!(
        merged.data.slice(s![..264, ..328]),
        reference.data.slice(s![..264, ..328])
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let burst = Burst::new(vec![noise_frame(256, 256, 3), noise_frame(256, 256, 4)]).unwrap();

    let mut zero_levels = EngineConfig::default();
    zero_levels.align.pyramid_levels = 0;
    assert!(matches!(
        align_and_merge(&burst, &zero_levels).unwrap_err(),
        BurstError::InvalidConfig(_)
    ));

    let mut zero_tile = EngineConfig::default();
    zero_tile.align.tile_size = 0;
    assert!(matches!(
        align_and_merge(&burst, &zero_tile).unwrap_err(),
        BurstError::InvalidConfig(_)
    ));

    let mut odd_tile = EngineConfig::default();
    odd_tile.align.tile_size = 15;
    assert!(matches!(
        align_and_merge(&burst, &odd_tile).unwrap_err(),
        BurstError::InvalidConfig(_)
    ));
}

#[test]
fn test_pipeline_is_deterministic() {
    let reference = noise_frame(192, 192, 55);
    let frames = vec![
        reference.clone(),
        shifted_frame(&reference, 4, 2),
        shifted_frame(&reference, -6, 8),
    ];
    let burst = Burst::new(frames).unwrap();
    let config = EngineConfig::default();

    let a = align_and_merge(&burst, &config).unwrap();
    let b = align_and_merge(&burst, &config).unwrap();
    assert_eq!(a.data, b.data);
}

#[test]
fn test_merge_reduces_noise() {
    let clean = ramp_frame(160, 160);
    let frames: Vec<_> = (0..5).map(|i| noisy_copy(&clean, 100 + i)).collect();
    let reference_error = mse(&frames[0], &clean);

    let burst = Burst::new(frames).unwrap();
    let merged = align_and_merge(&burst, &EngineConfig::default()).unwrap();
    let merged_error = mse(&merged, &clean);

    assert!(
        merged_error < 0.6 * reference_error,
        "merged MSE {merged_error:.2} vs reference MSE {reference_error:.2}"
    );
}

#[test]
fn test_small_frame_fails_before_alignment() {
    let burst = Burst::new(vec![noise_frame(64, 64, 1), noise_frame(64, 64, 2)]).unwrap();
    let err = align_and_merge(&burst, &EngineConfig::default()).unwrap_err();

    assert!(matches!(err, BurstError::FrameTooSmall { .. }));
}
