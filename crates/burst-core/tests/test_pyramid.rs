mod common;

use ndarray::{array, Array2};

use burst_core::consts::{GAUSS_DIVISOR, GAUSS_KERNEL};
use burst_core::error::BurstError;
use burst_core::frame::Frame;
use burst_core::pyramid::{box_down2, build_pyramid, gauss_down4};

use common::{constant_frame, noise_frame};

#[test]
fn test_gauss_kernel_sums_to_divisor() {
    let sum: u32 = GAUSS_KERNEL.iter().flatten().sum();
    assert_eq!(sum, GAUSS_DIVISOR);
}

#[test]
fn test_box_down2_means_with_rounding() {
    let input: Array2<u16> = array![
        [0, 2, 10, 10],
        [2, 4, 10, 11],
        [100, 100, 65535, 65535],
        [100, 100, 65535, 65535],
    ];
    let out = box_down2(&input);

    assert_eq!(out.dim(), (2, 2));
    assert_eq!(out[[0, 0]], 2); // (0+2+2+4)/4
    assert_eq!(out[[0, 1]], 10); // 41/4 rounds to 10
    assert_eq!(out[[1, 0]], 100);
    assert_eq!(out[[1, 1]], 65535); // widened sum, no overflow
}

#[test]
fn test_gauss_down4_preserves_flat_signal() {
    let input = Array2::<u16>::from_elem((32, 32), 1000);
    let out = gauss_down4(&input);

    assert_eq!(out.dim(), (8, 8));
    assert!(out.iter().all(|&v| v == 1000));
}

#[test]
fn test_pyramid_level_dimensions() {
    let frame = noise_frame(256, 256, 7);
    let pyramid = build_pyramid(&frame, 4).unwrap();

    let dims: Vec<_> = pyramid.levels.iter().map(|l| l.dim()).collect();
    assert_eq!(dims, vec![(128, 128), (32, 32), (8, 8), (2, 2)]);
}

#[test]
fn test_pyramid_rectangular_frame() {
    let frame = noise_frame(256, 192, 3);
    let pyramid = build_pyramid(&frame, 4).unwrap();

    assert_eq!(pyramid.levels[0].dim(), (96, 128));
    assert_eq!(pyramid.levels[3].dim(), (1, 2));
}

#[test]
fn test_pyramid_rejects_too_small_frame() {
    let frame = constant_frame(64, 64, 100);
    let err = build_pyramid(&frame, 4).unwrap_err();

    match err {
        BurstError::FrameTooSmall {
            width,
            height,
            levels,
        } => {
            assert_eq!((width, height, levels), (64, 64, 4));
        }
        other => panic!("expected FrameTooSmall, got {other:?}"),
    }
}

#[test]
fn test_pyramid_shallow_depth_accepts_small_frame() {
    let frame = constant_frame(64, 64, 100);
    let pyramid = build_pyramid(&frame, 2).unwrap();

    assert_eq!(pyramid.levels.len(), 2);
    assert_eq!(pyramid.levels[1].dim(), (8, 8));
}

#[test]
fn test_pyramid_deterministic() {
    let frame = noise_frame(256, 256, 11);
    let a = build_pyramid(&frame, 4).unwrap();
    let b = build_pyramid(&frame, 4).unwrap();

    for (la, lb) in a.levels.iter().zip(&b.levels) {
        assert_eq!(la, lb);
    }
}

#[test]
fn test_box_down2_of_frame_matches_manual_average() {
    let frame = noise_frame(8, 8, 21);
    let out = box_down2(&frame.data);

    for y in 0..4 {
        for x in 0..4 {
            let sum = u32::from(frame.data[[2 * y, 2 * x]])
                + u32::from(frame.data[[2 * y, 2 * x + 1]])
                + u32::from(frame.data[[2 * y + 1, 2 * x]])
                + u32::from(frame.data[[2 * y + 1, 2 * x + 1]]);
            assert_eq!(u32::from(out[[y, x]]), (sum + 2) / 4);
        }
    }
}

#[test]
fn test_frame_accessors() {
    let frame = Frame::new(Array2::<u16>::zeros((10, 20)), 16);
    assert_eq!(frame.width(), 20);
    assert_eq!(frame.height(), 10);
}
