use glance_camera::{yuv_to_rgb, Frame, LayoutError, Plane, ReleaseHandle, Yuv420View};

fn i420_frame(width: u32, height: u32, luma: Vec<u8>, u: Vec<u8>, v: Vec<u8>) -> Frame {
    let chroma_w = (width as usize).div_ceil(2);
    Frame::new(
        width,
        height,
        [
            Plane::packed(luma, width as usize),
            Plane::packed(u, chroma_w),
            Plane::packed(v, chroma_w),
        ],
        ReleaseHandle::detached(),
    )
}

#[test]
fn test_yuv_to_rgb_neutral_chroma_is_gray() {
    assert_eq!(yuv_to_rgb(0, 128, 128), [0, 0, 0]);
    assert_eq!(yuv_to_rgb(128, 128, 128), [128, 128, 128]);
    assert_eq!(yuv_to_rgb(255, 128, 128), [255, 255, 255]);
}

#[test]
fn test_yuv_to_rgb_red_push() {
    // Max V drives red up and green down
    let [r, g, b] = yuv_to_rgb(128, 128, 255);
    assert_eq!(r, 255);
    assert!(g < 128);
    assert_eq!(b, 128);
}

#[test]
fn test_yuv_to_rgb_blue_push() {
    // Max U drives blue up and green down
    let [r, g, b] = yuv_to_rgb(128, 255, 128);
    assert_eq!(r, 128);
    assert!(g < 128);
    assert_eq!(b, 255);
}

#[test]
fn test_yuv_to_rgb_clamps() {
    // Y=255 with strong V would overflow red without the clamp
    let [r, _, _] = yuv_to_rgb(255, 128, 255);
    assert_eq!(r, 255);
}

#[test]
fn test_view_planar_sampling() {
    // 4x2 frame; chroma is 2x1
    let luma = vec![10, 20, 30, 40, 50, 60, 70, 80];
    let u = vec![128, 128];
    let v = vec![128, 128];
    let frame = i420_frame(4, 2, luma, u, v);

    let view = Yuv420View::new(&frame).unwrap();
    assert_eq!(view.sample_rgb(0, 0), [10, 10, 10]);
    assert_eq!(view.sample_rgb(3, 1), [80, 80, 80]);
}

#[test]
fn test_view_semi_planar_sampling() {
    // NV12-style: U and V planes view the same interleaved buffer with
    // pixel stride 2. 2x2 frame, one chroma sample pair.
    let luma = vec![100, 100, 100, 100];
    let interleaved_u = vec![60, 200];
    let interleaved_v = vec![200, 60];
    let frame = Frame::new(
        2,
        2,
        [
            Plane::packed(luma, 2),
            Plane::new(interleaved_u, 2, 2),
            Plane::new(interleaved_v, 2, 2),
        ],
        ReleaseHandle::detached(),
    );

    let view = Yuv420View::new(&frame).unwrap();
    // All four pixels share the chroma pair (U=60, V=200)
    let expected = yuv_to_rgb(100, 60, 200);
    assert_eq!(view.sample_rgb(0, 0), expected);
    assert_eq!(view.sample_rgb(1, 1), expected);
}

#[test]
fn test_view_chroma_shared_across_quad() {
    // 4x4 with distinct chroma per 2x2 quad
    let luma = vec![128; 16];
    let u = vec![10, 20, 30, 40];
    let v = vec![128; 4];
    let frame = i420_frame(4, 4, luma, u, v);

    let view = Yuv420View::new(&frame).unwrap();
    // Pixels (0,0) and (1,1) share chroma sample 0; (2,0) uses sample 1
    assert_eq!(view.sample_rgb(0, 0), view.sample_rgb(1, 1));
    assert_eq!(view.sample_rgb(2, 0), yuv_to_rgb(128, 20, 128));
    assert_eq!(view.sample_rgb(0, 2), yuv_to_rgb(128, 30, 128));
}

#[test]
fn test_view_rejects_empty_frame() {
    let frame = i420_frame(0, 0, vec![], vec![], vec![]);
    assert!(matches!(
        Yuv420View::new(&frame),
        Err(LayoutError::EmptyFrame { .. })
    ));
}

#[test]
fn test_view_rejects_bad_luma_stride() {
    let frame = Frame::new(
        2,
        2,
        [
            Plane::new(vec![0; 8], 4, 2),
            Plane::packed(vec![128; 1], 1),
            Plane::packed(vec![128; 1], 1),
        ],
        ReleaseHandle::detached(),
    );
    assert!(matches!(
        Yuv420View::new(&frame),
        Err(LayoutError::LumaStride { pixel_stride: 2 })
    ));
}

#[test]
fn test_view_rejects_mismatched_chroma_strides() {
    let frame = Frame::new(
        2,
        2,
        [
            Plane::packed(vec![0; 4], 2),
            Plane::new(vec![128; 2], 2, 1),
            Plane::new(vec![128; 2], 2, 2),
        ],
        ReleaseHandle::detached(),
    );
    assert!(matches!(
        Yuv420View::new(&frame),
        Err(LayoutError::ChromaStride { .. })
    ));
}

#[test]
fn test_view_rejects_short_luma_plane() {
    let frame = Frame::new(
        4,
        4,
        [
            Plane::packed(vec![0; 8], 4),
            Plane::packed(vec![128; 4], 2),
            Plane::packed(vec![128; 4], 2),
        ],
        ReleaseHandle::detached(),
    );
    assert!(matches!(
        Yuv420View::new(&frame),
        Err(LayoutError::PlaneTooShort { plane: 0, .. })
    ));
}

#[test]
fn test_view_rejects_short_chroma_plane() {
    let frame = Frame::new(
        4,
        4,
        [
            Plane::packed(vec![0; 16], 4),
            Plane::packed(vec![128; 1], 2),
            Plane::packed(vec![128; 4], 2),
        ],
        ReleaseHandle::detached(),
    );
    assert!(matches!(
        Yuv420View::new(&frame),
        Err(LayoutError::PlaneTooShort { plane: 1, .. })
    ));
}

#[test]
fn test_view_accepts_odd_dimensions() {
    // 3x3 frame: chroma rounds up to 2x2
    let frame = i420_frame(3, 3, vec![50; 9], vec![128; 4], vec![128; 4]);
    let view = Yuv420View::new(&frame).unwrap();
    assert_eq!(view.sample_rgb(2, 2), [50, 50, 50]);
}
