//! End-to-end conversions through the public API.

use stereoframe::codec::{
    side_by_side_to_anaglyph, side_by_side_to_vertical_interlaced,
    vertical_interlaced_to_side_by_side,
};
use stereoframe::{
    convert, extract_eye, AnaglyphColors, ConvertOptions, DisplayFormat, Eye, FrameData, ImgVec,
    InterlaceConvention, Rgb, Rgba, StereoFormat, StereoImage, StereoSettings,
};

const RED: Rgba<f32> = Rgba {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
const BLUE: Rgba<f32> = Rgba {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

fn red_blue_sbs() -> ImgVec<Rgba<f32>> {
    let row = [RED, RED, BLUE, BLUE];
    ImgVec::new(row.iter().chain(row.iter()).copied().collect(), 4, 2)
}

#[test]
fn side_by_side_to_vertical_interlaced_scenario() {
    let sbs = red_blue_sbs();
    let conv = InterlaceConvention::DEFAULT;
    let vi = side_by_side_to_vertical_interlaced(sbs.as_ref(), conv).unwrap();
    for row in vi.rows() {
        assert_eq!(row, &[BLUE, RED, BLUE, RED]);
    }
    let back = vertical_interlaced_to_side_by_side(vi.as_ref(), conv).unwrap();
    assert_eq!(back, sbs);
}

#[test]
fn anaglyph_tie_zeroes_red() {
    let colors = AnaglyphColors::new(Rgb::new(1.0, 0.0, 0.0), Rgb::new(1.0, 1.0, 1.0));
    let ana = side_by_side_to_anaglyph(red_blue_sbs().as_ref(), colors).unwrap();
    assert_eq!((ana.width(), ana.height()), (2, 2));
    for px in ana.pixels() {
        assert_eq!(px.r, 0.0);
        // Green and blue come from the right eye.
        assert_eq!((px.g, px.b, px.a), (0.0, 1.0, 1.0));
    }
}

#[test]
fn anaglyph_roundtrip_keeps_filtered_channels() {
    let opts = ConvertOptions::new();
    let ana = convert(
        StereoImage::Single(red_blue_sbs()),
        StereoFormat::SideBySide,
        StereoFormat::Anaglyph,
        &opts,
    )
    .unwrap();
    let sbs = convert(ana, StereoFormat::Anaglyph, StereoFormat::SideBySide, &opts)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!((sbs.width(), sbs.height()), (4, 2));
    // Red survives on the left, blue on the right.
    assert_eq!(sbs.buf()[0], RED);
    assert_eq!(sbs.buf()[2], BLUE);
}

#[test]
fn every_single_buffer_format_roundtrips_through_side_by_side() {
    let buf = (0..64u8)
        .map(|v| Rgba::new(v, v.wrapping_mul(3), 255 - v, 255))
        .collect();
    let img = ImgVec::new(buf, 8, 8);
    let opts = ConvertOptions::new();
    for format in StereoFormat::ALL {
        if format == StereoFormat::Anaglyph {
            continue;
        }
        let there = convert(
            StereoImage::Single(img.clone()),
            StereoFormat::SideBySide,
            format,
            &opts,
        )
        .unwrap();
        let back = convert(there, format, StereoFormat::SideBySide, &opts).unwrap();
        assert_eq!(back, StereoImage::Single(img.clone()), "{format:?}");
    }
}

#[test]
fn eyes_survive_any_packing() {
    // Left eye all 10, right eye all 200.
    let left = ImgVec::new(vec![Rgba::new(10u8, 10, 10, 255); 16], 4, 4);
    let right = ImgVec::new(vec![Rgba::new(200u8, 200, 200, 255); 16], 4, 4);
    let pair = StereoImage::Pair(left.clone(), right.clone());
    let opts = ConvertOptions::new();
    for format in StereoFormat::ALL {
        if format == StereoFormat::Anaglyph {
            continue;
        }
        let packed = convert(pair.clone(), StereoFormat::TwoImages, format, &opts).unwrap();
        let l = extract_eye(&packed, format, Eye::Left, false, &opts).unwrap();
        let r = extract_eye(&packed, format, Eye::Right, false, &opts).unwrap();
        assert!(l.pixels().all(|p| p.r == 10), "{format:?}");
        assert!(r.pixels().all(|p| p.r == 200), "{format:?}");
    }
}

#[test]
fn frame_data_dispatch() {
    let img = ImgVec::new(vec![Rgba::new(1u16, 2, 3, 4); 4 * 2], 4, 2);
    let frame = FrameData::from(StereoImage::Single(img));
    let out = frame
        .convert(
            StereoFormat::SideBySide,
            StereoFormat::Checkerboard,
            &ConvertOptions::new(),
        )
        .unwrap();
    assert_eq!((out.width(), out.height()), (4, 2));
    assert!(!out.is_pair());
}

#[test]
fn settings_to_eye_transforms() {
    let state = StereoSettings::new()
        .with_format(DisplayFormat::MonoTopBottom)
        .with_max_convergence(8)
        .with_convergence(3)
        .into_state(64);
    let (left, right) = state.eye_transforms(Default::default());
    assert_eq!(left, right);
    assert_eq!(left.scale.y, 0.5);
}
