use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("memeframe-font-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn nothing_enabled() -> FontConfig {
    FontConfig {
        builtin_fallback: false,
        ..FontConfig::builtin_only()
    }
}

#[test]
fn builtin_only_resolves_bitmap_font() {
    let face = resolve_font(&FontConfig::builtin_only()).unwrap();
    assert_eq!(face.kind(), "bitmap");
    assert_eq!(face.source(), "builtin:5x7");
}

#[test]
fn all_sources_disabled_is_font_unavailable() {
    let err = resolve_font(&nothing_enabled()).unwrap_err();
    assert!(matches!(err, MemeError::FontUnavailable(_)));
}

#[test]
fn unreadable_font_files_fall_back_to_bitmap() {
    let dir = scratch_dir("garbage");
    let bogus = dir.join("impact.ttf");
    std::fs::write(&bogus, b"definitely not a font").unwrap();

    let cfg = FontConfig {
        font_files: vec![bogus.clone(), dir.join("missing.ttf")],
        font_dirs: vec![dir.clone()],
        ..FontConfig::builtin_only()
    };
    let face = resolve_font(&cfg).unwrap();
    assert_eq!(face.kind(), "bitmap");

    let cfg = FontConfig {
        font_files: vec![bogus],
        ..nothing_enabled()
    };
    assert!(matches!(
        resolve_font(&cfg),
        Err(MemeError::FontUnavailable(_))
    ));
}

#[test]
fn cache_shares_one_face_per_config() {
    let cfg = FontConfig::builtin_only();
    let a = cached_font(&cfg).unwrap();
    let b = cached_font(&cfg).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(cached_font(&nothing_enabled()).is_err());
}

#[test]
fn bitmap_face_metrics_are_consistent() {
    let face = FontFace::Bitmap(BitmapFont::builtin());
    assert_eq!(face.line_height(16), 16);
    assert_eq!(face.avg_advance(16), 12.0);
    assert_eq!(face.measure("HI", 16), 22);

    let mut hits = 0;
    face.draw_line("I", 8, 10, 20, &mut |x, y, _| {
        assert!((10..15).contains(&x));
        assert!((20..27).contains(&y));
        hits += 1;
    });
    assert_eq!(hits, 3 + 3 + 5);
}

#[test]
fn invalid_outline_bytes_are_rejected() {
    assert!(matches!(
        OutlineFont::from_bytes(vec![0, 1, 2, 3], 0),
        Err(MemeError::FontUnavailable(_))
    ));
}

#[test]
fn outline_face_metrics_and_coverage() {
    let face = resolve_font(&FontConfig::default()).unwrap();
    if face.kind() == "bitmap" {
        eprintln!("no outline font installed, skipping");
        return;
    }
    assert!(face.source() != "builtin:5x7");
    assert!(!face.identity_bytes().is_empty());

    let px = 48;
    let line_height = face.line_height(px);
    assert!(line_height > 0);
    let avg = face.avg_advance(px);
    assert!(avg.is_finite() && avg > 0.0);
    assert!(face.line_height(96) > line_height);

    let short = face.measure("HELLO", px);
    let long = face.measure("HELLO THERE", px);
    assert!(short > 0);
    assert!(long > short);
    assert_eq!(face.measure("", px), 0);

    let (x0, y0) = (30, 40);
    let slack = 2;
    let mut hits = 0;
    face.draw_line("HELLO", px, x0, y0, &mut |x, y, coverage| {
        assert!((0.0..=1.0 + 1e-3).contains(&coverage));
        assert!(x >= x0 - slack && x <= x0 + short as i32 + slack, "x={x}");
        assert!(y >= y0 - slack && y <= y0 + line_height as i32 + slack, "y={y}");
        if coverage > 0.5 {
            hits += 1;
        }
    });
    assert!(hits > 0);
}
