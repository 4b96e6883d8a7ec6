use super::*;
use crate::assets::bitmap::BitmapFont;

const PHRASE: &str = "one does not simply walk into mordor without a really good meme ";

fn bitmap() -> FontFace {
    FontFace::Bitmap(BitmapFont::builtin())
}

fn prefix(n: usize) -> String {
    PHRASE.chars().cycle().take(n).collect()
}

#[test]
fn uppercases_and_fits_on_one_line() {
    let layout = compute_layout(
        &bitmap(),
        "when you see it",
        Anchor::Bottom,
        800,
        800,
        &LayoutPolicy::default(),
    )
    .unwrap();

    assert_eq!(layout.text, "WHEN YOU SEE IT");
    assert_eq!(layout.font_px, 61);
    assert_eq!(layout.lines.len(), 1);
    assert_eq!(layout.lines[0].text, "WHEN YOU SEE IT");
    assert_eq!(layout.block_height, 64);
    assert_eq!(layout.y_start, 800 - 64 - 40);
    assert_eq!(layout.lines[0].x, (800 - 712) / 2);
}

#[test]
fn empty_and_blank_text_have_no_lines() {
    for text in ["", "   ", "\n\t"] {
        let layout = compute_layout(
            &bitmap(),
            text,
            Anchor::Center,
            640,
            480,
            &LayoutPolicy::default(),
        )
        .unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.block_height, 0);
    }
}

#[test]
fn anchors_place_block_at_margin_center_and_bottom() {
    let policy = LayoutPolicy::default();
    let top = compute_layout(&bitmap(), "top text", Anchor::Top, 600, 400, &policy).unwrap();
    assert_eq!(top.y_start, 20);

    let center = compute_layout(&bitmap(), "top text", Anchor::Center, 600, 400, &policy).unwrap();
    assert_eq!(center.y_start, (400 - center.block_height as i32) / 2);

    let bottom = compute_layout(&bitmap(), "top text", Anchor::Bottom, 600, 400, &policy).unwrap();
    assert_eq!(
        bottom.y_start + bottom.block_height as i32,
        400 - 20
    );
}

#[test]
fn block_stays_inside_canvas_for_every_length() {
    let policy = LayoutPolicy::default();
    for (w, h) in [(800, 800), (400, 300), (1200, 500)] {
        for n in 1..=160 {
            let text = prefix(n);
            for anchor in [Anchor::Top, Anchor::Center, Anchor::Bottom] {
                let layout = compute_layout(&bitmap(), &text, anchor, w, h, &policy).unwrap();
                if layout.is_empty() {
                    continue;
                }
                assert!(layout.y_start >= 0, "n={n} {anchor:?} {w}x{h}");
                assert!(
                    layout.y_start + layout.block_height as i32 <= h as i32,
                    "n={n} {anchor:?} {w}x{h}"
                );
                let last = layout.lines.last().unwrap();
                assert_eq!(
                    last.y + last.height as i32,
                    layout.y_start + layout.block_height as i32
                );
            }
        }
    }
}

#[test]
fn layout_is_a_pure_function() {
    let policy = LayoutPolicy::default();
    for n in [1, 17, 64, 150] {
        let text = prefix(n);
        let a = compute_layout(&bitmap(), &text, Anchor::Bottom, 700, 500, &policy).unwrap();
        let b = compute_layout(&bitmap(), &text, Anchor::Bottom, 700, 500, &policy).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn long_captions_shrink() {
    let policy = LayoutPolicy::default();
    let short = compute_layout(&bitmap(), &prefix(10), Anchor::Top, 900, 900, &policy).unwrap();
    let long = compute_layout(&bitmap(), &prefix(120), Anchor::Top, 900, 900, &policy).unwrap();
    assert!(long.font_px < short.font_px);
    assert!(long.lines.len() > 1);
}

#[test]
fn overlong_word_keeps_its_own_line() {
    let lines = wrap_words(&["A", "SUPERCALIFRAGILISTIC", "B"], 5);
    assert_eq!(lines, vec!["A", "SUPERCALIFRAGILISTIC", "B"]);

    let lines = wrap_words(&["AB", "CD", "EF"], 5);
    assert_eq!(lines, vec!["AB CD", "EF"]);
}

#[test]
fn base_size_and_wrap_width_are_clamped() {
    let policy = LayoutPolicy::default();
    assert_eq!(base_font_px(0, 2000, &policy), 80);
    assert_eq!(base_font_px(500, 100, &policy), 30);
    assert_eq!(base_font_px(15, 800, &policy), 61);

    assert_eq!(wrap_chars(&bitmap(), 30, 0, &policy), 1);
    assert_eq!(wrap_chars(&bitmap(), 8, 10_000, &policy), 20);
}

#[test]
fn invalid_policy_is_rejected() {
    let policy = LayoutPolicy {
        min_font_px: 90,
        ..LayoutPolicy::default()
    };
    assert!(matches!(
        compute_layout(&bitmap(), "x", Anchor::Top, 10, 10, &policy),
        Err(MemeError::InvalidInput(_))
    ));

    let policy = LayoutPolicy {
        min_wrap_chars: 0,
        ..LayoutPolicy::default()
    };
    assert!(policy.validate().is_err());
}
