use super::*;

fn lit_pixels(text: &str, px: u32) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    BitmapFont::builtin().draw(text, px, 0, 0, &mut |x, y, c| {
        assert_eq!(c, 1.0);
        out.push((x, y));
    });
    out
}

#[test]
fn unit_scales_with_size_and_never_hits_zero() {
    assert_eq!(BitmapFont::unit(0), 1);
    assert_eq!(BitmapFont::unit(8), 1);
    assert_eq!(BitmapFont::unit(61), 8);
    assert_eq!(BitmapFont::builtin().line_height(61), 64);
}

#[test]
fn measure_drops_trailing_spacing() {
    let font = BitmapFont::builtin();
    assert_eq!(font.measure("", 8), 0);
    assert_eq!(font.measure("A", 8), 5);
    assert_eq!(font.measure("AB", 16), 2 * 12 - 2);
}

#[test]
fn space_is_blank_and_lowercase_matches_uppercase() {
    assert!(lit_pixels(" ", 8).is_empty());
    assert_eq!(lit_pixels("meme", 8), lit_pixels("MEME", 8));
}

#[test]
fn glyph_pixels_stay_inside_the_cell() {
    let font = BitmapFont::builtin();
    for px in [8, 24, 61] {
        let unit = BitmapFont::unit(px) as i32;
        let width = font.measure("WHEN YOU SEE IT", px) as i32;
        for (x, y) in lit_pixels("WHEN YOU SEE IT", px) {
            assert!(x >= 0 && x < width);
            assert!(y >= 0 && y < 7 * unit);
        }
    }
}

#[test]
fn unknown_characters_render_as_question_mark() {
    assert_eq!(lit_pixels("\u{263a}", 8), lit_pixels("?", 8));
    assert_eq!(BitmapFont::builtin().table_bytes().len(), TABLE_CHARS.len() * 7);
}
