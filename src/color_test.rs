use super::*;

#[test]
fn display_is_lowercase_hex() {
    assert_eq!(Rgb(0x0a, 0x0a, 0x0a).to_string(), "#0a0a0a");
    assert_eq!(Rgb::YELLOW.to_string(), "#ffff00");
}

#[test]
fn shade_scales_channels() {
    assert_eq!(Rgb(200, 100, 0).shade(0.5), Rgb(100, 50, 0));
}

#[test]
fn shade_clamps_factor() {
    assert_eq!(Rgb(10, 20, 30).shade(2.0), Rgb(10, 20, 30));
    assert_eq!(Rgb(10, 20, 30).shade(-1.0), Rgb::BLACK);
}
