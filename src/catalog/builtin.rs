use crate::common::Color;

const fn hex(rgb: u32) -> Color {
    Color::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Emotion palettes shipped with the binary, in display order.
pub(super) const BUILTIN_PALETTES: &[(&str, &[Color])] = &[
    ("joy", &[hex(0xffd700), hex(0xffa500), hex(0xfff44f)]),
    ("calm", &[hex(0xa8dadc), hex(0x457b9d), hex(0xf1faee)]),
    ("sadness", &[hex(0x1d3557), hex(0x6c757d), hex(0x264653)]),
    ("anger", &[hex(0xd00000), hex(0x9d0208), hex(0xe85d04)]),
    ("fear", &[hex(0x2b2d42), hex(0x4a4e69), hex(0x22223b)]),
    ("love", &[hex(0xff4d6d), hex(0xff8fa3), hex(0xc9184a)]),
    ("surprise", &[hex(0xf72585), hex(0x7209b7), hex(0x4cc9f0)]),
    ("energy", &[hex(0xff6d00), hex(0xffea00), hex(0x00e676)]),
    ("nature", &[hex(0x2d6a4f), hex(0x74c69d), hex(0xb7e4c7)]),
    ("mystery", &[hex(0x3c096c), hex(0x5a189a), hex(0x10002b)]),
];
