/// Deep space background, shared with the fog colour.
pub const BACKGROUND_COLOUR: u32 = 0x050510;

/// Density of the exponential-squared distance fog.
pub const FOG_DENSITY: f32 = 0.0015;

pub const STAR_COUNT: usize = 3000;

/// Edge length of the cube the star field is scattered in, centred on the origin.
pub const STAR_FIELD_SPREAD: f32 = 4000.0;
pub const STAR_COLOUR: u32 = 0x888888;
pub const STAR_FIELD_SEED: u64 = 0x5741_4C41_5859;

pub const REFERENCE_SPHERE_COLOUR: u32 = 0x4444FF;
pub const REFERENCE_SPHERE_OPACITY: f32 = 0.03;
pub const REFERENCE_SPHERE_SEGMENTS: u32 = 32;

pub const LABEL_FONT_SIZE: f32 = 14.0;
pub const LABEL_FONT_PATH: &str = "fonts/NotoSansThai-Regular.ttf";

/// Installed Thai-capable fonts tried on native builds when the bundled label font is missing.
pub const SYSTEM_LABEL_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/truetype/tlwg/Loma.ttf",
    "/usr/share/fonts/truetype/tlwg/Garuda.ttf",
    "/System/Library/Fonts/Supplemental/Ayuthaya.ttf",
    "C:\\Windows\\Fonts\\LeelawUI.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
];

/// Alpha of the tinted plate behind each label, scaled by the label opacity.
pub const LABEL_BACKGROUND_ALPHA: f32 = 0.12;
pub const LABEL_PADDING_X: f32 = 6.0;
pub const LABEL_PADDING_Y: f32 = 2.0;

/// Static word collection shown before (or instead of) host-provided data.
pub const SNAPSHOT_PATH: &str = "data/guest_galaxy.galaxy.json";

pub const CANVAS_SELECTOR: &str = "#galaxy";
