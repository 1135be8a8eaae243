/// Colour assigned to labels whose cluster is absent or outside the palette.
pub const NEUTRAL_LABEL_COLOUR: u32 = 0xFFFFFF;

pub struct ClusterColour {
    pub id: i64,
    pub hex: u32,
}

pub const CLUSTER_PALETTE: &[ClusterColour] = &[
    ClusterColour {
        id: 1,
        hex: 0xFF5733, // vibrant orange-red
    },
    ClusterColour {
        id: 2,
        hex: 0x33FF57, // neon lime green
    },
    ClusterColour {
        id: 3,
        hex: 0x3357FF, // bright blue
    },
    ClusterColour {
        id: 4,
        hex: 0xF333FF, // magenta
    },
    ClusterColour {
        id: 5,
        hex: 0xFFFF33, // bright yellow
    },
    ClusterColour {
        id: 6,
        hex: 0x33FFFF, // cyan
    },
    ClusterColour {
        id: 7,
        hex: 0xFF3385, // pink
    },
    ClusterColour {
        id: 8,
        hex: 0x95A5A6, // concrete grey
    },
    ClusterColour {
        id: 9,
        hex: 0xFF8C00, // dark orange
    },
    ClusterColour {
        id: 10,
        hex: 0x2ECC71, // emerald green
    },
    ClusterColour {
        id: 11,
        hex: 0xC0392B, // strong red
    },
];

pub fn get_cluster_colour(id: i64) -> u32 {
    CLUSTER_PALETTE
        .iter()
        .find(|c| c.id == id)
        .map_or(NEUTRAL_LABEL_COLOUR, |c| c.hex)
}

/// Split a packed `0xRRGGBB` colour into its channels.
pub const fn hex_to_rgb(hex: u32) -> (u8, u8, u8) {
    (
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}
