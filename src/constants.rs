pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image-preview:generateContent";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_URL_ENV: &str = "GEMINI_API_URL";
pub const SERVER_ADDR_ENV: &str = "DECOR_ADDR";
pub const LOCATION_ENV: &str = "DECOR_LOCATION";

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8787";
pub const GENERATE_PATH: &str = "/api/generate";

pub const CMD_SERVE: &str = "s";

pub const DEFAULT_BUDGET: f64 = 2000.0;
pub const MIN_BUDGET: f64 = 500.0;
pub const MAX_BUDGET: f64 = 10000.0;

pub const SPACE_TYPES: [&str; 6] = [
    "Living Room",
    "Bedroom",
    "Office",
    "Kitchen",
    "Dining Room",
    "Outdoor Patio",
];
pub const DEFAULT_SPACE_TYPE: &str = "Living Room";

pub const COLOR_PALETTES: [&str; 6] = [
    "Warm Neutrals",
    "Cool Blues",
    "Earthy Greens",
    "Monochromatic",
    "Pastel Dreams",
    "Bold & Bright",
];
pub const DEFAULT_COLOR_PALETTE: &str = "Warm Neutrals";

pub const STORES: [&str; 6] = [
    "Amazon",
    "IKEA",
    "Target",
    "Walmart",
    "West Elm",
    "Crate & Barrel",
];
pub const DEFAULT_STORES: [&str; 2] = ["Amazon", "IKEA"];

pub const STYLE_DESCRIPTOR: &str = "Modern and minimalist";
pub const ANY_RETAILER_FALLBACK: &str = "Any popular online retailer";
pub const NO_LOCATION_HINT: &str = "User location not provided.";
