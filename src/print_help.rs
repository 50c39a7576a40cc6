use crate::constants::{
    COLOR_PALETTES, DEFAULT_BUDGET, DEFAULT_COLOR_PALETTE, DEFAULT_SERVER_URL, DEFAULT_SPACE_TYPE,
    DEFAULT_STORES, MAX_BUDGET, MIN_BUDGET, SPACE_TYPES, STORES,
};
use colored::Colorize;

pub fn print_help() {
    println!("{:━^64}", " decor ".yellow());
    println!("Upload a photo of a room, get an AI-redecorated image plus a");
    println!("shopping list that stays within your budget.");
    println!("\nUsage:");
    println!("  {} <image_path> [options]", "decor".bold().green());
    println!("  {}                         run the design server", "decor s".bold().magenta());
    println!("\nOptions:");
    println!(
        "  {}  Budget in dollars, {}-{} (default {}).",
        "-b <amount>".bold().cyan(),
        MIN_BUDGET,
        MAX_BUDGET,
        DEFAULT_BUDGET
    );
    println!(
        "  {}  Space type (default \"{}\").",
        "-t <space> ".bold().cyan(),
        DEFAULT_SPACE_TYPE
    );
    println!("              One of: {}", SPACE_TYPES.join(", "));
    println!(
        "  {}  Color palette (default \"{}\").",
        "-p <palette>".bold().cyan(),
        DEFAULT_COLOR_PALETTE
    );
    println!("              One of: {}", COLOR_PALETTES.join(", "));
    println!(
        "  {}  Preferred store, repeatable (default {}).",
        "-r <store> ".bold().cyan(),
        DEFAULT_STORES.join(", ")
    );
    println!("              One of: {}", STORES.join(", "));
    println!(
        "  {}  Location as lat,lon (also read from DECOR_LOCATION).",
        "-l <coords>".bold().cyan()
    );
    println!(
        "  {}  Design server URL (default {}).",
        "-u <url>   ".bold().cyan(),
        DEFAULT_SERVER_URL
    );
    println!("  {}    Display this help message.", "-h, -help".bold().blue());
    println!("\nExamples:");
    println!("  {} living_room.jpg", "decor".bold().green());
    println!(
        "  {} bedroom.png -b 3500 -t Bedroom -p \"Cool Blues\" -r IKEA -r Target",
        "decor".bold().green()
    );
    println!("  {}", "decor s".bold().magenta());
    println!("\nServer environment:");
    println!("  {}  credential for the generation model (required)", "GEMINI_API_KEY".bold());
    println!("  {}  bind address (default 127.0.0.1:8787)", "DECOR_ADDR    ".bold());
    println!("{:━^64}", "".yellow());
}
