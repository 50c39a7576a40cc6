use crate::constants::{
    COLOR_PALETTES, DEFAULT_SERVER_URL, GENERATE_PATH, LOCATION_ENV, SPACE_TYPES, STORES,
};
use crate::design::{DesignRequest, DesignResult, ErrorBody, Location};
use crate::session::{AppState, Session};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::{
    env,
    error::Error,
    fs,
    path::{Path, PathBuf},
};

/// Command-line inputs for one submission, before they are loaded into a
/// [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub image_path: PathBuf,
    pub budget: Option<f64>,
    pub space_type: Option<String>,
    pub color_palette: Option<String>,
    pub preferred_stores: Option<Vec<String>>,
    pub location_flag: Option<String>,
    pub server_url: String,
}

pub fn parse_args(args: &[String]) -> Result<ClientOptions, Box<dyn Error>> {
    let image_path = args.first().ok_or("An image path is required.")?;
    let mut options = ClientOptions {
        image_path: PathBuf::from(image_path),
        budget: None,
        space_type: None,
        color_palette: None,
        preferred_stores: None,
        location_flag: None,
        server_url: DEFAULT_SERVER_URL.to_string(),
    };

    let mut stores = Vec::new();
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "-b" => {
                let budget: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid budget: {}", value))?;
                options.budget = Some(budget);
            }
            "-t" => options.space_type = Some(pick_option(value, &SPACE_TYPES, "space type")?),
            "-p" => {
                options.color_palette = Some(pick_option(value, &COLOR_PALETTES, "color palette")?)
            }
            "-r" => stores.push(pick_option(value, &STORES, "store")?),
            "-l" => options.location_flag = Some(value.clone()),
            "-u" => options.server_url = value.clone(),
            _ => return Err(format!("Unknown option: {}", flag).into()),
        }
    }
    if !stores.is_empty() {
        options.preferred_stores = Some(stores);
    }
    Ok(options)
}

/// Matches a user value against a fixed option list, case-insensitively,
/// returning the canonical spelling.
fn pick_option(value: &str, allowed: &[&str], label: &str) -> Result<String, Box<dyn Error>> {
    allowed
        .iter()
        .find(|option| option.eq_ignore_ascii_case(value))
        .map(|option| option.to_string())
        .ok_or_else(|| {
            format!(
                "Unknown {} \"{}\"; choose one of: {}",
                label,
                value,
                allowed.join(", ")
            )
            .into()
        })
}

/// The three raster formats the collector accepts, keyed by extension.
pub fn mime_for_image(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Reads the image and encodes it as bare base64, with no data-URI prefix.
pub fn encode_image(path: &Path) -> Result<String, Box<dyn Error>> {
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read image file {}: {}", path.display(), e))?;
    Ok(base64::encode(bytes))
}

/// Two-outcome location read: coordinates from the `-l lat,lon` flag or the
/// DECOR_LOCATION variable, or `None` on any absence or malformation. Never
/// an error, so a missing location can never block submission.
pub fn read_location(flag: Option<&str>) -> Option<Location> {
    let raw = match flag {
        Some(raw) => raw.to_string(),
        None => env::var(LOCATION_ENV).ok()?,
    };
    let (latitude, longitude) = raw.split_once(',')?;
    Some(Location {
        latitude: latitude.trim().parse().ok()?,
        longitude: longitude.trim().parse().ok()?,
    })
}

fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.magenta} {msg}"),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

/// One POST to the design server. Non-2xx responses surface the server's
/// error message, or a generic status line when the body is unreadable.
pub async fn request_design(
    client: &Client,
    server_url: &str,
    request: &DesignRequest,
) -> Result<DesignResult, String> {
    let url = format!("{}{}", server_url.trim_end_matches('/'), GENERATE_PATH);
    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(|e| format!("Failed to reach the design server: {}", e))?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<DesignResult>()
            .await
            .map_err(|e| format!("Failed to decode the design result: {}", e))
    } else {
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(format!("Server responded with status: {}", status)),
        }
    }
}

/// Drives one submission through the state machine: validate, enter
/// `Loading`, encode the image, send the single request, land in `Result`
/// or `Error`.
pub async fn submit(client: &Client, server_url: &str, session: &mut Session) {
    if !session.begin() {
        return;
    }

    // begin() never enters Loading without an image attached
    let image = match session.image.clone() {
        Some(image) => image,
        None => {
            session.fail("No image attached.".to_string());
            return;
        }
    };
    let base64_image = match encode_image(&image.path) {
        Ok(encoded) => encoded,
        Err(e) => {
            session.fail(e.to_string());
            return;
        }
    };

    let request = DesignRequest {
        base64_image,
        mime_type: image.mime_type,
        budget: session.budget,
        space_type: session.space_type.clone(),
        color_palette: session.color_palette.clone(),
        preferred_stores: session.preferred_stores.clone(),
        location: session.location,
    };

    let spinner = create_spinner("Redecorating your space...".to_string());
    let outcome = request_design(client, server_url, &request).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(result) => session.complete(result),
        Err(message) => session.fail(message),
    }
}

/// Splits a `data:<mime>;base64,<payload>` string back into bytes and picks
/// a file extension from the mime type.
pub fn decode_data_uri(data_uri: &str) -> Result<(Vec<u8>, &'static str), Box<dyn Error>> {
    let trimmed = data_uri
        .strip_prefix("data:")
        .ok_or("Generated image is not a data URI.")?;
    let (header, payload) = trimmed
        .split_once(";base64,")
        .ok_or("Generated image is not base64-encoded.")?;
    let extension = match header {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };
    let bytes = base64::decode(payload)
        .map_err(|e| format!("Failed to decode the generated image: {}", e))?;
    Ok((bytes, extension))
}

fn save_generated_image(data_uri: &str, source: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let (bytes, extension) = decode_data_uri(data_uri)?;
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("design");
    let output = source.with_file_name(format!("{}_redecorated.{}", stem, extension));
    fs::write(&output, bytes)
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;
    Ok(output)
}

fn render_result(result: &DesignResult, source: &Path) -> Result<(), Box<dyn Error>> {
    println!("{:━^60}", " Your New Design ".green());
    for item in &result.furniture {
        println!(
            "  {} ${:.2} at {}",
            item.item_name.bold(),
            item.price,
            item.retailer.cyan()
        );
        println!("    {}", item.url.dimmed());
    }
    let total: f64 = result.furniture.iter().map(|item| item.price).sum();
    println!("  {}: ${:.2}", "Total".bold(), total);

    let saved = save_generated_image(&result.generated_image, source)?;
    println!("  Generated image saved to {}", saved.display().to_string().bold());
    println!("{:━^60}", "".green());
    Ok(())
}

/// Client entry point: collect inputs, run one submission, render the final
/// state.
pub async fn run_client(client: &Client, args: &[String]) -> Result<(), Box<dyn Error>> {
    let options = parse_args(args)?;
    let mime_type = mime_for_image(&options.image_path).ok_or_else(|| {
        format!(
            "Unsupported image format {}; use png, jpeg, or webp.",
            options.image_path.display()
        )
    })?;

    let mut session = Session::new();
    session.attach_image(&options.image_path, mime_type);
    if let Some(budget) = options.budget {
        session.budget = budget;
    }
    if let Some(space_type) = options.space_type {
        session.space_type = space_type;
    }
    if let Some(color_palette) = options.color_palette {
        session.color_palette = color_palette;
    }
    if let Some(preferred_stores) = options.preferred_stores {
        session.preferred_stores = preferred_stores;
    }
    session.location = read_location(options.location_flag.as_deref());

    submit(client, &options.server_url, &mut session).await;

    match session.state() {
        AppState::Result(result) => render_result(result, &options.image_path),
        AppState::Error(message) => {
            eprintln!("{} {}", "✗".red().bold(), message.red());
            Err("Failed to generate a design.".into())
        }
        AppState::Idle | AppState::Loading => {
            if let Some(message) = session.inline_error() {
                eprintln!("{} {}", "✗".red().bold(), message.red());
            }
            Err("Submission was not sent.".into())
        }
    }
}
