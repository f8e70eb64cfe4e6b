pub mod fixtures;

use stratum::{FilterPolicy, Outline};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Runs the in-memory pipeline: parse, extract with the default policy.
pub fn extract_outline(data: &[u8]) -> Result<Outline, Box<dyn std::error::Error>> {
    let document = stratum::parse_bytes(data)?;
    Ok(stratum::extract(&document, &FilterPolicy::default())?)
}

/// Runs the whole pipeline and returns the rendered JSON, trailing
/// newline included, exactly as the CLI would print it.
pub fn extract_to_json(data: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
    let outline = extract_outline(data)?;
    let mut buffer = Vec::new();
    stratum::write_outline(&outline, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
