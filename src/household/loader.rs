//! Load household batch files (JSON array of households)

use super::Household;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load all households from a JSON file containing an array
pub fn load_households<P: AsRef<Path>>(path: P) -> Result<Vec<Household>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_households_from_reader(BufReader::new(file))
}

/// Load a single household from a JSON file
pub fn load_household<P: AsRef<Path>>(path: P) -> Result<Household, Box<dyn Error>> {
    let file = File::open(path)?;
    let household = serde_json::from_reader(BufReader::new(file))?;
    Ok(household)
}

/// Load households from any reader (e.g., string buffer, network stream)
pub fn load_households_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<Household>, Box<dyn Error>> {
    let households = serde_json::from_reader(reader)?;
    Ok(households)
}
