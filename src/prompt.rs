// file: src/prompt.rs
// description: interactive profile selection over stdin
// reference: operator selection interface, re-prompt until valid

use crate::error::{IntelError, Result};
use crate::profiles::{keyword_union, Profile, INDUSTRY_PROFILES, REGION_PROFILES};
use std::io::BufRead;

/// Outcome of a completed selection: display names for the report
/// header plus the keyword set handed to the matcher.
#[derive(Debug, Clone)]
pub struct ProfileSelection {
    pub names: Vec<String>,
    pub keywords: Vec<String>,
}

/// Parses a comma-separated list of 1-based option numbers. Empty
/// input or any out-of-range/non-numeric token is an error; the
/// interactive loop re-prompts on it, the flag path surfaces it.
pub fn parse_selection(input: &str, option_count: usize) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let number: usize = token
            .parse()
            .map_err(|_| IntelError::Selection(format!("'{}' is not a number", token)))?;
        if number == 0 || number > option_count {
            return Err(IntelError::Selection(format!(
                "{} is out of range 1..={}",
                number, option_count
            )));
        }
        if !indices.contains(&(number - 1)) {
            indices.push(number - 1);
        }
    }
    if indices.is_empty() {
        return Err(IntelError::Selection("empty selection".to_string()));
    }
    Ok(indices)
}

/// Builds an industry selection from already-parsed option indices.
/// Keywords are the sorted unique union across the chosen profiles.
pub fn industry_selection(indices: &[usize]) -> ProfileSelection {
    let chosen: Vec<&Profile> = indices.iter().map(|&i| &INDUSTRY_PROFILES[i]).collect();
    ProfileSelection {
        names: chosen.iter().map(|p| p.name.to_string()).collect(),
        keywords: keyword_union(&chosen),
    }
}

/// Country keywords selectable after a region choice: the sorted
/// unique union of the chosen regions' keywords.
pub fn region_keyword_options(indices: &[usize]) -> Vec<String> {
    let chosen: Vec<&Profile> = indices.iter().map(|&i| &REGION_PROFILES[i]).collect();
    keyword_union(&chosen)
}

/// Non-interactive country selection. `regions` is the raw region
/// number list; `countries` optionally refines the regions' keyword
/// union and is rejected when no region selection accompanies it.
/// Returns None when neither is given, deferring to the prompts.
pub fn country_selection_from_flags(
    regions: Option<&str>,
    countries: Option<Vec<String>>,
) -> Result<Option<ProfileSelection>> {
    let Some(regions) = regions else {
        if countries.is_some() {
            return Err(IntelError::Selection(
                "country keywords require a region selection".to_string(),
            ));
        }
        return Ok(None);
    };

    let indices = parse_selection(regions, REGION_PROFILES.len())?;
    let options = region_keyword_options(&indices);
    let keywords = match countries {
        Some(picked) => {
            let picked: Vec<String> = picked.into_iter().map(|kw| kw.to_lowercase()).collect();
            if let Some(unknown) = picked.iter().find(|kw| !options.contains(*kw)) {
                return Err(IntelError::Selection(format!(
                    "'{}' is not a keyword of the selected regions",
                    unknown
                )));
            }
            picked
        }
        None => options,
    };
    Ok(Some(ProfileSelection {
        names: keywords.clone(),
        keywords,
    }))
}

fn read_selection(
    input: &mut impl BufRead,
    prompt: &str,
    options: &[String],
) -> Result<Vec<usize>> {
    loop {
        println!("{}", prompt);
        for (i, option) in options.iter().enumerate() {
            println!("{}: {}", i + 1, option);
        }
        println!("------------------------------------");

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(IntelError::Selection("input stream closed".to_string()));
        }

        match parse_selection(&line, options.len()) {
            Ok(indices) => return Ok(indices),
            Err(e) => println!("Invalid selection ({}). Please enter numbers from the list.", e),
        }
    }
}

/// First operator selection: industries (multi-select).
pub fn select_industries(input: &mut impl BufRead) -> Result<ProfileSelection> {
    let options: Vec<String> = INDUSTRY_PROFILES.iter().map(|p| p.name.to_string()).collect();
    let indices = read_selection(
        input,
        "\n--- Select Relevant Industries (comma-separated) ---",
        &options,
    )?;
    Ok(industry_selection(&indices))
}

/// Second operator selection: regions, then a refinement multi-select
/// over the union of countries/sub-regions within the chosen regions.
/// The refined keywords double as the display names.
pub fn select_countries(input: &mut impl BufRead) -> Result<ProfileSelection> {
    let region_options: Vec<String> = REGION_PROFILES.iter().map(|p| p.name.to_string()).collect();
    let region_indices = read_selection(
        input,
        "\n--- Select Relevant Regions (comma-separated) ---",
        &region_options,
    )?;

    let country_options = region_keyword_options(&region_indices);
    let country_indices = read_selection(
        input,
        "\n--- Select Specific Countries/Sub-regions (comma-separated) ---",
        &country_options,
    )?;

    let keywords: Vec<String> = country_indices
        .iter()
        .map(|&i| country_options[i].clone())
        .collect();
    Ok(ProfileSelection {
        names: keywords.clone(),
        keywords,
    })
}
