use crate::providers::yelp::Business;
use anyhow::{Context, Result};
use console::{style, Style, StyledObject};
use serde::Serialize;
use std::io::{self, Write};

const SEPARATOR: &str = "--------------------------";

/// One address and the radius searched around it.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LocationQuery {
  pub address: String,
  /// Meters.
  pub radius: u32,
}

/// The businesses found for one [`LocationQuery`], in API order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LocationResult {
  pub location: LocationQuery,
  pub businesses: Vec<Business>,
}

/// Display scale shared by the proximity and price indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Low,
  Medium,
  High,
}

impl Severity {
  pub fn style(self) -> Style {
    match self {
      Self::Low => Style::new().green(),
      Self::Medium => Style::new().yellow(),
      Self::High => Style::new().red(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
  Near,
  Medium,
  Far,
}

impl Proximity {
  /// Classifies `distance` against the search `radius`, both in meters.
  ///
  /// Far starts strictly beyond `radius - 200`, medium strictly beyond half
  /// the radius.
  pub fn classify(distance: f64, radius: u32) -> Self {
    let radius = f64::from(radius);
    if distance > radius - 200.0 {
      Self::Far
    } else if distance > radius / 2.0 {
      Self::Medium
    } else {
      Self::Near
    }
  }

  pub const fn severity(self) -> Severity {
    match self {
      Self::Near => Severity::Low,
      Self::Medium => Severity::Medium,
      Self::Far => Severity::High,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
  Cheap,
  Moderate,
  Expensive,
  Unknown,
}

const CURRENCY_GLYPHS: [char; 4] = ['$', '€', '£', '¥'];

impl PriceTier {
  /// Classifies a price symbol such as `€€`. Only one to three repetitions of
  /// a single currency glyph are recognised.
  pub fn classify(price: Option<&str>) -> Self {
    let Some(price) = price.map(str::trim) else {
      return Self::Unknown;
    };
    let mut glyphs = price.chars();
    let Some(first) = glyphs.next() else {
      return Self::Unknown;
    };
    if !CURRENCY_GLYPHS.contains(&first) || !glyphs.all(|c| c == first) {
      return Self::Unknown;
    }
    match price.chars().count() {
      1 => Self::Cheap,
      2 => Self::Moderate,
      3 => Self::Expensive,
      _ => Self::Unknown,
    }
  }

  pub const fn severity(self) -> Severity {
    match self {
      Self::Cheap => Severity::Low,
      Self::Moderate | Self::Unknown => Severity::Medium,
      Self::Expensive => Severity::High,
    }
  }
}

/// `412m`, coloured by how close it is to the edge of the radius.
///
/// The distance is rounded before it is classified so the colour always
/// agrees with the number shown.
pub fn proximity_indicator(distance: f64, radius: u32) -> StyledObject<String> {
  let shown = distance.round();
  Proximity::classify(shown, radius)
    .severity()
    .style()
    .apply_to(format!("{shown:.0}m"))
}

/// The price symbol coloured by tier, or a `?` when it is unknown.
pub fn price_indicator(price: Option<&str>) -> StyledObject<String> {
  let tier = PriceTier::classify(price);
  let text = match tier {
    PriceTier::Unknown => "?".to_string(),
    _ => price.unwrap_or_default().trim().to_string(),
  };
  tier.severity().style().apply_to(text)
}

pub fn business_line(business: &Business, radius: u32) -> String {
  format!(
    "|\t{} @{} for {}",
    business.name,
    proximity_indicator(business.distance, radius),
    price_indicator(business.price.as_deref())
  )
}

/// The green banner printed before any request is sent.
pub fn print_banner(addresses: &[String], radius: u32) {
  println!("#############");
  println!(
    "{}",
    style(format!(
      "Configuration: {radius}m around {}",
      addresses.join(" and ")
    ))
    .green()
  );
  println!("#############\n\n");
}

/// Writes one block per location: header, one line per business, separator.
pub fn write_human_readable<W: Write>(
  out: &mut W,
  results: &[LocationResult],
) -> io::Result<()> {
  for result in results {
    writeln!(out, "Restaurants @ {}:", result.location.address)?;
    for business in &result.businesses {
      writeln!(out, "{}", business_line(business, result.location.radius))?;
    }
    writeln!(out, "{SEPARATOR}")?;
  }
  Ok(())
}

pub fn print_human_readable(results: &[LocationResult]) -> Result<()> {
  write_human_readable(&mut io::stdout().lock(), results)
    .context("Failed to print results")
}

pub fn print_json(results: &[LocationResult]) -> Result<()> {
  serde_json::to_string_pretty(results)
    .map(|s| println!("{s}"))
    .context("Failed to serialize results to JSON")
}
