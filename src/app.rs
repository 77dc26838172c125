use crate::cli::Cli;
use crate::logging;
use crate::providers::yelp;
use crate::results;
use crate::steps;
use crate::user_config::{self, UserConfig};
use anyhow::{anyhow, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::env;
use std::time::Duration;

const API_KEY_ENV: &str = "YELP_API_KEY";
const BASE_URL_ENV: &str = "YELP_API_URL";

pub struct App {
  cli: Cli,
  config: UserConfig,
  api_key: Option<String>,
  base_url: String,
}

impl App {
  pub fn new() -> Result<Self> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = user_config::load();
    let api_key = resolve_api_key(
      cli.api_key_flag.as_deref(),
      env::var(API_KEY_ENV).ok(),
      &config,
    );
    let base_url = resolve_base_url(
      cli.base_url_flag.as_deref(),
      env::var(BASE_URL_ENV).ok(),
      &config,
    );
    tracing::debug!(%base_url, has_key = api_key.is_some(), "configuration resolved");

    Ok(Self {
      cli,
      config,
      api_key,
      base_url,
    })
  }

  pub async fn run(&self) -> Result<()> {
    if self.cli.save_key {
      self.save_key()?;
    }
    if self.cli.config_show {
      return self.print_config();
    }

    let api_key = self.api_key.as_deref().ok_or_else(|| {
      anyhow!(
        "No Yelp API key found: pass --api-key, set {API_KEY_ENV}, or save one with --api-key <KEY> --save-key"
      )
    })?;
    let http = Client::builder()
      .user_agent(format!("miam_cli/{}", env!("CARGO_PKG_VERSION")))
      .build()?;
    let client = yelp::Client::new(http, &self.base_url, api_key);

    let addresses = self.cli.locations();
    if !self.cli.json {
      results::print_banner(&addresses, self.cli.radius);
    }

    let progress = self.progress_bar(addresses.len())?;
    let fetched = steps::fetch_all(
      &client,
      &addresses,
      self.cli.radius,
      usize::from(self.cli.concurrency),
      |done| {
        progress.set_message(done.location.address.clone());
        progress.inc(1);
      },
    )
    .await;
    progress.finish_and_clear();

    let fetched = fetched?;
    if self.cli.json {
      results::print_json(&fetched)
    } else {
      results::print_human_readable(&fetched)
    }
  }

  fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
    if self.cli.json {
      return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(ProgressStyle::with_template(
      "{spinner} Searching restaurants {pos}/{len} {msg}",
    )?);
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
  }

  fn save_key(&self) -> Result<()> {
    let cfg = UserConfig {
      api_key: self.cli.api_key_flag.clone(),
      ..self.config.clone()
    };
    user_config::store(&cfg)?;
    println!(
      "{} API key saved to {}",
      style("✔").green(),
      user_config::path()?.display()
    );
    Ok(())
  }

  fn print_config(&self) -> Result<()> {
    let key = |s| style(s).bold().cyan();
    println!("{} {}", key("Config file:"), user_config::path()?.display());
    println!(
      "{} {}",
      key("API key:"),
      self
        .api_key
        .as_deref()
        .map_or_else(|| "not set".to_string(), mask_key)
    );
    println!("{} {}", key("Base URL:"), self.base_url);
    println!("{} {}", key("Radius:"), self.cli.radius);
    println!("{} {}", key("Locations:"), self.cli.locations().join(" && "));
    Ok(())
  }
}

/// Flag, then environment, then config file. Empty values are ignored.
fn resolve_api_key(
  flag: Option<&str>,
  env_value: Option<String>,
  config: &UserConfig,
) -> Option<String> {
  let usable = |key: &String| !key.trim().is_empty();
  flag
    .map(ToString::to_string)
    .filter(usable)
    .or_else(|| env_value.filter(usable))
    .or_else(|| config.api_key.clone().filter(usable))
}

fn resolve_base_url(
  flag: Option<&str>,
  env_value: Option<String>,
  config: &UserConfig,
) -> String {
  let usable = |url: &String| !url.trim().is_empty();
  flag
    .map(ToString::to_string)
    .filter(usable)
    .or_else(|| env_value.filter(usable))
    .or_else(|| config.base_url.clone().filter(usable))
    .unwrap_or_else(|| yelp::DEFAULT_BASE_URL.to_string())
}

fn mask_key(key: &str) -> String {
  let visible: String = key.chars().take(4).collect();
  format!("{visible}… ({} chars)", key.chars().count())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(api_key: Option<&str>, base_url: Option<&str>) -> UserConfig {
    UserConfig {
      api_key: api_key.map(ToString::to_string),
      base_url: base_url.map(ToString::to_string),
    }
  }

  #[test]
  fn test_api_key_flag_wins() {
    let key = resolve_api_key(
      Some("flag"),
      Some("env".to_string()),
      &config(Some("file"), None),
    );
    assert_eq!(key.as_deref(), Some("flag"));
  }

  #[test]
  fn test_api_key_env_before_config_file() {
    let key =
      resolve_api_key(None, Some("env".to_string()), &config(Some("file"), None));
    assert_eq!(key.as_deref(), Some("env"));
  }

  #[test]
  fn test_api_key_from_config_file() {
    let key = resolve_api_key(None, None, &config(Some("file"), None));
    assert_eq!(key.as_deref(), Some("file"));
  }

  #[test]
  fn test_blank_env_key_falls_back_to_config_file() {
    let key =
      resolve_api_key(None, Some("  ".to_string()), &config(Some("file"), None));
    assert_eq!(key.as_deref(), Some("file"));
  }

  #[test]
  fn test_missing_or_blank_api_key() {
    assert!(resolve_api_key(None, None, &UserConfig::default()).is_none());
    assert!(
      resolve_api_key(None, Some("  ".to_string()), &UserConfig::default())
        .is_none()
    );
  }

  #[test]
  fn test_base_url_precedence() {
    let file = config(None, Some("http://file"));
    assert_eq!(
      resolve_base_url(Some("http://flag"), Some("http://env".into()), &file),
      "http://flag"
    );
    assert_eq!(
      resolve_base_url(None, Some("http://env".into()), &file),
      "http://env"
    );
    assert_eq!(resolve_base_url(None, None, &file), "http://file");
    assert_eq!(
      resolve_base_url(None, Some(String::new()), &UserConfig::default()),
      yelp::DEFAULT_BASE_URL
    );
  }

  #[test]
  fn test_blank_base_url_values_are_ignored() {
    assert_eq!(
      resolve_base_url(Some(""), None, &UserConfig::default()),
      yelp::DEFAULT_BASE_URL
    );
    assert_eq!(
      resolve_base_url(Some(" "), None, &config(None, Some("http://file"))),
      "http://file"
    );
    assert_eq!(
      resolve_base_url(None, Some("  ".into()), &config(None, Some(""))),
      yelp::DEFAULT_BASE_URL
    );
  }

  #[test]
  fn test_mask_key() {
    assert_eq!(mask_key("abcdefghij"), "abcd… (10 chars)");
    assert_eq!(mask_key("ab"), "ab… (2 chars)");
  }
}
