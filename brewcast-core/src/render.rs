//! Results page rendering.
//!
//! Three HTML templates are filled by plain token substitution: every literal
//! `{%TOKEN%}` marker is replaced with its value. Per-item cards are rendered
//! first and concatenated into the page template.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, Locale, TimeZone};
use tracing::{info, warn};

use crate::{
    Config,
    error::BrewcastError,
    model::{BreweryRecord, ForecastDay},
    slug::slugify,
};

const PAGE_FILE: &str = "results.html";
const BREWERY_CARD_FILE: &str = "breweryCard.html";
const WEATHER_CARD_FILE: &str = "weatherCard.html";

/// The page, brewery card and weather card templates, loaded once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub page: String,
    pub brewery_card: String,
    pub weather_card: String,
}

impl Templates {
    /// Templates compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            page: include_str!("../templates/results.html").to_string(),
            brewery_card: include_str!("../templates/breweryCard.html").to_string(),
            weather_card: include_str!("../templates/weatherCard.html").to_string(),
        }
    }

    /// Read the three templates from `dir`.
    pub fn load(dir: &Path) -> Result<Self, BrewcastError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|e| {
                BrewcastError::Config(format!("Failed to read template {}: {e}", path.display()))
            })
        };

        Ok(Self {
            page: read(PAGE_FILE)?,
            brewery_card: read(BREWERY_CARD_FILE)?,
            weather_card: read(WEATHER_CARD_FILE)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BrewcastError> {
        match &config.templates_dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::bundled()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    templates: Templates,
    locale: Locale,
    forecast_limit: usize,
    output_path: PathBuf,
}

impl Renderer {
    pub fn new(templates: Templates, locale: &str, forecast_limit: usize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            templates,
            locale: parse_locale(locale),
            forecast_limit,
            output_path: output_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, BrewcastError> {
        Ok(Self::new(
            Templates::from_config(config)?,
            &config.locale,
            config.forecast_days,
            &config.output_path,
        ))
    }

    /// Build the full results page.
    pub fn render(&self, breweries: &[BreweryRecord], forecast: &[ForecastDay], state: &str, city: &str) -> String {
        let weather_html = self.weather_cards(forecast);
        let brewery_html = self.brewery_cards(breweries);
        let today = readable_date(&Local::now(), self.locale);

        self.templates
            .page
            .replace("{%DATE%}", &today)
            .replace("{%CITY%}", &escape_html(city))
            .replace("{%STATE%}", &escape_html(state))
            .replace("{%WEATHER%}", &weather_html)
            .replace("{%BREWERIES%}", &brewery_html)
    }

    /// Render and write the page to the configured output path.
    ///
    /// Returns `None` when the page could not be written; the failure is logged.
    pub fn publish(
        &self,
        breweries: &[BreweryRecord],
        forecast: &[ForecastDay],
        state: &str,
        city: &str,
    ) -> Option<PathBuf> {
        let page = self.render(breweries, forecast, state, city);

        match write_page(&self.output_path, &page) {
            Ok(()) => {
                info!("Page generated at {}", self.output_path.display());
                Some(self.output_path.clone())
            }
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    fn brewery_cards(&self, breweries: &[BreweryRecord]) -> String {
        breweries
            .iter()
            .enumerate()
            .map(|(index, brewery)| {
                self.templates
                    .brewery_card
                    .replace("{%NAME%}", &escape_html(text(&brewery.name)))
                    .replace("{%ADDRESSLINK%}", &map_link(brewery))
                    .replace("{%ADDRESS%}", &escape_html(&brewery_address(brewery)))
                    .replace("{%PHONENUMBER%}", &escape_html(text(&brewery.phone)))
                    .replace("{%WEBSITELINK%}", &escape_html(&website_link(brewery.website_url.as_deref())))
                    .replace("{%COLOR%}", shade(index))
            })
            .collect()
    }

    fn weather_cards(&self, forecast: &[ForecastDay]) -> String {
        forecast
            .iter()
            .take(self.forecast_limit)
            .enumerate()
            .map(|(index, day)| {
                let date = DateTime::from_timestamp(day.day, 0)
                    .map(|utc| readable_date(&utc.with_timezone(&Local), self.locale))
                    .unwrap_or_default();

                self.templates
                    .weather_card
                    .replace("{%DATE%}", &date)
                    .replace("{%WEATHERICON%}", &icon_link(&day.icon))
                    .replace("{%TEMPERATURE%}", &rounded(day.temp))
                    .replace("{%WIND%}", &rounded(day.wind_speed))
                    .replace("{%HUMIDITY%}", &day.humidity.to_string())
                    .replace("{%COLOR%}", shade(index))
            })
            .collect()
    }
}

fn write_page(path: &Path, page: &str) -> Result<(), BrewcastError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BrewcastError::file_write(parent, e))?;
    }
    fs::write(path, page).map_err(|e| BrewcastError::file_write(path, e))
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or_default()
}

fn shade(index: usize) -> &'static str {
    if index % 2 == 0 { "dark" } else { "light" }
}

fn rounded(value: f64) -> String {
    (value.round() as i64).to_string()
}

/// `street, address_2, address_3, city, state postal_code`, skipping empty parts.
pub fn brewery_address(brewery: &BreweryRecord) -> String {
    let lines: Vec<&str> = [&brewery.street, &brewery.address_2, &brewery.address_3]
        .into_iter()
        .map(text)
        .chain([text(&brewery.city)])
        .filter(|s| !s.is_empty())
        .collect();

    let region = [text(&brewery.state), text(&brewery.postal_code)]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    lines
        .into_iter()
        .chain((!region.is_empty()).then_some(region.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Google Maps search link for the brewery, e.g.
/// `http://maps.google.com/maps?q=ardent+craft+ales+richmond+virginia`.
pub fn map_link(brewery: &BreweryRecord) -> String {
    let terms: Vec<String> = [&brewery.name, &brewery.city, &brewery.state]
        .into_iter()
        .map(|f| slugify(text(f), '+'))
        .filter(|s| !s.is_empty())
        .collect();

    format!("http://maps.google.com/maps?q={}", terms.join("+"))
}

/// Website URL without surrounding whitespace or its `http(s)://` prefix.
pub fn website_link(url: Option<&str>) -> String {
    let url = url.unwrap_or_default().trim();
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
        .to_string()
}

pub fn icon_link(icon: &str) -> String {
    format!("http://openweathermap.org/img/w/{icon}.png")
}

/// Long, localized date such as "Tuesday, November 14".
pub fn readable_date<Tz: TimeZone>(date: &DateTime<Tz>, locale: Locale) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format_localized("%A, %B %-d", locale).to_string()
}

/// Accepts BCP 47 style tags ("en-us", "fr-FR") as well as POSIX ones ("de_DE").
pub fn parse_locale(tag: &str) -> Locale {
    let tag = tag.trim().replace('-', "_");
    let normalized = match tag.split_once('_') {
        Some((lang, region)) => format!("{}_{}", lang.to_lowercase(), region.to_uppercase()),
        None => tag.to_lowercase(),
    };

    Locale::try_from(normalized.as_str()).unwrap_or_else(|_| {
        warn!("Unknown locale '{tag}', falling back to en_US");
        Locale::en_US
    })
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn brewery(name: &str, street: Option<&str>, postal_code: Option<&str>) -> BreweryRecord {
        BreweryRecord {
            name: Some(name.to_string()),
            street: street.map(String::from),
            city: Some("Richmond".into()),
            state: Some("Virginia".into()),
            postal_code: postal_code.map(String::from),
            phone: Some("8043592739".into()),
            website_url: Some("http://www.ardentcraftales.com".into()),
            ..Default::default()
        }
    }

    fn day(dt: i64, temp: f64, wind_speed: f64) -> ForecastDay {
        ForecastDay { day: dt, temp, wind_speed, humidity: 40, icon: "01d".into() }
    }

    fn renderer(limit: usize) -> Renderer {
        Renderer::new(Templates::bundled(), "en-US", limit, "resultsPage.html")
    }

    #[test]
    fn address_joins_present_parts() {
        let b = brewery("Ardent", Some("123 Main St"), Some("23220"));
        assert_eq!(brewery_address(&b), "123 Main St, Richmond, Virginia 23220");
    }

    #[test]
    fn address_includes_secondary_lines() {
        let mut b = brewery("Ardent", Some("123 Main St"), Some("23220"));
        b.address_2 = Some("Suite 4".into());
        b.address_3 = Some(" ".into());
        assert_eq!(brewery_address(&b), "123 Main St, Suite 4, Richmond, Virginia 23220");
    }

    #[test]
    fn address_without_street_or_postal_code_has_no_stray_punctuation() {
        assert_eq!(brewery_address(&brewery("Ardent", None, Some("23220"))), "Richmond, Virginia 23220");
        assert_eq!(brewery_address(&brewery("Ardent", None, None)), "Richmond, Virginia");
        assert_eq!(brewery_address(&BreweryRecord::default()), "");
    }

    #[test]
    fn map_link_uses_plus_slugs() {
        let b = brewery("Ardent Craft Ales", None, None);
        assert_eq!(map_link(&b), "http://maps.google.com/maps?q=ardent+craft+ales+richmond+virginia");
    }

    #[test]
    fn website_link_drops_protocol() {
        assert_eq!(website_link(Some("  https://www.example.com/beer ")), "www.example.com/beer");
        assert_eq!(website_link(Some("http://example.com")), "example.com");
        assert_eq!(website_link(Some("example.com")), "example.com");
        assert_eq!(website_link(None), "");
    }

    #[test]
    fn empty_results_still_fill_page_tokens() {
        let page = renderer(5).render(&[], &[], "Virginia", "Richmond");

        assert!(!page.contains("{%"));
        assert!(page.contains("<h1>Richmond, Virginia</h1>"));
        assert!(page.contains(r#"<section class="cards weather"></section>"#));
        assert!(page.contains(r#"<section class="cards breweries"></section>"#));
    }

    #[test]
    fn weather_cards_round_values_and_respect_limit() {
        let days: Vec<_> = (0..7).map(|i| day(1700000000 + i * 86400, 71.4, 5.6)).collect();
        let page = renderer(5).render(&[], &days, "Virginia", "Richmond");

        assert_eq!(page.matches("forecast icon").count(), 5);
        assert!(page.contains("High: 71&deg;F"));
        assert!(page.contains("Wind: 6 mph"));
        assert!(page.contains("Humidity: 40%"));
        assert!(page.contains("http://openweathermap.org/img/w/01d.png"));
        assert!(page.contains("November"));
    }

    #[test]
    fn cards_alternate_dark_and_light() {
        let breweries = vec![
            brewery("One", Some("1 A St"), None),
            brewery("Two", Some("2 B St"), None),
            brewery("Three", Some("3 C St"), None),
        ];
        let page = renderer(5).render(&breweries, &[], "Virginia", "Richmond");

        let shades: Vec<_> = page
            .match_indices("card card--")
            .map(|(i, _)| &page[i + 11..i + 15])
            .collect();
        assert_eq!(shades, vec!["dark", "ligh", "dark"]);
        assert!(page.contains("1 A St, Richmond, Virginia"));
        assert!(page.contains(r#"href="http://www.ardentcraftales.com""#));
    }

    #[test]
    fn text_values_are_escaped() {
        let b = brewery("Hops & <Barley>", None, None);
        let page = renderer(5).render(&[b], &[], "Virginia", "Richmond");
        assert!(page.contains("Hops &amp; &lt;Barley&gt;"));
    }

    #[test]
    fn locale_tags_are_normalized() {
        assert_eq!(parse_locale("en-us"), Locale::en_US);
        assert_eq!(parse_locale("fr-FR"), Locale::fr_FR);
        assert_eq!(parse_locale("de_DE"), Locale::de_DE);
        assert_eq!(parse_locale("klingon"), Locale::en_US);
    }

    #[test]
    fn readable_date_is_localized() {
        let date = DateTime::from_timestamp(1700000000, 0).unwrap();
        assert_eq!(readable_date(&date, Locale::en_US), "Tuesday, November 14");
        assert!(readable_date(&date, Locale::fr_FR).contains("novembre"));
    }

    #[test]
    fn publish_writes_page_to_nested_path() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("site/results.html");
        let renderer = Renderer::new(Templates::bundled(), "en-US", 5, &out);

        let written = renderer.publish(&[], &[], "Virginia", "Richmond");
        assert_eq!(written.as_deref(), Some(out.as_path()));
        assert!(fs::read_to_string(&out).unwrap().contains("Richmond"));
    }

    #[test]
    fn publish_failure_returns_none() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let renderer = Renderer::new(Templates::bundled(), "en-US", 5, blocker.join("page.html"));
        assert!(renderer.publish(&[], &[], "Virginia", "Richmond").is_none());
    }

    #[test]
    fn templates_load_from_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PAGE_FILE), "<p>{%CITY%}|{%WEATHER%}|{%BREWERIES%}</p>").unwrap();
        fs::write(temp.path().join(BREWERY_CARD_FILE), "[{%NAME%}]").unwrap();
        fs::write(temp.path().join(WEATHER_CARD_FILE), "({%TEMPERATURE%})").unwrap();

        let templates = Templates::load(temp.path()).unwrap();
        let renderer = Renderer::new(templates, "en-US", 5, "unused.html");
        let page = renderer.render(&[brewery("Ardent", None, None)], &[day(1700000000, 71.4, 5.6)], "VA", "Richmond");

        assert_eq!(page, "<p>Richmond|(71)|[Ardent]</p>");
    }

    #[test]
    fn missing_template_is_config_error() {
        let temp = TempDir::new().unwrap();
        let err = Templates::load(temp.path()).unwrap_err();
        assert!(matches!(err, BrewcastError::Config(_)));
        assert!(err.to_string().contains(PAGE_FILE));
    }
}
