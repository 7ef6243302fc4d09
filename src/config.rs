use crate::error::{Error, Result};
use crate::types::Chamber;
use chrono::{Datelike, NaiveDate};

/// Year of the first state legislature
const FIRST_SESSION_YEAR: i32 = 1912;

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON document per line
    #[default]
    Json,
    /// Plain-text rendering
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(Error::Config(format!(
                "Invalid output format '{}'. Allowed values are: json, text",
                s
            ))),
        }
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Settings for history normalization and output
#[derive(Debug, Clone)]
pub struct Config {
    /// Calendar date of legislative day 1
    pub session_start: NaiveDate,
    /// Chamber where the bill was introduced
    pub origin_chamber: Chamber,
    pub output: OutputFormat,
}

impl Config {
    /// Create a configuration for a session starting on `session_start`
    pub fn new(session_start: NaiveDate) -> Self {
        Self {
            session_start,
            origin_chamber: Chamber::House,
            output: OutputFormat::Json,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.session_start.year() < FIRST_SESSION_YEAR {
            return Err(Error::Config(format!(
                "Session start {} predates the first state legislature ({})",
                self.session_start, FIRST_SESSION_YEAR
            )));
        }

        Ok(())
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    session_start: Option<NaiveDate>,
    origin_chamber: Option<Chamber>,
    output: OutputFormat,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session start date
    pub fn session_start(mut self, date: NaiveDate) -> Self {
        self.session_start = Some(date);
        self
    }

    /// Set the session start date from `YYYY-MM-DD`
    pub fn session_start_str(mut self, date: &str) -> Result<Self> {
        self.session_start = Some(parse_date(date)?);
        Ok(self)
    }

    /// Set the chamber of origin
    pub fn origin_chamber(mut self, chamber: Chamber) -> Self {
        self.origin_chamber = Some(chamber);
        self
    }

    /// Set the chamber of origin from `H`/`S`
    pub fn chamber_str(mut self, chamber: &str) -> Result<Self> {
        self.origin_chamber = Some(chamber.parse()?);
        Ok(self)
    }

    /// Set the output format
    pub fn output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set the output format from string
    pub fn output_str(mut self, output: &str) -> Result<Self> {
        self.output = output.parse()?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        let session_start = self
            .session_start
            .ok_or_else(|| Error::Config("Session start date is required".to_string()))?;

        let mut config = Config::new(session_start);
        if let Some(chamber) = self.origin_chamber {
            config.origin_chamber = chamber;
        }
        config.output = self.output;

        config.validate()?;
        Ok(config)
    }
}
