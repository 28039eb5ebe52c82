//! Selectable measurement columns

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement column plotted on the y-axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// User CPU time, seconds
    #[default]
    User,
    /// System CPU time, seconds
    Sys,
    /// Peak resident set size, kilobytes
    Maxrss,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::User, Metric::Sys, Metric::Maxrss];

    /// Column name in the results file
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::User => "user",
            Metric::Sys => "sys",
            Metric::Maxrss => "maxrss",
        }
    }

    /// Human-readable name for controls
    pub fn label(&self) -> &'static str {
        match self {
            Metric::User => "user time",
            Metric::Sys => "system time",
            Metric::Maxrss => "max RSS",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Metric::User),
            "sys" => Ok(Metric::Sys),
            "maxrss" => Ok(Metric::Maxrss),
            other => Err(format!(
                "Unknown metric: {} (expected user, sys or maxrss)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parse() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
        assert!("wall".parse::<Metric>().is_err());
        assert!("User".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_default_is_user() {
        assert_eq!(Metric::default(), Metric::User);
    }
}
