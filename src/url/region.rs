use crate::ScrapeError;
use std::fmt;
use std::str::FromStr;

/// Scheme and host prefix shared by every regional storefront
pub const BASE_URL: &str = "https://www.amazon";

/// Regional storefronts, keyed by two-letter country code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Au,
    Br,
    Ca,
    Cn,
    De,
    Es,
    Fr,
    In,
    It,
    Jp,
    Mx,
    Nl,
    Sg,
    Uk,
    Us,
}

impl Region {
    /// Every region in code order
    pub const ALL: [Region; 15] = [
        Self::Au,
        Self::Br,
        Self::Ca,
        Self::Cn,
        Self::De,
        Self::Es,
        Self::Fr,
        Self::In,
        Self::It,
        Self::Jp,
        Self::Mx,
        Self::Nl,
        Self::Sg,
        Self::Uk,
        Self::Us,
    ];

    /// Returns the uppercase two-letter code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Au => "AU",
            Self::Br => "BR",
            Self::Ca => "CA",
            Self::Cn => "CN",
            Self::De => "DE",
            Self::Es => "ES",
            Self::Fr => "FR",
            Self::In => "IN",
            Self::It => "IT",
            Self::Jp => "JP",
            Self::Mx => "MX",
            Self::Nl => "NL",
            Self::Sg => "SG",
            Self::Uk => "UK",
            Self::Us => "US",
        }
    }

    /// Returns the domain suffix appended to [`BASE_URL`]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Au => ".com.au",
            Self::Br => ".com.br",
            Self::Ca => ".ca",
            Self::Cn => ".cn",
            Self::De => ".de",
            Self::Es => ".es",
            Self::Fr => ".fr",
            Self::In => ".in",
            Self::It => ".it",
            Self::Jp => ".co.jp",
            Self::Mx => ".com.mx",
            Self::Nl => ".nl",
            Self::Sg => ".com.sg",
            Self::Uk => ".co.uk",
            Self::Us => ".com",
        }
    }

    /// Returns the storefront root, e.g. `https://www.amazon.co.uk`
    pub fn base_url(&self) -> String {
        format!("{}{}", BASE_URL, self.suffix())
    }
}

impl FromStr for Region {
    type Err = ScrapeError;

    /// Parses a region code, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.code() == code)
            .ok_or_else(|| ScrapeError::InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Builds the storefront root for a region code
///
/// # Examples
///
/// ```
/// use skyquake::url::build_base_url;
///
/// assert_eq!(build_base_url("UK").unwrap(), "https://www.amazon.co.uk");
/// assert_eq!(build_base_url("us").unwrap(), "https://www.amazon.com");
/// assert!(build_base_url("ZZ").is_err());
/// ```
pub fn build_base_url(code: &str) -> Result<String, ScrapeError> {
    code.parse::<Region>().map(|region| region.base_url())
}
