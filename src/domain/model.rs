use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// One university as it appears in the world universities dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub country: String,
    #[serde(rename = "state-province", default)]
    pub state_province: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domains: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub web_pages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_two_code: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl University {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            state_province: None,
            domains: Vec::new(),
            web_pages: Vec::new(),
            alpha_two_code: None,
        }
    }

    pub fn with_province(mut self, province: impl Into<String>) -> Self {
        self.state_province = Some(province.into());
        self
    }

    pub fn with_web_page(mut self, page: impl Into<String>) -> Self {
        self.web_pages.push(page.into());
        self
    }

    /// 空字串視同沒有省份
    pub fn province(&self) -> Option<&str> {
        self.state_province.as_deref().filter(|p| !p.is_empty())
    }

    pub fn has_website(&self) -> bool {
        !self.web_pages.is_empty()
    }

    /// A record is importable only when both required fields carry text.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.country.trim().is_empty()
    }
}

/// Fields the store can group on or take distinct values of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Country,
    StateProvince,
}

impl GroupField {
    pub fn value_of<'a>(&self, university: &'a University) -> Option<&'a str> {
        match self {
            GroupField::Country => Some(university.country.as_str()).filter(|c| !c.is_empty()),
            GroupField::StateProvince => university.province(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProvinceFilter {
    #[default]
    Any,
    Equals(String),
    Missing,
}

/// Conjunction of optional constraints; the default filter matches every record.
#[derive(Debug, Clone, Default)]
pub struct UniversityFilter {
    pub country: Option<String>,
    pub province: ProvinceFilter,
    pub name: Option<String>,
    pub name_pattern: Option<Regex>,
    pub has_website: Option<bool>,
}

impl UniversityFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_country(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name_matching(pattern: Regex) -> Self {
        Self {
            name_pattern: Some(pattern),
            ..Self::default()
        }
    }

    pub fn with_province(mut self, province: ProvinceFilter) -> Self {
        self.province = province;
        self
    }

    pub fn with_website(mut self, has_website: bool) -> Self {
        self.has_website = Some(has_website);
        self
    }

    pub fn matches(&self, university: &University) -> bool {
        if let Some(country) = &self.country {
            if &university.country != country {
                return false;
            }
        }

        let province_ok = match &self.province {
            ProvinceFilter::Any => true,
            ProvinceFilter::Equals(p) => university.province() == Some(p.as_str()),
            ProvinceFilter::Missing => university.province().is_none(),
        };
        if !province_ok {
            return false;
        }

        if let Some(name) = &self.name {
            if &university.name != name {
                return false;
            }
        }

        if let Some(has_website) = self.has_website {
            if university.has_website() != has_website {
                return false;
            }
        }

        match &self.name_pattern {
            Some(pattern) => pattern.is_match(&university.name),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceCount {
    pub province: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_universities: u64,
    pub total_countries: u64,
    pub total_provinces: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub country: String,
    pub total: u64,
    pub provinces: Vec<ProvinceCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceBreakdown {
    pub country: String,
    pub provinces: Vec<ProvinceCount>,
    pub universities: Vec<University>,
    pub total_in_country: u64,
    pub without_province: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionStats {
    pub total_countries: u64,
    pub avg_per_country: f64,
    pub max_count: u64,
    pub min_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDistribution {
    pub countries: Vec<CountryCount>,
    pub stats: DistributionStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebsitePresence {
    pub with_website: u64,
    pub without_website: u64,
}

impl WebsitePresence {
    pub fn total(&self) -> u64 {
        self.with_website + self.without_website
    }

    fn ratio_percent(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.with_website as f64 / total as f64 * 100.0,
        }
    }

    /// Whole-number percentage shown on the dashboard cards.
    pub fn percentage_rounded(&self) -> u64 {
        self.ratio_percent().round() as u64
    }

    /// Two-decimal percentage string used by the detailed website report.
    /// Exact `.xx5` ties round half-up rather than half-to-even.
    pub fn percentage_two_decimals(&self) -> String {
        let percent = self.ratio_percent();
        let thousandths = percent * 1000.0;
        if thousandths.fract() == 0.0 && thousandths % 10.0 == 5.0 {
            let hundredths = (thousandths as u64 + 5) / 10;
            return format!("{}.{:02}", hundredths / 100, hundredths % 100);
        }
        format!("{:.2}", percent)
    }
}

/// Result caps and per-endpoint defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    pub list_limit: usize,
    pub search_limit: usize,
    pub top_countries_default: usize,
    pub by_country_default: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            list_limit: 100,
            search_limit: 50,
            top_countries_default: 15,
            by_country_default: 30,
        }
    }
}

/// Output of the seed pipeline's transform step.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub records: Vec<University>,
    pub rejected: usize,
}
