//! Delegation Registry
//!
//! Static country profiles and committee names used to personalize prompts.
//! Lookups never fail: unknown countries get the neutral default profile and
//! unknown committee codes are echoed back.

/// Stance, allies and priorities of a delegation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryProfile {
    pub name: &'static str,
    pub stance: &'static str,
    pub allies: &'static [&'static str],
    pub priorities: &'static [&'static str],
}

/// Profile used for any country without an entry
pub const DEFAULT_PROFILE: CountryProfile = CountryProfile {
    name: "",
    stance: "Neutral",
    allies: &["Various"],
    priorities: &["Peace", "Development"],
};

/// Committee short code and display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Committee {
    pub code: &'static str,
    pub name: &'static str,
}

const COMMITTEES: &[Committee] = &[
    Committee {
        code: "UNSC",
        name: "United Nations Security Council",
    },
    Committee {
        code: "UNGA",
        name: "United Nations General Assembly",
    },
    Committee {
        code: "ECOSOC",
        name: "Economic and Social Council",
    },
    Committee {
        code: "HRC",
        name: "Human Rights Council",
    },
    Committee {
        code: "UNEP",
        name: "United Nations Environment Programme",
    },
    Committee {
        code: "WHO",
        name: "World Health Organization",
    },
    Committee {
        code: "UNESCO",
        name: "United Nations Educational, Scientific and Cultural Organization",
    },
];

const COUNTRY_PROFILES: &[CountryProfile] = &[
    CountryProfile {
        name: "USA",
        stance: "Western democratic",
        allies: &["UK", "France", "Canada"],
        priorities: &["Security", "Democracy", "Free Trade"],
    },
    CountryProfile {
        name: "Russia",
        stance: "Eastern power",
        allies: &["China", "Belarus"],
        priorities: &["Sovereignty", "Security", "Energy"],
    },
    CountryProfile {
        name: "China",
        stance: "Rising power",
        allies: &["Russia", "Pakistan"],
        priorities: &["Development", "Sovereignty", "Trade"],
    },
    CountryProfile {
        name: "UK",
        stance: "Western ally",
        allies: &["USA", "France"],
        priorities: &["Democracy", "Human Rights", "Trade"],
    },
    CountryProfile {
        name: "France",
        stance: "European leader",
        allies: &["Germany", "UK"],
        priorities: &["Multilateralism", "Climate", "Culture"],
    },
    CountryProfile {
        name: "Germany",
        stance: "European power",
        allies: &["France", "EU"],
        priorities: &["Environment", "Economy", "Peace"],
    },
    CountryProfile {
        name: "India",
        stance: "Non-aligned",
        allies: &["Various"],
        priorities: &["Development", "South-South Cooperation"],
    },
    CountryProfile {
        name: "Brazil",
        stance: "Regional power",
        allies: &["BRICS"],
        priorities: &["Environment", "Development", "Regional Stability"],
    },
    CountryProfile {
        name: "South Africa",
        stance: "African leader",
        allies: &["AU"],
        priorities: &["Human Rights", "Development", "Peace"],
    },
    CountryProfile {
        name: "Japan",
        stance: "Asian democracy",
        allies: &["USA"],
        priorities: &["Security", "Technology", "Regional Stability"],
    },
];

/// Selectable countries that have no dedicated profile
const EXTRA_COUNTRIES: &[&str] = &[
    "Netherlands",
    "Sweden",
    "Norway",
    "Australia",
    "Canada",
    "Mexico",
    "Argentina",
    "Nigeria",
    "Egypt",
    "Iran",
    "Turkey",
    "Indonesia",
    "Thailand",
    "Philippines",
    "Kenya",
    "Morocco",
];

/// Read-only lookup tables handed to the prompt composer
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    countries: &'static [CountryProfile],
    committees: &'static [Committee],
    extra_countries: &'static [&'static str],
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Built-in tables
    pub const fn builtin() -> Self {
        Self {
            countries: COUNTRY_PROFILES,
            committees: COMMITTEES,
            extra_countries: EXTRA_COUNTRIES,
        }
    }

    /// Custom tables
    pub const fn new(
        countries: &'static [CountryProfile],
        committees: &'static [Committee],
    ) -> Self {
        Self {
            countries,
            committees,
            extra_countries: &[],
        }
    }

    /// Profile for `country`, or the default profile
    pub fn country(&self, country: &str) -> &CountryProfile {
        self.countries
            .iter()
            .find(|p| p.name == country)
            .unwrap_or(&DEFAULT_PROFILE)
    }

    /// Whether `country` has a dedicated profile
    pub fn has_profile(&self, country: &str) -> bool {
        self.countries.iter().any(|p| p.name == country)
    }

    /// Display name for a committee code, or the code itself
    pub fn committee_name<'a>(&self, code: &'a str) -> &'a str {
        self.committees
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name)
            .unwrap_or(code)
    }

    pub fn committees(&self) -> &'static [Committee] {
        self.committees
    }

    pub fn profiles(&self) -> &'static [CountryProfile] {
        self.countries
    }

    /// All selectable country names, sorted
    pub fn country_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .countries
            .iter()
            .map(|p| p.name)
            .chain(self.extra_countries.iter().copied())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
