//! Countries offered by the picker, in display order, with the query sent to the news provider.

/// (display name, provider query)
const COUNTRIES: [(&str, &str); 6] = [
    ("Romania", "romania"),
    ("Moldova", "moldova"),
    ("USA", "us"),
    ("Ucraine", "ucraine"),
    ("Germany", "germany"),
    ("Russian", "russian"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub query: &'static str,
}

/// Fixed, ordered country table. Lookup is by exact (case-sensitive) display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountrySelection;

impl CountrySelection {
    pub fn all() -> impl Iterator<Item = Country> {
        COUNTRIES
            .iter()
            .map(|&(name, query)| Country { name, query })
    }

    pub fn resolve(name: &str) -> Option<Country> {
        Self::all().find(|c| c.name == name)
    }
}
