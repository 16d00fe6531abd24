//! Dialing codes offered by the registration form.

/// One selectable country in the dialing-code picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub iso: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
}

pub static COUNTRY_CODES: [Country; 10] = [
    Country { code: "+1", iso: "US", flag: "🇺🇸", name: "United States" },
    Country { code: "+44", iso: "GB", flag: "🇬🇧", name: "United Kingdom" },
    Country { code: "+91", iso: "IN", flag: "🇮🇳", name: "India" },
    Country { code: "+86", iso: "CN", flag: "🇨🇳", name: "China" },
    Country { code: "+81", iso: "JP", flag: "🇯🇵", name: "Japan" },
    Country { code: "+49", iso: "DE", flag: "🇩🇪", name: "Germany" },
    Country { code: "+33", iso: "FR", flag: "🇫🇷", name: "France" },
    Country { code: "+61", iso: "AU", flag: "🇦🇺", name: "Australia" },
    Country { code: "+55", iso: "BR", flag: "🇧🇷", name: "Brazil" },
    Country { code: "+7", iso: "RU", flag: "🇷🇺", name: "Russia" },
];

/// Looks up a dialing code, falling back to the first entry (United States).
pub fn find_country(code: &str) -> &'static Country {
    COUNTRY_CODES
        .iter()
        .find(|c| c.code == code)
        .unwrap_or(&COUNTRY_CODES[0])
}

impl Country {
    /// `🇬🇧 United Kingdom (+44)`
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.flag, self.name, self.code)
    }
}
