//! Country display names for the codes the API source can serve.
//! Immutable configuration data.

pub const COUNTRIES: &[(&str, &str)] = &[
    ("us", "United States"),
    ("gb", "United Kingdom"),
    ("in", "India"),
    ("ca", "Canada"),
    ("au", "Australia"),
    ("de", "Germany"),
    ("fr", "France"),
    ("it", "Italy"),
    ("es", "Spain"),
    ("jp", "Japan"),
    ("cn", "China"),
    ("ru", "Russia"),
    ("br", "Brazil"),
    ("mx", "Mexico"),
    ("za", "South Africa"),
    ("ng", "Nigeria"),
    ("eg", "Egypt"),
    ("ae", "UAE"),
    ("sa", "Saudi Arabia"),
    ("kr", "South Korea"),
    ("sg", "Singapore"),
    ("my", "Malaysia"),
    ("id", "Indonesia"),
    ("ph", "Philippines"),
    ("th", "Thailand"),
    ("vn", "Vietnam"),
    ("nz", "New Zealand"),
    ("ie", "Ireland"),
    ("nl", "Netherlands"),
    ("be", "Belgium"),
    ("ch", "Switzerland"),
    ("at", "Austria"),
    ("se", "Sweden"),
    ("no", "Norway"),
    ("dk", "Denmark"),
    ("fi", "Finland"),
    ("pl", "Poland"),
    ("tr", "Turkey"),
    ("ar", "Argentina"),
    ("cl", "Chile"),
    ("co", "Colombia"),
    ("pe", "Peru"),
];

pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_name() {
        assert_eq!(country_name("us"), Some("United States"));
        assert_eq!(country_name("xx"), None);
    }
}
